// mesa/app/src/db/mod.rs

//! Storage seams. Services only see these traits; `PgStore` backs them in production.

pub mod postgres;
pub mod seed;

use async_trait::async_trait;
use mesa::TaxId;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::Result;
use crate::models::{MenuSection, NewOrder, Order, OrderSummary, Product, ProductDetails, Restaurant};

pub use postgres::PgStore;

#[async_trait]
pub trait RestaurantRepository: Send + Sync {
  /// Case-insensitive slug lookup.
  async fn find_by_slug(&self, slug: &str) -> Result<Option<Restaurant>>;

  async fn menu_for(&self, restaurant_id: Uuid) -> Result<Vec<MenuSection>>;
}

#[async_trait]
pub trait CatalogRepository: Send + Sync {
  /// Products of `restaurant_id` among `ids`. Unknown ids are simply absent from the result.
  async fn find_products(&self, restaurant_id: Uuid, ids: &[Uuid]) -> Result<Vec<Product>>;

  async fn find_product(&self, product_id: Uuid) -> Result<Option<ProductDetails>>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
  /// Writes the order and all of its line items, or nothing at all.
  async fn create_order(&self, new_order: NewOrder) -> Result<Order>;

  /// Orders placed under `tax_id`, newest first.
  async fn list_by_tax_id(&self, tax_id: &TaxId) -> Result<Vec<OrderSummary>>;
}

/// The three repositories as trait objects, cheap to clone into handlers.
#[derive(Clone)]
pub struct Repositories {
  pub restaurants: Arc<dyn RestaurantRepository>,
  pub catalog: Arc<dyn CatalogRepository>,
  pub orders: Arc<dyn OrderRepository>,
}

impl Repositories {
  pub fn from_store<S>(store: Arc<S>) -> Self
  where
    S: RestaurantRepository + CatalogRepository + OrderRepository + 'static,
  {
    Self {
      restaurants: store.clone(),
      catalog: store.clone(),
      orders: store,
    }
  }
}
