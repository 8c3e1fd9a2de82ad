// mesa/app/src/test_support.rs

//! In-memory stand-ins for PostgreSQL and the payment provider.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mesa::{OrderStatus, TaxId};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::db::{CatalogRepository, OrderRepository, Repositories, RestaurantRepository};
use crate::errors::{AppError, Result};
use crate::models::{
  MenuCategory, MenuSection, NewOrder, Order, OrderItem, OrderItemDetails, OrderRestaurant, OrderSummary, Product,
  ProductDetails, Restaurant, RestaurantBrand,
};
use crate::services::hosted_checkout::{CheckoutSession, CheckoutSessionRequest, HostedCheckout};
use crate::state::AppState;

#[derive(Default)]
struct Tables {
  restaurants: Vec<Restaurant>,
  categories: Vec<MenuCategory>,
  products: Vec<Product>,
  orders: Vec<Order>,
}

#[derive(Default)]
pub struct InMemoryStore {
  tables: Mutex<Tables>,
}

impl InMemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds a restaurant with a single "Menu" category.
  pub fn add_restaurant(&self, slug: &str, name: &str) -> Restaurant {
    let restaurant = Restaurant {
      id: Uuid::new_v4(),
      slug: slug.to_string(),
      name: name.to_string(),
      description: format!("{} test restaurant", name),
      avatar_image_url: format!("https://cdn.example.com/{}/avatar.png", slug),
      cover_image_url: format!("https://cdn.example.com/{}/cover.png", slug),
      created_at: Utc::now(),
    };
    let mut tables = self.tables.lock();
    tables.categories.push(MenuCategory {
      id: Uuid::new_v4(),
      restaurant_id: restaurant.id,
      name: "Menu".to_string(),
    });
    tables.restaurants.push(restaurant.clone());
    restaurant
  }

  pub fn add_product(&self, restaurant_id: Uuid, name: &str, price: Decimal) -> Product {
    let mut tables = self.tables.lock();
    let menu_category_id = tables
      .categories
      .iter()
      .find(|c| c.restaurant_id == restaurant_id)
      .map(|c| c.id)
      .expect("add_restaurant first");
    let product = Product {
      id: Uuid::new_v4(),
      restaurant_id,
      menu_category_id,
      name: name.to_string(),
      description: format!("{} description", name),
      price,
      image_url: format!("https://cdn.example.com/products/{}.png", name.to_lowercase()),
      ingredients: vec![],
    };
    tables.products.push(product.clone());
    product
  }

  pub fn order_count(&self) -> usize {
    self.tables.lock().orders.len()
  }

  pub fn set_created_at(&self, order_id: Uuid, created_at: DateTime<Utc>) {
    let mut tables = self.tables.lock();
    if let Some(order) = tables.orders.iter_mut().find(|o| o.id == order_id) {
      order.created_at = created_at;
    }
  }
}

pub struct Acme {
  pub restaurant: Restaurant,
  /// `A`, 10.00
  pub product_a: Product,
  /// `B`, 5.00
  pub product_b: Product,
}

pub fn seed_acme(store: &InMemoryStore) -> Acme {
  let restaurant = store.add_restaurant("acme", "Acme Burgers");
  let product_a = store.add_product(restaurant.id, "A", Decimal::new(1000, 2));
  let product_b = store.add_product(restaurant.id, "B", Decimal::new(500, 2));
  Acme {
    restaurant,
    product_a,
    product_b,
  }
}

#[async_trait]
impl RestaurantRepository for InMemoryStore {
  async fn find_by_slug(&self, slug: &str) -> Result<Option<Restaurant>> {
    let tables = self.tables.lock();
    Ok(
      tables
        .restaurants
        .iter()
        .find(|r| r.slug.eq_ignore_ascii_case(slug))
        .cloned(),
    )
  }

  async fn menu_for(&self, restaurant_id: Uuid) -> Result<Vec<MenuSection>> {
    let tables = self.tables.lock();
    Ok(
      tables
        .categories
        .iter()
        .filter(|c| c.restaurant_id == restaurant_id)
        .map(|category| MenuSection {
          category: category.clone(),
          products: tables
            .products
            .iter()
            .filter(|p| p.menu_category_id == category.id)
            .cloned()
            .collect(),
        })
        .collect(),
    )
  }
}

#[async_trait]
impl CatalogRepository for InMemoryStore {
  async fn find_products(&self, restaurant_id: Uuid, ids: &[Uuid]) -> Result<Vec<Product>> {
    let tables = self.tables.lock();
    Ok(
      tables
        .products
        .iter()
        .filter(|p| p.restaurant_id == restaurant_id && ids.contains(&p.id))
        .cloned()
        .collect(),
    )
  }

  async fn find_product(&self, product_id: Uuid) -> Result<Option<ProductDetails>> {
    let tables = self.tables.lock();
    let Some(product) = tables.products.iter().find(|p| p.id == product_id) else {
      return Ok(None);
    };
    let restaurant = tables
      .restaurants
      .iter()
      .find(|r| r.id == product.restaurant_id)
      .ok_or_else(|| AppError::Internal("product without restaurant".to_string()))?;
    Ok(Some(ProductDetails {
      product: product.clone(),
      restaurant: RestaurantBrand {
        slug: restaurant.slug.clone(),
        name: restaurant.name.clone(),
        avatar_image_url: restaurant.avatar_image_url.clone(),
      },
    }))
  }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
  async fn create_order(&self, new_order: NewOrder) -> Result<Order> {
    let order = Order {
      id: Uuid::new_v4(),
      restaurant_id: new_order.restaurant_id,
      customer_name: new_order.customer_name.as_str().to_string(),
      customer_tax_id: new_order.customer_tax_id,
      status: OrderStatus::Pending,
      total: new_order.total,
      consumption_method: new_order.consumption_method,
      created_at: Utc::now(),
      line_items: new_order
        .line_items
        .into_iter()
        .map(|item| OrderItem {
          id: Uuid::new_v4(),
          product_id: item.product_id,
          product_name: item.name,
          quantity: item.quantity,
          price: item.unit_price,
        })
        .collect(),
    };
    self.tables.lock().orders.push(order.clone());
    Ok(order)
  }

  async fn list_by_tax_id(&self, tax_id: &TaxId) -> Result<Vec<OrderSummary>> {
    let tables = self.tables.lock();
    let images: HashMap<Uuid, &str> = tables.products.iter().map(|p| (p.id, p.image_url.as_str())).collect();

    let mut orders: Vec<&Order> = tables.orders.iter().filter(|o| &o.customer_tax_id == tax_id).collect();
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    orders
      .into_iter()
      .map(|order| -> Result<OrderSummary> {
        let restaurant = tables
          .restaurants
          .iter()
          .find(|r| r.id == order.restaurant_id)
          .ok_or_else(|| AppError::Internal("order without restaurant".to_string()))?;
        Ok(OrderSummary {
          id: order.id,
          status: order.status,
          total: order.total,
          consumption_method: order.consumption_method,
          created_at: order.created_at,
          restaurant: OrderRestaurant {
            name: restaurant.name.clone(),
            avatar_image_url: restaurant.avatar_image_url.clone(),
          },
          items: order
            .line_items
            .iter()
            .map(|item| OrderItemDetails {
              order_id: order.id,
              product_id: item.product_id,
              product_name: item.product_name.clone(),
              product_image_url: images.get(&item.product_id).copied().unwrap_or_default().to_string(),
              quantity: item.quantity as i32,
              price: item.price,
            })
            .collect(),
        })
      })
      .collect()
  }
}

/// Remembers every session request; optionally fails them all like an unreachable provider.
#[derive(Default)]
pub struct RecordingCheckout {
  requests: Mutex<Vec<CheckoutSessionRequest>>,
  fail: bool,
}

impl RecordingCheckout {
  pub fn failing() -> Self {
    Self {
      fail: true,
      ..Self::default()
    }
  }

  pub fn requests(&self) -> Vec<CheckoutSessionRequest> {
    self.requests.lock().clone()
  }
}

#[async_trait]
impl HostedCheckout for RecordingCheckout {
  fn provider_name(&self) -> &'static str {
    "recording"
  }

  async fn create_session(&self, request: &CheckoutSessionRequest) -> Result<CheckoutSession> {
    let mut requests = self.requests.lock();
    requests.push(request.clone());
    if self.fail {
      return Err(AppError::Payment("provider unreachable".to_string()));
    }
    let session_id = format!("test_cs_{}", requests.len());
    Ok(CheckoutSession {
      redirect_url: format!("https://pay.example.com/{}", session_id),
      session_id,
    })
  }
}

pub fn test_config() -> AppConfig {
  let vars: HashMap<&str, &str> = HashMap::from([
    ("DATABASE_URL", "postgres://localhost/mesa_test"),
    ("APP_BASE_URL", "http://localhost:8080"),
  ]);
  AppConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).expect("test config")
}

pub fn test_state(store: Arc<InMemoryStore>, checkout: Arc<RecordingCheckout>) -> AppState {
  AppState::new(Arc::new(test_config()), Repositories::from_store(store), checkout).expect("test state")
}
