// mesa/app/src/db/postgres.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mesa::{OrderStatus, TaxId};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::{CatalogRepository, OrderRepository, RestaurantRepository};
use crate::errors::{AppError, Result};
use crate::models::{
  MenuCategory, MenuSection, NewOrder, Order, OrderItem, OrderItemDetails, OrderRestaurant, OrderRow, OrderSummary,
  Product, ProductDetails, Restaurant, RestaurantBrand,
};

const PRODUCT_COLUMNS: &str =
  "p.id, p.restaurant_id, p.menu_category_id, p.name, p.description, p.price, p.image_url, p.ingredients";

#[derive(Debug, Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[derive(FromRow)]
struct ProductDetailsRow {
  #[sqlx(flatten)]
  product: Product,
  restaurant_slug: String,
  restaurant_name: String,
  restaurant_avatar_image_url: String,
}

#[derive(FromRow)]
struct OrderSummaryRow {
  id: Uuid,
  status: String,
  total: Decimal,
  consumption_method: String,
  created_at: DateTime<Utc>,
  restaurant_name: String,
  restaurant_avatar_image_url: String,
}

#[async_trait]
impl RestaurantRepository for PgStore {
  #[instrument(name = "PgStore::find_by_slug", skip(self))]
  async fn find_by_slug(&self, slug: &str) -> Result<Option<Restaurant>> {
    let restaurant = sqlx::query_as::<_, Restaurant>(
      "SELECT id, slug, name, description, avatar_image_url, cover_image_url, created_at
       FROM restaurants WHERE lower(slug) = lower($1)",
    )
    .bind(slug)
    .fetch_optional(&self.pool)
    .await?;
    Ok(restaurant)
  }

  #[instrument(name = "PgStore::menu_for", skip(self))]
  async fn menu_for(&self, restaurant_id: Uuid) -> Result<Vec<MenuSection>> {
    let categories = sqlx::query_as::<_, MenuCategory>(
      "SELECT id, restaurant_id, name FROM menu_categories
       WHERE restaurant_id = $1 ORDER BY created_at, name",
    )
    .bind(restaurant_id)
    .fetch_all(&self.pool)
    .await?;

    let products = sqlx::query_as::<_, Product>(&format!(
      "SELECT {} FROM products p WHERE p.restaurant_id = $1 ORDER BY p.created_at, p.name",
      PRODUCT_COLUMNS
    ))
    .bind(restaurant_id)
    .fetch_all(&self.pool)
    .await?;

    let mut by_category: HashMap<Uuid, Vec<Product>> = HashMap::new();
    for product in products {
      by_category.entry(product.menu_category_id).or_default().push(product);
    }

    Ok(
      categories
        .into_iter()
        .map(|category| MenuSection {
          products: by_category.remove(&category.id).unwrap_or_default(),
          category,
        })
        .collect(),
    )
  }
}

#[async_trait]
impl CatalogRepository for PgStore {
  #[instrument(name = "PgStore::find_products", skip(self, ids), fields(num_ids = ids.len()))]
  async fn find_products(&self, restaurant_id: Uuid, ids: &[Uuid]) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(&format!(
      "SELECT {} FROM products p WHERE p.restaurant_id = $1 AND p.id = ANY($2)",
      PRODUCT_COLUMNS
    ))
    .bind(restaurant_id)
    .bind(ids)
    .fetch_all(&self.pool)
    .await?;
    debug!(found = products.len(), "Catalog products loaded.");
    Ok(products)
  }

  #[instrument(name = "PgStore::find_product", skip(self))]
  async fn find_product(&self, product_id: Uuid) -> Result<Option<ProductDetails>> {
    let row = sqlx::query_as::<_, ProductDetailsRow>(&format!(
      "SELECT {}, r.slug AS restaurant_slug, r.name AS restaurant_name,
              r.avatar_image_url AS restaurant_avatar_image_url
       FROM products p JOIN restaurants r ON r.id = p.restaurant_id
       WHERE p.id = $1",
      PRODUCT_COLUMNS
    ))
    .bind(product_id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(|row| ProductDetails {
      product: row.product,
      restaurant: RestaurantBrand {
        slug: row.restaurant_slug,
        name: row.restaurant_name,
        avatar_image_url: row.restaurant_avatar_image_url,
      },
    }))
  }
}

#[async_trait]
impl OrderRepository for PgStore {
  #[instrument(
    name = "PgStore::create_order",
    skip_all,
    fields(restaurant_id = %new_order.restaurant_id, num_items = new_order.line_items.len())
  )]
  async fn create_order(&self, new_order: NewOrder) -> Result<Order> {
    let mut tx = self.pool.begin().await?;

    let order_row = sqlx::query_as::<_, OrderRow>(
      "INSERT INTO orders (id, restaurant_id, customer_name, customer_cpf, status, total, consumption_method)
       VALUES ($1, $2, $3, $4, $5::order_status, $6, $7::consumption_method)
       RETURNING id, restaurant_id, customer_name, customer_cpf, status::text AS status, total,
                 consumption_method::text AS consumption_method, created_at",
    )
    .bind(Uuid::new_v4())
    .bind(new_order.restaurant_id)
    .bind(new_order.customer_name.as_str())
    .bind(new_order.customer_tax_id.as_str())
    .bind(OrderStatus::Pending.as_str())
    .bind(new_order.total)
    .bind(new_order.consumption_method.as_str())
    .fetch_one(&mut *tx)
    .await?;

    let mut line_items = Vec::with_capacity(new_order.line_items.len());
    for (position, item) in new_order.line_items.into_iter().enumerate() {
      let quantity = i32::try_from(item.quantity)
        .map_err(|_| AppError::Validation(format!("Quantity of product {} is too large", item.product_id)))?;
      let position = i32::try_from(position).map_err(|_| AppError::Validation("Too many line items".to_string()))?;
      let id = Uuid::new_v4();

      sqlx::query(
        "INSERT INTO order_products (id, order_id, product_id, position, quantity, price)
         VALUES ($1, $2, $3, $4, $5, $6)",
      )
      .bind(id)
      .bind(order_row.id)
      .bind(item.product_id)
      .bind(position)
      .bind(quantity)
      .bind(item.unit_price)
      .execute(&mut *tx)
      .await?;

      line_items.push(OrderItem {
        id,
        product_id: item.product_id,
        product_name: item.name,
        quantity: item.quantity,
        price: item.unit_price,
      });
    }

    // Dropping `tx` on any early return above rolls everything back.
    tx.commit().await?;

    order_row.into_order(line_items)
  }

  #[instrument(name = "PgStore::list_by_tax_id", skip_all, fields(customer_tax_id = %tax_id.masked()))]
  async fn list_by_tax_id(&self, tax_id: &TaxId) -> Result<Vec<OrderSummary>> {
    let orders = sqlx::query_as::<_, OrderSummaryRow>(
      "SELECT o.id, o.status::text AS status, o.total, o.consumption_method::text AS consumption_method,
              o.created_at, r.name AS restaurant_name, r.avatar_image_url AS restaurant_avatar_image_url
       FROM orders o JOIN restaurants r ON r.id = o.restaurant_id
       WHERE o.customer_cpf = $1
       ORDER BY o.created_at DESC, o.id DESC",
    )
    .bind(tax_id.as_str())
    .fetch_all(&self.pool)
    .await?;

    if orders.is_empty() {
      return Ok(Vec::new());
    }

    let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
    let items = sqlx::query_as::<_, OrderItemDetails>(
      "SELECT op.order_id, op.product_id, p.name AS product_name, p.image_url AS product_image_url,
              op.quantity, op.price
       FROM order_products op JOIN products p ON p.id = op.product_id
       WHERE op.order_id = ANY($1)
       ORDER BY op.order_id, op.position",
    )
    .bind(&order_ids)
    .fetch_all(&self.pool)
    .await?;

    let mut items_by_order: HashMap<Uuid, Vec<OrderItemDetails>> = HashMap::new();
    for item in items {
      items_by_order.entry(item.order_id).or_default().push(item);
    }

    orders
      .into_iter()
      .map(|row| -> Result<OrderSummary> {
        Ok(OrderSummary {
          id: row.id,
          status: row.status.parse()?,
          total: row.total,
          consumption_method: row.consumption_method.parse()?,
          created_at: row.created_at,
          restaurant: OrderRestaurant {
            name: row.restaurant_name,
            avatar_image_url: row.restaurant_avatar_image_url,
          },
          items: items_by_order.remove(&row.id).unwrap_or_default(),
        })
      })
      .collect()
  }
}
