// mesa/app/src/models/order_item.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted line item. `price` is the catalog price when the order was placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
  pub id: Uuid,
  pub product_id: Uuid,
  pub product_name: String,
  pub quantity: u32,
  pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDetails {
  #[serde(skip)]
  pub order_id: Uuid,
  pub product_id: Uuid,
  pub product_name: String,
  pub product_image_url: String,
  pub quantity: i32,
  pub price: Decimal,
}
