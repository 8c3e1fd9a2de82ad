// mesa/app/src/models/order.rs

use chrono::{DateTime, Utc};
use mesa::{ConsumptionMethod, CustomerName, OrderStatus, PricedLineItem, TaxId};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::order_item::{OrderItem, OrderItemDetails};
use crate::errors::{AppError, Result};

/// Everything needed to persist a freshly priced order. Status is always `PENDING`.
#[derive(Debug, Clone)]
pub struct NewOrder {
  pub restaurant_id: Uuid,
  pub customer_name: CustomerName,
  pub customer_tax_id: TaxId,
  pub consumption_method: ConsumptionMethod,
  pub line_items: Vec<PricedLineItem>,
  pub total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub id: Uuid,
  pub restaurant_id: Uuid,
  pub customer_name: String,
  #[serde(skip)]
  pub customer_tax_id: TaxId,
  pub status: OrderStatus,
  pub total: Decimal,
  pub consumption_method: ConsumptionMethod,
  pub created_at: DateTime<Utc>,
  pub line_items: Vec<OrderItem>,
}

/// An `orders` row with enum columns read back as text.
#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
  pub id: Uuid,
  pub restaurant_id: Uuid,
  pub customer_name: String,
  pub customer_cpf: String,
  pub status: String,
  pub total: Decimal,
  pub consumption_method: String,
  pub created_at: DateTime<Utc>,
}

impl OrderRow {
  pub fn into_order(self, line_items: Vec<OrderItem>) -> Result<Order> {
    Ok(Order {
      id: self.id,
      restaurant_id: self.restaurant_id,
      customer_name: self.customer_name,
      customer_tax_id: TaxId::parse(&self.customer_cpf)
        .map_err(|_| AppError::Internal(format!("Order {} holds a malformed tax id", self.id)))?,
      status: self.status.parse()?,
      total: self.total,
      consumption_method: self.consumption_method.parse()?,
      created_at: self.created_at,
      line_items,
    })
  }
}

/// Restaurant columns shown next to each order in the history list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRestaurant {
  pub name: String,
  pub avatar_image_url: String,
}

/// One entry of a customer's order history.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
  pub id: Uuid,
  pub status: OrderStatus,
  pub total: Decimal,
  pub consumption_method: ConsumptionMethod,
  pub created_at: DateTime<Utc>,
  pub restaurant: OrderRestaurant,
  pub items: Vec<OrderItemDetails>,
}
