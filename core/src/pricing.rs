// mesa/core/src/pricing.rs

//! Server-side pricing of a submitted order.
//!
//! A submission only carries product ids and quantities. Names and prices come from
//! the catalog at the time of pricing, so whatever a client believes a product costs
//! never reaches the order total.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

/// Most units of one product a cart line or an order line may hold.
pub const MAX_QUANTITY: u32 = 999;

/// Largest order total the `orders.total NUMERIC(12, 2)` column can store.
pub fn max_order_total() -> Decimal {
  Decimal::new(9_999_999_999_99, 2)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedProduct {
  pub id: Uuid,
  pub quantity: u32,
}

/// Authoritative catalog facts for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogProduct {
  pub id: Uuid,
  pub name: String,
  pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedLineItem {
  pub product_id: Uuid,
  pub name: String,
  pub unit_price: Decimal,
  pub quantity: u32,
}

impl PricedLineItem {
  pub fn line_total(&self) -> Decimal {
    self.unit_price * Decimal::from(self.quantity)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedOrder {
  pub line_items: Vec<PricedLineItem>,
  pub total: Decimal,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PricingError {
  #[error("an order needs at least one product")]
  EmptyOrder,

  #[error("quantity of product {product_id} must be at least 1")]
  ZeroQuantity { product_id: Uuid },

  #[error("quantity of product {product_id} exceeds the limit of {max}")]
  QuantityTooLarge { product_id: Uuid, max: u32 },

  #[error("product {product_id} is not in the catalog")]
  InvalidProduct { product_id: Uuid },

  #[error("order total {total} exceeds the limit of {max}")]
  TotalTooLarge { total: Decimal, max: Decimal },
}

/// Pairs each requested product with its catalog price and sums the total.
///
/// Any id missing from `catalog` fails the whole order: dropping it would leave a
/// total the customer never agreed to.
pub fn price_order(requested: &[RequestedProduct], catalog: &[CatalogProduct]) -> Result<PricedOrder, PricingError> {
  if requested.is_empty() {
    return Err(PricingError::EmptyOrder);
  }

  let by_id: HashMap<Uuid, &CatalogProduct> = catalog.iter().map(|p| (p.id, p)).collect();

  let line_items = requested
    .iter()
    .map(|wanted| {
      if wanted.quantity == 0 {
        return Err(PricingError::ZeroQuantity { product_id: wanted.id });
      }
      if wanted.quantity > MAX_QUANTITY {
        return Err(PricingError::QuantityTooLarge {
          product_id: wanted.id,
          max: MAX_QUANTITY,
        });
      }
      let product = by_id
        .get(&wanted.id)
        .ok_or(PricingError::InvalidProduct { product_id: wanted.id })?;
      Ok(PricedLineItem {
        product_id: product.id,
        name: product.name.clone(),
        unit_price: product.price,
        quantity: wanted.quantity,
      })
    })
    .collect::<Result<Vec<_>, _>>()?;

  let total: Decimal = line_items.iter().map(PricedLineItem::line_total).sum();
  let max = max_order_total();
  if total > max {
    return Err(PricingError::TotalTooLarge { total, max });
  }

  Ok(PricedOrder { line_items, total })
}

/// The distinct ids of a request, in first-seen order, for the catalog lookup.
pub fn requested_ids(requested: &[RequestedProduct]) -> Vec<Uuid> {
  let mut ids: Vec<Uuid> = Vec::with_capacity(requested.len());
  for product in requested {
    if !ids.contains(&product.id) {
      ids.push(product.id);
    }
  }
  ids
}
