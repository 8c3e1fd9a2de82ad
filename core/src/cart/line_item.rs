// mesa/core/src/cart/line_item.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The catalog facts a cart needs about a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartProduct {
  pub id: Uuid,
  pub name: String,
  pub unit_price: Decimal,
  pub image_url: String,
}

/// One product in the cart. `quantity` is at least 1 for as long as the item exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
  pub product_id: Uuid,
  pub name: String,
  pub unit_price: Decimal,
  pub image_url: String,
  pub quantity: u32,
}

impl CartLineItem {
  pub(crate) fn new(product: CartProduct, quantity: u32) -> Self {
    CartLineItem {
      product_id: product.id,
      name: product.name,
      unit_price: product.unit_price,
      image_url: product.image_url,
      quantity,
    }
  }

  pub fn line_total(&self) -> Decimal {
    self.unit_price * Decimal::from(self.quantity)
  }
}
