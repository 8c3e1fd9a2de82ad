// mesa/core/src/cart/store.rs

use super::line_item::{CartLineItem, CartProduct};
use crate::pricing::{RequestedProduct, MAX_QUANTITY};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::trace;
use uuid::Uuid;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
  #[error("quantity must be at least 1")]
  ZeroQuantity,

  #[error("unit price of product {product_id} is negative")]
  NegativePrice { product_id: Uuid },

  #[error("quantity of product {product_id} exceeds the limit of {max}")]
  QuantityTooLarge { product_id: Uuid, max: u32 },

  #[error("adding product {product_id} overflows the cart item count")]
  QuantityOverflow { product_id: Uuid },
}

/// Every way the cart can change. `CartStore::dispatch` is the only place they are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
  AddProduct { product: CartProduct, quantity: u32 },
  IncreaseQuantity(Uuid),
  DecreaseQuantity(Uuid),
  RemoveProduct(Uuid),
  ToggleVisibility,
  Clear,
}

/// Cart state for one browsing session.
///
/// Line items are unique per product and kept in insertion order. `subtotal`
/// and `item_count` are recomputed after every successful action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartStore {
  line_items: Vec<CartLineItem>,
  is_visible: bool,
  subtotal: Decimal,
  item_count: u32,
}

/// Serializable read model of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
  pub line_items: Vec<CartLineItem>,
  pub is_visible: bool,
  pub subtotal: Decimal,
  pub item_count: u32,
}

impl CartStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn dispatch(&mut self, action: CartAction) -> Result<(), CartError> {
    trace!(?action, "cart action");
    match action {
      CartAction::AddProduct { product, quantity } => self.apply_add(product, quantity)?,
      CartAction::IncreaseQuantity(product_id) => {
        if let Some(current) = self.line_item(product_id).map(|item| item.quantity) {
          let quantity = self.checked_quantity(product_id, current, 1)?;
          if let Some(item) = self.find_mut(product_id) {
            item.quantity = quantity;
          }
        }
      }
      CartAction::DecreaseQuantity(product_id) => {
        if let Some(pos) = self.position(product_id) {
          if self.line_items[pos].quantity <= 1 {
            self.line_items.remove(pos);
          } else {
            self.line_items[pos].quantity -= 1;
          }
        }
      }
      CartAction::RemoveProduct(product_id) => self.line_items.retain(|item| item.product_id != product_id),
      CartAction::ToggleVisibility => self.is_visible = !self.is_visible,
      CartAction::Clear => self.line_items.clear(),
    }
    self.recompute();
    Ok(())
  }

  /// Adds `quantity` units of `product` and opens the cart panel.
  pub fn add_product(&mut self, product: CartProduct, quantity: u32) -> Result<(), CartError> {
    self.dispatch(CartAction::AddProduct { product, quantity })
  }

  pub fn increase_quantity(&mut self, product_id: Uuid) -> Result<(), CartError> {
    self.dispatch(CartAction::IncreaseQuantity(product_id))
  }

  /// Takes one unit away; the last unit takes the whole line item with it.
  pub fn decrease_quantity(&mut self, product_id: Uuid) {
    self.apply_infallible(CartAction::DecreaseQuantity(product_id));
  }

  pub fn remove_product(&mut self, product_id: Uuid) {
    self.apply_infallible(CartAction::RemoveProduct(product_id));
  }

  pub fn toggle_visibility(&mut self) {
    self.apply_infallible(CartAction::ToggleVisibility);
  }

  pub fn clear(&mut self) {
    self.apply_infallible(CartAction::Clear);
  }

  pub fn line_items(&self) -> &[CartLineItem] {
    &self.line_items
  }

  pub fn line_item(&self, product_id: Uuid) -> Option<&CartLineItem> {
    self.line_items.iter().find(|item| item.product_id == product_id)
  }

  pub fn is_visible(&self) -> bool {
    self.is_visible
  }

  pub fn is_empty(&self) -> bool {
    self.line_items.is_empty()
  }

  pub fn subtotal(&self) -> Decimal {
    self.subtotal
  }

  pub fn item_count(&self) -> u32 {
    self.item_count
  }

  pub fn summary(&self) -> CartSummary {
    CartSummary {
      line_items: self.line_items.clone(),
      is_visible: self.is_visible,
      subtotal: self.subtotal,
      item_count: self.item_count,
    }
  }

  /// The `{id, quantity}` pairs submitted at checkout. Prices stay behind on purpose:
  /// the server re-prices from the catalog.
  pub fn to_requested_products(&self) -> Vec<RequestedProduct> {
    self
      .line_items
      .iter()
      .map(|item| RequestedProduct {
        id: item.product_id,
        quantity: item.quantity,
      })
      .collect()
  }

  fn apply_add(&mut self, product: CartProduct, quantity: u32) -> Result<(), CartError> {
    if quantity == 0 {
      return Err(CartError::ZeroQuantity);
    }
    if product.unit_price < Decimal::ZERO {
      return Err(CartError::NegativePrice { product_id: product.id });
    }

    let product_id = product.id;
    let current = self.line_item(product_id).map(|item| item.quantity);
    let new_quantity = self.checked_quantity(product_id, current.unwrap_or(0), quantity)?;
    match self.find_mut(product_id) {
      Some(item) => item.quantity = new_quantity,
      None => self.line_items.push(CartLineItem::new(product, new_quantity)),
    }
    self.is_visible = true;
    Ok(())
  }

  /// The line quantity after adding `extra` units, if both the line cap and the
  /// cart-wide item count allow it.
  fn checked_quantity(&self, product_id: Uuid, current: u32, extra: u32) -> Result<u32, CartError> {
    let quantity = current
      .checked_add(extra)
      .filter(|q| *q <= MAX_QUANTITY)
      .ok_or(CartError::QuantityTooLarge {
        product_id,
        max: MAX_QUANTITY,
      })?;
    self
      .item_count
      .checked_add(extra)
      .ok_or(CartError::QuantityOverflow { product_id })?;
    Ok(quantity)
  }

  // Actions that cannot fail; keeps the `Result` out of their public signatures.
  fn apply_infallible(&mut self, action: CartAction) {
    if let Err(e) = self.dispatch(action) {
      tracing::error!(error = %e, "infallible cart action failed");
    }
  }

  fn position(&self, product_id: Uuid) -> Option<usize> {
    self.line_items.iter().position(|item| item.product_id == product_id)
  }

  fn find_mut(&mut self, product_id: Uuid) -> Option<&mut CartLineItem> {
    self.line_items.iter_mut().find(|item| item.product_id == product_id)
  }

  fn recompute(&mut self) {
    self.subtotal = self.line_items.iter().map(CartLineItem::line_total).sum();
    // Additions are checked against the count beforehand, so this never saturates.
    self.item_count = self
      .line_items
      .iter()
      .fold(0u32, |count, item| count.saturating_add(item.quantity));
  }
}
