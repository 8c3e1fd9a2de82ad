// mesa/core/src/cart/mod.rs

//! The cart a customer builds while browsing a menu.

pub mod line_item;
pub mod store;

pub use line_item::{CartLineItem, CartProduct};
pub use store::{CartAction, CartError, CartStore, CartSummary};
