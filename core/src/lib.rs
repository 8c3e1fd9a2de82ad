// mesa/core/src/lib.rs

//! Mesa: the ordering flow of a multi-tenant restaurant menu.
//!
//! A customer scans a table link, picks dine-in or takeaway, fills a cart and pays
//! on a hosted checkout page. This crate holds every piece of that flow that does
//! not touch the network or a database:
//!  - CPF tax-id normalisation and checksum validation.
//!  - The cart store and its actions.
//!  - Server-side re-pricing of a submission against catalog prices.
//!  - A small async step pipeline used to place an order.

pub mod cart;
pub mod error;
pub mod flow;
pub mod ordering;
pub mod pipeline;
pub mod pricing;
pub mod tax_id;

pub use crate::flow::context_data::ContextData;
pub use crate::flow::control::{PipelineControl, PipelineResult};
pub use crate::flow::step::{Handler, StepDef};
pub use crate::pipeline::definition::Pipeline;

pub use crate::cart::{CartAction, CartError, CartLineItem, CartProduct, CartStore, CartSummary};
pub use crate::error::{MesaError, MesaResult, ValidationError};
pub use crate::ordering::{ConsumptionMethod, CustomerName, OrderStatus};
pub use crate::pricing::{price_order, CatalogProduct, MAX_QUANTITY, PricedLineItem, PricedOrder, PricingError, RequestedProduct};
pub use crate::tax_id::{is_valid_tax_id, strip_punctuation, TaxId};

/// Money is carried as `rust_decimal::Decimal` in one currency.
pub use rust_decimal::Decimal;
