// mesa/app/src/services/orders.rs

//! Order submission and order history.

use mesa::pricing::requested_ids;
use mesa::{price_order, CatalogProduct, ConsumptionMethod, CustomerName, RequestedProduct, TaxId};
use tracing::{info, instrument};

use crate::db::Repositories;
use crate::errors::{AppError, Result};
use crate::models::{NewOrder, Order, OrderSummary, Product};

/// A validated submission. Only ids and quantities travel with it: prices are
/// always read back from the catalog.
#[derive(Debug, Clone)]
pub struct CreateOrderInput {
  pub customer_name: CustomerName,
  pub customer_tax_id: TaxId,
  pub products: Vec<RequestedProduct>,
  pub consumption_method: ConsumptionMethod,
  pub restaurant_slug: String,
}

/// Re-prices the submission against the restaurant's catalog and stores it as a
/// `PENDING` order. Fails without writing anything when a product is unknown.
#[instrument(
  name = "orders::create_order",
  skip_all,
  fields(
    restaurant_slug = %input.restaurant_slug,
    customer_tax_id = %input.customer_tax_id.masked(),
    consumption_method = %input.consumption_method,
    num_products = input.products.len(),
  )
)]
pub async fn create_order(repos: &Repositories, input: CreateOrderInput) -> Result<Order> {
  let restaurant = repos
    .restaurants
    .find_by_slug(&input.restaurant_slug)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Restaurant '{}' not found", input.restaurant_slug)))?;

  let catalog: Vec<CatalogProduct> = repos
    .catalog
    .find_products(restaurant.id, &requested_ids(&input.products))
    .await?
    .iter()
    .map(Product::to_catalog)
    .collect();

  let priced = price_order(&input.products, &catalog)?;

  let order = repos
    .orders
    .create_order(NewOrder {
      restaurant_id: restaurant.id,
      customer_name: input.customer_name,
      customer_tax_id: input.customer_tax_id,
      consumption_method: input.consumption_method,
      total: priced.total,
      line_items: priced.line_items,
    })
    .await?;

  info!(order_id = %order.id, total = %order.total, "Order created.");
  Ok(order)
}

#[instrument(name = "orders::list_orders_by_tax_id", skip_all, fields(customer_tax_id = %tax_id.masked()))]
pub async fn list_orders_by_tax_id(repos: &Repositories, tax_id: &TaxId) -> Result<Vec<OrderSummary>> {
  let orders = repos.orders.list_by_tax_id(tax_id).await?;
  info!(num_orders = orders.len(), "Order history loaded.");
  Ok(orders)
}
