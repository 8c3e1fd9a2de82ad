// mesa/app/src/services/checkout.rs

//! Opening a hosted payment session for a persisted order.

use mesa::ConsumptionMethod;
use tracing::{instrument, warn};

use super::hosted_checkout::{CheckoutLineItem, CheckoutSession, CheckoutSessionRequest, HostedCheckout};
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::Order;

/// Where the customer lands after paying or giving up: back on the menu they ordered from.
pub fn menu_url(config: &AppConfig, restaurant_slug: &str, consumption_method: ConsumptionMethod) -> String {
  format!(
    "{}/{}/menu?consumptionMethod={}",
    config.app_base_url,
    restaurant_slug,
    consumption_method.as_str()
  )
}

/// Line items and metadata are taken from the stored order, so the payment page
/// shows exactly the catalog prices the order was totalled with.
#[instrument(
  name = "checkout::create_checkout_session",
  skip_all,
  fields(order_id = %order.id, restaurant_slug = %restaurant_slug, provider = provider.provider_name())
)]
pub async fn create_checkout_session(
  provider: &dyn HostedCheckout,
  config: &AppConfig,
  order: &Order,
  restaurant_slug: &str,
) -> Result<CheckoutSession> {
  let return_url = menu_url(config, restaurant_slug, order.consumption_method);
  let request = CheckoutSessionRequest {
    order_id: order.id,
    line_items: order
      .line_items
      .iter()
      .map(|item| CheckoutLineItem {
        name: item.product_name.clone(),
        unit_price: item.price,
        quantity: item.quantity,
      })
      .collect(),
    customer_tax_id: order.customer_tax_id.clone(),
    consumption_method: order.consumption_method,
    currency: config.checkout_currency.clone(),
    success_url: return_url.clone(),
    cancel_url: return_url,
  };

  provider.create_session(&request).await.map_err(|e| {
    warn!(error = %e, "Checkout session could not be opened.");
    e
  })
}
