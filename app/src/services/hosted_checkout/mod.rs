// mesa/app/src/services/hosted_checkout/mod.rs

//! Hosted payment pages. The service only opens a session and hands back where to
//! send the customer; card details never pass through here.

pub mod mock;
pub mod stripe;

use async_trait::async_trait;
use mesa::{ConsumptionMethod, TaxId};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{AppConfig, PaymentProviderKind};
use crate::errors::{AppError, Result};

pub use mock::MockHostedCheckout;
pub use stripe::StripeHostedCheckout;

/// A line shown on the payment page. Prices come from the persisted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLineItem {
  pub name: String,
  pub unit_price: Decimal,
  pub quantity: u32,
}

#[derive(Debug, Clone)]
pub struct CheckoutSessionRequest {
  pub order_id: Uuid,
  pub line_items: Vec<CheckoutLineItem>,
  pub customer_tax_id: TaxId,
  pub consumption_method: ConsumptionMethod,
  pub currency: String,
  pub success_url: String,
  pub cancel_url: String,
}

impl CheckoutSessionRequest {
  pub fn total(&self) -> Decimal {
    self
      .line_items
      .iter()
      .map(|item| item.unit_price * Decimal::from(item.quantity))
      .sum()
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
  pub session_id: String,
  pub redirect_url: String,
}

#[async_trait]
pub trait HostedCheckout: Send + Sync {
  fn provider_name(&self) -> &'static str;

  async fn create_session(&self, request: &CheckoutSessionRequest) -> Result<CheckoutSession>;
}

/// Builds the provider selected by `PAYMENT_PROVIDER`.
pub fn from_config(config: &AppConfig) -> Result<Arc<dyn HostedCheckout>> {
  match config.payment_provider {
    PaymentProviderKind::Mock => Ok(Arc::new(MockHostedCheckout::new(config.app_base_url.clone()))),
    PaymentProviderKind::Stripe => {
      let secret_key = config
        .stripe_secret_key
        .clone()
        .ok_or_else(|| AppError::Config("STRIPE_SECRET_KEY is not set".to_string()))?;
      Ok(Arc::new(StripeHostedCheckout::new(config.stripe_api_base.clone(), secret_key)))
    }
  }
}

/// Amount in the currency's minor unit (cents, centavos), rounded half away from zero.
pub fn minor_units(amount: Decimal) -> Result<i64> {
  (amount * Decimal::ONE_HUNDRED)
    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    .to_i64()
    .ok_or_else(|| AppError::Payment(format!("Amount {} cannot be expressed in minor units", amount)))
}
