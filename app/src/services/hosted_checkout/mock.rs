// mesa/app/src/services/hosted_checkout/mock.rs

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{CheckoutSession, CheckoutSessionRequest, HostedCheckout};
use crate::errors::{AppError, Result};

/// Local stand-in for a hosted payment page, for development and tests.
#[derive(Debug, Clone)]
pub struct MockHostedCheckout {
  app_base_url: String,
  latency: Duration,
}

impl MockHostedCheckout {
  pub fn new(app_base_url: String) -> Self {
    Self {
      app_base_url,
      latency: Duration::from_millis(50),
    }
  }

  #[cfg(test)]
  pub fn with_latency(mut self, latency: Duration) -> Self {
    self.latency = latency;
    self
  }
}

#[async_trait]
impl HostedCheckout for MockHostedCheckout {
  fn provider_name(&self) -> &'static str {
    "mock"
  }

  #[instrument(
    name = "MockHostedCheckout::create_session",
    skip_all,
    fields(order_id = %request.order_id, num_items = request.line_items.len())
  )]
  async fn create_session(&self, request: &CheckoutSessionRequest) -> Result<CheckoutSession> {
    if request.line_items.is_empty() {
      return Err(AppError::Payment("A checkout session needs at least one line item".to_string()));
    }
    if request.total() <= Decimal::ZERO {
      return Err(AppError::Payment("Amount must be greater than zero".to_string()));
    }
    tokio::time::sleep(self.latency).await;

    let session_id = format!("mock_cs_{}", Uuid::new_v4().simple());
    info!(session_id = %session_id, total = %request.total(), "Simulated checkout session created.");
    Ok(CheckoutSession {
      redirect_url: format!("{}/checkout/mock/{}", self.app_base_url, session_id),
      session_id,
    })
  }
}
