// mesa/app/src/services/hosted_checkout/stripe.rs

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use super::{minor_units, CheckoutSession, CheckoutSessionRequest, HostedCheckout};
use crate::errors::{AppError, Result};

/// Stripe Checkout, driven through its form-encoded REST API.
#[derive(Clone)]
pub struct StripeHostedCheckout {
  api_base: String,
  secret_key: String,
  http: Client,
}

#[derive(Debug, Deserialize)]
struct StripeSessionResponse {
  id: String,
  url: Option<String>,
}

impl StripeHostedCheckout {
  pub fn new(api_base: String, secret_key: String) -> Self {
    Self {
      api_base,
      secret_key,
      http: Client::new(),
    }
  }
}

/// Form fields for `POST /v1/checkout/sessions`.
pub(crate) fn session_form(request: &CheckoutSessionRequest) -> Result<Vec<(String, String)>> {
  let mut form: Vec<(String, String)> = vec![
    ("mode".into(), "payment".into()),
    ("payment_method_types[0]".into(), "card".into()),
    ("success_url".into(), request.success_url.clone()),
    ("cancel_url".into(), request.cancel_url.clone()),
    ("client_reference_id".into(), request.order_id.to_string()),
    ("metadata[orderId]".into(), request.order_id.to_string()),
    (
      "metadata[consumptionMethod]".into(),
      request.consumption_method.as_str().into(),
    ),
    ("metadata[customerCpf]".into(), request.customer_tax_id.as_str().into()),
  ];

  for (i, item) in request.line_items.iter().enumerate() {
    let prefix = format!("line_items[{}]", i);
    form.push((format!("{}[price_data][currency]", prefix), request.currency.clone()));
    form.push((format!("{}[price_data][product_data][name]", prefix), item.name.clone()));
    form.push((
      format!("{}[price_data][unit_amount]", prefix),
      minor_units(item.unit_price)?.to_string(),
    ));
    form.push((format!("{}[quantity]", prefix), item.quantity.to_string()));
  }

  Ok(form)
}

#[async_trait]
impl HostedCheckout for StripeHostedCheckout {
  fn provider_name(&self) -> &'static str {
    "stripe"
  }

  #[instrument(
    name = "StripeHostedCheckout::create_session",
    skip_all,
    fields(order_id = %request.order_id, num_items = request.line_items.len())
  )]
  async fn create_session(&self, request: &CheckoutSessionRequest) -> Result<CheckoutSession> {
    if request.line_items.is_empty() {
      return Err(AppError::Payment("A checkout session needs at least one line item".to_string()));
    }
    let form = session_form(request)?;
    let url = format!("{}/v1/checkout/sessions", self.api_base);

    let response = self
      .http
      .post(&url)
      .bearer_auth(&self.secret_key)
      .form(&form)
      .send()
      .await?;

    let status = response.status();
    let body = response.text().await?;
    let session = session_from_response(status, &body)?;

    info!(session_id = %session.session_id, "Stripe checkout session created.");
    Ok(session)
  }
}

/// Turns Stripe's reply to `POST /v1/checkout/sessions` into a session, or a payment error.
pub(crate) fn session_from_response(status: StatusCode, body: &str) -> Result<CheckoutSession> {
  if !status.is_success() {
    warn!(%status, body = %body, "Stripe rejected the checkout session.");
    return Err(AppError::Payment(format!(
      "checkout session request failed with status {}",
      status
    )));
  }

  let parsed: StripeSessionResponse = serde_json::from_str(body)
    .map_err(|e| AppError::Payment(format!("unreadable Stripe checkout session: {}", e)))?;
  let redirect_url = parsed
    .url
    .ok_or_else(|| AppError::Payment(format!("Stripe session {} has no redirect URL", parsed.id)))?;

  Ok(CheckoutSession {
    session_id: parsed.id,
    redirect_url,
  })
}
