// mesa/app/src/pipelines/contexts.rs

//! Data the place-order pipeline runs against. Handlers receive it wrapped in `mesa::ContextData`.

use mesa::RequestedProduct;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Order;
use crate::services::hosted_checkout::CheckoutSession;
use crate::services::orders::CreateOrderInput;
use crate::state::AppState;

/// The checkout form as submitted. Nothing in it is trusted until `validate_customer` ran.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
  pub customer_name: String,
  pub customer_cpf: String,
  pub consumption_method: String,
  pub products: Vec<RequestedProduct>,
  #[serde(default)]
  pub cart_id: Option<Uuid>,
}

#[derive(Clone)]
pub struct PlaceOrderCtxData {
  pub app_state: AppState,
  pub restaurant_slug: String,
  pub request: PlaceOrderRequest,
  pub validated: Option<CreateOrderInput>,
  pub order: Option<Order>,
  pub checkout_session: Option<CheckoutSession>,
  pub cart_cleared: bool,
}

impl PlaceOrderCtxData {
  pub fn new(app_state: AppState, restaurant_slug: String, request: PlaceOrderRequest) -> Self {
    Self {
      app_state,
      restaurant_slug,
      request,
      validated: None,
      order: None,
      checkout_session: None,
      cart_cleared: false,
    }
  }
}

/// Body of `201 Created` once an order is stored and its payment page is ready.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
  pub order_id: Uuid,
  pub total: Decimal,
  pub session_id: String,
  pub redirect_url: String,
}
