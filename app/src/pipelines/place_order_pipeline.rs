// mesa/app/src/pipelines/place_order_pipeline.rs

//! Placing an order: validate the form, store a priced `PENDING` order, open the
//! hosted payment page, then empty the cart.
//!
//! The payment session is only requested once the order transaction committed. If
//! the provider fails, the order stays `PENDING` and the error reaches the caller;
//! the cart is left untouched so the customer can try again.

use mesa::{ConsumptionMethod, ContextData, CustomerName, MesaResult, Pipeline, PipelineControl, TaxId};
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::pipelines::contexts::PlaceOrderCtxData;
use crate::services::{checkout, orders};

pub const VALIDATE_CUSTOMER: &str = "validate_customer";
pub const CREATE_ORDER: &str = "create_order";
pub const OPEN_CHECKOUT_SESSION: &str = "open_checkout_session";
pub const CLEAR_CART_SESSION: &str = "clear_cart_session";

pub fn build_place_order_pipeline() -> MesaResult<Pipeline<PlaceOrderCtxData, AppError>> {
  let mut p = Pipeline::<PlaceOrderCtxData, AppError>::new(&[
    (VALIDATE_CUSTOMER, false),
    (CREATE_ORDER, false),
    (OPEN_CHECKOUT_SESSION, false),
    (CLEAR_CART_SESSION, true),
  ]);

  p.on(VALIDATE_CUSTOMER, validate_customer)?;
  p.on(CREATE_ORDER, create_order)?;
  p.on(OPEN_CHECKOUT_SESSION, open_checkout_session)?;
  p.on(CLEAR_CART_SESSION, clear_cart_session)?;

  info!("Place-order pipeline built.");
  Ok(p)
}

#[instrument(name = "step::validate_customer", skip_all)]
async fn validate_customer(ctx_data: ContextData<PlaceOrderCtxData>) -> Result<PipelineControl, AppError> {
  let input = {
    let guard = ctx_data.read();
    let request = &guard.request;
    if request.products.is_empty() {
      return Err(AppError::Validation("Add at least one product to the order".to_string()));
    }
    orders::CreateOrderInput {
      customer_name: CustomerName::parse(&request.customer_name)?,
      customer_tax_id: TaxId::parse(&request.customer_cpf)?,
      products: request.products.clone(),
      consumption_method: request.consumption_method.parse::<ConsumptionMethod>()?,
      restaurant_slug: guard.restaurant_slug.clone(),
    }
  };

  info!(customer_tax_id = %input.customer_tax_id.masked(), "Customer details accepted.");
  ctx_data.write().validated = Some(input);
  Ok(PipelineControl::Continue)
}

#[instrument(name = "step::create_order", skip_all)]
async fn create_order(ctx_data: ContextData<PlaceOrderCtxData>) -> Result<PipelineControl, AppError> {
  let (input, repos) = {
    let guard = ctx_data.read();
    let input = guard
      .validated
      .clone()
      .ok_or_else(|| AppError::Internal("create_order ran before validate_customer".to_string()))?;
    (input, guard.app_state.repos.clone())
  };

  let order = orders::create_order(&repos, input).await?;
  ctx_data.write().order = Some(order);
  Ok(PipelineControl::Continue)
}

#[instrument(name = "step::open_checkout_session", skip_all)]
async fn open_checkout_session(ctx_data: ContextData<PlaceOrderCtxData>) -> Result<PipelineControl, AppError> {
  let (order, slug, app_state) = {
    let guard = ctx_data.read();
    let order = guard
      .order
      .clone()
      .ok_or_else(|| AppError::Internal("open_checkout_session ran before create_order".to_string()))?;
    (order, guard.restaurant_slug.clone(), guard.app_state.clone())
  };

  match checkout::create_checkout_session(app_state.hosted_checkout.as_ref(), &app_state.config, &order, &slug).await {
    Ok(session) => {
      info!(order_id = %order.id, session_id = %session.session_id, "Checkout session opened.");
      ctx_data.write().checkout_session = Some(session);
      Ok(PipelineControl::Continue)
    }
    Err(e) => {
      warn!(order_id = %order.id, error = %e, "Order stays PENDING without a checkout session.");
      Err(match e {
        AppError::Payment(_) => e,
        other => AppError::Payment(other.to_string()),
      })
    }
  }
}

#[instrument(name = "step::clear_cart_session", skip_all)]
async fn clear_cart_session(ctx_data: ContextData<PlaceOrderCtxData>) -> Result<PipelineControl, AppError> {
  let (cart_id, carts) = {
    let guard = ctx_data.read();
    (guard.request.cart_id, guard.app_state.carts.clone())
  };

  let Some(cart_id) = cart_id else {
    return Ok(PipelineControl::Continue);
  };
  let cleared = carts.clear(cart_id);
  if !cleared {
    warn!(%cart_id, "Cart session to clear was not found.");
  }
  ctx_data.write().cart_cleared = cleared;
  Ok(PipelineControl::Continue)
}
