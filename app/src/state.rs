// mesa/app/src/state.rs
use crate::config::AppConfig;
use crate::db::Repositories;
use crate::errors::{AppError, Result};
use crate::pipelines::contexts::PlaceOrderCtxData;
use crate::pipelines::place_order_pipeline::build_place_order_pipeline;
use crate::services::cart_sessions::CartSessions;
use crate::services::hosted_checkout::HostedCheckout;
use mesa::Pipeline;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub repos: Repositories,
  pub hosted_checkout: Arc<dyn HostedCheckout>,
  pub carts: CartSessions,
  pub place_order: Arc<Pipeline<PlaceOrderCtxData, AppError>>,
  pub config: Arc<AppConfig>,
}

impl AppState {
  pub fn new(config: Arc<AppConfig>, repos: Repositories, hosted_checkout: Arc<dyn HostedCheckout>) -> Result<Self> {
    Ok(Self {
      repos,
      hosted_checkout,
      carts: CartSessions::default(),
      place_order: Arc::new(build_place_order_pipeline()?),
      config,
    })
  }
}
