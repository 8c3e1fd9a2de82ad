// tests/common/mod.rs
#![allow(dead_code)] // Each test binary uses a different subset.

use mesa::{CartProduct, CatalogProduct, ContextData, MesaError, PipelineControl};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::Level;
use uuid::Uuid;

// --- Pipeline fixtures ---
#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub message: String,
  pub steps_executed: Vec<String>,
  pub should_stop_at: Option<String>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Mesa framework error: {0}")]
  Mesa(String), // Stored as text so the enum stays Eq.

  #[error("Test handler failed: {0}")]
  Handler(String),
}

impl From<MesaError> for TestError {
  fn from(err: MesaError) -> Self {
    TestError::Mesa(format!("{:?}", err))
  }
}

pub fn create_simple_handler(
  step_name: &'static str,
  message_to_append: &'static str,
) -> impl Fn(ContextData<TestContext>) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<PipelineControl, TestError>> + Send>>
     + Send
     + Sync
     + 'static {
  move |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.counter += 1;
      guard.message.push_str(message_to_append);
      guard.steps_executed.push(step_name.to_string());
      tracing::debug!(target: "test_handlers", step = step_name, counter = guard.counter, "executed");
      if guard.should_stop_at.as_deref() == Some(step_name) {
        return Ok(PipelineControl::Stop);
      }
      Ok(PipelineControl::Continue)
    })
  }
}

pub fn create_failing_handler(
  step_name: &'static str,
  error_message: &'static str,
) -> impl Fn(ContextData<TestContext>) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<PipelineControl, TestError>> + Send>>
     + Send
     + Sync
     + 'static {
  move |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      ctx.write().steps_executed.push(step_name.to_string());
      Err(TestError::Handler(error_message.to_string()))
    })
  }
}

// --- Catalog fixtures ---
pub fn product(name: &str, price: Decimal) -> CartProduct {
  CartProduct {
    id: Uuid::new_v4(),
    name: name.to_string(),
    unit_price: price,
    image_url: format!("https://cdn.example.com/{}.png", name.to_lowercase()),
  }
}

pub fn burger() -> CartProduct {
  product("Burger", dec!(10.00))
}

pub fn fries() -> CartProduct {
  product("Fries", dec!(5.00))
}

pub fn catalog_entry(product: &CartProduct) -> CatalogProduct {
  CatalogProduct {
    id: product.id,
    name: product.name.clone(),
    price: product.unit_price,
  }
}

// --- Tracing ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
