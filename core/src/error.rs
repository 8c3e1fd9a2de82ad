// mesa/core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Errors raised by the step pipeline itself, as opposed to the errors its handlers return.
#[derive(Debug, Error)]
pub enum MesaError {
  #[error("Step not found: {step_name}")]
  StepNotFound { step_name: String },

  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("Error in handler or external operation. Source: {source}")]
  HandlerError {
    #[source]
    source: AnyhowError,
  },

  #[error("Internal Mesa error: {0}")]
  Internal(String),
}

impl From<AnyhowError> for MesaError {
  fn from(err: AnyhowError) -> Self {
    MesaError::HandlerError { source: err }
  }
}

pub type MesaResult<T, E = MesaError> = std::result::Result<T, E>;

/// Input that fails validation before it ever reaches storage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
  #[error("invalid tax id")]
  InvalidTaxId,

  #[error("customer name must not be empty")]
  EmptyCustomerName,

  #[error("unknown consumption method: {0}")]
  UnknownConsumptionMethod(String),

  #[error("unknown order status: {0}")]
  UnknownOrderStatus(String),
}
