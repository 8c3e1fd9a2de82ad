// mesa/app/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use mesa::{CartError, MesaError, PricingError, ValidationError};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Invalid Product: {product_id}")]
  InvalidProduct { product_id: Uuid },

  /// The hosted checkout provider was unreachable or rejected the session.
  #[error("Payment Provider Error: {0}")]
  Payment(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Mesa Workflow Error: {source}")]
  Workflow {
    #[from]
    source: MesaError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<ValidationError> for AppError {
  fn from(err: ValidationError) -> Self {
    AppError::Validation(err.to_string())
  }
}

impl From<CartError> for AppError {
  fn from(err: CartError) -> Self {
    AppError::Validation(err.to_string())
  }
}

impl From<PricingError> for AppError {
  fn from(err: PricingError) -> Self {
    match err {
      PricingError::InvalidProduct { product_id } => AppError::InvalidProduct { product_id },
      other => AppError::Validation(other.to_string()),
    }
  }
}

impl From<reqwest::Error> for AppError {
  fn from(err: reqwest::Error) -> Self {
    AppError::Payment(err.to_string())
  }
}

impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<sqlx::Error>() {
      Ok(sqlx_err) => AppError::Sqlx(sqlx_err),
      Err(err) => AppError::Internal(err.to_string()),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::InvalidProduct { .. } => StatusCode::UNPROCESSABLE_ENTITY,
      AppError::Payment(_) => StatusCode::BAD_GATEWAY,
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Workflow { .. } | AppError::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  fn error_response(&self) -> HttpResponse {
    tracing::error!(application_error = %self, "Responding with error");
    let status = self.status_code();
    match self {
      AppError::Validation(m) | AppError::NotFound(m) => HttpResponse::build(status).json(json!({"error": m})),
      AppError::InvalidProduct { product_id } => HttpResponse::build(status)
        .json(json!({"error": "Product is not available", "productId": product_id})),
      AppError::Payment(_) => HttpResponse::build(status)
        .json(json!({"error": "Could not start the payment. Please try again."})),
      AppError::Config(_) => HttpResponse::build(status).json(json!({"error": "Configuration issue"})),
      AppError::Sqlx(_) => HttpResponse::build(status).json(json!({"error": "Database operation failed"})),
      AppError::Workflow { source } => {
        tracing::error!(mesa_error_source = ?source, "Workflow error details");
        HttpResponse::build(status).json(json!({"error": "Workflow processing error"}))
      }
      AppError::Internal(_) => HttpResponse::build(status).json(json!({"error": "An internal error occurred"})),
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
