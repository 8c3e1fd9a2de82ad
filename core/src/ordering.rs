// mesa/core/src/ordering.rs

//! Closed vocabularies of an order: how it is consumed, where it is in its lifecycle,
//! and who placed it.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsumptionMethod {
  DineIn,
  Takeaway,
}

impl ConsumptionMethod {
  pub const ALL: [ConsumptionMethod; 2] = [ConsumptionMethod::DineIn, ConsumptionMethod::Takeaway];

  pub fn as_str(&self) -> &'static str {
    match self {
      ConsumptionMethod::DineIn => "DINE_IN",
      ConsumptionMethod::Takeaway => "TAKEAWAY",
    }
  }
}

/// Case-insensitive: `dine_in`, `Dine_In` and `DINE_IN` all parse. Surrounding
/// whitespace does not.
impl FromStr for ConsumptionMethod {
  type Err = ValidationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    ConsumptionMethod::ALL
      .into_iter()
      .find(|method| method.as_str().eq_ignore_ascii_case(s))
      .ok_or_else(|| ValidationError::UnknownConsumptionMethod(s.to_string()))
  }
}

impl fmt::Display for ConsumptionMethod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Lifecycle of an order. Only `Pending` is ever written by this service; the
/// remaining states belong to the payment confirmation and kitchen workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
  Pending,
  PaymentConfirmed,
  PaymentFailed,
  InPreparation,
  Finished,
}

impl OrderStatus {
  pub const ALL: [OrderStatus; 5] = [
    OrderStatus::Pending,
    OrderStatus::PaymentConfirmed,
    OrderStatus::PaymentFailed,
    OrderStatus::InPreparation,
    OrderStatus::Finished,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      OrderStatus::Pending => "PENDING",
      OrderStatus::PaymentConfirmed => "PAYMENT_CONFIRMED",
      OrderStatus::PaymentFailed => "PAYMENT_FAILED",
      OrderStatus::InPreparation => "IN_PREPARATION",
      OrderStatus::Finished => "FINISHED",
    }
  }
}

impl FromStr for OrderStatus {
  type Err = ValidationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    OrderStatus::ALL
      .into_iter()
      .find(|status| status.as_str() == s)
      .ok_or_else(|| ValidationError::UnknownOrderStatus(s.to_string()))
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A customer name with surrounding whitespace removed; never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CustomerName(String);

impl CustomerName {
  pub fn parse(raw: &str) -> Result<Self, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
      return Err(ValidationError::EmptyCustomerName);
    }
    Ok(CustomerName(trimmed.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}
