// mesa/core/src/tax_id.rs

//! Brazilian CPF tax identifiers: normalisation and checksum validation.

use crate::error::ValidationError;
use serde::{Serialize, Serializer};
use std::fmt;

const TAX_ID_LEN: usize = 11;

/// Removes every character that is not an ASCII digit.
pub fn strip_punctuation(raw: &str) -> String {
  raw.chars().filter(char::is_ascii_digit).collect()
}

/// `true` when `raw`, once stripped of punctuation, is a well-formed CPF.
///
/// Malformed input is never an error, it just yields `false`.
pub fn is_valid_tax_id(raw: &str) -> bool {
  let digits: Vec<u32> = strip_punctuation(raw).chars().filter_map(|c| c.to_digit(10)).collect();

  if digits.len() != TAX_ID_LEN {
    return false;
  }

  // 000.000.000-00, 111.111.111-11, ... pass the checksum but are not issued.
  if digits.iter().all(|d| *d == digits[0]) {
    return false;
  }

  check_digit(&digits[..9]) == digits[9] && check_digit(&digits[..10]) == digits[10]
}

/// Weights run from `len + 1` down to 2; a remainder of 10 maps to 0.
fn check_digit(digits: &[u32]) -> u32 {
  let top_weight = digits.len() as u32 + 1;
  let sum: u32 = digits
    .iter()
    .zip((2..=top_weight).rev())
    .map(|(digit, weight)| digit * weight)
    .sum();

  match (sum * 10) % 11 {
    10 => 0,
    remainder => remainder,
  }
}

/// A validated CPF holding only its 11 digits.
///
/// Order persistence and order lookup only accept this type, so an
/// unvalidated string can never reach a query.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TaxId(String);

impl TaxId {
  pub fn parse(raw: &str) -> Result<Self, ValidationError> {
    if is_valid_tax_id(raw) {
      Ok(TaxId(strip_punctuation(raw)))
    } else {
      Err(ValidationError::InvalidTaxId)
    }
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// `*********25` style rendering for logs.
  pub fn masked(&self) -> String {
    let visible = &self.0[TAX_ID_LEN - 2..];
    format!("{}{}", "*".repeat(TAX_ID_LEN - 2), visible)
  }
}

impl fmt::Debug for TaxId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("TaxId").field(&self.masked()).finish()
  }
}

impl fmt::Display for TaxId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl Serialize for TaxId {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.0)
  }
}

impl std::str::FromStr for TaxId {
  type Err = ValidationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    TaxId::parse(s)
  }
}
