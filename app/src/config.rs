// mesa/app/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::fmt;
use std::str::FromStr;

/// Which hosted checkout page customers are sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentProviderKind {
  Mock,
  Stripe,
}

impl FromStr for PaymentProviderKind {
  type Err = AppError;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "mock" => Ok(PaymentProviderKind::Mock),
      "stripe" => Ok(PaymentProviderKind::Stripe),
      other => Err(AppError::Config(format!("Invalid PAYMENT_PROVIDER '{}': expected 'mock' or 'stripe'", other))),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Pretty,
  Json,
}

#[derive(Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub app_base_url: String,

  pub payment_provider: PaymentProviderKind,
  pub stripe_secret_key: Option<String>,
  pub stripe_api_base: String,
  /// ISO 4217 code, lowercase, as the payment provider expects it.
  pub checkout_currency: String,

  pub run_migrations: bool,
  pub seed_db: bool,
  pub log_format: LogFormat,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // .env is optional

    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the configuration from any variable source; `from_env` passes the process environment.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_or = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());
    let require = |name: &str| {
      lookup(name).ok_or_else(|| AppError::Config(format!("Missing environment variable '{}'", name)))
    };
    let parse_bool = |name: &str, default: &str| {
      get_or(name, default)
        .parse::<bool>()
        .map_err(|e| AppError::Config(format!("Invalid {} value: {}", name, e)))
    };

    let server_host = get_or("SERVER_HOST", "127.0.0.1");
    let server_port = get_or("SERVER_PORT", "8080")
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = require("DATABASE_URL")?;
    let app_base_url = lookup("APP_BASE_URL")
      .unwrap_or_else(|| format!("http://{}:{}", server_host, server_port))
      .trim_end_matches('/')
      .to_string();

    let payment_provider = get_or("PAYMENT_PROVIDER", "mock").parse::<PaymentProviderKind>()?;
    let stripe_secret_key = lookup("STRIPE_SECRET_KEY").filter(|key| !key.trim().is_empty());
    if payment_provider == PaymentProviderKind::Stripe && stripe_secret_key.is_none() {
      return Err(AppError::Config(
        "STRIPE_SECRET_KEY is required when PAYMENT_PROVIDER=stripe".to_string(),
      ));
    }
    let stripe_api_base = get_or("STRIPE_API_BASE", "https://api.stripe.com")
      .trim_end_matches('/')
      .to_string();
    let checkout_currency = get_or("CHECKOUT_CURRENCY", "brl").to_ascii_lowercase();
    if checkout_currency.len() != 3 || !checkout_currency.chars().all(|c| c.is_ascii_alphabetic()) {
      return Err(AppError::Config(format!("Invalid CHECKOUT_CURRENCY: {}", checkout_currency)));
    }

    let run_migrations = parse_bool("RUN_MIGRATIONS", "true")?;
    let seed_db = parse_bool("SEED_DB", "false")?;
    let log_format = match get_or("LOG_FORMAT", "pretty").to_ascii_lowercase().as_str() {
      "json" => LogFormat::Json,
      "pretty" => LogFormat::Pretty,
      other => return Err(AppError::Config(format!("Invalid LOG_FORMAT: {}", other))),
    };

    Ok(Self {
      server_host,
      server_port,
      database_url,
      app_base_url,
      payment_provider,
      stripe_secret_key,
      stripe_api_base,
      checkout_currency,
      run_migrations,
      seed_db,
      log_format,
    })
  }
}

// Secrets stay out of logs.
impl fmt::Debug for AppConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AppConfig")
      .field("server_host", &self.server_host)
      .field("server_port", &self.server_port)
      .field("database_url", &"[REDACTED]")
      .field("app_base_url", &self.app_base_url)
      .field("payment_provider", &self.payment_provider)
      .field("stripe_secret_key", &self.stripe_secret_key.as_ref().map(|_| "[REDACTED]"))
      .field("stripe_api_base", &self.stripe_api_base)
      .field("checkout_currency", &self.checkout_currency)
      .field("run_migrations", &self.run_migrations)
      .field("seed_db", &self.seed_db)
      .field("log_format", &self.log_format)
      .finish()
  }
}
