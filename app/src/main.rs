// mesa/app/src/main.rs

mod config;
mod db;
mod errors;
mod models;
mod pipelines;
mod services;
mod state;
#[cfg(test)]
mod test_support;
mod web;

use crate::config::{AppConfig, LogFormat};
use crate::db::{PgStore, Repositories};
use crate::errors::AppError;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer};
use sqlx::PgPool;
use std::io;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
  let builder = tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_span_events(FmtSpan::CLOSE);

  match format {
    LogFormat::Json => builder.json().init(),
    LogFormat::Pretty => builder.init(),
  }
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
  tracing::error!(error = %err, "{}", context);
  io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
  let app_config = AppConfig::from_env();
  init_tracing(app_config.as_ref().map(|c| c.log_format).unwrap_or(LogFormat::Pretty));

  tracing::info!("Starting mesa ordering server...");

  let app_config = Arc::new(app_config.map_err(|e| startup_error("Failed to load application configuration", e))?);
  tracing::debug!(config = ?app_config, "Configuration loaded.");

  let db_pool = PgPool::connect(&app_config.database_url)
    .await
    .map_err(|e| startup_error("Failed to connect to the database", e))?;
  tracing::info!("Successfully connected to the database.");

  if app_config.run_migrations {
    sqlx::migrate!("./migrations")
      .run(&db_pool)
      .await
      .map_err(|e| startup_error("Failed to apply database migrations", e))?;
    tracing::info!("Database migrations applied.");
  }

  if app_config.seed_db {
    db::seed::seed_demo_restaurant(&db_pool)
      .await
      .map_err(|e| startup_error("Failed to seed database", e))?;
  }

  let hosted_checkout = services::hosted_checkout::from_config(&app_config)
    .map_err(|e| startup_error("Failed to configure the payment provider", e))?;
  tracing::info!(provider = hosted_checkout.provider_name(), "Hosted checkout provider ready.");

  let repos = Repositories::from_store(Arc::new(PgStore::new(db_pool)));
  let app_state = AppState::new(app_config.clone(), repos, hosted_checkout)
    .map_err(|e| startup_error("Failed to build application state", e))?;

  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .app_data(
        actix_data::JsonConfig::default()
          .error_handler(|err, _req| AppError::Validation(format!("Invalid request body: {}", err)).into()),
      )
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
