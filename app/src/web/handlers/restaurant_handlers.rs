// mesa/app/src/web/handlers/restaurant_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Menu, Restaurant};
use crate::state::AppState;
use crate::web::extractors::ConsumptionMethodQuery;

async fn restaurant_or_404(app_state: &AppState, slug: &str) -> Result<Restaurant, AppError> {
  app_state.repos.restaurants.find_by_slug(slug).await?.ok_or_else(|| {
    warn!(slug, "Unknown restaurant slug.");
    AppError::NotFound(format!("Restaurant '{}' not found", slug))
  })
}

/// Landing page data: the customer picks dine-in or takeaway from here.
#[instrument(name = "handler::get_restaurant", skip(app_state, path), fields(slug = %path.as_ref()))]
pub async fn get_restaurant_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let restaurant = restaurant_or_404(&app_state, &path).await?;
  Ok(HttpResponse::Ok().json(restaurant))
}

#[instrument(
  name = "handler::get_menu",
  skip(app_state, path, consumption_method),
  fields(slug = %path.as_ref(), consumption_method = %consumption_method.0)
)]
pub async fn get_menu_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  consumption_method: ConsumptionMethodQuery,
) -> Result<HttpResponse, AppError> {
  let restaurant = restaurant_or_404(&app_state, &path).await?;
  let categories = app_state.repos.restaurants.menu_for(restaurant.id).await?;
  info!(num_categories = categories.len(), "Menu loaded.");

  Ok(HttpResponse::Ok().json(Menu {
    restaurant,
    consumption_method: *consumption_method,
    categories,
  }))
}

#[instrument(name = "handler::get_product", skip(app_state, path))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(String, Uuid)>,
) -> Result<HttpResponse, AppError> {
  let (slug, product_id) = path.into_inner();

  let product = app_state
    .repos
    .catalog
    .find_product(product_id)
    .await?
    .filter(|details| details.belongs_to(&slug))
    .ok_or_else(|| {
      warn!(%slug, %product_id, "Product not found for restaurant.");
      AppError::NotFound(format!("Product {} not found", product_id))
    })?;

  Ok(HttpResponse::Ok().json(product))
}
