// mesa/app/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use mesa::{CartAction, CartStore, CartSummary, ContextData};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequestPayload {
  pub product_id: Uuid,
  pub quantity: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartResponse {
  cart_id: Uuid,
  #[serde(flatten)]
  cart: CartSummary,
}

fn cart_response(cart_id: Uuid, cart: &ContextData<CartStore>) -> CartResponse {
  CartResponse {
    cart_id,
    cart: cart.read().summary(),
  }
}

fn apply(app_state: &AppState, cart_id: Uuid, action: CartAction) -> Result<HttpResponse, AppError> {
  let cart = app_state.carts.get(cart_id)?;
  cart.write().dispatch(action)?;
  Ok(HttpResponse::Ok().json(cart_response(cart_id, &cart)))
}

#[instrument(name = "handler::open_cart", skip(app_state))]
pub async fn open_cart_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let cart_id = app_state.carts.open();
  let cart = app_state.carts.get(cart_id)?;
  info!(%cart_id, "Cart session opened.");
  Ok(HttpResponse::Created().json(cart_response(cart_id, &cart)))
}

#[instrument(name = "handler::get_cart", skip(app_state))]
pub async fn get_cart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let cart_id = path.into_inner();
  let cart = app_state.carts.get(cart_id)?;
  Ok(HttpResponse::Ok().json(cart_response(cart_id, &cart)))
}

/// Name, price and image are read from the catalog, never from the request.
#[instrument(
  name = "handler::add_to_cart",
  skip(app_state, path, req_payload),
  fields(cart_id = %path.as_ref(), product_id = %req_payload.product_id, quantity = req_payload.quantity)
)]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  req_payload: web::Json<AddToCartRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let cart_id = path.into_inner();
  let payload = req_payload.into_inner();

  let details = app_state
    .repos
    .catalog
    .find_product(payload.product_id)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Product {} not found", payload.product_id)))?;

  apply(
    &app_state,
    cart_id,
    CartAction::AddProduct {
      product: details.product.to_cart_product(),
      quantity: payload.quantity,
    },
  )
}

#[instrument(name = "handler::increase_cart_item", skip(app_state))]
pub async fn increase_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, AppError> {
  let (cart_id, product_id) = path.into_inner();
  apply(&app_state, cart_id, CartAction::IncreaseQuantity(product_id))
}

#[instrument(name = "handler::decrease_cart_item", skip(app_state))]
pub async fn decrease_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, AppError> {
  let (cart_id, product_id) = path.into_inner();
  apply(&app_state, cart_id, CartAction::DecreaseQuantity(product_id))
}

#[instrument(name = "handler::remove_cart_item", skip(app_state))]
pub async fn remove_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, AppError> {
  let (cart_id, product_id) = path.into_inner();
  apply(&app_state, cart_id, CartAction::RemoveProduct(product_id))
}

#[instrument(name = "handler::toggle_cart", skip(app_state))]
pub async fn toggle_cart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  apply(&app_state, path.into_inner(), CartAction::ToggleVisibility)
}
