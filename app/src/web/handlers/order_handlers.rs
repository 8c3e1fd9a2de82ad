// mesa/app/src/web/handlers/order_handlers.rs

use actix_web::{web, HttpResponse};
use mesa::{ContextData, PipelineResult, TaxId};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::pipelines::contexts::{PlaceOrderCtxData, PlaceOrderRequest, PlacedOrder};
use crate::services::orders;
use crate::state::AppState;

#[instrument(
  name = "handler::place_order",
  skip(app_state, path, req_payload),
  fields(slug = %path.as_ref(), num_products = req_payload.products.len())
)]
pub async fn place_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  req_payload: web::Json<PlaceOrderRequest>,
) -> Result<HttpResponse, AppError> {
  let ctx_data = ContextData::new(PlaceOrderCtxData::new(
    app_state.get_ref().clone(),
    path.into_inner(),
    req_payload.into_inner(),
  ));

  match app_state.place_order.run(ctx_data.clone()).await {
    Ok(PipelineResult::Completed) => {
      let guard = ctx_data.read();
      let (order, session) = match (&guard.order, &guard.checkout_session) {
        (Some(order), Some(session)) => (order, session),
        _ => {
          return Err(AppError::Internal(
            "Place-order pipeline completed without an order or checkout session".to_string(),
          ))
        }
      };
      info!(order_id = %order.id, total = %order.total, "Order placed.");

      Ok(HttpResponse::Created().json(PlacedOrder {
        order_id: order.id,
        total: order.total,
        session_id: session.session_id.clone(),
        redirect_url: session.redirect_url.clone(),
      }))
    }
    Ok(PipelineResult::Stopped) => {
      warn!("Place-order pipeline was stopped by a handler.");
      Err(AppError::Internal("Order placement was halted.".to_string()))
    }
    Err(app_err) => {
      warn!(error = %app_err, "Place-order pipeline failed.");
      Err(app_err)
    }
  }
}

#[derive(Deserialize, Debug)]
pub struct OrderHistoryQuery {
  pub cpf: Option<String>,
}

/// A missing or invalid `cpf` asks for it again instead of reporting an error.
#[instrument(name = "handler::list_orders", skip_all)]
pub async fn list_orders_handler(
  app_state: web::Data<AppState>,
  query: web::Query<OrderHistoryQuery>,
) -> Result<HttpResponse, AppError> {
  let Some(tax_id) = query.cpf.as_deref().and_then(|raw| TaxId::parse(raw).ok()) else {
    return Ok(HttpResponse::Ok().json(json!({"status": "cpf_required"})));
  };

  let orders = orders::list_orders_by_tax_id(&app_state.repos, &tax_id).await?;
  Ok(HttpResponse::Ok().json(json!({"status": "ok", "orders": orders})))
}
