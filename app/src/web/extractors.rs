// mesa/app/src/web/extractors.rs

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use mesa::ConsumptionMethod;
use serde::Deserialize;
use std::ops::Deref;
use tracing::warn;

use crate::errors::AppError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConsumptionMethodParams {
  consumption_method: Option<String>,
}

/// The `consumptionMethod` query parameter of a menu link.
///
/// Missing or unknown values reject the request as not found; there is no default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsumptionMethodQuery(pub ConsumptionMethod);

impl Deref for ConsumptionMethodQuery {
  type Target = ConsumptionMethod;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl FromRequest for ConsumptionMethodQuery {
  type Error = AppError;
  type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let parsed = web::Query::<ConsumptionMethodParams>::from_query(req.query_string())
      .ok()
      .and_then(|params| params.into_inner().consumption_method)
      .and_then(|raw| raw.parse::<ConsumptionMethod>().ok());

    match parsed {
      Some(method) => futures_util::future::ready(Ok(ConsumptionMethodQuery(method))),
      None => {
        warn!(query = req.query_string(), "Menu requested without a valid consumption method.");
        futures_util::future::ready(Err(AppError::NotFound("Page not found".to_string())))
      }
    }
  }
}
