// shop/src/web/handlers/mod.rs

pub mod auth_handlers;
pub mod cart_handlers;
pub mod catalog_handlers;
pub mod checkout_handlers;
pub mod order_handlers;

use crate::errors::AppError;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::web::Bytes;
use actix_web::HttpRequest;
use plugpoint_flow::PipelineResult;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// None of the application pipelines stop early on purpose; a `Stopped` run is reported as halted.
pub(crate) fn require_completed(result: PipelineResult, pipeline: &str) -> Result<(), AppError> {
  match result {
    PipelineResult::Completed => Ok(()),
    PipelineResult::Stopped => {
      warn!(%pipeline, "Pipeline stopped before completion.");
      Err(AppError::PipelineHalted)
    }
  }
}

/// Decodes an optional JSON body. An absent or blank body yields `T::default()`;
/// anything else must be well-formed JSON sent as `application/json`.
pub(crate) fn optional_json<T>(req: &HttpRequest, body: &Bytes) -> Result<T, AppError>
where
  T: DeserializeOwned + Default,
{
  if body.iter().all(u8::is_ascii_whitespace) {
    return Ok(T::default());
  }
  let is_json = req
    .headers()
    .get(CONTENT_TYPE)
    .and_then(|value| value.to_str().ok())
    .and_then(|value| value.split(';').next())
    .map(|mime| {
      let mime = mime.trim().to_ascii_lowercase();
      mime == "application/json" || mime.ends_with("+json")
    })
    .unwrap_or(false);
  if !is_json {
    return Err(AppError::Validation("Request body must be JSON.".to_string()));
  }
  serde_json::from_slice(body).map_err(|e| {
    debug!(error = %e, "Rejected malformed request body.");
    AppError::Validation(format!("Invalid request body: {e}"))
  })
}
