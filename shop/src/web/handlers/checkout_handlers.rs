// shop/src/web/handlers/checkout_handlers.rs

use actix_web::web::Bytes;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use super::{optional_json, require_completed};
use crate::errors::{AppError, Result};
use crate::models::{CartView, OrderView};
use crate::pipelines::contexts::CheckoutCtxData;
use crate::state::AppState;
use crate::store;
use crate::web::extractors::AuthenticatedUser;
use plugpoint_flow::ContextData;

#[derive(Deserialize, Debug, Default)]
pub struct CheckoutPayload {
  #[serde(default)]
  pub shipping_address: String,
}

/// Summary of the cart about to be ordered.
#[instrument(name = "handler::checkout_summary", skip_all, fields(user_id = auth_user.id()))]
pub async fn checkout_summary_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse> {
  let cart = store::carts::find_active(&app_state.db_pool, auth_user.id())
    .await?
    .ok_or_else(|| AppError::NotFound("No active cart found".to_string()))?;
  let lines = store::carts::lines(&app_state.db_pool, cart.id).await?;
  Ok(HttpResponse::Ok().json(json!({ "cart": CartView::new(cart, lines) })))
}

#[instrument(name = "handler::checkout", skip_all, fields(user_id = auth_user.id()))]
pub async fn place_order_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  req: HttpRequest,
  body: Bytes,
) -> Result<HttpResponse> {
  let shipping_address = optional_json::<CheckoutPayload>(&req, &body)?.shipping_address;
  let ctx = ContextData::new(CheckoutCtxData::new(
    app_state.get_ref().clone(),
    auth_user.id(),
    shipping_address,
  ));
  require_completed(app_state.flows.run(ctx.clone()).await?, "checkout")?;

  let (order, notice) = {
    let guard = ctx.read();
    (guard.order.clone(), guard.notice.clone())
  };
  let (Some(order), Some(notice)) = (order, notice) else {
    return Err(AppError::Internal("Checkout finished without an order.".to_string()));
  };
  let items = store::orders::items(&app_state.db_pool, order.id).await?;
  info!(order_id = order.id, "Checkout complete.");

  Ok(HttpResponse::Created().json(json!({
    "message": notice.message,
    "level": notice.level,
    "order": OrderView { order, items },
  })))
}
