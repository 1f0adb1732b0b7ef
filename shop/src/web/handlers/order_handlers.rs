// shop/src/web/handlers/order_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::instrument;

use crate::errors::{AppError, Result};
use crate::models::OrderView;
use crate::state::AppState;
use crate::store;
use crate::web::extractors::AuthenticatedUser;

#[instrument(name = "handler::list_orders", skip_all, fields(user_id = auth_user.id()))]
pub async fn list_orders_handler(app_state: web::Data<AppState>, auth_user: AuthenticatedUser) -> Result<HttpResponse> {
  let orders = store::orders::list_for_user(&app_state.db_pool, auth_user.id()).await?;
  Ok(HttpResponse::Ok().json(json!({ "orders": orders })))
}

/// Another user's order is reported as missing, not forbidden.
#[instrument(name = "handler::order_detail", skip_all, fields(user_id = auth_user.id()))]
pub async fn order_detail_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<i64>,
) -> Result<HttpResponse> {
  let order_id = path.into_inner();
  let order = store::orders::get_for_user(&app_state.db_pool, order_id, auth_user.id())
    .await?
    .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;
  let items = store::orders::items(&app_state.db_pool, order.id).await?;
  Ok(HttpResponse::Ok().json(OrderView { order, items }))
}
