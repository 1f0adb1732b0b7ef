// shop/src/web/handlers/cart_handlers.rs

use actix_web::web::Bytes;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::{info, instrument};

use super::{optional_json, require_completed};
use crate::errors::{AppError, Result};
use crate::models::CartView;
use crate::notice::Notice;
use crate::pipelines::contexts::{AddToCartCtxData, UpdateCartItemCtxData};
use crate::state::AppState;
use crate::store;
use crate::web::extractors::AuthenticatedUser;
use plugpoint_flow::ContextData;

#[derive(Deserialize, Debug, Default)]
pub struct QuantityPayload {
  pub quantity: Option<i64>,
}

/// The user's active cart with its lines, opening one if needed.
pub(crate) async fn active_cart_view(pool: &SqlitePool, user_id: i64) -> Result<CartView> {
  let cart = store::carts::get_or_create_active(pool, user_id).await?;
  let lines = store::carts::lines(pool, cart.id).await?;
  Ok(CartView::new(cart, lines))
}

fn cart_response(notice: Notice, cart: CartView) -> HttpResponse {
  HttpResponse::Ok().json(json!({
    "message": notice.message,
    "level": notice.level,
    "cart": cart,
  }))
}

#[instrument(name = "handler::view_cart", skip_all, fields(user_id = auth_user.id()))]
pub async fn view_cart_handler(app_state: web::Data<AppState>, auth_user: AuthenticatedUser) -> Result<HttpResponse> {
  let view = active_cart_view(&app_state.db_pool, auth_user.id()).await?;
  Ok(HttpResponse::Ok().json(view))
}

#[instrument(
  name = "handler::add_to_cart",
  skip(app_state, auth_user, req, body),
  fields(user_id = auth_user.id())
)]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<i64>,
  req: HttpRequest,
  body: Bytes,
) -> Result<HttpResponse> {
  let product_id = path.into_inner();
  let requested = optional_json::<QuantityPayload>(&req, &body)?.quantity;
  let ctx = ContextData::new(AddToCartCtxData::new(
    app_state.get_ref().clone(),
    auth_user.id(),
    product_id,
    requested,
  ));
  require_completed(app_state.flows.run(ctx.clone()).await?, "add_to_cart")?;

  let notice = ctx
    .read()
    .notice
    .clone()
    .ok_or_else(|| AppError::Internal("Add to cart finished without a result.".to_string()))?;
  let view = active_cart_view(&app_state.db_pool, auth_user.id()).await?;
  Ok(cart_response(notice, view))
}

#[instrument(
  name = "handler::update_cart_item",
  skip(app_state, auth_user, req, body),
  fields(user_id = auth_user.id())
)]
pub async fn update_cart_item_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<i64>,
  req: HttpRequest,
  body: Bytes,
) -> Result<HttpResponse> {
  let item_id = path.into_inner();
  let quantity = optional_json::<QuantityPayload>(&req, &body)?.quantity;
  let ctx = ContextData::new(UpdateCartItemCtxData::new(
    app_state.get_ref().clone(),
    auth_user.id(),
    item_id,
    quantity,
  ));
  require_completed(app_state.flows.run(ctx.clone()).await?, "update_cart_item")?;

  let notice = ctx
    .read()
    .notice
    .clone()
    .ok_or_else(|| AppError::Internal("Cart update finished without a result.".to_string()))?;
  let view = active_cart_view(&app_state.db_pool, auth_user.id()).await?;
  Ok(cart_response(notice, view))
}

#[instrument(name = "handler::remove_cart_item", skip(app_state, auth_user), fields(user_id = auth_user.id()))]
pub async fn remove_cart_item_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<i64>,
) -> Result<HttpResponse> {
  let item_id = path.into_inner();
  let line = store::carts::find_line_in_active_cart(&app_state.db_pool, auth_user.id(), item_id)
    .await?
    .ok_or_else(|| AppError::NotFound("Cart item not found".to_string()))?;
  store::carts::delete_item(&app_state.db_pool, line.item_id).await?;
  info!(item_id, product_id = line.product_id, "Cart item removed.");

  let view = active_cart_view(&app_state.db_pool, auth_user.id()).await?;
  Ok(cart_response(
    Notice::success(format!("Removed {} from cart", line.product_name)),
    view,
  ))
}
