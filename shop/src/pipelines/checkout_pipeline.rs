// shop/src/pipelines/checkout_pipeline.rs

//! Turning the active cart into an order.

use crate::errors::{AppError, Result};
use crate::models::CartLine;
use crate::notice::Notice;
use crate::pipelines::contexts::CheckoutCtxData;
use crate::store;
use plugpoint_flow::{ContextData, FlowRegistry, Pipeline, PipelineControl};
use tracing::{error, info, instrument, warn};

pub fn build_checkout_pipeline() -> Pipeline<CheckoutCtxData, AppError> {
  let mut p = Pipeline::<CheckoutCtxData, AppError>::new(
    "checkout",
    &[
      ("load_active_cart", false, None),
      ("validate_shipping_address", false, None),
      ("ensure_cart_not_empty", false, None),
      ("verify_stock", false, None),
      ("place_order", false, None),
    ],
  );
  p.on_root("load_active_cart", load_active_cart);
  p.on_root("validate_shipping_address", validate_shipping_address);
  p.on_root("ensure_cart_not_empty", ensure_cart_not_empty);
  p.on_root("verify_stock", verify_stock);
  p.on_root("place_order", place_order);
  p
}

pub fn register_checkout_pipeline(flows: &FlowRegistry<AppError>) {
  flows.register_pipeline(build_checkout_pipeline());
  info!("Checkout pipeline registered.");
}

pub const ALREADY_ORDERED: &str = "This cart has already been ordered.";

fn stock_shortfall(line: &CartLine) -> AppError {
  AppError::Conflict(format!(
    "Not enough stock for {}. Only {} available.",
    line.product_name, line.stock
  ))
}

async fn load_active_cart(ctx_data: ContextData<CheckoutCtxData>) -> Result<PipelineControl> {
  let (user_id, pool) = {
    let guard = ctx_data.read();
    (guard.user_id, guard.app_state.db_pool.clone())
  };
  let cart = store::carts::find_active(&pool, user_id)
    .await?
    .ok_or_else(|| AppError::NotFound("No active cart found".to_string()))?;
  let lines = store::carts::lines(&pool, cart.id).await?;

  let mut guard = ctx_data.write();
  guard.cart = Some(cart);
  guard.lines = lines;
  Ok(PipelineControl::Continue)
}

async fn validate_shipping_address(ctx_data: ContextData<CheckoutCtxData>) -> Result<PipelineControl> {
  let mut guard = ctx_data.write();
  let address = guard.shipping_address.trim().to_string();
  if address.is_empty() {
    return Err(AppError::Validation("Please provide a shipping address".to_string()));
  }
  guard.shipping_address = address;
  Ok(PipelineControl::Continue)
}

async fn ensure_cart_not_empty(ctx_data: ContextData<CheckoutCtxData>) -> Result<PipelineControl> {
  if ctx_data.read().lines.is_empty() {
    return Err(AppError::Validation("Your cart is empty".to_string()));
  }
  Ok(PipelineControl::Continue)
}

async fn verify_stock(ctx_data: ContextData<CheckoutCtxData>) -> Result<PipelineControl> {
  let guard = ctx_data.read();
  if let Some(line) = guard.lines.iter().find(|l| l.quantity > l.stock) {
    warn!(product_id = line.product_id, wanted = line.quantity, stock = line.stock, "Checkout blocked by stock.");
    return Err(stock_shortfall(line));
  }
  Ok(PipelineControl::Continue)
}

/// Stock, order, order items and cart state change together or not at all.
///
/// The cart is closed first and its lines are re-read inside the transaction,
/// so a cart can only ever become one order.
#[instrument(name = "checkout::place_order", skip_all, err(Display))]
async fn place_order(ctx_data: ContextData<CheckoutCtxData>) -> Result<PipelineControl> {
  let (user_id, cart, address, pool) = {
    let guard = ctx_data.read();
    (
      guard.user_id,
      guard.cart.clone(),
      guard.shipping_address.clone(),
      guard.app_state.db_pool.clone(),
    )
  };
  let cart = cart.ok_or_else(|| AppError::Internal("Cart missing at order placement.".to_string()))?;

  let mut tx = pool.begin().await?;
  if !store::carts::deactivate(&mut *tx, cart.id).await? {
    warn!(cart_id = cart.id, "Cart was already checked out.");
    return Err(AppError::Conflict(ALREADY_ORDERED.to_string()));
  }
  let lines = store::carts::lines(&mut *tx, cart.id).await?;
  if lines.is_empty() {
    return Err(AppError::Validation("Your cart is empty".to_string()));
  }

  for line in &lines {
    if !store::products::decrement_stock(&mut *tx, line.product_id, line.quantity).await? {
      // Dropping `tx` rolls back the cart and every earlier decrement.
      error!(product_id = line.product_id, "Stock changed during checkout, rolling back.");
      let current = store::products::get(&mut *tx, line.product_id).await?;
      let refreshed = CartLine {
        stock: current.map_or(0, |p| p.stock),
        ..line.clone()
      };
      return Err(stock_shortfall(&refreshed));
    }
  }
  let total_cents: i64 = lines.iter().map(|l| l.line_total_cents).sum();
  let order = store::orders::insert(&mut *tx, user_id, cart.id, &address, total_cents).await?;
  for line in &lines {
    store::orders::insert_item(&mut *tx, order.id, line).await?;
  }
  tx.commit().await?;

  info!(order_id = order.id, user_id, total_cents, "Order placed.");
  let mut guard = ctx_data.write();
  guard.notice = Some(Notice::success(format!("Order #{} created successfully!", order.id)));
  guard.order = Some(order);
  guard.lines = lines;
  Ok(PipelineControl::Continue)
}
