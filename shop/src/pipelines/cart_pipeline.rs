// shop/src/pipelines/cart_pipeline.rs

//! Adding products to the active cart and changing line quantities.

use crate::errors::AppError;
use crate::notice::Notice;
use crate::pipelines::contexts::{AddToCartCtxData, UpdateCartItemCtxData};
use crate::store;
use plugpoint_flow::{ContextData, FlowRegistry, Pipeline, PipelineControl};
use tracing::{debug, info, warn};

pub fn build_add_to_cart_pipeline() -> Pipeline<AddToCartCtxData, AppError> {
  let mut p = Pipeline::<AddToCartCtxData, AppError>::new(
    "add_to_cart",
    &[
      ("validate_quantity", false, None),
      ("fetch_product", false, None),
      ("check_in_stock", false, None),
      ("add_or_increment_item", false, None),
    ],
  );

  p.on_root("validate_quantity", |ctx_data: ContextData<AddToCartCtxData>| {
    Box::pin(async move {
      let mut guard = ctx_data.write();
      let quantity = guard.requested_quantity.unwrap_or(1);
      if quantity < 1 {
        warn!(quantity, "Rejected add-to-cart with non-positive quantity.");
        return Err(AppError::Validation("Quantity must be at least 1.".to_string()));
      }
      guard.quantity = quantity;
      Ok(PipelineControl::Continue)
    })
  });

  p.on_root("fetch_product", |ctx_data: ContextData<AddToCartCtxData>| {
    Box::pin(async move {
      let (product_id, pool) = {
        let guard = ctx_data.read();
        (guard.product_id, guard.app_state.db_pool.clone())
      };
      let product = store::products::get(&pool, product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;
      debug!(product_id, stock = product.stock, "Product loaded for cart.");
      ctx_data.write().product = Some(product);
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  p.on_root("check_in_stock", |ctx_data: ContextData<AddToCartCtxData>| {
    Box::pin(async move {
      let in_stock = ctx_data.read().product.as_ref().map(|product| product.in_stock());
      match in_stock {
        Some(true) => Ok(PipelineControl::Continue),
        Some(false) => Err(AppError::Conflict("This product is out of stock.".to_string())),
        None => Err(AppError::Internal("Product missing at stock check.".to_string())),
      }
    })
  });

  p.on_root("add_or_increment_item", |ctx_data: ContextData<AddToCartCtxData>| {
    Box::pin(async move {
      let (user_id, quantity, product, pool) = {
        let guard = ctx_data.read();
        (guard.user_id, guard.quantity, guard.product.clone(), guard.app_state.db_pool.clone())
      };
      let product = product.ok_or_else(|| AppError::Internal("Product missing at cart update.".to_string()))?;

      let cart = store::carts::get_or_create_active(&pool, user_id).await?;
      let existing = store::carts::find_item(&pool, cart.id, product.id).await?;
      let current = existing.as_ref().map_or(0, |item| item.quantity);
      let wanted = current.checked_add(quantity).filter(|&n| n <= product.stock);

      let notice = if let Some(wanted) = wanted {
        if let Some(item) = existing {
          store::carts::set_item_quantity(&pool, item.id, wanted).await?;
          Notice::success(format!("Updated {} quantity to {}", product.name, wanted))
        } else {
          store::carts::insert_item(&pool, cart.id, product.id, wanted).await?;
          Notice::success(format!("Added {} to cart", product.name))
        }
      } else {
        warn!(product_id = product.id, current, quantity, stock = product.stock, "Add-to-cart exceeds stock.");
        Notice::warning(format!("Cannot add more {}. Only {} left.", product.name, product.stock))
      };

      info!(cart_id = cart.id, product_id = product.id, message = %notice.message, "Cart updated.");
      ctx_data.write().notice = Some(notice);
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  p
}

pub fn build_update_cart_item_pipeline() -> Pipeline<UpdateCartItemCtxData, AppError> {
  let mut p = Pipeline::<UpdateCartItemCtxData, AppError>::new(
    "update_cart_item",
    &[("load_item", false, None), ("apply_quantity", false, None)],
  );

  p.on_root("load_item", |ctx_data: ContextData<UpdateCartItemCtxData>| {
    Box::pin(async move {
      let (user_id, item_id, pool) = {
        let guard = ctx_data.read();
        (guard.user_id, guard.item_id, guard.app_state.db_pool.clone())
      };
      let line = store::carts::find_line_in_active_cart(&pool, user_id, item_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Cart item not found".to_string()))?;
      ctx_data.write().line = Some(line);
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  p.on_root("apply_quantity", |ctx_data: ContextData<UpdateCartItemCtxData>| {
    Box::pin(async move {
      let (quantity, line, pool) = {
        let guard = ctx_data.read();
        (guard.quantity, guard.line.clone(), guard.app_state.db_pool.clone())
      };
      let line = line.ok_or_else(|| AppError::Internal("Cart line missing at update.".to_string()))?;

      let notice = if quantity <= 0 {
        store::carts::delete_item(&pool, line.item_id).await?;
        Notice::success("Item removed from cart")
      } else if quantity <= line.stock {
        store::carts::set_item_quantity(&pool, line.item_id, quantity).await?;
        Notice::success(format!("Updated quantity to {quantity}"))
      } else {
        Notice::warning(format!("Only {} available in stock.", line.stock))
      };

      debug!(item_id = line.item_id, quantity, message = %notice.message, "Cart item quantity applied.");
      ctx_data.write().notice = Some(notice);
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  p
}

pub fn register_cart_pipelines(flows: &FlowRegistry<AppError>) {
  flows.register_pipeline(build_add_to_cart_pipeline());
  flows.register_pipeline(build_update_cart_item_pipeline());
  info!("Cart pipelines registered.");
}
