// shop/src/store/carts.rs

use crate::errors::Result;
use crate::models::{Cart, CartItem, CartLine};
use chrono::Utc;
use sqlx::{SqliteExecutor, SqlitePool};

const LINE_SELECT: &str = "SELECT ci.id AS item_id, ci.product_id, p.name AS product_name, \
  p.price_cents AS unit_price_cents, p.stock, ci.quantity, ci.quantity * p.price_cents AS line_total_cents \
  FROM cart_items ci JOIN products p ON p.id = ci.product_id";

pub async fn find_active(db: impl SqliteExecutor<'_>, user_id: i64) -> Result<Option<Cart>> {
  let cart = sqlx::query_as::<_, Cart>(
    "SELECT id, user_id, is_active, created_at FROM carts WHERE user_id = ?1 AND is_active = 1",
  )
  .bind(user_id)
  .fetch_optional(db)
  .await?;
  Ok(cart)
}

/// The user's active cart, opening a new one when none exists.
pub async fn get_or_create_active(pool: &SqlitePool, user_id: i64) -> Result<Cart> {
  if let Some(cart) = find_active(pool, user_id).await? {
    return Ok(cart);
  }
  // A concurrent request may have opened the cart in between; the partial
  // unique index turns that into a no-op.
  sqlx::query("INSERT INTO carts (user_id, is_active, created_at) VALUES (?1, 1, ?2) ON CONFLICT DO NOTHING")
    .bind(user_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;
  let cart = sqlx::query_as::<_, Cart>(
    "SELECT id, user_id, is_active, created_at FROM carts WHERE user_id = ?1 AND is_active = 1",
  )
  .bind(user_id)
  .fetch_one(pool)
  .await?;
  Ok(cart)
}

pub async fn lines(db: impl SqliteExecutor<'_>, cart_id: i64) -> Result<Vec<CartLine>> {
  let lines = sqlx::query_as::<_, CartLine>(&format!("{LINE_SELECT} WHERE ci.cart_id = ?1 ORDER BY ci.id ASC"))
    .bind(cart_id)
    .fetch_all(db)
    .await?;
  Ok(lines)
}

pub async fn find_item(db: impl SqliteExecutor<'_>, cart_id: i64, product_id: i64) -> Result<Option<CartItem>> {
  let item = sqlx::query_as::<_, CartItem>(
    "SELECT id, cart_id, product_id, quantity FROM cart_items WHERE cart_id = ?1 AND product_id = ?2",
  )
  .bind(cart_id)
  .bind(product_id)
  .fetch_optional(db)
  .await?;
  Ok(item)
}

/// An item by id, only if it sits in `user_id`'s active cart.
pub async fn find_line_in_active_cart(db: impl SqliteExecutor<'_>, user_id: i64, item_id: i64) -> Result<Option<CartLine>> {
  let line = sqlx::query_as::<_, CartLine>(&format!(
    "{LINE_SELECT} JOIN carts c ON c.id = ci.cart_id WHERE ci.id = ?1 AND c.user_id = ?2 AND c.is_active = 1"
  ))
  .bind(item_id)
  .bind(user_id)
  .fetch_optional(db)
  .await?;
  Ok(line)
}

pub async fn insert_item(db: impl SqliteExecutor<'_>, cart_id: i64, product_id: i64, quantity: i64) -> Result<CartItem> {
  let item = sqlx::query_as::<_, CartItem>(
    "INSERT INTO cart_items (cart_id, product_id, quantity) VALUES (?1, ?2, ?3) \
     RETURNING id, cart_id, product_id, quantity",
  )
  .bind(cart_id)
  .bind(product_id)
  .bind(quantity)
  .fetch_one(db)
  .await?;
  Ok(item)
}

pub async fn set_item_quantity(db: impl SqliteExecutor<'_>, item_id: i64, quantity: i64) -> Result<()> {
  sqlx::query("UPDATE cart_items SET quantity = ?1 WHERE id = ?2")
    .bind(quantity)
    .bind(item_id)
    .execute(db)
    .await?;
  Ok(())
}

pub async fn delete_item(db: impl SqliteExecutor<'_>, item_id: i64) -> Result<bool> {
  let result = sqlx::query("DELETE FROM cart_items WHERE id = ?1")
    .bind(item_id)
    .execute(db)
    .await?;
  Ok(result.rows_affected() > 0)
}

/// Closes an active cart. Returns `false` when the cart was already closed.
pub async fn deactivate(db: impl SqliteExecutor<'_>, cart_id: i64) -> Result<bool> {
  let result = sqlx::query("UPDATE carts SET is_active = 0 WHERE id = ?1 AND is_active = 1")
    .bind(cart_id)
    .execute(db)
    .await?;
  Ok(result.rows_affected() == 1)
}
