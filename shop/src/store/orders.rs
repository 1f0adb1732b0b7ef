// shop/src/store/orders.rs

use crate::errors::Result;
use crate::models::{CartLine, Order, OrderItem, OrderStatus};
use chrono::Utc;
use sqlx::SqliteExecutor;

const ORDER_COLUMNS: &str = "id, user_id, cart_id, shipping_address, status, total_cents, created_at";

pub async fn insert(
  db: impl SqliteExecutor<'_>,
  user_id: i64,
  cart_id: i64,
  shipping_address: &str,
  total_cents: i64,
) -> Result<Order> {
  let order = sqlx::query_as::<_, Order>(&format!(
    "INSERT INTO orders (user_id, cart_id, shipping_address, status, total_cents, created_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING {ORDER_COLUMNS}"
  ))
  .bind(user_id)
  .bind(cart_id)
  .bind(shipping_address)
  .bind(OrderStatus::Pending)
  .bind(total_cents)
  .bind(Utc::now())
  .fetch_one(db)
  .await?;
  Ok(order)
}

/// Records one cart line against the order, freezing its current unit price.
pub async fn insert_item(db: impl SqliteExecutor<'_>, order_id: i64, line: &CartLine) -> Result<OrderItem> {
  let item = sqlx::query_as::<_, OrderItem>(
    "INSERT INTO order_items (order_id, product_id, product_name, quantity, price_at_purchase_cents) \
     VALUES (?1, ?2, ?3, ?4, ?5) \
     RETURNING id, order_id, product_id, product_name, quantity, price_at_purchase_cents",
  )
  .bind(order_id)
  .bind(line.product_id)
  .bind(&line.product_name)
  .bind(line.quantity)
  .bind(line.unit_price_cents)
  .fetch_one(db)
  .await?;
  Ok(item)
}

/// Newest first.
pub async fn list_for_user(db: impl SqliteExecutor<'_>, user_id: i64) -> Result<Vec<Order>> {
  let orders = sqlx::query_as::<_, Order>(&format!(
    "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = ?1 ORDER BY created_at DESC, id DESC"
  ))
  .bind(user_id)
  .fetch_all(db)
  .await?;
  Ok(orders)
}

pub async fn get_for_user(db: impl SqliteExecutor<'_>, order_id: i64, user_id: i64) -> Result<Option<Order>> {
  let order = sqlx::query_as::<_, Order>(&format!(
    "SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1 AND user_id = ?2"
  ))
  .bind(order_id)
  .bind(user_id)
  .fetch_optional(db)
  .await?;
  Ok(order)
}

pub async fn items(db: impl SqliteExecutor<'_>, order_id: i64) -> Result<Vec<OrderItem>> {
  let items = sqlx::query_as::<_, OrderItem>(
    "SELECT id, order_id, product_id, product_name, quantity, price_at_purchase_cents \
     FROM order_items WHERE order_id = ?1 ORDER BY id ASC",
  )
  .bind(order_id)
  .fetch_all(db)
  .await?;
  Ok(items)
}
