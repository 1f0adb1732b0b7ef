// shop/src/models/cart.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Cart {
  pub id: i64,
  pub user_id: i64,
  pub is_active: bool,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CartItem {
  pub id: i64,
  pub cart_id: i64,
  pub product_id: i64,
  pub quantity: i64,
}

/// A cart item joined with the product it points at.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CartLine {
  pub item_id: i64,
  pub product_id: i64,
  pub product_name: String,
  pub unit_price_cents: i64,
  pub stock: i64,
  pub quantity: i64,
  pub line_total_cents: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartView {
  pub cart: Cart,
  pub items: Vec<CartLine>,
  pub item_count: i64,
  pub total_cents: i64,
}

impl CartView {
  pub fn new(cart: Cart, items: Vec<CartLine>) -> Self {
    let item_count = items.iter().map(|l| l.quantity).sum();
    let total_cents = items.iter().map(|l| l.line_total_cents).sum();
    Self {
      cart,
      items,
      item_count,
      total_cents,
    }
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn line(item_id: i64, unit: i64, quantity: i64) -> CartLine {
    CartLine {
      item_id,
      product_id: item_id,
      product_name: format!("product {item_id}"),
      unit_price_cents: unit,
      stock: 10,
      quantity,
      line_total_cents: unit * quantity,
    }
  }

  #[test]
  fn totals_sum_lines() {
    let cart = Cart {
      id: 1,
      user_id: 1,
      is_active: true,
      created_at: Utc::now(),
    };
    let view = CartView::new(cart, vec![line(1, 1299, 2), line(2, 500, 1)]);
    assert_eq!(view.item_count, 3);
    assert_eq!(view.total_cents, 3098);
    assert!(!view.is_empty());
  }
}
