// shop/src/store/products.rs

use crate::errors::Result;
use crate::models::{NewProduct, Product};
use chrono::Utc;
use sqlx::SqliteExecutor;

const PRODUCT_COLUMNS: &str = "id, name, description, price_cents, stock, image_url, created_at, updated_at";

/// All products ordered by name; `search` keeps those whose name contains it, ignoring case.
pub async fn list(db: impl SqliteExecutor<'_>, search: Option<&str>) -> Result<Vec<Product>> {
  let products = match search.map(str::trim).filter(|s| !s.is_empty()) {
    Some(term) => {
      sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE instr(lower(name), lower(?1)) > 0 ORDER BY name ASC, id ASC"
      ))
      .bind(term)
      .fetch_all(db)
      .await?
    }
    None => {
      sqlx::query_as::<_, Product>(&format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name ASC, id ASC"))
        .fetch_all(db)
        .await?
    }
  };
  Ok(products)
}

/// Up to `limit` in-stock products in random order.
pub async fn featured(db: impl SqliteExecutor<'_>, limit: i64) -> Result<Vec<Product>> {
  let products = sqlx::query_as::<_, Product>(&format!(
    "SELECT {PRODUCT_COLUMNS} FROM products WHERE stock > 0 ORDER BY RANDOM() LIMIT ?1"
  ))
  .bind(limit)
  .fetch_all(db)
  .await?;
  Ok(products)
}

pub async fn get(db: impl SqliteExecutor<'_>, product_id: i64) -> Result<Option<Product>> {
  let product = sqlx::query_as::<_, Product>(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"))
    .bind(product_id)
    .fetch_optional(db)
    .await?;
  Ok(product)
}

pub async fn insert(db: impl SqliteExecutor<'_>, new_product: &NewProduct) -> Result<Product> {
  let now = Utc::now();
  let product = sqlx::query_as::<_, Product>(&format!(
    "INSERT INTO products (name, description, price_cents, stock, image_url, created_at, updated_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6) RETURNING {PRODUCT_COLUMNS}"
  ))
  .bind(&new_product.name)
  .bind(&new_product.description)
  .bind(new_product.price_cents)
  .bind(new_product.stock)
  .bind(&new_product.image_url)
  .bind(now)
  .fetch_one(db)
  .await?;
  Ok(product)
}

pub async fn count(db: impl SqliteExecutor<'_>) -> Result<i64> {
  let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products").fetch_one(db).await?;
  Ok(n)
}

/// Takes `quantity` units out of stock. Returns `false`, changing nothing, when
/// fewer than `quantity` units remain.
pub async fn decrement_stock(db: impl SqliteExecutor<'_>, product_id: i64, quantity: i64) -> Result<bool> {
  let result = sqlx::query(
    "UPDATE products SET stock = stock - ?1, updated_at = ?2 WHERE id = ?3 AND stock >= ?1",
  )
  .bind(quantity)
  .bind(Utc::now())
  .bind(product_id)
  .execute(db)
  .await?;
  Ok(result.rows_affected() == 1)
}
