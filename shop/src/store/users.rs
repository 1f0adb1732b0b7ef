// shop/src/store/users.rs

use crate::errors::Result;
use crate::models::User;
use chrono::Utc;
use sqlx::SqliteExecutor;

pub async fn username_taken(db: impl SqliteExecutor<'_>, username: &str) -> Result<bool> {
  let taken = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = ?1)")
    .bind(username)
    .fetch_one(db)
    .await?;
  Ok(taken)
}

pub async fn insert(db: impl SqliteExecutor<'_>, username: &str, password_hash: &str) -> Result<User> {
  let user = sqlx::query_as::<_, User>(
    "INSERT INTO users (username, password_hash, date_joined) VALUES (?1, ?2, ?3) \
     RETURNING id, username, password_hash, date_joined",
  )
  .bind(username)
  .bind(password_hash)
  .bind(Utc::now())
  .fetch_one(db)
  .await?;
  Ok(user)
}

pub async fn find_by_username(db: impl SqliteExecutor<'_>, username: &str) -> Result<Option<User>> {
  let user = sqlx::query_as::<_, User>(
    "SELECT id, username, password_hash, date_joined FROM users WHERE username = ?1",
  )
  .bind(username)
  .fetch_optional(db)
  .await?;
  Ok(user)
}
