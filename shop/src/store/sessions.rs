// shop/src/store/sessions.rs

use crate::errors::Result;
use crate::models::{Session, User};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqliteExecutor};

pub async fn insert(db: impl SqliteExecutor<'_>, session: &Session) -> Result<()> {
  sqlx::query("INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES (?1, ?2, ?3, ?4)")
    .bind(&session.token)
    .bind(session.user_id)
    .bind(session.created_at)
    .bind(session.expires_at)
    .execute(db)
    .await?;
  Ok(())
}

#[derive(FromRow)]
struct SessionOwner {
  #[sqlx(flatten)]
  user: User,
  expires_at: DateTime<Utc>,
}

/// The user owning `token`, provided the session has not expired by `now`.
pub async fn user_for_token(db: impl SqliteExecutor<'_>, token: &str, now: DateTime<Utc>) -> Result<Option<User>> {
  let owner = sqlx::query_as::<_, SessionOwner>(
    "SELECT u.id, u.username, u.password_hash, u.date_joined, s.expires_at \
     FROM sessions s JOIN users u ON u.id = s.user_id \
     WHERE s.token = ?1",
  )
  .bind(token)
  .fetch_optional(db)
  .await?;
  Ok(owner.filter(|o| o.expires_at > now).map(|o| o.user))
}

/// Returns whether a session was actually removed.
pub async fn delete(db: impl SqliteExecutor<'_>, token: &str) -> Result<bool> {
  let result = sqlx::query("DELETE FROM sessions WHERE token = ?1")
    .bind(token)
    .execute(db)
    .await?;
  Ok(result.rows_affected() > 0)
}

pub async fn purge_expired(db: impl SqliteExecutor<'_>, now: DateTime<Utc>) -> Result<u64> {
  let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?1")
    .bind(now)
    .execute(db)
    .await?;
  Ok(result.rows_affected())
}
