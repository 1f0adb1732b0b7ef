// shop/src/services/session_service.rs

//! Issuing and revoking login sessions.

use crate::errors::Result;
use crate::models::{Session, User};
use crate::store;
use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;
use std::time::Duration as StdDuration;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Cookie carrying the session token for browser clients.
pub const SESSION_COOKIE: &str = "plugpoint_session";

/// Builds an unsaved session for `user_id` that expires `ttl_hours` after `now`.
pub fn new_session(user_id: i64, now: DateTime<Utc>, ttl_hours: i64) -> Session {
  Session {
    token: Uuid::new_v4().simple().to_string(),
    user_id,
    created_at: now,
    expires_at: now + Duration::hours(ttl_hours),
  }
}

#[instrument(name = "session_service::open", skip(pool), fields(user_id = user_id))]
pub async fn open(pool: &SqlitePool, user_id: i64, ttl_hours: i64) -> Result<Session> {
  let session = new_session(user_id, Utc::now(), ttl_hours);
  store::sessions::insert(pool, &session).await?;
  debug!(expires_at = %session.expires_at, "Session opened.");
  Ok(session)
}

pub async fn resolve(pool: &SqlitePool, token: &str) -> Result<Option<User>> {
  store::sessions::user_for_token(pool, token, Utc::now()).await
}

#[instrument(name = "session_service::close", skip_all)]
pub async fn close(pool: &SqlitePool, token: &str) -> Result<bool> {
  store::sessions::delete(pool, token).await
}

/// Deletes expired sessions every `every`, for as long as the runtime lives.
pub async fn purge_expired_periodically(pool: SqlitePool, every: StdDuration) {
  let mut ticker = tokio::time::interval(every);
  loop {
    ticker.tick().await;
    match store::sessions::purge_expired(&pool, Utc::now()).await {
      Ok(0) => {}
      Ok(purged) => info!(purged, "Expired sessions removed."),
      Err(e) => warn!(error = %e, "Session purge failed."),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_sessions_get_distinct_tokens_and_expiry() {
    let now = Utc::now();
    let a = new_session(7, now, 2);
    let b = new_session(7, now, 2);
    assert_ne!(a.token, b.token);
    assert_eq!(a.token.len(), 32);
    assert!(!a.is_expired_at(now));
    assert!(!a.is_expired_at(now + Duration::minutes(119)));
    assert!(a.is_expired_at(now + Duration::hours(2)));
  }
}
