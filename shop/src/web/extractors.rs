// shop/src/web/extractors.rs

use crate::errors::AppError;
use crate::models::User;
use crate::services::session_service::{self, SESSION_COOKIE};
use crate::state::AppState;
use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, warn};

/// The session token presented with the request: a bearer token wins over the cookie.
pub fn session_token(req: &HttpRequest) -> Option<String> {
  let bearer = req
    .headers()
    .get(AUTHORIZATION)
    .and_then(|value| value.to_str().ok())
    .and_then(|value| value.strip_prefix("Bearer "))
    .map(str::trim)
    .filter(|token| !token.is_empty())
    .map(str::to_string);
  bearer.or_else(|| req.cookie(SESSION_COOKIE).map(|c| c.value().to_string()))
}

/// A user resolved from a live session. Rejects the request with 401 otherwise.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
  pub user: User,
  pub token: String,
}

impl AuthenticatedUser {
  pub fn id(&self) -> i64 {
    self.user.id
  }
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let token = session_token(req);
    let app_state = req.app_data::<web::Data<AppState>>().cloned();

    Box::pin(async move {
      let app_state =
        app_state.ok_or_else(|| AppError::Internal("AppState is not registered with the app.".to_string()))?;
      let Some(token) = token else {
        debug!("Request carried no session token.");
        return Err(AppError::Auth("Authentication required".to_string()));
      };
      match session_service::resolve(&app_state.db_pool, &token).await? {
        Some(user) => Ok(AuthenticatedUser { user, token }),
        None => {
          warn!("Rejected unknown or expired session token.");
          Err(AppError::Auth("Your session has expired. Please log in again.".to_string()))
        }
      }
    })
  }
}
