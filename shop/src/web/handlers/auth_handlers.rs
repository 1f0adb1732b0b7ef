// shop/src/web/handlers/auth_handlers.rs

use actix_web::cookie::Cookie;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use super::require_completed;
use crate::errors::{AppError, Result};
use crate::models::{Session, User};
use crate::notice::Notice;
use crate::pipelines::contexts::{LoginCtxData, RegisterCtxData};
use crate::services::session_service::{self, SESSION_COOKIE};
use crate::state::AppState;
use crate::web::extractors::session_token;
use plugpoint_flow::ContextData;

#[derive(Deserialize, Debug)]
pub struct RegisterPayload {
  #[serde(default)]
  pub username: String,
  #[serde(default)]
  pub password1: String,
  #[serde(default)]
  pub password2: String,
}

#[derive(Deserialize, Debug)]
pub struct LoginPayload {
  #[serde(default)]
  pub username: String,
  #[serde(default)]
  pub password: String,
}

fn session_cookie(token: &str) -> Cookie<'static> {
  Cookie::build(SESSION_COOKIE, token.to_string())
    .path("/")
    .http_only(true)
    .finish()
}

fn signed_in_body(notice: Notice, user: &User, session: &Session) -> serde_json::Value {
  json!({
    "message": notice.message,
    "level": notice.level,
    "user": user,
    "token": session.token,
    "expires_at": session.expires_at,
  })
}

#[instrument(name = "handler::register", skip(app_state, payload), fields(username = %payload.username))]
pub async fn register_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<RegisterPayload>,
) -> Result<HttpResponse> {
  let payload = payload.into_inner();
  let ctx = ContextData::new(RegisterCtxData::new(
    app_state.get_ref().clone(),
    payload.username,
    payload.password1,
    payload.password2,
  ));
  require_completed(app_state.flows.run(ctx.clone()).await?, "register")?;

  let guard = ctx.read();
  let (Some(user), Some(session)) = (guard.created_user.as_ref(), guard.session.as_ref()) else {
    return Err(AppError::Internal("Registration finished without a user session.".to_string()));
  };
  info!(user_id = user.id, "Registration complete.");
  Ok(
    HttpResponse::Created()
      .cookie(session_cookie(&session.token))
      .json(signed_in_body(Notice::success("Registration successful!"), user, session)),
  )
}

#[instrument(name = "handler::login", skip(app_state, payload), fields(username = %payload.username))]
pub async fn login_handler(app_state: web::Data<AppState>, payload: web::Json<LoginPayload>) -> Result<HttpResponse> {
  let payload = payload.into_inner();
  let ctx = ContextData::new(LoginCtxData::new(
    app_state.get_ref().clone(),
    payload.username,
    payload.password,
  ));
  require_completed(app_state.flows.run(ctx.clone()).await?, "login")?;

  let guard = ctx.read();
  let (Some(user), Some(session)) = (guard.user.as_ref(), guard.session.as_ref()) else {
    return Err(AppError::Internal("Login finished without a user session.".to_string()));
  };
  Ok(
    HttpResponse::Ok()
      .cookie(session_cookie(&session.token))
      .json(signed_in_body(Notice::success("Login successful!"), user, session)),
  )
}

#[instrument(name = "handler::logout", skip_all)]
pub async fn logout_handler(app_state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
  if let Some(token) = session_token(&req) {
    let removed = session_service::close(&app_state.db_pool, &token).await?;
    info!(removed, "Logout processed.");
  }

  let mut removal = session_cookie("");
  removal.make_removal();
  let notice = Notice::success("Logged out successfully");
  Ok(
    HttpResponse::Ok()
      .cookie(removal)
      .json(json!({ "message": notice.message, "level": notice.level })),
  )
}
