// shop/src/pipelines/login_pipeline.rs

use crate::errors::{AppError, Result};
use crate::pipelines::common_steps;
use crate::pipelines::contexts::LoginCtxData;
use crate::services::auth_service;
use crate::store;
use plugpoint_flow::{ContextData, FlowRegistry, Pipeline, PipelineControl};
use tracing::{event, info, warn, Level};

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub fn build_login_pipeline() -> Pipeline<LoginCtxData, AppError> {
  let mut p = Pipeline::<LoginCtxData, AppError>::new(
    "login",
    &[
      ("find_user", false, None),
      ("verify_password", false, None),
      ("open_session", false, None),
    ],
  );
  p.on_root("find_user", find_user);
  p.on_root("verify_password", verify_password);
  p.on_root("open_session", common_steps::open_session::<LoginCtxData>);
  p
}

pub fn register_login_pipeline(flows: &FlowRegistry<AppError>) {
  flows.register_pipeline(build_login_pipeline());
  info!("Login pipeline registered.");
}

async fn find_user(ctx_data: ContextData<LoginCtxData>) -> Result<PipelineControl> {
  let (username, pool) = {
    let guard = ctx_data.read();
    (guard.username.trim().to_string(), guard.app_state.db_pool.clone())
  };
  event!(Level::DEBUG, %username, "Looking up user for login.");

  match store::users::find_by_username(&pool, &username).await? {
    Some(user) => {
      ctx_data.write().user = Some(user);
      Ok(PipelineControl::Continue)
    }
    None => {
      warn!(%username, "Login attempted for unknown user.");
      Err(AppError::Auth(INVALID_CREDENTIALS.to_string()))
    }
  }
}

async fn verify_password(ctx_data: ContextData<LoginCtxData>) -> Result<PipelineControl> {
  let guard = ctx_data.read();
  let Some(user) = guard.user.as_ref() else {
    return Err(AppError::Internal("User missing at password verification.".to_string()));
  };
  if auth_service::verify_password(&user.password_hash, &guard.password)? {
    Ok(PipelineControl::Continue)
  } else {
    warn!(user_id = user.id, "Password mismatch on login.");
    Err(AppError::Auth(INVALID_CREDENTIALS.to_string()))
  }
}
