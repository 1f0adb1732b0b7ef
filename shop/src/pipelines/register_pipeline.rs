// shop/src/pipelines/register_pipeline.rs

use crate::errors::{AppError, Result};
use crate::pipelines::common_steps;
use crate::pipelines::contexts::RegisterCtxData;
use crate::services::auth_service;
use crate::store;
use plugpoint_flow::{ContextData, FlowRegistry, Pipeline, PipelineControl};
use tracing::{event, info, warn, Level};

pub const USERNAME_TAKEN: &str = "A user with that username already exists.";

pub fn build_register_pipeline() -> Pipeline<RegisterCtxData, AppError> {
  let mut p = Pipeline::<RegisterCtxData, AppError>::new(
    "register",
    &[
      ("validate_registration_input", false, None),
      ("check_username_available", false, None),
      ("create_user", false, None),
      ("open_session", false, None),
    ],
  );
  p.on_root("validate_registration_input", validate_registration_input);
  p.on_root("check_username_available", check_username_available);
  p.on_root("create_user", create_user);
  p.on_root("open_session", common_steps::open_session::<RegisterCtxData>);
  p
}

pub fn register_register_pipeline(flows: &FlowRegistry<AppError>) {
  flows.register_pipeline(build_register_pipeline());
  info!("Registration pipeline registered.");
}

async fn validate_registration_input(ctx_data: ContextData<RegisterCtxData>) -> Result<PipelineControl> {
  let mut guard = ctx_data.write();
  let trimmed = guard.username.trim().to_string();
  guard.username = trimmed;
  event!(Level::DEBUG, username = %guard.username, "Validating registration input.");
  auth_service::validate_username(&guard.username)?;
  auth_service::validate_new_password(&guard.username, &guard.password1, &guard.password2)?;
  Ok(PipelineControl::Continue)
}

async fn check_username_available(ctx_data: ContextData<RegisterCtxData>) -> Result<PipelineControl> {
  let (username, pool) = {
    let guard = ctx_data.read();
    (guard.username.clone(), guard.app_state.db_pool.clone())
  };
  if store::users::username_taken(&pool, &username).await? {
    warn!(%username, "Registration attempted with a taken username.");
    return Err(AppError::Validation(USERNAME_TAKEN.to_string()));
  }
  Ok(PipelineControl::Continue)
}

async fn create_user(ctx_data: ContextData<RegisterCtxData>) -> Result<PipelineControl> {
  let (username, password, pool) = {
    let guard = ctx_data.read();
    (guard.username.clone(), guard.password1.clone(), guard.app_state.db_pool.clone())
  };

  let password_hash = auth_service::hash_password(&password)?;
  let user = match store::users::insert(&pool, &username, &password_hash).await {
    Ok(user) => user,
    // Lost a race with a concurrent registration for the same name.
    Err(AppError::Sqlx(sqlx::Error::Database(db_err))) if db_err.is_unique_violation() => {
      return Err(AppError::Validation(USERNAME_TAKEN.to_string()));
    }
    Err(e) => return Err(e),
  };

  info!(user_id = user.id, %username, "User account created.");
  ctx_data.write().created_user = Some(user);
  Ok(PipelineControl::Continue)
}
