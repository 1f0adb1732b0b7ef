// shop/src/pipelines/common_steps.rs

//! Steps shared by more than one pipeline.

use crate::errors::{AppError, Result};
use crate::models::Session;
use crate::pipelines::contexts::{LoginCtxData, RegisterCtxData};
use crate::services::session_service;
use crate::state::AppState;
use plugpoint_flow::{ContextData, PipelineControl};
use tracing::{info, instrument};

/// Contexts that end by signing a user in.
pub trait SessionTarget: Send + Sync + 'static {
  fn app_state(&self) -> &AppState;
  /// The user the session is for, once an earlier step has settled it.
  fn session_user_id(&self) -> Option<i64>;
  fn set_session(&mut self, session: Session);
}

impl SessionTarget for RegisterCtxData {
  fn app_state(&self) -> &AppState {
    &self.app_state
  }

  fn session_user_id(&self) -> Option<i64> {
    self.created_user.as_ref().map(|u| u.id)
  }

  fn set_session(&mut self, session: Session) {
    self.session = Some(session);
  }
}

impl SessionTarget for LoginCtxData {
  fn app_state(&self) -> &AppState {
    &self.app_state
  }

  fn session_user_id(&self) -> Option<i64> {
    self.user.as_ref().map(|u| u.id)
  }

  fn set_session(&mut self, session: Session) {
    self.session = Some(session);
  }
}

#[instrument(name = "common_step::open_session", skip_all, err(Display))]
pub async fn open_session<T: SessionTarget>(ctx_data: ContextData<T>) -> Result<PipelineControl> {
  let (user_id, pool, ttl_hours) = {
    let guard = ctx_data.read();
    (
      guard.session_user_id(),
      guard.app_state().db_pool.clone(),
      guard.app_state().config.session_ttl_hours,
    )
  };
  let user_id =
    user_id.ok_or_else(|| AppError::Internal("No user resolved before opening a session.".to_string()))?;

  let session = session_service::open(&pool, user_id, ttl_hours).await?;
  ctx_data.write().set_session(session);
  info!(user_id, "User signed in.");
  Ok(PipelineControl::Continue)
}
