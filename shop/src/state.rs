// shop/src/state.rs

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::pipelines;
use plugpoint_flow::FlowRegistry;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub db_pool: SqlitePool,
  pub flows: Arc<FlowRegistry<AppError>>,
  pub config: Arc<AppConfig>,
}

impl AppState {
  /// Wraps the pool and config and registers every application pipeline.
  pub fn bootstrap(db_pool: SqlitePool, config: AppConfig) -> Self {
    let flows = Arc::new(FlowRegistry::<AppError>::new());
    pipelines::register_all_pipelines(&flows);
    Self {
      db_pool,
      flows,
      config: Arc::new(config),
    }
  }
}
