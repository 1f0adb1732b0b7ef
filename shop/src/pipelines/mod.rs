// shop/src/pipelines/mod.rs

//! Workflow pipelines and their registration with the application's `FlowRegistry`.

use crate::errors::AppError;
use plugpoint_flow::FlowRegistry;

pub mod contexts;
pub mod common_steps;

pub mod register_pipeline;
pub mod login_pipeline;
pub mod cart_pipeline;
pub mod checkout_pipeline;

/// Registers every pipeline; called once while building `AppState`.
pub fn register_all_pipelines(flows: &FlowRegistry<AppError>) {
  tracing::info!("Registering pipelines...");

  register_pipeline::register_register_pipeline(flows);
  login_pipeline::register_login_pipeline(flows);
  cart_pipeline::register_cart_pipelines(flows);
  checkout_pipeline::register_checkout_pipeline(flows);

  tracing::info!(count = flows.len(), "All application pipelines registered.");
}
