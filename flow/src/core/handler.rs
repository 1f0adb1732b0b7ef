// flow/src/core/handler.rs

//! The boxed handler type stored by pipelines.

use crate::core::context_data::ContextData;
use crate::core::control::PipelineControl;
use std::future::Future;
use std::pin::Pin;

/// A pipeline step handler.
///
/// Takes a clone of the run's `ContextData<T>` and resolves to a
/// `PipelineControl` or the pipeline's error type `Err`. Handlers lock the
/// context, copy out what they need, and drop the guard before awaiting.
pub type Handler<T, Err> = Box<
  dyn Fn(ContextData<T>) -> Pin<Box<dyn Future<Output = Result<PipelineControl, Err>> + Send>> + Send + Sync,
>;
