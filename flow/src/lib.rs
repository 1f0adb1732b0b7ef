// flow/src/lib.rs

//! Async step pipelines for the PlugPoint shop.
//!
//! A pipeline is a named, ordered list of steps. Each step carries
//! `before`, `on` and `after` handlers that share one lockable context.
//! Handlers may stop the run early, steps may be optional or skipped by a
//! predicate, and a `FlowRegistry` dispatches to the pipeline registered
//! for a given context type.
//!
//! ```ignore
//! let mut p = Pipeline::<SignupCtx, AppError>::new("signup", &[
//!   ("validate", false, None),
//!   ("persist", false, None),
//! ]);
//! p.on_root("validate", |ctx| Box::pin(async move { Ok::<_, AppError>(PipelineControl::Continue) }));
//! registry.register_pipeline(p);
//! registry.run(ContextData::new(SignupCtx::default())).await?;
//! ```

pub mod core;
pub mod error;
pub mod pipeline;
pub mod registry;

pub use crate::core::context_data::ContextData;
pub use crate::core::control::{PipelineControl, PipelineResult};
pub use crate::core::handler::Handler;
pub use crate::core::step::{SkipCondition, StepDef};
pub use crate::error::{FlowError, FlowResult};
pub use crate::pipeline::definition::Pipeline;
pub use crate::registry::FlowRegistry;
