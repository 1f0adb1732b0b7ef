// tests/registry_tests.rs
mod common;

use common::*;
use plugpoint_flow::{ContextData, FlowError, FlowRegistry, Pipeline, PipelineResult};
use serial_test::serial;

#[derive(Debug, Default)]
struct UnregisteredCtx;

#[tokio::test]
#[serial]
async fn registry_dispatches_by_context_type() {
  setup_tracing();
  let registry = FlowRegistry::<TestError>::new();
  assert!(registry.is_empty());

  let mut pipeline = Pipeline::<OrderDraft, TestError>::new("draft", &[("only", false, None)]);
  pipeline.on_root("only", recording_handler("only", "ran"));
  registry.register_pipeline(pipeline);

  assert!(registry.contains::<OrderDraft>());
  assert!(!registry.contains::<UnregisteredCtx>());
  assert_eq!(registry.len(), 1);

  let ctx = ContextData::new(OrderDraft::default());
  assert_eq!(registry.run(ctx.clone()).await.unwrap(), PipelineResult::Completed);
  assert_eq!(ctx.read().message, "ran");
}

#[tokio::test]
#[serial]
async fn unregistered_context_type_fails() {
  setup_tracing();
  let registry = FlowRegistry::<FlowError>::new();
  let err = registry.run(ContextData::new(UnregisteredCtx)).await.unwrap_err();
  assert!(matches!(err, FlowError::NotRegistered { .. }));
}

#[tokio::test]
#[serial]
async fn later_registration_replaces_earlier_one() {
  setup_tracing();
  let registry = FlowRegistry::<TestError>::new();

  let mut first = Pipeline::<OrderDraft, TestError>::new("first", &[("only", false, None)]);
  first.on_root("only", recording_handler("only", "first"));
  registry.register_pipeline(first);

  let mut second = Pipeline::<OrderDraft, TestError>::new("second", &[("only", false, None)]);
  second.on_root("only", recording_handler("only", "second"));
  registry.register_pipeline(second);

  let ctx = ContextData::new(OrderDraft::default());
  registry.run(ctx.clone()).await.unwrap();
  assert_eq!(registry.len(), 1);
  assert_eq!(ctx.read().message, "second");
}

#[tokio::test]
#[serial]
async fn handler_errors_surface_through_registry() {
  setup_tracing();
  let registry = FlowRegistry::<TestError>::new();
  let mut pipeline = Pipeline::<OrderDraft, TestError>::new("broken", &[("only", false, None)]);
  pipeline.on_root("only", failing_handler("only", "boom"));
  registry.register_pipeline(pipeline);

  let err = registry.run(ContextData::new(OrderDraft::default())).await.unwrap_err();
  assert_eq!(err, TestError::Handler("boom".to_string()));
}
