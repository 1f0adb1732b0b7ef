// tests/error_handling_tests.rs
mod common;

use common::*;
use plugpoint_flow::{ContextData, FlowError, Pipeline, PipelineControl};
use serial_test::serial;

#[tokio::test]
#[serial]
async fn pipeline_with_flow_error_type_wraps_anyhow_failures() {
  setup_tracing();
  let mut pipeline = Pipeline::<OrderDraft, FlowError>::new("anyhow", &[("fetch", false, None)]);
  pipeline.on_root("fetch", |_ctx: ContextData<OrderDraft>| {
    Box::pin(async move { Err::<PipelineControl, anyhow::Error>(anyhow::anyhow!("connection reset")) })
  });

  let err = pipeline.run(ContextData::new(OrderDraft::default())).await.unwrap_err();
  match err {
    FlowError::HandlerError { source } => assert_eq!(source.to_string(), "connection reset"),
    other => panic!("expected HandlerError, got {other:?}"),
  }
}

#[tokio::test]
#[serial]
async fn handler_missing_names_the_step() {
  setup_tracing();
  let pipeline = Pipeline::<OrderDraft, FlowError>::new("empty", &[("missing", false, None)]);
  let err = pipeline.run(ContextData::new(OrderDraft::default())).await.unwrap_err();
  match err {
    FlowError::HandlerMissing { pipeline, step_name } => {
      assert_eq!(pipeline, "empty");
      assert_eq!(step_name, "missing");
    }
    other => panic!("expected HandlerMissing, got {other:?}"),
  }
}

#[tokio::test]
#[serial]
async fn context_changes_before_failure_are_kept() {
  setup_tracing();
  let mut pipeline =
    Pipeline::<OrderDraft, TestError>::new("partial", &[("write", false, None), ("explode", false, None)]);
  pipeline.on_root("write", recording_handler("write", "kept"));
  pipeline.on_root("explode", failing_handler("explode", "late failure"));

  let ctx = ContextData::new(OrderDraft::default());
  assert!(pipeline.run(ctx.clone()).await.is_err());
  assert_eq!(ctx.read().message, "kept");
}
