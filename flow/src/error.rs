// flow/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Errors raised by the pipeline engine itself.
///
/// Application pipelines carry their own error type; it must implement
/// `From<FlowError>` so engine failures can flow through the same channel.
#[derive(Debug, Error)]
pub enum FlowError {
  #[error("Step not found in pipeline '{pipeline}': {step_name}")]
  StepNotFound { pipeline: String, step_name: String },

  #[error("Step already defined in pipeline '{pipeline}': {step_name}")]
  DuplicateStep { pipeline: String, step_name: String },

  #[error("Handler missing for non-optional step '{step_name}' in pipeline '{pipeline}'")]
  HandlerMissing { pipeline: String, step_name: String },

  #[error("Context type mismatch during dispatch (expected {expected_type})")]
  TypeMismatch { expected_type: String },

  #[error("No pipeline registered for context type {type_name}")]
  NotRegistered { type_name: String },

  #[error("Handler failed. Source: {source}")]
  HandlerError {
    #[source]
    source: AnyhowError,
  },
}

impl From<AnyhowError> for FlowError {
  fn from(err: AnyhowError) -> Self {
    FlowError::HandlerError { source: err }
  }
}

pub type FlowResult<T, E = FlowError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn anyhow_errors_become_handler_errors() {
    let err: FlowError = anyhow::anyhow!("disk on fire").into();
    match err {
      FlowError::HandlerError { source } => assert_eq!(source.to_string(), "disk on fire"),
      other => panic!("unexpected variant: {other:?}"),
    }
  }

  #[test]
  fn display_names_pipeline_and_step() {
    let err = FlowError::HandlerMissing {
      pipeline: "checkout".to_string(),
      step_name: "place_order".to_string(),
    };
    assert_eq!(
      err.to_string(),
      "Handler missing for non-optional step 'place_order' in pipeline 'checkout'"
    );
  }
}
