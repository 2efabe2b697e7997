// logmill/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Errors raised while bootstrapping registries or compiling definitions.
///
/// Every variant is fatal for the operation that produced it: a failed
/// compilation never yields a partial pipeline. Runtime failures for a single
/// document are reported through `ProcessResult` instead.
#[derive(Debug, Error)]
pub enum MillError {
  #[error("{kind} type '{type_name}' is already registered")]
  DuplicateRegistration { kind: &'static str, type_name: String },

  #[error("unknown {kind} type '{type_name}' at step '{step}'")]
  UnknownType {
    kind: &'static str,
    type_name: String,
    step: String,
  },

  #[error("invalid configuration for {kind} '{type_name}' at step '{step}': {source:#}")]
  InvalidConfiguration {
    kind: &'static str,
    type_name: String,
    step: String,
    #[source]
    source: AnyhowError,
  },

  #[error("malformed definition at step '{step}': {message}")]
  MalformedDefinition { step: String, message: String },
}

impl MillError {
  pub(crate) fn malformed(step: impl Into<String>, message: impl Into<String>) -> Self {
    MillError::MalformedDefinition {
      step: step.into(),
      message: message.into(),
    }
  }

  /// Returns the step path the error refers to, if any.
  pub fn step(&self) -> Option<&str> {
    match self {
      MillError::DuplicateRegistration { .. } => None,
      MillError::UnknownType { step, .. }
      | MillError::InvalidConfiguration { step, .. }
      | MillError::MalformedDefinition { step, .. } => Some(step),
    }
  }

  /// Re-addresses an error raised below the compiler (registry lookups know
  /// nothing about step paths).
  pub(crate) fn at_step(self, path: &str) -> Self {
    match self {
      MillError::UnknownType { kind, type_name, .. } => MillError::UnknownType {
        kind,
        type_name,
        step: path.to_string(),
      },
      MillError::InvalidConfiguration {
        kind,
        type_name,
        source,
        ..
      } => MillError::InvalidConfiguration {
        kind,
        type_name,
        step: path.to_string(),
        source,
      },
      other => other,
    }
  }
}

pub type MillResult<T, E = MillError> = std::result::Result<T, E>;

/// Failure reported by a processor for one document.
///
/// Recoverable through the step's `onFailure` list; otherwise it halts the run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ProcessorExecutionError {
  message: String,
  field: Option<String>,
}

impl ProcessorExecutionError {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
      field: None,
    }
  }

  /// A failure tied to a specific document field.
  pub fn for_field(field: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
      field: Some(field.into()),
    }
  }

  pub fn message(&self) -> &str {
    &self.message
  }

  pub fn field(&self) -> Option<&str> {
    self.field.as_deref()
  }
}
