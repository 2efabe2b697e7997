// logmill/src/core/control.rs

//! Defines the outcome of running a pipeline against one document.

use crate::error::ProcessorExecutionError;
use std::fmt;

/// The first unrecovered failure of a run, and where it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
  /// Slash-separated address of the failing step, e.g. `if[0]/else/add-t2`.
  pub step: String,
  pub error: ProcessorExecutionError,
}

impl fmt::Display for StepFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "processor step '{}' failed: {}", self.step, self.error)?;
    if let Some(field) = self.error.field() {
      write!(f, " (field '{}')", field)?;
    }
    Ok(())
  }
}

/// Outcome of a full pipeline execution.
///
/// Terminal: once a failure is recorded nothing else runs against the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessResult {
  /// Every step completed, including any fallback or branch it entered.
  Success,
  /// A step failed and no fallback recovered it.
  Failure(StepFailure),
}

impl ProcessResult {
  pub fn is_succeeded(&self) -> bool {
    matches!(self, ProcessResult::Success)
  }

  pub fn failure(&self) -> Option<&StepFailure> {
    match self {
      ProcessResult::Success => None,
      ProcessResult::Failure(failure) => Some(failure),
    }
  }

  /// Converts into a `Result`, for callers that prefer `?`.
  pub fn into_result(self) -> Result<(), StepFailure> {
    match self {
      ProcessResult::Success => Ok(()),
      ProcessResult::Failure(failure) => Err(failure),
    }
  }
}
