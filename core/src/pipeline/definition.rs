// logmill/src/pipeline/definition.rs

//! Contains the compiled `Pipeline` struct and its construction from a
//! `PipelineDefinition`.

use crate::core::step::ExecutionStep;
use crate::error::MillResult;
use crate::parser::definition::PipelineDefinition;
use crate::parser::ExecutionStepsParser;
use tracing::{event, Level};

/// A compiled pipeline: an immutable step tree plus identification.
///
/// Safe to share across threads; each run mutates only the document it is
/// given.
#[derive(Debug)]
pub struct Pipeline {
  pub(crate) id: String,
  pub(crate) description: Option<String>,
  pub(crate) steps: Vec<ExecutionStep>,
}

impl Pipeline {
  pub fn new(id: impl Into<String>, description: Option<String>, steps: Vec<ExecutionStep>) -> Self {
    Self {
      id: id.into(),
      description,
      steps,
    }
  }

  /// Compiles `definition` through `parser`. Nothing is returned unless the
  /// whole tree compiled.
  pub fn compile(definition: &PipelineDefinition, parser: &ExecutionStepsParser<'_>) -> MillResult<Self> {
    let steps = parser.parse(&definition.steps)?;
    event!(Level::DEBUG, pipeline_id = %definition.id, num_steps = steps.len(), "Pipeline compiled.");
    Ok(Self::new(definition.id.clone(), definition.description.clone(), steps))
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  pub fn description(&self) -> Option<&str> {
    self.description.as_deref()
  }

  pub fn steps(&self) -> &[ExecutionStep] {
    &self.steps
  }
}
