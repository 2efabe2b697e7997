// logmill/src/pipeline/factory.rs

//! Bundles the two registries a pipeline is compiled against.

use crate::error::MillResult;
use crate::parser::definition::PipelineDefinition;
use crate::parser::ExecutionStepsParser;
use crate::pipeline::definition::Pipeline;
use crate::registry::{ConditionFactoryRegistry, ProcessorFactoryRegistry};
use std::sync::Arc;

/// Compiles pipeline definitions against a fixed pair of registries.
///
/// Registries are passed in explicitly; there is no global instance.
#[derive(Clone)]
pub struct PipelineFactory {
  processors: Arc<ProcessorFactoryRegistry>,
  conditions: Arc<ConditionFactoryRegistry>,
}

impl PipelineFactory {
  pub fn new(processors: Arc<ProcessorFactoryRegistry>, conditions: Arc<ConditionFactoryRegistry>) -> Self {
    Self { processors, conditions }
  }

  /// A factory over registries holding only the bundled capabilities.
  pub fn with_defaults() -> Self {
    Self::new(
      Arc::new(ProcessorFactoryRegistry::with_defaults()),
      Arc::new(ConditionFactoryRegistry::with_defaults()),
    )
  }

  pub fn processors(&self) -> &ProcessorFactoryRegistry {
    &self.processors
  }

  pub fn conditions(&self) -> &ConditionFactoryRegistry {
    &self.conditions
  }

  pub fn parser(&self) -> ExecutionStepsParser<'_> {
    ExecutionStepsParser::new(&self.processors, &self.conditions)
  }

  pub fn create(&self, definition: &PipelineDefinition) -> MillResult<Pipeline> {
    Pipeline::compile(definition, &self.parser())
  }
}
