// logmill/src/parser/definition.rs

//! The declarative, serializable description of a pipeline.
//!
//! A loader produces these from JSON or YAML; nothing here has behavior. The
//! serialized shape of one step is either
//! `{"processor": {"name": .., "type": .., "config": {..}, "onFailure": [..]}}` or
//! `{"if": {"condition": {"type": .., "config": {..}}, "then": [..], "else": [..]}}`.

use crate::core::config::Config;
use serde::{Deserialize, Serialize};

/// A processor type name plus its opaque configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorDefinition {
  #[serde(rename = "type")]
  pub type_name: String,
  #[serde(default)]
  pub config: Config,
}

impl ProcessorDefinition {
  pub fn new(type_name: impl Into<String>, config: Config) -> Self {
    Self {
      type_name: type_name.into(),
      config,
    }
  }
}

/// A condition type name plus its opaque configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionDefinition {
  #[serde(rename = "type")]
  pub type_name: String,
  #[serde(default)]
  pub config: Config,
}

impl ConditionDefinition {
  pub fn new(type_name: impl Into<String>, config: Config) -> Self {
    Self {
      type_name: type_name.into(),
      config,
    }
  }
}

/// One node of the definition tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExecutionStepDefinition {
  #[serde(rename = "processor")]
  Processor(ProcessorExecutionStepDefinition),
  #[serde(rename = "if")]
  Conditional(ConditionalExecutionStepDefinition),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorExecutionStepDefinition {
  /// Unique within its containing list.
  pub name: String,
  #[serde(flatten)]
  pub processor: ProcessorDefinition,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub on_failure: Option<Vec<ExecutionStepDefinition>>,
}

/// A two-way branch. Both lists are required (they may be empty); they are
/// optional here only so a loader can hand over a definition missing one and
/// let compilation reject it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalExecutionStepDefinition {
  pub condition: ConditionDefinition,
  #[serde(rename = "then", default, skip_serializing_if = "Option::is_none")]
  pub on_true: Option<Vec<ExecutionStepDefinition>>,
  #[serde(rename = "else", default, skip_serializing_if = "Option::is_none")]
  pub on_false: Option<Vec<ExecutionStepDefinition>>,
}

impl ExecutionStepDefinition {
  pub fn processor(name: impl Into<String>, processor: ProcessorDefinition) -> Self {
    ExecutionStepDefinition::Processor(ProcessorExecutionStepDefinition {
      name: name.into(),
      processor,
      on_failure: None,
    })
  }

  pub fn processor_with_fallback(
    name: impl Into<String>,
    processor: ProcessorDefinition,
    on_failure: Vec<ExecutionStepDefinition>,
  ) -> Self {
    ExecutionStepDefinition::Processor(ProcessorExecutionStepDefinition {
      name: name.into(),
      processor,
      on_failure: Some(on_failure),
    })
  }

  pub fn conditional(
    condition: ConditionDefinition,
    on_true: Vec<ExecutionStepDefinition>,
    on_false: Vec<ExecutionStepDefinition>,
  ) -> Self {
    ExecutionStepDefinition::Conditional(ConditionalExecutionStepDefinition {
      condition,
      on_true: Some(on_true),
      on_false: Some(on_false),
    })
  }
}

/// A whole pipeline as a loader hands it over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineDefinition {
  pub id: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub steps: Vec<ExecutionStepDefinition>,
}

/// Drops nested definition lists one level at a time, so a deep tree built in
/// code does not recurse through the default drop glue.
fn release(mut pending: Vec<ExecutionStepDefinition>) {
  while let Some(mut definition) = pending.pop() {
    match &mut definition {
      ExecutionStepDefinition::Processor(processor_def) => {
        if let Some(mut on_failure) = processor_def.on_failure.take() {
          pending.append(&mut on_failure);
        }
      }
      ExecutionStepDefinition::Conditional(conditional_def) => {
        if let Some(mut on_true) = conditional_def.on_true.take() {
          pending.append(&mut on_true);
        }
        if let Some(mut on_false) = conditional_def.on_false.take() {
          pending.append(&mut on_false);
        }
      }
    }
  }
}

impl Drop for ProcessorExecutionStepDefinition {
  fn drop(&mut self) {
    if let Some(on_failure) = self.on_failure.take() {
      release(on_failure);
    }
  }
}

impl Drop for ConditionalExecutionStepDefinition {
  fn drop(&mut self) {
    let mut nested = self.on_true.take().unwrap_or_default();
    nested.extend(self.on_false.take().into_iter().flatten());
    release(nested);
  }
}
