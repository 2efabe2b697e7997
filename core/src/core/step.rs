// logmill/src/core/step.rs

//! The compiled, executable step tree.
//!
//! Mirrors the definition tree with live capability instances in place of
//! definitions. Each node exclusively owns its instances and sub-lists, and
//! the tree is never mutated after compilation.

use super::{Condition, Processor};

#[derive(Debug)]
pub enum ExecutionStep {
  Processor(ProcessorExecutionStep),
  Conditional(ConditionalExecutionStep),
}

#[derive(Debug)]
pub struct ProcessorExecutionStep {
  pub(crate) name: String,
  pub(crate) processor: Box<dyn Processor>,
  pub(crate) on_failure: Option<Vec<ExecutionStep>>,
}

impl ProcessorExecutionStep {
  pub fn new(name: impl Into<String>, processor: Box<dyn Processor>, on_failure: Option<Vec<ExecutionStep>>) -> Self {
    Self {
      name: name.into(),
      processor,
      on_failure,
    }
  }

  pub fn processor_name(&self) -> &str {
    &self.name
  }

  pub fn processor(&self) -> &dyn Processor {
    self.processor.as_ref()
  }

  pub fn on_failure_steps(&self) -> Option<&[ExecutionStep]> {
    self.on_failure.as_deref()
  }
}

#[derive(Debug)]
pub struct ConditionalExecutionStep {
  pub(crate) condition: Box<dyn Condition>,
  pub(crate) on_true: Vec<ExecutionStep>,
  pub(crate) on_false: Vec<ExecutionStep>,
}

impl ConditionalExecutionStep {
  pub fn new(condition: Box<dyn Condition>, on_true: Vec<ExecutionStep>, on_false: Vec<ExecutionStep>) -> Self {
    Self {
      condition,
      on_true,
      on_false,
    }
  }

  pub fn condition(&self) -> &dyn Condition {
    self.condition.as_ref()
  }

  pub fn on_true(&self) -> &[ExecutionStep] {
    &self.on_true
  }

  pub fn on_false(&self) -> &[ExecutionStep] {
    &self.on_false
  }
}

impl ExecutionStep {
  pub fn as_processor(&self) -> Option<&ProcessorExecutionStep> {
    match self {
      ExecutionStep::Processor(step) => Some(step),
      ExecutionStep::Conditional(_) => None,
    }
  }

  pub fn as_conditional(&self) -> Option<&ConditionalExecutionStep> {
    match self {
      ExecutionStep::Conditional(step) => Some(step),
      ExecutionStep::Processor(_) => None,
    }
  }
}

/// Drops nested lists one level at a time. Every step popped here has its
/// sub-lists taken first, so its own `Drop` finds nothing left to release.
fn release(mut pending: Vec<ExecutionStep>) {
  while let Some(mut step) = pending.pop() {
    match &mut step {
      ExecutionStep::Processor(processor_step) => {
        if let Some(mut on_failure) = processor_step.on_failure.take() {
          pending.append(&mut on_failure);
        }
      }
      ExecutionStep::Conditional(conditional_step) => {
        pending.append(&mut conditional_step.on_true);
        pending.append(&mut conditional_step.on_false);
      }
    }
  }
}

impl Drop for ProcessorExecutionStep {
  fn drop(&mut self) {
    if let Some(on_failure) = self.on_failure.take() {
      release(on_failure);
    }
  }
}

impl Drop for ConditionalExecutionStep {
  fn drop(&mut self) {
    let mut nested = std::mem::take(&mut self.on_true);
    nested.append(&mut self.on_false);
    release(nested);
  }
}
