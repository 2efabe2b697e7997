// logmill/src/pipeline/execution.rs

//! Contains `Pipeline::execute()`, the interpreter walking a compiled step
//! tree against one document.
//!
//! The walk keeps an explicit stack of step lists instead of recursing, so
//! nesting depth is bounded by memory, not by the call stack. Only a
//! processor's own `onFailure` list can recover its failure; any other
//! failure ends the run, because every enclosing list stops on it as well.

use crate::core::control::{ProcessResult, StepFailure};
use crate::core::document::Document;
use crate::core::step::ExecutionStep;
use crate::parser::{conditional_segment, join_path, step_path, ON_FAILURE_SEGMENT, ON_FALSE_SEGMENT, ON_TRUE_SEGMENT};
use crate::pipeline::definition::Pipeline;
use tracing::{event, instrument, Level};

/// A step list being walked.
struct Frame<'p> {
  steps: &'p [ExecutionStep],
  next: usize,
  /// Path segment this list adds below its parent, e.g. `if[2]/else`.
  segment: String,
}

impl<'p> Frame<'p> {
  fn new(steps: &'p [ExecutionStep], segment: String) -> Self {
    Self { steps, next: 0, segment }
  }
}

/// Full address of `leaf` inside the innermost open list.
fn failure_path(stack: &[Frame<'_>], leaf: &str) -> String {
  join_path(stack.iter().map(|frame| frame.segment.as_str()), leaf)
}

impl Pipeline {
  /// Runs every step against `doc`, mutating it in place.
  ///
  /// Returns `Success` when all steps completed, including any fallback or
  /// branch they entered, or the first unrecovered failure. Mutations made
  /// before a failure stay on the document.
  #[instrument(
        name = "Pipeline::execute",
        skip_all,
        fields(pipeline_id = %self.id, num_steps = self.steps.len())
    )]
  pub fn execute(&self, doc: &mut Document) -> ProcessResult {
    let result = execute_steps(&self.steps, doc);
    match &result {
      ProcessResult::Success => event!(Level::DEBUG, "Pipeline execution completed successfully."),
      ProcessResult::Failure(failure) => event!(Level::DEBUG, %failure, "Pipeline execution failed."),
    }
    result
  }
}

/// Executes an ordered step list against `doc`.
pub fn execute_steps(steps: &[ExecutionStep], doc: &mut Document) -> ProcessResult {
  let mut stack = vec![Frame::new(steps, String::new())];

  while let Some(frame) = stack.last_mut() {
    let steps = frame.steps;
    let index = frame.next;
    let Some(step) = steps.get(index) else {
      // List finished; for a fallback list this means the failure it was
      // entered for is handled.
      stack.pop();
      continue;
    };
    frame.next += 1;

    match step {
      ExecutionStep::Processor(processor_step) => match processor_step.processor.process(doc) {
        Ok(()) => {
          event!(Level::TRACE, step = %processor_step.name, "Processor step succeeded.");
        }
        Err(error) => match processor_step.on_failure.as_deref() {
          Some(fallback) => {
            event!(
              Level::WARN,
              step = %processor_step.name,
              depth = stack.len(),
              %error,
              "Processor step failed, running its onFailure steps."
            );
            stack.push(Frame::new(fallback, step_path(&processor_step.name, ON_FAILURE_SEGMENT)));
          }
          None => {
            let path = failure_path(&stack, &processor_step.name);
            event!(Level::DEBUG, step = %path, %error, "Processor step failed.");
            return ProcessResult::Failure(StepFailure { step: path, error });
          }
        },
      },
      ExecutionStep::Conditional(conditional_step) => {
        let matched = conditional_step.condition.evaluate(doc);
        let (branch, segment) = if matched {
          (conditional_step.on_true.as_slice(), ON_TRUE_SEGMENT)
        } else {
          (conditional_step.on_false.as_slice(), ON_FALSE_SEGMENT)
        };
        event!(
          Level::TRACE,
          condition = conditional_step.condition.name(),
          matched,
          branch_len = branch.len(),
          "Conditional step evaluated."
        );
        if !branch.is_empty() {
          stack.push(Frame::new(branch, step_path(&conditional_segment(index), segment)));
        }
      }
    }
  }

  ProcessResult::Success
}
