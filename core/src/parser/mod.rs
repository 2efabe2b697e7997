// logmill/src/parser/mod.rs

//! Compiles definition trees into executable step trees.
//!
//! Compilation is eager and fail-fast: the first unknown type, rejected
//! configuration or structural defect aborts the whole tree, and the error
//! names the offending step by its path. Nesting depth is bounded by memory,
//! not by the call stack.

pub mod definition;

use crate::core::condition::Condition;
use crate::core::processor::Processor;
use crate::core::step::{ConditionalExecutionStep, ExecutionStep, ProcessorExecutionStep};
use crate::error::{MillError, MillResult};
use crate::registry::{ConditionFactoryRegistry, ProcessorFactoryRegistry};
use definition::ExecutionStepDefinition;

use std::collections::HashSet;
use tracing::{event, instrument, Level};

pub(crate) const PATH_SEPARATOR: &str = "/";
pub(crate) const ON_FAILURE_SEGMENT: &str = "onFailure";
pub(crate) const ON_TRUE_SEGMENT: &str = "then";
pub(crate) const ON_FALSE_SEGMENT: &str = "else";

/// Appends `segment` to a step path. The top-level prefix is empty.
pub(crate) fn step_path(prefix: &str, segment: &str) -> String {
  if prefix.is_empty() {
    segment.to_string()
  } else {
    format!("{prefix}{PATH_SEPARATOR}{segment}")
  }
}

/// Joins the non-empty `segments` of the open step lists, then `leaf`.
pub(crate) fn join_path<'s>(segments: impl IntoIterator<Item = &'s str>, leaf: &str) -> String {
  let mut path = String::new();
  for segment in segments.into_iter().filter(|segment| !segment.is_empty()) {
    path.push_str(segment);
    path.push_str(PATH_SEPARATOR);
  }
  path.push_str(leaf);
  path
}

pub(crate) fn conditional_segment(index: usize) -> String {
  format!("if[{index}]")
}

/// What to build once a nested list has been compiled.
enum Pending<'d> {
  Root,
  Fallback {
    name: &'d str,
    processor: Box<dyn Processor>,
  },
  OnTrue {
    index: usize,
    condition: Box<dyn Condition>,
    on_false: &'d [ExecutionStepDefinition],
  },
  OnFalse {
    condition: Box<dyn Condition>,
    on_true: Vec<ExecutionStep>,
  },
}

/// A definition list being compiled.
struct ListFrame<'d> {
  definitions: &'d [ExecutionStepDefinition],
  next: usize,
  /// Path segment this list adds below its parent, e.g. `tag/onFailure`.
  segment: String,
  seen_names: HashSet<&'d str>,
  steps: Vec<ExecutionStep>,
  pending: Pending<'d>,
}

impl<'d> ListFrame<'d> {
  fn new(definitions: &'d [ExecutionStepDefinition], segment: String, pending: Pending<'d>) -> Self {
    Self {
      definitions,
      next: 0,
      segment,
      seen_names: HashSet::new(),
      steps: Vec::with_capacity(definitions.len()),
      pending,
    }
  }
}

fn path_of(stack: &[ListFrame<'_>], leaf: &str) -> String {
  join_path(stack.iter().map(|frame| frame.segment.as_str()), leaf)
}

/// Hands a finished step to the innermost open list.
fn attach(stack: &mut [ListFrame<'_>], compiled: &mut Vec<ExecutionStep>, step: ExecutionStep) {
  match stack.last_mut() {
    Some(parent) => parent.steps.push(step),
    None => compiled.push(step),
  }
}

/// Resolves definitions against a processor and a condition registry.
pub struct ExecutionStepsParser<'r> {
  processors: &'r ProcessorFactoryRegistry,
  conditions: &'r ConditionFactoryRegistry,
}

impl<'r> ExecutionStepsParser<'r> {
  pub fn new(processors: &'r ProcessorFactoryRegistry, conditions: &'r ConditionFactoryRegistry) -> Self {
    Self { processors, conditions }
  }

  #[instrument(
        name = "ExecutionStepsParser::parse",
        skip_all,
        fields(num_steps = definitions.len()),
        err(Display)
    )]
  pub fn parse(&self, definitions: &[ExecutionStepDefinition]) -> MillResult<Vec<ExecutionStep>> {
    let steps = self.compile(definitions)?;
    event!(Level::DEBUG, "Execution steps compiled.");
    Ok(steps)
  }

  /// Walks the definition tree with an explicit stack of open lists. A list's
  /// steps are wrapped into their parent step once the list is exhausted, so
  /// the tree is built bottom-up without recursing.
  fn compile<'d>(&self, definitions: &'d [ExecutionStepDefinition]) -> MillResult<Vec<ExecutionStep>> {
    let mut compiled = Vec::new();
    let mut stack = vec![ListFrame::new(definitions, String::new(), Pending::Root)];

    while let Some(frame) = stack.last_mut() {
      let definitions = frame.definitions;
      let index = frame.next;
      let Some(definition) = definitions.get(index) else {
        let Some(ListFrame { steps, pending, .. }) = stack.pop() else {
          break;
        };
        match pending {
          Pending::Root => compiled = steps,
          Pending::Fallback { name, processor } => {
            let step = ProcessorExecutionStep::new(name, processor, Some(steps));
            attach(&mut stack, &mut compiled, ExecutionStep::Processor(step));
          }
          Pending::OnTrue {
            index,
            condition,
            on_false,
          } => {
            let segment = step_path(&conditional_segment(index), ON_FALSE_SEGMENT);
            stack.push(ListFrame::new(
              on_false,
              segment,
              Pending::OnFalse {
                condition,
                on_true: steps,
              },
            ));
          }
          Pending::OnFalse { condition, on_true } => {
            let step = ConditionalExecutionStep::new(condition, on_true, steps);
            attach(&mut stack, &mut compiled, ExecutionStep::Conditional(step));
          }
        }
        continue;
      };
      frame.next += 1;

      match definition {
        ExecutionStepDefinition::Processor(processor_def) => {
          let name = processor_def.name.as_str();
          let duplicate = !frame.seen_names.insert(name);
          if name.trim().is_empty() {
            return Err(MillError::malformed(
              path_of(&stack, &format!("[{index}]")),
              "processor step has an empty name",
            ));
          }
          if duplicate {
            return Err(MillError::malformed(
              path_of(&stack, name),
              "step name is not unique within its list",
            ));
          }

          let type_name = processor_def.processor.type_name.as_str();
          if type_name.is_empty() {
            return Err(MillError::malformed(path_of(&stack, name), "processor type name is empty"));
          }
          let processor = self
            .processors
            .create(type_name, &processor_def.processor.config)
            .map_err(|err| err.at_step(&path_of(&stack, name)))?;

          event!(
            Level::TRACE,
            step = name,
            depth = stack.len(),
            type_name,
            has_fallback = processor_def.on_failure.is_some(),
            "Processor step compiled."
          );
          match processor_def.on_failure.as_deref() {
            Some(fallback) => stack.push(ListFrame::new(
              fallback,
              step_path(name, ON_FAILURE_SEGMENT),
              Pending::Fallback { name, processor },
            )),
            None => {
              let step = ProcessorExecutionStep::new(name, processor, None);
              attach(&mut stack, &mut compiled, ExecutionStep::Processor(step));
            }
          }
        }
        ExecutionStepDefinition::Conditional(conditional_def) => {
          let segment = conditional_segment(index);
          let (Some(on_true), Some(on_false)) = (&conditional_def.on_true, &conditional_def.on_false) else {
            let missing = if conditional_def.on_true.is_none() {
              ON_TRUE_SEGMENT
            } else {
              ON_FALSE_SEGMENT
            };
            return Err(MillError::malformed(
              path_of(&stack, &segment),
              format!("conditional step is missing its '{missing}' list"),
            ));
          };
          if conditional_def.condition.type_name.is_empty() {
            return Err(MillError::malformed(path_of(&stack, &segment), "condition type name is empty"));
          }

          let condition = self
            .conditions
            .create_from(&conditional_def.condition)
            .map_err(|err| err.at_step(&path_of(&stack, &segment)))?;

          event!(
            Level::TRACE,
            step = %segment,
            depth = stack.len(),
            condition = %conditional_def.condition.type_name,
            "Conditional step compiled."
          );
          stack.push(ListFrame::new(
            on_true.as_slice(),
            step_path(&segment, ON_TRUE_SEGMENT),
            Pending::OnTrue {
              index,
              condition,
              on_false: on_false.as_slice(),
            },
          ));
        }
      }
    }

    Ok(compiled)
  }
}
