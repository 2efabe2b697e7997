// src/lib.rs

//! Logmill: a declarative pipeline engine for log documents.
//!
//! A pipeline is a tree of named steps, each either a processor invocation
//! (with an optional `onFailure` fallback list) or a two-way conditional.
//! Logmill
//!  - resolves processor and condition type names through explicit registries,
//!  - compiles the definition tree once, eagerly and fail-fast,
//!  - runs the compiled tree against any number of documents, concurrently if
//!    needed, returning a `ProcessResult` per document.

pub mod conditions;
pub mod core;
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod processors;
pub mod registry;

// --- Re-exports for the Public API ---

pub use crate::core::condition::{Condition, ConditionFactory};
pub use crate::core::config::Config;
pub use crate::core::control::{ProcessResult, StepFailure};
pub use crate::core::document::Document;
pub use crate::core::processor::{Processor, ProcessorFactory};
pub use crate::core::step::{ConditionalExecutionStep, ExecutionStep, ProcessorExecutionStep};

pub use crate::parser::definition::{
  ConditionDefinition,
  ConditionalExecutionStepDefinition,
  ExecutionStepDefinition,
  PipelineDefinition,
  ProcessorDefinition,
  ProcessorExecutionStepDefinition,
};
pub use crate::parser::ExecutionStepsParser;

pub use crate::pipeline::execution::execute_steps;
pub use crate::pipeline::{Pipeline, PipelineFactory};

pub use crate::registry::{ConditionFactoryRegistry, ProcessorFactoryRegistry, Registry};

pub use crate::error::{MillError, MillResult, ProcessorExecutionError};

/*
    Core workflow:
    1. Fill a `ProcessorFactoryRegistry` and a `ConditionFactoryRegistry`
       (`with_defaults()` holds the bundled types; `register` adds more).
    2. Build or deserialize a `PipelineDefinition`.
    3. Compile it with `PipelineFactory::create` (or `Pipeline::compile`).
    4. For each incoming record, build a `Document` and call
       `pipeline.execute(&mut doc)`; inspect the `ProcessResult`.
*/
