pub mod condition;
pub mod config;
pub mod control;
pub mod document;
pub mod processor;
pub mod step;

// Re-export key types for easier access from other logmill modules (and lib.rs)
pub use condition::{Condition, ConditionFactory};
pub use config::Config;
pub use control::{ProcessResult, StepFailure};
pub use document::Document;
pub use processor::{Processor, ProcessorFactory};
pub use step::{ConditionalExecutionStep, ExecutionStep, ProcessorExecutionStep};
