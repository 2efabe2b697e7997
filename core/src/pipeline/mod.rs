// logmill/src/pipeline/mod.rs

//! Defines the compiled `Pipeline`, its construction and execution logic.

pub mod definition;
pub mod execution;
pub mod factory;

// Re-export the main Pipeline struct
pub use definition::Pipeline;
pub use factory::PipelineFactory;
