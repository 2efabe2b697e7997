// logmill/src/core/processor.rs

//! The processor capability: something that mutates a `Document` and may fail.

use crate::core::config::Config;
use crate::core::document::Document;
use crate::error::ProcessorExecutionError;
use std::fmt;

/// A configured processor instance.
///
/// Instances live inside a compiled pipeline and are shared by every
/// concurrent run, so they must not keep per-document state. Expected domain
/// conditions (a tolerated missing field, say) are a no-op success or a
/// documented `ProcessorExecutionError`, never a panic.
pub trait Processor: fmt::Debug + Send + Sync {
  /// The registry type name this processor was built from.
  fn name(&self) -> &'static str;

  fn process(&self, doc: &mut Document) -> Result<(), ProcessorExecutionError>;
}

/// Builds a processor from its configuration, validating it eagerly.
///
/// Closures of the right shape are factories too.
pub trait ProcessorFactory: Send + Sync {
  fn create(&self, config: &Config) -> anyhow::Result<Box<dyn Processor>>;
}

impl<F> ProcessorFactory for F
where
  F: Fn(&Config) -> anyhow::Result<Box<dyn Processor>> + Send + Sync,
{
  fn create(&self, config: &Config) -> anyhow::Result<Box<dyn Processor>> {
    self(config)
  }
}
