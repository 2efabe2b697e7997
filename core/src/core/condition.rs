// logmill/src/core/condition.rs

//! The condition capability: a side-effect free predicate over a `Document`.

use crate::core::config::Config;
use crate::core::document::Document;
use crate::registry::ConditionFactoryRegistry;
use std::fmt;

/// A configured predicate. Evaluation never fails and never mutates the
/// document; the same document state always yields the same answer.
pub trait Condition: fmt::Debug + Send + Sync {
  /// The registry type name this condition was built from.
  fn name(&self) -> &'static str;

  fn evaluate(&self, doc: &Document) -> bool;
}

/// Builds a condition from its configuration.
///
/// `conditions` is the registry the condition itself is being resolved from,
/// so composite connectives can build their children by type name.
pub trait ConditionFactory: Send + Sync {
  fn create(&self, config: &Config, conditions: &ConditionFactoryRegistry) -> anyhow::Result<Box<dyn Condition>>;
}

impl<F> ConditionFactory for F
where
  F: Fn(&Config, &ConditionFactoryRegistry) -> anyhow::Result<Box<dyn Condition>> + Send + Sync,
{
  fn create(&self, config: &Config, conditions: &ConditionFactoryRegistry) -> anyhow::Result<Box<dyn Condition>> {
    self(config, conditions)
  }
}
