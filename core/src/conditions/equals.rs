// logmill/src/conditions/equals.rs

use crate::core::condition::{Condition, ConditionFactory};
use crate::core::config::{self, Config};
use crate::core::document::Document;
use crate::registry::ConditionFactoryRegistry;
use anyhow::ensure;
use serde::Deserialize;
use serde_json::Value;

pub const TYPE_NAME: &str = "equals";

/// True when the value at `field` equals the configured value.
/// A missing field never matches, not even `null`.
#[derive(Debug, Clone)]
pub struct EqualsCondition {
  field: String,
  value: Value,
}

impl EqualsCondition {
  pub fn new(field: impl Into<String>, value: Value) -> Self {
    Self {
      field: field.into(),
      value,
    }
  }
}

impl Condition for EqualsCondition {
  fn name(&self) -> &'static str {
    TYPE_NAME
  }

  fn evaluate(&self, doc: &Document) -> bool {
    doc.get(&self.field) == Some(&self.value)
  }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EqualsConfig {
  field: String,
  value: Value,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EqualsFactory;

impl ConditionFactory for EqualsFactory {
  fn create(&self, config: &Config, _conditions: &ConditionFactoryRegistry) -> anyhow::Result<Box<dyn Condition>> {
    let EqualsConfig { field, value } = config::parse(config)?;
    ensure!(!field.is_empty(), "'field' must not be empty");
    Ok(Box::new(EqualsCondition::new(field, value)))
  }
}
