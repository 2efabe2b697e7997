// logmill/src/conditions/exists.rs

use crate::core::condition::{Condition, ConditionFactory};
use crate::core::config::{self, Config};
use crate::core::document::Document;
use crate::registry::ConditionFactoryRegistry;
use anyhow::ensure;
use serde::Deserialize;

pub const TYPE_NAME: &str = "exists";

/// True when the document has a value at `field`.
#[derive(Debug, Clone)]
pub struct ExistsCondition {
  field: String,
}

impl ExistsCondition {
  pub fn new(field: impl Into<String>) -> Self {
    Self { field: field.into() }
  }
}

impl Condition for ExistsCondition {
  fn name(&self) -> &'static str {
    TYPE_NAME
  }

  fn evaluate(&self, doc: &Document) -> bool {
    doc.has_field(&self.field)
  }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExistsConfig {
  field: String,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ExistsFactory;

impl ConditionFactory for ExistsFactory {
  fn create(&self, config: &Config, _conditions: &ConditionFactoryRegistry) -> anyhow::Result<Box<dyn Condition>> {
    let ExistsConfig { field } = config::parse(config)?;
    ensure!(!field.is_empty(), "'field' must not be empty");
    Ok(Box::new(ExistsCondition::new(field)))
  }
}
