// logmill/src/processors/add_field.rs

use crate::core::config::{self, Config};
use crate::core::document::Document;
use crate::core::processor::{Processor, ProcessorFactory};
use crate::error::ProcessorExecutionError;
use anyhow::ensure;
use serde::Deserialize;
use serde_json::Value;

pub const TYPE_NAME: &str = "addField";

/// Sets a field to a constant value, replacing whatever was there.
#[derive(Debug, Clone)]
pub struct AddFieldProcessor {
  path: String,
  value: Value,
}

impl AddFieldProcessor {
  pub fn new(path: impl Into<String>, value: Value) -> Self {
    Self {
      path: path.into(),
      value,
    }
  }
}

impl Processor for AddFieldProcessor {
  fn name(&self) -> &'static str {
    TYPE_NAME
  }

  fn process(&self, doc: &mut Document) -> Result<(), ProcessorExecutionError> {
    doc.set(&self.path, self.value.clone());
    Ok(())
  }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AddFieldConfig {
  path: String,
  value: Value,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AddFieldFactory;

impl ProcessorFactory for AddFieldFactory {
  fn create(&self, config: &Config) -> anyhow::Result<Box<dyn Processor>> {
    let AddFieldConfig { path, value } = config::parse(config)?;
    ensure!(!path.is_empty(), "'path' must not be empty");
    Ok(Box::new(AddFieldProcessor::new(path, value)))
  }
}
