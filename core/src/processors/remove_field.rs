// logmill/src/processors/remove_field.rs

use crate::core::config::{self, Config};
use crate::core::document::Document;
use crate::core::processor::{Processor, ProcessorFactory};
use crate::error::ProcessorExecutionError;
use anyhow::ensure;
use serde::Deserialize;

pub const TYPE_NAME: &str = "removeField";

/// Removes the configured fields. Fields already absent are skipped.
#[derive(Debug, Clone)]
pub struct RemoveFieldProcessor {
  fields: Vec<String>,
}

impl RemoveFieldProcessor {
  pub fn new(fields: Vec<String>) -> Self {
    Self { fields }
  }
}

impl Processor for RemoveFieldProcessor {
  fn name(&self) -> &'static str {
    TYPE_NAME
  }

  fn process(&self, doc: &mut Document) -> Result<(), ProcessorExecutionError> {
    for field in &self.fields {
      doc.remove(field);
    }
    Ok(())
  }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RemoveFieldConfig {
  fields: Vec<String>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RemoveFieldFactory;

impl ProcessorFactory for RemoveFieldFactory {
  fn create(&self, config: &Config) -> anyhow::Result<Box<dyn Processor>> {
    let RemoveFieldConfig { fields } = config::parse(config)?;
    ensure!(!fields.is_empty(), "'fields' must list at least one field");
    Ok(Box::new(RemoveFieldProcessor::new(fields)))
  }
}
