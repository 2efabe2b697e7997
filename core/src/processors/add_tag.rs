// logmill/src/processors/add_tag.rs

use crate::core::config::{self, Config};
use crate::core::document::Document;
use crate::core::processor::{Processor, ProcessorFactory};
use crate::error::ProcessorExecutionError;
use anyhow::ensure;
use serde::Deserialize;

pub const TYPE_NAME: &str = "addTag";

/// Document field the tags are appended to.
pub const TAGS_FIELD: &str = "tags";

/// Appends the configured tags to the document's `tags` list.
#[derive(Debug, Clone)]
pub struct AddTagProcessor {
  tags: Vec<String>,
}

impl AddTagProcessor {
  pub fn new(tags: Vec<String>) -> Self {
    Self { tags }
  }

  pub fn tags(&self) -> &[String] {
    &self.tags
  }
}

impl Processor for AddTagProcessor {
  fn name(&self) -> &'static str {
    TYPE_NAME
  }

  fn process(&self, doc: &mut Document) -> Result<(), ProcessorExecutionError> {
    doc.append_list(TAGS_FIELD, self.tags.iter().cloned());
    Ok(())
  }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AddTagConfig {
  tags: Vec<String>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AddTagFactory;

impl ProcessorFactory for AddTagFactory {
  fn create(&self, config: &Config) -> anyhow::Result<Box<dyn Processor>> {
    let AddTagConfig { tags } = config::parse(config)?;
    ensure!(!tags.is_empty(), "'tags' must list at least one tag");
    Ok(Box::new(AddTagProcessor::new(tags)))
  }
}
