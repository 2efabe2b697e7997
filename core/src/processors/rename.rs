// logmill/src/processors/rename.rs

use crate::core::config::{self, Config};
use crate::core::document::Document;
use crate::core::processor::{Processor, ProcessorFactory};
use crate::error::ProcessorExecutionError;
use anyhow::ensure;
use serde::Deserialize;

pub const TYPE_NAME: &str = "rename";

/// Moves a field to a new path.
///
/// Fails with the source path when the field is missing, so a missing field
/// can be routed to an `onFailure` list.
#[derive(Debug, Clone)]
pub struct RenameProcessor {
  from: String,
  to: String,
}

impl RenameProcessor {
  pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
    Self {
      from: from.into(),
      to: to.into(),
    }
  }
}

impl Processor for RenameProcessor {
  fn name(&self) -> &'static str {
    TYPE_NAME
  }

  fn process(&self, doc: &mut Document) -> Result<(), ProcessorExecutionError> {
    let Some(value) = doc.get(&self.from).cloned() else {
      return Err(ProcessorExecutionError::for_field(
        &self.from,
        format!("cannot rename missing field '{}'", self.from),
      ));
    };
    doc.remove(&self.from);
    doc.set(&self.to, value);
    Ok(())
  }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RenameConfig {
  from: String,
  to: String,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RenameFactory;

impl ProcessorFactory for RenameFactory {
  fn create(&self, config: &Config) -> anyhow::Result<Box<dyn Processor>> {
    let RenameConfig { from, to } = config::parse(config)?;
    ensure!(!from.is_empty() && !to.is_empty(), "'from' and 'to' must not be empty");
    ensure!(from != to, "'from' and 'to' must differ");
    Ok(Box::new(RenameProcessor::new(from, to)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn moves_nested_field() {
    let mut doc = Document::from_value(json!({"src": {"ip": "10.0.0.1"}})).unwrap();
    RenameProcessor::new("src.ip", "client.ip").process(&mut doc).unwrap();
    assert!(!doc.has_field("src.ip"));
    assert_eq!(doc.get("client.ip"), Some(&json!("10.0.0.1")));
  }

  #[test]
  fn missing_field_fails_with_its_path() {
    let mut doc = Document::new();
    let err = RenameProcessor::new("a", "b").process(&mut doc).unwrap_err();
    assert_eq!(err.field(), Some("a"));
    assert!(doc.source().is_empty());
  }
}
