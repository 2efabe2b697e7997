// logmill/src/conditions/compound.rs

use crate::core::condition::{Condition, ConditionFactory};
use crate::core::config::{self, Config};
use crate::core::document::Document;
use crate::parser::definition::ConditionDefinition;
use crate::registry::ConditionFactoryRegistry;
use anyhow::{ensure, Context};
use serde::Deserialize;

pub const AND_TYPE_NAME: &str = "and";
pub const OR_TYPE_NAME: &str = "or";
pub const NOT_TYPE_NAME: &str = "not";

#[derive(Debug)]
pub struct AndCondition {
  conditions: Vec<Box<dyn Condition>>,
}

impl AndCondition {
  pub fn new(conditions: Vec<Box<dyn Condition>>) -> Self {
    Self { conditions }
  }

  pub fn conditions(&self) -> &[Box<dyn Condition>] {
    &self.conditions
  }
}

impl Condition for AndCondition {
  fn name(&self) -> &'static str {
    AND_TYPE_NAME
  }

  fn evaluate(&self, doc: &Document) -> bool {
    self.conditions.iter().all(|condition| condition.evaluate(doc))
  }
}

#[derive(Debug)]
pub struct OrCondition {
  conditions: Vec<Box<dyn Condition>>,
}

impl OrCondition {
  pub fn new(conditions: Vec<Box<dyn Condition>>) -> Self {
    Self { conditions }
  }

  pub fn conditions(&self) -> &[Box<dyn Condition>] {
    &self.conditions
  }
}

impl Condition for OrCondition {
  fn name(&self) -> &'static str {
    OR_TYPE_NAME
  }

  fn evaluate(&self, doc: &Document) -> bool {
    self.conditions.iter().any(|condition| condition.evaluate(doc))
  }
}

#[derive(Debug)]
pub struct NotCondition {
  condition: Box<dyn Condition>,
}

impl NotCondition {
  pub fn new(condition: Box<dyn Condition>) -> Self {
    Self { condition }
  }
}

impl Condition for NotCondition {
  fn name(&self) -> &'static str {
    NOT_TYPE_NAME
  }

  fn evaluate(&self, doc: &Document) -> bool {
    !self.condition.evaluate(doc)
  }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConnectiveConfig {
  conditions: Vec<ConditionDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NotConfig {
  condition: ConditionDefinition,
}

/// Builds each child through `registry`, naming the failing child by position.
fn create_children(
  type_name: &str,
  config: &Config,
  registry: &ConditionFactoryRegistry,
) -> anyhow::Result<Vec<Box<dyn Condition>>> {
  let ConnectiveConfig { conditions } = config::parse(config)?;
  ensure!(!conditions.is_empty(), "'{type_name}' needs at least one condition");
  conditions
    .iter()
    .enumerate()
    .map(|(index, definition)| {
      registry
        .create_from(definition)
        .with_context(|| format!("'{type_name}' condition #{index} ('{}')", definition.type_name))
    })
    .collect()
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AndFactory;

impl ConditionFactory for AndFactory {
  fn create(&self, config: &Config, conditions: &ConditionFactoryRegistry) -> anyhow::Result<Box<dyn Condition>> {
    Ok(Box::new(AndCondition::new(create_children(AND_TYPE_NAME, config, conditions)?)))
  }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct OrFactory;

impl ConditionFactory for OrFactory {
  fn create(&self, config: &Config, conditions: &ConditionFactoryRegistry) -> anyhow::Result<Box<dyn Condition>> {
    Ok(Box::new(OrCondition::new(create_children(OR_TYPE_NAME, config, conditions)?)))
  }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NotFactory;

impl ConditionFactory for NotFactory {
  fn create(&self, config: &Config, conditions: &ConditionFactoryRegistry) -> anyhow::Result<Box<dyn Condition>> {
    let NotConfig { condition } = config::parse(config)?;
    let inner = conditions
      .create_from(&condition)
      .with_context(|| format!("'{NOT_TYPE_NAME}' condition ('{}')", condition.type_name))?;
    Ok(Box::new(NotCondition::new(inner)))
  }
}
