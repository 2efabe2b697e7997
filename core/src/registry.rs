// logmill/src/registry.rs

//! Name-keyed factory registries for processors and conditions.
//!
//! Bootstrap code registers every available type name before compilation;
//! the compiler then resolves definitions through the registries it is given.
//! The two registries are separate namespaces.

use crate::core::condition::{Condition, ConditionFactory};
use crate::core::config::Config;
use crate::core::processor::{Processor, ProcessorFactory};
use crate::error::{MillError, MillResult};
use crate::parser::definition::ConditionDefinition;

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{event, instrument, Level};

/// A mapping from type name to factory.
///
/// Registration goes through `&self`, so one registry can be shared behind an
/// `Arc` while bootstrap code fills it.
pub struct Registry<F: ?Sized> {
  kind: &'static str,
  factories: RwLock<HashMap<String, Arc<F>>>,
}

pub type ProcessorFactoryRegistry = Registry<dyn ProcessorFactory>;
pub type ConditionFactoryRegistry = Registry<dyn ConditionFactory>;

impl<F: ?Sized> Registry<F> {
  fn with_kind(kind: &'static str) -> Self {
    Self {
      kind,
      factories: RwLock::new(HashMap::new()),
    }
  }

  /// `"processor"` or `"condition"`; used in error messages.
  pub fn kind(&self) -> &'static str {
    self.kind
  }

  /// Registers `factory` under `name`. A name can only be registered once.
  pub fn register(&self, name: impl Into<String>, factory: Arc<F>) -> MillResult<()> {
    let name = name.into();
    let mut factories = self.factories.write();
    if factories.contains_key(&name) {
      event!(Level::ERROR, kind = self.kind, type_name = %name, "Duplicate registration.");
      return Err(MillError::DuplicateRegistration {
        kind: self.kind,
        type_name: name,
      });
    }
    event!(Level::DEBUG, kind = self.kind, type_name = %name, "Registering factory.");
    factories.insert(name, factory);
    Ok(())
  }

  /// Bundled factories go straight in; names are known not to collide.
  pub(crate) fn insert(&self, name: &str, factory: Arc<F>) {
    self.factories.write().insert(name.to_string(), factory);
  }

  /// Looks up the factory registered under `name`.
  pub fn get(&self, name: &str) -> MillResult<Arc<F>> {
    self.factories.read().get(name).cloned().ok_or_else(|| {
      event!(Level::DEBUG, kind = self.kind, type_name = %name, "No factory registered.");
      MillError::UnknownType {
        kind: self.kind,
        type_name: name.to_string(),
        step: String::new(),
      }
    })
  }

  pub fn contains(&self, name: &str) -> bool {
    self.factories.read().contains_key(name)
  }

  /// Registered type names, sorted.
  pub fn names(&self) -> Vec<String> {
    let mut names: Vec<String> = self.factories.read().keys().cloned().collect();
    names.sort();
    names
  }

  fn invalid_configuration(&self, name: &str, source: anyhow::Error) -> MillError {
    MillError::InvalidConfiguration {
      kind: self.kind,
      type_name: name.to_string(),
      step: String::new(),
      source,
    }
  }
}

impl Registry<dyn ProcessorFactory> {
  pub fn new() -> Self {
    Self::with_kind("processor")
  }

  /// A registry pre-loaded with the bundled processors.
  pub fn with_defaults() -> Self {
    let registry = Self::new();
    crate::processors::register_defaults(&registry);
    registry
  }

  /// Looks up `name` and builds a processor from `config`.
  ///
  /// Factory failures come back as `InvalidConfiguration` carrying the
  /// factory's own error as the source.
  #[instrument(name = "ProcessorFactoryRegistry::create", skip(self, config), level = "trace", err(Display))]
  pub fn create(&self, name: &str, config: &Config) -> MillResult<Box<dyn Processor>> {
    let factory = self.get(name)?;
    factory
      .create(config)
      .map_err(|source| self.invalid_configuration(name, source))
  }
}

impl Registry<dyn ConditionFactory> {
  pub fn new() -> Self {
    Self::with_kind("condition")
  }

  /// A registry pre-loaded with the bundled conditions.
  pub fn with_defaults() -> Self {
    let registry = Self::new();
    crate::conditions::register_defaults(&registry);
    registry
  }

  /// Looks up `name` and builds a condition from `config`.
  #[instrument(name = "ConditionFactoryRegistry::create", skip(self, config), level = "trace", err(Display))]
  pub fn create(&self, name: &str, config: &Config) -> MillResult<Box<dyn Condition>> {
    let factory = self.get(name)?;
    factory.create(config, self).map_err(|source| {
      // A composite naming an unregistered child is still an unknown type.
      let unknown_child = matches!(source.downcast_ref::<MillError>(), Some(MillError::UnknownType { .. }));
      if unknown_child {
        match source.downcast::<MillError>() {
          Ok(unknown) => unknown,
          Err(source) => self.invalid_configuration(name, source),
        }
      } else {
        self.invalid_configuration(name, source)
      }
    })
  }

  /// Builds a condition straight from its definition.
  pub fn create_from(&self, definition: &ConditionDefinition) -> MillResult<Box<dyn Condition>> {
    self.create(&definition.type_name, &definition.config)
  }
}

impl Default for Registry<dyn ProcessorFactory> {
  fn default() -> Self {
    Self::new()
  }
}

impl Default for Registry<dyn ConditionFactory> {
  fn default() -> Self {
    Self::new()
  }
}
