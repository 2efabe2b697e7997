// logmill/src/conditions/mod.rs

//! Bundled conditions: leaf predicates and the boolean connectives.
//!
//! Connectives hold their children in order and own them. `and` stops at the
//! first `false` child, `or` at the first `true` one.

pub mod compound;
pub mod equals;
pub mod exists;

pub use compound::{AndCondition, AndFactory, NotCondition, NotFactory, OrCondition, OrFactory};
pub use equals::{EqualsCondition, EqualsFactory};
pub use exists::{ExistsCondition, ExistsFactory};

use crate::registry::ConditionFactoryRegistry;
use std::sync::Arc;

pub(crate) fn register_defaults(registry: &ConditionFactoryRegistry) {
  registry.insert(compound::AND_TYPE_NAME, Arc::new(AndFactory));
  registry.insert(compound::OR_TYPE_NAME, Arc::new(OrFactory));
  registry.insert(compound::NOT_TYPE_NAME, Arc::new(NotFactory));
  registry.insert(exists::TYPE_NAME, Arc::new(ExistsFactory));
  registry.insert(equals::TYPE_NAME, Arc::new(EqualsFactory));
}
