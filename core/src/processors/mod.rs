// logmill/src/processors/mod.rs

//! Bundled processors.
//!
//! | type name     | config                         |
//! |---------------|--------------------------------|
//! | `addTag`      | `tags: [string]`               |
//! | `addField`    | `path: string, value: any`     |
//! | `removeField` | `fields: [string]`             |
//! | `rename`      | `from: string, to: string`     |

pub mod add_field;
pub mod add_tag;
pub mod remove_field;
pub mod rename;

pub use add_field::{AddFieldFactory, AddFieldProcessor};
pub use add_tag::{AddTagFactory, AddTagProcessor};
pub use remove_field::{RemoveFieldFactory, RemoveFieldProcessor};
pub use rename::{RenameFactory, RenameProcessor};

use crate::registry::ProcessorFactoryRegistry;
use std::sync::Arc;

pub(crate) fn register_defaults(registry: &ProcessorFactoryRegistry) {
  registry.insert(add_tag::TYPE_NAME, Arc::new(AddTagFactory));
  registry.insert(add_field::TYPE_NAME, Arc::new(AddFieldFactory));
  registry.insert(remove_field::TYPE_NAME, Arc::new(RemoveFieldFactory));
  registry.insert(rename::TYPE_NAME, Arc::new(RenameFactory));
}
