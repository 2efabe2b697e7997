// logmill/src/core/document.rs

//! The mutable log record every processor and condition operates on.
//!
//! Fields are addressed by dotted paths (`"user.agent.name"`). Reads walk
//! through maps by key and through lists by numeric segment; a missing path is
//! `None`, never an error. Writes create intermediate maps as needed and
//! replace whatever value was at the target path.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

const PATH_SEPARATOR: char = '.';

/// One log record: a JSON object tree mutated in place by a pipeline run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
  source: Map<String, Value>,
}

impl Document {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_map(source: Map<String, Value>) -> Self {
    Self { source }
  }

  /// Builds a document from a JSON value. Only objects are accepted.
  pub fn from_value(value: Value) -> Option<Self> {
    match value {
      Value::Object(source) => Some(Self { source }),
      _ => None,
    }
  }

  pub fn source(&self) -> &Map<String, Value> {
    &self.source
  }

  pub fn into_source(self) -> Map<String, Value> {
    self.source
  }

  pub fn get(&self, path: &str) -> Option<&Value> {
    let mut segments = path.split(PATH_SEPARATOR);
    let mut current = self.source.get(segments.next()?)?;
    for segment in segments {
      current = match current {
        Value::Object(map) => map.get(segment)?,
        Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
        _ => return None,
      };
    }
    Some(current)
  }

  /// Typed read. `None` when the field is absent or does not deserialize as `T`.
  pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
    self.get(path).and_then(|value| T::deserialize(value).ok())
  }

  pub fn has_field(&self, path: &str) -> bool {
    self.get(path).is_some()
  }

  /// Writes `value` at `path`, creating intermediate maps. A non-container
  /// value sitting on an intermediate segment is replaced by a map.
  pub fn set(&mut self, path: &str, value: impl Into<Value>) {
    let value = value.into();
    match path.rsplit_once(PATH_SEPARATOR) {
      None => {
        self.source.insert(path.to_string(), value);
      }
      Some((parent, leaf)) => {
        let slot = container_for_write(&mut self.source, parent);
        if let Value::Array(items) = &mut *slot {
          if let Some(idx) = leaf.parse::<usize>().ok().filter(|idx| *idx < items.len()) {
            items[idx] = value;
            return;
          }
        }
        ensure_object(slot).insert(leaf.to_string(), value);
      }
    }
  }

  /// Removes the field at `path`. Returns whether something was removed.
  pub fn remove(&mut self, path: &str) -> bool {
    let Some((parent, leaf)) = path.rsplit_once(PATH_SEPARATOR) else {
      return self.source.remove(path).is_some();
    };
    match self.get_mut(parent) {
      Some(Value::Object(map)) => map.remove(leaf).is_some(),
      Some(Value::Array(items)) => match leaf.parse::<usize>() {
        Ok(idx) if idx < items.len() => {
          items.remove(idx);
          true
        }
        _ => false,
      },
      _ => false,
    }
  }

  /// Appends `values` to the list at `path`. A missing field becomes a new
  /// list; an existing scalar or map becomes the first element of one.
  pub fn append_list<I, V>(&mut self, path: &str, values: I)
  where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
  {
    let mut list = match self.get(path) {
      None => Vec::new(),
      Some(Value::Array(items)) => items.clone(),
      Some(other) => vec![other.clone()],
    };
    list.extend(values.into_iter().map(Into::into));
    self.set(path, Value::Array(list));
  }

  fn get_mut(&mut self, path: &str) -> Option<&mut Value> {
    let mut segments = path.split(PATH_SEPARATOR);
    let mut current = self.source.get_mut(segments.next()?)?;
    for segment in segments {
      current = match current {
        Value::Object(map) => map.get_mut(segment)?,
        Value::Array(items) => items.get_mut(segment.parse::<usize>().ok()?)?,
        _ => return None,
      };
    }
    Some(current)
  }
}

impl From<Map<String, Value>> for Document {
  fn from(source: Map<String, Value>) -> Self {
    Self::from_map(source)
  }
}

/// Walks `path` for writing and returns the value slot at its end, creating
/// maps for missing segments and for segments holding scalars. Lists are
/// descended only through an existing index.
fn container_for_write<'a>(root: &'a mut Map<String, Value>, path: &str) -> &'a mut Value {
  let mut segments = path.split(PATH_SEPARATOR);
  let first = segments.next().unwrap_or_default();
  let mut current = root
    .entry(first.to_string())
    .or_insert_with(|| Value::Object(Map::new()));

  for segment in segments {
    let index = match &*current {
      Value::Array(items) => segment.parse::<usize>().ok().filter(|idx| *idx < items.len()),
      _ => None,
    };
    current = match (current, index) {
      (Value::Array(items), Some(idx)) => &mut items[idx],
      (slot, _) => ensure_object(slot)
        .entry(segment.to_string())
        .or_insert_with(|| Value::Object(Map::new())),
    };
  }
  current
}

/// Returns the map at `slot`, replacing any other value with an empty map.
fn ensure_object(slot: &mut Value) -> &mut Map<String, Value> {
  match slot {
    Value::Object(map) => map,
    other => {
      *other = Value::Object(Map::new());
      ensure_object(other)
    }
  }
}
