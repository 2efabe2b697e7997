// logmill/src/core/config.rs

//! Capability configuration: an opaque JSON object handed to a factory.

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub type Config = Map<String, Value>;

/// Deserializes a factory's typed configuration struct.
///
/// Missing keys and wrongly shaped values surface here, at construction,
/// instead of on the first document.
pub fn parse<T: DeserializeOwned>(config: &Config) -> anyhow::Result<T> {
  serde_json::from_value::<T>(Value::Object(config.clone())).with_context(|| {
    format!(
      "expected configuration shaped as {}",
      std::any::type_name::<T>().rsplit("::").next().unwrap_or("config")
    )
  })
}
