// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use logmill::core::config;
use logmill::{
  Condition, ConditionDefinition, ConditionFactoryRegistry, Config, Document, ExecutionStepDefinition,
  PipelineFactory, Processor, ProcessorDefinition, ProcessorExecutionError, ProcessorFactoryRegistry,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

/// Document field the test processors append their labels to.
pub const TRAIL_FIELD: &str = "trail";

// --- Test Processors ---

/// Appends its label to the `trail` list; never fails.
#[derive(Debug)]
pub struct TrailProcessor {
  label: String,
}

impl Processor for TrailProcessor {
  fn name(&self) -> &'static str {
    "trail"
  }

  fn process(&self, doc: &mut Document) -> Result<(), ProcessorExecutionError> {
    tracing::debug!(target: "test_processors", label = %self.label, "trail processor executed");
    doc.append_list(TRAIL_FIELD, [self.label.clone()]);
    Ok(())
  }
}

/// Appends its label to the `trail` list, then fails.
#[derive(Debug)]
pub struct FailingProcessor {
  label: String,
  message: String,
}

impl Processor for FailingProcessor {
  fn name(&self) -> &'static str {
    "fail"
  }

  fn process(&self, doc: &mut Document) -> Result<(), ProcessorExecutionError> {
    doc.append_list(TRAIL_FIELD, [self.label.clone()]);
    tracing::warn!(target: "test_processors", label = %self.label, "failing with: '{}'", self.message);
    Err(ProcessorExecutionError::new(self.message.clone()))
  }
}

/// Fails without touching the document.
#[derive(Debug)]
pub struct RejectProcessor {
  message: String,
}

impl Processor for RejectProcessor {
  fn name(&self) -> &'static str {
    "reject"
  }

  fn process(&self, _doc: &mut Document) -> Result<(), ProcessorExecutionError> {
    Err(ProcessorExecutionError::new(self.message.clone()))
  }
}

#[derive(Debug, Deserialize)]
struct RejectConfig {
  #[serde(default = "default_message")]
  message: String,
}

#[derive(Debug, Deserialize)]
struct LabelConfig {
  label: String,
  #[serde(default = "default_message")]
  message: String,
}

fn default_message() -> String {
  "intentional failure".to_string()
}

// --- Test Conditions ---

/// Returns a fixed answer and counts how often it was asked.
#[derive(Debug)]
pub struct ProbeCondition {
  value: bool,
  evaluations: Arc<AtomicUsize>,
}

impl Condition for ProbeCondition {
  fn name(&self) -> &'static str {
    "probe"
  }

  fn evaluate(&self, _doc: &Document) -> bool {
    self.evaluations.fetch_add(1, Ordering::SeqCst);
    self.value
  }
}

#[derive(Debug, Deserialize)]
struct ProbeConfig {
  value: bool,
}

/// Registries with the bundled types plus `trail`, `fail`, `reject` and `probe`.
pub struct TestRegistries {
  pub processors: Arc<ProcessorFactoryRegistry>,
  pub conditions: Arc<ConditionFactoryRegistry>,
  /// Shared by every `probe` condition built from these registries.
  pub probe_evaluations: Arc<AtomicUsize>,
}

impl TestRegistries {
  pub fn new() -> Self {
    let processors = ProcessorFactoryRegistry::with_defaults();
    processors
      .register(
        "trail",
        Arc::new(|cfg: &Config| -> anyhow::Result<Box<dyn Processor>> {
          let LabelConfig { label, .. } = config::parse(cfg)?;
          Ok(Box::new(TrailProcessor { label }))
        }),
      )
      .unwrap();
    processors
      .register(
        "fail",
        Arc::new(|cfg: &Config| -> anyhow::Result<Box<dyn Processor>> {
          let LabelConfig { label, message } = config::parse(cfg)?;
          Ok(Box::new(FailingProcessor { label, message }))
        }),
      )
      .unwrap();
    processors
      .register(
        "reject",
        Arc::new(|cfg: &Config| -> anyhow::Result<Box<dyn Processor>> {
          let RejectConfig { message } = config::parse(cfg)?;
          Ok(Box::new(RejectProcessor { message }))
        }),
      )
      .unwrap();

    let probe_evaluations = Arc::new(AtomicUsize::new(0));
    let conditions = ConditionFactoryRegistry::with_defaults();
    let counter = probe_evaluations.clone();
    conditions
      .register(
        "probe",
        Arc::new(
          move |cfg: &Config, _registry: &ConditionFactoryRegistry| -> anyhow::Result<Box<dyn Condition>> {
            let ProbeConfig { value } = config::parse(cfg)?;
            Ok(Box::new(ProbeCondition {
              value,
              evaluations: counter.clone(),
            }))
          },
        ),
      )
      .unwrap();

    Self {
      processors: Arc::new(processors),
      conditions: Arc::new(conditions),
      probe_evaluations,
    }
  }

  pub fn factory(&self) -> PipelineFactory {
    PipelineFactory::new(self.processors.clone(), self.conditions.clone())
  }

  pub fn probe_count(&self) -> usize {
    self.probe_evaluations.load(Ordering::SeqCst)
  }
}

// --- Definition Builders ---

pub fn obj(value: Value) -> Config {
  value.as_object().cloned().expect("config must be a JSON object")
}

pub fn trail_step(name: &str) -> ExecutionStepDefinition {
  ExecutionStepDefinition::processor(name, ProcessorDefinition::new("trail", obj(json!({ "label": name }))))
}

pub fn failing_step(name: &str) -> ExecutionStepDefinition {
  ExecutionStepDefinition::processor(name, ProcessorDefinition::new("fail", obj(json!({ "label": name }))))
}

pub fn failing_step_with_fallback(name: &str, on_failure: Vec<ExecutionStepDefinition>) -> ExecutionStepDefinition {
  ExecutionStepDefinition::processor_with_fallback(
    name,
    ProcessorDefinition::new("fail", obj(json!({ "label": name }))),
    on_failure,
  )
}

pub fn reject_step(name: &str) -> ExecutionStepDefinition {
  ExecutionStepDefinition::processor(name, ProcessorDefinition::new("reject", Config::new()))
}

/// `depth` rejecting steps named `name`, each one the sole `onFailure` step of
/// the one before; `innermost` is the fallback of the deepest.
pub fn fallback_chain(name: &str, depth: usize, innermost: Vec<ExecutionStepDefinition>) -> Vec<ExecutionStepDefinition> {
  let mut steps = innermost;
  for _ in 0..depth {
    steps = vec![ExecutionStepDefinition::processor_with_fallback(
      name,
      ProcessorDefinition::new("reject", Config::new()),
      steps,
    )];
  }
  steps
}

/// `depth` conditionals nested in each other's `then` list around `innermost`.
pub fn branch_chain(depth: usize, innermost: Vec<ExecutionStepDefinition>) -> Vec<ExecutionStepDefinition> {
  let mut steps = innermost;
  for _ in 0..depth {
    steps = vec![ExecutionStepDefinition::conditional(probe(true), steps, vec![])];
  }
  steps
}

pub fn add_tag_definition(tags: &[&str]) -> ProcessorDefinition {
  ProcessorDefinition::new("addTag", obj(json!({ "tags": tags })))
}

pub fn probe(value: bool) -> ConditionDefinition {
  ConditionDefinition::new("probe", obj(json!({ "value": value })))
}

pub fn exists(field: &str) -> ConditionDefinition {
  ConditionDefinition::new("exists", obj(json!({ "field": field })))
}

pub fn and(children: Vec<ConditionDefinition>) -> ConditionDefinition {
  ConditionDefinition::new("and", obj(json!({ "conditions": children })))
}

pub fn or(children: Vec<ConditionDefinition>) -> ConditionDefinition {
  ConditionDefinition::new("or", obj(json!({ "conditions": children })))
}

/// Labels appended to `trail`, in execution order.
pub fn trail(doc: &Document) -> Vec<String> {
  doc.get_as(TRAIL_FIELD).unwrap_or_default()
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
