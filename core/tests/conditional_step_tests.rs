// tests/conditional_step_tests.rs
mod common;

use common::*;
use logmill::{ConditionDefinition, Document, ExecutionStepDefinition, PipelineDefinition, PipelineFactory};
use serde_json::json;

fn definition(steps: Vec<ExecutionStepDefinition>) -> PipelineDefinition {
  PipelineDefinition {
    id: "conditional-pipeline".to_string(),
    description: None,
    steps,
  }
}

#[test]
fn test_and_condition_takes_else_branch() {
  setup_tracing();
  let pipeline = PipelineFactory::with_defaults()
    .create(&definition(vec![ExecutionStepDefinition::conditional(
      and(vec![exists("field1"), exists("field2")]),
      vec![ExecutionStepDefinition::processor("add-t1", add_tag_definition(&["t1"]))],
      vec![ExecutionStepDefinition::processor("add-t2", add_tag_definition(&["t2"]))],
    )]))
    .unwrap();

  let mut doc = Document::from_value(json!({ "field1": "value1" })).unwrap();
  assert!(pipeline.execute(&mut doc).is_succeeded());
  assert_eq!(doc.get("tags"), Some(&json!(["t2"])));

  let mut both = Document::from_value(json!({ "field1": 1, "field2": 2 })).unwrap();
  assert!(pipeline.execute(&mut both).is_succeeded());
  assert_eq!(both.get("tags"), Some(&json!(["t1"])));
}

#[test]
fn test_branch_runs_then_outer_list_continues() {
  setup_tracing();
  let registries = TestRegistries::new();
  let pipeline = registries
    .factory()
    .create(&definition(vec![
      trail_step("start"),
      ExecutionStepDefinition::conditional(
        probe(true),
        vec![trail_step("then-1"), trail_step("then-2")],
        vec![trail_step("else-1")],
      ),
      trail_step("end"),
    ]))
    .unwrap();

  let mut doc = Document::new();
  assert!(pipeline.execute(&mut doc).is_succeeded());
  assert_eq!(trail(&doc), vec!["start", "then-1", "then-2", "end"]);
  assert_eq!(registries.probe_count(), 1);
}

#[test]
fn test_empty_branch_is_a_no_op() {
  setup_tracing();
  let registries = TestRegistries::new();
  let pipeline = registries
    .factory()
    .create(&definition(vec![
      ExecutionStepDefinition::conditional(probe(false), vec![trail_step("never")], vec![]),
      trail_step("after"),
    ]))
    .unwrap();

  let mut doc = Document::new();
  assert!(pipeline.execute(&mut doc).is_succeeded());
  assert_eq!(trail(&doc), vec!["after"]);
}

#[test]
fn test_branch_failure_halts_whole_run() {
  setup_tracing();
  let registries = TestRegistries::new();
  let pipeline = registries
    .factory()
    .create(&definition(vec![
      trail_step("start"),
      ExecutionStepDefinition::conditional(
        probe(true),
        vec![failing_step("x"), trail_step("after-x")],
        vec![],
      ),
      trail_step("end"),
    ]))
    .unwrap();

  let mut doc = Document::new();
  let result = pipeline.execute(&mut doc);
  assert_eq!(result.failure().map(|failure| failure.step.as_str()), Some("if[1]/then/x"));
  assert_eq!(trail(&doc), vec!["start", "x"]);
}

#[test]
fn test_fallback_inside_branch_recovers() {
  setup_tracing();
  let registries = TestRegistries::new();
  let pipeline = registries
    .factory()
    .create(&definition(vec![
      ExecutionStepDefinition::conditional(
        probe(false),
        vec![],
        vec![failing_step_with_fallback("shaky", vec![trail_step("patched")]), trail_step("else-end")],
      ),
      trail_step("end"),
    ]))
    .unwrap();

  let mut doc = Document::new();
  assert!(pipeline.execute(&mut doc).is_succeeded());
  assert_eq!(trail(&doc), vec!["shaky", "patched", "else-end", "end"]);
}

#[test]
fn test_failure_in_nested_conditional_reports_full_path() {
  setup_tracing();
  let registries = TestRegistries::new();
  let pipeline = registries
    .factory()
    .create(&definition(vec![failing_step_with_fallback(
      "outer",
      vec![ExecutionStepDefinition::conditional(
        probe(true),
        vec![
          trail_step("fine"),
          ExecutionStepDefinition::conditional(probe(false), vec![], vec![failing_step("deep")]),
        ],
        vec![],
      )],
    )]))
    .unwrap();

  let mut doc = Document::new();
  let failure = pipeline.execute(&mut doc).into_result().unwrap_err();
  assert_eq!(failure.step, "outer/onFailure/if[0]/then/if[1]/else/deep");
}

#[test]
fn test_and_short_circuits() {
  setup_tracing();
  let registries = TestRegistries::new();
  let pipeline = registries
    .factory()
    .create(&definition(vec![ExecutionStepDefinition::conditional(
      and(vec![exists("missing"), probe(true)]),
      vec![trail_step("yes")],
      vec![trail_step("no")],
    )]))
    .unwrap();

  let mut doc = Document::new();
  assert!(pipeline.execute(&mut doc).is_succeeded());
  assert_eq!(trail(&doc), vec!["no"]);
  assert_eq!(registries.probe_count(), 0);
}

#[test]
fn test_or_short_circuits() {
  setup_tracing();
  let registries = TestRegistries::new();
  let pipeline = registries
    .factory()
    .create(&definition(vec![ExecutionStepDefinition::conditional(
      or(vec![probe(true), probe(false)]),
      vec![trail_step("yes")],
      vec![trail_step("no")],
    )]))
    .unwrap();

  let mut doc = Document::new();
  assert!(pipeline.execute(&mut doc).is_succeeded());
  assert_eq!(trail(&doc), vec!["yes"]);
  assert_eq!(registries.probe_count(), 1);
}

#[test]
fn test_not_and_equals_conditions() {
  setup_tracing();
  let not_debug = ConditionDefinition::new(
    "not",
    obj(json!({ "condition": { "type": "equals", "config": { "field": "log.level", "value": "debug" } } })),
  );
  let pipeline = PipelineFactory::with_defaults()
    .create(&definition(vec![ExecutionStepDefinition::conditional(
      not_debug,
      vec![ExecutionStepDefinition::processor("keep", add_tag_definition(&["keep"]))],
      vec![ExecutionStepDefinition::processor(
        "drop-message",
        logmill::ProcessorDefinition::new("removeField", obj(json!({ "fields": ["message"] }))),
      )],
    )]))
    .unwrap();

  let mut info = Document::from_value(json!({ "log": { "level": "info" }, "message": "m" })).unwrap();
  assert!(pipeline.execute(&mut info).is_succeeded());
  assert_eq!(info.get("tags"), Some(&json!(["keep"])));
  assert!(info.has_field("message"));

  let mut debug = Document::from_value(json!({ "log": { "level": "debug" }, "message": "m" })).unwrap();
  assert!(pipeline.execute(&mut debug).is_succeeded());
  assert!(!debug.has_field("tags"));
  assert!(!debug.has_field("message"));
}

#[test]
fn test_condition_sees_earlier_mutations() {
  setup_tracing();
  let pipeline = PipelineFactory::with_defaults()
    .create(&definition(vec![
      ExecutionStepDefinition::processor("tag", add_tag_definition(&["seen"])),
      ExecutionStepDefinition::conditional(
        exists("tags"),
        vec![ExecutionStepDefinition::processor("second", add_tag_definition(&["again"]))],
        vec![],
      ),
    ]))
    .unwrap();

  let mut doc = Document::new();
  assert!(pipeline.execute(&mut doc).is_succeeded());
  assert_eq!(doc.get("tags"), Some(&json!(["seen", "again"])));
}

#[test]
fn test_deeply_nested_branches_execute() {
  setup_tracing();
  const DEEP: usize = 10_000;
  let registries = TestRegistries::new();
  let pipeline = registries
    .factory()
    .create(&definition(branch_chain(DEEP, vec![trail_step("leaf"), failing_step("leaf-fails")])))
    .unwrap();

  let mut doc = Document::new();
  let failure = pipeline.execute(&mut doc).into_result().unwrap_err();

  assert_eq!(registries.probe_count(), DEEP);
  assert_eq!(trail(&doc), vec!["leaf", "leaf-fails"]);
  let expected = format!("{}leaf-fails", "if[0]/then/".repeat(DEEP));
  assert!(failure.step == expected, "unexpected step path of length {}", failure.step.len());
}
