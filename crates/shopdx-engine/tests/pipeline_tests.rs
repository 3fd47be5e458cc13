//! End-to-end diagnosis over the JSON fixtures in `testing/fixtures/shops`

use std::path::PathBuf;

use shopdx_core::{Grade, GradePolicy, InputError, MetricId, Priority, Severity, ValidationError};
use shopdx_engine::{DiagnosisEngine, EngineConfig, EngineError};

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../testing/fixtures/shops")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read fixture {}: {}", path.display(), e))
}

fn diagnose_one(name: &str) -> shopdx_core::DiagnosisReport {
    let mut reports = DiagnosisEngine::builtin().diagnose_json(&fixture(name)).unwrap();
    assert_eq!(reports.len(), 1);
    reports.remove(0)
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_demo_shop_needs_work() {
    let report = diagnose_one("demo.json");

    assert!(report.grade.code.rank() <= Grade::B.rank());
    assert_eq!(report.grade.code, Grade::D);
    assert!((report.overall_score - 46.24).abs() < 0.01);

    let prep = report
        .action_plan
        .items(Priority::P1)
        .iter()
        .find(|a| a.metric == Some(MetricId::PrepTime))
        .expect("prep time action");
    assert!(prep.title.contains("Prep time"));
    assert_eq!(prep.time_estimate, "1-2 weeks");

    let critical = report
        .top_issues
        .iter()
        .filter(|i| i.severity == Severity::Critical)
        .count();
    assert_eq!(critical, 3);
}

#[test]
fn test_healthy_shop_gets_generic_plan() {
    let report = diagnose_one("healthy.json");

    assert_eq!(report.grade.code, Grade::S);
    assert!((report.overall_score - 95.75).abs() < 0.01);
    assert_eq!(report.issue_count, 0);
    assert!(report.top_issues.is_empty());
    assert!(report.action_plan.items(Priority::P0).is_empty());
    assert!(report.action_plan.items(Priority::P1).is_empty());

    let generic = report.action_plan.items(Priority::P2);
    assert_eq!(generic.len(), 2);
    assert!(generic.iter().all(|a| a.metric.is_none()));
    assert!(report.focus_areas.is_empty());
}

#[test]
fn test_zero_orders_is_total() {
    let report = diagnose_one("zero_orders.json");

    assert_eq!(report.grade.code, Grade::D);
    assert!((report.overall_score - 36.25).abs() < 0.01);
    assert_eq!(report.derived.average_order_value, 0.0);

    let orders = report
        .dimensions
        .iter()
        .flat_map(|d| d.metrics.iter())
        .find(|m| m.metric == MetricId::OrderVolume)
        .unwrap();
    assert_eq!(orders.score, 0.0);
    assert!(report
        .dimensions
        .iter()
        .all(|d| d.score.is_finite() && (0.0..=100.0).contains(&d.score)));
    assert!(!report.action_plan.is_empty());
}

#[test]
fn test_zero_orders_flags_order_volume() {
    let report = diagnose_one("zero_orders.json");

    assert_eq!(report.derived.cancellation_rate, 0.0);
    assert_eq!(report.issue_count, 14);
    assert_eq!(report.issues.len(), 14);

    let volume = report
        .issues
        .iter()
        .find(|i| i.metric == MetricId::OrderVolume)
        .expect("order volume issue");
    assert_eq!(volume.severity, Severity::Critical);
    assert_eq!(volume.score, 0.0);

    assert!(report
        .action_plan
        .items(Priority::P0)
        .iter()
        .any(|a| a.metric == Some(MetricId::OrderVolume)));

    let criticals = report
        .issues
        .iter()
        .filter(|i| i.severity == Severity::Critical)
        .count();
    assert_eq!(criticals, 6);
}

#[test]
fn test_legacy_field_names_are_accepted() {
    let aliased = diagnose_one("aliases.json");
    let plain = diagnose_one("demo.json");

    assert_eq!(aliased.raw, plain.raw);
    assert_eq!(aliased.without_run_identity(), plain.without_run_identity());
}

// ============================================================================
// INPUT ERRORS
// ============================================================================

#[test]
fn test_malformed_record_is_rejected_with_index() {
    let err = DiagnosisEngine::builtin()
        .diagnose_json(&fixture("malformed.json"))
        .unwrap_err();

    match err {
        EngineError::Input(InputError::Record { index, source }) => {
            assert_eq!(index, 1);
            assert!(matches!(
                source,
                ValidationError::OutOfRange { field: "rating", .. }
            ));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_invalid_json_is_a_parse_error() {
    let err = DiagnosisEngine::builtin().diagnose_json("{ not json").unwrap_err();
    assert!(matches!(err, EngineError::Input(InputError::Parse(_))));
}

// ============================================================================
// PROPERTIES
// ============================================================================

#[test]
fn test_diagnosis_is_idempotent() {
    let engine = DiagnosisEngine::builtin();
    let json = fixture("demo.json");
    let first = engine.diagnose_json(&json).unwrap();
    let second = engine.diagnose_json(&json).unwrap();

    assert_ne!(first[0].meta.run_id, second[0].meta.run_id);
    assert_eq!(first[0].meta.input_hash, second[0].meta.input_hash);
    assert_eq!(first[0].without_run_identity(), second[0].without_run_identity());
}

#[test]
fn test_overall_is_weighted_sum_of_dimensions() {
    for name in ["demo.json", "healthy.json", "zero_orders.json"] {
        let report = diagnose_one(name);
        let weighted: f64 = report.dimensions.iter().map(|d| d.score * d.weight).sum();
        let weights: f64 = report.dimensions.iter().map(|d| d.weight).sum();
        assert!((weighted - report.overall_score).abs() < 1e-9, "{name}");
        assert!((weights - 1.0).abs() < 1e-9, "{name}");
    }
}

#[test]
fn test_policies_differ_only_in_grade() {
    let json = fixture("demo.json");
    let averaged = DiagnosisEngine::builtin().diagnose_json(&json).unwrap().remove(0);
    let strict = DiagnosisEngine::builtin()
        .with_config(EngineConfig::default().with_policy(GradePolicy::Strict))
        .diagnose_json(&json)
        .unwrap()
        .remove(0);

    assert_eq!(averaged.overall_score, strict.overall_score);
    assert_eq!(averaged.policy, GradePolicy::Averaged);
    assert_eq!(strict.policy, GradePolicy::Strict);
    assert!(averaged.downgrade.is_none());
    // already a D, so there is nothing left to downgrade
    assert_eq!(strict.grade.code, Grade::D);
    assert!(strict.downgrade.is_none());
}

#[test]
fn test_strict_policy_downgrades_collapsed_dimension() {
    let mut raw = DiagnosisEngine::builtin()
        .diagnose_json(&fixture("healthy.json"))
        .unwrap()
        .remove(0)
        .raw;
    raw.prep_time_minutes = 40.0;
    raw.on_time_rate = 80.0;
    raw.refund_rate = 8.0;

    let averaged = DiagnosisEngine::builtin().diagnose(&raw);
    let strict = DiagnosisEngine::builtin()
        .with_config(EngineConfig::default().with_policy(GradePolicy::Strict))
        .diagnose(&raw);

    assert_eq!(averaged.grade.code, Grade::A);
    assert_eq!(strict.grade.code, Grade::D);
    assert_eq!(strict.base_grade, Grade::A);
    let downgrade = strict.downgrade.expect("downgrade recorded");
    assert_eq!(downgrade.dimension, shopdx_core::Dimension::Efficiency);
}

// ============================================================================
// BATCH
// ============================================================================

#[tokio::test]
async fn test_batch_matches_sequential() {
    let records = shopdx_core::parse_records(&fixture("batch.json")).unwrap();
    let engine = DiagnosisEngine::builtin();

    let batch = engine.diagnose_batch(records.clone()).await.unwrap();
    let names: Vec<&str> = batch.iter().map(|r| r.shop.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Demo Braised Chicken Rice", "Harbour Tea House", "Quiet Noodle Bar"]
    );

    for (raw, report) in records.iter().zip(&batch) {
        assert_eq!(
            report.without_run_identity(),
            engine.diagnose(raw).without_run_identity()
        );
    }
}
