//! Integration tests for shopdx-out with the built-in templates.
//!
//! Reports come from the real engine run over the JSON fixtures in
//! `testing/fixtures/shops`.

use shopdx_core::{DiagnosisReport, GradePolicy};
use shopdx_engine::{DiagnosisEngine, EngineConfig};
use shopdx_out::{render, ReportFormat, ReportRenderer};

/// Fixture directory relative to the workspace root
const FIXTURES_PATH: &str = "testing/fixtures/shops";

fn fixture_path(name: &str) -> std::path::PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = std::path::Path::new(&manifest_dir).parent().unwrap().parent().unwrap();
    workspace_root.join(FIXTURES_PATH).join(name)
}

fn reports(name: &str, engine: &DiagnosisEngine) -> Vec<DiagnosisReport> {
    let json = std::fs::read_to_string(fixture_path(name)).unwrap();
    engine.diagnose_json(&json).unwrap()
}

fn report(name: &str) -> DiagnosisReport {
    reports(name, &DiagnosisEngine::builtin()).remove(0)
}

// =============================================================================
// Text
// =============================================================================

#[test]
fn test_demo_text_report() {
    let out = render(&report("demo.json"), ReportFormat::Text).unwrap();

    assert!(out.starts_with("SHOP DIAGNOSIS: Demo Braised Chicken Rice"));
    assert!(out.contains("meituan / fast_food / growth / University district"));
    assert!(out.contains("Overall score 46.2"));
    assert!(out.contains("Grade D (Critical)"));
    assert!(out.contains("TOP ISSUES (15 found)"));
    assert!(out.contains("[CRITICAL]"));
    assert!(out.contains("P0 Fix immediately"));
    assert!(out.contains("P1 Fix within two weeks"));
    assert!(out.contains("Fix: Prep time too long (1-2 weeks)"));
    assert!(!out.contains("Downgraded"));
    assert!(!out.contains("No issues found."));
}

#[test]
fn test_healthy_text_report() {
    let out = render(&report("healthy.json"), ReportFormat::Text).unwrap();

    assert!(out.contains("Grade S (Excellent)"));
    assert!(out.contains("No issues found."));
    assert!(out.contains("Review operating data regularly"));
    assert!(out.contains("STRENGTHS"));
    assert!(!out.contains("FOCUS AREAS"));
    assert!(!out.contains("P0 Fix immediately"));
}

#[test]
fn test_downgrade_is_explained() {
    let mut raw = report("healthy.json").raw;
    raw.prep_time_minutes = 40.0;
    raw.on_time_rate = 80.0;
    raw.refund_rate = 8.0;
    let strict = DiagnosisEngine::builtin()
        .with_config(EngineConfig::default().with_policy(GradePolicy::Strict))
        .diagnose(&raw);

    let out = render(&strict, ReportFormat::Text).unwrap();
    assert!(out.contains("Grade D (Critical)"));
    assert!(out.contains("policy strict"));
    assert!(out.contains("Downgraded from A: Operational efficiency scored 0.0"));
}

#[test]
fn test_issues_outside_the_top_five_are_listed() {
    let zero = report("zero_orders.json");
    assert!(zero.top_issues.iter().all(|i| i.title != "Order volume too low"));

    let text = render(&zero, ReportFormat::Text).unwrap();
    assert!(text.contains("ALL ISSUES"));
    assert!(text.contains("CRITICAL  Order volume too low"));

    let markdown = render(&zero, ReportFormat::Markdown).unwrap();
    assert!(markdown.contains("| critical | Order volume too low | Traffic health | 0.0 |"));

    let json = render(&zero, ReportFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["issues"].as_array().unwrap().len(), 14);
}

// =============================================================================
// Markdown
// =============================================================================

#[test]
fn test_demo_markdown_report() {
    let out = render(&report("demo.json"), ReportFormat::Markdown).unwrap();

    assert!(out.starts_with("# Shop diagnosis: Demo Braised Chicken Rice"));
    assert!(out.contains("| Dimension | Score | Weight | Tier |"));
    assert!(out.contains("| Conversion | 20.0 | 25% |"));
    assert!(out.contains("### Operational efficiency"));
    assert!(out.contains("24.0 min"));
    assert!(out.contains("¥32.00"));
    assert!(out.contains("## Focus areas"));
}

#[test]
fn test_markdown_omits_inactive_dimension() {
    let mut raw = report("demo.json").raw;
    raw.profile.stage = shopdx_core::Stage::New;
    let out = render(&DiagnosisEngine::builtin().diagnose(&raw), ReportFormat::Markdown).unwrap();

    assert!(!out.contains("### Price point"));
    assert!(!out.contains("Average order value"));
    assert!(out.contains("### Traffic health"));
}

// =============================================================================
// JSON and batches
// =============================================================================

#[test]
fn test_json_report_is_the_full_contract() {
    let demo = report("demo.json");
    let out = render(&demo, ReportFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(value["shop"]["name"], "Demo Braised Chicken Rice");
    assert_eq!(value["grade"]["code"], "D");
    assert_eq!(value["policy"], "averaged");
    assert_eq!(value["dimensions"].as_array().unwrap().len(), 5);
    assert_eq!(value["top_issues"].as_array().unwrap().len(), 5);
    assert_eq!(value["meta"]["input_hash"], demo.meta.input_hash);
    assert!(value["action_plan"]["P0"].is_array());
}

#[test]
fn test_render_all_batch() {
    let batch = reports("batch.json", &DiagnosisEngine::builtin());
    let renderer = ReportRenderer::builtin().unwrap();

    let json = renderer.render_all(&batch, ReportFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 3);

    let markdown = renderer.render_all(&batch, ReportFormat::Markdown).unwrap();
    assert_eq!(markdown.matches("# Shop diagnosis: ").count(), 3);
    assert!(markdown.contains("\n\n---\n\n# Shop diagnosis: Harbour Tea House"));
}
