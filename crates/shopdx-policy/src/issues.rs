//! Issue detection and ranking

use shopdx_core::{Evaluation, Issue, MetricScore};

use crate::playbook::Playbook;
use crate::severity::SeverityCutoffs;

/// Distance from `observed` to `target` as a percentage of the target
pub fn gap_pct(observed: f64, target: f64) -> f64 {
    if target == 0.0 || !target.is_finite() || !observed.is_finite() {
        return 0.0;
    }
    (target - observed).abs() / target.abs() * 100.0
}

fn to_issue(m: &MetricScore, playbook: &Playbook, cutoffs: &SeverityCutoffs) -> Option<Issue> {
    let severity = cutoffs.classify(m.score)?;
    let entry = playbook.entry(m.metric);
    let unit = m.metric.unit();
    Some(Issue {
        severity,
        dimension: m.dimension,
        metric: m.metric,
        title: entry.title.clone(),
        description: entry.describe(&unit.format(m.value), &unit.format(m.target)),
        impact: entry.impact.clone(),
        score: m.score,
        observed: m.value,
        target: m.target,
        gap_pct: gap_pct(m.value, m.target),
    })
}

/// Every issue, in dimension then catalog order
pub fn detect_issues(
    evaluation: &Evaluation,
    playbook: &Playbook,
    cutoffs: &SeverityCutoffs,
) -> Vec<Issue> {
    evaluation
        .metric_scores()
        .filter_map(|m| to_issue(m, playbook, cutoffs))
        .collect()
}

/// Most severe first, then by dimension name; stable within ties
pub fn top_issues(issues: &[Issue], n: usize) -> Vec<Issue> {
    let mut sorted = issues.to_vec();
    sorted.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.dimension.as_str().cmp(b.dimension.as_str()))
    });
    sorted.truncate(n);
    sorted
}
