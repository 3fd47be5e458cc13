//! Strengths and focus areas

use shopdx_core::{Evaluation, FocusArea, Strength};

use crate::playbook::Playbook;

/// Metrics at or above this score count as strengths
pub const STRENGTH_MIN_SCORE: f64 = 80.0;
/// Dimensions below this score get focus advice
pub const FOCUS_BELOW: f64 = 70.0;

/// Best metrics first; ties keep catalog order
pub fn strengths(evaluation: &Evaluation, n: usize) -> Vec<Strength> {
    let mut best: Vec<Strength> = evaluation
        .metric_scores()
        .filter(|m| m.score >= STRENGTH_MIN_SCORE)
        .map(|m| Strength {
            metric: m.metric,
            dimension: m.dimension,
            value: m.value,
            score: m.score,
            tier: m.tier,
        })
        .collect();
    best.sort_by(|a, b| b.score.total_cmp(&a.score));
    best.truncate(n);
    best
}

pub fn focus_areas(evaluation: &Evaluation, playbook: &Playbook) -> Vec<FocusArea> {
    evaluation
        .dimensions
        .iter()
        .filter(|d| d.score < FOCUS_BELOW)
        .map(|d| FocusArea {
            dimension: d.dimension,
            score: d.score,
            tier: d.tier,
            advice: playbook.dimension_advice(d.dimension).to_vec(),
        })
        .collect()
}
