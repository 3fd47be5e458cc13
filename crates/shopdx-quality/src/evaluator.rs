//! Score Evaluator
//!
//! Scores every metric against the catalog, rolls metric scores into
//! dimension scores, dimension scores into the overall score, and grades it.

use shopdx_catalog::{Catalog, MetricRule, Percentile};
use shopdx_core::{
    Category, DerivedMetrics, Dimension, DimensionScore, Evaluation, Grade, GradePolicy,
    MetricScore, RawMetrics, Tier,
};
use tracing::debug;

use crate::grading::apply_policy;
use crate::scoring::score;

/// Evaluates derived metrics against one catalog
pub struct ScoreEvaluator<'a> {
    catalog: &'a Catalog,
    policy: GradePolicy,
}

impl<'a> ScoreEvaluator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            policy: GradePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: GradePolicy) -> Self {
        self.policy = policy;
        self
    }

    fn score_metric(&self, rule: &MetricRule, value: f64, category: Category) -> MetricScore {
        let thresholds = self.catalog.resolve(rule, category);
        let s = score(value, &thresholds);
        MetricScore {
            metric: rule.metric,
            dimension: rule.dimension(),
            value,
            score: s,
            weight: rule.weight,
            tier: Tier::from_score(s),
            target: thresholds.target(),
            direction: thresholds.direction,
            benchmark: rule
                .uses_benchmark()
                .then(|| self.catalog.benchmark(category, Percentile::P50)),
        }
    }

    /// Weighted score of one dimension over the metrics present
    ///
    /// Absent optional metrics are left out and the remaining weights are
    /// renormalized, so the stored weights always sum to 1.
    pub fn score_dimension(
        &self,
        dimension: Dimension,
        derived: &DerivedMetrics,
        category: Category,
        stage_weight: f64,
    ) -> DimensionScore {
        let mut metrics: Vec<MetricScore> = self
            .catalog
            .rules(dimension)
            .filter_map(|rule| {
                derived
                    .value(rule.metric)
                    .map(|value| self.score_metric(rule, value, category))
            })
            .collect();

        let total_weight: f64 = metrics.iter().map(|m| m.weight).sum();
        if total_weight > 0.0 {
            for m in &mut metrics {
                m.weight /= total_weight;
            }
        }

        let dimension_score = metrics
            .iter()
            .map(|m| m.score * m.weight)
            .sum::<f64>()
            .clamp(0.0, 100.0);

        DimensionScore {
            dimension,
            score: dimension_score,
            weight: stage_weight,
            tier: Tier::from_score(dimension_score),
            metrics,
        }
    }

    pub fn evaluate(&self, raw: &RawMetrics, derived: &DerivedMetrics) -> Evaluation {
        let stage = raw.profile.stage;
        let category = raw.profile.category;

        let dimensions: Vec<DimensionScore> = self
            .catalog
            .weights(stage)
            .into_iter()
            .filter(|(_, weight)| *weight > 0.0)
            .map(|(dimension, weight)| self.score_dimension(dimension, derived, category, weight))
            .collect();

        for d in &dimensions {
            debug!(
                dimension = %d.dimension,
                score = d.score,
                weight = d.weight,
                "dimension scored"
            );
        }

        let overall_score = dimensions
            .iter()
            .map(|d| d.score * d.weight)
            .sum::<f64>()
            .clamp(0.0, 100.0);

        let base_grade = Grade::from_score(overall_score);
        let (grade, downgrade) = apply_policy(self.policy, base_grade, &dimensions);

        if let Some(dg) = &downgrade {
            debug!(from = %base_grade, to = %grade, dimension = %dg.dimension, "grade downgraded");
        }

        Evaluation {
            stage,
            category,
            policy: self.policy,
            overall_score,
            base_grade,
            grade,
            downgrade,
            dimensions,
        }
    }
}
