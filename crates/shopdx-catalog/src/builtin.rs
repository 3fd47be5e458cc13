//! Built-in threshold tables
//!
//! Traffic and order metrics are daily averages over the last 7 days;
//! review based metrics cover the last 30 days.

use shopdx_core::{Category, Dimension, MetricId, Stage};
use std::collections::BTreeMap;

use crate::catalog::{Catalog, MetricRule};
use crate::thresholds::{Benchmark, ThresholdSet};

pub const CATALOG_VERSION: &str = "builtin@1.0";

/// Benchmark used for `Other` and any category without its own table
pub const FALLBACK_CATEGORY: Category = Category::FastFood;

pub(crate) const FAST_FOOD_BENCHMARK: Benchmark = Benchmark::new(15.0, 20.0, 28.0, 38.0, 50.0);

fn fixed(metric: MetricId, weight: f64, thresholds: ThresholdSet) -> MetricRule {
    MetricRule {
        metric,
        weight,
        thresholds: Some(thresholds),
    }
}

pub(crate) fn metric_rules() -> Vec<MetricRule> {
    use MetricId::*;
    vec![
        // traffic
        fixed(Impressions, 0.25, ThresholdSet::higher(500.0, 1500.0, 3000.0, 5000.0, 8000.0)),
        fixed(VisitConversionRate, 0.35, ThresholdSet::higher(0.03, 0.05, 0.08, 0.12, 0.15)),
        fixed(ExposureCostPerVisitor, 0.15, ThresholdSet::lower(1.2, 0.8, 0.5, 0.3, 0.15)),
        fixed(OrderVolume, 0.25, ThresholdSet::higher(5.0, 15.0, 30.0, 60.0, 100.0)),
        fixed(NewCustomerRate, 0.10, ThresholdSet::higher(0.05, 0.15, 0.25, 0.35, 0.45)),
        // conversion
        fixed(OrderConversionRate, 0.45, ThresholdSet::higher(0.08, 0.12, 0.18, 0.25, 0.30)),
        fixed(OverallConversionRate, 0.35, ThresholdSet::higher(0.008, 0.015, 0.025, 0.035, 0.05)),
        fixed(CancellationRate, 0.20, ThresholdSet::lower(0.12, 0.07, 0.04, 0.02, 0.01)),
        fixed(RepurchaseRate, 0.15, ThresholdSet::higher(0.08, 0.12, 0.20, 0.30, 0.40)),
        // price point
        MetricRule {
            metric: AverageOrderValue,
            weight: 0.55,
            thresholds: None,
        },
        fixed(EstimatedProfitMargin, 0.45, ThresholdSet::higher(0.08, 0.15, 0.25, 0.35, 0.45)),
        // satisfaction
        fixed(Rating, 0.30, ThresholdSet::higher(4.0, 4.3, 4.6, 4.8, 4.9)),
        fixed(PositiveRate, 0.20, ThresholdSet::higher(0.78, 0.85, 0.90, 0.95, 0.98)),
        fixed(NegativeRate, 0.20, ThresholdSet::lower(0.07, 0.04, 0.02, 0.01, 0.005)),
        fixed(ComplaintRate, 0.15, ThresholdSet::lower(0.01, 0.006, 0.003, 0.001, 0.0005)),
        fixed(NegativeReplyRate, 0.15, ThresholdSet::higher(0.3, 0.5, 0.7, 0.9, 0.98)),
        // efficiency
        fixed(PrepTime, 0.35, ThresholdSet::lower(35.0, 25.0, 20.0, 15.0, 10.0)),
        fixed(OnTimeRate, 0.35, ThresholdSet::higher(0.85, 0.90, 0.95, 0.98, 0.995)),
        fixed(RefundRate, 0.30, ThresholdSet::lower(0.07, 0.04, 0.02, 0.01, 0.005)),
    ]
}

pub(crate) fn stage_weights() -> BTreeMap<Stage, BTreeMap<Dimension, f64>> {
    let table = |w: [f64; 5]| -> BTreeMap<Dimension, f64> {
        Dimension::ALL.into_iter().zip(w).collect()
    };
    BTreeMap::from([
        // price work only starts once a new shop has traffic
        (Stage::New, table([0.40, 0.30, 0.0, 0.20, 0.10])),
        (Stage::Growth, table([0.25, 0.25, 0.15, 0.20, 0.15])),
        (Stage::Mature, table([0.20, 0.20, 0.25, 0.20, 0.15])),
    ])
}

pub(crate) fn benchmarks() -> BTreeMap<Category, Benchmark> {
    BTreeMap::from([
        (Category::FastFood, FAST_FOOD_BENCHMARK),
        (Category::Drink, Benchmark::new(12.0, 15.0, 20.0, 28.0, 38.0)),
        (Category::Bbq, Benchmark::new(35.0, 50.0, 70.0, 95.0, 130.0)),
        (Category::LightFood, Benchmark::new(20.0, 28.0, 38.0, 50.0, 65.0)),
    ])
}

impl Catalog {
    /// The built-in catalog
    pub fn builtin() -> Self {
        Self {
            version: CATALOG_VERSION.to_string(),
            metrics: metric_rules(),
            stage_weights: stage_weights(),
            benchmarks: benchmarks(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
