//! Threshold Catalog
//!
//! Immutable lookup tables behind every score: tier boundaries per metric,
//! metric weights within a dimension, dimension weights per stage and the
//! average order value benchmarks per category.
//!
//! A catalog read from YAML may leave out whole tables; each missing table is
//! taken from the built-in catalog. Either way the result is validated
//! before it is handed out.

use serde::{Deserialize, Serialize};
use shopdx_core::{Category, Dimension, MetricId, Stage};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::warn;

use crate::builtin::{self, FALLBACK_CATEGORY, FAST_FOOD_BENCHMARK};
use crate::error::CatalogError;
use crate::thresholds::{Benchmark, Percentile, ThresholdSet};

const WEIGHT_EPSILON: f64 = 1e-6;

/// How one metric is scored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRule {
    pub metric: MetricId,
    /// Weight within the metric's dimension
    pub weight: f64,
    /// `None` means the category benchmark ladder is used
    #[serde(default)]
    pub thresholds: Option<ThresholdSet>,
}

impl MetricRule {
    pub fn dimension(&self) -> Dimension {
        self.metric.dimension()
    }

    pub fn is_optional(&self) -> bool {
        self.metric.is_optional()
    }

    pub fn uses_benchmark(&self) -> bool {
        self.thresholds.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default = "custom_version")]
    pub version: String,
    #[serde(default = "builtin::metric_rules")]
    pub metrics: Vec<MetricRule>,
    #[serde(default = "builtin::stage_weights")]
    pub stage_weights: BTreeMap<Stage, BTreeMap<Dimension, f64>>,
    #[serde(default = "builtin::benchmarks")]
    pub benchmarks: BTreeMap<Category, Benchmark>,
}

fn custom_version() -> String {
    "custom".to_string()
}

impl Catalog {
    /// Parse and validate a catalog from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_yaml::from_str(yaml)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    pub fn to_yaml(&self) -> Result<String, CatalogError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check every structural invariant the evaluator relies on
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = BTreeSet::new();
        for rule in &self.metrics {
            if !seen.insert(rule.metric) {
                return Err(CatalogError::DuplicateMetric(rule.metric));
            }
            if !rule.weight.is_finite() || rule.weight <= 0.0 || rule.weight > 1.0 {
                return Err(CatalogError::BadWeight {
                    metric: rule.metric,
                    weight: rule.weight,
                });
            }
            match &rule.thresholds {
                Some(t) if !t.is_ordered() => {
                    return Err(CatalogError::UnorderedThresholds(rule.metric))
                }
                None if rule.metric != MetricId::AverageOrderValue => {
                    return Err(CatalogError::MissingThresholds(rule.metric))
                }
                _ => {}
            }
        }
        if let Some(missing) = MetricId::ALL.iter().find(|m| !seen.contains(m)) {
            return Err(CatalogError::MissingMetric(*missing));
        }

        for dimension in Dimension::ALL {
            let sum: f64 = self
                .rules(dimension)
                .filter(|r| !r.is_optional())
                .map(|r| r.weight)
                .sum();
            if (sum - 1.0).abs() > WEIGHT_EPSILON {
                return Err(CatalogError::MetricWeightSum { dimension, sum });
            }
        }

        for stage in Stage::ALL {
            let table = self
                .stage_weights
                .get(&stage)
                .ok_or(CatalogError::MissingStage(stage))?;
            for dimension in Dimension::ALL {
                match table.get(&dimension) {
                    Some(w) if w.is_finite() && *w >= 0.0 => {}
                    _ => {
                        return Err(CatalogError::BadStageWeight { stage, dimension });
                    }
                }
            }
            let sum: f64 = table.values().sum();
            if (sum - 1.0).abs() > WEIGHT_EPSILON {
                return Err(CatalogError::StageWeightSum { stage, sum });
            }
        }

        if !self.benchmarks.contains_key(&FALLBACK_CATEGORY) {
            return Err(CatalogError::MissingBenchmark(FALLBACK_CATEGORY));
        }
        for (category, benchmark) in &self.benchmarks {
            if !benchmark.is_ordered() {
                return Err(CatalogError::UnorderedBenchmark(*category));
            }
        }

        Ok(())
    }

    /// Rules of one dimension, in catalog order
    pub fn rules(&self, dimension: Dimension) -> impl Iterator<Item = &MetricRule> {
        self.metrics
            .iter()
            .filter(move |r| r.dimension() == dimension)
    }

    pub fn rule(&self, metric: MetricId) -> Option<&MetricRule> {
        self.metrics.iter().find(|r| r.metric == metric)
    }

    /// Fixed-threshold metrics of a dimension
    pub fn thresholds(&self, dimension: Dimension) -> BTreeMap<MetricId, ThresholdSet> {
        self.rules(dimension)
            .filter_map(|r| r.thresholds.map(|t| (r.metric, t)))
            .collect()
    }

    /// Dimension weights of a stage; every dimension is present
    pub fn weights(&self, stage: Stage) -> BTreeMap<Dimension, f64> {
        let table = self.stage_weights.get(&stage);
        Dimension::ALL
            .into_iter()
            .map(|d| (d, table.and_then(|t| t.get(&d)).copied().unwrap_or(0.0)))
            .collect()
    }

    /// Benchmark table of a category, falling back to fast food
    pub fn benchmark_table(&self, category: Category) -> &Benchmark {
        if let Some(b) = self.benchmarks.get(&category) {
            return b;
        }
        if category != Category::Other {
            warn!(category = %category, "no benchmark for category, using fallback");
        }
        self.benchmarks
            .get(&FALLBACK_CATEGORY)
            .unwrap_or(&FAST_FOOD_BENCHMARK)
    }

    pub fn benchmark(&self, category: Category, percentile: Percentile) -> f64 {
        self.benchmark_table(category).get(percentile)
    }

    /// Concrete tier boundaries of a rule for a category
    pub fn resolve(&self, rule: &MetricRule, category: Category) -> ThresholdSet {
        match rule.thresholds {
            Some(t) => t,
            None => self.benchmark_table(category).ladder(),
        }
    }
}
