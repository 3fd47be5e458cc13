//! Catalog load and validation errors
use shopdx_core::{Category, Dimension, MetricId, Stage};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("CATALOG/parse: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("CATALOG/cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CATALOG/metric '{0}' is missing")]
    MissingMetric(MetricId),

    #[error("CATALOG/metric '{0}' is listed twice")]
    DuplicateMetric(MetricId),

    #[error("CATALOG/metric '{0}' has no thresholds")]
    MissingThresholds(MetricId),

    #[error("CATALOG/thresholds of '{0}' are not strictly ordered for their direction")]
    UnorderedThresholds(MetricId),

    #[error("CATALOG/metric '{metric}' has invalid weight {weight}")]
    BadWeight { metric: MetricId, weight: f64 },

    #[error("CATALOG/required metric weights of '{dimension}' sum to {sum}, expected 1.0")]
    MetricWeightSum { dimension: Dimension, sum: f64 },

    #[error("CATALOG/stage '{0}' has no weight table")]
    MissingStage(Stage),

    #[error("CATALOG/stage '{stage}' has a missing or negative weight for '{dimension}'")]
    BadStageWeight { stage: Stage, dimension: Dimension },

    #[error("CATALOG/weights of stage '{stage}' sum to {sum}, expected 1.0")]
    StageWeightSum { stage: Stage, sum: f64 },

    #[error("CATALOG/benchmark for '{0}' is missing")]
    MissingBenchmark(Category),

    #[error("CATALOG/benchmark percentiles of '{0}' are not increasing")]
    UnorderedBenchmark(Category),
}
