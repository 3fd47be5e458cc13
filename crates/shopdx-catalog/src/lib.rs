//! Shopdx Catalog: threshold tables and stage weights
//!
//! The catalog is data. The evaluator only ever sees a validated `Catalog`,
//! either the built-in one or an override loaded from YAML.

pub mod builtin;
pub mod catalog;
pub mod error;
pub mod thresholds;

pub use builtin::{CATALOG_VERSION, FALLBACK_CATEGORY};
pub use catalog::{Catalog, MetricRule};
pub use error::CatalogError;
pub use thresholds::{Benchmark, Percentile, ThresholdSet};
