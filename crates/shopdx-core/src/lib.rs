//! Shopdx Core: identifiers, data model and input validation
//!
//! Everything the diagnosis stages exchange lives here, so the catalog,
//! evaluator, analyzer and renderer only depend on this crate and not on
//! each other's internals.

pub mod context;
pub mod data_model;
pub mod error;
pub mod grade;
pub mod input;
pub mod metric;

pub use context::RunContext;
pub use data_model::{
    ActionItem, ActionPlan, DerivedMetrics, DiagnosisReport, DimensionScore, Downgrade,
    Evaluation, FocusArea, GradeBadge, Issue, MetricScore, RawMetrics, ReportMeta, ShopProfile,
    Strength,
};
pub use error::{InputError, ValidationError};
pub use grade::{Grade, GradePolicy, Priority, Severity};
pub use input::{demo_shop, parse_records, ShopInput};
pub use metric::{Category, Dimension, Direction, MetricId, Stage, Tier, Unit};

/// Engine version stamped on every report
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
