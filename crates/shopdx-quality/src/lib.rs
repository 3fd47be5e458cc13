//! Shopdx Quality: metric calculation, scoring and grading
//!
//! # Example
//!
//! ```ignore
//! use shopdx_catalog::Catalog;
//! use shopdx_core::{demo_shop, GradePolicy};
//!
//! let catalog = Catalog::builtin();
//! let raw = demo_shop();
//! let derived = shopdx_quality::calculate(&raw);
//! let eval = shopdx_quality::evaluate(&raw, &derived, &catalog, GradePolicy::Strict);
//! println!("{:.1} -> {}", eval.overall_score, eval.grade);
//! ```

pub mod calculator;
pub mod evaluator;
pub mod grading;
pub mod scoring;

pub use calculator::{calculate, BASE_COST_RATIO, COMPLAINT_WINDOW_DAYS};
pub use evaluator::ScoreEvaluator;
pub use grading::{apply_policy, weakest};
pub use scoring::score;

use shopdx_catalog::Catalog;
use shopdx_core::{DerivedMetrics, Evaluation, GradePolicy, RawMetrics};

/// Quick evaluation function
pub fn evaluate(
    raw: &RawMetrics,
    derived: &DerivedMetrics,
    catalog: &Catalog,
    policy: GradePolicy,
) -> Evaluation {
    ScoreEvaluator::new(catalog)
        .with_policy(policy)
        .evaluate(raw, derived)
}
