//! Grade policies
//!
//! `Averaged` bands the overall score. `Strict` then caps the grade by the
//! weakest dimension: below 30 the grade is D, below 50 it is at most C.

use shopdx_core::{DimensionScore, Downgrade, Grade, GradePolicy};

/// Any dimension below this forces a D under `Strict`
pub const STRICT_FAIL_BELOW: f64 = 30.0;
/// Any dimension below this caps the grade at C under `Strict`
pub const STRICT_CAP_BELOW: f64 = 50.0;

/// Lowest-scoring dimension; ties go to the earlier dimension
pub fn weakest(dimensions: &[DimensionScore]) -> Option<&DimensionScore> {
    dimensions.iter().fold(None, |acc: Option<&DimensionScore>, d| match acc {
        Some(w) if w.score <= d.score => Some(w),
        _ => Some(d),
    })
}

/// Final grade and the downgrade that produced it, if the grade changed
pub fn apply_policy(
    policy: GradePolicy,
    base: Grade,
    dimensions: &[DimensionScore],
) -> (Grade, Option<Downgrade>) {
    if policy == GradePolicy::Averaged {
        return (base, None);
    }
    let Some(weakest) = weakest(dimensions) else {
        return (base, None);
    };

    let (ceiling, limit) = if weakest.score < STRICT_FAIL_BELOW {
        (Grade::D, STRICT_FAIL_BELOW)
    } else if weakest.score < STRICT_CAP_BELOW {
        (Grade::C, STRICT_CAP_BELOW)
    } else {
        return (base, None);
    };

    let grade = base.cap(ceiling);
    if grade == base {
        return (base, None);
    }

    let downgrade = Downgrade {
        dimension: weakest.dimension,
        score: weakest.score,
        ceiling,
        reason: format!(
            "{} scored {:.1}, below {:.0}: grade limited to {}",
            weakest.dimension.label(),
            weakest.score,
            limit,
            ceiling
        ),
    };
    (grade, Some(downgrade))
}
