//! Tier boundaries and price benchmarks

use serde::{Deserialize, Serialize};
use shopdx_core::Direction;
use std::fmt;

/// Five tier boundaries of one metric, worst to best
///
/// For `HigherIsBetter` the boundaries strictly increase from `danger` to
/// `excellent`; for `LowerIsBetter` they strictly decrease.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSet {
    pub direction: Direction,
    pub danger: f64,
    pub poor: f64,
    pub fair: f64,
    pub good: f64,
    pub excellent: f64,
}

impl ThresholdSet {
    pub fn higher(danger: f64, poor: f64, fair: f64, good: f64, excellent: f64) -> Self {
        Self {
            direction: Direction::HigherIsBetter,
            danger,
            poor,
            fair,
            good,
            excellent,
        }
    }

    pub fn lower(danger: f64, poor: f64, fair: f64, good: f64, excellent: f64) -> Self {
        Self {
            direction: Direction::LowerIsBetter,
            danger,
            poor,
            fair,
            good,
            excellent,
        }
    }

    /// Boundaries worst to best
    pub fn boundaries(&self) -> [f64; 5] {
        [self.danger, self.poor, self.fair, self.good, self.excellent]
    }

    /// Finite and strictly ordered for the direction
    pub fn is_ordered(&self) -> bool {
        let b = self.boundaries();
        b.iter().all(|v| v.is_finite())
            && b.windows(2).all(|w| match self.direction {
                Direction::HigherIsBetter => w[0] < w[1],
                Direction::LowerIsBetter => w[0] > w[1],
            })
    }

    /// The value a shop should aim for
    pub fn target(&self) -> f64 {
        self.good
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Percentile {
    P10,
    P25,
    P50,
    P75,
    P90,
}

impl fmt::Display for Percentile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Percentile::P10 => write!(f, "P10"),
            Percentile::P25 => write!(f, "P25"),
            Percentile::P50 => write!(f, "P50"),
            Percentile::P75 => write!(f, "P75"),
            Percentile::P90 => write!(f, "P90"),
        }
    }
}

/// Average order value distribution of one category (currency units)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
}

impl Benchmark {
    pub const fn new(p10: f64, p25: f64, p50: f64, p75: f64, p90: f64) -> Self {
        Self {
            p10,
            p25,
            p50,
            p75,
            p90,
        }
    }

    pub fn get(&self, percentile: Percentile) -> f64 {
        match percentile {
            Percentile::P10 => self.p10,
            Percentile::P25 => self.p25,
            Percentile::P50 => self.p50,
            Percentile::P75 => self.p75,
            Percentile::P90 => self.p90,
        }
    }

    /// P10 → danger, P25 → poor, P50 → fair, P75 → good, P90 → excellent
    pub fn ladder(&self) -> ThresholdSet {
        ThresholdSet::higher(self.p10, self.p25, self.p50, self.p75, self.p90)
    }

    pub fn is_ordered(&self) -> bool {
        self.p10 >= 0.0 && self.ladder().is_ordered()
    }
}
