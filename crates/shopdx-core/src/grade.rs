//! Grades, issue severities and action priorities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Letter grade of the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    /// 90-100
    S,
    /// 80-89
    A,
    /// 70-79
    B,
    /// 60-69
    C,
    /// below 60
    D,
}

impl Grade {
    /// Band an overall score. No rounding happens first, so 89.999 is an A.
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Grade::S
        } else if score >= 80.0 {
            Grade::A
        } else if score >= 70.0 {
            Grade::B
        } else if score >= 60.0 {
            Grade::C
        } else {
            Grade::D
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::S => "Excellent",
            Grade::A => "Good",
            Grade::B => "Passing",
            Grade::C => "Weak",
            Grade::D => "Critical",
        }
    }

    /// Color tag for renderers
    pub fn color(&self) -> &'static str {
        match self {
            Grade::S => "dark-green",
            Grade::A => "green",
            Grade::B => "yellow",
            Grade::C => "orange",
            Grade::D => "red",
        }
    }

    /// Higher is better: S = 4, D = 0
    pub fn rank(&self) -> u8 {
        match self {
            Grade::S => 4,
            Grade::A => 3,
            Grade::B => 2,
            Grade::C => 1,
            Grade::D => 0,
        }
    }

    /// The worse of `self` and `ceiling`
    pub fn cap(self, ceiling: Grade) -> Grade {
        if self.rank() > ceiling.rank() {
            ceiling
        } else {
            self
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Grade::S => write!(f, "S"),
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::D => write!(f, "D"),
        }
    }
}

/// How the letter grade is derived from dimension scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GradePolicy {
    /// Band the weighted overall score only
    #[default]
    Averaged,
    /// Band the overall score, then apply the weakest-link downgrade
    Strict,
}

impl FromStr for GradePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "averaged" | "average" => Ok(GradePolicy::Averaged),
            "strict" | "weakest-link" => Ok(GradePolicy::Strict),
            other => Err(format!("unknown grade policy '{}'", other)),
        }
    }
}

impl fmt::Display for GradePolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GradePolicy::Averaged => write!(f, "averaged"),
            GradePolicy::Strict => write!(f, "strict"),
        }
    }
}

/// Issue severity, `Critical` is the most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Minor = 0,
    Major = 1,
    Critical = 2,
}

impl Severity {
    /// Action priority an issue of this severity is filed under
    pub fn priority(&self) -> Priority {
        match self {
            Severity::Critical => Priority::P0,
            Severity::Major => Priority::P1,
            Severity::Minor => Priority::P2,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::Major => write!(f, "major"),
            Severity::Minor => write!(f, "minor"),
        }
    }
}

/// Action priority, `P0` sorts first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Immediate
    P0,
    /// Within two weeks
    P1,
    /// Continuous improvement
    P2,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::P0, Priority::P1, Priority::P2];

    pub fn label(&self) -> &'static str {
        match self {
            Priority::P0 => "Fix immediately",
            Priority::P1 => "Fix within two weeks",
            Priority::P2 => "Ongoing improvement",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Priority::P0 => write!(f, "P0"),
            Priority::P1 => write!(f, "P1"),
            Priority::P2 => write!(f, "P2"),
        }
    }
}
