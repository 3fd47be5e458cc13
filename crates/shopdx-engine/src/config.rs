//! Engine configuration
//!
//! Defaults, optionally overridden by environment variables:
//!
//! | variable            | default    |
//! |---------------------|------------|
//! | `SHOPDX_POLICY`     | `averaged` |
//! | `SHOPDX_TOP_ISSUES` | `5`        |
//! | `SHOPDX_STRENGTHS`  | `5`        |

use shopdx_core::GradePolicy;
use shopdx_policy::{SeverityCutoffs, DEFAULT_STRENGTHS, DEFAULT_TOP_ISSUES};

use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub policy: GradePolicy,
    pub top_issues: usize,
    pub strengths: usize,
    pub cutoffs: SeverityCutoffs,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            policy: GradePolicy::Averaged,
            top_issues: DEFAULT_TOP_ISSUES,
            strengths: DEFAULT_STRENGTHS,
            cutoffs: SeverityCutoffs::default(),
        }
    }
}

fn parse_count(name: &str, raw: Option<String>, default: usize) -> Result<usize, EngineError> {
    match raw {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|e| EngineError::Config(format!("invalid {name} '{v}': {e}"))),
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, EngineError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EngineError> {
        let defaults = Self::default();
        let policy = match lookup("SHOPDX_POLICY") {
            None => defaults.policy,
            Some(v) => v.parse().map_err(EngineError::Config)?,
        };
        Ok(Self {
            policy,
            top_issues: parse_count(
                "SHOPDX_TOP_ISSUES",
                lookup("SHOPDX_TOP_ISSUES"),
                defaults.top_issues,
            )?,
            strengths: parse_count(
                "SHOPDX_STRENGTHS",
                lookup("SHOPDX_STRENGTHS"),
                defaults.strengths,
            )?,
            cutoffs: defaults.cutoffs,
        })
    }

    pub fn with_policy(mut self, policy: GradePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_top_issues(mut self, n: usize) -> Self {
        self.top_issues = n;
        self
    }

    pub fn with_cutoffs(mut self, cutoffs: SeverityCutoffs) -> Self {
        self.cutoffs = cutoffs;
        self
    }
}
