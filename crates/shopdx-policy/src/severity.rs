//! Score to severity classification

use serde::{Deserialize, Serialize};
use shopdx_core::Severity;

use crate::error::PlaybookError;

/// Upper (exclusive) score of each severity band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityCutoffs {
    pub critical_below: f64,
    pub major_below: f64,
    pub minor_below: f64,
}

impl Default for SeverityCutoffs {
    fn default() -> Self {
        Self {
            critical_below: 30.0,
            major_below: 50.0,
            minor_below: 70.0,
        }
    }
}

impl SeverityCutoffs {
    pub fn new(
        critical_below: f64,
        major_below: f64,
        minor_below: f64,
    ) -> Result<Self, PlaybookError> {
        let cutoffs = Self {
            critical_below,
            major_below,
            minor_below,
        };
        cutoffs.validate()?;
        Ok(cutoffs)
    }

    pub fn validate(&self) -> Result<(), PlaybookError> {
        let ordered = 0.0 <= self.critical_below
            && self.critical_below <= self.major_below
            && self.major_below <= self.minor_below
            && self.minor_below <= 100.0;
        if ordered {
            Ok(())
        } else {
            Err(PlaybookError::InvalidCutoffs {
                critical: self.critical_below,
                major: self.major_below,
                minor: self.minor_below,
            })
        }
    }

    /// `None` means the score is healthy enough to raise no issue
    pub fn classify(&self, score: f64) -> Option<Severity> {
        if score < self.critical_below {
            Some(Severity::Critical)
        } else if score < self.major_below {
            Some(Severity::Major)
        } else if score < self.minor_below {
            Some(Severity::Minor)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bands() {
        let c = SeverityCutoffs::default();
        assert_eq!(c.classify(0.0), Some(Severity::Critical));
        assert_eq!(c.classify(29.99), Some(Severity::Critical));
        assert_eq!(c.classify(30.0), Some(Severity::Major));
        assert_eq!(c.classify(49.9), Some(Severity::Major));
        assert_eq!(c.classify(50.0), Some(Severity::Minor));
        assert_eq!(c.classify(69.9), Some(Severity::Minor));
        assert_eq!(c.classify(70.0), None);
        assert_eq!(c.classify(100.0), None);
    }

    #[test]
    fn test_custom_cutoffs_validated() {
        let c = SeverityCutoffs::new(20.0, 40.0, 60.0).unwrap();
        assert_eq!(c.classify(65.0), None);
        assert!(SeverityCutoffs::new(50.0, 40.0, 60.0).is_err());
        assert!(SeverityCutoffs::new(20.0, 40.0, 120.0).is_err());
    }
}
