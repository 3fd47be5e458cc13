//! Shopdx Policy: from scores to problems and plans
//!
//! # Architecture
//!
//! ```text
//! Evaluation → Severity Cutoffs → Issues → Top Issues
//!                                   ↓
//!                Playbook ──→ Action Plan (P0 / P1 / P2)
//!                   ↓
//!          Strengths, Focus Areas
//! ```
//!
//! The playbook is pure data. Swapping it (or overriding parts of it from
//! YAML) changes every text the analyzer produces without touching logic.

pub mod analyzer;
pub mod error;
pub mod insights;
pub mod issues;
pub mod plan;
pub mod playbook;
pub mod severity;

pub use analyzer::{Analysis, DiagnosisAnalyzer, DEFAULT_STRENGTHS, DEFAULT_TOP_ISSUES};
pub use error::PlaybookError;
pub use insights::{focus_areas, strengths};
pub use issues::{detect_issues, gap_pct, top_issues};
pub use plan::build_action_plan;
pub use playbook::{GeneralItem, Playbook, PlaybookEntry, TimeEstimates};
pub use severity::SeverityCutoffs;
