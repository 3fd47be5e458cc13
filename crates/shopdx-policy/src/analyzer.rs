//! Diagnosis Analyzer
//!
//! Turns an evaluation into issues, a ranked shortlist, an action plan,
//! strengths and focus areas. All wording comes from the playbook.

use serde::{Deserialize, Serialize};
use shopdx_core::{ActionPlan, Evaluation, FocusArea, Issue, Severity, Strength};
use tracing::debug;

use crate::insights::{focus_areas, strengths};
use crate::issues::{detect_issues, top_issues};
use crate::plan::build_action_plan;
use crate::playbook::Playbook;
use crate::severity::SeverityCutoffs;

pub const DEFAULT_TOP_ISSUES: usize = 5;
pub const DEFAULT_STRENGTHS: usize = 5;

/// Everything the analyzer derives from one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub issues: Vec<Issue>,
    pub top_issues: Vec<Issue>,
    pub action_plan: ActionPlan,
    pub strengths: Vec<Strength>,
    pub focus_areas: Vec<FocusArea>,
}

impl Analysis {
    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }
}

pub struct DiagnosisAnalyzer<'a> {
    playbook: &'a Playbook,
    cutoffs: SeverityCutoffs,
    top_n: usize,
    strengths_n: usize,
}

impl<'a> DiagnosisAnalyzer<'a> {
    pub fn new(playbook: &'a Playbook) -> Self {
        Self {
            playbook,
            cutoffs: SeverityCutoffs::default(),
            top_n: DEFAULT_TOP_ISSUES,
            strengths_n: DEFAULT_STRENGTHS,
        }
    }

    pub fn with_cutoffs(mut self, cutoffs: SeverityCutoffs) -> Self {
        self.cutoffs = cutoffs;
        self
    }

    pub fn with_top_issues(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    pub fn with_strengths(mut self, n: usize) -> Self {
        self.strengths_n = n;
        self
    }

    pub fn analyze(&self, evaluation: &Evaluation) -> Analysis {
        let issues = detect_issues(evaluation, self.playbook, &self.cutoffs);
        let top = top_issues(&issues, self.top_n);
        let action_plan = build_action_plan(&issues, self.playbook);

        let analysis = Analysis {
            top_issues: top,
            action_plan,
            strengths: strengths(evaluation, self.strengths_n),
            focus_areas: focus_areas(evaluation, self.playbook),
            issues,
        };
        debug!(
            critical = analysis.count(Severity::Critical),
            major = analysis.count(Severity::Major),
            minor = analysis.count(Severity::Minor),
            actions = analysis.action_plan.len(),
            "analysis complete"
        );
        analysis
    }
}
