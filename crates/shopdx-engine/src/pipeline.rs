//! Diagnosis Pipeline
//!
//! ```text
//! RawMetrics → sanitize → calculate → evaluate → analyze → DiagnosisReport
//! ```
//!
//! A diagnosis never fails once the input has been validated.

use std::path::Path;
use std::sync::Arc;

use shopdx_catalog::Catalog;
use shopdx_core::{parse_records, DiagnosisReport, GradeBadge, RawMetrics, RunContext};
use shopdx_policy::{DiagnosisAnalyzer, Playbook};
use shopdx_quality::{calculate, ScoreEvaluator};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::EngineError;

/// Catalog, playbook and settings for any number of diagnoses
#[derive(Debug, Clone)]
pub struct DiagnosisEngine {
    catalog: Arc<Catalog>,
    playbook: Arc<Playbook>,
    config: EngineConfig,
}

impl Default for DiagnosisEngine {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DiagnosisEngine {
    pub fn new(catalog: Catalog, playbook: Playbook) -> Self {
        Self {
            catalog: Arc::new(catalog),
            playbook: Arc::new(playbook),
            config: EngineConfig::default(),
        }
    }

    /// Built-in catalog and playbook
    pub fn builtin() -> Self {
        Self::new(Catalog::builtin(), Playbook::builtin())
    }

    /// Optional YAML overrides on top of the built-in tables
    pub fn from_files(
        catalog: Option<&Path>,
        playbook: Option<&Path>,
    ) -> Result<Self, EngineError> {
        let catalog = match catalog {
            Some(path) => Catalog::load(path)?,
            None => Catalog::builtin(),
        };
        let playbook = match playbook {
            Some(path) => Playbook::load(path)?,
            None => Playbook::builtin(),
        };
        Ok(Self::new(catalog, playbook))
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn playbook(&self) -> &Playbook {
        &self.playbook
    }

    /// Full diagnosis of one shop
    pub fn diagnose(&self, raw: &RawMetrics) -> DiagnosisReport {
        let raw = raw.clone().sanitized();
        let context = RunContext::for_metrics(&raw);

        let derived = calculate(&raw);
        debug!(shop = %raw.profile.name, "metrics derived");

        let evaluation = ScoreEvaluator::new(&self.catalog)
            .with_policy(self.config.policy)
            .evaluate(&raw, &derived);

        let analysis = DiagnosisAnalyzer::new(&self.playbook)
            .with_cutoffs(self.config.cutoffs)
            .with_top_issues(self.config.top_issues)
            .with_strengths(self.config.strengths)
            .analyze(&evaluation);

        info!(
            shop = %raw.profile.name,
            score = evaluation.overall_score,
            grade = %evaluation.grade,
            issues = analysis.issues.len(),
            "diagnosis complete"
        );

        DiagnosisReport {
            meta: context.into_meta(),
            shop: raw.profile.clone(),
            overall_score: evaluation.overall_score,
            grade: GradeBadge::from(evaluation.grade),
            base_grade: evaluation.base_grade,
            downgrade: evaluation.downgrade,
            policy: evaluation.policy,
            dimensions: evaluation.dimensions,
            issue_count: analysis.issues.len(),
            issues: analysis.issues,
            top_issues: analysis.top_issues,
            action_plan: analysis.action_plan,
            strengths: analysis.strengths,
            focus_areas: analysis.focus_areas,
            derived,
            raw,
        }
    }

    /// Parse, validate and diagnose every record of a JSON document
    pub fn diagnose_json(&self, json: &str) -> Result<Vec<DiagnosisReport>, EngineError> {
        let records = parse_records(json)?;
        Ok(records.iter().map(|raw| self.diagnose(raw)).collect())
    }
}
