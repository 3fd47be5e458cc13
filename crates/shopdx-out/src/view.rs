//! Display model handed to the templates
//!
//! Values whose format depends on the metric unit are formatted here; plain
//! scores and weights stay numeric so templates can format them with helpers.

use serde::Serialize;
use shopdx_core::{DiagnosisReport, Issue, MetricScore, Priority};

#[derive(Debug, Serialize)]
pub struct ReportView {
    pub shop: ShopView,
    pub meta: MetaView,
    pub overall_score: f64,
    pub grade: GradeView,
    pub base_grade: String,
    pub downgrade: Option<String>,
    pub policy: String,
    pub dimensions: Vec<DimensionView>,
    pub issue_count: usize,
    pub issues: Vec<IssueView>,
    pub top_issues: Vec<IssueView>,
    pub plan: Vec<PlanGroupView>,
    pub strengths: Vec<MetricView>,
    pub focus_areas: Vec<FocusView>,
}

#[derive(Debug, Serialize)]
pub struct ShopView {
    pub name: String,
    pub platform: String,
    pub category: String,
    pub stage: String,
    pub district: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MetaView {
    pub engine_version: String,
    pub run_id: String,
    pub generated_at: String,
    pub input_hash: String,
}

#[derive(Debug, Serialize)]
pub struct GradeView {
    pub code: String,
    pub label: String,
    pub color: String,
}

#[derive(Debug, Serialize)]
pub struct DimensionView {
    pub key: String,
    pub label: String,
    pub score: f64,
    pub weight: f64,
    pub tier: String,
    pub metrics: Vec<MetricView>,
}

#[derive(Debug, Serialize)]
pub struct MetricView {
    pub label: String,
    pub value: String,
    pub target: String,
    pub score: f64,
    pub tier: String,
}

#[derive(Debug, Serialize)]
pub struct IssueView {
    pub severity: String,
    pub dimension: String,
    pub title: String,
    pub description: String,
    pub impact: String,
    pub score: f64,
    pub gap_pct: f64,
}

#[derive(Debug, Serialize)]
pub struct PlanGroupView {
    pub priority: String,
    pub label: String,
    pub items: Vec<ActionView>,
}

#[derive(Debug, Serialize)]
pub struct ActionView {
    pub title: String,
    pub description: String,
    pub expected_effect: String,
    pub time_estimate: String,
}

#[derive(Debug, Serialize)]
pub struct FocusView {
    pub label: String,
    pub score: f64,
    pub advice: Vec<String>,
}

fn metric_view(m: &MetricScore) -> MetricView {
    let unit = m.metric.unit();
    MetricView {
        label: m.metric.label().to_string(),
        value: unit.format(m.value),
        target: unit.format(m.target),
        score: m.score,
        tier: m.tier.to_string(),
    }
}

fn issue_view(issue: &Issue) -> IssueView {
    IssueView {
        severity: issue.severity.to_string(),
        dimension: issue.dimension.label().to_string(),
        title: issue.title.clone(),
        description: issue.description.clone(),
        impact: issue.impact.clone(),
        score: issue.score,
        gap_pct: issue.gap_pct,
    }
}

impl From<&DiagnosisReport> for ReportView {
    fn from(report: &DiagnosisReport) -> Self {
        let shop = &report.shop;
        let strengths = report
            .strengths
            .iter()
            .filter_map(|s| {
                report
                    .dimensions
                    .iter()
                    .flat_map(|d| d.metrics.iter())
                    .find(|m| m.metric == s.metric)
                    .map(metric_view)
            })
            .collect();

        ReportView {
            shop: ShopView {
                name: shop.name.clone(),
                platform: shop.platform.clone(),
                category: shop.category.to_string(),
                stage: shop.stage.to_string(),
                district: shop.business_district.clone(),
            },
            meta: MetaView {
                engine_version: report.meta.engine_version.clone(),
                run_id: report.meta.run_id.to_string(),
                generated_at: report.meta.generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
                input_hash: report.meta.input_hash.chars().take(12).collect(),
            },
            overall_score: report.overall_score,
            grade: GradeView {
                code: report.grade.code.to_string(),
                label: report.grade.label.clone(),
                color: report.grade.color.clone(),
            },
            base_grade: report.base_grade.to_string(),
            downgrade: report.downgrade.as_ref().map(|d| d.reason.clone()),
            policy: report.policy.to_string(),
            dimensions: report
                .dimensions
                .iter()
                .map(|d| DimensionView {
                    key: d.dimension.as_str().to_string(),
                    label: d.dimension.label().to_string(),
                    score: d.score,
                    weight: d.weight,
                    tier: d.tier.to_string(),
                    metrics: d.metrics.iter().map(metric_view).collect(),
                })
                .collect(),
            issue_count: report.issue_count,
            issues: report.issues.iter().map(issue_view).collect(),
            top_issues: report.top_issues.iter().map(issue_view).collect(),
            plan: Priority::ALL
                .into_iter()
                .map(|p| PlanGroupView {
                    priority: p.to_string(),
                    label: p.label().to_string(),
                    items: report
                        .action_plan
                        .items(p)
                        .iter()
                        .map(|a| ActionView {
                            title: a.title.clone(),
                            description: a.description.clone(),
                            expected_effect: a.expected_effect.clone(),
                            time_estimate: a.time_estimate.clone(),
                        })
                        .collect(),
                })
                .filter(|g| !g.items.is_empty())
                .collect(),
            strengths,
            focus_areas: report
                .focus_areas
                .iter()
                .map(|f| FocusView {
                    label: f.dimension.label().to_string(),
                    score: f.score,
                    advice: f.advice.clone(),
                })
                .collect(),
        }
    }
}
