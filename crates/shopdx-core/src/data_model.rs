//! Data Model: RawMetrics, DerivedMetrics, Evaluation, DiagnosisReport
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::grade::{Grade, GradePolicy, Priority, Severity};
use crate::metric::{Category, Dimension, Direction, MetricId, Stage, Tier};

/// Who the shop is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopProfile {
    pub name: String,
    /// Delivery platform (ex: "meituan", "eleme")
    pub platform: String,
    pub category: Category,
    pub stage: Stage,
    pub business_district: Option<String>,
}

/// Raw operational counters of one shop
///
/// Traffic and order counters are 7-day daily averages, review counters are
/// 30-day totals. Percentages are stored as 0-100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMetrics {
    pub profile: ShopProfile,

    pub impressions: f64,
    pub visits: f64,
    pub order_intents: f64,
    pub promotion_spend: f64,

    pub order_count: f64,
    pub cancel_count: f64,
    pub revenue: f64,
    pub net_revenue: f64,

    pub positive_reviews: f64,
    pub negative_reviews: f64,
    pub complaints: f64,
    pub replied_negative: f64,
    pub rating: f64,

    pub prep_time_minutes: f64,
    pub on_time_rate: f64,
    pub refund_rate: f64,

    pub new_customer_rate: Option<f64>,
    pub repurchase_rate: Option<f64>,
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

impl RawMetrics {
    /// Clamp every counter to a finite, non-negative value
    pub fn sanitized(mut self) -> Self {
        for field in [
            &mut self.impressions,
            &mut self.visits,
            &mut self.order_intents,
            &mut self.promotion_spend,
            &mut self.order_count,
            &mut self.cancel_count,
            &mut self.revenue,
            &mut self.net_revenue,
            &mut self.positive_reviews,
            &mut self.negative_reviews,
            &mut self.complaints,
            &mut self.replied_negative,
            &mut self.rating,
            &mut self.prep_time_minutes,
            &mut self.on_time_rate,
            &mut self.refund_rate,
        ] {
            *field = non_negative(*field);
        }
        self.new_customer_rate = self.new_customer_rate.map(non_negative);
        self.repurchase_rate = self.repurchase_rate.map(non_negative);
        self
    }
}

/// Ratios derived from `RawMetrics`; every ratio is a fraction, not a percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub impressions: f64,
    pub order_volume: f64,
    pub visit_conversion_rate: f64,
    pub order_conversion_rate: f64,
    pub overall_conversion_rate: f64,
    pub exposure_cost_per_visitor: f64,
    pub average_order_value: f64,
    pub net_average_order_value: f64,
    pub cancellation_rate: f64,
    pub total_reviews: f64,
    pub positive_rate: f64,
    pub negative_rate: f64,
    pub complaint_rate: f64,
    pub negative_reply_rate: f64,
    pub estimated_profit_margin: f64,
    pub rating: f64,
    pub prep_time: f64,
    pub on_time_rate: f64,
    pub refund_rate: f64,
    pub new_customer_rate: Option<f64>,
    pub repurchase_rate: Option<f64>,
}

impl DerivedMetrics {
    /// Value of a scored metric; `None` only for absent optional metrics
    pub fn value(&self, metric: MetricId) -> Option<f64> {
        use MetricId::*;
        let v = match metric {
            Impressions => self.impressions,
            VisitConversionRate => self.visit_conversion_rate,
            ExposureCostPerVisitor => self.exposure_cost_per_visitor,
            OrderVolume => self.order_volume,
            NewCustomerRate => return self.new_customer_rate,
            OrderConversionRate => self.order_conversion_rate,
            OverallConversionRate => self.overall_conversion_rate,
            CancellationRate => self.cancellation_rate,
            RepurchaseRate => return self.repurchase_rate,
            AverageOrderValue => self.average_order_value,
            EstimatedProfitMargin => self.estimated_profit_margin,
            Rating => self.rating,
            PositiveRate => self.positive_rate,
            NegativeRate => self.negative_rate,
            ComplaintRate => self.complaint_rate,
            NegativeReplyRate => self.negative_reply_rate,
            PrepTime => self.prep_time,
            OnTimeRate => self.on_time_rate,
            RefundRate => self.refund_rate,
        };
        Some(v)
    }
}

/// Score of one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricScore {
    pub metric: MetricId,
    pub dimension: Dimension,
    pub value: f64,
    /// 0-100
    pub score: f64,
    /// Weight within the dimension, renormalized over present metrics
    pub weight: f64,
    pub tier: Tier,
    /// The `good` boundary
    pub target: f64,
    pub direction: Direction,
    /// Category median, only for benchmark-scored metrics
    pub benchmark: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension: Dimension,
    /// 0-100
    pub score: f64,
    /// Stage weight of this dimension
    pub weight: f64,
    pub tier: Tier,
    pub metrics: Vec<MetricScore>,
}

/// Record of a weakest-link downgrade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Downgrade {
    pub dimension: Dimension,
    pub score: f64,
    /// Best grade still allowed
    pub ceiling: Grade,
    pub reason: String,
}

/// Output of the score evaluator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub stage: Stage,
    pub category: Category,
    pub policy: GradePolicy,
    /// 0-100
    pub overall_score: f64,
    /// Grade from the overall score alone
    pub base_grade: Grade,
    /// Grade after the policy was applied
    pub grade: Grade,
    pub downgrade: Option<Downgrade>,
    /// Active dimensions, in `Dimension` order
    pub dimensions: Vec<DimensionScore>,
}

impl Evaluation {
    pub fn dimension(&self, dimension: Dimension) -> Option<&DimensionScore> {
        self.dimensions.iter().find(|d| d.dimension == dimension)
    }

    /// Every metric score, in dimension then catalog order
    pub fn metric_scores(&self) -> impl Iterator<Item = &MetricScore> {
        self.dimensions.iter().flat_map(|d| d.metrics.iter())
    }

    pub fn metric(&self, metric: MetricId) -> Option<&MetricScore> {
        self.metric_scores().find(|m| m.metric == metric)
    }
}

/// A concrete problem found in the evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub dimension: Dimension,
    pub metric: MetricId,
    pub title: String,
    pub description: String,
    pub impact: String,
    pub score: f64,
    pub observed: f64,
    pub target: f64,
    /// Distance to target as a percentage of the target
    pub gap_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub expected_effect: String,
    pub time_estimate: String,
    /// `None` for generic improvement items
    pub dimension: Option<Dimension>,
    pub metric: Option<MetricId>,
}

/// Action items grouped by priority; every priority key is always present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionPlan(BTreeMap<Priority, Vec<ActionItem>>);

impl ActionPlan {
    pub fn new() -> Self {
        Self(Priority::ALL.into_iter().map(|p| (p, Vec::new())).collect())
    }

    pub fn push(&mut self, item: ActionItem) {
        self.0.entry(item.priority).or_default().push(item);
    }

    pub fn items(&self, priority: Priority) -> &[ActionItem] {
        self.0.get(&priority).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Items in priority order
    pub fn iter(&self) -> impl Iterator<Item = &ActionItem> {
        self.0.values().flat_map(|items| items.iter())
    }

    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn groups(&self) -> &BTreeMap<Priority, Vec<ActionItem>> {
        &self.0
    }
}

impl Default for ActionPlan {
    fn default() -> Self {
        Self::new()
    }
}

/// A metric the shop does well on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strength {
    pub metric: MetricId,
    pub dimension: Dimension,
    pub value: f64,
    pub score: f64,
    pub tier: Tier,
}

/// Dimension-level advice for a weak dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusArea {
    pub dimension: Dimension,
    pub score: f64,
    pub tier: Tier,
    pub advice: Vec<String>,
}

/// Grade code with its display label and color tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeBadge {
    pub code: Grade,
    pub label: String,
    pub color: String,
}

impl From<Grade> for GradeBadge {
    fn from(grade: Grade) -> Self {
        Self {
            code: grade,
            label: grade.label().to_string(),
            color: grade.color().to_string(),
        }
    }
}

/// Run metadata; only `run_id` and `generated_at` differ between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMeta {
    pub engine_version: String,
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// blake3 of the canonical input
    pub input_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisReport {
    pub meta: ReportMeta,
    pub shop: ShopProfile,
    pub overall_score: f64,
    pub grade: GradeBadge,
    pub base_grade: Grade,
    pub downgrade: Option<Downgrade>,
    pub policy: GradePolicy,
    pub dimensions: Vec<DimensionScore>,
    pub issue_count: usize,
    /// Every detected issue, in dimension then catalog order
    pub issues: Vec<Issue>,
    pub top_issues: Vec<Issue>,
    pub action_plan: ActionPlan,
    pub strengths: Vec<Strength>,
    pub focus_areas: Vec<FocusArea>,
    pub derived: DerivedMetrics,
    pub raw: RawMetrics,
}

impl DiagnosisReport {
    /// Copy with the per-run identity blanked, for comparing two runs
    pub fn without_run_identity(&self) -> Self {
        let mut report = self.clone();
        report.meta.run_id = Uuid::nil();
        report.meta.generated_at = DateTime::<Utc>::default();
        report
    }
}
