//! Identifiers shared by every stage: dimensions, metrics, tiers, stages
//!
//! All of these are closed enumerations so a catalog, an evaluation and a
//! report can only ever talk about metrics the engine knows how to compute.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Scoring category a metric rolls up into
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Traffic,
    Conversion,
    PricePoint,
    Satisfaction,
    Efficiency,
}

impl Dimension {
    /// Every dimension in report order
    pub const ALL: [Dimension; 5] = [
        Dimension::Traffic,
        Dimension::Conversion,
        Dimension::PricePoint,
        Dimension::Satisfaction,
        Dimension::Efficiency,
    ];

    /// Stable snake_case key
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Traffic => "traffic",
            Dimension::Conversion => "conversion",
            Dimension::PricePoint => "price_point",
            Dimension::Satisfaction => "satisfaction",
            Dimension::Efficiency => "efficiency",
        }
    }

    /// Human label used by renderers
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Traffic => "Traffic health",
            Dimension::Conversion => "Conversion",
            Dimension::PricePoint => "Price point",
            Dimension::Satisfaction => "Customer satisfaction",
            Dimension::Efficiency => "Operational efficiency",
        }
    }

    /// Metrics owned by this dimension, in catalog order
    pub fn metrics(&self) -> impl Iterator<Item = MetricId> + '_ {
        MetricId::ALL.into_iter().filter(move |m| m.dimension() == *self)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every metric the engine can score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricId {
    Impressions,
    VisitConversionRate,
    ExposureCostPerVisitor,
    OrderVolume,
    NewCustomerRate,
    OrderConversionRate,
    OverallConversionRate,
    CancellationRate,
    RepurchaseRate,
    AverageOrderValue,
    EstimatedProfitMargin,
    Rating,
    PositiveRate,
    NegativeRate,
    ComplaintRate,
    NegativeReplyRate,
    PrepTime,
    OnTimeRate,
    RefundRate,
}

impl MetricId {
    pub const ALL: [MetricId; 19] = [
        MetricId::Impressions,
        MetricId::VisitConversionRate,
        MetricId::ExposureCostPerVisitor,
        MetricId::OrderVolume,
        MetricId::NewCustomerRate,
        MetricId::OrderConversionRate,
        MetricId::OverallConversionRate,
        MetricId::CancellationRate,
        MetricId::RepurchaseRate,
        MetricId::AverageOrderValue,
        MetricId::EstimatedProfitMargin,
        MetricId::Rating,
        MetricId::PositiveRate,
        MetricId::NegativeRate,
        MetricId::ComplaintRate,
        MetricId::NegativeReplyRate,
        MetricId::PrepTime,
        MetricId::OnTimeRate,
        MetricId::RefundRate,
    ];

    /// The one dimension this metric contributes to
    pub fn dimension(&self) -> Dimension {
        use MetricId::*;
        match self {
            Impressions | VisitConversionRate | ExposureCostPerVisitor | OrderVolume
            | NewCustomerRate => Dimension::Traffic,
            OrderConversionRate | OverallConversionRate | CancellationRate | RepurchaseRate => {
                Dimension::Conversion
            }
            AverageOrderValue | EstimatedProfitMargin => Dimension::PricePoint,
            Rating | PositiveRate | NegativeRate | ComplaintRate | NegativeReplyRate => {
                Dimension::Satisfaction
            }
            PrepTime | OnTimeRate | RefundRate => Dimension::Efficiency,
        }
    }

    /// Optional metrics are only scored when the input carries them
    pub fn is_optional(&self) -> bool {
        matches!(self, MetricId::NewCustomerRate | MetricId::RepurchaseRate)
    }

    pub fn unit(&self) -> Unit {
        use MetricId::*;
        match self {
            Impressions | OrderVolume => Unit::Count,
            ExposureCostPerVisitor | AverageOrderValue => Unit::Currency,
            Rating => Unit::Stars,
            PrepTime => Unit::Minutes,
            ComplaintRate => Unit::PerTenThousand,
            _ => Unit::Ratio,
        }
    }

    pub fn as_str(&self) -> &'static str {
        use MetricId::*;
        match self {
            Impressions => "impressions",
            VisitConversionRate => "visit_conversion_rate",
            ExposureCostPerVisitor => "exposure_cost_per_visitor",
            OrderVolume => "order_volume",
            NewCustomerRate => "new_customer_rate",
            OrderConversionRate => "order_conversion_rate",
            OverallConversionRate => "overall_conversion_rate",
            CancellationRate => "cancellation_rate",
            RepurchaseRate => "repurchase_rate",
            AverageOrderValue => "average_order_value",
            EstimatedProfitMargin => "estimated_profit_margin",
            Rating => "rating",
            PositiveRate => "positive_rate",
            NegativeRate => "negative_rate",
            ComplaintRate => "complaint_rate",
            NegativeReplyRate => "negative_reply_rate",
            PrepTime => "prep_time",
            OnTimeRate => "on_time_rate",
            RefundRate => "refund_rate",
        }
    }

    pub fn label(&self) -> &'static str {
        use MetricId::*;
        match self {
            Impressions => "Daily impressions",
            VisitConversionRate => "Visit conversion rate",
            ExposureCostPerVisitor => "Exposure cost per visitor",
            OrderVolume => "Daily order volume",
            NewCustomerRate => "New customer share",
            OrderConversionRate => "Order conversion rate",
            OverallConversionRate => "Overall conversion rate",
            CancellationRate => "Cancellation rate",
            RepurchaseRate => "Repurchase rate",
            AverageOrderValue => "Average order value",
            EstimatedProfitMargin => "Estimated profit margin",
            Rating => "Platform rating",
            PositiveRate => "Positive review rate",
            NegativeRate => "Negative review rate",
            ComplaintRate => "Complaint rate",
            NegativeReplyRate => "Negative review reply rate",
            PrepTime => "Average prep time",
            OnTimeRate => "On-time delivery rate",
            RefundRate => "Refund rate",
        }
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a metric value is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Count,
    Ratio,
    Currency,
    Stars,
    Minutes,
    PerTenThousand,
}

impl Unit {
    /// Format a raw metric value for humans (ratios are stored as fractions)
    pub fn format(&self, value: f64) -> String {
        match self {
            Unit::Count => format!("{:.0}", value),
            Unit::Ratio => format!("{:.2}%", value * 100.0),
            Unit::Currency => format!("¥{:.2}", value),
            Unit::Stars => format!("{:.1}", value),
            Unit::Minutes => format!("{:.1} min", value),
            Unit::PerTenThousand => format!("{:.2}‱", value * 10_000.0),
        }
    }
}

/// Whether larger raw values are better or worse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// Qualitative tier of a metric or dimension score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Danger,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl Tier {
    /// Tier of a 0-100 score, matching the scoring bands
    pub fn from_score(score: f64) -> Self {
        if score >= 100.0 {
            Tier::Excellent
        } else if score >= 80.0 {
            Tier::Good
        } else if score >= 60.0 {
            Tier::Fair
        } else if score >= 30.0 {
            Tier::Poor
        } else {
            Tier::Danger
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Danger => "danger",
            Tier::Poor => "poor",
            Tier::Fair => "fair",
            Tier::Good => "good",
            Tier::Excellent => "excellent",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Business maturity bucket, decides the dimension weight table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// 0-3 months
    #[serde(alias = "新店期")]
    New,
    /// 3-12 months
    #[serde(alias = "成长期")]
    Growth,
    /// 12 months and older
    #[serde(alias = "成熟期")]
    Mature,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::New, Stage::Growth, Stage::Mature];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::New => "new",
            Stage::Growth => "growth",
            Stage::Mature => "mature",
        }
    }
}

impl FromStr for Stage {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" | "新店期" => Ok(Stage::New),
            "growth" | "成长期" => Ok(Stage::Growth),
            "mature" | "成熟期" => Ok(Stage::Mature),
            _ => Err(ValidationError::UnknownStage(s.to_string())),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Business category, used to pick the average order value benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    FastFood,
    Drink,
    Bbq,
    LightFood,
    Other,
}

impl Category {
    /// Parse a category label; anything unrecognised is `Other`
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "fast_food" | "fast-food" | "fastfood" | "快餐简餐" | "中式快餐" => Category::FastFood,
            "drink" | "drinks" | "饮品甜点" => Category::Drink,
            "bbq" | "烧烤夜宵" => Category::Bbq,
            "light_food" | "light-food" | "轻食沙拉" => Category::LightFood,
            _ => Category::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::FastFood => "fast_food",
            Category::Drink => "drink",
            Category::Bbq => "bbq",
            Category::LightFood => "light_food",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
