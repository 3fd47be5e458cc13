//! Shop input records
//!
//! `ShopInput` is the loosely typed JSON shape a caller hands in. Every field
//! is optional at the serde level so validation can report exactly which one
//! is missing instead of a generic parse error. `validate` is the only way to
//! obtain `RawMetrics` from external data.

use serde::{Deserialize, Serialize};

use crate::data_model::{RawMetrics, ShopProfile};
use crate::error::{InputError, ValidationError};
use crate::metric::{Category, Stage};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopInput {
    #[serde(alias = "shop_name")]
    pub name: Option<String>,
    pub platform: Option<String>,
    pub category: Option<String>,
    pub stage: Option<String>,
    pub business_district: Option<String>,

    #[serde(alias = "exposure_uv")]
    pub impressions: Option<f64>,
    #[serde(alias = "visit_uv")]
    pub visits: Option<f64>,
    #[serde(alias = "order_uv")]
    pub order_intents: Option<f64>,
    #[serde(alias = "promotion_cost")]
    pub promotion_spend: Option<f64>,

    #[serde(alias = "valid_orders")]
    pub order_count: Option<f64>,
    #[serde(alias = "cancel_orders")]
    pub cancel_count: Option<f64>,
    pub revenue: Option<f64>,
    #[serde(alias = "actual_revenue")]
    pub net_revenue: Option<f64>,

    #[serde(alias = "good_reviews")]
    pub positive_reviews: Option<f64>,
    #[serde(alias = "bad_reviews")]
    pub negative_reviews: Option<f64>,
    pub complaints: Option<f64>,
    #[serde(alias = "bad_review_replied")]
    pub replied_negative: Option<f64>,
    pub rating: Option<f64>,

    #[serde(alias = "cook_time")]
    pub prep_time_minutes: Option<f64>,
    #[serde(alias = "ontime_rate")]
    pub on_time_rate: Option<f64>,
    pub refund_rate: Option<f64>,

    pub new_customer_rate: Option<f64>,
    pub repurchase_rate: Option<f64>,
}

fn required_text(value: &Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value {
        None => Err(ValidationError::MissingField(field)),
        Some(s) if s.trim().is_empty() => Err(ValidationError::EmptyField(field)),
        Some(s) => Ok(s.trim().to_string()),
    }
}

fn bounded(value: f64, field: &'static str, max: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min: 0.0,
            max,
        });
    }
    Ok(value)
}

fn required_number(
    value: Option<f64>,
    field: &'static str,
    max: f64,
) -> Result<f64, ValidationError> {
    let v = value.ok_or(ValidationError::MissingField(field))?;
    bounded(v, field, max)
}

fn optional_number(
    value: Option<f64>,
    field: &'static str,
    max: f64,
) -> Result<Option<f64>, ValidationError> {
    value.map(|v| bounded(v, field, max)).transpose()
}

const PERCENT: f64 = 100.0;
const STARS: f64 = 5.0;
const UNBOUNDED: f64 = f64::MAX;

impl ShopInput {
    /// Check the record and convert it to sanitized `RawMetrics`
    ///
    /// Identity fields are never defaulted. Negative counters are clamped to
    /// zero; values above their natural maximum are rejected.
    pub fn validate(&self) -> Result<RawMetrics, ValidationError> {
        let profile = ShopProfile {
            name: required_text(&self.name, "name")?,
            platform: required_text(&self.platform, "platform")?,
            category: Category::from_label(&required_text(&self.category, "category")?),
            stage: required_text(&self.stage, "stage")?.parse::<Stage>()?,
            business_district: self
                .business_district
                .as_ref()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        };

        let raw = RawMetrics {
            profile,
            impressions: required_number(self.impressions, "impressions", UNBOUNDED)?,
            visits: required_number(self.visits, "visits", UNBOUNDED)?,
            order_intents: required_number(self.order_intents, "order_intents", UNBOUNDED)?,
            promotion_spend: required_number(self.promotion_spend, "promotion_spend", UNBOUNDED)?,
            order_count: required_number(self.order_count, "order_count", UNBOUNDED)?,
            cancel_count: required_number(self.cancel_count, "cancel_count", UNBOUNDED)?,
            revenue: required_number(self.revenue, "revenue", UNBOUNDED)?,
            net_revenue: required_number(self.net_revenue, "net_revenue", UNBOUNDED)?,
            positive_reviews: required_number(
                self.positive_reviews,
                "positive_reviews",
                UNBOUNDED,
            )?,
            negative_reviews: required_number(
                self.negative_reviews,
                "negative_reviews",
                UNBOUNDED,
            )?,
            complaints: required_number(self.complaints, "complaints", UNBOUNDED)?,
            replied_negative: required_number(
                self.replied_negative,
                "replied_negative",
                UNBOUNDED,
            )?,
            rating: required_number(self.rating, "rating", STARS)?,
            prep_time_minutes: required_number(
                self.prep_time_minutes,
                "prep_time_minutes",
                UNBOUNDED,
            )?,
            on_time_rate: required_number(self.on_time_rate, "on_time_rate", PERCENT)?,
            refund_rate: required_number(self.refund_rate, "refund_rate", PERCENT)?,
            new_customer_rate: optional_number(
                self.new_customer_rate,
                "new_customer_rate",
                PERCENT,
            )?,
            repurchase_rate: optional_number(self.repurchase_rate, "repurchase_rate", PERCENT)?,
        };

        Ok(raw.sanitized())
    }

    pub fn from_json(json: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<&RawMetrics> for ShopInput {
    fn from(raw: &RawMetrics) -> Self {
        Self {
            name: Some(raw.profile.name.clone()),
            platform: Some(raw.profile.platform.clone()),
            category: Some(raw.profile.category.as_str().to_string()),
            stage: Some(raw.profile.stage.as_str().to_string()),
            business_district: raw.profile.business_district.clone(),
            impressions: Some(raw.impressions),
            visits: Some(raw.visits),
            order_intents: Some(raw.order_intents),
            promotion_spend: Some(raw.promotion_spend),
            order_count: Some(raw.order_count),
            cancel_count: Some(raw.cancel_count),
            revenue: Some(raw.revenue),
            net_revenue: Some(raw.net_revenue),
            positive_reviews: Some(raw.positive_reviews),
            negative_reviews: Some(raw.negative_reviews),
            complaints: Some(raw.complaints),
            replied_negative: Some(raw.replied_negative),
            rating: Some(raw.rating),
            prep_time_minutes: Some(raw.prep_time_minutes),
            on_time_rate: Some(raw.on_time_rate),
            refund_rate: Some(raw.refund_rate),
            new_customer_rate: raw.new_customer_rate,
            repurchase_rate: raw.repurchase_rate,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<ShopInput>),
    One(Box<ShopInput>),
}

/// Parse a JSON document holding one shop object or an array of them
///
/// Fails on the first invalid record, naming its index.
pub fn parse_records(json: &str) -> Result<Vec<RawMetrics>, InputError> {
    let inputs = match serde_json::from_str::<OneOrMany>(json)? {
        OneOrMany::Many(list) => list,
        OneOrMany::One(one) => vec![*one],
    };

    inputs
        .iter()
        .enumerate()
        .map(|(index, input)| {
            input
                .validate()
                .map_err(|source| InputError::Record { index, source })
        })
        .collect()
}

/// Built-in demo shop: a growing fast-food kitchen with slow prep and weak
/// conversion
pub fn demo_shop() -> RawMetrics {
    RawMetrics {
        profile: ShopProfile {
            name: "Demo Braised Chicken Rice".to_string(),
            platform: "meituan".to_string(),
            category: Category::FastFood,
            stage: Stage::Growth,
            business_district: Some("University district".to_string()),
        },
        impressions: 3850.0,
        visits: 277.0,
        order_intents: 32.0,
        promotion_spend: 120.0,
        order_count: 30.0,
        cancel_count: 2.0,
        revenue: 960.0,
        net_revenue: 820.0,
        positive_reviews: 180.0,
        negative_reviews: 20.0,
        complaints: 3.0,
        replied_negative: 12.0,
        rating: 4.5,
        prep_time_minutes: 24.0,
        on_time_rate: 91.0,
        refund_rate: 3.0,
        new_customer_rate: None,
        repurchase_rate: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_input() -> ShopInput {
        ShopInput::from(&demo_shop())
    }

    #[test]
    fn test_validate_roundtrips_demo() {
        let raw = full_input().validate().unwrap();
        assert_eq!(raw, demo_shop());
    }

    #[test]
    fn test_missing_identity_is_reported() {
        let mut input = full_input();
        input.name = None;
        assert_eq!(input.validate(), Err(ValidationError::MissingField("name")));

        let mut input = full_input();
        input.platform = Some("   ".into());
        assert_eq!(input.validate(), Err(ValidationError::EmptyField("platform")));
    }

    #[test]
    fn test_unknown_stage_is_rejected() {
        let mut input = full_input();
        input.stage = Some("startup".into());
        assert!(matches!(input.validate(), Err(ValidationError::UnknownStage(_))));
    }

    #[test]
    fn test_missing_counter_is_reported() {
        let mut input = full_input();
        input.revenue = None;
        assert_eq!(input.validate(), Err(ValidationError::MissingField("revenue")));
    }

    #[test]
    fn test_out_of_range() {
        let mut input = full_input();
        input.rating = Some(5.5);
        assert!(matches!(
            input.validate(),
            Err(ValidationError::OutOfRange { field: "rating", .. })
        ));

        let mut input = full_input();
        input.on_time_rate = Some(f64::NAN);
        assert_eq!(
            input.validate(),
            Err(ValidationError::NotFinite { field: "on_time_rate" })
        );
    }

    #[test]
    fn test_negative_counters_are_clamped() {
        let mut input = full_input();
        input.cancel_count = Some(-4.0);
        let raw = input.validate().unwrap();
        assert_eq!(raw.cancel_count, 0.0);
    }

    #[test]
    fn test_aliases_accepted() {
        let json = r#"{
            "name": "Alias Noodles", "platform": "eleme", "category": "快餐简餐",
            "stage": "成长期", "exposure_uv": 1000, "visit_uv": 100, "order_uv": 20,
            "promotion_cost": 50, "order_count": 18, "cancel_count": 1,
            "revenue": 500, "actual_revenue": 420, "positive_reviews": 40,
            "negative_reviews": 2, "complaints": 0, "replied_negative": 2,
            "rating": 4.7, "cook_time": 14, "ontime_rate": 97, "refund_rate": 1.2
        }"#;
        let raw = ShopInput::from_json(json).unwrap().validate().unwrap();
        assert_eq!(raw.impressions, 1000.0);
        assert_eq!(raw.net_revenue, 420.0);
        assert_eq!(raw.prep_time_minutes, 14.0);
        assert_eq!(raw.profile.stage, Stage::Growth);
        assert_eq!(raw.profile.category, Category::FastFood);
    }

    #[test]
    fn test_parse_records_object_and_array() {
        let one = serde_json::to_string(&full_input()).unwrap();
        assert_eq!(parse_records(&one).unwrap().len(), 1);

        let many = format!("[{one},{one}]");
        assert_eq!(parse_records(&many).unwrap().len(), 2);
    }

    #[test]
    fn test_parse_records_names_bad_index() {
        let good = serde_json::to_string(&full_input()).unwrap();
        let mut bad = full_input();
        bad.stage = None;
        let bad = serde_json::to_string(&bad).unwrap();

        let err = parse_records(&format!("[{good},{bad}]")).unwrap_err();
        assert!(matches!(err, InputError::Record { index: 1, .. }));
    }

    #[test]
    fn test_parse_records_malformed_json() {
        assert!(matches!(parse_records("{ not json"), Err(InputError::Parse(_))));
    }
}
