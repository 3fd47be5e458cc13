//! Playbook: issue text and remedies as data
//!
//! Each scored metric maps to a title, a description template, the business
//! impact, a remedy and the effect to expect from it. Description templates
//! may use `{value}` and `{target}`, which are filled with the observed value
//! and the target formatted in the metric's unit.
//!
//! Overrides are YAML and merge field by field onto the built-in table:
//!
//! ```yaml
//! entries:
//!   prep_time:
//!     suggestion: "Pre-portion the top five dishes before the lunch rush"
//! time_estimates:
//!   major: "1 week"
//! ```

use serde::{Deserialize, Serialize};
use shopdx_core::{Dimension, MetricId, Severity};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::PlaybookError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEstimates {
    pub critical: String,
    pub major: String,
    pub minor: String,
}

impl TimeEstimates {
    pub fn for_severity(&self, severity: Severity) -> &str {
        match severity {
            Severity::Critical => &self.critical,
            Severity::Major => &self.major,
            Severity::Minor => &self.minor,
        }
    }
}

impl Default for TimeEstimates {
    fn default() -> Self {
        Self {
            critical: "1-3 days".to_string(),
            major: "1-2 weeks".to_string(),
            minor: "2-4 weeks".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybookEntry {
    pub title: String,
    /// Template, `{value}` and `{target}` are substituted
    pub description: String,
    pub impact: String,
    pub suggestion: String,
    pub expected_effect: String,
    /// Overrides the playbook-wide estimates for this metric
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_estimates: Option<TimeEstimates>,
}

impl PlaybookEntry {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            impact: String::new(),
            suggestion: String::new(),
            expected_effect: String::new(),
            time_estimates: None,
        }
    }

    pub fn with_description(mut self, template: impl Into<String>) -> Self {
        self.description = template.into();
        self
    }

    pub fn with_impact(mut self, impact: impl Into<String>) -> Self {
        self.impact = impact.into();
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = suggestion.into();
        self
    }

    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.expected_effect = effect.into();
        self
    }

    /// Entry used for a metric the playbook has no text for
    pub fn generic(metric: MetricId) -> Self {
        let label = metric.label();
        Self::new(format!("{label} needs attention"))
            .with_description(format!("{label} is {{value}} against a target of {{target}}"))
            .with_impact("Drags down the overall score of its dimension")
            .with_suggestion("Dig into the root cause and set a concrete improvement plan")
            .with_effect("Visible improvement once the root cause is fixed")
    }

    /// Description with `{value}` and `{target}` filled in
    pub fn describe(&self, value: &str, target: &str) -> String {
        self.description
            .replace("{value}", value)
            .replace("{target}", target)
    }
}

/// Generic continuous-improvement item for shops without serious issues
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralItem {
    pub title: String,
    pub description: String,
    pub expected_effect: String,
    pub time_estimate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playbook {
    pub entries: BTreeMap<MetricId, PlaybookEntry>,
    pub dimension_advice: BTreeMap<Dimension, Vec<String>>,
    pub general: Vec<GeneralItem>,
    pub time_estimates: TimeEstimates,
}

/// Partial entry from a YAML override
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct EntryPatch {
    title: Option<String>,
    description: Option<String>,
    impact: Option<String>,
    suggestion: Option<String>,
    expected_effect: Option<String>,
    time_estimates: Option<TimeEstimates>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlaybookPatch {
    #[serde(default)]
    entries: BTreeMap<MetricId, EntryPatch>,
    #[serde(default)]
    dimension_advice: BTreeMap<Dimension, Vec<String>>,
    general: Option<Vec<GeneralItem>>,
    time_estimates: Option<TimeEstimates>,
}

impl Playbook {
    /// Built-in playbook merged with a YAML override
    pub fn from_yaml(yaml: &str) -> Result<Self, PlaybookError> {
        let patch: PlaybookPatch = serde_yaml::from_str(yaml)?;
        let mut playbook = Self::builtin();

        for (metric, p) in patch.entries {
            let entry = playbook
                .entries
                .entry(metric)
                .or_insert_with(|| PlaybookEntry::generic(metric));
            if let Some(v) = p.title {
                entry.title = v;
            }
            if let Some(v) = p.description {
                entry.description = v;
            }
            if let Some(v) = p.impact {
                entry.impact = v;
            }
            if let Some(v) = p.suggestion {
                entry.suggestion = v;
            }
            if let Some(v) = p.expected_effect {
                entry.expected_effect = v;
            }
            if p.time_estimates.is_some() {
                entry.time_estimates = p.time_estimates;
            }
        }
        playbook.dimension_advice.extend(patch.dimension_advice);
        if let Some(general) = patch.general {
            playbook.general = general;
        }
        if let Some(estimates) = patch.time_estimates {
            playbook.time_estimates = estimates;
        }

        playbook.validate()?;
        Ok(playbook)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PlaybookError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| PlaybookError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    pub fn validate(&self) -> Result<(), PlaybookError> {
        match self.entries.iter().find(|(_, e)| e.title.trim().is_empty()) {
            Some((metric, _)) => Err(PlaybookError::EmptyTitle(*metric)),
            None => Ok(()),
        }
    }

    /// Entry for a metric, or the generic one
    pub fn entry(&self, metric: MetricId) -> PlaybookEntry {
        self.entries
            .get(&metric)
            .cloned()
            .unwrap_or_else(|| PlaybookEntry::generic(metric))
    }

    pub fn time_estimate(&self, metric: MetricId, severity: Severity) -> String {
        self.entries
            .get(&metric)
            .and_then(|e| e.time_estimates.as_ref())
            .unwrap_or(&self.time_estimates)
            .for_severity(severity)
            .to_string()
    }

    pub fn dimension_advice(&self, dimension: Dimension) -> &[String] {
        self.dimension_advice
            .get(&dimension)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn builtin() -> Self {
        Self {
            entries: builtin_entries(),
            dimension_advice: builtin_dimension_advice(),
            general: builtin_general(),
            time_estimates: TimeEstimates::default(),
        }
    }
}

impl Default for Playbook {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_entries() -> BTreeMap<MetricId, PlaybookEntry> {
    use MetricId::*;
    BTreeMap::from([
        (
            Impressions,
            PlaybookEntry::new("Exposure too low")
                .with_description("Only {value} daily impressions, target is {target}")
                .with_impact("Too few people ever see the shop, every later funnel step starves")
                .with_suggestion("Widen the delivery radius, join platform campaigns and schedule paid exposure at meal peaks")
                .with_effect("Daily impressions up 30-50%"),
        ),
        (
            VisitConversionRate,
            PlaybookEntry::new("Visit conversion too low")
                .with_description("Visit conversion is only {value}, well below the healthy {target}")
                .with_impact("Most exposure never turns into a visit, promotion spend is wasted")
                .with_suggestion("Refresh the shop logo and name, redo the storefront and show an attractive discount ladder up front")
                .with_effect("Visit conversion up 2-5 points, better promotion efficiency"),
        ),
        (
            ExposureCostPerVisitor,
            PlaybookEntry::new("Exposure cost too high")
                .with_description("Each exposed customer costs {value}, target is {target}")
                .with_impact("Promotion returns are low and squeeze the margin")
                .with_suggestion("Improve organic ranking factors, grow repeat customers and rely less on paid promotion")
                .with_effect("Exposure cost down 20-30%, better ROI"),
        ),
        (
            OrderVolume,
            PlaybookEntry::new("Order volume too low")
                .with_description("Only {value} orders a day, target is {target}")
                .with_impact("Fixed costs are spread over too few orders to be profitable")
                .with_suggestion("Add entry-level combos, run new-customer discounts and extend opening hours to late night")
                .with_effect("Daily orders up 20-40%"),
        ),
        (
            NewCustomerRate,
            PlaybookEntry::new("Few new customers")
                .with_description("New customers are {value} of orders, target is {target}")
                .with_impact("The customer base shrinks as regulars churn")
                .with_suggestion("Set up first-order discounts and take part in platform new-user campaigns")
                .with_effect("New customer share up 5-10 points"),
        ),
        (
            OrderConversionRate,
            PlaybookEntry::new("Order conversion below par")
                .with_description("Order conversion is {value}, below the healthy {target}")
                .with_impact("Visitors leave without ordering, dishes or prices are not competitive")
                .with_suggestion("Improve dish photos, adjust pricing, add set meals and lift the star rating")
                .with_effect("Order conversion up 3-8 points, more orders"),
        ),
        (
            OverallConversionRate,
            PlaybookEntry::new("Overall conversion inefficient")
                .with_description("Overall conversion is only {value}, target is {target}")
                .with_impact("Traffic is barely used, the shop page and menu need urgent work")
                .with_suggestion("Audit the whole shop page, find where users drop off and rework menu structure and prices")
                .with_effect("Overall conversion up by half or more"),
        ),
        (
            CancellationRate,
            PlaybookEntry::new("Cancellation rate high")
                .with_description("{value} of orders are cancelled, target is {target}")
                .with_impact("Customers cancel after ordering, likely over price or delivery problems")
                .with_suggestion("Check delivery range and timing, show all fees up front so nothing surprises at checkout")
                .with_effect("Cancellation rate below 3%"),
        ),
        (
            RepurchaseRate,
            PlaybookEntry::new("Low repurchase")
                .with_description("Only {value} of customers come back, target is {target}")
                .with_impact("Every order has to be bought with fresh promotion spend")
                .with_suggestion("Issue return coupons with every order and add a membership or stamp card")
                .with_effect("Repurchase rate up 5-10 points"),
        ),
        (
            AverageOrderValue,
            PlaybookEntry::new("Average order value below category")
                .with_description("Average order value is {value}, the category target is {target}")
                .with_impact("Each order earns little, the shop needs more volume to break even")
                .with_suggestion("Design high-value combos, tune the discount ladder and nudge customers to add items")
                .with_effect("Average order value up 10-20%"),
        ),
        (
            EstimatedProfitMargin,
            PlaybookEntry::new("Profit margin too thin")
                .with_description("Estimated margin is only {value}, target is {target}")
                .with_impact("The shop may be running at a loss, prices or costs need adjusting now")
                .with_suggestion("Restructure prices, cut ingredient cost and cap promotion spend as a share of revenue")
                .with_effect("Margin up 5-10 points"),
        ),
        (
            Rating,
            PlaybookEntry::new("Platform rating low")
                .with_description("Rating is {value}, hurting ranking and conversion (target {target})")
                .with_impact("A low rating erodes trust and cuts organic traffic")
                .with_suggestion("Invite happy customers to review, answer negative reviews fast and fix what they raise")
                .with_effect("Rating up 0.2-0.5"),
        ),
        (
            PositiveRate,
            PlaybookEntry::new("Positive review rate low")
                .with_description("Only {value} of reviews are positive, target is {target}")
                .with_impact("Few recent positive reviews make new customers hesitate")
                .with_suggestion("Add a thank-you card with a review reminder and follow up on satisfied regulars")
                .with_effect("Positive review rate up 3-5 points"),
        ),
        (
            NegativeRate,
            PlaybookEntry::new("Negative review rate too high")
                .with_description("Negative reviews are {value} of all reviews, target is {target}")
                .with_impact("Negative reviews directly hurt conversion, find their causes and fix them")
                .with_suggestion("Analyse negative review keywords and fix portions, taste or packaging; tighten kitchen quality control")
                .with_effect("Negative review rate halved"),
        ),
        (
            ComplaintRate,
            PlaybookEntry::new("Complaint rate abnormal")
                .with_description("Complaint rate is {value}, target is {target}")
                .with_impact("Complaints can trigger platform penalties and need immediate action")
                .with_suggestion("Check for food safety risks right away, inspect delivery packaging and retrain staff on service")
                .with_effect("Complaint rate back inside the safe range"),
        ),
        (
            NegativeReplyRate,
            PlaybookEntry::new("Negative reviews left unanswered")
                .with_description("Only {value} of negative reviews got a reply, target is {target}")
                .with_impact("Unanswered complaints look careless to every future customer")
                .with_suggestion("Reply to every negative review within 24 hours with an apology and a concrete fix")
                .with_effect("Reply rate above 90%, softer impact of bad reviews"),
        ),
        (
            PrepTime,
            PlaybookEntry::new("Prep time too long")
                .with_description("Average prep time is {value}, target is {target}")
                .with_impact("Slow prep causes late deliveries and more complaints")
                .with_suggestion("Streamline the kitchen flow, add staff at peaks, trim the menu and prep ingredients ahead")
                .with_effect("Prep time under 12 minutes"),
        ),
        (
            OnTimeRate,
            PlaybookEntry::new("On-time rate below standard")
                .with_description("On-time rate is only {value}, target is {target}")
                .with_impact("Late deliveries lead to negative reviews")
                .with_suggestion("Improve order dispatch, prepare ingredients earlier and coordinate closely with riders")
                .with_effect("On-time rate above 95%"),
        ),
        (
            RefundRate,
            PlaybookEntry::new("Refund rate high")
                .with_description("Refund rate is {value}, target is {target}")
                .with_impact("Frequent refunds point to stock-outs or quality problems")
                .with_suggestion("Tighten stock management and mark dishes sold out automatically so no order hits a stock-out")
                .with_effect("Refund rate below 2%"),
        ),
    ])
}

fn builtin_dimension_advice() -> BTreeMap<Dimension, Vec<String>> {
    let advice = |lines: &[&str]| lines.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    BTreeMap::from([
        (
            Dimension::Traffic,
            advice(&[
                "Put promotion budget on lunch and dinner peaks",
                "Keep the storefront, logo and hero dishes consistent and fresh",
            ]),
        ),
        (
            Dimension::Conversion,
            advice(&[
                "Review the menu page top to bottom like a first-time customer",
                "Lead with two or three best sellers and a clear discount ladder",
            ]),
        ),
        (
            Dimension::PricePoint,
            advice(&[
                "Compare combo prices with the category median",
                "Track promotion spend as a share of revenue every week",
            ]),
        ),
        (
            Dimension::Satisfaction,
            advice(&[
                "Read every negative review weekly and tag its cause",
                "Answer negative reviews within a day",
            ]),
        ),
        (
            Dimension::Efficiency,
            advice(&[
                "Measure prep time per dish at peak hours",
                "Sync stock with the menu before every shift",
            ]),
        ),
    ])
}

fn builtin_general() -> Vec<GeneralItem> {
    vec![
        GeneralItem {
            title: "Review operating data regularly".to_string(),
            description: "Go through traffic, conversion and review data once a week".to_string(),
            expected_effect: "Problems are caught early and improvement never stops".to_string(),
            time_estimate: "30 minutes a week".to_string(),
        },
        GeneralItem {
            title: "Watch competitors".to_string(),
            description: "Check the campaigns and prices of similar shops nearby".to_string(),
            expected_effect: "Stay competitive and adjust strategy in time".to_string(),
            time_estimate: "1 hour a week".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_every_metric() {
        let playbook = Playbook::builtin();
        for metric in MetricId::ALL {
            assert!(playbook.entries.contains_key(&metric), "{metric}");
        }
        for dimension in Dimension::ALL {
            assert!(!playbook.dimension_advice(dimension).is_empty());
        }
        playbook.validate().unwrap();
    }

    #[test]
    fn test_describe_fills_placeholders() {
        let entry = Playbook::builtin().entry(MetricId::PrepTime);
        assert_eq!(
            entry.describe("24.0 min", "15.0 min"),
            "Average prep time is 24.0 min, target is 15.0 min"
        );
    }

    #[test]
    fn test_generic_fallback() {
        let mut playbook = Playbook::builtin();
        playbook.entries.remove(&MetricId::RefundRate);
        let entry = playbook.entry(MetricId::RefundRate);
        assert_eq!(entry.title, "Refund rate needs attention");
        assert_eq!(
            entry.describe("3.00%", "1.00%"),
            "Refund rate is 3.00% against a target of 1.00%"
        );
    }

    #[test]
    fn test_time_estimates() {
        let playbook = Playbook::builtin();
        assert_eq!(playbook.time_estimate(MetricId::Rating, Severity::Critical), "1-3 days");
        assert_eq!(playbook.time_estimate(MetricId::Rating, Severity::Major), "1-2 weeks");
        assert_eq!(playbook.time_estimate(MetricId::Rating, Severity::Minor), "2-4 weeks");
    }

    #[test]
    fn test_yaml_override_merges() {
        let yaml = r#"
entries:
  prep_time:
    suggestion: "Pre-portion the top five dishes"
    time_estimates: { critical: "today", major: "this week", minor: "this month" }
time_estimates:
  major: "1 week"
  critical: "2 days"
  minor: "3 weeks"
dimension_advice:
  efficiency: ["Time every dish"]
"#;
        let playbook = Playbook::from_yaml(yaml).unwrap();
        let prep = playbook.entry(MetricId::PrepTime);
        assert_eq!(prep.suggestion, "Pre-portion the top five dishes");
        assert_eq!(prep.title, "Prep time too long");
        assert_eq!(playbook.time_estimate(MetricId::PrepTime, Severity::Major), "this week");
        assert_eq!(playbook.time_estimate(MetricId::Rating, Severity::Major), "1 week");
        assert_eq!(playbook.dimension_advice(Dimension::Efficiency), ["Time every dish"]);
        assert_eq!(playbook.general.len(), 2);
    }

    #[test]
    fn test_yaml_override_rejects_empty_title_and_unknown_keys() {
        assert!(matches!(
            Playbook::from_yaml("entries:\n  rating:\n    title: \"  \"\n"),
            Err(PlaybookError::EmptyTitle(MetricId::Rating))
        ));
        assert!(matches!(
            Playbook::from_yaml("entries:\n  rating:\n    colour: red\n"),
            Err(PlaybookError::Parse(_))
        ));
    }
}
