//! Metrics Calculator
//!
//! Turns raw counters into the ratios the catalog scores. Pure and total:
//! every zero denominator has a defined result, nothing here can fail.

use shopdx_core::{DerivedMetrics, RawMetrics};

/// Food cost plus platform commission as a share of revenue
///
/// Used to approximate margin; it is not a ledger figure.
pub const BASE_COST_RATIO: f64 = 0.55;

/// Complaints are a 30-day total while orders are a daily average
pub const COMPLAINT_WINDOW_DAYS: f64 = 30.0;

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 && numerator.is_finite() && denominator.is_finite() {
        (numerator / denominator).max(0.0)
    } else {
        0.0
    }
}

fn fraction(percent: f64) -> f64 {
    if percent.is_finite() {
        percent.max(0.0) / 100.0
    } else {
        0.0
    }
}

pub fn calculate(raw: &RawMetrics) -> DerivedMetrics {
    let total_reviews = raw.positive_reviews + raw.negative_reviews;

    let cancellation_rate = if raw.order_count > 0.0 {
        ratio(raw.cancel_count, raw.order_count + raw.cancel_count)
    } else {
        0.0
    };

    let (positive_rate, negative_rate) = if total_reviews > 0.0 {
        (
            ratio(raw.positive_reviews, total_reviews),
            ratio(raw.negative_reviews, total_reviews),
        )
    } else {
        (1.0, 0.0)
    };

    let negative_reply_rate = if raw.negative_reviews > 0.0 {
        ratio(raw.replied_negative, raw.negative_reviews).min(1.0)
    } else {
        1.0
    };

    let estimated_profit_margin = if raw.revenue > 0.0 {
        (1.0 - BASE_COST_RATIO - ratio(raw.promotion_spend, raw.revenue)).max(0.0)
    } else {
        0.0
    };

    DerivedMetrics {
        impressions: raw.impressions,
        order_volume: raw.order_count,
        visit_conversion_rate: ratio(raw.visits, raw.impressions),
        order_conversion_rate: ratio(raw.order_intents, raw.visits),
        overall_conversion_rate: ratio(raw.order_intents, raw.impressions),
        exposure_cost_per_visitor: ratio(raw.promotion_spend, raw.impressions),
        average_order_value: ratio(raw.revenue, raw.order_count),
        net_average_order_value: ratio(raw.net_revenue, raw.order_count),
        cancellation_rate,
        total_reviews,
        positive_rate,
        negative_rate,
        complaint_rate: ratio(raw.complaints, raw.order_count * COMPLAINT_WINDOW_DAYS),
        negative_reply_rate,
        estimated_profit_margin,
        rating: raw.rating,
        prep_time: raw.prep_time_minutes,
        on_time_rate: fraction(raw.on_time_rate),
        refund_rate: fraction(raw.refund_rate),
        new_customer_rate: raw.new_customer_rate.map(fraction),
        repurchase_rate: raw.repurchase_rate.map(fraction),
    }
}
