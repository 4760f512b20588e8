//! Timing window calculation
//!
//! A rule's base window is offset from a reference time, then shifted by
//! whichever weather adjustments fire, in adjustment-list order. The order
//! of the resulting rationale tags is part of the contract: it is what a
//! display surface shows as "why this window".

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, TimeZone, Utc};
use leafline_core::playbook::{AdjustmentFeature, PlaybookRule, RuleWeatherAdjustment};
use leafline_core::weather::WeatherFeatures;

/// The operating region's civil timezone
pub const LOCAL_TIMEZONE: &str = "America/Los_Angeles";

/// Tag appended when no adjustment fired
pub const STANDARD_TIMING_TAG: &str = "standard_timing";

/// A start/end pair in UTC, before local rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Offset the reference time by the rule's base window hours.
/// Offsets may be negative.
pub fn base_window(rule: &PlaybookRule, reference_time: DateTime<Utc>) -> WindowBounds {
    let base = &rule.timing.base_window_hours;
    WindowBounds {
        start: reference_time + Duration::hours(base.start_offset_hours),
        end: reference_time + Duration::hours(base.end_offset_hours),
    }
}

/// Apply the rule's weather adjustments in order, collecting a rationale
/// tag per firing adjustment. Start and end shift independently.
pub fn adjust_for_weather(
    window: WindowBounds,
    rule: &PlaybookRule,
    weather: &WeatherFeatures,
) -> (WindowBounds, Vec<String>) {
    let mut adjusted = window;
    let mut rationale = Vec::new();

    for adjustment in &rule.timing.weather_adjustments {
        if adjustment_fires(adjustment, weather) {
            adjusted.start += Duration::minutes(adjustment.shift_start_minutes);
            adjusted.end += Duration::minutes(adjustment.shift_end_minutes);
            rationale.push(adjustment.rationale_tag.clone());
        }
    }

    if rationale.is_empty() {
        rationale.push(STANDARD_TIMING_TAG.to_string());
    }

    (adjusted, rationale)
}

/// Evaluate an adjustment predicate against a weather snapshot.
///
/// Boolean and enum features match their condition string exactly; score
/// features compare against a `"< x"` / `"> x"` threshold. A condition
/// that parses as neither never fires.
pub fn adjustment_fires(adjustment: &RuleWeatherAdjustment, weather: &WeatherFeatures) -> bool {
    match adjustment.feature {
        AdjustmentFeature::InversionPresent => {
            let observed = if weather.inversion_present { "true" } else { "false" };
            adjustment.condition == observed
        }
        AdjustmentFeature::HumidityLayering => {
            adjustment.condition == weather.humidity_layering.as_str()
        }
        AdjustmentFeature::WindShearProxy => {
            adjustment.condition == weather.wind_shear_proxy.as_str()
        }
        AdjustmentFeature::SprayWindowScore => {
            threshold_met(adjustment, weather.spray_window_score)
        }
        AdjustmentFeature::DiseaseRiskScore => {
            threshold_met(adjustment, weather.disease_risk_score)
        }
        AdjustmentFeature::HeatStressScore => threshold_met(adjustment, weather.heat_stress_score),
    }
}

enum Threshold {
    Below(f64),
    Above(f64),
}

fn threshold_met(adjustment: &RuleWeatherAdjustment, score: f64) -> bool {
    match parse_threshold(&adjustment.condition) {
        Some(Threshold::Below(limit)) => score < limit,
        Some(Threshold::Above(limit)) => score > limit,
        None => {
            tracing::warn!(
                condition = %adjustment.condition,
                tag = %adjustment.rationale_tag,
                "unparseable score condition, adjustment will not fire"
            );
            false
        }
    }
}

fn parse_threshold(condition: &str) -> Option<Threshold> {
    let trimmed = condition.trim();
    if let Some(rest) = trimmed.strip_prefix('<') {
        rest.trim().parse().ok().map(Threshold::Below)
    } else if let Some(rest) = trimmed.strip_prefix('>') {
        rest.trim().parse().ok().map(Threshold::Above)
    } else {
        None
    }
}

/// Render a UTC instant in the operating region's civil time, with the
/// correct standard/daylight offset for that date.
pub fn to_local(at: DateTime<Utc>) -> DateTime<FixedOffset> {
    at.with_timezone(&pacific_offset(at))
}

/// UTC-8 in standard time, UTC-7 while daylight saving is in effect.
pub fn pacific_offset(at: DateTime<Utc>) -> FixedOffset {
    const PDT_SECS: i32 = -7 * 3600;
    const PST_SECS: i32 = -8 * 3600;

    let (dst_start, dst_end) = dst_bounds(at.year());
    let seconds = if at >= dst_start && at < dst_end {
        PDT_SECS
    } else {
        PST_SECS
    };
    FixedOffset::east_opt(seconds).expect("offset is within +/-24h")
}

// Daylight saving runs from 02:00 local on the second Sunday of March
// (10:00 UTC) through 02:00 local on the first Sunday of November
// (09:00 UTC).
fn dst_bounds(year: i32) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = utc_at(year, 3, nth_sunday(year, 3, 2), 10);
    let end = utc_at(year, 11, nth_sunday(year, 11, 1), 9);
    (start, end)
}

fn utc_at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .expect("transition instant is a valid date")
}

fn nth_sunday(year: i32, month: u32, n: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("month start is a valid date");
    let to_first_sunday = (7 - first.weekday().num_days_from_sunday()) % 7;
    1 + to_first_sunday + 7 * (n - 1)
}
