//! Recommendation builder
//!
//! Composes rule selection, timing, and risk evaluation into an immutable
//! `Recommendation`. Pure apart from stamping the generation time;
//! persisting the result is the caller's job.

use crate::risk::evaluate_risk;
use crate::select::select_rule;
use crate::timing::{adjust_for_weather, base_window, to_local, LOCAL_TIMEZONE};
use chrono::{DateTime, Duration, Utc};
use leafline_core::observation::Observation;
use leafline_core::playbook::Playbook;
use leafline_core::recommendation::{
    Recommendation, RecommendationStatus, RiskFlag, TimingWindow,
};
use leafline_core::weather::WeatherFeatures;

/// Fallback action when the playbook has no rule for the issue
pub const MONITOR_ACTION: &str = "Monitor affected area and reassess in 24 hours.";

/// Rationale tag on the fallback recommendation
pub const FALLBACK_RATIONALE_TAG: &str = "no_matching_playbook_rule";

const FALLBACK_START_OFFSET_HOURS: i64 = 8;
const FALLBACK_END_OFFSET_HOURS: i64 = 12;
const FALLBACK_CONFIDENCE: f64 = 0.6;

/// Build a recommendation for a confirmed observation against the active
/// playbook version and a weather snapshot.
///
/// An issue with no configured rule yields the monitor fallback, never an
/// error. Recommendations always require confirmation; they are never
/// auto-applied.
pub fn generate_recommendation(
    observation: &Observation,
    playbook: &Playbook,
    weather: &WeatherFeatures,
    recommendation_id: impl Into<String>,
    reference_time: DateTime<Utc>,
) -> Recommendation {
    let recommendation_id = recommendation_id.into();
    let issue = observation.extraction.issue;
    let severity = observation.extraction.severity;

    let Some(rule) = select_rule(playbook, issue, severity) else {
        tracing::info!(
            issue = ?issue,
            playbook = %playbook.playbook_id,
            "no matching rule, falling back to monitor recommendation"
        );
        return monitor_fallback(observation, playbook, weather, recommendation_id, reference_time);
    };

    let (window, rationale) = adjust_for_weather(base_window(rule, reference_time), rule, weather);
    let risk = evaluate_risk(rule, weather);

    Recommendation {
        recommendation_id,
        observation_id: observation.observation_id.clone(),
        playbook_id: playbook.playbook_id.clone(),
        playbook_version: playbook.version,
        weather_features_id: weather.weather_features_id.clone(),
        generated_at: Utc::now(),
        issue,
        severity,
        action: rule.action.instructions.clone(),
        rationale,
        timing_window: TimingWindow {
            start_at: to_local(window.start),
            end_at: to_local(window.end),
            local_timezone: LOCAL_TIMEZONE.to_string(),
            confidence: risk.confidence,
            drivers: risk.drivers,
        },
        risk_flags: risk.flags,
        required_confirmation: true,
        status: RecommendationStatus::PendingConfirmation,
    }
}

fn monitor_fallback(
    observation: &Observation,
    playbook: &Playbook,
    weather: &WeatherFeatures,
    recommendation_id: String,
    reference_time: DateTime<Utc>,
) -> Recommendation {
    Recommendation {
        recommendation_id,
        observation_id: observation.observation_id.clone(),
        playbook_id: playbook.playbook_id.clone(),
        playbook_version: playbook.version,
        weather_features_id: weather.weather_features_id.clone(),
        generated_at: Utc::now(),
        issue: observation.extraction.issue,
        severity: observation.extraction.severity,
        action: MONITOR_ACTION.to_string(),
        rationale: vec![FALLBACK_RATIONALE_TAG.to_string()],
        timing_window: TimingWindow {
            start_at: to_local(reference_time + Duration::hours(FALLBACK_START_OFFSET_HOURS)),
            end_at: to_local(reference_time + Duration::hours(FALLBACK_END_OFFSET_HOURS)),
            local_timezone: LOCAL_TIMEZONE.to_string(),
            confidence: FALLBACK_CONFIDENCE,
            drivers: vec!["noMatchingPlaybookRule=true".to_string()],
        },
        risk_flags: vec![RiskFlag::ManualReviewRequired],
        required_confirmation: true,
        status: RecommendationStatus::PendingConfirmation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leafline_core::fixtures::{demo_observation, demo_playbook, demo_weather_features};
    use leafline_core::observation::Issue;
    use leafline_core::weather::WindShearProxy;

    fn reference_time() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-02-11T19:00:00-08:00")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn canonical() -> Recommendation {
        generate_recommendation(
            &demo_observation(),
            &demo_playbook(),
            &demo_weather_features(),
            "rec_20260211_0001",
            reference_time(),
        )
    }

    #[test]
    fn test_canonical_identity_fields() {
        let rec = canonical();
        assert_eq!(rec.recommendation_id, "rec_20260211_0001");
        assert_eq!(rec.observation_id, "obs_20260211_0001");
        assert_eq!(rec.playbook_id, "pbk_yolo_grape");
        assert_eq!(rec.playbook_version, 3);
        assert_eq!(rec.weather_features_id, "wxf_20260211_demo_01");
        assert_eq!(rec.issue, Issue::PowderyMildew);
        assert_eq!(
            rec.action,
            "Apply sulfur-based contact spray in affected block."
        );
        assert!(rec.required_confirmation);
        assert_eq!(rec.status, RecommendationStatus::PendingConfirmation);
    }

    #[test]
    fn test_canonical_timing_window() {
        let rec = canonical();
        let start = rec.timing_window.start_at.to_rfc3339();
        let end = rec.timing_window.end_at.to_rfc3339();

        // Base +2h..+6h, humidity adjustment pulls the end in by 90 minutes
        assert_eq!(start, "2026-02-11T21:00:00-08:00");
        assert_eq!(end, "2026-02-11T23:30:00-08:00");
        assert_eq!(rec.timing_window.local_timezone, "America/Los_Angeles");
    }

    #[test]
    fn test_canonical_rationale() {
        let rec = canonical();
        assert!(rec.rationale.contains(&"high_humidity_persistence".to_string()));
        assert!(!rec.rationale.contains(&"avoid_inversion".to_string()));
    }

    #[test]
    fn test_canonical_confidence_and_flags() {
        let rec = canonical();
        assert!((rec.timing_window.confidence - 0.85).abs() < 1e-9);
        assert!(rec.risk_flags.is_empty());
    }

    #[test]
    fn test_canonical_drivers() {
        let rec = canonical();
        assert_eq!(
            rec.timing_window.drivers,
            vec![
                "inversionPresent=false".to_string(),
                "humidityLayering=uniform_humid".to_string(),
                "windShearProxy=moderate".to_string(),
                "maxWindKph=12".to_string(),
            ]
        );
    }

    #[test]
    fn test_high_shear_flags_and_rationale() {
        let mut weather = demo_weather_features();
        weather.wind_shear_proxy = WindShearProxy::High;

        let rec = generate_recommendation(
            &demo_observation(),
            &demo_playbook(),
            &weather,
            "rec_test_001",
            reference_time(),
        );

        assert!(rec.risk_flags.contains(&RiskFlag::HighDriftRisk));
        assert!(rec.rationale.contains(&"spray_drift_risk".to_string()));
    }

    #[test]
    fn test_low_spray_score_flags_low_confidence() {
        let mut weather = demo_weather_features();
        weather.spray_window_score = 0.3;

        let rec = generate_recommendation(
            &demo_observation(),
            &demo_playbook(),
            &weather,
            "rec_test_002",
            reference_time(),
        );

        assert!(rec.risk_flags.contains(&RiskFlag::LowConfidence));
    }

    #[test]
    fn test_unknown_issue_yields_monitor_fallback() {
        let mut observation = demo_observation();
        observation.extraction.issue = Issue::Other;

        let rec = generate_recommendation(
            &observation,
            &demo_playbook(),
            &demo_weather_features(),
            "rec_test_003",
            reference_time(),
        );

        assert_eq!(rec.action, MONITOR_ACTION);
        assert_eq!(rec.risk_flags, vec![RiskFlag::ManualReviewRequired]);
        assert_eq!(rec.rationale, vec![FALLBACK_RATIONALE_TAG.to_string()]);
        assert!((rec.timing_window.confidence - 0.6).abs() < 1e-9);
        assert_eq!(
            rec.timing_window.start_at.to_rfc3339(),
            "2026-02-12T03:00:00-08:00"
        );
        assert_eq!(
            rec.timing_window.end_at.to_rfc3339(),
            "2026-02-12T07:00:00-08:00"
        );
        assert_eq!(
            rec.timing_window.drivers,
            vec!["noMatchingPlaybookRule=true".to_string()]
        );
    }
}
