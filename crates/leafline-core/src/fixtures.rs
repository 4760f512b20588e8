//! Canonical demo records
//!
//! The Yolo County grape playbook at version 3, the Block 7 powdery-mildew
//! observation, a typical evening weather profile, and the "tighten wind
//! limit" patch. These seed the demo store and anchor the deterministic
//! engine tests.

use crate::observation::*;
use crate::patch::*;
use crate::playbook::*;
use crate::recommendation::*;
use crate::weather::*;
use chrono::{DateTime, FixedOffset, Utc};
use once_cell::sync::Lazy;
use serde_json::json;
use std::collections::BTreeMap;

fn ts(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("fixture timestamp is valid RFC 3339")
        .with_timezone(&Utc)
}

fn local_ts(rfc3339: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(rfc3339).expect("fixture timestamp is valid RFC 3339")
}

static DEMO_PLAYBOOK: Lazy<Playbook> = Lazy::new(|| {
    let pm_rule = PlaybookRule {
        rule_id: "rule_pm_moderate".to_string(),
        issue: Issue::PowderyMildew,
        severity: Severity::Moderate,
        constraints: RuleConstraints {
            max_wind_kph: 12.0,
            avoid_inversion: Some(true),
            max_relative_humidity_pct: Some(85.0),
            min_hours_without_rain: Some(4),
            max_temperature_c: None,
            irrigation_window_local: None,
        },
        action: RuleAction {
            action_type: ActionType::Spray,
            instructions: "Apply sulfur-based contact spray in affected block.".to_string(),
        },
        timing: RuleTiming {
            base_window_hours: BaseWindowHours {
                start_offset_hours: 2,
                end_offset_hours: 6,
            },
            weather_adjustments: vec![
                RuleWeatherAdjustment {
                    feature: AdjustmentFeature::InversionPresent,
                    condition: "true".to_string(),
                    shift_start_minutes: 120,
                    shift_end_minutes: -60,
                    rationale_tag: "avoid_inversion".to_string(),
                },
                RuleWeatherAdjustment {
                    feature: AdjustmentFeature::HumidityLayering,
                    condition: "uniform_humid".to_string(),
                    shift_start_minutes: 0,
                    shift_end_minutes: -90,
                    rationale_tag: "high_humidity_persistence".to_string(),
                },
                RuleWeatherAdjustment {
                    feature: AdjustmentFeature::WindShearProxy,
                    condition: "high".to_string(),
                    shift_start_minutes: 0,
                    shift_end_minutes: -60,
                    rationale_tag: "spray_drift_risk".to_string(),
                },
            ],
        },
        editable_paths: vec![
            "/rules/rule_pm_moderate/constraints/maxWindKph".to_string(),
            "/rules/rule_pm_moderate/action/instructions".to_string(),
            "/rules/rule_pm_moderate/timing/baseWindowHours".to_string(),
        ],
    };

    let heat_rule = PlaybookRule {
        rule_id: "rule_heat_moderate".to_string(),
        issue: Issue::HeatStress,
        severity: Severity::Moderate,
        constraints: RuleConstraints {
            max_wind_kph: 15.0,
            avoid_inversion: None,
            max_relative_humidity_pct: None,
            min_hours_without_rain: None,
            max_temperature_c: Some(35.0),
            irrigation_window_local: Some("04:30-07:00".to_string()),
        },
        action: RuleAction {
            action_type: ActionType::Irrigate,
            instructions: "Schedule short-cycle irrigation and canopy cooling check.".to_string(),
        },
        timing: RuleTiming {
            base_window_hours: BaseWindowHours {
                start_offset_hours: 10,
                end_offset_hours: 14,
            },
            weather_adjustments: vec![RuleWeatherAdjustment {
                feature: AdjustmentFeature::HeatStressScore,
                condition: "> 0.7".to_string(),
                shift_start_minutes: -60,
                shift_end_minutes: 0,
                rationale_tag: "high_heat_stress".to_string(),
            }],
        },
        editable_paths: vec![
            "/rules/rule_heat_moderate/constraints/maxWindKph".to_string(),
            "/rules/rule_heat_moderate/constraints/maxTemperatureC".to_string(),
            "/rules/rule_heat_moderate/action/instructions".to_string(),
        ],
    };

    let mut rules = BTreeMap::new();
    rules.insert("rule_pm_moderate".to_string(), pm_rule);
    rules.insert("rule_heat_moderate".to_string(), heat_rule);

    Playbook {
        playbook_id: "pbk_yolo_grape".to_string(),
        crop: Crop::Grape,
        region: Region::YoloCountyCa,
        version: 3,
        updated_at: ts("2026-02-10T08:00:00Z"),
        rules,
    }
});

static DEMO_OBSERVATION: Lazy<Observation> = Lazy::new(|| {
    let note = "Block 7 Chardonnay. I see white powder on upper leaf surfaces, \
                moderate spread after two warm days. Leaves are dry right now, \
                slight musty odor, wind feels light. Log this and give me a \
                spray window tonight.";

    Observation {
        observation_id: "obs_20260211_0001".to_string(),
        device_id: "dev_ios_001".to_string(),
        created_at: ts("2026-02-11T10:30:00-08:00"),
        capture_mode: CaptureMode::Voice,
        raw_note_text: note.to_string(),
        transcription: ObservationTranscription {
            text: note.to_string(),
            source: TranscriptionSource::OnDeviceAsr,
            confidence: 0.93,
        },
        extraction: ObservationExtraction {
            crop: "grape".to_string(),
            variety: Some("chardonnay".to_string()),
            field_block: "Block 7".to_string(),
            issue: Issue::PowderyMildew,
            severity: Severity::Moderate,
            symptoms: vec![
                "white powder on upper leaf surfaces".to_string(),
                "slight musty odor".to_string(),
            ],
            observation_time: ts("2026-02-11T10:30:00-08:00"),
        },
        normalization: ObservationNormalization {
            temperature_c: None,
            leaf_wetness: LeafWetness::Dry,
            wind_estimate_kph: 8.0,
        },
        location: GeoPoint {
            lat: 38.2919,
            lon: -122.458,
        },
        status: ObservationStatus::Confirmed,
        schema_version: "1.0.0".to_string(),
        deterministic_checksum: "sha256:8179F83398C1".to_string(),
    }
});

static DEMO_WEATHER_FEATURES: Lazy<WeatherFeatures> = Lazy::new(|| WeatherFeatures {
    weather_features_id: "wxf_20260211_demo_01".to_string(),
    source_mode: WeatherSourceMode::Demo,
    profile_time: ts("2026-02-11T18:00:00Z"),
    location: GeoPoint {
        lat: 38.5449,
        lon: -121.7405,
    },
    inversion_present: false,
    humidity_layering: HumidityLayering::UniformHumid,
    wind_shear_proxy: WindShearProxy::Moderate,
    spray_window_score: 0.75,
    disease_risk_score: 0.65,
    heat_stress_score: 0.3,
    notes: vec![
        "Yolo County typical evening conditions".to_string(),
        "Surface wind 8 kph from NW".to_string(),
        "RH gradient 68% surface to 52% at 500m".to_string(),
        "No significant temperature inversion".to_string(),
    ],
});

static DEMO_VERTICAL_LAYERS: Lazy<Vec<VerticalLayer>> = Lazy::new(|| {
    vec![
        VerticalLayer {
            altitude_m: 0.0,
            temperature_c: 18.5,
            relative_humidity_pct: 68.0,
            wind_speed_kph: 8.0,
            wind_direction_deg: 315.0,
        },
        VerticalLayer {
            altitude_m: 100.0,
            temperature_c: 17.8,
            relative_humidity_pct: 62.0,
            wind_speed_kph: 12.0,
            wind_direction_deg: 320.0,
        },
        VerticalLayer {
            altitude_m: 300.0,
            temperature_c: 16.2,
            relative_humidity_pct: 55.0,
            wind_speed_kph: 18.0,
            wind_direction_deg: 325.0,
        },
        VerticalLayer {
            altitude_m: 500.0,
            temperature_c: 14.5,
            relative_humidity_pct: 52.0,
            wind_speed_kph: 22.0,
            wind_direction_deg: 330.0,
        },
    ]
});

static DEMO_PATCH: Lazy<PlaybookPatch> = Lazy::new(|| PlaybookPatch {
    patch_id: "pch_20260211_0001".to_string(),
    playbook_id: "pbk_yolo_grape".to_string(),
    base_version: 3,
    requested_by_device_id: "dev_ios_001".to_string(),
    requested_at: ts("2026-02-11T18:21:12Z"),
    reason: "Tighten spray wind limit for tonight".to_string(),
    operations: vec![PatchOperation {
        op: PatchOp::Replace,
        path: "/rules/rule_pm_moderate/constraints/maxWindKph".to_string(),
        value: Some(json!(10)),
        justification: Some("Local gusts are increasing".to_string()),
    }],
});

static DEMO_RECOMMENDATION: Lazy<Recommendation> = Lazy::new(|| Recommendation {
    recommendation_id: "rec_20260211_0001".to_string(),
    observation_id: "obs_20260211_0001".to_string(),
    playbook_id: "pbk_yolo_grape".to_string(),
    playbook_version: 3,
    weather_features_id: "wxf_20260211_demo_01".to_string(),
    generated_at: ts("2026-02-11T18:30:00Z"),
    issue: Issue::PowderyMildew,
    severity: Severity::Moderate,
    action: "Apply sulfur-based contact spray in affected block.".to_string(),
    rationale: vec!["high_humidity_persistence".to_string()],
    timing_window: TimingWindow {
        start_at: local_ts("2026-02-11T21:00:00-08:00"),
        end_at: local_ts("2026-02-11T23:30:00-08:00"),
        local_timezone: "America/Los_Angeles".to_string(),
        confidence: 0.85,
        drivers: vec![
            "inversionPresent=false".to_string(),
            "humidityLayering=uniform_humid".to_string(),
            "windShearProxy=moderate".to_string(),
            "maxWindKph=12".to_string(),
        ],
    },
    risk_flags: vec![],
    required_confirmation: true,
    status: RecommendationStatus::PendingConfirmation,
});

pub fn demo_playbook() -> Playbook {
    DEMO_PLAYBOOK.clone()
}

pub fn demo_observation() -> Observation {
    DEMO_OBSERVATION.clone()
}

pub fn demo_weather_features() -> WeatherFeatures {
    DEMO_WEATHER_FEATURES.clone()
}

pub fn demo_vertical_layers() -> Vec<VerticalLayer> {
    DEMO_VERTICAL_LAYERS.clone()
}

pub fn demo_patch() -> PlaybookPatch {
    DEMO_PATCH.clone()
}

pub fn demo_recommendation() -> Recommendation {
    DEMO_RECOMMENDATION.clone()
}
