//! Versioned response playbooks
//!
//! A playbook maps issues to response rules for a crop/region. Exactly one
//! version of a playbook is active at a time; every successful patch
//! produces a new version and the old ones stay queryable for audit.

use crate::observation::{Issue, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Crop {
    Grape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    YoloCountyCa,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Spray,
    Irrigate,
    Monitor,
}

/// Weather feature an adjustment predicate reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdjustmentFeature {
    InversionPresent,
    HumidityLayering,
    WindShearProxy,
    SprayWindowScore,
    DiseaseRiskScore,
    HeatStressScore,
}

/// Base recommendation window, as offsets from a reference time.
/// Either offset may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseWindowHours {
    pub start_offset_hours: i64,
    pub end_offset_hours: i64,
}

/// A conditional shift of the timing window.
///
/// `condition` is matched against the named feature: `"true"`/`"false"`
/// for booleans, the class name for enums, or a `"< x"` / `"> x"`
/// threshold for scores. Shifts apply independently to start and end.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleWeatherAdjustment {
    pub feature: AdjustmentFeature,
    pub condition: String,
    pub shift_start_minutes: i64,
    pub shift_end_minutes: i64,
    pub rationale_tag: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleTiming {
    pub base_window_hours: BaseWindowHours,
    /// Evaluated in order; order is part of the contract
    pub weather_adjustments: Vec<RuleWeatherAdjustment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleAction {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub instructions: String,
}

/// Numeric/boolean limits a rule operates under
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConstraints {
    pub max_wind_kph: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avoid_inversion: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_relative_humidity_pct: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_hours_without_rain: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_temperature_c: Option<f64>,

    /// Local clock window for irrigation actions, e.g. "04:30-07:00"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub irrigation_window_local: Option<String>,
}

/// An issue-specific response template
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybookRule {
    pub rule_id: String,
    pub issue: Issue,
    pub severity: Severity,
    pub constraints: RuleConstraints,
    pub action: RuleAction,
    pub timing: RuleTiming,
    /// The exhaustive allowlist of sub-paths a patch may target.
    /// Nothing outside this list is ever mutated by a patch.
    pub editable_paths: Vec<String>,
}

/// A versioned, named set of response rules for a crop/region
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playbook {
    pub playbook_id: String,
    pub crop: Crop,
    pub region: Region,
    /// Monotonic, starts at 1. Bumped only by successful patch application.
    pub version: u32,
    pub updated_at: DateTime<Utc>,
    pub rules: BTreeMap<String, PlaybookRule>,
}

impl Playbook {
    pub fn rule(&self, key: &str) -> Option<&PlaybookRule> {
        self.rules.get(key)
    }

    /// Every editable path across all rules, in rule-key order.
    pub fn editable_paths(&self) -> Vec<&str> {
        self.rules
            .values()
            .flat_map(|r| r.editable_paths.iter().map(String::as_str))
            .collect()
    }
}
