//! Field observation records
//!
//! Observations arrive from an external extraction/validation pipeline as
//! plain data. The engine only reads them; creating and confirming them is
//! a collaborator concern.

use crate::weather::GeoPoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    Voice,
    Typed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptionSource {
    OnDeviceAsr,
    ManualTyped,
    None,
}

/// The issue an observation reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Issue {
    PowderyMildew,
    HeatStress,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeafWetness {
    Dry,
    Damp,
    Wet,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObservationStatus {
    Draft,
    Confirmed,
    Logged,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationTranscription {
    pub text: String,
    pub source: TranscriptionSource,
    pub confidence: f64,
}

/// Structured fields pulled out of the raw note
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationExtraction {
    pub crop: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variety: Option<String>,
    pub field_block: String,
    pub issue: Issue,
    pub severity: Severity,
    pub symptoms: Vec<String>,
    pub observation_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationNormalization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
    pub leaf_wetness: LeafWetness,
    pub wind_estimate_kph: f64,
}

/// A confirmed field note, structured
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub observation_id: String,
    pub device_id: String,
    pub created_at: DateTime<Utc>,
    pub capture_mode: CaptureMode,
    pub raw_note_text: String,
    pub transcription: ObservationTranscription,
    pub extraction: ObservationExtraction,
    pub normalization: ObservationNormalization,
    pub location: GeoPoint,
    pub status: ObservationStatus,
    pub schema_version: String,
    pub deterministic_checksum: String,
}
