//! Weather feature snapshots
//!
//! Derived atmospheric features consumed by the recommendation engine.
//! Snapshots are produced by an external adapter (demo or live) and are
//! treated as immutable input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A geographic point (WGS84)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Where a weather snapshot came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherSourceMode {
    Demo,
    Live,
    None,
}

/// Vertical humidity structure class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HumidityLayering {
    DryAloftHumidSurface,
    UniformHumid,
    UniformDry,
    Unknown,
}

impl HumidityLayering {
    pub fn as_str(&self) -> &'static str {
        match self {
            HumidityLayering::DryAloftHumidSurface => "dry_aloft_humid_surface",
            HumidityLayering::UniformHumid => "uniform_humid",
            HumidityLayering::UniformDry => "uniform_dry",
            HumidityLayering::Unknown => "unknown",
        }
    }
}

impl fmt::Display for HumidityLayering {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wind-shear class derived from the surface/aloft wind difference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindShearProxy {
    Low,
    Moderate,
    High,
    Unknown,
}

impl WindShearProxy {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindShearProxy::Low => "low",
            WindShearProxy::Moderate => "moderate",
            WindShearProxy::High => "high",
            WindShearProxy::Unknown => "unknown",
        }
    }
}

impl fmt::Display for WindShearProxy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A derived weather snapshot for a location/time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherFeatures {
    /// Snapshot identity
    pub weather_features_id: String,

    /// demo / live / none
    pub source_mode: WeatherSourceMode,

    /// When the vertical profile was observed
    pub profile_time: DateTime<Utc>,

    pub location: GeoPoint,

    /// Temperature inversion detected in the low layers
    pub inversion_present: bool,

    pub humidity_layering: HumidityLayering,

    pub wind_shear_proxy: WindShearProxy,

    /// 0.0 (hostile) to 1.0 (ideal) spray conditions
    pub spray_window_score: f64,

    pub disease_risk_score: f64,

    pub heat_stress_score: f64,

    /// Free-text annotations from the adapter
    #[serde(default)]
    pub notes: Vec<String>,
}

/// One level of a vertical atmospheric profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerticalLayer {
    pub altitude_m: f64,
    pub temperature_c: f64,
    pub relative_humidity_pct: f64,
    pub wind_speed_kph: f64,
    pub wind_direction_deg: f64,
}
