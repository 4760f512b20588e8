//! Risk flags, confidence scoring, and audit drivers
//!
//! All constants here are configuration, not tuned output: the confidence
//! score is a heuristic, not a statistical estimate.

use leafline_core::playbook::PlaybookRule;
use leafline_core::recommendation::RiskFlag;
use leafline_core::weather::{HumidityLayering, WeatherFeatures, WeatherSourceMode, WindShearProxy};

/// Confidence deductions by weather condition
#[derive(Debug, Clone)]
pub struct ConfidenceWeights {
    pub base: f64,
    pub demo_source_penalty: f64,
    pub high_shear_penalty: f64,
    pub unknown_humidity_penalty: f64,
    pub floor: f64,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            base: 0.9,
            demo_source_penalty: 0.05,
            high_shear_penalty: 0.10,
            unknown_humidity_penalty: 0.10,
            floor: 0.5,
        }
    }
}

/// Risk evaluator with configurable weights
#[derive(Debug, Clone)]
pub struct RiskEvaluator {
    pub weights: ConfidenceWeights,
    /// Spray-window score below this raises the low-confidence flag
    pub low_confidence_threshold: f64,
}

impl Default for RiskEvaluator {
    fn default() -> Self {
        Self {
            weights: ConfidenceWeights::default(),
            low_confidence_threshold: 0.4,
        }
    }
}

impl RiskEvaluator {
    /// Derive risk flags from a weather snapshot. Flags are additive and
    /// de-duplicated; their order carries no meaning.
    pub fn flags(&self, weather: &WeatherFeatures) -> Vec<RiskFlag> {
        let mut flags = Vec::new();

        if weather.source_mode == WeatherSourceMode::None {
            push_unique(&mut flags, RiskFlag::WeatherDataMissing);
        }
        if weather.wind_shear_proxy == WindShearProxy::High {
            push_unique(&mut flags, RiskFlag::HighDriftRisk);
        }
        if weather.spray_window_score < self.low_confidence_threshold {
            push_unique(&mut flags, RiskFlag::LowConfidence);
        }

        flags
    }

    pub fn confidence(&self, weather: &WeatherFeatures) -> f64 {
        let mut confidence = self.weights.base;

        if weather.source_mode == WeatherSourceMode::Demo {
            confidence -= self.weights.demo_source_penalty;
        }
        if weather.wind_shear_proxy == WindShearProxy::High {
            confidence -= self.weights.high_shear_penalty;
        }
        if weather.humidity_layering == HumidityLayering::Unknown {
            confidence -= self.weights.unknown_humidity_penalty;
        }

        confidence.max(self.weights.floor)
    }

    /// String-encoded weather facts for audit display. Always emitted in
    /// this fixed order, whether or not each fact influenced the outcome.
    pub fn drivers(&self, rule: &PlaybookRule, weather: &WeatherFeatures) -> Vec<String> {
        vec![
            format!("inversionPresent={}", weather.inversion_present),
            format!("humidityLayering={}", weather.humidity_layering),
            format!("windShearProxy={}", weather.wind_shear_proxy),
            format!("maxWindKph={}", rule.constraints.max_wind_kph.round() as i64),
        ]
    }
}

/// Combined output of one risk evaluation
#[derive(Debug, Clone)]
pub struct RiskOutcome {
    pub flags: Vec<RiskFlag>,
    pub confidence: f64,
    pub drivers: Vec<String>,
}

/// Evaluate with default weights
pub fn evaluate_risk(rule: &PlaybookRule, weather: &WeatherFeatures) -> RiskOutcome {
    let evaluator = RiskEvaluator::default();
    RiskOutcome {
        flags: evaluator.flags(weather),
        confidence: evaluator.confidence(weather),
        drivers: evaluator.drivers(rule, weather),
    }
}

fn push_unique(flags: &mut Vec<RiskFlag>, flag: RiskFlag) {
    if !flags.contains(&flag) {
        flags.push(flag);
    }
}
