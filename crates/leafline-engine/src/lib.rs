//! Leafline Engine: Rule Selection, Timing, Risk, and Recommendations
//!
//! The deterministic core of the advisory pipeline:
//!
//! ```text
//! Observation + Playbook + WeatherFeatures
//!        ↓              ↓            ↓
//!   Rule Selector → Timing Window → Risk & Confidence
//!        └──────────────┴────────────────┘
//!                       ↓
//!                 Recommendation
//! ```
//!
//! All computation is synchronous and in-memory over already-fetched
//! inputs. Weather I/O lives behind the [`source::WeatherProvider`] seam.
//!
//! # Example
//!
//! ```
//! use leafline_core::fixtures::{demo_observation, demo_playbook, demo_weather_features};
//! use leafline_engine::generate_recommendation;
//!
//! let reference_time = "2026-02-11T19:00:00-08:00".parse().unwrap();
//! let recommendation = generate_recommendation(
//!     &demo_observation(),
//!     &demo_playbook(),
//!     &demo_weather_features(),
//!     "rec_demo_0001",
//!     reference_time,
//! );
//!
//! // Base +2h..+6h, with the humid evening pulling the end in by 90 minutes
//! assert_eq!(
//!     recommendation.timing_window.start_at.to_rfc3339(),
//!     "2026-02-11T21:00:00-08:00"
//! );
//! assert_eq!(
//!     recommendation.timing_window.end_at.to_rfc3339(),
//!     "2026-02-11T23:30:00-08:00"
//! );
//! assert!(recommendation.required_confirmation);
//! ```

pub mod profile;
pub mod recommend;
pub mod risk;
pub mod select;
pub mod source;
pub mod timing;

pub use recommend::{generate_recommendation, FALLBACK_RATIONALE_TAG, MONITOR_ACTION};
pub use risk::{evaluate_risk, ConfidenceWeights, RiskEvaluator, RiskOutcome};
pub use select::select_rule;
pub use source::{DemoWeatherProvider, LiveWeatherProvider, WeatherProvider};
pub use timing::{
    adjust_for_weather, base_window, pacific_offset, to_local, WindowBounds, LOCAL_TIMEZONE,
    STANDARD_TIMING_TAG,
};
