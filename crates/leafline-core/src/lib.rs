//! Leafline Core: Data Model, Error Taxonomy, and Demo Fixtures
//!
//! Shared types for the vineyard advisory engine. Everything here is plain
//! data with camelCase wire names; the engine, patch, and store crates
//! build on these types without adding fields of their own.

pub mod error;
pub mod fixtures;
pub mod ids;
pub mod observation;
pub mod patch;
pub mod playbook;
pub mod recommendation;
pub mod weather;

pub use error::LeaflineError;
pub use observation::{Issue, Observation, ObservationStatus, Severity};
pub use patch::{PatchApplyResult, PatchApplyStatus, PatchOp, PatchOperation, PlaybookPatch};
pub use playbook::{Playbook, PlaybookRule, RuleWeatherAdjustment};
pub use recommendation::{Recommendation, RecommendationStatus, RiskFlag, TimingWindow};
pub use weather::{
    GeoPoint, HumidityLayering, VerticalLayer, WeatherFeatures, WeatherSourceMode, WindShearProxy,
};

/// Engine schema version carried by all surfaces
pub const SCHEMA_VERSION: &str = "1.0.0";
