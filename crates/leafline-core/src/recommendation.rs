//! Action recommendations
//!
//! A recommendation is immutable once generated: confirming or rejecting it
//! is a status transition, never a mutation of its computed content.

use crate::error::LeaflineError;
use crate::observation::{Issue, Severity};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFlag {
    WeatherDataMissing,
    HighDriftRisk,
    LowConfidence,
    ManualReviewRequired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStatus {
    PendingConfirmation,
    Confirmed,
    Rejected,
}

/// When to act, with the evidence that shaped the window
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingWindow {
    /// Rendered in the rule's operating civil timezone
    pub start_at: DateTime<FixedOffset>,
    pub end_at: DateTime<FixedOffset>,
    pub local_timezone: String,
    pub confidence: f64,
    /// String-encoded weather facts, always in a fixed order
    pub drivers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub recommendation_id: String,
    pub observation_id: String,
    pub playbook_id: String,
    /// The exact playbook version this was computed against
    pub playbook_version: u32,
    pub weather_features_id: String,
    pub generated_at: DateTime<Utc>,
    pub issue: Issue,
    pub severity: Severity,
    pub action: String,
    /// Ordered tags explaining timing decisions
    pub rationale: Vec<String>,
    pub timing_window: TimingWindow,
    pub risk_flags: Vec<RiskFlag>,
    /// Always true: recommendations are never auto-applied
    pub required_confirmation: bool,
    pub status: RecommendationStatus,
}

impl Recommendation {
    /// Accept the recommendation. Legal only from pending confirmation.
    pub fn confirm(self) -> Result<Self, LeaflineError> {
        self.transition(RecommendationStatus::Confirmed)
    }

    /// Decline the recommendation. Legal only from pending confirmation.
    pub fn reject(self) -> Result<Self, LeaflineError> {
        self.transition(RecommendationStatus::Rejected)
    }

    fn transition(mut self, next: RecommendationStatus) -> Result<Self, LeaflineError> {
        if self.status != RecommendationStatus::PendingConfirmation {
            return Err(LeaflineError::InvalidTransition(format!(
                "{} is already {:?}",
                self.recommendation_id, self.status
            )));
        }
        self.status = next;
        Ok(self)
    }
}
