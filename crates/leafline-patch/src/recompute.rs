//! Recompute orchestration
//!
//! Sequences validate → apply → rebuild-recommendation and threads the
//! causal link through: `recomputed_recommendation_id` is the only pointer
//! from a configuration edit to its downstream effect, so it is populated
//! exactly when a recompute ran.

use crate::apply::{apply_patch, PatchOutcome};
use chrono::{DateTime, Utc};
use leafline_core::error::LeaflineError;
use leafline_core::observation::Observation;
use leafline_core::patch::{PatchApplyResult, PlaybookPatch};
use leafline_core::playbook::Playbook;
use leafline_core::recommendation::Recommendation;
use leafline_core::weather::WeatherFeatures;
use leafline_engine::generate_recommendation;

/// The observation/weather pair a recompute runs against, when one exists
/// for the playbook's scope.
#[derive(Debug, Clone, Copy)]
pub struct RecomputeContext<'a> {
    pub observation: &'a Observation,
    pub weather: &'a WeatherFeatures,
    pub reference_time: DateTime<Utc>,
}

/// Everything a patch submission produces
#[derive(Debug, Clone)]
pub struct RecomputeOutcome {
    pub patch_result: PatchApplyResult,
    pub new_playbook: Option<Playbook>,
    pub new_recommendation: Option<Recommendation>,
}

/// Apply a patch and, when it lands and a context is available, rebuild the
/// recommendation against the new playbook version with the same
/// observation and weather snapshot.
///
/// A rejected patch leaves the playbook untouched and the causal pointer
/// `None`. An applied patch without a context keeps the new version and
/// reports the skipped recompute the same way, so the caller can generate
/// a recommendation later without re-patching.
pub fn apply_patch_and_recompute(
    patch: &PlaybookPatch,
    playbook: &Playbook,
    context: Option<RecomputeContext<'_>>,
    applied_at: DateTime<Utc>,
    new_recommendation_id: &str,
) -> Result<RecomputeOutcome, LeaflineError> {
    let PatchOutcome { mut result, updated } = apply_patch(patch, playbook, applied_at)?;

    let Some(new_playbook) = updated else {
        return Ok(RecomputeOutcome {
            patch_result: result,
            new_playbook: None,
            new_recommendation: None,
        });
    };

    let new_recommendation = context.map(|ctx| {
        let recommendation = generate_recommendation(
            ctx.observation,
            &new_playbook,
            ctx.weather,
            new_recommendation_id,
            ctx.reference_time,
        );
        tracing::info!(
            patch = %patch.patch_id,
            recommendation = %recommendation.recommendation_id,
            playbook_version = new_playbook.version,
            "recommendation recomputed under new playbook version"
        );
        result.recomputed_recommendation_id = Some(recommendation.recommendation_id.clone());
        recommendation
    });

    Ok(RecomputeOutcome {
        patch_result: result,
        new_playbook: Some(new_playbook),
        new_recommendation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use leafline_core::fixtures::{
        demo_observation, demo_patch, demo_playbook, demo_weather_features,
    };
    use leafline_core::patch::PatchApplyStatus;

    fn applied_at() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-02-11T18:21:14Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn reference_time() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-02-11T19:00:00-08:00")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_patch_and_recompute_links_recommendation() {
        let observation = demo_observation();
        let weather = demo_weather_features();
        let outcome = apply_patch_and_recompute(
            &demo_patch(),
            &demo_playbook(),
            Some(RecomputeContext {
                observation: &observation,
                weather: &weather,
                reference_time: reference_time(),
            }),
            applied_at(),
            "rec_20260211_0002",
        )
        .unwrap();

        assert_eq!(outcome.patch_result.status, PatchApplyStatus::Applied);
        assert_eq!(outcome.patch_result.new_version, 4);
        assert_eq!(
            outcome.patch_result.recomputed_recommendation_id,
            Some("rec_20260211_0002".to_string())
        );

        let playbook = outcome.new_playbook.unwrap();
        assert_eq!(playbook.version, 4);

        let recommendation = outcome.new_recommendation.unwrap();
        assert_eq!(recommendation.recommendation_id, "rec_20260211_0002");
        assert_eq!(recommendation.playbook_version, 4);
    }

    #[test]
    fn test_recomputed_drivers_reflect_new_constraint() {
        let observation = demo_observation();
        let weather = demo_weather_features();
        let outcome = apply_patch_and_recompute(
            &demo_patch(),
            &demo_playbook(),
            Some(RecomputeContext {
                observation: &observation,
                weather: &weather,
                reference_time: reference_time(),
            }),
            applied_at(),
            "rec_20260211_0002",
        )
        .unwrap();

        let recommendation = outcome.new_recommendation.unwrap();
        assert!(recommendation
            .timing_window
            .drivers
            .contains(&"maxWindKph=10".to_string()));
    }

    #[test]
    fn test_rejected_patch_skips_recompute() {
        let mut patch = demo_patch();
        patch.base_version = 999;

        let observation = demo_observation();
        let weather = demo_weather_features();
        let outcome = apply_patch_and_recompute(
            &patch,
            &demo_playbook(),
            Some(RecomputeContext {
                observation: &observation,
                weather: &weather,
                reference_time: reference_time(),
            }),
            applied_at(),
            "rec_unused",
        )
        .unwrap();

        assert_eq!(outcome.patch_result.status, PatchApplyStatus::Rejected);
        assert!(outcome.patch_result.recomputed_recommendation_id.is_none());
        assert!(outcome.new_playbook.is_none());
        assert!(outcome.new_recommendation.is_none());
    }

    #[test]
    fn test_applied_patch_without_context_keeps_new_version() {
        let outcome = apply_patch_and_recompute(
            &demo_patch(),
            &demo_playbook(),
            None,
            applied_at(),
            "rec_unused",
        )
        .unwrap();

        assert_eq!(outcome.patch_result.status, PatchApplyStatus::Applied);
        assert_eq!(outcome.patch_result.new_version, 4);
        assert!(outcome.patch_result.recomputed_recommendation_id.is_none());
        assert!(outcome.new_playbook.is_some());
        assert!(outcome.new_recommendation.is_none());
    }
}
