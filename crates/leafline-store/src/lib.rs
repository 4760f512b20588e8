//! Leafline Store: Versioned Playbook State
//!
//! An explicit store handle in place of ambient module-level state:
//! playbook id → ordered version history behind one lock. Every version is
//! retained for audit; the highest is the active one recommendation
//! generation sees. Patch submission is a compare-and-swap on the version
//! number: validate-then-mutate runs under the write lock as a single
//! atomic step, so two patches racing against the same stale version can
//! never both land.

use chrono::{DateTime, Utc};
use leafline_core::error::LeaflineError;
use leafline_core::patch::PlaybookPatch;
use leafline_core::playbook::Playbook;
use leafline_core::{fixtures, ids};
use leafline_patch::{apply_patch_and_recompute, RecomputeContext, RecomputeOutcome};
use std::collections::HashMap;
use std::sync::RwLock;

pub struct PlaybookStore {
    playbooks: RwLock<HashMap<String, Vec<Playbook>>>,
}

impl PlaybookStore {
    pub fn new() -> Self {
        Self {
            playbooks: RwLock::new(HashMap::new()),
        }
    }

    /// A store pre-seeded with the canonical demo playbook
    pub fn with_demo_seed() -> Self {
        let store = Self::new();
        store.seed(fixtures::demo_playbook());
        store
    }

    /// Insert a playbook version. Versions are expected in ascending order;
    /// the highest seeded version becomes active.
    pub fn seed(&self, playbook: Playbook) {
        let mut playbooks = self.playbooks.write().unwrap();
        playbooks
            .entry(playbook.playbook_id.clone())
            .or_default()
            .push(playbook);
    }

    /// The active (highest) version for a playbook id
    pub fn active(&self, playbook_id: &str) -> Option<Playbook> {
        let playbooks = self.playbooks.read().unwrap();
        playbooks
            .get(playbook_id)
            .and_then(|history| history.last())
            .cloned()
    }

    /// A specific retained version, for audit/history
    pub fn version(&self, playbook_id: &str, version: u32) -> Option<Playbook> {
        let playbooks = self.playbooks.read().unwrap();
        playbooks.get(playbook_id).and_then(|history| {
            history
                .iter()
                .find(|playbook| playbook.version == version)
                .cloned()
        })
    }

    /// All retained version numbers for a playbook id, in order
    pub fn versions(&self, playbook_id: &str) -> Vec<u32> {
        let playbooks = self.playbooks.read().unwrap();
        playbooks
            .get(playbook_id)
            .map(|history| history.iter().map(|playbook| playbook.version).collect())
            .unwrap_or_default()
    }

    /// Validate and apply a patch against the active version, then recompute
    /// the recommendation when a context is supplied. The whole sequence
    /// holds the write lock, making the version check and the mutation one
    /// atomic step. An applied patch appends a new version to the history;
    /// a rejected one changes nothing.
    pub fn submit_patch(
        &self,
        patch: &PlaybookPatch,
        context: Option<RecomputeContext<'_>>,
        applied_at: DateTime<Utc>,
    ) -> Result<RecomputeOutcome, LeaflineError> {
        let mut playbooks = self.playbooks.write().unwrap();

        let history = playbooks
            .get_mut(&patch.playbook_id)
            .ok_or_else(|| LeaflineError::PlaybookNotFound(patch.playbook_id.clone()))?;
        let active = history
            .last()
            .ok_or_else(|| LeaflineError::PlaybookNotFound(patch.playbook_id.clone()))?;

        let new_recommendation_id = ids::recommendation_id();
        let outcome =
            apply_patch_and_recompute(patch, active, context, applied_at, &new_recommendation_id)?;

        if let Some(new_playbook) = &outcome.new_playbook {
            history.push(new_playbook.clone());
        }

        Ok(outcome)
    }
}

impl Default for PlaybookStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leafline_core::fixtures::{demo_observation, demo_patch, demo_weather_features};
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
    fn test_active_resolves_highest_version() {
        let store = PlaybookStore::with_demo_seed();
        let active = store.active("pbk_yolo_grape").unwrap();
        assert_eq!(active.version, 3);
    }

    #[test]
    fn test_unknown_playbook_id() {
        let store = PlaybookStore::with_demo_seed();
        assert!(store.active("pbk_missing").is_none());

        let err = store
            .submit_patch(
                &PlaybookPatch {
                    playbook_id: "pbk_missing".to_string(),
                    ..demo_patch()
                },
                None,
                applied_at(),
            )
            .unwrap_err();
        assert!(err.to_string().starts_with("PLAYBOOK_NOT_FOUND/"));
    }

    #[test]
    fn test_submit_patch_appends_version() {
        let store = PlaybookStore::with_demo_seed();
        let observation = demo_observation();
        let weather = demo_weather_features();

        let outcome = store
            .submit_patch(
                &demo_patch(),
                Some(RecomputeContext {
                    observation: &observation,
                    weather: &weather,
                    reference_time: reference_time(),
                }),
                applied_at(),
            )
            .unwrap();

        assert_eq!(outcome.patch_result.status, PatchApplyStatus::Applied);
        assert_eq!(store.active("pbk_yolo_grape").unwrap().version, 4);
        assert_eq!(store.versions("pbk_yolo_grape"), vec![3, 4]);

        // The recompute is linked and ran against the new version
        let recommendation = outcome.new_recommendation.unwrap();
        assert_eq!(
            outcome.patch_result.recomputed_recommendation_id,
            Some(recommendation.recommendation_id.clone())
        );
        assert_eq!(recommendation.playbook_version, 4);
    }

    #[test]
    fn test_old_versions_stay_queryable() {
        let store = PlaybookStore::with_demo_seed();
        store
            .submit_patch(&demo_patch(), None, applied_at())
            .unwrap();

        let old = store.version("pbk_yolo_grape", 3).unwrap();
        assert_eq!(
            old.rule("rule_pm_moderate").unwrap().constraints.max_wind_kph,
            12.0
        );

        let new = store.version("pbk_yolo_grape", 4).unwrap();
        assert_eq!(
            new.rule("rule_pm_moderate").unwrap().constraints.max_wind_kph,
            10.0
        );
    }

    #[test]
    fn test_second_patch_against_stale_version_loses() {
        let store = PlaybookStore::with_demo_seed();

        let first = store
            .submit_patch(&demo_patch(), None, applied_at())
            .unwrap();
        assert_eq!(first.patch_result.status, PatchApplyStatus::Applied);

        // Same base version again: the compare-and-swap must reject it
        let second = store
            .submit_patch(&demo_patch(), None, applied_at())
            .unwrap();
        assert_eq!(second.patch_result.status, PatchApplyStatus::Rejected);
        assert!(second.patch_result.validation_errors[0].contains("version mismatch"));
        assert_eq!(store.active("pbk_yolo_grape").unwrap().version, 4);
    }

    #[test]
    fn test_rejected_patch_leaves_history_untouched() {
        let store = PlaybookStore::with_demo_seed();
        let mut patch = demo_patch();
        patch.base_version = 999;

        let outcome = store.submit_patch(&patch, None, applied_at()).unwrap();
        assert_eq!(outcome.patch_result.status, PatchApplyStatus::Rejected);
        assert_eq!(store.versions("pbk_yolo_grape"), vec![3]);
    }
}
