//! Patch application
//!
//! Operations apply to a structural clone of the playbook's JSON tree in
//! submission order; the input playbook is never touched, so concurrent
//! readers always see a consistent snapshot. Application is all-or-nothing:
//! a navigation failure, or a result that no longer deserializes as a
//! playbook, aborts the whole patch.

use crate::validate::validate_patch;
use chrono::{DateTime, Utc};
use leafline_core::error::LeaflineError;
use leafline_core::patch::{
    PatchApplyResult, PatchApplyStatus, PatchOp, PatchOperation, PlaybookPatch,
};
use leafline_core::playbook::Playbook;
use serde_json::Value;

/// The result record plus, when applied, the bumped playbook
#[derive(Debug, Clone)]
pub struct PatchOutcome {
    pub result: PatchApplyResult,
    pub updated: Option<Playbook>,
}

/// Validate and apply a patch. A failed validation yields a rejected
/// result with the playbook unchanged; a structurally broken but
/// allowlisted operation is a hard [`LeaflineError::MalformedPatch`].
pub fn apply_patch(
    patch: &PlaybookPatch,
    playbook: &Playbook,
    applied_at: DateTime<Utc>,
) -> Result<PatchOutcome, LeaflineError> {
    let validation = validate_patch(patch, playbook);
    if !validation.is_valid() {
        tracing::warn!(
            patch = %patch.patch_id,
            playbook = %playbook.playbook_id,
            errors = validation.errors.len(),
            "patch rejected"
        );
        return Ok(PatchOutcome {
            result: PatchApplyResult {
                patch_id: patch.patch_id.clone(),
                playbook_id: playbook.playbook_id.clone(),
                old_version: playbook.version,
                new_version: playbook.version,
                status: PatchApplyStatus::Rejected,
                validation_errors: validation.errors,
                recomputed_recommendation_id: None,
                applied_at,
            },
            updated: None,
        });
    }

    let mut tree = serde_json::to_value(playbook)
        .map_err(|e| LeaflineError::MalformedPatch(format!("playbook serialization: {e}")))?;

    for operation in &patch.operations {
        apply_operation(operation, &mut tree)?;
    }

    let mut updated: Playbook = serde_json::from_value(tree).map_err(|e| {
        LeaflineError::MalformedPatch(format!("patched playbook is no longer valid: {e}"))
    })?;

    let new_version = playbook.version + 1;
    updated.version = new_version;
    updated.updated_at = applied_at;

    tracing::info!(
        patch = %patch.patch_id,
        playbook = %playbook.playbook_id,
        old_version = playbook.version,
        new_version,
        "patch applied"
    );

    Ok(PatchOutcome {
        result: PatchApplyResult {
            patch_id: patch.patch_id.clone(),
            playbook_id: playbook.playbook_id.clone(),
            old_version: playbook.version,
            new_version,
            status: PatchApplyStatus::Applied,
            validation_errors: vec![],
            recomputed_recommendation_id: None,
            applied_at,
        },
        updated: Some(updated),
    })
}

fn apply_operation(operation: &PatchOperation, tree: &mut Value) -> Result<(), LeaflineError> {
    let segments: Vec<&str> = operation
        .path
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    let (leaf, parents) = segments
        .split_last()
        .ok_or_else(|| LeaflineError::MalformedPatch(format!("empty path: {}", operation.path)))?;

    let mut target = &mut *tree;
    for segment in parents {
        target = target.get_mut(*segment).ok_or_else(|| {
            LeaflineError::MalformedPatch(format!(
                "missing segment '{}' in {}",
                segment, operation.path
            ))
        })?;
    }

    let parent = target.as_object_mut().ok_or_else(|| {
        LeaflineError::MalformedPatch(format!("parent of {} is not an object", operation.path))
    })?;

    match operation.op {
        PatchOp::Replace => {
            if !parent.contains_key(*leaf) {
                return Err(LeaflineError::MalformedPatch(format!(
                    "cannot replace non-existent key '{}' in {}",
                    leaf, operation.path
                )));
            }
            parent.insert(leaf.to_string(), required_value(operation)?);
        }
        PatchOp::Add => {
            parent.insert(leaf.to_string(), required_value(operation)?);
        }
        PatchOp::Remove => {
            parent.remove(*leaf);
        }
    }

    Ok(())
}

fn required_value(operation: &PatchOperation) -> Result<Value, LeaflineError> {
    operation.value.clone().ok_or_else(|| {
        LeaflineError::MalformedPatch(format!("missing value at {}", operation.path))
    })
}
