//! Patch validation
//!
//! Two gates, checked before any mutation: the optimistic-concurrency
//! version check, then the editable-path allowlist. A stale base version
//! fails alone (there is no point auditing paths against a playbook the
//! requester has not seen); path failures are collected exhaustively so
//! the requester can fix every problem in one round trip.

use leafline_core::patch::{PatchOp, PatchOperation, PlaybookPatch};
use leafline_core::playbook::Playbook;

/// Outcome of validating a patch against a playbook
#[derive(Debug, Clone)]
pub struct PatchValidation {
    pub errors: Vec<String>,
}

impl PatchValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a patch against the playbook it claims as its base.
/// Never mutates anything.
pub fn validate_patch(patch: &PlaybookPatch, playbook: &Playbook) -> PatchValidation {
    if patch.base_version != playbook.version {
        return PatchValidation {
            errors: vec![format!(
                "Base version mismatch: expected {}, got {}",
                playbook.version, patch.base_version
            )],
        };
    }

    let allowed = playbook.editable_paths();
    let mut errors = Vec::new();

    for operation in &patch.operations {
        if let Some(problem) = structural_problem(operation) {
            errors.push(problem);
            continue;
        }
        if !path_allowed(&operation.path, &allowed) {
            errors.push(format!("Path not allowed: {}", operation.path));
        }
    }

    PatchValidation { errors }
}

/// A path is allowed when it equals an editable path or descends from one.
fn path_allowed(path: &str, allowed: &[&str]) -> bool {
    allowed
        .iter()
        .any(|prefix| path == *prefix || path.starts_with(&format!("{}/", prefix)))
}

fn structural_problem(operation: &PatchOperation) -> Option<String> {
    if !operation.path.starts_with('/') || operation.path.len() < 2 {
        return Some(format!("Malformed path: {}", operation.path));
    }
    if operation.path.split('/').skip(1).any(str::is_empty) {
        return Some(format!("Malformed path: {}", operation.path));
    }
    if matches!(operation.op, PatchOp::Add | PatchOp::Replace) && operation.value.is_none() {
        return Some(format!(
            "Missing value for {:?} at {}",
            operation.op, operation.path
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use leafline_core::fixtures::{demo_patch, demo_playbook};
    use serde_json::json;

    #[test]
    fn test_canonical_patch_is_valid() {
        let validation = validate_patch(&demo_patch(), &demo_playbook());
        assert!(validation.is_valid());
        assert!(validation.errors.is_empty());
    }

    #[test]
    fn test_version_mismatch_fails_alone() {
        let mut patch = demo_patch();
        patch.base_version = 999;
        // A bad path too, which must NOT be reported on a stale base
        patch.operations.push(PatchOperation {
            op: PatchOp::Replace,
            path: "/metadata/owner".to_string(),
            value: Some(json!("x")),
            justification: None,
        });

        let validation = validate_patch(&patch, &demo_playbook());
        assert!(!validation.is_valid());
        assert_eq!(validation.errors.len(), 1);
        assert!(validation.errors[0].contains("version mismatch"));
    }

    #[test]
    fn test_forbidden_paths_all_collected() {
        let mut patch = demo_patch();
        patch.operations = vec![
            PatchOperation {
                op: PatchOp::Replace,
                path: "/metadata/owner".to_string(),
                value: Some(json!("x")),
                justification: None,
            },
            PatchOperation {
                op: PatchOp::Replace,
                path: "/rules/rule_pm_moderate/constraints/maxWindKph".to_string(),
                value: Some(json!(10)),
                justification: None,
            },
            PatchOperation {
                op: PatchOp::Remove,
                path: "/rules/rule_pm_moderate/editablePaths".to_string(),
                value: None,
                justification: None,
            },
        ];

        let validation = validate_patch(&patch, &demo_playbook());
        assert_eq!(validation.errors.len(), 2);
        assert!(validation.errors[0].contains("/metadata/owner"));
        assert!(validation.errors[1].contains("/rules/rule_pm_moderate/editablePaths"));
    }

    #[test]
    fn test_descendant_of_editable_path_is_allowed() {
        let mut patch = demo_patch();
        patch.operations = vec![PatchOperation {
            op: PatchOp::Replace,
            path: "/rules/rule_pm_moderate/timing/baseWindowHours/startOffsetHours".to_string(),
            value: Some(json!(3)),
            justification: None,
        }];

        assert!(validate_patch(&patch, &demo_playbook()).is_valid());
    }

    #[test]
    fn test_prefix_match_is_segment_aware() {
        // An editable path must not leak onto sibling keys that merely
        // share a string prefix
        let mut patch = demo_patch();
        patch.operations = vec![PatchOperation {
            op: PatchOp::Replace,
            path: "/rules/rule_pm_moderate/constraints/maxWindKphX".to_string(),
            value: Some(json!(10)),
            justification: None,
        }];

        let validation = validate_patch(&patch, &demo_playbook());
        assert!(!validation.is_valid());
    }

    #[test]
    fn test_malformed_paths_reported() {
        let mut patch = demo_patch();
        patch.operations = vec![
            PatchOperation {
                op: PatchOp::Replace,
                path: "rules/rule_pm_moderate/constraints/maxWindKph".to_string(),
                value: Some(json!(10)),
                justification: None,
            },
            PatchOperation {
                op: PatchOp::Replace,
                path: "/rules//maxWindKph".to_string(),
                value: Some(json!(10)),
                justification: None,
            },
        ];

        let validation = validate_patch(&patch, &demo_playbook());
        assert_eq!(validation.errors.len(), 2);
        assert!(validation.errors.iter().all(|e| e.contains("Malformed path")));
    }

    #[test]
    fn test_replace_without_value_reported() {
        let mut patch = demo_patch();
        patch.operations = vec![PatchOperation {
            op: PatchOp::Replace,
            path: "/rules/rule_pm_moderate/constraints/maxWindKph".to_string(),
            value: None,
            justification: None,
        }];

        let validation = validate_patch(&patch, &demo_playbook());
        assert_eq!(validation.errors.len(), 1);
        assert!(validation.errors[0].contains("Missing value"));
    }
}
