//! Playbook patches
//!
//! A patch is a proposed, versioned edit to a playbook's rule fields,
//! restricted to each rule's editable-path allowlist. Patches are immutable
//! once submitted; the apply result is the causal link between a patch and
//! any recommendation recompute it triggered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
    Replace,
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchApplyStatus {
    Applied,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchOperation {
    pub op: PatchOp,
    /// Slash-separated path into the playbook tree,
    /// e.g. `/rules/rule_pm_moderate/constraints/maxWindKph`
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybookPatch {
    pub patch_id: String,
    pub playbook_id: String,
    /// The version the requester believes is current
    pub base_version: u32,
    pub requested_by_device_id: String,
    pub requested_at: DateTime<Utc>,
    pub reason: String,
    /// Applied in submission order, all-or-nothing
    pub operations: Vec<PatchOperation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchApplyResult {
    pub patch_id: String,
    pub playbook_id: String,
    pub old_version: u32,
    pub new_version: u32,
    pub status: PatchApplyStatus,
    /// Exhaustive: every failed check, not just the first
    pub validation_errors: Vec<String>,
    /// Set iff the patch applied and a recommendation was recomputed
    pub recomputed_recommendation_id: Option<String>,
    pub applied_at: DateTime<Utc>,
}

impl PatchApplyResult {
    pub fn is_applied(&self) -> bool {
        self.status == PatchApplyStatus::Applied
    }
}
