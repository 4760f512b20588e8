//! Leafline Patch: Allowlist-Gated Playbook Editing
//!
//! ```text
//! PlaybookPatch → Validator → Applier → Recompute
//!                    ↓           ↓          ↓
//!               error list   new version  new Recommendation
//!                    └───────────┴──────────┘
//!                                ↓
//!                         PatchApplyResult
//! ```
//!
//! Validation collects every failure before anything mutates; application
//! is all-or-nothing on a clone; the recompute step links the edit to its
//! downstream recommendation through `recomputed_recommendation_id`.

pub mod apply;
pub mod recompute;
pub mod validate;

pub use apply::{apply_patch, PatchOutcome};
pub use recompute::{apply_patch_and_recompute, RecomputeContext, RecomputeOutcome};
pub use validate::{validate_patch, PatchValidation};
