//! Rule selection
//!
//! Maps an observed issue to the playbook rule that answers it. Selection
//! is by issue alone: all severities of a known issue share one rule today,
//! so the severity argument is accepted but does not partition the choice.

use leafline_core::observation::{Issue, Severity};
use leafline_core::playbook::{Playbook, PlaybookRule};

/// Find the rule for an issue, or `None` when the playbook has no mapping.
/// "No rule" is a defined outcome, not a failure.
pub fn select_rule<'a>(
    playbook: &'a Playbook,
    issue: Issue,
    _severity: Severity,
) -> Option<&'a PlaybookRule> {
    playbook.rules.values().find(|rule| rule.issue == issue)
}
