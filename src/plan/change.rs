//! Resource change records and the parsed plan.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::action::{ActionKind, Actions};

/// Sentence terraform prints when a plan has nothing to do.
pub const NO_CHANGES_SENTINEL: &str = "No changes. Your infrastructure matches the configuration.";

/// Which section of the plan a change came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    /// Detected as having happened outside of terraform.
    #[value(name = "outside")]
    #[serde(rename = "outside")]
    OutsideChange,
    /// Proposed by terraform.
    #[value(name = "actions")]
    #[serde(rename = "actions")]
    ActionChange,
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::OutsideChange => "outside",
            Self::ActionChange => "actions",
        };
        write!(f, "{s}")
    }
}

/// One parsed change block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceChange {
    /// Section the change came from.
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    /// Full address as printed, including any module path.
    pub address: String,
    /// Resource type, e.g. `aws_iam_policy`.
    pub resource_type: String,
    /// Resource name, e.g. `policy3`.
    pub name: String,
    /// Ordered actions.
    pub actions: Actions,
    /// Verbatim diff from the indicator through the closing brace.
    pub diff: String,
}

impl ResourceChange {
    /// Module path prefix of the address, if any.
    ///
    /// `module.east.aws_sqs_queue.app_queue` yields `Some("module.east")`.
    #[must_use]
    pub fn module_path(&self) -> Option<&str> {
        let suffix_len = self.resource_type.len() + 1 + self.name.len();
        self.address
            .len()
            .checked_sub(suffix_len + 1)
            .filter(|&n| n > 0)
            .and_then(|n| self.address.get(..n))
    }

    /// Coarse action kind.
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        self.actions.kind()
    }
}

/// Counts from the `Plan: N to add, M to change, K to destroy.` line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlanTotals {
    /// Resources to add.
    pub add: u64,
    /// Resources to change.
    pub change: u64,
    /// Resources to destroy.
    pub destroy: u64,
}

/// Result of parsing one plan.
///
/// Outside changes come first, then action changes, each in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    /// All changes.
    pub changes: Vec<ResourceChange>,
    /// Summary line, or the no-changes sentinel.
    pub summary: String,
    /// Parsed summary counts; `None` for the sentinel.
    pub totals: Option<PlanTotals>,
}

/// Changes grouped by [`ActionKind`].
#[derive(Debug, Default)]
pub struct ChangesByAction<'a> {
    /// Plain creates.
    pub create: Vec<&'a ResourceChange>,
    /// In-place updates.
    pub update: Vec<&'a ResourceChange>,
    /// Plain deletes.
    pub delete: Vec<&'a ResourceChange>,
    /// Replacements.
    pub replace: Vec<&'a ResourceChange>,
}

impl Plan {
    /// Returns true if the plan has no change records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Returns true if the summary is the no-changes sentinel.
    #[must_use]
    pub fn is_no_changes(&self) -> bool {
        self.summary == NO_CHANGES_SENTINEL
    }

    /// Changes detected outside of terraform.
    pub fn outside_changes(&self) -> impl Iterator<Item = &ResourceChange> {
        self.section(ChangeType::OutsideChange)
    }

    /// Changes terraform will perform.
    pub fn action_changes(&self) -> impl Iterator<Item = &ResourceChange> {
        self.section(ChangeType::ActionChange)
    }

    /// Changes from one section.
    pub fn section(&self, change_type: ChangeType) -> impl Iterator<Item = &ResourceChange> {
        self.changes
            .iter()
            .filter(move |c| c.change_type == change_type)
    }

    /// Groups changes by action kind, keeping source order within each group.
    #[must_use]
    pub fn by_action(&self) -> ChangesByAction<'_> {
        let mut groups = ChangesByAction::default();
        for change in &self.changes {
            match change.kind() {
                ActionKind::Create => groups.create.push(change),
                ActionKind::Update => groups.update.push(change),
                ActionKind::Delete => groups.delete.push(change),
                ActionKind::Replace => groups.replace.push(change),
            }
        }
        groups
    }

    /// Finds all changes with the given address.
    ///
    /// The same address can appear once per section.
    pub fn find<'a>(&'a self, address: &'a str) -> impl Iterator<Item = &'a ResourceChange> + 'a {
        self.changes.iter().filter(move |c| c.address == address)
    }

    /// Number of changes of a given kind.
    #[must_use]
    pub fn count(&self, kind: ActionKind) -> usize {
        self.changes.iter().filter(|c| c.kind() == kind).count()
    }
}

impl ChangesByAction<'_> {
    /// The group for one kind.
    #[must_use]
    pub fn get(&self, kind: ActionKind) -> &[&ResourceChange] {
        match kind {
            ActionKind::Create => &self.create,
            ActionKind::Update => &self.update,
            ActionKind::Delete => &self.delete,
            ActionKind::Replace => &self.replace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::map_indicator;

    fn change(change_type: ChangeType, address: &str, indicator: &str) -> ResourceChange {
        let (prefix, name) = address.rsplit_once('.').unwrap();
        let resource_type = prefix.rsplit('.').next().unwrap();
        ResourceChange {
            change_type,
            address: address.to_string(),
            resource_type: resource_type.to_string(),
            name: name.to_string(),
            actions: map_indicator(indicator).unwrap(),
            diff: format!("{indicator} resource \"{resource_type}\" \"{name}\" {{\n    }}"),
        }
    }

    fn sample_plan() -> Plan {
        Plan {
            changes: vec![
                change(ChangeType::OutsideChange, "aws_iam_policy.policy4", "~"),
                change(ChangeType::ActionChange, "aws_iam_policy.policy4", "~"),
                change(ChangeType::ActionChange, "aws_iam_policy.policy3", "-/+"),
                change(ChangeType::ActionChange, "module.east.aws_sqs_queue.app_queue", "+"),
                change(ChangeType::ActionChange, "aws_instance.app_server", "+"),
            ],
            summary: String::from("Plan: 2 to add, 1 to change, 1 to destroy."),
            totals: Some(PlanTotals {
                add: 2,
                change: 1,
                destroy: 1,
            }),
        }
    }

    #[test]
    fn test_sections() {
        let plan = sample_plan();
        assert_eq!(plan.outside_changes().count(), 1);
        assert_eq!(plan.action_changes().count(), 4);
        assert!(!plan.is_no_changes());
    }

    #[test]
    fn test_by_action_keeps_order() {
        let plan = sample_plan();
        let groups = plan.by_action();
        let creates: Vec<&str> = groups.create.iter().map(|c| c.address.as_str()).collect();
        assert_eq!(
            creates,
            vec!["module.east.aws_sqs_queue.app_queue", "aws_instance.app_server"]
        );
        assert_eq!(groups.update.len(), 2);
        assert_eq!(groups.get(ActionKind::Replace).len(), 1);
        assert!(groups.delete.is_empty());
    }

    #[test]
    fn test_find_spans_sections() {
        let plan = sample_plan();
        let found: Vec<ChangeType> = plan
            .find("aws_iam_policy.policy4")
            .map(|c| c.change_type)
            .collect();
        assert_eq!(found, vec![ChangeType::OutsideChange, ChangeType::ActionChange]);
    }

    #[test]
    fn test_module_path() {
        let plan = sample_plan();
        assert_eq!(plan.changes[3].module_path(), Some("module.east"));
        assert_eq!(plan.changes[4].module_path(), None);
    }

    #[test]
    fn test_count() {
        let plan = sample_plan();
        assert_eq!(plan.count(ActionKind::Create), 2);
        assert_eq!(plan.count(ActionKind::Delete), 0);
    }
}
