//! Read-only selection of changes by section and action kind.

use super::action::ActionKind;
use super::change::{ChangeType, Plan, ResourceChange};

/// Selects changes without touching the plan.
///
/// An empty section or kind list means "everything".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeFilter {
    sections: Vec<ChangeType>,
    kinds: Vec<ActionKind>,
}

impl ChangeFilter {
    /// A filter that matches every change.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sections: Vec::new(),
            kinds: Vec::new(),
        }
    }

    /// Restricts to the given sections.
    #[must_use]
    pub fn with_sections(mut self, sections: impl IntoIterator<Item = ChangeType>) -> Self {
        self.sections = sections.into_iter().collect();
        self
    }

    /// Restricts to the given action kinds.
    #[must_use]
    pub fn with_kinds(mut self, kinds: impl IntoIterator<Item = ActionKind>) -> Self {
        self.kinds = kinds.into_iter().collect();
        self
    }

    /// Returns true if the change passes the filter.
    #[must_use]
    pub fn matches(&self, change: &ResourceChange) -> bool {
        (self.sections.is_empty() || self.sections.contains(&change.change_type))
            && (self.kinds.is_empty() || self.kinds.contains(&change.kind()))
    }

    /// Applies the filter, preserving plan order.
    pub fn apply<'a>(&'a self, plan: &'a Plan) -> impl Iterator<Item = &'a ResourceChange> + 'a {
        plan.changes.iter().filter(move |c| self.matches(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::map_indicator;

    fn plan() -> Plan {
        let mk = |change_type, address: &str, indicator| ResourceChange {
            change_type,
            address: address.to_string(),
            resource_type: String::from("aws_iam_policy"),
            name: address.trim_start_matches("aws_iam_policy.").to_string(),
            actions: map_indicator(indicator).unwrap(),
            diff: String::new(),
        };
        Plan {
            changes: vec![
                mk(ChangeType::OutsideChange, "aws_iam_policy.a", "~"),
                mk(ChangeType::ActionChange, "aws_iam_policy.b", "-"),
                mk(ChangeType::ActionChange, "aws_iam_policy.c", "+"),
                mk(ChangeType::ActionChange, "aws_iam_policy.d", "-/+"),
            ],
            summary: String::from("Plan: 2 to add, 0 to change, 2 to destroy."),
            totals: None,
        }
    }

    fn addresses<'a>(it: impl Iterator<Item = &'a ResourceChange>) -> Vec<&'a str> {
        it.map(|c| c.address.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let plan = plan();
        let filter = ChangeFilter::new();
        assert_eq!(filter.apply(&plan).count(), 4);
    }

    #[test]
    fn test_section_filter() {
        let plan = plan();
        let filter = ChangeFilter::new().with_sections([ChangeType::OutsideChange]);
        assert_eq!(addresses(filter.apply(&plan)), vec!["aws_iam_policy.a"]);
    }

    #[test]
    fn test_kind_filter_combines_with_section() {
        let plan = plan();
        let filter = ChangeFilter::new()
            .with_sections([ChangeType::ActionChange])
            .with_kinds([ActionKind::Delete, ActionKind::Replace]);
        assert_eq!(
            addresses(filter.apply(&plan)),
            vec!["aws_iam_policy.b", "aws_iam_policy.d"]
        );
    }
}
