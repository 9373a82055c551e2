//! Plan recognition.
//!
//! A text is a plan when it carries the action legend or the no-changes
//! sentinel. Anything else is rejected before any extraction happens.

use serde::Serialize;
use tracing::debug;

use crate::error::ParseError;

use super::patterns::PlanPatterns;

/// Symbol rows present in the action legend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Legend {
    /// `  + create`
    pub create: bool,
    /// `  ~ update in-place`
    pub update: bool,
    /// `  - destroy`
    pub destroy: bool,
    /// `-/+ destroy and then create replacement`
    pub replace: bool,
}

/// What made the text recognizable as a plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Recognition {
    /// The action legend, if present.
    pub legend: Option<Legend>,
    /// Whether the no-changes sentinel is present.
    pub no_changes: bool,
}

impl Legend {
    /// Number of symbol rows present.
    #[must_use]
    pub fn row_count(&self) -> usize {
        [self.create, self.update, self.destroy, self.replace]
            .iter()
            .filter(|present| **present)
            .count()
    }
}

/// Checks that `text` is a recognizable plan.
///
/// # Errors
///
/// Returns [`ParseError::InvalidFormat`] if neither the legend nor the
/// no-changes sentinel is found.
pub fn validate(patterns: &PlanPatterns, text: &str) -> Result<Recognition, ParseError> {
    let legend = patterns.legend.captures(text).map(|caps| Legend {
        create: caps.name("create").is_some(),
        update: caps.name("update").is_some(),
        destroy: caps.name("destroy").is_some(),
        replace: caps.name("replace").is_some(),
    });
    let no_changes = patterns.no_changes.is_match(text);

    if legend.is_none() && !no_changes {
        return Err(ParseError::invalid_format(
            "neither the action legend nor the no-changes sentinel was found",
        ));
    }

    debug!(
        legend_rows = legend.map_or(0, |l| l.row_count()),
        no_changes, "Recognized terraform plan"
    );
    Ok(Recognition { legend, no_changes })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> PlanPatterns {
        PlanPatterns::compile().unwrap()
    }

    #[test]
    fn test_full_legend() {
        let text = "Resource actions are indicated with the following symbols:\n  + create\n  ~ update in-place\n  - destroy\n-/+ destroy and then create replacement\n";
        let recognition = validate(&patterns(), text).unwrap();
        assert_eq!(
            recognition.legend,
            Some(Legend {
                create: true,
                update: true,
                destroy: true,
                replace: true,
            })
        );
        assert!(!recognition.no_changes);
    }

    #[test]
    fn test_partial_legend_keeps_order() {
        let text = "Resource actions are indicated with the following symbols:\n  + create\n-/+ destroy and then create replacement\n";
        let legend = validate(&patterns(), text).unwrap().legend.unwrap();
        assert!(legend.create && legend.replace);
        assert!(!legend.update && !legend.destroy);
        assert_eq!(legend.row_count(), 2);
    }

    #[test]
    fn test_out_of_order_rows_not_counted() {
        let text = "Resource actions are indicated with the following symbols:\n  - destroy\n  + create\n";
        let legend = validate(&patterns(), text).unwrap().legend.unwrap();
        assert!(legend.destroy);
        assert!(!legend.create);
    }

    #[test]
    fn test_wrapped_sentinel() {
        let text = "No changes.\nYour infrastructure matches\nthe configuration.";
        let recognition = validate(&patterns(), text).unwrap();
        assert!(recognition.no_changes);
        assert!(recognition.legend.is_none());
    }

    #[test]
    fn test_rejects_other_text() {
        let err = validate(&patterns(), "Apply complete! Resources: 1 added.").unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat { .. }));
    }

    #[test]
    fn test_rejects_sentinel_with_wrong_words() {
        let text = "No changes. Your infrastructure matches the desired state.";
        assert!(validate(&patterns(), text).is_err());
    }
}
