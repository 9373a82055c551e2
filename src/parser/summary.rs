//! Plan summary extraction.

use tracing::debug;

use crate::error::ParseError;
use crate::plan::{PlanTotals, NO_CHANGES_SENTINEL};

use super::patterns::PlanPatterns;
use super::validate::Recognition;

/// The summary line and its parsed counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// The verbatim `Plan:` line, or the no-changes sentinel.
    pub text: String,
    /// Counts from the `Plan:` line.
    pub totals: Option<PlanTotals>,
}

/// Extracts the plan summary from the full preprocessed text.
///
/// The first `Plan: N to add, M to change, K to destroy.` line wins. Without
/// one, the no-changes sentinel is returned if validation saw it.
///
/// # Errors
///
/// Returns [`ParseError::InvalidFormat`] if there is neither a summary line
/// nor the sentinel.
pub fn extract_summary(
    patterns: &PlanPatterns,
    text: &str,
    recognition: &Recognition,
) -> Result<Summary, ParseError> {
    if let Some(caps) = patterns.summary.captures(text) {
        let count = |i: usize| -> Result<u64, ParseError> {
            caps[i].parse().map_err(|e| {
                ParseError::invalid_format(format!("summary count {:?} out of range: {e}", &caps[i]))
            })
        };
        let totals = PlanTotals {
            add: count(2)?,
            change: count(3)?,
            destroy: count(4)?,
        };
        debug!(add = totals.add, change = totals.change, destroy = totals.destroy, "Found plan summary");
        return Ok(Summary {
            text: caps[1].to_string(),
            totals: Some(totals),
        });
    }

    if recognition.no_changes {
        debug!("No summary line, using no-changes sentinel");
        return Ok(Summary {
            text: NO_CHANGES_SENTINEL.to_string(),
            totals: None,
        });
    }

    Err(ParseError::invalid_format(
        "no `Plan:` summary line and no no-changes sentinel",
    ))
}
