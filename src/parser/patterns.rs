//! Compiled matching patterns shared by every parse.
//!
//! Built once by [`PlanParser::new`](super::PlanParser::new) and only ever
//! read afterwards.

use regex::Regex;

/// ANSI escape and control sequences (CSI, SGR, OSC-with-BEL).
const ANSI: &str = concat!(
    r"[\x1B\x{9B}][\[\]()#;?]*",
    r"(?:(?:(?:[a-zA-Z0-9]*(?:;[a-zA-Z0-9]*)*)?\x07)",
    r"|(?:(?:[0-9]{1,4}(?:;[0-9]{0,4})*)?[0-9A-PRZcf-ntqry=><~]))",
);

/// The legend sentence followed by its optional, order-fixed symbol rows.
const LEGEND: &str = concat!(
    r"Resource\s+actions\s+are\s+indicated\s+with\s+the\s+following\s+symbols:",
    r"(?P<create>\r?\n  \+ create)?",
    r"(?P<update>\r?\n  ~ update in-place)?",
    r"(?P<destroy>\r?\n  - destroy)?",
    r"(?P<replace>\r?\n-/\+ destroy and then create replacement)?",
);

/// The no-changes sentinel, tolerant of line wrapping.
const NO_CHANGES: &str =
    r"No\s+changes\.\s+Your\s+infrastructure\s+matches\s+the\s+configuration\.";

/// A whole `Plan:` summary line.
const SUMMARY: &str =
    r"(?m)^(Plan: ([0-9]+) to add, ([0-9]+) to change, ([0-9]+) to destroy\.)\r?$";

/// Read-only set of compiled patterns.
#[derive(Debug, Clone)]
pub struct PlanPatterns {
    pub(crate) ansi: Regex,
    pub(crate) legend: Regex,
    pub(crate) no_changes: Regex,
    pub(crate) summary: Regex,
}

impl PlanPatterns {
    /// Compiles all patterns.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern fails to compile.
    pub fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            ansi: Regex::new(ANSI)?,
            legend: Regex::new(LEGEND)?,
            no_changes: Regex::new(NO_CHANGES)?,
            summary: Regex::new(SUMMARY)?,
        })
    }
}
