//! Terminal escape stripping.

use regex::Regex;
use std::borrow::Cow;

/// Removes every ANSI escape and control sequence from `text`.
///
/// Stripping repeats until nothing matches, because removing one sequence
/// can join the halves of another. The result is therefore a fixed point and
/// stripping it again is a no-op. Clean input is returned borrowed.
#[must_use]
pub fn strip_ansi<'a>(ansi: &Regex, text: &'a str) -> Cow<'a, str> {
    let mut current = Cow::Borrowed(text);
    while ansi.is_match(&current) {
        let stripped = ansi.replace_all(&current, "").into_owned();
        current = Cow::Owned(stripped);
    }
    current
}
