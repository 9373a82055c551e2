//! Splitting plan text into its outside-changes and actions segments.

/// Marker that starts the actions section.
pub const ACTIONS_MARKER: &str = "Terraform will perform the following actions";

/// The two segments of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segments<'a> {
    /// Everything before the actions marker.
    pub outside: &'a str,
    /// The marker and everything after it; empty when the marker is absent.
    pub actions: &'a str,
}

impl Segments<'_> {
    /// Returns true if the actions marker was found.
    #[must_use]
    pub fn has_actions_marker(&self) -> bool {
        !self.actions.is_empty()
    }
}

/// Cuts `text` at the first occurrence of [`ACTIONS_MARKER`].
#[must_use]
pub fn split(text: &str) -> Segments<'_> {
    match text.find(ACTIONS_MARKER) {
        Some(idx) => {
            let (outside, actions) = text.split_at(idx);
            Segments { outside, actions }
        }
        None => Segments {
            outside: text,
            actions: "",
        },
    }
}
