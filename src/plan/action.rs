//! Change actions and the indicator-to-action mapping.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ParseError;

/// A single action the plan performs on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// Resource will be created.
    Create,
    /// Resource will be updated in place.
    Update,
    /// Resource will be destroyed.
    Delete,
    /// Data source will be read.
    Read,
    /// Nothing happens.
    NoOp,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Read => "read",
            Self::NoOp => "no-op",
        };
        write!(f, "{s}")
    }
}

/// Ordered actions for one resource change.
///
/// Only [`map_indicator`] builds these, so the sequence always holds either
/// one of `Create`, `Update`, `Delete`, or exactly `[Delete, Create]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Actions(Vec<Action>);

/// Coarse action kind used for grouping and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// `+`
    Create,
    /// `~`
    Update,
    /// `-`
    Delete,
    /// `-/+`
    Replace,
}

/// Maps a change indicator glyph to its action sequence.
///
/// Replacement is always `[Delete, Create]`.
///
/// # Errors
///
/// Returns [`ParseError::UnrecognizedAction`] for any token other than
/// `+`, `~`, `-` or `-/+`.
pub fn map_indicator(token: &str) -> Result<Actions, ParseError> {
    let actions = match token {
        "+" => vec![Action::Create],
        "~" => vec![Action::Update],
        "-" => vec![Action::Delete],
        "-/+" => vec![Action::Delete, Action::Create],
        other => return Err(ParseError::unrecognized_action(other)),
    };
    Ok(Actions(actions))
}

impl Actions {
    /// Returns the actions as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Action] {
        &self.0
    }

    /// Number of actions (1 or 2).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true for a plain create.
    #[must_use]
    pub fn is_create(&self) -> bool {
        self.0 == [Action::Create]
    }

    /// Returns true for an in-place update.
    #[must_use]
    pub fn is_update(&self) -> bool {
        self.0 == [Action::Update]
    }

    /// Returns true for a plain delete.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        self.0 == [Action::Delete]
    }

    /// Returns true for a destroy-then-create replacement.
    #[must_use]
    pub fn is_replace(&self) -> bool {
        self.0 == [Action::Delete, Action::Create]
    }

    /// Returns true if anything gets destroyed.
    #[must_use]
    pub fn is_destructive(&self) -> bool {
        self.0.contains(&Action::Delete)
    }

    /// The coarse kind of this action sequence.
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        if self.is_replace() {
            ActionKind::Replace
        } else if self.is_delete() {
            ActionKind::Delete
        } else if self.is_update() {
            ActionKind::Update
        } else {
            ActionKind::Create
        }
    }

    /// The plan glyph for these actions.
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        self.kind().symbol()
    }
}

impl ActionKind {
    /// All kinds, in legend order.
    pub const ALL: [Self; 4] = [Self::Create, Self::Update, Self::Delete, Self::Replace];

    /// The plan glyph for this kind.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Create => "+",
            Self::Update => "~",
            Self::Delete => "-",
            Self::Replace => "-/+",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Replace => "replace",
        };
        write!(f, "{s}")
    }
}

impl fmt::Display for Actions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", names.join(","))
    }
}
