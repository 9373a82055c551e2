//! Configuration specification types for the inspector.
//!
//! These structs map to the optional `.tfinspect.yaml` file. Every field has
//! a default, so an empty file (or no file) is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::plan::{ActionKind, ChangeFilter, ChangeType};

/// The root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct InspectorConfig {
    /// Display settings.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Default change selection.
    #[serde(default)]
    pub filter: FilterConfig,
}

/// Display settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    /// Color action glyphs in text output.
    #[serde(default = "default_true")]
    pub color: bool,
    /// Print diff bodies under each listed change.
    #[serde(default)]
    pub show_diff: bool,
    /// Truncation width for the address column.
    #[serde(default = "default_max_address_width")]
    pub max_address_width: usize,
}

/// Default change selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    /// Sections to show.
    #[serde(default = "default_sections")]
    pub sections: Vec<ChangeType>,
    /// Action kinds to show.
    #[serde(default = "default_actions")]
    pub actions: Vec<ActionKind>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_diff: false,
            max_address_width: default_max_address_width(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            sections: default_sections(),
            actions: default_actions(),
        }
    }
}

impl FilterConfig {
    /// Builds the change filter for these settings.
    #[must_use]
    pub fn to_filter(&self) -> ChangeFilter {
        ChangeFilter::new()
            .with_sections(self.sections.iter().copied())
            .with_kinds(self.actions.iter().copied())
    }
}

const fn default_true() -> bool {
    true
}

const fn default_max_address_width() -> usize {
    80
}

fn default_sections() -> Vec<ChangeType> {
    vec![ChangeType::OutsideChange, ChangeType::ActionChange]
}

fn default_actions() -> Vec<ActionKind> {
    ActionKind::ALL.to_vec()
}
