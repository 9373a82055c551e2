//! Plan text parser.
//!
//! A single pass over the captured output of `terraform plan`:
//!
//! 1. strip terminal escapes ([`preprocess`])
//! 2. check the text is a plan ([`validate`])
//! 3. cut it into outside-changes and actions segments ([`split`])
//! 4. extract and classify change blocks per segment ([`extract`], [`classify`])
//! 5. pick up the summary line ([`summary`])
//!
//! Every stage is a pure function of its input. The only shared state is the
//! compiled [`PlanPatterns`], owned by a [`PlanParser`] and never mutated.

pub mod classify;
pub mod extract;
mod patterns;
pub mod preprocess;
pub mod split;
pub mod summary;
pub mod validate;

pub use patterns::PlanPatterns;
pub use split::ACTIONS_MARKER;
pub use validate::{Legend, Recognition};

use tracing::debug;

use crate::error::ParseError;
use crate::plan::{ChangeType, Plan, PlanDigest, ResourceChange};

/// A parsed plan together with facts about its source text.
#[derive(Debug, Clone)]
pub struct Inspection {
    /// The parsed plan.
    pub plan: Plan,
    /// Digest of the preprocessed text.
    pub digest: PlanDigest,
    /// What made the text recognizable.
    pub recognition: Recognition,
}

/// Parser for `terraform plan` text output.
///
/// Build one at startup and share it; parsing takes `&self`.
#[derive(Debug, Clone)]
pub struct PlanParser {
    patterns: PlanPatterns,
    strict_actions: bool,
}

impl PlanParser {
    /// Creates a parser with compiled patterns.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            patterns: PlanPatterns::compile()?,
            strict_actions: false,
        })
    }

    /// Requires the actions marker unless the plan reports no changes.
    ///
    /// Off by default: a plan without the marker yields only outside changes.
    #[must_use]
    pub fn with_strict_actions(mut self, strict: bool) -> Self {
        self.strict_actions = strict;
        self
    }

    /// Parses plan text into a [`Plan`].
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] raised by any stage; no partial plan
    /// is produced.
    pub fn parse(&self, input: &str) -> Result<Plan, ParseError> {
        let text = preprocess::strip_ansi(&self.patterns.ansi, input);
        self.parse_clean(&text).map(|(plan, _)| plan)
    }

    /// Parses plan text and also reports its digest and recognized forms.
    ///
    /// # Errors
    ///
    /// Same as [`parse`](Self::parse).
    pub fn inspect(&self, input: &str) -> Result<Inspection, ParseError> {
        let text = preprocess::strip_ansi(&self.patterns.ansi, input);
        let (plan, recognition) = self.parse_clean(&text)?;
        Ok(Inspection {
            plan,
            digest: PlanDigest::of(&text),
            recognition,
        })
    }

    /// Strips escapes and checks the text is a plan, without extracting.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidFormat`] for text that is not a plan.
    pub fn recognize(&self, input: &str) -> Result<Recognition, ParseError> {
        let text = preprocess::strip_ansi(&self.patterns.ansi, input);
        validate::validate(&self.patterns, &text)
    }

    /// Removes terminal escape sequences from `input`.
    #[must_use]
    pub fn preprocess(&self, input: &str) -> String {
        preprocess::strip_ansi(&self.patterns.ansi, input).into_owned()
    }

    fn parse_clean(&self, text: &str) -> Result<(Plan, Recognition), ParseError> {
        let recognition = validate::validate(&self.patterns, text)?;

        let segments = split::split(text);
        if self.strict_actions && !segments.has_actions_marker() && !recognition.no_changes {
            return Err(ParseError::MissingActionsMarker);
        }
        debug!(
            outside_len = segments.outside.len(),
            actions_len = segments.actions.len(),
            "Split plan into segments"
        );

        let mut changes = parse_segment(segments.outside, ChangeType::OutsideChange)?;
        changes.extend(parse_segment(segments.actions, ChangeType::ActionChange)?);

        let summary = summary::extract_summary(&self.patterns, text, &recognition)?;
        debug!(changes = changes.len(), summary = %summary.text, "Parsed plan");

        Ok((
            Plan {
                changes,
                summary: summary.text,
                totals: summary.totals,
            },
            recognition,
        ))
    }
}

/// Extracts and classifies every block of one segment.
fn parse_segment(segment: &str, change_type: ChangeType) -> Result<Vec<ResourceChange>, ParseError> {
    let blocks = extract::extract_blocks(segment)?;
    debug!(section = %change_type, blocks = blocks.len(), "Extracted change blocks");
    blocks
        .iter()
        .map(|block| classify::classify(block, change_type))
        .collect()
}
