//! Plan data model.
//!
//! This module defines the typed records produced by the parser and the
//! read-only projections the browsing layer uses to display them.

mod action;
mod change;
mod digest;
mod filter;

pub use action::{map_indicator, Action, ActionKind, Actions};
pub use change::{
    ChangeType, ChangesByAction, Plan, PlanTotals, ResourceChange, NO_CHANGES_SENTINEL,
};
pub use digest::PlanDigest;
pub use filter::ChangeFilter;
