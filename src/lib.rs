// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![forbid(unsafe_code)]               // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # tfplan inspector
//!
//! Turns the human-readable text printed by `terraform plan` into a
//! structured list of resource changes.
//!
//! ## Overview
//!
//! A plan capture is read once and parsed into a [`Plan`]:
//!
//! - changes terraform detected outside of its control
//! - changes terraform will perform, each with its address, resource type,
//!   name, actions and verbatim diff
//! - the summary line, or the no-changes sentinel
//!
//! Colored captures (`terraform plan` without `-no-color`) are accepted; the
//! escape sequences are stripped before anything else runs.
//!
//! ## Modules
//!
//! - [`parser`]: The parsing pipeline and [`PlanParser`]
//! - [`plan`]: Change records, actions and read-only projections
//! - [`config`]: Optional configuration for the CLI
//! - [`error`]: Error types
//! - [`cli`]: Command-line interface
//!
//! ## Example
//!
//! ```
//! use tfplan_inspector::PlanParser;
//!
//! let text = "\
//! Resource actions are indicated with the following symbols:
//!   + create
//!
//! Terraform will perform the following actions:
//!
//!   ## aws_sqs_queue.app_queue will be created
//!   + resource \"aws_sqs_queue\" \"app_queue\" {
//!       + name = \"example-queue\"
//!     }
//!
//! Plan: 1 to add, 0 to change, 0 to destroy.
//! ";
//!
//! let plan = PlanParser::new()?.parse(text)?;
//! assert_eq!(plan.changes.len(), 1);
//! assert!(plan.changes[0].actions.is_create());
//! assert_eq!(plan.summary, "Plan: 1 to add, 0 to change, 0 to destroy.");
//! # Ok::<(), tfplan_inspector::InspectorError>(())
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod config;
pub mod error;
pub mod parser;
pub mod plan;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, Commands, OutputFormatter};
pub use config::{ConfigParser, ConfigValidator, InspectorConfig};
pub use error::{ConfigError, InspectorError, ParseError, Result};
pub use parser::{Inspection, PlanParser};
pub use plan::{
    map_indicator, Action, ActionKind, Actions, ChangeFilter, ChangeType, Plan, PlanDigest,
    ResourceChange,
};
