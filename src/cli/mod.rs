//! CLI module for the plan inspector.
//!
//! This module provides the command-line interface for browsing the
//! changes in a captured `terraform plan`.

mod commands;
mod output;

pub use commands::{Cli, Commands, OutputFormat};
pub use output::OutputFormatter;
