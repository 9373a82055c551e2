//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::plan::{ActionKind, ChangeType};

/// tfinspect - Browse the changes in a `terraform plan` capture.
#[derive(Parser, Debug)]
#[command(name = "tfinspect")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true, env = "TFINSPECT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Plan text to read, `-` for stdin.
    #[arg(short, long, global = true, default_value = "-")]
    pub input: PathBuf,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Fail when the actions section is missing from a plan that has changes.
    #[arg(long, global = true)]
    pub strict: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List resource changes.
    List {
        /// Only show changes from these sections.
        #[arg(long = "section", value_enum)]
        sections: Vec<ChangeType>,

        /// Only show changes with these actions.
        #[arg(long = "action", value_enum)]
        actions: Vec<ActionKind>,

        /// Print each change's diff below the table.
        #[arg(short, long)]
        diff: bool,
    },

    /// Show the diff of one resource.
    Show {
        /// Full resource address, including any module path.
        address: String,

        /// Only look in this section.
        #[arg(long, value_enum)]
        section: Option<ChangeType>,
    },

    /// Show the plan summary and change counts.
    Summary,

    /// Check that the input is a recognizable plan.
    Validate,

    /// Print the input with terminal escape sequences removed.
    Strip,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns true if input comes from stdin.
    #[must_use]
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }
}
