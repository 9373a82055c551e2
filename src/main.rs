//! tfinspect CLI entrypoint.
//!
//! This is the main entrypoint for the tfinspect command-line tool.

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use tfplan_inspector::cli::{Cli, Commands, OutputFormatter};
use tfplan_inspector::config::{ConfigParser, InspectorConfig};
use tfplan_inspector::error::{InspectorError, Result};
use tfplan_inspector::parser::{Inspection, PlanParser};
use tfplan_inspector::plan::{ActionKind, ChangeFilter, ChangeType, ResourceChange};

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Initialize logging
    init_logging(cli.verbose);

    let verbose = cli.verbose;
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if verbose {
                let mut source = std::error::Error::source(&e);
                while let Some(cause) = source {
                    eprintln!("  caused by: {cause}");
                    source = cause.source();
                }
            }
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Main entry point.
fn run(cli: Cli) -> Result<()> {
    let config = ConfigParser::new().load(cli.config.as_deref())?;

    let color = config.display.color && !cli.no_color;
    colored::control::set_override(color);

    let formatter = OutputFormatter::new(cli.output)
        .with_max_address_width(config.display.max_address_width);

    let input = read_input(&cli.input, cli.reads_stdin())?;
    let parser = PlanParser::new()?.with_strict_actions(cli.strict);

    // Neither command needs change extraction.
    match cli.command {
        Commands::Validate => return cmd_validate(&parser, &input, &formatter),
        Commands::Strip => return emit(&parser.preprocess(&input)),
        _ => {}
    }

    let inspection = parser.inspect(&input)?;
    info!(
        "Parsed plan {} with {} changes",
        inspection.digest.short(),
        inspection.plan.changes.len()
    );

    match cli.command {
        Commands::List {
            sections,
            actions,
            diff,
        } => cmd_list(&inspection, &config, &sections, &actions, diff, &formatter),
        Commands::Show { address, section } => {
            cmd_show(&inspection, &address, section, &formatter)
        }
        Commands::Summary => cmd_summary(&inspection, &formatter),
        Commands::Validate | Commands::Strip => Ok(()),
    }
}

/// Reads the plan text from a file or stdin.
fn read_input(path: &Path, stdin: bool) -> Result<String> {
    if stdin {
        debug!("Reading plan from stdin");
        Ok(std::io::read_to_string(std::io::stdin())?)
    } else {
        debug!("Reading plan from: {}", path.display());
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Writes command output to stdout.
fn emit(output: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", output.trim_end())?;
    Ok(())
}

/// List changes.
fn cmd_list(
    inspection: &Inspection,
    config: &InspectorConfig,
    sections: &[ChangeType],
    actions: &[ActionKind],
    diff: bool,
    formatter: &OutputFormatter,
) -> Result<()> {
    // Flags replace the configured selection rather than narrowing it.
    let mut filter = config.filter.to_filter();
    if !sections.is_empty() {
        filter = filter.with_sections(sections.iter().copied());
    }
    if !actions.is_empty() {
        filter = filter.with_kinds(actions.iter().copied());
    }

    let changes: Vec<&ResourceChange> = filter.apply(&inspection.plan).collect();
    debug!("{} of {} changes selected", changes.len(), inspection.plan.changes.len());

    let show_diff = diff || config.display.show_diff;
    emit(&formatter.format_list(inspection, &changes, show_diff)?)
}

/// Show the diff of one resource.
fn cmd_show(
    inspection: &Inspection,
    address: &str,
    section: Option<ChangeType>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let filter = ChangeFilter::new().with_sections(section);
    let changes: Vec<&ResourceChange> = inspection
        .plan
        .find(address)
        .filter(|c| filter.matches(c))
        .collect();

    if changes.is_empty() {
        return Err(InspectorError::internal(format!(
            "no change found for {address}"
        )));
    }

    emit(&formatter.format_changes(&changes)?)
}

/// Show the plan summary.
fn cmd_summary(inspection: &Inspection, formatter: &OutputFormatter) -> Result<()> {
    emit(&formatter.format_summary(inspection)?)
}

/// Check that the input is a plan.
fn cmd_validate(parser: &PlanParser, input: &str, formatter: &OutputFormatter) -> Result<()> {
    let recognition = parser.recognize(input)?;
    emit(&formatter.format_recognition(&recognition)?)
}
