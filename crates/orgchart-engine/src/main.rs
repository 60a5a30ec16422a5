//! CLI binary entry point for the org chart engine.
//!
//! Usage:
//!   orgchart [OPTIONS] <COMMAND>
//!
//! Options:
//!   -c, --config <FILE>    Path to configuration TOML file
//!   -r, --roster <FILE>    JSON roster to load (overrides config)
//!   -v, --verbose          Increase logging verbosity
//!
//! Query results are printed to stdout as JSON; logs go to stderr.
//! Mutating commands print the outcome and the resulting roster. Nothing
//! is written back to the roster file.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use orgchart_engine::config::{OrgChartConfig, DEFAULT_CONFIG_PATH};
use orgchart_engine::OrgChart;
use orgchart_protocol::EmployeeId;

/// Org chart engine - query and reshape a reporting hierarchy.
#[derive(Parser, Debug)]
#[command(name = "orgchart")]
#[command(about = "Query and validate changes to an organizational hierarchy")]
#[command(version)]
struct Cli {
    /// Path to configuration TOML file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON roster to load (bare array or {"employees": [...]}).
    #[arg(short, long, value_name = "FILE")]
    roster: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated: -v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every employee in roster order.
    List,
    /// List employees with no resolvable manager.
    Roots,
    /// List an employee's direct reports.
    Reports { id: EmployeeId },
    /// List everyone below an employee.
    Subordinates { id: EmployeeId },
    /// List an employee's managers up to the root.
    Chain { id: EmployeeId },
    /// Print an employee's level (0 = root).
    Level { id: EmployeeId },
    /// List a team with its management chains and everyone below it.
    Team { name: String },
    /// List teams with headcounts.
    Teams,
    /// Filter employees by name, designation or team.
    Search { query: String },
    /// Split text into matching and non-matching segments.
    Highlight { text: String, query: String },
    /// Print the level layout of the chart.
    Layout {
        /// Restrict the layout to one team's related set.
        #[arg(long)]
        team: Option<String>,
    },
    /// List employees whose manager is missing from the roster.
    Orphans,
    /// Propose a new manager for an employee (omit --manager to detach).
    Reassign {
        id: EmployeeId,
        #[arg(short, long)]
        manager: Option<EmployeeId>,
    },
    /// Remove an employee.
    Remove { id: EmployeeId },
    /// Answer newline-delimited JSON-RPC requests from stdin.
    Serve,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration, falling back to the default path if present.
    let config_path = cli.config.clone().or_else(|| {
        let path = PathBuf::from(DEFAULT_CONFIG_PATH);
        path.exists().then_some(path)
    });
    let mut config = OrgChartConfig::load(config_path.as_deref())?;

    // Apply CLI overrides.
    if let Some(roster) = cli.roster {
        config.roster.path = Some(roster);
    }

    // Adjust log level based on verbosity.
    let log_level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    // Initialize logging on stderr; stdout carries results.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut chart = OrgChart::from_config(&config)?;

    match cli.command {
        Command::List => print_json(&chart.get_all()),
        Command::Roots => print_json(&chart.roots()),
        Command::Reports { id } => print_json(&chart.direct_reports(id.as_str())),
        Command::Subordinates { id } => print_json(&chart.subordinate_closure(id.as_str())),
        Command::Chain { id } => print_json(&chart.ancestor_chain(id.as_str())),
        Command::Level { id } => print_json(&chart.level_of(id.as_str())),
        Command::Team { name } => print_json(&chart.team_related_set(&name)),
        Command::Teams => print_json(&chart.team_summaries()),
        Command::Search { query } => print_json(&chart.search(&query)),
        Command::Highlight { text, query } => print_json(&chart.highlight_spans(&text, &query)),
        Command::Layout { team } => print_json(&chart.layout(team.as_deref())),
        Command::Orphans => print_json(&chart.orphans()),
        Command::Reassign { id, manager } => {
            let outcome =
                chart.propose_reassignment(id.as_str(), manager.as_ref().map(EmployeeId::as_str));
            if let Some(message) = outcome.message() {
                eprintln!("{}", message);
            }
            print_json(&serde_json::json!({
                "outcome": outcome.to_result(),
                "employees": chart.get_all(),
            }))
        }
        Command::Remove { id } => {
            let removed = chart.remove(id.as_str());
            if removed.is_none() {
                tracing::warn!(employee = %id, "Nothing to remove");
            }
            print_json(&serde_json::json!({
                "removed": removed,
                "employees": chart.get_all(),
            }))
        }
        Command::Serve => {
            tracing::info!("Serving requests on stdin");
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            orgchart_engine::serve(&mut chart, stdin.lock(), stdout.lock())?;
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
