//! `gate-sheet` - load a gate tracking workbook and query it from the shell.
//!
//! ## Commands
//!
//! - `summary`: group, status and reverse counts
//! - `find`: one gate by id
//! - `group`: every gate of a group (all gates without a group)
//! - `failures`: rows dropped during the build, with the reason

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use gate_sheet::gate::{BuildOptions, GateBook};
use gate_sheet::spreadsheet::{load_table, Criteria, Range};
use glob::Pattern;
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "gate-sheet")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Read gate records from a tracking spreadsheet", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Workbook to read (.xlsx, .xlsm, .xlsb, .xls, .ods)
    #[arg(env = "GATE_SHEET_FILE")]
    file: PathBuf,

    /// Sheet name pattern (glob); the first matching sheet is read
    #[arg(long, env = "GATE_SHEET_SHEET")]
    sheet: Option<String>,

    /// Cell range holding the header and gate rows, e.g. A1:BF61
    #[arg(long, env = "GATE_SHEET_RANGE")]
    range: Option<String>,

    /// Comma-separated text values treated as empty cells
    #[arg(long, env = "GATE_SHEET_NULLS", value_delimiter = ',')]
    nulls: Option<Vec<String>>,

    /// Treat spreadsheet error cells (#REF!, #N/A, ...) as empty
    #[arg(long, env = "GATE_SHEET_ERROR_AS_NULL")]
    error_as_null: bool,

    /// Number of gate rows a complete sheet carries
    #[arg(long, env = "GATE_SHEET_EXPECTED_ROWS", default_value_t = BuildOptions::default().expected_rows)]
    expected_rows: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print group, status and reverse counts
    Summary,

    /// Print one gate
    Find {
        /// Gate id, e.g. G05
        gate_id: String,
    },

    /// Print the gates of a group, or every gate when no group is given
    Group {
        group: Option<u32>,
    },

    /// Print rows dropped during the build and build warnings
    Failures,
}

impl Cli {
    fn criteria(&self) -> Result<Criteria> {
        let mut criteria = Criteria::default();
        if let Some(sheet) = &self.sheet {
            let pattern = Pattern::new(sheet).with_context(|| format!("Invalid sheet pattern '{}'", sheet))?;
            criteria.sheet_name_patterns = Some(vec![pattern]);
        }
        if let Some(range) = &self.range {
            criteria.range = Some(Range::try_from(range.as_str())?);
        }
        if let Some(nulls) = &self.nulls {
            criteria.nulls = nulls.iter().cloned().chain([String::new()]).collect::<HashSet<String>>();
        }
        criteria.error_as_null = self.error_as_null;
        Ok(criteria)
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    gate_sheet::init_tracing(cli.json_logs, level);

    let criteria = cli.criteria()?;
    let table = load_table(&cli.file, &criteria)?;

    let mut book = GateBook::new(BuildOptions {
        expected_rows: cli.expected_rows,
    });
    let set = book
        .load(&table)
        .with_context(|| format!("Build gates from '{}' failed", cli.file.display()))?;
    info!(gates = set.len(), dropped = set.failures.len(), "workbook loaded");

    match &cli.command {
        Commands::Summary => print_json(&book.summarize()?),
        Commands::Find { gate_id } => {
            let record = book
                .find_by_gate_id(gate_id)
                .ok_or_else(|| anyhow!("Gate '{}' not found", gate_id))?;
            print_json(record)
        }
        Commands::Group { group } => print_json(&book.filter_by_group(*group)),
        Commands::Failures => {
            let set = book.current().ok_or_else(|| anyhow!("No gate records loaded"))?;
            print_json(&serde_json::json!({
                "failures": set.failures,
                "warnings": set.warnings,
            }))
        }
    }
}
