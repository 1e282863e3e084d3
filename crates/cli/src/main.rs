// rollcall CLI - compare two staff rosters by name

mod compare;
mod exit_codes;
mod logging;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};

use compare::CompareArgs;
use exit_codes::{io_exit_code, recon_exit_code, EXIT_CONFIG, EXIT_SUCCESS, EXIT_USAGE};
use settings::Settings;

#[derive(Parser)]
#[command(name = "rollcall")]
#[command(about = "Find who joined and who left between two roster spreadsheets")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Increase log detail on stderr (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two rosters and write the added/removed workbook
    #[command(after_help = "\
Examples:
  rollcall compare march.xlsx april.xlsx
  rollcall compare march.xlsx april.xlsx -o changes.xlsx --preview
  rollcall compare a.xlsx b.csv --current-sheet Staff --identity-column \"Staff Name\"
  rollcall compare a.xlsx b.xlsx --json --strict-exit > report.json")]
    Compare(CompareArgs),

    /// List the worksheets of a workbook
    #[command(after_help = "\
Examples:
  rollcall sheets april.xlsx")]
    Sheets {
        /// Workbook to inspect
        file: PathBuf,
    },

    /// Check a settings file without running a comparison
    #[command(after_help = "\
Examples:
  rollcall validate
  rollcall validate --config team.toml")]
    Validate {
        /// Settings file (default: <config dir>/rollcall/rollcall.toml when present)
        #[arg(long, env = "ROLLCALL_CONFIG", value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("ROLLCALL_REVISION"), ")",
        "\nengine:  rollcall-recon ", env!("CARGO_PKG_VERSION"),
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Compare(args) => compare::cmd_compare(args),
        Commands::Sheets { file } => cmd_sheets(file),
        Commands::Validate { config } => cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CONFIG, message: msg.into(), hint: None }
    }

    pub fn io(err: &rollcall_io::IoError) -> Self {
        Self { code: io_exit_code(err), message: err.to_string(), hint: None }
    }

    pub fn recon(err: &rollcall_recon::ReconError) -> Self {
        Self { code: recon_exit_code(err), message: err.to_string(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// sheets
// ============================================================================

fn cmd_sheets(file: PathBuf) -> Result<(), CliError> {
    if !file.exists() {
        return Err(CliError::args(format!("file not found: {}", file.display())));
    }

    let ext = file
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    if matches!(ext.as_str(), "csv" | "tsv" | "txt") {
        eprintln!("{} is a delimited file with a single table", file.display());
        return Ok(());
    }

    let names = rollcall_io::xlsx::list_sheets(&file).map_err(|e| CliError::io(&e))?;
    for name in names {
        println!("{name}");
    }
    Ok(())
}

// ============================================================================
// validate
// ============================================================================

fn cmd_validate(config: Option<PathBuf>) -> Result<(), CliError> {
    let (settings, source) = Settings::resolve(config.as_deref())?;
    let recon = &settings.recon;

    println!("config ok ({source})");
    println!("identity column: {}", recon.identity_column);
    println!("ordinal column:  {}", recon.ordinal.header);
    println!(
        "sheets:          {}, {}",
        recon.added_sheet_name(),
        recon.removed_sheet_name()
    );
    Ok(())
}
