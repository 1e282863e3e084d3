//! `rollcall compare`: reconcile two rosters and write the styled workbook.

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use rollcall_io::theme::WidthMode;
use rollcall_recon::{ReconInput, ReconResult, Table};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::exit_codes::EXIT_DIFFS;
use crate::settings::Settings;
use crate::CliError;

pub const DEFAULT_OUTPUT: &str = "nric_name_comparison.xlsx";

/// Rows shown per table in `--preview`.
const PREVIEW_LIMIT: usize = 20;

#[derive(Args)]
pub struct CompareArgs {
    /// Earlier roster ("Excel A"): xlsx, xls, xlsb, ods or csv
    pub baseline: PathBuf,

    /// Newer roster ("Excel B")
    pub current: PathBuf,

    /// Worksheet to read from the baseline (default: first sheet)
    #[arg(long, value_name = "SHEET")]
    pub baseline_sheet: Option<String>,

    /// Worksheet to read from the current roster (default: first sheet)
    #[arg(long, value_name = "SHEET")]
    pub current_sheet: Option<String>,

    /// Output workbook path
    #[arg(long, short = 'o', default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Settings file (default: <config dir>/rollcall/rollcall.toml when present)
    #[arg(long, env = "ROLLCALL_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Header of the column that identifies a person (overrides config)
    #[arg(long, value_name = "HEADER")]
    pub identity_column: Option<String>,

    /// Column width strategy for the workbook (overrides config)
    #[arg(long, value_enum)]
    pub widths: Option<WidthArg>,

    /// Print a JSON report to stdout
    #[arg(long)]
    pub json: bool,

    /// Print the ordinal and identity columns of both results to stdout
    #[arg(long, conflicts_with = "json")]
    pub preview: bool,

    /// Exit 1 when the rosters differ (diff(1) semantics)
    #[arg(long)]
    pub strict_exit: bool,

    /// Suppress the stderr summary
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum WidthArg {
    /// House column widths by column letter
    Fixed,
    /// Fit each column to its longest value
    Auto,
}

impl From<WidthArg> for WidthMode {
    fn from(arg: WidthArg) -> Self {
        match arg {
            WidthArg::Fixed => WidthMode::Fixed,
            WidthArg::Auto => WidthMode::Auto,
        }
    }
}

#[derive(Serialize)]
struct CompareReport<'a> {
    #[serde(flatten)]
    result: &'a ReconResult,
    export: ExportReport,
}

#[derive(Serialize)]
struct ExportReport {
    path: String,
    sheets: Vec<SheetEntry>,
    cells: usize,
}

#[derive(Serialize)]
struct SheetEntry {
    name: String,
    data_rows: usize,
    columns: usize,
}

pub fn cmd_compare(args: CompareArgs) -> Result<(), CliError> {
    let (mut settings, source) = Settings::resolve(args.config.as_deref())?;
    log::debug!("settings from {source}");

    if let Some(column) = args.identity_column {
        settings.recon.identity_column = column;
    }
    if let Some(widths) = args.widths {
        settings.theme.widths.mode = widths.into();
    }
    settings.validate()?;

    for input in [&args.baseline, &args.current] {
        if same_file(input, &args.output) {
            return Err(CliError::args(format!(
                "output {} would overwrite input {}",
                args.output.display(),
                input.display()
            ))
            .with_hint("pass a different path with -o"));
        }
    }

    let baseline = read_roster(&args.baseline, args.baseline_sheet.as_deref())?;
    let current = read_roster(&args.current, args.current_sheet.as_deref())?;
    let input = ReconInput::new(baseline, current);

    let result = rollcall_recon::run(&settings.recon, &input).map_err(|e| {
        let hint = e.missing_sides().map(|sides| {
            let found: Vec<String> = sides
                .iter()
                .map(|side| {
                    format!("{side} has [{}]", input.table(*side).headers.join(", "))
                })
                .collect();
            format!("{}; use --identity-column to pick another header", found.join("; "))
        });
        let err = CliError::recon(&e);
        match hint {
            Some(hint) => err.with_hint(hint),
            None => err,
        }
    })?;

    let document = rollcall_io::export(&result.sheets(), &settings.theme, &args.output)
        .map_err(|e| CliError::io(&e))?;

    if !args.quiet {
        eprintln!("{}", summary_line(&result));
        eprintln!(
            "wrote {} ({})",
            args.output.display(),
            document.summary()
        );
    }

    if args.preview {
        let ordinal = &settings.recon.ordinal.header;
        let identity = &settings.recon.identity_column;
        let added_title = format!("New in {}", result.meta.current_label);
        let removed_title = format!("Removed from {}", result.meta.baseline_label);
        print!("{}", render_preview(&added_title, &result.added, ordinal, identity));
        println!();
        print!("{}", render_preview(&removed_title, &result.removed, ordinal, identity));
    }

    if args.json {
        let report = CompareReport {
            result: &result,
            export: ExportReport {
                path: args.output.display().to_string(),
                sheets: document
                    .sheets
                    .iter()
                    .map(|s| SheetEntry {
                        name: s.name.clone(),
                        data_rows: s.data_rows,
                        columns: s.columns,
                    })
                    .collect(),
                cells: document.cells_exported,
            },
        };
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::args(format!("JSON serialization error: {e}")))?;
        println!("{json}");
    }

    if args.strict_exit && result.has_differences() {
        return Err(CliError { code: EXIT_DIFFS, message: String::new(), hint: None });
    }

    Ok(())
}

fn read_roster(path: &Path, sheet: Option<&str>) -> Result<Table, CliError> {
    if !path.exists() {
        return Err(CliError::args(format!("file not found: {}", path.display())));
    }
    rollcall_io::read_table(path, sheet).map_err(|e| {
        let err = CliError::io(&e);
        if matches!(e, rollcall_io::IoError::SheetNotFound { .. }) {
            err.with_hint(format!("list sheets with: rollcall sheets {}", path.display()))
        } else {
            err
        }
    })
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

pub fn summary_line(result: &ReconResult) -> String {
    format!(
        "New in {}: {} | Removed from {}: {}",
        result.meta.current_label,
        result.summary.added_rows,
        result.meta.baseline_label,
        result.summary.removed_rows,
    )
}

/// Two-column text view (ordinal, identity) of a result table.
pub fn render_preview(title: &str, table: &Table, ordinal: &str, identity: &str) -> String {
    let mut out = format!("{title} ({})\n", table.len());
    if table.is_empty() {
        out.push_str("  (none)\n");
        return out;
    }

    let ordinal_col = table.column_index(ordinal);
    let identity_col = table.column_index(identity);

    let cell = |row: usize, col: Option<usize>| -> String {
        col.and_then(|c| table.cell(row, c))
            .map(|v| v.to_string())
            .unwrap_or_default()
    };

    let shown = table.len().min(PREVIEW_LIMIT);
    let ordinals: Vec<String> = (0..shown).map(|r| cell(r, ordinal_col)).collect();
    let width = ordinals
        .iter()
        .map(|s| s.width())
        .chain(std::iter::once(ordinal.width()))
        .max()
        .unwrap_or(0);

    out.push_str(&format!("  {}  {}\n", pad(ordinal, width), identity));
    for (row, ordinal_value) in ordinals.iter().enumerate() {
        out.push_str(&format!("  {}  {}\n", pad(ordinal_value, width), cell(row, identity_col)));
    }
    if table.len() > shown {
        out.push_str(&format!("  … {} more\n", table.len() - shown));
    }
    out
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(fill))
}
