//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract: scripts rely on them.
//!
//! | Code | Meaning                                                  |
//! |------|----------------------------------------------------------|
//! | 0    | Success                                                  |
//! | 1    | Differences found (`compare --strict-exit` only)         |
//! | 2    | CLI usage error (bad args, missing file)                 |
//! | 3    | Config file unreadable or invalid                        |
//! | 4    | Input validation failed (identity column missing)        |
//! | 5    | Input cannot be read as a table (format, missing sheet)  |
//! | 6    | Result workbook could not be rendered or written         |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into `CliError` construction

use rollcall_io::IoError;
use rollcall_recon::ReconError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Rosters differ. Like `diff(1)`, exit 1 means "files differ."
pub const EXIT_DIFFS: u8 = 1;

/// Usage error - bad arguments, missing input file.
pub const EXIT_USAGE: u8 = 2;

/// Config file could not be read, parsed or validated.
pub const EXIT_CONFIG: u8 = 3;

/// Identity column absent from one or both rosters.
pub const EXIT_VALIDATION: u8 = 4;

/// Input is not a readable table (unsupported type, corrupt file, no such sheet).
pub const EXIT_FORMAT: u8 = 5;

/// Export failed; no workbook was written.
pub const EXIT_EXPORT: u8 = 6;

/// Map an engine error to its exit code.
pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_CONFIG,
        ReconError::MissingIdentityColumn { .. } => EXIT_VALIDATION,
    }
}

/// Map an I/O error to its exit code.
pub fn io_exit_code(err: &IoError) -> u8 {
    match err {
        IoError::Read { .. } => EXIT_USAGE,
        IoError::Format { .. } | IoError::SheetNotFound { .. } => EXIT_FORMAT,
        IoError::Theme(_) => EXIT_CONFIG,
        IoError::Export(_) | IoError::Write { .. } => EXIT_EXPORT,
    }
}
