//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args, missing file) |
//! | 60-69   | report           | Report build and render codes            |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use rollcall_io::IoError;
use rollcall_recon::ReconError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unknown file extension.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Report (60-69)
// =============================================================================

/// Config file failed to parse or validate (empty layout, duplicate rows).
pub const EXIT_REPORT_INVALID_CONFIG: u8 = 60;

/// An input file lacks a required column, or its rows do not line up.
pub const EXIT_REPORT_SCHEMA: u8 = 61;

/// A table came out with no rows; nothing was rendered.
pub const EXIT_REPORT_EMPTY: u8 = 62;

/// Input could not be read or output could not be written.
pub const EXIT_REPORT_IO: u8 = 63;

/// Map an engine error to its exit code.
pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_REPORT_INVALID_CONFIG,
        ReconError::MissingColumn { .. } | ReconError::RaggedRow { .. } => EXIT_REPORT_SCHEMA,
        ReconError::EmptyReport { .. } => EXIT_REPORT_EMPTY,
    }
}

/// Map a file loading/writing error to its exit code.
pub fn io_exit_code(err: &IoError) -> u8 {
    match err {
        IoError::UnknownFormat(_) => EXIT_USAGE,
        IoError::Read { .. } | IoError::Write { .. } | IoError::MissingSheet { .. } => EXIT_REPORT_IO,
        IoError::NoHeader { .. } => EXIT_REPORT_SCHEMA,
        IoError::Dataset(inner) => recon_exit_code(inner),
    }
}
