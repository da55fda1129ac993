//! Error types, exit codes and input handling for the CLI.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use userscript_meta_core::Metadata;

/// Errors that stop the CLI before any metadata is checked.
#[derive(Debug, Error)]
pub enum CliError {
    /// A path given on the command line does not exist.
    #[error("path '{}' does not exist", .0.display())]
    PathNotFound(PathBuf),

    /// No userscripts were found under the given paths.
    #[error("no userscript files (*.user.js) found")]
    NoUserscripts,

    /// Failed to read a file.
    #[error("failed to read '{}': {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The metadata input is not valid JSON metadata.
    #[error("invalid metadata JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Application exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every file passed.
    Success = 0,
    /// Startup failed (bad arguments, unreadable input or internal error).
    StartupFailure = 1,
    /// Reading or validation failed, or warnings were found with `--fail-on-warnings`.
    ValidationFailed = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

impl ExitCode {
    /// Determines the exit code from the outcome of a run.
    pub fn for_results(has_failures: bool, has_warnings: bool, fail_on_warnings: bool) -> Self {
        if has_failures || (fail_on_warnings && has_warnings) {
            Self::ValidationFailed
        } else {
            Self::Success
        }
    }
}

/// Reads a whole file into a string.
pub fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads from `path`, or from `reader` when no path is given.
pub fn read_input<R: Read>(path: Option<&Path>, mut reader: R) -> Result<String, CliError> {
    match path {
        Some(path) => read_file(path),
        None => {
            let mut input = String::new();
            reader.read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

/// Parses metadata from a JSON object of strings, `true` and string arrays.
pub fn parse_metadata_json(input: &str) -> Result<Metadata, CliError> {
    Ok(serde_json::from_str(input)?)
}
