//! End-to-end read and write pipelines.
//!
//! Reading goes text → block → entries → validated entries → metadata.
//! Writing goes metadata → validated entries → block text. Each stage runs
//! only if the previous one succeeded.

use crate::metadata::{Metadata, from_entries, to_entries};
use crate::options::Options;
use crate::parse::{ExtractionError, extract_block, parse_block};
use crate::stringify::stringify_entries;
use crate::validate::{Validated, ValidationError, Warning, validate_entries};
use log::debug;
use serde::Serialize;
use thiserror::Error;

/// Why reading a userscript failed, tagged by the stage that failed.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "failure", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadError {
    /// The metadata block could not be located.
    #[error("could not extract metadata block: {reason}")]
    Extract {
        #[from]
        reason: ExtractionError,
    },

    /// Some lines of the block are not directives.
    #[error("{} line(s) could not be parsed", .lines.len())]
    Parse { lines: Vec<String> },

    /// The entries do not satisfy the schema.
    #[error("{} validation error(s)", .errors.len())]
    Validate { errors: Vec<ValidationError> },
}

/// Metadata read from a userscript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Read {
    pub metadata: Metadata,
    pub warnings: Vec<Warning>,
}

/// A validated metadata block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stringified {
    pub stringified: String,
    pub warnings: Vec<Warning>,
}

/// Extracts, parses and validates the metadata block of a userscript.
///
/// Keys are converted back with `underscores_as_hyphens` (`@run-at` becomes
/// `run_at` by default).
pub fn read_and_validate(text: &str, options: &Options) -> Result<Read, ReadError> {
    let block = extract_block(text)?;
    let entries = parse_block(&block).map_err(|lines| ReadError::Parse { lines })?;
    let Validated {
        validated,
        warnings,
    } = validate_entries(entries, options).map_err(|errors| ReadError::Validate { errors })?;

    let metadata = from_entries(&validated, options.underscores_as_hyphens);
    debug!(
        "Read {} keys with {} warnings",
        metadata.len(),
        warnings.len()
    );
    Ok(Read { metadata, warnings })
}

/// Validates metadata and renders it as a metadata block.
pub fn validate_and_stringify(
    metadata: &Metadata,
    options: &Options,
) -> Result<Stringified, Vec<ValidationError>> {
    let entries = to_entries(metadata, options.underscores_as_hyphens);
    let Validated {
        validated,
        warnings,
    } = validate_entries(entries, options)?;
    Ok(Stringified {
        stringified: stringify_entries(&validated, options),
        warnings,
    })
}
