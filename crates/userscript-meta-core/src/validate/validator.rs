//! Schema validation of entries and metadata.

use super::error::ValidationError;
use super::item::{Constraint, Item, contains_whitespace, first_violation, is_empty};
use super::messages as msg;
use super::warnings::{Warning, collect_warnings};
use crate::metadata::{Entry, Metadata, to_entries};
use crate::options::Options;
use log::{debug, trace};
use std::sync::LazyLock;

/// Rules every key must satisfy before it is looked up in the schema.
static KEY_RULES: LazyLock<Vec<Constraint>> = LazyLock::new(|| {
    vec![
        Constraint::forbid(is_empty, msg::EMPTY_STRING_NOT_ALLOWED),
        Constraint::forbid(contains_whitespace, msg::WHITESPACE_NOT_ALLOWED),
    ]
});

/// Successfully validated input together with its warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated<T> {
    /// The input, unchanged.
    pub validated: T,
    /// Advisory warnings, in generator order.
    pub warnings: Vec<Warning>,
}

/// The outcome of validation: the validated input, or every error found.
pub type ValidationResult<T> = Result<Validated<T>, Vec<ValidationError>>;

fn validate_key(key: &str) -> Result<(), &'static str> {
    match first_violation(KEY_RULES.iter(), key) {
        Some(rule) => Err(rule.message()),
        None => Ok(()),
    }
}

fn already_reported(errors: &[ValidationError], kind: &str, key: &str) -> bool {
    errors
        .iter()
        .any(|e| e.kind() == kind && e.entry().is_some_and(|entry| entry.key == key))
}

/// Validates a list of entries against the schema in `options`.
///
/// All problems are collected before returning. Errors are ordered as
/// follows: missing required items (in schema order), then key and value
/// errors (in entry order), then repeated unique items (sorted by key).
///
/// On success the entries are returned unchanged along with the warnings of
/// every configured generator.
pub fn validate_entries(entries: Vec<Entry>, options: &Options) -> ValidationResult<Vec<Entry>> {
    let schema = options.schema();
    let mut errors = Vec::new();
    let mut duplicates: Vec<&Item> = Vec::new();

    for item in schema.items().filter(|item| item.required()) {
        if !entries.iter().any(|entry| entry.key == item.key()) {
            trace!("Required item missing: {}", item.key());
            errors.push(ValidationError::required_missing(item));
        }
    }

    for entry in &entries {
        if let Err(reason) = validate_key(&entry.key) {
            if !already_reported(&errors, "INVALID_KEY", &entry.key) {
                errors.push(ValidationError::invalid_key(entry, reason));
            }
            continue;
        }

        let Some(item) = schema.find_by_key(&entry.key) else {
            if !already_reported(&errors, "UNRECOGNIZED_KEY", &entry.key) {
                errors.push(ValidationError::unrecognized_key(entry));
            }
            continue;
        };

        if let Err(reason) = item.validate(&entry.value) {
            trace!("Invalid value for {}: {}", entry.key, reason);
            errors.push(ValidationError::invalid_value(entry, reason));
        }

        if item.unique()
            && !duplicates.iter().any(|d| d.key() == item.key())
            && entries.iter().filter(|e| e.key == entry.key).count() > 1
        {
            duplicates.push(item);
        }
    }

    duplicates.sort_by(|a, b| a.key().cmp(b.key()));
    errors.extend(
        duplicates
            .into_iter()
            .map(ValidationError::multiple_unique),
    );

    debug!(
        "Validated {} entries: {} errors",
        entries.len(),
        errors.len()
    );

    if !errors.is_empty() {
        return Err(errors);
    }

    let warnings = collect_warnings(options.warning_generators(), &entries);
    debug!("Generated {} warnings", warnings.len());
    Ok(Validated {
        validated: entries,
        warnings,
    })
}

/// Validates metadata against the schema in `options`.
///
/// The metadata is expanded into entries (renaming `_` to `-` in keys when
/// `underscores_as_hyphens` is set) and checked with [`validate_entries`]. On
/// success the original metadata is returned as-is.
pub fn validate(metadata: Metadata, options: &Options) -> ValidationResult<Metadata> {
    let entries = to_entries(&metadata, options.underscores_as_hyphens);
    let Validated { warnings, .. } = validate_entries(entries, options)?;
    Ok(Validated {
        validated: metadata,
        warnings,
    })
}
