//! Error types for metadata validation.
//!
//! Validation never stops at the first problem; every [`ValidationError`]
//! found in one pass is reported together.

use super::item::Item;
use crate::metadata::Entry;
use serde::Serialize;
use thiserror::Error;

/// A structural problem with a set of entries.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationError {
    /// The key itself is malformed (empty or containing whitespace).
    #[error("invalid key '{}': {reason}", .entry.key)]
    InvalidKey {
        /// The first entry carrying the key.
        entry: Entry,
        /// Why the key is invalid.
        reason: String,
    },

    /// The value failed the item's rules.
    #[error("invalid value for @{}: {reason}", .entry.key)]
    InvalidValue {
        /// The offending entry.
        entry: Entry,
        /// The message of the first rule the value broke.
        reason: String,
    },

    /// A unique item's key appeared more than once.
    #[error("@{} may only appear once", .item.key())]
    MultipleUnique {
        /// The item that was repeated.
        item: Item,
    },

    /// A required item's key never appeared.
    #[error("@{} is required", .item.key())]
    RequiredMissing {
        /// The missing item.
        item: Item,
    },

    /// The key is well-formed but not in the schema.
    #[error("unrecognized key '{}'", .entry.key)]
    UnrecognizedKey {
        /// The first entry carrying the key.
        entry: Entry,
    },
}

impl ValidationError {
    /// Creates an invalid key error.
    pub fn invalid_key(entry: &Entry, reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            entry: entry.clone(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid value error.
    pub fn invalid_value(entry: &Entry, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            entry: entry.clone(),
            reason: reason.into(),
        }
    }

    /// Creates a multiple unique error.
    pub fn multiple_unique(item: &Item) -> Self {
        Self::MultipleUnique { item: item.clone() }
    }

    /// Creates a required missing error.
    pub fn required_missing(item: &Item) -> Self {
        Self::RequiredMissing { item: item.clone() }
    }

    /// Creates an unrecognized key error.
    pub fn unrecognized_key(entry: &Entry) -> Self {
        Self::UnrecognizedKey {
            entry: entry.clone(),
        }
    }

    /// Returns the kind name, e.g. `INVALID_VALUE`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidKey { .. } => "INVALID_KEY",
            Self::InvalidValue { .. } => "INVALID_VALUE",
            Self::MultipleUnique { .. } => "MULTIPLE_UNIQUE",
            Self::RequiredMissing { .. } => "REQUIRED_MISSING",
            Self::UnrecognizedKey { .. } => "UNRECOGNIZED_KEY",
        }
    }

    /// Returns the entry this error refers to, if any.
    pub fn entry(&self) -> Option<&Entry> {
        match self {
            Self::InvalidKey { entry, .. }
            | Self::InvalidValue { entry, .. }
            | Self::UnrecognizedKey { entry } => Some(entry),
            Self::MultipleUnique { .. } | Self::RequiredMissing { .. } => None,
        }
    }

    /// Returns the item this error refers to, if any.
    pub fn item(&self) -> Option<&Item> {
        match self {
            Self::MultipleUnique { item } | Self::RequiredMissing { item } => Some(item),
            _ => None,
        }
    }

    /// Returns the reason string for key and value errors.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::InvalidKey { reason, .. } | Self::InvalidValue { reason, .. } => Some(reason),
            _ => None,
        }
    }
}
