//! Error types for metadata block extraction.

use serde::Serialize;
use thiserror::Error;

/// Why a metadata block could not be located in a userscript.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtractionError {
    /// The text contains no line comments at all.
    #[error("no line comments found")]
    NoLineComments,

    /// No line comment is a start tag.
    #[error("no start tag ({}) found", super::START_TAG)]
    NoStartTag,

    /// No line comment is an end tag.
    #[error("no end tag ({}) found", super::END_TAG)]
    NoEndTag,

    /// The first end tag comes before the first start tag.
    #[error("end tag ({}) appears before start tag ({})", super::END_TAG, super::START_TAG)]
    EndTagBeforeStartTag,
}
