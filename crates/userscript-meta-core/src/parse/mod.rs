//! Extraction and parsing of userscript metadata blocks.
//!
//! A metadata block is a run of `//` line comments delimited by a start tag
//! and an end tag:
//!
//! ```text
//! // ==UserScript==
//! // @name      Example Userscript
//! // @noframes
//! // ==/UserScript==
//! ```
//!
//! # Example
//!
//! ```rust
//! use userscript_meta_core::parse::{extract_block, parse_block};
//!
//! let source = "// ==UserScript==\n// @name Example\n// ==/UserScript==\nrun();\n";
//!
//! let block = extract_block(source).unwrap();
//! let entries = parse_block(&block).unwrap();
//! assert_eq!(entries[0].key, "name");
//! ```

mod comments;
mod error;
mod lexer;
mod parser;

/// Comment content that opens a metadata block.
pub const START_TAG: &str = "==UserScript==";

/// Comment content that closes a metadata block.
pub const END_TAG: &str = "==/UserScript==";

/// Prefix of every line in a metadata block.
pub const COMMENT_PREFIX: &str = "//";

/// Prefix of every directive key.
pub const TAG_PREFIX: char = '@';

pub use comments::line_comments;
pub use error::ExtractionError;
pub use parser::{extract_block, extract_block_from_comments, parse_block, parse_line};

// Re-export lexer utilities that may be useful for custom parsing
pub use lexer::{Directive, is_line_terminator, is_whitespace, parse_directive};
