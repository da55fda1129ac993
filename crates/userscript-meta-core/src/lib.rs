//! Userscript Metadata Core
//!
//! A library for reading, validating and writing userscript metadata blocks.
//!
//! # Features
//!
//! - **Extraction**: Locate the `// ==UserScript==` block in arbitrary source text
//! - **Parsing**: Turn each `@key value` line into an entry, reporting every bad line
//! - **Validation**: Check entries against a schema and collect all errors at once
//! - **Warnings**: Advisory diagnostics for valid metadata
//! - **Stringify**: Render metadata back to a canonical, aligned block
//! - **Matching**: Validate and compile `@match` and `@include` patterns
//!
//! # Quick Start
//!
//! ```rust
//! use userscript_meta_core::{Options, read_and_validate, validate_and_stringify};
//!
//! let script = r#"
//! // ==UserScript==
//! // @name   Example
//! // @match  *://*.example.com/*
//! // ==/UserScript==
//! "#;
//!
//! let options = Options::default();
//! match read_and_validate(script, &options) {
//!     Ok(read) => {
//!         for warning in &read.warnings {
//!             println!("warning: {}", warning);
//!         }
//!         let written = validate_and_stringify(&read.metadata, &options).unwrap();
//!         println!("{}", written.stringified);
//!     }
//!     Err(error) => eprintln!("error: {}", error),
//! }
//! ```
//!
//! # Modules
//!
//! - [`parse`]: Block extraction and line parsing
//! - [`metadata`]: Entries, metadata and the conversion between them
//! - [`validate`]: Schema items, validation errors and warnings
//! - [`matching`]: Match and include patterns
//! - [`stringify`]: Rendering metadata as a block

#[cfg(feature = "generate")]
pub mod generate;
pub mod matching;
pub mod metadata;
pub mod options;
pub mod parse;
pub mod pipeline;
pub mod stringify;
pub mod validate;

// Re-export commonly used types at the crate root
pub use metadata::{Entry, Metadata, Scalar, Value};
pub use options::Options;
pub use parse::{ExtractionError, extract_block, parse_block, parse_line};
pub use pipeline::{Read, ReadError, Stringified, read_and_validate, validate_and_stringify};
pub use stringify::{stringify, stringify_entries};
pub use validate::{
    Item, ItemCollection, Validated, ValidationError, Warning, WarningGenerator, default_items,
    default_warnings, validate, validate_entries,
};
