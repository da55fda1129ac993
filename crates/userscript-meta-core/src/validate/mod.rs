//! Schema-driven validation of userscript metadata.
//!
//! A schema is an [`ItemCollection`]: one [`Item`] per recognised directive,
//! saying whether it is required, whether it may repeat, and which
//! [`Constraint`]s its value must meet. Validation reports every problem at
//! once and, for valid input, the [`Warning`]s of every configured
//! [`WarningGenerator`].
//!
//! # Example
//!
//! ```rust
//! use userscript_meta_core::metadata::Metadata;
//! use userscript_meta_core::validate::{validate, ValidationError};
//! use userscript_meta_core::Options;
//!
//! let metadata = Metadata::new().with("version", "1.0.0");
//!
//! match validate(metadata, &Options::default()) {
//!     Ok(valid) => println!("{} warnings", valid.warnings.len()),
//!     Err(errors) => {
//!         for error in &errors {
//!             eprintln!("{}", error);
//!         }
//!         assert!(matches!(errors[0], ValidationError::RequiredMissing { .. }));
//!     }
//! }
//! ```

mod connect;
mod error;
mod item;
mod items;
pub mod messages;
mod validator;
mod warnings;

// Re-export public types
pub use connect::{
    CONNECT_KEYWORDS, connect_constraint, is_ip_address, is_valid_connect_value, is_valid_domain,
};
pub use error::ValidationError;
pub use item::{
    Constraint, FlagItem, Item, TextItem, builtin_text_constraints, contains_leading_whitespace,
    contains_line_breaks, contains_only_whitespace, contains_trailing_whitespace,
    contains_whitespace, first_violation, is_empty,
};
pub use items::{
    DOCUMENT_END, DOCUMENT_IDLE, DOCUMENT_START, ItemCollection, RUN_AT_VALUES, default_items,
    is_semantic_version,
};
pub use validator::{Validated, ValidationResult, validate, validate_entries};
pub use warnings::{
    FnWarningGenerator, MatchInsteadOfInclude, NoMatchOrInclude, SharedWarningGenerator, Warning,
    WarningGenerator, collect_warnings, default_warnings, warning_fn,
};
