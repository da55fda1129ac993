//! Human-readable reasons and warning texts.

pub const ONLY_TRUE_ALLOWED: &str = "Only true allowed.";
pub const ONLY_STRINGS_ALLOWED: &str = "Only strings allowed.";
pub const SOME_NON_WHITESPACE_REQUIRED: &str =
    "At least one non-whitespace character is required.";
pub const EMPTY_STRING_NOT_ALLOWED: &str = "The empty string is not allowed.";
pub const WHITESPACE_NOT_ALLOWED: &str = "Whitespace is not allowed.";
pub const LINE_BREAKS_NOT_ALLOWED: &str = "Line breaks are not allowed.";
pub const LEADING_WHITESPACE_NOT_ALLOWED: &str = "Leading whitespace is not allowed.";
pub const TRAILING_WHITESPACE_NOT_ALLOWED: &str = "Trailing whitespace is not allowed.";

pub const VALID_MATCH_PATTERN_REQUIRED: &str =
    r#"Value must be a valid @match pattern (e.g. "*://example.com/*")."#;
pub const SEMANTIC_VERSION_REQUIRED: &str =
    r#"Value must follow the Semantic Versioning format, e.g. "1.0.5"."#;
pub const VALID_RUN_AT_REQUIRED: &str =
    r#"Value must be one of "document-end", "document-idle", "document-start"."#;
pub const VALID_CONNECT_VALUE_REQUIRED: &str = r#"Value must be a domain (e.g. example.com), an IP address (e.g. 1.2.3.4), or one of "self", "localhost", "*"."#;

pub const NO_MATCH_OR_INCLUDE_SUMMARY: &str = "No @match or @include directive.";
pub const NO_MATCH_OR_INCLUDE_DESCRIPTION: &str = "@match and/or @include directives are used to indicate on which URLs the userscript should run. If neither is present, the userscript may run on ALL or NO URLs, depending on the userscript client.";

pub const MATCH_INSTEAD_OF_INCLUDE_SUMMARY: &str = "@include directive can be replaced with @match.";
pub const MATCH_INSTEAD_OF_INCLUDE_DESCRIPTION: &str = "\
The @include directive is generally not recommended, since its asterisk (*) has a less safe meaning than in the @match directive.

There is one case where @include is preferable, though: It supports regular expressions, while @match only supports match patterns as defined here:

    https://developer.chrome.com/extensions/match_patterns

Unless you need regular expressions, consider using @match instead.";
