//! URL pattern grammars used by `@match` and `@include` directives.
//!
//! Match patterns have the shape `scheme://host/path`:
//!
//! - `scheme` is `*`, `http` or `https`
//! - `host` is `*` or a hostname optionally prefixed by any number of `*.`
//! - `path` starts with `/` and may contain `*` anywhere
//!
//! The sentinel `<all_urls>` is equivalent to `*://*/*`.
//!
//! Include patterns are either globs, where `*` matches any sequence of
//! characters, or regular expressions written between slashes (`/.../`).

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// The match pattern that matches every URL.
pub const ALL_URLS: &str = "<all_urls>";

const ALL_URLS_NORMALIZED: &str = "*://*/*";

/// Any character except a JavaScript line terminator.
const ANY: &str = r"[^\n\r\x{2028}\x{2029}]";

static MATCH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?:<all_urls>|(\*|https?)://((?:\*\.)*[^/*]+|\*)(/{ANY}*))$"
    ))
    .expect("match pattern grammar is a valid regex")
});

static INCLUDE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^/({ANY}+)/$|^({ANY}+)$"))
        .expect("include pattern grammar is a valid regex")
});

static INCLUDE_PATTERN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^/({ANY}+)/$")).expect("regex include pattern grammar is a valid regex")
});

/// Capture groups of [`MATCH_PATTERN`].
#[derive(Debug, Clone, Copy)]
enum Group {
    Scheme = 1,
    Host = 2,
    Path = 3,
}

/// Maps `<all_urls>` to `*://*/*`; returns every other pattern unchanged.
pub fn normalize_match_pattern(pattern: &str) -> &str {
    if pattern == ALL_URLS {
        ALL_URLS_NORMALIZED
    } else {
        pattern
    }
}

/// Returns true if `pattern` is a valid match pattern.
pub fn is_match_pattern(pattern: &str) -> bool {
    MATCH_PATTERN.is_match(pattern)
}

/// Returns true if `pattern` is a valid include pattern of either form.
pub fn is_include_pattern(pattern: &str) -> bool {
    INCLUDE_PATTERN.is_match(pattern)
}

/// Returns true if `pattern` is a regex include pattern, i.e. `/.../` with a
/// non-empty body.
pub fn is_include_pattern_regex(pattern: &str) -> bool {
    INCLUDE_PATTERN_REGEX.is_match(pattern)
}

fn extract_group(group: Group, pattern: &str) -> Option<&str> {
    MATCH_PATTERN
        .captures(normalize_match_pattern(pattern))
        .and_then(|captures| captures.get(group as usize))
        .map(|m| m.as_str())
}

/// Returns the scheme of a match pattern, or `None` if it is invalid.
pub fn scheme_in(pattern: &str) -> Option<&str> {
    extract_group(Group::Scheme, pattern)
}

/// Returns the host of a match pattern, or `None` if it is invalid.
pub fn host_in(pattern: &str) -> Option<&str> {
    extract_group(Group::Host, pattern)
}

/// Returns the path of a match pattern, or `None` if it is invalid.
pub fn path_in(pattern: &str) -> Option<&str> {
    extract_group(Group::Path, pattern)
}

/// Compiles an include pattern into a case-insensitive regex.
///
/// A `/.../` pattern compiles its body as-is. Any other pattern is escaped,
/// `*` is turned into `.*` and the result is anchored at both ends.
///
/// Returns `None` if the body of a `/.../` pattern is not a valid regex.
pub fn regex_from_include_pattern(pattern: &str) -> Option<Regex> {
    let source = if is_include_pattern_regex(pattern) {
        without_surrounding_slashes(pattern).to_string()
    } else {
        format!("^{}$", regexify(pattern))
    };
    RegexBuilder::new(&source)
        .case_insensitive(true)
        .build()
        .ok()
}

fn without_surrounding_slashes(s: &str) -> &str {
    let s = s.strip_prefix('/').unwrap_or(s);
    s.strip_suffix('/').unwrap_or(s)
}

fn regexify(glob: &str) -> String {
    regex::escape(glob).replace(r"\*", ".*")
}

/// A parsed match pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPattern {
    original: String,
    scheme: String,
    host: String,
    path: String,
}

impl MatchPattern {
    /// Parses a match pattern.
    ///
    /// Returns `None` if the pattern is invalid.
    pub fn new(pattern: &str) -> Option<Self> {
        let captures = MATCH_PATTERN.captures(normalize_match_pattern(pattern))?;
        let group = |g: Group| captures.get(g as usize).map(|m| m.as_str().to_string());
        Some(Self {
            original: pattern.to_string(),
            scheme: group(Group::Scheme)?,
            host: group(Group::Host)?,
            path: group(Group::Path)?,
        })
    }

    /// Returns the original pattern string.
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Returns the scheme (`*`, `http` or `https`).
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the host (`*`, `*.example.com`, `example.com`, ...).
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the path, including its leading `/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns true if this pattern matches every URL.
    pub fn matches_all_urls(&self) -> bool {
        self.scheme == "*" && self.host == "*" && self.path == "/*"
    }
}

/// A compiled include pattern that can be tested against URLs.
#[derive(Debug, Clone)]
pub struct IncludePattern {
    original: String,
    regex: Regex,
}

impl IncludePattern {
    /// Compiles an include pattern.
    ///
    /// Returns `None` if the pattern is empty or its regex body is invalid.
    pub fn new(pattern: &str) -> Option<Self> {
        if !is_include_pattern(pattern) {
            return None;
        }
        let regex = regex_from_include_pattern(pattern)?;
        Some(Self {
            original: pattern.to_string(),
            regex,
        })
    }

    /// Returns the original pattern string.
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Returns true if this is a `/.../` pattern.
    pub fn is_regex(&self) -> bool {
        is_include_pattern_regex(&self.original)
    }

    /// Returns the compiled regex.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Checks if this pattern matches the given URL.
    pub fn matches(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }
}
