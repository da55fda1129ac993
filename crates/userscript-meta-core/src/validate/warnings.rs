//! Advisory warnings derived from valid metadata.
//!
//! Warnings never make metadata invalid. Each [`WarningGenerator`] looks at
//! the full list of accepted entries and reports zero or more [`Warning`]s.

use super::messages as msg;
use crate::matching::is_include_pattern_regex;
use crate::metadata::Entry;
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, LazyLock};

/// A non-fatal diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Warning {
    /// One-line summary.
    pub summary: String,
    /// Longer explanation.
    pub description: String,
}

impl Warning {
    /// Creates a new warning.
    pub fn new(summary: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            description: description.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary)
    }
}

/// Derives warnings from a list of valid entries.
pub trait WarningGenerator: Send + Sync {
    /// Returns the name of this generator.
    fn name(&self) -> &str;

    /// Returns the warnings that apply to `entries`.
    fn generate(&self, entries: &[Entry]) -> Vec<Warning>;
}

/// A shared, type-erased warning generator.
pub type SharedWarningGenerator = Arc<dyn WarningGenerator>;

/// Warns when neither `@match` nor `@include` is present.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMatchOrInclude;

impl WarningGenerator for NoMatchOrInclude {
    fn name(&self) -> &str {
        "no-match-or-include"
    }

    fn generate(&self, entries: &[Entry]) -> Vec<Warning> {
        if entries.iter().any(|e| e.key == "match" || e.key == "include") {
            Vec::new()
        } else {
            vec![Warning::new(
                msg::NO_MATCH_OR_INCLUDE_SUMMARY,
                msg::NO_MATCH_OR_INCLUDE_DESCRIPTION,
            )]
        }
    }
}

/// Warns when an `@include` pattern is not a regex and could be a `@match`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchInsteadOfInclude;

impl WarningGenerator for MatchInsteadOfInclude {
    fn name(&self) -> &str {
        "match-instead-of-include"
    }

    fn generate(&self, entries: &[Entry]) -> Vec<Warning> {
        let replaceable = entries.iter().any(|e| {
            e.key == "include" && e.value.as_text().is_none_or(|v| !is_include_pattern_regex(v))
        });
        if replaceable {
            vec![Warning::new(
                msg::MATCH_INSTEAD_OF_INCLUDE_SUMMARY,
                msg::MATCH_INSTEAD_OF_INCLUDE_DESCRIPTION,
            )]
        } else {
            Vec::new()
        }
    }
}

/// A warning generator backed by a closure. See [`warning_fn`].
pub struct FnWarningGenerator<F> {
    name: String,
    f: F,
}

impl<F> WarningGenerator for FnWarningGenerator<F>
where
    F: Fn(&[Entry]) -> Vec<Warning> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn generate(&self, entries: &[Entry]) -> Vec<Warning> {
        (self.f)(entries)
    }
}

/// Wraps a closure as a shared warning generator.
pub fn warning_fn<F>(name: impl Into<String>, f: F) -> SharedWarningGenerator
where
    F: Fn(&[Entry]) -> Vec<Warning> + Send + Sync + 'static,
{
    Arc::new(FnWarningGenerator {
        name: name.into(),
        f,
    })
}

static DEFAULT_WARNINGS: LazyLock<Vec<SharedWarningGenerator>> =
    LazyLock::new(|| {
        vec![
            Arc::new(NoMatchOrInclude) as SharedWarningGenerator,
            Arc::new(MatchInsteadOfInclude),
        ]
    });

/// The built-in warning generators, in the order they run.
pub fn default_warnings() -> &'static [SharedWarningGenerator] {
    &DEFAULT_WARNINGS
}

/// Runs every generator against `entries` and concatenates their output in
/// generator order.
pub fn collect_warnings(generators: &[SharedWarningGenerator], entries: &[Entry]) -> Vec<Warning> {
    generators
        .iter()
        .flat_map(|generator| generator.generate(entries))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summaries(entries: &[Entry]) -> Vec<String> {
        collect_warnings(default_warnings(), entries)
            .into_iter()
            .map(|w| w.summary)
            .collect()
    }

    #[test]
    fn no_match_or_include() {
        assert_eq!(
            summaries(&[Entry::new("name", "x")]),
            vec![msg::NO_MATCH_OR_INCLUDE_SUMMARY]
        );
        assert!(summaries(&[Entry::new("match", "*://*/*")]).is_empty());
    }

    #[test]
    fn include_regex_is_fine() {
        assert!(summaries(&[Entry::new("include", "/^https?:\\/\\/example/")]).is_empty());
    }

    #[test]
    fn include_glob_can_be_match() {
        assert_eq!(
            summaries(&[
                Entry::new("include", "/regex/"),
                Entry::new("include", "*://example.com/*"),
            ]),
            vec![msg::MATCH_INSTEAD_OF_INCLUDE_SUMMARY]
        );
    }

    #[test]
    fn both_warnings_in_generator_order() {
        let generators = vec![
            Arc::new(MatchInsteadOfInclude) as SharedWarningGenerator,
            warning_fn("always", |_| vec![Warning::new("always", "")]),
        ];
        let warnings = collect_warnings(&generators, &[Entry::new("include", "x")]);
        let summaries: Vec<_> = warnings.iter().map(|w| w.summary.as_str()).collect();
        assert_eq!(
            summaries,
            vec![msg::MATCH_INSTEAD_OF_INCLUDE_SUMMARY, "always"]
        );
    }

    #[test]
    fn generator_names() {
        let names: Vec<_> = default_warnings().iter().map(|g| g.name()).collect();
        assert_eq!(names, vec!["no-match-or-include", "match-instead-of-include"]);
        assert_eq!(warning_fn("custom", |_| Vec::new()).name(), "custom");
    }
}
