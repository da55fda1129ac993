//! Item collections and the built-in schema.

use super::item::{Constraint, Item};
use super::messages as msg;
use crate::matching::is_match_pattern;
use crate::metadata::replace_underscores;
use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

pub const DOCUMENT_END: &str = "document-end";
pub const DOCUMENT_IDLE: &str = "document-idle";
pub const DOCUMENT_START: &str = "document-start";

/// Accepted values of `@run-at`.
pub const RUN_AT_VALUES: [&str; 3] = [DOCUMENT_END, DOCUMENT_IDLE, DOCUMENT_START];

static SEMVER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(?:\.[0-9]+)*$").expect("version grammar is a valid regex"));

/// Returns true if `version` is dot-separated ASCII decimal numbers, e.g. `1.0.5`.
pub fn is_semantic_version(version: &str) -> bool {
    SEMVER.is_match(version)
}

/// An ordered mapping from item name to [`Item`].
///
/// The name is how callers refer to an item (`run_at`); the item's own key is
/// what is matched against entries (`run-at`). Order only affects the order in
/// which missing required items are reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ItemCollection(IndexMap<String, Item>);

impl ItemCollection {
    /// Creates an empty collection, which recognises no keys at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the item stored under `name`.
    pub fn insert(&mut self, name: impl Into<String>, item: Item) -> Option<Item> {
        self.0.insert(name.into(), item)
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, item: Item) -> Self {
        self.insert(name, item);
        self
    }

    /// Returns a copy without the item stored under `name`.
    pub fn without(mut self, name: &str) -> Self {
        self.0.shift_remove(name);
        self
    }

    /// Returns the item stored under `name`.
    pub fn get(&self, name: &str) -> Option<&Item> {
        self.0.get(name)
    }

    /// Finds the item whose key is `key`.
    pub fn find_by_key(&self, key: &str) -> Option<&Item> {
        self.0.values().find(|item| item.key() == key)
    }

    /// Iterates over `(name, item)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Item)> {
        self.0.iter().map(|(name, item)| (name.as_str(), item))
    }

    /// Iterates over items in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.0.values()
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no items.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, Item)> for ItemCollection {
    fn from_iter<I: IntoIterator<Item = (N, Item)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(n, item)| (n.into(), item)).collect())
    }
}

static DEFAULT_ITEMS: LazyLock<ItemCollection> = LazyLock::new(|| {
    let text = |name: &str| Item::text(replace_underscores(name));
    let unique = |name: &str| text(name).but_unique();

    [
        ("author", unique("author")),
        ("date", unique("date")),
        ("description", unique("description")),
        ("downloadURL", unique("downloadURL")),
        ("exclude", text("exclude")),
        ("grant", text("grant")),
        ("homepageURL", unique("homepageURL")),
        ("icon", unique("icon")),
        ("include", text("include")),
        ("license", unique("license")),
        (
            "match",
            text("match").with_constraints([Constraint::new(
                is_match_pattern,
                msg::VALID_MATCH_PATTERN_REQUIRED,
            )]),
        ),
        ("name", unique("name").but_required()),
        ("namespace", unique("namespace")),
        ("noframes", Item::flag("noframes")),
        ("require", text("require")),
        ("resource", text("resource")),
        (
            "run_at",
            unique("run_at").with_constraints([Constraint::new(
                |v| RUN_AT_VALUES.iter().any(|&allowed| allowed == v),
                msg::VALID_RUN_AT_REQUIRED,
            )]),
        ),
        ("updateURL", unique("updateURL")),
        (
            "version",
            unique("version").with_constraints([Constraint::new(
                is_semantic_version,
                msg::SEMANTIC_VERSION_REQUIRED,
            )]),
        ),
    ]
    .into_iter()
    .collect()
});

/// The built-in schema of well-known userscript directives.
pub fn default_items() -> &'static ItemCollection {
    &DEFAULT_ITEMS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Scalar;

    fn item(name: &str) -> &'static Item {
        default_items().get(name).unwrap()
    }

    fn accepts(name: &str, value: &str) -> bool {
        item(name).validate(&Scalar::text(value)).is_ok()
    }

    #[test]
    fn names_are_sorted_and_keys_hyphenated() {
        let names: Vec<_> = default_items().iter().map(|(name, _)| name).collect();
        let mut sorted = names.clone();
        sorted.sort_by_key(|name| name.to_lowercase());
        assert_eq!(names, sorted);

        for (name, item) in default_items().iter() {
            assert_eq!(item.key(), replace_underscores(name));
        }
        assert_eq!(item("run_at").key(), "run-at");
    }

    #[test]
    fn only_name_is_required() {
        let required: Vec<_> = default_items()
            .items()
            .filter(|i| i.required())
            .map(Item::key)
            .collect();
        assert_eq!(required, vec!["name"]);
    }

    #[test]
    fn non_unique_items() {
        let mut non_unique: Vec<_> = default_items()
            .items()
            .filter(|i| !i.unique())
            .map(Item::key)
            .collect();
        non_unique.sort();
        assert_eq!(
            non_unique,
            vec!["exclude", "grant", "include", "match", "require", "resource"]
        );
    }

    #[test]
    fn noframes_is_flag() {
        assert!(item("noframes").is_flag());
        assert!(item("noframes").validate(&Scalar::Flag).is_ok());
    }

    #[test]
    fn version_values() {
        for v in ["1", "1.0", "1.0.5", "2020.12.31", "10.0.0.1"] {
            assert!(accepts("version", v), "rejected {v:?}");
        }
        for v in ["", "1.", ".1", "1..0", "v1.0", "1.0-beta", "Beta"] {
            assert!(!accepts("version", v), "accepted {v:?}");
        }
    }

    #[test]
    fn version_digits_are_ascii() {
        for v in ["\u{661}.\u{660}", "\u{661}", "1.\u{969}", "\u{ff11}.0"] {
            assert!(!is_semantic_version(v), "accepted {v:?}");
        }
    }

    #[test]
    fn run_at_values() {
        for v in RUN_AT_VALUES {
            assert!(accepts("run_at", v));
        }
        let reason = item("run_at").validate(&Scalar::text("document-body")).unwrap_err();
        assert_eq!(reason, msg::VALID_RUN_AT_REQUIRED);
    }

    #[test]
    fn match_values() {
        assert!(accepts("match", "*://*.example.com/*"));
        assert!(accepts("match", "<all_urls>"));
        assert_eq!(
            item("match")
                .validate(&Scalar::text("example.com"))
                .unwrap_err(),
            msg::VALID_MATCH_PATTERN_REQUIRED
        );
    }

    #[test]
    fn collection_find_by_key() {
        assert!(default_items().find_by_key("run-at").is_some());
        assert!(default_items().find_by_key("run_at").is_none());
        assert!(ItemCollection::new().find_by_key("name").is_none());
    }

    #[test]
    fn customised_collection_leaves_default_alone() {
        let custom = default_items()
            .clone()
            .with("name", item("name").but_not_required())
            .without("version");
        assert!(!custom.get("name").unwrap().required());
        assert!(custom.get("version").is_none());
        assert!(item("name").required());
        assert!(default_items().get("version").is_some());
    }
}
