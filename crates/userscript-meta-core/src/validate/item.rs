//! Schema items: one validation rule per directive.
//!
//! An [`Item`] is either a flag item (a directive that takes no value, such as
//! `@noframes`) or a text item with an ordered list of [`Constraint`]s. Text
//! items always run a fixed set of whitespace and line-break rules before any
//! constraints attached to them, and report only the first rule that fails.
//!
//! Items are immutable. Customisation goes through derivation methods such as
//! [`Item::but_required`] or [`Item::with_constraints`], which return a new item.

use super::messages as msg;
use crate::metadata::Scalar;
use crate::parse::{is_line_terminator, is_whitespace};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use std::sync::{Arc, LazyLock};

/// Returns true if `s` is the empty string.
pub fn is_empty(s: &str) -> bool {
    s.is_empty()
}

/// Returns true if `s` contains any whitespace character.
///
/// Whitespace here and below is [`is_whitespace`], which counts U+FEFF and
/// not U+0085.
pub fn contains_whitespace(s: &str) -> bool {
    s.contains(is_whitespace)
}

/// Returns true if `s` is empty or consists only of whitespace.
pub fn contains_only_whitespace(s: &str) -> bool {
    s.chars().all(is_whitespace)
}

/// Returns true if `s` starts with whitespace.
pub fn contains_leading_whitespace(s: &str) -> bool {
    s.starts_with(is_whitespace)
}

/// Returns true if `s` ends with whitespace.
pub fn contains_trailing_whitespace(s: &str) -> bool {
    s.ends_with(is_whitespace)
}

/// Returns true if `s` contains a line terminator: `\n`, `\r`, U+2028 or U+2029.
pub fn contains_line_breaks(s: &str) -> bool {
    s.contains(is_line_terminator)
}

/// A requirement on a text value, paired with the reason reported when the
/// requirement is not met.
#[derive(Clone)]
pub struct Constraint {
    requirement: Arc<dyn Fn(&str) -> bool + Send + Sync>,
    message: String,
}

impl Constraint {
    /// Creates a constraint. `requirement` returns true for acceptable values.
    pub fn new<F>(requirement: F, message: impl Into<String>) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            requirement: Arc::new(requirement),
            message: message.into(),
        }
    }

    /// Creates a constraint that is met when `predicate` does not hold.
    pub fn forbid<F>(predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::new(move |s| !predicate(s), message)
    }

    /// Returns true if `value` meets this constraint.
    pub fn accepts(&self, value: &str) -> bool {
        (self.requirement)(value)
    }

    /// Returns the reason reported when this constraint is not met.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("requirement", &"<fn>")
            .field("message", &self.message)
            .finish()
    }
}

// Two constraints are equal only if they share the same requirement closure.
impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.requirement, &other.requirement) && self.message == other.message
    }
}

impl Eq for Constraint {}

/// Returns the first constraint in `constraints` that `value` violates.
pub fn first_violation<'a, I>(constraints: I, value: &str) -> Option<&'a Constraint>
where
    I: IntoIterator<Item = &'a Constraint>,
{
    constraints.into_iter().find(|c| !c.accepts(value))
}

static TEXT_BUILTINS: LazyLock<Vec<Constraint>> = LazyLock::new(|| {
    vec![
        Constraint::forbid(contains_only_whitespace, msg::SOME_NON_WHITESPACE_REQUIRED),
        Constraint::forbid(contains_leading_whitespace, msg::LEADING_WHITESPACE_NOT_ALLOWED),
        Constraint::forbid(contains_trailing_whitespace, msg::TRAILING_WHITESPACE_NOT_ALLOWED),
        Constraint::forbid(contains_line_breaks, msg::LINE_BREAKS_NOT_ALLOWED),
    ]
});

/// The rules every text item applies before its own constraints.
pub fn builtin_text_constraints() -> &'static [Constraint] {
    &TEXT_BUILTINS
}

/// A directive that takes no value. Always unique and never required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagItem {
    key: String,
}

/// A directive with a text value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextItem {
    key: String,
    required: bool,
    unique: bool,
    constraints: Vec<Constraint>,
}

/// Schema definition for one directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Flag(FlagItem),
    Text(TextItem),
}

impl Item {
    /// Creates a flag item.
    pub fn flag(key: impl Into<String>) -> Self {
        Item::Flag(FlagItem { key: key.into() })
    }

    /// Creates an optional, non-unique text item with no extra constraints.
    pub fn text(key: impl Into<String>) -> Self {
        Item::Text(TextItem {
            key: key.into(),
            required: false,
            unique: false,
            constraints: Vec::new(),
        })
    }

    /// The directive name this item validates, e.g. `run-at`.
    pub fn key(&self) -> &str {
        match self {
            Item::Flag(item) => &item.key,
            Item::Text(item) => &item.key,
        }
    }

    /// Whether at least one entry with this key must be present.
    pub fn required(&self) -> bool {
        match self {
            Item::Flag(_) => false,
            Item::Text(item) => item.required,
        }
    }

    /// Whether at most one entry with this key may be present.
    pub fn unique(&self) -> bool {
        match self {
            Item::Flag(_) => true,
            Item::Text(item) => item.unique,
        }
    }

    /// Returns true for flag items.
    pub fn is_flag(&self) -> bool {
        matches!(self, Item::Flag(_))
    }

    /// The constraints attached to this item, excluding the built-in text
    /// rules. Empty for flag items.
    pub fn constraints(&self) -> &[Constraint] {
        match self {
            Item::Flag(_) => &[],
            Item::Text(item) => &item.constraints,
        }
    }

    /// Validates one value against this item.
    ///
    /// Returns the value on success, or the reason of the first rule it
    /// breaks.
    pub fn validate(&self, value: &Scalar) -> Result<Scalar, String> {
        match (self, value) {
            (Item::Flag(_), Scalar::Flag) => Ok(Scalar::Flag),
            (Item::Flag(_), Scalar::Text(_)) => Err(msg::ONLY_TRUE_ALLOWED.to_string()),
            (Item::Text(_), Scalar::Flag) => Err(msg::ONLY_STRINGS_ALLOWED.to_string()),
            (Item::Text(item), Scalar::Text(text)) => {
                let all = builtin_text_constraints().iter().chain(&item.constraints);
                match first_violation(all, text) {
                    Some(violated) => Err(violated.message().to_string()),
                    None => Ok(value.clone()),
                }
            }
        }
    }

    fn map_text(&self, f: impl FnOnce(&mut TextItem)) -> Self {
        let mut derived = self.clone();
        if let Item::Text(item) = &mut derived {
            f(item);
        }
        derived
    }

    /// Returns a copy with `constraints` appended after the existing ones.
    ///
    /// Flag items take no constraints and are returned unchanged.
    pub fn with_constraints(&self, constraints: impl IntoIterator<Item = Constraint>) -> Self {
        self.map_text(|item| item.constraints.extend(constraints))
    }

    /// Returns a copy with all attached constraints removed. The built-in
    /// text rules still apply.
    pub fn without_constraints(&self) -> Self {
        self.map_text(|item| item.constraints.clear())
    }

    /// Returns a copy that allows at most one entry.
    pub fn but_unique(&self) -> Self {
        self.map_text(|item| item.unique = true)
    }

    /// Returns a copy that allows any number of entries.
    ///
    /// Flag items are always unique and are returned unchanged.
    pub fn but_not_unique(&self) -> Self {
        self.map_text(|item| item.unique = false)
    }

    /// Returns a copy that must be present.
    ///
    /// Flag items are never required and are returned unchanged.
    pub fn but_required(&self) -> Self {
        self.map_text(|item| item.required = true)
    }

    /// Returns a copy that may be absent.
    pub fn but_not_required(&self) -> Self {
        self.map_text(|item| item.required = false)
    }
}

impl Serialize for Item {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Item", 4)?;
        state.serialize_field("key", self.key())?;
        state.serialize_field("type", if self.is_flag() { "flag" } else { "text" })?;
        state.serialize_field("required", &self.required())?;
        state.serialize_field("unique", &self.unique())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(item: &Item, value: &str) -> Option<String> {
        item.validate(&Scalar::text(value)).err()
    }

    #[test]
    fn predicates() {
        assert!(is_empty(""));
        assert!(!is_empty(" "));
        assert!(contains_whitespace("a b"));
        assert!(!contains_whitespace("ab"));
        assert!(contains_only_whitespace(""));
        assert!(contains_only_whitespace(" \t"));
        assert!(!contains_only_whitespace(" a "));
        assert!(contains_leading_whitespace(" a"));
        assert!(!contains_leading_whitespace("a "));
        assert!(contains_trailing_whitespace("a "));
        assert!(!contains_trailing_whitespace(" a"));
        assert!(contains_line_breaks("a\nb"));
        assert!(!contains_line_breaks("a b"));
    }

    #[test]
    fn predicates_use_javascript_whitespace() {
        assert!(contains_whitespace("a\u{feff}b"));
        assert!(!contains_whitespace("a\u{85}b"));
        assert!(contains_only_whitespace("\u{feff}\u{a0}"));
        assert!(!contains_only_whitespace("\u{85}"));
        assert!(contains_leading_whitespace("\u{feff}a"));
        assert!(!contains_leading_whitespace("\u{85}a"));
        assert!(contains_trailing_whitespace("a\u{feff}"));
        assert!(!contains_trailing_whitespace("a\u{85}"));
    }

    #[test]
    fn every_line_terminator_is_a_line_break() {
        for s in ["a\rb", "a\u{2028}b", "a\u{2029}b", "a\r\nb"] {
            assert!(contains_line_breaks(s), "{s:?}");
        }
        assert!(!contains_line_breaks("a\u{85}b"));

        let item = Item::text("name");
        assert_eq!(
            item.validate(&Scalar::text("a\rb")),
            Err(msg::LINE_BREAKS_NOT_ALLOWED.to_string())
        );
    }

    #[test]
    fn flag_item_accepts_only_flag() {
        let item = Item::flag("noframes");
        assert_eq!(item.validate(&Scalar::Flag), Ok(Scalar::Flag));
        assert_eq!(
            item.validate(&Scalar::text("true")),
            Err(msg::ONLY_TRUE_ALLOWED.to_string())
        );
        assert!(item.unique());
        assert!(!item.required());
    }

    #[test]
    fn text_item_rejects_flag() {
        assert_eq!(
            Item::text("name").validate(&Scalar::Flag),
            Err(msg::ONLY_STRINGS_ALLOWED.to_string())
        );
    }

    #[test]
    fn builtin_rules_in_order() {
        let item = Item::text("name");
        assert_eq!(reason(&item, "Example"), None);
        assert_eq!(reason(&item, "a b"), None);
        assert_eq!(
            reason(&item, "").as_deref(),
            Some(msg::SOME_NON_WHITESPACE_REQUIRED)
        );
        assert_eq!(
            reason(&item, "   ").as_deref(),
            Some(msg::SOME_NON_WHITESPACE_REQUIRED)
        );
        assert_eq!(
            reason(&item, " a ").as_deref(),
            Some(msg::LEADING_WHITESPACE_NOT_ALLOWED)
        );
        assert_eq!(
            reason(&item, "a ").as_deref(),
            Some(msg::TRAILING_WHITESPACE_NOT_ALLOWED)
        );
        assert_eq!(
            reason(&item, "a\nb").as_deref(),
            Some(msg::LINE_BREAKS_NOT_ALLOWED)
        );
    }

    #[test]
    fn first_failing_constraint_wins() {
        let item = Item::text("version").with_constraints([
            Constraint::new(|v| v.starts_with('1'), "first"),
            Constraint::new(|v| v.ends_with('0'), "second"),
        ]);
        assert_eq!(reason(&item, "2.5").as_deref(), Some("first"));
        assert_eq!(reason(&item, "1.5").as_deref(), Some("second"));
        assert_eq!(reason(&item, "1.0"), None);
        // Built-in rules run before attached constraints.
        assert_eq!(
            reason(&item, " 2.5").as_deref(),
            Some(msg::LEADING_WHITESPACE_NOT_ALLOWED)
        );
    }

    #[test]
    fn derivations_do_not_touch_original() {
        let original = Item::text("match");
        let unique = original.but_unique();
        let required = original.but_required();
        let constrained =
            original.with_constraints([Constraint::forbid(contains_whitespace, "ws")]);

        assert!(!original.unique());
        assert!(!original.required());
        assert!(original.constraints().is_empty());

        assert!(unique.unique());
        assert!(!unique.but_not_unique().unique());
        assert!(required.required());
        assert!(!required.but_not_required().required());
        assert_eq!(constrained.constraints().len(), 1);
        assert_eq!(constrained.key(), "match");
    }

    #[test]
    fn without_constraints_keeps_builtins() {
        let item = Item::text("version")
            .with_constraints([Constraint::new(|v| v == "1.0", "only 1.0")])
            .without_constraints();
        assert_eq!(reason(&item, "Beta"), None);
        assert_eq!(
            reason(&item, "Beta ").as_deref(),
            Some(msg::TRAILING_WHITESPACE_NOT_ALLOWED)
        );
    }

    #[test]
    fn flag_derivations_are_noops() {
        let item = Item::flag("noframes");
        assert_eq!(item.but_required(), item);
        assert_eq!(item.but_not_unique(), item);
        assert_eq!(
            item.with_constraints([Constraint::new(|_| false, "never")]),
            item
        );
    }

    #[test]
    fn constraint_equality_is_by_identity() {
        let a = Constraint::new(|_| true, "x");
        let b = Constraint::new(|_| true, "x");
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn item_serializes_shape() {
        let json = serde_json::to_value(Item::text("name").but_required().but_unique()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"key": "name", "type": "text", "required": true, "unique": true})
        );
    }
}
