//! Data model for userscript metadata.
//!
//! A metadata block is read as a flat, ordered list of [`Entry`] values (one per
//! directive line) and handed to callers as a keyed [`Metadata`] mapping in which
//! repeated directives are folded into a [`Value::Multiple`].

mod conversion;

pub use conversion::{from_entries, replace_hyphens, replace_underscores, to_entries};

use indexmap::IndexMap;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{self, Display};

/// A single directive value.
///
/// `Flag` is the value of a directive that appears without any text after its
/// key (e.g. `@noframes`). It serializes as the JSON literal `true`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scalar {
    /// A bare directive with no value.
    Flag,
    /// A directive with a text value.
    Text(String),
}

impl Scalar {
    /// Creates a text scalar.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns the text value, or `None` for a flag.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Flag => None,
            Scalar::Text(text) => Some(text),
        }
    }

    /// Returns true if this is a flag.
    pub fn is_flag(&self) -> bool {
        matches!(self, Scalar::Flag)
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Flag => f.write_str("true"),
            Scalar::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Flag => serializer.serialize_bool(true),
            Scalar::Text(text) => serializer.serialize_str(text),
        }
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScalarVisitor;

        impl Visitor<'_> for ScalarVisitor {
            type Value = Scalar;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("the boolean `true` or a string")
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<Scalar, E> {
                if value {
                    Ok(Scalar::Flag)
                } else {
                    Err(E::invalid_value(de::Unexpected::Bool(false), &self))
                }
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Scalar, E> {
                Ok(Scalar::text(value))
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<Scalar, E> {
                Ok(Scalar::Text(value))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

/// The value stored under one key of a [`Metadata`] mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A directive that occurred once.
    Single(Scalar),
    /// A directive that occurred more than once, in source order.
    Multiple(Vec<Scalar>),
}

impl Value {
    /// Creates a flag value.
    pub fn flag() -> Self {
        Self::Single(Scalar::Flag)
    }

    /// Creates a single text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Single(Scalar::text(value))
    }

    /// Creates a multi-valued value from a list of texts.
    pub fn texts<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Multiple(values.into_iter().map(Scalar::text).collect())
    }

    /// Returns the scalars held by this value, in order.
    pub fn scalars(&self) -> &[Scalar] {
        match self {
            Value::Single(scalar) => std::slice::from_ref(scalar),
            Value::Multiple(scalars) => scalars,
        }
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Self::Single(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

impl From<Vec<&str>> for Value {
    fn from(values: Vec<&str>) -> Self {
        Self::texts(values)
    }
}

/// One directive occurrence, e.g. `@match *://example.com/*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    /// The directive name without the `@` prefix.
    pub key: String,
    /// The directive value.
    pub value: Scalar,
}

impl Entry {
    /// Creates a new entry.
    pub fn new(key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a flag entry.
    pub fn flag(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Scalar::Flag,
        }
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Scalar::Flag => write!(f, "@{}", self.key),
            Scalar::Text(text) => write!(f, "@{} {}", self.key, text),
        }
    }
}

/// Keyed userscript metadata.
///
/// Keys keep their insertion order, which is also the order in which they are
/// written back out by [`stringify`](crate::stringify::stringify).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(IndexMap<String, Value>);

impl Metadata {
    /// Creates empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, replacing any previous value under the same key
    /// (the key keeps its original position).
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Metadata
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
