//! Conversion between flat entry lists and keyed metadata.

use super::{Entry, Metadata, Value};
use indexmap::IndexMap;
use indexmap::map::Entry as MapEntry;

/// Replaces every `_` with `-`.
pub fn replace_underscores(s: &str) -> String {
    s.replace('_', "-")
}

/// Replaces every `-` with `_`.
pub fn replace_hyphens(s: &str) -> String {
    s.replace('-', "_")
}

/// Expands metadata into one entry per directive occurrence.
///
/// Keys are visited in insertion order; multi-valued keys expand to several
/// entries with the same key. With `underscores_as_hyphens`, `run_at` becomes
/// `run-at`.
pub fn to_entries(metadata: &Metadata, underscores_as_hyphens: bool) -> Vec<Entry> {
    let mut entries = Vec::new();
    for (key, value) in metadata.iter() {
        let key = if underscores_as_hyphens {
            replace_underscores(key)
        } else {
            key.to_string()
        };
        for scalar in value.scalars() {
            entries.push(Entry {
                key: key.clone(),
                value: scalar.clone(),
            });
        }
    }
    entries
}

/// Folds entries into keyed metadata.
///
/// The first occurrence of a key yields a [`Value::Single`]; further
/// occurrences turn it into a [`Value::Multiple`] in source order. With
/// `underscores_as_hyphens`, `run-at` becomes `run_at`.
pub fn from_entries<'a, I>(entries: I, underscores_as_hyphens: bool) -> Metadata
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut map: IndexMap<String, Value> = IndexMap::new();
    for entry in entries {
        let key = if underscores_as_hyphens {
            replace_hyphens(&entry.key)
        } else {
            entry.key.clone()
        };
        match map.entry(key) {
            MapEntry::Vacant(slot) => {
                slot.insert(Value::Single(entry.value.clone()));
            }
            MapEntry::Occupied(mut slot) => {
                let value = slot.get_mut();
                match value {
                    Value::Single(first) => {
                        let first = first.clone();
                        *value = Value::Multiple(vec![first, entry.value.clone()]);
                    }
                    Value::Multiple(all) => all.push(entry.value.clone()),
                }
            }
        }
    }
    Metadata(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Scalar;

    fn typical() -> Metadata {
        Metadata::new()
            .with("name", "Example Userscript")
            .with("version", "1.0.0")
            .with("noframes", Value::flag())
            .with("run_at", "document-start")
            .with("match", vec!["*://*.example.com/*", "*://*.github.com/*"])
    }

    #[test]
    fn to_entries_expands_and_renames() {
        let entries = to_entries(&typical(), true);
        let keys: Vec<_> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["name", "version", "noframes", "run-at", "match", "match"]
        );
        assert_eq!(entries[2].value, Scalar::Flag);
        assert_eq!(entries[5].value, Scalar::text("*://*.github.com/*"));
    }

    #[test]
    fn to_entries_without_renaming() {
        let entries = to_entries(&typical(), false);
        assert_eq!(entries[3].key, "run_at");
    }

    #[test]
    fn from_entries_folds_repeated_keys() {
        let entries = vec![
            Entry::new("match", "a"),
            Entry::new("name", "n"),
            Entry::new("match", "b"),
            Entry::new("match", "c"),
        ];
        let metadata = from_entries(&entries, true);
        let keys: Vec<_> = metadata.keys().collect();
        assert_eq!(keys, vec!["match", "name"]);
        assert_eq!(metadata.get("match"), Some(&Value::texts(["a", "b", "c"])));
        assert_eq!(metadata.get("name"), Some(&Value::text("n")));
    }

    #[test]
    fn from_entries_renames_hyphens() {
        let entries = vec![Entry::new("run-at", "document-end")];
        assert!(from_entries(&entries, true).contains_key("run_at"));
        assert!(from_entries(&entries, false).contains_key("run-at"));
    }

    #[test]
    fn round_trip() {
        for casing in [true, false] {
            let metadata = typical();
            let entries = to_entries(&metadata, casing);
            assert_eq!(from_entries(&entries, casing), metadata);
        }
    }

    #[test]
    fn empty_round_trip() {
        assert!(to_entries(&Metadata::new(), true).is_empty());
        assert!(from_entries(&Vec::<Entry>::new(), true).is_empty());
    }
}
