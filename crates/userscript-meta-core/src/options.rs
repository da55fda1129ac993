//! Options shared by validation, stringification and the pipelines.

use crate::validate::{ItemCollection, SharedWarningGenerator, default_items, default_warnings};
use std::fmt;

/// Default number of spaces between a key column and its value.
pub const DEFAULT_SPACING: usize = 2;

/// Configuration for reading, validating and writing metadata.
#[derive(Clone)]
pub struct Options {
    /// Treat `_` in metadata keys as `-` in directive keys (`run_at` is
    /// written as `@run-at`, and read back as `run_at`).
    pub underscores_as_hyphens: bool,
    /// Schema to validate against. `None` uses [`default_items`].
    pub items: Option<ItemCollection>,
    /// Warning generators to run. `None` uses [`default_warnings`].
    pub warnings: Option<Vec<SharedWarningGenerator>>,
    /// Align values in a column.
    pub align: bool,
    /// Produce the most compact output. Overrides `align` and `spacing`.
    pub minify: bool,
    /// Spaces between key and value (at least one is always used).
    pub spacing: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            underscores_as_hyphens: true,
            items: None,
            warnings: None,
            align: true,
            minify: false,
            spacing: DEFAULT_SPACING,
        }
    }
}

impl Options {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether underscores in metadata keys map to hyphens.
    pub fn with_underscores_as_hyphens(mut self, value: bool) -> Self {
        self.underscores_as_hyphens = value;
        self
    }

    /// Sets the schema.
    pub fn with_items(mut self, items: ItemCollection) -> Self {
        self.items = Some(items);
        self
    }

    /// Sets the warning generators.
    pub fn with_warnings(mut self, warnings: Vec<SharedWarningGenerator>) -> Self {
        self.warnings = Some(warnings);
        self
    }

    /// Sets whether values are aligned.
    pub fn with_align(mut self, value: bool) -> Self {
        self.align = value;
        self
    }

    /// Sets minified output.
    pub fn with_minify(mut self, value: bool) -> Self {
        self.minify = value;
        self
    }

    /// Sets the spacing between keys and values.
    pub fn with_spacing(mut self, spacing: usize) -> Self {
        self.spacing = spacing;
        self
    }

    /// Returns the schema in effect.
    pub fn schema(&self) -> &ItemCollection {
        self.items.as_ref().unwrap_or_else(|| default_items())
    }

    /// Returns the warning generators in effect.
    pub fn warning_generators(&self) -> &[SharedWarningGenerator] {
        self.warnings.as_deref().unwrap_or_else(|| default_warnings())
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let warnings: Option<Vec<&str>> = self
            .warnings
            .as_ref()
            .map(|generators| generators.iter().map(|g| g.name()).collect());
        f.debug_struct("Options")
            .field("underscores_as_hyphens", &self.underscores_as_hyphens)
            .field("items", &self.items)
            .field("warnings", &warnings)
            .field("align", &self.align)
            .field("minify", &self.minify)
            .field("spacing", &self.spacing)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = Options::default();
        assert!(options.underscores_as_hyphens);
        assert!(options.align);
        assert!(!options.minify);
        assert_eq!(options.spacing, 2);
        assert!(std::ptr::eq(options.schema(), default_items()));
        assert_eq!(options.warning_generators().len(), default_warnings().len());
    }

    #[test]
    fn overrides() {
        let options = Options::new()
            .with_items(ItemCollection::new())
            .with_warnings(Vec::new())
            .with_align(false)
            .with_minify(true)
            .with_spacing(4)
            .with_underscores_as_hyphens(false);
        assert!(options.schema().is_empty());
        assert!(options.warning_generators().is_empty());
        assert!(!options.align);
        assert!(options.minify);
        assert_eq!(options.spacing, 4);
        assert!(!options.underscores_as_hyphens);
    }

    #[test]
    fn debug_lists_generator_names() {
        let options = Options::new().with_warnings(default_warnings().to_vec());
        let debug = format!("{options:?}");
        assert!(debug.contains("no-match-or-include"));
    }
}
