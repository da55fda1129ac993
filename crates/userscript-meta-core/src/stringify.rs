//! Rendering metadata as a metadata block.

use crate::metadata::{Entry, Metadata, Scalar, to_entries};
use crate::options::Options;
use crate::parse::{COMMENT_PREFIX, END_TAG, START_TAG, TAG_PREFIX};
use log::debug;

/// Layout settings after `minify` has been applied.
#[derive(Debug, Clone, Copy)]
struct Layout {
    column_width: usize,
    spacing: usize,
    minify: bool,
}

impl Layout {
    fn new(entries: &[Entry], options: &Options) -> Self {
        let align = options.align && !options.minify;
        let spacing = if options.minify { 1 } else { options.spacing };
        let column_width = if align {
            entries
                .iter()
                .map(|entry| entry.key.chars().count())
                .max()
                .unwrap_or(0)
        } else {
            0
        };
        Self {
            column_width,
            spacing,
            minify: options.minify,
        }
    }

    fn line(&self, entry: &Entry) -> String {
        let padding = self.column_width.saturating_sub(entry.key.chars().count());
        let value = match &entry.value {
            Scalar::Flag => "",
            Scalar::Text(text) => text.as_str(),
        };
        let line = format!(
            "{TAG_PREFIX}{}{}{}{}",
            entry.key,
            " ".repeat(padding),
            " ".repeat(self.spacing.max(1)),
            value
        );
        line.trim_end().to_string()
    }

    fn comment(&self, line: &str) -> String {
        let gap = if self.minify { "" } else { " " };
        format!("{COMMENT_PREFIX}{gap}{line}")
    }
}

/// Renders entries as a metadata block, in the given order.
///
/// No validation is performed.
pub fn stringify_entries(entries: &[Entry], options: &Options) -> String {
    let layout = Layout::new(entries, options);
    debug!(
        "Stringifying {} entries (column width {}, spacing {})",
        entries.len(),
        layout.column_width,
        layout.spacing
    );

    let mut lines = Vec::with_capacity(entries.len() + 2);
    lines.push(layout.comment(START_TAG));
    lines.extend(entries.iter().map(|entry| layout.comment(&layout.line(entry))));
    lines.push(layout.comment(END_TAG));
    lines.join("\n")
}

/// Renders metadata as a metadata block, with keys in insertion order.
///
/// No validation is performed; see
/// [`validate_and_stringify`](crate::pipeline::validate_and_stringify).
pub fn stringify(metadata: &Metadata, options: &Options) -> String {
    stringify_entries(&to_entries(metadata, options.underscores_as_hyphens), options)
}
