//! Block extraction plus line and block parsers.

use super::comments::line_comments;
use super::error::ExtractionError;
use super::lexer::{is_blank_line, is_tag_line, parse_directive};
use super::{END_TAG, START_TAG};
use crate::metadata::{Entry, Scalar};
use log::{debug, trace};

/// Locates the metadata block in userscript source text.
///
/// Returns the content of the comments strictly between the first start tag
/// and the first end tag, joined with `\n`. Text outside line comments is
/// ignored.
pub fn extract_block(text: &str) -> Result<String, ExtractionError> {
    let comments = line_comments(text);
    debug!("Found {} line comments", comments.len());
    extract_block_from_comments(&comments)
}

/// Like [`extract_block`], for comments that have already been collected.
///
/// Each element is the content of one line comment without its `//` prefix.
pub fn extract_block_from_comments<S: AsRef<str>>(
    comments: &[S],
) -> Result<String, ExtractionError> {
    if comments.is_empty() {
        return Err(ExtractionError::NoLineComments);
    }

    let position = |tag: &str| comments.iter().position(|c| is_tag_line(c.as_ref(), tag));

    let start = position(START_TAG).ok_or(ExtractionError::NoStartTag)?;
    let end = position(END_TAG).ok_or(ExtractionError::NoEndTag)?;
    if end < start {
        return Err(ExtractionError::EndTagBeforeStartTag);
    }

    trace!("Metadata block spans comments {}..{}", start, end);
    Ok(comments[start + 1..end]
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Parses one metadata line such as `@name Example` or `@noframes`.
///
/// A bare key yields a [`Scalar::Flag`] value. On failure the original line
/// is returned.
pub fn parse_line(line: &str) -> Result<Entry, String> {
    match parse_directive(line) {
        Ok((_, directive)) => Ok(Entry {
            key: directive.key.to_string(),
            value: directive.value.map_or(Scalar::Flag, Scalar::text),
        }),
        Err(_) => Err(line.to_string()),
    }
}

/// Parses every non-blank line of a metadata block.
///
/// Either all lines parse and the entries are returned in source order, or
/// every line that failed to parse is returned.
pub fn parse_block(block: &str) -> Result<Vec<Entry>, Vec<String>> {
    let mut entries = Vec::new();
    let mut invalid = Vec::new();

    for line in block.split('\n').filter(|line| !is_blank_line(line)) {
        match parse_line(line) {
            Ok(entry) => {
                trace!("Parsed entry: {}", entry);
                entries.push(entry);
            }
            Err(line) => {
                trace!("Unparseable line: {:?}", line);
                invalid.push(line);
            }
        }
    }

    debug!(
        "Parsed block: {} entries, {} invalid lines",
        entries.len(),
        invalid.len()
    );

    if invalid.is_empty() {
        Ok(entries)
    } else {
        Err(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TYPICAL: &str = r#"
// ==UserScript==
// @name      Example Userscript
// @version   1.0.0
// @noframes
// @run-at    document-start
// @match     *://*.example.com/*
// @match     *://*.github.com/*
// ==/UserScript==

console.log("hello");
"#;

    #[test]
    fn extract_typical_block() {
        let block = extract_block(TYPICAL).unwrap();
        assert_eq!(
            block,
            [
                " @name      Example Userscript",
                " @version   1.0.0",
                " @noframes",
                " @run-at    document-start",
                " @match     *://*.example.com/*",
                " @match     *://*.github.com/*",
            ]
            .join("\n")
        );
    }

    #[test]
    fn extract_failures() {
        assert_eq!(
            extract_block("console.log(1);"),
            Err(ExtractionError::NoLineComments)
        );
        assert_eq!(
            extract_block("// ==/UserScript==\n"),
            Err(ExtractionError::NoStartTag)
        );
        assert_eq!(
            extract_block("// ==UserScript==\n// @name x\n"),
            Err(ExtractionError::NoEndTag)
        );
        assert_eq!(
            extract_block("// ==/UserScript==\n// ==UserScript==\n"),
            Err(ExtractionError::EndTagBeforeStartTag)
        );
    }

    #[test]
    fn extract_empty_block() {
        assert_eq!(
            extract_block("// ==UserScript==\n// ==/UserScript==\n"),
            Ok(String::new())
        );
    }

    #[test]
    fn tags_tolerate_surrounding_whitespace() {
        let source = "//==UserScript==   \n//   @name x\n//\t==/UserScript==";
        assert_eq!(extract_block(source), Ok("   @name x".to_string()));
    }

    #[test]
    fn first_tags_win() {
        let source = "// ==UserScript==\n// @a\n// ==/UserScript==\n// ==UserScript==\n// @b\n// ==/UserScript==";
        assert_eq!(extract_block(source), Ok(" @a".to_string()));
    }

    #[test]
    fn tags_inside_strings_are_ignored() {
        let source = "const s = \"// ==UserScript==\";\n// ==UserScript==\n// @name x\n// ==/UserScript==";
        assert_eq!(extract_block(source), Ok(" @name x".to_string()));
    }

    #[test]
    fn extract_from_collected_comments() {
        let comments = vec![" ==UserScript==".to_string(), " ==/UserScript==".to_string()];
        assert_eq!(extract_block_from_comments(&comments), Ok(String::new()));
        assert_eq!(
            extract_block_from_comments::<&str>(&[]),
            Err(ExtractionError::NoLineComments)
        );
    }

    #[test]
    fn parse_line_with_value() {
        assert_eq!(
            parse_line("@name Example Userscript"),
            Ok(Entry::new("name", "Example Userscript"))
        );
        assert_eq!(
            parse_line("   @name    Example Userscript   "),
            Ok(Entry::new("name", "Example Userscript"))
        );
    }

    #[test]
    fn parse_line_flag() {
        assert_eq!(parse_line("@noframes"), Ok(Entry::flag("noframes")));
    }

    #[test]
    fn parse_line_failures_return_line() {
        for line in ["", "name", "@ name", "// @name x"] {
            assert_eq!(parse_line(line), Err(line.to_string()));
        }
    }

    #[test]
    fn parse_block_skips_blank_lines() {
        let entries = parse_block("\n @name x\n   \n @noframes\n").unwrap();
        assert_eq!(entries, vec![Entry::new("name", "x"), Entry::flag("noframes")]);
    }

    #[test]
    fn parse_block_collects_all_invalid_lines() {
        let result = parse_block(" @name x\n bad one\n @noframes\n another bad");
        assert_eq!(
            result,
            Err(vec![" bad one".to_string(), " another bad".to_string()])
        );
    }

    #[test]
    fn parse_empty_block() {
        assert_eq!(parse_block(""), Ok(Vec::new()));
    }

    #[test]
    fn parse_typical_block() {
        let entries = parse_block(&extract_block(TYPICAL).unwrap()).unwrap();
        let keys: Vec<_> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["name", "version", "noframes", "run-at", "match", "match"]
        );
        assert_eq!(entries[2].value, Scalar::Flag);
        assert_eq!(entries[3].value, Scalar::text("document-start"));
    }
}
