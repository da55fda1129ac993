//! nom-based token parsers for metadata lines.

use nom::{
    IResult, Parser,
    bytes::complete::{take_while, take_while1},
    character::complete::char,
    error::{Error, ErrorKind},
};

use super::TAG_PREFIX;

/// Characters that can appear in a directive key.
fn is_key_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '-'
}

/// Characters that end a line in JavaScript and cannot occur in a value.
pub fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Whitespace as JavaScript defines it: Unicode white space plus the byte
/// order mark, but not NEL (U+0085).
pub fn is_whitespace(c: char) -> bool {
    match c {
        '\u{feff}' => true,
        '\u{85}' => false,
        c => c.is_whitespace(),
    }
}

/// Removes leading and trailing [`is_whitespace`] characters.
pub fn trim(s: &str) -> &str {
    s.trim_matches(is_whitespace)
}

/// Removes trailing [`is_whitespace`] characters.
pub fn trim_end(s: &str) -> &str {
    s.trim_end_matches(is_whitespace)
}

/// The components of a directive line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'a> {
    /// The key, with its original case.
    pub key: &'a str,
    /// The value with trailing whitespace removed, or `None` for a bare key.
    pub value: Option<&'a str>,
}

/// Parses a directive line: optional whitespace, `@`, a key, and optionally
/// whitespace followed by a value.
///
/// The key must be followed by whitespace or the end of the line, so
/// `@name1 x` is rejected rather than read as key `name`. Once the value has
/// started, no line terminator may follow, not even as trailing whitespace.
pub fn parse_directive(input: &str) -> IResult<&str, Directive<'_>> {
    let (rest, (_, _, key, separator)) = (
        take_while(is_whitespace),
        char(TAG_PREFIX),
        take_while1(is_key_char),
        take_while(is_whitespace),
    )
        .parse(input)?;

    let value = trim_end(rest);
    if value.is_empty() {
        return Ok(("", Directive { key, value: None }));
    }

    if separator.is_empty() || rest.contains(is_line_terminator) {
        return Err(nom::Err::Error(Error::new(rest, ErrorKind::Verify)));
    }

    Ok((
        "",
        Directive {
            key,
            value: Some(value),
        },
    ))
}

/// Returns true if `comment` is `tag`, ignoring surrounding whitespace.
pub fn is_tag_line(comment: &str, tag: &str) -> bool {
    trim(comment) == tag
}

/// Checks if a line is blank (empty or only whitespace).
pub fn is_blank_line(input: &str) -> bool {
    trim(input).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directive(input: &str) -> Option<Directive<'_>> {
        parse_directive(input).ok().map(|(_, d)| d)
    }

    #[test]
    fn directive_with_value() {
        assert_eq!(
            directive("@name Example Userscript"),
            Some(Directive {
                key: "name",
                value: Some("Example Userscript")
            })
        );
    }

    #[test]
    fn directive_tolerates_surrounding_whitespace() {
        for line in [
            " @name Example Userscript",
            "@name Example Userscript ",
            "  @name   Example Userscript\t",
        ] {
            let d = directive(line).unwrap();
            assert_eq!(d.key, "name");
            assert_eq!(d.value, Some("Example Userscript"));
        }
    }

    #[test]
    fn bare_directive() {
        for line in ["@noframes", " @noframes", "@noframes   "] {
            assert_eq!(
                directive(line),
                Some(Directive {
                    key: "noframes",
                    value: None
                })
            );
        }
    }

    #[test]
    fn key_keeps_case_and_hyphens() {
        assert_eq!(directive("@downloadURL x").unwrap().key, "downloadURL");
        assert_eq!(directive("@run-at document-end").unwrap().key, "run-at");
    }

    #[test]
    fn rejects_malformed_lines() {
        for line in ["", " ", "name", "name Example", "@", "@ name", "@name1 x", "@na_me x"] {
            assert!(directive(line).is_none(), "accepted {line:?}");
        }
    }

    #[test]
    fn rejects_embedded_carriage_return() {
        assert!(directive("@name a\rb").is_none());
    }

    #[test]
    fn tag_lines() {
        assert!(is_tag_line(" ==UserScript==", "==UserScript=="));
        assert!(is_tag_line("==UserScript==  ", "==UserScript=="));
        assert!(!is_tag_line(" ==UserScript== x", "==UserScript=="));
    }

    #[test]
    fn rejects_trailing_line_separator_after_value() {
        assert!(directive("@name a\u{2028}").is_none());
        assert!(directive("@name a \r").is_none());
        assert_eq!(
            directive("@noframes\u{2028}"),
            Some(Directive {
                key: "noframes",
                value: None
            })
        );
    }

    #[test]
    fn whitespace_follows_javascript() {
        assert!(is_whitespace(' '));
        assert!(is_whitespace('\u{a0}'));
        assert!(is_whitespace('\u{2028}'));
        assert!(is_whitespace('\u{feff}'));
        assert!(!is_whitespace('\u{85}'));
        assert!(!is_whitespace('x'));
    }

    #[test]
    fn byte_order_mark_is_whitespace() {
        assert_eq!(
            directive("\u{feff}@name Example\u{feff}"),
            Some(Directive {
                key: "name",
                value: Some("Example")
            })
        );
        assert!(is_tag_line("\u{feff}==UserScript==", "==UserScript=="));
        assert!(is_blank_line("\u{feff}"));
    }

    #[test]
    fn next_line_is_not_whitespace() {
        assert!(directive("@name\u{85}x").is_none());
        assert_eq!(directive("@name x\u{85}").unwrap().value, Some("x\u{85}"));
        assert!(!is_blank_line("\u{85}"));
        assert!(!is_tag_line("\u{85}==UserScript==", "==UserScript=="));
    }

    #[test]
    fn blank_lines() {
        assert!(is_blank_line(""));
        assert!(is_blank_line(" \t "));
        assert!(!is_blank_line(" @name"));
    }
}
