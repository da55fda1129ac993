//! Line comment scanner for JavaScript-like source text.
//!
//! Only `//` comments are reported. Block comments and string literals
//! (single, double and template quoted) are skipped so that `//` inside them
//! is not mistaken for a comment. Regex literals are not recognised.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_till, take_till1},
    character::complete::anychar,
    error::{Error, ErrorKind},
};

/// A lexical unit of the scanned source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    /// The text after `//`, up to but excluding the line break.
    LineComment(&'a str),
    /// Anything else.
    Other,
}

fn line_comment(input: &str) -> IResult<&str, &str> {
    let (rest, _) = tag("//").parse(input)?;
    take_till(|c| c == '\n').parse(rest)
}

fn block_comment(input: &str) -> IResult<&str, &str> {
    let (rest, _) = tag("/*").parse(input)?;
    match rest.find("*/") {
        Some(end) => Ok((&rest[end + 2..], &rest[..end])),
        // Unterminated: the comment runs to the end of the input.
        None => Ok(("", rest)),
    }
}

fn string_literal(input: &str) -> IResult<&str, &str> {
    let mut chars = input.char_indices();
    let quote = match chars.next() {
        Some((_, c @ ('"' | '\'' | '`'))) => c,
        _ => return Err(nom::Err::Error(Error::new(input, ErrorKind::Char))),
    };
    let mut escaped = false;
    for (i, c) in chars {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            // Unterminated single-line string: stop before the line break.
            '\n' if quote != '`' => return Ok((&input[i..], &input[..i])),
            c if c == quote => {
                let end = i + c.len_utf8();
                return Ok((&input[end..], &input[..end]));
            }
            _ => {}
        }
    }
    Ok(("", input))
}

fn is_special(c: char) -> bool {
    matches!(c, '/' | '"' | '\'' | '`')
}

fn token(input: &str) -> IResult<&str, Token<'_>> {
    alt((
        line_comment.map(Token::LineComment),
        block_comment.map(|_| Token::Other),
        string_literal.map(|_| Token::Other),
        take_till1(is_special).map(|_| Token::Other),
        anychar.map(|_| Token::Other),
    ))
    .parse(input)
}

/// Returns the raw content of every line comment in `source`, in order.
///
/// The content is everything after `//` up to the end of the line, with a
/// trailing carriage return removed.
pub fn line_comments(source: &str) -> Vec<&str> {
    let mut comments = Vec::new();
    let mut rest = source;

    while !rest.is_empty() {
        match token(rest) {
            Ok((next, Token::LineComment(content))) => {
                comments.push(content.strip_suffix('\r').unwrap_or(content));
                rest = next;
            }
            Ok((next, Token::Other)) => rest = next,
            // `anychar` only fails on empty input.
            Err(_) => break,
        }
    }

    comments
}
