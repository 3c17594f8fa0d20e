//! A single-pass `nom` tokenizer for `@font-face` stylesheets.
//!
//! The tokenizer only understands what a font service actually serves:
//! comments, `@font-face {` openings, `property: value;` pairs and closing
//! braces. Anything else outside a block is skipped up to the next
//! `@font-face`; anything else inside a block is skipped up to the next `;`.

use fontsheet_types::StylesheetToken;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_till, take_until, take_while1},
    character::complete::{char, multispace0},
    combinator::{map, opt, recognize, rest, value},
    error::{Error, ErrorKind},
};

/// Tokenizes a whole stylesheet.
///
/// A stylesheet without any `@font-face` block yields an empty vector.
pub fn tokenize(css: &str) -> Vec<StylesheetToken<'_>> {
    Tokens::new(css).collect()
}

/// Lazy iterator over the tokens of a stylesheet.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
    in_block: bool,
}

impl<'a> Tokens<'a> {
    pub fn new(css: &'a str) -> Self {
        Self {
            rest: css,
            in_block: false,
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = StylesheetToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let input = self.rest.trim_start();
            self.rest = input;
            if input.is_empty() {
                return None;
            }

            if let Ok((rest, ())) = font_face_open(input) {
                self.rest = rest;
                self.in_block = true;
                return Some(StylesheetToken::BlockBoundary);
            }

            if let Ok((rest, _)) = comment(input) {
                self.rest = rest;
                continue;
            }

            if !self.in_block {
                self.rest = skip_to_next_at_rule(input);
                continue;
            }

            if let Some(rest) = input.strip_prefix('}') {
                self.rest = rest;
                self.in_block = false;
                continue;
            }

            match declaration(input) {
                Ok((rest, token)) => {
                    self.rest = rest;
                    return Some(token);
                }
                Err(_) => {
                    let (rest, skipped) = skip_statement(input);
                    log::debug!("Skipping unrecognized stylesheet text: '{}'", skipped.trim());
                    self.rest = rest;
                }
            }
        }
    }
}

// --- Parsers ---

fn font_face_open(input: &str) -> IResult<&str, ()> {
    value((), (tag_no_case("@font-face"), multispace0, char('{'))).parse(input)
}

fn comment(input: &str) -> IResult<&str, &str> {
    recognize((tag("/*"), alt((take_until("*/"), rest)), opt(tag("*/")))).parse(input)
}

fn property(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && !matches!(c, ':' | ';' | '{' | '}'))
        .parse(input)
}

/// Everything up to the first unescaped `;` outside a quoted string, or the
/// `}` closing the block when the last declaration has no `;`.
///
/// Fails when the input ends before either terminator.
fn raw_value(input: &str) -> IResult<&str, &str> {
    let mut escaped = false;
    let mut quote: Option<char> = None;
    for (index, c) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (c, quote) {
            ('\\', _) => escaped = true,
            (c, Some(open)) if c == open => quote = None,
            (_, Some(_)) => {}
            ('\'' | '"', None) => quote = Some(c),
            (';' | '}', None) => return Ok((&input[index..], &input[..index])),
            _ => {}
        }
    }
    Err(nom::Err::Error(Error::new(input, ErrorKind::TakeUntil)))
}

fn declaration(input: &str) -> IResult<&str, StylesheetToken<'_>> {
    map(
        (
            property,
            multispace0,
            char(':'),
            multispace0,
            raw_value,
            opt(char(';')),
        ),
        |(property, _, _, _, raw_value, _)| {
            StylesheetToken::declaration(property, raw_value.trim_end())
        },
    )
    .parse(input)
}

// --- Recovery ---

/// Skips one malformed statement inside a block, stopping before a `}`.
fn skip_statement(input: &str) -> (&str, &str) {
    let parsed: IResult<&str, &str> = take_till(|c: char| c == ';' || c == '}').parse(input);
    let (rest, skipped) = parsed.unwrap_or(("", input));
    (rest.strip_prefix(';').unwrap_or(rest), skipped)
}

/// Jumps to the next `@` after the first character of `input`.
fn skip_to_next_at_rule(input: &str) -> &str {
    input
        .char_indices()
        .skip(1)
        .find(|&(_, c)| c == '@')
        .map_or("", |(index, _)| &input[index..])
}
