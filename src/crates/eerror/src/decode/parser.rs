//! Staged parser for the canonical text form
//!
//! Each stage consumes a prefix of the input through the shared [`Cursor`]:
//! type, message, contexts, attributes. Nothing is built until every stage
//! has succeeded.

use crate::constants::{
    CLOSE_BRACKET, CLOSE_PAREN, COLON, COMMA, DOUBLE_QUOTE, KEY_VALUE_SEPARATOR, OPEN_BRACKET,
    OPEN_PAREN, SEMICOLON, SPACE,
};
use crate::types::{ParseError, ParseOptions, ParseResult};
use crate::value::AttributeValue;
use std::collections::BTreeMap;

use super::literals::decode_attribute_value;
use super::scanner::Cursor;

const QUOTE: u8 = DOUBLE_QUOTE as u8;
const COLON_BYTE: u8 = COLON as u8;
const SEMICOLON_BYTE: u8 = SEMICOLON as u8;
const COMMA_BYTE: u8 = COMMA as u8;
const SPACE_BYTE: u8 = SPACE as u8;
const OPEN_PAREN_BYTE: u8 = OPEN_PAREN as u8;
const CLOSE_PAREN_BYTE: u8 = CLOSE_PAREN as u8;
const OPEN_BRACKET_BYTE: u8 = OPEN_BRACKET as u8;
const CLOSE_BRACKET_BYTE: u8 = CLOSE_BRACKET as u8;

/// The fields recovered from an enhanced error's text
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedParts {
    pub identifier: String,
    pub message: String,
    pub contexts: Vec<String>,
    pub attributes: BTreeMap<String, AttributeValue>,
}

/// Parse the canonical text form into its parts
///
/// Surrounding whitespace is ignored; positions in errors refer to the
/// trimmed text.
pub fn parse_parts(input: &str, options: &ParseOptions) -> ParseResult<ParsedParts> {
    let mut cursor = Cursor::new(input.trim());

    let identifier = parse_type(&mut cursor)?;
    let message = parse_message(&mut cursor)?;

    let mut contexts = Vec::new();
    if cursor.peek() == Some(OPEN_PAREN_BYTE) {
        contexts = parse_contexts(&mut cursor)?;
        if cursor.starts_with(" [") {
            cursor.advance(1);
        }
    }

    let mut attributes = BTreeMap::new();
    if cursor.peek() == Some(OPEN_BRACKET_BYTE) {
        attributes = parse_attributes(&mut cursor)?;
    }

    if !cursor.at_end() {
        if !options.allow_trailing_input {
            return Err(ParseError::TrailingInput {
                position: cursor.position(),
            });
        }
        tracing::debug!(
            position = cursor.position(),
            trailing = cursor.remaining(),
            "Ignoring trailing input after enhanced error"
        );
    }

    Ok(ParsedParts {
        identifier,
        message,
        contexts,
        attributes,
    })
}

/// Stage 1: the identifier, followed by exactly `": "` and more input
fn parse_type(cursor: &mut Cursor<'_>) -> ParseResult<String> {
    let identifier = if cursor.peek() == Some(QUOTE) {
        let identifier = cursor.take_quoted()?;
        if !cursor.eat(COLON_BYTE) {
            return Err(ParseError::expected("':' after quoted type", cursor.position()));
        }
        identifier
    } else {
        let start = cursor.position();
        let (text, stop) = cursor.take_until(&[COLON_BYTE]);
        if stop.is_none() {
            return Err(ParseError::expected("':' after type", cursor.position()));
        }
        if text.is_empty() {
            return Err(ParseError::empty("type", start));
        }
        cursor.advance(1);
        text.to_string()
    };

    if !cursor.eat(SPACE_BYTE) {
        return Err(ParseError::expected("' ' after ':'", cursor.position()));
    }
    if cursor.at_end() {
        return Err(ParseError::expected("message", cursor.position()));
    }

    Ok(identifier)
}

/// Stage 2: quoted message, or bare text up to the first '(' or '['
///
/// Leaves the cursor on the opening bracket of the next section, or at the
/// end of input.
fn parse_message(cursor: &mut Cursor<'_>) -> ParseResult<String> {
    if cursor.peek() == Some(QUOTE) {
        let message = cursor.take_quoted()?;
        if cursor.starts_with(" (") || cursor.starts_with(" [") {
            cursor.advance(1);
        }
        return Ok(message);
    }

    let start = cursor.position();
    let (text, stop) = cursor.take_until(&[OPEN_PAREN_BYTE, OPEN_BRACKET_BYTE]);
    let message = match stop {
        Some(_) => text
            .strip_suffix(SPACE)
            .ok_or_else(|| ParseError::expected("' ' before section", cursor.position()))?,
        None => text,
    };
    if message.is_empty() {
        return Err(ParseError::empty("message", start));
    }

    Ok(message.to_string())
}

/// Stage 3: `(context; context; ...)`
fn parse_contexts(cursor: &mut Cursor<'_>) -> ParseResult<Vec<String>> {
    let start = cursor.position();
    cursor.advance(1);

    let mut contexts = Vec::new();
    loop {
        let context = if cursor.peek() == Some(QUOTE) {
            cursor.take_quoted()?
        } else {
            let entry_start = cursor.position();
            let (text, stop) = cursor.take_until(&[SEMICOLON_BYTE, CLOSE_PAREN_BYTE]);
            if stop.is_none() {
                return Err(ParseError::unterminated("context list", start));
            }
            if text.is_empty() {
                return Err(ParseError::empty("context", entry_start));
            }
            text.to_string()
        };
        contexts.push(context);

        match cursor.peek() {
            Some(SEMICOLON_BYTE) => {
                cursor.advance(1);
                cursor.skip_spaces();
            }
            Some(CLOSE_PAREN_BYTE) => {
                cursor.advance(1);
                return Ok(contexts);
            }
            None => return Err(ParseError::unterminated("context list", start)),
            Some(_) => {
                return Err(ParseError::expected("';' or ')'", cursor.position()));
            }
        }
    }
}

/// Stage 4: `[key: value, key: value, ...]`
fn parse_attributes(cursor: &mut Cursor<'_>) -> ParseResult<BTreeMap<String, AttributeValue>> {
    let start = cursor.position();
    cursor.advance(1);

    let mut attributes = BTreeMap::new();
    loop {
        let key = parse_attribute_key(cursor, start)?;
        cursor.expect(KEY_VALUE_SEPARATOR, "': ' after attribute key")?;
        let value = parse_attribute_value(cursor, start)?;
        attributes.insert(key, value);

        match cursor.peek() {
            Some(COMMA_BYTE) => {
                cursor.advance(1);
                cursor.skip_spaces();
            }
            Some(CLOSE_BRACKET_BYTE) => {
                cursor.advance(1);
                return Ok(attributes);
            }
            None => return Err(ParseError::unterminated("attribute list", start)),
            Some(_) => {
                return Err(ParseError::expected("',' or ']'", cursor.position()));
            }
        }
    }
}

fn parse_attribute_key(cursor: &mut Cursor<'_>, list_start: usize) -> ParseResult<String> {
    if cursor.peek() == Some(QUOTE) {
        return cursor.take_quoted();
    }

    let key_start = cursor.position();
    let (text, stop) = cursor.take_until(&[COLON_BYTE, COMMA_BYTE, CLOSE_BRACKET_BYTE]);
    match stop {
        None => Err(ParseError::unterminated("attribute list", list_start)),
        Some(_) if text.is_empty() => Err(ParseError::empty("attribute key", key_start)),
        // A key alone, like `[attribute]`, has no value
        Some(COLON_BYTE) => Ok(text.to_string()),
        Some(_) => Err(ParseError::expected("': ' after attribute key", cursor.position())),
    }
}

fn parse_attribute_value(
    cursor: &mut Cursor<'_>,
    list_start: usize,
) -> ParseResult<AttributeValue> {
    if cursor.peek() == Some(QUOTE) {
        return cursor.take_quoted().map(AttributeValue::String);
    }

    let value_start = cursor.position();
    let (text, stop) = cursor.take_until(&[COMMA_BYTE, CLOSE_BRACKET_BYTE]);
    if stop.is_none() {
        return Err(ParseError::unterminated("attribute list", list_start));
    }
    if text.is_empty() {
        return Err(ParseError::empty("attribute value", value_start));
    }
    decode_attribute_value(text)
}
