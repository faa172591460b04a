//! Typed attribute literal decoding

use crate::constants::{
    BOOL_TAG, FLOAT32_TAG, FLOAT64_TAG, FLOAT_TAG, INT_TAG, NULL_LITERAL, NULL_TAG, UINT_TAG,
};
use crate::types::{ParseError, ParseResult};
use crate::value::AttributeValue;
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

static TYPED_LITERAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\(([A-Za-z_][A-Za-z0-9_]*)\)(.*)$").expect("typed literal pattern is valid")
});

/// Decode a bare attribute value
///
/// `(tag)literal` with a known tag becomes the matching variant; anything
/// else is kept as a string. A known tag with an unparseable literal is an
/// error.
pub fn decode_attribute_value(text: &str) -> ParseResult<AttributeValue> {
    let Some(captures) = TYPED_LITERAL_REGEX.captures(text) else {
        return Ok(AttributeValue::String(text.to_string()));
    };
    let tag = captures.get(1).map_or("", |m| m.as_str());
    let literal = captures.get(2).map_or("", |m| m.as_str());

    match tag {
        BOOL_TAG => parse_bool(literal)
            .map(AttributeValue::Bool)
            .ok_or_else(|| invalid_literal(tag, literal)),
        INT_TAG => parse_literal(tag, literal).map(AttributeValue::Int),
        UINT_TAG => parse_literal(tag, literal).map(AttributeValue::Uint),
        FLOAT_TAG | FLOAT32_TAG | FLOAT64_TAG => {
            parse_literal(tag, literal).map(AttributeValue::Float)
        }
        NULL_TAG if literal == NULL_LITERAL => Ok(AttributeValue::Null),
        NULL_TAG => Err(invalid_literal(tag, literal)),
        _ => Ok(AttributeValue::String(text.to_string())),
    }
}

/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`
fn parse_bool(literal: &str) -> Option<bool> {
    match literal {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn parse_literal<T: FromStr>(tag: &str, literal: &str) -> ParseResult<T> {
    literal.parse::<T>().map_err(|_| invalid_literal(tag, literal))
}

fn invalid_literal(tag: &str, literal: &str) -> ParseError {
    ParseError::InvalidLiteral {
        tag: tag.to_string(),
        literal: literal.to_string(),
    }
}
