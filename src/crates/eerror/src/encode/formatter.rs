//! Canonical text rendering

use crate::constants::{
    ATTRIBUTE_RESERVED, ATTRIBUTE_SEPARATOR, CLOSE_BRACKET, CLOSE_PAREN, CONTEXT_RESERVED,
    CONTEXT_SEPARATOR, IDENTIFIER_RESERVED, IDENTIFIER_SEPARATOR, KEY_VALUE_SEPARATOR,
    MESSAGE_RESERVED, OPEN_BRACKET, OPEN_PAREN, SPACE,
};
use crate::enhanced::EnhancedError;
use crate::shared::{escape_string, quote_string};
use crate::value::AttributeValue;
use std::fmt;

/// Render an enhanced error to its canonical text form
///
/// `IDENTIFIER: message (context 1; context 2) [key: value, other: (int)1]`
pub fn render(err: &EnhancedError) -> String {
    let mut output = format!(
        "{}{}{}",
        encode_identifier(&err.identifier),
        IDENTIFIER_SEPARATOR,
        encode_message(&err.message)
    );

    if !err.contexts.is_empty() {
        let contexts: Vec<String> = err.contexts.iter().map(|c| encode_context(c)).collect();
        output.push(SPACE);
        output.push(OPEN_PAREN);
        output.push_str(&contexts.join(CONTEXT_SEPARATOR));
        output.push(CLOSE_PAREN);
    }

    if !err.attributes.is_empty() {
        // BTreeMap iteration is already sorted by key
        let attributes: Vec<String> = err
            .attributes
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}{}{}",
                    encode_attribute_key(key),
                    KEY_VALUE_SEPARATOR,
                    encode_attribute_value(value)
                )
            })
            .collect();
        output.push(SPACE);
        output.push(OPEN_BRACKET);
        output.push_str(&attributes.join(ATTRIBUTE_SEPARATOR));
        output.push(CLOSE_BRACKET);
    }

    output
}

pub fn encode_identifier(identifier: &str) -> String {
    escape_string(identifier, IDENTIFIER_RESERVED)
}

pub fn encode_message(message: &str) -> String {
    escape_string(message, MESSAGE_RESERVED)
}

pub fn encode_context(context: &str) -> String {
    escape_string(context, CONTEXT_RESERVED)
}

pub fn encode_attribute_key(key: &str) -> String {
    escape_string(key, ATTRIBUTE_RESERVED)
}

/// Encode an attribute value, tagging every non-string variant
pub fn encode_attribute_value(value: &AttributeValue) -> String {
    match value {
        // A bare string starting with '(' would read back as a type tag
        AttributeValue::String(s) if s.starts_with(OPEN_PAREN) => quote_string(s),
        AttributeValue::String(s) => escape_string(s, ATTRIBUTE_RESERVED),
        other => {
            let tag = other.type_tag().unwrap_or_default();
            format!(
                "{}{}{}{}",
                OPEN_PAREN,
                tag,
                CLOSE_PAREN,
                escape_string(&other.to_string(), ATTRIBUTE_RESERVED)
            )
        }
    }
}

impl fmt::Display for EnhancedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}
