//! String manipulation utilities

use crate::constants::{BACKSLASH, DOUBLE_QUOTE};

/// Renders a grammar token, quoting it when it could be misread
///
/// A token is quoted when it is empty, contains a reserved character or a
/// double quote, or carries leading/trailing whitespace (input is trimmed
/// before parsing).
pub fn escape_string(value: &str, reserved: &str) -> String {
    if needs_quotes(value, reserved) {
        quote_string(value)
    } else {
        value.to_string()
    }
}

/// Checks whether a token has to be quoted to survive parsing
pub fn needs_quotes(value: &str, reserved: &str) -> bool {
    value.is_empty()
        || value != value.trim()
        || value.contains(DOUBLE_QUOTE)
        || value.contains(|ch| reserved.contains(ch))
}

/// Wraps a token in double quotes, escaping backslashes and quotes
pub fn quote_string(value: &str) -> String {
    let mut result = String::with_capacity(value.len() + 2);
    result.push(DOUBLE_QUOTE);
    for ch in value.chars() {
        match ch {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            _ => result.push(ch),
        }
    }
    result.push(DOUBLE_QUOTE);
    result
}

/// Unescapes the content of a quoted token
///
/// Returns the byte offset of the offending backslash on an invalid escape.
pub fn unescape_string(value: &str) -> Result<String, usize> {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.char_indices();

    while let Some((index, ch)) = chars.next() {
        if ch == BACKSLASH {
            match chars.next() {
                Some((_, '\\')) => result.push(BACKSLASH),
                Some((_, '"')) => result.push(DOUBLE_QUOTE),
                _ => return Err(index),
            }
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}

/// Finds the index of the closing double quote, accounting for escape sequences
pub fn find_closing_quote(content: &str, start: usize) -> Option<usize> {
    let bytes = content.as_bytes();
    let mut i = start + 1;

    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 1 < bytes.len() {
            // Skip escaped character
            i += 2;
            continue;
        }
        if bytes[i] == b'"' {
            return Some(i);
        }
        i += 1;
    }

    None
}
