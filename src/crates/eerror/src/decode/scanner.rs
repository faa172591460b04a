//! Bounds-checked cursor over enhanced error text

use crate::constants::DOUBLE_QUOTE;
use crate::shared::{find_closing_quote, unescape_string};
use crate::types::{ParseError, ParseResult};

/// A cursor for scanning through the text of an enhanced error
///
/// Every read goes through `get`, so scanning past the end yields `None`
/// rather than a panic. Positions only ever land on ASCII delimiters or the
/// end of input, which keeps them on UTF-8 character boundaries.
pub struct Cursor<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.position).copied()
    }

    pub fn remaining(&self) -> &'a str {
        self.input.get(self.position..).unwrap_or_default()
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.remaining().starts_with(prefix)
    }

    pub fn advance(&mut self, count: usize) {
        self.position = (self.position + count).min(self.input.len());
    }

    /// Consume `byte` if it is next
    pub fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.advance(1);
            true
        } else {
            false
        }
    }

    /// Consume `literal` or fail with an "expected" error
    pub fn expect(&mut self, literal: &str, expected: &'static str) -> ParseResult<()> {
        if self.starts_with(literal) {
            self.advance(literal.len());
            Ok(())
        } else {
            Err(ParseError::expected(expected, self.position))
        }
    }

    pub fn skip_spaces(&mut self) {
        while self.peek() == Some(b' ') {
            self.advance(1);
        }
    }

    /// Take text up to (not including) the first of `stops`
    ///
    /// Returns the text and the stop byte found, or `None` when the input
    /// ran out first. The cursor is left on the stop byte.
    pub fn take_until(&mut self, stops: &[u8]) -> (&'a str, Option<u8>) {
        let rest = self.remaining();
        let end = rest
            .bytes()
            .position(|b| stops.contains(&b))
            .unwrap_or(rest.len());
        let taken = rest.get(..end).unwrap_or_default();
        self.advance(end);
        (taken, self.peek())
    }

    /// Take a double-quoted token, returning its unescaped content
    pub fn take_quoted(&mut self) -> ParseResult<String> {
        let start = self.position;
        if self.peek() != Some(DOUBLE_QUOTE as u8) {
            return Err(ParseError::expected("'\"'", start));
        }

        let rest = self.remaining();
        let closing = find_closing_quote(rest, 0)
            .ok_or(ParseError::UnterminatedQuote { position: start })?;
        let content = rest
            .get(1..closing)
            .ok_or(ParseError::UnterminatedQuote { position: start })?;
        let value = unescape_string(content).map_err(|offset| ParseError::InvalidEscape {
            position: start + 1 + offset,
        })?;

        self.advance(closing + 1);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_until_stops_on_delimiter() {
        let mut cursor = Cursor::new("message (context)");
        let (text, stop) = cursor.take_until(b"([");
        assert_eq!(text, "message ");
        assert_eq!(stop, Some(b'('));
        assert_eq!(cursor.position(), 8);
    }

    #[test]
    fn test_take_until_runs_to_end() {
        let mut cursor = Cursor::new("just text");
        let (text, stop) = cursor.take_until(b";)");
        assert_eq!(text, "just text");
        assert_eq!(stop, None);
        assert!(cursor.at_end());
    }

    #[test]
    fn test_take_quoted() {
        let mut cursor = Cursor::new(r#""a \"quoted\" (token)"; rest"#);
        assert_eq!(cursor.take_quoted().unwrap(), "a \"quoted\" (token)");
        assert_eq!(cursor.peek(), Some(b';'));
    }

    #[test]
    fn test_take_quoted_errors() {
        let mut cursor = Cursor::new("\"never closed");
        assert_eq!(
            cursor.take_quoted(),
            Err(ParseError::UnterminatedQuote { position: 0 })
        );

        let mut cursor = Cursor::new(r#""bad \x escape""#);
        assert_eq!(
            cursor.take_quoted(),
            Err(ParseError::InvalidEscape { position: 5 })
        );
    }

    #[test]
    fn test_reads_past_end_are_safe() {
        let mut cursor = Cursor::new("ab");
        cursor.advance(10);
        assert!(cursor.at_end());
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.remaining(), "");
        assert!(cursor.expect(": ", "': '").is_err());
    }

    #[test]
    fn test_multibyte_text() {
        let mut cursor = Cursor::new("échec réseau [k: v]");
        let (text, stop) = cursor.take_until(b"([");
        assert_eq!(text, "échec réseau ");
        assert_eq!(stop, Some(b'['));
    }
}
