//! Core types for the eerror library

use crate::constants::{
    ENV_ALLOW_TRAILING_INPUT, ENV_CAPTURE_STACKTRACE, ENV_SYNTHESIZE_STACKTRACE,
};

/// Options for constructing enhanced errors
#[derive(Debug, Clone)]
pub struct ErrorOptions {
    /// Record the current backtrace in the `stacktrace` attribute (default: true)
    pub capture_stacktrace: bool,
}

impl Default for ErrorOptions {
    fn default() -> Self {
        Self {
            capture_stacktrace: true,
        }
    }
}

impl ErrorOptions {
    /// Load options from `EERROR_*` environment variables, keeping defaults
    /// for anything unset or unreadable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capture_stacktrace: env_flag_or(ENV_CAPTURE_STACKTRACE, defaults.capture_stacktrace),
        }
    }
}

/// Options for parsing enhanced errors from text
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Tolerate unconsumed text after the last grammar section (default: false)
    pub allow_trailing_input: bool,
    /// Capture a backtrace when the parsed attributes carry none (default: true)
    pub synthesize_stacktrace: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            allow_trailing_input: false,
            synthesize_stacktrace: true,
        }
    }
}

impl ParseOptions {
    /// Load options from `EERROR_*` environment variables, keeping defaults
    /// for anything unset or unreadable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            allow_trailing_input: env_flag_or(
                ENV_ALLOW_TRAILING_INPUT,
                defaults.allow_trailing_input,
            ),
            synthesize_stacktrace: env_flag_or(
                ENV_SYNTHESIZE_STACKTRACE,
                defaults.synthesize_stacktrace,
            ),
        }
    }
}

fn env_flag_or(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(value) => parse_flag(&value).unwrap_or_else(|| {
            tracing::warn!(key, value = %value, "Ignoring invalid boolean environment value");
            default
        }),
        Err(_) => default,
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Result type alias for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Reasons the parser rejects a piece of text
///
/// Positions are byte offsets into the trimmed input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("expected {expected} at position {position}")]
    Expected {
        expected: &'static str,
        position: usize,
    },

    #[error("unterminated quoted string starting at position {position}")]
    UnterminatedQuote { position: usize },

    #[error("unterminated {section} starting at position {position}")]
    Unterminated {
        section: &'static str,
        position: usize,
    },

    #[error("invalid escape sequence at position {position}")]
    InvalidEscape { position: usize },

    #[error("empty {entry} at position {position}")]
    EmptyEntry {
        entry: &'static str,
        position: usize,
    },

    #[error("invalid ({tag}) literal '{literal}'")]
    InvalidLiteral { tag: String, literal: String },

    #[error("unexpected trailing input at position {position}")]
    TrailingInput { position: usize },
}

impl ParseError {
    pub fn expected(expected: &'static str, position: usize) -> Self {
        ParseError::Expected { expected, position }
    }

    pub fn unterminated(section: &'static str, position: usize) -> Self {
        ParseError::Unterminated { section, position }
    }

    pub fn empty(entry: &'static str, position: usize) -> Self {
        ParseError::EmptyEntry { entry, position }
    }
}
