//! Constants used throughout the eerror library

// Structural characters
pub const COLON: char = ':';
pub const SEMICOLON: char = ';';
pub const COMMA: char = ',';
pub const SPACE: char = ' ';

// Brackets and parentheses
pub const OPEN_PAREN: char = '(';
pub const CLOSE_PAREN: char = ')';
pub const OPEN_BRACKET: char = '[';
pub const CLOSE_BRACKET: char = ']';

// Escape characters
pub const BACKSLASH: char = '\\';
pub const DOUBLE_QUOTE: char = '"';

// Separators emitted between grammar sections
pub const IDENTIFIER_SEPARATOR: &str = ": ";
pub const CONTEXT_SEPARATOR: &str = "; ";
pub const ATTRIBUTE_SEPARATOR: &str = ", ";
pub const KEY_VALUE_SEPARATOR: &str = ": ";

/// Characters that force quoting, per grammar position
pub const IDENTIFIER_RESERVED: &str = ":";
pub const MESSAGE_RESERVED: &str = ":()[]";
pub const CONTEXT_RESERVED: &str = "();";
pub const ATTRIBUTE_RESERVED: &str = "[]:,";

// Type tags for non-string attribute values
pub const BOOL_TAG: &str = "bool";
pub const INT_TAG: &str = "int";
pub const UINT_TAG: &str = "uint";
pub const FLOAT_TAG: &str = "float";
pub const FLOAT32_TAG: &str = "float32";
pub const FLOAT64_TAG: &str = "float64";
pub const NULL_TAG: &str = "null";

pub const NULL_LITERAL: &str = "null";

/// Identifier given to foreign errors whose text is not an enhanced error
pub const E_EXTERNAL_ERROR: &str = "E_EXTERNAL_ERROR";

/// Attribute holding the backtrace captured at construction
pub const STACKTRACE_ATTRIBUTE: &str = "stacktrace";

/// Attribute marking an error built from an unparseable foreign value
pub const PARSED_MARKER_ATTRIBUTE: &str = "_eerror_parsed";

// Environment variables read by the `from_env` option loaders
pub const ENV_CAPTURE_STACKTRACE: &str = "EERROR_CAPTURE_STACKTRACE";
pub const ENV_ALLOW_TRAILING_INPUT: &str = "EERROR_ALLOW_TRAILING_INPUT";
pub const ENV_SYNTHESIZE_STACKTRACE: &str = "EERROR_SYNTHESIZE_STACKTRACE";
