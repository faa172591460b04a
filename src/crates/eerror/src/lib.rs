//! eerror - enhanced errors
//!
//! An enhanced error is made of four parts:
//! - an identifier (`E_PERMISSION_DENIED`), to filter errors by kind
//! - a human readable message
//! - contexts, stacked each time the error is forwarded
//! - typed attributes, needed to reproduce the error
//!
//! Errors render to a canonical text form that parses back without loss,
//! and keep track of what they were formed from.
//!
//! # Example
//!
//! ```rust
//! use eerror::{parse, AttributeValue, EnhancedError};
//!
//! let mut err = EnhancedError::new("E_SOMEERROR", "My error message");
//! err.in_context("context 1");
//! err.in_context("context 2 with; (special) chars");
//! err.set_attribute("some other attribute", 1);
//!
//! let text = err.to_string();
//! assert!(text.starts_with(
//!     "E_SOMEERROR: My error message (context 1; \"context 2 with; (special) chars\") ["
//! ));
//!
//! let parsed = parse(&text).unwrap();
//! assert_eq!(parsed.to_map(), err.to_map());
//! assert_eq!(parsed.attribute("some other attribute"), Some(&AttributeValue::Int(1)));
//! ```

pub mod constants;
mod decode;
pub mod enhanced;
pub mod encode;
pub mod lineage;
pub mod shared;
pub mod types;
pub mod value;

pub use constants::{E_EXTERNAL_ERROR, PARSED_MARKER_ATTRIBUTE, STACKTRACE_ATTRIBUTE};
pub use enhanced::{new_error, EnhancedError};
pub use encode::{render, ErrorMap};
pub use lineage::{from, Ancestor, ErrorSource, ForeignError, Origin, Parent};
pub use types::{ErrorOptions, ParseOptions};
pub use value::AttributeValue;

use decode::parse_parts;

/// Parse an enhanced error from its canonical text form
///
/// Returns `None` when the text is not a well-formed enhanced error.
///
/// # Example
///
/// ```rust
/// use eerror::{parse, AttributeValue};
///
/// let err = parse("E_SOMEERROR: message (context) [attribute: (int)-1]").unwrap();
/// assert_eq!(err.id(), "E_SOMEERROR");
/// assert_eq!(err.contexts(), ["context"]);
/// assert_eq!(err.attribute("attribute"), Some(&AttributeValue::Int(-1)));
///
/// assert!(parse("E_SOMEERROR: message [attribute]").is_none());
/// ```
pub fn parse(input: &str) -> Option<EnhancedError> {
    parse_with_options(input, &ParseOptions::default())
}

/// Parse an enhanced error with explicit options
///
/// The result has a fresh instance id and no parent.
pub fn parse_with_options(input: &str, options: &ParseOptions) -> Option<EnhancedError> {
    let parts = match parse_parts(input, options) {
        Ok(parts) => parts,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected enhanced error text");
            return None;
        }
    };

    let mut err = EnhancedError::from_parts(
        Parent::None,
        parts.identifier,
        parts.message,
        parts.contexts,
        parts.attributes,
    );
    if options.synthesize_stacktrace && err.attribute(STACKTRACE_ATTRIBUTE).is_none() {
        err.set_attribute(STACKTRACE_ATTRIBUTE, enhanced::capture_stacktrace());
    }
    Some(err)
}
