//! The enhanced error value and its mutators

use crate::constants::STACKTRACE_ATTRIBUTE;
use crate::lineage::Parent;
use crate::types::ErrorOptions;
use crate::value::AttributeValue;
use std::backtrace::Backtrace;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide source of instance ids. Starts at 1 and is never reset;
/// this is the only global state of the crate.
static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_instance_id() -> u64 {
    NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed)
}

pub(crate) fn capture_stacktrace() -> String {
    Backtrace::force_capture().to_string()
}

/// An error described by an identifier, a message, the contexts it was
/// forwarded through, and attributes needed to reproduce it.
///
/// Mutators take `&mut self`, so an instance cannot be mutated from two
/// threads at once. To hand the same error to several workers, give each
/// one a [`dup`](EnhancedError::dup).
///
/// ```rust
/// use eerror::{EnhancedError, ErrorOptions};
///
/// let options = ErrorOptions { capture_stacktrace: false };
/// let mut err = EnhancedError::new_with_options("E_PERMISSION_DENIED", "Access refused", &options);
/// err.in_context("loading profile");
/// err.set_attribute("user", "alice");
/// err.set_attribute("attempt", 3);
///
/// assert_eq!(
///     err.to_string(),
///     "E_PERMISSION_DENIED: Access refused (loading profile) [attempt: (int)3, user: alice]"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct EnhancedError {
    pub(crate) parent: Parent,
    pub(crate) identifier: String,
    pub(crate) message: String,
    pub(crate) contexts: Vec<String>,
    pub(crate) attributes: BTreeMap<String, AttributeValue>,
    pub(crate) instance_id: u64,
}

impl EnhancedError {
    /// Create an error, recording the current backtrace as `stacktrace`
    pub fn new(identifier: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new_with_options(identifier, message, &ErrorOptions::default())
    }

    pub fn new_with_options(
        identifier: impl Into<String>,
        message: impl Into<String>,
        options: &ErrorOptions,
    ) -> Self {
        let mut err = Self::from_parts(
            Parent::None,
            identifier.into(),
            message.into(),
            Vec::new(),
            BTreeMap::new(),
        );
        if options.capture_stacktrace {
            err.set_attribute(STACKTRACE_ATTRIBUTE, capture_stacktrace());
        }
        err
    }

    /// Assemble an error with a freshly minted instance id
    pub(crate) fn from_parts(
        parent: Parent,
        identifier: String,
        message: String,
        contexts: Vec<String>,
        attributes: BTreeMap<String, AttributeValue>,
    ) -> Self {
        Self {
            parent,
            identifier,
            message,
            contexts,
            attributes,
            instance_id: next_instance_id(),
        }
    }

    /// Append a context, describing where the error is being forwarded from
    pub fn in_context(&mut self, description: impl Into<String>) {
        self.contexts.push(description.into());
    }

    /// Set an attribute, replacing any previous value under the same name
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Set attributes from a flat `key, value, key, value, ...` list
    ///
    /// Non-string keys use their literal text. A trailing key without a
    /// value is stored as [`AttributeValue::Null`].
    pub fn set_attributes<I>(&mut self, pairs: I)
    where
        I: IntoIterator,
        I::Item: Into<AttributeValue>,
    {
        let mut pairs = pairs.into_iter().map(Into::into);
        while let Some(key) = pairs.next() {
            let value = pairs.next().unwrap_or(AttributeValue::Null);
            self.attributes.insert(key.into_key(), value);
        }
    }

    pub fn with_context(mut self, description: impl Into<String>) -> Self {
        self.in_context(description);
        self
    }

    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// The error identifier
    pub fn id(&self) -> &str {
        &self.identifier
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Contexts in the order they were added
    pub fn contexts(&self) -> &[String] {
        &self.contexts
    }

    /// The live attribute map (borrowed, not a copy)
    pub fn attributes(&self) -> &BTreeMap<String, AttributeValue> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    pub fn instance_id(&self) -> u64 {
        self.instance_id
    }

    pub fn parent(&self) -> &Parent {
        &self.parent
    }

    /// An independent copy keeping the same parent and instance id
    pub fn dup(&self) -> Self {
        self.clone()
    }
}

/// Create an error with attributes from a flat `key, value, ...` list
pub fn new_error<I>(identifier: impl Into<String>, message: impl Into<String>, pairs: I) -> EnhancedError
where
    I: IntoIterator,
    I::Item: Into<AttributeValue>,
{
    let mut err = EnhancedError::new(identifier, message);
    err.set_attributes(pairs);
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(identifier: &str, message: &str) -> EnhancedError {
        EnhancedError::new_with_options(
            identifier,
            message,
            &ErrorOptions {
                capture_stacktrace: false,
            },
        )
    }

    #[test]
    fn test_new_captures_stacktrace() {
        let err = EnhancedError::new("E_TEST_ERROR", "This is a test error");
        assert_eq!(err.id(), "E_TEST_ERROR");
        assert_eq!(err.message(), "This is a test error");
        assert!(err.contexts().is_empty());
        assert!(matches!(
            err.attribute(STACKTRACE_ATTRIBUTE),
            Some(AttributeValue::String(_))
        ));
    }

    #[test]
    fn test_instance_ids_are_unique() {
        let a = bare("E_A", "a");
        let b = bare("E_A", "a");
        assert_ne!(a.instance_id(), b.instance_id());
    }

    #[test]
    fn test_attribute_overwrite() {
        let mut err = bare("E_TEST_ERROR", "msg");
        err.set_attribute("k", "v1");
        err.set_attribute("k", "v2");
        assert_eq!(err.attributes().len(), 1);
        assert_eq!(err.attribute("k"), Some(&AttributeValue::from("v2")));
    }

    #[test]
    fn test_set_attributes_pairs() {
        let mut err = bare("E_TEST_ERROR", "msg");
        err.set_attributes([
            AttributeValue::from("a"),
            AttributeValue::from(1),
            AttributeValue::from(2),
            AttributeValue::from(true),
            AttributeValue::from("a"),
            AttributeValue::from(3),
            AttributeValue::from("dangling"),
        ]);

        assert_eq!(err.attribute("a"), Some(&AttributeValue::Int(3)));
        assert_eq!(err.attribute("2"), Some(&AttributeValue::Bool(true)));
        assert_eq!(err.attribute("dangling"), Some(&AttributeValue::Null));
        assert_eq!(err.attributes().len(), 3);
    }

    #[test]
    fn test_dup_is_isolated() {
        let mut a = bare("E_TEST_ERROR", "msg");
        a.in_context("first");
        let mut b = a.dup();
        b.set_attribute("x", 1);
        b.in_context("second");

        assert!(a.attribute("x").is_none());
        assert_eq!(a.contexts(), ["first"]);
        assert_eq!(b.contexts(), ["first", "second"]);
        assert_eq!(a.instance_id(), b.instance_id());
    }

    #[test]
    fn test_new_error_pairs() {
        let err = new_error("E_TEST_ERROR", "msg", ["parameter", "hello world"]);
        assert_eq!(
            err.attribute("parameter"),
            Some(&AttributeValue::from("hello world"))
        );
        assert!(err.attribute(STACKTRACE_ATTRIBUTE).is_some());
    }
}
