//! Lineage: wrapping foreign errors and tracing what an error was formed from
//!
//! Every enhanced error has a [`Parent`]. Following parent links until none
//! remain (or a foreign value is reached) yields the error's [`Ancestor`].
//! Two values are related by [`EnhancedError::is`] when their ancestors match.
//!
//! ```rust
//! use eerror::{from, ForeignError};
//!
//! let io = ForeignError::msg("connection reset by peer");
//! let a = from(io.clone());
//! let b = a.wrap("E_SYNC_FAILED", "sync aborted");
//!
//! assert!(a.is(&io));
//! assert!(b.is(&io));
//! assert!(b.is(&a));
//! ```

use crate::constants::{E_EXTERNAL_ERROR, PARSED_MARKER_ATTRIBUTE};
use crate::enhanced::EnhancedError;
use crate::types::ParseOptions;
use std::collections::{BTreeMap, HashSet};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// What an enhanced error was formed from
#[derive(Debug, Clone, Default)]
pub enum Parent {
    #[default]
    None,
    Error(Arc<EnhancedError>),
    Foreign(ForeignError),
}

/// An opaque error from outside this crate
///
/// Clones share the underlying allocation, which is the value's identity for
/// lineage comparisons.
#[derive(Clone)]
pub struct ForeignError {
    inner: Arc<dyn StdError + Send + Sync + 'static>,
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct MessageError(String);

impl ForeignError {
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(error),
        }
    }

    /// Wrap an already shared error, keeping its identity
    pub fn from_arc(inner: Arc<dyn StdError + Send + Sync + 'static>) -> Self {
        Self { inner }
    }

    /// A foreign error carrying only a message
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(MessageError(message.into()))
    }

    pub fn get_ref(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.inner
    }

    fn identity(&self) -> usize {
        Arc::as_ptr(&self.inner) as *const () as usize
    }
}

impl fmt::Debug for ForeignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner, f)
    }
}

impl fmt::Display for ForeignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.inner, f)
    }
}

impl From<&str> for ForeignError {
    fn from(message: &str) -> Self {
        Self::msg(message)
    }
}

impl From<String> for ForeignError {
    fn from(message: String) -> Self {
        Self::msg(message)
    }
}

/// Anything [`from`] accepts
#[derive(Debug, Clone)]
pub enum ErrorSource {
    Enhanced(EnhancedError),
    Foreign(ForeignError),
}

impl From<EnhancedError> for ErrorSource {
    fn from(err: EnhancedError) -> Self {
        ErrorSource::Enhanced(err)
    }
}

impl From<ForeignError> for ErrorSource {
    fn from(err: ForeignError) -> Self {
        ErrorSource::Foreign(err)
    }
}

impl From<&str> for ErrorSource {
    fn from(message: &str) -> Self {
        ErrorSource::Foreign(ForeignError::msg(message))
    }
}

impl From<String> for ErrorSource {
    fn from(message: String) -> Self {
        ErrorSource::Foreign(ForeignError::msg(message))
    }
}

/// Convert any error into an enhanced error
///
/// Enhanced errors come back unchanged. A foreign error whose text parses as
/// an enhanced error yields the parsed value; otherwise it becomes an
/// `E_EXTERNAL_ERROR` carrying its text. Either way the foreign value is
/// kept as the parent.
pub fn from(source: impl Into<ErrorSource>) -> EnhancedError {
    let foreign = match source.into() {
        ErrorSource::Enhanced(err) => return err,
        ErrorSource::Foreign(foreign) => foreign,
    };

    let text = foreign.to_string();
    if let Some(mut parsed) = crate::parse_with_options(&text, &ParseOptions::default()) {
        tracing::trace!(code = %parsed.identifier, "Foreign error parsed as enhanced error");
        parsed.parent = Parent::Foreign(foreign);
        return parsed;
    }

    tracing::trace!("Wrapping foreign error as {}", E_EXTERNAL_ERROR);
    let mut err = EnhancedError::from_parts(
        Parent::Foreign(foreign),
        E_EXTERNAL_ERROR.to_string(),
        text,
        Vec::new(),
        BTreeMap::new(),
    );
    err.set_attribute(PARSED_MARKER_ATTRIBUTE, true);
    err
}

/// The root of a lineage chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ancestor {
    /// An enhanced error with no parent, by instance id
    Instance(u64),
    /// A foreign error, by allocation identity
    Foreign(usize),
}

/// Values that have an initial ancestor
pub trait Origin {
    fn initial_ancestor(&self) -> Ancestor;
}

impl Origin for EnhancedError {
    /// Follow parent links to the root
    ///
    /// The walk has no depth limit. It stops early, at the last error
    /// reached, only if an instance id repeats.
    fn initial_ancestor(&self) -> Ancestor {
        let mut current = self;
        let mut visited = HashSet::new();

        loop {
            match &current.parent {
                Parent::None => return Ancestor::Instance(current.instance_id),
                Parent::Foreign(foreign) => return Ancestor::Foreign(foreign.identity()),
                Parent::Error(parent) => {
                    if !visited.insert(current.instance_id) {
                        tracing::warn!(
                            instance_id = current.instance_id,
                            depth = visited.len(),
                            "Lineage walk cut short"
                        );
                        return Ancestor::Instance(current.instance_id);
                    }
                    current = parent.as_ref();
                }
            }
        }
    }
}

impl Origin for ForeignError {
    fn initial_ancestor(&self) -> Ancestor {
        Ancestor::Foreign(self.identity())
    }
}

impl Origin for ErrorSource {
    fn initial_ancestor(&self) -> Ancestor {
        match self {
            ErrorSource::Enhanced(err) => err.initial_ancestor(),
            ErrorSource::Foreign(foreign) => foreign.initial_ancestor(),
        }
    }
}

impl EnhancedError {
    /// Whether this error was formed from the same origin as `candidate`
    pub fn is<O: Origin + ?Sized>(&self, candidate: &O) -> bool {
        self.initial_ancestor() == candidate.initial_ancestor()
    }

    /// Form a new error from this one, which becomes its parent
    pub fn wrap(&self, identifier: impl Into<String>, message: impl Into<String>) -> Self {
        let mut err = EnhancedError::new(identifier, message);
        err.parent = Parent::Error(Arc::new(self.clone()));
        err
    }
}

impl Drop for EnhancedError {
    /// Unlink uniquely owned parents one at a time, so dropping a long wrap
    /// chain does not recurse once per link
    fn drop(&mut self) {
        let mut parent = std::mem::take(&mut self.parent);
        while let Parent::Error(link) = parent {
            match Arc::into_inner(link) {
                Some(mut owned) => parent = std::mem::take(&mut owned.parent),
                None => break,
            }
        }
    }
}

impl StdError for EnhancedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.parent {
            Parent::None => None,
            Parent::Error(parent) => Some(&**parent),
            Parent::Foreign(foreign) => Some(foreign.get_ref()),
        }
    }
}
