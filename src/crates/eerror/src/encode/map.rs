//! Structured, lossless form of an enhanced error

use crate::enhanced::EnhancedError;
use crate::lineage::Parent;
use crate::value::AttributeValue;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

use super::formatter::render;

/// Protocol-friendly view of an enhanced error, marshallable without loss
///
/// Two errors are equal for transport purposes when their maps are equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorMap {
    /// The canonical text form
    pub error: String,
    pub code: String,
    pub message: String,
    pub contexts: Vec<String>,
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl EnhancedError {
    pub fn to_map(&self) -> ErrorMap {
        ErrorMap {
            error: render(self),
            code: self.identifier.clone(),
            message: self.message.clone(),
            contexts: self.contexts.clone(),
            attributes: self.attributes.clone(),
        }
    }

    /// Rebuild an error from its structured form, without parsing `error`
    ///
    /// The result has a fresh instance id and no parent.
    pub fn from_map(map: ErrorMap) -> Self {
        Self::from_parts(
            Parent::None,
            map.code,
            map.message,
            map.contexts,
            map.attributes,
        )
    }
}

impl From<&EnhancedError> for ErrorMap {
    fn from(err: &EnhancedError) -> Self {
        err.to_map()
    }
}

impl Serialize for EnhancedError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}
