//! # Schema Reference Labels
//!
//! An [`ObjectReference`] names the schema a rejection came from. It is
//! opaque to validation and only ever rendered into messages. Schemas built
//! from documents use JSON pointers such as `#/components/schemas/Pet`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque label identifying an object schema in error messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectReference(pub String);

impl ObjectReference {
    /// Create a reference from any string-like label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Access the label.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reference to a child schema, one pointer segment deeper.
    ///
    /// `~` and `/` in the segment are escaped per RFC 6901.
    pub fn child(&self, segment: &str) -> Self {
        let escaped = segment.replace('~', "~0").replace('/', "~1");
        Self(format!("{}/{}", self.0, escaped))
    }
}

impl fmt::Display for ObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectReference {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for ObjectReference {
    fn from(label: String) -> Self {
        Self(label)
    }
}
