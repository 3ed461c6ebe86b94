//! # Error Types — Rejection Taxonomy
//!
//! Defines the single error a validation call can produce. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Exactly one rejection surfaces per call. When an object has several
//!   problems at once, the validator picks one by fixed precedence and the
//!   others are not reported.
//! - Every object-level rejection carries the offending key names and the
//!   [`ObjectReference`] of the schema, enough for a caller to render a
//!   message without access to the schema itself.
//! - Errors raised while validating a property are carried unchanged in
//!   [`ValidationError::Property`].

use serde_json::Value;
use thiserror::Error;

use crate::reference::ObjectReference;

/// Rejection produced by object validation.
///
/// `E` is the error type of the dispatcher that validates individual
/// properties.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError<E> {
    /// The candidate value is not a record.
    #[error("{value} is not an object in {reference}")]
    NotAnObject {
        /// The rejected value.
        value: Value,
        /// Schema the value was validated against.
        reference: ObjectReference,
    },

    /// The value has keys the schema does not declare, and undeclared keys
    /// are not permitted.
    #[error("properties {} are not defined in {reference}", .names.join(","))]
    UnknownProperties {
        /// Undeclared keys, in input order.
        names: Vec<String>,
        /// Schema the value was validated against.
        reference: ObjectReference,
    },

    /// Required keys are absent from the value.
    #[error("required parameters {} not exist in {reference}", .names.join(","))]
    MissingRequiredProperties {
        /// Outstanding required keys, in declaration order.
        names: Vec<String>,
        /// Schema the value was validated against.
        reference: ObjectReference,
    },

    /// Keys were rejected by a schema that forbids additional properties.
    #[error("additional properties {} are not permitted in {reference}", .names.join(","))]
    AdditionalPropertiesForbidden {
        /// Rejected keys, in input order.
        names: Vec<String>,
        /// Schema the value was validated against.
        reference: ObjectReference,
    },

    /// A declared property failed its own validation.
    #[error(transparent)]
    Property(E),
}

/// Discriminant of a [`ValidationError`], for callers that branch on the
/// class of rejection without caring about its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionKind {
    NotAnObject,
    UnknownProperties,
    MissingRequiredProperties,
    AdditionalPropertiesForbidden,
    Property,
}

impl<E> ValidationError<E> {
    /// The class of this rejection.
    pub fn kind(&self) -> RejectionKind {
        match self {
            Self::NotAnObject { .. } => RejectionKind::NotAnObject,
            Self::UnknownProperties { .. } => RejectionKind::UnknownProperties,
            Self::MissingRequiredProperties { .. } => RejectionKind::MissingRequiredProperties,
            Self::AdditionalPropertiesForbidden { .. } => {
                RejectionKind::AdditionalPropertiesForbidden
            }
            Self::Property(_) => RejectionKind::Property,
        }
    }

    /// Key names carried by an object-level rejection. Empty for
    /// `NotAnObject` and nested property errors.
    pub fn names(&self) -> &[String] {
        match self {
            Self::UnknownProperties { names, .. }
            | Self::MissingRequiredProperties { names, .. }
            | Self::AdditionalPropertiesForbidden { names, .. } => names,
            Self::NotAnObject { .. } | Self::Property(_) => &[],
        }
    }

    /// Schema reference of an object-level rejection. `None` for nested
    /// property errors, which carry their own context.
    pub fn reference(&self) -> Option<&ObjectReference> {
        match self {
            Self::NotAnObject { reference, .. }
            | Self::UnknownProperties { reference, .. }
            | Self::MissingRequiredProperties { reference, .. }
            | Self::AdditionalPropertiesForbidden { reference, .. } => Some(reference),
            Self::Property(_) => None,
        }
    }

    /// The nested property error, if this is one.
    pub fn property(&self) -> Option<&E> {
        match self {
            Self::Property(e) => Some(e),
            _ => None,
        }
    }
}

/// Error while building a schema from a document fragment.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The fragment is structurally valid JSON but not a usable schema.
    #[error("invalid schema at {reference}: {reason}")]
    InvalidSchema {
        /// Where in the document the problem is.
        reference: ObjectReference,
        /// What is wrong.
        reason: String,
    },

    /// The fragment could not be deserialized.
    #[error("schema deserialization failed: {0}")]
    Deserialize(#[from] serde_json::Error),
}
