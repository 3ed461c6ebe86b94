//! # osv-schema — Object Schema Validation
//!
//! Validates record-shaped JSON values against object schemas: declared
//! properties, required keys, and a policy for keys that are not declared.
//!
//! ## Object Validation (`validate`)
//!
//! [`ObjectValidator`] walks a value's entries once, hands each declared
//! property to a [`PropertyDispatcher`], and reports at most one rejection
//! chosen by fixed precedence. Key entry points:
//!
//! - [`ObjectValidator::validate`] — a top-level object.
//! - [`ObjectValidator::validate_with`] — an object that is an `allOf`
//!   branch or sits under a discriminator, via [`ObjectContext`].
//!
//! ## Typed Dispatch (`types`)
//!
//! [`TypeDispatcher`] validates primitive OpenAPI types, arrays and nested
//! objects, and coerces string inputs to their declared type when
//! coercion is enabled.
//!
//! ## Crate Policy
//!
//! - Depends only on `osv-core` internally.
//! - Validation never mutates its input. Accepted values are returned as
//!   new values.
//! - Validation does no I/O. Diagnostics go through `tracing` at trace
//!   level and are silent without a subscriber.

pub mod dispatch;
pub mod object;
pub mod types;
pub mod validate;

pub use dispatch::PropertyDispatcher;
pub use object::{AdditionalProperties, ObjectSchema};
pub use types::{PropertyError, PropertySchema, PropertyType, TypeDispatcher};
pub use validate::{ObjectContext, ObjectValidator};
