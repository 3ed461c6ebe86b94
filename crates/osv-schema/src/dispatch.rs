//! # Property Dispatcher
//!
//! The seam between object validation and everything else. The object
//! validator knows how to combine property results into an object result;
//! it does not know how a single property is validated. That is the
//! dispatcher's job.

use serde_json::Value;

/// Validates a single property value against its schema.
///
/// Implementations return the value to use in place of the raw input on
/// success (identical to the input when nothing was coerced) or an error
/// that the object validator forwards to its caller unchanged.
pub trait PropertyDispatcher {
    /// Schema type for a single property.
    type Schema;
    /// Error produced when a property is rejected.
    type Error;

    /// Validate `value` against `schema`.
    fn validate(&self, value: &Value, schema: &Self::Schema) -> Result<Value, Self::Error>;
}

impl<D: PropertyDispatcher + ?Sized> PropertyDispatcher for &D {
    type Schema = D::Schema;
    type Error = D::Error;

    fn validate(&self, value: &Value, schema: &Self::Schema) -> Result<Value, Self::Error> {
        (**self).validate(value, schema)
    }
}
