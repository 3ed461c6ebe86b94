//! # Object Validation
//!
//! Validates a record against an [`ObjectSchema`], delegating each declared
//! property to a [`PropertyDispatcher`] and deciding how the per-property
//! results combine into one outcome.
//!
//! ## Traversal
//!
//! Entries are visited once, in the value's own key order. The first
//! property the dispatcher rejects ends the call: later keys are not
//! visited and nothing is coerced.
//!
//! ## Precedence
//!
//! When the traversal completes, the remaining checks run in a fixed order
//! and the first failure is the only one reported:
//!
//! 1. undeclared keys, when the schema forbids them and the object is not an
//!    `allOf` branch → [`ValidationError::UnknownProperties`]
//! 2. outstanding required keys → [`ValidationError::MissingRequiredProperties`]
//! 3. keys rejected by the additional-property policy, when the object is not
//!    an `allOf` branch → [`ValidationError::AdditionalPropertiesForbidden`]
//!
//! Every key that lands in (3) is also undeclared, so (1) usually fires
//! first. The exception is the discriminator property: it is exempt from
//! (1) but not from the additional-property policy, so when it is the only
//! undeclared key under a schema that forbids extras, (3) reports it.
//!
//! ## Ownership
//!
//! The input value is borrowed and never modified. An accepted value is
//! returned as a new [`Value`]: a copy of the input, with coerced property
//! values merged in when [`ValidatorOptions::coerce_values`] is set.

use std::collections::HashSet;

use osv_core::{ValidationError, ValidatorOptions};
use serde_json::Value;
use tracing::trace;

use crate::dispatch::PropertyDispatcher;
use crate::object::ObjectSchema;

/// Position of an object within its enclosing schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectContext<'a> {
    /// The object is one branch of an enclosing `allOf`. Checks for
    /// undeclared keys are left to the combinator, which sees every branch.
    pub parent_all_of: bool,

    /// Property used by the enclosing schema's discriminator. Never
    /// reported as undeclared, but still subject to the additional-property
    /// policy.
    pub discriminator_property_name: Option<&'a str>,
}

impl<'a> ObjectContext<'a> {
    /// Context for an object that is a branch of an `allOf`.
    pub fn all_of_branch() -> Self {
        Self {
            parent_all_of: true,
            discriminator_property_name: None,
        }
    }

    /// Exempt the discriminator property from the undeclared-key check.
    pub fn with_discriminator(mut self, property_name: &'a str) -> Self {
        self.discriminator_property_name = Some(property_name);
        self
    }
}

/// Validator for record values.
///
/// Holds a borrowed dispatcher and the options it was configured with.
/// Cheap to construct; build one per call site or keep one around.
#[derive(Debug)]
pub struct ObjectValidator<'d, D> {
    dispatcher: &'d D,
    options: ValidatorOptions,
}

impl<'d, D> Clone for ObjectValidator<'d, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'d, D> Copy for ObjectValidator<'d, D> {}

impl<'d, D: PropertyDispatcher> ObjectValidator<'d, D> {
    /// Create a validator that delegates properties to `dispatcher`.
    pub fn new(dispatcher: &'d D, options: ValidatorOptions) -> Self {
        Self {
            dispatcher,
            options,
        }
    }

    /// Options this validator was configured with.
    pub fn options(&self) -> ValidatorOptions {
        self.options
    }

    /// Validate a top-level object: not an `allOf` branch, no discriminator.
    pub fn validate(
        &self,
        value: &Value,
        schema: &ObjectSchema<D::Schema>,
    ) -> Result<Value, ValidationError<D::Error>> {
        self.validate_with(value, schema, ObjectContext::default())
    }

    /// Validate an object in the given context.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::NotAnObject`] if `value` is not a record.
    /// - [`ValidationError::Property`] with the dispatcher's error for the
    ///   first declared property, in key order, that fails.
    /// - One object-level rejection, chosen by the precedence described in
    ///   the module documentation.
    pub fn validate_with(
        &self,
        value: &Value,
        schema: &ObjectSchema<D::Schema>,
        context: ObjectContext<'_>,
    ) -> Result<Value, ValidationError<D::Error>> {
        let Some(record) = value.as_object() else {
            trace!(reference = %schema.reference, "rejected: value is not an object");
            return Err(ValidationError::NotAnObject {
                value: value.clone(),
                reference: schema.reference.clone(),
            });
        };

        let Some(properties) = schema.properties.as_ref() else {
            return Ok(value.clone());
        };

        let mut required_remaining = schema.required_names();
        let mut declared_seen: HashSet<&str> = HashSet::with_capacity(record.len());
        let mut forbidden_extras: Vec<&str> = Vec::new();
        let mut coerced: Vec<(&str, Value)> = Vec::with_capacity(record.len());

        for (key, raw) in record {
            let key = key.as_str();
            match properties.get(key) {
                Some(property_schema) => {
                    declared_seen.insert(key);
                    let validated = self
                        .dispatcher
                        .validate(raw, property_schema)
                        .map_err(|err| {
                            trace!(reference = %schema.reference, key, "rejected: property failed");
                            ValidationError::Property(err)
                        })?;
                    required_remaining.retain(|name| *name != key);
                    coerced.push((key, validated));
                }
                // Undeclared values pass through untouched, so they need no
                // entry in `coerced`.
                None if schema.additional_properties.is_allowed() => {
                    required_remaining.retain(|name| *name != key);
                }
                None => forbidden_extras.push(key),
            }
        }

        let unseen_keys: Vec<String> = record
            .keys()
            .map(String::as_str)
            .filter(|key| !declared_seen.contains(key))
            .filter(|key| Some(*key) != context.discriminator_property_name)
            .map(str::to_owned)
            .collect();

        if !unseen_keys.is_empty()
            && !context.parent_all_of
            && !schema.additional_properties.is_allowed()
        {
            trace!(reference = %schema.reference, keys = ?unseen_keys, "rejected: undeclared properties");
            return Err(ValidationError::UnknownProperties {
                names: unseen_keys,
                reference: schema.reference.clone(),
            });
        }

        if !required_remaining.is_empty() {
            trace!(reference = %schema.reference, keys = ?required_remaining, "rejected: missing required properties");
            return Err(ValidationError::MissingRequiredProperties {
                names: to_owned_names(&required_remaining),
                reference: schema.reference.clone(),
            });
        }

        if !forbidden_extras.is_empty() && !context.parent_all_of {
            trace!(reference = %schema.reference, keys = ?forbidden_extras, "rejected: additional properties");
            return Err(ValidationError::AdditionalPropertiesForbidden {
                names: to_owned_names(&forbidden_extras),
                reference: schema.reference.clone(),
            });
        }

        if !self.options.coerce_values {
            return Ok(value.clone());
        }

        trace!(reference = %schema.reference, count = coerced.len(), "merging coerced properties");
        let mut merged = record.clone();
        for (key, validated) in coerced {
            merged.insert(key.to_owned(), validated);
        }
        Ok(Value::Object(merged))
    }
}

fn to_owned_names(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_owned()).collect()
}
