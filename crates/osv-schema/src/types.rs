//! # Typed Property Dispatch
//!
//! A [`PropertyDispatcher`] for the primitive OpenAPI types, nested objects
//! and arrays. It is enough to validate request parameters and bodies made
//! of plain JSON data; formats, ranges and combinators are not checked.
//!
//! ## Coercion
//!
//! With [`ValidatorOptions::coerce_values`] set, strings are accepted for
//! `integer`, `number` and `boolean` properties when they parse as one
//! (`"42"`, `"1.5"`, `"true"`), and the parsed value is returned in their
//! place. This is how path and query parameters, which always arrive as
//! strings, reach their declared types. A `number` is always coerced to a
//! float, so `"42"` becomes `42.0`; only `integer` yields whole numbers.
//!
//! ## References
//!
//! [`ObjectSchema::from_json`] assigns every object schema in the tree a
//! JSON pointer below the reference it was loaded from, so a rejection deep
//! inside a body names the exact schema that produced it.

use std::fmt;

use osv_core::{ObjectReference, SchemaError, ValidationError, ValidatorOptions};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use thiserror::Error;

use crate::dispatch::PropertyDispatcher;
use crate::object::ObjectSchema;
use crate::validate::ObjectValidator;

/// The `type` keyword of a property schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        };
        f.write_str(name)
    }
}

/// Schema for a single property.
///
/// Object keywords are flattened in, so an `object` property carries its
/// own `properties`, `required` and `additionalProperties`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertySchema {
    /// Declared type. `None` accepts any value, unless `properties` is
    /// present, in which case the property is an object.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PropertyType>,

    /// Accept `null` regardless of `kind`.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,

    /// Schema for array elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<PropertySchema>>,

    #[serde(flatten)]
    pub object: ObjectSchema<PropertySchema>,
}

impl PropertySchema {
    /// A schema for values of one type.
    pub fn of(kind: PropertyType) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// An `object` schema with the given shape.
    pub fn object(object: ObjectSchema<PropertySchema>) -> Self {
        Self {
            kind: Some(PropertyType::Object),
            object,
            ..Self::default()
        }
    }

    /// An `array` schema whose elements match `items`.
    pub fn array_of(items: PropertySchema) -> Self {
        Self {
            kind: Some(PropertyType::Array),
            items: Some(Box::new(items)),
            ..Self::default()
        }
    }

    /// Also accept `null`.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// The type that validation will enforce.
    pub fn effective_type(&self) -> Option<PropertyType> {
        self.kind.or_else(|| {
            self.object
                .properties
                .is_some()
                .then_some(PropertyType::Object)
        })
    }

    /// Label this schema and everything below it with JSON pointers rooted
    /// at `reference`.
    pub fn assign_references(&mut self, reference: ObjectReference) {
        if let Some(items) = self.items.as_mut() {
            items.assign_references(reference.child("items"));
        }
        self.object.assign_references(reference);
    }
}

impl ObjectSchema<PropertySchema> {
    /// Build an object schema from a JSON schema fragment.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidSchema` if the fragment is not a JSON
    /// object or declares a `type` other than `object`, and
    /// `SchemaError::Deserialize` if its keywords have the wrong shape.
    pub fn from_json(
        reference: impl Into<ObjectReference>,
        fragment: &Value,
    ) -> Result<Self, SchemaError> {
        let reference = reference.into();
        let Some(keywords) = fragment.as_object() else {
            return Err(SchemaError::InvalidSchema {
                reference,
                reason: format!("schema must be a JSON object, got {fragment}"),
            });
        };
        if let Some(kind) = keywords.get("type") {
            if kind != "object" {
                return Err(SchemaError::InvalidSchema {
                    reference,
                    reason: format!("expected type \"object\", got {kind}"),
                });
            }
        }

        let mut schema = Self::deserialize(fragment)?;
        schema.assign_references(reference);
        Ok(schema)
    }

    /// Label this schema and every nested schema with JSON pointers rooted
    /// at `reference`.
    pub fn assign_references(&mut self, reference: ObjectReference) {
        if let Some(properties) = self.properties.as_mut() {
            let base = reference.child("properties");
            for (name, property) in properties.iter_mut() {
                property.assign_references(base.child(name));
            }
        }
        self.reference = reference;
    }
}

/// Rejection of a single property by [`TypeDispatcher`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropertyError {
    /// The value does not have the declared type.
    #[error("{value} is not a valid {expected} in {reference}")]
    TypeMismatch {
        /// Declared type.
        expected: PropertyType,
        /// The rejected value.
        value: Value,
        /// Schema of the property.
        reference: ObjectReference,
    },

    /// A nested object was rejected.
    #[error(transparent)]
    Object(Box<ValidationError<PropertyError>>),
}

/// Dispatcher for [`PropertySchema`] trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeDispatcher {
    options: ValidatorOptions,
}

impl TypeDispatcher {
    /// Create a dispatcher. Nested objects are validated with the same
    /// options.
    pub fn new(options: ValidatorOptions) -> Self {
        Self { options }
    }

    /// An object validator backed by this dispatcher.
    pub fn object_validator(&self) -> ObjectValidator<'_, Self> {
        ObjectValidator::new(self, self.options)
    }

    fn coerce_from_str(&self, value: &Value, parse: fn(&str) -> Option<Value>) -> Option<Value> {
        match value {
            Value::String(s) if self.options.coerce_values => parse(s),
            _ => None,
        }
    }

    fn validate_array(&self, value: &Value, schema: &PropertySchema) -> Result<Value, PropertyError> {
        let Some(elements) = value.as_array() else {
            return Err(mismatch(PropertyType::Array, value, schema));
        };
        let Some(items) = schema.items.as_deref() else {
            return Ok(value.clone());
        };
        elements
            .iter()
            .map(|element| self.validate(element, items))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }
}

impl PropertyDispatcher for TypeDispatcher {
    type Schema = PropertySchema;
    type Error = PropertyError;

    fn validate(&self, value: &Value, schema: &PropertySchema) -> Result<Value, PropertyError> {
        if value.is_null() && schema.nullable {
            return Ok(Value::Null);
        }

        let Some(kind) = schema.effective_type() else {
            return Ok(value.clone());
        };

        match kind {
            PropertyType::String if value.is_string() => Ok(value.clone()),
            PropertyType::Integer if value.is_i64() || value.is_u64() => Ok(value.clone()),
            PropertyType::Number if value.is_number() => Ok(value.clone()),
            PropertyType::Boolean if value.is_boolean() => Ok(value.clone()),
            PropertyType::Integer => self
                .coerce_from_str(value, parse_integer)
                .ok_or_else(|| mismatch(kind, value, schema)),
            PropertyType::Number => self
                .coerce_from_str(value, parse_number)
                .ok_or_else(|| mismatch(kind, value, schema)),
            PropertyType::Boolean => self
                .coerce_from_str(value, parse_boolean)
                .ok_or_else(|| mismatch(kind, value, schema)),
            PropertyType::Object => self
                .object_validator()
                .validate(value, &schema.object)
                .map_err(|err| PropertyError::Object(Box::new(err))),
            PropertyType::Array => self.validate_array(value, schema),
            PropertyType::String => Err(mismatch(kind, value, schema)),
        }
    }
}

fn mismatch(expected: PropertyType, value: &Value, schema: &PropertySchema) -> PropertyError {
    PropertyError::TypeMismatch {
        expected,
        value: value.clone(),
        reference: schema.object.reference.clone(),
    }
}

fn parse_integer(s: &str) -> Option<Value> {
    s.parse::<i64>()
        .map(Value::from)
        .or_else(|_| s.parse::<u64>().map(Value::from))
        .ok()
}

fn parse_number(s: &str) -> Option<Value> {
    s.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

fn parse_boolean(s: &str) -> Option<Value> {
    match s {
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        _ => None,
    }
}
