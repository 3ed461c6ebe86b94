//! # Object Schemas
//!
//! The declarative shape an object validator checks against: named
//! properties, required keys, and the policy for keys that are not declared.
//!
//! `ObjectSchema` is generic over the property schema type `P`. The object
//! validator never looks inside `P`; it only hands it to the
//! [`PropertyDispatcher`](crate::PropertyDispatcher).
//!
//! Field names on the wire follow OpenAPI (`properties`, `required`,
//! `additionalProperties`). The [`ObjectReference`] is not part of the wire
//! form and is assigned by whoever builds the schema.

use std::collections::{BTreeMap, HashSet};

use osv_core::ObjectReference;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Policy for keys that are present in a value but not declared in
/// `properties`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AdditionalProperties {
    /// Undeclared keys are rejected.
    Forbidden,
    /// Undeclared keys pass through without a type check.
    #[default]
    Allowed,
}

impl AdditionalProperties {
    /// Whether undeclared keys are permitted.
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

impl From<bool> for AdditionalProperties {
    fn from(allowed: bool) -> Self {
        if allowed {
            Self::Allowed
        } else {
            Self::Forbidden
        }
    }
}

impl Serialize for AdditionalProperties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.is_allowed())
    }
}

impl<'de> Deserialize<'de> for AdditionalProperties {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // A schema object in place of the flag allows undeclared keys; their
        // values are not checked against it.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Schema(serde_json::Map<String, serde_json::Value>),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Flag(allowed) => allowed.into(),
            Raw::Schema(_) => Self::Allowed,
        })
    }
}

/// Declarative description of an object's shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSchema<P> {
    /// Declared properties. `None` means an untyped object: every record is
    /// accepted as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, P>>,

    /// Keys that must be present. Duplicates are ignored.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    /// Policy for undeclared keys.
    #[serde(default)]
    pub additional_properties: AdditionalProperties,

    /// Label used in rejection messages.
    #[serde(skip)]
    pub reference: ObjectReference,
}

impl<P> Default for ObjectSchema<P> {
    fn default() -> Self {
        Self::untyped()
    }
}

impl<P> ObjectSchema<P> {
    /// An object schema with an empty set of declared properties.
    pub fn new() -> Self {
        Self {
            properties: Some(BTreeMap::new()),
            ..Self::untyped()
        }
    }

    /// An object schema that declares no shape at all.
    pub fn untyped() -> Self {
        Self {
            properties: None,
            required: Vec::new(),
            additional_properties: AdditionalProperties::default(),
            reference: ObjectReference::default(),
        }
    }

    /// Declare a property.
    pub fn property(mut self, name: impl Into<String>, schema: P) -> Self {
        self.properties
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), schema);
        self
    }

    /// Mark a key as required.
    pub fn require(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    /// Set the policy for undeclared keys.
    pub fn additional_properties(mut self, policy: impl Into<AdditionalProperties>) -> Self {
        self.additional_properties = policy.into();
        self
    }

    /// Set the label used in rejection messages.
    pub fn with_reference(mut self, reference: impl Into<ObjectReference>) -> Self {
        self.reference = reference.into();
        self
    }

    /// Look up the schema of a declared property.
    pub fn property_schema(&self, name: &str) -> Option<&P> {
        self.properties.as_ref()?.get(name)
    }

    /// Required keys in declaration order, first occurrence only.
    pub fn required_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.required
            .iter()
            .map(String::as_str)
            .filter(|name| seen.insert(*name))
            .collect()
    }
}
