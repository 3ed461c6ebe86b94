//! Integration test: validate request bodies against object schemas taken
//! from an OpenAPI `components/schemas` section.
//!
//! Schemas are written in YAML, the way they appear in API descriptions,
//! and loaded through `ObjectSchema::from_json` so every nested schema
//! carries the JSON pointer that rejection messages name.

use osv_core::{RejectionKind, ValidationError, ValidatorOptions};
use osv_schema::{
    ObjectContext, ObjectSchema, ObjectValidator, PropertyError, PropertySchema, TypeDispatcher,
};
use serde_json::{json, Value};

const COMPONENTS: &str = r#"
Person:
  type: object
  required: [name]
  properties:
    name:
      type: string
    age:
      type: integer
    address:
      type: object
      required: [city]
      additionalProperties: false
      properties:
        city:
          type: string
        zip:
          type: string
Strict:
  type: object
  additionalProperties: false
  properties:
    a:
      type: string
Open:
  type: object
  additionalProperties: true
  properties:
    a:
      type: string
Filter:
  type: object
  properties:
    limit:
      type: integer
    ratio:
      type: number
    verbose:
      type: boolean
    ids:
      type: array
      items:
        type: integer
Anything:
  type: object
"#;

/// Load one schema out of the components section.
fn schema(name: &str) -> ObjectSchema<PropertySchema> {
    let components: Value = serde_yaml::from_str(COMPONENTS).expect("components parse");
    ObjectSchema::from_json(format!("#/components/schemas/{name}"), &components[name])
        .expect("schema loads")
}

fn validate(
    options: ValidatorOptions,
    value: &Value,
    name: &str,
) -> Result<Value, ValidationError<PropertyError>> {
    let dispatcher = TypeDispatcher::new(options);
    ObjectValidator::new(&dispatcher, options).validate(value, &schema(name))
}

#[test]
fn test_valid_person_is_accepted_unchanged() {
    let value = json!({"name": "Ada", "age": 36, "address": {"city": "London"}});
    assert_eq!(validate(ValidatorOptions::default(), &value, "Person").unwrap(), value);
}

#[test]
fn test_nested_type_error_is_surfaced_verbatim() {
    let value = json!({"name": "Ada", "age": "x"});
    let err = validate(ValidatorOptions::coercing(), &value, "Person").unwrap_err();

    let ValidationError::Property(PropertyError::TypeMismatch { value: rejected, reference, .. }) = &err
    else {
        panic!("expected nested type error, got {err:?}");
    };
    assert_eq!(rejected, &json!("x"));
    assert_eq!(reference.as_str(), "#/components/schemas/Person/properties/age");
}

#[test]
fn test_missing_required_names_the_key() {
    let err = validate(ValidatorOptions::default(), &json!({}), "Person").unwrap_err();
    assert_eq!(
        err.to_string(),
        "required parameters name not exist in #/components/schemas/Person"
    );
}

#[test]
fn test_nested_object_rejection_carries_its_own_reference() {
    let value = json!({"name": "Ada", "address": {"city": "Paris", "street": "Rivoli"}});
    let err = validate(ValidatorOptions::default(), &value, "Person").unwrap_err();

    let ValidationError::Property(PropertyError::Object(inner)) = &err else {
        panic!("expected nested object error, got {err:?}");
    };
    assert_eq!(inner.kind(), RejectionKind::UnknownProperties);
    assert_eq!(
        inner.to_string(),
        "properties street are not defined in #/components/schemas/Person/properties/address"
    );
}

#[test]
fn test_strict_schema_reports_unknown_properties() {
    let err = validate(ValidatorOptions::default(), &json!({"a": "ok", "b": 1}), "Strict")
        .unwrap_err();
    assert_eq!(err.kind(), RejectionKind::UnknownProperties);
    assert_eq!(err.names(), ["b".to_string()]);
}

#[test]
fn test_strict_schema_as_all_of_branch_accepts_extras() {
    let dispatcher = TypeDispatcher::default();
    let validator = ObjectValidator::new(&dispatcher, ValidatorOptions::default());
    let value = json!({"a": "ok", "b": 1});

    let accepted = validator
        .validate_with(&value, &schema("Strict"), ObjectContext::all_of_branch())
        .unwrap();
    assert_eq!(accepted, value);
}

#[test]
fn test_discriminator_property_is_not_unknown() {
    let dispatcher = TypeDispatcher::default();
    let validator = ObjectValidator::new(&dispatcher, ValidatorOptions::default());
    let value = json!({"a": "x", "petType": "Cat"});

    let context = ObjectContext::default().with_discriminator("petType");
    assert_eq!(validator.validate_with(&value, &schema("Open"), context).unwrap(), value);
}

#[test]
fn test_discriminator_under_strict_schema_is_additional_property() {
    let dispatcher = TypeDispatcher::default();
    let validator = ObjectValidator::new(&dispatcher, ValidatorOptions::default());
    let value = json!({"a": "x", "petType": "Cat"});

    let context = ObjectContext::default().with_discriminator("petType");
    let err = validator
        .validate_with(&value, &schema("Strict"), context)
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::AdditionalPropertiesForbidden {
            names: vec!["petType".into()],
            reference: "#/components/schemas/Strict".into(),
        }
    );
}

#[test]
fn test_open_schema_keeps_extra_values() {
    let value = json!({"a": "x", "extra": 42});
    assert_eq!(validate(ValidatorOptions::coercing(), &value, "Open").unwrap(), value);
}

#[test]
fn test_untyped_object_accepts_any_record() {
    let value = json!({"whatever": [1, 2, {"deep": true}]});
    assert_eq!(validate(ValidatorOptions::default(), &value, "Anything").unwrap(), value);
    let err = validate(ValidatorOptions::default(), &json!("text"), "Anything").unwrap_err();
    assert_eq!(err.kind(), RejectionKind::NotAnObject);
}

#[test]
fn test_query_strings_are_coerced_and_merged() {
    let raw = json!({"limit": "10", "ratio": "2", "verbose": "false", "ids": ["1", 2], "q": "x"});
    let accepted = validate(ValidatorOptions::coercing(), &raw, "Filter").unwrap();

    assert_eq!(
        accepted,
        json!({"limit": 10, "ratio": 2.0, "verbose": false, "ids": [1, 2], "q": "x"})
    );
    assert_eq!(raw["limit"], json!("10"), "input must not be modified");

    let again = validate(ValidatorOptions::coercing(), &accepted, "Filter").unwrap();
    assert_eq!(again, accepted);
}

#[test]
fn test_query_strings_rejected_without_coercion() {
    let raw = json!({"limit": "10"});
    let err = validate(ValidatorOptions::default(), &raw, "Filter").unwrap_err();
    assert_eq!(err.kind(), RejectionKind::Property);
}

#[test]
fn test_options_loaded_from_yaml_drive_coercion() {
    let options: ValidatorOptions = serde_yaml::from_str("coerce_values: true").unwrap();
    let accepted = validate(options, &json!({"limit": "3"}), "Filter").unwrap();
    assert_eq!(accepted, json!({"limit": 3}));
}
