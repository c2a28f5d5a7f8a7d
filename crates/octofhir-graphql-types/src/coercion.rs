//! Input value coercion with aggregated error reporting
//!
//! Coercion processes untrusted runtime input, so invalid input is a normal
//! outcome: every problem at every depth is collected into one ordered
//! report, and nothing here ever panics or fails fast.

use crate::{Schema, TypeDefinition, TypeRef, Value};
use indexmap::IndexMap;
use octofhir_graphql_diagnostics::{
    ErrorCode, GQL0300, GQL0301, GQL0302, GQL0303, GQL0304, GQL0305, GQL0306,
};
use std::fmt;
use thiserror::Error;

/// One step of the path locating a coercion failure within a nested value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// An input-object field name
    Field(String),
    /// A list index
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => write!(f, ".{name}"),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// A single coercion failure
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}{}", format_path(.path))]
pub struct CoercionError {
    /// Path from the value root to the failing position
    pub path: Vec<PathSegment>,
    /// Human-readable message
    pub message: String,
    /// Classification code (GQL0300 range)
    pub code: ErrorCode,
}

impl CoercionError {
    fn new(code: ErrorCode, message: impl Into<String>, path: &[PathSegment]) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
            code,
        }
    }
}

fn format_path(path: &[PathSegment]) -> String {
    if path.is_empty() {
        return String::new();
    }
    let mut rendered = String::from(" at value");
    for segment in path {
        rendered.push_str(&segment.to_string());
    }
    rendered
}

/// Result of coercing one input value
pub type CoercionResult = Result<Value, Vec<CoercionError>>;

/// Coerce an untrusted input value to a declared input type
///
/// Returns the coerced value, or the complete ordered list of failures.
pub fn coerce_value(value: &Value, ty: &TypeRef, schema: &Schema) -> CoercionResult {
    let mut errors = Vec::new();
    let mut path = Vec::new();
    let coerced = coerce(value, ty, schema, &mut path, &mut errors);
    match coerced {
        Some(coerced) if errors.is_empty() => Ok(coerced),
        _ => Err(errors),
    }
}

fn coerce(
    value: &Value,
    ty: &TypeRef,
    schema: &Schema,
    path: &mut Vec<PathSegment>,
    errors: &mut Vec<CoercionError>,
) -> Option<Value> {
    match ty {
        TypeRef::NonNull(inner) => {
            if value.is_null() {
                errors.push(CoercionError::new(
                    GQL0302,
                    format!("Expected non-nullable type '{ty}' not to be null"),
                    path,
                ));
                return None;
            }
            coerce(value, inner, schema, path, errors)
        }

        _ if value.is_null() => Some(Value::Null),

        TypeRef::List(item_type) => match value {
            Value::List(items) => {
                let mut coerced_items = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    path.push(PathSegment::Index(index));
                    if let Some(coerced) = coerce(item, item_type, schema, path, errors) {
                        coerced_items.push(coerced);
                    }
                    path.pop();
                }
                Some(Value::List(coerced_items))
            }
            // A single value coerces as a one-element list
            single => {
                let coerced = coerce(single, item_type, schema, path, errors)?;
                Some(Value::List(vec![coerced]))
            }
        },

        TypeRef::Named(name) => match schema.type_definition(name) {
            Some(TypeDefinition::Scalar(scalar)) => match scalar.parse {
                Some(parse) => match parse(value) {
                    Ok(coerced) => Some(coerced),
                    Err(message) => {
                        errors.push(CoercionError::new(
                            GQL0300,
                            format!("Expected type '{name}'. {message}"),
                            path,
                        ));
                        None
                    }
                },
                None => Some(value.clone()),
            },

            Some(TypeDefinition::Enum(enum_type)) => {
                let candidate = match value {
                    Value::Enum(candidate) | Value::String(candidate) => Some(candidate),
                    _ => None,
                };
                match candidate {
                    Some(candidate) if enum_type.values.contains_key(candidate) => {
                        Some(Value::Enum(candidate.clone()))
                    }
                    _ => {
                        errors.push(CoercionError::new(
                            GQL0301,
                            format!("Value {value} is not a valid enum value of type '{name}'"),
                            path,
                        ));
                        None
                    }
                }
            }

            Some(TypeDefinition::InputObject(input_object)) => {
                let Value::Object(entries) = value else {
                    errors.push(CoercionError::new(
                        GQL0305,
                        format!("Expected type '{name}' to be an input object"),
                        path,
                    ));
                    return None;
                };

                let mut coerced_entries = IndexMap::new();
                for (field_name, field) in &input_object.fields {
                    match entries.get(field_name) {
                        Some(entry) => {
                            path.push(PathSegment::Field(field_name.clone()));
                            if let Some(coerced) = coerce(entry, &field.ty, schema, path, errors) {
                                coerced_entries.insert(field_name.clone(), coerced);
                            }
                            path.pop();
                        }
                        None => {
                            if let Some(default) = &field.default_value {
                                coerced_entries.insert(field_name.clone(), default.clone());
                            } else if field.ty.is_non_null() {
                                path.push(PathSegment::Field(field_name.clone()));
                                errors.push(CoercionError::new(
                                    GQL0303,
                                    format!(
                                        "Field '{field_name}' of required type '{}' was not provided",
                                        field.ty
                                    ),
                                    path,
                                ));
                                path.pop();
                            }
                        }
                    }
                }

                // Every key must match a declared field
                for entry_name in entries.keys() {
                    if !input_object.fields.contains_key(entry_name) {
                        errors.push(CoercionError::new(
                            GQL0304,
                            format!("Field '{entry_name}' is not defined by type '{name}'"),
                            path,
                        ));
                    }
                }

                Some(Value::Object(coerced_entries))
            }

            // Output-only kinds and unknown names are reported, not panicked on
            Some(_) => {
                errors.push(CoercionError::new(
                    GQL0306,
                    format!("Type '{name}' cannot be used for input coercion"),
                    path,
                ));
                None
            }
            None => {
                errors.push(CoercionError::new(
                    GQL0306,
                    format!("Unknown type '{name}'"),
                    path,
                ));
                None
            }
        },
    }
}
