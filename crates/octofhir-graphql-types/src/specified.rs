//! Specified scalar types and directives
//!
//! The five built-in scalars carry their input parse functions; custom
//! scalars default to pass-through. The three specified directives are
//! injected by the builders unless the document overrides them.

use crate::{
    DirectiveDefinition, InputValueDefinition, ScalarType, TypeDefinition, TypeRef, Value,
};
use octofhir_graphql_ast::DirectiveLocation;

/// Largest value a GraphQL Int can hold (32-bit signed)
pub const MAX_INT: i64 = 2_147_483_647;
/// Smallest value a GraphQL Int can hold (32-bit signed)
pub const MIN_INT: i64 = -2_147_483_648;

/// Names of the specified scalar types
pub const SPECIFIED_SCALAR_NAMES: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

/// Check if `name` is one of the specified scalar names
pub fn is_specified_scalar_name(name: &str) -> bool {
    SPECIFIED_SCALAR_NAMES.contains(&name)
}

/// Build the specified scalar definition for `name`, if it is one
pub fn specified_scalar(name: &str) -> Option<TypeDefinition> {
    let scalar = match name {
        "Int" => ScalarType::new("Int").with_parse(parse_int),
        "Float" => ScalarType::new("Float").with_parse(parse_float),
        "String" => ScalarType::new("String").with_parse(parse_string),
        "Boolean" => ScalarType::new("Boolean").with_parse(parse_boolean),
        "ID" => ScalarType::new("ID").with_parse(parse_id),
        _ => return None,
    };
    Some(TypeDefinition::Scalar(scalar))
}

/// Parse function of the `Int` scalar
///
/// Accepts integers within 32-bit signed range, and floats carrying an
/// integral value.
pub fn parse_int(value: &Value) -> Result<Value, String> {
    match value {
        Value::Int(i) if (MIN_INT..=MAX_INT).contains(i) => Ok(Value::Int(*i)),
        Value::Int(i) => Err(format!("Int cannot represent non 32-bit signed integer value: {i}")),
        Value::Float(f) if f.is_finite() && f.fract() == 0.0 => {
            let i = *f as i64;
            if (MIN_INT..=MAX_INT).contains(&i) {
                Ok(Value::Int(i))
            } else {
                Err(format!("Int cannot represent non 32-bit signed integer value: {f}"))
            }
        }
        other => Err(format!("Int cannot represent non-integer value: {other}")),
    }
}

/// Parse function of the `Float` scalar
pub fn parse_float(value: &Value) -> Result<Value, String> {
    match value {
        Value::Int(i) => Ok(Value::Float(*i as f64)),
        Value::Float(f) if f.is_finite() => Ok(Value::Float(*f)),
        other => Err(format!("Float cannot represent non numeric value: {other}")),
    }
}

/// Parse function of the `String` scalar
pub fn parse_string(value: &Value) -> Result<Value, String> {
    match value {
        Value::String(s) => Ok(Value::String(s.clone())),
        other => Err(format!("String cannot represent a non string value: {other}")),
    }
}

/// Parse function of the `Boolean` scalar
pub fn parse_boolean(value: &Value) -> Result<Value, String> {
    match value {
        Value::Boolean(b) => Ok(Value::Boolean(*b)),
        other => Err(format!("Boolean cannot represent a non boolean value: {other}")),
    }
}

/// Parse function of the `ID` scalar
///
/// IDs are serialized as strings but accept integer input.
pub fn parse_id(value: &Value) -> Result<Value, String> {
    match value {
        Value::String(s) => Ok(Value::String(s.clone())),
        Value::Int(i) => Ok(Value::String(i.to_string())),
        other => Err(format!("ID cannot represent value: {other}")),
    }
}

/// Default deprecation reason applied by `@deprecated` without arguments
pub const DEFAULT_DEPRECATION_REASON: &str = "No longer supported";

/// The specified `@skip`, `@include`, and `@deprecated` directives
pub fn specified_directives() -> Vec<DirectiveDefinition> {
    let skip = DirectiveDefinition {
        name: "skip".to_string(),
        description: Some(
            "Directs the executor to skip this field or fragment when the `if` argument is true."
                .to_string(),
        ),
        locations: vec![
            DirectiveLocation::Field,
            DirectiveLocation::FragmentSpread,
            DirectiveLocation::InlineFragment,
        ],
        arguments: [(
            "if".to_string(),
            InputValueDefinition::new("if", TypeRef::non_null(TypeRef::named("Boolean"))),
        )]
        .into_iter()
        .collect(),
        repeatable: false,
    };

    let include = DirectiveDefinition {
        name: "include".to_string(),
        description: Some(
            "Directs the executor to include this field or fragment only when the `if` argument is true."
                .to_string(),
        ),
        locations: vec![
            DirectiveLocation::Field,
            DirectiveLocation::FragmentSpread,
            DirectiveLocation::InlineFragment,
        ],
        arguments: [(
            "if".to_string(),
            InputValueDefinition::new("if", TypeRef::non_null(TypeRef::named("Boolean"))),
        )]
        .into_iter()
        .collect(),
        repeatable: false,
    };

    let deprecated = DirectiveDefinition {
        name: "deprecated".to_string(),
        description: Some("Marks an element of a GraphQL schema as no longer supported.".to_string()),
        locations: vec![
            DirectiveLocation::FieldDefinition,
            DirectiveLocation::EnumValue,
        ],
        arguments: [(
            "reason".to_string(),
            InputValueDefinition::new("reason", TypeRef::named("String"))
                .with_default(Value::string(DEFAULT_DEPRECATION_REASON)),
        )]
        .into_iter()
        .collect(),
        repeatable: false,
    };

    vec![skip, include, deprecated]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_range() {
        assert_eq!(parse_int(&Value::Int(42)), Ok(Value::Int(42)));
        assert_eq!(parse_int(&Value::Float(3.0)), Ok(Value::Int(3)));
        assert!(parse_int(&Value::Int(MAX_INT + 1)).is_err());
        assert!(parse_int(&Value::Float(1.5)).is_err());
        assert!(parse_int(&Value::Boolean(true)).is_err());
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float(&Value::Int(1)), Ok(Value::Float(1.0)));
        assert_eq!(parse_float(&Value::Float(0.5)), Ok(Value::Float(0.5)));
        assert!(parse_float(&Value::Float(f64::NAN)).is_err());
        assert!(parse_float(&Value::string("1")).is_err());
    }

    #[test]
    fn test_parse_string_is_strict() {
        assert!(parse_string(&Value::Int(1)).is_err());
        assert_eq!(parse_string(&Value::string("ok")), Ok(Value::string("ok")));
    }

    #[test]
    fn test_parse_id_accepts_ints() {
        assert_eq!(parse_id(&Value::Int(7)), Ok(Value::string("7")));
        assert_eq!(parse_id(&Value::string("7")), Ok(Value::string("7")));
        assert!(parse_id(&Value::Boolean(false)).is_err());
    }

    #[test]
    fn test_specified_directives() {
        let directives = specified_directives();
        let names: Vec<&str> = directives.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["skip", "include", "deprecated"]);
    }
}
