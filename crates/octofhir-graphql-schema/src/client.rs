//! Schema reconstruction from an introspection payload
//!
//! Mirrors the document builder's two passes: register every named type
//! from the payload first, then hydrate members by resolving each type
//! descriptor (a chain of LIST/NON_NULL markers ending in a name) against
//! the registry. Descriptions and source locations are generally absent in
//! this input; absence is not an error.

use crate::introspection::{
    IntrospectionDirective, IntrospectionEnumValue, IntrospectionField, IntrospectionInputValue,
    IntrospectionSchema, IntrospectionType, IntrospectionTypeRef, read_value_literal,
};
use indexmap::IndexMap;
use octofhir_graphql_diagnostics::{
    GQL0100, GQL0101, GQL0102, GQL0103, GQL0104, GQL0105, GQL0106, GQL0107, GraphQLError, Result,
};
use octofhir_graphql_types::{
    DEFAULT_DEPRECATION_REASON, DirectiveDefinition, EnumType, EnumValueDefinition,
    FieldDefinition, InputObjectType, InputValueDefinition, InterfaceType, ObjectType, ScalarType,
    Schema, TypeDefinition, TypeKind, TypeRef, UnionType, Value, specified_scalar,
    value_from_ast_untyped,
};

/// Reconstruct a schema from an introspection payload
///
/// The payload is the standard reflection object carrying `queryType`,
/// `mutationType`, `subscriptionType`, `types`, and `directives`.
pub fn build_client_schema(payload: &serde_json::Value) -> Result<Schema> {
    let schema: IntrospectionSchema = serde_json::from_value(payload.clone()).map_err(|err| {
        GraphQLError::shape(GQL0106, format!("Malformed introspection payload: {err}"), "$")
    })?;
    build_client_schema_from_parts(&schema)
}

/// Reconstruct a schema from an already-deserialized payload
pub fn build_client_schema_from_parts(payload: &IntrospectionSchema) -> Result<Schema> {
    // A graph must have a query root
    let query_root = payload.query_type.as_ref().ok_or_else(|| {
        GraphQLError::shape(GQL0100, "Introspection payload has no queryType", "queryType")
    })?;

    // Pass one: register every named type, keyed by name
    let mut registry: IndexMap<&str, (usize, &IntrospectionType, TypeKind)> = IndexMap::new();
    for (index, entry) in payload.types.iter().enumerate() {
        let kind = parse_named_kind(&entry.kind, index)?;
        let name = entry.name.as_deref().ok_or_else(|| {
            GraphQLError::shape(
                GQL0104,
                "Type entry has no name",
                format!("types[{index}].name"),
            )
        })?;
        registry.insert(name, (index, entry, kind));
    }

    // Pass two: hydrate every registered type
    let mut types: IndexMap<String, TypeDefinition> = IndexMap::new();
    for (name, (index, entry, kind)) in &registry {
        let definition = hydrate_type(name, *index, entry, *kind, &registry)?;
        types.insert((*name).to_string(), definition);
    }

    let mut directives: IndexMap<String, DirectiveDefinition> = IndexMap::new();
    for (index, entry) in payload.directives.iter().enumerate() {
        directives.insert(entry.name.clone(), hydrate_directive(index, entry, &registry)?);
    }

    let query = Some(resolve_root("queryType", &query_root.name, &registry)?);
    let mutation = payload
        .mutation_type
        .as_ref()
        .map(|root| resolve_root("mutationType", &root.name, &registry))
        .transpose()?;
    let subscription = payload
        .subscription_type
        .as_ref()
        .map(|root| resolve_root("subscriptionType", &root.name, &registry))
        .transpose()?;

    Ok(Schema::new(types, directives, query, mutation, subscription))
}

fn parse_named_kind(kind: &str, index: usize) -> Result<TypeKind> {
    match kind.parse::<TypeKind>() {
        Ok(TypeKind::List | TypeKind::NonNull) => Err(GraphQLError::shape(
            GQL0101,
            format!("Illegal kind '{kind}' for a named type"),
            format!("types[{index}].kind"),
        )),
        Ok(kind) => Ok(kind),
        Err(()) => Err(GraphQLError::shape(
            GQL0101,
            format!("Unrecognized type kind '{kind}'"),
            format!("types[{index}].kind"),
        )),
    }
}

fn hydrate_type(
    name: &str,
    index: usize,
    entry: &IntrospectionType,
    kind: TypeKind,
    registry: &IndexMap<&str, (usize, &IntrospectionType, TypeKind)>,
) -> Result<TypeDefinition> {
    let path = format!("types[{index}]");
    Ok(match kind {
        TypeKind::Scalar => {
            // Specified scalars keep their parse functions
            let parse = match specified_scalar(name) {
                Some(TypeDefinition::Scalar(specified)) => specified.parse,
                _ => None,
            };
            TypeDefinition::Scalar(ScalarType {
                name: name.to_string(),
                description: entry.description.clone(),
                parse,
            })
        }
        TypeKind::Object => TypeDefinition::Object(ObjectType {
            name: name.to_string(),
            description: entry.description.clone(),
            interfaces: entry
                .interfaces
                .as_deref()
                .unwrap_or_default()
                .iter()
                .enumerate()
                .map(|(i, reference)| {
                    named_ref(reference, format!("{path}.interfaces[{i}]"))
                })
                .collect::<Result<_>>()?,
            fields: hydrate_fields(entry, &path, registry)?,
        }),
        TypeKind::Interface => TypeDefinition::Interface(InterfaceType {
            name: name.to_string(),
            description: entry.description.clone(),
            fields: hydrate_fields(entry, &path, registry)?,
            possible_types: possible_type_names(entry, &path)?,
        }),
        TypeKind::Union => TypeDefinition::Union(UnionType {
            name: name.to_string(),
            description: entry.description.clone(),
            members: possible_type_names(entry, &path)?,
        }),
        TypeKind::Enum => {
            let values = entry.enum_values.as_deref().ok_or_else(|| {
                GraphQLError::shape(
                    GQL0103,
                    format!("Introspection result for enum '{name}' is missing enumValues"),
                    format!("{path}.enumValues"),
                )
            })?;
            TypeDefinition::Enum(EnumType {
                name: name.to_string(),
                description: entry.description.clone(),
                values: values.iter().map(hydrate_enum_value).collect(),
            })
        }
        TypeKind::InputObject => {
            let fields = entry.input_fields.as_deref().ok_or_else(|| {
                GraphQLError::shape(
                    GQL0103,
                    format!("Introspection result for input object '{name}' is missing inputFields"),
                    format!("{path}.inputFields"),
                )
            })?;
            TypeDefinition::InputObject(InputObjectType {
                name: name.to_string(),
                description: entry.description.clone(),
                fields: fields
                    .iter()
                    .enumerate()
                    .map(|(i, field)| {
                        let value = hydrate_input_value(
                            field,
                            format!("{path}.inputFields[{i}]"),
                            registry,
                        )?;
                        Ok((field.name.clone(), value))
                    })
                    .collect::<Result<_>>()?,
            })
        }
        TypeKind::List | TypeKind::NonNull => unreachable!("rejected by parse_named_kind"),
    })
}

fn hydrate_fields(
    entry: &IntrospectionType,
    path: &str,
    registry: &IndexMap<&str, (usize, &IntrospectionType, TypeKind)>,
) -> Result<IndexMap<String, FieldDefinition>> {
    let name = entry.name.as_deref().unwrap_or_default();
    let fields = entry.fields.as_deref().ok_or_else(|| {
        GraphQLError::shape(
            GQL0103,
            format!("Introspection result for type '{name}' is missing fields"),
            format!("{path}.fields"),
        )
    })?;

    fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let lowered = hydrate_field(field, format!("{path}.fields[{i}]"), registry)?;
            Ok((field.name.clone(), lowered))
        })
        .collect()
}

fn hydrate_field(
    field: &IntrospectionField,
    path: String,
    registry: &IndexMap<&str, (usize, &IntrospectionType, TypeKind)>,
) -> Result<FieldDefinition> {
    Ok(FieldDefinition {
        name: field.name.clone(),
        description: field.description.clone(),
        arguments: field
            .args
            .iter()
            .enumerate()
            .map(|(i, arg)| {
                let value = hydrate_input_value(arg, format!("{path}.args[{i}]"), registry)?;
                Ok((arg.name.clone(), value))
            })
            .collect::<Result<_>>()?,
        ty: resolve_type_ref(&field.ty, format!("{path}.type"), registry)?,
        deprecation: deprecation(field.is_deprecated, field.deprecation_reason.as_deref()),
    })
}

fn hydrate_input_value(
    value: &IntrospectionInputValue,
    path: String,
    registry: &IndexMap<&str, (usize, &IntrospectionType, TypeKind)>,
) -> Result<InputValueDefinition> {
    Ok(InputValueDefinition {
        name: value.name.clone(),
        description: value.description.clone(),
        ty: resolve_type_ref(&value.ty, format!("{path}.type"), registry)?,
        default_value: value.default_value.as_deref().map(read_default_value),
    })
}

/// Defaults arrive as literal text; anything unreadable stays as raw text
fn read_default_value(raw: &str) -> Value {
    match read_value_literal(raw) {
        Some(node) => value_from_ast_untyped(&node, None),
        None => Value::String(raw.to_string()),
    }
}

fn hydrate_enum_value(value: &IntrospectionEnumValue) -> (String, EnumValueDefinition) {
    (
        value.name.clone(),
        EnumValueDefinition {
            name: value.name.clone(),
            description: value.description.clone(),
            deprecation: deprecation(value.is_deprecated, value.deprecation_reason.as_deref()),
        },
    )
}

fn hydrate_directive(
    index: usize,
    entry: &IntrospectionDirective,
    registry: &IndexMap<&str, (usize, &IntrospectionType, TypeKind)>,
) -> Result<DirectiveDefinition> {
    let path = format!("directives[{index}]");
    Ok(DirectiveDefinition {
        name: entry.name.clone(),
        description: entry.description.clone(),
        locations: entry
            .locations
            .iter()
            .filter_map(|location| location.parse().ok())
            .collect(),
        arguments: entry
            .args
            .iter()
            .enumerate()
            .map(|(i, arg)| {
                let value = hydrate_input_value(arg, format!("{path}.args[{i}]"), registry)?;
                Ok((arg.name.clone(), value))
            })
            .collect::<Result<_>>()?,
        repeatable: entry.is_repeatable,
    })
}

/// Resolve a wrapper chain terminating in a registered name
fn resolve_type_ref(
    reference: &IntrospectionTypeRef,
    path: String,
    registry: &IndexMap<&str, (usize, &IntrospectionType, TypeKind)>,
) -> Result<TypeRef> {
    match reference.kind.parse::<TypeKind>() {
        Ok(TypeKind::List) => {
            let inner = reference.of_type.as_deref().ok_or_else(|| {
                GraphQLError::shape(
                    GQL0102,
                    "Decorated type deeper than introspection query",
                    format!("{path}.ofType"),
                )
            })?;
            Ok(TypeRef::list(resolve_type_ref(
                inner,
                format!("{path}.ofType"),
                registry,
            )?))
        }
        Ok(TypeKind::NonNull) => {
            let inner = reference.of_type.as_deref().ok_or_else(|| {
                GraphQLError::shape(
                    GQL0102,
                    "Decorated type deeper than introspection query",
                    format!("{path}.ofType"),
                )
            })?;
            Ok(TypeRef::non_null(resolve_type_ref(
                inner,
                format!("{path}.ofType"),
                registry,
            )?))
        }
        Ok(_) => {
            let name = reference.name.as_deref().ok_or_else(|| {
                GraphQLError::shape(
                    GQL0104,
                    "Type reference has no name",
                    format!("{path}.name"),
                )
            })?;
            if registry.contains_key(name) {
                Ok(TypeRef::named(name))
            } else {
                Err(GraphQLError::shape(
                    GQL0105,
                    format!("Payload references unknown type '{name}'"),
                    path,
                ))
            }
        }
        Err(()) => Err(GraphQLError::shape(
            GQL0101,
            format!("Unrecognized type kind '{}'", reference.kind),
            format!("{path}.kind"),
        )),
    }
}

/// Interface and union entries must carry their possible types
fn possible_type_names(entry: &IntrospectionType, path: &str) -> Result<Vec<String>> {
    let name = entry.name.as_deref().unwrap_or_default();
    let possible = entry.possible_types.as_deref().ok_or_else(|| {
        GraphQLError::shape(
            GQL0103,
            format!("Introspection result for type '{name}' is missing possibleTypes"),
            format!("{path}.possibleTypes"),
        )
    })?;
    possible
        .iter()
        .enumerate()
        .map(|(i, reference)| named_ref(reference, format!("{path}.possibleTypes[{i}]")))
        .collect()
}

fn named_ref(reference: &IntrospectionTypeRef, path: String) -> Result<String> {
    reference.name.clone().ok_or_else(|| {
        GraphQLError::shape(GQL0104, "Type reference has no name", format!("{path}.name"))
    })
}

fn resolve_root(
    slot: &str,
    name: &str,
    registry: &IndexMap<&str, (usize, &IntrospectionType, TypeKind)>,
) -> Result<String> {
    match registry.get(name) {
        Some((_, _, TypeKind::Object)) => Ok(name.to_string()),
        Some((_, _, kind)) => Err(GraphQLError::shape(
            GQL0107,
            format!("Root type '{name}' must be an Object type, found {kind}"),
            slot,
        )),
        None => Err(GraphQLError::shape(
            GQL0105,
            format!("Payload references unknown type '{name}'"),
            slot,
        )),
    }
}

fn deprecation(is_deprecated: bool, reason: Option<&str>) -> Option<String> {
    is_deprecated.then(|| {
        reason
            .map(str::to_string)
            .unwrap_or_else(|| DEFAULT_DEPRECATION_REASON.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_payload() -> serde_json::Value {
        json!({
            "queryType": {"name": "Query"},
            "types": [
                {
                    "kind": "OBJECT",
                    "name": "Query",
                    "fields": [
                        {
                            "name": "title",
                            "args": [],
                            "type": {"kind": "SCALAR", "name": "String"},
                            "isDeprecated": false
                        }
                    ],
                    "interfaces": []
                },
                {"kind": "SCALAR", "name": "String"}
            ],
            "directives": []
        })
    }

    #[test]
    fn test_minimal_payload_builds() {
        let schema = build_client_schema(&minimal_payload()).unwrap();
        assert_eq!(schema.query_type_name(), Some("Query"));
        let query = schema.query_type().unwrap();
        assert_eq!(query.fields["title"].ty, TypeRef::named("String"));
    }

    #[test]
    fn test_missing_query_root_is_shape_error() {
        let payload = json!({"types": [], "directives": []});
        let err = build_client_schema(&payload).unwrap_err();
        assert_eq!(err.code(), GQL0100);
    }

    #[test]
    fn test_unrecognized_kind_is_shape_error() {
        let payload = json!({
            "queryType": {"name": "Query"},
            "types": [{"kind": "WIBBLE", "name": "Query"}]
        });
        let err = build_client_schema(&payload).unwrap_err();
        assert_eq!(err.code(), GQL0101);
    }

    #[test]
    fn test_wrapper_without_of_type_is_shape_error() {
        let payload = json!({
            "queryType": {"name": "Query"},
            "types": [
                {
                    "kind": "OBJECT",
                    "name": "Query",
                    "fields": [
                        {"name": "xs", "args": [], "type": {"kind": "LIST"}, "isDeprecated": false}
                    ],
                    "interfaces": []
                }
            ]
        })
        ;
        let err = build_client_schema(&payload).unwrap_err();
        assert_eq!(err.code(), GQL0102);
        assert!(err.to_string().contains("types[0].fields[0].type.ofType"));
    }

    #[test]
    fn test_missing_member_list_is_shape_error() {
        let payload = json!({
            "queryType": {"name": "Query"},
            "types": [
                {"kind": "OBJECT", "name": "Query", "fields": [], "interfaces": []},
                {"kind": "ENUM", "name": "Color"}
            ]
        });
        let err = build_client_schema(&payload).unwrap_err();
        assert_eq!(err.code(), GQL0103);
        assert!(err.to_string().contains("enumValues"));
    }

    #[test]
    fn test_default_value_literal_is_read() {
        let payload = json!({
            "queryType": {"name": "Query"},
            "types": [
                {
                    "kind": "OBJECT",
                    "name": "Query",
                    "fields": [
                        {
                            "name": "field",
                            "args": [
                                {
                                    "name": "size",
                                    "type": {"kind": "SCALAR", "name": "Int"},
                                    "defaultValue": "10"
                                }
                            ],
                            "type": {"kind": "SCALAR", "name": "Int"},
                            "isDeprecated": false
                        }
                    ],
                    "interfaces": []
                },
                {"kind": "SCALAR", "name": "Int"}
            ]
        });
        let schema = build_client_schema(&payload).unwrap();
        let field = &schema.query_type().unwrap().fields["field"];
        assert_eq!(field.arguments["size"].default_value, Some(Value::Int(10)));
    }
}
