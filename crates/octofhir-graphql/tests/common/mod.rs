//! Shared test helpers
//!
//! `introspection_from_schema` serialises a graph into the wire shape the
//! client builder consumes, which lets the round-trip properties run
//! without a server in the loop.

use octofhir_graphql::schema::introspection::{
    IntrospectionDirective, IntrospectionEnumValue, IntrospectionField, IntrospectionInputValue,
    IntrospectionNamedTypeRef, IntrospectionSchema, IntrospectionType, IntrospectionTypeRef,
};
use octofhir_graphql::types::{
    FieldDefinition, InputValueDefinition, Schema, TypeDefinition, TypeRef, ast_from_value,
};

/// Serialise a schema into the introspection wire shape
pub fn introspection_from_schema(schema: &Schema) -> IntrospectionSchema {
    IntrospectionSchema {
        query_type: schema.query_type_name().map(IntrospectionNamedTypeRef::new),
        mutation_type: schema
            .mutation_type_name()
            .map(IntrospectionNamedTypeRef::new),
        subscription_type: schema
            .subscription_type_name()
            .map(IntrospectionNamedTypeRef::new),
        types: schema
            .types()
            .values()
            .map(|definition| serialize_type(schema, definition))
            .collect(),
        directives: schema
            .directives()
            .values()
            .map(|directive| IntrospectionDirective {
                name: directive.name.clone(),
                description: directive.description.clone(),
                locations: directive
                    .locations
                    .iter()
                    .map(|location| location.as_str().to_string())
                    .collect(),
                args: directive
                    .arguments
                    .values()
                    .map(|argument| serialize_input_value(schema, argument))
                    .collect(),
                is_repeatable: directive.repeatable,
            })
            .collect(),
    }
}

fn serialize_type(schema: &Schema, definition: &TypeDefinition) -> IntrospectionType {
    let mut entry = IntrospectionType {
        kind: definition.kind().as_str().to_string(),
        name: Some(definition.name().to_string()),
        description: definition.description().map(str::to_string),
        ..IntrospectionType::default()
    };
    match definition {
        TypeDefinition::Scalar(_) => {}
        TypeDefinition::Object(object) => {
            entry.fields = Some(serialize_fields(schema, &object.fields));
            entry.interfaces = Some(
                object
                    .interfaces
                    .iter()
                    .map(|name| IntrospectionTypeRef::named("INTERFACE", name))
                    .collect(),
            );
        }
        TypeDefinition::Interface(interface) => {
            entry.fields = Some(serialize_fields(schema, &interface.fields));
            entry.possible_types = Some(
                interface
                    .possible_types
                    .iter()
                    .map(|name| IntrospectionTypeRef::named("OBJECT", name))
                    .collect(),
            );
        }
        TypeDefinition::Union(union_type) => {
            entry.possible_types = Some(
                union_type
                    .members
                    .iter()
                    .map(|name| IntrospectionTypeRef::named("OBJECT", name))
                    .collect(),
            );
        }
        TypeDefinition::Enum(enum_type) => {
            entry.enum_values = Some(
                enum_type
                    .values
                    .values()
                    .map(|value| IntrospectionEnumValue {
                        name: value.name.clone(),
                        description: value.description.clone(),
                        is_deprecated: value.is_deprecated(),
                        deprecation_reason: value.deprecation.clone(),
                    })
                    .collect(),
            );
        }
        TypeDefinition::InputObject(input_object) => {
            entry.input_fields = Some(
                input_object
                    .fields
                    .values()
                    .map(|field| serialize_input_value(schema, field))
                    .collect(),
            );
        }
    }
    entry
}

fn serialize_fields(
    schema: &Schema,
    fields: &indexmap::IndexMap<String, FieldDefinition>,
) -> Vec<IntrospectionField> {
    fields
        .values()
        .map(|field| IntrospectionField {
            name: field.name.clone(),
            description: field.description.clone(),
            args: field
                .arguments
                .values()
                .map(|argument| serialize_input_value(schema, argument))
                .collect(),
            ty: serialize_type_ref(schema, &field.ty),
            is_deprecated: field.is_deprecated(),
            deprecation_reason: field.deprecation.clone(),
        })
        .collect()
}

fn serialize_input_value(schema: &Schema, value: &InputValueDefinition) -> IntrospectionInputValue {
    IntrospectionInputValue {
        name: value.name.clone(),
        description: value.description.clone(),
        ty: serialize_type_ref(schema, &value.ty),
        default_value: value
            .default_value
            .as_ref()
            .and_then(|default| ast_from_value(default, &value.ty, schema))
            .map(|node| node.to_string()),
    }
}

fn serialize_type_ref(schema: &Schema, ty: &TypeRef) -> IntrospectionTypeRef {
    match ty {
        TypeRef::Named(name) => {
            let kind = schema
                .type_definition(name)
                .map(|definition| definition.kind().as_str())
                .unwrap_or("SCALAR");
            IntrospectionTypeRef::named(kind, name)
        }
        TypeRef::List(inner) => {
            IntrospectionTypeRef::wrapper("LIST", serialize_type_ref(schema, inner))
        }
        TypeRef::NonNull(inner) => {
            IntrospectionTypeRef::wrapper("NON_NULL", serialize_type_ref(schema, inner))
        }
    }
}
