//! Schema extension
//!
//! Derives a new, independent graph from an existing one plus a document of
//! new definitions and extensions. The input graph is never modified. The
//! output keeps the base graph's declaration order, replacing extended
//! types in place and appending new types in document order, so that diffs
//! over an extended schema stay stable.

use crate::builder::{
    BuildOptions, Lowering, check_input_positions, check_root_is_object, check_union_members,
    compute_possible_types, lower_enum_value,
};
use indexmap::IndexMap;
use octofhir_graphql_ast::{
    Definition, DirectiveDefinitionNode, Document, OperationType, SchemaExtensionNode,
    TypeDefinitionNode, TypeExtensionNode,
};
use octofhir_graphql_diagnostics::{
    GQL0001, GQL0002, GQL0003, GQL0004, GQL0200, GQL0201, GQL0202, GQL0203, GQL0204, GQL0205,
    GraphQLError, Result,
};
use octofhir_graphql_types::{Schema, TypeDefinition};

/// Extend a schema with default options
pub fn extend_schema(schema: &Schema, document: &Document) -> Result<Schema> {
    extend_schema_with_options(schema, document, &BuildOptions::default())
}

/// Extend a schema
///
/// The document may mix new type and directive definitions with type and
/// schema extensions. Every merge is additive: colliding names, mismatched
/// extension kinds, and re-defined roots are errors.
pub fn extend_schema_with_options(
    schema: &Schema,
    document: &Document,
    options: &BuildOptions,
) -> Result<Schema> {
    // Partition the document
    let mut new_types: IndexMap<&str, &TypeDefinitionNode> = IndexMap::new();
    let mut new_directives: IndexMap<&str, &DirectiveDefinitionNode> = IndexMap::new();
    let mut extensions: IndexMap<&str, Vec<&TypeExtensionNode>> = IndexMap::new();
    let mut schema_extensions: Vec<&SchemaExtensionNode> = Vec::new();

    for definition in &document.definitions {
        match definition {
            Definition::Type(node) => {
                if schema.type_definition(node.name()).is_some() {
                    return Err(GraphQLError::extension_at(
                        GQL0203,
                        format!(
                            "Type '{}' already exists in the schema; it cannot be redefined",
                            node.name()
                        ),
                        node.loc(),
                    ));
                }
                if new_types.insert(node.name(), node).is_some() {
                    return Err(GraphQLError::build_at(
                        GQL0001,
                        format!("Type '{}' is defined more than once", node.name()),
                        node.loc(),
                    ));
                }
            }
            Definition::TypeExtension(node) => {
                extensions.entry(node.name()).or_default().push(node);
            }
            Definition::Directive(node) => {
                if schema.directive(&node.name).is_some() {
                    return Err(GraphQLError::extension_at(
                        GQL0204,
                        format!(
                            "Directive '@{}' already exists in the schema; it cannot be redefined",
                            node.name
                        ),
                        node.loc.clone(),
                    ));
                }
                if new_directives.insert(node.name.as_str(), node).is_some() {
                    return Err(GraphQLError::build_at(
                        GQL0002,
                        format!("Directive '@{}' is defined more than once", node.name),
                        node.loc.clone(),
                    ));
                }
            }
            Definition::SchemaExtension(node) => schema_extensions.push(node),
            Definition::Schema(node) => {
                return Err(GraphQLError::build_at(
                    GQL0004,
                    "Cannot define a schema when extending; use a schema extension",
                    node.loc.clone(),
                ));
            }
            Definition::Operation(_) => {}
        }
    }

    // Every extension must target a type of the base graph
    for (target, exts) in &extensions {
        if schema.type_definition(target).is_none() {
            return Err(GraphQLError::extension_at(
                GQL0200,
                format!("Cannot extend type '{target}' because it is not defined in the schema"),
                exts[0].loc(),
            ));
        }
    }

    let mut lowering = Lowering::for_names(
        schema
            .types()
            .keys()
            .map(String::as_str)
            .chain(new_types.keys().copied()),
    );

    // Base types in declaration order, with extensions merged in place
    let mut types: IndexMap<String, TypeDefinition> = IndexMap::new();
    for (name, definition) in schema.types() {
        let mut merged = definition.clone();
        if let Some(exts) = extensions.get(name.as_str()) {
            for ext in exts {
                apply_extension(&mut merged, ext, &mut lowering)?;
            }
        }
        types.insert(name.clone(), merged);
    }

    // New types appended in document order
    for (name, node) in &new_types {
        types.insert((*name).to_string(), lowering.lower_type(node)?);
    }

    let mut directives = schema.directives().clone();
    for (name, node) in &new_directives {
        directives.insert((*name).to_string(), lowering.lower_directive(node)?);
    }

    lowering.inject_specified_scalars(&mut types);

    // Root additions are accepted only for roots the base leaves undefined
    let mut query = schema.query_type_name().map(str::to_string);
    let mut mutation = schema.mutation_type_name().map(str::to_string);
    let mut subscription = schema.subscription_type_name().map(str::to_string);
    for ext in &schema_extensions {
        for operation_type in &ext.operation_types {
            let slot = match operation_type.operation {
                OperationType::Query => &mut query,
                OperationType::Mutation => &mut mutation,
                OperationType::Subscription => &mut subscription,
            };
            if slot.is_some() {
                return Err(GraphQLError::extension_at(
                    GQL0205,
                    format!(
                        "The schema already defines a {} root type",
                        operation_type.operation
                    ),
                    operation_type.loc.clone(),
                ));
            }
            *slot = Some(operation_type.type_name.clone());
        }
    }

    compute_possible_types(&mut types);

    if !options.assume_valid {
        check_union_members(&types)?;
        check_input_positions(&types, &directives)?;
        for root in [&query, &mutation, &subscription].into_iter().flatten() {
            check_root_is_object(root, &types)?;
        }
    } else {
        for root in [&query, &mutation, &subscription].into_iter().flatten() {
            if !types.contains_key(root) {
                return Err(GraphQLError::build(
                    GQL0003,
                    format!("Unknown type '{root}'"),
                ));
            }
        }
    }

    Ok(Schema::new(types, directives, query, mutation, subscription))
}

/// Merge one extension's members onto a copy of its target
fn apply_extension(
    target: &mut TypeDefinition,
    ext: &TypeExtensionNode,
    lowering: &mut Lowering,
) -> Result<()> {
    match (target, ext) {
        // Scalars carry no extensible members in this core
        (TypeDefinition::Scalar(_), TypeExtensionNode::Scalar(_)) => Ok(()),

        (TypeDefinition::Object(object), TypeExtensionNode::Object(ext)) => {
            for interface in &ext.interfaces {
                if object.interfaces.contains(interface) {
                    return Err(GraphQLError::extension_at(
                        GQL0202,
                        format!(
                            "Interface '{interface}' is already implemented by type '{}'",
                            object.name
                        ),
                        ext.loc.clone(),
                    ));
                }
                object.interfaces.push(interface.clone());
            }
            let owner = object.name.clone();
            for field in &ext.fields {
                if object.fields.contains_key(&field.name) {
                    return Err(GraphQLError::extension_at(
                        GQL0202,
                        format!("Field '{owner}.{}' already exists in the schema", field.name),
                        field.loc.clone(),
                    ));
                }
                object
                    .fields
                    .insert(field.name.clone(), lowering.lower_field(&owner, field)?);
            }
            Ok(())
        }

        (TypeDefinition::Interface(interface), TypeExtensionNode::Interface(ext)) => {
            let owner = interface.name.clone();
            for field in &ext.fields {
                if interface.fields.contains_key(&field.name) {
                    return Err(GraphQLError::extension_at(
                        GQL0202,
                        format!("Field '{owner}.{}' already exists in the schema", field.name),
                        field.loc.clone(),
                    ));
                }
                interface
                    .fields
                    .insert(field.name.clone(), lowering.lower_field(&owner, field)?);
            }
            Ok(())
        }

        (TypeDefinition::Union(union_type), TypeExtensionNode::Union(ext)) => {
            let members = lowering.resolve_member_names(&union_type.name, &ext.members)?;
            for member in members {
                if union_type.members.contains(&member) {
                    return Err(GraphQLError::extension_at(
                        GQL0202,
                        format!(
                            "Union member '{member}' is already part of union '{}'",
                            union_type.name
                        ),
                        ext.loc.clone(),
                    ));
                }
                union_type.members.push(member);
            }
            Ok(())
        }

        (TypeDefinition::Enum(enum_type), TypeExtensionNode::Enum(ext)) => {
            for value in &ext.values {
                if enum_type.values.contains_key(&value.name) {
                    return Err(GraphQLError::extension_at(
                        GQL0202,
                        format!(
                            "Enum value '{}.{}' already exists in the schema",
                            enum_type.name, value.name
                        ),
                        value.loc.clone(),
                    ));
                }
                enum_type
                    .values
                    .insert(value.name.clone(), lower_enum_value(value));
            }
            Ok(())
        }

        (TypeDefinition::InputObject(input_object), TypeExtensionNode::InputObject(ext)) => {
            for field in &ext.fields {
                if input_object.fields.contains_key(&field.name) {
                    return Err(GraphQLError::extension_at(
                        GQL0202,
                        format!(
                            "Field '{}.{}' already exists in the schema",
                            input_object.name, field.name
                        ),
                        field.loc.clone(),
                    ));
                }
                input_object
                    .fields
                    .insert(field.name.clone(), lowering.lower_input_value(field)?);
            }
            Ok(())
        }

        (target, ext) => Err(GraphQLError::extension_at(
            GQL0201,
            format!(
                "Cannot apply {} extension to {} type '{}'",
                ext.kind_name(),
                definition_kind_name(target),
                ext.name()
            ),
            ext.loc(),
        )),
    }
}

const fn definition_kind_name(definition: &TypeDefinition) -> &'static str {
    match definition {
        TypeDefinition::Scalar(_) => "scalar",
        TypeDefinition::Object(_) => "object",
        TypeDefinition::Interface(_) => "interface",
        TypeDefinition::Union(_) => "union",
        TypeDefinition::Enum(_) => "enum",
        TypeDefinition::InputObject(_) => "input object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_schema;
    use octofhir_graphql_ast::{
        EnumTypeDefinition, EnumTypeExtension, EnumValueDefinitionNode, FieldDefinitionNode,
        ObjectTypeDefinition, ObjectTypeExtension, TypeNode,
    };

    fn base_schema() -> Schema {
        let document = Document::new()
            .with_definition(
                ObjectTypeDefinition::new("Query")
                    .with_field(FieldDefinitionNode::new("a", TypeNode::named("String")))
                    .into(),
            )
            .with_definition(
                EnumTypeDefinition::new("Color")
                    .with_value(EnumValueDefinitionNode::new("RED"))
                    .into(),
            );
        build_schema(&document).unwrap()
    }

    #[test]
    fn test_empty_document_yields_equal_schema() {
        let schema = base_schema();
        let extended = extend_schema(&schema, &Document::new()).unwrap();
        assert_eq!(extended, schema);
    }

    #[test]
    fn test_extension_does_not_touch_base() {
        let schema = base_schema();
        let document = Document::new().with_definition(
            ObjectTypeExtension::new("Query")
                .with_field(FieldDefinitionNode::new("b", TypeNode::named("Int")))
                .into(),
        );

        let extended = extend_schema(&schema, &document).unwrap();

        let base_query = schema.query_type().unwrap();
        let extended_query = extended.query_type().unwrap();
        assert_eq!(base_query.fields.len(), 1);
        assert_eq!(extended_query.fields.len(), 2);
        let names: Vec<&String> = extended_query.fields.keys().collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_duplicate_member_is_error() {
        let schema = base_schema();
        let document = Document::new().with_definition(
            EnumTypeExtension::new("Color")
                .with_value(EnumValueDefinitionNode::new("RED"))
                .into(),
        );

        let err = extend_schema(&schema, &document).unwrap_err();
        assert_eq!(err.code(), GQL0202);
    }

    #[test]
    fn test_kind_mismatch_is_error() {
        let schema = base_schema();
        let document = Document::new().with_definition(
            ObjectTypeExtension::new("Color")
                .with_field(FieldDefinitionNode::new("b", TypeNode::named("Int")))
                .into(),
        );

        let err = extend_schema(&schema, &document).unwrap_err();
        assert_eq!(err.code(), GQL0201);
        assert!(err.message().contains("object extension"));
    }

    #[test]
    fn test_unknown_target_is_error() {
        let schema = base_schema();
        let document = Document::new().with_definition(
            ObjectTypeExtension::new("Ghost")
                .with_field(FieldDefinitionNode::new("b", TypeNode::named("Int")))
                .into(),
        );

        let err = extend_schema(&schema, &document).unwrap_err();
        assert_eq!(err.code(), GQL0200);
    }
}
