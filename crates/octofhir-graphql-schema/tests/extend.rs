//! Schema extension scenarios

use octofhir_graphql_ast::{
    Definition, DirectiveDefinitionNode, DirectiveLocation, Document, FieldDefinitionNode,
    InterfaceTypeDefinition, ObjectTypeDefinition, ObjectTypeExtension, OperationType,
    SchemaExtensionNode, TypeNode, UnionTypeDefinition, UnionTypeExtension,
};
use octofhir_graphql_diagnostics::{GQL0203, GQL0204, GQL0205};
use octofhir_graphql_schema::{build_schema, extend_schema};
use octofhir_graphql_types::TypeRef;
use pretty_assertions::assert_eq;

fn base_document() -> Document {
    Document::new()
        .with_definition(
            ObjectTypeDefinition::new("Query")
                .with_field(FieldDefinitionNode::new("a", TypeNode::named("String")))
                .into(),
        )
        .with_definition(
            ObjectTypeDefinition::new("Droid")
                .with_field(FieldDefinitionNode::new("id", TypeNode::named("ID")))
                .into(),
        )
        .with_definition(UnionTypeDefinition::new("SearchResult").with_member("Droid").into())
}

#[test]
fn test_extended_field_order_is_preserved() {
    let schema = build_schema(&base_document()).unwrap();
    let document = Document::new().with_definition(
        ObjectTypeExtension::new("Query")
            .with_field(FieldDefinitionNode::new("b", TypeNode::named("Int")))
            .into(),
    );

    let extended = extend_schema(&schema, &document).unwrap();
    let query = extended.query_type().unwrap();
    let fields: Vec<(&String, String)> = query
        .fields
        .iter()
        .map(|(name, field)| (name, field.ty.to_string()))
        .collect();
    assert_eq!(
        fields,
        [
            (&"a".to_string(), "String".to_string()),
            (&"b".to_string(), "Int".to_string()),
        ]
    );
}

#[test]
fn test_new_types_can_reference_base_and_each_other() {
    let schema = build_schema(&base_document()).unwrap();
    let document = Document::new()
        .with_definition(
            ObjectTypeDefinition::new("Human")
                .with_field(FieldDefinitionNode::new("friend", TypeNode::named("Droid")))
                .with_field(FieldDefinitionNode::new("home", TypeNode::named("Planet")))
                .into(),
        )
        .with_definition(
            ObjectTypeDefinition::new("Planet")
                .with_field(FieldDefinitionNode::new(
                    "inhabitants",
                    TypeNode::list(TypeNode::named("Human")),
                ))
                .into(),
        );

    let extended = extend_schema(&schema, &document).unwrap();
    assert!(extended.type_definition("Human").is_some());
    assert!(extended.type_definition("Planet").is_some());
    // Base order first, new types in document order after
    let names: Vec<&String> = extended.types().keys().collect();
    let human_pos = names.iter().position(|n| *n == "Human").unwrap();
    let query_pos = names.iter().position(|n| *n == "Query").unwrap();
    assert!(query_pos < human_pos);
}

#[test]
fn test_union_extension_updates_possible_types() {
    let schema = build_schema(&base_document()).unwrap();
    let document = Document::new()
        .with_definition(
            ObjectTypeDefinition::new("Starship")
                .with_field(FieldDefinitionNode::new("id", TypeNode::named("ID")))
                .into(),
        )
        .with_definition(UnionTypeExtension::new("SearchResult").with_member("Starship").into());

    let extended = extend_schema(&schema, &document).unwrap();
    assert_eq!(
        extended.possible_types("SearchResult"),
        ["Droid".to_string(), "Starship".to_string()]
    );
    assert!(
        is_sub(&extended, "Starship", "SearchResult"),
        "new member is a subtype of the union"
    );
}

fn is_sub(schema: &octofhir_graphql_types::Schema, sub: &str, sup: &str) -> bool {
    octofhir_graphql_types::is_type_sub_type_of(
        schema,
        &TypeRef::named(sub),
        &TypeRef::named(sup),
    )
}

#[test]
fn test_object_extension_implements_new_interface() {
    let schema = build_schema(&base_document()).unwrap();
    let document = Document::new()
        .with_definition(
            InterfaceTypeDefinition::new("Node")
                .with_field(FieldDefinitionNode::new("id", TypeNode::named("ID")))
                .into(),
        )
        .with_definition(ObjectTypeExtension::new("Droid").with_interface("Node").into());

    let extended = extend_schema(&schema, &document).unwrap();
    assert_eq!(extended.possible_types("Node"), ["Droid".to_string()]);
}

#[test]
fn test_schema_extension_adds_missing_root_only() {
    let schema = build_schema(&base_document()).unwrap();
    let document = Document::new()
        .with_definition(
            ObjectTypeDefinition::new("Mutation")
                .with_field(FieldDefinitionNode::new("bump", TypeNode::named("Int")))
                .into(),
        )
        .with_definition(Definition::SchemaExtension(
            SchemaExtensionNode::new().with_operation(OperationType::Mutation, "Mutation"),
        ));

    let extended = extend_schema(&schema, &document).unwrap();
    assert_eq!(extended.mutation_type_name(), Some("Mutation"));

    // Defining the query root twice is an error
    let clash = Document::new().with_definition(Definition::SchemaExtension(
        SchemaExtensionNode::new().with_operation(OperationType::Query, "Droid"),
    ));
    assert_eq!(extend_schema(&schema, &clash).unwrap_err().code(), GQL0205);
}

#[test]
fn test_new_directive_merges_and_collisions_fail() {
    let schema = build_schema(&base_document()).unwrap();
    let document = Document::new().with_definition(Definition::Directive(
        DirectiveDefinitionNode::new("cache")
            .repeatable()
            .with_location(DirectiveLocation::FieldDefinition),
    ));

    let extended = extend_schema(&schema, &document).unwrap();
    assert!(extended.directive("cache").unwrap().repeatable);

    let clash = Document::new().with_definition(Definition::Directive(
        DirectiveDefinitionNode::new("skip").with_location(DirectiveLocation::Field),
    ));
    assert_eq!(extend_schema(&schema, &clash).unwrap_err().code(), GQL0204);
}

#[test]
fn test_redefining_existing_type_fails() {
    let schema = build_schema(&base_document()).unwrap();
    let document = Document::new().with_definition(
        ObjectTypeDefinition::new("Droid")
            .with_field(FieldDefinitionNode::new("id", TypeNode::named("ID")))
            .into(),
    );

    assert_eq!(extend_schema(&schema, &document).unwrap_err().code(), GQL0203);
}
