//! Schema construction scenarios
//!
//! Covers forward and cyclic references, derived possible types, root
//! resolution, deprecation metadata, and the fail-fast error cases.

use octofhir_graphql_ast::{
    ConstDirectiveNode, Definition, DirectiveDefinitionNode, DirectiveLocation, Document,
    EnumTypeDefinition, EnumValueDefinitionNode, FieldDefinitionNode, InputObjectTypeDefinition,
    InputValueDefinitionNode, InterfaceTypeDefinition, ObjectTypeDefinition, OperationType,
    SchemaDefinitionNode, TypeNode, UnionTypeDefinition, ValueNode,
};
use octofhir_graphql_diagnostics::{GQL0003, GQL0004, GQL0006, GQL0007, GQL0008, GQL0009};
use octofhir_graphql_schema::{BuildOptions, DefaultRootNames, build_schema, build_schema_with_options};
use octofhir_graphql_types::{TypeDefinition, TypeRef, Value};
use pretty_assertions::assert_eq;

#[test]
fn test_self_recursive_type() {
    let document = Document::new().with_definition(
        ObjectTypeDefinition::new("Query")
            .with_field(FieldDefinitionNode::new("self", TypeNode::named("Query")))
            .into(),
    );

    let schema = build_schema(&document).unwrap();
    let query = schema.query_type().unwrap();
    assert_eq!(query.fields["self"].ty, TypeRef::named("Query"));
}

#[test]
fn test_mutually_recursive_types() {
    let document = Document::new()
        .with_definition(
            ObjectTypeDefinition::new("Query")
                .with_field(FieldDefinitionNode::new("person", TypeNode::named("Person")))
                .into(),
        )
        .with_definition(
            ObjectTypeDefinition::new("Person")
                .with_field(FieldDefinitionNode::new(
                    "bestFriend",
                    TypeNode::named("Person"),
                ))
                .with_field(FieldDefinitionNode::new(
                    "employer",
                    TypeNode::named("Company"),
                ))
                .into(),
        )
        .with_definition(
            ObjectTypeDefinition::new("Company")
                .with_field(FieldDefinitionNode::new(
                    "employees",
                    TypeNode::list(TypeNode::named("Person")),
                ))
                .into(),
        );

    let schema = build_schema(&document).unwrap();
    let company = match schema.type_definition("Company") {
        Some(TypeDefinition::Object(object)) => object,
        other => panic!("Expected object, got: {other:?}"),
    };
    assert_eq!(
        company.fields["employees"].ty,
        TypeRef::list(TypeRef::named("Person"))
    );
}

#[test]
fn test_interface_possible_types_are_derived() {
    let document = Document::new()
        .with_definition(
            InterfaceTypeDefinition::new("Node")
                .with_field(FieldDefinitionNode::new("id", TypeNode::named("ID")))
                .into(),
        )
        .with_definition(
            ObjectTypeDefinition::new("Query")
                .with_interface("Node")
                .with_field(FieldDefinitionNode::new("id", TypeNode::named("ID")))
                .into(),
        )
        .with_definition(
            ObjectTypeDefinition::new("Droid")
                .with_interface("Node")
                .with_field(FieldDefinitionNode::new("id", TypeNode::named("ID")))
                .into(),
        );

    let schema = build_schema(&document).unwrap();
    assert_eq!(
        schema.possible_types("Node"),
        ["Query".to_string(), "Droid".to_string()]
    );
    assert!(schema.is_possible_type("Node", "Droid"));
}

#[test]
fn test_explicit_schema_definition_roots() {
    let document = Document::new()
        .with_definition(
            SchemaDefinitionNode::new()
                .with_operation(OperationType::Query, "Root")
                .into(),
        )
        .with_definition(
            ObjectTypeDefinition::new("Root")
                .with_field(FieldDefinitionNode::new("ok", TypeNode::named("Boolean")))
                .into(),
        )
        // Conventionally named type is not picked up once a schema
        // definition exists
        .with_definition(
            ObjectTypeDefinition::new("Mutation")
                .with_field(FieldDefinitionNode::new("ok", TypeNode::named("Boolean")))
                .into(),
        );

    let schema = build_schema(&document).unwrap();
    assert_eq!(schema.query_type_name(), Some("Root"));
    assert_eq!(schema.mutation_type_name(), None);
}

#[test]
fn test_conventional_roots_are_configurable() {
    let document = Document::new().with_definition(
        ObjectTypeDefinition::new("QueryRoot")
            .with_field(FieldDefinitionNode::new("ok", TypeNode::named("Boolean")))
            .into(),
    );

    assert_eq!(build_schema(&document).unwrap().query_type_name(), None);

    let options = BuildOptions {
        assume_valid: false,
        default_roots: DefaultRootNames {
            query: "QueryRoot".to_string(),
            ..DefaultRootNames::default()
        },
    };
    let schema = build_schema_with_options(&document, &options).unwrap();
    assert_eq!(schema.query_type_name(), Some("QueryRoot"));
}

#[test]
fn test_deprecation_metadata_from_directives() {
    let document = Document::new()
        .with_definition(
            ObjectTypeDefinition::new("Query")
                .with_field(
                    FieldDefinitionNode::new("old", TypeNode::named("String"))
                        .with_directive(ConstDirectiveNode::deprecated(Some("Use `new`."))),
                )
                .with_field(FieldDefinitionNode::new("new", TypeNode::named("String")))
                .into(),
        )
        .with_definition(
            EnumTypeDefinition::new("Color")
                .with_value(EnumValueDefinitionNode::new("RED"))
                .with_value(
                    EnumValueDefinitionNode::new("CRIMSON")
                        .with_directive(ConstDirectiveNode::deprecated(None)),
                )
                .into(),
        );

    let schema = build_schema(&document).unwrap();
    let query = schema.query_type().unwrap();
    assert_eq!(query.fields["old"].deprecation.as_deref(), Some("Use `new`."));
    assert!(query.fields["new"].deprecation.is_none());

    let color = match schema.type_definition("Color") {
        Some(TypeDefinition::Enum(color)) => color,
        other => panic!("Expected enum, got: {other:?}"),
    };
    assert_eq!(
        color.values["CRIMSON"].deprecation.as_deref(),
        Some("No longer supported")
    );
}

#[test]
fn test_argument_defaults_are_captured() {
    let document = Document::new().with_definition(
        ObjectTypeDefinition::new("Query")
            .with_field(
                FieldDefinitionNode::new("items", TypeNode::list(TypeNode::named("String")))
                    .with_argument(
                        InputValueDefinitionNode::new("first", TypeNode::named("Int"))
                            .with_default(ValueNode::Int(10)),
                    ),
            )
            .into(),
    );

    let schema = build_schema(&document).unwrap();
    let field = &schema.query_type().unwrap().fields["items"];
    assert_eq!(field.arguments["first"].default_value, Some(Value::Int(10)));
}

#[test]
fn test_specified_directives_are_injected_unless_overridden() {
    let document = Document::new()
        .with_definition(
            ObjectTypeDefinition::new("Query")
                .with_field(FieldDefinitionNode::new("ok", TypeNode::named("Boolean")))
                .into(),
        )
        .with_definition(Definition::Directive(
            DirectiveDefinitionNode::new("deprecated")
                .with_location(DirectiveLocation::FieldDefinition),
        ));

    let schema = build_schema(&document).unwrap();
    assert!(schema.directive("skip").is_some());
    assert!(schema.directive("include").is_some());
    // The document's own definition wins
    let deprecated = schema.directive("deprecated").unwrap();
    assert!(deprecated.arguments.is_empty());
}

#[test]
fn test_multiple_schema_definitions_fail() {
    let document = Document::new()
        .with_definition(SchemaDefinitionNode::new().with_operation(OperationType::Query, "Q").into())
        .with_definition(SchemaDefinitionNode::new().with_operation(OperationType::Query, "Q").into())
        .with_definition(
            ObjectTypeDefinition::new("Q")
                .with_field(FieldDefinitionNode::new("ok", TypeNode::named("Boolean")))
                .into(),
        );

    assert_eq!(build_schema(&document).unwrap_err().code(), GQL0004);
}

#[test]
fn test_duplicate_root_operation_fails() {
    let document = Document::new()
        .with_definition(
            SchemaDefinitionNode::new()
                .with_operation(OperationType::Query, "Q")
                .with_operation(OperationType::Query, "Q")
                .into(),
        )
        .with_definition(
            ObjectTypeDefinition::new("Q")
                .with_field(FieldDefinitionNode::new("ok", TypeNode::named("Boolean")))
                .into(),
        );

    assert_eq!(build_schema(&document).unwrap_err().code(), GQL0009);
}

#[test]
fn test_root_must_be_object() {
    let document = Document::new()
        .with_definition(
            SchemaDefinitionNode::new()
                .with_operation(OperationType::Query, "Color")
                .into(),
        )
        .with_definition(
            EnumTypeDefinition::new("Color")
                .with_value(EnumValueDefinitionNode::new("RED"))
                .into(),
        );

    assert_eq!(build_schema(&document).unwrap_err().code(), GQL0006);
}

#[test]
fn test_unknown_root_fails_even_when_assuming_valid() {
    let document = Document::new().with_definition(
        SchemaDefinitionNode::new()
            .with_operation(OperationType::Query, "Ghost")
            .into(),
    );

    let options = BuildOptions {
        assume_valid: true,
        ..BuildOptions::default()
    };
    assert_eq!(
        build_schema_with_options(&document, &options).unwrap_err().code(),
        GQL0003
    );
}

#[test]
fn test_union_members_must_be_objects() {
    let document = Document::new()
        .with_definition(
            ObjectTypeDefinition::new("Query")
                .with_field(FieldDefinitionNode::new("it", TypeNode::named("Thing")))
                .into(),
        )
        .with_definition(
            EnumTypeDefinition::new("Color")
                .with_value(EnumValueDefinitionNode::new("RED"))
                .into(),
        )
        .with_definition(UnionTypeDefinition::new("Thing").with_member("Color").into());

    assert_eq!(build_schema(&document).unwrap_err().code(), GQL0007);

    // The deferred re-check is skippable
    let options = BuildOptions {
        assume_valid: true,
        ..BuildOptions::default()
    };
    assert!(build_schema_with_options(&document, &options).is_ok());
}

#[test]
fn test_input_positions_reject_output_types() {
    let document = Document::new()
        .with_definition(
            ObjectTypeDefinition::new("Query")
                .with_field(
                    FieldDefinitionNode::new("search", TypeNode::named("String")).with_argument(
                        InputValueDefinitionNode::new("where", TypeNode::named("Query")),
                    ),
                )
                .into(),
        );

    assert_eq!(build_schema(&document).unwrap_err().code(), GQL0008);
}

#[test]
fn test_input_object_fields_reject_output_types() {
    let document = Document::new()
        .with_definition(
            ObjectTypeDefinition::new("Query")
                .with_field(FieldDefinitionNode::new("ok", TypeNode::named("Boolean")))
                .into(),
        )
        .with_definition(
            InputObjectTypeDefinition::new("Bad")
                .with_field(InputValueDefinitionNode::new("q", TypeNode::named("Query")))
                .into(),
        );

    assert_eq!(build_schema(&document).unwrap_err().code(), GQL0008);
}
