//! Schema construction from a parsed document
//!
//! Two passes. Pass one registers every named type and directive definition
//! by name, which removes ordering constraints: fields may reference types
//! defined later, including self- and mutually-recursive references. Pass
//! two lowers each definition, resolving references by name against the
//! registry, then derives interface possible-type sets and the root types.
//!
//! Construction fails fast with a single structured error; there is no
//! multi-error aggregation here because these are deployment-time problems.

use indexmap::{IndexMap, IndexSet};
use octofhir_graphql_ast::{
    ConstDirectiveNode, Definition, DirectiveDefinitionNode, Document, EnumValueDefinitionNode,
    FieldDefinitionNode, InputValueDefinitionNode, OperationType, SchemaDefinitionNode,
    TypeDefinitionNode, TypeNode, ValueNode,
};
use octofhir_graphql_diagnostics::{
    GQL0001, GQL0002, GQL0003, GQL0004, GQL0005, GQL0006, GQL0007, GQL0008, GQL0009, GQL0010,
    GraphQLError, Result,
};
use octofhir_graphql_types::{
    DEFAULT_DEPRECATION_REASON, DirectiveDefinition, EnumType, EnumValueDefinition,
    FieldDefinition, InputObjectType, InputValueDefinition, InterfaceType, ObjectType, ScalarType,
    Schema, TypeDefinition, TypeRef, UnionType, is_specified_scalar_name, specified_directives,
    specified_scalar, value_from_ast_untyped,
};

/// Conventional root type names used when no schema definition is present
///
/// The lookup by convention is an explicit configuration default, not
/// hidden behaviour; override the names here if a schema uses others.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultRootNames {
    pub query: String,
    pub mutation: String,
    pub subscription: String,
}

impl Default for DefaultRootNames {
    fn default() -> Self {
        Self {
            query: "Query".to_string(),
            mutation: "Mutation".to_string(),
            subscription: "Subscription".to_string(),
        }
    }
}

/// Options controlling schema construction
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Skip the deferred re-checks (input positions, union members, root
    /// kinds). Name resolution always runs; it is what guarantees
    /// termination on cyclic references.
    pub assume_valid: bool,
    /// Root type names used when the document has no schema definition
    pub default_roots: DefaultRootNames,
}

/// Build a schema from a document with default options
pub fn build_schema(document: &Document) -> Result<Schema> {
    build_schema_with_options(document, &BuildOptions::default())
}

/// Build a schema from a document
pub fn build_schema_with_options(document: &Document, options: &BuildOptions) -> Result<Schema> {
    // Pass one: register definitions by name
    let mut schema_def: Option<&SchemaDefinitionNode> = None;
    let mut type_nodes: IndexMap<&str, &TypeDefinitionNode> = IndexMap::new();
    let mut directive_nodes: IndexMap<&str, &DirectiveDefinitionNode> = IndexMap::new();

    for definition in &document.definitions {
        match definition {
            Definition::Schema(node) => {
                if schema_def.is_some() {
                    return Err(GraphQLError::build_at(
                        GQL0004,
                        "Must provide only one schema definition",
                        node.loc.clone(),
                    ));
                }
                schema_def = Some(node);
            }
            Definition::Type(node) => {
                if type_nodes.insert(node.name(), node).is_some() {
                    return Err(GraphQLError::build_at(
                        GQL0001,
                        format!("Type '{}' is defined more than once", node.name()),
                        node.loc(),
                    ));
                }
            }
            Definition::Directive(node) => {
                if directive_nodes.insert(node.name.as_str(), node).is_some() {
                    return Err(GraphQLError::build_at(
                        GQL0002,
                        format!("Directive '@{}' is defined more than once", node.name),
                        node.loc.clone(),
                    ));
                }
            }
            Definition::TypeExtension(node) => {
                return Err(GraphQLError::build_at(
                    GQL0005,
                    format!(
                        "Cannot define extension of type '{}' here; extensions are only valid as input to extend_schema",
                        node.name()
                    ),
                    node.loc(),
                ));
            }
            Definition::SchemaExtension(node) => {
                return Err(GraphQLError::build_at(
                    GQL0005,
                    "Cannot define a schema extension here; extensions are only valid as input to extend_schema",
                    node.loc.clone(),
                ));
            }
            // Executable operations carry no type system information
            Definition::Operation(_) => {}
        }
    }

    // Pass two: hydrate every registered definition
    let mut lowering = Lowering::for_names(type_nodes.keys().copied());

    let mut types: IndexMap<String, TypeDefinition> = IndexMap::new();
    for (name, node) in &type_nodes {
        types.insert((*name).to_string(), lowering.lower_type(node)?);
    }

    let mut directives: IndexMap<String, DirectiveDefinition> = IndexMap::new();
    for (name, node) in &directive_nodes {
        directives.insert((*name).to_string(), lowering.lower_directive(node)?);
    }
    for specified in specified_directives() {
        if !directives.contains_key(&specified.name) {
            lowering.mark_directive_scalars(&specified);
            directives.insert(specified.name.clone(), specified);
        }
    }

    lowering.inject_specified_scalars(&mut types);

    // Root types: explicit schema definition, else conventional names
    let (query, mutation, subscription) = match schema_def {
        Some(node) => resolve_explicit_roots(node)?,
        None => resolve_conventional_roots(&options.default_roots, &types),
    };

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

fn resolve_explicit_roots(
    node: &SchemaDefinitionNode,
) -> Result<(Option<String>, Option<String>, Option<String>)> {
    let mut query = None;
    let mut mutation = None;
    let mut subscription = None;
    for operation_type in &node.operation_types {
        let slot = match operation_type.operation {
            OperationType::Query => &mut query,
            OperationType::Mutation => &mut mutation,
            OperationType::Subscription => &mut subscription,
        };
        if slot.is_some() {
            return Err(GraphQLError::build_at(
                GQL0009,
                format!(
                    "Must provide only one {} type in schema",
                    operation_type.operation
                ),
                operation_type.loc.clone(),
            ));
        }
        *slot = Some(operation_type.type_name.clone());
    }
    Ok((query, mutation, subscription))
}

fn resolve_conventional_roots(
    defaults: &DefaultRootNames,
    types: &IndexMap<String, TypeDefinition>,
) -> (Option<String>, Option<String>, Option<String>) {
    let lookup = |name: &str| types.contains_key(name).then(|| name.to_string());
    (
        lookup(&defaults.query),
        lookup(&defaults.mutation),
        lookup(&defaults.subscription),
    )
}

pub(crate) fn check_root_is_object(
    root: &str,
    types: &IndexMap<String, TypeDefinition>,
) -> Result<()> {
    match types.get(root) {
        Some(TypeDefinition::Object(_)) => Ok(()),
        Some(definition) => Err(GraphQLError::build(
            GQL0006,
            format!(
                "Root operation type '{root}' must be an Object type, found {}",
                definition.kind()
            ),
        )),
        None => Err(GraphQLError::build(
            GQL0003,
            format!("Unknown type '{root}'"),
        )),
    }
}

/// Derive interface possible-type sets by scanning object declarations
pub(crate) fn compute_possible_types(types: &mut IndexMap<String, TypeDefinition>) {
    let mut implementors: IndexMap<String, Vec<String>> = IndexMap::new();
    for definition in types.values() {
        if let TypeDefinition::Object(object) = definition {
            for interface in &object.interfaces {
                implementors
                    .entry(interface.clone())
                    .or_default()
                    .push(object.name.clone());
            }
        }
    }
    for definition in types.values_mut() {
        if let TypeDefinition::Interface(interface) = definition {
            interface.possible_types =
                implementors.shift_remove(&interface.name).unwrap_or_default();
        }
    }
}

/// Union members must be Object types
pub(crate) fn check_union_members(types: &IndexMap<String, TypeDefinition>) -> Result<()> {
    for definition in types.values() {
        let TypeDefinition::Union(union_type) = definition else {
            continue;
        };
        for member in &union_type.members {
            if !matches!(types.get(member), Some(TypeDefinition::Object(_))) {
                return Err(GraphQLError::build(
                    GQL0007,
                    format!(
                        "Union type '{}' can only include Object types, found '{member}'",
                        union_type.name
                    ),
                ));
            }
        }
    }
    Ok(())
}

/// Arguments and input-object fields may only reference input kinds
pub(crate) fn check_input_positions(
    types: &IndexMap<String, TypeDefinition>,
    directives: &IndexMap<String, DirectiveDefinition>,
) -> Result<()> {
    let check = |owner: &str, value: &InputValueDefinition| -> Result<()> {
        let named = value.ty.named_type();
        match types.get(named) {
            Some(definition) if definition.is_input_type() => Ok(()),
            _ => Err(GraphQLError::build(
                GQL0008,
                format!(
                    "The type of '{owner}.{}' must be an input type, found '{named}'",
                    value.name
                ),
            )),
        }
    };

    for definition in types.values() {
        if let Some(fields) = definition.fields() {
            for field in fields.values() {
                for argument in field.arguments.values() {
                    check(&format!("{}.{}", definition.name(), field.name), argument)?;
                }
            }
        }
        if let Some(fields) = definition.input_fields() {
            for field in fields.values() {
                check(definition.name(), field)?;
            }
        }
    }
    for directive in directives.values() {
        for argument in directive.arguments.values() {
            check(&format!("@{}", directive.name), argument)?;
        }
    }
    Ok(())
}

/// Shared lowering of syntax-tree definitions into graph definitions
///
/// Used by the builder over a fresh registry and by the extender over the
/// union of the base graph's names and the extension document's names.
pub(crate) struct Lowering {
    known_names: IndexSet<String>,
    used_specified: IndexSet<String>,
}

impl Lowering {
    /// Create a lowering context over the declared type names
    pub(crate) fn for_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            known_names: names.into_iter().map(str::to_string).collect(),
            used_specified: IndexSet::new(),
        }
    }

    /// Resolve a syntax-tree reference into a graph reference
    ///
    /// The named leaf must be registered or be a specified scalar; the
    /// latter is tracked so it can be injected into the final type map.
    pub(crate) fn resolve_type_ref(&mut self, node: &TypeNode) -> Result<TypeRef> {
        match node {
            TypeNode::Named(named) => {
                if self.known_names.contains(&named.name) {
                    Ok(TypeRef::named(named.name.clone()))
                } else if is_specified_scalar_name(&named.name) {
                    self.used_specified.insert(named.name.clone());
                    Ok(TypeRef::named(named.name.clone()))
                } else {
                    Err(GraphQLError::build_at(
                        GQL0003,
                        format!("Unknown type '{}'", named.name),
                        named.loc.clone(),
                    ))
                }
            }
            TypeNode::List(inner) => Ok(TypeRef::list(self.resolve_type_ref(inner)?)),
            TypeNode::NonNull(inner) => Ok(TypeRef::non_null(self.resolve_type_ref(inner)?)),
        }
    }

    /// Lower a named type definition; interface possible types are filled
    /// in later by [`compute_possible_types`]
    pub(crate) fn lower_type(&mut self, node: &TypeDefinitionNode) -> Result<TypeDefinition> {
        Ok(match node {
            TypeDefinitionNode::Scalar(def) => {
                // Documents may re-declare a specified scalar; keep its parser
                if let Some(specified) = specified_scalar(&def.name) {
                    specified
                } else {
                    TypeDefinition::Scalar(ScalarType {
                        name: def.name.clone(),
                        description: def.description.clone(),
                        parse: None,
                    })
                }
            }
            TypeDefinitionNode::Object(def) => TypeDefinition::Object(ObjectType {
                name: def.name.clone(),
                description: def.description.clone(),
                interfaces: def.interfaces.clone(),
                fields: self.lower_fields(&def.name, &def.fields)?,
            }),
            TypeDefinitionNode::Interface(def) => TypeDefinition::Interface(InterfaceType {
                name: def.name.clone(),
                description: def.description.clone(),
                fields: self.lower_fields(&def.name, &def.fields)?,
                possible_types: Vec::new(),
            }),
            TypeDefinitionNode::Union(def) => TypeDefinition::Union(UnionType {
                name: def.name.clone(),
                description: def.description.clone(),
                members: self.resolve_member_names(&def.name, &def.members)?,
            }),
            TypeDefinitionNode::Enum(def) => TypeDefinition::Enum(EnumType {
                name: def.name.clone(),
                description: def.description.clone(),
                values: self.lower_enum_values(&def.name, &def.values)?,
            }),
            TypeDefinitionNode::InputObject(def) => TypeDefinition::InputObject(InputObjectType {
                name: def.name.clone(),
                description: def.description.clone(),
                fields: self.lower_input_values(&def.name, &def.fields)?,
            }),
        })
    }

    pub(crate) fn lower_fields(
        &mut self,
        owner: &str,
        nodes: &[FieldDefinitionNode],
    ) -> Result<IndexMap<String, FieldDefinition>> {
        let mut fields = IndexMap::new();
        for node in nodes {
            if fields.contains_key(&node.name) {
                return Err(GraphQLError::build_at(
                    GQL0010,
                    format!("Field '{owner}.{}' is defined more than once", node.name),
                    node.loc.clone(),
                ));
            }
            fields.insert(node.name.clone(), self.lower_field(owner, node)?);
        }
        Ok(fields)
    }

    pub(crate) fn lower_field(
        &mut self,
        owner: &str,
        node: &FieldDefinitionNode,
    ) -> Result<FieldDefinition> {
        Ok(FieldDefinition {
            name: node.name.clone(),
            description: node.description.clone(),
            arguments: self
                .lower_input_values(&format!("{owner}.{}", node.name), &node.arguments)?,
            ty: self.resolve_type_ref(&node.ty)?,
            deprecation: deprecation_reason(&node.directives),
        })
    }

    pub(crate) fn lower_input_values(
        &mut self,
        owner: &str,
        nodes: &[InputValueDefinitionNode],
    ) -> Result<IndexMap<String, InputValueDefinition>> {
        let mut values = IndexMap::new();
        for node in nodes {
            if values.contains_key(&node.name) {
                return Err(GraphQLError::build_at(
                    GQL0010,
                    format!("'{owner}.{}' is defined more than once", node.name),
                    node.loc.clone(),
                ));
            }
            values.insert(node.name.clone(), self.lower_input_value(node)?);
        }
        Ok(values)
    }

    pub(crate) fn lower_input_value(
        &mut self,
        node: &InputValueDefinitionNode,
    ) -> Result<InputValueDefinition> {
        Ok(InputValueDefinition {
            name: node.name.clone(),
            description: node.description.clone(),
            ty: self.resolve_type_ref(&node.ty)?,
            default_value: node
                .default_value
                .as_ref()
                .map(|value| value_from_ast_untyped(value, None)),
        })
    }

    fn lower_enum_values(
        &mut self,
        owner: &str,
        nodes: &[EnumValueDefinitionNode],
    ) -> Result<IndexMap<String, EnumValueDefinition>> {
        let mut values = IndexMap::new();
        for node in nodes {
            if values.contains_key(&node.name) {
                return Err(GraphQLError::build_at(
                    GQL0010,
                    format!("Enum value '{owner}.{}' is defined more than once", node.name),
                    node.loc.clone(),
                ));
            }
            values.insert(node.name.clone(), lower_enum_value(node));
        }
        Ok(values)
    }

    /// Resolve union member names; members must be registered types
    pub(crate) fn resolve_member_names(
        &mut self,
        owner: &str,
        members: &[String],
    ) -> Result<Vec<String>> {
        for member in members {
            if !self.known_names.contains(member) {
                return Err(GraphQLError::build(
                    GQL0003,
                    format!("Unknown type '{member}' in union '{owner}'"),
                ));
            }
        }
        Ok(members.to_vec())
    }

    pub(crate) fn lower_directive(
        &mut self,
        node: &DirectiveDefinitionNode,
    ) -> Result<DirectiveDefinition> {
        Ok(DirectiveDefinition {
            name: node.name.clone(),
            description: node.description.clone(),
            locations: node.locations.clone(),
            arguments: self.lower_input_values(&format!("@{}", node.name), &node.arguments)?,
            repeatable: node.repeatable,
        })
    }

    /// Track the specified scalars a pre-built directive references
    pub(crate) fn mark_directive_scalars(&mut self, directive: &DirectiveDefinition) {
        for argument in directive.arguments.values() {
            let named = argument.ty.named_type();
            if is_specified_scalar_name(named) && !self.known_names.contains(named) {
                self.used_specified.insert(named.to_string());
            }
        }
    }

    /// Append referenced specified scalars that were not declared
    pub(crate) fn inject_specified_scalars(&self, types: &mut IndexMap<String, TypeDefinition>) {
        for name in ["Int", "Float", "String", "Boolean", "ID"] {
            if self.used_specified.contains(name) && !types.contains_key(name) {
                if let Some(definition) = specified_scalar(name) {
                    types.insert(name.to_string(), definition);
                }
            }
        }
    }
}

/// Lower one enum value definition
pub(crate) fn lower_enum_value(node: &EnumValueDefinitionNode) -> EnumValueDefinition {
    EnumValueDefinition {
        name: node.name.clone(),
        description: node.description.clone(),
        deprecation: deprecation_reason(&node.directives),
    }
}

/// Read a deprecation reason from a definition's directives
///
/// A bare `@deprecated` carries the default reason.
pub(crate) fn deprecation_reason(directives: &[ConstDirectiveNode]) -> Option<String> {
    let directive = directives.iter().find(|d| d.name == "deprecated")?;
    match directive.argument("reason") {
        Some(ValueNode::String(reason)) => Some(reason.clone()),
        _ => Some(DEFAULT_DEPRECATION_REASON.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use octofhir_graphql_ast::{ObjectTypeDefinition, ScalarTypeDefinition};

    #[test]
    fn test_duplicate_type_fails_fast() {
        let document = Document::new()
            .with_definition(ObjectTypeDefinition::new("Query").into())
            .with_definition(ObjectTypeDefinition::new("Query").into());

        let err = build_schema(&document).unwrap_err();
        assert_eq!(err.code(), GQL0001);
        assert!(err.message().contains("'Query'"));
    }

    #[test]
    fn test_unknown_reference_fails() {
        let document = Document::new().with_definition(
            ObjectTypeDefinition::new("Query")
                .with_field(FieldDefinitionNode::new("pet", TypeNode::named("Pet")))
                .into(),
        );

        let err = build_schema(&document).unwrap_err();
        assert_eq!(err.code(), GQL0003);
        assert!(err.message().contains("'Pet'"));
    }

    #[test]
    fn test_specified_scalars_are_implicit() {
        let document = Document::new().with_definition(
            ObjectTypeDefinition::new("Query")
                .with_field(FieldDefinitionNode::new("title", TypeNode::named("String")))
                .into(),
        );

        let schema = build_schema(&document).unwrap();
        assert!(schema.type_definition("String").is_some());
        // Unreferenced specified scalars are not injected
        assert!(schema.type_definition("Float").is_none());
    }

    #[test]
    fn test_custom_scalar_redeclaring_specified_name_keeps_parser() {
        let document = Document::new()
            .with_definition(ScalarTypeDefinition::new("Int").into())
            .with_definition(
                ObjectTypeDefinition::new("Query")
                    .with_field(FieldDefinitionNode::new("n", TypeNode::named("Int")))
                    .into(),
            );

        let schema = build_schema(&document).unwrap();
        match schema.type_definition("Int") {
            Some(TypeDefinition::Scalar(scalar)) => assert!(scalar.parse.is_some()),
            other => panic!("Expected scalar, got: {other:?}"),
        }
    }
}
