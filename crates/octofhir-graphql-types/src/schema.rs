//! The schema - an immutable snapshot of a type graph
//!
//! A `Schema` is created once by a builder and never mutated afterwards;
//! extension derives a new, independent graph. Both maps preserve
//! declaration order, which is the documented iteration order for
//! extension merges and compatibility diffs.

use crate::{DirectiveDefinition, ObjectType, TypeDefinition, TypeRef};
use indexmap::IndexMap;
use octofhir_graphql_ast::TypeNode;

/// An immutable type graph
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    types: IndexMap<String, TypeDefinition>,
    directives: IndexMap<String, DirectiveDefinition>,
    query: Option<String>,
    mutation: Option<String>,
    subscription: Option<String>,
}

impl Schema {
    /// Assemble a schema from already-validated parts
    ///
    /// This is the raw constructor the builders and the extender use; the
    /// invariants of the graph (unique names, resolvable references,
    /// Object-kind roots) are their responsibility.
    pub fn new(
        types: IndexMap<String, TypeDefinition>,
        directives: IndexMap<String, DirectiveDefinition>,
        query: Option<String>,
        mutation: Option<String>,
        subscription: Option<String>,
    ) -> Self {
        Self {
            types,
            directives,
            query,
            mutation,
            subscription,
        }
    }

    /// All named types, in declaration order
    pub fn types(&self) -> &IndexMap<String, TypeDefinition> {
        &self.types
    }

    /// Look up a type definition by name
    pub fn type_definition(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    /// All directive definitions, in declaration order
    pub fn directives(&self) -> &IndexMap<String, DirectiveDefinition> {
        &self.directives
    }

    /// Look up a directive definition by name
    pub fn directive(&self, name: &str) -> Option<&DirectiveDefinition> {
        self.directives.get(name)
    }

    /// Name of the query root type, if configured
    pub fn query_type_name(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Name of the mutation root type, if configured
    pub fn mutation_type_name(&self) -> Option<&str> {
        self.mutation.as_deref()
    }

    /// Name of the subscription root type, if configured
    pub fn subscription_type_name(&self) -> Option<&str> {
        self.subscription.as_deref()
    }

    /// The query root Object type, if configured
    pub fn query_type(&self) -> Option<&ObjectType> {
        self.root_object(self.query.as_deref())
    }

    /// The mutation root Object type, if configured
    pub fn mutation_type(&self) -> Option<&ObjectType> {
        self.root_object(self.mutation.as_deref())
    }

    /// The subscription root Object type, if configured
    pub fn subscription_type(&self) -> Option<&ObjectType> {
        self.root_object(self.subscription.as_deref())
    }

    fn root_object(&self, name: Option<&str>) -> Option<&ObjectType> {
        match self.types.get(name?) {
            Some(TypeDefinition::Object(object)) => Some(object),
            _ => None,
        }
    }

    /// Registered possible types of an abstract type, empty for other kinds
    pub fn possible_types(&self, name: &str) -> &[String] {
        match self.types.get(name) {
            Some(definition) => definition.possible_types().unwrap_or(&[]),
            None => &[],
        }
    }

    /// Check if `object_name` is a registered possible type of the abstract
    /// type `abstract_name`
    pub fn is_possible_type(&self, abstract_name: &str, object_name: &str) -> bool {
        self.possible_types(abstract_name)
            .iter()
            .any(|name| name == object_name)
    }

    /// Resolve a syntax-tree type reference against this graph
    ///
    /// Returns `None` when the named leaf is not declared here.
    pub fn type_ref_from_ast(&self, node: &TypeNode) -> Option<TypeRef> {
        match node {
            TypeNode::Named(named) => {
                if self.types.contains_key(&named.name) {
                    Some(TypeRef::named(named.name.clone()))
                } else {
                    None
                }
            }
            TypeNode::List(inner) => Some(TypeRef::list(self.type_ref_from_ast(inner)?)),
            TypeNode::NonNull(inner) => Some(TypeRef::non_null(self.type_ref_from_ast(inner)?)),
        }
    }
}
