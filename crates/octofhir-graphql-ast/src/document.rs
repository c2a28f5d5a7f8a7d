//! Document and top-level definition nodes

use crate::{
    ConstDirectiveNode, DirectiveDefinitionNode, Loc, TypeDefinitionNode, TypeExtensionNode,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed schema document: an ordered sequence of definitions
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub definitions: Vec<Definition>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from a list of definitions
    pub fn from_definitions(definitions: impl IntoIterator<Item = Definition>) -> Self {
        Self {
            definitions: definitions.into_iter().collect(),
        }
    }

    /// Append a definition
    pub fn with_definition(mut self, definition: Definition) -> Self {
        self.definitions.push(definition);
        self
    }

    /// Append a type definition
    pub fn with_type(self, definition: impl Into<TypeDefinitionNode>) -> Self {
        self.with_definition(Definition::Type(definition.into()))
    }

    /// Concatenate several documents, preserving definition order
    pub fn concat(documents: impl IntoIterator<Item = Document>) -> Self {
        Self {
            definitions: documents
                .into_iter()
                .flat_map(|doc| doc.definitions)
                .collect(),
        }
    }

    /// Check if the document has no definitions
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// A top-level definition in a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Definition {
    /// `schema { query: ... }`
    Schema(SchemaDefinitionNode),
    /// `extend schema { ... }`
    SchemaExtension(SchemaExtensionNode),
    /// A named type definition
    Type(TypeDefinitionNode),
    /// `extend type ...` and friends
    TypeExtension(TypeExtensionNode),
    /// `directive @name on ...`
    Directive(DirectiveDefinitionNode),
    /// An executable operation; carried so mixed documents round-trip,
    /// ignored by the schema builder
    Operation(OperationDefinitionNode),
}

macro_rules! impl_into_type_definition {
    ($($variant:ident => $node:ty),* $(,)?) => {
        $(impl From<$node> for TypeDefinitionNode {
            fn from(def: $node) -> Self {
                Self::$variant(def)
            }
        }
        impl From<$node> for Definition {
            fn from(def: $node) -> Self {
                Self::Type(TypeDefinitionNode::$variant(def))
            }
        })*
    };
}

impl_into_type_definition!(
    Scalar => crate::ScalarTypeDefinition,
    Object => crate::ObjectTypeDefinition,
    Interface => crate::InterfaceTypeDefinition,
    Union => crate::UnionTypeDefinition,
    Enum => crate::EnumTypeDefinition,
    InputObject => crate::InputObjectTypeDefinition,
);

macro_rules! impl_into_type_extension {
    ($($variant:ident => $node:ty),* $(,)?) => {
        $(impl From<$node> for TypeExtensionNode {
            fn from(ext: $node) -> Self {
                Self::$variant(ext)
            }
        }
        impl From<$node> for Definition {
            fn from(ext: $node) -> Self {
                Self::TypeExtension(TypeExtensionNode::$variant(ext))
            }
        })*
    };
}

impl_into_type_extension!(
    Scalar => crate::ScalarTypeExtension,
    Object => crate::ObjectTypeExtension,
    Interface => crate::InterfaceTypeExtension,
    Union => crate::UnionTypeExtension,
    Enum => crate::EnumTypeExtension,
    InputObject => crate::InputObjectTypeExtension,
);

impl From<DirectiveDefinitionNode> for Definition {
    fn from(def: DirectiveDefinitionNode) -> Self {
        Self::Directive(def)
    }
}

impl From<SchemaDefinitionNode> for Definition {
    fn from(def: SchemaDefinitionNode) -> Self {
        Self::Schema(def)
    }
}

/// `schema { query: Query, mutation: Mutation }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDefinitionNode {
    pub operation_types: Vec<OperationTypeDefinitionNode>,
    pub directives: Vec<ConstDirectiveNode>,
    pub loc: Loc,
}

impl SchemaDefinitionNode {
    pub fn new() -> Self {
        Self {
            operation_types: Vec::new(),
            directives: Vec::new(),
            loc: None,
        }
    }

    /// Bind a root operation to an object type name
    pub fn with_operation(mut self, operation: OperationType, type_name: impl Into<String>) -> Self {
        self.operation_types.push(OperationTypeDefinitionNode {
            operation,
            type_name: type_name.into(),
            loc: None,
        });
        self
    }
}

impl Default for SchemaDefinitionNode {
    fn default() -> Self {
        Self::new()
    }
}

/// `extend schema { subscription: Subscription }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaExtensionNode {
    pub operation_types: Vec<OperationTypeDefinitionNode>,
    pub directives: Vec<ConstDirectiveNode>,
    pub loc: Loc,
}

impl SchemaExtensionNode {
    pub fn new() -> Self {
        Self {
            operation_types: Vec::new(),
            directives: Vec::new(),
            loc: None,
        }
    }

    /// Bind a root operation to an object type name
    pub fn with_operation(mut self, operation: OperationType, type_name: impl Into<String>) -> Self {
        self.operation_types.push(OperationTypeDefinitionNode {
            operation,
            type_name: type_name.into(),
            loc: None,
        });
        self
    }
}

impl Default for SchemaExtensionNode {
    fn default() -> Self {
        Self::new()
    }
}

/// One `operation: TypeName` entry of a schema definition or extension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationTypeDefinitionNode {
    pub operation: OperationType,
    pub type_name: String,
    pub loc: Loc,
}

/// The three root operation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => write!(f, "query"),
            Self::Mutation => write!(f, "mutation"),
            Self::Subscription => write!(f, "subscription"),
        }
    }
}

/// A bare executable operation definition
///
/// Selection sets belong to the execution engine and are not modelled in
/// this core; the node exists so a mixed document keeps its shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationDefinitionNode {
    pub operation: OperationType,
    pub name: Option<String>,
    pub loc: Loc,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldDefinitionNode, ObjectTypeDefinition, TypeNode};

    #[test]
    fn test_concat_preserves_order() {
        let first = Document::new().with_definition(
            ObjectTypeDefinition::new("Query")
                .with_field(FieldDefinitionNode::new("a", TypeNode::named("String")))
                .into(),
        );
        let second = Document::new().with_definition(
            ObjectTypeDefinition::new("Mutation")
                .with_field(FieldDefinitionNode::new("b", TypeNode::named("Int")))
                .into(),
        );

        let combined = Document::concat([first, second]);
        assert_eq!(combined.definitions.len(), 2);
        match &combined.definitions[0] {
            Definition::Type(def) => assert_eq!(def.name(), "Query"),
            other => panic!("Expected type definition, got: {other:?}"),
        }
    }

    #[test]
    fn test_schema_definition_builder() {
        let schema_def = SchemaDefinitionNode::new()
            .with_operation(OperationType::Query, "QueryRoot")
            .with_operation(OperationType::Mutation, "MutationRoot");
        assert_eq!(schema_def.operation_types.len(), 2);
        assert_eq!(schema_def.operation_types[0].type_name, "QueryRoot");
    }
}
