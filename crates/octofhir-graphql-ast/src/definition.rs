//! Type, directive, and extension definition nodes

use crate::{ConstDirectiveNode, DirectiveLocation, Loc, TypeNode, ValueNode};
use serde::{Deserialize, Serialize};

/// A named type definition
///
/// The kind set is closed: Scalar, Object, Interface, Union, Enum, and
/// InputObject. Wrapping forms (`List`/`NonNull`) are type references, not
/// definitions, and live in [`TypeNode`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeDefinitionNode {
    Scalar(ScalarTypeDefinition),
    Object(ObjectTypeDefinition),
    Interface(InterfaceTypeDefinition),
    Union(UnionTypeDefinition),
    Enum(EnumTypeDefinition),
    InputObject(InputObjectTypeDefinition),
}

impl TypeDefinitionNode {
    /// Get the defined type name
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(def) => &def.name,
            Self::Object(def) => &def.name,
            Self::Interface(def) => &def.name,
            Self::Union(def) => &def.name,
            Self::Enum(def) => &def.name,
            Self::InputObject(def) => &def.name,
        }
    }

    /// Get the definition's source location
    pub fn loc(&self) -> Loc {
        match self {
            Self::Scalar(def) => def.loc.clone(),
            Self::Object(def) => def.loc.clone(),
            Self::Interface(def) => def.loc.clone(),
            Self::Union(def) => def.loc.clone(),
            Self::Enum(def) => def.loc.clone(),
            Self::InputObject(def) => def.loc.clone(),
        }
    }

    /// Human-readable kind name used in error messages
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Object(_) => "object",
            Self::Interface(_) => "interface",
            Self::Union(_) => "union",
            Self::Enum(_) => "enum",
            Self::InputObject(_) => "input object",
        }
    }
}

/// `scalar Name`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarTypeDefinition {
    pub name: String,
    pub description: Option<String>,
    pub directives: Vec<ConstDirectiveNode>,
    pub loc: Loc,
}

impl ScalarTypeDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            directives: Vec::new(),
            loc: None,
        }
    }
}

/// `type Name implements A & B { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectTypeDefinition {
    pub name: String,
    pub description: Option<String>,
    /// Names of the implemented interfaces, in declaration order
    pub interfaces: Vec<String>,
    pub fields: Vec<FieldDefinitionNode>,
    pub directives: Vec<ConstDirectiveNode>,
    pub loc: Loc,
}

impl ObjectTypeDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            directives: Vec::new(),
            loc: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_interface(mut self, name: impl Into<String>) -> Self {
        self.interfaces.push(name.into());
        self
    }

    pub fn with_field(mut self, field: FieldDefinitionNode) -> Self {
        self.fields.push(field);
        self
    }
}

/// `interface Name { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceTypeDefinition {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<FieldDefinitionNode>,
    pub directives: Vec<ConstDirectiveNode>,
    pub loc: Loc,
}

impl InterfaceTypeDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Vec::new(),
            directives: Vec::new(),
            loc: None,
        }
    }

    pub fn with_field(mut self, field: FieldDefinitionNode) -> Self {
        self.fields.push(field);
        self
    }
}

/// `union Name = A | B`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnionTypeDefinition {
    pub name: String,
    pub description: Option<String>,
    /// Member type names, in declaration order
    pub members: Vec<String>,
    pub directives: Vec<ConstDirectiveNode>,
    pub loc: Loc,
}

impl UnionTypeDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            members: Vec::new(),
            directives: Vec::new(),
            loc: None,
        }
    }

    pub fn with_member(mut self, name: impl Into<String>) -> Self {
        self.members.push(name.into());
        self
    }
}

/// `enum Name { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumTypeDefinition {
    pub name: String,
    pub description: Option<String>,
    pub values: Vec<EnumValueDefinitionNode>,
    pub directives: Vec<ConstDirectiveNode>,
    pub loc: Loc,
}

impl EnumTypeDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            values: Vec::new(),
            directives: Vec::new(),
            loc: None,
        }
    }

    pub fn with_value(mut self, value: EnumValueDefinitionNode) -> Self {
        self.values.push(value);
        self
    }
}

/// `input Name { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputObjectTypeDefinition {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<InputValueDefinitionNode>,
    pub directives: Vec<ConstDirectiveNode>,
    pub loc: Loc,
}

impl InputObjectTypeDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Vec::new(),
            directives: Vec::new(),
            loc: None,
        }
    }

    pub fn with_field(mut self, field: InputValueDefinitionNode) -> Self {
        self.fields.push(field);
        self
    }
}

/// A field of an object or interface type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinitionNode {
    pub name: String,
    pub description: Option<String>,
    pub arguments: Vec<InputValueDefinitionNode>,
    /// Output type reference
    pub ty: TypeNode,
    pub directives: Vec<ConstDirectiveNode>,
    pub loc: Loc,
}

impl FieldDefinitionNode {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeNode>) -> Self {
        Self {
            name: name.into(),
            description: None,
            arguments: Vec::new(),
            ty: ty.into(),
            directives: Vec::new(),
            loc: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_argument(mut self, argument: InputValueDefinitionNode) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn with_directive(mut self, directive: ConstDirectiveNode) -> Self {
        self.directives.push(directive);
        self
    }
}

/// An argument of a field or directive, or a field of an input object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputValueDefinitionNode {
    pub name: String,
    pub description: Option<String>,
    /// Input type reference
    pub ty: TypeNode,
    /// Default value literal, if declared
    pub default_value: Option<ValueNode>,
    pub directives: Vec<ConstDirectiveNode>,
    pub loc: Loc,
}

impl InputValueDefinitionNode {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeNode>) -> Self {
        Self {
            name: name.into(),
            description: None,
            ty: ty.into(),
            default_value: None,
            directives: Vec::new(),
            loc: None,
        }
    }

    pub fn with_default(mut self, default_value: ValueNode) -> Self {
        self.default_value = Some(default_value);
        self
    }
}

/// A single value of an enum type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValueDefinitionNode {
    pub name: String,
    pub description: Option<String>,
    pub directives: Vec<ConstDirectiveNode>,
    pub loc: Loc,
}

impl EnumValueDefinitionNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            directives: Vec::new(),
            loc: None,
        }
    }

    pub fn with_directive(mut self, directive: ConstDirectiveNode) -> Self {
        self.directives.push(directive);
        self
    }
}

/// `directive @name(...) repeatable on LOCATION | ...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectiveDefinitionNode {
    pub name: String,
    pub description: Option<String>,
    pub arguments: Vec<InputValueDefinitionNode>,
    pub repeatable: bool,
    pub locations: Vec<DirectiveLocation>,
    pub loc: Loc,
}

impl DirectiveDefinitionNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            arguments: Vec::new(),
            repeatable: false,
            locations: Vec::new(),
            loc: None,
        }
    }

    pub fn with_argument(mut self, argument: InputValueDefinitionNode) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }

    pub fn with_location(mut self, location: DirectiveLocation) -> Self {
        self.locations.push(location);
        self
    }
}

/// A type extension node
///
/// Extensions carry only additive member lists; they are legal input to the
/// schema extender and a build error anywhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeExtensionNode {
    Scalar(ScalarTypeExtension),
    Object(ObjectTypeExtension),
    Interface(InterfaceTypeExtension),
    Union(UnionTypeExtension),
    Enum(EnumTypeExtension),
    InputObject(InputObjectTypeExtension),
}

impl TypeExtensionNode {
    /// Name of the type being extended
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(ext) => &ext.name,
            Self::Object(ext) => &ext.name,
            Self::Interface(ext) => &ext.name,
            Self::Union(ext) => &ext.name,
            Self::Enum(ext) => &ext.name,
            Self::InputObject(ext) => &ext.name,
        }
    }

    /// Get the extension's source location
    pub fn loc(&self) -> Loc {
        match self {
            Self::Scalar(ext) => ext.loc.clone(),
            Self::Object(ext) => ext.loc.clone(),
            Self::Interface(ext) => ext.loc.clone(),
            Self::Union(ext) => ext.loc.clone(),
            Self::Enum(ext) => ext.loc.clone(),
            Self::InputObject(ext) => ext.loc.clone(),
        }
    }

    /// Human-readable kind name used in error messages
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Object(_) => "object",
            Self::Interface(_) => "interface",
            Self::Union(_) => "union",
            Self::Enum(_) => "enum",
            Self::InputObject(_) => "input object",
        }
    }
}

/// `extend scalar Name @directive`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarTypeExtension {
    pub name: String,
    pub directives: Vec<ConstDirectiveNode>,
    pub loc: Loc,
}

impl ScalarTypeExtension {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directives: Vec::new(),
            loc: None,
        }
    }
}

/// `extend type Name implements I { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectTypeExtension {
    pub name: String,
    pub interfaces: Vec<String>,
    pub fields: Vec<FieldDefinitionNode>,
    pub directives: Vec<ConstDirectiveNode>,
    pub loc: Loc,
}

impl ObjectTypeExtension {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            interfaces: Vec::new(),
            fields: Vec::new(),
            directives: Vec::new(),
            loc: None,
        }
    }

    pub fn with_interface(mut self, name: impl Into<String>) -> Self {
        self.interfaces.push(name.into());
        self
    }

    pub fn with_field(mut self, field: FieldDefinitionNode) -> Self {
        self.fields.push(field);
        self
    }
}

/// `extend interface Name { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceTypeExtension {
    pub name: String,
    pub fields: Vec<FieldDefinitionNode>,
    pub directives: Vec<ConstDirectiveNode>,
    pub loc: Loc,
}

impl InterfaceTypeExtension {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            directives: Vec::new(),
            loc: None,
        }
    }

    pub fn with_field(mut self, field: FieldDefinitionNode) -> Self {
        self.fields.push(field);
        self
    }
}

/// `extend union Name = A | B`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnionTypeExtension {
    pub name: String,
    pub members: Vec<String>,
    pub directives: Vec<ConstDirectiveNode>,
    pub loc: Loc,
}

impl UnionTypeExtension {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            directives: Vec::new(),
            loc: None,
        }
    }

    pub fn with_member(mut self, name: impl Into<String>) -> Self {
        self.members.push(name.into());
        self
    }
}

/// `extend enum Name { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumTypeExtension {
    pub name: String,
    pub values: Vec<EnumValueDefinitionNode>,
    pub directives: Vec<ConstDirectiveNode>,
    pub loc: Loc,
}

impl EnumTypeExtension {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            directives: Vec::new(),
            loc: None,
        }
    }

    pub fn with_value(mut self, value: EnumValueDefinitionNode) -> Self {
        self.values.push(value);
        self
    }
}

/// `extend input Name { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputObjectTypeExtension {
    pub name: String,
    pub fields: Vec<InputValueDefinitionNode>,
    pub directives: Vec<ConstDirectiveNode>,
    pub loc: Loc,
}

impl InputObjectTypeExtension {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            directives: Vec::new(),
            loc: None,
        }
    }

    pub fn with_field(mut self, field: InputValueDefinitionNode) -> Self {
        self.fields.push(field);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_style_definition() {
        let def = ObjectTypeDefinition::new("Query")
            .with_field(FieldDefinitionNode::new("hero", TypeNode::named("Character")))
            .with_field(
                FieldDefinitionNode::new("droid", TypeNode::named("Droid")).with_argument(
                    InputValueDefinitionNode::new("id", TypeNode::non_null(TypeNode::named("ID"))),
                ),
            );

        assert_eq!(def.fields.len(), 2);
        assert_eq!(def.fields[1].arguments[0].ty.to_string(), "ID!");
    }

    #[test]
    fn test_definition_kind_name() {
        let def = TypeDefinitionNode::Union(UnionTypeDefinition::new("SearchResult"));
        assert_eq!(def.kind_name(), "union");
        assert_eq!(def.name(), "SearchResult");
    }
}
