//! Directive application nodes and the directive location set

use crate::{Loc, ValueNode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A directive applied to a definition (e.g. `@deprecated(reason: "...")`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstDirectiveNode {
    /// Directive name, without the leading `@`
    pub name: String,
    /// Directive arguments
    pub arguments: Vec<ConstArgumentNode>,
    /// Location in the source document
    pub loc: Loc,
}

impl ConstDirectiveNode {
    /// Create a new directive application
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            loc: None,
        }
    }

    /// Add an argument
    pub fn with_argument(mut self, name: impl Into<String>, value: ValueNode) -> Self {
        self.arguments.push(ConstArgumentNode {
            name: name.into(),
            value,
        });
        self
    }

    /// Create a `@deprecated` application with an optional reason
    pub fn deprecated(reason: Option<&str>) -> Self {
        let directive = Self::new("deprecated");
        match reason {
            Some(reason) => directive.with_argument("reason", ValueNode::string(reason)),
            None => directive,
        }
    }

    /// Look up an argument value by name
    pub fn argument(&self, name: &str) -> Option<&ValueNode> {
        self.arguments
            .iter()
            .find(|arg| arg.name == name)
            .map(|arg| &arg.value)
    }
}

/// A single named argument of a directive application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstArgumentNode {
    /// Argument name
    pub name: String,
    /// Argument value
    pub value: ValueNode,
}

/// The closed set of syntactic locations a directive may be applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DirectiveLocation {
    // Executable locations
    Query,
    Mutation,
    Subscription,
    Field,
    FragmentDefinition,
    FragmentSpread,
    InlineFragment,
    VariableDefinition,
    // Type system locations
    Schema,
    Scalar,
    Object,
    FieldDefinition,
    ArgumentDefinition,
    Interface,
    Union,
    Enum,
    EnumValue,
    InputObject,
    InputFieldDefinition,
}

impl DirectiveLocation {
    /// The canonical wire-format name of this location
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "QUERY",
            Self::Mutation => "MUTATION",
            Self::Subscription => "SUBSCRIPTION",
            Self::Field => "FIELD",
            Self::FragmentDefinition => "FRAGMENT_DEFINITION",
            Self::FragmentSpread => "FRAGMENT_SPREAD",
            Self::InlineFragment => "INLINE_FRAGMENT",
            Self::VariableDefinition => "VARIABLE_DEFINITION",
            Self::Schema => "SCHEMA",
            Self::Scalar => "SCALAR",
            Self::Object => "OBJECT",
            Self::FieldDefinition => "FIELD_DEFINITION",
            Self::ArgumentDefinition => "ARGUMENT_DEFINITION",
            Self::Interface => "INTERFACE",
            Self::Union => "UNION",
            Self::Enum => "ENUM",
            Self::EnumValue => "ENUM_VALUE",
            Self::InputObject => "INPUT_OBJECT",
            Self::InputFieldDefinition => "INPUT_FIELD_DEFINITION",
        }
    }
}

impl fmt::Display for DirectiveLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DirectiveLocation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "QUERY" => Ok(Self::Query),
            "MUTATION" => Ok(Self::Mutation),
            "SUBSCRIPTION" => Ok(Self::Subscription),
            "FIELD" => Ok(Self::Field),
            "FRAGMENT_DEFINITION" => Ok(Self::FragmentDefinition),
            "FRAGMENT_SPREAD" => Ok(Self::FragmentSpread),
            "INLINE_FRAGMENT" => Ok(Self::InlineFragment),
            "VARIABLE_DEFINITION" => Ok(Self::VariableDefinition),
            "SCHEMA" => Ok(Self::Schema),
            "SCALAR" => Ok(Self::Scalar),
            "OBJECT" => Ok(Self::Object),
            "FIELD_DEFINITION" => Ok(Self::FieldDefinition),
            "ARGUMENT_DEFINITION" => Ok(Self::ArgumentDefinition),
            "INTERFACE" => Ok(Self::Interface),
            "UNION" => Ok(Self::Union),
            "ENUM" => Ok(Self::Enum),
            "ENUM_VALUE" => Ok(Self::EnumValue),
            "INPUT_OBJECT" => Ok(Self::InputObject),
            "INPUT_FIELD_DEFINITION" => Ok(Self::InputFieldDefinition),
            _ => Err(()),
        }
    }
}
