//! Literal value syntax nodes

use serde::{Deserialize, Serialize};
use std::fmt;

/// A literal value as written in a schema document or query
///
/// Used for argument and input-field default values and for directive
/// arguments. Variables are resolved by the conversion functions against a
/// caller-supplied variable map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValueNode {
    /// A variable reference (e.g. `$size`)
    Variable(String),
    /// An integer literal
    Int(i64),
    /// A float literal
    Float(f64),
    /// A string literal
    String(String),
    /// A boolean literal
    Boolean(bool),
    /// The `null` literal
    Null,
    /// An enum value literal (e.g. `NEWHOPE`)
    Enum(String),
    /// A list literal
    List(Vec<ValueNode>),
    /// An input object literal
    Object(Vec<ObjectFieldNode>),
}

impl ValueNode {
    /// Create a string literal
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Create an enum value literal
    pub fn enum_value(name: impl Into<String>) -> Self {
        Self::Enum(name.into())
    }

    /// Create a variable reference
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// Create an object literal from `(name, value)` pairs
    pub fn object(fields: impl IntoIterator<Item = (&'static str, ValueNode)>) -> Self {
        Self::Object(
            fields
                .into_iter()
                .map(|(name, value)| ObjectFieldNode::new(name, value))
                .collect(),
        )
    }

    /// Check if this is the `null` literal
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for ValueNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable(name) => write!(f, "${name}"),
            Self::Int(value) => write!(f, "{value}"),
            // Keep a decimal marker so the literal re-reads as a float
            Self::Float(value) if value.is_finite() && value.fract() == 0.0 => {
                write!(f, "{value:.1}")
            }
            Self::Float(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value:?}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Null => write!(f, "null"),
            Self::Enum(name) => write!(f, "{name}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Object(fields) => {
                write!(f, "{{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<i64> for ValueNode {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for ValueNode {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for ValueNode {
    fn from(value: &str) -> Self {
        Self::string(value)
    }
}

/// A single field of an input object literal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectFieldNode {
    /// Field name
    pub name: String,
    /// Field value
    pub value: ValueNode,
}

impl ObjectFieldNode {
    /// Create a new object field
    pub fn new(name: impl Into<String>, value: ValueNode) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}
