//! Type reference syntax nodes

use crate::Loc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A type reference as written in a schema document
///
/// A reference is a named leaf optionally composed under `List`/`NonNull`
/// wrappers, e.g. `[String!]!`. The grammar never nests `NonNull` directly
/// inside `NonNull`, and [`TypeNode::non_null`] preserves that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeNode {
    /// A named type (e.g. `String`, `Episode`)
    Named(NamedTypeNode),
    /// A list wrapper (e.g. `[Int]`)
    List(Box<TypeNode>),
    /// A non-null wrapper (e.g. `Int!`)
    NonNull(Box<TypeNode>),
}

impl TypeNode {
    /// Create a named type reference
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(NamedTypeNode::new(name))
    }

    /// Create a list wrapper
    pub fn list(inner: TypeNode) -> Self {
        Self::List(Box::new(inner))
    }

    /// Create a non-null wrapper; wrapping an already non-null type is a no-op
    pub fn non_null(inner: TypeNode) -> Self {
        match inner {
            Self::NonNull(_) => inner,
            other => Self::NonNull(Box::new(other)),
        }
    }

    /// Get the innermost named leaf of this reference
    pub fn named_leaf(&self) -> &NamedTypeNode {
        match self {
            Self::Named(named) => named,
            Self::List(inner) | Self::NonNull(inner) => inner.named_leaf(),
        }
    }

    /// Check if the outermost wrapper is non-null
    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(named) => write!(f, "{}", named.name),
            Self::List(inner) => write!(f, "[{}]", inner),
            Self::NonNull(inner) => write!(f, "{}!", inner),
        }
    }
}

/// The named leaf of a type reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedTypeNode {
    /// Referenced type name
    pub name: String,
    /// Location of the reference in the source document
    pub loc: Loc,
}

impl NamedTypeNode {
    /// Create a new named type node
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            loc: None,
        }
    }

    /// Attach a source location
    pub fn with_loc(mut self, loc: octofhir_graphql_diagnostics::SourceLocation) -> Self {
        self.loc = Some(loc);
        self
    }
}

impl From<&str> for TypeNode {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}
