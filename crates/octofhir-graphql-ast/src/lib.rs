//! GraphQL type-system syntax tree definitions
//!
//! This crate defines the syntax-tree nodes an external parser produces for
//! GraphQL schema documents: type and directive definitions, type and schema
//! extensions, type references, and literal values. The schema builder and
//! extender consume these shapes; no parsing happens here.

mod definition;
mod directive;
mod document;
mod types;
mod value;

pub use definition::*;
pub use directive::*;
pub use document::*;
pub use types::*;
pub use value::*;

/// A node's optional source location, used only for error messages
pub type Loc = Option<octofhir_graphql_diagnostics::SourceLocation>;
