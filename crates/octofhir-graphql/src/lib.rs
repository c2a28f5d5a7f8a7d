//! GraphQL type-system core for Rust
//!
//! This crate bundles the schema-side core of a GraphQL engine:
//! - Building an immutable, queryable type graph from a parsed schema
//!   document or from an introspection payload
//! - Evolving a graph under additive extensions
//! - Structural type comparators (equality, subtyping, overlap)
//! - Bidirectional conversion between literal syntax-tree values and
//!   runtime values, with aggregated coercion errors
//! - Compatibility analysis between two schema snapshots
//!
//! # Example
//!
//! ```ignore
//! use octofhir_graphql::ast::{Document, FieldDefinitionNode, ObjectTypeDefinition, TypeNode};
//! use octofhir_graphql::{build_schema, find_breaking_changes};
//!
//! let document = Document::new().with_definition(
//!     ObjectTypeDefinition::new("Query")
//!         .with_field(FieldDefinitionNode::new("hello", TypeNode::named("String")))
//!         .into(),
//! );
//!
//! let schema = build_schema(&document)?;
//! assert!(find_breaking_changes(&schema, &schema).is_empty());
//! ```

// Re-export all public APIs from internal crates
pub use octofhir_graphql_ast as ast;
pub use octofhir_graphql_diagnostics as diagnostics;
pub use octofhir_graphql_diff as diff;
pub use octofhir_graphql_schema as schema;
pub use octofhir_graphql_types as types;

// Convenience re-exports
pub use octofhir_graphql_diagnostics::{GraphQLError, Result};
pub use octofhir_graphql_diff::{find_breaking_changes, find_dangerous_changes};
pub use octofhir_graphql_schema::{
    BuildOptions, build_client_schema, build_schema, build_schema_with_options, extend_schema,
};
pub use octofhir_graphql_types::{
    Schema, TypeRef, Value, ast_from_value, coerce_value, do_types_overlap, is_equal_type,
    is_type_sub_type_of, value_from_ast, value_from_ast_untyped,
};
