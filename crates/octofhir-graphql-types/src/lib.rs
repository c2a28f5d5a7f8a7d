//! GraphQL type graph
//!
//! This crate defines the immutable, queryable schema representation shared
//! by the builders, the extender, and the compatibility analyzer:
//! - The type graph (`Schema`, `TypeDefinition`, `TypeRef`)
//! - Structural type comparators (equality, subtyping, overlap)
//! - Runtime values and aggregated input coercion
//! - Bidirectional conversion between literal syntax-tree nodes and values

mod comparators;
mod coercion;
mod conversion;
mod schema;
mod specified;
mod type_system;
mod value;

pub use comparators::*;
pub use coercion::*;
pub use conversion::*;
pub use schema::*;
pub use specified::*;
pub use type_system::*;
pub use value::*;
