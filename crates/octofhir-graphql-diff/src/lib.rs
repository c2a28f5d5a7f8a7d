//! GraphQL schema compatibility analysis
//!
//! Compares two independently built type graphs and reports the changes
//! that can break existing clients or put them at risk. Both entry points
//! are pure and read-only, and iterate the old graph in declaration order
//! so repeated runs over unchanged inputs produce identical reports.

mod breaking;
mod change;
mod dangerous;
mod safety;

pub use breaking::*;
pub use change::*;
pub use dangerous::*;
