//! Visitors built on the deptree visitor protocol.
//!
//! - [`CollectingVisitor`] - flattens a tree into a pre-order list
//! - [`FilteringVisitor`] - hands only accepted nodes to an inner visitor
//! - [`BuildingVisitor`] - clones the visited nodes into a new tree
//! - [`SerializingVisitor`] - draws a tree as an indented text diagram
//!
//! Every visitor holds traversal-scoped state and serves a single traversal;
//! the stateful ones offer `reset` for reuse.

mod building;
mod collecting;
mod filtering;
mod serializing;

pub use building::BuildingVisitor;
pub use collecting::CollectingVisitor;
pub use filtering::FilteringVisitor;
pub use serializing::SerializingVisitor;
