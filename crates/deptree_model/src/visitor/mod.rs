//! Visitor protocol for dependency tree traversal.
//!
//! # Overview
//!
//! - [`NodeVisitor`] - two-callback visitor trait
//! - [`VisitResult`] - fallible continuation returned by each callback
//! - [`walk`] - pre-order driver interpreting those continuations
//!
//! `visit` decides whether a node's children are descended into, and
//! `end_visit` decides whether the node's remaining siblings are visited.
//! An error from either callback aborts the whole traversal.
//!
//! # Example
//!
//! ```rust
//! use std::ops::ControlFlow;
//! use deptree_model::{Artifact, DependencyNode, DependencyTree, NodeRef};
//! use deptree_model::visitor::{NodeVisitor, VisitResult};
//!
//! /// Counts nodes without descending below depth one.
//! struct ShallowCounter {
//!     count: usize,
//! }
//!
//! impl NodeVisitor for ShallowCounter {
//!     fn visit(&mut self, node: NodeRef<'_>) -> VisitResult {
//!         self.count += 1;
//!         Ok(if node.depth() < 1 {
//!             ControlFlow::Continue(())
//!         } else {
//!             ControlFlow::Break(())
//!         })
//!     }
//!
//!     fn end_visit(&mut self, _node: NodeRef<'_>) -> VisitResult {
//!         Ok(ControlFlow::Continue(()))
//!     }
//! }
//!
//! let mut tree = DependencyTree::new(DependencyNode::new(Artifact::new("g", "app", "1")));
//! let root = tree.root().id();
//! let lib = tree.add_child(root, DependencyNode::new(Artifact::new("g", "lib", "1"))).unwrap();
//! tree.add_child(lib, DependencyNode::new(Artifact::new("g", "util", "1"))).unwrap();
//!
//! let mut counter = ShallowCounter { count: 0 };
//! tree.root().accept(&mut counter).unwrap();
//! assert_eq!(counter.count, 2);
//! ```

mod visit;
mod walk;

pub use visit::{NodeVisitor, VisitResult};
pub use walk::walk;
