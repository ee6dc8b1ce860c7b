//! # deptree_model
//!
//! Dependency tree model for deptree.
//!
//! This crate provides the tree consumed by every deptree visitor:
//!
//! - [`Artifact`] and [`DependencyNode`] - the payload of a tree vertex
//! - [`DependencyTree`] - an arena owning the nodes, with parent back-references
//!   and ordered children
//! - [`NodeRef`] - a borrowed view of one node, used by visitors
//! - [`visitor`] - the two-callback visitor protocol and its pre-order driver
//!
//! ## Example
//!
//! ```rust
//! use deptree_model::{Artifact, DependencyNode, DependencyTree};
//!
//! let mut tree = DependencyTree::new(DependencyNode::new(Artifact::new("org.example", "app", "1.0")));
//! let root = tree.root().id();
//! tree.add_child(root, DependencyNode::new(Artifact::new("org.example", "lib", "2.1"))).unwrap();
//!
//! let labels: Vec<String> = tree.root().preorder().map(|n| n.node_string()).collect();
//! assert_eq!(labels, ["org.example:app:jar:1.0", "org.example:lib:jar:2.1"]);
//! ```

mod artifact;
mod error;
mod node;
mod tree;
pub mod visitor;

pub use artifact::Artifact;
pub use error::{NodeError, PredicateError, TraversalError};
pub use node::{DependencyNode, NodeState};
pub use tree::{DependencyTree, NodeId, NodeRef, Postorder, Preorder, TreeDocument};

// Re-export commonly used visitor items for convenience
pub use visitor::{NodeVisitor, VisitResult};
