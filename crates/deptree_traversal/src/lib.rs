//! # deptree_traversal
//!
//! Visitors over deptree dependency trees.
//!
//! This crate provides:
//! - [`CollectingVisitor`] to flatten a tree into pre-order
//! - [`FilteringVisitor`] and the [`filter`] predicates to select nodes
//!   without pruning the traversal
//! - [`BuildingVisitor`] to copy (optionally filtered) trees
//! - [`SerializingVisitor`] and [`render`] to draw trees with
//!   [`TreeTokens`] chosen directly or through a [`RenderConfig`]
//!
//! ## Example
//!
//! ```rust
//! use deptree_model::{Artifact, DependencyNode, DependencyTree, NodeState};
//! use deptree_traversal::filter::StateFilter;
//! use deptree_traversal::{BuildingVisitor, FilteringVisitor, TreeTokens, render};
//!
//! let mut tree = DependencyTree::new(DependencyNode::new(Artifact::new("g", "app", "1")));
//! let root = tree.root().id();
//! tree.add_child(root, DependencyNode::new(Artifact::new("g", "core", "2"))).unwrap();
//! let cycle = DependencyNode::with_state(Artifact::new("g", "app", "1"), NodeState::OmittedForCycle, None).unwrap();
//! tree.add_child(root, cycle).unwrap();
//!
//! // Copy only the included nodes, then draw the copy.
//! let mut visitor = FilteringVisitor::new(BuildingVisitor::new(), StateFilter::included());
//! tree.root().accept(&mut visitor).unwrap();
//! let included = visitor.into_inner().into_tree().unwrap();
//!
//! assert_eq!(render(included.root(), TreeTokens::ASCII).unwrap(), "g:app:jar:1\n\\- g:core:jar:2\n");
//! ```

mod config;
mod error;
pub mod filter;
mod render;
mod tokens;
mod visitors;

pub use config::RenderConfig;
pub use error::ConfigError;
pub use render::{render, render_to, render_with_config};
pub use tokens::{TokenStyle, TreeTokens};
pub use visitors::{BuildingVisitor, CollectingVisitor, FilteringVisitor, SerializingVisitor};

pub use deptree_model::{NodeVisitor, TraversalError, VisitResult};
