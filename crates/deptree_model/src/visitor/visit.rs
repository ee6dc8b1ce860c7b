//! Visitor trait for traversing dependency trees.

use std::ops::ControlFlow;

use crate::{NodeRef, TraversalError};

/// Result type for visitor callbacks.
///
/// - `Ok(ControlFlow::Continue(()))` - proceed (descend, or move on to the next sibling)
/// - `Ok(ControlFlow::Break(()))` - prune (skip children, or skip remaining siblings)
/// - `Err(_)` - abort the traversal
pub type VisitResult = Result<ControlFlow<()>, TraversalError>;

/// Visitor over the nodes of a [`DependencyTree`](crate::DependencyTree).
///
/// Visitor instances carry traversal-scoped state. Use a fresh instance, or
/// call the implementation's `reset`, for every traversal.
pub trait NodeVisitor {
    /// Called when a node is first reached.
    ///
    /// Returning `Break` skips the node's whole subtree; `end_visit` is
    /// still called for the node itself.
    fn visit(&mut self, node: NodeRef<'_>) -> VisitResult;

    /// Called after the node's visited children have been processed.
    ///
    /// Returning `Break` skips the node's remaining siblings and hands
    /// control back to the grandparent level.
    fn end_visit(&mut self, node: NodeRef<'_>) -> VisitResult;
}

impl<V: NodeVisitor + ?Sized> NodeVisitor for &mut V {
    #[inline]
    fn visit(&mut self, node: NodeRef<'_>) -> VisitResult {
        (**self).visit(node)
    }

    #[inline]
    fn end_visit(&mut self, node: NodeRef<'_>) -> VisitResult {
        (**self).end_visit(node)
    }
}

impl<V: NodeVisitor + ?Sized> NodeVisitor for Box<V> {
    #[inline]
    fn visit(&mut self, node: NodeRef<'_>) -> VisitResult {
        (**self).visit(node)
    }

    #[inline]
    fn end_visit(&mut self, node: NodeRef<'_>) -> VisitResult {
        (**self).end_visit(node)
    }
}
