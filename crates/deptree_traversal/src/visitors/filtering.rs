use std::ops::ControlFlow;

use deptree_model::{NodeRef, NodeVisitor, TraversalError, VisitResult};

use crate::filter::NodeFilter;

/// Hands only the nodes accepted by a filter to an inner visitor.
///
/// A rejected node is skipped by the inner visitor but not pruned: its
/// descendants are still traversed and may be accepted. Pruning happens only
/// when the inner visitor itself returns `Break` for an accepted node.
///
/// # Example
///
/// ```rust
/// use deptree_model::{Artifact, DependencyNode, DependencyTree, NodeRef};
/// use deptree_traversal::{CollectingVisitor, FilteringVisitor};
///
/// let mut tree = DependencyTree::new(DependencyNode::new(Artifact::new("g", "app", "1")));
/// let root = tree.root().id();
/// let lib = tree.add_child(root, DependencyNode::new(Artifact::new("g", "lib", "1"))).unwrap();
/// tree.add_child(lib, DependencyNode::new(Artifact::new("g", "app-util", "1"))).unwrap();
///
/// let filter = |node: NodeRef<'_>| node.artifact.artifact_id.starts_with("app");
/// let mut visitor = FilteringVisitor::new(CollectingVisitor::new(), filter);
/// tree.root().accept(&mut visitor).unwrap();
///
/// // `lib` is rejected, yet its child is still reached.
/// assert_eq!(visitor.inner().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct FilteringVisitor<V, F> {
    inner: V,
    filter: F,
}

impl<V, F> FilteringVisitor<V, F>
where
    V: NodeVisitor,
    F: NodeFilter,
{
    /// Wraps `inner`, delegating only the nodes `filter` accepts.
    pub fn new(inner: V, filter: F) -> Self {
        Self { inner, filter }
    }

    /// The wrapped visitor.
    #[inline]
    pub fn inner(&self) -> &V {
        &self.inner
    }

    /// The wrapped visitor, mutably.
    #[inline]
    pub fn inner_mut(&mut self) -> &mut V {
        &mut self.inner
    }

    /// The filter.
    #[inline]
    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// Consumes the decorator, returning the wrapped visitor.
    pub fn into_inner(self) -> V {
        self.inner
    }

    fn accepts(&self, node: NodeRef<'_>) -> Result<bool, TraversalError> {
        self.filter
            .accept(node)
            .map_err(|source| TraversalError::predicate(node.artifact.to_string(), source))
    }
}

impl<V, F> NodeVisitor for FilteringVisitor<V, F>
where
    V: NodeVisitor,
    F: NodeFilter,
{
    fn visit(&mut self, node: NodeRef<'_>) -> VisitResult {
        if self.accepts(node)? {
            self.inner.visit(node)
        } else {
            Ok(ControlFlow::Continue(()))
        }
    }

    fn end_visit(&mut self, node: NodeRef<'_>) -> VisitResult {
        if self.accepts(node)? {
            self.inner.end_visit(node)
        } else {
            Ok(ControlFlow::Continue(()))
        }
    }
}
