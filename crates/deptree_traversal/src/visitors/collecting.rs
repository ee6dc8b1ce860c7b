use std::ops::ControlFlow;

use deptree_model::{DependencyTree, NodeId, NodeRef, NodeVisitor, VisitResult};

/// Collects every visited node in visit order.
///
/// After a full traversal the list is in pre-order: a parent precedes all of
/// its descendants and siblings keep their tree order. Nodes are recorded as
/// [`NodeId`]s of the visited tree; [`resolve`](Self::resolve) turns them
/// back into node references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectingVisitor {
    nodes: Vec<NodeId>,
}

impl CollectingVisitor {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// The collected nodes.
    #[inline]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Consumes the collector, returning the collected nodes.
    #[inline]
    pub fn into_nodes(self) -> Vec<NodeId> {
        self.nodes
    }

    /// Number of collected nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if nothing was collected.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks the collected nodes up in the tree they were collected from.
    ///
    /// Ids are plain arena indices and carry no tree identity. Ids that
    /// `tree` does not know, including nodes detached by an omission since
    /// collection, are skipped. Resolving against a different tree yields
    /// whatever nodes that tree holds at those indices.
    pub fn resolve<'t>(&self, tree: &'t DependencyTree) -> Vec<NodeRef<'t>> {
        self.nodes.iter().filter_map(|&id| tree.node(id)).collect()
    }

    /// Clears the collected nodes.
    pub fn reset(&mut self) {
        self.nodes.clear();
    }
}

impl NodeVisitor for CollectingVisitor {
    fn visit(&mut self, node: NodeRef<'_>) -> VisitResult {
        self.nodes.push(node.id());
        Ok(ControlFlow::Continue(()))
    }

    fn end_visit(&mut self, _node: NodeRef<'_>) -> VisitResult {
        Ok(ControlFlow::Continue(()))
    }
}
