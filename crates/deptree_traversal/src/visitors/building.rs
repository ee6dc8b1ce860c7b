use std::ops::ControlFlow;

use deptree_model::{DependencyTree, NodeId, NodeRef, NodeVisitor, TraversalError, VisitResult};
use tracing::{debug, warn};

/// Clones every visited node into a new, independent tree.
///
/// Each visited node becomes the last child of the nearest visited ancestor,
/// so wrapping this visitor in a [`FilteringVisitor`](crate::FilteringVisitor)
/// yields a pruned copy. The visitor itself never prunes.
///
/// When a downstream visitor is configured it walks the new tree once the
/// copy is complete, that is when the `end_visit` of the first visited node
/// closes the last open frame. It never observes a partially built tree.
///
/// # Example
///
/// ```rust
/// use deptree_model::{Artifact, DependencyNode, DependencyTree};
/// use deptree_traversal::{BuildingVisitor, CollectingVisitor};
///
/// let mut tree = DependencyTree::new(DependencyNode::new(Artifact::new("g", "app", "1")));
/// let root = tree.root().id();
/// tree.add_child(root, DependencyNode::new(Artifact::new("g", "lib", "1"))).unwrap();
///
/// let mut builder = BuildingVisitor::with_downstream(CollectingVisitor::new());
/// tree.root().accept(&mut builder).unwrap();
///
/// assert_eq!(builder.tree(), Some(&tree));
/// assert_eq!(builder.downstream().map(|c| c.len()), Some(2));
/// ```
#[derive(Debug)]
pub struct BuildingVisitor<D = Box<dyn NodeVisitor>> {
    downstream: Option<D>,
    parents: Vec<NodeId>,
    tree: Option<DependencyTree>,
}

impl BuildingVisitor {
    /// Creates a builder without a downstream visitor.
    pub fn new() -> Self {
        Self {
            downstream: None,
            parents: Vec::new(),
            tree: None,
        }
    }
}

impl Default for BuildingVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: NodeVisitor> BuildingVisitor<D> {
    /// Creates a builder that walks the finished tree with `downstream`.
    pub fn with_downstream(downstream: D) -> Self {
        Self {
            downstream: Some(downstream),
            parents: Vec::new(),
            tree: None,
        }
    }

    /// The built tree, once at least one node has been visited.
    #[inline]
    pub fn tree(&self) -> Option<&DependencyTree> {
        self.tree.as_ref()
    }

    /// Consumes the builder, returning the built tree.
    pub fn into_tree(self) -> Option<DependencyTree> {
        self.tree
    }

    /// The downstream visitor.
    #[inline]
    pub fn downstream(&self) -> Option<&D> {
        self.downstream.as_ref()
    }

    /// The downstream visitor, mutably.
    #[inline]
    pub fn downstream_mut(&mut self) -> Option<&mut D> {
        self.downstream.as_mut()
    }

    /// Consumes the builder, returning the built tree and the downstream visitor.
    pub fn into_parts(self) -> (Option<DependencyTree>, Option<D>) {
        (self.tree, self.downstream)
    }

    /// Discards the built tree so the builder can serve another traversal.
    ///
    /// The downstream visitor keeps its own state.
    pub fn reset(&mut self) {
        self.parents.clear();
        self.tree = None;
    }
}

impl<D: NodeVisitor> NodeVisitor for BuildingVisitor<D> {
    fn visit(&mut self, node: NodeRef<'_>) -> VisitResult {
        let copy = node.payload().clone();
        let id = match (self.parents.last(), self.tree.as_mut()) {
            (Some(&parent), Some(tree)) => tree.add_child(parent, copy)?,
            (Some(_), None) => {
                return Err(TraversalError::structure("open parent frame without a tree"));
            }
            (None, previous) => {
                if previous.is_some() {
                    warn!(
                        "Building visitor started a new tree at {}; previous tree discarded",
                        node.artifact
                    );
                }
                let tree = DependencyTree::new(copy);
                let root = tree.root().id();
                self.tree = Some(tree);
                root
            }
        };
        self.parents.push(id);
        Ok(ControlFlow::Continue(()))
    }

    fn end_visit(&mut self, node: NodeRef<'_>) -> VisitResult {
        if self.parents.pop().is_none() {
            return Err(TraversalError::structure(format!(
                "end_visit of {} without a matching visit",
                node.artifact
            )));
        }

        if self.parents.is_empty() {
            if let (Some(tree), Some(downstream)) = (self.tree.as_ref(), self.downstream.as_mut()) {
                debug!(
                    "Built tree of {} nodes, running downstream visitor",
                    tree.root().node_count()
                );
                tree.root().accept(downstream)?;
            }
        }
        Ok(ControlFlow::Continue(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CollectingVisitor, FilteringVisitor};
    use deptree_model::{Artifact, DependencyNode, NodeState};
    use pretty_assertions::assert_eq;

    /// R -> A -> [A1, A2 (duplicate)], R -> B
    fn tree() -> DependencyTree {
        let mut tree = DependencyTree::new(DependencyNode::new(Artifact::new("g", "R", "1")));
        let root = tree.root().id();
        let a = tree
            .add_child(root, DependencyNode::new(Artifact::new("g", "A", "1")))
            .unwrap();
        let mut a1 = DependencyNode::new(Artifact::new("g", "A1", "1").with_scope("compile"));
        a1.premanaged_version = Some("0.9".to_string());
        a1.original_scope = Some("test".to_string());
        tree.add_child(a, a1).unwrap();
        let duplicate = DependencyNode::with_state(
            Artifact::new("g", "A2", "1"),
            NodeState::OmittedForDuplicate,
            Some(Artifact::new("g", "A2", "1")),
        )
        .unwrap();
        tree.add_child(a, duplicate).unwrap();
        tree.add_child(root, DependencyNode::new(Artifact::new("g", "B", "1")))
            .unwrap();
        tree
    }

    fn names(tree: &DependencyTree) -> Vec<String> {
        tree.root()
            .preorder()
            .map(|n| n.artifact.artifact_id.clone())
            .collect()
    }

    #[test]
    fn test_builds_identical_copy() {
        let source = tree();
        let mut builder = BuildingVisitor::new();
        source.root().accept(&mut builder).unwrap();

        let copy = builder.into_tree().unwrap();
        assert_eq!(copy, source);
        let a2 = copy.root().child(0).and_then(|a| a.child(1)).unwrap();
        assert_eq!(a2.state(), NodeState::OmittedForDuplicate);
        assert_eq!(a2.related_artifact(), Some(&Artifact::new("g", "A2", "1")));
    }

    #[test]
    fn test_copy_is_independent() {
        let source = tree();
        let mut builder = BuildingVisitor::new();
        source.root().accept(&mut builder).unwrap();
        let mut copy = builder.into_tree().unwrap();

        let a1 = copy.root().child(0).and_then(|a| a.child(0)).unwrap().id();
        copy.payload_mut(a1).unwrap().premanaged_version = None;
        copy.add_child(a1, DependencyNode::new(Artifact::new("g", "X", "1")))
            .unwrap();

        let original = source.root().child(0).and_then(|a| a.child(0)).unwrap();
        assert_eq!(original.premanaged_version.as_deref(), Some("0.9"));
        assert!(!original.has_children());
        assert_ne!(copy, source);
    }

    #[test]
    fn test_filtered_build_attaches_to_nearest_accepted_ancestor() {
        let source = tree();
        let filter = |node: NodeRef<'_>| node.artifact.artifact_id != "A";
        let mut visitor = FilteringVisitor::new(BuildingVisitor::new(), filter);
        source.root().accept(&mut visitor).unwrap();

        let copy = visitor.into_inner().into_tree().unwrap();
        assert_eq!(names(&copy), vec!["R", "A1", "A2", "B"]);
        assert_eq!(copy.root().child_count(), 3);
    }

    #[test]
    fn test_downstream_runs_once_on_complete_tree() {
        /// Records the size of the tree it is walked over.
        #[derive(Default)]
        struct Observer {
            runs: Vec<usize>,
        }

        impl NodeVisitor for Observer {
            fn visit(&mut self, node: NodeRef<'_>) -> VisitResult {
                if node.parent().is_none() {
                    self.runs.push(node.node_count());
                }
                Ok(ControlFlow::Continue(()))
            }

            fn end_visit(&mut self, _node: NodeRef<'_>) -> VisitResult {
                Ok(ControlFlow::Continue(()))
            }
        }

        let source = tree();
        let mut builder = BuildingVisitor::with_downstream(Observer::default());
        source.root().accept(&mut builder).unwrap();

        assert_eq!(builder.downstream().unwrap().runs, vec![5]);
    }

    #[test]
    fn test_downstream_collects_built_tree() {
        let source = tree();
        let mut builder = BuildingVisitor::with_downstream(CollectingVisitor::new());
        source.root().accept(&mut builder).unwrap();

        let (copy, collector) = builder.into_parts();
        let copy = copy.unwrap();
        let collected: Vec<_> = collector
            .unwrap()
            .resolve(&copy)
            .iter()
            .map(|n| n.artifact.artifact_id.clone())
            .collect();
        assert_eq!(collected, names(&source));
    }

    #[test]
    fn test_end_visit_without_visit_is_structure_error() {
        let source = tree();
        let mut builder = BuildingVisitor::new();
        let err = builder.end_visit(source.root()).unwrap_err();
        assert!(matches!(err, TraversalError::Structure(_)));
    }

    #[test]
    fn test_reset_allows_reuse() {
        let source = tree();
        let mut builder = BuildingVisitor::new();
        source.root().accept(&mut builder).unwrap();
        builder.reset();
        assert!(builder.tree().is_none());

        source.root().child(0).unwrap().accept(&mut builder).unwrap();
        assert_eq!(names(builder.tree().unwrap()), vec!["A", "A1", "A2"]);
    }
}
