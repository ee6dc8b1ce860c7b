//! Node selection predicates.
//!
//! A [`NodeFilter`] decides whether a node is handed to the visitor wrapped
//! by a [`FilteringVisitor`](crate::FilteringVisitor). It never prunes the
//! traversal itself.
//!
//! Any `Fn(NodeRef<'_>) -> bool` closure is a filter. Fallible closures are
//! adapted with [`TryFilter`], and filters combine with [`AndFilter`].

use std::collections::HashSet;
use std::fmt;

use deptree_model::{NodeId, NodeRef, NodeState, PredicateError};

/// Predicate over dependency tree nodes.
pub trait NodeFilter {
    /// Returns whether `node` is accepted.
    ///
    /// # Errors
    ///
    /// A failing predicate aborts the traversal that evaluates it.
    fn accept(&self, node: NodeRef<'_>) -> Result<bool, PredicateError>;
}

impl<F> NodeFilter for F
where
    F: Fn(NodeRef<'_>) -> bool,
{
    #[inline]
    fn accept(&self, node: NodeRef<'_>) -> Result<bool, PredicateError> {
        Ok(self(node))
    }
}

/// Adapts a fallible closure into a [`NodeFilter`].
///
/// ```rust
/// use deptree_traversal::filter::{NodeFilter, TryFilter};
/// use deptree_model::{Artifact, DependencyNode, DependencyTree};
///
/// let filter = TryFilter(|node: deptree_model::NodeRef<'_>| {
///     node.artifact.scope.as_deref().map(|s| s != "test").ok_or("scope not resolved")
/// });
///
/// let tree = DependencyTree::new(DependencyNode::new(Artifact::new("g", "a", "1")));
/// assert!(filter.accept(tree.root()).is_err());
/// ```
#[derive(Clone, Copy)]
pub struct TryFilter<F>(pub F);

impl<F, E> NodeFilter for TryFilter<F>
where
    F: Fn(NodeRef<'_>) -> Result<bool, E>,
    E: Into<PredicateError>,
{
    fn accept(&self, node: NodeRef<'_>) -> Result<bool, PredicateError> {
        (self.0)(node).map_err(Into::into)
    }
}

impl<F> fmt::Debug for TryFilter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TryFilter").finish_non_exhaustive()
    }
}

/// Accepts nodes whose resolution state is one of a given set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateFilter {
    states: HashSet<NodeState>,
}

impl StateFilter {
    /// Creates a filter accepting the given states.
    pub fn new(states: impl IntoIterator<Item = NodeState>) -> Self {
        Self {
            states: states.into_iter().collect(),
        }
    }

    /// Accepts included nodes only.
    pub fn included() -> Self {
        Self::new([NodeState::Included])
    }
}

impl NodeFilter for StateFilter {
    fn accept(&self, node: NodeRef<'_>) -> Result<bool, PredicateError> {
        Ok(self.states.contains(&node.state()))
    }
}

/// Accepts a node that is one of the targets, or an ancestor of one.
///
/// Combined with a building visitor this keeps exactly the paths from the
/// root down to the targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorOrSelfFilter {
    targets: Vec<NodeId>,
}

impl AncestorOrSelfFilter {
    /// Creates a filter for the given target nodes.
    pub fn new(targets: impl IntoIterator<Item = NodeId>) -> Self {
        Self {
            targets: targets.into_iter().collect(),
        }
    }
}

impl NodeFilter for AncestorOrSelfFilter {
    fn accept(&self, node: NodeRef<'_>) -> Result<bool, PredicateError> {
        let tree = node.tree();
        Ok(self
            .targets
            .iter()
            .filter_map(|&target| tree.node(target))
            .any(|target| {
                std::iter::successors(Some(target), NodeRef::parent).any(|n| n.id() == node.id())
            }))
    }
}

/// Accepts a node only when every inner filter accepts it.
///
/// Inner filters are evaluated in order; evaluation stops at the first
/// rejection or error.
#[derive(Default)]
pub struct AndFilter {
    filters: Vec<Box<dyn NodeFilter>>,
}

impl AndFilter {
    /// Creates an empty filter, which accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an inner filter.
    pub fn with(mut self, filter: impl NodeFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }
}

impl NodeFilter for AndFilter {
    fn accept(&self, node: NodeRef<'_>) -> Result<bool, PredicateError> {
        for filter in &self.filters {
            if !filter.accept(node)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl fmt::Debug for AndFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AndFilter")
            .field("filters", &self.filters.len())
            .finish()
    }
}
