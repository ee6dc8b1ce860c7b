//! Arena-backed dependency tree.
//!
//! Nodes live in a single vector owned by [`DependencyTree`] and refer to
//! each other through [`NodeId`] handles. A node keeps a back-reference to
//! its parent and an ordered list of children; child order is the insertion
//! order and never changes afterwards.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::{Artifact, DependencyNode, NodeError};

/// Handle to a node inside a [`DependencyTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the arena index of this node.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Slot {
    node: DependencyNode,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Cut off by an omission; unreachable through the public API.
    detached: bool,
}

/// A dependency tree rooted at a single node.
///
/// # Example
///
/// ```rust
/// use deptree_model::{Artifact, DependencyNode, DependencyTree};
///
/// let mut tree = DependencyTree::new(DependencyNode::new(Artifact::new("g", "app", "1.0")));
/// let root = tree.root().id();
/// let lib = tree.add_child(root, DependencyNode::new(Artifact::new("g", "lib", "2.0"))).unwrap();
///
/// assert_eq!(tree.root().child_count(), 1);
/// assert_eq!(tree.node(lib).and_then(|n| n.parent()).map(|p| p.id()), Some(root));
/// ```
#[derive(Debug, Clone)]
pub struct DependencyTree {
    slots: Vec<Slot>,
}

impl DependencyTree {
    /// Creates a tree holding only a root node.
    pub fn new(root: DependencyNode) -> Self {
        Self {
            slots: vec![Slot {
                node: root,
                parent: None,
                children: Vec::new(),
                detached: false,
            }],
        }
    }

    /// Returns the root node.
    #[inline]
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: NodeId(0),
        }
    }

    /// Returns the node with the given id.
    ///
    /// Nodes cut off by [`omit_for_conflict`](Self::omit_for_conflict) or
    /// [`omit_for_cycle`](Self::omit_for_cycle) are no longer part of the tree
    /// and yield `None`.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.slot(id).map(|_| NodeRef { tree: self, id })
    }

    /// Appends a new last child to `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::UnknownNode`] if `parent` is not part of this tree.
    pub fn add_child(&mut self, parent: NodeId, node: DependencyNode) -> Result<NodeId, NodeError> {
        let id = NodeId(self.slots.len());
        self.slot_mut(parent)?.children.push(id);
        self.slots.push(Slot {
            node,
            parent: Some(parent),
            children: Vec::new(),
            detached: false,
        });
        Ok(id)
    }

    /// Returns the payload of a node for in-place field updates.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::UnknownNode`] if `id` is not part of this tree.
    pub fn payload_mut(&mut self, id: NodeId) -> Result<&mut DependencyNode, NodeError> {
        Ok(&mut self.slot_mut(id)?.node)
    }

    /// Marks a node as losing a version conflict to `related` and detaches
    /// its children. Ids of the detached subtree become unknown to this tree.
    ///
    /// # Errors
    ///
    /// Fails if the node is not included, or if `related` has a different
    /// dependency conflict id.
    pub fn omit_for_conflict(&mut self, id: NodeId, related: Artifact) -> Result<(), NodeError> {
        self.slot_mut(id)?.node.omit_for_conflict(related)?;
        self.detach_children(id)
    }

    /// Marks a node as omitted for a cycle and detaches its children. Ids of
    /// the detached subtree become unknown to this tree.
    ///
    /// # Errors
    ///
    /// Fails if the node is not included.
    pub fn omit_for_cycle(&mut self, id: NodeId) -> Result<(), NodeError> {
        self.slot_mut(id)?.node.omit_for_cycle()?;
        self.detach_children(id)
    }

    /// Builds a tree from its nested document form.
    ///
    /// # Errors
    ///
    /// Fails if a node's related artifact does not match its state.
    pub fn from_document(document: &TreeDocument) -> Result<Self, NodeError> {
        let mut tree = Self::new(document.validated_node()?);
        let mut pending: Vec<(NodeId, &TreeDocument)> = vec![(NodeId(0), document)];
        while let Some((parent, doc)) = pending.pop() {
            for child in &doc.children {
                let id = tree.add_child(parent, child.validated_node()?)?;
                pending.push((id, child));
            }
        }
        Ok(tree)
    }

    fn slot(&self, id: NodeId) -> Option<&Slot> {
        self.slots.get(id.0).filter(|slot| !slot.detached)
    }

    fn slot_mut(&mut self, id: NodeId) -> Result<&mut Slot, NodeError> {
        self.slots
            .get_mut(id.0)
            .filter(|slot| !slot.detached)
            .ok_or(NodeError::UnknownNode(id.0))
    }

    fn detach_children(&mut self, id: NodeId) -> Result<(), NodeError> {
        let mut pending = std::mem::take(&mut self.slot_mut(id)?.children);
        while let Some(child) = pending.pop() {
            let slot = self.slot_mut(child)?;
            slot.parent = None;
            slot.detached = true;
            pending.extend(slot.children.drain(..));
        }
        Ok(())
    }
}

impl PartialEq for DependencyTree {
    /// Trees are equal when they have the same shape and equal payloads.
    fn eq(&self, other: &Self) -> bool {
        self.root().structurally_eq(other.root())
    }
}

impl Eq for DependencyTree {}

/// Borrowed view of one node in a [`DependencyTree`].
///
/// Dereferences to the node's [`DependencyNode`] payload.
#[derive(Clone, Copy)]
pub struct NodeRef<'t> {
    tree: &'t DependencyTree,
    id: NodeId,
}

impl<'t> NodeRef<'t> {
    /// Handle of this node.
    #[inline]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// The tree this node belongs to.
    #[inline]
    pub const fn tree(&self) -> &'t DependencyTree {
        self.tree
    }

    /// The node payload.
    #[inline]
    pub fn payload(&self) -> &'t DependencyNode {
        &self.slot().node
    }

    /// The enclosing node, or `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<NodeRef<'t>> {
        self.slot().parent.map(|id| self.with_id(id))
    }

    /// Children in their stable insertion order.
    pub fn children(self) -> impl DoubleEndedIterator<Item = NodeRef<'t>> + ExactSizeIterator {
        let tree = self.tree;
        self.slot()
            .children
            .iter()
            .map(move |&id| NodeRef { tree, id })
    }

    /// The `index`-th child.
    #[inline]
    pub fn child(&self, index: usize) -> Option<NodeRef<'t>> {
        self.slot().children.get(index).map(|&id| self.with_id(id))
    }

    /// Number of direct children.
    #[inline]
    pub fn child_count(&self) -> usize {
        self.slot().children.len()
    }

    /// Returns true if this node has children.
    #[inline]
    pub fn has_children(&self) -> bool {
        !self.slot().children.is_empty()
    }

    /// Number of ancestors between this node and the root.
    pub fn depth(&self) -> usize {
        std::iter::successors(self.parent(), NodeRef::parent).count()
    }

    /// Returns true if this node is the final child of its parent.
    ///
    /// The root is trivially last.
    pub fn is_last(&self) -> bool {
        match self.slot().parent.and_then(|p| self.tree.slot(p)) {
            Some(parent) => parent.children.last() == Some(&self.id),
            None => true,
        }
    }

    /// Total number of nodes in the subtree rooted here.
    pub fn node_count(&self) -> usize {
        self.preorder().count()
    }

    /// Iterates the subtree rooted here, parents before their descendants.
    pub fn preorder(&self) -> Preorder<'t> {
        Preorder { stack: vec![*self] }
    }

    /// Iterates the subtree rooted here, descendants before their parents.
    pub fn postorder(&self) -> Postorder<'t> {
        Postorder {
            stack: vec![(*self, false)],
        }
    }

    /// Returns this subtree in its nested document form.
    pub fn to_document(&self) -> TreeDocument {
        TreeDocument {
            node: self.payload().clone(),
            children: self.children().map(|child| child.to_document()).collect(),
        }
    }

    /// Compares shape and payloads of two subtrees.
    pub fn structurally_eq(&self, other: NodeRef<'_>) -> bool {
        let mut left = self.preorder();
        let mut right = other.preorder();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some(a), Some(b))
                    if a.payload() == b.payload() && a.child_count() == b.child_count() => {}
                _ => return false,
            }
        }
    }

    fn slot(&self) -> &'t Slot {
        // NodeRef is only handed out for ids that exist in the tree.
        &self.tree.slots[self.id.0]
    }

    #[inline]
    fn with_id(&self, id: NodeId) -> NodeRef<'t> {
        NodeRef {
            tree: self.tree,
            id,
        }
    }
}

impl Deref for NodeRef<'_> {
    type Target = DependencyNode;

    fn deref(&self) -> &Self::Target {
        &self.slot().node
    }
}

impl PartialEq for NodeRef<'_> {
    /// Two references are equal when they point at the same node of the same tree.
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("artifact", &self.artifact.to_string())
            .field("state", &self.state())
            .finish()
    }
}

/// Pre-order iterator over a subtree.
#[derive(Debug, Clone)]
pub struct Preorder<'t> {
    stack: Vec<NodeRef<'t>>,
}

impl<'t> Iterator for Preorder<'t> {
    type Item = NodeRef<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().rev());
        Some(node)
    }
}

/// Post-order iterator over a subtree.
#[derive(Debug, Clone)]
pub struct Postorder<'t> {
    stack: Vec<(NodeRef<'t>, bool)>,
}

impl<'t> Iterator for Postorder<'t> {
    type Item = NodeRef<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, expanded) = self.stack.pop()?;
            if expanded {
                return Some(node);
            }
            self.stack.push((node, true));
            self.stack
                .extend(node.children().rev().map(|child| (child, false)));
        }
    }
}

/// Nested, serde-friendly form of a dependency tree.
///
/// ```json
/// {
///   "artifact": { "group_id": "g", "artifact_id": "app", "version": "1.0" },
///   "children": [
///     { "artifact": { "group_id": "g", "artifact_id": "lib", "version": "2.0" } }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeDocument {
    /// Payload of this node.
    #[serde(flatten)]
    pub node: DependencyNode,

    /// Child documents in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeDocument>,
}

impl TreeDocument {
    fn validated_node(&self) -> Result<DependencyNode, NodeError> {
        let state = self.node.state();
        match (state.requires_related_artifact(), self.node.related_artifact().is_some()) {
            (true, false) => Err(NodeError::MissingRelatedArtifact(state)),
            (false, true) => Err(NodeError::UnexpectedRelatedArtifact(state)),
            _ => Ok(self.node.clone()),
        }
    }
}
