//! Pre-order traversal driver.
//!
//! The walk keeps an explicit stack of open nodes instead of recursing, so
//! the depth of the tree is bounded by memory rather than the call stack.

use std::ops::ControlFlow;

use tracing::{debug, trace};

use crate::NodeRef;

use super::visit::{NodeVisitor, VisitResult};

struct Frame<'t> {
    node: NodeRef<'t>,
    next_child: usize,
    descend: bool,
}

/// Walks the subtree rooted at `root` with `visitor`.
///
/// For each node `visit` is called first. If it continues, the children are
/// walked in order until one of them ends with `Break`. Then `end_visit` is
/// called, and its result decides whether the node's next sibling is walked.
///
/// # Returns
///
/// The `end_visit` result of `root`, or the first error raised by the visitor.
pub fn walk<V>(visitor: &mut V, root: NodeRef<'_>) -> VisitResult
where
    V: NodeVisitor + ?Sized,
{
    debug!(root = %root.id(), "traversal started");
    let descend = visitor.visit(root)?.is_continue();
    let mut stack = vec![Frame {
        node: root,
        next_child: 0,
        descend,
    }];

    while let Some(frame) = stack.last_mut() {
        let next = if frame.descend {
            frame.node.child(frame.next_child)
        } else {
            None
        };

        if let Some(child) = next {
            frame.next_child += 1;
            let descend = visitor.visit(child)?.is_continue();
            trace!(node = %child.id(), descend, "visited");
            stack.push(Frame {
                node: child,
                next_child: 0,
                descend,
            });
            continue;
        }

        let node = frame.node;
        stack.pop();
        let flow = visitor.end_visit(node)?;
        match stack.last_mut() {
            Some(parent) => {
                if flow.is_break() {
                    trace!(node = %node.id(), "remaining siblings skipped");
                    parent.descend = false;
                }
            }
            None => {
                debug!(root = %node.id(), stopped = flow.is_break(), "traversal finished");
                return Ok(flow);
            }
        }
    }

    Ok(ControlFlow::Continue(()))
}

impl NodeRef<'_> {
    /// Walks the subtree rooted at this node with `visitor`.
    ///
    /// See [`walk`] for the continuation rules.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the visitor; nothing after it is visited.
    #[inline]
    pub fn accept<V>(&self, visitor: &mut V) -> VisitResult
    where
        V: NodeVisitor + ?Sized,
    {
        walk(visitor, *self)
    }
}
