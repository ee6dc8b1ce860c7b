use std::io::Write;
use std::ops::ControlFlow;

use deptree_model::{NodeId, NodeRef, NodeVisitor, TraversalError, VisitResult};
use tracing::trace;

use crate::TreeTokens;

/// Writes a tree as an indented diagram, one node label per line.
///
/// ```text
/// org.example:app:jar:1.0
/// +- org.example:core:jar:2.0:compile
/// |  \- org.example:util:jar:2.0:compile
/// \- org.example:log:jar:1.2:runtime
/// ```
///
/// Sibling positions are tracked from the visit stream itself: every open
/// node keeps a count of its children not yet visited, and a node is drawn
/// as last when its parent's count drops to zero. When the stream skips
/// levels, as it does under a [`FilteringVisitor`](crate::FilteringVisitor)
/// that rejects an inner node, the position is read from the tree instead
/// with [`NodeRef::is_last`]. Each line continues the bars of the printed
/// ancestors, so the diagram nests by visited depth.
pub struct SerializingVisitor<W> {
    writer: W,
    tokens: TreeTokens,
    open: Vec<Frame>,
}

/// One visited node that has not ended yet.
#[derive(Debug, Clone, Copy)]
struct Frame {
    id: NodeId,
    /// Children not yet visited.
    remaining: usize,
    /// Drawn with the last-node connector.
    last: bool,
}

impl<W: Write> SerializingVisitor<W> {
    /// Creates a visitor drawing with [`TreeTokens::ASCII`].
    pub fn new(writer: W) -> Self {
        Self::with_tokens(writer, TreeTokens::ASCII)
    }

    /// Creates a visitor drawing with the given tokens.
    pub fn with_tokens(writer: W, tokens: TreeTokens) -> Self {
        Self {
            writer,
            tokens,
            open: Vec::new(),
        }
    }

    /// The tokens in use.
    #[inline]
    pub fn tokens(&self) -> &TreeTokens {
        &self.tokens
    }

    /// The underlying writer.
    #[inline]
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consumes the visitor, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Forgets any open nodes so the visitor can serve another traversal.
    pub fn reset(&mut self) {
        self.open.clear();
    }

    /// Decides whether `node` is drawn as last among its siblings.
    fn position(&mut self, node: NodeRef<'_>) -> Result<bool, TraversalError> {
        let Some(top) = self.open.last_mut() else {
            return Ok(true);
        };
        if node.parent().map(|parent| parent.id()) != Some(top.id) {
            trace!(node = %node.id(), "parent not visited, reading position from tree");
            return Ok(node.is_last());
        }
        top.remaining = top.remaining.checked_sub(1).ok_or_else(|| {
            TraversalError::structure(format!(
                "{} was visited after all children of its parent",
                node.artifact
            ))
        })?;
        Ok(top.remaining == 0)
    }

    fn indent(&self, last: bool) -> String {
        let mut line = String::new();
        if !self.open.is_empty() {
            // The first open node is the diagram root and draws no column.
            for frame in self.open.iter().skip(1) {
                line.push_str(self.tokens.fill(frame.last));
            }
            line.push_str(self.tokens.connector(last));
        }
        line
    }
}

impl<W: Write> NodeVisitor for SerializingVisitor<W> {
    fn visit(&mut self, node: NodeRef<'_>) -> VisitResult {
        let last = self.position(node)?;
        let mut line = self.indent(last);
        line.push_str(&node.node_string());
        line.push('\n');
        self.writer.write_all(line.as_bytes())?;
        trace!(depth = self.open.len(), "serialized {}", node.artifact);

        self.open.push(Frame {
            id: node.id(),
            remaining: node.child_count(),
            last,
        });
        Ok(ControlFlow::Continue(()))
    }

    fn end_visit(&mut self, node: NodeRef<'_>) -> VisitResult {
        if self.open.pop().is_none() {
            return Err(TraversalError::structure(format!(
                "end_visit of {} without a matching visit",
                node.artifact
            )));
        }
        if self.open.is_empty() {
            self.writer.flush()?;
        }
        Ok(ControlFlow::Continue(()))
    }
}

impl<W> std::fmt::Debug for SerializingVisitor<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerializingVisitor")
            .field("tokens", &self.tokens)
            .field("depth", &self.open.len())
            .finish_non_exhaustive()
    }
}
