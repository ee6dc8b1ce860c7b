//! One-call rendering of a tree into a string or writer.

use std::io::Write;

use deptree_model::{NodeRef, TraversalError};
use tracing::debug;

use crate::{RenderConfig, SerializingVisitor, TreeTokens};

/// Draws the subtree rooted at `root` into `writer`.
///
/// # Errors
///
/// Fails fast on the first write error; lines already written stay written.
pub fn render_to<W: Write>(
    root: NodeRef<'_>,
    tokens: TreeTokens,
    writer: W,
) -> Result<W, TraversalError> {
    let mut visitor = SerializingVisitor::with_tokens(writer, tokens);
    root.accept(&mut visitor)?;
    Ok(visitor.into_inner())
}

/// Draws the subtree rooted at `root` into a string.
///
/// ```rust
/// use deptree_model::{Artifact, DependencyNode, DependencyTree};
/// use deptree_traversal::{TreeTokens, render};
///
/// let mut tree = DependencyTree::new(DependencyNode::new(Artifact::new("g", "app", "1")));
/// let root = tree.root().id();
/// tree.add_child(root, DependencyNode::new(Artifact::new("g", "lib", "2"))).unwrap();
///
/// assert_eq!(render(tree.root(), TreeTokens::ASCII).unwrap(), "g:app:jar:1\n\\- g:lib:jar:2\n");
/// ```
///
/// # Errors
///
/// Only structural violations of the tree can fail an in-memory render.
pub fn render(root: NodeRef<'_>, tokens: TreeTokens) -> Result<String, TraversalError> {
    let bytes = render_to(root, tokens, Vec::new())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Draws the subtree rooted at `root` with the tokens selected by `config`.
///
/// # Errors
///
/// See [`render`].
pub fn render_with_config(
    root: NodeRef<'_>,
    config: &RenderConfig,
) -> Result<String, TraversalError> {
    debug!(
        "Rendering {} nodes with {} tokens",
        root.node_count(),
        config.style_name()
    );
    render(root, config.tokens())
}
