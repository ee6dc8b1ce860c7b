//! Error types for the dependency tree model.

use thiserror::Error;

use crate::NodeState;

/// Boxed error produced by a caller-supplied predicate.
pub type PredicateError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised when building or mutating a dependency tree.
#[derive(Debug, Error)]
pub enum NodeError {
    /// The state records an omission that needs the artifact that won.
    #[error("related artifact is required for state {0}")]
    MissingRelatedArtifact(NodeState),

    /// A related artifact was supplied for a state that does not carry one.
    #[error("related artifact is only allowed for omitted-for-duplicate and omitted-for-conflict states, not {0}")]
    UnexpectedRelatedArtifact(NodeState),

    /// Only included nodes may be omitted.
    #[error("only included nodes can be {action}, node is {state}")]
    InvalidTransition {
        /// The omission that was attempted.
        action: &'static str,
        /// The state the node was in.
        state: NodeState,
    },

    /// The related artifact is not an alternative version of the node's artifact.
    #[error("related artifact {related} has a different dependency conflict id than {artifact}")]
    ConflictIdMismatch {
        /// The node's own artifact.
        artifact: String,
        /// The offered related artifact.
        related: String,
    },

    /// Neither a version nor a version range is known for an artifact.
    #[error("artifact version and version range are both missing: {0}")]
    MissingVersion(String),

    /// The node id does not belong to this tree.
    #[error("unknown node id {0}")]
    UnknownNode(usize),
}

/// Errors that abort a traversal.
#[derive(Debug, Error)]
pub enum TraversalError {
    /// Writing to the output sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A node filter failed while evaluating a node.
    #[error("predicate failed on {artifact}: {source}")]
    Predicate {
        /// Display form of the artifact being evaluated.
        artifact: String,
        /// The predicate's own error.
        #[source]
        source: PredicateError,
    },

    /// The visit stream did not match the shape of the tree.
    #[error("structure error: {0}")]
    Structure(String),

    /// A node could not be created or attached.
    #[error(transparent)]
    Node(#[from] NodeError),
}

impl TraversalError {
    /// Creates a predicate error attributed to the given artifact.
    pub fn predicate(artifact: impl Into<String>, source: impl Into<PredicateError>) -> Self {
        Self::Predicate {
            artifact: artifact.into(),
            source: source.into(),
        }
    }

    /// Creates a structure error.
    pub fn structure(message: impl Into<String>) -> Self {
        Self::Structure(message.into())
    }
}
