//! DependencyNode definition.
//!
//! The payload carried by every vertex of a dependency tree: the artifact,
//! how the resolver treated it, and the overrides it recorded along the way.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Artifact, NodeError};

/// How the resolver treated a node's artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    /// The artifact is part of the resolved set.
    #[default]
    Included,
    /// Another node with the same version was kept instead.
    OmittedForDuplicate,
    /// Another node with a different version was kept instead.
    OmittedForConflict,
    /// Including the artifact would have introduced a cycle.
    OmittedForCycle,
}

impl NodeState {
    /// Returns true for the two states that record the artifact that won.
    #[inline]
    pub const fn requires_related_artifact(&self) -> bool {
        matches!(self, Self::OmittedForDuplicate | Self::OmittedForConflict)
    }

    /// Returns true if the node is part of the resolved set.
    #[inline]
    pub const fn is_included(&self) -> bool {
        matches!(self, Self::Included)
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Included => "included",
            Self::OmittedForDuplicate => "omitted for duplicate",
            Self::OmittedForConflict => "omitted for conflict",
            Self::OmittedForCycle => "omitted for cycle",
        };
        f.write_str(name)
    }
}

/// Payload of one dependency tree vertex.
///
/// The scope and version overrides are recorded by the resolver and copied
/// verbatim by every visitor that clones a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyNode {
    /// The artifact this node stands for.
    pub artifact: Artifact,

    /// Resolution state.
    #[serde(default)]
    pub(crate) state: NodeState,

    /// The artifact kept in place of this one, for omitted duplicates and conflicts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) related_artifact: Option<Artifact>,

    /// Scope before it was widened by a nearer declaration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_scope: Option<String>,

    /// Scope the current POM tried and failed to impose.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_update_scope: Option<String>,

    /// Version before dependency management replaced it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premanaged_version: Option<String>,

    /// Scope before dependency management replaced it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premanaged_scope: Option<String>,

    /// Range the selected version was picked from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_selected_from_range: Option<String>,

    /// Versions that were available when selecting from a range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_versions: Option<Vec<String>>,
}

impl DependencyNode {
    /// Creates an included node for the artifact.
    pub fn new(artifact: Artifact) -> Self {
        Self {
            artifact,
            state: NodeState::Included,
            related_artifact: None,
            original_scope: None,
            failed_update_scope: None,
            premanaged_version: None,
            premanaged_scope: None,
            version_selected_from_range: None,
            available_versions: None,
        }
    }

    /// Creates a node in the given state.
    ///
    /// # Errors
    ///
    /// A related artifact must be supplied for the omitted-for-duplicate and
    /// omitted-for-conflict states, and must be absent for every other state.
    pub fn with_state(
        artifact: Artifact,
        state: NodeState,
        related_artifact: Option<Artifact>,
    ) -> Result<Self, NodeError> {
        match (state.requires_related_artifact(), related_artifact.is_some()) {
            (true, false) => return Err(NodeError::MissingRelatedArtifact(state)),
            (false, true) => return Err(NodeError::UnexpectedRelatedArtifact(state)),
            _ => {}
        }
        Ok(Self {
            state,
            related_artifact,
            ..Self::new(artifact)
        })
    }

    /// Resolution state.
    #[inline]
    pub const fn state(&self) -> NodeState {
        self.state
    }

    /// The artifact that replaced this one, if any.
    #[inline]
    pub const fn related_artifact(&self) -> Option<&Artifact> {
        self.related_artifact.as_ref()
    }

    /// Marks this node as losing to `related`.
    ///
    /// Becomes omitted-for-duplicate when both artifacts carry the same
    /// version (or the same range when neither has a version), otherwise
    /// omitted-for-conflict.
    pub(crate) fn omit_for_conflict(&mut self, related: Artifact) -> Result<(), NodeError> {
        if !self.state.is_included() {
            return Err(NodeError::InvalidTransition {
                action: "omitted for conflict",
                state: self.state,
            });
        }
        if related.dependency_conflict_id() != self.artifact.dependency_conflict_id() {
            return Err(NodeError::ConflictIdMismatch {
                artifact: self.artifact.to_string(),
                related: related.to_string(),
            });
        }

        let duplicate = match (&self.artifact.version, &self.artifact.version_range) {
            (Some(version), _) => related.version.as_ref() == Some(version),
            (None, Some(range)) => related.version_range.as_ref() == Some(range),
            (None, None) => return Err(NodeError::MissingVersion(self.artifact.to_string())),
        };

        self.state = if duplicate {
            NodeState::OmittedForDuplicate
        } else {
            NodeState::OmittedForConflict
        };
        self.related_artifact = Some(related);
        Ok(())
    }

    pub(crate) fn omit_for_cycle(&mut self) -> Result<(), NodeError> {
        if !self.state.is_included() {
            return Err(NodeError::InvalidTransition {
                action: "omitted for cycle",
                state: self.state,
            });
        }
        self.state = NodeState::OmittedForCycle;
        Ok(())
    }

    /// Returns the one-line label of this node.
    ///
    /// ```rust
    /// use deptree_model::{Artifact, DependencyNode};
    ///
    /// let mut node = DependencyNode::new(Artifact::new("g", "a", "2.0").with_scope("compile"));
    /// node.premanaged_version = Some("1.0".to_string());
    /// assert_eq!(node.node_string(), "g:a:jar:2.0:compile (version managed from 1.0)");
    /// ```
    pub fn node_string(&self) -> String {
        let included = self.state.is_included();
        let mut label = String::new();
        if !included {
            label.push('(');
        }
        label.push_str(&self.artifact.to_string());

        let mut notes = Vec::new();
        if let Some(version) = &self.premanaged_version {
            notes.push(format!("version managed from {version}"));
        }
        if let Some(scope) = &self.premanaged_scope {
            notes.push(format!("scope managed from {scope}"));
        }
        if let Some(scope) = &self.original_scope {
            notes.push(format!("scope updated from {scope}"));
        }
        if let Some(scope) = &self.failed_update_scope {
            notes.push(format!("scope not updated to {scope}"));
        }
        if let Some(range) = &self.version_selected_from_range {
            notes.push(format!("version selected from range {range}"));
            let available = self.available_versions.as_deref().unwrap_or_default();
            notes.push(format!("available versions [{}]", available.join(", ")));
        }
        match self.state {
            NodeState::Included => {}
            NodeState::OmittedForDuplicate => notes.push("omitted for duplicate".to_string()),
            NodeState::OmittedForConflict => {
                let version = self
                    .related_artifact
                    .as_ref()
                    .and_then(|related| related.version.as_deref())
                    .unwrap_or_default();
                notes.push(format!("omitted for conflict with {version}"));
            }
            NodeState::OmittedForCycle => notes.push("omitted for cycle".to_string()),
        }

        if !notes.is_empty() {
            let joined = notes.join("; ");
            if included {
                label.push_str(" (");
                label.push_str(&joined);
                label.push(')');
            } else {
                label.push_str(" - ");
                label.push_str(&joined);
            }
        }

        if !included {
            label.push(')');
        }
        label
    }
}

impl fmt::Display for DependencyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.node_string())
    }
}
