//! Artifact identity.

use std::fmt;

use serde::{Deserialize, Serialize};

fn default_kind() -> String {
    "jar".to_string()
}

/// Coordinates of a resolved artifact.
///
/// Displayed as `group:artifact:type[:classifier]:version[:scope]`, where the
/// version range stands in for the version when no version was selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Artifact {
    /// Group identifier.
    pub group_id: String,

    /// Artifact identifier.
    pub artifact_id: String,

    /// Packaging type.
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,

    /// Optional classifier (e.g. `sources`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,

    /// Selected version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Requested version range, kept when no concrete version is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_range: Option<String>,

    /// Dependency scope (`compile`, `test`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl Artifact {
    /// Creates a `jar` artifact with a concrete version and no scope.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            kind: default_kind(),
            classifier: None,
            version: Some(version.into()),
            version_range: None,
            scope: None,
        }
    }

    /// Sets the scope.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Sets the packaging type.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Sets the classifier.
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    /// Replaces the version with a version range.
    pub fn with_version_range(mut self, range: impl Into<String>) -> Self {
        self.version = None;
        self.version_range = Some(range.into());
        self
    }

    /// Returns `group:artifact:type[:classifier]`.
    ///
    /// Artifacts sharing a conflict id are alternative versions of the same
    /// dependency.
    pub fn dependency_conflict_id(&self) -> String {
        let mut id = format!("{}:{}:{}", self.group_id, self.artifact_id, self.kind);
        if let Some(classifier) = &self.classifier {
            id.push(':');
            id.push_str(classifier);
        }
        id
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dependency_conflict_id())?;
        if let Some(version) = self.version.as_ref().or(self.version_range.as_ref()) {
            write!(f, ":{version}")?;
        }
        if let Some(scope) = &self.scope {
            write!(f, ":{scope}")?;
        }
        Ok(())
    }
}
