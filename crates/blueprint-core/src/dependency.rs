//! Dependency items and Maven coordinates.

use serde::{Deserialize, Serialize};

use crate::property::VersionReference;

/// A dependency entry in the build descriptor.
///
/// `version: None` means the version is managed by an imported BOM. The
/// `bom` and `repository` fields link the dependency to the catalog entries
/// that supply its version management and hosting repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<VersionReference>,
    pub scope: DependencyScope,
    pub classifier: Option<String>,
    pub artifact_type: Option<String>,
    pub bom: Option<String>,
    pub repository: Option<String>,
}

impl Dependency {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: None,
            scope: DependencyScope::default(),
            classifier: None,
            artifact_type: None,
            bom: None,
            repository: None,
        }
    }

    pub fn with_version(mut self, version: VersionReference) -> Self {
        self.version = Some(version);
        self
    }

    pub fn with_scope(mut self, scope: DependencyScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    pub fn with_type(mut self, artifact_type: impl Into<String>) -> Self {
        self.artifact_type = Some(artifact_type.into());
        self
    }

    pub fn with_bom(mut self, bom: impl Into<String>) -> Self {
        self.bom = Some(bom.into());
        self
    }

    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = Some(repository.into());
        self
    }
}

/// Maven-compatible dependency scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyScope {
    Compile,
    CompileOnly,
    AnnotationProcessor,
    Provided,
    Runtime,
    Test,
}

impl Default for DependencyScope {
    fn default() -> Self {
        Self::Compile
    }
}

/// Maven coordinates parsed from a shorthand string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl Coordinate {
    /// Parse `"group:artifact:version"` into coordinates.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() == 3 && parts.iter().all(|p| !p.is_empty()) {
            Some(Self {
                group_id: parts[0].to_string(),
                artifact_id: parts[1].to_string(),
                version: parts[2].to_string(),
            })
        } else {
            None
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}
