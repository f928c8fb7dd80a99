//! Build plugin items.

use crate::property::VersionReference;

/// A build plugin with family-specific coordinates and an opaque
/// configuration payload the serializers copy through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugin {
    pub coordinate: PluginCoordinate,
    pub version: Option<VersionReference>,
    pub configuration: Vec<(String, String)>,
}

/// Plugin coordinates differ per build-system family: Maven plugins are
/// addressed by group/artifact, Gradle plugins by plugin id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginCoordinate {
    Maven {
        group_id: String,
        artifact_id: String,
    },
    Gradle {
        id: String,
    },
}

impl Plugin {
    pub fn maven(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            coordinate: PluginCoordinate::Maven {
                group_id: group_id.into(),
                artifact_id: artifact_id.into(),
            },
            version: None,
            configuration: Vec::new(),
        }
    }

    pub fn gradle(id: impl Into<String>) -> Self {
        Self {
            coordinate: PluginCoordinate::Gradle { id: id.into() },
            version: None,
            configuration: Vec::new(),
        }
    }

    pub fn with_version(mut self, version: VersionReference) -> Self {
        self.version = Some(version);
        self
    }

    pub fn with_configuration(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.configuration.push((key.into(), value.into()));
        self
    }
}
