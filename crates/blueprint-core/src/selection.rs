//! The immutable per-request feature selection.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use blueprint_version::Version;

/// What the user asked for: feature ids, target platform version, build
/// system, and source language. Immutable for the lifetime of a request;
/// every transformation condition is evaluated against this, never against
/// intermediate descriptor state.
#[derive(Debug, Clone)]
pub struct FeatureSelection {
    features: BTreeSet<String>,
    platform_version: Version,
    build_system: BuildSystem,
    language: String,
}

impl FeatureSelection {
    pub fn new<I, S>(
        features: I,
        platform_version: Version,
        build_system: BuildSystem,
        language: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            features: features.into_iter().map(Into::into).collect(),
            platform_version,
            build_system,
            language: language.into(),
        }
    }

    pub fn has_feature(&self, id: &str) -> bool {
        self.features.contains(id)
    }

    /// Selected feature ids in a stable (sorted) order.
    pub fn features(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(String::as_str)
    }

    pub fn platform_version(&self) -> &Version {
        &self.platform_version
    }

    pub fn build_system(&self) -> BuildSystem {
        self.build_system
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

/// The build system of the generated project. A closed variant: every
/// family-specific decision goes through an exhaustive match, so adding a
/// kind is a compile error until each dispatch site is updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildSystem {
    Maven,
    GradleGroovy,
    GradleKotlin,
}

/// The build-system family, for decisions shared by both Gradle dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildFamily {
    Maven,
    Gradle,
}

impl BuildSystem {
    pub fn family(self) -> BuildFamily {
        match self {
            BuildSystem::Maven => BuildFamily::Maven,
            BuildSystem::GradleGroovy | BuildSystem::GradleKotlin => BuildFamily::Gradle,
        }
    }
}
