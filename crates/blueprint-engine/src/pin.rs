//! Release-train version pinning through an external resolver.

use std::collections::HashMap;

use blueprint_core::build::Build;
use blueprint_core::dependency::Coordinate;
use blueprint_core::help::HelpDocument;
use blueprint_core::property::{VersionProperty, VersionReference};
use blueprint_core::selection::FeatureSelection;
use blueprint_util::errors::BlueprintError;

use crate::customizer::BuildCustomizer;
use crate::dispatch;
use crate::ordering;

/// Resolves the version a release-train BOM manages for a target artifact.
///
/// Implementations may sit on network I/O; they must carry their own
/// client-side timeout and answer `None` rather than block or fail, and
/// they are never invoked under an engine-level lock (the engine holds
/// none).
pub trait ManagedVersionResolver {
    fn resolve_managed_version(
        &self,
        bom: &Coordinate,
        target_group: &str,
        target_artifact: &str,
    ) -> Option<String>;
}

/// Where a resolved pin is written.
pub enum PinTarget {
    /// A build property, named per build-system family.
    Property(VersionProperty),
    /// The version of an already-registered plugin.
    Plugin { id: String },
}

/// Customizer that pins one plugin or property version from a release
/// train. A miss is logged and skipped; generation never fails because an
/// optional pin is unavailable.
pub struct ManagedVersionPin<R> {
    name: String,
    resolver: R,
    bom: Coordinate,
    target_group: String,
    target_artifact: String,
    target: PinTarget,
    feature_gate: Option<String>,
}

impl<R: ManagedVersionResolver> ManagedVersionPin<R> {
    pub fn new(
        name: impl Into<String>,
        resolver: R,
        bom: Coordinate,
        target_group: impl Into<String>,
        target_artifact: impl Into<String>,
        target: PinTarget,
    ) -> Self {
        Self {
            name: name.into(),
            resolver,
            bom,
            target_group: target_group.into(),
            target_artifact: target_artifact.into(),
            target,
            feature_gate: None,
        }
    }

    /// Only pin when the given feature is selected.
    pub fn when_feature(mut self, id: impl Into<String>) -> Self {
        self.feature_gate = Some(id.into());
        self
    }
}

impl<R: ManagedVersionResolver> BuildCustomizer for ManagedVersionPin<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn order(&self) -> i32 {
        // Pins apply to plugins/properties added by earlier slots.
        ordering::LATE
    }

    fn applies(&self, selection: &FeatureSelection) -> bool {
        match &self.feature_gate {
            Some(id) => selection.has_feature(id),
            None => true,
        }
    }

    fn customize(
        &self,
        build: &mut Build,
        _docs: &mut HelpDocument,
        _selection: &FeatureSelection,
    ) -> Result<(), BlueprintError> {
        let resolved = self.resolver.resolve_managed_version(
            &self.bom,
            &self.target_group,
            &self.target_artifact,
        );
        let Some(version) = resolved else {
            tracing::warn!(
                "no managed version for {}:{} in {}; pin '{}' skipped",
                self.target_group,
                self.target_artifact,
                self.bom,
                self.name
            );
            return Ok(());
        };

        match &self.target {
            PinTarget::Property(property) => {
                let name = dispatch::version_property_name(build.build_system(), property);
                build.set_property(name, version);
            }
            PinTarget::Plugin { id } => match build.plugins_mut().get_mut(id) {
                Some(plugin) => plugin.version = Some(VersionReference::literal(version)),
                None => {
                    tracing::warn!("pin '{}' targets unregistered plugin '{id}'", self.name);
                }
            },
        }
        Ok(())
    }
}

/// Map-backed resolver for tests and offline deployments.
#[derive(Debug, Clone, Default)]
pub struct FixedVersionResolver {
    entries: HashMap<(String, String), String>,
}

impl FixedVersionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(
        mut self,
        target_group: impl Into<String>,
        target_artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        self.entries
            .insert((target_group.into(), target_artifact.into()), version.into());
        self
    }
}

impl ManagedVersionResolver for FixedVersionResolver {
    fn resolve_managed_version(
        &self,
        _bom: &Coordinate,
        target_group: &str,
        target_artifact: &str,
    ) -> Option<String> {
        self.entries
            .get(&(target_group.to_string(), target_artifact.to_string()))
            .cloned()
    }
}
