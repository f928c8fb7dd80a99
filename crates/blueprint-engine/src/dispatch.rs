//! Per-build-system dispatch, declared as exhaustive match tables over the
//! closed `BuildSystem` variant. Adding a build system fails to compile
//! until every table row here is supplied.

use blueprint_core::plugin::Plugin;
use blueprint_core::property::{VersionProperty, VersionReference};
use blueprint_core::selection::{BuildFamily, BuildSystem};

/// The property name a version property takes in this build system's file:
/// canonical dotted form for Maven, camel-case for Gradle ext blocks.
pub fn version_property_name(build_system: BuildSystem, property: &VersionProperty) -> String {
    match build_system.family() {
        BuildFamily::Maven => property.standard_format().to_string(),
        BuildFamily::Gradle => property.camel_case_format(),
    }
}

/// Build the family-appropriate plugin item for a tool published both as a
/// Maven plugin and a Gradle plugin.
pub fn standard_plugin(
    build_system: BuildSystem,
    maven_group: &str,
    maven_artifact: &str,
    gradle_id: &str,
    version: Option<VersionReference>,
) -> Plugin {
    let plugin = match build_system {
        BuildSystem::Maven => Plugin::maven(maven_group, maven_artifact),
        BuildSystem::GradleGroovy | BuildSystem::GradleKotlin => Plugin::gradle(gradle_id),
    };
    match version {
        Some(version) => plugin.with_version(version),
        None => plugin,
    }
}

/// Whether the serializer collaborators will emit the Kotlin DSL dialect.
pub fn uses_kotlin_dsl(build_system: BuildSystem) -> bool {
    match build_system {
        BuildSystem::GradleKotlin => true,
        BuildSystem::Maven | BuildSystem::GradleGroovy => false,
    }
}
