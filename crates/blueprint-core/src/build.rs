//! The mutable build descriptor owned by one generation request.

use blueprint_util::errors::BlueprintError;
use blueprint_version::Version;

use crate::bom::Bom;
use crate::catalog::Catalog;
use crate::container::ItemContainer;
use crate::dependency::Dependency;
use crate::plugin::Plugin;
use crate::repository::Repository;
use crate::selection::BuildSystem;

/// The in-memory build descriptor: five insertion-ordered sections plus the
/// build-system kind. Mutations are synchronous and single-threaded; each
/// request owns its descriptor exclusively.
#[derive(Debug, Clone, PartialEq)]
pub struct Build {
    build_system: BuildSystem,
    dependencies: ItemContainer<Dependency>,
    boms: ItemContainer<Bom>,
    properties: ItemContainer<String>,
    plugins: ItemContainer<Plugin>,
    repositories: ItemContainer<Repository>,
}

impl Build {
    pub fn new(build_system: BuildSystem) -> Self {
        Self {
            build_system,
            dependencies: ItemContainer::new(),
            boms: ItemContainer::new(),
            properties: ItemContainer::new(),
            plugins: ItemContainer::new(),
            repositories: ItemContainer::new(),
        }
    }

    pub fn build_system(&self) -> BuildSystem {
        self.build_system
    }

    pub fn dependencies(&self) -> &ItemContainer<Dependency> {
        &self.dependencies
    }

    pub fn dependencies_mut(&mut self) -> &mut ItemContainer<Dependency> {
        &mut self.dependencies
    }

    pub fn boms(&self) -> &ItemContainer<Bom> {
        &self.boms
    }

    pub fn boms_mut(&mut self) -> &mut ItemContainer<Bom> {
        &mut self.boms
    }

    pub fn properties(&self) -> &ItemContainer<String> {
        &self.properties
    }

    /// Set a build property, replacing any existing value in place.
    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.put(name, value.into());
    }

    pub fn plugins(&self) -> &ItemContainer<Plugin> {
        &self.plugins
    }

    pub fn plugins_mut(&mut self) -> &mut ItemContainer<Plugin> {
        &mut self.plugins
    }

    pub fn repositories(&self) -> &ItemContainer<Repository> {
        &self.repositories
    }

    pub fn repositories_mut(&mut self) -> &mut ItemContainer<Repository> {
        &mut self.repositories
    }

    /// Add a dependency and register its BOM/repository linkage from the
    /// catalog in the same step.
    ///
    /// Linkage registration is one-way: removing the dependency later never
    /// cascades into `boms()` or `repositories()`, so a replacement that
    /// does not re-declare the links still inherits the original version
    /// management.
    pub fn add_resolved_dependency(
        &mut self,
        id: &str,
        dependency: Dependency,
        catalog: &Catalog,
        platform: &Version,
    ) -> Result<(), BlueprintError> {
        if let Some(ref bom_id) = dependency.bom {
            match catalog.resolve_bom(bom_id, platform)? {
                Some(bom) => self.register_bom(bom_id.clone(), bom, catalog),
                None => tracing::warn!("dependency '{id}' links unknown BOM '{bom_id}'"),
            }
        }
        if let Some(ref repo_id) = dependency.repository {
            self.register_repository(repo_id, catalog);
        }
        self.dependencies.add(id, dependency)
    }

    /// Register a BOM import and the repositories that host it. Re-adding an
    /// already-registered BOM id keeps its position.
    pub fn register_bom(&mut self, id: impl Into<String>, bom: Bom, catalog: &Catalog) {
        for repo_id in &bom.repositories {
            self.register_repository(repo_id, catalog);
        }
        self.boms.put(id, bom);
    }

    fn register_repository(&mut self, id: &str, catalog: &Catalog) {
        match catalog.repository(id) {
            Some(repo) => self.repositories.put(id, repo),
            None => tracing::warn!("unknown repository id '{id}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency::DependencyScope;
    use crate::property::VersionReference;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::from_str(
            r#"
[boms.spring-cloud]
group = "org.springframework.cloud"
artifact = "spring-cloud-dependencies"
version = "Finchley.RELEASE"
repositories = ["spring-milestones"]

[repositories.spring-milestones]
name = "Spring Milestones"
url = "https://repo.spring.io/milestone"
"#,
        )
        .unwrap()
    }

    #[test]
    fn resolved_add_registers_linkage() {
        let catalog = catalog();
        let mut build = Build::new(BuildSystem::Maven);
        let dep = Dependency::new("org.springframework.cloud", "spring-cloud-function-context")
            .with_bom("spring-cloud");
        build
            .add_resolved_dependency("cloud-function", dep, &catalog, &v("2.0.0.RELEASE"))
            .unwrap();

        assert!(build.dependencies().has("cloud-function"));
        assert!(build.boms().has("spring-cloud"));
        assert!(build.repositories().has("spring-milestones"));
    }

    #[test]
    fn removal_never_cascades_into_links() {
        let catalog = catalog();
        let mut build = Build::new(BuildSystem::Maven);
        let dep = Dependency::new("org.springframework.cloud", "spring-cloud-function-context")
            .with_bom("spring-cloud");
        build
            .add_resolved_dependency("cloud-function", dep, &catalog, &v("2.0.0.RELEASE"))
            .unwrap();

        build.dependencies_mut().remove("cloud-function");
        let replacement =
            Dependency::new("org.springframework.cloud", "spring-cloud-function-web");
        build
            .dependencies_mut()
            .add("cloud-function-web", replacement)
            .unwrap();

        // The replacement did not re-declare the BOM; the original link must
        // survive.
        assert!(build.boms().has("spring-cloud"));
        assert!(build.repositories().has("spring-milestones"));
    }

    #[test]
    fn duplicate_dependency_id_rejected() {
        let mut build = Build::new(BuildSystem::Maven);
        build
            .dependencies_mut()
            .add("web", Dependency::new("org.springframework.boot", "spring-boot-starter-web"))
            .unwrap();
        let err = build
            .dependencies_mut()
            .add("web", Dependency::new("org.springframework.boot", "spring-boot-starter-web"))
            .unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn set_property_replaces_in_place() {
        let mut build = Build::new(BuildSystem::Maven);
        build.set_property("spring-kafka.version", "1.3.8.RELEASE");
        build.set_property("java.version", "1.8");
        build.set_property("spring-kafka.version", "1.3.9.RELEASE");
        let names: Vec<&str> = build.properties().ids().collect();
        assert_eq!(names, vec!["spring-kafka.version", "java.version"]);
        assert_eq!(
            build.properties().get("spring-kafka.version").unwrap(),
            "1.3.9.RELEASE"
        );
    }

    #[test]
    fn test_scoped_dependency_kept_verbatim() {
        let mut build = Build::new(BuildSystem::GradleGroovy);
        let dep = Dependency::new("org.springframework.kafka", "spring-kafka-test")
            .with_scope(DependencyScope::Test)
            .with_version(VersionReference::property("spring-kafka.version"));
        build.dependencies_mut().add("kafka-test", dep).unwrap();
        let stored = build.dependencies().get("kafka-test").unwrap();
        assert_eq!(stored.scope, DependencyScope::Test);
    }
}
