use blueprint_core::build::Build;
use blueprint_core::catalog::Catalog;
use blueprint_core::dependency::Dependency;
use blueprint_core::property::VersionReference;
use blueprint_core::selection::BuildSystem;
use blueprint_version::Version;

const CATALOG: &str = r#"
[dependencies.cloud-function]
group = "org.springframework.cloud"
artifact = "spring-cloud-function-context"
bom = "spring-cloud"
repository = "spring-milestones"

[boms.spring-cloud]
group = "org.springframework.cloud"
artifact = "spring-cloud-dependencies"
version = "Finchley.M9"
repositories = ["spring-milestones"]

[repositories.spring-milestones]
name = "Spring Milestones"
url = "https://repo.spring.io/milestone"
"#;

fn v(s: &str) -> Version {
    Version::parse(s).unwrap()
}

#[test]
fn replace_keeps_bom_and_repository_superset() {
    let catalog = Catalog::from_str(CATALOG).unwrap();
    let mut build = Build::new(BuildSystem::Maven);
    let dep = catalog
        .resolve_dependency("cloud-function", &v("2.0.0.M3"))
        .unwrap()
        .unwrap();
    build
        .add_resolved_dependency("cloud-function", dep, &catalog, &v("2.0.0.M3"))
        .unwrap();

    let boms_before: Vec<String> = build.boms().ids().map(str::to_string).collect();
    let repos_before: Vec<String> = build.repositories().ids().map(str::to_string).collect();

    build.dependencies_mut().remove("cloud-function");
    build
        .dependencies_mut()
        .add(
            "cloud-function-web",
            Dependency::new("org.springframework.cloud", "spring-cloud-function-web"),
        )
        .unwrap();

    for id in &boms_before {
        assert!(build.boms().has(id), "BOM link '{id}' was lost");
    }
    for id in &repos_before {
        assert!(build.repositories().has(id), "repository link '{id}' was lost");
    }
}

#[test]
fn re_added_dependency_moves_to_the_tail() {
    let mut build = Build::new(BuildSystem::Maven);
    build
        .dependencies_mut()
        .add("web", Dependency::new("org.springframework.boot", "spring-boot-starter-web"))
        .unwrap();
    build
        .dependencies_mut()
        .add("kafka", Dependency::new("org.springframework.kafka", "spring-kafka"))
        .unwrap();

    let removed = build.dependencies_mut().remove("web").unwrap();
    build.dependencies_mut().add("web", removed).unwrap();

    let ids: Vec<&str> = build.dependencies().ids().collect();
    assert_eq!(ids, vec!["kafka", "web"]);
}

#[test]
fn removing_unknown_dependency_is_a_noop() {
    let mut build = Build::new(BuildSystem::Maven);
    assert!(build.dependencies_mut().remove("never-added").is_none());
    assert!(build.dependencies().is_empty());
}

#[test]
fn bom_re_registration_keeps_position_and_latest_value() {
    let catalog = Catalog::from_str(CATALOG).unwrap();
    let mut build = Build::new(BuildSystem::Maven);
    let original = catalog.resolve_bom("spring-cloud", &v("2.0.0.M3")).unwrap().unwrap();
    build.register_bom("spring-cloud", original, &catalog);

    let updated = catalog
        .resolve_bom("spring-cloud", &v("2.0.0.M3"))
        .unwrap()
        .unwrap()
        .with_order(10);
    build.register_bom("spring-cloud", updated, &catalog);

    assert_eq!(build.boms().len(), 1);
    assert_eq!(build.boms().get("spring-cloud").unwrap().order, 10);
    assert_eq!(
        build.boms().get("spring-cloud").unwrap().version,
        VersionReference::literal("Finchley.M9")
    );
}
