//! End-to-end generation scenarios through the full pipeline with the
//! stock customizer set.

use blueprint_core::catalog::Catalog;
use blueprint_core::dependency::{Coordinate, DependencyScope};
use blueprint_core::property::VersionProperty;
use blueprint_core::selection::{BuildSystem, FeatureSelection};
use blueprint_engine::defaults;
use blueprint_engine::{FixedVersionResolver, ManagedVersionPin, Pipeline, PinTarget};
use blueprint_version::Version;

const CATALOG: &str = r#"
[dependencies.web]
group = "org.springframework.boot"
artifact = "spring-boot-starter-web"

[dependencies.webflux]
group = "org.springframework.boot"
artifact = "spring-boot-starter-webflux"
compatibility-range = "[2.0.0.M1,)"

[dependencies.kafka]
group = "org.springframework.kafka"
artifact = "spring-kafka"

[dependencies.cloud-function]
group = "org.springframework.cloud"
artifact = "spring-cloud-function-context"
bom = "spring-cloud"

[dependencies.testcontainers]
group = "org.testcontainers"
artifact = "junit-jupiter"
scope = "test"

[dependencies.data-mongodb]
group = "org.springframework.boot"
artifact = "spring-boot-starter-data-mongodb"

[boms.spring-cloud]
group = "org.springframework.cloud"
artifact = "spring-cloud-dependencies"
version = "Finchley.RELEASE"
repositories = ["spring-milestones"]

[[boms.spring-cloud.mappings]]
range = "[,2.0.0.M1)"
version = "Edgware.SR5"

[repositories.spring-milestones]
name = "Spring Milestones"
url = "https://repo.spring.io/milestone"
"#;

fn catalog() -> Catalog {
    Catalog::from_str(CATALOG).unwrap()
}

fn pipeline() -> Pipeline {
    let mut pipeline = Pipeline::new();
    defaults::register_defaults(&mut pipeline);
    pipeline
}

fn selection(features: &[&str], platform: &str) -> FeatureSelection {
    FeatureSelection::new(
        features.iter().copied(),
        Version::parse(platform).unwrap(),
        BuildSystem::Maven,
        "java",
    )
}

#[test]
fn kafka_on_old_platform_pins_version_property() {
    let (build, _) = pipeline()
        .generate(&selection(&["kafka"], "1.5.0.RELEASE"), &catalog())
        .unwrap();

    let kafka_test = build.dependencies().get("kafka-test").unwrap();
    assert_eq!(kafka_test.artifact_id, "spring-kafka-test");
    assert_eq!(kafka_test.scope, DependencyScope::Test);
    assert_eq!(
        build.properties().get("spring-kafka.version").unwrap(),
        "1.3.8.RELEASE"
    );
}

#[test]
fn kafka_on_new_platform_has_no_override() {
    let (build, _) = pipeline()
        .generate(&selection(&["kafka"], "2.0.0.RELEASE"), &catalog())
        .unwrap();

    assert!(build.dependencies().has("kafka-test"));
    assert!(build.properties().get("spring-kafka.version").is_none());
}

#[test]
fn cloud_function_swaps_to_web_adapter_and_keeps_bom() {
    let (build, _) = pipeline()
        .generate(
            &selection(&["cloud-function", "webflux"], "2.0.0.RELEASE"),
            &catalog(),
        )
        .unwrap();

    assert!(!build.dependencies().has("cloud-function"));
    assert_eq!(
        build
            .dependencies()
            .ids()
            .filter(|id| *id == "cloud-function-web")
            .count(),
        1
    );
    // The replacement never re-declared the BOM link; it must have survived
    // the swap, along with the repository that hosts the train.
    assert!(build.boms().has("spring-cloud"));
    assert!(build.repositories().has("spring-milestones"));
}

#[test]
fn cloud_function_alone_is_left_untouched() {
    let (build, _) = pipeline()
        .generate(&selection(&["cloud-function"], "2.0.0.RELEASE"), &catalog())
        .unwrap();

    assert!(build.dependencies().has("cloud-function"));
    assert!(!build.dependencies().has("cloud-function-web"));
}

#[test]
fn cloud_function_below_adapter_threshold_keeps_context() {
    let (build, _) = pipeline()
        .generate(
            &selection(&["cloud-function", "web"], "1.5.0.RELEASE"),
            &catalog(),
        )
        .unwrap();

    assert!(build.dependencies().has("cloud-function"));
    assert!(!build.dependencies().has("cloud-function-web"));
    // The mapping picked the older release train for this platform.
    let bom = build.boms().get("spring-cloud").unwrap();
    assert_eq!(bom.version.to_string(), "Edgware.SR5");
}

#[test]
fn both_testcontainers_rules_fire_together() {
    let (build, docs) = pipeline()
        .generate(
            &selection(&["testcontainers", "data-mongodb"], "2.0.0.RELEASE"),
            &catalog(),
        )
        .unwrap();

    assert!(build.dependencies().has("testcontainers-mongodb"));
    assert!(build.dependencies().has("spring-boot-testcontainers"));
    assert!(docs
        .links()
        .iter()
        .any(|l| l.description.contains("MongoDB module")));
}

#[test]
fn neither_testcontainers_rule_fires_without_the_trigger() {
    let (build, _) = pipeline()
        .generate(&selection(&["data-mongodb"], "2.0.0.RELEASE"), &catalog())
        .unwrap();

    assert!(!build.dependencies().has("testcontainers-mongodb"));
    assert!(!build.dependencies().has("spring-boot-testcontainers"));
}

#[test]
fn release_train_pin_flows_into_properties() {
    let resolver = FixedVersionResolver::new().with(
        "org.springframework.cloud",
        "spring-cloud-contract-verifier",
        "2.0.0.RELEASE",
    );
    let mut pipeline = pipeline();
    pipeline.register(ManagedVersionPin::new(
        "contract-verifier-pin",
        resolver,
        Coordinate::parse("org.springframework.cloud:spring-cloud-dependencies:Finchley.RELEASE")
            .unwrap(),
        "org.springframework.cloud",
        "spring-cloud-contract-verifier",
        PinTarget::Property(VersionProperty::new("spring-cloud-contract.version")),
    ));

    let (build, _) = pipeline
        .generate(&selection(&["web"], "2.0.0.RELEASE"), &catalog())
        .unwrap();
    assert_eq!(
        build
            .properties()
            .get("spring-cloud-contract.version")
            .unwrap(),
        "2.0.0.RELEASE"
    );
}

#[test]
fn unresolvable_pin_degrades_to_a_skip() {
    let mut pipeline = pipeline();
    pipeline.register(ManagedVersionPin::new(
        "absent-pin",
        FixedVersionResolver::new(),
        Coordinate::parse("org.springframework.cloud:spring-cloud-dependencies:Finchley.RELEASE")
            .unwrap(),
        "org.example",
        "not-in-train",
        PinTarget::Property(VersionProperty::new("not-in-train.version")),
    ));

    let (build, _) = pipeline
        .generate(&selection(&["web"], "2.0.0.RELEASE"), &catalog())
        .unwrap();
    assert!(build.dependencies().has("web"));
    assert!(build.properties().get("not-in-train.version").is_none());
}

#[test]
fn full_generation_is_deterministic() {
    let sel = selection(
        &["kafka", "cloud-function", "webflux", "testcontainers", "data-mongodb"],
        "2.0.0.RELEASE",
    );
    let catalog = catalog();

    let (build_a, docs_a) = pipeline().generate(&sel, &catalog).unwrap();
    let (build_b, docs_b) = pipeline().generate(&sel, &catalog).unwrap();
    assert_eq!(build_a, build_b);
    assert_eq!(docs_a, docs_b);
}

#[test]
fn webflux_unavailable_below_its_compatibility_range() {
    let (build, _) = pipeline()
        .generate(&selection(&["webflux"], "1.5.0.RELEASE"), &catalog())
        .unwrap();
    assert!(!build.dependencies().has("webflux"));
}

#[test]
fn gradle_build_gets_camel_case_kafka_property() {
    let sel = FeatureSelection::new(
        ["kafka"],
        Version::parse("1.5.0.RELEASE").unwrap(),
        BuildSystem::GradleKotlin,
        "kotlin",
    );
    let (build, _) = pipeline().generate(&sel, &catalog()).unwrap();
    assert_eq!(
        build.properties().get("springKafkaVersion").unwrap(),
        "1.3.8.RELEASE"
    );
    assert!(build.properties().get("spring-kafka.version").is_none());
}
