//! Stock customizers and rule sets shipped with the engine.
//!
//! Per-vendor variants beyond these live in catalog and registry data, not
//! in code.

use blueprint_core::dependency::{Dependency, DependencyScope};
use blueprint_core::property::{VersionProperty, VersionReference};
use blueprint_core::repository::Repository;
use blueprint_core::selection::FeatureSelection;
use blueprint_version::{QualifierKind, Version, VersionRange};

use crate::customizer::FnCustomizer;
use crate::dispatch;
use crate::ordering;
use crate::pipeline::Pipeline;
use crate::rule::{ImplicitRule, RuleRegistry, RuleRegistryCustomizer};

/// Platforms whose Kafka support predates the platform-managed version.
const KAFKA_OVERRIDE_RANGE: &str = "[,2.0.0.M1)";
const KAFKA_OVERRIDE_VERSION: &str = "1.3.8.RELEASE";

/// First platform with the servlet/reactive web adapter for functions.
const FUNCTION_WEB_ADAPTER_RANGE: &str = "[2.0.0.RELEASE,)";

const MILESTONE_REPOSITORY_ID: &str = "spring-milestones";
const MILESTONE_REPOSITORY_URL: &str = "https://repo.spring.io/milestone";

/// Kafka test support: `kafka` brings the test harness along, and on
/// platforms that predate platform-managed Kafka the compatible version is
/// pinned through a build property.
pub fn kafka_test_support() -> FnCustomizer {
    FnCustomizer::new("kafka-test-support", |build, docs, selection| {
        build.dependencies_mut().add(
            "kafka-test",
            Dependency::new("org.springframework.kafka", "spring-kafka-test")
                .with_scope(DependencyScope::Test),
        )?;
        if VersionRange::parse(KAFKA_OVERRIDE_RANGE)?.contains(selection.platform_version()) {
            let property = VersionProperty::new("spring-kafka.version");
            build.set_property(
                dispatch::version_property_name(build.build_system(), &property),
                KAFKA_OVERRIDE_VERSION,
            );
        }
        docs.add_link(
            "https://docs.spring.io/spring-kafka/docs/current/reference/html/",
            "Spring for Apache Kafka reference",
        );
        Ok(())
    })
    .when_feature("kafka")
}

/// Function web adapter: once the platform ships the web adapter, selecting
/// a web stack next to `cloud-function` swaps the plain function context
/// for the web flavor. The original release-train BOM link survives the
/// swap through container linkage.
pub fn cloud_function_web_adapter() -> FnCustomizer {
    FnCustomizer::new("cloud-function-web-adapter", |build, _, selection| {
        if !VersionRange::parse(FUNCTION_WEB_ADAPTER_RANGE)?
            .contains(selection.platform_version())
        {
            return Ok(());
        }
        // Re-read the live descriptor: an earlier rule may already have
        // removed or replaced the function dependency.
        if !build.dependencies().has("cloud-function") {
            return Ok(());
        }
        build.dependencies_mut().remove("cloud-function");
        if !build.dependencies().has("cloud-function-web") {
            build.dependencies_mut().add(
                "cloud-function-web",
                Dependency::new("org.springframework.cloud", "spring-cloud-function-web"),
            )?;
        }
        Ok(())
    })
    .when(|selection: &FeatureSelection| {
        selection.has_feature("cloud-function")
            && (selection.has_feature("web") || selection.has_feature("webflux"))
    })
}

/// Service-connection rules for Testcontainers-backed data stores.
pub fn testcontainers_rules() -> RuleRegistry {
    let mut registry = RuleRegistry::new();
    registry.register(
        ImplicitRule::match_all(
            "testcontainers-mongodb-module",
            ["testcontainers", "data-mongodb"],
        )
        .adds_dependency(
            "testcontainers-mongodb",
            Dependency::new("org.testcontainers", "mongodb").with_scope(DependencyScope::Test),
        )
        .adds_link(
            "https://www.testcontainers.org/modules/databases/mongodb/",
            "Testcontainers MongoDB module",
        ),
    );
    registry.register(
        ImplicitRule::match_all(
            "mongodb-service-connection",
            ["testcontainers", "data-mongodb"],
        )
        .adds_dependency(
            "spring-boot-testcontainers",
            Dependency::new("org.springframework.boot", "spring-boot-testcontainers")
                .with_scope(DependencyScope::Test),
        )
        .adds_link(
            "https://docs.spring.io/spring-boot/docs/current/reference/html/features.html#features.testing.testcontainers",
            "Testcontainers support in Spring Boot",
        ),
    );
    registry
}

/// The Testcontainers registry wrapped for the pipeline's implicit-rules
/// slot.
pub fn testcontainers_customizer() -> RuleRegistryCustomizer {
    RuleRegistryCustomizer::new("testcontainers-rules", testcontainers_rules())
}

/// Native image support. Runs last: the plugin configuration depends on
/// the final dependency set.
pub fn native_build_support() -> FnCustomizer {
    FnCustomizer::new("native-build-support", |build, docs, _| {
        let mut plugin = dispatch::standard_plugin(
            build.build_system(),
            "org.graalvm.buildtools",
            "native-maven-plugin",
            "org.graalvm.buildtools.native",
            Some(VersionReference::property("native-build-tools.version")),
        );
        let has_processors = build
            .dependencies()
            .values()
            .any(|dep| dep.scope == DependencyScope::AnnotationProcessor);
        if has_processors {
            plugin = plugin.with_configuration("processAot", "true");
        }
        build.plugins_mut().put("native-build", plugin);
        docs.add_link(
            "https://www.graalvm.org/latest/reference-manual/native-image/",
            "GraalVM native image reference",
        );
        Ok(())
    })
    .with_order(ordering::NATIVE)
    .when_feature("native")
}

/// Repository consistency: if any dependency or BOM pins a milestone or
/// release-candidate version, the milestone repository must be present.
/// Runs late so it observes everything added before it.
pub fn milestone_repository_guard() -> FnCustomizer {
    FnCustomizer::new("milestone-repository-guard", |build, _, _| {
        let dependency_versions = build.dependencies().values().filter_map(|dep| {
            match dep.version {
                Some(VersionReference::Literal(ref v)) => Some(v.clone()),
                _ => None,
            }
        });
        let bom_versions = build.boms().values().filter_map(|bom| match bom.version {
            VersionReference::Literal(ref v) => Some(v.clone()),
            _ => None,
        });

        let needs_milestones = dependency_versions
            .chain(bom_versions)
            .filter_map(|v| Version::parse(&v).ok())
            .any(|v| {
                matches!(
                    v.qualifier.kind,
                    QualifierKind::Milestone | QualifierKind::ReleaseCandidate
                )
            });

        if needs_milestones && !build.repositories().has(MILESTONE_REPOSITORY_ID) {
            build.repositories_mut().put(
                MILESTONE_REPOSITORY_ID,
                Repository::new("Spring Milestones", MILESTONE_REPOSITORY_URL),
            );
        }
        Ok(())
    })
    .with_order(ordering::LATE)
}

/// Register the full stock set on a pipeline.
pub fn register_defaults(pipeline: &mut Pipeline) {
    pipeline.register(kafka_test_support());
    pipeline.register(cloud_function_web_adapter());
    pipeline.register(testcontainers_customizer());
    pipeline.register(milestone_repository_guard());
    pipeline.register(native_build_support());
}
