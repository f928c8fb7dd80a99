//! Maven repository URL layout.

/// Maven Central base URL.
pub const MAVEN_CENTRAL_URL: &str = "https://repo.maven.apache.org/maven2";

/// A Maven repository hosting release-train BOMs.
#[derive(Debug, Clone)]
pub struct MavenRepository {
    pub name: String,
    pub url: String,
}

impl MavenRepository {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Construct the default Maven Central repository.
    pub fn maven_central() -> Self {
        Self::new("maven-central", MAVEN_CENTRAL_URL)
    }

    /// Standard Maven layout path for a given coordinate.
    ///
    /// `org.springframework.cloud:spring-cloud-dependencies:Finchley.RELEASE`
    /// becomes `org/springframework/cloud/spring-cloud-dependencies/Finchley.RELEASE`
    pub fn coordinate_path(group: &str, artifact: &str, version: &str) -> String {
        format!("{}/{}/{}", group.replace('.', "/"), artifact, version)
    }

    /// URL to the POM file for a given coordinate.
    pub fn pom_url(&self, group: &str, artifact: &str, version: &str) -> String {
        format!(
            "{}/{}/{artifact}-{version}.pom",
            self.url,
            Self::coordinate_path(group, artifact, version)
        )
    }
}
