//! Release-train BOM parsing: `<properties>` and `<dependencyManagement>`
//! with property interpolation.

use std::collections::BTreeMap;

use quick_xml::events::Event;
use quick_xml::Reader;

use blueprint_util::errors::BlueprintError;

/// A parsed release-train BOM: the subset of a POM that answers
/// "what version does this train manage for a target artifact".
#[derive(Debug, Clone, Default)]
pub struct ManagedBom {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub parent: Option<ParentRef>,
    pub properties: BTreeMap<String, String>,
    pub managed: Vec<ManagedDependency>,
}

/// Reference to a parent POM.
#[derive(Debug, Clone)]
pub struct ParentRef {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

/// One `<dependencyManagement>` entry.
#[derive(Debug, Clone)]
pub struct ManagedDependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    pub scope: Option<String>,
    pub type_: Option<String>,
}

impl ManagedBom {
    /// Effective version (falls back to parent).
    pub fn effective_version(&self) -> Option<&str> {
        self.version
            .as_deref()
            .or(self.parent.as_ref().map(|p| p.version.as_str()))
    }

    /// Look up the managed version for `group:artifact`, with property
    /// references resolved.
    pub fn managed_version(&self, group_id: &str, artifact_id: &str) -> Option<String> {
        self.managed
            .iter()
            .find(|d| d.group_id == group_id && d.artifact_id == artifact_id)
            .and_then(|d| d.version.as_deref())
            .map(|v| self.interpolate(v))
    }

    /// Resolve `${property}` references using BOM properties and built-in
    /// project variables. Capped to guard against reference cycles.
    fn interpolate(&self, input: &str) -> String {
        let mut result = input.to_string();
        let mut iterations = 0;
        while result.contains("${") && iterations < 20 {
            iterations += 1;
            let Some(start) = result.find("${") else {
                break;
            };
            let Some(len) = result[start..].find('}') else {
                break;
            };
            let key = &result[start + 2..start + len];
            let Some(value) = self.resolve_property(key) else {
                break;
            };
            result.replace_range(start..start + len + 1, &value);
        }
        result
    }

    fn resolve_property(&self, key: &str) -> Option<String> {
        match key {
            "project.groupId" => self
                .group_id
                .clone()
                .or_else(|| self.parent.as_ref().map(|p| p.group_id.clone())),
            "project.version" => self.effective_version().map(|s| s.to_string()),
            _ => self.properties.get(key).cloned(),
        }
    }
}

/// Parse a release-train BOM from POM XML.
///
/// Only the managed subset is kept: top-level coordinates, parent,
/// properties, and `<dependencyManagement>` entries. Plain
/// `<dependencies>` are irrelevant to version resolution and skipped.
pub fn parse_bom(xml: &str) -> miette::Result<ManagedBom> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut bom = ManagedBom::default();
    let mut path: Vec<String> = Vec::new();
    let mut text_buf = String::new();

    let mut current: Option<ManagedDependency> = None;
    let mut current_parent: Option<ParentRef> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                path.push(tag);
                text_buf.clear();

                match path_context(&path).as_str() {
                    "project>dependencyManagement>dependencies>dependency" => {
                        current = Some(ManagedDependency {
                            group_id: String::new(),
                            artifact_id: String::new(),
                            version: None,
                            scope: None,
                            type_: None,
                        });
                    }
                    "project>parent" => {
                        current_parent = Some(ParentRef {
                            group_id: String::new(),
                            artifact_id: String::new(),
                            version: String::new(),
                        });
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) => {
                text_buf = e.unescape().unwrap_or_default().to_string();
            }
            Ok(Event::End(_)) => {
                let ctx = path_context(&path);
                let depth = path.len();

                if depth == 3 && path.get(1).map(|s| s.as_str()) == Some("properties") {
                    let name = path.last().cloned().unwrap_or_default();
                    bom.properties.insert(name, text_buf.clone());
                }

                if let Some(ref mut dep) = current {
                    match path.last().map(|s| s.as_str()) {
                        Some("groupId") if ctx.ends_with(">dependency>groupId") => {
                            dep.group_id = text_buf.clone();
                        }
                        Some("artifactId") if ctx.ends_with(">dependency>artifactId") => {
                            dep.artifact_id = text_buf.clone();
                        }
                        Some("version") if ctx.ends_with(">dependency>version") => {
                            dep.version = Some(text_buf.clone());
                        }
                        Some("scope") if ctx.ends_with(">dependency>scope") => {
                            dep.scope = Some(text_buf.clone());
                        }
                        Some("type") if ctx.ends_with(">dependency>type") => {
                            dep.type_ = Some(text_buf.clone());
                        }
                        _ => {}
                    }
                    if ctx == "project>dependencyManagement>dependencies>dependency" {
                        if let Some(dep) = current.take() {
                            bom.managed.push(dep);
                        }
                    }
                }

                if let Some(ref mut parent) = current_parent {
                    match path.last().map(|s| s.as_str()) {
                        Some("groupId") if ctx == "project>parent>groupId" => {
                            parent.group_id = text_buf.clone();
                        }
                        Some("artifactId") if ctx == "project>parent>artifactId" => {
                            parent.artifact_id = text_buf.clone();
                        }
                        Some("version") if ctx == "project>parent>version" => {
                            parent.version = text_buf.clone();
                        }
                        _ => {}
                    }
                    if ctx == "project>parent" {
                        bom.parent = current_parent.take();
                    }
                }

                if depth == 2 {
                    match path.last().map(|s| s.as_str()) {
                        Some("groupId") => bom.group_id = Some(text_buf.clone()),
                        Some("artifactId") => bom.artifact_id = Some(text_buf.clone()),
                        Some("version") => bom.version = Some(text_buf.clone()),
                        _ => {}
                    }
                }

                path.pop();
                text_buf.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(BlueprintError::Generic {
                    message: format!("Failed to parse BOM XML: {e}"),
                }
                .into());
            }
            _ => {}
        }
    }

    Ok(bom)
}

fn path_context(path: &[String]) -> String {
    path.join(">")
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRAIN_BOM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
    <modelVersion>4.0.0</modelVersion>
    <groupId>org.springframework.cloud</groupId>
    <artifactId>spring-cloud-dependencies</artifactId>
    <version>Finchley.RELEASE</version>
    <packaging>pom</packaging>
    <properties>
        <spring-cloud-function.version>1.0.0.RELEASE</spring-cloud-function.version>
        <spring-cloud-contract.version>2.0.0.RELEASE</spring-cloud-contract.version>
    </properties>
    <dependencyManagement>
        <dependencies>
            <dependency>
                <groupId>org.springframework.cloud</groupId>
                <artifactId>spring-cloud-function-web</artifactId>
                <version>${spring-cloud-function.version}</version>
            </dependency>
            <dependency>
                <groupId>org.springframework.cloud</groupId>
                <artifactId>spring-cloud-contract-verifier</artifactId>
                <version>${spring-cloud-contract.version}</version>
            </dependency>
            <dependency>
                <groupId>org.springframework.cloud</groupId>
                <artifactId>spring-cloud-function-dependencies</artifactId>
                <version>1.0.0.RELEASE</version>
                <type>pom</type>
                <scope>import</scope>
            </dependency>
        </dependencies>
    </dependencyManagement>
</project>"#;

    #[test]
    fn parses_coordinates_and_properties() {
        let bom = parse_bom(TRAIN_BOM).unwrap();
        assert_eq!(bom.group_id.as_deref(), Some("org.springframework.cloud"));
        assert_eq!(bom.version.as_deref(), Some("Finchley.RELEASE"));
        assert_eq!(
            bom.properties.get("spring-cloud-function.version").unwrap(),
            "1.0.0.RELEASE"
        );
        assert_eq!(bom.managed.len(), 3);
    }

    #[test]
    fn managed_version_resolves_property_refs() {
        let bom = parse_bom(TRAIN_BOM).unwrap();
        assert_eq!(
            bom.managed_version("org.springframework.cloud", "spring-cloud-contract-verifier"),
            Some("2.0.0.RELEASE".to_string())
        );
    }

    #[test]
    fn unmanaged_artifact_is_none() {
        let bom = parse_bom(TRAIN_BOM).unwrap();
        assert_eq!(bom.managed_version("org.example", "unrelated"), None);
    }

    #[test]
    fn parent_version_fallback() {
        let xml = r#"<project>
    <parent>
        <groupId>org.example</groupId>
        <artifactId>parent</artifactId>
        <version>3.0.0</version>
    </parent>
    <artifactId>child-bom</artifactId>
    <dependencyManagement>
        <dependencies>
            <dependency>
                <groupId>org.example</groupId>
                <artifactId>lib</artifactId>
                <version>${project.version}</version>
            </dependency>
        </dependencies>
    </dependencyManagement>
</project>"#;
        let bom = parse_bom(xml).unwrap();
        assert_eq!(bom.effective_version(), Some("3.0.0"));
        assert_eq!(
            bom.managed_version("org.example", "lib"),
            Some("3.0.0".to_string())
        );
    }

    #[test]
    fn unresolvable_property_left_verbatim() {
        let xml = r#"<project>
    <artifactId>loose-bom</artifactId>
    <dependencyManagement>
        <dependencies>
            <dependency>
                <groupId>org.example</groupId>
                <artifactId>lib</artifactId>
                <version>${missing.version}</version>
            </dependency>
        </dependencies>
    </dependencyManagement>
</project>"#;
        let bom = parse_bom(xml).unwrap();
        assert_eq!(
            bom.managed_version("org.example", "lib"),
            Some("${missing.version}".to_string())
        );
    }

    #[test]
    fn mismatched_tags_are_an_error() {
        assert!(parse_bom("<project><groupId>g</artifactId></project>").is_err());
    }
}
