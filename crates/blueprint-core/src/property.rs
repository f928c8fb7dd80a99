//! Version references and version properties.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a dependency, BOM, or plugin states its version: a literal string or
/// a reference to a build property. A dependency with no version reference
/// at all is managed by an imported BOM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VersionReference {
    Literal(String),
    Property(VersionProperty),
}

impl VersionReference {
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    pub fn property(name: impl Into<String>) -> Self {
        Self::Property(VersionProperty::new(name))
    }
}

impl fmt::Display for VersionReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionReference::Literal(v) => f.write_str(v),
            VersionReference::Property(p) => write!(f, "${{{}}}", p.standard_format()),
        }
    }
}

/// A named version property, stored in canonical dotted form
/// (e.g. `spring-kafka.version`).
///
/// Maven build files use the canonical form; Gradle ext blocks use the
/// camel-case form (`springKafkaVersion`). The build-system dispatch table
/// picks the right one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionProperty {
    name: String,
}

impl VersionProperty {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The canonical dotted/kebab form, as written into Maven properties.
    pub fn standard_format(&self) -> &str {
        &self.name
    }

    /// The camel-case form used for Gradle ext properties:
    /// `spring-kafka.version` becomes `springKafkaVersion`.
    pub fn camel_case_format(&self) -> String {
        let mut out = String::with_capacity(self.name.len());
        let mut first = true;
        for token in self.name.split(['.', '-']).filter(|t| !t.is_empty()) {
            if first {
                out.push_str(token);
                first = false;
            } else {
                let mut chars = token.chars();
                if let Some(c) = chars.next() {
                    out.extend(c.to_uppercase());
                    out.push_str(chars.as_str());
                }
            }
        }
        out
    }
}
