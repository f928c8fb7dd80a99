//! Bill-of-materials items.

use crate::property::VersionReference;

/// An imported bill of materials pinning transitive dependency versions.
///
/// `order` controls import precedence when the serializer writes multiple
/// BOMs; lower values are imported first. `repositories` names the catalog
/// repositories that host the BOM's artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bom {
    pub group_id: String,
    pub artifact_id: String,
    pub version: VersionReference,
    pub repositories: Vec<String>,
    pub order: i32,
}

impl Bom {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: VersionReference,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version,
            repositories: Vec::new(),
            order: 0,
        }
    }

    pub fn with_repositories(mut self, repositories: Vec<String>) -> Self {
        self.repositories = repositories;
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }
}
