//! The TOML-declared dependency/BOM/repository catalog.
//!
//! Catalog data is read-only per deployment: requests resolve entries
//! against their target platform version, and refreshes swap a whole new
//! immutable snapshot rather than mutating in place.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use blueprint_util::errors::BlueprintError;
use blueprint_version::{Version, VersionRange};

use crate::bom::Bom;
use crate::dependency::{Dependency, DependencyScope};
use crate::property::VersionReference;
use crate::repository::Repository;

/// The full catalog: dependency, BOM, and repository entries keyed by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub dependencies: BTreeMap<String, DependencyEntry>,

    #[serde(default)]
    pub boms: BTreeMap<String, BomEntry>,

    #[serde(default)]
    pub repositories: BTreeMap<String, RepositoryEntry>,
}

/// A catalog dependency entry: base coordinates plus per-platform overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyEntry {
    pub group: String,
    pub artifact: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub scope: Option<DependencyScope>,
    #[serde(default)]
    pub bom: Option<String>,
    #[serde(default)]
    pub repository: Option<String>,
    /// Platform range this feature is available in at all.
    #[serde(default, rename = "compatibility-range")]
    pub compatibility_range: Option<String>,
    /// Ordered per-platform-range overrides; the first matching range wins.
    #[serde(default)]
    pub mappings: Vec<VersionMapping>,
}

/// A catalog BOM entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BomEntry {
    pub group: String,
    pub artifact: String,
    pub version: String,
    #[serde(default)]
    pub repositories: Vec<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub mappings: Vec<VersionMapping>,
}

/// A per-platform-range override of version and/or coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionMapping {
    pub range: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub artifact: Option<String>,
}

/// A catalog repository entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryEntry {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub snapshots: bool,
}

impl Catalog {
    /// Load and parse a catalog TOML file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BlueprintError::Catalog {
                message: format!("Failed to read {}: {e}", path.display()),
            }
        })?;
        Self::from_str(&content)
    }

    /// Parse a catalog from TOML text and validate every range expression.
    pub fn from_str(content: &str) -> miette::Result<Self> {
        let catalog: Catalog = toml::from_str(content).map_err(|e| {
            BlueprintError::Catalog {
                message: format!("Failed to parse catalog: {e}"),
            }
        })?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse every range expression in the catalog, surfacing bad data at
    /// load time instead of mid-request.
    pub fn validate(&self) -> miette::Result<()> {
        for (id, entry) in &self.dependencies {
            if let Some(ref range) = entry.compatibility_range {
                VersionRange::parse(range).map_err(|e| BlueprintError::Catalog {
                    message: format!("dependency '{id}' compatibility range: {e}"),
                })?;
            }
            for mapping in &entry.mappings {
                VersionRange::parse(&mapping.range).map_err(|e| BlueprintError::Catalog {
                    message: format!("dependency '{id}' mapping range: {e}"),
                })?;
            }
        }
        for (id, entry) in &self.boms {
            for mapping in &entry.mappings {
                VersionRange::parse(&mapping.range).map_err(|e| BlueprintError::Catalog {
                    message: format!("BOM '{id}' mapping range: {e}"),
                })?;
            }
        }
        Ok(())
    }

    /// Resolve a dependency id to concrete coordinates for a platform
    /// version. Returns `None` for unknown ids and for platforms outside the
    /// entry's compatibility range.
    pub fn resolve_dependency(
        &self,
        id: &str,
        platform: &Version,
    ) -> Result<Option<Dependency>, BlueprintError> {
        let Some(entry) = self.dependencies.get(id) else {
            return Ok(None);
        };

        if let Some(ref range) = entry.compatibility_range {
            if !VersionRange::parse(range)?.contains(platform) {
                return Ok(None);
            }
        }

        let mut group = entry.group.clone();
        let mut artifact = entry.artifact.clone();
        let mut version = entry.version.clone();
        for mapping in &entry.mappings {
            if VersionRange::parse(&mapping.range)?.contains(platform) {
                if let Some(ref g) = mapping.group {
                    group = g.clone();
                }
                if let Some(ref a) = mapping.artifact {
                    artifact = a.clone();
                }
                if let Some(ref v) = mapping.version {
                    version = Some(v.clone());
                }
                break;
            }
        }

        let mut dep = Dependency::new(group, artifact);
        if let Some(v) = version {
            dep = dep.with_version(VersionReference::literal(v));
        }
        if let Some(scope) = entry.scope {
            dep = dep.with_scope(scope);
        }
        if let Some(ref bom) = entry.bom {
            dep = dep.with_bom(bom.clone());
        }
        if let Some(ref repository) = entry.repository {
            dep = dep.with_repository(repository.clone());
        }
        Ok(Some(dep))
    }

    /// Resolve a BOM id to a concrete import for a platform version.
    pub fn resolve_bom(
        &self,
        id: &str,
        platform: &Version,
    ) -> Result<Option<Bom>, BlueprintError> {
        let Some(entry) = self.boms.get(id) else {
            return Ok(None);
        };

        let mut group = entry.group.clone();
        let mut artifact = entry.artifact.clone();
        let mut version = entry.version.clone();
        for mapping in &entry.mappings {
            if VersionRange::parse(&mapping.range)?.contains(platform) {
                if let Some(ref g) = mapping.group {
                    group = g.clone();
                }
                if let Some(ref a) = mapping.artifact {
                    artifact = a.clone();
                }
                if let Some(ref v) = mapping.version {
                    version = v.clone();
                }
                break;
            }
        }

        Ok(Some(
            Bom::new(group, artifact, VersionReference::literal(version))
                .with_repositories(entry.repositories.clone())
                .with_order(entry.order),
        ))
    }

    /// Look up a repository entry as a build-model item.
    pub fn repository(&self, id: &str) -> Option<Repository> {
        self.repositories.get(id).map(|entry| {
            let repo = Repository::new(entry.name.clone(), entry.url.clone());
            if entry.snapshots {
                repo.with_snapshots()
            } else {
                repo
            }
        })
    }
}

/// A catalog snapshot shared across concurrent requests.
///
/// Readers clone the `Arc` and traverse an immutable snapshot; refreshes
/// swap the pointer under a short write lock. The snapshot is never mutated
/// in place while readers hold it.
#[derive(Debug)]
pub struct SharedCatalog {
    slot: RwLock<Slot>,
    ttl: Duration,
}

#[derive(Debug)]
struct Slot {
    catalog: Arc<Catalog>,
    refreshed_at: Instant,
}

impl SharedCatalog {
    pub fn new(catalog: Catalog, ttl: Duration) -> Self {
        Self {
            slot: RwLock::new(Slot {
                catalog: Arc::new(catalog),
                refreshed_at: Instant::now(),
            }),
            ttl,
        }
    }

    /// The current snapshot. Holds the read lock only long enough to clone
    /// the pointer.
    pub fn get(&self) -> Arc<Catalog> {
        self.slot.read().expect("catalog lock poisoned").catalog.clone()
    }

    /// Whether the snapshot has outlived its TTL and a refresh is due.
    pub fn is_stale(&self) -> bool {
        let slot = self.slot.read().expect("catalog lock poisoned");
        slot.refreshed_at.elapsed() >= self.ttl
    }

    /// Atomically replace the snapshot. In-flight readers keep the old one.
    pub fn swap(&self, catalog: Catalog) {
        let mut slot = self.slot.write().expect("catalog lock poisoned");
        slot.catalog = Arc::new(catalog);
        slot.refreshed_at = Instant::now();
    }
}
