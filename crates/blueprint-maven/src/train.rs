//! The release-train resolver: managed-version lookups answered from an
//! immutable BOM snapshot cache.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use reqwest::Client;

use blueprint_core::dependency::Coordinate;
use blueprint_engine::ManagedVersionResolver;

use crate::bom::ManagedBom;
use crate::fetch::fetch_bom;
use crate::repository::MavenRepository;

/// Resolves release-train-pinned versions for the engine.
///
/// Lookups are synchronous and lock-free beyond an `Arc` clone: they only
/// read whatever snapshot the cache currently holds. Fetching happens in
/// [`refresh`](Self::refresh), outside any lock the engine could be
/// holding, and a failed or missing fetch simply leaves lookups answering
/// `None`.
pub struct ReleaseTrainResolver {
    repository: MavenRepository,
    ttl: Duration,
    snapshots: RwLock<HashMap<String, Slot>>,
}

struct Slot {
    bom: Arc<ManagedBom>,
    fetched_at: Instant,
}

impl ReleaseTrainResolver {
    pub fn new(repository: MavenRepository, ttl: Duration) -> Self {
        Self {
            repository,
            ttl,
            snapshots: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch the BOM for a train and cache the parsed snapshot. A failed
    /// fetch is logged by the fetch layer and leaves the cache untouched.
    pub async fn refresh(&self, client: &Client, train: &Coordinate) {
        if let Some(bom) = fetch_bom(client, &self.repository, train).await {
            self.store(train, bom);
        }
    }

    /// Install a pre-parsed snapshot, for offline deployments and tests.
    pub fn store(&self, train: &Coordinate, bom: ManagedBom) {
        let mut snapshots = self.snapshots.write().expect("snapshot lock poisoned");
        snapshots.insert(
            train.to_string(),
            Slot {
                bom: Arc::new(bom),
                fetched_at: Instant::now(),
            },
        );
    }

    /// Whether a fresh snapshot is cached for this train.
    pub fn is_cached(&self, train: &Coordinate) -> bool {
        self.snapshot(train).is_some()
    }

    fn snapshot(&self, train: &Coordinate) -> Option<Arc<ManagedBom>> {
        let snapshots = self.snapshots.read().expect("snapshot lock poisoned");
        let slot = snapshots.get(&train.to_string())?;
        if slot.fetched_at.elapsed() >= self.ttl {
            return None;
        }
        Some(slot.bom.clone())
    }
}

impl ManagedVersionResolver for ReleaseTrainResolver {
    fn resolve_managed_version(
        &self,
        bom: &Coordinate,
        target_group: &str,
        target_artifact: &str,
    ) -> Option<String> {
        let snapshot = self.snapshot(bom)?;
        snapshot.managed_version(target_group, target_artifact)
    }
}
