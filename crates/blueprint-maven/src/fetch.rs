//! Release-train BOM fetching. One attempt, client-side timeout, fail open.

use std::time::Duration;

use reqwest::Client;

use blueprint_core::dependency::Coordinate;
use blueprint_util::errors::BlueprintError;

use crate::bom::{parse_bom, ManagedBom};
use crate::repository::MavenRepository;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Build a shared reqwest client for BOM fetches.
pub fn build_client() -> miette::Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent("blueprint/0.3")
        .build()
        .map_err(|e| {
            BlueprintError::Network {
                message: format!("Failed to create HTTP client: {e}"),
            }
            .into()
        })
}

/// Fetch and parse a release-train BOM from a repository.
///
/// A single attempt: timeout, connection failure, non-success status, and
/// parse failure all log and answer `None` so the caller's customization
/// degrades to a skip instead of blocking generation.
pub async fn fetch_bom(
    client: &Client,
    repo: &MavenRepository,
    coordinate: &Coordinate,
) -> Option<ManagedBom> {
    let url = repo.pom_url(
        &coordinate.group_id,
        &coordinate.artifact_id,
        &coordinate.version,
    );

    let response = match client.get(&url).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("BOM fetch failed for {url}: {e}");
            return None;
        }
    };

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("HTTP {status} fetching {url}");
        return None;
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Failed to read BOM body from {url}: {e}");
            return None;
        }
    };

    match parse_bom(&body) {
        Ok(bom) => Some(bom),
        Err(e) => {
            tracing::warn!("Failed to parse BOM from {url}: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds() {
        assert!(build_client().is_ok());
    }

    #[tokio::test]
    async fn unreachable_repository_fails_open() {
        let client = build_client().unwrap();
        let repo = MavenRepository::new("dead", "http://127.0.0.1:1/maven2");
        let coordinate =
            Coordinate::parse("org.springframework.cloud:spring-cloud-dependencies:Finchley.RELEASE")
                .unwrap();
        assert!(fetch_bom(&client, &repo, &coordinate).await.is_none());
    }
}
