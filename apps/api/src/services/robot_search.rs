use crate::{
    catalog::{load_snapshot, Catalog, CatalogSnapshot, RobotIndex},
    error::{ApiError, Result},
    models::{QueryResult, Robot},
    search::QueryResolver,
};
use std::{
    path::PathBuf,
    sync::Arc,
    time::Instant,
};
use tracing::{debug, error, info};

/// Answers robot queries against the active catalog snapshot and reloads it on request
pub struct RobotSearchService {
    catalog: Catalog,
    resolver: QueryResolver,
    catalog_path: PathBuf,
}

impl RobotSearchService {
    pub fn new(snapshot: CatalogSnapshot, resolver: QueryResolver, catalog_path: PathBuf) -> Self {
        Self {
            catalog: Catalog::new(snapshot),
            resolver,
            catalog_path,
        }
    }

    /// Load the catalog file and build the service around it
    pub fn load(resolver: QueryResolver, catalog_path: PathBuf) -> Result<Self> {
        let snapshot = load_snapshot(&catalog_path)?;
        Ok(Self::new(snapshot, resolver, catalog_path))
    }

    /// Resolve a free-text query. The whole query sees one snapshot.
    pub fn search(&self, query: &str) -> Result<QueryResult> {
        let started = Instant::now();
        let snapshot = self.catalog.snapshot();

        let result = self.resolver.resolve(&*snapshot, query).map_err(|e| {
            error!("Failed to resolve query '{}': {}", query, e);
            e
        })?;

        info!(
            "Resolved query '{}' as {} with {} robots in {:?}",
            query,
            result.kind().as_str(),
            result.robots().len(),
            started.elapsed()
        );

        Ok(result)
    }

    pub fn by_number(&self, number: i64) -> Result<Vec<Arc<Robot>>> {
        self.catalog.snapshot().by_number(number)
    }

    pub fn by_name_prefix(&self, prefix: &str) -> Result<Vec<Arc<Robot>>> {
        self.catalog.snapshot().by_name_prefix(&prefix.to_lowercase())
    }

    pub fn by_tag(&self, tag: &str) -> Result<Vec<Arc<Robot>>> {
        self.catalog.snapshot().by_tag(&tag.to_lowercase())
    }

    pub fn random(&self) -> Result<Option<Arc<Robot>>> {
        self.catalog.snapshot().random()
    }

    pub fn catalog_size(&self) -> usize {
        self.catalog.snapshot().len()
    }

    /// Re-read the catalog file and swap it in. On failure the current catalog stays active.
    pub async fn reload(&self) -> Result<usize> {
        let path = self.catalog_path.clone();
        info!("Reloading catalog from {}", path.display());

        let snapshot = tokio::task::spawn_blocking(move || load_snapshot(&path))
            .await
            .map_err(|e| ApiError::InternalError(format!("Catalog reload task failed: {}", e)))?
            .map_err(|e| {
                error!("Catalog reload failed, keeping current catalog: {}", e);
                e
            })?;

        let size = self.catalog.replace(snapshot);
        debug!("Catalog swapped, {} robots active", size);

        Ok(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_search_config;
    use crate::models::ResultKind;
    use std::fs;

    fn catalog_json(robots: &[(i64, &str, &str)]) -> String {
        let entries: Vec<serde_json::Value> = robots
            .iter()
            .map(|(number, name, tag)| {
                serde_json::json!({
                    "number": number,
                    "name": name,
                    "source_ref": 1000 + number,
                    "timestamp": "2018-02-09T10:00:00Z",
                    "tags": [tag],
                })
            })
            .collect();
        serde_json::to_string(&entries).unwrap()
    }

    #[tokio::test]
    async fn test_reload_swaps_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("robots.json");
        fs::write(&path, catalog_json(&[(1, "Onebot", "first")])).unwrap();

        let service =
            RobotSearchService::load(QueryResolver::new(test_search_config()), path.clone())
                .unwrap();
        assert_eq!(service.catalog_size(), 1);
        assert_eq!(service.search("onebot").unwrap().kind(), ResultKind::Search);

        fs::write(
            &path,
            catalog_json(&[(2, "Twobot", "second"), (3, "Threebot", "third")]),
        )
        .unwrap();

        assert_eq!(service.reload().await.unwrap(), 2);
        assert_eq!(service.search("onebot").unwrap(), QueryResult::Empty);
        assert_eq!(service.by_tag("Third").unwrap()[0].number, 3);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("robots.json");
        fs::write(&path, catalog_json(&[(1, "Onebot", "first")])).unwrap();

        let service =
            RobotSearchService::load(QueryResolver::new(test_search_config()), path.clone())
                .unwrap();

        fs::write(&path, "not json").unwrap();
        assert!(service.reload().await.is_err());
        assert_eq!(service.catalog_size(), 1);
        assert_eq!(service.by_number(1).unwrap()[0].name, "Onebot");
    }
}
