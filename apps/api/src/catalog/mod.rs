//! The robot catalog: a read-only index capability and the snapshot holder that
//! lets a reload replace the whole catalog at once.

use crate::error::{ApiError, Result};
use arc_swap::ArcSwap;
use crate::models::{Robot, RobotRecord};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub mod snapshot;

pub use snapshot::CatalogSnapshot;

/// Keyed lookups over the robot catalog.
///
/// Name-prefix and tag keys are expected to be lowercased by the caller.
pub trait RobotIndex: Send + Sync {
    fn by_number(&self, number: i64) -> Result<Vec<Arc<Robot>>>;

    fn by_name_prefix(&self, prefix: &str) -> Result<Vec<Arc<Robot>>>;

    fn by_tag(&self, tag: &str) -> Result<Vec<Arc<Robot>>>;

    /// One robot picked uniformly from the whole catalog, or `None` when it is empty
    fn random(&self) -> Result<Option<Arc<Robot>>>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Holds the active snapshot. Readers take their own `Arc` and keep using it for
/// the whole query; a reload stores a new, fully built snapshot.
pub struct Catalog {
    current: ArcSwap<CatalogSnapshot>,
}

impl Catalog {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self {
            current: ArcSwap::from_pointee(snapshot),
        }
    }

    /// The snapshot in effect right now
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.current.load_full()
    }

    /// Atomically make `snapshot` the active one and return the size of the new catalog
    pub fn replace(&self, snapshot: CatalogSnapshot) -> usize {
        let size = snapshot.len();
        self.current.store(Arc::new(snapshot));
        size
    }
}

/// Read a JSON array of robot records
pub fn load_robots(path: &Path) -> Result<Vec<Robot>> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        ApiError::CatalogError(format!("Failed to read catalog {}: {}", path.display(), e))
    })?;

    let records: Vec<RobotRecord> = serde_json::from_str(&text)?;
    Ok(records.into_iter().map(Robot::from).collect())
}

/// Load and index the catalog file in one step
pub fn load_snapshot(path: &Path) -> Result<CatalogSnapshot> {
    let robots = load_robots(path)?;
    let snapshot = CatalogSnapshot::build(robots)?;
    info!(
        "Indexed {} robots from {}",
        snapshot.len(),
        path.display()
    );
    Ok(snapshot)
}
