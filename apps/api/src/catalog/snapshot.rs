use crate::catalog::RobotIndex;
use crate::error::{ApiError, Result};
use crate::models::Robot;
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::sync::Arc;

/// Immutable, fully indexed view of the catalog.
///
/// Every index maps a key to positions in `robots`, kept in catalog order so that
/// lookups return robots in a stable order.
#[derive(Debug, Default)]
pub struct CatalogSnapshot {
    robots: Vec<Arc<Robot>>,
    number_index: HashMap<i64, usize>,
    prefix_index: HashMap<String, Vec<usize>>,
    tag_index: HashMap<String, Vec<usize>>,
}

impl CatalogSnapshot {
    /// Build every index up front. Duplicate robot numbers are rejected.
    pub fn build(robots: Vec<Robot>) -> Result<Self> {
        let mut snapshot = Self {
            robots: Vec::with_capacity(robots.len()),
            ..Self::default()
        };

        for (position, robot) in robots.into_iter().enumerate() {
            if snapshot.number_index.insert(robot.number, position).is_some() {
                return Err(ApiError::CatalogError(format!(
                    "Duplicate robot number {}",
                    robot.number
                )));
            }

            snapshot
                .prefix_index
                .entry(robot.name_prefix().to_string())
                .or_default()
                .push(position);

            for tag in &robot.tags {
                snapshot
                    .tag_index
                    .entry(tag.clone())
                    .or_default()
                    .push(position);
            }

            snapshot.robots.push(Arc::new(robot));
        }

        Ok(snapshot)
    }

    pub fn robots(&self) -> &[Arc<Robot>] {
        &self.robots
    }

    fn collect(&self, positions: Option<&Vec<usize>>) -> Vec<Arc<Robot>> {
        positions
            .map(|positions| positions.iter().map(|&p| self.robots[p].clone()).collect())
            .unwrap_or_default()
    }
}

impl RobotIndex for CatalogSnapshot {
    fn by_number(&self, number: i64) -> Result<Vec<Arc<Robot>>> {
        Ok(self
            .number_index
            .get(&number)
            .map(|&p| vec![self.robots[p].clone()])
            .unwrap_or_default())
    }

    fn by_name_prefix(&self, prefix: &str) -> Result<Vec<Arc<Robot>>> {
        if prefix.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.collect(self.prefix_index.get(prefix)))
    }

    fn by_tag(&self, tag: &str) -> Result<Vec<Arc<Robot>>> {
        Ok(self.collect(self.tag_index.get(tag)))
    }

    fn random(&self) -> Result<Option<Arc<Robot>>> {
        Ok(self.robots.choose(&mut rand::thread_rng()).cloned())
    }

    fn len(&self) -> usize {
        self.robots.len()
    }
}
