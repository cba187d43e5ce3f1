//! Brute-force linear scan: O(n) threshold search.

use crate::config::{DuplicatePolicy, InsertOutcome, TreeConfig};
use crate::index::RangeIndex;
use crate::metric::Metric;
use crate::search::Match;

/// A flat index that computes the distance to every stored item.
///
/// Serves as ground truth for the BK-tree: it applies the same duplicate
/// policy, so both hold the same items after the same inserts.
#[derive(Debug, Clone)]
pub struct LinearScan<T> {
    items: Vec<T>,
    config: TreeConfig,
}

impl<T> LinearScan<T> {
    /// Create a new empty scan with the default configuration.
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            items: Vec::new(),
            config,
        }
    }

    /// Iterate over all stored items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T: Metric> LinearScan<T> {
    /// Count of distance computations a query costs.
    pub fn distance_evaluations_per_query(&self) -> u64 {
        self.items.len() as u64
    }
}

impl<T> Default for LinearScan<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Metric> RangeIndex<T> for LinearScan<T> {
    fn insert(&mut self, item: T) -> InsertOutcome {
        match self.items.iter().position(|stored| item.distance(stored) == 0) {
            None => {
                self.items.push(item);
                InsertOutcome::Inserted
            }
            Some(pos) => match self.config.duplicate_policy {
                DuplicatePolicy::Ignore => InsertOutcome::Ignored,
                DuplicatePolicy::Replace => {
                    self.items[pos] = item;
                    InsertOutcome::Replaced
                }
            },
        }
    }

    fn find_within<'a>(&'a self, query: &'a T, threshold: u32) -> Vec<Match<'a, T>> {
        self.items
            .iter()
            .map(|item| Match {
                item,
                distance: query.distance(item),
            })
            .filter(|m| m.distance <= threshold)
            .collect()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}
