//! Index trait shared by the BK-tree and the brute-force reference.

use crate::config::InsertOutcome;
use crate::metric::Metric;
use crate::search::Match;
use crate::tree::BkTree;

/// A metric index that answers "everything within `threshold` of `query`".
///
/// Result order is unspecified for every implementation.
pub trait RangeIndex<T: Metric> {
    /// Add an item, resolving metric-equal duplicates per the index's policy.
    fn insert(&mut self, item: T) -> InsertOutcome;

    /// Collect every stored item within `threshold` of `query`.
    fn find_within<'a>(&'a self, query: &'a T, threshold: u32) -> Vec<Match<'a, T>>;

    /// The number of items in this index.
    fn len(&self) -> usize;

    /// Whether the index is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Metric> RangeIndex<T> for BkTree<T> {
    fn insert(&mut self, item: T) -> InsertOutcome {
        BkTree::insert(self, item)
    }

    fn find_within<'a>(&'a self, query: &'a T, threshold: u32) -> Vec<Match<'a, T>> {
        self.find_with_distance(query, threshold).collect()
    }

    fn len(&self) -> usize {
        BkTree::len(self)
    }
}
