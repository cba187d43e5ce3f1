//! Threshold search over a BK-tree.
//!
//! Search is a lazy, pull-based depth-first walk. At a node whose item is at
//! distance `d` from the query, any match within `t` of the query can only
//! live under a child whose key lies in `[d - t, d + t]`: for a descendant `x`
//! of the child at key `k`, the triangle inequality gives
//! `|d - k| <= distance(query, x)`. Every other child is skipped without a
//! single distance computation.

use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{BkTreeError, Result};
use crate::metric::Metric;
use crate::node::Node;

/// Maximum distance at which an item counts as a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Threshold(u32);

impl Threshold {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for Threshold {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl TryFrom<i64> for Threshold {
    type Error = BkTreeError;

    fn try_from(value: i64) -> Result<Self> {
        if value < 0 {
            return Err(BkTreeError::InvalidThreshold { threshold: value });
        }
        // Thresholds past u32::MAX match everything a u32 one does.
        Ok(Self(u32::try_from(value).unwrap_or(u32::MAX)))
    }
}

impl FromStr for Threshold {
    type Err = BkTreeError;

    fn from_str(s: &str) -> Result<Self> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| BkTreeError::InvalidThresholdText {
                input: s.to_string(),
            })?;
        Self::try_from(value)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored item found by a search, with its distance to the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Match<'a, T> {
    pub item: &'a T,
    pub distance: u32,
}

/// Lazy iterator over the matches of a threshold search.
///
/// Nothing is computed until the iterator is pulled, and dropping it early
/// abandons the rest of the walk.
pub struct Matches<'a, T> {
    query: &'a T,
    threshold: u32,
    stack: Vec<&'a Node<T>>,
    evaluations: u64,
}

impl<'a, T> Matches<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, query: &'a T, threshold: u32) -> Self {
        Self {
            query,
            threshold,
            stack: root.into_iter().collect(),
            evaluations: 0,
        }
    }

    /// Number of distance computations performed so far.
    pub fn distance_evaluations(&self) -> u64 {
        self.evaluations
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}

impl<'a, T: Metric> Iterator for Matches<'a, T> {
    type Item = Match<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            let d = self.query.distance(node.item());
            self.evaluations += 1;

            let low = d.saturating_sub(self.threshold);
            let high = d.saturating_add(self.threshold);
            // Reversed so the lowest key is popped first.
            self.stack
                .extend(node.children().range(low..=high).rev().map(|(_, child)| child));

            if d <= self.threshold {
                return Some(Match {
                    item: node.item(),
                    distance: d,
                });
            }
        }
        None
    }
}

impl<T: Metric> FusedIterator for Matches<'_, T> {}

impl<T> fmt::Debug for Matches<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matches")
            .field("threshold", &self.threshold)
            .field("pending", &self.stack.len())
            .field("evaluations", &self.evaluations)
            .finish()
    }
}

/// Lazy iterator over the items within a threshold of a query.
#[derive(Debug)]
pub struct Find<'a, T> {
    inner: Matches<'a, T>,
}

impl<'a, T> Find<'a, T> {
    pub(crate) fn new(inner: Matches<'a, T>) -> Self {
        Self { inner }
    }

    /// Number of distance computations performed so far.
    pub fn distance_evaluations(&self) -> u64 {
        self.inner.distance_evaluations()
    }

    /// Switch to yielding items together with their distances.
    pub fn with_distances(self) -> Matches<'a, T> {
        self.inner
    }
}

impl<'a, T: Metric> Iterator for Find<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|m| m.item)
    }
}

impl<T: Metric> FusedIterator for Find<'_, T> {}
