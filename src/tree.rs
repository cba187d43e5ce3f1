//! The BK-tree: root management over [`Node`].

use std::fmt;

use log::{debug, trace};

use crate::config::{InsertOutcome, TreeConfig};
use crate::error::Result;
use crate::metric::Metric;
use crate::node::{Iter, Node};
use crate::search::{Find, Matches, Threshold};

/// A Burkhard-Keller tree over items of a discrete metric space.
///
/// The first inserted item becomes the root and stays there; the tree only
/// ever grows. Items are not deleted and the tree is not rebalanced.
///
/// ```rust
/// use bktree_index::{BkTree, Word};
///
/// let mut tree = BkTree::new();
/// for w in ["hat", "hats", "hates", "hater", "mat", "matte"] {
///     tree.insert(Word::from(w));
/// }
///
/// let mut found: Vec<String> = tree
///     .find(&Word::from("mats"), 1)
///     .map(|w| w.to_string())
///     .collect();
/// found.sort();
/// assert_eq!(found, vec!["hats", "mat"]);
/// ```
#[derive(Debug, Clone)]
pub struct BkTree<T> {
    root: Option<Node<T>>,
    len: usize,
    config: TreeConfig,
}

impl<T> BkTree<T> {
    /// Create an empty tree with the default configuration.
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// Create an empty tree with the given configuration.
    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            root: None,
            len: 0,
            config,
        }
    }

    pub fn config(&self) -> TreeConfig {
        self.config
    }

    /// Number of items stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the tree; 0 when empty.
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, Node::depth)
    }

    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_ref()
    }

    /// Iterate over every stored item in tree order.
    pub fn iter(&self) -> Iter<'_, T> {
        match &self.root {
            Some(root) => root.iter(),
            None => Iter::empty(),
        }
    }
}

impl<T: Metric> BkTree<T> {
    /// Insert an item.
    ///
    /// An item at distance 0 from a stored item on its insertion path is
    /// handled by the configured [`crate::DuplicatePolicy`] and never stored
    /// twice.
    pub fn insert(&mut self, item: T) -> InsertOutcome {
        let Some(root) = self.root.as_mut() else {
            debug!("creating root node");
            self.root = Some(Node::new(item));
            self.len = 1;
            return InsertOutcome::Inserted;
        };

        let outcome = root.insert(item, self.config.duplicate_policy);
        match outcome {
            InsertOutcome::Inserted => {
                self.len += 1;
                trace!("attached new node, tree now holds {} items", self.len);
            }
            InsertOutcome::Ignored => debug!("dropped metric-equal duplicate"),
            InsertOutcome::Replaced => debug!("replaced metric-equal item"),
        }
        outcome
    }

    /// Lazily find every stored item within `threshold` of `query`.
    ///
    /// Result order is a tree walk and carries no meaning; compare results as
    /// sets. A threshold of 0 returns only items at distance 0 from the query.
    pub fn find<'a>(&'a self, query: &'a T, threshold: u32) -> Find<'a, T> {
        Find::new(self.find_with_distance(query, threshold))
    }

    /// Like [`BkTree::find`], but yields each item with its distance.
    pub fn find_with_distance<'a>(&'a self, query: &'a T, threshold: u32) -> Matches<'a, T> {
        match &self.root {
            Some(root) => root.find_with_distance(query, threshold),
            None => Matches::new(None, query, threshold),
        }
    }

    /// Like [`BkTree::find`], but takes a signed threshold and rejects
    /// negative values with [`crate::BkTreeError::InvalidThreshold`].
    pub fn try_find<'a>(&'a self, query: &'a T, threshold: i64) -> Result<Find<'a, T>> {
        let threshold = Threshold::try_from(threshold)?;
        Ok(self.find(query, threshold.get()))
    }

    /// Whether an item at distance 0 from `query` is stored.
    pub fn contains(&self, query: &T) -> bool {
        self.find(query, 0).next().is_some()
    }
}

impl<T> Default for BkTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Metric> Extend<T> for BkTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: Metric> FromIterator<T> for BkTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T> IntoIterator for &'a BkTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Display> fmt::Display for BkTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            Some(root) => write!(f, "BkTree<root:{}>", root),
            None => f.write_str("BkTree<root:None>"),
        }
    }
}
