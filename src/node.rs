//! BK-tree node: one item plus its children keyed by distance.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use crate::config::{DuplicatePolicy, InsertOutcome};
use crate::metric::Metric;
use crate::search::{Find, Matches};

/// A node in the BK-tree.
///
/// Every child stored under key `d` holds an item at distance exactly `d`
/// from this node's item. There is at most one child per distance, and the
/// node owns its whole subtree.
#[derive(Debug, Clone)]
pub struct Node<T> {
    item: T,
    children: BTreeMap<u32, Node<T>>,
}

impl<T> Node<T> {
    /// Create a leaf holding `item`.
    pub fn new(item: T) -> Self {
        Self {
            item,
            children: BTreeMap::new(),
        }
    }

    /// The item stored at this node.
    pub fn item(&self) -> &T {
        &self.item
    }

    /// Children keyed by their distance from this node's item.
    pub fn children(&self) -> &BTreeMap<u32, Node<T>> {
        &self.children
    }

    /// The child at distance `d`, if any.
    pub fn child(&self, d: u32) -> Option<&Node<T>> {
        self.children.get(&d)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of items in this subtree, this node included.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Height of this subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(node.children.values().map(|child| (child, level + 1)));
        }
        deepest
    }

    /// Iterate over every item in this subtree, pre-order, children in
    /// ascending distance.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { stack: vec![self] }
    }
}

impl<T: Metric> Node<T> {
    /// Insert `item` below this node.
    ///
    /// Descends through the children whose key equals the item's distance from
    /// each visited node until it finds a free slot. An item at distance 0
    /// from a visited node is resolved by `policy` instead of being stored
    /// twice.
    pub fn insert(&mut self, item: T, policy: DuplicatePolicy) -> InsertOutcome {
        let mut current = self;
        loop {
            let d = item.distance(&current.item);
            if d == 0 {
                return match policy {
                    DuplicatePolicy::Ignore => InsertOutcome::Ignored,
                    DuplicatePolicy::Replace => {
                        current.item = item;
                        InsertOutcome::Replaced
                    }
                };
            }

            match current.children.entry(d) {
                btree_map::Entry::Occupied(entry) => current = entry.into_mut(),
                btree_map::Entry::Vacant(entry) => {
                    entry.insert(Node::new(item));
                    return InsertOutcome::Inserted;
                }
            }
        }
    }

    /// Lazily find every item in this subtree within `threshold` of `query`.
    pub fn find<'a>(&'a self, query: &'a T, threshold: u32) -> Find<'a, T> {
        Find::new(self.find_with_distance(query, threshold))
    }

    /// Like [`Node::find`], but yields each item with its distance.
    pub fn find_with_distance<'a>(&'a self, query: &'a T, threshold: u32) -> Matches<'a, T> {
        Matches::new(Some(self), query, threshold)
    }
}

impl<T: fmt::Display> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node<item:{}, children:[", self.item)?;
        for (i, (d, child)) in self.children.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}:{}", d, child)?;
        }
        f.write_str("]>")
    }
}

/// Pre-order iterator over the items of a subtree.
#[derive(Debug)]
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<T> Iter<'_, T> {
    pub(crate) fn empty() -> Self {
        Self { stack: Vec::new() }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.values().rev());
        Some(&node.item)
    }
}

impl<T> std::iter::FusedIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::Word;

    fn words(root: &str, rest: &[&str]) -> Node<Word> {
        let mut node = Node::new(Word::from(root));
        for w in rest {
            node.insert(Word::from(*w), DuplicatePolicy::Ignore);
        }
        node
    }

    #[test]
    fn test_new_node_has_own_empty_children() {
        let mut a = Node::new(Word::from("hat"));
        let b = Node::new(Word::from("mat"));
        a.insert(Word::from("hats"), DuplicatePolicy::Ignore);

        assert_eq!(a.children().len(), 1);
        assert!(b.is_leaf());
    }

    #[test]
    fn test_insert_attaches_at_distance() {
        let node = words("hat", &["hats", "hates", "hater"]);

        assert_eq!(node.child(1).unwrap().item().as_str(), "hats");
        assert_eq!(node.child(2).unwrap().item().as_str(), "hates");
        // "hater" collides with "hates" at key 2 and descends
        let hates = node.child(2).unwrap();
        assert_eq!(hates.child(1).unwrap().item().as_str(), "hater");
    }

    #[test]
    fn test_children_keys_match_distances() {
        let node = words("hat", &["hats", "hates", "hater", "mat", "matte"]);
        let mut stack = vec![&node];
        while let Some(n) = stack.pop() {
            for (d, child) in n.children() {
                assert_eq!(n.item().distance(child.item()), *d);
                stack.push(child);
            }
        }
    }

    #[test]
    fn test_duplicate_ignored() {
        let mut node = words("hat", &["hats"]);
        let outcome = node.insert(Word::from("hats"), DuplicatePolicy::Ignore);
        assert_eq!(outcome, InsertOutcome::Ignored);
        assert_eq!(node.len(), 2);
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Record {
        key: &'static str,
        id: u32,
    }

    impl Metric for Record {
        fn distance(&self, other: &Self) -> u32 {
            crate::distance::levenshtein(self.key, other.key)
        }
    }

    #[test]
    fn test_duplicate_replaced() {
        let mut node = Node::new(Record { key: "hat", id: 1 });
        node.insert(Record { key: "hats", id: 2 }, DuplicatePolicy::Ignore);

        let outcome = node.insert(Record { key: "hats", id: 3 }, DuplicatePolicy::Replace);
        assert_eq!(outcome, InsertOutcome::Replaced);
        assert_eq!(node.child(1).unwrap().item().id, 3);
        assert_eq!(node.len(), 2);
    }

    #[test]
    fn test_len_and_depth() {
        let node = words("hat", &["hats", "hates", "hater", "mat", "matte"]);
        assert_eq!(node.len(), 6);
        assert!(node.depth() >= 3);

        let leaf = Node::new(Word::from("solo"));
        assert_eq!(leaf.len(), 1);
        assert_eq!(leaf.depth(), 1);
    }

    #[test]
    fn test_iter_preorder() {
        let node = words("hat", &["hats", "hates", "hater"]);
        let items: Vec<&str> = node.iter().map(|w| w.as_str()).collect();
        assert_eq!(items, vec!["hat", "hats", "hates", "hater"]);
    }

    #[test]
    fn test_find_from_subtree() {
        let node = words("hat", &["hats", "hates", "hater", "mat", "matte"]);
        let hates = node.child(2).unwrap();
        let query = Word::from("haters");
        let mut found: Vec<&str> = hates.find(&query, 1).map(Word::as_str).collect();
        found.sort();
        assert_eq!(found, vec!["hater", "hates"]);
    }

    #[test]
    fn test_display() {
        let node = words("hat", &["hats"]);
        assert_eq!(
            node.to_string(),
            "Node<item:hat, children:[1:Node<item:hats, children:[]>]>"
        );
    }
}
