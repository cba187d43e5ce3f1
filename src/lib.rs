//! # BK-tree Index
//!
//! A Burkhard-Keller tree for threshold search in discrete metric spaces.
//!
//! This library provides:
//! - The `Metric` contract items implement to be indexed
//! - A BK-tree with lazy, pruned threshold search
//! - A brute-force linear scan behind the same `RangeIndex` trait
//! - Reference metrics (Levenshtein, Hamming) and word-list loading
//!
//! ## Example
//!
//! ```rust
//! use bktree_index::{BkTree, Word};
//!
//! // Build a tree
//! let mut tree = BkTree::new();
//! for w in ["hat", "hats", "hates", "hater", "mat", "matte"] {
//!     tree.insert(Word::from(w));
//! }
//!
//! // Everything within one edit of "haters"
//! let query = Word::from("haters");
//! let mut hits: Vec<&str> = tree.find(&query, 1).map(Word::as_str).collect();
//! hits.sort();
//! assert_eq!(hits, vec!["hater", "hates"]);
//! ```

pub mod config;
pub mod distance;
pub mod error;
pub mod index;
pub mod linear;
pub mod metric;
pub mod metrics;
pub mod node;
pub mod search;
pub mod tree;
pub mod wordlist;

pub use config::{DuplicatePolicy, InsertOutcome, TreeConfig};
pub use distance::{Fingerprint, Word};
pub use error::{BkTreeError, Result};
pub use index::RangeIndex;
pub use linear::LinearScan;
pub use metric::Metric;
pub use metrics::MetricsCollector;
pub use node::Node;
pub use search::{Find, Match, Matches, Threshold};
pub use tree::BkTree;
