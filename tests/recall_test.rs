//! Recall tests: the BK-tree finds every match a linear scan finds, while
//! computing fewer distances.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use bktree_index::{BkTree, LinearScan, RangeIndex, Word};

fn random_words(rng: &mut StdRng, n: usize) -> Vec<Word> {
    (0..n)
        .map(|_| {
            let len = rng.gen_range(3..9);
            let text: String = (0..len)
                .map(|_| rng.gen_range(b'a'..=b'h') as char)
                .collect();
            Word::from(text)
        })
        .collect()
}

fn test_recall(n: usize, threshold: u32, num_queries: usize, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let words = random_words(&mut rng, n);

    // Build linear scan (ground truth)
    let mut scan = LinearScan::new();
    for w in &words {
        scan.insert(w.clone());
    }

    // Build BK-tree
    let tree: BkTree<Word> = words.iter().cloned().collect();
    assert_eq!(tree.len(), scan.len());

    let queries = random_words(&mut rng, num_queries);
    let mut tree_evaluations = 0u64;

    for query in &queries {
        let expected: HashSet<&str> = scan
            .find_within(query, threshold)
            .into_iter()
            .map(|m| m.item.as_str())
            .collect();

        let mut found = tree.find(query, threshold);
        let got: HashSet<&str> = found.by_ref().map(Word::as_str).collect();
        tree_evaluations += found.distance_evaluations();

        assert_eq!(
            got, expected,
            "BK-tree missed or invented matches for {} at threshold {}",
            query, threshold
        );
    }

    let scan_evaluations = scan.distance_evaluations_per_query() * num_queries as u64;
    assert!(
        tree_evaluations < scan_evaluations,
        "no pruning: {} tree evaluations vs {} for the scan (n={}, t={})",
        tree_evaluations,
        scan_evaluations,
        n,
        threshold
    );
}

#[test]
fn test_recall_500_words_threshold_1() {
    test_recall(500, 1, 50, 7);
}

#[test]
fn test_recall_2000_words_threshold_1() {
    test_recall(2000, 1, 50, 11);
}

#[test]
fn test_recall_2000_words_threshold_2() {
    test_recall(2000, 2, 30, 13);
}
