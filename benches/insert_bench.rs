//! BK-tree construction benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use bktree_index::{BkTree, Fingerprint, Word};

fn create_random_words(n: usize) -> Vec<Word> {
    let mut rng = StdRng::seed_from_u64(1);
    (0..n)
        .map(|_| {
            let len = rng.gen_range(4..10);
            let text: String = (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect();
            Word::from(text)
        })
        .collect()
}

fn benchmark_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("bktree_insert");
    group.sample_size(10);

    let words = create_random_words(5_000);
    group.bench_function("insert_5000_words", |b| {
        b.iter(|| {
            let mut tree = BkTree::new();
            for w in &words {
                tree.insert(black_box(w.clone()));
            }
            tree
        });
    });

    let fingerprints: Vec<Fingerprint> = (0..5_000u64)
        .map(|i| Fingerprint::new(i.wrapping_mul(0x9E37_79B9_7F4A_7C15)))
        .collect();
    group.bench_function("insert_5000_fingerprints", |b| {
        b.iter(|| fingerprints.iter().copied().collect::<BkTree<Fingerprint>>());
    });

    group.finish();
}

criterion_group!(benches, benchmark_insert);
criterion_main!(benches);
