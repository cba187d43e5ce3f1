//! CLI interface for the BK-tree index

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn, LevelFilter};
use rayon::prelude::*;
use serde::Serialize;
use simple_logger::SimpleLogger;

use bktree_index::wordlist::load_words;
use bktree_index::{
    BkTree, DuplicatePolicy, LinearScan, MetricsCollector, RangeIndex, Threshold, TreeConfig,
    Word,
};

#[derive(Parser)]
#[command(name = "bktree")]
#[command(about = "Fuzzy word lookup over a BK-tree", long_about = None)]
struct Cli {
    /// Word list to index, one word per line
    #[arg(short, long)]
    dictionary: PathBuf,

    /// What to do with words at edit distance 0 from an indexed word
    #[arg(long, value_enum, default_value = "ignore")]
    duplicates: DuplicateMode,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy)]
enum DuplicateMode {
    Ignore,
    Replace,
}

impl From<DuplicateMode> for DuplicatePolicy {
    fn from(mode: DuplicateMode) -> Self {
        match mode {
            DuplicateMode::Ignore => DuplicatePolicy::Ignore,
            DuplicateMode::Replace => DuplicatePolicy::Replace,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Find indexed words close to each query word
    Query {
        /// Words to look up
        #[arg(required = true)]
        words: Vec<String>,
        /// Maximum edit distance of a match
        #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
        threshold: Threshold,
        /// Stop after this many matches per query
        #[arg(short, long)]
        limit: Option<usize>,
        /// Print results as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Show the shape of the tree built from the dictionary
    Stats,
    /// Compare the BK-tree against a linear scan
    Bench {
        /// Maximum edit distance of a match
        #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
        threshold: Threshold,
        /// Number of dictionary words to use as queries
        #[arg(short, long, default_value = "100")]
        queries: usize,
    },
}

#[derive(Serialize)]
struct MatchReport {
    item: String,
    distance: u32,
}

#[derive(Serialize)]
struct QueryReport {
    query: String,
    matches: Vec<MatchReport>,
}

fn build_tree(words: Vec<Word>, config: TreeConfig, metrics: &mut MetricsCollector) -> BkTree<Word> {
    let mut tree = BkTree::with_config(config);
    for word in words {
        metrics.record_insert(tree.insert(word));
    }
    info!("indexed {} words, depth {}", tree.len(), tree.depth());
    tree
}

fn run_query(
    tree: &BkTree<Word>,
    words: Vec<String>,
    threshold: Threshold,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let limit = limit.unwrap_or(usize::MAX);

    // The tree is only read here, so queries can share it across threads.
    let reports: Vec<QueryReport> = words
        .par_iter()
        .map(|text| {
            let query = Word::from(text.as_str());
            let mut matches: Vec<MatchReport> = tree
                .find_with_distance(&query, threshold.get())
                .take(limit)
                .map(|m| MatchReport {
                    item: m.item.to_string(),
                    distance: m.distance,
                })
                .collect();
            matches.sort_by(|a, b| a.distance.cmp(&b.distance).then_with(|| a.item.cmp(&b.item)));
            QueryReport {
                query: text.clone(),
                matches,
            }
        })
        .collect();

    for report in reports {
        if json {
            println!("{}", serde_json::to_string(&report)?);
            continue;
        }
        if report.matches.is_empty() {
            println!("{}: no matches within {}", report.query, threshold);
        } else {
            println!("{}: {} matches within {}", report.query, report.matches.len(), threshold);
            for m in &report.matches {
                println!("  - {} (distance: {})", m.item, m.distance);
            }
        }
    }
    Ok(())
}

fn run_bench(words: Vec<Word>, config: TreeConfig, threshold: Threshold, queries: usize) {
    let queries: Vec<Word> = words.iter().take(queries).cloned().collect();

    let mut build_metrics = MetricsCollector::new();
    let mut linear = LinearScan::with_config(config);
    for word in &words {
        linear.insert(word.clone());
    }
    let tree = build_tree(words, config, &mut build_metrics);

    let mut tree_metrics = MetricsCollector::new();
    let mut linear_metrics = MetricsCollector::new();

    for query in &queries {
        let start = Instant::now();
        let mut found = tree.find(query, threshold.get());
        let count = found.by_ref().count();
        tree_metrics.record_query(start.elapsed(), found.distance_evaluations());

        let start = Instant::now();
        let expected = linear.find_within(query, threshold.get()).len();
        linear_metrics.record_query(start.elapsed(), linear.distance_evaluations_per_query());

        if count != expected {
            warn!(
                "result mismatch for {}: tree {} vs scan {}",
                query,
                count,
                expected
            );
        }
    }

    println!(
        "{} words indexed, {} queries at threshold {}",
        tree.len(),
        tree_metrics.total_queries(),
        threshold
    );
    for (name, m) in [("bk-tree", &tree_metrics), ("linear", &linear_metrics)] {
        println!(
            "{:>8}: avg {:.1}us, p95 {:.1}us, {:.1} distance evaluations/query",
            name,
            m.avg_query_latency_us(),
            m.percentile_query_latency_us(95.0),
            m.avg_distance_evaluations()
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    SimpleLogger::new().with_level(level).init()?;

    let words = load_words(&cli.dictionary)
        .with_context(|| format!("failed to load dictionary {}", cli.dictionary.display()))?;
    let config = TreeConfig::new(cli.duplicates.into());

    match cli.command {
        Commands::Query {
            words: queries,
            threshold,
            limit,
            json,
        } => {
            let mut metrics = MetricsCollector::new();
            let tree = build_tree(words, config, &mut metrics);
            run_query(&tree, queries, threshold, limit, json)?;
        }
        Commands::Stats => {
            let mut metrics = MetricsCollector::new();
            let tree = build_tree(words, config, &mut metrics);
            println!("Items: {}", tree.len());
            println!("Depth: {}", tree.depth());
            println!("Duplicates collapsed: {}", metrics.total_duplicates());
            if let Some(root) = tree.root() {
                println!("Root: {} ({} children)", root.item(), root.children().len());
            }
        }
        Commands::Bench { threshold, queries } => {
            run_bench(words, config, threshold, queries);
        }
    }
    Ok(())
}
