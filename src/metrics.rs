//! Observability metrics: insert outcomes, query latency, pruning effectiveness.

use std::time::Duration;

use crate::config::InsertOutcome;

/// Collects runtime metrics for an index.
#[derive(Debug)]
pub struct MetricsCollector {
    query_latencies_us: Vec<f64>,
    total_queries: u64,
    total_inserts: u64,
    total_duplicates: u64,
    total_distance_evaluations: u64,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            query_latencies_us: Vec::new(),
            total_queries: 0,
            total_inserts: 0,
            total_duplicates: 0,
            total_distance_evaluations: 0,
        }
    }

    /// Record the outcome of an insert.
    pub fn record_insert(&mut self, outcome: InsertOutcome) {
        match outcome {
            InsertOutcome::Inserted => self.total_inserts += 1,
            InsertOutcome::Ignored | InsertOutcome::Replaced => self.total_duplicates += 1,
        }
    }

    /// Record a query with its duration and the number of distances it computed.
    pub fn record_query(&mut self, duration: Duration, distance_evaluations: u64) {
        self.total_queries += 1;
        self.total_distance_evaluations += distance_evaluations;
        self.query_latencies_us.push(duration.as_micros() as f64);
    }

    pub fn total_queries(&self) -> u64 {
        self.total_queries
    }

    pub fn total_inserts(&self) -> u64 {
        self.total_inserts
    }

    pub fn total_duplicates(&self) -> u64 {
        self.total_duplicates
    }

    pub fn total_distance_evaluations(&self) -> u64 {
        self.total_distance_evaluations
    }

    /// Average query latency in microseconds.
    pub fn avg_query_latency_us(&self) -> f64 {
        if self.query_latencies_us.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.query_latencies_us.iter().sum();
        sum / self.query_latencies_us.len() as f64
    }

    /// Get a percentile of query latency (e.g., 50.0, 95.0, 99.0).
    pub fn percentile_query_latency_us(&self, percentile: f64) -> f64 {
        if self.query_latencies_us.is_empty() {
            return 0.0;
        }

        let mut sorted = self.query_latencies_us.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let index = ((percentile / 100.0) * (sorted.len() - 1) as f64).round() as usize;
        sorted[index.min(sorted.len() - 1)]
    }

    /// Average number of distance computations per query.
    pub fn avg_distance_evaluations(&self) -> f64 {
        if self.total_queries == 0 {
            return 0.0;
        }
        self.total_distance_evaluations as f64 / self.total_queries as f64
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_metrics_basic() {
        let mut m = MetricsCollector::new();
        m.record_insert(InsertOutcome::Inserted);
        m.record_insert(InsertOutcome::Inserted);
        m.record_insert(InsertOutcome::Ignored);

        assert_eq!(m.total_inserts(), 2);
        assert_eq!(m.total_duplicates(), 1);
        assert_eq!(m.total_queries(), 0);
    }

    #[test]
    fn test_metrics_latency() {
        let mut m = MetricsCollector::new();
        m.record_query(Duration::from_micros(100), 4);
        m.record_query(Duration::from_micros(200), 6);
        m.record_query(Duration::from_micros(300), 11);

        assert_eq!(m.total_queries(), 3);
        assert_eq!(m.total_distance_evaluations(), 21);
        assert_relative_eq!(m.avg_query_latency_us(), 200.0, epsilon = 1.0);
        assert_relative_eq!(m.percentile_query_latency_us(50.0), 200.0, epsilon = 1.0);
        assert_relative_eq!(m.avg_distance_evaluations(), 7.0, epsilon = 1e-9);
    }

    #[test]
    fn test_metrics_empty() {
        let m = MetricsCollector::new();
        assert_eq!(m.avg_query_latency_us(), 0.0);
        assert_eq!(m.percentile_query_latency_us(99.0), 0.0);
        assert_eq!(m.avg_distance_evaluations(), 0.0);
    }
}
