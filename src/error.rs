//! Error types for the BK-tree index

use thiserror::Error;

/// Result type alias for BK-tree operations
pub type Result<T> = std::result::Result<T, BkTreeError>;

/// Error types that can occur around the index.
///
/// `insert` and `find` themselves are total; errors only come from
/// argument validation and from reading input.
#[derive(Error, Debug)]
pub enum BkTreeError {
    #[error("Invalid threshold: {threshold} (distances are non-negative)")]
    InvalidThreshold { threshold: i64 },

    #[error("Invalid threshold: {input:?} is not a non-negative integer")]
    InvalidThresholdText { input: String },

    #[error("Invalid fingerprint: {input:?}")]
    InvalidFingerprint { input: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
