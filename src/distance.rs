//! Reference distance functions and item types built on them.
//!
//! The tree itself is agnostic of how distances are computed; these are the
//! instantiations the CLI, tests and benchmarks use.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BkTreeError, Result};
use crate::metric::Metric;

/// Compute the Levenshtein edit distance between two strings.
///
/// Counts single-character insertions, deletions and substitutions over
/// Unicode scalar values. Uses two rows of the classic dynamic programming
/// table, sized by the shorter input.
pub fn levenshtein(a: &str, b: &str) -> u32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let (long, short) = if a.len() >= b.len() { (&a, &b) } else { (&b, &a) };
    if short.is_empty() {
        return long.len() as u32;
    }

    let mut prev: Vec<u32> = (0..=short.len() as u32).collect();
    let mut curr: Vec<u32> = vec![0; short.len() + 1];

    for (i, lc) in long.iter().enumerate() {
        curr[0] = i as u32 + 1;
        for (j, sc) in short.iter().enumerate() {
            let substitution = prev[j] + u32::from(lc != sc);
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;
            curr[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

/// Compute the Hamming distance between two 64-bit values.
pub fn hamming(a: u64, b: u64) -> u32 {
    (a ^ b).count_ones()
}

/// A string compared by edit distance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Word(String);

impl Word {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Metric for Word {
    fn distance(&self, other: &Self) -> u32 {
        levenshtein(&self.0, &other.0)
    }
}

impl Metric for str {
    fn distance(&self, other: &Self) -> u32 {
        levenshtein(self, other)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Word {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Word {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl FromStr for Word {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A 64-bit perceptual hash compared by Hamming distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(u64);

impl Fingerprint {
    pub fn new(bits: u64) -> Self {
        Self(bits)
    }

    pub fn bits(&self) -> u64 {
        self.0
    }

    /// Parse a fingerprint from hex, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        u64::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| BkTreeError::InvalidFingerprint {
                input: s.to_string(),
            })
    }
}

impl Metric for Fingerprint {
    fn distance(&self, other: &Self) -> u32 {
        hamming(self.0, other.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

impl FromStr for Fingerprint {
    type Err = BkTreeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}
