//! Tree configuration.

use serde::{Deserialize, Serialize};

/// What to do when an inserted item is at distance 0 from an item already
/// stored on its insertion path.
///
/// Metric equality is not necessarily value equality (two records can share
/// the same key text), so the choice decides which of them the tree keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Keep the item already stored and drop the incoming one.
    #[default]
    Ignore,
    /// Overwrite the stored item with the incoming one.
    Replace,
}

/// Configuration for a [`crate::BkTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TreeConfig {
    pub duplicate_policy: DuplicatePolicy,
}

impl TreeConfig {
    pub fn new(duplicate_policy: DuplicatePolicy) -> Self {
        Self { duplicate_policy }
    }
}

/// The result of a single insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsertOutcome {
    /// A new node was attached.
    Inserted,
    /// The item was metric-equal to a stored one and was dropped.
    Ignored,
    /// The item was metric-equal to a stored one and took its place.
    Replaced,
}

impl InsertOutcome {
    /// Whether the tree grew by one item.
    pub fn is_inserted(&self) -> bool {
        matches!(self, InsertOutcome::Inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_ignores() {
        assert_eq!(TreeConfig::default().duplicate_policy, DuplicatePolicy::Ignore);
    }

    #[test]
    fn test_config_from_json() {
        let config: TreeConfig =
            serde_json::from_str(r#"{"duplicate-policy":"replace"}"#).unwrap();
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Replace);

        let config: TreeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TreeConfig::default());
    }

    #[test]
    fn test_outcome_is_inserted() {
        assert!(InsertOutcome::Inserted.is_inserted());
        assert!(!InsertOutcome::Ignored.is_inserted());
        assert!(!InsertOutcome::Replaced.is_inserted());
    }
}
