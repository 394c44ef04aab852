//! Configuration types for dispatching
//!
//! Level 4 - Utilities and configuration

use serde::{Deserialize, Serialize};

/// Order in which balancing criteria are applied
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriteriaOrder {
    /// Caller's priority order
    AsGiven,
    /// Criteria with the most distinct values first
    MostDistinctFirst,
}

impl Default for CriteriaOrder {
    fn default() -> Self {
        CriteriaOrder::AsGiven
    }
}

/// Dispatch configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Upper bound on clash repair passes
    pub max_repair_passes: usize,
    /// Criteria priority
    pub criteria_order: CriteriaOrder,
    /// Keep pool leaders out of repair swaps
    pub protect_leaders: bool,
    /// Whether to build bout orders of several pools in parallel
    pub parallel: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_repair_passes: 8,
            criteria_order: CriteriaOrder::AsGiven,
            protect_leaders: true,
            parallel: true,
        }
    }
}

impl DispatchConfig {
    pub fn with_max_repair_passes(mut self, passes: usize) -> Self {
        self.max_repair_passes = passes;
        self
    }

    pub fn with_criteria_order(mut self, order: CriteriaOrder) -> Self {
        self.criteria_order = order;
        self
    }

    pub fn with_protect_leaders(mut self, protect: bool) -> Self {
        self.protect_leaders = protect;
        self
    }

    /// Run sequentially (e.g. for debugging)
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DispatchConfig::default();
        assert_eq!(config.max_repair_passes, 8);
        assert_eq!(config.criteria_order, CriteriaOrder::AsGiven);
        assert!(config.protect_leaders);
        assert!(config.parallel);
    }

    #[test]
    fn test_builders() {
        let config = DispatchConfig::default()
            .with_max_repair_passes(2)
            .with_criteria_order(CriteriaOrder::MostDistinctFirst)
            .sequential();
        assert_eq!(config.max_repair_passes, 2);
        assert_eq!(config.criteria_order, CriteriaOrder::MostDistinctFirst);
        assert!(!config.parallel);
    }

    #[test]
    fn test_partial_json() {
        let config: DispatchConfig =
            serde_json::from_str(r#"{"criteria_order": "most_distinct_first"}"#).unwrap();
        assert_eq!(config.criteria_order, CriteriaOrder::MostDistinctFirst);
        assert_eq!(config.max_repair_passes, 8);
    }
}
