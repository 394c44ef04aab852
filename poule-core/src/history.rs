//! Pool membership of previous rounds

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::fencer::FencerId;

type Round = Vec<Vec<FencerId>>;

/// Prior rounds, oldest first
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Round>", into = "Vec<Round>")]
pub struct PoolHistory {
    rounds: Vec<Round>,
    /// Pool index of every fencer, per round
    pool_of: Vec<FxHashMap<FencerId, usize>>,
}

impl PoolHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rounds(rounds: Vec<Round>) -> Self {
        let mut history = Self::new();
        for round in rounds {
            history.push_round(round);
        }
        history
    }

    /// Record a finished round (the new most recent one)
    pub fn push_round(&mut self, pools: Round) {
        let pool_of = pools
            .iter()
            .enumerate()
            .flat_map(|(p, members)| members.iter().map(move |&id| (id, p)))
            .collect();
        self.pool_of.push(pool_of);
        self.rounds.push(pools);
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Pools of the round played `rounds_ago` rounds before the current one
    pub fn round(&self, rounds_ago: usize) -> Option<&Round> {
        let len = self.rounds.len();
        if rounds_ago < len {
            Some(&self.rounds[len - 1 - rounds_ago])
        } else {
            None
        }
    }

    /// Whether `a` and `b` shared a pool `rounds_ago` rounds before
    pub fn shared_pool(&self, rounds_ago: usize, a: FencerId, b: FencerId) -> bool {
        let len = self.rounds.len();
        if rounds_ago >= len {
            return false;
        }
        let pool_of = &self.pool_of[len - 1 - rounds_ago];
        match (pool_of.get(&a), pool_of.get(&b)) {
            (Some(pa), Some(pb)) => pa == pb,
            _ => false,
        }
    }

    /// Rounds ago (0 = previous round) at which `a` and `b` last shared a pool
    pub fn last_met(&self, a: FencerId, b: FencerId) -> Option<usize> {
        (0..self.rounds.len()).find(|&ago| self.shared_pool(ago, a, b))
    }

    /// Load from JSON file (array of rounds, oldest first)
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let history: PoolHistory = serde_json::from_str(&content)?;
        Ok(history)
    }
}

impl From<Vec<Round>> for PoolHistory {
    fn from(rounds: Vec<Round>) -> Self {
        Self::from_rounds(rounds)
    }
}

impl From<PoolHistory> for Vec<Round> {
    fn from(history: PoolHistory) -> Self {
        history.rounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> PoolHistory {
        PoolHistory::from_rounds(vec![
            vec![vec![1, 2, 3], vec![4, 5, 6]],
            vec![vec![1, 4], vec![2, 5], vec![3, 6]],
        ])
    }

    #[test]
    fn test_round_recency() {
        let h = history();
        assert_eq!(h.len(), 2);
        assert_eq!(h.round(0).unwrap().len(), 3);
        assert_eq!(h.round(1).unwrap().len(), 2);
        assert!(h.round(2).is_none());
    }

    #[test]
    fn test_last_met() {
        let h = history();
        assert_eq!(h.last_met(1, 4), Some(0));
        assert_eq!(h.last_met(1, 2), Some(1));
        assert_eq!(h.last_met(1, 5), None);
        assert_eq!(h.last_met(1, 99), None);
    }

    #[test]
    fn test_empty_history() {
        let h = PoolHistory::new();
        assert!(h.is_empty());
        assert!(!h.shared_pool(0, 1, 2));
        assert_eq!(h.last_met(1, 2), None);
    }

    #[test]
    fn test_history_json() {
        let h: PoolHistory = serde_json::from_str("[[[1, 2], [3, 4]]]").unwrap();
        assert_eq!(h.last_met(3, 4), Some(0));
        assert_eq!(serde_json::to_string(&h).unwrap(), "[[[1,2],[3,4]]]");
    }
}
