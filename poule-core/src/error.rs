//! Contract violations raised by a dispatch run
//!
//! Infeasible criteria quotas and unresolved repeat pairings are not errors:
//! they are reported inside the dispatch outcome.

use crate::fencer::FencerId;

/// Error types for dispatch setup and internal bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("Pool count must be positive")]
    NoPools,

    #[error("Cannot spread {fencers} fencers over {pools} pools")]
    TooManyPools { pools: usize, fencers: usize },

    #[error("Fencer {0} appears more than once in the roster")]
    DuplicateFencer(FencerId),

    #[error("Opponent {opponent} does not exist in a pool of {pool_size}")]
    UnknownOpponent { opponent: usize, pool_size: usize },

    #[error("Opponent {opponent} cannot fence itself")]
    SelfPairing { opponent: usize },

    #[error("Fitness {value} out of profile range for opponent {opponent} (size {size})")]
    FitnessOutOfRange {
        opponent: usize,
        value: usize,
        size: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(DispatchError::NoPools.to_string(), "Pool count must be positive");
        assert_eq!(
            DispatchError::TooManyPools { pools: 4, fencers: 3 }.to_string(),
            "Cannot spread 3 fencers over 4 pools"
        );
        assert_eq!(
            DispatchError::FitnessOutOfRange { opponent: 2, value: 5, size: 3 }.to_string(),
            "Fitness 5 out of profile range for opponent 2 (size 3)"
        );
    }
}
