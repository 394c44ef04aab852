//! POULE Dispatcher - Pool dispatching and bout ordering
//!
//! This crate turns a checked-in roster into pools ready to fence:
//! - Criteria-balanced placement (through `poule-swapper`)
//! - Repair of pairings repeated from the previous round
//! - Quota and clash reporting
//! - Bout order inside each pool
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: dispatch, bout_orders (orchestration)
//! - Level 2: Repairer passes, BoutOrder construction (phases)
//! - Level 3: Pair scoring, opponent selection (steps)
//! - Level 4: DispatchConfig (configuration)

pub mod bout_order;
pub mod bout_tables;
pub mod config;
pub mod dispatcher;
pub mod opponent;
pub mod pair;
pub mod repair;

// Re-exports for convenient access
pub use bout_order::{Bout, BoutOrder};
pub use bout_tables::{standard_order, MAX_TABLE_POOL_SIZE};
pub use config::{CriteriaOrder, DispatchConfig};
pub use dispatcher::{
    bout_orders, dispatch, dispatch_roster, prepare_roster, DispatchOutcome, Placement,
};
pub use opponent::{Opponent, OpponentId, Opponents, UNSET_FITNESS};
pub use pair::{Encounter, Meeting, Pair};
pub use repair::{FitnessClash, Repairer};
