//! POULE Core - Fencer model and dispatch inputs
//!
//! This crate provides the data shared by every stage of pool dispatching:
//! - Fencers and the attendee capability (attributes, stage start rank)
//! - Typed attribute keys and values used as balancing criteria
//! - Roster snapshots with criteria values interned to small integers
//! - Prior-round pool history
//! - Error taxonomy for contract violations

pub mod error;
pub mod fencer;
pub mod history;
pub mod roster;

// Re-exports for convenient access
pub use error::DispatchError;
pub use fencer::{load_roster, AttributeKey, AttributeValue, Attendee, Fencer, FencerId};
pub use history::PoolHistory;
pub use roster::{CriteriaSpec, Roster, RosterEntry, ValueId};
