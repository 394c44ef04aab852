//! POULE Swapper - Criteria-balanced pool placement
//!
//! This crate spreads fencers over pools:
//! - Pool sizing (small/big pools differing by one)
//! - Per-value quotas with floating slots
//! - Snake-order placement starting from each fencer's seeded pool
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: SmartSwapper::swap (orchestration)
//! - Level 2: extraction and dispatch phases
//! - Level 3: Snake, PoolProfiles, CriteriaValue (steps)
//! - Level 4: quota audit

mod criteria;
mod pool_data;
mod pool_profiles;
mod quota;
mod smart_swapper;
mod snake;

pub use criteria::{Criteria, CriteriaValue};
pub use pool_data::{PoolData, SwapFencer};
pub use pool_profiles::{PoolProfiles, PoolSize};
pub use quota::{audit_quotas, QuotaViolation};
pub use smart_swapper::{pool_index, SmartSwapper, SwapOutcome};
pub use snake::Snake;
