//! Dispatch orchestration
//!
//! Level 1 - Orchestration: snapshot the attendees, balance pools on the
//! criteria, audit quotas, repair repeat pairings, report.

use poule_core::{
    AttributeKey, Attendee, DispatchError, FencerId, PoolHistory, Roster, ValueId,
};
use poule_swapper::{audit_quotas, QuotaViolation, SmartSwapper};
use rayon::prelude::*;
use serde::Serialize;

use crate::bout_order::BoutOrder;
use crate::config::{CriteriaOrder, DispatchConfig};
use crate::repair::{FitnessClash, Repairer};

/// Where a fencer was seeded and where it ended
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub id: FencerId,
    pub name: String,
    /// 1-based pool from serpentine seeding
    pub seeded_pool: usize,
    /// 1-based pool after balancing and repair
    pub final_pool: usize,
}

impl Placement {
    /// Seeded pool, when the fencer left it
    pub fn swapped_from(&self) -> Option<usize> {
        (self.seeded_pool != self.final_pool).then_some(self.seeded_pool)
    }
}

/// Result of a dispatch run
#[derive(Clone, Debug, Serialize)]
pub struct DispatchOutcome {
    /// Fencer ids per pool (pool *k* at index *k-1*), best rank first
    pub pools: Vec<Vec<FencerId>>,
    /// One entry per fencer, by stage start rank
    pub placements: Vec<Placement>,
    pub moved: usize,
    pub quota_violations: Vec<QuotaViolation>,
    pub unresolved_clashes: Vec<FitnessClash>,
    pub repair_passes: usize,
}

impl DispatchOutcome {
    pub fn pool_sizes(&self) -> Vec<usize> {
        self.pools.iter().map(Vec::len).collect()
    }
}

/// Spread `attendees` over `pool_count` pools, balancing `criteria` (most
/// important first) and avoiding the pairings of the previous round.
pub fn dispatch<A: Attendee>(
    attendees: &[A],
    pool_count: usize,
    criteria: &[AttributeKey],
    history: &PoolHistory,
    config: &DispatchConfig,
) -> Result<DispatchOutcome, DispatchError> {
    let roster = prepare_roster(attendees, pool_count, criteria, config)?;
    dispatch_roster(&roster, pool_count, history, config)
}

/// Validate the inputs and take the roster snapshot, criteria ordered as
/// configured.
pub fn prepare_roster<A: Attendee>(
    attendees: &[A],
    pool_count: usize,
    criteria: &[AttributeKey],
    config: &DispatchConfig,
) -> Result<Roster, DispatchError> {
    if pool_count == 0 {
        return Err(DispatchError::NoPools);
    }

    let mut roster = Roster::snapshot(attendees, criteria)?;
    if pool_count > roster.len() {
        return Err(DispatchError::TooManyPools {
            pools: pool_count,
            fencers: roster.len(),
        });
    }

    if config.criteria_order == CriteriaOrder::MostDistinctFirst {
        roster.sort_criteria_by_distinct();
    }
    Ok(roster)
}

/// Dispatch an already prepared roster
pub fn dispatch_roster(
    roster: &Roster,
    pool_count: usize,
    history: &PoolHistory,
    config: &DispatchConfig,
) -> Result<DispatchOutcome, DispatchError> {
    tracing::info!(
        "Dispatching {} fencers into {} pools ({} criteria, {} rounds of history)",
        roster.len(),
        pool_count,
        roster.criteria_count(),
        history.len()
    );

    let swap = SmartSwapper::new(roster, pool_count)?.swap();
    let mut pools = swap.pools;

    let repairer = Repairer::new(roster, history, config.protect_leaders);
    let repair_passes = repairer.repair(&mut pools, config.max_repair_passes)?;

    let quota_violations = audit_quotas(&pools, roster);
    let unresolved_clashes = repairer.clashes(&pools);

    if !quota_violations.is_empty() {
        tracing::warn!("{} criteria quotas could not be met", quota_violations.len());
    }
    if !unresolved_clashes.is_empty() {
        tracing::warn!(
            "{} repeat pairings left after {} repair passes",
            unresolved_clashes.len(),
            repair_passes
        );
    }

    let mut final_pools = vec![0; roster.len()];
    for (p, members) in pools.iter().enumerate() {
        for &m in members {
            final_pools[m] = p;
        }
    }

    let placements: Vec<Placement> = roster
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| Placement {
            id: entry.id,
            name: entry.name.clone(),
            seeded_pool: swap.seeded_pools[i] + 1,
            final_pool: final_pools[i] + 1,
        })
        .collect();
    let moved = placements
        .iter()
        .filter(|p| p.swapped_from().is_some())
        .count();

    let pools = pools
        .iter()
        .map(|members| members.iter().map(|&m| roster.entry(m).id).collect())
        .collect();

    tracing::info!("Dispatch done: {} fencers moved", moved);

    Ok(DispatchOutcome {
        pools,
        placements,
        moved,
        quota_violations,
        unresolved_clashes,
        repair_passes,
    })
}

/// Bout order of every pool, using the first criteria as affinity
pub fn bout_orders(
    outcome: &DispatchOutcome,
    roster: &Roster,
    config: &DispatchConfig,
) -> Result<Vec<BoutOrder>, DispatchError> {
    let affinities: Vec<Vec<Option<ValueId>>> = outcome
        .pools
        .iter()
        .map(|pool| {
            pool.iter()
                .map(|&id| {
                    roster
                        .index_of(id)
                        .and_then(|i| roster.entry(i).values.first().copied().flatten())
                })
                .collect()
        })
        .collect();

    if config.parallel {
        affinities
            .par_iter()
            .map(|pool| BoutOrder::with_affinity(pool))
            .collect()
    } else {
        affinities
            .iter()
            .map(|pool| BoutOrder::with_affinity(pool))
            .collect()
    }
}
