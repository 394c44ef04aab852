//! SmartSwapper - criteria-balanced pool placement
//!
//! Fencers are first seeded into pools in serpentine order of rank. Then, for
//! each balancing criteria (most important first), fencers holding more
//! same-valued teammates than the quota allows are pulled out and placed
//! again, walking pools in snake order from their seeded pool. A less
//! important criteria never adds quota violations to a more important one:
//! a movable group whose placement would do so is put back as it was.
//!
//! ## Architecture
//!
//! - Level 1: swap (orchestration over criteria depths)
//! - Level 2: iterate (extract movables, dispatch errors, dispatch floatings)
//! - Level 3: place_by_snake, exchange_with_floating, can_go_to

use poule_core::{DispatchError, Roster, ValueId};

use crate::criteria::{Criteria, CriteriaValue};
use crate::pool_data::{PoolData, SwapFencer};
use crate::pool_profiles::{PoolProfiles, PoolSize};
use crate::snake::Snake;

/// Result of a swap, expressed in roster indices
#[derive(Clone, Debug)]
pub struct SwapOutcome {
    /// Members of each pool (pool *k* at index *k-1*), best rank first
    pub pools: Vec<Vec<usize>>,
    /// Seeded pool index, per roster entry
    pub seeded_pools: Vec<usize>,
    /// Final pool index, per roster entry
    pub final_pools: Vec<usize>,
    /// Fencers no longer in their seeded pool
    pub moved: usize,
    /// Fencers placed in the smallest pool after every quota-aware pass failed
    pub forced: Vec<usize>,
    /// Quota per criteria depth and value
    pub distributions: Vec<Vec<Criteria>>,
}

/// Serpentine seeding: 0, 1, .., P-1, P-1, .., 0, 0, 1, ..
pub fn pool_index(fencer_index: usize, pool_count: usize) -> usize {
    if (fencer_index / pool_count) % 2 == 0 {
        fencer_index % pool_count
    } else {
        pool_count - 1 - fencer_index % pool_count
    }
}

/// Placement state restored when a movable group is rolled back
struct Checkpoint {
    pools: Vec<PoolData>,
    fencers: Vec<SwapFencer>,
    profiles: PoolProfiles,
}

/// Per-run placement context
pub struct SmartSwapper<'a> {
    roster: &'a Roster,
    pool_count: usize,
    profiles: PoolProfiles,
    snake: Snake,
    pools: Vec<PoolData>,
    fencers: Vec<SwapFencer>,
    distributions: Vec<Vec<CriteriaValue>>,
    depth: usize,
    previous_value: Option<ValueId>,
    worst_case: bool,
    error_list: Vec<usize>,
    floating_list: Vec<usize>,
    remaining_errors: Vec<usize>,
}

impl<'a> SmartSwapper<'a> {
    /// Seed the roster into `pool_count` pools
    pub fn new(roster: &'a Roster, pool_count: usize) -> Result<Self, DispatchError> {
        if pool_count == 0 {
            return Err(DispatchError::NoPools);
        }
        if pool_count > roster.len() {
            return Err(DispatchError::TooManyPools {
                pools: pool_count,
                fencers: roster.len(),
            });
        }

        let mut profiles = PoolProfiles::default();
        profiles.configure(roster.len(), pool_count);

        let value_counts: Vec<usize> = roster.criteria().iter().map(|c| c.values.len()).collect();
        let pools = (1..=pool_count)
            .map(|id| PoolData::new(id, &value_counts))
            .collect();
        let fencers = roster
            .entries()
            .iter()
            .enumerate()
            .map(|(i, entry)| SwapFencer::new(entry, pool_index(i, pool_count)))
            .collect();

        let mut swapper = Self {
            roster,
            pool_count,
            profiles,
            snake: Snake::new(pool_count),
            pools,
            fencers,
            distributions: Vec::new(),
            depth: 0,
            previous_value: None,
            worst_case: false,
            error_list: Vec::new(),
            floating_list: Vec::new(),
            remaining_errors: Vec::new(),
        };

        for f in 0..swapper.fencers.len() {
            let pool = swapper.fencers[f].original_pool;
            swapper.add_to_pool(pool, f);
        }

        Ok(swapper)
    }

    // ========================================================================
    // Level 1 - Orchestration
    // ========================================================================

    pub fn swap(mut self) -> SwapOutcome {
        let mut forced = Vec::new();

        for depth in 0..self.roster.criteria_count() {
            self.depth = depth;
            let distribution = self.look_up_distribution(depth);
            self.distributions.push(distribution);

            if depth == 0 {
                self.previous_value = None;
                self.iterate();
                forced.extend(self.place_leftovers());
            } else {
                // Only fencers sharing a value of the previous criteria move
                for value in 0..self.distributions[depth - 1].len() {
                    self.previous_value = Some(value);
                    self.iterate_keeping_priorities(&mut forced);
                }
            }
        }
        self.previous_value = None;

        self.store_swapping(forced)
    }

    // ========================================================================
    // Level 2 - Phases
    // ========================================================================

    fn iterate(&mut self) {
        tracing::debug!(
            "Criteria depth {} (movable value {:?})",
            self.depth,
            self.previous_value
        );

        self.extract_movables();
        self.dispatch_errors();
        self.dispatch_floatings();
    }

    /// Iterate one movable group, then roll it back if it added quota
    /// violations to a criteria above the current one.
    fn iterate_keeping_priorities(&mut self, forced: &mut Vec<usize>) {
        let checkpoint = self.checkpoint();
        let violations = self.quota_violations(self.depth);

        self.iterate();
        let placed = self.place_leftovers();

        let new_violations = self.quota_violations(self.depth);
        if new_violations > violations {
            tracing::debug!(
                "Criteria depth {} (movable value {:?}) rolled back: {} violations above it",
                self.depth,
                self.previous_value,
                new_violations
            );
            self.restore(checkpoint);
        } else {
            forced.extend(placed);
        }
    }

    /// Pull out floating-eligible and over-quota fencers. Pools are walked
    /// from their weakest member; pool leaders stay put.
    fn extract_movables(&mut self) {
        let depth = self.depth;

        for p in 0..self.pool_count {
            for group in self.value_groups(p) {
                let mut cursor = self.pools[p].size();

                while cursor > 0 {
                    cursor -= 1;
                    let f = self.pools[p].members()[cursor];

                    if self.pools[p].is_leader(&self.fencers[f])
                        || !self.is_movable(f)
                        || self.fencers[f].value(depth) != group
                    {
                        continue;
                    }

                    let teammate_rank = self.pools[p].teammate_rank(f, depth, &self.fencers);
                    let floating = match group {
                        None => Some(true),
                        Some(value) => {
                            let criteria_value = &self.distributions[depth][value];
                            if criteria_value.can_float(f) {
                                Some(true)
                            } else if teammate_rank >= criteria_value.error_line(f, false) {
                                Some(false)
                            } else {
                                None
                            }
                        }
                    };

                    match floating {
                        Some(true) => self.floating_list.push(f),
                        Some(false) => self.error_list.push(f),
                        None => break,
                    }
                    self.remove_from_pool(p, f);
                }
            }
        }

        let fencers = &self.fencers;
        self.error_list.sort_by_key(|&f| fencers[f].rank);
        self.floating_list.sort_by_key(|&f| fencers[f].rank);

        tracing::debug!(
            "Extracted {} errors, {} floatings",
            self.error_list.len(),
            self.floating_list.len()
        );
    }

    fn dispatch_errors(&mut self) {
        let errors = std::mem::take(&mut self.error_list);
        self.dispatch_fencers(&errors);
    }

    /// Place floatings, then give every remaining error a chance to take
    /// the slot of a placed floating, then retry with relaxed quotas.
    fn dispatch_floatings(&mut self) {
        let floatings = std::mem::take(&mut self.floating_list);
        self.dispatch_fencers(&floatings);

        let errors = std::mem::take(&mut self.remaining_errors);
        let mut failed = Vec::new();
        for error in errors {
            if !self.exchange_with_floating(error, &floatings) {
                failed.push(error);
            }
        }

        self.worst_case = true;
        let mut failing = Vec::new();
        for error in failed {
            if !self.place_by_snake(error) {
                failing.push(error);
            }
        }
        self.worst_case = false;

        if !failing.is_empty() {
            tracing::debug!("{} fencers still without a pool", failing.len());
        }
        self.remaining_errors = failing;
    }

    // ========================================================================
    // Level 3 - Steps
    // ========================================================================

    fn look_up_distribution(&self, depth: usize) -> Vec<CriteriaValue> {
        let spec = &self.roster.criteria()[depth];
        let mut distribution = vec![CriteriaValue::new(); spec.values.len()];

        for (f, fencer) in self.fencers.iter().enumerate() {
            if let Some(value) = fencer.value(depth) {
                distribution[value].use_fencer(f, fencer.rank);
            }
        }
        for (value, criteria_value) in distribution.iter_mut().enumerate() {
            criteria_value.profile(&spec.value_name(value), self.pool_count);
        }

        tracing::debug!(
            "Criteria {}: {} distinct values",
            spec.key,
            distribution.len()
        );
        distribution
    }

    fn dispatch_fencers(&mut self, list: &[usize]) {
        for &f in list {
            if !self.place_by_snake(f) {
                tracing::debug!("No pool for rank {}", self.fencers[f].rank);
                self.remaining_errors.push(f);
            }
        }
    }

    fn exchange_with_floating(&mut self, error: usize, floatings: &[usize]) -> bool {
        for &floating in floatings.iter().rev() {
            if floating == error {
                continue;
            }
            let Some(pool) = self.fencers[floating].new_pool else {
                continue;
            };

            self.remove_from_pool(pool, floating);
            if self.can_go_to(error, pool) {
                self.add_to_pool(pool, error);
                if self.place_by_snake(floating) {
                    tracing::debug!(
                        "Rank {} takes the slot of rank {} in pool #{}",
                        self.fencers[error].rank,
                        self.fencers[floating].rank,
                        pool + 1
                    );
                    return true;
                }
                self.remove_from_pool(pool, error);
            }
            self.add_to_pool(pool, floating);
        }
        false
    }

    /// Try small pools then big ones, in snake order from the seeded pool
    fn place_by_snake(&mut self, f: usize) -> bool {
        let origin = self.fencers[f].original_pool + 1;

        for size in PoolSize::ALL {
            if !self.profiles.exists(size) {
                break;
            }
            let max_pool_size = self.profiles.size(size);

            self.snake.reset(origin);
            for _ in 0..self.pool_count {
                let pool = self.snake.next_position() - 1;
                if self.move_fencer_to(f, pool, max_pool_size) {
                    return true;
                }
            }
        }
        false
    }

    fn move_fencer_to(&mut self, f: usize, pool: usize, max_pool_size: usize) -> bool {
        if self.pools[pool].size() < max_pool_size && self.can_go_to(f, pool) {
            self.add_to_pool(pool, f);
            true
        } else {
            false
        }
    }

    /// Whether `f` fits `pool` for every criteria up to the current depth
    fn can_go_to(&self, f: usize, pool: usize) -> bool {
        (0..=self.depth).all(|depth| self.fits_value(f, pool, depth))
    }

    /// Insert `f` among its same-valued pool members by rank: neither `f`
    /// nor a member pushed down may reach its error line.
    fn fits_value(&self, f: usize, pool: usize, depth: usize) -> bool {
        let fencer = &self.fencers[f];
        let Some(value) = fencer.value(depth) else {
            return true;
        };
        let Some(criteria_value) = self.distributions.get(depth).and_then(|d| d.get(value)) else {
            return true;
        };

        // Criteria above the current one are never relaxed
        let worst_case = self.worst_case && depth == self.depth;
        let mut teammate_rank = 1;
        let mut placed = false;

        for &m in self.pools[pool].members() {
            let member = &self.fencers[m];
            if m == f || member.value(depth) != Some(value) {
                continue;
            }

            if !placed && fencer.rank < member.rank {
                if teammate_rank >= criteria_value.error_line(f, worst_case) {
                    return false;
                }
                placed = true;
                teammate_rank += 1;
            }
            if placed && teammate_rank >= criteria_value.error_line(m, worst_case) {
                return false;
            }
            teammate_rank += 1;
        }

        placed || teammate_rank < criteria_value.error_line(f, worst_case)
    }

    fn is_movable(&self, f: usize) -> bool {
        self.depth == 0 || self.fencers[f].value(self.depth - 1) == self.previous_value
    }

    /// Distinct values (missing first) held by the members of a pool
    fn value_groups(&self, pool: usize) -> Vec<Option<ValueId>> {
        let mut groups: Vec<Option<ValueId>> = self.pools[pool]
            .members()
            .iter()
            .map(|&m| self.fencers[m].value(self.depth))
            .collect();
        groups.sort();
        groups.dedup();
        groups
    }

    /// Last resort for unplaced fencers: among the pools still below their
    /// size, the one hurting the quotas least (most important criteria
    /// first), otherwise the smallest pool.
    fn place_leftovers(&mut self) -> Vec<usize> {
        let leftovers = std::mem::take(&mut self.remaining_errors);

        for &f in &leftovers {
            let max_pool_size = self
                .profiles
                .size(PoolSize::Small)
                .max(self.profiles.size(PoolSize::Big));
            let pool = (0..self.pool_count)
                .filter(|&p| self.pools[p].size() < max_pool_size)
                .min_by_key(|&p| self.leftover_cost(f, p))
                .or_else(|| (0..self.pool_count).min_by_key(|&p| self.pools[p].size()))
                .unwrap_or(0);
            tracing::warn!(
                "Rank {} placed in pool #{} regardless of quotas",
                self.fencers[f].rank,
                pool + 1
            );
            self.add_to_pool(pool, f);
        }
        leftovers
    }

    /// Per criteria, whether `f` would exceed its quota in `pool`; then how
    /// many criteria it would not bring up to their floor; then pool size.
    fn leftover_cost(&self, f: usize, pool: usize) -> (Vec<bool>, usize, usize) {
        let mut exceeded = Vec::with_capacity(self.distributions.len());
        let mut unfilled = 0;

        for (depth, distribution) in self.distributions.iter().enumerate() {
            let Some((value, criteria_value)) = self.fencers[f]
                .value(depth)
                .and_then(|value| distribution.get(value).map(|cv| (value, cv)))
            else {
                exceeded.push(false);
                continue;
            };
            let criteria = criteria_value.criteria();
            let count = self.pools[pool].score(depth, value);

            exceeded.push(count >= criteria.max_count_per_pool());
            if count >= criteria.floor() {
                unfilled += 1;
            }
        }
        (exceeded, unfilled, self.pools[pool].size())
    }

    /// Pool/value counts outside `[floor, max_count_per_pool]` for the
    /// criteria above `depth`
    fn quota_violations(&self, depth: usize) -> usize {
        self.distributions[..depth]
            .iter()
            .enumerate()
            .map(|(d, distribution)| {
                self.pools
                    .iter()
                    .map(|pool| {
                        distribution
                            .iter()
                            .enumerate()
                            .filter(|(value, cv)| {
                                let count = pool.score(d, *value);
                                count < cv.criteria().floor()
                                    || count > cv.criteria().max_count_per_pool()
                            })
                            .count()
                    })
                    .sum::<usize>()
            })
            .sum()
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pools: self.pools.clone(),
            fencers: self.fencers.clone(),
            profiles: self.profiles.clone(),
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.pools = checkpoint.pools;
        self.fencers = checkpoint.fencers;
        self.profiles = checkpoint.profiles;
        self.remaining_errors.clear();
    }

    fn store_swapping(self, forced: Vec<usize>) -> SwapOutcome {
        let pools: Vec<Vec<usize>> = self.pools.iter().map(|p| p.members().to_vec()).collect();
        let seeded_pools: Vec<usize> = self.fencers.iter().map(|f| f.original_pool).collect();
        let final_pools: Vec<usize> = self
            .fencers
            .iter()
            .map(|f| f.new_pool.unwrap_or(f.original_pool))
            .collect();
        let moved = seeded_pools
            .iter()
            .zip(&final_pools)
            .filter(|(seeded, placed)| seeded != placed)
            .count();
        let distributions = self
            .distributions
            .iter()
            .map(|d| d.iter().map(|cv| cv.criteria().clone()).collect())
            .collect();

        tracing::info!(
            "Swapped {} fencers into {} pools: {} moved",
            self.fencers.len(),
            self.pool_count,
            moved
        );

        SwapOutcome {
            pools,
            seeded_pools,
            final_pools,
            moved,
            forced,
            distributions,
        }
    }

    fn add_to_pool(&mut self, pool: usize, f: usize) {
        let size = self.pools[pool].size();
        self.pools[pool].insert(f, &mut self.fencers);
        self.profiles.change_fencer_count(size, size + 1);
    }

    fn remove_from_pool(&mut self, pool: usize, f: usize) {
        let size = self.pools[pool].size();
        self.pools[pool].remove(f, &mut self.fencers);
        self.profiles.change_fencer_count(size, size - 1);
    }
}
