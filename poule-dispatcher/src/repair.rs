//! Clash repair - separate fencers who shared a pool last round
//!
//! Every pass scores the co-pool pairs against the history with `Pair`
//! fitness (rounds ago since the two last met, 0 = previous round). For each
//! clash the weaker non-leader side is offered to its best candidates from
//! other pools; a swap is kept only when it lowers the number of clashes
//! without adding quota violations.

use poule_core::{DispatchError, FencerId, PoolHistory, Roster};
use poule_swapper::audit_quotas;
use serde::Serialize;

use crate::opponent::Opponents;
use crate::pair::{Meeting, Pair};

/// Two members of a pool who already shared one in the previous round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FitnessClash {
    /// 1-based pool number
    pub pool: usize,
    pub a: FencerId,
    pub b: FencerId,
}

pub struct Repairer<'a> {
    roster: &'a Roster,
    history: &'a PoolHistory,
    protect_leaders: bool,
}

impl<'a> Repairer<'a> {
    pub fn new(roster: &'a Roster, history: &'a PoolHistory, protect_leaders: bool) -> Self {
        Self {
            roster,
            history,
            protect_leaders,
        }
    }

    // ========================================================================
    // Level 2 - Phases
    // ========================================================================

    /// Run repair passes over `pools` (roster indices) until no clash is
    /// left, a pass swaps nothing, or `max_passes` is reached.
    ///
    /// Returns the number of passes run.
    pub fn repair(
        &self,
        pools: &mut [Vec<usize>],
        max_passes: usize,
    ) -> Result<usize, DispatchError> {
        let mut passes = 0;
        if self.history.is_empty() {
            return Ok(passes);
        }

        while passes < max_passes && self.count_clashes(pools) > 0 {
            passes += 1;
            let swaps = self.run_pass(pools)?;
            tracing::debug!(
                "Repair pass {}: {} swaps, {} clashes left",
                passes,
                swaps,
                self.count_clashes(pools)
            );

            if swaps == 0 {
                break;
            }
        }
        Ok(passes)
    }

    /// Clashes currently present in `pools`
    pub fn clashes(&self, pools: &[Vec<usize>]) -> Vec<FitnessClash> {
        let mut clashes = Vec::new();
        for (p, members) in pools.iter().enumerate() {
            for (i, &a) in members.iter().enumerate() {
                for &b in &members[i + 1..] {
                    if self.met_last_round(a, b) {
                        clashes.push(FitnessClash {
                            pool: p + 1,
                            a: self.roster.entry(a).id,
                            b: self.roster.entry(b).id,
                        });
                    }
                }
            }
        }
        clashes
    }

    fn run_pass(&self, pools: &mut [Vec<usize>]) -> Result<usize, DispatchError> {
        let mut pool_of = vec![0; self.roster.len()];
        for (p, members) in pools.iter().enumerate() {
            for &m in members {
                pool_of[m] = p;
            }
        }

        let (mut opponents, pairs) = self.score(pools)?;

        let mut clash_count = self.count_clashes(pools);
        let mut violations = audit_quotas(pools, self.roster).len();
        let mut swaps = 0;

        for pair in pairs.iter().filter(|pair| pair.has_fitness_error()) {
            let (a, b) = (pair.a() - 1, pair.b() - 1);
            // An earlier swap may already have split them
            if pool_of[a] != pool_of[b] {
                continue;
            }
            let Some(mover) = self.mover(a, b, pool_of[a]) else {
                continue;
            };

            while let Some(target) = opponents.best_opponent(mover + 1) {
                let target = target - 1;
                if pool_of[target] == pool_of[mover] || self.is_pinned(target, pool_of[target]) {
                    continue;
                }

                exchange(pools, &mut pool_of, mover, target);
                let new_clash_count = self.count_clashes(pools);
                let new_violations = audit_quotas(pools, self.roster).len();

                if new_clash_count < clash_count && new_violations <= violations {
                    tracing::debug!(
                        "Swapped fencers {} and {}: {} clashes left",
                        self.roster.entry(mover).id,
                        self.roster.entry(target).id,
                        new_clash_count
                    );
                    clash_count = new_clash_count;
                    violations = new_violations;
                    swaps += 1;
                    break;
                }
                exchange(pools, &mut pool_of, mover, target);
            }
        }

        Ok(swaps)
    }

    // ========================================================================
    // Level 3 - Steps
    // ========================================================================

    /// Pair every two pool members and score them against the history.
    /// Each opponent's fitness becomes its clash count so that candidates
    /// least involved in clashes come first.
    fn score(&self, pools: &[Vec<usize>]) -> Result<(Opponents, Vec<Pair>), DispatchError> {
        let mut opponents = Opponents::new(self.roster.len());
        opponents.feed_all();
        opponents.reset_fitness_profiles(self.history.len());

        let mut pairs = Vec::new();
        let mut iteration = 1;
        for members in pools {
            for (i, &a) in members.iter().enumerate() {
                for &b in &members[i + 1..] {
                    let mut pair = Pair::new(iteration, a + 1, b + 1, &mut opponents);
                    iteration += 1;

                    self.score_pair(&mut pair, &mut opponents)?;
                    pairs.push(pair);
                }
            }
        }

        let mut clash_counts = vec![0; self.roster.len()];
        for pair in pairs.iter().filter(|pair| pair.has_fitness_error()) {
            clash_counts[pair.a() - 1] += 1;
            clash_counts[pair.b() - 1] += 1;
        }
        for (i, &count) in clash_counts.iter().enumerate() {
            opponents.get_mut(i + 1).set_fitness(count);
        }

        Ok((opponents, pairs))
    }

    fn score_pair(&self, pair: &mut Pair, opponents: &mut Opponents) -> Result<(), DispatchError> {
        let a = self.roster.entry(pair.a() - 1).id;
        let b = self.roster.entry(pair.b() - 1).id;

        pair.reset_fitness();
        if let Some(rounds_ago) = self.history.last_met(a, b) {
            let meeting = Meeting {
                a: pair.a(),
                b: pair.b(),
            };
            pair.set_fitness(&meeting, rounds_ago, opponents)?;
        }
        Ok(())
    }

    /// The side to move out: never a pinned leader, otherwise the worse rank
    fn mover(&self, a: usize, b: usize, pool: usize) -> Option<usize> {
        [a, b]
            .into_iter()
            .filter(|&f| !self.is_pinned(f, pool))
            .max_by_key(|&f| (self.roster.entry(f).rank, f))
    }

    fn is_pinned(&self, fencer: usize, pool: usize) -> bool {
        self.protect_leaders && self.roster.entry(fencer).rank as usize == pool + 1
    }

    fn met_last_round(&self, a: usize, b: usize) -> bool {
        self.history
            .shared_pool(0, self.roster.entry(a).id, self.roster.entry(b).id)
    }

    fn count_clashes(&self, pools: &[Vec<usize>]) -> usize {
        pools
            .iter()
            .map(|members| {
                members
                    .iter()
                    .enumerate()
                    .map(|(i, &a)| {
                        members[i + 1..]
                            .iter()
                            .filter(|&&b| self.met_last_round(a, b))
                            .count()
                    })
                    .sum::<usize>()
            })
            .sum()
    }
}

/// Swap two fencers between their pools, keeping pools in rank order
fn exchange(pools: &mut [Vec<usize>], pool_of: &mut [usize], x: usize, y: usize) {
    let (px, py) = (pool_of[x], pool_of[y]);

    for (pool, from, to) in [(px, x, y), (py, y, x)] {
        if let Some(slot) = pools[pool].iter_mut().find(|m| **m == from) {
            *slot = to;
        }
        pools[pool].sort_unstable();
    }

    pool_of[x] = py;
    pool_of[y] = px;
}

#[cfg(test)]
mod tests {
    use super::*;
    use poule_core::Fencer;

    fn roster(count: u32) -> Roster {
        let fencers: Vec<Fencer> = (1..=count)
            .map(|rank| Fencer::new(rank, format!("F{}", rank), rank))
            .collect();
        Roster::snapshot(&fencers, &[]).unwrap()
    }

    fn ids(pools: &[Vec<usize>], roster: &Roster) -> Vec<Vec<FencerId>> {
        pools
            .iter()
            .map(|pool| pool.iter().map(|&i| roster.entry(i).id).collect())
            .collect()
    }

    #[test]
    fn test_resolvable_clash_is_repaired() {
        let roster = roster(6);
        let history = PoolHistory::from_rounds(vec![vec![vec![1, 4], vec![2, 3], vec![5, 6]]]);
        let repairer = Repairer::new(&roster, &history, true);

        // Serpentine seeding of 6 fencers into 2 pools
        let mut pools = vec![vec![0, 3, 4], vec![1, 2, 5]];
        assert_eq!(repairer.clashes(&pools).len(), 2);

        let passes = repairer.repair(&mut pools, 8).unwrap();
        assert_eq!(passes, 1);
        assert_eq!(ids(&pools, &roster), vec![vec![1, 3, 5], vec![2, 4, 6]]);
        assert!(repairer.clashes(&pools).is_empty());
    }

    #[test]
    fn test_unavoidable_clashes_are_reported() {
        let roster = roster(6);
        let history = PoolHistory::from_rounds(vec![vec![vec![1, 4, 5], vec![2, 3, 6]]]);
        let repairer = Repairer::new(&roster, &history, true);

        let mut pools = vec![vec![0, 3, 4], vec![1, 2, 5]];
        assert_eq!(repairer.clashes(&pools).len(), 6);

        let passes = repairer.repair(&mut pools, 8).unwrap();
        assert!(passes <= 8);
        // Two pools of three out of two former pools of three: at least one
        // clash per pool remains
        let clashes = repairer.clashes(&pools);
        assert_eq!(clashes.len(), 2);
        assert!(clashes.iter().any(|c| c.pool == 1));
        assert!(clashes.iter().any(|c| c.pool == 2));
    }

    #[test]
    fn test_leaders_stay() {
        let roster = roster(6);
        let history = PoolHistory::from_rounds(vec![vec![vec![1, 4, 5], vec![2, 3, 6]]]);
        let repairer = Repairer::new(&roster, &history, true);

        let mut pools = vec![vec![0, 3, 4], vec![1, 2, 5]];
        repairer.repair(&mut pools, 8).unwrap();
        assert!(pools[0].contains(&0));
        assert!(pools[1].contains(&1));
    }

    #[test]
    fn test_older_meetings_are_not_clashes() {
        let roster = roster(4);
        let history = PoolHistory::from_rounds(vec![
            vec![vec![1, 4], vec![2, 3]],
            vec![vec![1, 2], vec![3, 4]],
        ]);
        let repairer = Repairer::new(&roster, &history, true);

        let mut pools = vec![vec![0, 3], vec![1, 2]];
        assert!(repairer.clashes(&pools).is_empty());
        assert_eq!(repairer.repair(&mut pools, 8).unwrap(), 0);
        assert_eq!(ids(&pools, &roster), vec![vec![1, 4], vec![2, 3]]);
    }

    #[test]
    fn test_empty_history_skips_repair() {
        let roster = roster(4);
        let history = PoolHistory::new();
        let repairer = Repairer::new(&roster, &history, true);

        let mut pools = vec![vec![0, 3], vec![1, 2]];
        assert_eq!(repairer.repair(&mut pools, 8).unwrap(), 0);
    }

    #[test]
    fn test_exchange_keeps_rank_order() {
        let mut pools = vec![vec![0, 3, 4], vec![1, 2, 5]];
        let mut pool_of = vec![0, 1, 1, 0, 0, 1];

        exchange(&mut pools, &mut pool_of, 4, 1);
        assert_eq!(pools, vec![vec![0, 1, 3], vec![2, 4, 5]]);
        assert_eq!(pool_of[4], 1);
        assert_eq!(pool_of[1], 0);
    }
}
