//! Bout order inside one pool
//!
//! Every pool member fences every other once. Pools of 2 to 20 fencers
//! without mixed affinity follow the standard order tables. Otherwise the
//! order is built greedily so that a fencer rarely fences two bouts in a
//! row: the next bout goes to the opponent who has waited longest, against
//! its best candidate, as long as that candidate did not fence in the
//! previous bout. Pool members sharing an affinity value (e.g. the same
//! club) are locked together until they have met each other.

use poule_core::{DispatchError, ValueId};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::bout_tables::standard_order;
use crate::opponent::{Opponent, OpponentId, Opponents, UNSET_FITNESS};
use crate::pair::Pair;

/// One scheduled bout, with the rest each side had before it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Bout {
    pub a: OpponentId,
    pub b: OpponentId,
    /// Bouts sat out by `a` since its previous bout (0 when first)
    pub a_rest: u32,
    pub b_rest: u32,
    /// One side also fenced the bout just before
    pub rest_error: bool,
}

#[derive(Clone, Debug)]
pub struct BoutOrder {
    pool_size: usize,
    opponents: Opponents,
    pairs: Vec<Pair>,
}

impl BoutOrder {
    /// Round-robin order for `pool_size` anonymous fencers
    pub fn generate(pool_size: usize) -> Result<Self, DispatchError> {
        Self::with_affinity(&vec![None; pool_size])
    }

    /// Order for a pool whose members carry `affinities` (one per member, in
    /// pool order). Affinity only matters when it splits the pool into
    /// several groups.
    pub fn with_affinity(affinities: &[Option<ValueId>]) -> Result<Self, DispatchError> {
        let pool_size = affinities.len();
        let mut opponents = Opponents::new(pool_size);

        let mut teams: FxHashMap<ValueId, u32> = FxHashMap::default();
        for &value in affinities.iter().flatten() {
            *teams.entry(value).or_insert(0) += 1;
        }

        if teams.len() > 1 && teams.len() < pool_size {
            for (id, &affinity) in (1..=pool_size).zip(affinities) {
                opponents.get_mut(id).set_affinity(affinity);
            }
            let mut teams: Vec<(ValueId, u32)> = teams.into_iter().collect();
            teams.sort();
            for (value, count) in teams {
                opponents.lock(value, count);
            }
        } else if let Some(table) = standard_order(pool_size) {
            return Self::from_pairs(pool_size, table);
        }

        opponents.feed_all();

        let mut order = Self {
            pool_size,
            opponents,
            pairs: Vec::new(),
        };
        order.create_pairs();
        order.refresh_fitness()?;
        Ok(order)
    }

    /// Order given explicitly as 1-based `(a, b)` bouts
    pub fn from_pairs(
        pool_size: usize,
        table: &[(OpponentId, OpponentId)],
    ) -> Result<Self, DispatchError> {
        let mut opponents = Opponents::new(pool_size);
        let mut pairs = Vec::with_capacity(table.len());

        for (iteration, &(a, b)) in table.iter().enumerate() {
            for id in [a, b] {
                if !opponents.contains(id) {
                    return Err(DispatchError::UnknownOpponent {
                        opponent: id,
                        pool_size,
                    });
                }
            }
            if a == b {
                return Err(DispatchError::SelfPairing { opponent: a });
            }
            pairs.push(Pair::new(iteration as i32, a, b, &mut opponents));
        }

        let mut order = Self {
            pool_size,
            opponents,
            pairs,
        };
        order.refresh_fitness()?;
        Ok(order)
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// Bouts in a full round-robin
    pub fn pair_count(&self) -> usize {
        self.pool_size * self.pool_size.saturating_sub(1) / 2
    }

    pub fn bouts(&self) -> Vec<Bout> {
        self.pairs
            .iter()
            .map(|pair| Bout {
                a: pair.a(),
                b: pair.b(),
                a_rest: pair.a_fitness(),
                b_rest: pair.b_fitness(),
                rest_error: pair.has_fitness_error(),
            })
            .collect()
    }

    /// How many times a member rested 0, 1, 2, .. bouts between two bouts
    pub fn rest_profile(&self, id: OpponentId) -> Option<&[u32]> {
        if !self.opponents.contains(id) {
            return None;
        }
        self.opponents.get(id).fitness_profile()
    }

    pub fn rest_errors(&self) -> usize {
        self.pairs.iter().filter(|p| p.has_fitness_error()).count()
    }

    fn create_pairs(&mut self) {
        let mut order = self.opponents.ids();
        let mut iteration: i32 = 1;
        let mut cursor = 0;

        while cursor < order.len() {
            let a = order[cursor];
            let accepted = self.opponents.peek_best_opponent(a).filter(|&b| {
                let fitness = self.opponents.get(b).fitness();
                fitness == UNSET_FITNESS || fitness < iteration - 1
            });

            match accepted {
                Some(b) => {
                    self.pairs.push(Pair::new(iteration, a, b, &mut self.opponents));
                    self.sort_by_fitness(&mut order);
                    cursor = 0;
                    iteration += 1;
                }
                None => cursor += 1,
            }
        }

        // Bouts the rest rule could not place
        while self.pairs.len() < self.pair_count() {
            self.sort_by_fitness(&mut order);

            let next = order
                .iter()
                .find_map(|&a| self.opponents.peek_best_opponent(a).map(|b| (a, b)))
                .or_else(|| {
                    order.iter().find_map(|&a| {
                        self.opponents.get(a).candidates().first().map(|&b| (a, b))
                    })
                });

            let Some((a, b)) = next else {
                break;
            };
            tracing::debug!("Bout {}-{} placed without rest", a, b);
            self.pairs.push(Pair::new(iteration, a, b, &mut self.opponents));
            iteration += 1;
        }
    }

    /// Score every bout against the ones before it: the rest of a side is
    /// the number of bouts since it last fenced.
    fn refresh_fitness(&mut self) -> Result<(), DispatchError> {
        self.opponents.reset_fitness_profiles(self.pair_count());

        for current in (0..self.pairs.len()).rev() {
            let (previous, tail) = self.pairs.split_at_mut(current);
            let pair = &mut tail[0];

            pair.reset_fitness();
            for (rest_count, previous_pair) in previous.iter().rev().enumerate() {
                pair.set_fitness(previous_pair, rest_count, &mut self.opponents)?;
            }
        }
        Ok(())
    }

    fn sort_by_fitness(&self, order: &mut [OpponentId]) {
        order.sort_by(|&a, &b| {
            Opponent::compare_fitness(self.opponents.get(a), self.opponents.get(b)).cmp(&0)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bout_tables::MAX_TABLE_POOL_SIZE;
    use rustc_hash::FxHashSet;

    fn pairs(order: &BoutOrder) -> Vec<(OpponentId, OpponentId)> {
        order.bouts().iter().map(|b| (b.a, b.b)).collect()
    }

    fn assert_round_robin(order: &BoutOrder) {
        let mut seen = FxHashSet::default();
        for bout in order.bouts() {
            let key = (bout.a.min(bout.b), bout.a.max(bout.b));
            assert!(seen.insert(key), "bout {:?} scheduled twice", key);
        }
        assert_eq!(seen.len(), order.pair_count());
    }

    #[test]
    fn test_generate_pool_of_four() {
        let order = BoutOrder::generate(4).unwrap();
        assert_eq!(pairs(&order), vec![(1, 4), (2, 3), (1, 3), (2, 4), (3, 4), (1, 2)]);

        let errors: Vec<bool> = order.bouts().iter().map(|b| b.rest_error).collect();
        assert_eq!(errors, vec![false, false, true, false, true, false]);
        assert_eq!(order.rest_errors(), 2);
    }

    #[test]
    fn test_generate_follows_standard_table() {
        for size in 2..=MAX_TABLE_POOL_SIZE {
            let order = BoutOrder::generate(size).unwrap();
            assert_eq!(pairs(&order), standard_order(size).unwrap().to_vec());
        }
    }

    #[test]
    fn test_large_pool_is_built_greedily() {
        let size = MAX_TABLE_POOL_SIZE + 1;
        let order = BoutOrder::generate(size).unwrap();
        assert_eq!(order.bouts().len(), order.pair_count());
        assert_round_robin(&order);
        // 1-2 opens every greedy order
        assert_eq!(pairs(&order)[0], (1, 2));
    }

    #[test]
    fn test_distinct_affinities_use_standard_table() {
        let order = BoutOrder::with_affinity(&[Some(0), Some(1), Some(2), Some(3)]).unwrap();
        assert_eq!(pairs(&order), pairs(&BoutOrder::generate(4).unwrap()));
    }

    #[test]
    fn test_rest_values() {
        let order = BoutOrder::generate(4).unwrap();
        let bouts = order.bouts();

        // 2-4: 2 rested one bout, 4 rested two
        assert_eq!((bouts[3].a_rest, bouts[3].b_rest), (1, 2));
        // First bouts have no previous bout
        assert_eq!((bouts[0].a_rest, bouts[0].b_rest), (0, 0));
        assert!(!bouts[0].rest_error);

        let profile = order.rest_profile(1).unwrap();
        assert_eq!(profile.len(), 6);
        assert_eq!(profile[1], 1);
        assert_eq!(profile[2], 1);
        assert!(order.rest_profile(5).is_none());
    }

    #[test]
    fn test_every_pairing_once() {
        for size in 0..=24 {
            let order = BoutOrder::generate(size).unwrap();
            assert_eq!(order.bouts().len(), order.pair_count());
            assert_round_robin(&order);
        }
    }

    #[test]
    fn test_teammates_meet_first() {
        // 1 and 3 share a club, so do 2 and 4
        let order = BoutOrder::with_affinity(&[Some(0), Some(1), Some(0), Some(1)]).unwrap();
        assert_eq!(pairs(&order), vec![(1, 3), (2, 4), (2, 1), (3, 4), (3, 2), (1, 4)]);
        assert_round_robin(&order);
    }

    #[test]
    fn test_affinity_with_larger_pool() {
        let affinities = [Some(0), Some(1), Some(0), Some(2), Some(1), Some(0), None];
        let order = BoutOrder::with_affinity(&affinities).unwrap();
        assert_round_robin(&order);

        // Members of club 0 (1, 3 and 6) meet each other before any outsider
        let bouts = pairs(&order);
        let club = [1, 3, 6];
        for member in club {
            let involved: Vec<(usize, bool)> = bouts
                .iter()
                .enumerate()
                .filter(|(_, (a, b))| *a == member || *b == member)
                .map(|(i, (a, b))| (i, club.contains(a) && club.contains(b)))
                .collect();
            let last_internal = involved.iter().filter(|(_, inside)| *inside).map(|(i, _)| *i).max();
            let first_external = involved.iter().filter(|(_, inside)| !*inside).map(|(i, _)| *i).min();
            assert!(last_internal.unwrap() < first_external.unwrap());
        }
    }

    #[test]
    fn test_single_team_is_ignored() {
        let plain = BoutOrder::generate(5).unwrap();
        let same_club = BoutOrder::with_affinity(&[Some(3); 5]).unwrap();
        assert_eq!(pairs(&plain), pairs(&same_club));
    }

    #[test]
    fn test_from_pairs() {
        let order = BoutOrder::from_pairs(3, &[(1, 2), (2, 3), (1, 3)]).unwrap();
        let bouts = order.bouts();
        assert_eq!(bouts.len(), 3);
        assert!(bouts[1].rest_error);
        assert!(bouts[2].rest_error);
        assert!(!bouts[0].rest_error);
    }

    #[test]
    fn test_from_pairs_self_pairing() {
        let result = BoutOrder::from_pairs(3, &[(1, 2), (2, 2)]);
        assert_eq!(result.err(), Some(DispatchError::SelfPairing { opponent: 2 }));
    }

    #[test]
    fn test_from_pairs_unknown_opponent() {
        let result = BoutOrder::from_pairs(3, &[(1, 4)]);
        assert_eq!(
            result.err(),
            Some(DispatchError::UnknownOpponent { opponent: 4, pool_size: 3 })
        );
    }
}
