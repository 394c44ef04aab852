//! Opponent - per-run wrapper carrying fitness and remaining candidates
//!
//! Opponents live in an `Opponents` arena and refer to each other by their
//! 1-based `OpponentId`.

use poule_core::{DispatchError, ValueId};

/// 1-based slot of an opponent in its arena
pub type OpponentId = usize;

/// Fitness of an opponent that has not been paired yet
pub const UNSET_FITNESS: i32 = -1;

#[derive(Clone, Debug)]
pub struct Opponent {
    id: OpponentId,
    fitness: i32,
    candidates: Vec<OpponentId>,
    fitness_profile: Option<Vec<u32>>,
    affinity: Option<ValueId>,
    /// Teammates still to be met before anyone else
    lock: u32,
}

impl Opponent {
    pub fn new(id: OpponentId) -> Self {
        Self {
            id,
            fitness: UNSET_FITNESS,
            candidates: Vec::new(),
            fitness_profile: None,
            affinity: None,
            lock: 0,
        }
    }

    pub fn id(&self) -> OpponentId {
        self.id
    }

    pub fn fitness(&self) -> i32 {
        self.fitness
    }

    pub fn set_fitness(&mut self, fitness: i32) {
        self.fitness = fitness;
    }

    pub fn candidates(&self) -> &[OpponentId] {
        &self.candidates
    }

    pub fn has_candidate(&self, other: OpponentId) -> bool {
        self.candidates.contains(&other)
    }

    /// Candidates are every opponent but self; an empty roster is ignored
    pub fn feed(&mut self, all: &[OpponentId]) {
        if all.is_empty() {
            return;
        }
        self.candidates = all.iter().copied().filter(|&o| o != self.id).collect();
    }

    pub fn affinity(&self) -> Option<ValueId> {
        self.affinity
    }

    pub fn set_affinity(&mut self, affinity: Option<ValueId>) {
        self.affinity = affinity;
    }

    /// Require `teammate_count - 1` teammate bouts before any other
    pub fn lock(&mut self, affinity: ValueId, teammate_count: u32) {
        if self.affinity == Some(affinity) && teammate_count > 0 {
            self.lock = teammate_count - 1;
        }
    }

    pub fn lock_count(&self) -> u32 {
        self.lock
    }

    pub fn is_compatible_with(&self, other: &Opponent) -> bool {
        self.affinity == other.affinity || (self.lock == 0 && other.lock == 0)
    }

    /// (Re)allocate the histogram with `size` zeroed buckets
    pub fn reset_fitness_profile(&mut self, size: usize) {
        self.fitness_profile = Some(vec![0; size]);
    }

    /// Count one more pairing at `value`
    pub fn refresh_fitness_profile(&mut self, value: usize) -> Result<(), DispatchError> {
        let Some(profile) = self.fitness_profile.as_mut() else {
            return Ok(());
        };
        let size = profile.len();

        match profile.get_mut(value) {
            Some(bucket) => {
                *bucket += 1;
                Ok(())
            }
            None => Err(DispatchError::FitnessOutOfRange {
                opponent: self.id,
                value,
                size,
            }),
        }
    }

    pub fn fitness_profile(&self) -> Option<&[u32]> {
        self.fitness_profile.as_deref()
    }

    /// Ascending comparator, sign-exact
    pub fn compare_fitness(a: &Opponent, b: &Opponent) -> i32 {
        a.fitness - b.fitness
    }
}

/// Arena of the opponents of one run
#[derive(Clone, Debug, Default)]
pub struct Opponents {
    opponents: Vec<Opponent>,
}

impl Opponents {
    /// Opponents `1..=count`
    pub fn new(count: usize) -> Self {
        Self {
            opponents: (1..=count).map(Opponent::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.opponents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opponents.is_empty()
    }

    pub fn contains(&self, id: OpponentId) -> bool {
        id >= 1 && id <= self.opponents.len()
    }

    pub fn get(&self, id: OpponentId) -> &Opponent {
        &self.opponents[id - 1]
    }

    pub fn get_mut(&mut self, id: OpponentId) -> &mut Opponent {
        &mut self.opponents[id - 1]
    }

    pub fn ids(&self) -> Vec<OpponentId> {
        (1..=self.opponents.len()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Opponent> {
        self.opponents.iter()
    }

    /// Give every opponent the whole roster (minus itself) as candidates
    pub fn feed_all(&mut self) {
        let all = self.ids();
        for opponent in &mut self.opponents {
            opponent.feed(&all);
        }
    }

    pub fn reset_fitness_profiles(&mut self, size: usize) {
        for opponent in &mut self.opponents {
            opponent.reset_fitness_profile(size);
        }
    }

    /// Lock every holder of `affinity` until it has met its teammates
    pub fn lock(&mut self, affinity: ValueId, teammate_count: u32) {
        if teammate_count < 2 {
            return;
        }
        for opponent in &mut self.opponents {
            opponent.lock(affinity, teammate_count);
        }
    }

    /// Record that `a` and `b` meet: each leaves the other's candidates and
    /// teammates release one lock each.
    pub fn use_opponent(&mut self, a: OpponentId, b: OpponentId) {
        if self.get(a).affinity.is_some() && self.get(a).affinity == self.get(b).affinity {
            let lock = &mut self.get_mut(a).lock;
            *lock = lock.saturating_sub(1);
            let lock = &mut self.get_mut(b).lock;
            *lock = lock.saturating_sub(1);
        }
        self.consume(a, b);
    }

    /// Most desirable compatible candidate of `id`, left in place
    pub fn peek_best_opponent(&mut self, id: OpponentId) -> Option<OpponentId> {
        self.sort_candidates(id);

        let opponent = self.get(id);
        opponent
            .candidates
            .iter()
            .copied()
            .find(|&target| self.get(target).is_compatible_with(opponent))
    }

    /// Pop the most desirable compatible candidate of `id`; `id` also
    /// leaves the target's candidates.
    pub fn best_opponent(&mut self, id: OpponentId) -> Option<OpponentId> {
        let target = self.peek_best_opponent(id)?;
        self.consume(id, target);
        Some(target)
    }

    /// Candidates by ascending fitness; ties keep their order
    fn sort_candidates(&mut self, id: OpponentId) {
        let mut candidates = std::mem::take(&mut self.get_mut(id).candidates);
        candidates.sort_by(|&a, &b| Opponent::compare_fitness(self.get(a), self.get(b)).cmp(&0));
        self.get_mut(id).candidates = candidates;
    }

    fn consume(&mut self, a: OpponentId, b: OpponentId) {
        self.get_mut(a).candidates.retain(|&c| c != b);
        self.get_mut(b).candidates.retain(|&c| c != a);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_excludes_self() {
        let mut opponents = Opponents::new(4);
        opponents.feed_all();
        assert_eq!(opponents.get(3).candidates(), &[1, 2, 4]);

        let mut lonely = Opponent::new(1);
        lonely.feed(&[]);
        assert!(lonely.candidates().is_empty());
    }

    #[test]
    fn test_best_opponent_is_mutual() {
        let mut opponents = Opponents::new(4);
        opponents.feed_all();
        opponents.get_mut(2).set_fitness(5);
        opponents.get_mut(3).set_fitness(1);
        opponents.get_mut(4).set_fitness(1);

        let best = opponents.best_opponent(1);
        // Lowest fitness, ties keep insertion order
        assert_eq!(best, Some(3));
        assert!(!opponents.get(1).has_candidate(3));
        assert!(!opponents.get(3).has_candidate(1));
        assert_eq!(opponents.get(1).candidates(), &[4, 2]);
    }

    #[test]
    fn test_best_opponent_exhausted() {
        let mut opponents = Opponents::new(2);
        opponents.feed_all();
        assert_eq!(opponents.best_opponent(1), Some(2));
        assert_eq!(opponents.best_opponent(1), None);
        assert_eq!(opponents.best_opponent(2), None);
    }

    #[test]
    fn test_peek_keeps_candidate() {
        let mut opponents = Opponents::new(3);
        opponents.feed_all();
        assert_eq!(opponents.peek_best_opponent(1), Some(2));
        assert!(opponents.get(1).has_candidate(2));
        assert!(opponents.get(2).has_candidate(1));
    }

    #[test]
    fn test_compare_fitness_is_signed() {
        let mut a = Opponent::new(1);
        let mut b = Opponent::new(2);
        a.set_fitness(2);
        b.set_fitness(7);
        assert_eq!(Opponent::compare_fitness(&a, &b), -5);
        assert_eq!(Opponent::compare_fitness(&b, &a), 5);
        assert_eq!(Opponent::new(3).fitness(), UNSET_FITNESS);
    }

    #[test]
    fn test_fitness_profile_range() {
        let mut opponent = Opponent::new(2);
        // No profile yet: ignored
        assert!(opponent.refresh_fitness_profile(9).is_ok());

        opponent.reset_fitness_profile(3);
        opponent.refresh_fitness_profile(0).unwrap();
        opponent.refresh_fitness_profile(2).unwrap();
        opponent.refresh_fitness_profile(2).unwrap();
        assert_eq!(opponent.fitness_profile(), Some(&[1, 0, 2][..]));

        assert_eq!(
            opponent.refresh_fitness_profile(3),
            Err(DispatchError::FitnessOutOfRange { opponent: 2, value: 3, size: 3 })
        );
    }

    #[test]
    fn test_affinity_locks() {
        let mut opponents = Opponents::new(4);
        opponents.get_mut(1).set_affinity(Some(0));
        opponents.get_mut(2).set_affinity(Some(0));
        opponents.get_mut(3).set_affinity(Some(1));
        opponents.lock(0, 2);
        opponents.feed_all();

        assert_eq!(opponents.get(1).lock_count(), 1);
        assert_eq!(opponents.get(3).lock_count(), 0);
        assert!(!opponents.get(1).is_compatible_with(opponents.get(3)));
        assert!(opponents.get(1).is_compatible_with(opponents.get(2)));
        assert_eq!(opponents.peek_best_opponent(1), Some(2));
        // 3 and 4 are both unlocked
        assert!(opponents.get(3).is_compatible_with(opponents.get(4)));

        opponents.use_opponent(1, 2);
        assert_eq!(opponents.get(1).lock_count(), 0);
        assert_eq!(opponents.get(2).lock_count(), 0);
        assert!(opponents.get(1).is_compatible_with(opponents.get(3)));
    }
}
