//! Pair - two opponents proposed together for one iteration

use poule_core::DispatchError;
use serde::Serialize;

use crate::opponent::{OpponentId, Opponents, UNSET_FITNESS};

/// Anything a pair can be scored against
pub trait Encounter {
    fn has_opponent(&self, opponent: Option<OpponentId>) -> bool;
}

/// A past meeting of two opponents
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Meeting {
    pub a: OpponentId,
    pub b: OpponentId,
}

impl Encounter for Meeting {
    fn has_opponent(&self, opponent: Option<OpponentId>) -> bool {
        opponent.is_some_and(|o| o == self.a || o == self.b)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Pair {
    a: OpponentId,
    b: OpponentId,
    a_fitness: i32,
    b_fitness: i32,
}

impl Pair {
    /// Bind `a` and `b` at `iteration`. Both opponents take `iteration` as
    /// fitness and leave each other's candidates.
    ///
    /// # Panics
    /// Panics if `a == b` or if only one of them still lists the other as
    /// a candidate.
    pub fn new(iteration: i32, a: OpponentId, b: OpponentId, opponents: &mut Opponents) -> Self {
        assert_ne!(a, b, "an opponent cannot be paired with itself");
        assert_eq!(
            opponents.get(a).has_candidate(b),
            opponents.get(b).has_candidate(a),
            "asymmetric candidacy between {} and {}",
            a,
            b
        );

        opponents.get_mut(a).set_fitness(iteration);
        opponents.get_mut(b).set_fitness(iteration);
        opponents.use_opponent(a, b);

        Self {
            a,
            b,
            a_fitness: UNSET_FITNESS,
            b_fitness: UNSET_FITNESS,
        }
    }

    pub fn a(&self) -> OpponentId {
        self.a
    }

    pub fn b(&self) -> OpponentId {
        self.b
    }

    /// Forget both derived fitnesses before a new scoring pass
    pub fn reset_fitness(&mut self) {
        self.a_fitness = UNSET_FITNESS;
        self.b_fitness = UNSET_FITNESS;
    }

    /// Each side still unscored that also appears in `tested` takes
    /// `fitness`, which is recorded in that opponent's profile.
    pub fn set_fitness(
        &mut self,
        tested: &impl Encounter,
        fitness: usize,
        opponents: &mut Opponents,
    ) -> Result<(), DispatchError> {
        if self.a_fitness == UNSET_FITNESS && tested.has_opponent(Some(self.a)) {
            self.a_fitness = fitness as i32;
            opponents.get_mut(self.a).refresh_fitness_profile(fitness)?;
        }
        if self.b_fitness == UNSET_FITNESS && tested.has_opponent(Some(self.b)) {
            self.b_fitness = fitness as i32;
            opponents.get_mut(self.b).refresh_fitness_profile(fitness)?;
        }
        Ok(())
    }

    /// A side scored 0: the clash this pairing must avoid
    pub fn has_fitness_error(&self) -> bool {
        self.a_fitness == 0 || self.b_fitness == 0
    }

    /// Derived fitness of `a`, 0 when unknown
    pub fn a_fitness(&self) -> u32 {
        self.a_fitness.max(0) as u32
    }

    /// Derived fitness of `b`, 0 when unknown
    pub fn b_fitness(&self) -> u32 {
        self.b_fitness.max(0) as u32
    }
}

impl Encounter for Pair {
    fn has_opponent(&self, opponent: Option<OpponentId>) -> bool {
        opponent.is_some_and(|o| o == self.a || o == self.b)
    }
}
