//! Criteria quotas
//!
//! A `Criteria` tallies the fencers sharing one value of a balancing
//! attribute and derives how many of them a pool may hold. `CriteriaValue`
//! adds the rank-ordered member list used to decide which of them may take
//! a floating (rounded-up) slot.

use serde::Serialize;

/// Per-value quota
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Criteria {
    count: usize,
    max_count_per_pool: usize,
    floating_count: usize,
}

impl Criteria {
    /// Count one more fencer carrying this value
    pub fn use_one(&mut self) {
        self.count += 1;
    }

    /// Derive the quota once every fencer has been counted
    pub fn profile(&mut self, name: &str, pool_count: usize) {
        let pool_count = pool_count.max(1);

        self.max_count_per_pool = self.count / pool_count;
        self.floating_count = self.count % pool_count;
        if self.floating_count > 0 {
            self.max_count_per_pool += 1;
        }

        tracing::debug!(
            "{:>3} x {:<20} >> {} (max) {} (floating)",
            self.count,
            name,
            self.max_count_per_pool,
            self.floating_count
        );
    }

    pub fn has_floating_profile(&self) -> bool {
        self.floating_count > 0
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Ceiling of `count / pool_count`
    pub fn max_count_per_pool(&self) -> usize {
        self.max_count_per_pool
    }

    /// Number of pools holding the ceiling
    pub fn floating_count(&self) -> usize {
        self.floating_count
    }

    /// Floor of `count / pool_count`
    pub fn floor(&self) -> usize {
        if self.has_floating_profile() {
            self.max_count_per_pool - 1
        } else {
            self.max_count_per_pool
        }
    }
}

/// Quota plus the members carrying the value, best rank first
#[derive(Clone, Debug, Default)]
pub struct CriteriaValue {
    criteria: Criteria,
    pool_count: usize,
    /// (stage start rank, fencer)
    members: Vec<(u32, usize)>,
}

impl CriteriaValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count `fencer` and insert it by rank (ties keep insertion order)
    pub fn use_fencer(&mut self, fencer: usize, rank: u32) {
        self.criteria.use_one();

        let at = self.members.partition_point(|&(r, _)| r <= rank);
        self.members.insert(at, (rank, fencer));
    }

    pub fn profile(&mut self, name: &str, pool_count: usize) {
        self.pool_count = pool_count;
        self.criteria.profile(name, pool_count);
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    /// 1-based position of `fencer` among the members
    pub fn position(&self, fencer: usize) -> Option<usize> {
        self.members
            .iter()
            .position(|&(_, f)| f == fencer)
            .map(|i| i + 1)
    }

    /// Whether `fencer` ranks inside the floating band: past the
    /// `(max - 1) * pool_count` members every pool must hold.
    pub fn can_float(&self, fencer: usize) -> bool {
        if !self.criteria.has_floating_profile() {
            return false;
        }

        let band = (self.criteria.max_count_per_pool - 1) * self.pool_count;
        self.position(fencer).is_some_and(|position| position > band)
    }

    /// First in-pool teammate rank (1-based) that is over quota for `fencer`
    pub fn error_line(&self, fencer: usize, worst_case: bool) -> usize {
        if worst_case || self.can_float(fencer) {
            self.criteria.max_count_per_pool + 1
        } else {
            self.criteria.floor() + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(count: usize, pool_count: usize) -> CriteriaValue {
        let mut value = CriteriaValue::new();
        for f in 0..count {
            value.use_fencer(f, f as u32 + 1);
        }
        value.profile("club", pool_count);
        value
    }

    #[test]
    fn test_profile_quotas() {
        // 17 fencers over 3 pools: A x9, B x5, C x3
        let a = value(9, 3);
        assert_eq!(a.criteria().max_count_per_pool(), 3);
        assert_eq!(a.criteria().floating_count(), 0);
        assert!(!a.criteria().has_floating_profile());

        let b = value(5, 3);
        assert_eq!(b.criteria().max_count_per_pool(), 2);
        assert_eq!(b.criteria().floating_count(), 2);
        assert_eq!(b.criteria().floor(), 1);

        let c = value(3, 3);
        assert_eq!(c.criteria().max_count_per_pool(), 1);
        assert_eq!(c.criteria().floating_count(), 0);
    }

    #[test]
    fn test_members_sorted_by_rank() {
        let mut value = CriteriaValue::new();
        value.use_fencer(10, 7);
        value.use_fencer(11, 2);
        value.use_fencer(12, 7);
        value.use_fencer(13, 5);

        assert_eq!(value.position(11), Some(1));
        assert_eq!(value.position(13), Some(2));
        assert_eq!(value.position(10), Some(3));
        assert_eq!(value.position(12), Some(4));
        assert_eq!(value.position(99), None);
    }

    #[test]
    fn test_floating_band() {
        let b = value(5, 3);
        // (2 - 1) * 3 = 3 members are mandatory, the last two float
        assert!(!b.can_float(2));
        assert!(b.can_float(3));
        assert!(b.can_float(4));

        assert_eq!(b.error_line(0, false), 2);
        assert_eq!(b.error_line(4, false), 3);
        assert_eq!(b.error_line(0, true), 3);
    }

    #[test]
    fn test_small_value_always_floats() {
        // Fewer fencers than pools: max 1, every member may float
        let value = value(2, 4);
        assert!(value.can_float(0));
        assert!(value.can_float(1));
        assert_eq!(value.error_line(0, false), 2);
    }
}
