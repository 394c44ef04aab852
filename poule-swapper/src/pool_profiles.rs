//! Pool sizing: how many pools are small, how many may be big

use serde::Serialize;

/// Pool size class
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PoolSize {
    Small,
    Big,
}

impl PoolSize {
    /// Size classes in the order placement tries them
    pub const ALL: [PoolSize; 2] = [PoolSize::Small, PoolSize::Big];
}

/// Small/big pool sizes with a live count of big pools
#[derive(Clone, Debug, Default, Serialize)]
pub struct PoolProfiles {
    small_size: usize,
    /// 0 when fencers divide evenly
    big_size: usize,
    max_big_count: usize,
    big_count: usize,
}

impl PoolProfiles {
    /// Compute sizes for `fencer_count` fencers spread over `pool_count` pools
    pub fn configure(&mut self, fencer_count: usize, pool_count: usize) {
        self.small_size = fencer_count / pool_count.max(1);
        self.max_big_count = fencer_count % pool_count.max(1);
        self.big_size = if self.max_big_count > 0 {
            self.small_size + 1
        } else {
            0
        };
        self.big_count = 0;
    }

    /// Allowed size for a class, 0 once the big-pool quota is exhausted
    pub fn size(&self, size: PoolSize) -> usize {
        match size {
            PoolSize::Small => self.small_size,
            PoolSize::Big if self.big_count < self.max_big_count => self.big_size,
            PoolSize::Big => 0,
        }
    }

    pub fn exists(&self, size: PoolSize) -> bool {
        self.size(size) > 0
    }

    /// Track a pool going from `old_count` to `new_count` fencers
    pub fn change_fencer_count(&mut self, old_count: usize, new_count: usize) {
        if self.big_size == 0 {
            return;
        }
        if new_count == self.big_size {
            self.big_count += 1;
        } else if old_count == self.big_size {
            self.big_count = self.big_count.saturating_sub(1);
        }
    }

    pub fn big_count(&self) -> usize {
        self.big_count
    }

    pub fn max_big_count(&self) -> usize {
        self.max_big_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configure() {
        let mut profiles = PoolProfiles::default();
        profiles.configure(17, 3);

        assert_eq!(profiles.size(PoolSize::Small), 5);
        assert_eq!(profiles.size(PoolSize::Big), 6);
        assert_eq!(profiles.max_big_count(), 2);
    }

    #[test]
    fn test_even_division_has_no_big_pools() {
        let mut profiles = PoolProfiles::default();
        profiles.configure(12, 3);

        assert_eq!(profiles.size(PoolSize::Small), 4);
        assert!(!profiles.exists(PoolSize::Big));
        profiles.change_fencer_count(3, 4);
        assert_eq!(profiles.big_count(), 0);
    }

    #[test]
    fn test_big_quota_self_corrects() {
        let mut profiles = PoolProfiles::default();
        profiles.configure(10, 3);
        assert!(profiles.exists(PoolSize::Big));

        profiles.change_fencer_count(3, 4);
        assert!(!profiles.exists(PoolSize::Big));
        assert_eq!(profiles.size(PoolSize::Big), 0);

        // Pool shrinks back: quota available again
        profiles.change_fencer_count(4, 3);
        assert!(profiles.exists(PoolSize::Big));
        assert_eq!(profiles.size(PoolSize::Big), 4);
    }
}
