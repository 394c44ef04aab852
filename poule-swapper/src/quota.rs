//! Quota audit of a finished placement

use poule_core::{AttributeKey, Roster};
use serde::Serialize;

use crate::criteria::Criteria;

/// A pool holding a criteria value outside `[floor, ceil]`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuotaViolation {
    /// 1-based pool number
    pub pool: usize,
    pub criteria: AttributeKey,
    pub value: String,
    pub count: usize,
    pub floor: usize,
    pub ceil: usize,
}

/// Count every criteria value per pool and report the out-of-range ones.
///
/// `pools` holds roster indices, pool *k* at index *k-1*.
pub fn audit_quotas(pools: &[Vec<usize>], roster: &Roster) -> Vec<QuotaViolation> {
    let pool_count = pools.len();
    let mut violations = Vec::new();
    if pool_count == 0 {
        return violations;
    }

    for (depth, spec) in roster.criteria().iter().enumerate() {
        let mut quotas = vec![Criteria::default(); spec.values.len()];
        for entry in roster.entries() {
            if let Some(value) = entry.values[depth] {
                quotas[value].use_one();
            }
        }
        for (value, quota) in quotas.iter_mut().enumerate() {
            quota.profile(&spec.value_name(value), pool_count);
        }

        for (p, members) in pools.iter().enumerate() {
            let mut counts = vec![0usize; spec.values.len()];
            for &m in members {
                if let Some(value) = roster.entry(m).values[depth] {
                    counts[value] += 1;
                }
            }

            for (value, (&count, quota)) in counts.iter().zip(&quotas).enumerate() {
                if count < quota.floor() || count > quota.max_count_per_pool() {
                    violations.push(QuotaViolation {
                        pool: p + 1,
                        criteria: spec.key.clone(),
                        value: spec.value_name(value),
                        count,
                        floor: quota.floor(),
                        ceil: quota.max_count_per_pool(),
                    });
                }
            }
        }
    }

    violations
}
