//! Working state of one pool and of each fencer during a swap

use poule_core::{RosterEntry, ValueId};

/// A fencer as tracked by the swapper
#[derive(Clone, Debug)]
pub struct SwapFencer {
    pub rank: u32,
    /// Criteria value per depth
    pub values: Vec<Option<ValueId>>,
    /// Pool index the fencer was seeded into
    pub original_pool: usize,
    /// Pool index currently holding the fencer, `None` while extracted
    pub new_pool: Option<usize>,
}

impl SwapFencer {
    pub fn new(entry: &RosterEntry, original_pool: usize) -> Self {
        Self {
            rank: entry.rank,
            values: entry.values.clone(),
            original_pool,
            new_pool: None,
        }
    }

    pub fn value(&self, depth: usize) -> Option<ValueId> {
        self.values.get(depth).copied().flatten()
    }
}

/// Members of one pool, kept sorted by rank, with per-value counts
#[derive(Clone, Debug)]
pub struct PoolData {
    /// 1-based pool number
    id: usize,
    members: Vec<usize>,
    /// scores[depth][value] = members carrying that value
    scores: Vec<Vec<usize>>,
}

impl PoolData {
    /// `value_counts[depth]` is the number of distinct values at that depth
    pub fn new(id: usize, value_counts: &[usize]) -> Self {
        Self {
            id,
            members: Vec::new(),
            scores: value_counts.iter().map(|&n| vec![0; n]).collect(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Fencer indices, best rank first
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn score(&self, depth: usize, value: ValueId) -> usize {
        self.scores
            .get(depth)
            .and_then(|s| s.get(value))
            .copied()
            .unwrap_or(0)
    }

    /// The head seed of the pool: its rank equals the pool number
    pub fn is_leader(&self, fencer: &SwapFencer) -> bool {
        fencer.rank as usize == self.id
    }

    pub fn insert(&mut self, index: usize, fencers: &mut [SwapFencer]) {
        let rank = fencers[index].rank;
        let at = self
            .members
            .partition_point(|&m| fencers[m].rank <= rank);
        self.members.insert(at, index);

        self.change_scores(&fencers[index], true);
        fencers[index].new_pool = Some(self.id - 1);
    }

    pub fn remove(&mut self, index: usize, fencers: &mut [SwapFencer]) {
        if let Some(at) = self.members.iter().position(|&m| m == index) {
            self.members.remove(at);
            self.change_scores(&fencers[index], false);
            fencers[index].new_pool = None;
        }
    }

    /// 1-based rank of a member among the pool members sharing its value at
    /// `depth`. For a non-member, the rank it would take once inserted.
    pub fn teammate_rank(&self, index: usize, depth: usize, fencers: &[SwapFencer]) -> usize {
        let fencer = &fencers[index];
        let value = fencer.value(depth);
        let mut rank = 1;

        for &m in &self.members {
            if m == index {
                break;
            }
            let teammate = &fencers[m];
            if teammate.value(depth) == value {
                if fencer.rank < teammate.rank {
                    break;
                }
                rank += 1;
            }
        }
        rank
    }

    fn change_scores(&mut self, fencer: &SwapFencer, added: bool) {
        for (depth, scores) in self.scores.iter_mut().enumerate() {
            if let Some(score) = fencer.value(depth).and_then(|v| scores.get_mut(v)) {
                if added {
                    *score += 1;
                } else {
                    *score = score.saturating_sub(1);
                }
            }
        }
    }
}
