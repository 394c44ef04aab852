//! Roster - immutable snapshot of the attendees of one dispatch run
//!
//! Criteria values are interned once here so that placement only ever
//! compares small integers.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::DispatchError;
use crate::fencer::{AttributeKey, AttributeValue, Attendee, FencerId};

/// Index of a distinct value within one criteria
pub type ValueId = usize;

/// Distinct values of one balancing criteria, in order of first appearance
#[derive(Clone, Debug, PartialEq)]
pub struct CriteriaSpec {
    pub key: AttributeKey,
    pub values: Vec<AttributeValue>,
}

impl CriteriaSpec {
    /// Display name of an interned value
    pub fn value_name(&self, value: ValueId) -> String {
        self.values
            .get(value)
            .map(|v| v.to_string())
            .unwrap_or_default()
    }
}

/// One attendee as seen by the dispatcher
#[derive(Clone, Debug, PartialEq)]
pub struct RosterEntry {
    pub id: FencerId,
    pub name: String,
    /// Stage start rank (1 = best)
    pub rank: u32,
    /// Criteria value per depth, `None` when the attribute is missing
    pub values: Vec<Option<ValueId>>,
}

/// Snapshot of the attendee list, sorted by stage start rank
#[derive(Clone, Debug, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
    criteria: Vec<CriteriaSpec>,
    index: FxHashMap<FencerId, usize>,
}

impl Roster {
    /// Take a snapshot of `attendees` for the given criteria.
    ///
    /// Entries are ordered by stage start rank; ties keep input order.
    pub fn snapshot<A: Attendee>(
        attendees: &[A],
        criteria: &[AttributeKey],
    ) -> Result<Self, DispatchError> {
        let mut seen = FxHashSet::default();
        for attendee in attendees {
            if !seen.insert(attendee.id()) {
                return Err(DispatchError::DuplicateFencer(attendee.id()));
            }
        }

        let mut order: Vec<usize> = (0..attendees.len()).collect();
        order.sort_by_key(|&i| attendees[i].stage_start_rank());

        let mut specs: Vec<CriteriaSpec> = criteria
            .iter()
            .map(|key| CriteriaSpec {
                key: key.clone(),
                values: Vec::new(),
            })
            .collect();
        let mut interned: Vec<FxHashMap<AttributeValue, ValueId>> =
            vec![FxHashMap::default(); criteria.len()];

        let entries: Vec<RosterEntry> = order
            .iter()
            .map(|&i| {
                let attendee = &attendees[i];
                let values = criteria
                    .iter()
                    .enumerate()
                    .map(|(depth, key)| {
                        attendee.attribute(key).map(|value| {
                            let spec = &mut specs[depth];
                            *interned[depth].entry(value.clone()).or_insert_with(|| {
                                spec.values.push(value);
                                spec.values.len() - 1
                            })
                        })
                    })
                    .collect();

                RosterEntry {
                    id: attendee.id(),
                    name: attendee.name().to_string(),
                    rank: attendee.stage_start_rank(),
                    values,
                }
            })
            .collect();

        let index = entries.iter().enumerate().map(|(i, e)| (e.id, i)).collect();

        Ok(Self {
            entries,
            criteria: specs,
            index,
        })
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> &RosterEntry {
        &self.entries[index]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn criteria(&self) -> &[CriteriaSpec] {
        &self.criteria
    }

    pub fn criteria_count(&self) -> usize {
        self.criteria.len()
    }

    /// Position of a fencer in the snapshot
    pub fn index_of(&self, id: FencerId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Reorder criteria so that the most fragmenting (most distinct values)
    /// comes first. Ties keep the caller's order.
    pub fn sort_criteria_by_distinct(&mut self) {
        let mut order: Vec<usize> = (0..self.criteria.len()).collect();
        order.sort_by(|&a, &b| self.criteria[b].values.len().cmp(&self.criteria[a].values.len()));

        self.criteria = order.iter().map(|&d| self.criteria[d].clone()).collect();
        for entry in &mut self.entries {
            entry.values = order.iter().map(|&d| entry.values[d]).collect();
        }
    }
}
