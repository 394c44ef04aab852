//! Integration tests for the POULE pool dispatcher
//!
//! Tests the full stack: roster snapshot, criteria balancing, clash repair
//! and bout ordering

use poule_core::{AttributeKey, Fencer, FencerId, PoolHistory, Roster};
use poule_dispatcher::{
    bout_orders, dispatch, dispatch_roster, prepare_roster, DispatchConfig, DispatchOutcome,
};
use poule_swapper::{audit_quotas, SmartSwapper};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Random roster ranked 1..=count, clubs and countries drawn from small sets
fn random_roster(count: usize, clubs: usize, countries: usize, seed: u64) -> Vec<Fencer> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut fencers: Vec<Fencer> = (1..=count as u32)
        .map(|rank| {
            Fencer::new(500 + rank, format!("Fencer {}", rank), rank)
                .with_club(format!("Club {}", rng.gen_range(0..clubs)))
                .with_country(format!("C{}", rng.gen_range(0..countries)))
        })
        .collect();
    // Snapshot order must not depend on input order
    fencers.shuffle(&mut rng);
    fencers
}

fn pool_sets(outcome: &DispatchOutcome) -> Vec<HashSet<FencerId>> {
    outcome
        .pools
        .iter()
        .map(|pool| pool.iter().copied().collect())
        .collect()
}

fn assert_balanced(outcome: &DispatchOutcome, fencer_count: usize) {
    let sizes = outcome.pool_sizes();
    let min = sizes.iter().min().copied().unwrap_or(0);
    let max = sizes.iter().max().copied().unwrap_or(0);
    assert!(max - min <= 1, "unbalanced pool sizes {:?}", sizes);

    let mut seen = HashSet::new();
    for pool in &outcome.pools {
        for &id in pool {
            assert!(seen.insert(id), "fencer {} placed twice", id);
        }
    }
    assert_eq!(seen.len(), fencer_count);
}

// ============================================================================
// DISPATCH TESTS
// ============================================================================

#[test]
fn test_random_rosters_are_balanced() {
    for seed in 0..20 {
        let count = 12 + (seed as usize * 7) % 40;
        let pool_count = 2 + (seed as usize) % 6;
        let fencers = random_roster(count, 5, 3, seed);

        let outcome = dispatch(
            &fencers,
            pool_count,
            &[AttributeKey::Club, AttributeKey::Country],
            &PoolHistory::new(),
            &DispatchConfig::default(),
        )
        .unwrap();

        assert_eq!(outcome.pools.len(), pool_count);
        assert_balanced(&outcome, count);
        assert_eq!(outcome.placements.len(), count);
    }
}

#[test]
fn test_leaders_head_their_pool() {
    let fencers = random_roster(30, 4, 2, 42);
    let outcome = dispatch(
        &fencers,
        5,
        &[AttributeKey::Club],
        &PoolHistory::new(),
        &DispatchConfig::default(),
    )
    .unwrap();

    // Rank k heads pool k
    for (p, pool) in outcome.pools.iter().enumerate() {
        let leader = pool[0];
        assert_eq!(leader, 500 + p as u32 + 1);
    }
}

#[test]
fn test_first_criteria_within_quota_when_feasible() {
    // Six clubs of four over four pools: one of each per pool
    let fencers: Vec<Fencer> = (1..=24u32)
        .map(|rank| {
            Fencer::new(rank, format!("F{}", rank), rank)
                .with_club(format!("Club {}", (rank - 1) / 4))
        })
        .collect();

    let outcome = dispatch(
        &fencers,
        4,
        &[AttributeKey::Club],
        &PoolHistory::new(),
        &DispatchConfig::default(),
    )
    .unwrap();

    assert!(outcome.quota_violations.is_empty());
    let roster = Roster::snapshot(&fencers, &[AttributeKey::Club]).unwrap();
    for pool in &outcome.pools {
        let clubs: HashSet<_> = pool
            .iter()
            .map(|&id| roster.entry(roster.index_of(id).unwrap()).values[0])
            .collect();
        assert_eq!(clubs.len(), 6);
    }
}

#[test]
fn test_random_rosters_keep_first_criteria_quota() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    for seed in 0..30 {
        let count = rng.gen_range(10..60);
        let pool_count = rng.gen_range(2..=(count / 5));
        let fencers = random_roster(count, rng.gen_range(2..8), 3, seed);
        let config = DispatchConfig::default();

        let clubs_only = dispatch(
            &fencers,
            pool_count,
            &[AttributeKey::Club],
            &PoolHistory::new(),
            &config,
        )
        .unwrap();
        assert!(
            clubs_only.quota_violations.is_empty(),
            "{:?}",
            clubs_only.quota_violations
        );

        let with_country = dispatch(
            &fencers,
            pool_count,
            &[AttributeKey::Club, AttributeKey::Country],
            &PoolHistory::new(),
            &config,
        )
        .unwrap();
        assert_balanced(&with_country, count);
        assert!(with_country
            .quota_violations
            .iter()
            .all(|v| v.criteria != AttributeKey::Club));
    }
}

#[test]
fn test_input_order_does_not_matter() {
    let fencers = random_roster(26, 5, 3, 9);
    let mut reversed = fencers.clone();
    reversed.reverse();

    let criteria = [AttributeKey::Club, AttributeKey::Country];
    let config = DispatchConfig::default();
    let a = dispatch(&fencers, 4, &criteria, &PoolHistory::new(), &config).unwrap();
    let b = dispatch(&reversed, 4, &criteria, &PoolHistory::new(), &config).unwrap();
    assert_eq!(a.pools, b.pools);
}

#[test]
fn test_swapper_and_audit_agree() {
    let fencers = random_roster(35, 6, 3, 3);
    let roster = Roster::snapshot(&fencers, &[AttributeKey::Club]).unwrap();
    let swap = SmartSwapper::new(&roster, 5).unwrap().swap();

    let outcome = dispatch_roster(&roster, 5, &PoolHistory::new(), &DispatchConfig::default())
        .unwrap();
    assert_eq!(
        audit_quotas(&swap.pools, &roster).len(),
        outcome.quota_violations.len()
    );
    assert_eq!(swap.moved, outcome.moved);
}

// ============================================================================
// CLASH REPAIR TESTS
// ============================================================================

#[test]
fn test_second_round_repair_never_worse() {
    for seed in 0..10 {
        let fencers = random_roster(28, 5, 3, seed);
        let criteria = [AttributeKey::Club];

        let first = dispatch(
            &fencers,
            4,
            &criteria,
            &PoolHistory::new(),
            &DispatchConfig::default(),
        )
        .unwrap();

        let mut history = PoolHistory::new();
        history.push_round(first.pools.clone());

        let unrepaired = dispatch(
            &fencers,
            4,
            &criteria,
            &history,
            &DispatchConfig::default().with_max_repair_passes(0),
        )
        .unwrap();
        let repaired =
            dispatch(&fencers, 4, &criteria, &history, &DispatchConfig::default()).unwrap();

        assert!(repaired.unresolved_clashes.len() <= unrepaired.unresolved_clashes.len());
        assert!(repaired.quota_violations.len() <= unrepaired.quota_violations.len());
        assert_balanced(&repaired, fencers.len());

        // Protected leaders keep their pool
        for (p, pool) in repaired.pools.iter().enumerate() {
            assert!(pool.contains(&(500 + p as u32 + 1)));
        }
    }
}

#[test]
fn test_clashes_name_pool_members() {
    let fencers = random_roster(20, 3, 2, 11);
    let criteria = [AttributeKey::Club];
    let first = dispatch(&fencers, 4, &criteria, &PoolHistory::new(), &DispatchConfig::default())
        .unwrap();

    let history = PoolHistory::from_rounds(vec![first.pools.clone()]);
    let second = dispatch(&fencers, 4, &criteria, &history, &DispatchConfig::default()).unwrap();

    let pools = pool_sets(&second);
    for clash in &second.unresolved_clashes {
        let pool = &pools[clash.pool - 1];
        assert!(pool.contains(&clash.a) && pool.contains(&clash.b));
        assert!(history.shared_pool(0, clash.a, clash.b));
    }
}

// ============================================================================
// BOUT ORDER TESTS
// ============================================================================

#[test]
fn test_bout_orders_cover_every_pairing() {
    let fencers = random_roster(33, 4, 2, 5);
    let config = DispatchConfig::default();
    let roster = prepare_roster(&fencers, 5, &[AttributeKey::Club], &config).unwrap();
    let outcome = dispatch_roster(&roster, 5, &PoolHistory::new(), &config).unwrap();

    let orders = bout_orders(&outcome, &roster, &config).unwrap();
    assert_eq!(orders.len(), 5);

    for (order, pool) in orders.iter().zip(&outcome.pools) {
        assert_eq!(order.pool_size(), pool.len());

        let mut seen = HashSet::new();
        for bout in order.bouts() {
            assert_ne!(bout.a, bout.b);
            assert!(seen.insert((bout.a.min(bout.b), bout.a.max(bout.b))));
        }
        assert_eq!(seen.len(), pool.len() * (pool.len() - 1) / 2);
    }
}

// ============================================================================
// SERIALIZATION TESTS
// ============================================================================

#[test]
fn test_roster_json_round_trip() {
    let fencers = random_roster(8, 3, 2, 1);
    let json = serde_json::to_string(&fencers).unwrap();
    let parsed: Vec<Fencer> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, fencers);
}

#[test]
fn test_history_json_format() {
    let history: PoolHistory = serde_json::from_str("[[[1, 2], [3, 4]], [[1, 3], [2, 4]]]").unwrap();
    assert_eq!(history.len(), 2);
    assert!(history.shared_pool(0, 1, 3));
    assert!(history.shared_pool(1, 1, 2));

    let json = serde_json::to_string(&history).unwrap();
    assert_eq!(json, "[[[1,2],[3,4]],[[1,3],[2,4]]]");
}

#[test]
fn test_outcome_serializes() {
    let fencers = random_roster(10, 2, 2, 4);
    let outcome = dispatch(
        &fencers,
        2,
        &[AttributeKey::Club],
        &PoolHistory::new(),
        &DispatchConfig::default(),
    )
    .unwrap();

    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(value["pools"].as_array().unwrap().len(), 2);
    assert_eq!(value["placements"].as_array().unwrap().len(), 10);
}
