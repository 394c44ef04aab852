//! Dispatch command - spread a roster over pools
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_inputs(), report_outcome()
//! - Level 3: load_config(), print_text_outcome()
//! - Level 4: formatting utilities

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use poule_core::{load_roster, AttributeKey, PoolHistory, Roster};
use poule_dispatcher::{
    dispatch_roster, prepare_roster, CriteriaOrder, DispatchConfig, DispatchOutcome,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct DispatchArgs {
    /// Roster JSON file (array of fencers)
    #[arg(long, value_name = "FILE")]
    pub roster: PathBuf,

    /// Number of pools
    #[arg(long)]
    pub pools: usize,

    #[command(flatten)]
    pub options: DispatchOptions,

    /// Output the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

/// Options shared by every command that dispatches a roster
#[derive(Args)]
pub struct DispatchOptions {
    /// Balancing criteria, most important first (club, country, league,
    /// team or any custom attribute)
    #[arg(long, value_delimiter = ',')]
    pub criteria: Vec<AttributeKey>,

    /// Pool history JSON file (array of rounds, oldest first)
    #[arg(long, value_name = "FILE")]
    pub history: Option<PathBuf>,

    /// Dispatch configuration JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the number of clash repair passes
    #[arg(long)]
    pub max_repair_passes: Option<usize>,

    /// Apply the criteria with the most distinct values first
    #[arg(long)]
    pub most_distinct_first: bool,

    /// Let pool leaders move during clash repair
    #[arg(long)]
    pub move_leaders: bool,

    /// Build bout orders on a single thread
    #[arg(long)]
    pub sequential: bool,
}

/// Everything a dispatch run reads from disk
pub struct DispatchInputs {
    pub roster: Roster,
    pub history: PoolHistory,
    pub config: DispatchConfig,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run dispatch command
pub fn run(args: DispatchArgs) -> Result<()> {
    let inputs = load_inputs(&args.roster, args.pools, &args.options)?;

    let outcome = dispatch_roster(&inputs.roster, args.pools, &inputs.history, &inputs.config)?;

    report_outcome(&outcome, &inputs.roster, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Load roster, history and configuration, then snapshot the roster
pub fn load_inputs(
    roster_path: &Path,
    pool_count: usize,
    options: &DispatchOptions,
) -> Result<DispatchInputs> {
    let fencers = load_roster(roster_path)
        .with_context(|| format!("Failed to load roster: {}", roster_path.display()))?;

    let history = match &options.history {
        Some(path) => PoolHistory::load(path)
            .with_context(|| format!("Failed to load history: {}", path.display()))?,
        None => PoolHistory::new(),
    };

    let config = load_config(options)?;

    tracing::info!(
        "Loaded {} fencers, {} rounds of history",
        fencers.len(),
        history.len()
    );

    let roster = prepare_roster(&fencers, pool_count, &options.criteria, &config)?;

    Ok(DispatchInputs {
        roster,
        history,
        config,
    })
}

fn report_outcome(outcome: &DispatchOutcome, roster: &Roster, json: bool) -> Result<()> {
    if json {
        let output = serde_json::to_string_pretty(outcome)?;
        println!("{}", output);
    } else {
        print_text_outcome(outcome, roster);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Config file first, command-line flags on top
fn load_config(options: &DispatchOptions) -> Result<DispatchConfig> {
    let mut config = match &options.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?
        }
        None => DispatchConfig::default(),
    };

    if let Some(passes) = options.max_repair_passes {
        config = config.with_max_repair_passes(passes);
    }
    if options.most_distinct_first {
        config = config.with_criteria_order(CriteriaOrder::MostDistinctFirst);
    }
    if options.move_leaders {
        config = config.with_protect_leaders(false);
    }
    if options.sequential {
        config = config.sequential();
    }
    Ok(config)
}

fn print_text_outcome(outcome: &DispatchOutcome, roster: &Roster) {
    for (p, pool) in outcome.pools.iter().enumerate() {
        println!("\n=== Pool {} ({} fencers) ===", p + 1, pool.len());
        for &id in pool {
            let Some(index) = roster.index_of(id) else {
                continue;
            };
            let entry = roster.entry(index);
            let moved = outcome
                .placements
                .get(index)
                .and_then(|placement| placement.swapped_from())
                .map(|from| format!("  (from pool {})", from))
                .unwrap_or_default();
            println!(
                "{:>4}  {:<28}{}{}",
                entry.rank,
                entry.name,
                format_values(roster, index),
                moved
            );
        }
    }

    println!("\nMoved: {}", outcome.moved);
    println!("Repair passes: {}", outcome.repair_passes);

    if !outcome.quota_violations.is_empty() {
        println!("\nQuota violations:");
        for v in &outcome.quota_violations {
            println!(
                "  pool {}: {} {} x{} (expected {}..={})",
                v.pool, v.criteria, v.value, v.count, v.floor, v.ceil
            );
        }
    }

    if !outcome.unresolved_clashes.is_empty() {
        println!("\nRepeat pairings:");
        for clash in &outcome.unresolved_clashes {
            println!("  pool {}: {} and {}", clash.pool, clash.a, clash.b);
        }
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Criteria values of a roster entry, e.g. `[Lyon, FRA]`
pub fn format_values(roster: &Roster, index: usize) -> String {
    if roster.criteria_count() == 0 {
        return String::new();
    }

    let values: Vec<String> = roster
        .criteria()
        .iter()
        .zip(&roster.entry(index).values)
        .map(|(spec, value)| match value {
            Some(v) => spec.value_name(*v),
            None => "-".to_string(),
        })
        .collect();
    format!("[{}]", values.join(", "))
}
