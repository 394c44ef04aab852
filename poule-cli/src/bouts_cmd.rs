//! Bouts command - bout order of a pool size or of dispatched pools

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;

use poule_core::Roster;
use poule_dispatcher::{bout_orders, dispatch_roster, Bout, BoutOrder};

use crate::dispatch_cmd::{format_values, load_inputs, DispatchOptions};

#[derive(Args)]
pub struct BoutsArgs {
    /// Pool size, for an order of anonymous fencers
    #[arg(long, conflicts_with = "roster", required_unless_present = "roster")]
    pub size: Option<usize>,

    /// Roster JSON file to dispatch first
    #[arg(long, value_name = "FILE", requires = "pools")]
    pub roster: Option<PathBuf>,

    /// Number of pools (with --roster)
    #[arg(long)]
    pub pools: Option<usize>,

    #[command(flatten)]
    pub options: DispatchOptions,

    /// Output orders as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct PoolBouts {
    pool: usize,
    fencers: Vec<u32>,
    rest_errors: usize,
    bouts: Vec<Bout>,
}

pub fn run(args: BoutsArgs) -> Result<()> {
    let pools = match (args.size, &args.roster, args.pools) {
        (Some(size), _, _) => vec![PoolBouts::anonymous(&BoutOrder::generate(size)?)],
        (None, Some(roster), Some(pool_count)) => {
            let inputs = load_inputs(roster, pool_count, &args.options)?;
            let outcome =
                dispatch_roster(&inputs.roster, pool_count, &inputs.history, &inputs.config)?;
            let orders = bout_orders(&outcome, &inputs.roster, &inputs.config)?;

            if !args.json {
                for ((p, order), members) in orders.iter().enumerate().zip(&outcome.pools) {
                    print_pool(p + 1, order, members, &inputs.roster);
                }
                return Ok(());
            }

            orders
                .iter()
                .zip(&outcome.pools)
                .enumerate()
                .map(|(p, (order, members))| PoolBouts {
                    pool: p + 1,
                    fencers: members.clone(),
                    rest_errors: order.rest_errors(),
                    bouts: order.bouts(),
                })
                .collect()
        }
        _ => bail!("Either --size or --roster with --pools is required"),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&pools)?);
    } else {
        for pool in &pools {
            print_bouts(&pool.bouts, |id| id.to_string());
            println!("Rest errors: {}", pool.rest_errors);
        }
    }
    Ok(())
}

impl PoolBouts {
    fn anonymous(order: &BoutOrder) -> Self {
        Self {
            pool: 1,
            fencers: Vec::new(),
            rest_errors: order.rest_errors(),
            bouts: order.bouts(),
        }
    }
}

fn print_pool(pool: usize, order: &BoutOrder, members: &[u32], roster: &Roster) {
    println!("\n=== Pool {} ===", pool);
    for (i, &id) in members.iter().enumerate() {
        if let Some(index) = roster.index_of(id) {
            println!(
                "{:>3}. {:<28}{}",
                i + 1,
                roster.entry(index).name,
                format_values(roster, index)
            );
        }
    }
    println!();
    print_bouts(&order.bouts(), |position| {
        members
            .get(position - 1)
            .and_then(|&id| roster.index_of(id))
            .map(|index| roster.entry(index).name.clone())
            .unwrap_or_else(|| position.to_string())
    });
    println!("Rest errors: {}", order.rest_errors());
}

fn print_bouts(bouts: &[Bout], name: impl Fn(usize) -> String) {
    for (i, bout) in bouts.iter().enumerate() {
        println!(
            "{:>3}. {:>2}-{:<2} {} vs {}{}",
            i + 1,
            bout.a,
            bout.b,
            name(bout.a),
            name(bout.b),
            if bout.rest_error { "  (no rest)" } else { "" }
        );
    }
}
