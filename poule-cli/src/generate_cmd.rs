//! Generate command - seeded random demo roster

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use poule_core::Fencer;

const COUNTRIES: &[&str] = &[
    "FRA", "ITA", "HUN", "GER", "USA", "KOR", "JPN", "UKR", "POL", "ESP", "EGY", "CHN",
];

const FIRST_NAMES: &[&str] = &[
    "Adele", "Bruno", "Clara", "Dario", "Elena", "Felix", "Greta", "Hugo", "Ines", "Jonas",
    "Karin", "Luca", "Marta", "Nils", "Olga", "Pavel",
];

const LAST_NAMES: &[&str] = &[
    "Arnaud", "Bertin", "Conti", "Dubois", "Esposito", "Fischer", "Garcia", "Horvath",
    "Ito", "Jansen", "Kim", "Lambert", "Moreau", "Novak", "Orsini", "Petit",
];

#[derive(Args)]
pub struct GenerateArgs {
    /// Number of fencers
    #[arg(long, default_value = "24")]
    pub fencers: usize,

    /// Number of clubs
    #[arg(long, default_value = "6")]
    pub clubs: usize,

    /// Number of countries (0 leaves country blank)
    #[arg(long, default_value = "0")]
    pub countries: usize,

    /// Random seed (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file (stdout if omitted)
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    if args.clubs == 0 {
        bail!("--clubs must be positive");
    }
    if args.countries > COUNTRIES.len() {
        bail!("At most {} countries are available", COUNTRIES.len());
    }

    let mut rng = create_rng(args.seed);
    let fencers = generate_roster(args.fencers, args.clubs, args.countries, &mut rng);
    let json = serde_json::to_string_pretty(&fencers)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write roster: {}", path.display()))?;
            tracing::info!("Wrote {} fencers to {}", fencers.len(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Fencers ranked `1..=count` in random id order, each in a random club
/// (and country when `countries > 0`)
pub fn generate_roster(
    count: usize,
    clubs: usize,
    countries: usize,
    rng: &mut ChaCha8Rng,
) -> Vec<Fencer> {
    let mut ids: Vec<u32> = (1..=count as u32).map(|i| 1000 + i).collect();
    ids.shuffle(rng);

    ids.into_iter()
        .enumerate()
        .map(|(i, id)| {
            let name = format!(
                "{} {}",
                LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())],
                FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())]
            );
            let mut fencer = Fencer::new(id, name, i as u32 + 1)
                .with_club(format!("Club {}", rng.gen_range(1..=clubs)));
            if countries > 0 {
                fencer = fencer.with_country(COUNTRIES[rng.gen_range(0..countries)]);
            }
            fencer
        })
        .collect()
}

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poule_core::{AttributeKey, Attendee};

    #[test]
    fn test_generate_roster() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let fencers = generate_roster(20, 4, 3, &mut rng);

        assert_eq!(fencers.len(), 20);
        let mut ranks: Vec<u32> = fencers.iter().map(|f| f.stage_start_rank).collect();
        ranks.sort();
        assert_eq!(ranks, (1..=20).collect::<Vec<_>>());

        for fencer in &fencers {
            assert!(fencer.attribute(&AttributeKey::Club).is_some());
            assert!(fencer.attribute(&AttributeKey::Country).is_some());
        }
    }

    #[test]
    fn test_generate_is_seeded() {
        let a = generate_roster(12, 3, 0, &mut ChaCha8Rng::seed_from_u64(1));
        let b = generate_roster(12, 3, 0, &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(a, b);
        assert!(a.iter().all(|f| f.country.is_none()));
    }
}
