//! Cards command implementation
//!
//! Prints a sequence of generated cards without playing anything.

use anyhow::{Context, Result};
use colored::Colorize;
use earcard_core::rng::{create_rng, entropy_rng};
use earcard_core::{next_card, Card, Settings};
use std::process::ExitCode;

/// Generates `count` chained cards from `settings`.
pub fn generate(settings: &Settings, count: usize, seed: Option<u64>) -> Vec<Card> {
    let mut rng = seed.map(create_rng).unwrap_or_else(entropy_rng);
    let mut cards: Vec<Card> = Vec::with_capacity(count);
    for _ in 0..count {
        let base = cards.last().map(|card| card.target_pitch);
        cards.push(next_card(settings, base, &mut rng));
    }
    cards
}

/// Run the cards command
///
/// # Arguments
/// * `config_dir` - Settings directory override
/// * `count` - Number of cards
/// * `seed` - RNG seed (default: from the OS)
/// * `json` - Print a JSON array instead of a table
pub fn run(config_dir: Option<&str>, count: usize, seed: Option<u64>, json: bool) -> Result<ExitCode> {
    let settings = super::settings_store(config_dir)?.load();
    let cards = generate(&settings, count, seed);

    if json {
        let out = serde_json::to_string_pretty(&cards).context("Failed to serialize cards")?;
        println!("{}", out);
        return Ok(ExitCode::SUCCESS);
    }

    let show_octave = settings.show_octaves;
    for (index, card) in cards.iter().enumerate() {
        println!(
            "{:>4}  {:<5} {:<6} {}",
            index + 1,
            card.previous_name(show_octave),
            card.interval_label().cyan(),
            card.target_name(show_octave).bold()
        );
    }

    Ok(ExitCode::SUCCESS)
}
