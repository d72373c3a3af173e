//! Settings command implementation
//!
//! Shows, edits and resets the persisted drill settings.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use earcard_core::{EngineId, IntervalId, Settings, SettingsEdit};
use std::process::ExitCode;

/// Settings subcommands.
#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Print the current settings
    Show {
        /// Print the stored JSON object
        #[arg(long)]
        json: bool,
    },

    /// Change one or more settings
    Set {
        /// Lowest pitch, e.g. A2 (blank restores the default)
        #[arg(long)]
        range_min: Option<String>,

        /// Highest pitch, e.g. E4 (blank restores the default)
        #[arg(long)]
        range_max: Option<String>,

        /// Show octave numbers on cards
        #[arg(long)]
        show_octaves: Option<bool>,

        /// Sound engine (oscillator, synth, sampler)
        #[arg(long)]
        engine: Option<EngineId>,

        /// Comma-separated interval ids, e.g. m3,M3,P5 (empty enables all)
        #[arg(long)]
        pool: Option<String>,
    },

    /// Restore the defaults
    Reset,
}

/// Parses a comma-separated interval list. Blank entries are skipped.
pub fn parse_pool(list: &str) -> Result<Vec<IntervalId>> {
    list.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| id.parse::<IntervalId>().map_err(anyhow::Error::from))
        .collect()
}

fn print_settings(settings: &Settings) {
    let (lo, hi) = settings.active_range();
    println!(
        "{:<13} {} .. {}  ({}..{})",
        "range".bold(),
        settings.range_min,
        settings.range_max,
        lo,
        hi
    );
    println!("{:<13} {}", "show octaves".bold(), settings.show_octaves);
    println!("{:<13} {}", "engine".bold(), settings.engine.display_name());
    let pool: Vec<&str> = settings.effective_pool().iter().map(|id| id.as_str()).collect();
    println!("{:<13} {}", "intervals".bold(), pool.join(" "));
}

/// Run the settings command
pub fn run(config_dir: Option<&str>, action: SettingsAction) -> Result<ExitCode> {
    let store = super::settings_store(config_dir)?;

    match action {
        SettingsAction::Show { json } => {
            let settings = store.load();
            if json {
                let out = serde_json::to_string_pretty(&settings)
                    .context("Failed to serialize settings")?;
                println!("{}", out);
            } else {
                print_settings(&settings);
            }
        }
        SettingsAction::Set {
            range_min,
            range_max,
            show_octaves,
            engine,
            pool,
        } => {
            let edit = SettingsEdit {
                range_min,
                range_max,
                show_octaves,
                engine,
                pool: pool.as_deref().map(parse_pool).transpose()?,
            };
            let settings = store.load().edited(edit);
            store.save(&settings).context("Failed to save settings")?;
            println!("{}", "Settings saved".green().bold());
            print_settings(&settings);
        }
        SettingsAction::Reset => {
            store
                .save(&Settings::default())
                .context("Failed to save settings")?;
            println!("{}", "Settings reset to defaults".green().bold());
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pool() {
        assert_eq!(
            parse_pool(" m3, P5 ,,M7").unwrap(),
            vec![
                IntervalId::MinorThird,
                IntervalId::PerfectFifth,
                IntervalId::MajorSeventh
            ]
        );
        assert!(parse_pool("").unwrap().is_empty());
        assert!(parse_pool("P5,X9").is_err());
    }
}
