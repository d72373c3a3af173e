//! Drill command implementation
//!
//! Interactive flash-card loop on the terminal. Each action is driven to
//! completion on a current-thread runtime before the next key is read.

use anyhow::{Context, Result};
use colored::Colorize;
use earcard_audio::{
    AudioSink, EngineRack, NullSink, PlayerSink, SampleLoader, SynthesizedLoader, WavDirLoader,
    WavDirSink,
};
use earcard_core::rng::{create_rng, entropy_rng};
use earcard_core::{EngineId, KeyValueStore};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;

use crate::session::Session;

/// Drill options from the command line.
#[derive(Debug, Default)]
pub struct DrillOptions<'a> {
    /// Settings directory override.
    pub config_dir: Option<&'a str>,
    /// RNG seed.
    pub seed: Option<u64>,
    /// Engine for this session only.
    pub engine: Option<EngineId>,
    /// Sample directory for the sampler.
    pub samples: Option<&'a str>,
    /// Write notes as WAV files here instead of playing them.
    pub out: Option<&'a str>,
    /// Require a system audio player.
    pub player: bool,
}

/// A key press in the drill loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Reveal the target and play it.
    Reveal,
    /// Draw the next card.
    Next,
    /// Play the previous pitch.
    PlayPrevious,
    /// Print engine status.
    Status,
    /// Leave the drill.
    Quit,
    /// Print the key help.
    Help,
}

impl Action {
    /// Parses one input line. Unknown input asks for help.
    pub fn parse(line: &str) -> Action {
        match line.trim().to_ascii_lowercase().as_str() {
            "" | "r" => Action::Reveal,
            "n" => Action::Next,
            "p" => Action::PlayPrevious,
            "s" => Action::Status,
            "q" => Action::Quit,
            _ => Action::Help,
        }
    }
}

fn make_sink(options: &DrillOptions<'_>) -> Result<Arc<dyn AudioSink>> {
    if let Some(out) = options.out {
        let sink = WavDirSink::new(out).with_context(|| format!("Failed to create {}", out))?;
        return Ok(Arc::new(sink));
    }
    match PlayerSink::detect() {
        Ok(sink) => Ok(Arc::new(sink)),
        Err(e) if !options.player => {
            tracing::warn!("{}; notes will not be audible", e);
            Ok(Arc::new(NullSink))
        }
        Err(e) => Err(e).context("--player requested but no player is available"),
    }
}

fn make_loader(samples: Option<&str>) -> Arc<dyn SampleLoader> {
    match samples {
        Some(dir) => Arc::new(WavDirLoader::new(dir)),
        None => Arc::new(SynthesizedLoader::default()),
    }
}

fn print_card<S: KeyValueStore>(session: &Session<S>) {
    let view = session.render();
    let target = match view.target {
        Some(name) => name.bold().green(),
        None => "?".dimmed(),
    };
    println!("  {}  {}  {}", view.previous.bold(), view.label.cyan(), target);
}

fn print_help() {
    println!(
        "  {}  Enter/r reveal   n next   p play previous   s status   q quit",
        "keys".dimmed()
    );
}

/// Run the drill command
pub fn run(options: DrillOptions<'_>) -> Result<ExitCode> {
    let store = super::settings_store(options.config_dir)?;
    let rack = EngineRack::new(make_sink(&options)?, make_loader(options.samples));
    let rng = options.seed.map(create_rng).unwrap_or_else(entropy_rng);
    let rt = super::runtime()?;

    let mut session = Session::new(store, rack, rng);
    if let Some(engine) = options.engine {
        session.use_engine(engine);
    }

    println!(
        "{} {} ({})",
        "Interval drill".cyan().bold(),
        session.settings().engine.display_name(),
        session.settings().effective_pool().len()
    );
    print_help();
    print_card(&session);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read input")?;

        match Action::parse(&line) {
            Action::Reveal => {
                rt.block_on(session.reveal());
                print_card(&session);
            }
            Action::Next => {
                session.next();
                print_card(&session);
            }
            Action::PlayPrevious => rt.block_on(session.play_previous()),
            Action::Status => {
                let report = session.engine_status();
                println!(
                    "  engine {} ({})   sampler {}",
                    report.engine.display_name(),
                    report.status,
                    report.sampler
                );
            }
            Action::Help => print_help(),
            Action::Quit => break,
        }
    }

    session.rack().dispose_all();
    Ok(ExitCode::SUCCESS)
}
