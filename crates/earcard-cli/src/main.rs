//! earcard - interval ear-training flash cards on the terminal
//!
//! Draws cards that ask for the interval between two pitches, plays them
//! through one of three sound engines and keeps the drill settings between
//! runs.

use clap::{Parser, Subcommand};
use earcard_core::EngineId;
use std::process::ExitCode;

use earcard_cli::commands;
use earcard_cli::commands::drill::DrillOptions;
use earcard_cli::commands::settings::SettingsAction;

/// earcard - Interval Ear-Training Flash Cards
#[derive(Parser)]
#[command(name = "earcard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Directory holding the settings file (default: <config dir>/earcard)
    #[arg(long, global = true)]
    config_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive drill
    Drill {
        /// RNG seed for a reproducible card sequence
        #[arg(long)]
        seed: Option<u64>,

        /// Engine for this session (oscillator, synth, sampler)
        #[arg(short, long)]
        engine: Option<EngineId>,

        /// Directory with C4.wav, Ds4.wav, Fs4.wav and A4.wav for the sampler
        #[arg(long)]
        samples: Option<String>,

        /// Write each played note as a WAV file in this directory
        #[arg(short, long, conflicts_with = "player")]
        out: Option<String>,

        /// Play through a system audio player and fail if none is found
        #[arg(long)]
        player: bool,
    },

    /// Print a sequence of cards
    Cards {
        /// Number of cards
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,

        /// RNG seed for a reproducible card sequence
        #[arg(long)]
        seed: Option<u64>,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// List pitch names over a range
    Names {
        /// Lowest pitch (default: C1)
        #[arg(long)]
        from: Option<String>,

        /// Highest pitch (default: C7)
        #[arg(long)]
        to: Option<String>,

        /// Omit octave numbers
        #[arg(long)]
        no_octave: bool,

        /// Show flat spellings next to sharps, e.g. C#/Db4
        #[arg(long)]
        enharmonic: bool,
    },

    /// Show or change the drill settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Render one note to a WAV file
    Render {
        /// Pitch name, e.g. A4
        #[arg(long)]
        note: String,

        /// Engine to render with
        #[arg(short, long, default_value_t = EngineId::default())]
        engine: EngineId,

        /// Note length in milliseconds (default: the engine's)
        #[arg(short, long)]
        duration: Option<u32>,

        /// Sample directory for the sampler
        #[arg(long)]
        samples: Option<String>,

        /// Output WAV file
        #[arg(short, long)]
        out: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_dir = cli.config_dir.as_deref();

    let result = match cli.command {
        Commands::Drill {
            seed,
            engine,
            samples,
            out,
            player,
        } => commands::drill::run(DrillOptions {
            config_dir,
            seed,
            engine,
            samples: samples.as_deref(),
            out: out.as_deref(),
            player,
        }),
        Commands::Cards { count, seed, json } => commands::cards::run(config_dir, count, seed, json),
        Commands::Names {
            from,
            to,
            no_octave,
            enharmonic,
        } => commands::names::run(from.as_deref(), to.as_deref(), no_octave, enharmonic),
        Commands::Settings { action } => commands::settings::run(config_dir, action),
        Commands::Render {
            note,
            engine,
            duration,
            samples,
            out,
        } => commands::render::run(&note, engine, duration, samples.as_deref(), &out),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
