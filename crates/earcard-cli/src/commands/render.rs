//! Render command implementation
//!
//! Renders a single note with one engine and writes it as a WAV file.

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use earcard_audio::{
    Clip, NullSink, OscillatorEngine, SampleLoader, SamplerEngine, SynthEngine,
    SynthesizedLoader, WavDirLoader,
};
use earcard_core::{name_to_pitch, EngineId};
use std::fs;
use std::process::ExitCode;
use std::sync::Arc;

/// Renders `pitch` with `engine`, loading samples from `samples` if given.
pub async fn render_clip(
    engine: EngineId,
    pitch: i32,
    duration_ms: Option<u32>,
    samples: Option<&str>,
) -> Result<Clip> {
    let sink = Arc::new(NullSink);
    let clip = match engine {
        EngineId::Oscillator => OscillatorEngine::new(sink).render(pitch, duration_ms)?,
        EngineId::Synth => SynthEngine::new(sink).render(pitch, duration_ms)?,
        EngineId::Sampler => {
            let loader: Arc<dyn SampleLoader> = match samples {
                Some(dir) => Arc::new(WavDirLoader::new(dir)),
                None => Arc::new(SynthesizedLoader::default()),
            };
            SamplerEngine::new(sink, loader)
                .render(pitch, duration_ms)
                .await?
        }
    };
    Ok(clip)
}

/// Run the render command
///
/// # Arguments
/// * `note` - Pitch name, e.g. `A4`
/// * `engine` - Engine to render with
/// * `duration_ms` - Note length (default: the engine's)
/// * `samples` - Sample directory for the sampler
/// * `out` - Output WAV path
pub fn run(
    note: &str,
    engine: EngineId,
    duration_ms: Option<u32>,
    samples: Option<&str>,
    out: &str,
) -> Result<ExitCode> {
    let pitch = name_to_pitch(note).ok_or_else(|| anyhow!("Not a pitch name: '{}'", note))?;

    let rt = super::runtime()?;
    let clip = rt.block_on(render_clip(engine, pitch, duration_ms, samples))?;

    fs::write(out, clip.to_wav()).with_context(|| format!("Failed to write to: {}", out))?;
    println!(
        "{} {} with {} ({:.2} s) to {}",
        "Rendered".green().bold(),
        note.trim(),
        engine.display_name(),
        clip.duration_secs(),
        out
    );

    Ok(ExitCode::SUCCESS)
}
