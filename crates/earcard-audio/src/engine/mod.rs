//! The sound engine contract and its three voices.
//!
//! Every engine renders a note for a pitch and hands the result to an
//! [`AudioSink`]. Engines are shared by reference; state changes go through
//! interior mutability so that `init` and `play_note` take `&self`.

mod oscillator;
mod sampler;
mod synth;

use std::fmt;
use std::sync::Arc;

use earcard_core::EngineId;

use crate::error::{AudioError, AudioResult};
use crate::samples::SampleLoader;
use crate::sink::AudioSink;

pub use oscillator::OscillatorEngine;
pub use sampler::SamplerEngine;
pub use synth::SynthEngine;

/// Sample rate used when rendering notes, in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Lifecycle of an engine's resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// Not initialized, or disposed.
    Idle,
    /// Initialization is in flight.
    Loading,
    /// Ready to play.
    Ready,
}

impl fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready => "ready",
        })
    }
}

/// Uniform contract over the voices.
#[allow(async_fn_in_trait)]
pub trait SoundEngine {
    /// Which voice this is.
    fn id(&self) -> EngineId;

    /// Note length used when `play_note` is given no duration.
    fn default_duration_ms(&self) -> u32;

    /// Prepares the engine. Calling it again once ready does nothing.
    async fn init(&self) -> AudioResult<()>;

    /// Initializes if needed, renders `pitch` and triggers playback.
    async fn play_note(&self, pitch: i32, duration_ms: Option<u32>) -> AudioResult<()>;

    /// Releases the engine's resources. A later `init` starts over.
    fn dispose(&self);

    /// Current lifecycle state.
    fn status(&self) -> EngineStatus;
}

/// Resolves an optional duration against an engine default, in seconds.
pub(crate) fn note_seconds(duration_ms: Option<u32>, default_ms: u32) -> AudioResult<f64> {
    match duration_ms.unwrap_or(default_ms) {
        0 => Err(AudioError::InvalidDuration { duration_ms: 0 }),
        ms => Ok(f64::from(ms) / 1000.0),
    }
}

pub(crate) fn check_sample_rate(rate: u32) -> AudioResult<f64> {
    if rate == 0 {
        Err(AudioError::InvalidSampleRate { rate })
    } else {
        Ok(f64::from(rate))
    }
}

/// One engine of each voice, sharing a sink.
pub struct EngineRack {
    oscillator: OscillatorEngine,
    synth: SynthEngine,
    sampler: SamplerEngine,
}

impl EngineRack {
    /// Builds the rack. The sampler draws its bank from `loader`.
    pub fn new(sink: Arc<dyn AudioSink>, loader: Arc<dyn SampleLoader>) -> Self {
        Self {
            oscillator: OscillatorEngine::new(Arc::clone(&sink)),
            synth: SynthEngine::new(Arc::clone(&sink)),
            sampler: SamplerEngine::new(sink, loader),
        }
    }

    /// The engine for `id`.
    pub fn get(&self, id: EngineId) -> ActiveEngine<'_> {
        match id {
            EngineId::Oscillator => ActiveEngine::Oscillator(&self.oscillator),
            EngineId::Synth => ActiveEngine::Synth(&self.synth),
            EngineId::Sampler => ActiveEngine::Sampler(&self.sampler),
        }
    }

    /// The sampler, whatever engine is active.
    pub fn sampler(&self) -> &SamplerEngine {
        &self.sampler
    }

    /// Disposes every engine.
    pub fn dispose_all(&self) {
        self.oscillator.dispose();
        self.synth.dispose();
        self.sampler.dispose();
    }
}

/// A borrowed engine picked out of an [`EngineRack`].
#[derive(Clone, Copy)]
pub enum ActiveEngine<'a> {
    /// Plain oscillator voice.
    Oscillator(&'a OscillatorEngine),
    /// ADSR synth voice.
    Synth(&'a SynthEngine),
    /// Sample-playback voice.
    Sampler(&'a SamplerEngine),
}

impl SoundEngine for ActiveEngine<'_> {
    fn id(&self) -> EngineId {
        match self {
            Self::Oscillator(e) => e.id(),
            Self::Synth(e) => e.id(),
            Self::Sampler(e) => e.id(),
        }
    }

    fn default_duration_ms(&self) -> u32 {
        match self {
            Self::Oscillator(e) => e.default_duration_ms(),
            Self::Synth(e) => e.default_duration_ms(),
            Self::Sampler(e) => e.default_duration_ms(),
        }
    }

    async fn init(&self) -> AudioResult<()> {
        match self {
            Self::Oscillator(e) => e.init().await,
            Self::Synth(e) => e.init().await,
            Self::Sampler(e) => e.init().await,
        }
    }

    async fn play_note(&self, pitch: i32, duration_ms: Option<u32>) -> AudioResult<()> {
        match self {
            Self::Oscillator(e) => e.play_note(pitch, duration_ms).await,
            Self::Synth(e) => e.play_note(pitch, duration_ms).await,
            Self::Sampler(e) => e.play_note(pitch, duration_ms).await,
        }
    }

    fn dispose(&self) {
        match self {
            Self::Oscillator(e) => e.dispose(),
            Self::Synth(e) => e.dispose(),
            Self::Sampler(e) => e.dispose(),
        }
    }

    fn status(&self) -> EngineStatus {
        match self {
            Self::Oscillator(e) => e.status(),
            Self::Synth(e) => e.status(),
            Self::Sampler(e) => e.status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_seconds() {
        assert_eq!(note_seconds(None, 600).unwrap(), 0.6);
        assert_eq!(note_seconds(Some(250), 600).unwrap(), 0.25);
        assert!(matches!(
            note_seconds(Some(0), 600),
            Err(AudioError::InvalidDuration { duration_ms: 0 })
        ));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(EngineStatus::Loading.to_string(), "loading");
    }
}
