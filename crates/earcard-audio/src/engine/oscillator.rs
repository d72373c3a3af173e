//! Plain sine voice.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use earcard_core::{midi_to_freq, EngineId};

use super::{check_sample_rate, note_seconds, EngineStatus, SoundEngine, DEFAULT_SAMPLE_RATE};
use crate::envelope::percussive_curve;
use crate::error::AudioResult;
use crate::oscillator::render_sine;
use crate::sink::{AudioSink, Clip};

const GAIN: f64 = 0.15;
const ATTACK_SECS: f64 = 0.01;
const DECAY_FLOOR: f64 = 1e-4;
const TAIL_SECS: f64 = 0.02;

/// A bare sine voice with a short attack and exponential decay.
pub struct OscillatorEngine {
    sink: Arc<dyn AudioSink>,
    sample_rate: u32,
    ready: AtomicBool,
}

impl OscillatorEngine {
    /// Creates the engine at the default sample rate.
    pub fn new(sink: Arc<dyn AudioSink>) -> Self {
        Self {
            sink,
            sample_rate: DEFAULT_SAMPLE_RATE,
            ready: AtomicBool::new(false),
        }
    }

    /// Overrides the render sample rate.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Renders a note without playing it.
    pub fn render(&self, pitch: i32, duration_ms: Option<u32>) -> AudioResult<Clip> {
        let rate = check_sample_rate(self.sample_rate)?;
        let duration = note_seconds(duration_ms, self.default_duration_ms())?;

        let envelope = percussive_curve(rate, ATTACK_SECS, duration, DECAY_FLOOR, TAIL_SECS);
        let tone = render_sine(midi_to_freq(pitch), envelope.len(), rate);
        Ok(Clip {
            pitch,
            sample_rate: self.sample_rate,
            samples: tone
                .iter()
                .zip(&envelope)
                .map(|(s, e)| s * e * GAIN)
                .collect(),
        })
    }
}

impl SoundEngine for OscillatorEngine {
    fn id(&self) -> EngineId {
        EngineId::Oscillator
    }

    fn default_duration_ms(&self) -> u32 {
        600
    }

    async fn init(&self) -> AudioResult<()> {
        check_sample_rate(self.sample_rate)?;
        self.ready.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn play_note(&self, pitch: i32, duration_ms: Option<u32>) -> AudioResult<()> {
        self.init().await?;
        let clip = self.render(pitch, duration_ms)?;
        self.sink.play(&clip)
    }

    fn dispose(&self) {
        self.ready.store(false, Ordering::SeqCst);
    }

    fn status(&self) -> EngineStatus {
        if self.ready.load(Ordering::SeqCst) {
            EngineStatus::Ready
        } else {
            EngineStatus::Idle
        }
    }
}
