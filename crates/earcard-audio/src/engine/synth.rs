//! ADSR-shaped sine voice.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use earcard_core::{midi_to_freq, EngineId};

use super::{check_sample_rate, note_seconds, EngineStatus, SoundEngine, DEFAULT_SAMPLE_RATE};
use crate::envelope::{AdsrEnvelope, AdsrParams};
use crate::error::AudioResult;
use crate::oscillator::{db_to_gain, render_sine};
use crate::sink::{AudioSink, Clip};

const VOLUME_DB: f64 = -8.0;

/// A sine voice shaped by an ADSR envelope and released at the note duration.
pub struct SynthEngine {
    sink: Arc<dyn AudioSink>,
    sample_rate: u32,
    params: AdsrParams,
    ready: AtomicBool,
}

impl SynthEngine {
    /// Creates the engine with the default envelope.
    pub fn new(sink: Arc<dyn AudioSink>) -> Self {
        Self {
            sink,
            sample_rate: DEFAULT_SAMPLE_RATE,
            params: AdsrParams::default(),
            ready: AtomicBool::new(false),
        }
    }

    /// Overrides the render sample rate.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Overrides the envelope.
    pub fn with_envelope(mut self, params: AdsrParams) -> Self {
        self.params = params;
        self
    }

    /// Renders a note without playing it. The clip runs past the duration by
    /// the envelope's release time.
    pub fn render(&self, pitch: i32, duration_ms: Option<u32>) -> AudioResult<Clip> {
        let rate = check_sample_rate(self.sample_rate)?;
        let hold = note_seconds(duration_ms, self.default_duration_ms())?;

        let envelope = AdsrEnvelope::generate_note(&self.params, rate, hold);
        let tone = render_sine(midi_to_freq(pitch), envelope.len(), rate);
        let gain = db_to_gain(VOLUME_DB);
        Ok(Clip {
            pitch,
            sample_rate: self.sample_rate,
            samples: tone
                .iter()
                .zip(&envelope)
                .map(|(s, e)| s * e * gain)
                .collect(),
        })
    }
}

impl SoundEngine for SynthEngine {
    fn id(&self) -> EngineId {
        EngineId::Synth
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::NullSink;

    #[test]
    fn test_render_includes_release() {
        let engine = SynthEngine::new(Arc::new(NullSink)).with_sample_rate(1000);
        let clip = engine.render(57, Some(400)).unwrap();
        // 400 ms hold plus ~200 ms release.
        assert!(
            (590..=605).contains(&clip.samples.len()),
            "len {}",
            clip.samples.len()
        );
        assert!(clip.peak() <= db_to_gain(VOLUME_DB) + 1e-9);
    }

    #[test]
    fn test_zero_duration_fails() {
        let engine = SynthEngine::new(Arc::new(NullSink));
        assert!(engine.render(60, Some(0)).is_err());
    }
}
