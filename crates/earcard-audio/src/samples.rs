//! Sample banks for the sampler voice and the loaders that produce them.

use std::path::PathBuf;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use earcard_core::midi_to_freq;

use crate::envelope::percussive_curve;
use crate::error::{AudioError, AudioResult};
use crate::oscillator::render_harmonics;
use crate::wav;

/// Anchor pitches of a bank and the file stem each is stored under.
pub const ANCHORS: [(i32, &str); 4] = [(60, "C4"), (63, "Ds4"), (66, "Fs4"), (69, "A4")];

/// Fade applied to the end of every rendered note, in seconds.
const END_FADE_SECS: f64 = 0.03;

/// One recorded (or rendered) note.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Pitch the recording sounds at.
    pub pitch: i32,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Mono samples.
    pub data: Vec<f64>,
}

/// A set of samples keyed by pitch.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBank {
    samples: Vec<Sample>,
}

impl SampleBank {
    /// Builds a bank. Fails when `samples` is empty or holds a zero sample rate.
    pub fn new(mut samples: Vec<Sample>) -> AudioResult<Self> {
        if samples.is_empty() {
            return Err(AudioError::EmptySampleBank);
        }
        if let Some(bad) = samples.iter().find(|s| s.sample_rate == 0) {
            return Err(AudioError::InvalidSampleRate {
                rate: bad.sample_rate,
            });
        }
        samples.sort_by_key(|s| s.pitch);
        Ok(Self { samples })
    }

    /// Number of samples in the bank.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; a bank holds at least one sample.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Anchor pitches, ascending.
    pub fn pitches(&self) -> Vec<i32> {
        self.samples.iter().map(|s| s.pitch).collect()
    }

    /// The sample closest to `pitch`. Ties go to the lower anchor.
    pub fn nearest(&self, pitch: i32) -> &Sample {
        self.samples
            .iter()
            .min_by_key(|s| (i64::from(s.pitch) - i64::from(pitch)).abs())
            .unwrap_or(&self.samples[0])
    }

    /// Renders `pitch` for `duration` seconds by resampling the nearest sample.
    ///
    /// Returns the samples and their rate, which is the source sample's rate.
    pub fn render(&self, pitch: i32, duration: f64) -> (Vec<f64>, u32) {
        let source = self.nearest(pitch);
        let ratio = 2f64.powf((f64::from(pitch) - f64::from(source.pitch)) / 12.0);
        let rate = source.sample_rate;
        let len = (duration.max(0.0) * f64::from(rate)).round() as usize;

        let mut output: Vec<f64> = (0..len)
            .map(|i| read_interpolated(&source.data, i as f64 * ratio))
            .collect();

        let fade = ((END_FADE_SECS * f64::from(rate)).round() as usize).min(len);
        for (k, sample) in output[len - fade..].iter_mut().enumerate() {
            *sample *= 1.0 - (k + 1) as f64 / fade as f64;
        }

        (output, rate)
    }
}

/// Reads `data` at a fractional position. Positions past the end read silence.
fn read_interpolated(data: &[f64], position: f64) -> f64 {
    if !(position >= 0.0 && position < data.len() as f64) {
        return 0.0;
    }
    let index = position.floor() as usize;
    let frac = position - index as f64;
    match (data.get(index), data.get(index + 1)) {
        (Some(&s0), Some(&s1)) => s0 + (s1 - s0) * frac,
        (Some(&s0), None) => s0 * (1.0 - frac),
        _ => 0.0,
    }
}

/// Produces a sample bank, possibly slowly.
pub trait SampleLoader: Send + Sync {
    /// Starts loading. The returned future owns everything it needs.
    fn load(&self) -> BoxFuture<'static, AudioResult<SampleBank>>;
}

/// Loads `C4.wav`, `Ds4.wav`, `Fs4.wav` and `A4.wav` from a directory.
#[derive(Debug, Clone)]
pub struct WavDirLoader {
    dir: PathBuf,
}

impl WavDirLoader {
    /// Creates a loader for `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SampleLoader for WavDirLoader {
    fn load(&self) -> BoxFuture<'static, AudioResult<SampleBank>> {
        let dir = self.dir.clone();
        async move {
            let mut samples = Vec::with_capacity(ANCHORS.len());
            for (pitch, stem) in ANCHORS {
                let path = dir.join(format!("{stem}.wav"));
                let bytes = tokio::fs::read(&path).await.map_err(|e| {
                    AudioError::sample_load(format!("{}: {}", path.display(), e))
                })?;
                let (data, sample_rate) = wav::decode_mono(&bytes).map_err(|e| {
                    AudioError::sample_load(format!("{}: {}", path.display(), e))
                })?;
                tracing::debug!("loaded {} ({} samples)", path.display(), data.len());
                samples.push(Sample {
                    pitch,
                    sample_rate,
                    data,
                });
            }
            SampleBank::new(samples)
        }
        .boxed()
    }
}

/// Renders a bank of decaying additive tones, one per anchor.
#[derive(Debug, Clone, Copy)]
pub struct SynthesizedLoader {
    /// Sample rate of the rendered bank.
    pub sample_rate: u32,
    /// Length of each rendered sample in seconds.
    pub length: f64,
}

impl Default for SynthesizedLoader {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            length: 2.0,
        }
    }
}

impl SynthesizedLoader {
    /// Renders one anchor.
    fn render_anchor(&self, pitch: i32) -> Sample {
        let rate = f64::from(self.sample_rate);
        let amplitudes: Vec<f64> = (1..=8u32).map(|n| 1.0 / f64::from(n).powf(1.5)).collect();
        let envelope = percussive_curve(rate, 0.005, self.length, 0.001, 0.0);
        let tone = render_harmonics(midi_to_freq(pitch), &amplitudes, envelope.len(), rate);
        Sample {
            pitch,
            sample_rate: self.sample_rate,
            data: tone.iter().zip(&envelope).map(|(s, e)| s * e).collect(),
        }
    }

    /// Renders the whole bank synchronously.
    pub fn render_bank(&self) -> AudioResult<SampleBank> {
        if self.sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate {
                rate: self.sample_rate,
            });
        }
        SampleBank::new(
            ANCHORS
                .iter()
                .map(|&(pitch, _)| self.render_anchor(pitch))
                .collect(),
        )
    }
}

impl SampleLoader for SynthesizedLoader {
    fn load(&self) -> BoxFuture<'static, AudioResult<SampleBank>> {
        let loader = *self;
        async move {
            tokio::task::spawn_blocking(move || loader.render_bank())
                .await
                .map_err(|e| AudioError::synthesis(format!("sample rendering task failed: {e}")))?
        }
        .boxed()
    }
}
