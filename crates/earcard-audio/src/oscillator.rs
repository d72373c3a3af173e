//! Basic waveform generation.

use std::f64::consts::PI;

/// 2π.
pub const TWO_PI: f64 = 2.0 * PI;

/// Tracks oscillator phase across samples.
#[derive(Debug, Clone)]
pub struct PhaseAccumulator {
    phase: f64,
    sample_rate: f64,
}

impl PhaseAccumulator {
    /// Creates an accumulator at phase zero.
    pub fn new(sample_rate: f64) -> Self {
        Self {
            phase: 0.0,
            sample_rate,
        }
    }

    /// Returns the current phase in radians and advances by one sample at `freq`.
    pub fn advance(&mut self, freq: f64) -> f64 {
        let current = self.phase;
        self.phase += TWO_PI * freq / self.sample_rate;
        if self.phase >= TWO_PI {
            self.phase %= TWO_PI;
        }
        current
    }
}

/// Sine of a phase in radians.
#[inline]
pub fn sine(phase: f64) -> f64 {
    phase.sin()
}

/// Renders `num_samples` of a sine wave at `freq`.
pub fn render_sine(freq: f64, num_samples: usize, sample_rate: f64) -> Vec<f64> {
    let mut phase_acc = PhaseAccumulator::new(sample_rate);
    (0..num_samples).map(|_| sine(phase_acc.advance(freq))).collect()
}

/// Renders a sum of harmonics of `freq` with the given relative amplitudes.
///
/// Harmonics above Nyquist are skipped. The result is normalized so that the
/// amplitudes sum to one.
pub fn render_harmonics(
    freq: f64,
    amplitudes: &[f64],
    num_samples: usize,
    sample_rate: f64,
) -> Vec<f64> {
    let nyquist = sample_rate / 2.0;
    let total: f64 = amplitudes.iter().sum();
    let norm = if total > 0.0 { 1.0 / total } else { 0.0 };

    let mut output = vec![0.0; num_samples];
    for (index, &amplitude) in amplitudes.iter().enumerate() {
        let harmonic_freq = freq * (index + 1) as f64;
        if harmonic_freq >= nyquist {
            break;
        }
        let mut phase_acc = PhaseAccumulator::new(sample_rate);
        for sample in output.iter_mut() {
            *sample += amplitude * norm * sine(phase_acc.advance(harmonic_freq));
        }
    }
    output
}

/// Converts a decibel value to a linear gain.
pub fn db_to_gain(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}
