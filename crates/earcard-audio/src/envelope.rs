//! Amplitude envelopes.
//!
//! An ADSR generator for the synth voice and a percussive attack/exponential
//! decay curve for the plain oscillator.

/// ADSR envelope parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdsrParams {
    /// Attack time in seconds.
    pub attack: f64,
    /// Decay time in seconds.
    pub decay: f64,
    /// Sustain level (0.0 to 1.0).
    pub sustain: f64,
    /// Release time in seconds.
    pub release: f64,
}

impl Default for AdsrParams {
    fn default() -> Self {
        Self {
            attack: 0.01,
            decay: 0.1,
            sustain: 0.3,
            release: 0.2,
        }
    }
}

impl AdsrParams {
    /// Creates new ADSR parameters.
    pub fn new(attack: f64, decay: f64, sustain: f64, release: f64) -> Self {
        Self {
            attack: attack.max(0.0),
            decay: decay.max(0.0),
            sustain: sustain.clamp(0.0, 1.0),
            release: release.max(0.0),
        }
    }
}

/// Envelope generator state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnvelopeState {
    /// Attack phase - amplitude rising from 0 to 1.
    Attack,
    /// Decay phase - amplitude falling from 1 to sustain level.
    Decay,
    /// Sustain phase - amplitude held at sustain level.
    Sustain,
    /// Release phase - amplitude falling from current level to 0.
    Release,
    /// Envelope completed - amplitude is 0.
    Idle,
}

/// ADSR envelope generator.
#[derive(Debug, Clone)]
pub struct AdsrEnvelope {
    params: AdsrParams,
    sample_rate: f64,
    state: EnvelopeState,
    time: f64,
    level: f64,
    release_level: f64,
}

impl AdsrEnvelope {
    /// Creates a new ADSR envelope, already triggered.
    pub fn new(params: AdsrParams, sample_rate: f64) -> Self {
        Self {
            params,
            sample_rate,
            state: EnvelopeState::Attack,
            time: 0.0,
            level: 0.0,
            release_level: 0.0,
        }
    }

    /// Releases the envelope (note off).
    pub fn release(&mut self) {
        if self.state != EnvelopeState::Idle && self.state != EnvelopeState::Release {
            self.release_level = self.level;
            self.state = EnvelopeState::Release;
            self.time = 0.0;
        }
    }

    /// Gets the current envelope state.
    pub fn state(&self) -> EnvelopeState {
        self.state
    }

    /// Returns true if the envelope has completed.
    pub fn is_idle(&self) -> bool {
        self.state == EnvelopeState::Idle
    }

    /// Generates the next envelope sample.
    pub fn next_sample(&mut self) -> f64 {
        let dt = 1.0 / self.sample_rate;

        match self.state {
            EnvelopeState::Attack => {
                if self.params.attack > 0.0 {
                    self.level = self.time / self.params.attack;
                    if self.level >= 1.0 {
                        self.level = 1.0;
                        self.state = EnvelopeState::Decay;
                        self.time = 0.0;
                    } else {
                        self.time += dt;
                    }
                } else {
                    self.level = 1.0;
                    self.state = EnvelopeState::Decay;
                    self.time = 0.0;
                }
            }
            EnvelopeState::Decay => {
                if self.params.decay > 0.0 {
                    let progress = self.time / self.params.decay;
                    self.level = 1.0 - progress * (1.0 - self.params.sustain);
                    if progress >= 1.0 {
                        self.level = self.params.sustain;
                        self.state = EnvelopeState::Sustain;
                        self.time = 0.0;
                    } else {
                        self.time += dt;
                    }
                } else {
                    self.level = self.params.sustain;
                    self.state = EnvelopeState::Sustain;
                    self.time = 0.0;
                }
            }
            EnvelopeState::Sustain => {
                self.level = self.params.sustain;
            }
            EnvelopeState::Release => {
                if self.params.release > 0.0 {
                    let progress = self.time / self.params.release;
                    self.level = self.release_level * (1.0 - progress);
                    if progress >= 1.0 {
                        self.level = 0.0;
                        self.state = EnvelopeState::Idle;
                    } else {
                        self.time += dt;
                    }
                } else {
                    self.level = 0.0;
                    self.state = EnvelopeState::Idle;
                }
            }
            EnvelopeState::Idle => {
                self.level = 0.0;
            }
        }

        self.level
    }

    /// Generates the envelope of a note held for `hold` seconds.
    ///
    /// The note is released after `hold` and the curve runs until the release
    /// completes, so the result is roughly `hold + release` seconds long.
    pub fn generate_note(params: &AdsrParams, sample_rate: f64, hold: f64) -> Vec<f64> {
        let hold_samples = (hold.max(0.0) * sample_rate).round() as usize;
        let release_samples = (params.release * sample_rate).ceil() as usize;
        let max_samples = hold_samples + 2 * release_samples + 2;
        let mut envelope = Vec::with_capacity(max_samples);

        let mut env = AdsrEnvelope::new(*params, sample_rate);
        for i in 0..max_samples {
            if i == hold_samples {
                env.release();
            }
            envelope.push(env.next_sample());
            if env.is_idle() {
                break;
            }
        }

        envelope
    }
}

/// Generates a percussive curve: linear attack to 1.0, then an exponential
/// ramp down to `floor` at `duration`, then silence for `tail` seconds.
///
/// # Arguments
/// * `sample_rate` - Audio sample rate
/// * `attack` - Attack time in seconds
/// * `duration` - Time at which the curve reaches `floor`, in seconds
/// * `floor` - Level reached at `duration` (must be > 0)
/// * `tail` - Silent time appended after `duration`
pub fn percussive_curve(
    sample_rate: f64,
    attack: f64,
    duration: f64,
    floor: f64,
    tail: f64,
) -> Vec<f64> {
    let num_samples =
        (duration * sample_rate).round() as usize + (tail * sample_rate).round() as usize;
    let attack = attack.min(duration).max(0.0);
    let decay_time = (duration - attack).max(f64::EPSILON);
    let floor = floor.max(f64::MIN_POSITIVE);

    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate;
            if t < attack {
                t / attack
            } else if t <= duration {
                floor.powf((t - attack) / decay_time)
            } else {
                0.0
            }
        })
        .collect()
}
