//! Sample-playback voice with a lazily loaded bank.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use futures_util::future::{BoxFuture, FutureExt, Shared};

use earcard_core::EngineId;

use super::{note_seconds, EngineStatus, SoundEngine};
use crate::error::{AudioError, AudioResult};
use crate::oscillator::db_to_gain;
use crate::samples::{SampleBank, SampleLoader};
use crate::sink::{AudioSink, Clip};

const VOLUME_DB: f64 = -6.0;

type LoadFuture = Shared<BoxFuture<'static, Result<Arc<SampleBank>, Arc<AudioError>>>>;

enum LoadState {
    Idle,
    Loading(LoadFuture),
    Ready(Arc<SampleBank>),
}

/// Plays pitch-shifted samples from a lazily loaded bank.
///
/// The bank is loaded on first use. Callers that arrive while a load is in
/// flight await that same load instead of starting another one. A failed load
/// leaves the engine idle so the next `init` tries again.
pub struct SamplerEngine {
    sink: Arc<dyn AudioSink>,
    loader: Arc<dyn SampleLoader>,
    state: Mutex<LoadState>,
    loads_started: AtomicUsize,
}

impl SamplerEngine {
    /// Creates an engine that loads its bank from `loader`.
    pub fn new(sink: Arc<dyn AudioSink>, loader: Arc<dyn SampleLoader>) -> Self {
        Self {
            sink,
            loader,
            state: Mutex::new(LoadState::Idle),
            loads_started: AtomicUsize::new(0),
        }
    }

    /// How many times a load has been started.
    pub fn loads_started(&self) -> usize {
        self.loads_started.load(Ordering::SeqCst)
    }

    fn state(&self) -> MutexGuard<'_, LoadState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns the loaded bank, loading it first if needed.
    pub async fn bank(&self) -> AudioResult<Arc<SampleBank>> {
        let pending = {
            let mut state = self.state();
            let in_flight = match &*state {
                LoadState::Ready(bank) => return Ok(Arc::clone(bank)),
                LoadState::Loading(pending) => Some(pending.clone()),
                LoadState::Idle => None,
            };
            match in_flight {
                Some(pending) => pending,
                None => {
                    self.loads_started.fetch_add(1, Ordering::SeqCst);
                    tracing::debug!("loading sampler bank");
                    let pending = self
                        .loader
                        .load()
                        .map(|result| result.map(Arc::new).map_err(Arc::new))
                        .boxed()
                        .shared();
                    *state = LoadState::Loading(pending.clone());
                    pending
                }
            }
        };

        let result = pending.clone().await;

        let mut state = self.state();
        // Only the load that is still current may settle the state. A dispose
        // in the meantime leaves it idle and the bank is discarded.
        let current = match &*state {
            LoadState::Loading(current) => current.ptr_eq(&pending),
            LoadState::Ready(ready) => {
                matches!(&result, Ok(bank) if Arc::ptr_eq(ready, bank))
            }
            LoadState::Idle => false,
        };
        if current {
            if let LoadState::Loading(_) = &*state {
                *state = match &result {
                    Ok(bank) => LoadState::Ready(Arc::clone(bank)),
                    Err(_) => LoadState::Idle,
                };
            }
        }
        drop(state);

        let bank = result.map_err(AudioError::SharedLoad)?;
        if !current {
            tracing::debug!("sampler disposed while loading; dropping bank");
            return Err(AudioError::Disposed);
        }
        Ok(bank)
    }

    /// Renders a note without playing it.
    pub async fn render(&self, pitch: i32, duration_ms: Option<u32>) -> AudioResult<Clip> {
        let duration = note_seconds(duration_ms, self.default_duration_ms())?;
        let bank = self.bank().await?;
        let (samples, sample_rate) = bank.render(pitch, duration);
        let gain = db_to_gain(VOLUME_DB);
        Ok(Clip {
            pitch,
            sample_rate,
            samples: samples.into_iter().map(|s| s * gain).collect(),
        })
    }
}

impl SoundEngine for SamplerEngine {
    fn id(&self) -> EngineId {
        EngineId::Sampler
    }

    fn default_duration_ms(&self) -> u32 {
        800
    }

    async fn init(&self) -> AudioResult<()> {
        self.bank().await.map(|_| ())
    }

    async fn play_note(&self, pitch: i32, duration_ms: Option<u32>) -> AudioResult<()> {
        let clip = self.render(pitch, duration_ms).await?;
        self.sink.play(&clip)
    }

    fn dispose(&self) {
        *self.state() = LoadState::Idle;
    }

    fn status(&self) -> EngineStatus {
        match &*self.state() {
            LoadState::Idle => EngineStatus::Idle,
            LoadState::Loading(_) => EngineStatus::Loading,
            LoadState::Ready(_) => EngineStatus::Ready,
        }
    }
}
