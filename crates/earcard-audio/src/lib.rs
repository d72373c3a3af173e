//! earcard sound engines
//!
//! Three voices behind one [`SoundEngine`] contract: a plain sine
//! [`OscillatorEngine`], an ADSR [`SynthEngine`] and a sample-playback
//! [`SamplerEngine`] whose bank is loaded once, on first use. Engines render
//! notes into [`Clip`]s and hand them to an [`AudioSink`].
//!
//! ```
//! use std::sync::Arc;
//! use earcard_audio::{EngineRack, MemorySink, SoundEngine, SynthesizedLoader};
//! use earcard_core::EngineId;
//!
//! let sink = Arc::new(MemorySink::new());
//! let rack = EngineRack::new(sink.clone(), Arc::new(SynthesizedLoader::default()));
//! let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! runtime
//!     .block_on(rack.get(EngineId::Oscillator).play_note(69, None))
//!     .unwrap();
//! assert_eq!(sink.pitches(), vec![69]);
//! ```

pub mod engine;
pub mod envelope;
pub mod error;
pub mod oscillator;
pub mod samples;
pub mod sink;
pub mod wav;

pub use engine::{
    ActiveEngine, EngineRack, EngineStatus, OscillatorEngine, SamplerEngine, SoundEngine,
    SynthEngine, DEFAULT_SAMPLE_RATE,
};
pub use error::{AudioError, AudioResult};
pub use samples::{Sample, SampleBank, SampleLoader, SynthesizedLoader, WavDirLoader};
pub use sink::{AudioSink, Clip, MemorySink, NullSink, PlayerSink, WavDirSink};
