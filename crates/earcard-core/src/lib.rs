//! earcard core library
//!
//! Pitch naming, the interval catalog, user settings and the flash-card
//! generator for interval ear training.
//!
//! # Overview
//!
//! A card presents a previous pitch and asks for the interval to a hidden
//! target pitch. The generator draws intervals from a configurable pool so
//! that targets stay inside a configurable pitch range:
//!
//! ```
//! use earcard_core::{next_card, rng::create_rng, IntervalId, Settings};
//!
//! let settings = Settings {
//!     range_min: "A2".to_string(),
//!     range_max: "E4".to_string(),
//!     pool: vec![IntervalId::PerfectFifth],
//!     ..Settings::default()
//! };
//!
//! let mut rng = create_rng(42);
//! let card = next_card(&settings, None, &mut rng);
//! assert_eq!(card.interval, IntervalId::PerfectFifth);
//! assert!((45..=64).contains(&card.target_pitch));
//! ```
//!
//! # Modules
//!
//! - [`pitch`]: pitch number / name conversion
//! - [`interval`]: the interval catalog
//! - [`settings`]: user settings and their defaults
//! - [`store`]: settings persistence over a key/value store
//! - [`card`]: the card generator
//! - [`rng`]: seeded randomness

pub mod card;
pub mod error;
pub mod interval;
pub mod pitch;
pub mod rng;
pub mod settings;
pub mod store;

pub use card::{next_card, next_card_with, Card, Direction, GeneratorOptions, MidpointRule};
pub use error::{CoreError, CoreResult};
pub use interval::{interval, Interval, IntervalId, INTERVALS};
pub use pitch::{midi_to_freq, name_to_pitch, pitch_to_name, NameOptions};
pub use settings::{EngineId, Settings, SettingsEdit};
pub use store::{DirStore, KeyValueStore, MemoryStore, SettingsStore, SETTINGS_KEY};
