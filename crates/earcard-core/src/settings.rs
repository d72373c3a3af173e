//! User settings: pitch range, display options, interval pool and engine.
//!
//! Settings are a plain value. They are the single source of truth for the
//! constraints the card generator honors; cards never feed back into them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::interval::IntervalId;
use crate::pitch::name_to_pitch;

/// Default lowest pitch of the range (MIDI 45).
pub const DEFAULT_RANGE_MIN: &str = "A2";

/// Default highest pitch of the range (MIDI 64).
pub const DEFAULT_RANGE_MAX: &str = "E4";

/// The range used whenever the configured one is unparsable or inverted.
pub const DEFAULT_RANGE: (i32, i32) = (45, 64);

/// The single interval drawn from when the configured pool is empty.
pub const FALLBACK_INTERVAL: IntervalId = IntervalId::PerfectFifth;

/// Identifier of a sound engine variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngineId {
    /// Plain sine oscillator with a percussive envelope.
    #[serde(alias = "web")]
    Oscillator,
    /// Enveloped synth voice.
    #[serde(alias = "tone-synth")]
    Synth,
    /// Pitch-shifting sample player.
    #[default]
    #[serde(alias = "tone-sampler")]
    Sampler,
}

impl EngineId {
    /// All engine ids.
    pub const ALL: [EngineId; 3] = [EngineId::Oscillator, EngineId::Synth, EngineId::Sampler];

    /// The persisted id string.
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineId::Oscillator => "oscillator",
            EngineId::Synth => "synth",
            EngineId::Sampler => "sampler",
        }
    }

    /// Human-readable engine name.
    pub fn display_name(&self) -> &'static str {
        match self {
            EngineId::Oscillator => "Oscillator",
            EngineId::Synth => "Synth",
            EngineId::Sampler => "Sampler",
        }
    }
}

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "oscillator" | "web" => Ok(EngineId::Oscillator),
            "synth" | "tone-synth" => Ok(EngineId::Synth),
            "sampler" | "tone-sampler" => Ok(EngineId::Sampler),
            other => Err(CoreError::UnknownEngine(other.to_string())),
        }
    }
}

/// User configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Lowest pitch of the range, as a pitch name.
    pub range_min: String,
    /// Highest pitch of the range, as a pitch name.
    pub range_max: String,
    /// Show octave numbers on cards.
    pub show_octaves: bool,
    /// Selected sound engine.
    pub engine: EngineId,
    /// Enabled intervals.
    pub pool: Vec<IntervalId>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            range_min: DEFAULT_RANGE_MIN.to_string(),
            range_max: DEFAULT_RANGE_MAX.to_string(),
            show_octaves: true,
            engine: EngineId::default(),
            pool: IntervalId::ALL.to_vec(),
        }
    }
}

impl Settings {
    /// Returns the `[lo, hi]` pitch range to draw targets from.
    ///
    /// Falls back to [`DEFAULT_RANGE`] when either bound is unparsable or
    /// `lo > hi`.
    pub fn active_range(&self) -> (i32, i32) {
        match (name_to_pitch(&self.range_min), name_to_pitch(&self.range_max)) {
            (Some(lo), Some(hi)) if lo <= hi => (lo, hi),
            _ => DEFAULT_RANGE,
        }
    }

    /// Returns the pool to draw from: catalog order, no duplicates, never empty.
    ///
    /// An empty pool yields `[FALLBACK_INTERVAL]`. The stored pool is untouched.
    pub fn effective_pool(&self) -> Vec<IntervalId> {
        let pool: Vec<IntervalId> = IntervalId::ALL
            .into_iter()
            .filter(|id| self.pool.contains(id))
            .collect();
        if pool.is_empty() {
            vec![FALLBACK_INTERVAL]
        } else {
            pool
        }
    }

    /// Applies an edit the way the settings dialog does before saving.
    ///
    /// Blank range entries take the defaults and an empty pool becomes the
    /// full default pool. Fields left as `None` keep their current value.
    pub fn edited(&self, edit: SettingsEdit) -> Settings {
        let defaults = Settings::default();
        let non_blank = |value: String, default: String| {
            if value.trim().is_empty() {
                default
            } else {
                value
            }
        };

        Settings {
            range_min: edit
                .range_min
                .map(|v| non_blank(v, defaults.range_min.clone()))
                .unwrap_or_else(|| self.range_min.clone()),
            range_max: edit
                .range_max
                .map(|v| non_blank(v, defaults.range_max.clone()))
                .unwrap_or_else(|| self.range_max.clone()),
            show_octaves: edit.show_octaves.unwrap_or(self.show_octaves),
            engine: edit.engine.unwrap_or(self.engine),
            pool: match edit.pool {
                Some(pool) if pool.is_empty() => defaults.pool,
                Some(pool) => pool,
                None => self.pool.clone(),
            },
        }
    }

    /// Builds settings from persisted JSON, field by field over the defaults.
    ///
    /// Missing or ill-typed fields take their default and unknown fields are
    /// ignored. Pool entries that are not catalog ids are dropped.
    pub fn merged_over_defaults(object: &Map<String, Value>) -> Settings {
        let defaults = Settings::default();

        Settings {
            range_min: field(object, "rangeMin").unwrap_or(defaults.range_min),
            range_max: field(object, "rangeMax").unwrap_or(defaults.range_max),
            show_octaves: field(object, "showOctaves").unwrap_or(defaults.show_octaves),
            engine: field(object, "engine").unwrap_or(defaults.engine),
            pool: match object.get("pool") {
                Some(Value::Array(items)) => items
                    .iter()
                    .filter_map(|item| IntervalId::deserialize(item).ok())
                    .collect(),
                _ => defaults.pool,
            },
        }
    }
}

/// Reads one field, treating a type mismatch like a missing field.
fn field<T: for<'de> Deserialize<'de>>(object: &Map<String, Value>, key: &str) -> Option<T> {
    let value = object.get(key)?;
    match T::deserialize(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::debug!("ignoring persisted setting '{}': {}", key, e);
            None
        }
    }
}

/// A partial update to [`Settings`], as produced by a settings form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsEdit {
    /// New lowest pitch name.
    pub range_min: Option<String>,
    /// New highest pitch name.
    pub range_max: Option<String>,
    /// New octave display flag.
    pub show_octaves: Option<bool>,
    /// New engine.
    pub engine: Option<EngineId>,
    /// New pool.
    pub pool: Option<Vec<IntervalId>>,
}
