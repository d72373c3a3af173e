//! The drill session: settings, the current card and the sound engines.
//!
//! Playback is best-effort. A note that fails to play is logged and the
//! session carries on; a card is never blocked on audio.

use earcard_audio::{EngineRack, EngineStatus, SoundEngine};
use earcard_core::{
    next_card, Card, CoreResult, EngineId, KeyValueStore, Settings, SettingsEdit, SettingsStore,
};
use rand_pcg::Pcg32;
use serde::Serialize;

/// Length of the "play previous" note, in milliseconds.
pub const PREVIOUS_NOTE_MS: u32 = 600;

/// What the card face shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    /// Previous pitch name.
    pub previous: String,
    /// Interval label with arrow, e.g. `"P5 ↑"`.
    pub label: String,
    /// Target pitch name, hidden until revealed.
    pub target: Option<String>,
}

/// Engine state for the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineReport {
    /// The active engine.
    pub engine: EngineId,
    /// State of the active engine.
    pub status: EngineStatus,
    /// State of the sampler's bank, whether or not it is active.
    pub sampler: EngineStatus,
}

/// An interactive drill.
pub struct Session<S> {
    store: SettingsStore<S>,
    settings: Settings,
    card: Card,
    rng: Pcg32,
    rack: EngineRack,
}

impl<S: KeyValueStore> Session<S> {
    /// Loads settings from `store` and draws the first card.
    pub fn new(store: SettingsStore<S>, rack: EngineRack, mut rng: Pcg32) -> Self {
        let settings = store.load();
        let card = next_card(&settings, None, &mut rng);
        tracing::debug!(?card, "session started");
        Self {
            store,
            settings,
            card,
            rng,
            rack,
        }
    }

    /// Current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Current card.
    pub fn card(&self) -> &Card {
        &self.card
    }

    /// The settings store.
    pub fn store(&self) -> &SettingsStore<S> {
        &self.store
    }

    /// The engines.
    pub fn rack(&self) -> &EngineRack {
        &self.rack
    }

    /// Replaces the card with one starting from the current target.
    pub fn next(&mut self) -> &Card {
        self.card = next_card(&self.settings, Some(self.card.target_pitch), &mut self.rng);
        &self.card
    }

    /// Reveals the target and plays it. Calling again replays it.
    pub async fn reveal(&mut self) {
        self.card.reveal();
        self.play(self.card.target_pitch, None).await;
    }

    /// Plays the previous pitch.
    pub async fn play_previous(&self) {
        self.play(self.card.previous_pitch, Some(PREVIOUS_NOTE_MS))
            .await;
    }

    /// Normalizes and applies an edit, persists it, and draws a new card that
    /// continues from the current target.
    ///
    /// The in-memory settings and card change even when persisting fails.
    pub fn apply_settings(&mut self, edit: SettingsEdit) -> CoreResult<()> {
        let settings = self.settings.edited(edit);
        if settings.engine != self.settings.engine {
            self.rack.get(self.settings.engine).dispose();
        }
        self.settings = settings;
        self.next();
        self.store.save(&self.settings)
    }

    /// Switches engine for this session only, without persisting.
    pub fn use_engine(&mut self, engine: EngineId) {
        if engine != self.settings.engine {
            self.rack.get(self.settings.engine).dispose();
            self.settings.engine = engine;
        }
    }

    /// The card face.
    pub fn render(&self) -> CardView {
        let show_octave = self.settings.show_octaves;
        CardView {
            previous: self.card.previous_name(show_octave),
            label: self.card.interval_label(),
            target: self
                .card
                .revealed
                .then(|| self.card.target_name(show_octave)),
        }
    }

    /// Active engine and sampler state.
    pub fn engine_status(&self) -> EngineReport {
        EngineReport {
            engine: self.settings.engine,
            status: self.rack.get(self.settings.engine).status(),
            sampler: self.rack.sampler().status(),
        }
    }

    /// Plays one note on the active engine. Failures are logged, never returned.
    async fn play(&self, pitch: i32, duration_ms: Option<u32>) {
        let engine = self.rack.get(self.settings.engine);
        if let Err(e) = engine.play_note(pitch, duration_ms).await {
            tracing::warn!(engine = %engine.id(), pitch, "playback failed: {}", e);
        }
    }
}
