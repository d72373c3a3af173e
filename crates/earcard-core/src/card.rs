//! Flash-card generation.
//!
//! A card asks for the interval between a shown previous pitch and a hidden
//! target pitch. Each new card starts from the previous card's target, so a
//! session is a connected random walk that stays inside the configured range.
//!
//! Generation is bounded rejection sampling: draw an interval from the pool
//! and a direction, keep the candidate if it lands in range, and after
//! [`MAX_ATTEMPTS`] misses fall back to a deterministic clamped card. It never
//! fails and never panics.

use rand::Rng;
use serde::Serialize;

use crate::interval::IntervalId;
use crate::pitch::{pitch_to_name, NameOptions};
use crate::settings::Settings;

/// Draws attempted before falling back to the clamped card.
pub const MAX_ATTEMPTS: usize = 1000;

/// Direction from the previous pitch to the target pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Target is above the previous pitch.
    Up,
    /// Target is below the previous pitch.
    Down,
}

impl Direction {
    /// Arrow glyph shown next to the interval label.
    pub fn arrow(&self) -> char {
        match self {
            Direction::Up => '↑',
            Direction::Down => '↓',
        }
    }

    /// Moves `base` by `semitones` in this direction; `None` on overflow.
    fn step(&self, base: i32, semitones: i32) -> Option<i32> {
        match self {
            Direction::Up => base.checked_add(semitones),
            Direction::Down => base.checked_sub(semitones),
        }
    }
}

/// One question: previous pitch, hidden target, and how they relate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// The pitch the user hears or sees first.
    pub previous_pitch: i32,
    /// The pitch to identify.
    pub target_pitch: i32,
    /// The interval between them.
    #[serde(rename = "intervalId")]
    pub interval: IntervalId,
    /// Whether the target is above or below.
    pub direction: Direction,
    /// Whether the target has been revealed.
    pub revealed: bool,
}

impl Card {
    /// Marks the card revealed. Returns `true` only on the first call.
    pub fn reveal(&mut self) -> bool {
        let first = !self.revealed;
        self.revealed = true;
        first
    }

    /// Interval label with arrow, e.g. `"P5 ↑"`.
    pub fn interval_label(&self) -> String {
        format!("{} {}", self.interval, self.direction.arrow())
    }

    /// Name of the previous pitch.
    pub fn previous_name(&self, show_octave: bool) -> String {
        pitch_to_name(self.previous_pitch, NameOptions::with_octave(show_octave))
    }

    /// Name of the target pitch, whether or not it is revealed.
    pub fn target_name(&self, show_octave: bool) -> String {
        pitch_to_name(self.target_pitch, NameOptions::with_octave(show_octave))
    }
}

/// How the first card of a session picks its starting pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MidpointRule {
    /// `(lo + hi) / 2`, rounded down.
    #[default]
    Centered,
    /// `lo + hi / 2`, the formula older sessions started from.
    Legacy,
}

impl MidpointRule {
    /// Starting pitch for the range `[lo, hi]`.
    pub fn start_pitch(&self, lo: i32, hi: i32) -> i32 {
        let (lo, hi) = (i64::from(lo), i64::from(hi));
        let start = match self {
            MidpointRule::Centered => (lo + hi).div_euclid(2),
            MidpointRule::Legacy => lo + hi.div_euclid(2),
        };
        start.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }
}

/// Tuning knobs for [`next_card_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Draws attempted before the clamped fallback.
    pub max_attempts: usize,
    /// Starting pitch rule when there is no previous card.
    pub midpoint: MidpointRule,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            midpoint: MidpointRule::default(),
        }
    }
}

/// Generates the next card with default options.
///
/// # Arguments
/// * `settings` - Range and pool constraints
/// * `previous_target` - Target pitch of the previous card, `None` for a fresh session
/// * `rng` - Randomness source
///
/// # Examples
/// ```
/// use earcard_core::card::next_card;
/// use earcard_core::rng::create_rng;
/// use earcard_core::Settings;
///
/// let settings = Settings::default();
/// let mut rng = create_rng(7);
/// let first = next_card(&settings, None, &mut rng);
/// let second = next_card(&settings, Some(first.target_pitch), &mut rng);
///
/// assert_eq!(second.previous_pitch, first.target_pitch);
/// assert!((45..=64).contains(&second.target_pitch));
/// ```
pub fn next_card<R: Rng + ?Sized>(
    settings: &Settings,
    previous_target: Option<i32>,
    rng: &mut R,
) -> Card {
    next_card_with(settings, previous_target, &GeneratorOptions::default(), rng)
}

/// Generates the next card.
///
/// The target lies in the active range unless no pool interval fits, in
/// which case the first pool interval is taken upward and clamped to the top
/// of the range.
pub fn next_card_with<R: Rng + ?Sized>(
    settings: &Settings,
    previous_target: Option<i32>,
    options: &GeneratorOptions,
    rng: &mut R,
) -> Card {
    let (lo, hi) = settings.active_range();
    let pool = settings.effective_pool();
    let base = previous_target.unwrap_or_else(|| options.midpoint.start_pitch(lo, hi));

    for _ in 0..options.max_attempts {
        let interval = pool[rng.gen_range(0..pool.len())];
        let direction = if rng.gen_bool(0.5) {
            Direction::Up
        } else {
            Direction::Down
        };

        match direction.step(base, interval.semitones()) {
            Some(candidate) if (lo..=hi).contains(&candidate) => {
                return Card {
                    previous_pitch: base,
                    target_pitch: candidate,
                    interval,
                    direction,
                    revealed: false,
                };
            }
            _ => {}
        }
    }

    let interval = pool[0];
    let target = base.saturating_add(interval.semitones()).min(hi);
    tracing::debug!(
        "no {} in range [{}, {}] from {}; clamping to {}",
        interval,
        lo,
        hi,
        base,
        target
    );

    Card {
        previous_pitch: base,
        target_pitch: target,
        interval,
        direction: Direction::Up,
        revealed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_midpoint_rules() {
        assert_eq!(MidpointRule::Centered.start_pitch(45, 64), 54);
        assert_eq!(MidpointRule::Legacy.start_pitch(45, 64), 77);
        assert_eq!(MidpointRule::Centered.start_pitch(-3, 0), -2);
        assert_eq!(MidpointRule::Centered.start_pitch(i32::MAX, i32::MAX), i32::MAX);
    }

    #[test]
    fn test_reveal_flips_once() {
        let mut card = Card {
            previous_pitch: 60,
            target_pitch: 67,
            interval: IntervalId::PerfectFifth,
            direction: Direction::Up,
            revealed: false,
        };
        assert!(card.reveal());
        assert!(!card.reveal());
        assert!(card.revealed);
    }

    #[test]
    fn test_interval_label_and_names() {
        let card = Card {
            previous_pitch: 61,
            target_pitch: 58,
            interval: IntervalId::MinorThird,
            direction: Direction::Down,
            revealed: false,
        };
        assert_eq!(card.interval_label(), "m3 ↓");
        assert_eq!(card.previous_name(true), "C#4/Db4");
        assert_eq!(card.target_name(false), "A#/Bb");
    }

    #[test]
    fn test_card_json_uses_interval_id_key() {
        let card = Card {
            previous_pitch: 60,
            target_pitch: 64,
            interval: IntervalId::MajorThird,
            direction: Direction::Up,
            revealed: false,
        };
        let value = serde_json::to_value(&card).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("intervalId"), "{value}");
        assert!(!object.contains_key("interval"), "{value}");
        assert_eq!(
            value["intervalId"],
            serde_json::to_value(IntervalId::MajorThird).unwrap()
        );
        assert_eq!(value["previousPitch"], 60);
        assert_eq!(value["targetPitch"], 64);
    }

    #[test]
    fn test_fresh_card_starts_at_midpoint() {
        let mut rng = create_rng(1);
        let card = next_card(&Settings::default(), None, &mut rng);
        assert_eq!(card.previous_pitch, 54);
        assert!(!card.revealed);
    }

    #[test]
    fn test_overflowing_base_falls_back_without_panic() {
        let settings = Settings {
            range_min: "C-1".to_string(),
            range_max: "G9".to_string(),
            ..Settings::default()
        };
        let mut rng = create_rng(3);
        let card = next_card(&settings, Some(i32::MAX), &mut rng);
        assert_eq!(card.previous_pitch, i32::MAX);
        assert_eq!(card.target_pitch, 127);
        assert_eq!(card.direction, Direction::Up);
    }

    #[test]
    fn test_zero_attempts_goes_straight_to_fallback() {
        let options = GeneratorOptions {
            max_attempts: 0,
            ..GeneratorOptions::default()
        };
        let mut rng = create_rng(9);
        let card = next_card_with(&Settings::default(), Some(50), &options, &mut rng);
        assert_eq!(card.interval, IntervalId::MinorSecond);
        assert_eq!(card.target_pitch, 51);
        assert_eq!(card.direction, Direction::Up);
    }
}
