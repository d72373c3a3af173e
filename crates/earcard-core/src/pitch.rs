//! Pitch naming and frequency conversion.
//!
//! Pitches are plain `i32` semitone indices on the MIDI scale: 60 is C4, 69 is
//! A4 and 0 is C-1. Any integer is structurally valid, including negative
//! pitches, so every function here is total.

#[cfg(test)]
mod tests;

/// Sharp spellings indexed by pitch class.
const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Flat spellings of the five chromatic pitch classes.
const FLAT_NAMES: [Option<&str>; 12] = [
    None,
    Some("Db"),
    None,
    Some("Eb"),
    None,
    None,
    Some("Gb"),
    None,
    Some("Ab"),
    None,
    Some("Bb"),
    None,
];

/// Semitone offsets for natural note letters (C=0, D=2, E=4, F=5, G=7, A=9, B=11).
const SEMITONE_MAP: [(char, i32); 7] = [
    ('C', 0),
    ('D', 2),
    ('E', 4),
    ('F', 5),
    ('G', 7),
    ('A', 9),
    ('B', 11),
];

/// Lowest pitch offered by [`note_choices`] by default (C1).
pub const NOTE_CHOICES_LOW: i32 = 24;

/// Highest pitch offered by [`note_choices`] by default (C7).
pub const NOTE_CHOICES_HIGH: i32 = 96;

/// Controls how [`pitch_to_name`] spells a pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameOptions {
    /// Append the octave number to each spelling.
    pub show_octave: bool,
    /// Render chromatic pitches as `sharp/flat` (e.g. `C#4/Db4`).
    pub enharmonic: bool,
}

impl Default for NameOptions {
    fn default() -> Self {
        Self {
            show_octave: true,
            enharmonic: true,
        }
    }
}

impl NameOptions {
    /// A single sharp spelling with octave; the canonical parseable form.
    pub const SINGLE: Self = Self {
        show_octave: true,
        enharmonic: false,
    };

    /// Display options with the octave shown or hidden.
    pub fn with_octave(show_octave: bool) -> Self {
        Self {
            show_octave,
            ..Self::default()
        }
    }
}

/// Returns the pitch class (0 = C .. 11 = B), correct for negative pitches.
pub fn pitch_class(pitch: i32) -> usize {
    pitch.rem_euclid(12) as usize
}

/// Returns the MIDI octave number of a pitch (60 → 4, 0 → -1).
pub fn octave(pitch: i32) -> i32 {
    pitch.div_euclid(12) - 1
}

/// Converts a pitch number to a human-readable name.
///
/// # Examples
/// ```
/// use earcard_core::pitch::{pitch_to_name, NameOptions};
///
/// assert_eq!(pitch_to_name(61, NameOptions::default()), "C#4/Db4");
/// assert_eq!(pitch_to_name(60, NameOptions::default()), "C4");
/// assert_eq!(pitch_to_name(61, NameOptions::SINGLE), "C#4");
/// assert_eq!(pitch_to_name(61, NameOptions::with_octave(false)), "C#/Db");
/// ```
pub fn pitch_to_name(pitch: i32, options: NameOptions) -> String {
    let class = pitch_class(pitch);
    let octave = octave(pitch);
    let spell = |base: &str| {
        if options.show_octave {
            format!("{base}{octave}")
        } else {
            base.to_string()
        }
    };

    match FLAT_NAMES[class] {
        Some(flat) if options.enharmonic => {
            format!("{}/{}", spell(SHARP_NAMES[class]), spell(flat))
        }
        _ => spell(SHARP_NAMES[class]),
    }
}

/// Parses a pitch name into a pitch number.
///
/// Accepts surrounding and internal whitespace, any letter case, a single
/// `#` or `b` accidental, a signed octave, and an optional `sharp/flat` pair
/// of which only the left spelling counts. When the left spelling has no
/// octave (`C#/Db4`) the octave of the right spelling is used.
///
/// Returns `None` for anything outside that grammar.
///
/// # Examples
/// ```
/// use earcard_core::pitch::name_to_pitch;
///
/// assert_eq!(name_to_pitch("C4"), Some(60));
/// assert_eq!(name_to_pitch(" c#/db4 "), Some(61));
/// assert_eq!(name_to_pitch("Bb3"), name_to_pitch("A#3"));
/// assert_eq!(name_to_pitch("C-1"), Some(0));
/// assert_eq!(name_to_pitch("H2"), None);
/// ```
pub fn name_to_pitch(name: &str) -> Option<i32> {
    let cleaned: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    let (left, right) = match cleaned.split_once('/') {
        Some((left, right)) => (left, Some(right)),
        None => (cleaned.as_str(), None),
    };

    let (semitone, octave) = parse_spelling(left)?;
    let octave = match octave {
        Some(octave) => octave,
        None => right.and_then(parse_spelling).and_then(|(_, octave)| octave)?,
    };

    octave.checked_add(1)?.checked_mul(12)?.checked_add(semitone)
}

/// Parses `LETTER [# | B] [OCTAVE]` from an upper-cased spelling.
fn parse_spelling(spelling: &str) -> Option<(i32, Option<i32>)> {
    let mut chars = spelling.chars();
    let letter = chars.next()?;
    let base = SEMITONE_MAP
        .iter()
        .find(|(c, _)| *c == letter)
        .map(|(_, s)| *s)?;

    // Flat is 'B' here because the input was upper-cased ("Bb3" -> "BB3").
    let rest = chars.as_str();
    let (semitone, rest) = if let Some(rest) = rest.strip_prefix('#') {
        (base + 1, rest)
    } else if let Some(rest) = rest.strip_prefix('B') {
        (base - 1, rest)
    } else {
        (base, rest)
    };

    if rest.is_empty() {
        return Some((semitone, None));
    }
    Some((semitone, Some(parse_octave(rest)?)))
}

/// Parses an optionally negative run of ASCII digits.
fn parse_octave(text: &str) -> Option<i32> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Converts a pitch number to frequency in Hz.
///
/// Uses the standard formula: f = 440 * 2^((n-69)/12).
///
/// # Examples
/// ```
/// use earcard_core::pitch::midi_to_freq;
///
/// assert!((midi_to_freq(69) - 440.0).abs() < 0.001);
/// assert!((midi_to_freq(60) - 261.626).abs() < 0.01);
/// ```
pub fn midi_to_freq(pitch: i32) -> f64 {
    440.0 * 2.0_f64.powf((pitch as f64 - 69.0) / 12.0)
}

/// Lists single-spelling names for every pitch in `low..=high`.
///
/// This is the set of suggestions offered when entering a range bound.
pub fn note_choices(low: i32, high: i32) -> Vec<String> {
    (low..=high)
        .map(|pitch| pitch_to_name(pitch, NameOptions::SINGLE))
        .collect()
}
