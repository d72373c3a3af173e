//! The interval catalog.
//!
//! Twelve fixed intervals, minor second through perfect octave, one per
//! semitone size. Ids are stable: they are persisted in the settings pool.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Identifier of a catalog interval.
///
/// Variants are declared in catalog order, so `Ord` sorts by size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IntervalId {
    /// Minor second (1 semitone).
    #[serde(rename = "m2")]
    MinorSecond,
    /// Major second (2 semitones).
    #[serde(rename = "M2")]
    MajorSecond,
    /// Minor third (3 semitones).
    #[serde(rename = "m3")]
    MinorThird,
    /// Major third (4 semitones).
    #[serde(rename = "M3")]
    MajorThird,
    /// Perfect fourth (5 semitones).
    #[serde(rename = "P4")]
    PerfectFourth,
    /// Tritone (6 semitones).
    #[serde(rename = "TT")]
    Tritone,
    /// Perfect fifth (7 semitones).
    #[serde(rename = "P5")]
    PerfectFifth,
    /// Minor sixth (8 semitones).
    #[serde(rename = "m6")]
    MinorSixth,
    /// Major sixth (9 semitones).
    #[serde(rename = "M6")]
    MajorSixth,
    /// Minor seventh (10 semitones).
    #[serde(rename = "m7")]
    MinorSeventh,
    /// Major seventh (11 semitones).
    #[serde(rename = "M7")]
    MajorSeventh,
    /// Perfect octave (12 semitones).
    #[serde(rename = "P8")]
    Octave,
}

impl IntervalId {
    /// All ids in catalog order.
    pub const ALL: [IntervalId; 12] = [
        IntervalId::MinorSecond,
        IntervalId::MajorSecond,
        IntervalId::MinorThird,
        IntervalId::MajorThird,
        IntervalId::PerfectFourth,
        IntervalId::Tritone,
        IntervalId::PerfectFifth,
        IntervalId::MinorSixth,
        IntervalId::MajorSixth,
        IntervalId::MinorSeventh,
        IntervalId::MajorSeventh,
        IntervalId::Octave,
    ];

    /// The short id string (`"m2"`, `"TT"`, `"P8"`, ...).
    pub fn as_str(&self) -> &'static str {
        interval(*self).short
    }

    /// Size in semitones.
    pub fn semitones(&self) -> i32 {
        interval(*self).semitones
    }
}

impl fmt::Display for IntervalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntervalId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        INTERVALS
            .iter()
            .find(|entry| entry.short == s)
            .map(|entry| entry.id)
            .ok_or_else(|| CoreError::UnknownInterval(s.to_string()))
    }
}

/// A catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    /// Stable identifier.
    pub id: IntervalId,
    /// Short label shown on cards and persisted in settings.
    pub short: &'static str,
    /// Full display name.
    pub name: &'static str,
    /// Size in semitones (1..=12).
    pub semitones: i32,
}

/// The catalog, ordered by size.
pub const INTERVALS: [Interval; 12] = [
    Interval { id: IntervalId::MinorSecond, short: "m2", name: "minor second", semitones: 1 },
    Interval { id: IntervalId::MajorSecond, short: "M2", name: "major second", semitones: 2 },
    Interval { id: IntervalId::MinorThird, short: "m3", name: "minor third", semitones: 3 },
    Interval { id: IntervalId::MajorThird, short: "M3", name: "major third", semitones: 4 },
    Interval { id: IntervalId::PerfectFourth, short: "P4", name: "perfect fourth", semitones: 5 },
    Interval { id: IntervalId::Tritone, short: "TT", name: "tritone", semitones: 6 },
    Interval { id: IntervalId::PerfectFifth, short: "P5", name: "perfect fifth", semitones: 7 },
    Interval { id: IntervalId::MinorSixth, short: "m6", name: "minor sixth", semitones: 8 },
    Interval { id: IntervalId::MajorSixth, short: "M6", name: "major sixth", semitones: 9 },
    Interval { id: IntervalId::MinorSeventh, short: "m7", name: "minor seventh", semitones: 10 },
    Interval { id: IntervalId::MajorSeventh, short: "M7", name: "major seventh", semitones: 11 },
    Interval { id: IntervalId::Octave, short: "P8", name: "perfect octave", semitones: 12 },
];

/// Looks up the catalog entry for an id.
pub fn interval(id: IntervalId) -> &'static Interval {
    // INTERVALS is indexed by declaration order of IntervalId.
    &INTERVALS[id as usize]
}

/// Looks up a catalog entry by its short id string.
pub fn interval_by_str(id: &str) -> Option<&'static Interval> {
    id.parse::<IntervalId>().ok().map(interval)
}
