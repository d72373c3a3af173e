//! Names command implementation
//!
//! Lists pitch names over a range, as offered by the range pickers.

use anyhow::{bail, Result};
use earcard_core::pitch::{note_choices, NOTE_CHOICES_HIGH, NOTE_CHOICES_LOW};
use earcard_core::{name_to_pitch, pitch_to_name, NameOptions};
use std::process::ExitCode;

/// Resolves an optional pitch name, or `default` when absent.
fn bound(name: Option<&str>, default: i32) -> Result<i32> {
    match name {
        None => Ok(default),
        Some(name) => match name_to_pitch(name) {
            Some(pitch) => Ok(pitch),
            None => bail!("Not a pitch name: '{}'", name),
        },
    }
}

/// Pitch and name for every pitch in `[lo, hi]`. Default spellings come
/// straight from the range picker's list.
pub fn list(lo: i32, hi: i32, options: NameOptions) -> Vec<(i32, String)> {
    if options == NameOptions::SINGLE {
        return (lo..=hi).zip(note_choices(lo, hi)).collect();
    }
    (lo..=hi).map(|p| (p, pitch_to_name(p, options))).collect()
}

/// Run the names command
pub fn run(from: Option<&str>, to: Option<&str>, no_octave: bool, enharmonic: bool) -> Result<ExitCode> {
    let lo = bound(from, NOTE_CHOICES_LOW)?;
    let hi = bound(to, NOTE_CHOICES_HIGH)?;
    if lo > hi {
        bail!(
            "Range is inverted: {} is above {}",
            pitch_to_name(lo, NameOptions::SINGLE),
            pitch_to_name(hi, NameOptions::SINGLE)
        );
    }

    let options = NameOptions {
        show_octave: !no_octave,
        enharmonic,
    };
    for (pitch, name) in list(lo, hi, options) {
        println!("{:>4}  {}", pitch, name);
    }

    Ok(ExitCode::SUCCESS)
}
