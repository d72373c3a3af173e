//! Tests for pitch naming and parsing.

use super::*;

#[test]
fn test_pitch_class_and_octave() {
    assert_eq!(pitch_class(60), 0);
    assert_eq!(pitch_class(61), 1);
    assert_eq!(pitch_class(-1), 11);
    assert_eq!(pitch_class(-12), 0);
    assert_eq!(octave(60), 4);
    assert_eq!(octave(0), -1);
    assert_eq!(octave(-1), -2);
    assert_eq!(octave(11), -1);
    assert_eq!(octave(12), 0);
}

#[test]
fn test_pitch_to_name_enharmonic() {
    assert_eq!(pitch_to_name(61, NameOptions::default()), "C#4/Db4");
    assert_eq!(pitch_to_name(60, NameOptions::default()), "C4");
    assert_eq!(pitch_to_name(70, NameOptions::default()), "A#4/Bb4");
    assert_eq!(pitch_to_name(45, NameOptions::default()), "A2");
}

#[test]
fn test_pitch_to_name_without_octave() {
    let options = NameOptions::with_octave(false);
    assert_eq!(pitch_to_name(61, options), "C#/Db");
    assert_eq!(pitch_to_name(64, options), "E");

    let options = NameOptions {
        show_octave: false,
        enharmonic: false,
    };
    assert_eq!(pitch_to_name(66, options), "F#");
}

#[test]
fn test_pitch_to_name_negative_pitch() {
    assert_eq!(pitch_to_name(-1, NameOptions::SINGLE), "B-2");
    assert_eq!(pitch_to_name(-11, NameOptions::default()), "C#-2/Db-2");
    assert_eq!(pitch_to_name(0, NameOptions::SINGLE), "C-1");
}

#[test]
fn test_name_to_pitch_basic() {
    assert_eq!(name_to_pitch("C4"), Some(60));
    assert_eq!(name_to_pitch("A4"), Some(69));
    assert_eq!(name_to_pitch("A2"), Some(45));
    assert_eq!(name_to_pitch("E4"), Some(64));
    assert_eq!(name_to_pitch("B3"), Some(59));
}

#[test]
fn test_name_to_pitch_tolerance() {
    assert_eq!(name_to_pitch(" c#/db4 "), Some(61));
    assert_eq!(name_to_pitch("C#4/Db4"), Some(61));
    assert_eq!(name_to_pitch("c 4"), Some(60));
    assert_eq!(name_to_pitch("\tg#2\n"), Some(44));
    assert_eq!(name_to_pitch("Bb3"), name_to_pitch("A#3"));
    assert_eq!(name_to_pitch("BB3"), Some(58));
    assert_eq!(name_to_pitch("bb3"), Some(58));
}

#[test]
fn test_name_to_pitch_left_side_wins() {
    // Only the left spelling is significant, even if the right disagrees.
    assert_eq!(name_to_pitch("C4/D5"), Some(60));
    assert_eq!(name_to_pitch("C4/garbage"), Some(60));
}

#[test]
fn test_name_to_pitch_negative_octaves() {
    assert_eq!(name_to_pitch("C-1"), Some(0));
    assert_eq!(name_to_pitch("B-2"), Some(-1));
    assert_eq!(name_to_pitch("Cb-1"), Some(-1));
}

#[test]
fn test_name_to_pitch_rejects_invalid() {
    assert_eq!(name_to_pitch(""), None);
    assert_eq!(name_to_pitch("   "), None);
    assert_eq!(name_to_pitch("H4"), None);
    assert_eq!(name_to_pitch("C"), None);
    assert_eq!(name_to_pitch("C#"), None);
    assert_eq!(name_to_pitch("C##4"), None);
    assert_eq!(name_to_pitch("Cx4"), None);
    assert_eq!(name_to_pitch("C+4"), None);
    assert_eq!(name_to_pitch("C-"), None);
    assert_eq!(name_to_pitch("C4.5"), None);
    assert_eq!(name_to_pitch("/C4"), None);
    assert_eq!(name_to_pitch("C#/Db"), None);
    assert_eq!(name_to_pitch("C99999999999"), None);
}

#[test]
fn test_roundtrip_midi_range() {
    for pitch in 0..=127 {
        let name = pitch_to_name(pitch, NameOptions::SINGLE);
        assert_eq!(
            name_to_pitch(&name),
            Some(pitch),
            "Roundtrip failed for pitch {}: {}",
            pitch,
            name
        );
    }
}

#[test]
fn test_enharmonic_names_parse_to_same_pitch() {
    for pitch in 0..=127 {
        let name = pitch_to_name(pitch, NameOptions::default());
        assert_eq!(name_to_pitch(&name), Some(pitch), "{}", name);
    }
}

#[test]
fn test_midi_to_freq() {
    assert!((midi_to_freq(69) - 440.0).abs() < 0.001);
    assert!((midi_to_freq(57) - 220.0).abs() < 0.001);
    assert!((midi_to_freq(81) - 880.0).abs() < 0.001);
}

#[test]
fn test_note_choices_default_span() {
    let choices = note_choices(NOTE_CHOICES_LOW, NOTE_CHOICES_HIGH);
    assert_eq!(choices.len(), 73);
    assert_eq!(choices.first().map(String::as_str), Some("C1"));
    assert_eq!(choices.last().map(String::as_str), Some("C7"));
    assert!(choices.iter().all(|name| !name.contains('/')));
}
