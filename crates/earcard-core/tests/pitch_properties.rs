//! Property tests for pitch naming.

use earcard_core::pitch::{name_to_pitch, pitch_to_name, NameOptions};
use proptest::prelude::*;

proptest! {
    #[test]
    fn single_spelling_roundtrips(pitch in -1_200i32..1_200) {
        let name = pitch_to_name(pitch, NameOptions::SINGLE);
        prop_assert_eq!(name_to_pitch(&name), Some(pitch));
    }

    #[test]
    fn enharmonic_spelling_roundtrips(pitch in -1_200i32..1_200) {
        let name = pitch_to_name(pitch, NameOptions::default());
        prop_assert_eq!(name_to_pitch(&name), Some(pitch));
    }

    #[test]
    fn lowercase_and_padding_are_ignored(pitch in 0i32..128) {
        let name = pitch_to_name(pitch, NameOptions::SINGLE);
        let noisy = format!("  {}\t", name.to_lowercase());
        prop_assert_eq!(name_to_pitch(&noisy), Some(pitch));
    }

    #[test]
    fn parsing_never_panics(input in "\\PC{0,12}") {
        let _ = name_to_pitch(&input);
    }
}
