//! Card generator integration tests.

use earcard_core::rng::create_rng;
use earcard_core::{
    name_to_pitch, next_card, next_card_with, Direction, GeneratorOptions, IntervalId,
    MidpointRule, Settings,
};

const DRAWS: usize = 10_000;

fn settings(range_min: &str, range_max: &str, pool: &[IntervalId]) -> Settings {
    Settings {
        range_min: range_min.to_string(),
        range_max: range_max.to_string(),
        pool: pool.to_vec(),
        ..Settings::default()
    }
}

#[test]
fn test_walk_stays_in_range() {
    let settings = Settings::default();
    let (lo, hi) = settings.active_range();
    let mut rng = create_rng(42);
    let mut previous = None;

    for _ in 0..DRAWS {
        let card = next_card(&settings, previous, &mut rng);
        assert!(
            (lo..=hi).contains(&card.target_pitch),
            "target {} outside [{}, {}]",
            card.target_pitch,
            lo,
            hi
        );
        previous = Some(card.target_pitch);
    }
}

#[test]
fn test_walk_is_connected() {
    let settings = Settings::default();
    let mut rng = create_rng(5);
    let mut card = next_card(&settings, None, &mut rng);

    for _ in 0..100 {
        let next = next_card(&settings, Some(card.target_pitch), &mut rng);
        assert_eq!(next.previous_pitch, card.target_pitch);
        card = next;
    }
}

#[test]
fn test_pool_adherence() {
    let pool = [IntervalId::MinorThird, IntervalId::Tritone, IntervalId::MajorSixth];
    let settings = settings("C3", "C5", &pool);
    let mut rng = create_rng(11);
    let mut previous = None;

    for _ in 0..DRAWS {
        let card = next_card(&settings, previous, &mut rng);
        assert!(pool.contains(&card.interval), "{:?} not in pool", card.interval);
        previous = Some(card.target_pitch);
    }
}

#[test]
fn test_every_pool_interval_is_drawn() {
    let pool = [IntervalId::MinorSecond, IntervalId::PerfectFourth, IntervalId::Octave];
    let settings = settings("C2", "C6", &pool);
    let mut rng = create_rng(99);
    let mut previous = None;
    let mut seen = Vec::new();

    for _ in 0..1_000 {
        let card = next_card(&settings, previous, &mut rng);
        if !seen.contains(&card.interval) {
            seen.push(card.interval);
        }
        previous = Some(card.target_pitch);
    }
    seen.sort();
    assert_eq!(seen, pool.to_vec());
}

#[test]
fn test_direction_consistency() {
    let settings = Settings::default();
    let mut rng = create_rng(7);
    let mut previous = None;

    for _ in 0..DRAWS {
        let card = next_card(&settings, previous, &mut rng);
        let distance = card.target_pitch - card.previous_pitch;
        assert_eq!(card.direction == Direction::Up, distance > 0);
        assert_eq!(distance.abs(), card.interval.semitones());
        previous = Some(card.target_pitch);
    }
}

#[test]
fn test_both_directions_occur() {
    let settings = Settings::default();
    let mut rng = create_rng(8);
    let mut previous = None;
    let (mut ups, mut downs) = (0, 0);

    for _ in 0..1_000 {
        let card = next_card(&settings, previous, &mut rng);
        match card.direction {
            Direction::Up => ups += 1,
            Direction::Down => downs += 1,
        }
        previous = Some(card.target_pitch);
    }
    assert!(ups > 100 && downs > 100, "ups={} downs={}", ups, downs);
}

#[test]
fn test_empty_pool_behaves_like_fallback_pool() {
    let empty = settings("A2", "E4", &[]);
    let fifth = settings("A2", "E4", &[IntervalId::PerfectFifth]);

    let mut rng_empty = create_rng(21);
    let mut rng_fifth = create_rng(21);
    let mut prev_empty = None;
    let mut prev_fifth = None;

    for _ in 0..1_000 {
        let a = next_card(&empty, prev_empty, &mut rng_empty);
        let b = next_card(&fifth, prev_fifth, &mut rng_fifth);
        assert_eq!(a, b);
        assert_eq!(a.interval, IntervalId::PerfectFifth);
        assert!((45..=64).contains(&a.target_pitch));
        prev_empty = Some(a.target_pitch);
        prev_fifth = Some(b.target_pitch);
    }
}

#[test]
fn test_degenerate_range_clamps_to_top() {
    // Two semitones of room, every pool interval is larger.
    let settings = settings("C4", "D4", &[IntervalId::MajorThird, IntervalId::PerfectFifth]);
    let (lo, hi) = settings.active_range();
    let mut rng = create_rng(13);
    let mut previous = None;

    for _ in 0..DRAWS {
        let card = next_card(&settings, previous, &mut rng);
        assert!(
            (lo..=hi).contains(&card.target_pitch) || card.target_pitch == hi,
            "target {}",
            card.target_pitch
        );
        assert_eq!(card.target_pitch, hi);
        assert_eq!(card.interval, IntervalId::MajorThird);
        assert_eq!(card.direction, Direction::Up);
        previous = Some(card.target_pitch);
    }
}

#[test]
fn test_invalid_range_uses_default_range() {
    let inverted = settings("E4", "A2", &IntervalId::ALL);
    let garbage = settings("??", "E4", &IntervalId::ALL);
    let mut rng = create_rng(17);

    for settings in [inverted, garbage] {
        let mut previous = None;
        for _ in 0..1_000 {
            let card = next_card(&settings, previous, &mut rng);
            assert!((45..=64).contains(&card.target_pitch));
            previous = Some(card.target_pitch);
        }
    }
}

#[test]
fn test_perfect_fifth_scenario() {
    let settings = settings("A2", "E4", &[IntervalId::PerfectFifth]);
    let lo = name_to_pitch("A2").unwrap();
    let hi = name_to_pitch("E4").unwrap();
    assert_eq!((lo, hi), (45, 64));

    let mut rng = create_rng(2024);
    let card = next_card(&settings, None, &mut rng);
    assert_eq!(card.interval, IntervalId::PerfectFifth);
    assert!((lo..=hi).contains(&card.target_pitch));
    assert_eq!(card.previous_pitch, 54);
}

#[test]
fn test_perfect_fifth_scenario_legacy_start() {
    // The legacy start (45 + 64 / 2 = 77) is above the range, so no fifth
    // from it lands inside and the card clamps to the top.
    let settings = settings("A2", "E4", &[IntervalId::PerfectFifth]);
    let options = GeneratorOptions {
        midpoint: MidpointRule::Legacy,
        ..GeneratorOptions::default()
    };
    let mut rng = create_rng(2024);
    let card = next_card_with(&settings, None, &options, &mut rng);
    assert_eq!(card.previous_pitch, 77);
    assert_eq!(card.interval, IntervalId::PerfectFifth);
    assert_eq!(card.target_pitch, 64);
}

#[test]
fn test_same_seed_same_cards() {
    let settings = Settings::default();
    let run = |seed| {
        let mut rng = create_rng(seed);
        let mut previous = None;
        (0..50)
            .map(|_| {
                let card = next_card(&settings, previous, &mut rng);
                previous = Some(card.target_pitch);
                card
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(run(3), run(3));
    assert_ne!(run(3), run(4));
}
