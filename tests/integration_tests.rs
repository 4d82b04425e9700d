// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Integration tests for tonal
//!
//! These tests exercise pitches, scales, chords and pattern files together
//! through the public API of the crate.

use std::fs;
use std::sync::Arc;

use tempfile::tempdir;
use tonal::config::PatternFile;
use tonal::{Chord, PatternRegistry, Pitch, PitchError, Scale};

fn c_major() -> Scale {
    Scale::from_root_and_pattern(Pitch::from_code(60), "major")
}

fn classes<'a>(pitches: impl IntoIterator<Item = &'a Pitch>) -> Vec<&'static str> {
    pitches.into_iter().map(Pitch::pitch_class).collect()
}

/// Every code in 0-127 survives code -> pitch -> code
#[test]
fn test_code_round_trip() {
    for code in 0..=127 {
        assert_eq!(Pitch::from_code(code).code(), code);
    }
}

/// Every canonical spelling parses back to the code it came from
#[test]
fn test_spelling_round_trip() {
    for code in 0..=127 {
        let spelling = Pitch::from_code(code).spelling().to_string();
        let parsed = Pitch::from_name(&spelling).unwrap();
        assert_eq!(parsed.code(), code, "{}", spelling);
        assert_eq!(parsed.spelling(), spelling);
    }
}

/// Every enharmonic spelling of a code resolves to that code
#[test]
fn test_enharmonic_spellings_resolve() {
    for code in 0..=127 {
        let pitch = Pitch::from_code(code);
        let group = Pitch::enharmonic_equivalents(pitch.pitch_class()).unwrap();
        for spelling in group {
            let name = format!("{}{}", spelling, pitch.octave());
            assert_eq!(Pitch::from_name(&name).unwrap(), pitch, "{}", name);
        }
    }
}

#[test]
fn test_parse_failure_is_distinct_from_empty_scale() {
    assert!(matches!(
        Pitch::from_name("Q4"),
        Err(PitchError::UnknownName(name)) if name == "Q4"
    ));

    // An unknown pattern is a valid, empty scale rather than an error
    let scale = Scale::from_root_and_pattern(Pitch::from_code(60), "unknown-pattern");
    assert!(scale.members().is_none());
    assert!(!scale.contains(&Pitch::from_code(60)));
}

#[test]
fn test_reference_frequencies() {
    assert_eq!(Pitch::code_to_frequency(69), 440.0);
    assert!((Pitch::code_to_frequency(60) - 261.63).abs() < 0.01);
    assert!((Pitch::from_name("A3").unwrap().frequency() - 220.0).abs() < 1e-9);
}

#[test]
fn test_c_major_scale() {
    let scale = c_major();
    assert_eq!(
        classes(scale.members().unwrap()),
        vec!["C", "D", "E", "F", "G", "A", "B"]
    );
    assert_eq!(scale.diatonic_degree(&Pitch::from_code(64)), Some(2));
    assert_eq!(scale.note_from_degree(3).unwrap().pitch_class(), "E");
    assert_eq!(scale.degree_name(&Pitch::from_name("Eb4").unwrap()), "b3");
}

#[test]
fn test_scale_from_parsed_root() {
    let root = Pitch::from_name("Bb3").unwrap();
    let scale = Scale::from_root_and_pattern(root, "Major");
    assert_eq!(
        classes(&scale),
        vec!["A#", "C", "D", "D#", "F", "G", "A"]
    );
    assert_eq!(scale.root().spelling(), "Bb3");
}

#[test]
fn test_tonic_triad() {
    let chord = Chord::from_scale(Pitch::from_code(60), &c_major(), &[1, 3, 5]).unwrap();
    assert_eq!(classes(&chord), vec!["C", "E", "G"]);
}

#[test]
fn test_chord_root_outside_scale() {
    let cs = Pitch::from_name("C#4").unwrap();
    assert!(Chord::from_scale(cs, &c_major(), &[1, 3, 5]).is_none());
}

#[test]
fn test_interval_chord_membership() {
    let chord = Chord::from_intervals(Pitch::from_code(60), &[0, 4, 7]);
    assert!(chord.contains(&Pitch::from_code(64)));
    assert!(!chord.contains(&Pitch::from_code(76)));

    // Scale membership ignores the octave, chord membership does not
    assert!(c_major().contains(&Pitch::from_code(76)));
}

#[test]
fn test_all_chords_cover_every_member() {
    let scale = c_major();
    let chords = Chord::all_chords_from_scale(&scale);

    for member in &scale {
        let rooted: Vec<&Chord> = chords.iter().filter(|c| c.root() == member).collect();
        assert_eq!(rooted.len(), Chord::degree_sets().len());
        assert!(rooted.iter().all(|c| c.contains(member)));
    }
}

#[test]
fn test_diatonic_triads_in_c_major() {
    let scale = c_major();
    let triads: Vec<String> = scale
        .iter()
        .map(|root| Chord::triad_from_scale(root.clone(), &scale).unwrap().to_string())
        .collect();

    assert_eq!(
        triads,
        vec![
            "[C, E, G]",
            "[D, F, A]",
            "[E, G, B]",
            "[F, A, C]",
            "[G, B, D]",
            "[A, C, E]",
            "[B, D, F]",
        ]
    );
}

#[test]
fn test_shared_root_across_scale_and_chord() {
    let root = Arc::new(Pitch::from_code(62));
    let scale = Scale::from_root_and_pattern(Arc::clone(&root), "dorian");
    let chord = Chord::triad_from_scale(Arc::clone(&root), &scale).unwrap();

    assert!(Arc::ptr_eq(scale.root_handle(), chord.root_handle()));
    assert_eq!(classes(&chord), vec!["D", "F", "A"]);
}

#[test]
fn test_registered_pattern_feeds_chords() {
    let mut registry = PatternRegistry::builtin();
    registry.register("Hungarian_Minor", vec![0, 2, 3, 6, 7, 8, 11]).unwrap();

    let scale = registry.scale(Pitch::from_code(57), "hungarian_minor");
    let triad = Chord::triad_from_scale(Pitch::from_code(57), &scale).unwrap();
    assert_eq!(classes(&triad), vec!["A", "C", "E"]);

    let chords = Chord::all_chords_from_scale(&scale);
    assert_eq!(chords.len(), 7 * 64);
}

#[test]
fn test_pattern_file_to_chords() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pentatonic.toml");
    fs::write(
        &path,
        r#"
[[patterns]]
name = "yo"
intervals = [0, 2, 5, 7, 9]
"#,
    )
    .unwrap();

    let registry = PatternFile::load(&path).unwrap().into_registry().unwrap();
    let scale = registry.scale(Pitch::from_code(62), "yo");
    assert_eq!(classes(&scale), vec!["D", "E", "G", "A", "B"]);

    // Degrees past the end of a five-note scale wrap around
    let chord = Chord::from_scale(Pitch::from_code(62), &scale, &[1, 3, 5, 7]).unwrap();
    assert_eq!(classes(&chord), vec!["D", "G", "B", "E"]);
}
