// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Absolute pitches in 12-tone equal temperament.
//!
//! A [`Pitch`] is an integer code (60 = C4, 69 = A4 = 440 Hz) together with
//! the spelling it was written with. Codes are unbounded; only name parsing
//! is limited to the 0-127 range.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};
use std::str::FromStr;

use thiserror::Error;

/// Highest code considered when resolving a name
pub const MAX_NAMED_CODE: i32 = 127;

/// Code of the tuning reference A4
pub const A4_CODE: i32 = 69;

/// Frequency of the tuning reference A4 in Hz
pub const A4_FREQUENCY: f64 = 440.0;

/// Canonical pitch classes, sharps preferred, indexed by `code mod 12`
pub const PITCH_CLASSES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Alternate spellings for every pitch class, canonical spelling first
static ENHARMONIC_GROUPS: [&[&str]; 12] = [
    &["A", "G##", "Bbb"],
    &["A#", "Bb", "Cbb"],
    &["B", "A##", "Cb"],
    &["C", "B#", "Dbb"],
    &["C#", "B##", "Db"],
    &["D", "C##", "Ebb"],
    &["D#", "Eb", "Fbb"],
    &["E", "D##", "Fb"],
    &["F", "E#", "Gbb"],
    &["F#", "E##", "Gb"],
    &["G", "F##", "Abb"],
    &["G#", "Ab"],
];

/// Errors raised while constructing a [`Pitch`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PitchError {
    /// No code in 0-127 is spelled this way
    #[error("unrecognized pitch name: {0:?}")]
    UnknownName(String),
}

/// An absolute pitch
///
/// Equality, hashing and ordering only look at the code, so `Db4` and `C#4`
/// compare equal even though they print differently.
#[derive(Debug, Clone)]
pub struct Pitch {
    code: i32,
    spelling: String,
}

impl Pitch {
    /// Create a pitch from its code, spelled canonically (sharps preferred)
    pub fn from_code(code: i32) -> Self {
        Self {
            code,
            spelling: Self::name_from_code(code),
        }
    }

    /// Parse a pitch name such as `"C#4"`, `"Bb3"` or `"Cbb-1"`.
    ///
    /// Every code in 0-127 is tried in turn; the name matches a code when it
    /// equals one of that code's enharmonic spellings followed by the code's
    /// octave number. The spelling is kept exactly as written.
    pub fn from_name(name: &str) -> Result<Self, PitchError> {
        let code = (0..=MAX_NAMED_CODE)
            .find(|&code| Self::spells(name, code))
            .ok_or_else(|| PitchError::UnknownName(name.to_string()))?;

        Ok(Self {
            code,
            spelling: name.to_string(),
        })
    }

    fn spells(name: &str, code: i32) -> bool {
        let Some(group) = Self::enharmonic_equivalents(Self::class_of(code)) else {
            return false;
        };
        let octave = Self::octave_of(code).to_string();
        group.iter().any(|spelling| {
            name.len() == spelling.len() + octave.len()
                && name.starts_with(spelling)
                && name.ends_with(octave.as_str())
        })
    }

    /// Look up the enharmonic group a pitch class spelling belongs to
    pub fn enharmonic_equivalents(pitch_class: &str) -> Option<&'static [&'static str]> {
        ENHARMONIC_GROUPS
            .iter()
            .copied()
            .find(|group| group.iter().any(|&spelling| spelling == pitch_class))
    }

    /// Equal-tempered frequency of a code, tuned to A4 = 440 Hz
    pub fn code_to_frequency(code: i32) -> f64 {
        A4_FREQUENCY * 2.0_f64.powf((f64::from(code) - f64::from(A4_CODE)) / 12.0)
    }

    /// Canonical pitch class of a code
    pub fn class_of(code: i32) -> &'static str {
        PITCH_CLASSES[code.rem_euclid(12) as usize]
    }

    /// Octave number of a code (C4 = 60 sits in octave 4)
    pub fn octave_of(code: i32) -> i32 {
        code.div_euclid(12) - 1
    }

    /// Canonical spelling of a code, e.g. `"C#4"`
    pub fn name_from_code(code: i32) -> String {
        format!("{}{}", Self::class_of(code), Self::octave_of(code))
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    /// The spelling this pitch was created with
    pub fn spelling(&self) -> &str {
        &self.spelling
    }

    /// Octave-independent canonical name, e.g. `"C#"`
    pub fn pitch_class(&self) -> &'static str {
        Self::class_of(self.code)
    }

    pub fn octave(&self) -> i32 {
        Self::octave_of(self.code)
    }

    /// Frequency of this pitch in Hz
    pub fn frequency(&self) -> f64 {
        Self::code_to_frequency(self.code)
    }

    /// Move by a number of half steps (negative is down).
    ///
    /// Codes saturate at the `i32` limits; use [`Pitch::checked_transpose`]
    /// to detect that.
    pub fn transpose(&self, half_steps: i32) -> Self {
        Self::from_code(self.code.saturating_add(half_steps))
    }

    /// Like [`Pitch::transpose`], but `None` when the code would leave the `i32` range
    pub fn checked_transpose(&self, half_steps: i32) -> Option<Self> {
        self.code.checked_add(half_steps).map(Self::from_code)
    }

    /// Signed distance in half steps from `other` up to `self`, saturating
    /// at the `i32` limits
    pub fn difference(&self, other: &Pitch) -> i32 {
        self.code.saturating_sub(other.code)
    }

    /// True when both pitches share a pitch class, ignoring octave
    pub fn same_class(&self, other: &Pitch) -> bool {
        self.code.rem_euclid(12) == other.code.rem_euclid(12)
    }
}

impl PartialEq for Pitch {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Pitch {}

impl Hash for Pitch {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl PartialOrd for Pitch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pitch {
    fn cmp(&self, other: &Self) -> Ordering {
        self.code.cmp(&other.code)
    }
}

impl From<i32> for Pitch {
    fn from(code: i32) -> Self {
        Self::from_code(code)
    }
}

impl FromStr for Pitch {
    type Err = PitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.spelling)
    }
}

impl Add<i32> for &Pitch {
    type Output = Pitch;

    fn add(self, half_steps: i32) -> Pitch {
        self.transpose(half_steps)
    }
}

impl Sub<i32> for &Pitch {
    type Output = Pitch;

    fn sub(self, half_steps: i32) -> Pitch {
        Pitch::from_code(self.code.saturating_sub(half_steps))
    }
}

impl Sub<&Pitch> for &Pitch {
    type Output = i32;

    fn sub(self, other: &Pitch) -> i32 {
        self.difference(other)
    }
}
