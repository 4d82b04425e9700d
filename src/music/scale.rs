// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scales built from a root pitch and a named half-step pattern.
//!
//! Patterns live in a [`PatternRegistry`]. Building a scale from a name the
//! registry does not know is not an error: the scale simply has no members,
//! and every query on it answers as an empty scale would.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use thiserror::Error;
use tracing::{debug, trace};

use super::pitch::Pitch;
use super::write_pitch_classes;

/// Interval-class labels indexed by half steps above the root
pub const DEGREE_NAMES: [&str; 12] = [
    "1", "b2", "2", "b3", "3", "4", "b5", "5", "b6", "6", "b7", "7",
];

/// Built-in patterns (name, half steps from root)
const BUILTIN_PATTERNS: &[(&str, &[i32])] = &[
    // Major scale and modes
    ("major", &[0, 2, 4, 5, 7, 9, 11]),
    ("ionian", &[0, 2, 4, 5, 7, 9, 11]),
    ("dorian", &[0, 2, 3, 5, 7, 9, 10]),
    ("phrygian", &[0, 1, 3, 5, 7, 8, 10]),
    ("lydian", &[0, 2, 4, 6, 7, 9, 11]),
    ("mixolydian", &[0, 2, 4, 5, 7, 9, 10]),
    ("minor", &[0, 2, 3, 5, 7, 8, 10]),
    ("natural_minor", &[0, 2, 3, 5, 7, 8, 10]),
    ("aeolian", &[0, 2, 3, 5, 7, 8, 10]),
    ("locrian", &[0, 1, 3, 5, 6, 8, 10]),
    // Other minor scales
    ("harmonic_minor", &[0, 2, 3, 5, 7, 8, 11]),
    ("melodic_minor", &[0, 2, 3, 5, 7, 9, 11]),
    // Pentatonic and blues
    ("major_pentatonic", &[0, 2, 4, 7, 9]),
    ("minor_pentatonic", &[0, 3, 5, 7, 10]),
    ("blues", &[0, 3, 5, 6, 7, 10]),
    // Symmetric scales
    ("whole_tone", &[0, 2, 4, 6, 8, 10]),
    ("chromatic", &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]),
];

static DEFAULT_REGISTRY: LazyLock<PatternRegistry> = LazyLock::new(PatternRegistry::builtin);

/// Reasons a half-step pattern is refused by the registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern {0:?} has no intervals")]
    Empty(String),
    #[error("pattern {0:?} must start at 0, found {1}")]
    MissingRoot(String, i32),
    #[error("pattern {0:?} is not strictly ascending at {1}")]
    NotAscending(String, i32),
}

/// Named half-step patterns, keyed by lowercase name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternRegistry {
    patterns: HashMap<String, Vec<i32>>,
}

impl PatternRegistry {
    /// Create a registry with no patterns at all
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in diatonic modes and common scales
    pub fn builtin() -> Self {
        let patterns = BUILTIN_PATTERNS
            .iter()
            .map(|(name, intervals)| (name.to_string(), intervals.to_vec()))
            .collect();
        Self { patterns }
    }

    /// The shared read-only registry used by [`Scale::from_root_and_pattern`]
    pub fn global() -> &'static PatternRegistry {
        &DEFAULT_REGISTRY
    }

    /// Register (or replace) a named pattern.
    ///
    /// Intervals must start at 0 and strictly ascend.
    pub fn register(&mut self, name: &str, intervals: Vec<i32>) -> Result<(), PatternError> {
        let key = name.to_lowercase();
        validate_pattern(&key, &intervals)?;
        debug!(pattern = %key, ?intervals, "registered scale pattern");
        self.patterns.insert(key, intervals);
        Ok(())
    }

    /// Look up a pattern, ignoring case
    pub fn get(&self, name: &str) -> Option<&[i32]> {
        self.patterns.get(&name.to_lowercase()).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.patterns.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Build a scale against this registry
    pub fn scale(&self, root: impl Into<Arc<Pitch>>, pattern_name: &str) -> Scale {
        Scale::build(root.into(), pattern_name, self.get(pattern_name))
    }
}

fn validate_pattern(name: &str, intervals: &[i32]) -> Result<(), PatternError> {
    let first = *intervals
        .first()
        .ok_or_else(|| PatternError::Empty(name.to_string()))?;
    if first != 0 {
        return Err(PatternError::MissingRoot(name.to_string(), first));
    }
    if let Some(pair) = intervals.windows(2).find(|pair| pair[1] <= pair[0]) {
        return Err(PatternError::NotAscending(name.to_string(), pair[1]));
    }
    Ok(())
}

/// A scale degree, either 1-based ordinal or an interval label such as `"b3"`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degree<'a> {
    Number(i32),
    Label(&'a str),
}

impl From<i32> for Degree<'_> {
    fn from(n: i32) -> Self {
        Degree::Number(n)
    }
}

impl<'a> From<&'a str> for Degree<'a> {
    fn from(label: &'a str) -> Self {
        Degree::Label(label)
    }
}

/// A scale: a root pitch plus the members generated by a half-step pattern
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    root: Arc<Pitch>,
    pattern_name: String,
    intervals: Option<Vec<i32>>,
    members: Option<Vec<Pitch>>,
}

impl Scale {
    /// Build a scale from a root and a pattern name in the global registry.
    ///
    /// An unknown name yields a scale without intervals or members.
    pub fn from_root_and_pattern(root: impl Into<Arc<Pitch>>, pattern_name: &str) -> Self {
        PatternRegistry::global().scale(root, pattern_name)
    }

    fn build(root: Arc<Pitch>, pattern_name: &str, intervals: Option<&[i32]>) -> Self {
        if intervals.is_none() {
            trace!(pattern = pattern_name, "unregistered scale pattern");
        }
        let intervals = intervals.map(<[i32]>::to_vec);
        let members = intervals
            .as_ref()
            .map(|steps| steps.iter().map(|&step| root.transpose(step)).collect());

        Self {
            root,
            pattern_name: pattern_name.to_string(),
            intervals,
            members,
        }
    }

    pub fn root(&self) -> &Pitch {
        &self.root
    }

    /// Shared handle to the root this scale was built from
    pub fn root_handle(&self) -> &Arc<Pitch> {
        &self.root
    }

    pub fn pattern_name(&self) -> &str {
        &self.pattern_name
    }

    /// Half steps from the root, if the pattern was registered
    pub fn intervals(&self) -> Option<&[i32]> {
        self.intervals.as_deref()
    }

    /// Member pitches in ascending degree order, if the pattern was registered
    pub fn members(&self) -> Option<&[Pitch]> {
        self.members.as_deref()
    }

    /// Whether the pattern name resolved to a registered pattern
    pub fn is_registered(&self) -> bool {
        self.members.is_some()
    }

    pub fn len(&self) -> usize {
        self.members().map_or(0, <[Pitch]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pitch> {
        self.members().unwrap_or_default().iter()
    }

    /// Check membership by pitch class; the octave is ignored
    pub fn contains(&self, pitch: &Pitch) -> bool {
        self.iter().any(|member| member.same_class(pitch))
    }

    /// Interval label of a pitch relative to the root, member or not
    pub fn degree_name(&self, pitch: &Pitch) -> &'static str {
        let half_steps = i64::from(pitch.code()) - i64::from(self.root.code());
        DEGREE_NAMES[half_steps.rem_euclid(12) as usize]
    }

    /// Zero-based index of the member sharing the pitch's class
    pub fn diatonic_degree(&self, pitch: &Pitch) -> Option<usize> {
        self.iter().position(|member| member.same_class(pitch))
    }

    /// Resolve a degree to a pitch.
    ///
    /// Numbers are 1-based and wrap around the member list without moving
    /// up an octave, so degree 8 of a seven-note scale is the root itself.
    /// Labels resolve to the pitch that many half steps above the root.
    pub fn note_from_degree<'a>(&self, degree: impl Into<Degree<'a>>) -> Option<Pitch> {
        let members = self.members()?;
        match degree.into() {
            Degree::Number(n) => {
                let index = (i64::from(n) - 1).rem_euclid(members.len() as i64) as usize;
                Some(members[index].clone())
            }
            Degree::Label(label) => {
                let half_steps = DEGREE_NAMES.iter().position(|&name| name == label)?;
                Some(self.root.transpose(half_steps as i32))
            }
        }
    }
}

impl<'a> IntoIterator for &'a Scale {
    type Item = &'a Pitch;
    type IntoIter = std::slice::Iter<'a, Pitch>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.members() {
            Some(members) => write_pitch_classes(f, members),
            None => Ok(()),
        }
    }
}
