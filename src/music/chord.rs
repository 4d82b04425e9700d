// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chords built from explicit intervals or from scale degrees.
//!
//! Tones keep the order they were produced in and are neither sorted nor
//! de-duplicated.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use super::pitch::Pitch;
use super::scale::Scale;
use super::write_pitch_classes;

/// Highest degree offset used when enumerating the chords of a scale
const MAX_CHORD_DEGREE: i32 = 7;

/// A chord: a root plus its tones
#[derive(Debug, Clone, PartialEq)]
pub struct Chord {
    root: Arc<Pitch>,
    tones: Vec<Pitch>,
}

impl Chord {
    /// Degrees of a plain triad: root, third, fifth
    pub const TRIAD: [i32; 3] = [1, 3, 5];

    /// Build a chord from half-step offsets above the root, in the given order
    pub fn from_intervals(root: impl Into<Arc<Pitch>>, intervals: &[i32]) -> Self {
        let root = root.into();
        let tones = intervals.iter().map(|&i| root.transpose(i)).collect();
        Self { root, tones }
    }

    /// Build a chord by stacking scale degrees on a root that belongs to the scale.
    ///
    /// Degrees are 1-based and counted from the root's own position in the
    /// scale, so `[1, 3, 5]` on the second member gives the ii triad. Returns
    /// `None` when the root is not in the scale. Degrees the scale cannot
    /// resolve, including offsets that overflow, are left out, so the chord
    /// may have fewer tones than degrees.
    pub fn from_scale(
        root: impl Into<Arc<Pitch>>,
        scale: &Scale,
        degrees: &[i32],
    ) -> Option<Self> {
        let root = root.into();
        if !scale.contains(&root) {
            trace!(root = %root, scale = %scale, "root is not a scale member");
            return None;
        }
        let root_degree = scale.diatonic_degree(&root)? as i32;

        let tones = degrees
            .iter()
            .filter_map(|&d| scale.note_from_degree(root_degree.checked_add(d)?))
            .collect();

        Some(Self { root, tones })
    }

    /// The root-position triad on `root`, see [`Chord::from_scale`]
    pub fn triad_from_scale(root: impl Into<Arc<Pitch>>, scale: &Scale) -> Option<Self> {
        Self::from_scale(root, scale, &Self::TRIAD)
    }

    /// Every degree set used by [`Chord::all_chords_from_scale`].
    ///
    /// Each set holds degree 1 plus one subset of degrees 2 through 7, in
    /// ascending order. Set `n` contains degree `k + 2` when bit `k` of `n`
    /// is set, which gives 64 sets starting with `[1]` and ending with
    /// `[1, 2, 3, 4, 5, 6, 7]`.
    pub fn degree_sets() -> Vec<Vec<i32>> {
        let extra = (MAX_CHORD_DEGREE - 1) as u32;
        (0..1u32 << extra)
            .map(|mask| {
                let upper = (0..extra)
                    .filter(|bit| mask & (1u32 << bit) != 0)
                    .map(|bit| bit as i32 + 2);
                std::iter::once(1).chain(upper).collect()
            })
            .collect()
    }

    /// Every chord obtainable from the scale: each member as root, combined
    /// with each of [`Chord::degree_sets`]
    pub fn all_chords_from_scale(scale: &Scale) -> Vec<Self> {
        let sets = &Self::degree_sets();
        let chords: Vec<Self> = scale
            .iter()
            .flat_map(move |root| {
                sets.iter()
                    .filter_map(move |degrees| Self::from_scale(root.clone(), scale, degrees))
            })
            .collect();
        trace!(scale = %scale, count = chords.len(), "enumerated scale chords");
        chords
    }

    pub fn root(&self) -> &Pitch {
        &self.root
    }

    /// Shared handle to the root this chord was built from
    pub fn root_handle(&self) -> &Arc<Pitch> {
        &self.root
    }

    pub fn tones(&self) -> &[Pitch] {
        &self.tones
    }

    pub fn len(&self) -> usize {
        self.tones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tones.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pitch> {
        self.tones.iter()
    }

    /// Half steps from the root to each tone
    pub fn intervals(&self) -> Vec<i32> {
        self.tones.iter().map(|tone| tone.difference(&self.root)).collect()
    }

    /// Check for a tone with exactly this code; unlike [`Scale::contains`]
    /// the octave matters
    pub fn contains(&self, pitch: &Pitch) -> bool {
        self.tones.iter().any(|tone| tone == pitch)
    }
}

impl<'a> IntoIterator for &'a Chord {
    type Item = &'a Pitch;
    type IntoIter = std::slice::Iter<'a, Pitch>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_pitch_classes(f, &self.tones)
    }
}
