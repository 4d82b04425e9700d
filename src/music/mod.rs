// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory core: pitches, scales and chords.
//!
//! A [`Pitch`] is built from a code or a name, a [`Scale`] from a root pitch
//! and a pattern name, and a [`Chord`] either from intervals above a root or
//! from degrees of a scale the root belongs to.

pub mod chord;
pub mod pitch;
pub mod scale;

use std::fmt;

pub use chord::Chord;
pub use pitch::{Pitch, PitchError};
pub use scale::{Degree, PatternError, PatternRegistry, Scale, DEGREE_NAMES};

/// Write pitch classes as `[C, E, G]`
pub(crate) fn write_pitch_classes(f: &mut fmt::Formatter<'_>, pitches: &[Pitch]) -> fmt::Result {
    write!(f, "[")?;
    for (i, pitch) in pitches.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", pitch.pitch_class())?;
    }
    write!(f, "]")
}
