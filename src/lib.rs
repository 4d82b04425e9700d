// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Western tonal music theory: pitches, scales, chords and the derivations
//! between them.
//!
//! ```
//! use tonal::{Chord, Pitch, Scale};
//!
//! let c4 = Pitch::from_name("C4").unwrap();
//! let c_major = Scale::from_root_and_pattern(c4.clone(), "major");
//! let triad = Chord::triad_from_scale(c4, &c_major).unwrap();
//! assert_eq!(triad.to_string(), "[C, E, G]");
//! ```

pub mod config;
pub mod music;

pub use music::{Chord, Degree, PatternError, PatternRegistry, Pitch, PitchError, Scale};
