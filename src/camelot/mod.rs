// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Camelot wheel model for harmonic mixing.
//!
//! The wheel arranges the 24 major and minor keys on 12 positions, like
//! the hours of a clock. Minor keys sit on the outer ring ("A"), major
//! keys on the inner ring ("B"). A key mixes well with its neighbours one
//! hour either way and with its relative key at the same hour.
//!
//! All operations here are pure functions over small `Copy` values and
//! immutable tables, so they are safe to call from any thread.

pub mod compat;
pub mod path;
pub mod sequence;
pub mod table;
pub mod text;

pub use compat::{are_compatible, harmonic_neighbors, relative_of, wheel_distance};
pub use path::{harmonic_path, HarmonicPath, PathOutcome, DEFAULT_MAX_STEPS};
pub use sequence::{generate_sequence, relative_chain, ParseTraversalError, Traversal};
pub use table::{KeyTable, RelativePair};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::music::Quality;

/// Number of positions on the wheel
pub const WHEEL_SIZE: u8 = 12;

/// Text used wherever a key could not be determined
pub const UNKNOWN: &str = "Unknown";

/// Ring of the wheel: `A` is minor, `B` is major
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Mode {
    A,
    B,
}

impl Mode {
    /// The other ring
    pub fn flip(self) -> Self {
        match self {
            Mode::A => Mode::B,
            Mode::B => Mode::A,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Mode::A => 'A',
            Mode::B => 'B',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'A' => Some(Mode::A),
            'B' => Some(Mode::B),
            _ => None,
        }
    }

    /// Major or minor
    pub fn quality(self) -> Quality {
        match self {
            Mode::A => Quality::Minor,
            Mode::B => Quality::Major,
        }
    }
}

impl From<Quality> for Mode {
    fn from(quality: Quality) -> Self {
        match quality {
            Quality::Minor => Mode::A,
            Quality::Major => Mode::B,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Errors from parsing Camelot code text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCamelotError {
    #[error("camelot code {0:?} is too short")]
    TooShort(String),
    #[error("camelot code {0:?} has no valid wheel position (1-12)")]
    InvalidPosition(String),
    #[error("camelot code {0:?} has no valid mode letter (A or B)")]
    InvalidMode(String),
}

/// A validated position on the Camelot wheel, e.g. `8A`.
///
/// The position is always within 1..=12, so every value of this type is
/// a real key. Text that does not match `^(?:[1-9]|1[0-2])[AB]$` fails to
/// parse instead of producing a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CamelotCode {
    position: u8,
    mode: Mode,
}

impl CamelotCode {
    /// Create a code, returning `None` when the position is off the wheel
    pub fn new(position: u8, mode: Mode) -> Option<Self> {
        if (1..=WHEEL_SIZE).contains(&position) {
            Some(Self { position, mode })
        } else {
            None
        }
    }

    /// Parse a code, treating anything malformed as absent
    pub fn parse(text: &str) -> Option<Self> {
        text.parse().ok()
    }

    /// Wheel position (1-12)
    pub fn position(self) -> u8 {
        self.position
    }

    /// Ring letter
    pub fn mode(self) -> Mode {
        self.mode
    }

    pub fn quality(self) -> Quality {
        self.mode.quality()
    }

    /// One hour clockwise, wrapping 12 -> 1
    pub fn clockwise(self) -> Self {
        Self {
            position: self.position % WHEEL_SIZE + 1,
            mode: self.mode,
        }
    }

    /// One hour counter-clockwise, wrapping 1 -> 12
    pub fn counter_clockwise(self) -> Self {
        Self {
            position: (self.position + WHEEL_SIZE - 2) % WHEEL_SIZE + 1,
            mode: self.mode,
        }
    }

    /// Same position on the other ring
    pub fn flipped(self) -> Self {
        Self {
            position: self.position,
            mode: self.mode.flip(),
        }
    }

    /// All 24 codes, ordered by position then mode
    pub fn all() -> impl Iterator<Item = CamelotCode> {
        (1..=WHEEL_SIZE).flat_map(|position| {
            [Mode::A, Mode::B]
                .into_iter()
                .map(move |mode| CamelotCode { position, mode })
        })
    }
}

impl FromStr for CamelotCode {
    type Err = ParseCamelotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let letter = match chars.next_back() {
            Some(letter) if s.len() >= 2 => letter,
            _ => return Err(ParseCamelotError::TooShort(s.to_string())),
        };
        let digits = chars.as_str();

        let mode = Mode::from_letter(letter)
            .ok_or_else(|| ParseCamelotError::InvalidMode(s.to_string()))?;

        let well_formed = (1..=2).contains(&digits.len())
            && !digits.starts_with('0')
            && digits.bytes().all(|b| b.is_ascii_digit());
        if !well_formed {
            return Err(ParseCamelotError::InvalidPosition(s.to_string()));
        }

        digits
            .parse::<u8>()
            .ok()
            .and_then(|position| CamelotCode::new(position, mode))
            .ok_or_else(|| ParseCamelotError::InvalidPosition(s.to_string()))
    }
}

impl TryFrom<String> for CamelotCode {
    type Error = ParseCamelotError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CamelotCode> for String {
    fn from(code: CamelotCode) -> Self {
        code.to_string()
    }
}

impl fmt::Display for CamelotCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.position, self.mode)
    }
}

/// Shortest distance between two wheel positions, in hours (0-6)
pub fn position_distance(a: u8, b: u8) -> u8 {
    let diff = a.abs_diff(b);
    diff.min(WHEEL_SIZE - diff)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(text: &str) -> CamelotCode {
        text.parse().unwrap()
    }

    #[test]
    fn test_parse_valid_codes() {
        let c = code("8A");
        assert_eq!(c.position(), 8);
        assert_eq!(c.mode(), Mode::A);

        let c = code("12B");
        assert_eq!(c.position(), 12);
        assert_eq!(c.mode(), Mode::B);

        assert_eq!(code("1A").position(), 1);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(
            "8".parse::<CamelotCode>(),
            Err(ParseCamelotError::TooShort("8".to_string()))
        );
        assert!(matches!(
            "".parse::<CamelotCode>(),
            Err(ParseCamelotError::TooShort(_))
        ));
        assert!(matches!(
            "8C".parse::<CamelotCode>(),
            Err(ParseCamelotError::InvalidMode(_))
        ));
        assert!(matches!(
            "8a".parse::<CamelotCode>(),
            Err(ParseCamelotError::InvalidMode(_))
        ));
        assert!(matches!(
            "0A".parse::<CamelotCode>(),
            Err(ParseCamelotError::InvalidPosition(_))
        ));
        assert!(matches!(
            "13A".parse::<CamelotCode>(),
            Err(ParseCamelotError::InvalidPosition(_))
        ));
        assert!(matches!(
            "08A".parse::<CamelotCode>(),
            Err(ParseCamelotError::InvalidPosition(_))
        ));
        assert!(matches!(
            "XA".parse::<CamelotCode>(),
            Err(ParseCamelotError::InvalidPosition(_))
        ));
        assert!(" 8A".parse::<CamelotCode>().is_err());
        assert!("+8A".parse::<CamelotCode>().is_err());
        assert!("8Aé".parse::<CamelotCode>().is_err());
        assert_eq!(CamelotCode::parse("Unknown"), None);
    }

    #[test]
    fn test_display_round_trips() {
        for c in CamelotCode::all() {
            assert_eq!(code(&c.to_string()), c);
        }
        assert_eq!(code("10B").to_string(), "10B");
    }

    #[test]
    fn test_all_codes() {
        let all: Vec<CamelotCode> = CamelotCode::all().collect();
        assert_eq!(all.len(), 24);
        assert_eq!(all[0], code("1A"));
        assert_eq!(all[1], code("1B"));
        assert_eq!(all[23], code("12B"));
    }

    #[test]
    fn test_wheel_steps_wrap() {
        assert_eq!(code("12A").clockwise(), code("1A"));
        assert_eq!(code("1B").counter_clockwise(), code("12B"));
        assert_eq!(code("8A").clockwise(), code("9A"));
        assert_eq!(code("8A").counter_clockwise(), code("7A"));
        assert_eq!(code("2A").counter_clockwise(), code("1A"));
    }

    #[test]
    fn test_mode_flip_is_involution() {
        assert_eq!(Mode::A.flip().flip(), Mode::A);
        assert_eq!(Mode::B.flip(), Mode::A);
        assert_eq!(Mode::from(Quality::Major), Mode::B);
        assert_eq!(Mode::A.quality(), Quality::Minor);
    }

    #[test]
    fn test_position_distance() {
        assert_eq!(position_distance(8, 8), 0);
        assert_eq!(position_distance(8, 3), 5);
        assert_eq!(position_distance(8, 1), 5);
        assert_eq!(position_distance(1, 12), 1);
        assert_eq!(position_distance(3, 9), 6);
    }

    #[test]
    fn test_new_validates_position() {
        assert!(CamelotCode::new(0, Mode::A).is_none());
        assert!(CamelotCode::new(13, Mode::B).is_none());
        assert!(CamelotCode::new(12, Mode::B).is_some());
    }

    #[test]
    fn test_serde_as_text() {
        let yaml = serde_yaml::to_string(&code("11B")).unwrap();
        assert_eq!(yaml.trim(), "11B");
        let parsed: CamelotCode = serde_yaml::from_str("5A").unwrap();
        assert_eq!(parsed, code("5A"));
        assert!(serde_yaml::from_str::<CamelotCode>("14A").is_err());
    }
}
