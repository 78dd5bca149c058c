// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch classes and key names.
//!
//! Provides the 12 pitch classes with enharmonic parsing, the
//! major/minor quality of a key, and the `KeyName` value used to
//! look keys up on the Camelot wheel.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semitone offset type
pub type Semitones = i8;

/// Note names (pitch classes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Note {
    C,
    Cs, // C# / Db
    D,
    Ds, // D# / Eb
    E,
    F,
    Fs, // F# / Gb
    G,
    Gs, // G# / Ab
    A,
    As, // A# / Bb
    B,
}

impl Note {
    /// All notes in chromatic order
    pub const ALL: [Note; 12] = [
        Note::C,
        Note::Cs,
        Note::D,
        Note::Ds,
        Note::E,
        Note::F,
        Note::Fs,
        Note::G,
        Note::Gs,
        Note::A,
        Note::As,
        Note::B,
    ];

    /// Get the pitch class (0-11) for this note
    pub fn pitch_class(self) -> u8 {
        self as u8
    }

    /// Get note from pitch class
    pub fn from_pitch_class(pc: u8) -> Self {
        Note::ALL[(pc % 12) as usize]
    }

    /// Transpose by semitones
    pub fn transpose(self, semitones: Semitones) -> Self {
        let new_pc = (self.pitch_class() as i8 + semitones).rem_euclid(12) as u8;
        Note::from_pitch_class(new_pc)
    }

    /// Spelling with a flat for the black keys (e.g. "Eb" instead of "D#")
    pub fn flat_name(self) -> &'static str {
        match self {
            Note::Cs => "Db",
            Note::Ds => "Eb",
            Note::Fs => "Gb",
            Note::Gs => "Ab",
            Note::As => "Bb",
            other => other.sharp_name(),
        }
    }

    /// Spelling with a sharp for the black keys
    pub fn sharp_name(self) -> &'static str {
        match self {
            Note::C => "C",
            Note::Cs => "C#",
            Note::D => "D",
            Note::Ds => "D#",
            Note::E => "E",
            Note::F => "F",
            Note::Fs => "F#",
            Note::G => "G",
            Note::Gs => "G#",
            Note::A => "A",
            Note::As => "A#",
            Note::B => "B",
        }
    }
}

impl FromStr for Note {
    type Err = ParseKeyNameError;

    /// Parse note from string (e.g., "C", "C#", "Db", "F#")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        match upper.as_str() {
            "C" | "B#" | "BS" => Ok(Note::C),
            "C#" | "CS" | "DB" => Ok(Note::Cs),
            "D" => Ok(Note::D),
            "D#" | "DS" | "EB" => Ok(Note::Ds),
            "E" | "FB" => Ok(Note::E),
            "F" | "E#" | "ES" => Ok(Note::F),
            "F#" | "FS" | "GB" => Ok(Note::Fs),
            "G" => Ok(Note::G),
            "G#" | "GS" | "AB" => Ok(Note::Gs),
            "A" => Ok(Note::A),
            "A#" | "AS" | "BB" => Ok(Note::As),
            "B" | "CB" => Ok(Note::B),
            _ => Err(ParseKeyNameError::UnknownTonic(s.to_string())),
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sharp_name())
    }
}

/// Major or minor tonality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    Major,
    Minor,
}

impl Quality {
    /// The opposite quality
    pub fn flip(self) -> Self {
        match self {
            Quality::Major => Quality::Minor,
            Quality::Minor => Quality::Major,
        }
    }

    /// Get a human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Quality::Major => "Major",
            Quality::Minor => "Minor",
        }
    }
}

impl FromStr for Quality {
    type Err = ParseKeyNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-', '_'], "");
        match normalized.as_str() {
            "major" | "maj" | "ionian" => Ok(Quality::Major),
            "minor" | "min" | "m" | "aeolian" | "naturalminor" => Ok(Quality::Minor),
            _ => Err(ParseKeyNameError::UnknownQuality(s.to_string())),
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors from parsing note and key names
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseKeyNameError {
    #[error("empty key name")]
    Empty,
    #[error("unknown tonic {0:?}")]
    UnknownTonic(String),
    #[error("unknown key quality {0:?}")]
    UnknownQuality(String),
}

/// Compact suffixes accepted on single-token key names ("Am", "Ebmin")
const QUALITY_SUFFIXES: [(&str, Quality); 5] = [
    ("minor", Quality::Minor),
    ("major", Quality::Major),
    ("min", Quality::Minor),
    ("maj", Quality::Major),
    ("m", Quality::Minor),
];

/// A standard musical key: tonic pitch class plus quality.
///
/// Enharmonic spellings parse to the same value, so "C# Major" and
/// "Db Major" are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyName {
    tonic: Note,
    quality: Quality,
}

impl KeyName {
    /// Create a new key name
    pub fn new(tonic: Note, quality: Quality) -> Self {
        Self { tonic, quality }
    }

    /// Shorthand for a major key
    pub fn major(tonic: Note) -> Self {
        Self::new(tonic, Quality::Major)
    }

    /// Shorthand for a minor key
    pub fn minor(tonic: Note) -> Self {
        Self::new(tonic, Quality::Minor)
    }

    /// Get the tonic
    pub fn tonic(&self) -> Note {
        self.tonic
    }

    /// Get the quality
    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// Get the relative key (same key signature, opposite quality).
    ///
    /// C major -> A minor is a minor third down; the reverse is a minor
    /// third up.
    pub fn relative(&self) -> KeyName {
        match self.quality {
            Quality::Major => KeyName::minor(self.tonic.transpose(-3)),
            Quality::Minor => KeyName::major(self.tonic.transpose(3)),
        }
    }

    /// Get the parallel key (same tonic, opposite quality)
    pub fn parallel(&self) -> KeyName {
        KeyName::new(self.tonic, self.quality.flip())
    }

    /// Tonic spelled the way DJ software usually prints it
    fn tonic_spelling(&self) -> &'static str {
        match (self.quality, self.tonic) {
            (Quality::Major, Note::Ds | Note::Gs | Note::As) => self.tonic.flat_name(),
            _ => self.tonic.sharp_name(),
        }
    }

    fn parse_compact(token: &str) -> Result<Self, ParseKeyNameError> {
        let lower = token.to_ascii_lowercase();
        for (suffix, quality) in QUALITY_SUFFIXES {
            if lower.len() > suffix.len() && lower.ends_with(suffix) {
                let tonic_part = &token[..token.len() - suffix.len()];
                if let Ok(tonic) = tonic_part.parse::<Note>() {
                    return Ok(KeyName::new(tonic, quality));
                }
            }
        }
        Err(ParseKeyNameError::UnknownQuality(token.to_string()))
    }
}

impl FromStr for KeyName {
    type Err = ParseKeyNameError;

    /// Parse "C# Major", "Db major", "A Minor", "Am", "F#m", ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let first = tokens.next().ok_or(ParseKeyNameError::Empty)?;
        let rest: Vec<&str> = tokens.collect();

        if rest.is_empty() {
            return KeyName::parse_compact(first);
        }

        let tonic: Note = first.parse()?;
        let quality: Quality = rest.join(" ").parse()?;
        Ok(KeyName::new(tonic, quality))
    }
}

impl TryFrom<String> for KeyName {
    type Error = ParseKeyNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<KeyName> for String {
    fn from(key: KeyName) -> Self {
        key.to_string()
    }
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tonic_spelling(), self.quality)
    }
}
