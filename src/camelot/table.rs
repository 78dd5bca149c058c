// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Lookup between standard key names and Camelot codes.
//!
//! The table is plain immutable data. Build it once with
//! [`KeyTable::standard`] and share it by reference or `Arc`.

use std::collections::HashMap;

use crate::music::{KeyName, Note, Quality};

use super::{CamelotCode, Mode};

/// Wheel positions of the 24 standard keys
const STANDARD_KEYS: [(Note, Quality, u8); 24] = [
    // Minor keys (A ring)
    (Note::Gs, Quality::Minor, 1),
    (Note::Ds, Quality::Minor, 2),
    (Note::As, Quality::Minor, 3),
    (Note::F, Quality::Minor, 4),
    (Note::C, Quality::Minor, 5),
    (Note::G, Quality::Minor, 6),
    (Note::D, Quality::Minor, 7),
    (Note::A, Quality::Minor, 8),
    (Note::E, Quality::Minor, 9),
    (Note::B, Quality::Minor, 10),
    (Note::Fs, Quality::Minor, 11),
    (Note::Cs, Quality::Minor, 12),
    // Major keys (B ring)
    (Note::B, Quality::Major, 1),
    (Note::Fs, Quality::Major, 2),
    (Note::Cs, Quality::Major, 3),
    (Note::Gs, Quality::Major, 4),
    (Note::Ds, Quality::Major, 5),
    (Note::As, Quality::Major, 6),
    (Note::F, Quality::Major, 7),
    (Note::C, Quality::Major, 8),
    (Note::G, Quality::Major, 9),
    (Note::D, Quality::Major, 10),
    (Note::A, Quality::Major, 11),
    (Note::E, Quality::Major, 12),
];

/// A major key and the minor key sharing its key signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelativePair {
    pub major: KeyName,
    pub minor: KeyName,
}

impl RelativePair {
    /// The other half of the pair, if `key` belongs to it
    pub fn other(&self, key: KeyName) -> Option<KeyName> {
        if key == self.major {
            Some(self.minor)
        } else if key == self.minor {
            Some(self.major)
        } else {
            None
        }
    }
}

/// Bidirectional key name <-> Camelot code table
#[derive(Debug, Clone)]
pub struct KeyTable {
    codes: HashMap<KeyName, CamelotCode>,
    names: HashMap<CamelotCode, KeyName>,
    relatives: Vec<RelativePair>,
}

impl KeyTable {
    /// The table for the 24 standard major and minor keys
    pub fn standard() -> Self {
        let mut codes = HashMap::with_capacity(STANDARD_KEYS.len());
        let mut names = HashMap::with_capacity(STANDARD_KEYS.len());

        for (tonic, quality, position) in STANDARD_KEYS {
            let key = KeyName::new(tonic, quality);
            if let Some(code) = CamelotCode::new(position, Mode::from(quality)) {
                codes.insert(key, code);
                names.insert(code, key);
            }
        }

        let relatives = STANDARD_KEYS
            .iter()
            .filter(|(_, quality, _)| *quality == Quality::Major)
            .map(|&(tonic, _, _)| {
                let major = KeyName::major(tonic);
                RelativePair {
                    major,
                    minor: major.relative(),
                }
            })
            .collect();

        Self {
            codes,
            names,
            relatives,
        }
    }

    /// Camelot code for a key
    pub fn lookup(&self, key: KeyName) -> Option<CamelotCode> {
        self.codes.get(&key).copied()
    }

    /// Camelot code for key name text such as "C Major" or "F#m".
    ///
    /// Returns `None` for anything that is not a known key name.
    pub fn lookup_camelot(&self, name: &str) -> Option<CamelotCode> {
        name.parse::<KeyName>().ok().and_then(|key| self.lookup(key))
    }

    /// Key name for a Camelot code
    pub fn key_name(&self, code: CamelotCode) -> Option<KeyName> {
        self.names.get(&code).copied()
    }

    /// Relative key from the relative-pair table
    pub fn relative_key(&self, key: KeyName) -> Option<KeyName> {
        self.relatives.iter().find_map(|pair| pair.other(key))
    }

    pub fn relative_pairs(&self) -> &[RelativePair] {
        &self.relatives
    }

    /// Accept either a Camelot code ("8A") or a key name ("A Minor")
    pub fn resolve(&self, text: &str) -> Option<CamelotCode> {
        let text = text.trim();
        CamelotCode::parse(text).or_else(|| self.lookup_camelot(text))
    }

    /// Number of keys in the table
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for KeyTable {
    fn default() -> Self {
        Self::standard()
    }
}
