// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! M3U playlists built from analyzed tracks.
//!
//! Builders take tracks that have already been analyzed and pick and
//! order them using the Camelot wheel. The result is written as a plain
//! M3U file: `#EXTM3U`, a few `#` comment lines, then one path per line.

pub mod builders;

pub use builders::{compatible_playlist, sequence_playlist, transition_playlist, zone_playlist};

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inclusive tempo window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BpmRange {
    pub min: f64,
    pub max: f64,
}

impl BpmRange {
    /// Create a range, swapping the bounds if given backwards
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn contains(&self, bpm: f64) -> bool {
        bpm >= self.min && bpm <= self.max
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid BPM range {0:?} (expected MIN-MAX, e.g. 120-130)")]
pub struct ParseBpmRangeError(String);

impl FromStr for BpmRange {
    type Err = ParseBpmRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseBpmRangeError(s.to_string());
        let (min, max) = s.split_once('-').ok_or_else(err)?;
        let min: f64 = min.trim().parse().map_err(|_| err())?;
        let max: f64 = max.trim().parse().map_err(|_| err())?;
        if !min.is_finite() || !max.is_finite() {
            return Err(err());
        }
        Ok(BpmRange::new(min, max))
    }
}

impl fmt::Display for BpmRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// An ordered list of track paths with comment header lines
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Playlist {
    comments: Vec<String>,
    entries: Vec<PathBuf>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a comment line to the header
    pub fn comment(&mut self, text: impl Into<String>) {
        self.comments.push(text.into());
    }

    /// Builder-style [`Playlist::comment`]
    pub fn with_comment(mut self, text: impl Into<String>) -> Self {
        self.comment(text);
        self
    }

    pub fn push(&mut self, path: impl Into<PathBuf>) {
        self.entries.push(path.into());
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.iter().any(|p| p == path)
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as M3U text
    pub fn to_m3u(&self) -> String {
        let mut out = String::from("#EXTM3U\n");
        for comment in &self.comments {
            out.push_str("# ");
            out.push_str(comment);
            out.push('\n');
        }
        out.push('\n');
        for entry in &self.entries {
            out.push_str(&entry.to_string_lossy());
            out.push('\n');
        }
        out
    }

    /// Parse M3U text. Lines starting with `#` and blank lines are skipped;
    /// comment lines other than `#EXTM3U` and `#EXTINF` become header comments.
    pub fn parse(text: &str) -> Self {
        let mut playlist = Playlist::new();
        for line in text.lines().map(str::trim) {
            if line.is_empty() || line.starts_with("#EXT") {
                continue;
            }
            match line.strip_prefix('#') {
                Some(comment) => playlist.comment(comment.trim()),
                None => playlist.push(line),
            }
        }
        playlist
    }

    /// Write the playlist to `path`
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path.as_ref(), self.to_m3u())
            .with_context(|| format!("Failed to write playlist: {:?}", path.as_ref()))
    }

    /// Read a playlist from `path`
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read playlist: {:?}", path.as_ref()))?;
        Ok(Self::parse(&text))
    }
}
