// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Settings for library scanning, organizing and playlist building.
//!
//! Settings load from YAML or TOML (chosen by file extension). Every
//! field has a default, so an empty file is a valid configuration.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::camelot::{Traversal, DEFAULT_MAX_STEPS};
use crate::library::{TransferMode, DEFAULT_EXTENSIONS};

/// Root settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Settings {
    #[serde(default)]
    pub library: LibrarySettings,
    #[serde(default)]
    pub organize: OrganizeSettings,
    #[serde(default)]
    pub playlist: PlaylistSettings,
}

impl Settings {
    /// Load settings from a YAML (.yaml/.yml) or TOML (.toml) file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {:?}", path))?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&contents),
            Some("yaml") | Some("yml") => Self::from_yaml(&contents),
            other => bail!("Unsupported settings format {:?} for {:?}", other, path),
        }
    }

    /// Parse settings from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).context("Failed to parse YAML settings")
    }

    /// Parse settings from TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML settings")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize settings to YAML")
    }

    /// Save settings to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write settings file: {:?}", path.as_ref()))
    }
}

/// Where to look for audio files
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LibrarySettings {
    /// File extensions treated as audio (without the dot)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Follow symbolic links while scanning
    #[serde(default)]
    pub follow_links: bool,
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            follow_links: false,
        }
    }
}

/// How files are placed into key folders
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OrganizeSettings {
    /// Copy (keeps originals) or move
    #[serde(default)]
    pub transfer: TransferMode,
    /// Append "(8A, 128 BPM)" to organized file names
    #[serde(default)]
    pub tag_file_names: bool,
}

/// Playlist builder limits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaylistSettings {
    /// Limit for compatible-key playlists
    #[serde(default = "default_max_songs")]
    pub max_songs: usize,
    /// Limit for key-to-key transition playlists
    #[serde(default = "default_transition_max_songs")]
    pub transition_max_songs: usize,
    /// Limit for zone playlists
    #[serde(default = "default_zone_max_songs")]
    pub zone_max_songs: usize,
    /// Tracks taken per key in sequence playlists
    #[serde(default = "default_max_songs_per_key")]
    pub max_songs_per_key: usize,
    /// Number of keys in a generated sequence
    #[serde(default = "default_sequence_length")]
    pub sequence_length: usize,
    #[serde(default)]
    pub traversal: Traversal,
    /// Zone radius in wheel steps (a ring change counts as one)
    #[serde(default = "default_zone_radius")]
    pub zone_radius: u8,
    /// Step budget for key-to-key paths
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

fn default_max_songs() -> usize {
    20
}
fn default_transition_max_songs() -> usize {
    30
}
fn default_zone_max_songs() -> usize {
    50
}
fn default_max_songs_per_key() -> usize {
    3
}
fn default_sequence_length() -> usize {
    8
}
fn default_zone_radius() -> u8 {
    1
}
fn default_max_steps() -> usize {
    DEFAULT_MAX_STEPS
}

impl Default for PlaylistSettings {
    fn default() -> Self {
        Self {
            max_songs: default_max_songs(),
            transition_max_songs: default_transition_max_songs(),
            zone_max_songs: default_zone_max_songs(),
            max_songs_per_key: default_max_songs_per_key(),
            sequence_length: default_sequence_length(),
            traversal: Traversal::default(),
            zone_radius: default_zone_radius(),
            max_steps: default_max_steps(),
        }
    }
}
