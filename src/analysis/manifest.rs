// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Analysis results read from a YAML manifest.
//!
//! ```yaml
//! tracks:
//!   - file: "Artist - Title.mp3"
//!     key: "8A"
//!     bpm: 124
//!     confidence: 0.82
//!   - file: "/music/other.flac"
//!     key: "F# Minor"
//! ```
//!
//! Entries match a file by its full path first, then by file name.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use super::{Analyzer, TrackAnalysis};
use crate::camelot::KeyTable;

/// Root of a manifest file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ManifestFile {
    #[serde(default)]
    pub tracks: Vec<ManifestEntry>,
}

impl ManifestFile {
    /// Load a manifest from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read manifest file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse a manifest from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse analysis manifest")
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize analysis manifest")
    }
}

/// One analyzed file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManifestEntry {
    /// Path or file name of the track
    pub file: String,
    /// Camelot code or key name
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub bpm: Option<f64>,
    #[serde(default = "default_confidence")]
    pub confidence: f32,
}

fn default_confidence() -> f32 {
    1.0
}

/// Analyzer backed by a manifest
pub struct ManifestAnalyzer {
    entries: HashMap<String, ManifestEntry>,
    table: Arc<KeyTable>,
}

impl ManifestAnalyzer {
    pub fn new(manifest: ManifestFile, table: Arc<KeyTable>) -> Self {
        let entries = manifest
            .tracks
            .into_iter()
            .map(|entry| (entry.file.clone(), entry))
            .collect();
        Self { entries, table }
    }

    /// Load the manifest at `path`
    pub fn load<P: AsRef<Path>>(path: P, table: Arc<KeyTable>) -> Result<Self> {
        Ok(Self::new(ManifestFile::load(path)?, table))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_for(&self, path: &Path) -> Option<&ManifestEntry> {
        let full = path.to_string_lossy();
        self.entries.get(&*full).or_else(|| {
            let name = path.file_name()?.to_string_lossy();
            self.entries.get(&*name)
        })
    }
}

impl Analyzer for ManifestAnalyzer {
    fn analyze(&self, path: &Path) -> Result<TrackAnalysis> {
        let entry = self
            .entry_for(path)
            .ok_or_else(|| anyhow!("No manifest entry for {:?}", path))?;

        Ok(TrackAnalysis::from_key_text(
            path,
            entry.key.as_deref(),
            entry.bpm,
            entry.confidence,
            &self.table,
        ))
    }

    fn name(&self) -> &'static str {
        "manifest"
    }
}
