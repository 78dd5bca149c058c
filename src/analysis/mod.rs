// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Track analysis seam.
//!
//! Key and tempo detection is not done here. An [`Analyzer`] supplies the
//! key and BPM of a file from somewhere else: embedded tags written by DJ
//! software ([`TagAnalyzer`]) or a YAML manifest produced by an external
//! analysis run ([`ManifestAnalyzer`]).

pub mod manifest;
pub mod tags;

pub use manifest::{ManifestAnalyzer, ManifestEntry, ManifestFile};
pub use tags::TagAnalyzer;

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::camelot::{CamelotCode, KeyTable};
use crate::music::KeyName;

/// What is known about one audio file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackAnalysis {
    /// File the analysis belongs to
    pub path: PathBuf,
    /// Key name, when the source gave one
    #[serde(default)]
    pub key: Option<KeyName>,
    /// Camelot code, `None` when the key is unknown
    #[serde(default)]
    pub camelot: Option<CamelotCode>,
    /// Tempo in beats per minute
    #[serde(default)]
    pub bpm: Option<f64>,
    /// Confidence in the key (0.0 - 1.0)
    #[serde(default)]
    pub confidence: f32,
}

impl TrackAnalysis {
    /// An analysis with nothing known
    pub fn unknown(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            key: None,
            camelot: None,
            bpm: None,
            confidence: 0.0,
        }
    }

    /// Build an analysis from free-form key text ("8A", "A Minor", "Am")
    pub fn from_key_text(
        path: impl Into<PathBuf>,
        key_text: Option<&str>,
        bpm: Option<f64>,
        confidence: f32,
        table: &KeyTable,
    ) -> Self {
        let camelot = key_text.and_then(|text| table.resolve(text));
        let key = key_text
            .and_then(|text| text.trim().parse::<KeyName>().ok())
            .or_else(|| camelot.and_then(|code| table.key_name(code)));

        Self {
            path: path.into(),
            key,
            camelot,
            bpm: bpm.filter(|b| b.is_finite() && *b > 0.0),
            confidence: if camelot.is_some() {
                confidence.clamp(0.0, 1.0)
            } else {
                0.0
            },
        }
    }

    /// True when the key could not be determined
    pub fn is_unknown(&self) -> bool {
        self.camelot.is_none()
    }

    /// Camelot code text, or "Unknown"
    pub fn camelot_label(&self) -> String {
        self.camelot
            .map(|c| c.to_string())
            .unwrap_or_else(|| crate::camelot::UNKNOWN.to_string())
    }
}

/// Source of key and tempo information for audio files
pub trait Analyzer: Send + Sync {
    /// Analyze a single file
    fn analyze(&self, path: &Path) -> Result<TrackAnalysis>;

    /// Name used in log output
    fn name(&self) -> &'static str;
}

/// Analyze every file, turning failures into unknown analyses.
///
/// A failed file never aborts the batch; the error is logged and the
/// file lands in the "Unknown" bin.
pub fn analyze_all(files: &[PathBuf], analyzer: &dyn Analyzer) -> Vec<TrackAnalysis> {
    files
        .iter()
        .map(|path| match analyzer.analyze(path) {
            Ok(analysis) => {
                debug!(
                    path = %path.display(),
                    key = %analysis.camelot_label(),
                    bpm = ?analysis.bpm,
                    "analyzed"
                );
                analysis
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    analyzer = analyzer.name(),
                    "analysis failed: {:#}",
                    err
                );
                TrackAnalysis::unknown(path)
            }
        })
        .collect()
}
