// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Key and tempo read from embedded audio tags.
//!
//! DJ software (Mixed In Key, Rekordbox, Traktor, ...) writes the detected
//! key into the "initial key" frame, either as a Camelot code or as a key
//! name, and the tempo into the BPM frame.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use lofty::prelude::{ItemKey, TaggedFileExt};

use super::{Analyzer, TrackAnalysis};
use crate::camelot::KeyTable;

/// Analyzer that reads tags with `lofty`
pub struct TagAnalyzer {
    table: Arc<KeyTable>,
}

impl TagAnalyzer {
    pub fn new(table: Arc<KeyTable>) -> Self {
        Self { table }
    }
}

impl Analyzer for TagAnalyzer {
    fn analyze(&self, path: &Path) -> Result<TrackAnalysis> {
        let tagged_file = lofty::read_from_path(path)
            .with_context(|| format!("Failed to read tags from {:?}", path))?;

        let tag = match tagged_file.primary_tag().or_else(|| tagged_file.first_tag()) {
            Some(tag) => tag,
            None => return Ok(TrackAnalysis::unknown(path)),
        };

        let key_text = tag.get_string(&ItemKey::InitialKey);
        let bpm = tag
            .get_string(&ItemKey::Bpm)
            .or_else(|| tag.get_string(&ItemKey::IntegerBpm))
            .and_then(parse_bpm);

        Ok(TrackAnalysis::from_key_text(
            path,
            key_text,
            bpm,
            1.0,
            &self.table,
        ))
    }

    fn name(&self) -> &'static str {
        "tags"
    }
}

/// Parse BPM frame text such as "128", "127.98" or "128 BPM"
fn parse_bpm(text: &str) -> Option<f64> {
    text.split_whitespace()
        .next()
        .and_then(|number| number.replace(',', ".").parse::<f64>().ok())
        .filter(|bpm| bpm.is_finite() && *bpm > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bpm() {
        assert_eq!(parse_bpm("128"), Some(128.0));
        assert_eq!(parse_bpm("127.98"), Some(127.98));
        assert_eq!(parse_bpm("126,5"), Some(126.5));
        assert_eq!(parse_bpm("128 BPM"), Some(128.0));
        assert_eq!(parse_bpm("0"), None);
        assert_eq!(parse_bpm("fast"), None);
        assert_eq!(parse_bpm(""), None);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.mp3");

        let analyzer = TagAnalyzer::new(Arc::new(KeyTable::standard()));
        assert!(analyzer.analyze(&path).is_err());
    }
}
