// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Camelot wheel harmonic engine and DJ library organizer.
//!
//! The [`camelot`] module is the pure core: key codes, compatibility,
//! path planning and sequences. Around it sit tag/manifest analysis,
//! key-folder organizing and M3U playlist building.

pub mod analysis;
pub mod camelot;
pub mod config;
pub mod library;
pub mod music;
pub mod playlist;

pub use analysis::{analyze_all, Analyzer, TrackAnalysis};
pub use camelot::{CamelotCode, HarmonicPath, KeyTable, Mode, PathOutcome, Traversal};
pub use config::Settings;
pub use music::{KeyName, Note, Quality};
pub use playlist::{BpmRange, Playlist};
