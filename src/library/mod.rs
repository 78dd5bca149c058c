// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Audio library scanning and key-folder organizing.
//!
//! Files are found recursively, analyzed, and copied or moved into one
//! folder per Camelot code (`output/8A/`, `output/9B/`, ...).

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::analysis::{Analyzer, TrackAnalysis};
use crate::camelot::{CamelotCode, UNKNOWN};

/// Extensions scanned when none are configured
pub const DEFAULT_EXTENSIONS: [&str; 6] = ["mp3", "wav", "flac", "ogg", "m4a", "aiff"];

/// Whether organizing keeps the originals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferMode {
    #[default]
    Copy,
    Move,
}

/// Grouping key for analyzed tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyBin {
    Key(CamelotCode),
    Unknown,
}

impl KeyBin {
    pub fn of(analysis: &TrackAnalysis) -> Self {
        analysis.camelot.map_or(KeyBin::Unknown, KeyBin::Key)
    }
}

impl fmt::Display for KeyBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyBin::Key(code) => write!(f, "{}", code),
            KeyBin::Unknown => f.write_str(UNKNOWN),
        }
    }
}

/// Find audio files below `root`, sorted by path.
///
/// Extensions are matched case-insensitively and may be given with or
/// without the leading dot.
pub fn find_audio_files(root: &Path, extensions: &[String], follow_links: bool) -> Vec<PathBuf> {
    let wanted: Vec<String> = extensions
        .iter()
        .map(|e| e.trim_start_matches('.').to_lowercase())
        .collect();

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(follow_links)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("skipping unreadable entry: {}", err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_extension(path, &wanted))
        .collect();

    files.sort();
    files
}

fn has_extension(path: &Path, wanted: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| wanted.iter().any(|w| w.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// Group analyses by key, with an explicit Unknown bin
pub fn group_by_key(analyses: &[TrackAnalysis]) -> BTreeMap<KeyBin, Vec<TrackAnalysis>> {
    let mut bins: BTreeMap<KeyBin, Vec<TrackAnalysis>> = BTreeMap::new();
    for analysis in analyses {
        bins.entry(KeyBin::of(analysis))
            .or_default()
            .push(analysis.clone());
    }
    bins
}

/// File name with key and tempo appended, e.g. "Title (8A, 128 BPM).mp3"
pub fn tagged_file_name(path: &Path, analysis: &TrackAnalysis) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let bpm = analysis
        .bpm
        .map(|b| format!("{:.0}", b))
        .unwrap_or_else(|| "?".to_string());

    let mut name = format!("{} ({}, {} BPM)", stem, analysis.camelot_label(), bpm);
    if let Some(ext) = path.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    name
}

/// Copy `source` into `dest_dir` under its tagged file name, numbered
/// (`"Title (8A, 128 BPM) (2).mp3"`) if that name is taken
pub fn copy_with_metadata(
    source: &Path,
    dest_dir: &Path,
    analysis: &TrackAnalysis,
) -> Result<PathBuf> {
    let destination = unique_destination(dest_dir, &tagged_file_name(source, analysis));
    fs::copy(source, &destination)
        .with_context(|| format!("Failed to copy {:?} to {:?}", source, destination))?;
    Ok(destination)
}

/// A file that could not be organized
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrganizeFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of an organize run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrganizeReport {
    pub total_files: usize,
    pub organized: usize,
    /// File names placed per key folder
    pub by_key: BTreeMap<String, Vec<String>>,
    pub errors: Vec<OrganizeFailure>,
}

impl OrganizeReport {
    /// Keys that received at least one file
    pub fn keys(&self) -> Vec<&str> {
        self.by_key.keys().map(|k| k.as_str()).collect()
    }
}

/// Options for [`organize_by_key`]
#[derive(Debug, Clone, Copy, Default)]
pub struct OrganizeOptions {
    pub transfer: TransferMode,
    /// Append key and tempo to destination file names
    pub tag_file_names: bool,
}

/// Analyze `files` and place each one under `output/<camelot code>/`.
///
/// Files whose key is unknown are left where they are and reported as
/// errors. A failure on one file never stops the run.
pub fn organize_by_key(
    files: &[PathBuf],
    analyzer: &dyn Analyzer,
    output: &Path,
    options: OrganizeOptions,
) -> Result<OrganizeReport> {
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {:?}", output))?;

    let mut report = OrganizeReport {
        total_files: files.len(),
        ..Default::default()
    };

    info!(count = files.len(), output = %output.display(), "organizing audio files");

    for path in files {
        let analysis = match analyzer.analyze(path) {
            Ok(analysis) => analysis,
            Err(err) => {
                warn!(path = %path.display(), "analysis failed: {:#}", err);
                report.errors.push(OrganizeFailure {
                    path: path.clone(),
                    reason: format!("{:#}", err),
                });
                continue;
            }
        };

        let code = match analysis.camelot {
            Some(code) => code,
            None => {
                warn!(path = %path.display(), "could not detect key");
                report.errors.push(OrganizeFailure {
                    path: path.clone(),
                    reason: "Could not detect key".to_string(),
                });
                continue;
            }
        };

        match place_file(path, &analysis, output, code, options) {
            Ok(destination) => {
                let file_name = destination
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                info!("{} -> {}", file_name, code);
                report.organized += 1;
                report.by_key.entry(code.to_string()).or_default().push(file_name);
            }
            Err(err) => {
                warn!(path = %path.display(), "failed to organize: {:#}", err);
                report.errors.push(OrganizeFailure {
                    path: path.clone(),
                    reason: format!("{:#}", err),
                });
            }
        }
    }

    let keys = report.keys().join(", ");
    info!(
        total = report.total_files,
        organized = report.organized,
        errors = report.errors.len(),
        %keys,
        "organize finished"
    );

    Ok(report)
}

fn place_file(
    path: &Path,
    analysis: &TrackAnalysis,
    output: &Path,
    code: CamelotCode,
    options: OrganizeOptions,
) -> Result<PathBuf> {
    let key_folder = output.join(code.to_string());
    fs::create_dir_all(&key_folder)
        .with_context(|| format!("Failed to create key folder {:?}", key_folder))?;

    let file_name = if options.tag_file_names {
        tagged_file_name(path, analysis)
    } else {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("No file name in {:?}", path))?
    };
    let destination = unique_destination(&key_folder, &file_name);
    if destination.file_name() != Some(OsStr::new(&file_name)) {
        warn!(
            path = %path.display(),
            destination = %destination.display(),
            "name already taken in key folder, renaming"
        );
    }

    match options.transfer {
        TransferMode::Copy => {
            fs::copy(path, &destination)
                .with_context(|| format!("Failed to copy {:?} to {:?}", path, destination))?;
        }
        TransferMode::Move => move_file(path, &destination)?,
    }

    Ok(destination)
}

/// `folder/file_name`, or `folder/stem (n).ext` with the first free `n`
/// from 2 when that name is already taken
fn unique_destination(folder: &Path, file_name: &str) -> PathBuf {
    let first = folder.join(file_name);
    if !first.exists() {
        return first;
    }

    let name = Path::new(file_name);
    let stem = name
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = name.extension().map(|e| e.to_string_lossy().into_owned());

    (2u32..)
        .map(|n| match &ext {
            Some(ext) => folder.join(format!("{} ({}).{}", stem, n, ext)),
            None => folder.join(format!("{} ({})", stem, n)),
        })
        .find(|candidate| !candidate.exists())
        .unwrap_or(first)
}

#[cfg(unix)]
const CROSS_DEVICE_ERROR: i32 = 18; // EXDEV
#[cfg(windows)]
const CROSS_DEVICE_ERROR: i32 = 17; // ERROR_NOT_SAME_DEVICE
#[cfg(not(any(unix, windows)))]
const CROSS_DEVICE_ERROR: i32 = -1;

fn is_cross_device(err: &io::Error) -> bool {
    err.raw_os_error() == Some(CROSS_DEVICE_ERROR)
}

/// Rename, falling back to copy + remove only when the destination is on
/// another filesystem
fn move_file(from: &Path, to: &Path) -> Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(err) if is_cross_device(&err) => {
            debug!(
                from = %from.display(),
                to = %to.display(),
                "rename crosses devices, copying: {}",
                err
            );
            fs::copy(from, to).with_context(|| format!("Failed to copy {:?} to {:?}", from, to))?;
            fs::remove_file(from).with_context(|| format!("Failed to remove {:?}", from))
        }
        Err(err) => Err(err).with_context(|| format!("Failed to move {:?} to {:?}", from, to)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"audio").unwrap();
    }

    fn extensions() -> Vec<String> {
        DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
    }

    fn analysis(path: &str, key: Option<&str>, bpm: Option<f64>) -> TrackAnalysis {
        TrackAnalysis {
            path: PathBuf::from(path),
            key: None,
            camelot: key.map(|k| k.parse().unwrap()),
            bpm,
            confidence: 1.0,
        }
    }

    #[test]
    fn test_find_audio_files_recursive() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.mp3"));
        touch(&dir.path().join("sub/b.FLAC"));
        touch(&dir.path().join("sub/deeper/c.wav"));
        touch(&dir.path().join("notes.txt"));
        touch(&dir.path().join("cover.jpg"));

        let files = find_audio_files(dir.path(), &extensions(), false);
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.mp3", "b.FLAC", "c.wav"]);
    }

    #[test]
    fn test_find_audio_files_custom_extensions() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.mp3"));
        touch(&dir.path().join("b.ogg"));

        let files = find_audio_files(dir.path(), &[".ogg".to_string()], false);
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("b.ogg"));
    }

    #[test]
    fn test_group_by_key_has_unknown_bin() {
        let analyses = vec![
            analysis("a.mp3", Some("8A"), None),
            analysis("b.mp3", None, None),
            analysis("c.mp3", Some("8A"), None),
            analysis("d.mp3", Some("2B"), None),
        ];
        let bins = group_by_key(&analyses);
        assert_eq!(bins.len(), 3);
        assert_eq!(bins[&KeyBin::Key("8A".parse().unwrap())].len(), 2);
        assert_eq!(bins[&KeyBin::Unknown].len(), 1);

        let labels: Vec<String> = bins.keys().map(|b| b.to_string()).collect();
        assert_eq!(labels, vec!["2B", "8A", "Unknown"]);
    }

    #[test]
    fn test_tagged_file_name() {
        let a = analysis("x", Some("8A"), Some(127.6));
        assert_eq!(
            tagged_file_name(Path::new("/music/My Song.mp3"), &a),
            "My Song (8A, 128 BPM).mp3"
        );

        let unknown = analysis("x", None, None);
        assert_eq!(
            tagged_file_name(Path::new("track.flac"), &unknown),
            "track (Unknown, ? BPM).flac"
        );
    }

    #[test]
    fn test_copy_with_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("song.mp3");
        touch(&source);
        let dest = dir.path().join("out");
        fs::create_dir_all(&dest).unwrap();

        let song = analysis("song.mp3", Some("5B"), Some(120.0));
        let copied = copy_with_metadata(&source, &dest, &song).unwrap();
        assert!(copied.ends_with("song (5B, 120 BPM).mp3"));
        assert!(copied.exists());
        assert!(source.exists());
    }

    #[test]
    fn test_move_file() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("a.mp3");
        let to = dir.path().join("b.mp3");
        touch(&from);

        move_file(&from, &to).unwrap();
        assert!(!from.exists());
        assert!(to.exists());

        assert!(move_file(&from, &to).is_err());
    }

    #[test]
    fn test_only_cross_device_errors_fall_back_to_copy() {
        let exdev = io::Error::from_raw_os_error(CROSS_DEVICE_ERROR);
        assert!(is_cross_device(&exdev));

        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        assert!(!is_cross_device(&denied));
    }

    /// Gives every file the same key
    struct SameKey(&'static str);

    impl Analyzer for SameKey {
        fn analyze(&self, path: &Path) -> Result<TrackAnalysis> {
            Ok(TrackAnalysis {
                path: path.to_path_buf(),
                key: None,
                camelot: self.0.parse().ok(),
                bpm: None,
                confidence: 1.0,
            })
        }

        fn name(&self) -> &'static str {
            "same-key"
        }
    }

    #[test]
    fn test_organize_keeps_files_with_the_same_name() {
        let source = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let first = source.path().join("a/track.mp3");
        let second = source.path().join("b/track.mp3");
        touch(&first);
        touch(&second);
        fs::write(&first, b"FIRST").unwrap();
        fs::write(&second, b"SECOND").unwrap();

        let files = find_audio_files(source.path(), &extensions(), false);
        let options = OrganizeOptions {
            transfer: TransferMode::Move,
            tag_file_names: false,
        };
        let report = organize_by_key(&files, &SameKey("8A"), output.path(), options).unwrap();

        assert_eq!(report.organized, 2);
        assert!(report.errors.is_empty());
        assert_eq!(report.by_key["8A"], vec!["track.mp3", "track (2).mp3"]);

        let folder = output.path().join("8A");
        assert_eq!(fs::read(folder.join("track.mp3")).unwrap(), b"FIRST");
        assert_eq!(fs::read(folder.join("track (2).mp3")).unwrap(), b"SECOND");
        assert!(!first.exists());
        assert!(!second.exists());
    }

    #[test]
    fn test_unique_destination_numbers_taken_names() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(unique_destination(dir.path(), "song.mp3"), dir.path().join("song.mp3"));

        touch(&dir.path().join("song.mp3"));
        touch(&dir.path().join("song (2).mp3"));
        assert_eq!(
            unique_destination(dir.path(), "song.mp3"),
            dir.path().join("song (3).mp3")
        );

        touch(&dir.path().join("README"));
        assert_eq!(unique_destination(dir.path(), "README"), dir.path().join("README (2)"));
    }

    #[test]
    fn test_copy_with_metadata_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("song.mp3");
        touch(&source);
        let dest = dir.path().join("out");
        fs::create_dir_all(&dest).unwrap();

        let song = analysis("song.mp3", Some("5B"), Some(120.0));
        let first = copy_with_metadata(&source, &dest, &song).unwrap();
        let second = copy_with_metadata(&source, &dest, &song).unwrap();
        assert_ne!(first, second);
        assert!(second.ends_with("song (5B, 120 BPM) (2).mp3"));
    }
}
