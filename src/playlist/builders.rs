// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Playlist builders over analyzed tracks.

use std::cmp::Ordering;

use tracing::{debug, info};

use super::{BpmRange, Playlist};
use crate::analysis::TrackAnalysis;
use crate::camelot::{generate_sequence, harmonic_path, CamelotCode, PathOutcome, Traversal};

fn label(track: &TrackAnalysis) -> String {
    track
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| track.path.display().to_string())
}

fn add(playlist: &mut Playlist, track: &TrackAnalysis) {
    debug!(
        track = %label(track),
        key = %track.camelot_label(),
        bpm = ?track.bpm,
        "added"
    );
    playlist.push(track.path.clone());
}

fn join_keys(keys: &[CamelotCode]) -> String {
    keys.iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(" > ")
}

/// Tracks that mix with `target` (any key when `None`) inside `bpm`.
///
/// Unknown keys are skipped. When a BPM range is given, tracks without
/// a tempo are skipped too.
pub fn compatible_playlist(
    tracks: &[TrackAnalysis],
    target: Option<CamelotCode>,
    bpm: Option<BpmRange>,
    max_songs: usize,
) -> Playlist {
    let mut playlist = Playlist::new()
        .with_comment("Playlist generated by camelot-organizer")
        .with_comment(format!(
            "Target Key: {}",
            target.map_or_else(|| "Any".to_string(), |t| t.to_string())
        ))
        .with_comment(format!(
            "BPM Range: {}",
            bpm.map_or_else(|| "Any".to_string(), |r| r.to_string())
        ));

    for track in tracks {
        if playlist.len() >= max_songs {
            break;
        }
        let Some(key) = track.camelot else {
            continue;
        };
        if let Some(target) = target {
            if !key.is_compatible_with(target) {
                continue;
            }
        }
        if let Some(range) = bpm {
            match track.bpm {
                Some(value) if range.contains(value) => {}
                _ => continue,
            }
        }
        add(&mut playlist, track);
    }

    info!(songs = playlist.len(), "compatible playlist built");
    playlist
}

/// Follow a generated key sequence, taking up to `max_per_key` tracks
/// for each distinct key. A track is never added twice.
pub fn sequence_playlist(
    tracks: &[TrackAnalysis],
    start: CamelotCode,
    length: usize,
    traversal: Traversal,
    max_per_key: usize,
) -> Playlist {
    let sequence = generate_sequence(start, length, traversal);
    let mut playlist = Playlist::new()
        .with_comment("Harmonic Sequence Playlist")
        .with_comment(format!("Sequence: {}", join_keys(&sequence)))
        .with_comment(format!("Direction: {}", traversal));

    for key in &sequence {
        let already = playlist_count(&playlist, tracks, *key);
        let picks: Vec<&TrackAnalysis> = tracks
            .iter()
            .filter(|t| t.camelot == Some(*key) && !playlist.contains(&t.path))
            .take(max_per_key.saturating_sub(already))
            .collect();
        for track in picks {
            add(&mut playlist, track);
        }
    }

    info!(songs = playlist.len(), sequence = %join_keys(&sequence), "sequence playlist built");
    playlist
}

/// Number of playlist entries whose track is in `key`
fn playlist_count(playlist: &Playlist, tracks: &[TrackAnalysis], key: CamelotCode) -> usize {
    tracks
        .iter()
        .filter(|t| t.camelot == Some(key) && playlist.contains(&t.path))
        .count()
}

/// Unknown tempo sorts after every known tempo
fn by_bpm(a: &&TrackAnalysis, b: &&TrackAnalysis) -> Ordering {
    match (a.bpm, b.bpm) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Move from `start` to `end` along a harmonic path, tracks within each
/// key ordered by tempo.
pub fn transition_playlist(
    tracks: &[TrackAnalysis],
    start: CamelotCode,
    end: CamelotCode,
    max_steps: usize,
    max_songs: usize,
) -> Playlist {
    let path = harmonic_path(start, end, max_steps);
    let mut playlist = Playlist::new()
        .with_comment("Key Transition Playlist")
        .with_comment(format!("Path: {}", path))
        .with_comment(format!("Start: {} > End: {}", start, end));
    // Snapping needs a stuck walk, which valid codes never produce
    if path.outcome() == PathOutcome::SnappedToTarget {
        playlist.comment("Final step is a direct jump, not a harmonic mix");
    } else if path.outcome() == PathOutcome::Unreached {
        playlist.comment(format!("Target {} not reached within {} steps", end, max_steps));
    }

    'keys: for key in path.keys() {
        let mut in_key: Vec<&TrackAnalysis> =
            tracks.iter().filter(|t| t.camelot == Some(*key)).collect();
        in_key.sort_by(by_bpm);

        for track in in_key {
            if playlist.len() >= max_songs {
                break 'keys;
            }
            add(&mut playlist, track);
        }
    }

    info!(
        songs = playlist.len(),
        path = %path,
        outcome = %path.outcome(),
        "transition playlist built"
    );
    playlist
}

/// Tracks within `radius` wheel steps of `center`, counting a ring
/// change as one step. Radius 1 gives the classic compatible set.
pub fn zone_playlist(
    tracks: &[TrackAnalysis],
    center: CamelotCode,
    radius: u8,
    max_songs: usize,
) -> Playlist {
    let mut playlist = Playlist::new()
        .with_comment("Camelot Zone Playlist")
        .with_comment(format!("Center: {}", center))
        .with_comment(format!("Zone Size: {}", radius));

    for track in tracks {
        if playlist.len() >= max_songs {
            break;
        }
        match track.camelot {
            Some(key) if center.harmonic_distance(key) <= radius => add(&mut playlist, track),
            _ => {}
        }
    }

    info!(songs = playlist.len(), %center, radius, "zone playlist built");
    playlist
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn code(text: &str) -> CamelotCode {
        text.parse().unwrap()
    }

    fn track(name: &str, key: Option<&str>, bpm: Option<f64>) -> TrackAnalysis {
        TrackAnalysis {
            path: PathBuf::from(format!("/music/{}", name)),
            key: None,
            camelot: key.map(code),
            bpm,
            confidence: 1.0,
        }
    }

    fn library() -> Vec<TrackAnalysis> {
        vec![
            track("a.mp3", Some("8A"), Some(124.0)),
            track("b.mp3", Some("9A"), Some(128.0)),
            track("c.mp3", Some("8B"), Some(122.0)),
            track("d.mp3", Some("5B"), Some(126.0)),
            track("e.mp3", None, Some(125.0)),
            track("f.mp3", Some("7A"), None),
            track("g.mp3", Some("8A"), Some(118.0)),
            track("h.mp3", Some("10A"), Some(127.0)),
        ]
    }

    fn names(playlist: &Playlist) -> Vec<String> {
        playlist
            .entries()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_compatible_playlist_filters_by_key() {
        let playlist = compatible_playlist(&library(), Some(code("8A")), None, 20);
        assert_eq!(names(&playlist), vec!["a.mp3", "b.mp3", "c.mp3", "f.mp3", "g.mp3"]);
        assert!(playlist.comments().contains(&"Target Key: 8A".to_string()));
    }

    #[test]
    fn test_compatible_playlist_filters_by_bpm() {
        let range = BpmRange::new(120.0, 126.0);
        let playlist = compatible_playlist(&library(), Some(code("8A")), Some(range), 20);
        assert_eq!(names(&playlist), vec!["a.mp3", "c.mp3"]);
    }

    #[test]
    fn test_compatible_playlist_any_key_skips_unknown() {
        let playlist = compatible_playlist(&library(), None, None, 20);
        assert_eq!(playlist.len(), 7);
        assert!(!names(&playlist).contains(&"e.mp3".to_string()));
    }

    #[test]
    fn test_compatible_playlist_limit() {
        let playlist = compatible_playlist(&library(), None, None, 2);
        assert_eq!(names(&playlist), vec!["a.mp3", "b.mp3"]);
    }

    #[test]
    fn test_sequence_playlist() {
        let playlist = sequence_playlist(&library(), code("8A"), 3, Traversal::Forward, 3);
        assert_eq!(names(&playlist), vec!["a.mp3", "g.mp3", "b.mp3", "h.mp3"]);
        assert!(playlist
            .comments()
            .contains(&"Sequence: 8A > 9A > 10A".to_string()));
    }

    #[test]
    fn test_sequence_playlist_per_key_limit_and_no_repeats() {
        let playlist = sequence_playlist(&library(), code("8A"), 4, Traversal::Zigzag, 1);
        assert_eq!(names(&playlist), vec!["a.mp3", "c.mp3"]);

        let playlist = sequence_playlist(&library(), code("8A"), 4, Traversal::Zigzag, 3);
        assert_eq!(names(&playlist), vec!["a.mp3", "g.mp3", "c.mp3"]);
    }

    #[test]
    fn test_transition_playlist_orders_by_bpm() {
        let playlist = transition_playlist(&library(), code("8A"), code("10A"), 12, 30);
        assert_eq!(names(&playlist), vec!["g.mp3", "a.mp3", "b.mp3", "h.mp3"]);
        assert!(playlist
            .comments()
            .contains(&"Path: 8A > 9A > 10A".to_string()));
    }

    #[test]
    fn test_transition_playlist_limit() {
        let playlist = transition_playlist(&library(), code("8A"), code("10A"), 12, 3);
        assert_eq!(names(&playlist), vec!["g.mp3", "a.mp3", "b.mp3"]);
    }

    #[test]
    fn test_transition_unknown_bpm_last() {
        let tracks = vec![
            track("x.mp3", Some("7A"), None),
            track("y.mp3", Some("7A"), Some(100.0)),
        ];
        let playlist = transition_playlist(&tracks, code("7A"), code("7A"), 12, 10);
        assert_eq!(names(&playlist), vec!["y.mp3", "x.mp3"]);
    }

    #[test]
    fn test_zone_playlist() {
        let playlist = zone_playlist(&library(), code("8A"), 1, 50);
        assert_eq!(names(&playlist), vec!["a.mp3", "b.mp3", "c.mp3", "f.mp3", "g.mp3"]);

        let wider = zone_playlist(&library(), code("8A"), 2, 50);
        assert_eq!(
            names(&wider),
            vec!["a.mp3", "b.mp3", "c.mp3", "f.mp3", "g.mp3", "h.mp3"]
        );
    }

    #[test]
    fn test_zone_radius_zero_is_exact_key() {
        let playlist = zone_playlist(&library(), code("8A"), 0, 50);
        assert_eq!(names(&playlist), vec!["a.mp3", "g.mp3"]);
    }
}
