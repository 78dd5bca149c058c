// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! String entry points that never fail on bad key data.
//!
//! Keys come from fallible analysis, so malformed text is ordinary input
//! here. Each function degrades to a defined value instead: `None`,
//! `false`, an empty list, or a list holding only the input.

use super::path::{self, PathOutcome};
use super::sequence::{self, Traversal};
use super::CamelotCode;

fn to_strings(codes: impl IntoIterator<Item = CamelotCode>) -> Vec<String> {
    codes.into_iter().map(|c| c.to_string()).collect()
}

/// Relative key text, `None` when `code` is malformed
pub fn relative_of(code: &str) -> Option<String> {
    CamelotCode::parse(code).map(|c| c.relative().to_string())
}

/// `false` when either side is malformed
pub fn are_compatible(a: &str, b: &str) -> bool {
    match (CamelotCode::parse(a), CamelotCode::parse(b)) {
        (Some(a), Some(b)) => a.is_compatible_with(b),
        _ => false,
    }
}

/// Empty when `code` is malformed
pub fn harmonic_neighbors(code: &str) -> Vec<String> {
    CamelotCode::parse(code)
        .map(|c| to_strings(c.harmonic_neighbors()))
        .unwrap_or_default()
}

pub fn wheel_distance(a: &str, b: &str) -> Option<u8> {
    Some(CamelotCode::parse(a)?.wheel_distance(CamelotCode::parse(b)?))
}

/// Path text plus outcome; malformed input yields `[start]`, unreached
pub fn harmonic_path(start: &str, end: &str, max_steps: usize) -> (Vec<String>, PathOutcome) {
    match (CamelotCode::parse(start), CamelotCode::parse(end)) {
        (Some(from), Some(to)) => {
            let path = path::harmonic_path(from, to, max_steps);
            let outcome = path.outcome();
            (to_strings(path.into_keys()), outcome)
        }
        _ => (vec![start.to_string()], PathOutcome::Unreached),
    }
}

/// Empty for `length == 0`; `[start]` when `start` is malformed
pub fn generate_sequence(start: &str, length: usize, traversal: Traversal) -> Vec<String> {
    if length == 0 {
        return Vec::new();
    }
    match CamelotCode::parse(start) {
        Some(code) => to_strings(sequence::generate_sequence(code, length, traversal)),
        None => vec![start.to_string()],
    }
}

/// Empty for `length == 0`; `[start]` when `start` is malformed
pub fn relative_chain(start: &str, length: usize) -> Vec<String> {
    if length == 0 {
        return Vec::new();
    }
    match CamelotCode::parse(start) {
        Some(code) => to_strings(sequence::relative_chain(code, length)),
        None => vec![start.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_of() {
        assert_eq!(relative_of("8A"), Some("8B".to_string()));
        assert_eq!(relative_of("12B"), Some("12A".to_string()));
        assert_eq!(relative_of("8"), None);
        assert_eq!(relative_of("XY"), None);
    }

    #[test]
    fn test_are_compatible_text() {
        assert!(are_compatible("8A", "7A"));
        assert!(!are_compatible("8A", "12A"));
        assert!(!are_compatible("X", "8A"));
        assert!(!are_compatible("8A", "Unknown"));
        assert!(!are_compatible("13A", "1A"));
    }

    #[test]
    fn test_neighbors_text() {
        assert_eq!(harmonic_neighbors("8A"), vec!["7A", "8A", "9A", "8B"]);
        assert!(harmonic_neighbors("8").is_empty());
    }

    #[test]
    fn test_wheel_distance_text() {
        assert_eq!(wheel_distance("8A", "1A"), Some(5));
        assert_eq!(wheel_distance("8A", ""), None);
    }

    #[test]
    fn test_path_text() {
        let (keys, outcome) = harmonic_path("8A", "8B", 12);
        assert_eq!(keys, vec!["8A", "8B"]);
        assert_eq!(outcome, PathOutcome::Reached);

        let (keys, outcome) = harmonic_path("Z", "8B", 12);
        assert_eq!(keys, vec!["Z"]);
        assert_eq!(outcome, PathOutcome::Unreached);

        let (keys, _) = harmonic_path("8A", "8", 12);
        assert_eq!(keys, vec!["8A"]);
    }

    #[test]
    fn test_sequence_text() {
        assert_eq!(
            generate_sequence("8A", 4, Traversal::Forward),
            vec!["8A", "9A", "10A", "11A"]
        );
        assert_eq!(generate_sequence("", 4, Traversal::Forward), vec![""]);
        assert!(generate_sequence("", 0, Traversal::Forward).is_empty());
        assert!(generate_sequence("8A", 0, Traversal::Zigzag).is_empty());
    }

    #[test]
    fn test_relative_chain_text() {
        assert_eq!(relative_chain("8A", 3), vec!["8A", "8B", "8A"]);
        assert_eq!(relative_chain("8", 4), vec!["8"]);
        assert!(relative_chain("8A", 0).is_empty());
    }

    #[test]
    fn test_repeated_calls_agree() {
        assert_eq!(harmonic_path("3B", "10A", 12), harmonic_path("3B", "10A", 12));
        assert_eq!(
            generate_sequence("7B", 6, Traversal::Backward),
            generate_sequence("7B", 6, Traversal::Backward)
        );
    }
}
