// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Deterministic key sequences for DJ sets.

use std::fmt;
use std::iter;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::CamelotCode;

/// How a sequence moves around the wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Traversal {
    /// One hour clockwise per step, same ring
    #[default]
    Forward,
    /// One hour counter-clockwise per step, same ring
    Backward,
    /// Same position, switching ring every step
    Zigzag,
}

impl Traversal {
    /// The key that follows `code`
    pub fn step(self, code: CamelotCode) -> CamelotCode {
        match self {
            Traversal::Forward => code.clockwise(),
            Traversal::Backward => code.counter_clockwise(),
            Traversal::Zigzag => code.flipped(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Traversal::Forward => "forward",
            Traversal::Backward => "backward",
            Traversal::Zigzag => "zigzag",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown traversal {0:?} (expected forward, backward or zigzag)")]
pub struct ParseTraversalError(String);

impl FromStr for Traversal {
    type Err = ParseTraversalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-', '_'], "");
        match normalized.as_str() {
            "forward" | "clockwise" | "cw" => Ok(Traversal::Forward),
            "backward" | "counterclockwise" | "ccw" => Ok(Traversal::Backward),
            "zigzag" => Ok(Traversal::Zigzag),
            _ => Err(ParseTraversalError(s.to_string())),
        }
    }
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `length` keys starting at `start`, each one step after the previous
pub fn generate_sequence(
    start: CamelotCode,
    length: usize,
    traversal: Traversal,
) -> Vec<CamelotCode> {
    iter::successors(Some(start), |&code| Some(traversal.step(code)))
        .take(length)
        .collect()
}

/// `length` keys alternating between `start` and its relative key
pub fn relative_chain(start: CamelotCode, length: usize) -> Vec<CamelotCode> {
    iter::successors(Some(start), |&code| Some(code.relative()))
        .take(length)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(text: &str) -> CamelotCode {
        text.parse().unwrap()
    }

    fn codes(texts: &[&str]) -> Vec<CamelotCode> {
        texts.iter().map(|t| code(t)).collect()
    }

    #[test]
    fn test_forward() {
        assert_eq!(
            generate_sequence(code("8A"), 4, Traversal::Forward),
            codes(&["8A", "9A", "10A", "11A"])
        );
        assert_eq!(
            generate_sequence(code("11B"), 3, Traversal::Forward),
            codes(&["11B", "12B", "1B"])
        );
    }

    #[test]
    fn test_backward() {
        assert_eq!(
            generate_sequence(code("2A"), 4, Traversal::Backward),
            codes(&["2A", "1A", "12A", "11A"])
        );
    }

    #[test]
    fn test_zigzag() {
        assert_eq!(
            generate_sequence(code("8A"), 4, Traversal::Zigzag),
            codes(&["8A", "8B", "8A", "8B"])
        );
    }

    #[test]
    fn test_zero_length_is_empty() {
        assert!(generate_sequence(code("8A"), 0, Traversal::Forward).is_empty());
        assert!(relative_chain(code("8A"), 0).is_empty());
    }

    #[test]
    fn test_full_lap_returns_home() {
        let lap = generate_sequence(code("5B"), 13, Traversal::Forward);
        assert_eq!(lap.first(), lap.last());
        for pair in lap.windows(2) {
            assert!(pair[0].is_compatible_with(pair[1]));
        }
    }

    #[test]
    fn test_relative_chain() {
        assert_eq!(
            relative_chain(code("8A"), 4),
            codes(&["8A", "8B", "8A", "8B"])
        );
        assert_eq!(relative_chain(code("3B"), 1), codes(&["3B"]));
    }

    #[test]
    fn test_traversal_from_str() {
        assert_eq!("forward".parse::<Traversal>(), Ok(Traversal::Forward));
        assert_eq!("Backward".parse::<Traversal>(), Ok(Traversal::Backward));
        assert_eq!("counter-clockwise".parse::<Traversal>(), Ok(Traversal::Backward));
        assert_eq!("zigzag".parse::<Traversal>(), Ok(Traversal::Zigzag));
        assert!("sideways".parse::<Traversal>().is_err());
    }
}
