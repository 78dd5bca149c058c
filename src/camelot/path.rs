// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Greedy harmonic path search across the wheel.
//!
//! From the start key the planner repeatedly steps to the unvisited
//! neighbour whose position is closest to the target. Ties go to the
//! neighbour listed first by [`CamelotCode::harmonic_neighbors`]. If the
//! target is not reached and there is room left, the target is appended
//! directly; that final hop is not harmonic and is reported through
//! [`PathOutcome::SnappedToTarget`].

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{position_distance, CamelotCode};

/// Default step budget for a path search
pub const DEFAULT_MAX_STEPS: usize = 12;

/// How a path search ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathOutcome {
    /// Every hop is between compatible keys
    Reached,
    /// The last hop jumps straight to the target
    SnappedToTarget,
    /// The step budget ran out before the target
    Unreached,
}

impl fmt::Display for PathOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            PathOutcome::Reached => "reached",
            PathOutcome::SnappedToTarget => "snapped to target",
            PathOutcome::Unreached => "unreached",
        };
        f.write_str(text)
    }
}

/// An ordered walk over the wheel, always starting at the start key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarmonicPath {
    keys: Vec<CamelotCode>,
    outcome: PathOutcome,
}

impl HarmonicPath {
    /// Keys in walk order
    pub fn keys(&self) -> &[CamelotCode] {
        &self.keys
    }

    pub fn into_keys(self) -> Vec<CamelotCode> {
        self.keys
    }

    pub fn outcome(&self) -> PathOutcome {
        self.outcome
    }

    /// True when every hop is between compatible keys
    pub fn is_harmonic(&self) -> bool {
        self.outcome == PathOutcome::Reached
    }

    /// Number of keys in the walk (including the start)
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always false; a path holds at least its start key
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Consecutive key pairs
    pub fn transitions(&self) -> impl Iterator<Item = (CamelotCode, CamelotCode)> + '_ {
        self.keys.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

impl fmt::Display for HarmonicPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.keys.iter().map(|k| k.to_string()).collect();
        write!(f, "{}", names.join(" > "))
    }
}

/// Find a mixing path from `start` to `end` within `max_steps` hops
pub fn harmonic_path(start: CamelotCode, end: CamelotCode, max_steps: usize) -> HarmonicPath {
    let mut keys = vec![start];
    let mut current = start;

    for _ in 0..max_steps {
        if current == end {
            break;
        }

        let next = current
            .harmonic_neighbors()
            .into_iter()
            .filter(|candidate| !keys.contains(candidate))
            .min_by_key(|candidate| position_distance(candidate.position(), end.position()));

        match next {
            Some(step) => {
                keys.push(step);
                current = step;
            }
            None => {
                trace!(%current, %end, "no unvisited neighbour left");
                break;
            }
        }
    }

    let outcome = if current == end {
        PathOutcome::Reached
    } else if keys.len() < max_steps {
        // Only after getting stuck, which valid codes never do
        trace!(from = %current, to = %end, "snapping path to target");
        keys.push(end);
        PathOutcome::SnappedToTarget
    } else {
        PathOutcome::Unreached
    };

    HarmonicPath { keys, outcome }
}
