// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Harmonic compatibility and wheel distance.

use super::{position_distance, CamelotCode};

impl CamelotCode {
    /// The relative key: same position, other ring (8A <-> 8B)
    pub fn relative(self) -> CamelotCode {
        self.flipped()
    }

    /// Check whether two keys can be mixed.
    ///
    /// Across rings only the relative key counts. On the same ring the
    /// raw position difference must be 0, 1 or 11, so 12 and 1 are
    /// neighbours but 8 and 12 are not.
    pub fn is_compatible_with(self, other: CamelotCode) -> bool {
        if self.mode() != other.mode() {
            return self.position() == other.position();
        }
        matches!(self.position().abs_diff(other.position()), 0 | 1 | 11)
    }

    /// The keys that mix with this one, in fixed order:
    /// one hour back, this key, one hour forward, the relative key.
    pub fn harmonic_neighbors(self) -> [CamelotCode; 4] {
        [
            self.counter_clockwise(),
            self,
            self.clockwise(),
            self.relative(),
        ]
    }

    /// Hours between two keys on the wheel (0-6).
    ///
    /// Keys on different rings always measure 0, whatever their
    /// positions. Use [`CamelotCode::harmonic_distance`] when the ring
    /// change should count.
    pub fn wheel_distance(self, other: CamelotCode) -> u8 {
        if self.mode() != other.mode() {
            return 0;
        }
        position_distance(self.position(), other.position())
    }

    /// Hours between two keys plus one step for a ring change (0-7)
    pub fn harmonic_distance(self, other: CamelotCode) -> u8 {
        let ring_change = u8::from(self.mode() != other.mode());
        position_distance(self.position(), other.position()) + ring_change
    }
}

/// Relative key of `code`
pub fn relative_of(code: CamelotCode) -> CamelotCode {
    code.relative()
}

/// Whether two keys can be mixed
pub fn are_compatible(a: CamelotCode, b: CamelotCode) -> bool {
    a.is_compatible_with(b)
}

pub fn harmonic_neighbors(code: CamelotCode) -> [CamelotCode; 4] {
    code.harmonic_neighbors()
}

pub fn wheel_distance(a: CamelotCode, b: CamelotCode) -> u8 {
    a.wheel_distance(b)
}
