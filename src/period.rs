// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time intervals and interval set algebra.
//!
//! - [`Interval<T>`]: half-open `[start, end)` over any [`TimeInstant`]
//! - [`Period<S>`]: alias for `Interval<Time<S>>`
//! - [`complement_within`] / [`intersect_periods`]: the two set operations the
//!   light-window code composes into "between two altitudes".

use crate::instant::{Time, TimeInstant, TimeScale};
use chrono::{DateTime, Utc};
use qtty::{Days, Second};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Interval between two instants, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval<T: TimeInstant> {
    pub start: T,
    pub end: T,
}

/// Time-scale period alias, e.g. `Period<UT>`.
pub type Period<S> = Interval<Time<S>>;

/// UTC interval alias.
pub type UtcPeriod = Interval<DateTime<Utc>>;

impl<T: TimeInstant> Interval<T> {
    /// Creates a new interval. No ordering check is made.
    pub fn new(start: T, end: T) -> Self {
        Interval { start, end }
    }

    /// `end − start`.
    pub fn duration(&self) -> T::Duration {
        self.end.difference(&self.start)
    }

    /// Whether `instant` lies in `[start, end)`.
    pub fn contains(&self, instant: T) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Returns the overlapping sub-interval, or `None` when the overlap is
    /// empty (touching endpoints do not overlap).
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = if self.start >= other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end <= other.end {
            self.end
        } else {
            other.end
        };

        if start < end {
            Some(Self::new(start, end))
        } else {
            None
        }
    }
}

impl<T: TimeInstant + fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

impl<S: TimeScale> Interval<Time<S>> {
    /// Length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.duration().to::<Second>().value()
    }

    /// Length in days.
    pub fn duration_days(&self) -> Days {
        self.duration()
    }

    /// Both endpoints as UTC timestamps, if representable.
    pub fn to_utc(&self) -> Option<UtcPeriod> {
        Some(Interval::new(self.start.to_utc()?, self.end.to_utc()?))
    }
}

/// Returns the gaps of `periods` within `outer`.
///
/// `periods` must be sorted and non-overlapping; single O(n) pass.
pub fn complement_within<T: TimeInstant>(
    outer: Interval<T>,
    periods: &[Interval<T>],
) -> Vec<Interval<T>> {
    let mut gaps = Vec::new();
    let mut cursor = outer.start;
    for p in periods {
        if p.start > cursor {
            gaps.push(Interval::new(cursor, p.start));
        }
        if p.end > cursor {
            cursor = p.end;
        }
    }
    if cursor < outer.end {
        gaps.push(Interval::new(cursor, outer.end));
    }
    gaps
}

/// Intersection of two sorted, non-overlapping interval lists (O(n+m) merge).
pub fn intersect_periods<T: TimeInstant>(a: &[Interval<T>], b: &[Interval<T>]) -> Vec<Interval<T>> {
    let mut result = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if let Some(overlap) = a[i].intersection(&b[j]) {
            result.push(overlap);
        }
        if a[i].end <= b[j].end {
            i += 1;
        } else {
            j += 1;
        }
    }
    result
}
