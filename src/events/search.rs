// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Sampling and refinement primitives shared by the event searches.
//!
//! Everything here works on the signed offset `elevation − target`, so a
//! crossing is a sign change and an extremum is a turning point.

use crate::config::{HorizonReference, SearchConfig};
use crate::observer::Observer;
use crate::period::Period;
use crate::position::{self, coords, Body, Instant};
use crate::scales::UT;
use qtty::Days;
use tracing::trace;

/// Elevation of one body, for one observer, measured against a fixed level.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Profile<'a> {
    pub body: Body,
    pub observer: &'a Observer,
    pub horizon: HorizonReference,
    pub target_deg: f64,
}

impl Profile<'_> {
    pub fn elevation(&self, t: Instant) -> f64 {
        let geometric = position::horizontal(self.body, self.observer, t).elevation_deg;
        match self.horizon {
            HorizonReference::Geometric => geometric,
            HorizonReference::Apparent => coords::apparent_elevation(geometric),
        }
    }

    #[inline]
    pub fn offset(&self, t: Instant) -> f64 {
        self.elevation(t) - self.target_deg
    }
}

/// One coarse sample of the offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Sample {
    pub instant: Instant,
    pub offset: f64,
}

impl Sample {
    #[inline]
    pub fn is_above(&self) -> bool {
        self.offset >= 0.0
    }
}

/// A bracketed sign change between two consecutive samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Bracket {
    pub lo: Sample,
    pub hi: Sample,
}

impl Bracket {
    /// Below → above.
    pub fn is_rising(&self) -> bool {
        !self.lo.is_above() && self.hi.is_above()
    }
}

/// Sample the offset across `window` at `step`; the last sample lands
/// exactly on `window.end`.
pub(crate) fn sample(profile: &Profile<'_>, window: Period<UT>, step: Days) -> Vec<Sample> {
    let span = (window.end - window.start).value();
    let n = (span / step.value() - 1e-9).ceil().max(1.0) as usize;

    (0..=n)
        .map(|i| {
            let instant = if i == n {
                window.end
            } else {
                window.start + Days::new(step.value() * i as f64)
            };
            Sample {
                instant,
                offset: profile.offset(instant),
            }
        })
        .collect()
}

/// Every sign change in chronological order.
pub(crate) fn brackets(samples: &[Sample]) -> Vec<Bracket> {
    samples
        .windows(2)
        .filter(|w| w[0].is_above() != w[1].is_above())
        .map(|w| Bracket { lo: w[0], hi: w[1] })
        .collect()
}

/// Bisect a bracket down to the configured tolerance.
pub(crate) fn bisect(profile: &Profile<'_>, bracket: Bracket, config: &SearchConfig) -> Instant {
    let tolerance = config.tolerance().value();
    let (mut lo, mut hi) = (bracket.lo, bracket.hi);

    for iteration in 0..config.max_iterations {
        if (hi.instant - lo.instant).value() <= tolerance {
            break;
        }
        let instant = lo.instant.mean(hi.instant);
        let mid = Sample {
            instant,
            offset: profile.offset(instant),
        };
        trace!(iteration, t = instant.value(), offset = mid.offset, "bisect");
        if mid.is_above() == hi.is_above() {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    // Linear interpolation inside the final bracket.
    let span = hi.offset - lo.offset;
    if span.abs() > f64::EPSILON {
        let fraction = (-lo.offset / span).clamp(0.0, 1.0);
        lo.instant + Days::new((hi.instant - lo.instant).value() * fraction)
    } else {
        lo.instant.mean(hi.instant)
    }
}

/// Turning point to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Extremum {
    Maximum,
    Minimum,
}

/// Locate the sampled extremum and polish it with successive three-point
/// parabolic fits, halving the half-width each round. The result is
/// clamped to `window`.
pub(crate) fn extremum(
    profile: &Profile<'_>,
    samples: &[Sample],
    window: Period<UT>,
    kind: Extremum,
    config: &SearchConfig,
) -> Option<Instant> {
    let better = |a: f64, b: f64| match kind {
        Extremum::Maximum => a > b,
        Extremum::Minimum => a < b,
    };
    let best = samples
        .iter()
        .copied()
        .reduce(|acc, s| if better(s.offset, acc.offset) { s } else { acc })?;

    let tolerance = config.tolerance();
    let mut center = best.instant;
    let mut half = config.step();

    for iteration in 0..config.max_iterations {
        if half.value() <= tolerance.value() {
            break;
        }
        let f_minus = profile.offset(center - half);
        let f_zero = profile.offset(center);
        let f_plus = profile.offset(center + half);

        let curvature = f_minus - 2.0 * f_zero + f_plus;
        let shift = if curvature.abs() > f64::EPSILON {
            (0.5 * (f_minus - f_plus) / curvature).clamp(-1.0, 1.0)
        } else {
            0.0
        };
        center += Days::new(half.value() * shift);
        trace!(iteration, t = center.value(), shift, "parabolic step");
        half = Days::new(half.value() * 0.5);
    }

    Some(center.max(window.start).min(window.end))
}
