// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Degree helpers.
//!
//! The series in this crate are tabulated in degrees, so trigonometry is done
//! through these wrappers rather than converting at every call site.

/// Wrap an angle into `[0, 360)`.
#[inline]
pub fn normalize_degrees(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can return exactly 360.0 for tiny negative inputs.
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Wrap an angle into `(-180, 180]`.
#[inline]
pub fn signed_degrees(deg: f64) -> f64 {
    let r = normalize_degrees(deg);
    if r > 180.0 {
        r - 360.0
    } else {
        r
    }
}

#[inline]
pub(crate) fn sin_deg(deg: f64) -> f64 {
    deg.to_radians().sin()
}

#[inline]
pub(crate) fn cos_deg(deg: f64) -> f64 {
    deg.to_radians().cos()
}

#[inline]
pub(crate) fn tan_deg(deg: f64) -> f64 {
    deg.to_radians().tan()
}

/// `asin` in degrees, with the argument clamped to `[-1, 1]`.
#[inline]
pub(crate) fn asin_deg(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).asin().to_degrees()
}

#[inline]
pub(crate) fn atan2_deg(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees()
}

/// Degrees from arc-seconds.
#[inline]
pub(crate) fn arcsec(value: f64) -> f64 {
    value / 3600.0
}
