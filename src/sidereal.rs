// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Sidereal time.
//!
//! Greenwich mean sidereal time from the IAU 1982 expression (Meeus eq. 12.4)
//! evaluated on the UT axis, plus the equation of the equinoxes for apparent
//! sidereal time.

use crate::instant::Time;
use crate::math::{cos_deg, normalize_degrees};
use crate::scales::UT;

/// Greenwich mean sidereal time in degrees, `[0, 360)`.
pub fn gmst_deg(ut: Time<UT>) -> f64 {
    let d = ut.value();
    let t = ut.julian_centuries();
    normalize_degrees(
        280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t - t * t * t / 38_710_000.0,
    )
}

/// Greenwich apparent sidereal time in degrees.
///
/// `nutation_longitude_deg` and `true_obliquity_deg` come from the same
/// epoch's nutation model; their product is the equation of the equinoxes.
pub fn gast_deg(ut: Time<UT>, nutation_longitude_deg: f64, true_obliquity_deg: f64) -> f64 {
    normalize_degrees(gmst_deg(ut) + nutation_longitude_deg * cos_deg(true_obliquity_deg))
}

/// Local sidereal time: Greenwich sidereal time plus east longitude.
#[inline]
pub fn local_sidereal_deg(greenwich_deg: f64, longitude_deg: f64) -> f64 {
    normalize_degrees(greenwich_deg + longitude_deg)
}
