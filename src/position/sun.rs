// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Low-precision solar coordinates (Meeus ch. 25).
//!
//! Mean longitude and mean anomaly with a three-term equation of centre.
//! Accurate to ≈ 0.01° in apparent longitude between 1950 and 2050.

use super::coords::{Ecliptic, Nutation};
use crate::math::{cos_deg, normalize_degrees, sin_deg};

/// Astronomical unit in km.
pub(crate) const AU_KM: f64 = 149_597_870.7;

/// Annual aberration constant, degrees (20.4898″).
const ABERRATION_DEG: f64 = 20.4898 / 3600.0;

/// Apparent geocentric ecliptic coordinates of the Sun.
///
/// `t` is Julian centuries (TT) since J2000.0.
pub(crate) fn sun_ecliptic(t: f64, nutation: &Nutation) -> Ecliptic {
    let l0 = normalize_degrees(280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t);
    let m = normalize_degrees(357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t);
    let e = 0.016_708_634 - 0.000_042_037 * t - 0.000_000_126_7 * t * t;

    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * sin_deg(m)
        + (0.019_993 - 0.000_101 * t) * sin_deg(2.0 * m)
        + 0.000_289 * sin_deg(3.0 * m);

    let true_longitude = l0 + c;
    let true_anomaly = m + c;
    let radius_au = 1.000_001_018 * (1.0 - e * e) / (1.0 + e * cos_deg(true_anomaly));

    // Aberration scales with 1/R; nutation moves the equinox.
    let longitude = true_longitude - ABERRATION_DEG / radius_au + nutation.longitude_deg;

    Ecliptic {
        longitude_deg: normalize_degrees(longitude),
        latitude_deg: 0.0,
        distance_km: radius_au * AU_KM,
    }
}
