// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Coordinate transforms shared by the solar and lunar series.
//!
//! ecliptic (λ, β) → equatorial (α, δ) → horizontal (A, h), with the
//! nutation, parallax and refraction corrections applied along the way.

use crate::math::{
    arcsec, asin_deg, atan2_deg, cos_deg, normalize_degrees, sin_deg, tan_deg,
};

/// Equatorial radius of the Earth in km, for horizontal parallax.
const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6_378.14;

/// Geometric elevation below which no refraction is applied.
pub(crate) const REFRACTION_CUTOFF_DEG: f64 = -0.5;

/// Geocentric ecliptic coordinates of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Ecliptic {
    pub longitude_deg: f64,
    pub latitude_deg: f64,
    pub distance_km: f64,
}

/// Geocentric equatorial coordinates of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Equatorial {
    pub right_ascension_deg: f64,
    pub declination_deg: f64,
    pub distance_km: f64,
}

/// Local horizontal coordinates, geometric (no refraction).
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Horizontal {
    /// From true north, clockwise, `[0, 360)`.
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
}

/// Nutation in longitude and obliquity, degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Nutation {
    pub longitude_deg: f64,
    pub obliquity_deg: f64,
}

/// Four-term nutation (Meeus ch. 22, ≈ 0.5″ accuracy).
pub(crate) fn nutation(t: f64) -> Nutation {
    let omega = 125.044_52 - 1_934.136_261 * t;
    let l_sun = 280.466_5 + 36_000.769_8 * t;
    let l_moon = 218.316_5 + 481_267.881_3 * t;

    let dpsi = -17.20 * sin_deg(omega) - 1.32 * sin_deg(2.0 * l_sun) - 0.23 * sin_deg(2.0 * l_moon)
        + 0.21 * sin_deg(2.0 * omega);
    let deps = 9.20 * cos_deg(omega) + 0.57 * cos_deg(2.0 * l_sun) + 0.10 * cos_deg(2.0 * l_moon)
        - 0.09 * cos_deg(2.0 * omega);

    Nutation {
        longitude_deg: arcsec(dpsi),
        obliquity_deg: arcsec(deps),
    }
}

/// Mean obliquity of the ecliptic (IAU 1980, Meeus eq. 22.2), degrees.
pub(crate) fn mean_obliquity_deg(t: f64) -> f64 {
    23.439_291_111 + arcsec(-46.815_0 * t - 0.000_59 * t * t + 0.001_813 * t * t * t)
}

/// Rotate ecliptic coordinates into the equator of date.
pub(crate) fn ecliptic_to_equatorial(ecl: Ecliptic, obliquity_deg: f64) -> Equatorial {
    let (sin_l, cos_l) = (sin_deg(ecl.longitude_deg), cos_deg(ecl.longitude_deg));
    let (sin_b, cos_b) = (sin_deg(ecl.latitude_deg), cos_deg(ecl.latitude_deg));
    let (sin_e, cos_e) = (sin_deg(obliquity_deg), cos_deg(obliquity_deg));

    let ra = atan2_deg(sin_l * cos_e - tan_deg(ecl.latitude_deg) * sin_e, cos_l);
    let dec = asin_deg(sin_b * cos_e + cos_b * sin_e * sin_l);

    Equatorial {
        right_ascension_deg: normalize_degrees(ra),
        declination_deg: dec,
        distance_km: ecl.distance_km,
    }
}

/// Spherical hour-angle/declination → azimuth/elevation transform.
///
/// At the poles the azimuth is undefined; it is reported as 0.
pub(crate) fn to_horizontal(hour_angle_deg: f64, declination_deg: f64, latitude_deg: f64) -> Horizontal {
    let (sin_h, cos_h) = (sin_deg(hour_angle_deg), cos_deg(hour_angle_deg));
    let (sin_d, cos_d) = (sin_deg(declination_deg), cos_deg(declination_deg));
    let (sin_p, cos_p) = (sin_deg(latitude_deg), cos_deg(latitude_deg));

    let elevation_deg = asin_deg(sin_p * sin_d + cos_p * cos_d * cos_h);

    let azimuth_deg = if cos_p.abs() < 1e-12 {
        0.0
    } else {
        normalize_degrees(atan2_deg(-cos_d * sin_h, sin_d * cos_p - cos_d * sin_p * cos_h))
    };

    Horizontal {
        azimuth_deg,
        elevation_deg,
    }
}

/// Lower a geocentric elevation to the observer's topocentric one.
///
/// Parallax in altitude `p = asin(sin π · cos h)` with `sin π = R⊕ / Δ`.
pub(crate) fn topocentric_elevation(geocentric_elevation_deg: f64, distance_km: f64) -> f64 {
    let sin_pi = EARTH_EQUATORIAL_RADIUS_KM / distance_km;
    geocentric_elevation_deg - asin_deg(sin_pi * cos_deg(geocentric_elevation_deg))
}

/// Atmospheric refraction for a geometric elevation, degrees.
///
/// Sæmundsson's formula at standard pressure and temperature; zero below
/// [`REFRACTION_CUTOFF_DEG`].
pub(crate) fn refraction_deg(geometric_elevation_deg: f64) -> f64 {
    let h = geometric_elevation_deg;
    if h < REFRACTION_CUTOFF_DEG {
        return 0.0;
    }
    let arcmin = 1.02 / tan_deg(h + 10.3 / (h + 5.11));
    (arcmin / 60.0).max(0.0)
}

/// Refraction-corrected elevation, clamped to `[-90, 90]`.
pub(crate) fn apparent_elevation(geometric_elevation_deg: f64) -> f64 {
    (geometric_elevation_deg + refraction_deg(geometric_elevation_deg)).clamp(-90.0, 90.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obliquity_at_j2000() {
        assert!((mean_obliquity_deg(0.0) - 23.439_291).abs() < 1e-6);
    }

    #[test]
    fn nutation_meeus_example_22a() {
        // 1987-04-10 0h TD: Δψ = −3.788″, Δε = +9.443″ (full series).
        let t = (2_446_895.5 - 2_451_545.0) / 36_525.0;
        let n = nutation(t);
        assert!((n.longitude_deg * 3600.0 + 3.788).abs() < 0.5);
        assert!((n.obliquity_deg * 3600.0 - 9.443).abs() < 0.5);
    }

    #[test]
    fn equinox_point_maps_to_origin() {
        let eq = ecliptic_to_equatorial(
            Ecliptic {
                longitude_deg: 0.0,
                latitude_deg: 0.0,
                distance_km: 1.0,
            },
            23.44,
        );
        assert!(eq.right_ascension_deg.abs() < 1e-12);
        assert!(eq.declination_deg.abs() < 1e-12);
    }

    #[test]
    fn solstice_point_declination_equals_obliquity() {
        let eq = ecliptic_to_equatorial(
            Ecliptic {
                longitude_deg: 90.0,
                latitude_deg: 0.0,
                distance_km: 1.0,
            },
            23.44,
        );
        assert!((eq.right_ascension_deg - 90.0).abs() < 1e-9);
        assert!((eq.declination_deg - 23.44).abs() < 1e-9);
    }

    #[test]
    fn meridian_transit_is_due_south() {
        let h = to_horizontal(0.0, 0.0, 51.48);
        assert!((h.azimuth_deg - 180.0).abs() < 1e-9);
        assert!((h.elevation_deg - (90.0 - 51.48)).abs() < 1e-9);
    }

    #[test]
    fn rising_object_is_in_the_east() {
        let h = to_horizontal(-90.0, 0.0, 0.0);
        assert!((h.azimuth_deg - 90.0).abs() < 1e-9);
        assert!(h.elevation_deg.abs() < 1e-9);
    }

    #[test]
    fn pole_azimuth_is_zero() {
        let h = to_horizontal(37.0, 20.0, 90.0);
        assert_eq!(h.azimuth_deg, 0.0);
        assert!((h.elevation_deg - 20.0).abs() < 1e-9);
    }

    #[test]
    fn refraction_at_horizon_is_about_half_a_degree() {
        let r = refraction_deg(0.0);
        assert!((r - 0.48).abs() < 0.05, "R(0) = {r}");
        assert!(refraction_deg(45.0) < 0.02);
        assert_eq!(refraction_deg(-0.6), 0.0);
        assert!(refraction_deg(90.0) >= 0.0);
    }

    #[test]
    fn apparent_elevation_never_exceeds_zenith() {
        assert!(apparent_elevation(89.999) <= 90.0);
        assert_eq!(apparent_elevation(-30.0), -30.0);
    }

    #[test]
    fn moon_parallax_is_about_one_degree_at_horizon() {
        let lowered = topocentric_elevation(0.0, 384_400.0);
        assert!((lowered + 0.95).abs() < 0.02, "lowered = {lowered}");
    }
}
