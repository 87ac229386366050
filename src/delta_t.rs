// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # ΔT (Delta T) — UT↔TT correction
//!
//! Piecewise polynomial model of **ΔT = TT − UT** by Espenak & Meeus (2006),
//! as published with the NASA *Five Millennium Canon of Solar Eclipses*.
//!
//! The correction is applied automatically by the [`UT`](crate::UT) scale;
//! most callers never use this module directly.
//!
//! Around the present the model is good to a few seconds, which moves the
//! Moon by well under an arc-minute.

use qtty::{Days, Seconds, Simplify};

/// Mean length of a Julian year in days.
const YEAR: Days = Days::new(365.25);

/// Decimal year for a UT day count since J2000.0.
#[inline]
fn decimal_year(ut: Days) -> f64 {
    2000.0 + (ut / YEAR).simplify().value()
}

/// Long-term parabola (Morrison & Stephenson 2004), used outside 1900–2150.
#[inline]
fn delta_t_long_term(y: f64) -> f64 {
    let u = (y - 1820.0) / 100.0;
    -20.0 + 32.0 * u * u
}

/// **1900–1920**
#[inline]
fn delta_t_1900(y: f64) -> f64 {
    let t = y - 1900.0;
    -2.79 + 1.494119 * t - 0.0598939 * t.powi(2) + 0.0061966 * t.powi(3) - 0.000197 * t.powi(4)
}

/// **1920–1941**
#[inline]
fn delta_t_1920(y: f64) -> f64 {
    let t = y - 1920.0;
    21.20 + 0.84493 * t - 0.076100 * t.powi(2) + 0.0020936 * t.powi(3)
}

/// **1941–1961**
#[inline]
fn delta_t_1941(y: f64) -> f64 {
    let t = y - 1950.0;
    29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
}

/// **1961–1986**
#[inline]
fn delta_t_1961(y: f64) -> f64 {
    let t = y - 1975.0;
    45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
}

/// **1986–2005**
#[inline]
fn delta_t_1986(y: f64) -> f64 {
    let t = y - 2000.0;
    63.86 + 0.3345 * t - 0.060374 * t.powi(2)
        + 0.0017275 * t.powi(3)
        + 0.000651814 * t.powi(4)
        + 0.00002373599 * t.powi(5)
}

/// **2005–2050**
#[inline]
fn delta_t_2005(y: f64) -> f64 {
    let t = y - 2000.0;
    62.92 + 0.32217 * t + 0.005589 * t.powi(2)
}

/// **2050–2150**
#[inline]
fn delta_t_2050(y: f64) -> f64 {
    let u = (y - 1820.0) / 100.0;
    -20.0 + 32.0 * u * u - 0.5628 * (2150.0 - y)
}

/// Returns **ΔT** in seconds for a day count since J2000.0 on the UT axis.
pub(crate) fn delta_t_seconds(ut: Days) -> Seconds {
    let y = decimal_year(ut);
    let dt = match y {
        y if !y.is_finite() => 0.0,
        y if y < 1900.0 => delta_t_long_term(y),
        y if y < 1920.0 => delta_t_1900(y),
        y if y < 1941.0 => delta_t_1920(y),
        y if y < 1961.0 => delta_t_1941(y),
        y if y < 1986.0 => delta_t_1961(y),
        y if y < 2005.0 => delta_t_1986(y),
        y if y < 2050.0 => delta_t_2005(y),
        y if y < 2150.0 => delta_t_2050(y),
        y => delta_t_long_term(y),
    };
    Seconds::new(dt)
}
