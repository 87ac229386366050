// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Exposure-equivalence solver.
//!
//! With two parameters changed, the third is scaled so the exposure stays
//! equivalent, shifted by the requested compensation (`+1` = one stop more
//! light):
//!
//! ```text
//! t = t₀ · (N/N₀)² · (S₀/S) · 2^c
//! N = N₀ · √((t/t₀) · (S/S₀) · 2^−c)
//! S = S₀ · (t₀/t) · (N/N₀)² · 2^c
//! ```
//!
//! The raw result is then snapped to the nearest entry of the scale. A raw
//! value more than 50 % above the table maximum, or more than 33 % below the
//! minimum, is reported instead of clamped.

use super::scale::{nearest_index, StopScale};
use super::values::{Aperture, Iso, ShutterSpeed};
use super::{ExposureParameter, ExposureValue};
use crate::error::{Error, Result};
use tracing::debug;

const OVER_TOLERANCE: f64 = 1.5;
const UNDER_TOLERANCE: f64 = 0.67;

fn check_compensation(ev_compensation: f64) -> Result<()> {
    if ev_compensation.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "EV compensation {ev_compensation} is not finite"
        )))
    }
}

/// Stops of exposure represented by a ratio of parameter values.
fn stops(parameter: ExposureParameter, ratio: f64) -> f64 {
    match parameter {
        ExposureParameter::Aperture => 2.0 * ratio.log2(),
        ExposureParameter::ShutterSpeed | ExposureParameter::Iso => ratio.log2(),
    }
}

/// Snap `raw` into `table`, or report how far outside the scale it is.
fn snap(parameter: ExposureParameter, raw: f64, table: &[f64]) -> Result<usize> {
    let (Some(&min), Some(&max)) = (table.first(), table.last()) else {
        return Err(Error::InvalidInput(format!("empty {parameter} table")));
    };
    if !raw.is_finite() || raw <= 0.0 {
        return Err(Error::InvalidInput(format!("solved {parameter} {raw} is not positive")));
    }
    if raw > max * OVER_TOLERANCE {
        let stops = stops(parameter, raw / max);
        debug!(%parameter, raw, stops, "beyond scale maximum");
        return Err(Error::Overexposed { parameter, stops });
    }
    if raw < min * UNDER_TOLERANCE {
        let stops = stops(parameter, min / raw);
        debug!(%parameter, raw, stops, "beyond scale minimum");
        return Err(Error::Underexposed { parameter, stops });
    }
    nearest_index(table.iter().copied(), raw)
        .ok_or_else(|| Error::InvalidInput(format!("empty {parameter} table")))
}

/// Keep aperture and ISO at the targets, solve the shutter speed.
pub fn solve_shutter_speed(
    base: &ExposureValue,
    target_aperture: Aperture,
    target_iso: Iso,
    scale: StopScale,
    ev_compensation: f64,
) -> Result<ExposureValue> {
    check_compensation(ev_compensation)?;
    let aperture_ratio = target_aperture.f_number() / base.aperture.f_number();
    let raw = base.shutter.seconds()
        * aperture_ratio.powi(2)
        * (f64::from(base.iso.value()) / f64::from(target_iso.value()))
        * ev_compensation.exp2();

    let table = scale.shutter_speeds();
    let values: Vec<f64> = table.iter().map(ShutterSpeed::seconds).collect();
    let index = snap(ExposureParameter::ShutterSpeed, raw, &values)?;
    debug!(raw, snapped = %table[index], "solved shutter speed");

    Ok(ExposureValue {
        shutter: table[index],
        aperture: target_aperture,
        iso: target_iso,
    })
}

/// Keep shutter speed and ISO at the targets, solve the aperture.
pub fn solve_aperture(
    base: &ExposureValue,
    target_shutter: ShutterSpeed,
    target_iso: Iso,
    scale: StopScale,
    ev_compensation: f64,
) -> Result<ExposureValue> {
    check_compensation(ev_compensation)?;
    let light = (target_shutter.seconds() / base.shutter.seconds())
        * (f64::from(target_iso.value()) / f64::from(base.iso.value()))
        * (-ev_compensation).exp2();
    let raw = base.aperture.f_number() * light.sqrt();

    let table = scale.apertures();
    let values: Vec<f64> = table.iter().map(Aperture::f_number).collect();
    let index = snap(ExposureParameter::Aperture, raw, &values)?;
    debug!(raw, snapped = %table[index], "solved aperture");

    Ok(ExposureValue {
        shutter: target_shutter,
        aperture: table[index],
        iso: target_iso,
    })
}

/// Keep shutter speed and aperture at the targets, solve the ISO.
pub fn solve_iso(
    base: &ExposureValue,
    target_shutter: ShutterSpeed,
    target_aperture: Aperture,
    scale: StopScale,
    ev_compensation: f64,
) -> Result<ExposureValue> {
    check_compensation(ev_compensation)?;
    let aperture_ratio = target_aperture.f_number() / base.aperture.f_number();
    let raw = f64::from(base.iso.value())
        * (base.shutter.seconds() / target_shutter.seconds())
        * aperture_ratio.powi(2)
        * ev_compensation.exp2();

    let table = scale.isos();
    let values: Vec<f64> = table.iter().map(|iso| f64::from(iso.value())).collect();
    let index = snap(ExposureParameter::Iso, raw, &values)?;
    debug!(raw, snapped = %table[index], "solved ISO");

    Ok(ExposureValue {
        shutter: target_shutter,
        aperture: target_aperture,
        iso: table[index],
    })
}

/// Solve whichever parameter is `unknown`, taking the other two from
/// `target`.
pub fn solve(
    base: &ExposureValue,
    target: &ExposureValue,
    unknown: ExposureParameter,
    scale: StopScale,
    ev_compensation: f64,
) -> Result<ExposureValue> {
    match unknown {
        ExposureParameter::ShutterSpeed => {
            solve_shutter_speed(base, target.aperture, target.iso, scale, ev_compensation)
        }
        ExposureParameter::Aperture => {
            solve_aperture(base, target.shutter, target.iso, scale, ev_compensation)
        }
        ExposureParameter::Iso => {
            solve_iso(base, target.shutter, target.aperture, scale, ev_compensation)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(shutter: &str, aperture: &str, iso: &str) -> ExposureValue {
        ExposureValue::parse(shutter, aperture, iso).unwrap()
    }

    #[test]
    fn two_stops_smaller_aperture_needs_two_stops_slower_shutter() {
        let base = ev("1/125", "f/5.6", "100");
        let solved = solve_shutter_speed(
            &base,
            "f/11".parse().unwrap(),
            "100".parse().unwrap(),
            StopScale::Full,
            0.0,
        )
        .unwrap();
        assert_eq!(solved.shutter.to_string(), "1/30");
        assert_eq!(solved.aperture.to_string(), "f/11");
    }

    #[test]
    fn iso_beyond_scale_is_overexposed() {
        let base = ev("1/60", "f/16", "100");
        let err = solve_iso(
            &base,
            "1/4000".parse().unwrap(),
            base.aperture,
            StopScale::Full,
            0.0,
        )
        .unwrap_err();
        match err {
            Error::Overexposed { parameter, stops } => {
                assert_eq!(parameter, ExposureParameter::Iso);
                assert!((stops - (6666.67f64 / 3200.0).log2()).abs() < 1e-3);
            }
            other => panic!("expected overexposure, got {other:?}"),
        }
    }

    #[test]
    fn iso_far_below_scale_is_underexposed() {
        let base = ev("1/125", "f/8", "100");
        let err = solve_iso(
            &base,
            "2\"".parse().unwrap(),
            base.aperture,
            StopScale::Full,
            0.0,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Underexposed { parameter: ExposureParameter::Iso, .. }));
    }

    #[test]
    fn within_tolerance_snaps_to_the_end_of_the_scale() {
        // Raw ISO 4000 is 25 % above 3200: snapped, not rejected.
        let base = ev("1/100", "f/8", "100");
        let solved = solve_iso(
            &base,
            "1/4000".parse().unwrap(),
            base.aperture,
            StopScale::Full,
            0.0,
        )
        .unwrap();
        assert_eq!(solved.iso.value(), 3200);
    }

    #[test]
    fn aperture_follows_shutter_change() {
        let base = ev("1/125", "f/8", "200");
        let solved = solve_aperture(
            &base,
            "1/500".parse().unwrap(),
            base.iso,
            StopScale::Full,
            0.0,
        )
        .unwrap();
        assert_eq!(solved.aperture.to_string(), "f/4");
    }

    #[test]
    fn aperture_overexposure_counts_two_stops_per_f_number_doubling() {
        let base = ev("1/125", "f/16", "100");
        let err = solve_aperture(&base, "4\"".parse().unwrap(), base.iso, StopScale::Full, 0.0)
            .unwrap_err();
        match err {
            Error::Overexposed { parameter, stops } => {
                assert_eq!(parameter, ExposureParameter::Aperture);
                // N = 16·√500 ≈ 357.8 vs f/64.
                assert!((stops - 2.0 * (357.77f64 / 64.0).log2()).abs() < 1e-2);
            }
            other => panic!("expected overexposure, got {other:?}"),
        }
    }

    #[test]
    fn compensation_adds_light() {
        let base = ev("1/125", "f/8", "100");
        let plus = solve_shutter_speed(&base, base.aperture, base.iso, StopScale::Full, 1.0).unwrap();
        let minus = solve_shutter_speed(&base, base.aperture, base.iso, StopScale::Full, -1.0).unwrap();
        assert_eq!(plus.shutter.to_string(), "1/60");
        assert_eq!(minus.shutter.to_string(), "1/250");

        let iso = solve_iso(&base, base.shutter, base.aperture, StopScale::Third, 2.0 / 3.0).unwrap();
        assert_eq!(iso.iso.value(), 160);
    }

    #[test]
    fn non_finite_compensation_is_invalid() {
        let base = ev("1/125", "f/8", "100");
        for comp in [f64::NAN, f64::INFINITY] {
            assert!(matches!(
                solve_shutter_speed(&base, base.aperture, base.iso, StopScale::Full, comp),
                Err(Error::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn solve_dispatches_on_unknown() {
        let base = ev("1/125", "f/5.6", "100");
        let target = ev("1/500", "f/11", "400");
        let s = solve(&base, &target, ExposureParameter::ShutterSpeed, StopScale::Full, 0.0).unwrap();
        assert_eq!(s.to_string(), "1/125 f/11 ISO 400");
        let a = solve(&base, &target, ExposureParameter::Aperture, StopScale::Full, 0.0).unwrap();
        assert_eq!(a.to_string(), "1/500 f/5.6 ISO 400");
        let i = solve(&base, &target, ExposureParameter::Iso, StopScale::Full, 0.0).unwrap();
        assert_eq!(i.to_string(), "1/500 f/11 ISO 1600");
    }
}
