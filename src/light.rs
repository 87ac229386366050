// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Predictive light: golden and blue hours, and camera settings for the
//! light the Sun will give at a chosen instant.

use crate::config::SearchConfig;
use crate::error::Result;
use crate::events::{altitude_periods_with, day_window};
use crate::exposure::{solve, ExposureParameter, ExposureValue, StopScale};
use crate::observer::Observer;
use crate::period::{complement_within, intersect_periods, Period};
use crate::position::{position, Body, CelestialPosition, Instant};
use crate::scales::UT;
use chrono::NaiveDate;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Golden hour: sun between these elevations.
pub const GOLDEN_HOUR_DEG: (f64, f64) = (-4.0, 6.0);
/// Blue hour: sun between these elevations.
pub const BLUE_HOUR_DEG: (f64, f64) = (-6.0, -4.0);

/// Quality of natural light, by solar elevation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LightPhase {
    Night,
    AstronomicalTwilight,
    NauticalTwilight,
    BlueHour,
    GoldenHour,
    Daylight,
}

impl LightPhase {
    pub fn from_sun_elevation(elevation_deg: f64) -> Self {
        match elevation_deg {
            e if e >= GOLDEN_HOUR_DEG.1 => LightPhase::Daylight,
            e if e >= GOLDEN_HOUR_DEG.0 => LightPhase::GoldenHour,
            e if e >= BLUE_HOUR_DEG.0 => LightPhase::BlueHour,
            e if e >= -12.0 => LightPhase::NauticalTwilight,
            e if e >= -18.0 => LightPhase::AstronomicalTwilight,
            _ => LightPhase::Night,
        }
    }
}

/// Golden- and blue-hour periods of one day, each sorted.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LightWindows {
    pub golden: Vec<Period<UT>>,
    pub blue: Vec<Period<UT>>,
}

/// Sub-periods of `date` with the Sun in `[min, max)`:
/// `above(min) ∩ complement(above(max))`.
fn between(
    observer: &Observer,
    date: NaiveDate,
    (min, max): (f64, f64),
    config: &SearchConfig,
) -> Result<Vec<Period<UT>>> {
    let window = day_window(observer, date, config.frame)?;
    let above_min = altitude_periods_with(Body::Sun, observer, date, min, config)?;
    let above_max = altitude_periods_with(Body::Sun, observer, date, max, config)?;
    Ok(intersect_periods(&above_min, &complement_within(window, &above_max)))
}

pub fn light_windows(observer: &Observer, date: NaiveDate) -> Result<LightWindows> {
    light_windows_with(observer, date, &SearchConfig::default())
}

pub fn light_windows_with(observer: &Observer, date: NaiveDate, config: &SearchConfig) -> Result<LightWindows> {
    let windows = LightWindows {
        golden: between(observer, date, GOLDEN_HOUR_DEG, config)?,
        blue: between(observer, date, BLUE_HOUR_DEG, config)?,
    };
    debug!(%date, golden = windows.golden.len(), blue = windows.blue.len(), "light windows");
    Ok(windows)
}

/// Typical EV100 of an open, front-lit scene against solar elevation.
const SCENE_EV100: [(f64, f64); 10] = [
    (-18.0, -3.0),
    (-12.0, 0.0),
    (-6.0, 4.0),
    (-4.0, 6.0),
    (0.0, 9.0),
    (6.0, 12.0),
    (15.0, 13.5),
    (30.0, 14.5),
    (45.0, 15.0),
    (90.0, 15.3),
];

/// Scene brightness for a solar elevation, linearly interpolated and held
/// flat beyond the table ends.
pub fn scene_ev100(sun_elevation_deg: f64) -> f64 {
    let (first, last) = (SCENE_EV100[0], SCENE_EV100[SCENE_EV100.len() - 1]);
    if sun_elevation_deg.is_nan() || sun_elevation_deg <= first.0 {
        return first.1;
    }
    if sun_elevation_deg >= last.0 {
        return last.1;
    }
    SCENE_EV100
        .windows(2)
        .find(|w| sun_elevation_deg <= w[1].0)
        .map(|w| {
            let ((x0, y0), (x1, y1)) = (w[0], w[1]);
            y0 + (y1 - y0) * (sun_elevation_deg - x0) / (x1 - x0)
        })
        .unwrap_or(last.1)
}

/// Settings predicted for a moment of the day.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PredictedExposure {
    pub sun: CelestialPosition,
    pub phase: LightPhase,
    pub scene_ev100: f64,
    pub settings: ExposureValue,
}

/// Re-solve `unknown` so that `base` (two legs held) suits the light at
/// `instant`.
///
/// # Errors
/// Observer and instant validation as for [`position`], plus the solver's
/// over/underexposure signals when the scale cannot reach the scene.
pub fn predict_exposure(
    observer: &Observer,
    instant: Instant,
    base: &ExposureValue,
    unknown: ExposureParameter,
    scale: StopScale,
) -> Result<PredictedExposure> {
    let sun = position(Body::Sun, observer, instant)?;
    let scene = scene_ev100(sun.elevation_deg);
    // Positive when the scene is darker than `base` was metered for.
    let compensation = base.ev100() - scene;
    let settings = solve(base, base, unknown, scale, compensation)?;
    debug!(elevation = sun.elevation_deg, scene, compensation, %settings, "predicted exposure");

    Ok(PredictedExposure {
        sun,
        phase: LightPhase::from_sun_elevation(sun.elevation_deg),
        scene_ev100: scene,
        settings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::{TimeZone, Utc};

    #[test]
    fn phases_by_elevation() {
        assert_eq!(LightPhase::from_sun_elevation(30.0), LightPhase::Daylight);
        assert_eq!(LightPhase::from_sun_elevation(6.0), LightPhase::Daylight);
        assert_eq!(LightPhase::from_sun_elevation(2.0), LightPhase::GoldenHour);
        assert_eq!(LightPhase::from_sun_elevation(-5.0), LightPhase::BlueHour);
        assert_eq!(LightPhase::from_sun_elevation(-10.0), LightPhase::NauticalTwilight);
        assert_eq!(LightPhase::from_sun_elevation(-15.0), LightPhase::AstronomicalTwilight);
        assert_eq!(LightPhase::from_sun_elevation(-40.0), LightPhase::Night);
    }

    #[test]
    fn scene_brightness_is_monotonic_and_clamped() {
        assert_eq!(scene_ev100(-60.0), -3.0);
        assert_eq!(scene_ev100(90.0), 15.3);
        assert!((scene_ev100(-2.0) - 7.5).abs() < 1e-12);
        let mut last = f64::NEG_INFINITY;
        for e in -30..=90 {
            let ev = scene_ev100(f64::from(e));
            assert!(ev >= last);
            last = ev;
        }
    }

    #[test]
    fn golden_hour_brackets_sunset() {
        let obs = Observer::new(51.48, 0.0).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        let windows = light_windows(&obs, date).unwrap();
        assert_eq!(windows.golden.len(), 2);
        assert_eq!(windows.blue.len(), 2);

        // Morning: blue then golden; evening: golden then blue.
        assert!(windows.blue[0].end <= windows.golden[0].start + qtty::Days::new(1e-6));
        assert!(windows.golden[1].end <= windows.blue[1].start + qtty::Days::new(1e-6));
        for p in windows.golden.iter().chain(&windows.blue) {
            let minutes = p.duration_seconds() / 60.0;
            assert!(minutes > 5.0 && minutes < 90.0, "{minutes} min");
        }
    }

    #[test]
    fn dusk_needs_more_iso_than_noon() {
        let obs = Observer::new(51.48, 0.0).unwrap();
        let base = ExposureValue::parse("1/125", "f/16", "100").unwrap();
        let noon = Instant::from_utc(Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap());
        let dusk = Instant::from_utc(Utc.with_ymd_and_hms(2024, 6, 21, 20, 45, 0).unwrap());

        let day = predict_exposure(&obs, noon, &base, ExposureParameter::Iso, StopScale::Third).unwrap();
        assert_eq!(day.phase, LightPhase::Daylight);
        assert!(day.settings.iso.value() <= 100);

        let evening = predict_exposure(&obs, dusk, &base, ExposureParameter::Iso, StopScale::Third);
        match evening {
            Ok(p) => assert!(p.settings.iso > day.settings.iso),
            Err(e) => assert!(matches!(e, Error::Overexposed { .. }), "{e}"),
        }
    }
}
