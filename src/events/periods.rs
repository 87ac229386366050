// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Sub-periods of a day where a body stays above an altitude.

use super::{day_window, search};
use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::observer::Observer;
use crate::period::Period;
use crate::position::Body;
use crate::scales::UT;
use chrono::NaiveDate;
use search::Profile;
use tracing::debug;

/// Periods of `date` during which `body` is at or above `min_deg`, with the
/// default [`SearchConfig`].
pub fn altitude_periods(
    body: Body,
    observer: &Observer,
    date: NaiveDate,
    min_deg: f64,
) -> Result<Vec<Period<UT>>> {
    altitude_periods_with(body, observer, date, min_deg, &SearchConfig::default())
}

/// Periods of `date` during which `body` is at or above `min_deg`.
///
/// The result is sorted, non-overlapping and clipped to the day window, so
/// it composes directly with [`complement_within`](crate::complement_within)
/// and [`intersect_periods`](crate::intersect_periods).
pub fn altitude_periods_with(
    body: Body,
    observer: &Observer,
    date: NaiveDate,
    min_deg: f64,
    config: &SearchConfig,
) -> Result<Vec<Period<UT>>> {
    observer.validate()?;
    config.validate()?;
    if !min_deg.is_finite() || !(-90.0..=90.0).contains(&min_deg) {
        return Err(Error::InvalidInput(format!("altitude {min_deg} outside [-90, 90]")));
    }

    let window = day_window(observer, date, config.frame)?;
    let profile = Profile {
        body,
        observer,
        horizon: config.horizon,
        target_deg: min_deg,
    };
    let samples = search::sample(&profile, window, config.step());

    let mut periods = Vec::new();
    let mut open = samples
        .first()
        .filter(|s| s.is_above())
        .map(|_| window.start);

    for bracket in search::brackets(&samples) {
        let t = search::bisect(&profile, bracket, config);
        if bracket.is_rising() {
            open = Some(t);
        } else if let Some(start) = open.take() {
            if start < t {
                periods.push(Period::new(start, t));
            }
        }
    }
    if let Some(start) = open {
        periods.push(Period::new(start, window.end));
    }

    debug!(%body, %date, min_deg, count = periods.len(), "altitude periods");
    Ok(periods)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{find_event, TwilightKind};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn daylight_is_sunrise_to_sunset() {
        let obs = Observer::new(51.48, 0.0).unwrap();
        let d = date(2024, 3, 20);
        let periods = altitude_periods(Body::Sun, &obs, d, 0.0).unwrap();
        assert_eq!(periods.len(), 1);

        let rise = find_event(Body::Sun, TwilightKind::Sunrise, &obs, d).unwrap().instant().unwrap();
        let set = find_event(Body::Sun, TwilightKind::Sunset, &obs, d).unwrap().instant().unwrap();
        assert!((periods[0].start - rise).value().abs() * 86_400.0 < 2.0);
        assert!((periods[0].end - set).value().abs() * 86_400.0 < 2.0);
    }

    #[test]
    fn polar_day_is_the_whole_window() {
        let obs = Observer::new(78.2, 15.6).unwrap();
        let periods = altitude_periods(Body::Sun, &obs, date(2024, 6, 21), 0.0).unwrap();
        assert_eq!(periods.len(), 1);
        assert!((periods[0].duration_seconds() - 86_400.0).abs() < 1e-3);
    }

    #[test]
    fn unreachable_altitude_is_empty() {
        let obs = Observer::new(60.0, 0.0).unwrap();
        assert!(altitude_periods(Body::Sun, &obs, date(2024, 12, 21), 20.0)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn moon_periods_are_sorted_and_disjoint() {
        let obs = Observer::new(35.0, 139.7).unwrap();
        let periods = altitude_periods(Body::Moon, &obs, date(2024, 5, 10), 0.0).unwrap();
        assert!(!periods.is_empty());
        assert!(periods.iter().all(|p| p.start < p.end));
        assert!(periods.windows(2).all(|w| w[0].end <= w[1].start));
    }

    #[test]
    fn rejects_bad_altitude() {
        let obs = Observer::new(0.0, 0.0).unwrap();
        assert!(matches!(
            altitude_periods(Body::Sun, &obs, date(2024, 1, 1), f64::NAN),
            Err(Error::InvalidInput(_))
        ));
    }
}
