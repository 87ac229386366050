// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Horizon and twilight event search.
//!
//! Rather than inverting the hour-angle equation analytically, the search
//! samples `elevation − target` across the observer's civil day and refines
//! what it finds:
//!
//! 1. sample every [`SearchConfig::step_seconds`] (10 min by default);
//! 2. take the **first** bracket whose sign change matches the requested
//!    direction and bisect it down to [`SearchConfig::tolerance_seconds`];
//! 3. for culminations, polish the sampled extremum with parabolic fits.
//!
//! A day without the requested crossing is an observable outcome, never an
//! error and never a made-up time: see [`EventResult`].
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use photoplan::{find_event, Body, EventResult, Observer, TwilightKind};
//!
//! let greenwich = Observer::new(51.48, 0.0)?;
//! let date = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
//! if let EventResult::At(t) = find_event(Body::Sun, TwilightKind::Sunrise, &greenwich, date)? {
//!     println!("sunrise {t}");
//! }
//! # Ok::<(), photoplan::Error>(())
//! ```

mod periods;
pub(crate) mod search;

pub use periods::{altitude_periods, altitude_periods_with};

use crate::config::{LocalFrame, SearchConfig};
use crate::error::{Error, Result};
use crate::observer::Observer;
use crate::period::Period;
use crate::position::{Body, Instant};
use crate::scales::UT;
use chrono::{Datelike, NaiveDate};
use qtty::Days;
use search::{Extremum, Profile, Sample};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Years covered by the ΔT model.
const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = -1999..=3000;

// ═══════════════════════════════════════════════════════════════════════════
// Kinds
// ═══════════════════════════════════════════════════════════════════════════

/// Direction of a threshold crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    Rising,
    Setting,
}

/// What an event kind looks for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventTarget {
    /// Crossing of a fixed altitude in one direction.
    Crossing { altitude_deg: f64, direction: Direction },
    /// Upper culmination.
    Maximum,
    /// Lower culmination.
    Minimum,
}

/// Horizon and twilight milestones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TwilightKind {
    Sunrise,
    Sunset,
    CivilDawn,
    CivilDusk,
    NauticalDawn,
    NauticalDusk,
    AstronomicalDawn,
    AstronomicalDusk,
    SolarNoon,
    SolarMidnight,
    MoonRise,
    MoonSet,
}

impl TwilightKind {
    /// Solar milestones of a day, in the order they normally happen.
    pub const SOLAR_DAY: [TwilightKind; 9] = [
        TwilightKind::AstronomicalDawn,
        TwilightKind::NauticalDawn,
        TwilightKind::CivilDawn,
        TwilightKind::Sunrise,
        TwilightKind::SolarNoon,
        TwilightKind::Sunset,
        TwilightKind::CivilDusk,
        TwilightKind::NauticalDusk,
        TwilightKind::AstronomicalDusk,
    ];

    /// The body this kind is defined for.
    pub const fn body(self) -> Body {
        match self {
            TwilightKind::MoonRise | TwilightKind::MoonSet => Body::Moon,
            _ => Body::Sun,
        }
    }

    pub fn target(self) -> EventTarget {
        use Direction::{Rising, Setting};
        let crossing = |altitude_deg, direction| EventTarget::Crossing {
            altitude_deg,
            direction,
        };
        match self {
            TwilightKind::Sunrise | TwilightKind::MoonRise => crossing(0.0, Rising),
            TwilightKind::Sunset | TwilightKind::MoonSet => crossing(0.0, Setting),
            TwilightKind::CivilDawn => crossing(-6.0, Rising),
            TwilightKind::CivilDusk => crossing(-6.0, Setting),
            TwilightKind::NauticalDawn => crossing(-12.0, Rising),
            TwilightKind::NauticalDusk => crossing(-12.0, Setting),
            TwilightKind::AstronomicalDawn => crossing(-18.0, Rising),
            TwilightKind::AstronomicalDusk => crossing(-18.0, Setting),
            TwilightKind::SolarNoon => EventTarget::Maximum,
            TwilightKind::SolarMidnight => EventTarget::Minimum,
        }
    }

    /// Whether the threshold is the visible horizon (and so moves with the
    /// observer's height).
    pub const fn is_horizon(self) -> bool {
        matches!(
            self,
            TwilightKind::Sunrise | TwilightKind::Sunset | TwilightKind::MoonRise | TwilightKind::MoonSet
        )
    }

    /// Altitude the search compares against for `observer`, degrees.
    fn threshold_deg(self, observer: &Observer) -> f64 {
        match self.target() {
            EventTarget::Crossing { altitude_deg, .. } if self.is_horizon() => {
                altitude_deg - observer.horizon_dip_deg()
            }
            EventTarget::Crossing { altitude_deg, .. } => altitude_deg,
            EventTarget::Maximum | EventTarget::Minimum => 0.0,
        }
    }
}

impl std::fmt::Display for TwilightKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TwilightKind::Sunrise => "sunrise",
            TwilightKind::Sunset => "sunset",
            TwilightKind::CivilDawn => "civil dawn",
            TwilightKind::CivilDusk => "civil dusk",
            TwilightKind::NauticalDawn => "nautical dawn",
            TwilightKind::NauticalDusk => "nautical dusk",
            TwilightKind::AstronomicalDawn => "astronomical dawn",
            TwilightKind::AstronomicalDusk => "astronomical dusk",
            TwilightKind::SolarNoon => "solar noon",
            TwilightKind::SolarMidnight => "solar midnight",
            TwilightKind::MoonRise => "moonrise",
            TwilightKind::MoonSet => "moonset",
        };
        f.write_str(name)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Results
// ═══════════════════════════════════════════════════════════════════════════

/// Outcome of an event search for one day.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EventResult {
    /// The event happens at this instant.
    At(Instant),
    /// The body stays at or above the threshold all day (midnight sun).
    AlwaysAbove,
    /// The body stays below the threshold all day (polar night).
    AlwaysBelow,
    /// The threshold is crossed, but only in the opposite direction
    /// (e.g. the Moon sets but does not rise that day).
    NoCrossing,
}

impl EventResult {
    /// The event instant, if there is one.
    pub fn instant(&self) -> Option<Instant> {
        match self {
            EventResult::At(t) => Some(*t),
            _ => None,
        }
    }

    pub fn is_at(&self) -> bool {
        matches!(self, EventResult::At(_))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Search
// ═══════════════════════════════════════════════════════════════════════════

/// The civil day of `date` in the observer's local frame, as a UT period.
pub fn day_window(observer: &Observer, date: NaiveDate, frame: LocalFrame) -> Result<Period<UT>> {
    if !SUPPORTED_YEARS.contains(&date.year()) {
        return Err(Error::InvalidInput(format!(
            "date {date} outside supported years {}..={}",
            SUPPORTED_YEARS.start(),
            SUPPORTED_YEARS.end()
        )));
    }
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| Error::InvalidInput(format!("no midnight on {date}")))?
        .and_utc();
    let start = Instant::from_utc(midnight) - frame.offset_days(observer.longitude_deg());
    Ok(Period::new(start, start + Days::new(1.0)))
}

/// Find `kind` for `body` on `date` with the default [`SearchConfig`].
pub fn find_event(
    body: Body,
    kind: TwilightKind,
    observer: &Observer,
    date: NaiveDate,
) -> Result<EventResult> {
    find_event_with(body, kind, observer, date, &SearchConfig::default())
}

/// Find `kind` for `body` on `date`.
///
/// # Errors
/// * [`Error::InvalidInput`] if `kind` is not defined for `body`, the
///   configuration is degenerate or the date is outside the supported range
/// * [`Error::InvalidObserver`] for an out-of-range observer
pub fn find_event_with(
    body: Body,
    kind: TwilightKind,
    observer: &Observer,
    date: NaiveDate,
    config: &SearchConfig,
) -> Result<EventResult> {
    observer.validate()?;
    config.validate()?;
    if kind.body() != body {
        return Err(Error::InvalidInput(format!("{kind} is not defined for the {body}")));
    }

    let window = day_window(observer, date, config.frame)?;
    let profile = Profile {
        body,
        observer,
        horizon: config.horizon,
        target_deg: kind.threshold_deg(observer),
    };
    let samples = search::sample(&profile, window, config.step());

    let result = match kind.target() {
        EventTarget::Crossing { direction, .. } => first_crossing(&profile, &samples, direction, config),
        EventTarget::Maximum => culmination(&profile, &samples, window, Extremum::Maximum, config)?,
        EventTarget::Minimum => culmination(&profile, &samples, window, Extremum::Minimum, config)?,
    };
    debug!(%body, %kind, %date, ?result, "event search");
    Ok(result)
}

/// All solar milestones of `date`, in [`TwilightKind::SOLAR_DAY`] order.
pub fn day_events(observer: &Observer, date: NaiveDate) -> Result<Vec<(TwilightKind, EventResult)>> {
    day_events_with(observer, date, &SearchConfig::default())
}

pub fn day_events_with(
    observer: &Observer,
    date: NaiveDate,
    config: &SearchConfig,
) -> Result<Vec<(TwilightKind, EventResult)>> {
    TwilightKind::SOLAR_DAY
        .iter()
        .map(|&kind| Ok((kind, find_event_with(Body::Sun, kind, observer, date, config)?)))
        .collect()
}

fn first_crossing(
    profile: &Profile<'_>,
    samples: &[Sample],
    direction: Direction,
    config: &SearchConfig,
) -> EventResult {
    let brackets = search::brackets(samples);
    let wanted = direction == Direction::Rising;

    if let Some(bracket) = brackets.iter().find(|b| b.is_rising() == wanted) {
        return EventResult::At(search::bisect(profile, *bracket, config));
    }
    if !brackets.is_empty() {
        debug!(?direction, crossings = brackets.len(), "only opposite crossings");
        return EventResult::NoCrossing;
    }
    if samples.iter().all(Sample::is_above) {
        EventResult::AlwaysAbove
    } else {
        EventResult::AlwaysBelow
    }
}

fn culmination(
    profile: &Profile<'_>,
    samples: &[Sample],
    window: Period<UT>,
    kind: Extremum,
    config: &SearchConfig,
) -> Result<EventResult> {
    search::extremum(profile, samples, window, kind, config)
        .map(EventResult::At)
        .ok_or_else(|| Error::InvalidInput("empty search window".into()))
}
