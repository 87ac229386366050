// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Photography planning core
//!
//! Where the Sun and Moon are, when they cross the horizon and twilight
//! altitudes, and which camera settings keep an exposure equivalent.
//!
//! # Engines
//!
//! | Engine | Entry points |
//! |--------|--------------|
//! | Position | [`position`], [`lunar_phase`] |
//! | Events | [`find_event`], [`find_event_with`], [`day_events`], [`altitude_periods`] |
//! | Cache | [`ResultCache`], [`Almanac`] |
//! | Exposure | [`solve_shutter_speed`], [`solve_aperture`], [`solve_iso`], [`solve`] |
//! | Predictive light | [`light_windows`], [`predict_exposure`] |
//!
//! # Time
//!
//! - [`Time<S>`]: instant parameterised by a [`TimeScale`] marker, stored
//!   as days since J2000.0.
//! - [`Instant`]: alias for `Time<UT>`, the scale of external timestamps.
//!   Ephemeris series run on [`TT`]; the conversion applies ΔT.
//! - [`Period<S>`] / [`Interval<T>`]: half-open intervals with the set
//!   operations [`complement_within`] and [`intersect_periods`].
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use photoplan::{position, Body, Instant, Observer};
//!
//! let greenwich = Observer::new(51.48, 0.0)?;
//! let noon = Instant::from_utc(Utc.with_ymd_and_hms(2024, 3, 20, 12, 7, 0).unwrap());
//! let sun = position(Body::Sun, &greenwich, noon)?;
//! assert!((sun.azimuth_deg - 180.0).abs() < 1.0);
//! # Ok::<(), photoplan::Error>(())
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for configuration, positions,
//!   event results, periods and exposure values.

mod almanac;
mod cache;
mod config;
mod delta_t;
mod error;
mod events;
mod exposure;
pub(crate) mod instant;
mod light;
pub mod math;
mod observer;
mod period;
mod position;
pub(crate) mod scales;
pub mod sidereal;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use almanac::Almanac;
pub use cache::{Bucket, CacheEntry, CacheKey, Query, ResultCache};
pub use config::{CacheConfig, EngineConfig, HorizonReference, LocalFrame, SearchConfig};
pub use error::{Error, ParseError, Result};
pub use events::{
    altitude_periods, altitude_periods_with, day_events, day_events_with, day_window, find_event,
    find_event_with, Direction, EventResult, EventTarget, TwilightKind,
};
pub use exposure::{
    solve, solve_aperture, solve_iso, solve_shutter_speed, Aperture, ExposureParameter,
    ExposureValue, Iso, ShutterSpeed, StopScale,
};
pub use instant::{TimeInstant, TimeScale, Time, J2000_JD, JULIAN_CENTURY};
pub use light::{
    light_windows, light_windows_with, predict_exposure, scene_ev100, LightPhase, LightWindows,
    PredictedExposure, BLUE_HOUR_DEG, GOLDEN_HOUR_DEG,
};
pub use observer::Observer;
pub use period::{complement_within, intersect_periods, Interval, Period, UtcPeriod};
pub use position::{lunar_phase, position, Body, CelestialPosition, Instant, LunarPhase, MoonPhase};
pub use scales::{TT, UT};

/// ΔT = TT − UT at a UT instant.
pub fn delta_t(instant: Instant) -> qtty::Seconds {
    delta_t::delta_t_seconds(instant.quantity())
}
