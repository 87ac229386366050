// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Celestial position calculator.
//!
//! [`position`] answers "where is the Sun / Moon in my sky right now":
//!
//! ```text
//! instant (UT) ──ΔT──▶ T (TT centuries)
//!                       ├─ sun_ecliptic / moon_ecliptic   (λ, β, Δ)
//!                       ├─ nutation + mean obliquity      (ε)
//!                       └─ ecliptic_to_equatorial         (α, δ)
//! instant (UT) ──▶ apparent sidereal time + longitude     (LST)
//! H = LST − α ──▶ to_horizontal ──▶ parallax ──▶ refraction
//! ```
//!
//! The series are self-contained low-order expansions. A higher-order
//! theory can replace [`sun`] or [`moon`] without touching the callers.

pub(crate) mod coords;
pub(crate) mod moon;
pub(crate) mod sun;

pub use moon::{LunarPhase, MoonPhase};

use crate::error::{Error, Result};
use crate::instant::Time;
use crate::observer::Observer;
use crate::scales::{TT, UT};
use crate::sidereal::{gast_deg, local_sidereal_deg};
use coords::{Ecliptic, Horizontal};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An instant on the UT axis: the type every public entry point takes.
pub type Instant = Time<UT>;

/// Bodies the calculator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Body {
    Sun,
    Moon,
}

impl std::fmt::Display for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Body::Sun => f.write_str("Sun"),
            Body::Moon => f.write_str("Moon"),
        }
    }
}

/// Where a body appears to the observer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CelestialPosition {
    /// From true north, clockwise, `[0, 360)`. 0 at the poles.
    pub azimuth_deg: f64,
    /// Apparent (refracted) elevation, `[-90, 90]`.
    pub elevation_deg: f64,
    /// Topocentric elevation without refraction.
    pub geometric_elevation_deg: f64,
    /// Geocentric distance, km. Informational.
    pub distance_km: f64,
    /// Only populated for [`Body::Moon`].
    pub phase: Option<LunarPhase>,
}

impl CelestialPosition {
    /// Whether the body is above the apparent horizon.
    pub fn is_above_horizon(&self) -> bool {
        self.elevation_deg > 0.0
    }
}

/// Geocentric ecliptic state of a body at an instant, with the epoch's
/// nutation so callers can finish the equatorial transform.
struct EclipticState {
    body: Ecliptic,
    obliquity_deg: f64,
    nutation_longitude_deg: f64,
}

fn ecliptic_state(body: Body, tt: Time<TT>) -> EclipticState {
    let t = tt.julian_centuries();
    let nutation = coords::nutation(t);
    let ecl = match body {
        Body::Sun => sun::sun_ecliptic(t, &nutation),
        Body::Moon => moon::moon_ecliptic(t, &nutation),
    };
    EclipticState {
        body: ecl,
        obliquity_deg: coords::mean_obliquity_deg(t) + nutation.obliquity_deg,
        nutation_longitude_deg: nutation.longitude_deg,
    }
}

/// Topocentric geometric horizontal coordinates.
///
/// This is the hot path of the event search; it skips validation and phase.
pub(crate) fn horizontal(body: Body, observer: &Observer, instant: Instant) -> Horizontal {
    topocentric(body, observer, instant).0
}

fn topocentric(body: Body, observer: &Observer, instant: Instant) -> (Horizontal, f64) {
    let state = ecliptic_state(body, instant.to::<TT>());
    let eq = coords::ecliptic_to_equatorial(state.body, state.obliquity_deg);

    let gast = gast_deg(instant, state.nutation_longitude_deg, state.obliquity_deg);
    let lst = local_sidereal_deg(gast, observer.longitude_deg());
    let hour_angle = lst - eq.right_ascension_deg;

    let geocentric = coords::to_horizontal(hour_angle, eq.declination_deg, observer.latitude_deg());
    let h = Horizontal {
        azimuth_deg: geocentric.azimuth_deg,
        elevation_deg: coords::topocentric_elevation(geocentric.elevation_deg, eq.distance_km),
    };
    (h, eq.distance_km)
}

/// Apparent position of `body` for `observer` at `instant`.
///
/// Pure: the same inputs always give the same output.
///
/// # Errors
/// * [`Error::InvalidObserver`] for an out-of-range observer
/// * [`Error::InvalidInstant`] for a non-finite instant
pub fn position(body: Body, observer: &Observer, instant: Instant) -> Result<CelestialPosition> {
    validate_query(observer, instant)?;

    let (h, distance_km) = topocentric(body, observer, instant);
    let phase = match body {
        Body::Sun => None,
        Body::Moon => Some(lunar_phase(instant)),
    };

    Ok(CelestialPosition {
        azimuth_deg: h.azimuth_deg,
        elevation_deg: coords::apparent_elevation(h.elevation_deg),
        geometric_elevation_deg: h.elevation_deg,
        distance_km,
        phase,
    })
}

/// Observer and instant checks shared by [`position`] and its cached callers.
pub(crate) fn validate_query(observer: &Observer, instant: Instant) -> Result<()> {
    observer.validate()?;
    if !instant.is_finite() {
        return Err(Error::InvalidInstant(format!(
            "day count {} is not finite",
            instant.value()
        )));
    }
    Ok(())
}

/// Phase and illumination of the Moon at `instant` (geocentric).
pub fn lunar_phase(instant: Instant) -> LunarPhase {
    let tt = instant.to::<TT>();
    let moon = ecliptic_state(Body::Moon, tt).body;
    let sun = ecliptic_state(Body::Sun, tt).body;
    moon::lunar_phase(&moon, &sun)
}
