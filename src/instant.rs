// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time–scale parameterised instant.
//!
//! [`Time<S>`] stores a continuous day count since **J2000.0**
//! (2000-01-01T12:00) as a [`Days`] quantity. The marker `S: TimeScale`
//! decides which clock that count is read on: [`UT`](crate::UT) for
//! external timestamps and Earth rotation, [`TT`](crate::TT) for the
//! ephemeris series. Converting between the two applies ΔT.
//!
//! Sub-day arithmetic is plain addition of [`Days`]; instants are never
//! mutated in place by the engines.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use qtty::*;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Absolute Julian Day of the J2000.0 epoch.
pub const J2000_JD: f64 = 2_451_545.0;

/// Days between the Unix epoch (1970-01-01T00:00) and J2000.0.
const UNIX_EPOCH_J2000: Days = Days::new(2_440_587.5 - J2000_JD);

/// One Julian century expressed in days.
pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

// ═══════════════════════════════════════════════════════════════════════════
// TimeScale trait
// ═══════════════════════════════════════════════════════════════════════════

/// Marker trait for time scales.
///
/// A scale provides a display label and a pair of conversions between its
/// own day count and the canonical **TT day count since J2000.0**.
pub trait TimeScale: Copy + Clone + std::fmt::Debug + PartialEq + PartialOrd + 'static {
    /// Display label used by [`Time`] formatting.
    const LABEL: &'static str;

    /// Convert a day count on this scale to TT days since J2000.0.
    fn to_tt(value: Days) -> Days;

    /// Convert TT days since J2000.0 back to this scale.
    fn from_tt(tt: Days) -> Days;
}

// ═══════════════════════════════════════════════════════════════════════════
// Time<S>
// ═══════════════════════════════════════════════════════════════════════════

/// A point on time scale `S`, counted in days from J2000.0.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Time<S: TimeScale> {
    quantity: Days,
    _scale: PhantomData<S>,
}

impl<S: TimeScale> Time<S> {
    /// The J2000.0 epoch itself.
    pub const J2000: Self = Self::new(0.0);

    /// Create from a raw day count since J2000.0.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            quantity: Days::new(value),
            _scale: PhantomData,
        }
    }

    /// Create from a [`Days`] quantity.
    #[inline]
    pub const fn from_days(days: Days) -> Self {
        Self {
            quantity: days,
            _scale: PhantomData,
        }
    }

    /// Checked constructor: rejects NaN and infinities.
    pub fn try_new(value: f64) -> Result<Self> {
        if value.is_finite() {
            Ok(Self::new(value))
        } else {
            Err(Error::InvalidInstant(format!(
                "day count {value} is not finite"
            )))
        }
    }

    /// Build from an absolute Julian Day on this scale.
    #[inline]
    pub fn from_julian_day(jd: f64) -> Self {
        Self::new(jd - J2000_JD)
    }

    /// Days since J2000.0 as a quantity.
    #[inline]
    pub const fn quantity(&self) -> Days {
        self.quantity
    }

    /// Days since J2000.0 as a scalar.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.quantity.value()
    }

    /// Absolute Julian Day on this scale.
    #[inline]
    pub fn julian_day(&self) -> f64 {
        self.value() + J2000_JD
    }

    /// Julian centuries since J2000.0 on this scale.
    #[inline]
    pub fn julian_centuries(&self) -> f64 {
        (self.quantity / JULIAN_CENTURY).simplify().value()
    }

    /// `true` when the day count is a finite number.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.value().is_finite()
    }

    /// Convert this instant to another time scale through TT.
    #[inline]
    pub fn to<T: TimeScale>(&self) -> Time<T> {
        Time::<T>::from_days(T::from_tt(S::to_tt(self.quantity)))
    }

    /// Convert to a `chrono::DateTime<Utc>`.
    ///
    /// The UTC timestamp is read off the UT axis (leap seconds ignored).
    /// Returns `None` when the value is not finite or falls outside chrono's
    /// representable range.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        use crate::scales::UT;
        let ut = self.to::<UT>().quantity();
        let seconds_since_epoch = (ut - UNIX_EPOCH_J2000).to::<Second>().value();
        if !seconds_since_epoch.is_finite() {
            return None;
        }
        // Microsecond rounding keeps whole-second inputs on whole seconds.
        let micros = (seconds_since_epoch * 1e6).round();
        if micros.abs() > 9.0e15 {
            return None;
        }
        let micros = micros as i64;
        let secs = micros.div_euclid(1_000_000);
        let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;
        DateTime::<Utc>::from_timestamp(secs, nanos)
    }

    /// Build an instant from a `chrono::DateTime<Utc>`.
    ///
    /// The timestamp is interpreted as Universal Time and converted to the
    /// target scale (adding ΔT when `S` is TT-based).
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        use crate::scales::UT;
        let seconds = Seconds::new(datetime.timestamp() as f64);
        let nanos = Seconds::new(datetime.timestamp_subsec_nanos() as f64 / 1e9);
        let ut = UNIX_EPOCH_J2000 + (seconds + nanos).to::<Day>();
        Time::<UT>::from_days(ut).to::<S>()
    }

    /// Earlier of two instants.
    #[inline]
    pub const fn min(self, other: Self) -> Self {
        Self::from_days(self.quantity.min_const(other.quantity))
    }

    /// Later of two instants.
    #[inline]
    pub const fn max(self, other: Self) -> Self {
        Self::from_days(self.quantity.max_const(other.quantity))
    }

    /// Midpoint between two instants.
    #[inline]
    pub const fn mean(self, other: Self) -> Self {
        Self::from_days(self.quantity.const_add(other.quantity).const_div(2.0))
    }
}

// ── Display ───────────────────────────────────────────────────────────────

impl<S: TimeScale> std::fmt::Display for Time<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_utc() {
            Some(utc) => write!(f, "{} {}", S::LABEL, utc.format("%Y-%m-%dT%H:%M:%S%.3fZ")),
            None => write!(f, "{} J2000{:+}", S::LABEL, self.quantity),
        }
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl<S: TimeScale> Serialize for Time<S> {
    fn serialize<Ser>(&self, serializer: Ser) -> std::result::Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_f64(self.value())
    }
}

#[cfg(feature = "serde")]
impl<'de, S: TimeScale> Deserialize<'de> for Time<S> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Ok(Self::new(v))
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl<S: TimeScale> Add<Days> for Time<S> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity + rhs)
    }
}

impl<S: TimeScale> AddAssign<Days> for Time<S> {
    #[inline]
    fn add_assign(&mut self, rhs: Days) {
        self.quantity += rhs;
    }
}

impl<S: TimeScale> Sub<Days> for Time<S> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity - rhs)
    }
}

impl<S: TimeScale> SubAssign<Days> for Time<S> {
    #[inline]
    fn sub_assign(&mut self, rhs: Days) {
        self.quantity -= rhs;
    }
}

impl<S: TimeScale> Sub for Time<S> {
    type Output = Days;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.quantity - rhs.quantity
    }
}

impl<S: TimeScale> From<Time<S>> for Days {
    #[inline]
    fn from(time: Time<S>) -> Self {
        time.quantity
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TimeInstant trait
// ═══════════════════════════════════════════════════════════════════════════

/// Trait for types that represent a point in time.
///
/// Implemented by [`Time<S>`] and `DateTime<Utc>` so that
/// [`Interval`](crate::Interval) works over either representation.
pub trait TimeInstant: Copy + Clone + PartialEq + PartialOrd + Sized {
    /// The duration type used for arithmetic operations.
    type Duration;

    /// Convert this time instant to UTC.
    fn to_utc(&self) -> Option<DateTime<Utc>>;

    /// Create a time instant from UTC.
    fn from_utc(datetime: DateTime<Utc>) -> Self;

    /// `self − other`.
    fn difference(&self, other: &Self) -> Self::Duration;
}

impl<S: TimeScale> TimeInstant for Time<S> {
    type Duration = Days;

    #[inline]
    fn to_utc(&self) -> Option<DateTime<Utc>> {
        Time::to_utc(self)
    }

    #[inline]
    fn from_utc(datetime: DateTime<Utc>) -> Self {
        Time::from_utc(datetime)
    }

    #[inline]
    fn difference(&self, other: &Self) -> Self::Duration {
        *self - *other
    }
}

impl TimeInstant for DateTime<Utc> {
    type Duration = chrono::Duration;

    fn to_utc(&self) -> Option<DateTime<Utc>> {
        Some(*self)
    }

    fn from_utc(datetime: DateTime<Utc>) -> Self {
        datetime
    }

    fn difference(&self, other: &Self) -> Self::Duration {
        *self - *other
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
