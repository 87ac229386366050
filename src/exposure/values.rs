// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Shutter speed, aperture and ISO values with their photographic notation.
//!
//! | Type | Accepts | Canonical form |
//! |------|---------|----------------|
//! | [`ShutterSpeed`] | `1/125`, `1/1.5`, `2"`, `1.3"` | `1/N` below one second, `N"` from one second up |
//! | [`Aperture`] | `f/5.6`, `F/8` | `f/5.6` |
//! | [`Iso`] | `400` | `400` |

use crate::error::{Error, ParseError, Result};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Format with at most `places` decimals, dropping trailing zeros.
fn trimmed(value: f64, places: usize) -> String {
    let s = format!("{value:.places$}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

fn positive(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite() && *v > 0.0)
}

// ═══════════════════════════════════════════════════════════════════════════
// ShutterSpeed
// ═══════════════════════════════════════════════════════════════════════════

/// Exposure time in seconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ShutterSpeed(f64);

impl ShutterSpeed {
    pub fn from_seconds(seconds: f64) -> Result<Self> {
        if seconds.is_finite() && seconds > 0.0 {
            Ok(Self(seconds))
        } else {
            Err(Error::InvalidInput(format!("shutter speed {seconds} s must be positive")))
        }
    }

    /// Table constructor; callers guarantee a positive value.
    pub(crate) const fn from_table(seconds: f64) -> Self {
        Self(seconds)
    }

    #[inline]
    pub fn seconds(&self) -> f64 {
        self.0
    }
}

impl FromStr for ShutterSpeed {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let text = s.trim();
        let err = || ParseError::ShutterSpeed(s.to_string());

        let seconds = if let Some(long) = text.strip_suffix('"') {
            // Sub-second speeds are written as fractions.
            positive(long).filter(|s| *s >= 1.0).ok_or_else(err)?
        } else if let Some((num, den)) = text.split_once('/') {
            positive(num).ok_or_else(err)? / positive(den).ok_or_else(err)?
        } else {
            return Err(err());
        };
        Ok(Self(seconds))
    }
}

impl fmt::Display for ShutterSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.0;
        if seconds >= 1.0 - 1e-9 {
            return write!(f, "{}\"", trimmed(seconds, 1));
        }
        let denominator = 1.0 / seconds;
        if (denominator - denominator.round()).abs() < 1e-6 * denominator {
            write!(f, "1/{}", denominator.round())
        } else {
            write!(f, "1/{}", trimmed(denominator, 1))
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Aperture
// ═══════════════════════════════════════════════════════════════════════════

/// Relative aperture (f-number).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Aperture(f64);

impl Aperture {
    pub fn from_f_number(n: f64) -> Result<Self> {
        if n.is_finite() && n > 0.0 {
            Ok(Self(n))
        } else {
            Err(Error::InvalidInput(format!("f-number {n} must be positive")))
        }
    }

    pub(crate) const fn from_table(n: f64) -> Self {
        Self(n)
    }

    #[inline]
    pub fn f_number(&self) -> f64 {
        self.0
    }
}

impl FromStr for Aperture {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let text = s.trim();
        text.strip_prefix("f/")
            .or_else(|| text.strip_prefix("F/"))
            .and_then(positive)
            .map(Self)
            .ok_or_else(|| ParseError::Aperture(s.to_string()))
    }
}

impl fmt::Display for Aperture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f/{}", trimmed(self.0, 1))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Iso
// ═══════════════════════════════════════════════════════════════════════════

/// Sensor sensitivity (ISO arithmetic speed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Iso(u32);

impl Iso {
    pub fn new(value: u32) -> Result<Self> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(Error::InvalidInput("ISO must be positive".into()))
        }
    }

    pub(crate) const fn from_table(value: u32) -> Self {
        Self(value)
    }

    #[inline]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl FromStr for Iso {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .filter(|v| *v > 0)
            .map(Self)
            .ok_or_else(|| ParseError::Iso(s.to_string()))
    }
}

impl fmt::Display for Iso {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

/// Values travel in their canonical notation and are re-validated on the
/// way in.
macro_rules! serde_via_notation {
    ($($ty:ty),*) => {$(
        #[cfg(feature = "serde")]
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.collect_str(self)
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let text = String::deserialize(deserializer)?;
                text.parse().map_err(serde::de::Error::custom)
            }
        }
    )*};
}

serde_via_notation!(ShutterSpeed, Aperture, Iso);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fractional_and_long_shutter_speeds() {
        let cases = [
            ("1/125", 1.0 / 125.0),
            ("1/1.5", 1.0 / 1.5),
            ("2\"", 2.0),
            ("1.3\"", 1.3),
            (" 1/8000 ", 1.0 / 8000.0),
        ];
        for (text, seconds) in cases {
            let parsed: ShutterSpeed = text.parse().unwrap();
            assert!((parsed.seconds() - seconds).abs() < 1e-12, "{text}");
        }
    }

    #[test]
    fn rejects_malformed_shutter_speeds() {
        for text in ["", "125", "1/0", "1/-4", "abc\"", "1/x", "0\"", "\"", "0.5\"", "0.99\""] {
            assert_eq!(
                text.parse::<ShutterSpeed>(),
                Err(ParseError::ShutterSpeed(text.to_string())),
                "{text}"
            );
        }
    }

    #[test]
    fn shutter_display_is_canonical() {
        let show = |s: f64| ShutterSpeed::from_seconds(s).unwrap().to_string();
        assert_eq!(show(1.0 / 125.0), "1/125");
        assert_eq!(show(1.0 / 1.5), "1/1.5");
        assert_eq!(show(1.0), "1\"");
        assert_eq!(show(2.5), "2.5\"");
        assert_eq!(show(30.0), "30\"");
        assert_eq!(show(1.0 / 8000.0), "1/8000");
    }

    #[test]
    fn aperture_notation() {
        assert_eq!("f/5.6".parse::<Aperture>().unwrap().f_number(), 5.6);
        assert_eq!("F/8".parse::<Aperture>().unwrap().to_string(), "f/8");
        assert_eq!(Aperture::from_f_number(11.0).unwrap().to_string(), "f/11");
        assert!(matches!("5.6".parse::<Aperture>(), Err(ParseError::Aperture(_))));
        assert!("f/0".parse::<Aperture>().is_err());
    }

    #[test]
    fn iso_notation() {
        assert_eq!("400".parse::<Iso>().unwrap().value(), 400);
        assert_eq!(Iso::new(3200).unwrap().to_string(), "3200");
        for text in ["0", "-100", "ISO 100", "1e3"] {
            assert!(matches!(text.parse::<Iso>(), Err(ParseError::Iso(_))), "{text}");
        }
    }

    #[test]
    fn constructors_reject_non_positive() {
        assert!(ShutterSpeed::from_seconds(0.0).is_err());
        assert!(ShutterSpeed::from_seconds(f64::NAN).is_err());
        assert!(Aperture::from_f_number(-2.0).is_err());
        assert!(Iso::new(0).is_err());
    }
}
