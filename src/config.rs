// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Tunables for the event search and the result cache.
//!
//! Every struct has a [`Default`] matching the documented behaviour, so the
//! plain entry points ([`find_event`](crate::find_event),
//! [`Almanac::new`](crate::Almanac::new)) never need one. With the `serde`
//! feature the host application can persist them alongside its own settings.

use crate::error::{Error, Result};
use chrono::FixedOffset;
use qtty::{Day, Days, Seconds};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which elevation the event thresholds are compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HorizonReference {
    /// Topocentric elevation without refraction.
    #[default]
    Geometric,
    /// Refraction-corrected elevation, as reported by
    /// [`position`](crate::position).
    Apparent,
}

/// The frame that decides where a civil day starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LocalFrame {
    /// Local mean time: UT shifted by `longitude / 15` hours.
    #[default]
    MeanSolar,
    /// A fixed UTC offset in seconds east of Greenwich (a zone's standard time).
    FixedOffset { seconds_east: i32 },
}

impl LocalFrame {
    /// Build from a chrono offset.
    pub fn fixed(offset: FixedOffset) -> Self {
        LocalFrame::FixedOffset {
            seconds_east: offset.local_minus_utc(),
        }
    }

    /// Offset of local midnight from UT midnight for an observer at
    /// `longitude_deg`, in days (east positive).
    pub(crate) fn offset_days(&self, longitude_deg: f64) -> Days {
        match *self {
            LocalFrame::MeanSolar => Days::new(longitude_deg / 360.0),
            LocalFrame::FixedOffset { seconds_east } => {
                Seconds::new(f64::from(seconds_east)).to::<Day>()
            }
        }
    }
}

/// Event search parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Coarse sampling step across the day.
    pub step_seconds: f64,
    /// Refinement stops once the bracket is narrower than this.
    pub tolerance_seconds: f64,
    /// Hard cap on refinement iterations per event.
    pub max_iterations: u32,
    pub horizon: HorizonReference,
    pub frame: LocalFrame,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            step_seconds: 600.0,
            tolerance_seconds: 1.0,
            max_iterations: 30,
            horizon: HorizonReference::Geometric,
            frame: LocalFrame::MeanSolar,
        }
    }
}

impl SearchConfig {
    /// Coarse step as a day quantity.
    pub fn step(&self) -> Days {
        Seconds::new(self.step_seconds).to::<Day>()
    }

    /// Refinement tolerance as a day quantity.
    pub fn tolerance(&self) -> Days {
        Seconds::new(self.tolerance_seconds).to::<Day>()
    }

    /// Reject settings that would make the search loop meaningless.
    pub fn validate(&self) -> Result<()> {
        if !self.step_seconds.is_finite() || self.step_seconds <= 0.0 || self.step_seconds > 21_600.0 {
            return Err(Error::InvalidInput(format!(
                "search step {} s outside (0, 21600]",
                self.step_seconds
            )));
        }
        if !self.tolerance_seconds.is_finite() || self.tolerance_seconds <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "search tolerance {} s must be positive",
                self.tolerance_seconds
            )));
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidInput("max_iterations must be at least 1".into()));
        }
        if let LocalFrame::FixedOffset { seconds_east } = self.frame {
            if seconds_east.abs() >= 86_400 {
                return Err(Error::InvalidInput(format!(
                    "UTC offset {seconds_east} s is a day or more"
                )));
            }
        }
        Ok(())
    }
}

/// Result cache parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CacheConfig {
    /// Lifetime of a position entry.
    pub position_ttl_seconds: u64,
    /// Lifetime of an event (or day-event list) entry.
    pub event_ttl_seconds: u64,
    /// Decimals kept when rounding observer coordinates into a key.
    pub coordinate_decimals: u8,
    /// Width of the instant bucket for position keys.
    pub instant_bucket_seconds: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            position_ttl_seconds: 300,
            event_ttl_seconds: 6 * 3600,
            coordinate_decimals: 3,
            instant_bucket_seconds: 60,
        }
    }
}

impl CacheConfig {
    pub fn position_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.position_ttl_seconds)
    }

    pub fn event_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.event_ttl_seconds)
    }
}

/// Everything an [`Almanac`](crate::Almanac) needs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub search: SearchConfig,
    pub cache: CacheConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SearchConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.step().value() - 600.0 / 86_400.0).abs() < 1e-15);
        assert_eq!(config.horizon, HorizonReference::Geometric);
    }

    #[test]
    fn rejects_degenerate_search_settings() {
        let bad = [
            SearchConfig {
                step_seconds: 0.0,
                ..Default::default()
            },
            SearchConfig {
                step_seconds: f64::NAN,
                ..Default::default()
            },
            SearchConfig {
                tolerance_seconds: -1.0,
                ..Default::default()
            },
            SearchConfig {
                max_iterations: 0,
                ..Default::default()
            },
            SearchConfig {
                frame: LocalFrame::FixedOffset { seconds_east: 90_000 },
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(Error::InvalidInput(_))), "{config:?}");
        }
    }

    #[test]
    fn frame_offsets() {
        assert!((LocalFrame::MeanSolar.offset_days(90.0).value() - 0.25).abs() < 1e-15);
        let cet = LocalFrame::fixed(FixedOffset::east_opt(3600).unwrap());
        assert_eq!(cet, LocalFrame::FixedOffset { seconds_east: 3600 });
        assert!((cet.offset_days(-120.0).value() - 1.0 / 24.0).abs() < 1e-12);
    }

    #[test]
    fn cache_ttls() {
        let config = CacheConfig::default();
        assert_eq!(config.position_ttl().as_secs(), 300);
        assert_eq!(config.event_ttl().as_secs(), 21_600);
    }
}
