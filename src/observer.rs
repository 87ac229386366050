// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Geographic observer.

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters, for the geometric horizon dip.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A location on Earth's surface.
///
/// Latitude is north-positive in `[-90, 90]`, longitude east-positive in
/// `[-180, 180]`. Construct through [`Observer::new`] so the ranges are
/// checked once; every engine trusts a constructed value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Observer {
    latitude_deg: f64,
    longitude_deg: f64,
    elevation_m: Option<f64>,
}

impl Observer {
    /// Validate and build an observer at sea level.
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Result<Self> {
        if !latitude_deg.is_finite() || !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(Error::InvalidObserver(format!(
                "latitude {latitude_deg} outside [-90, 90]"
            )));
        }
        if !longitude_deg.is_finite() || !(-180.0..=180.0).contains(&longitude_deg) {
            return Err(Error::InvalidObserver(format!(
                "longitude {longitude_deg} outside [-180, 180]"
            )));
        }
        Ok(Self {
            latitude_deg,
            longitude_deg,
            elevation_m: None,
        })
    }

    /// Attach a height above mean sea level.
    pub fn with_elevation(self, elevation_m: f64) -> Result<Self> {
        if !elevation_m.is_finite() {
            return Err(Error::InvalidObserver(format!(
                "elevation {elevation_m} is not finite"
            )));
        }
        Ok(Self {
            elevation_m: Some(elevation_m),
            ..self
        })
    }

    #[inline]
    pub fn latitude_deg(&self) -> f64 {
        self.latitude_deg
    }

    #[inline]
    pub fn longitude_deg(&self) -> f64 {
        self.longitude_deg
    }

    #[inline]
    pub fn elevation_m(&self) -> Option<f64> {
        self.elevation_m
    }

    /// Geometric dip of the sea horizon for the observer's height, degrees.
    ///
    /// `sqrt(2h/R)` radians; zero at or below sea level.
    pub fn horizon_dip_deg(&self) -> f64 {
        match self.elevation_m {
            Some(h) if h > 0.0 => (2.0 * h / EARTH_RADIUS_M).sqrt().to_degrees(),
            _ => 0.0,
        }
    }

    /// Re-check the invariants.
    ///
    /// Values deserialised through the `serde` feature skip [`Observer::new`],
    /// so engines call this before trusting them.
    pub(crate) fn validate(&self) -> Result<()> {
        let checked = Self::new(self.latitude_deg, self.longitude_deg)?;
        match self.elevation_m {
            Some(h) => checked.with_elevation(h).map(|_| ()),
            None => Ok(()),
        }
    }

    /// Bypass the checks, as a deserialised value would.
    #[cfg(test)]
    pub(crate) fn unchecked(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            elevation_m: None,
        }
    }
}
