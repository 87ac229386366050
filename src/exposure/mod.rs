// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Exposure triangle: values, stop scales and the equivalence solver.
//!
//! ```
//! use photoplan::{solve_shutter_speed, ExposureValue, StopScale};
//!
//! let base = ExposureValue::parse("1/125", "f/5.6", "100")?;
//! let solved = solve_shutter_speed(&base, "f/11".parse()?, base.iso, StopScale::Full, 0.0)?;
//! assert_eq!(solved.shutter.to_string(), "1/30");
//! # Ok::<(), photoplan::Error>(())
//! ```

mod scale;
mod solver;
mod values;

pub use scale::StopScale;
pub use solver::{solve, solve_aperture, solve_iso, solve_shutter_speed};
pub use values::{Aperture, Iso, ShutterSpeed};

use crate::error::Result;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One leg of the triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExposureParameter {
    ShutterSpeed,
    Aperture,
    Iso,
}

impl fmt::Display for ExposureParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExposureParameter::ShutterSpeed => "shutter speed",
            ExposureParameter::Aperture => "aperture",
            ExposureParameter::Iso => "ISO",
        })
    }
}

/// A complete camera setting.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExposureValue {
    pub shutter: ShutterSpeed,
    pub aperture: Aperture,
    pub iso: Iso,
}

impl ExposureValue {
    pub fn new(shutter: ShutterSpeed, aperture: Aperture, iso: Iso) -> Self {
        Self {
            shutter,
            aperture,
            iso,
        }
    }

    /// Build from the three notations, e.g. `("1/125", "f/5.6", "100")`.
    pub fn parse(shutter: &str, aperture: &str, iso: &str) -> Result<Self> {
        Ok(Self::new(shutter.parse()?, aperture.parse()?, iso.parse()?))
    }

    /// Exposure value normalised to ISO 100:
    /// `log2(N²/t) − log2(S/100)`.
    pub fn ev100(&self) -> f64 {
        let n = self.aperture.f_number();
        (n * n / self.shutter.seconds()).log2() - (f64::from(self.iso.value()) / 100.0).log2()
    }
}

impl fmt::Display for ExposureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ISO {}", self.shutter, self.aperture, self.iso)
    }
}
