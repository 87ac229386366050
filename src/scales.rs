// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-scale marker types.
//!
//! | Marker | Description | Used for |
//! |--------|-------------|----------|
//! | [`UT`] | Universal Time | external timestamps, sidereal time, day windows |
//! | [`TT`] | Terrestrial Time | solar and lunar series |
//!
//! Both count days from J2000.0; `TT = UT + ΔT`.

use crate::instant::TimeScale;
use qtty::Days;

/// Terrestrial Time — the uniform axis the ephemeris series are written in.
///
/// This is the canonical scale, so its conversions are the identity.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct TT;

impl TimeScale for TT {
    const LABEL: &'static str = "TT";

    #[inline(always)]
    fn to_tt(value: Days) -> Days {
        value
    }

    #[inline(always)]
    fn from_tt(tt: Days) -> Days {
        tt
    }
}

/// Universal Time — the civil scale tied to Earth's rotation.
///
/// Conversion to TT adds the epoch-dependent ΔT from
/// [`delta_t_seconds`](crate::delta_t::delta_t_seconds); the inverse uses a
/// short fixed-point iteration.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct UT;

impl TimeScale for UT {
    const LABEL: &'static str = "UT";

    #[inline]
    fn to_tt(ut: Days) -> Days {
        ut + crate::delta_t::delta_t_seconds(ut).to::<qtty::Day>()
    }

    #[inline]
    fn from_tt(tt: Days) -> Days {
        // ut + ΔT(ut) = tt; dΔT/dt is tiny so three rounds are plenty.
        let mut ut = tt;
        for _ in 0..3 {
            ut = tt - crate::delta_t::delta_t_seconds(ut).to::<qtty::Day>();
        }
        ut
    }
}
