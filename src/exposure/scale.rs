// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Canonical stop tables.
//!
//! Every table is ascending and strictly monotonic in its numeric value.
//! Shutter speeds run from the shortest exposure to the longest.

use super::values::{Aperture, Iso, ShutterSpeed};
use once_cell::sync::Lazy;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Granularity of the dials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StopScale {
    #[default]
    Full,
    Half,
    Third,
}

// ── Raw tables ────────────────────────────────────────────────────────────

const FULL_SHUTTER: &[f64] = &[
    1.0 / 8000.0, 1.0 / 4000.0, 1.0 / 2000.0, 1.0 / 1000.0, 1.0 / 500.0, 1.0 / 250.0,
    1.0 / 125.0, 1.0 / 60.0, 1.0 / 30.0, 1.0 / 15.0, 1.0 / 8.0, 1.0 / 4.0, 1.0 / 2.0,
    1.0, 2.0, 4.0, 8.0, 15.0, 30.0,
];

const HALF_SHUTTER: &[f64] = &[
    1.0 / 8000.0, 1.0 / 6000.0, 1.0 / 4000.0, 1.0 / 3000.0, 1.0 / 2000.0, 1.0 / 1500.0,
    1.0 / 1000.0, 1.0 / 750.0, 1.0 / 500.0, 1.0 / 350.0, 1.0 / 250.0, 1.0 / 180.0,
    1.0 / 125.0, 1.0 / 90.0, 1.0 / 60.0, 1.0 / 45.0, 1.0 / 30.0, 1.0 / 20.0, 1.0 / 15.0,
    1.0 / 10.0, 1.0 / 8.0, 1.0 / 6.0, 1.0 / 4.0, 1.0 / 3.0, 1.0 / 2.0, 1.0 / 1.5,
    1.0, 1.5, 2.0, 3.0, 4.0, 6.0, 8.0, 12.0, 15.0, 20.0, 30.0,
];

const THIRD_SHUTTER: &[f64] = &[
    1.0 / 8000.0, 1.0 / 6400.0, 1.0 / 5000.0, 1.0 / 4000.0, 1.0 / 3200.0, 1.0 / 2500.0,
    1.0 / 2000.0, 1.0 / 1600.0, 1.0 / 1250.0, 1.0 / 1000.0, 1.0 / 800.0, 1.0 / 640.0,
    1.0 / 500.0, 1.0 / 400.0, 1.0 / 320.0, 1.0 / 250.0, 1.0 / 200.0, 1.0 / 160.0,
    1.0 / 125.0, 1.0 / 100.0, 1.0 / 80.0, 1.0 / 60.0, 1.0 / 50.0, 1.0 / 40.0, 1.0 / 30.0,
    1.0 / 25.0, 1.0 / 20.0, 1.0 / 15.0, 1.0 / 13.0, 1.0 / 10.0, 1.0 / 8.0, 1.0 / 6.0,
    1.0 / 5.0, 1.0 / 4.0, 1.0 / 3.0, 1.0 / 2.5, 1.0 / 2.0, 1.0 / 1.6, 1.0 / 1.3,
    1.0, 1.3, 1.6, 2.0, 2.5, 3.2, 4.0, 5.0, 6.0, 8.0, 10.0, 13.0, 15.0, 20.0, 25.0, 30.0,
];

const FULL_APERTURE: &[f64] = &[
    1.0, 1.4, 2.0, 2.8, 4.0, 5.6, 8.0, 11.0, 16.0, 22.0, 32.0, 45.0, 64.0,
];

const HALF_APERTURE: &[f64] = &[
    1.0, 1.2, 1.4, 1.7, 2.0, 2.4, 2.8, 3.3, 4.0, 4.8, 5.6, 6.7, 8.0, 9.5, 11.0, 13.0,
    16.0, 19.0, 22.0, 27.0, 32.0, 38.0, 45.0, 54.0, 64.0,
];

const THIRD_APERTURE: &[f64] = &[
    1.0, 1.1, 1.2, 1.4, 1.6, 1.8, 2.0, 2.2, 2.5, 2.8, 3.2, 3.5, 4.0, 4.5, 5.0, 5.6, 6.3,
    7.1, 8.0, 9.0, 10.0, 11.0, 13.0, 14.0, 16.0, 18.0, 20.0, 22.0, 25.0, 29.0, 32.0, 36.0,
    40.0, 45.0, 51.0, 57.0, 64.0,
];

const FULL_ISO: &[u32] = &[50, 100, 200, 400, 800, 1600, 3200];

const HALF_ISO: &[u32] = &[50, 70, 100, 140, 200, 280, 400, 560, 800, 1100, 1600, 2200, 3200];

const THIRD_ISO: &[u32] = &[
    50, 64, 80, 100, 125, 160, 200, 250, 320, 400, 500, 640, 800, 1000, 1250, 1600, 2000,
    2500, 3200,
];

// ── Typed tables ──────────────────────────────────────────────────────────

/// One scale's values and their canonical strings.
struct Table {
    shutter_speeds: Vec<ShutterSpeed>,
    apertures: Vec<Aperture>,
    isos: Vec<Iso>,
    shutter_labels: Vec<String>,
    aperture_labels: Vec<String>,
    iso_labels: Vec<String>,
}

impl Table {
    fn build(shutter: &[f64], aperture: &[f64], iso: &[u32]) -> Self {
        let shutter_speeds: Vec<_> = shutter.iter().copied().map(ShutterSpeed::from_table).collect();
        let apertures: Vec<_> = aperture.iter().copied().map(Aperture::from_table).collect();
        let isos: Vec<_> = iso.iter().copied().map(Iso::from_table).collect();
        Self {
            shutter_labels: shutter_speeds.iter().map(ToString::to_string).collect(),
            aperture_labels: apertures.iter().map(ToString::to_string).collect(),
            iso_labels: isos.iter().map(ToString::to_string).collect(),
            shutter_speeds,
            apertures,
            isos,
        }
    }
}

static FULL: Lazy<Table> = Lazy::new(|| Table::build(FULL_SHUTTER, FULL_APERTURE, FULL_ISO));
static HALF: Lazy<Table> = Lazy::new(|| Table::build(HALF_SHUTTER, HALF_APERTURE, HALF_ISO));
static THIRD: Lazy<Table> = Lazy::new(|| Table::build(THIRD_SHUTTER, THIRD_APERTURE, THIRD_ISO));

impl StopScale {
    pub const ALL: [StopScale; 3] = [StopScale::Full, StopScale::Half, StopScale::Third];

    fn table(self) -> &'static Table {
        match self {
            StopScale::Full => &FULL,
            StopScale::Half => &HALF,
            StopScale::Third => &THIRD,
        }
    }

    /// Stops between adjacent entries.
    pub fn step(self) -> f64 {
        match self {
            StopScale::Full => 1.0,
            StopScale::Half => 0.5,
            StopScale::Third => 1.0 / 3.0,
        }
    }

    pub fn shutter_speeds(self) -> &'static [ShutterSpeed] {
        &self.table().shutter_speeds
    }

    pub fn apertures(self) -> &'static [Aperture] {
        &self.table().apertures
    }

    pub fn isos(self) -> &'static [Iso] {
        &self.table().isos
    }

    /// Canonical strings for pickers, same order as [`shutter_speeds`](Self::shutter_speeds).
    pub fn shutter_speed_labels(self) -> &'static [String] {
        &self.table().shutter_labels
    }

    pub fn aperture_labels(self) -> &'static [String] {
        &self.table().aperture_labels
    }

    pub fn iso_labels(self) -> &'static [String] {
        &self.table().iso_labels
    }
}

/// Index of the entry closest to `value` by absolute difference; ties go to
/// the smaller entry. `None` only for an empty table.
pub(crate) fn nearest_index(table: impl IntoIterator<Item = f64>, value: f64) -> Option<usize> {
    table
        .into_iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, v)| {
            let d = (v - value).abs();
            match best {
                Some((_, bd)) if bd <= d => best,
                _ => Some((i, d)),
            }
        })
        .map(|(i, _)| i)
}
