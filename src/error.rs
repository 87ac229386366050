// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types shared by every engine in the crate.
//!
//! All failures are returned as values; nothing here is fatal to the process
//! and nothing is retried internally.
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | [`InvalidObserver`](Error::InvalidObserver) | [`Observer`](crate::Observer) validation |
//! | [`InvalidInstant`](Error::InvalidInstant) | non-finite instants, dates outside chrono's range |
//! | [`Parse`](Error::Parse) | malformed shutter / aperture / ISO strings |
//! | [`Overexposed`](Error::Overexposed) | solved value above the stop scale |
//! | [`Underexposed`](Error::Underexposed) | solved value below the stop scale |
//! | [`InvalidInput`](Error::InvalidInput) | body/kind mismatch, bad search or solver arguments |

use crate::exposure::ExposureParameter;
use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Latitude/longitude/elevation is NaN, infinite or out of range.
    #[error("invalid observer: {0}")]
    InvalidObserver(String),

    /// The instant is not finite or cannot be represented.
    #[error("invalid instant: {0}")]
    InvalidInstant(String),

    /// A shutter speed, aperture or ISO string could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The solved value lies above the scale's maximum beyond tolerance.
    #[error("{parameter} overexposed by {stops:.2} stops")]
    Overexposed {
        parameter: ExposureParameter,
        stops: f64,
    },

    /// The solved value lies below the scale's minimum beyond tolerance.
    #[error("{parameter} underexposed by {stops:.2} stops")]
    Underexposed {
        parameter: ExposureParameter,
        stops: f64,
    },

    /// Arguments are well-formed individually but not as a combination.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Malformed exposure notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed shutter speed `{0}` (expected `1/125` or `2\"`)")]
    ShutterSpeed(String),

    #[error("malformed aperture `{0}` (expected `f/5.6`)")]
    Aperture(String),

    #[error("malformed ISO `{0}` (expected a positive integer)")]
    Iso(String),
}
