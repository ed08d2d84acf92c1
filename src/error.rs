// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type shared by every fallible operation of the crate.
//!
//! | Variant | Raised by | Retryable with same input? |
//! |---------|-----------|----------------------------|
//! | [`InvalidRange`](AlmanacError::InvalidRange) | [`JulianDay::to_utc`](crate::JulianDay::to_utc) | No |
//! | [`SearchExhausted`](AlmanacError::SearchExhausted) | [`nearest_solar_event`](crate::nearest_solar_event), [`next_eclipse`](crate::next_eclipse) | No |
//! | [`InvalidLocation`](AlmanacError::InvalidLocation) | [`GeographicLocation::new`](crate::GeographicLocation::new) | No |
//!
//! A rise/set hour angle without a real root is **not** an error: it is
//! reported as [`RiseSetResult::always_up`](crate::RiseSetResult::always_up)
//! or [`RiseSetResult::never_up`](crate::RiseSetResult::never_up).

use thiserror::Error;

/// Failure modes of the ephemeris engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlmanacError {
    /// Julian Day outside the domain supported by the inverse conversion.
    #[error("julian day {jd} outside the supported range [{min}, {max}]", min = crate::JulianDay::MIN_CONVERTIBLE, max = crate::JulianDay::MAX_CONVERTIBLE)]
    InvalidRange { jd: f64 },

    /// A bounded forward scan hit its cap without finding an event.
    #[error("no event found within {days} days of the queried date")]
    SearchExhausted { days: u32 },

    /// Latitude/longitude pair that cannot describe a place on Earth.
    #[error("invalid geographic location: latitude {latitude}, longitude {longitude}")]
    InvalidLocation { latitude: f64, longitude: f64 },
}

/// Convenience alias used across the crate.
pub type AlmanacResult<T> = Result<T, AlmanacError>;
