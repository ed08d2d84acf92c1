// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! UTC time spans.
//!
//! [`Interval`] holds the phase windows of an eclipse, each centred on the
//! peak. Both ends are `chrono::DateTime<Utc>`.

use chrono::{DateTime, Duration, Utc};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An interval between two UTC instants.
///
/// # Examples
///
/// ```
/// use almanac::Interval;
/// use chrono::{Duration, TimeZone, Utc};
///
/// let peak = Utc.with_ymd_and_hms(2022, 11, 8, 10, 59, 0).unwrap();
/// let totality = Interval::centered(peak, 85.0);
///
/// assert_eq!(totality.duration(), Duration::seconds(85 * 60));
/// assert_eq!(totality.midpoint(), peak);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    /// Creates a new interval between two instants.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Interval { start, end }
    }

    /// Interval of `minutes` length whose midpoint is `center`.
    pub fn centered(center: DateTime<Utc>, minutes: f64) -> Self {
        let half = Duration::milliseconds((minutes * 30_000.0).round() as i64);
        Interval::new(center - half, center + half)
    }

    /// Returns the duration of the interval.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Duration in (fractional) minutes.
    pub fn duration_minutes(&self) -> f64 {
        self.duration().num_milliseconds() as f64 / 60_000.0
    }

    /// Midpoint of the interval.
    pub fn midpoint(&self) -> DateTime<Utc> {
        self.start + self.duration() / 2
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
