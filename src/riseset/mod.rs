// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Rise, set and twilight times.
//!
//! Two strategies are used:
//!
//! - **Sun** ([`solar_rise_set`]): closed-form hour angle of the requested
//!   altitude, converted to clock time through the equation of time and
//!   refined once with the declination at the first estimate. Days without a
//!   root are reported through [`RiseSetResult::always_up`] /
//!   [`RiseSetResult::never_up`]; [`nearest_solar_event`] then walks day by day
//!   (bounded) to the closest day that has one.
//! - **Moon** ([`lunar_rise_set`]): the Moon moves ~13°/day, so the altitude is
//!   sampled on a fixed grid over the local day and sign changes are
//!   interpolated.
//!
//! [`DaylightSummary`] and [`MoonSummary`] gather one day's facts for each
//! body.
//!
//! The queried day is always the calendar date of the instant in its own
//! UTC offset.

mod daylight;
mod lunar;
mod moonlight;
mod solar;

pub use daylight::{DaylightSummary, TwilightPhase};
pub use lunar::lunar_rise_set;
pub use moonlight::MoonSummary;
pub use solar::{
    nearest_solar_event, solar_rise_set, solar_rise_set_on, SearchDirection, SolarEventSearch,
};

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Angle below the geometric horizon that defines an event.
///
/// Negative depressions describe altitudes above the horizon (the golden
/// hour ends when the Sun climbs past 6°).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Depression {
    /// Upper limb on the horizon with standard refraction (0.833°).
    Standard,
    /// Upper-limb variant without the semi-diameter allowance (0.3°).
    UpperLimb,
    /// Civil twilight (6°).
    Civil,
    /// Nautical twilight (12°).
    Nautical,
    /// Astronomical twilight (18°).
    Astronomical,
    /// Golden hour boundary, Sun 6° above the horizon (−6°).
    GoldenHour,
    /// Any other depression, degrees.
    Custom(f64),
}

impl Depression {
    /// Depression below the horizon, degrees.
    pub fn degrees(&self) -> f64 {
        match self {
            Depression::Standard => 0.833,
            Depression::UpperLimb => 0.3,
            Depression::Civil => 6.0,
            Depression::Nautical => 12.0,
            Depression::Astronomical => 18.0,
            Depression::GoldenHour => -6.0,
            Depression::Custom(deg) => *deg,
        }
    }

    /// Altitude the body must cross, degrees.
    #[inline]
    pub fn altitude(&self) -> f64 {
        -self.degrees()
    }
}

/// Rise and set instants of one body on one day.
///
/// When neither instant exists the flags say why: `always_up` means the body
/// stays above the requested altitude, `never_up` that it stays below. For the
/// Moon the flags only describe the sampled local day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RiseSetResult {
    pub rise: Option<DateTime<Utc>>,
    pub set: Option<DateTime<Utc>>,
    pub always_up: bool,
    pub never_up: bool,
}

impl RiseSetResult {
    pub(crate) fn circumpolar() -> Self {
        Self {
            always_up: true,
            ..Self::default()
        }
    }

    pub(crate) fn below_horizon() -> Self {
        Self {
            never_up: true,
            ..Self::default()
        }
    }

    /// `true` when at least one crossing was found.
    #[inline]
    pub fn has_event(&self) -> bool {
        self.rise.is_some() || self.set.is_some()
    }

    /// Time between rise and set when both exist and the set follows the rise.
    pub fn duration(&self) -> Option<Duration> {
        match (self.rise, self.set) {
            (Some(rise), Some(set)) if set > rise => Some(set - rise),
            _ => None,
        }
    }
}

/// 0h UTC of a calendar date.
#[inline]
pub(crate) fn utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Start of the local calendar day containing `instant`, as UTC.
///
/// Falls back to 0h UTC of that date when local midnight does not exist
/// (a DST gap at midnight).
pub(crate) fn local_midnight<Tz: TimeZone>(instant: &DateTime<Tz>) -> DateTime<Utc> {
    let date = instant.date_naive();
    instant
        .timezone()
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| utc_midnight(date))
}

/// End of the local calendar day containing `instant` (the next local
/// midnight), as UTC. Days around DST changes last 23 or 25 hours.
pub(crate) fn next_local_midnight<Tz: TimeZone>(instant: &DateTime<Tz>) -> DateTime<Utc> {
    let start = local_midnight(instant);
    instant
        .date_naive()
        .succ_opt()
        .and_then(|next| {
            instant
                .timezone()
                .from_local_datetime(&next.and_time(NaiveTime::MIN))
                .earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
        .filter(|end| *end > start)
        .unwrap_or_else(|| start + Duration::days(1))
}

/// Minutes after an anchor as an instant, rounded to the millisecond.
#[inline]
pub(crate) fn after_minutes(anchor: DateTime<Utc>, minutes: f64) -> DateTime<Utc> {
    anchor + Duration::milliseconds((minutes * 60_000.0).round() as i64)
}
