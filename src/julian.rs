// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian Day instants.
//!
//! [`JulianDay`] stores a single [`Days`] quantity counted from the Julian
//! Period epoch. It is the only calendar ↔ continuous-time conversion in the
//! crate: every ephemeris series receives its time argument as
//! [`JulianDay::julian_centuries`].
//!
//! Instants are interpreted as Universal Time. The low-precision series used
//! here are insensitive to the ≈70 s ΔT offset, so no dynamical time scale is
//! carried.

use crate::error::{AlmanacError, AlmanacResult};
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Utc};
use qtty::*;
use std::ops::{Add, AddAssign, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const NANOS_PER_DAY: f64 = 86_400_000_000_000.0;

/// A continuous fractional day count (Julian Day, UT).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JulianDay {
    quantity: Days,
}

impl JulianDay {
    /// J2000.0 epoch: 2000-01-01T12:00:00 (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// One Julian century expressed in days.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    /// Lower bound of the domain accepted by [`JulianDay::to_utc`].
    pub const MIN_CONVERTIBLE: f64 = 900_000.0;

    /// Upper bound of the domain accepted by [`JulianDay::to_utc`].
    pub const MAX_CONVERTIBLE: f64 = 2_817_000.0;

    // ── constructors ──────────────────────────────────────────────────

    /// Create from a raw scalar (days since the Julian Period epoch).
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            quantity: Days::new(value),
        }
    }

    /// Create from a [`Days`] quantity.
    #[inline]
    pub const fn from_days(days: Days) -> Self {
        Self { quantity: days }
    }

    /// Julian Day of a proleptic Gregorian calendar date.
    ///
    /// `day` may carry a fraction (`4.81` is the 4th at 19:26:24). January and
    /// February count as months 13 and 14 of the previous year so that the leap
    /// day falls at the end of the computational year.
    pub fn from_calendar(year: i32, month: u32, day: f64) -> Self {
        let (y, m) = if month <= 2 {
            (year - 1, month + 12)
        } else {
            (year, month)
        };
        let (y, m) = (f64::from(y), f64::from(m));

        let a = (y / 100.0).floor();
        let b = 2.0 - a + (a / 4.0).floor();

        Self::new((365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5)
    }

    /// Julian Day of an instant in any time zone.
    ///
    /// The instant is first brought to UTC, then hours, minutes, seconds and
    /// nanoseconds are folded into the fractional day.
    pub fn from_instant<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        let utc = instant.with_timezone(&Utc);
        let seconds = f64::from(utc.hour()) * 3_600.0
            + f64::from(utc.minute()) * 60.0
            + f64::from(utc.second())
            + f64::from(utc.nanosecond()) / 1e9;
        Self::from_calendar(
            utc.year(),
            utc.month(),
            f64::from(utc.day()) + seconds / 86_400.0,
        )
    }

    /// Julian Day at 0h UT of a calendar date.
    #[inline]
    pub fn midnight(date: NaiveDate) -> Self {
        Self::from_calendar(date.year(), date.month(), f64::from(date.day()))
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// The underlying quantity in days.
    #[inline]
    pub const fn quantity(&self) -> Days {
        self.quantity
    }

    /// The underlying scalar value in days.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.quantity.value()
    }

    /// Julian centuries since J2000.0, the time argument of every series.
    #[inline]
    pub fn julian_centuries(&self) -> Centuries {
        Centuries::new(
            ((*self - Self::J2000) / Self::JULIAN_CENTURY)
                .simplify()
                .value(),
        )
    }

    /// Convert back to a `chrono::DateTime<Utc>`.
    ///
    /// Only Julian Days in [`MIN_CONVERTIBLE`](Self::MIN_CONVERTIBLE) ..=
    /// [`MAX_CONVERTIBLE`](Self::MAX_CONVERTIBLE) are accepted; anything else
    /// (including `NaN`) yields [`AlmanacError::InvalidRange`].
    pub fn to_utc(&self) -> AlmanacResult<DateTime<Utc>> {
        let jd = self.value();
        if !(Self::MIN_CONVERTIBLE..=Self::MAX_CONVERTIBLE).contains(&jd) {
            return Err(AlmanacError::InvalidRange { jd });
        }

        let shifted = jd + 0.5;
        let z = shifted.floor();
        let fraction = shifted - z;

        let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
        let a = z + 1.0 + alpha - (alpha / 4.0).floor();
        let b = a + 1524.0;
        let c = ((b - 122.1) / 365.25).floor();
        let d = (365.25 * c).floor();
        let e = ((b - d) / 30.6001).floor();

        let day = b - d - (30.6001 * e).floor();
        let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
        let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };

        let midnight = NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .ok_or(AlmanacError::InvalidRange { jd })?;
        let nanos = (fraction * NANOS_PER_DAY).round() as i64;

        Ok(midnight.and_utc() + chrono::Duration::nanoseconds(nanos))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait implementations
// ═══════════════════════════════════════════════════════════════════════════

impl std::fmt::Display for JulianDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JD {}", self.quantity)
    }
}

#[cfg(feature = "serde")]
impl Serialize for JulianDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.value())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for JulianDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Ok(Self::new(v))
    }
}

impl Add<Days> for JulianDay {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity + rhs)
    }
}

impl AddAssign<Days> for JulianDay {
    #[inline]
    fn add_assign(&mut self, rhs: Days) {
        self.quantity += rhs;
    }
}

impl Sub<Days> for JulianDay {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity - rhs)
    }
}

impl SubAssign<Days> for JulianDay {
    #[inline]
    fn sub_assign(&mut self, rhs: Days) {
        self.quantity -= rhs;
    }
}

impl Sub for JulianDay {
    type Output = Days;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.quantity - rhs.quantity
    }
}

impl<Tz: TimeZone> From<&DateTime<Tz>> for JulianDay {
    fn from(instant: &DateTime<Tz>) -> Self {
        Self::from_instant(instant)
    }
}

impl From<JulianDay> for Centuries {
    fn from(jd: JulianDay) -> Self {
        jd.julian_centuries()
    }
}

impl From<Centuries> for JulianDay {
    fn from(centuries: Centuries) -> Self {
        JulianDay::J2000 + Days::new(centuries.value() * JulianDay::JULIAN_CENTURY.value())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn j2000_from_noon_utc() {
        let instant = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(JulianDay::from_instant(&instant), JulianDay::J2000);
        assert_eq!(JulianDay::J2000.julian_centuries(), Centuries::new(0.0));
    }

    #[test]
    fn calendar_dates_match_published_values() {
        // Launch of Sputnik 1, 1957 October 4.81
        let jd = JulianDay::from_calendar(1957, 10, 4.81);
        assert!((jd.value() - 2_436_116.31).abs() < 1e-9);
        // Proleptic Gregorian 0001-01-01 00:00
        assert_eq!(JulianDay::from_calendar(1, 1, 1.0).value(), 1_721_425.5);
        // January is shifted into the previous computational year
        assert_eq!(JulianDay::from_calendar(2024, 1, 1.0).value(), 2_460_310.5);
        assert_eq!(JulianDay::from_calendar(2024, 3, 1.0).value(), 2_460_370.5);
    }

    #[test]
    fn offset_is_removed_before_conversion() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = tz.with_ymd_and_hms(2000, 1, 1, 14, 0, 0).unwrap();
        assert_eq!(JulianDay::from_instant(&local), JulianDay::J2000);
    }

    #[test]
    fn inverse_conversion_recovers_the_calendar() {
        let back = JulianDay::new(2_436_116.31).to_utc().unwrap();
        let expected = Utc.with_ymd_and_hms(1957, 10, 4, 19, 26, 24).unwrap();
        assert!((back - expected).num_milliseconds().abs() < 1);
    }

    #[test]
    fn roundtrip_across_supported_range() {
        for (y, m, d, h) in [
            (2024, 2, 29, 23),
            (1582, 10, 15, 0),
            (1000, 1, 1, 6),
            (-500, 3, 1, 12),
            (2999, 12, 31, 18),
        ] {
            let instant = Utc.with_ymd_and_hms(y, m, d, h, 17, 42).unwrap();
            let jd = JulianDay::from_instant(&instant);
            let back = jd.to_utc().unwrap();
            let delta = (back - instant).num_milliseconds().abs();
            assert!(delta < 10, "{instant}: {delta} ms");
        }
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert_eq!(
            JulianDay::new(899_999.9).to_utc(),
            Err(AlmanacError::InvalidRange { jd: 899_999.9 })
        );
        assert!(JulianDay::new(2_817_000.5).to_utc().is_err());
        assert!(JulianDay::new(f64::NAN).to_utc().is_err());
        assert!(JulianDay::new(900_000.0).to_utc().is_ok());
        assert!(JulianDay::new(2_817_000.0).to_utc().is_ok());
    }

    #[test]
    fn centuries_and_day_arithmetic() {
        let jd = JulianDay::J2000 + Days::new(36_525.0);
        assert!((jd.julian_centuries().value() - 1.0).abs() < 1e-12);
        assert_eq!(jd - JulianDay::J2000, Days::new(36_525.0));

        let mut moving = JulianDay::J2000;
        moving += Days::new(1.5);
        moving -= Days::new(0.5);
        assert_eq!(moving.value(), 2_451_546.0);
        assert_eq!(JulianDay::from(Centuries::new(-1.0)).value(), 2_414_520.0);
    }

    #[test]
    fn display_is_labelled() {
        assert!(JulianDay::J2000.to_string().starts_with("JD 2451545"));
    }
}
