// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Sunrise, sunset and twilight by the hour-angle method.

use super::{
    after_minutes, local_midnight, next_local_midnight, utc_midnight, Depression, RiseSetResult,
};
use crate::angle::{acos_deg, cos_deg, sin_deg};
use crate::config::RiseSetConfig;
use crate::coords::GeographicLocation;
use crate::error::{AlmanacError, AlmanacResult};
use crate::julian::JulianDay;
use crate::solar::solar_position;
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone};
use log::{debug, trace};
use qtty::Days;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const MINUTES_PER_DAY: f64 = 1_440.0;

/// Day of year of the June and December solstices (non-leap numbering).
const JUNE_SOLSTICE_DOY: i64 = 172;
const DECEMBER_SOLSTICE_DOY: i64 = 355;

/// Outcome of the hour-angle equation for one declination.
#[derive(Debug, Clone, Copy, PartialEq)]
enum HourAngle {
    /// Semi-diurnal arc, degrees.
    Root(f64),
    AlwaysUp,
    NeverUp,
}

/// Solves `cos H = (sin h₀ − sin φ sin δ) / (cos φ cos δ)` for the altitude
/// `h₀ = −depression`.
fn hour_angle_for(latitude: f64, declination: f64, depression: f64) -> HourAngle {
    let numerator = cos_deg(90.0 + depression) - sin_deg(latitude) * sin_deg(declination);
    let denominator = cos_deg(latitude) * cos_deg(declination);
    let cos_h = numerator / denominator;

    if cos_h < -1.0 {
        HourAngle::AlwaysUp
    } else if cos_h > 1.0 || cos_h.is_nan() {
        HourAngle::NeverUp
    } else {
        HourAngle::Root(acos_deg(cos_h))
    }
}

/// Minutes after 0h UT at which the Sun crosses the requested altitude,
/// evaluated with the solar elements at `estimate` minutes.
fn crossing_minutes(
    midnight: JulianDay,
    location: &GeographicLocation,
    depression: f64,
    estimate: f64,
    rising: bool,
) -> Option<f64> {
    let jd = midnight + Days::new(estimate / MINUTES_PER_DAY);
    let sun = solar_position(jd.julian_centuries());
    match hour_angle_for(location.latitude, sun.declination, depression) {
        HourAngle::Root(h) => {
            let noon = 720.0 - 4.0 * location.longitude - sun.equation_of_time_minutes;
            Some(if rising { noon - 4.0 * h } else { noon + 4.0 * h })
        }
        HourAngle::AlwaysUp | HourAngle::NeverUp => None,
    }
}

/// Sun rise/set around the solar transit of the UT date `date`.
///
/// The transit estimate is `720 − 4·longitude` minutes after 0h UT of
/// `date`, so the events belong to the observer's mean solar day. Far from
/// Greenwich they may fall on a neighbouring UTC date. Use
/// [`solar_rise_set`] to ask for a civil day in a given time zone.
pub fn solar_rise_set_on(
    date: NaiveDate,
    location: &GeographicLocation,
    depression: Depression,
) -> RiseSetResult {
    let depression = depression.degrees();
    let midnight = JulianDay::midnight(date);
    let transit_guess = 720.0 - 4.0 * location.longitude;

    let sun = solar_position((midnight + Days::new(transit_guess / MINUTES_PER_DAY)).julian_centuries());
    let semi_arc = match hour_angle_for(location.latitude, sun.declination, depression) {
        HourAngle::Root(h) => h,
        HourAngle::AlwaysUp => return RiseSetResult::circumpolar(),
        HourAngle::NeverUp => return RiseSetResult::below_horizon(),
    };

    let noon = transit_guess - sun.equation_of_time_minutes;
    let anchor = utc_midnight(date);

    // One refinement pass; keep the first estimate if the root vanishes.
    let refine = |first: f64, rising: bool| {
        crossing_minutes(midnight, location, depression, first, rising).unwrap_or(first)
    };
    let rise = refine(noon - 4.0 * semi_arc, true);
    let set = refine(noon + 4.0 * semi_arc, false);

    RiseSetResult {
        rise: Some(after_minutes(anchor, rise)),
        set: Some(after_minutes(anchor, set)),
        always_up: false,
        never_up: false,
    }
}

/// Sun rise/set on the local calendar day of `instant`.
///
/// The day is the span between the local midnights around `instant` in its
/// own time zone. The UT date whose solar transit falls nearest the middle of
/// that span anchors the computation, so offsets far from `longitude / 15`
/// (UTC+14 in the central Pacific, say) still get the right day.
pub fn solar_rise_set<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    location: &GeographicLocation,
    depression: Depression,
) -> RiseSetResult {
    solar_rise_set_on(solar_day(instant, location), location, depression)
}

/// UT date whose solar transit lies in the local day of `instant`.
pub(crate) fn solar_day<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    location: &GeographicLocation,
) -> NaiveDate {
    let start = local_midnight(instant);
    let middle = start + (next_local_midnight(instant) - start) / 2;
    let transit = |date: NaiveDate| {
        let midnight = JulianDay::midnight(date);
        let guess = 720.0 - 4.0 * location.longitude;
        let sun = solar_position((midnight + Days::new(guess / MINUTES_PER_DAY)).julian_centuries());
        after_minutes(utc_midnight(date), guess - sun.equation_of_time_minutes)
    };

    let anchor = middle.date_naive();
    [anchor.pred_opt(), Some(anchor), anchor.succ_opt()]
        .into_iter()
        .flatten()
        .min_by_key(|date| (transit(*date) - middle).num_seconds().abs())
        .unwrap_or(anchor)
}

/// Which way the polar fallback scan walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SearchDirection {
    Forward,
    Backward,
}

/// Closest day with a solar crossing, as found by [`nearest_solar_event`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolarEventSearch {
    pub date: NaiveDate,
    /// Signed distance from the queried date, days.
    pub offset_days: i64,
    pub direction: SearchDirection,
    pub result: RiseSetResult,
}

/// Picks the scan direction inside a polar regime.
///
/// Polar day in the north and polar night in the south are centred on the
/// June solstice; the other two cases on the December solstice. Before the
/// centre the regime began recently, so the nearer crossing lies in the past.
fn scan_direction(latitude: f64, day_of_year: u32, always_up: bool) -> SearchDirection {
    let northern = latitude >= 0.0;
    let centre = if always_up == northern {
        JUNE_SOLSTICE_DOY
    } else {
        DECEMBER_SOLSTICE_DOY
    };
    let offset = (i64::from(day_of_year) - centre + 365 + 182).rem_euclid(365) - 182;
    if offset < 0 {
        SearchDirection::Backward
    } else {
        SearchDirection::Forward
    }
}

/// Finds the nearest day on which the Sun crosses the requested altitude.
///
/// Days that already have a crossing are returned as-is with
/// `offset_days == 0`. Otherwise the scan walks at most
/// [`RiseSetConfig::max_search_days`] days; running out yields
/// [`AlmanacError::SearchExhausted`].
pub fn nearest_solar_event<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    location: &GeographicLocation,
    depression: Depression,
    config: &RiseSetConfig,
) -> AlmanacResult<SolarEventSearch> {
    let date = solar_day(instant, location);
    let today = solar_rise_set_on(date, location, depression);
    if today.has_event() {
        return Ok(SolarEventSearch {
            date,
            offset_days: 0,
            direction: SearchDirection::Forward,
            result: today,
        });
    }

    let direction = scan_direction(location.latitude, date.ordinal(), today.always_up);
    debug!(
        "no solar crossing on {date} at latitude {:.2} (always_up = {}), scanning {direction:?}",
        location.latitude, today.always_up
    );

    for step in 1..=i64::from(config.max_search_days) {
        let signed = match direction {
            SearchDirection::Forward => step,
            SearchDirection::Backward => -step,
        };
        let Some(day) = date.checked_add_signed(Duration::days(signed)) else {
            break;
        };
        let result = solar_rise_set_on(day, location, depression);
        if result.has_event() {
            trace!("solar crossing found on {day} after {step} days");
            return Ok(SolarEventSearch {
                date: day,
                offset_days: signed,
                direction,
                result,
            });
        }
    }

    debug!(
        "solar crossing search exhausted after {} days",
        config.max_search_days
    );
    Err(AlmanacError::SearchExhausted {
        days: config.max_search_days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike, Utc};

    fn karlstad() -> GeographicLocation {
        GeographicLocation::new(59.66, 13.0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn hour_angle_regimes() {
        assert!(matches!(hour_angle_for(0.0, 0.0, 0.833), HourAngle::Root(h) if (h - 90.833).abs() < 0.01));
        assert_eq!(hour_angle_for(80.0, 23.0, 0.833), HourAngle::AlwaysUp);
        assert_eq!(hour_angle_for(80.0, -23.0, 0.833), HourAngle::NeverUp);
        assert_eq!(hour_angle_for(90.0, 10.0, 0.833), HourAngle::AlwaysUp);
    }

    #[test]
    fn london_equinox_times() {
        let london = GeographicLocation::new(51.5074, -0.1278).unwrap();
        let day = solar_rise_set_on(date(2024, 3, 20), &london, Depression::Standard);
        let rise = day.rise.unwrap();
        let set = day.set.unwrap();
        assert_eq!((rise.hour(), rise.minute()), (6, 2));
        assert_eq!((set.hour(), set.minute()), (18, 14));
    }

    #[test]
    fn far_east_events_stay_on_the_local_day() {
        let sydney = GeographicLocation::new(-33.8688, 151.2093).unwrap();
        let tz = FixedOffset::east_opt(11 * 3600).unwrap();
        let instant = tz.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let day = solar_rise_set(&instant, &sydney, Depression::Standard);

        let rise = day.rise.unwrap().with_timezone(&tz);
        let set = day.set.unwrap().with_timezone(&tz);
        assert_eq!(rise.date_naive(), date(2024, 1, 15));
        assert_eq!(set.date_naive(), date(2024, 1, 15));
        assert!((5..=6).contains(&rise.hour()));
        assert_eq!(set.hour(), 20);
    }

    #[test]
    fn west_longitude_with_far_east_offset_keeps_the_local_day() {
        // Kiritimati keeps UTC+14 at 157°W.
        let kiritimati = GeographicLocation::new(1.87, -157.4).unwrap();
        let tz = FixedOffset::east_opt(14 * 3600).unwrap();
        let instant = tz.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let day = solar_rise_set(&instant, &kiritimati, Depression::Standard);

        let rise = day.rise.unwrap().with_timezone(&tz);
        let set = day.set.unwrap().with_timezone(&tz);
        assert_eq!(rise.date_naive(), date(2024, 1, 15));
        assert_eq!(set.date_naive(), date(2024, 1, 15));
        assert_eq!(rise.hour(), 6);
        assert_eq!(set.hour(), 18);
        assert_eq!(solar_day(&instant, &kiritimati), date(2024, 1, 14));
    }

    #[test]
    fn west_longitude_with_far_west_offset_keeps_the_local_day() {
        let honolulu = GeographicLocation::new(21.3, -157.8).unwrap();
        let tz = FixedOffset::west_opt(10 * 3600).unwrap();
        let instant = tz.with_ymd_and_hms(2024, 7, 1, 23, 30, 0).unwrap();
        let day = solar_rise_set(&instant, &honolulu, Depression::Standard);
        for event in [day.rise.unwrap(), day.set.unwrap()] {
            assert_eq!(event.with_timezone(&tz).date_naive(), date(2024, 7, 1));
        }
    }

    #[test]
    fn twilight_brackets_sunrise() {
        let loc = karlstad();
        let d = date(2024, 10, 1);
        let sun = solar_rise_set_on(d, &loc, Depression::Standard);
        let civil = solar_rise_set_on(d, &loc, Depression::Civil);
        let nautical = solar_rise_set_on(d, &loc, Depression::Nautical);
        assert!(nautical.rise.unwrap() < civil.rise.unwrap());
        assert!(civil.rise.unwrap() < sun.rise.unwrap());
        assert!(sun.set.unwrap() < civil.set.unwrap());
        let golden = solar_rise_set_on(d, &loc, Depression::GoldenHour);
        assert!(golden.rise.unwrap() > sun.rise.unwrap());
    }

    #[test]
    fn solstice_daylight_at_high_latitude() {
        let summer = solar_rise_set_on(date(2024, 6, 20), &karlstad(), Depression::Standard);
        let hours = summer.duration().unwrap().num_seconds() as f64 / 3600.0;
        assert!(hours > 18.0, "{hours}");

        let winter = solar_rise_set_on(date(2024, 12, 21), &karlstad(), Depression::Standard);
        let hours = winter.duration().unwrap().num_seconds() as f64 / 3600.0;
        assert!(hours < 7.0, "{hours}");
    }

    #[test]
    fn polar_regimes_are_flags_not_errors() {
        let svalbard = GeographicLocation::new(78.2, 15.6).unwrap();
        let june = solar_rise_set_on(date(2024, 6, 21), &svalbard, Depression::Standard);
        assert!(june.always_up && !june.never_up && !june.has_event());
        let december = solar_rise_set_on(date(2024, 12, 21), &svalbard, Depression::Standard);
        assert!(december.never_up && !december.always_up);
    }

    #[test]
    fn scan_direction_follows_the_regime() {
        assert_eq!(scan_direction(78.0, 160, true), SearchDirection::Backward);
        assert_eq!(scan_direction(78.0, 200, true), SearchDirection::Forward);
        assert_eq!(scan_direction(78.0, 364, false), SearchDirection::Forward);
        assert_eq!(scan_direction(78.0, 340, false), SearchDirection::Backward);
        assert_eq!(scan_direction(-78.0, 10, true), SearchDirection::Forward);
        assert_eq!(scan_direction(-78.0, 160, false), SearchDirection::Backward);
    }

    #[test]
    fn nearest_event_walks_out_of_polar_day() {
        let svalbard = GeographicLocation::new(78.2, 15.6).unwrap();
        let cfg = RiseSetConfig::default();

        let june = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        let found = nearest_solar_event(&june, &svalbard, Depression::Standard, &cfg).unwrap();
        assert_eq!(found.direction, SearchDirection::Backward);
        assert!((-70..-30).contains(&found.offset_days), "{}", found.offset_days);
        assert!(found.result.has_event());

        let winter = Utc.with_ymd_and_hms(2024, 12, 30, 12, 0, 0).unwrap();
        let found = nearest_solar_event(&winter, &svalbard, Depression::Standard, &cfg).unwrap();
        assert_eq!(found.direction, SearchDirection::Forward);
        assert!((30..70).contains(&found.offset_days), "{}", found.offset_days);
    }

    #[test]
    fn ordinary_day_needs_no_scan() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let found =
            nearest_solar_event(&instant, &karlstad(), Depression::Standard, &RiseSetConfig::default())
                .unwrap();
        assert_eq!(found.offset_days, 0);
    }

    #[test]
    fn unreachable_altitude_exhausts_the_scan() {
        let svalbard = GeographicLocation::new(78.2, 15.6).unwrap();
        let instant = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let cfg = RiseSetConfig::default().with_max_search_days(50);
        let err = nearest_solar_event(&instant, &svalbard, Depression::Custom(-80.0), &cfg)
            .unwrap_err();
        assert_eq!(err, AlmanacError::SearchExhausted { days: 50 });
    }
}
