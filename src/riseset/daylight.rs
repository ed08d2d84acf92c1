// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Per-day daylight facts for narration: sunrise, sunset, twilight bands and
//! the current light phase.

use super::solar::solar_day;
use super::{solar_rise_set_on, Depression, RiseSetResult};
use crate::coords::GeographicLocation;
use crate::julian::JulianDay;
use crate::position::sun_position_at;
use chrono::{DateTime, TimeZone, Timelike, Utc};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where the Sun is in the day/twilight cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TwilightPhase {
    Day,
    /// Sun above the horizon near lower culmination on a day it never sets.
    MidnightSun,
    /// The Sun does not rise at all today.
    PolarNight,
    /// Below the horizon, but astronomical darkness never arrives today.
    WhiteNight,
    AstronomicalDawn,
    NauticalDawn,
    CivilDawn,
    CivilDusk,
    NauticalDusk,
    AstronomicalDusk,
    Night,
}

impl TwilightPhase {
    /// Classifies a solar altitude given the day's sunrise and astronomical
    /// twilight regimes. A negative hour angle (Sun east of the meridian)
    /// selects dawn over dusk.
    pub fn classify(
        altitude: f64,
        hour_angle: f64,
        sun: &RiseSetResult,
        astronomical: &RiseSetResult,
    ) -> Self {
        let rising = hour_angle < 0.0;
        if altitude > Depression::Standard.altitude() {
            return if sun.always_up && hour_angle.abs() > 90.0 {
                TwilightPhase::MidnightSun
            } else {
                TwilightPhase::Day
            };
        }
        if sun.never_up {
            return TwilightPhase::PolarNight;
        }
        if astronomical.always_up {
            return TwilightPhase::WhiteNight;
        }
        match (altitude, rising) {
            (a, true) if a >= Depression::Civil.altitude() => TwilightPhase::CivilDawn,
            (a, false) if a >= Depression::Civil.altitude() => TwilightPhase::CivilDusk,
            (a, true) if a >= Depression::Nautical.altitude() => TwilightPhase::NauticalDawn,
            (a, false) if a >= Depression::Nautical.altitude() => TwilightPhase::NauticalDusk,
            (a, true) if a >= Depression::Astronomical.altitude() => {
                TwilightPhase::AstronomicalDawn
            }
            (a, false) if a >= Depression::Astronomical.altitude() => {
                TwilightPhase::AstronomicalDusk
            }
            _ => TwilightPhase::Night,
        }
    }

    /// `true` for the dawn and dusk bands.
    pub fn is_twilight(&self) -> bool {
        matches!(
            self,
            TwilightPhase::AstronomicalDawn
                | TwilightPhase::NauticalDawn
                | TwilightPhase::CivilDawn
                | TwilightPhase::CivilDusk
                | TwilightPhase::NauticalDusk
                | TwilightPhase::AstronomicalDusk
        )
    }
}

impl fmt::Display for TwilightPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TwilightPhase::Day => "day",
            TwilightPhase::MidnightSun => "midnight_sun",
            TwilightPhase::PolarNight => "polar_night",
            TwilightPhase::WhiteNight => "white_night",
            TwilightPhase::AstronomicalDawn => "astronomical_dawn",
            TwilightPhase::NauticalDawn => "nautical_dawn",
            TwilightPhase::CivilDawn => "civil_dawn",
            TwilightPhase::CivilDusk => "civil_dusk",
            TwilightPhase::NauticalDusk => "nautical_dusk",
            TwilightPhase::AstronomicalDusk => "astronomical_dusk",
            TwilightPhase::Night => "night",
        };
        f.write_str(label)
    }
}

/// Daylight facts for one observer on the local day of an instant.
///
/// The `*_hour` fields are decimal hours on the clock of the query instant's
/// UTC offset (`6.5` is 06:30).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DaylightSummary {
    pub sun: RiseSetResult,
    pub civil: RiseSetResult,
    pub nautical: RiseSetResult,
    pub astronomical: RiseSetResult,
    pub sunrise_hour: Option<f64>,
    pub sunset_hour: Option<f64>,
    pub civil_dawn_hour: Option<f64>,
    pub civil_dusk_hour: Option<f64>,
    pub nautical_dawn_hour: Option<f64>,
    pub nautical_dusk_hour: Option<f64>,
    pub astronomical_dawn_hour: Option<f64>,
    pub astronomical_dusk_hour: Option<f64>,
    /// 24 when the Sun never sets, 0 when it never rises.
    pub daylight_hours: f64,
    pub is_daytime: bool,
    pub is_midnight_sun: bool,
    pub is_polar_night: bool,
    pub sun_altitude: f64,
    pub phase: TwilightPhase,
}

impl DaylightSummary {
    pub fn compute<Tz: TimeZone>(instant: &DateTime<Tz>, location: &GeographicLocation) -> Self {
        let date = solar_day(instant, location);
        let sun = solar_rise_set_on(date, location, Depression::Standard);
        let civil = solar_rise_set_on(date, location, Depression::Civil);
        let nautical = solar_rise_set_on(date, location, Depression::Nautical);
        let astronomical = solar_rise_set_on(date, location, Depression::Astronomical);

        let now = sun_position_at(JulianDay::from_instant(instant), location);
        let phase = TwilightPhase::classify(now.altitude(), now.hour_angle, &sun, &astronomical);

        let daylight_hours = if sun.always_up {
            24.0
        } else if sun.never_up {
            0.0
        } else {
            sun.duration()
                .map_or(0.0, |d| d.num_milliseconds() as f64 / 3_600_000.0)
        };

        let tz = instant.timezone();
        let clock = |event: Option<DateTime<Utc>>| event.map(|at| local_hour(&at.with_timezone(&tz)));

        Self {
            sunrise_hour: clock(sun.rise),
            sunset_hour: clock(sun.set),
            civil_dawn_hour: clock(civil.rise),
            civil_dusk_hour: clock(civil.set),
            nautical_dawn_hour: clock(nautical.rise),
            nautical_dusk_hour: clock(nautical.set),
            astronomical_dawn_hour: clock(astronomical.rise),
            astronomical_dusk_hour: clock(astronomical.set),
            daylight_hours,
            is_daytime: now.altitude() > Depression::Standard.altitude(),
            is_midnight_sun: sun.always_up,
            is_polar_night: sun.never_up,
            sun_altitude: now.altitude(),
            phase,
            sun,
            civil,
            nautical,
            astronomical,
        }
    }
}

pub(super) fn local_hour<Tz: TimeZone>(at: &DateTime<Tz>) -> f64 {
    f64::from(at.hour())
        + f64::from(at.minute()) / 60.0
        + f64::from(at.second()) / 3_600.0
        + f64::from(at.nanosecond()) / 3.6e12
}
