// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Where the Sun and the Moon stand in an observer's sky.

use crate::coords::{
    ecliptic_to_equatorial, horizontal_from_equatorial, hour_angle, local_sidereal_time,
    topocentric_altitude, EquatorialCoordinates, GeographicLocation, HorizontalCoordinates,
};
use crate::julian::JulianDay;
use crate::lunar::lunar_position;
use crate::solar::solar_position;
use chrono::{DateTime, TimeZone};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Apparent place of a body for one observer at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyPosition {
    pub equatorial: EquatorialCoordinates,
    pub horizontal: HorizontalCoordinates,
    /// Local hour angle in `[-180, 180)` degrees, negative before transit.
    pub hour_angle: f64,
    /// AU for the Sun, kilometres for the Moon.
    pub distance: f64,
}

impl BodyPosition {
    #[inline]
    pub fn altitude(&self) -> f64 {
        self.horizontal.altitude
    }

    /// `true` while the body is east of the meridian.
    #[inline]
    pub fn is_rising(&self) -> bool {
        self.hour_angle < 0.0
    }
}

/// Sun position for `location` at `instant`.
pub fn sun_position<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    location: &GeographicLocation,
) -> BodyPosition {
    sun_position_at(JulianDay::from_instant(instant), location)
}

/// Moon position for `location` at `instant`; the altitude is topocentric.
pub fn moon_position<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    location: &GeographicLocation,
) -> BodyPosition {
    moon_position_at(JulianDay::from_instant(instant), location)
}

pub(crate) fn sun_position_at(jd: JulianDay, location: &GeographicLocation) -> BodyPosition {
    let sun = solar_position(jd.julian_centuries());
    let equatorial = sun.equatorial();
    let lst = local_sidereal_time(jd, location.longitude);
    BodyPosition {
        equatorial,
        horizontal: horizontal_from_equatorial(&equatorial, location.latitude, lst),
        hour_angle: hour_angle(&equatorial, lst),
        distance: sun.distance_au(),
    }
}

pub(crate) fn moon_position_at(jd: JulianDay, location: &GeographicLocation) -> BodyPosition {
    let t = jd.julian_centuries();
    let moon = lunar_position(t);
    let equatorial = ecliptic_to_equatorial(&moon.ecliptic, t);
    let lst = local_sidereal_time(jd, location.longitude);

    let mut horizontal = horizontal_from_equatorial(&equatorial, location.latitude, lst);
    horizontal.altitude = topocentric_altitude(horizontal.altitude, moon.distance_km());

    BodyPosition {
        equatorial,
        horizontal,
        hour_angle: hour_angle(&equatorial, lst),
        distance: moon.distance_km(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn sun_is_high_at_equatorial_noon_near_equinox() {
        let loc = GeographicLocation::new(0.0, 0.0).unwrap();
        let noon = Utc.with_ymd_and_hms(2024, 3, 20, 12, 7, 0).unwrap();
        let sun = sun_position(&noon, &loc);
        assert!(sun.altitude() > 89.0, "{}", sun.altitude());

        let midnight = Utc.with_ymd_and_hms(2024, 3, 20, 0, 7, 0).unwrap();
        assert!(sun_position(&midnight, &loc).altitude() < -89.0);
    }

    #[test]
    fn morning_sun_is_rising_in_the_east() {
        let loc = GeographicLocation::new(48.85, 2.35).unwrap();
        let morning = Utc.with_ymd_and_hms(2024, 9, 22, 7, 0, 0).unwrap();
        let sun = sun_position(&morning, &loc);
        assert!(sun.is_rising());
        assert!((60.0..120.0).contains(&sun.horizontal.azimuth));
    }

    #[test]
    fn moon_distance_is_in_kilometres() {
        let loc = GeographicLocation::new(40.0, -3.7).unwrap();
        let instant = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let moon = moon_position(&instant, &loc);
        assert!((356_000.0..407_000.0).contains(&moon.distance));
        assert!((-90.0..=90.0).contains(&moon.altitude()));
    }
}
