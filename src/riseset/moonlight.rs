// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Per-day Moon facts: rise and set with their azimuths, phase, apsis
//! countdown and current altitude.

use super::daylight::local_hour;
use super::{lunar_rise_set, Depression, RiseSetResult};
use crate::config::RiseSetConfig;
use crate::coords::GeographicLocation;
use crate::julian::JulianDay;
use crate::phase::{lunar_apsis, phase_fraction, LunarApsis, PhaseInfo};
use crate::position::{moon_position_at, BodyPosition};
use chrono::{DateTime, TimeZone, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The Moon for one observer on the local day of an instant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoonSummary {
    pub rise_set: RiseSetResult,
    /// Decimal hours on the clock of the query instant's UTC offset.
    pub moonrise_hour: Option<f64>,
    pub moonset_hour: Option<f64>,
    /// Azimuth at moonrise, degrees east of north.
    pub rise_azimuth: Option<f64>,
    /// Azimuth at moonset, degrees east of north.
    pub set_azimuth: Option<f64>,
    /// Where the Moon is at the query instant.
    pub position: BodyPosition,
    pub is_up: bool,
    pub phase: PhaseInfo,
    pub apsis: LunarApsis,
}

impl MoonSummary {
    pub fn compute<Tz: TimeZone>(
        instant: &DateTime<Tz>,
        location: &GeographicLocation,
        config: &RiseSetConfig,
    ) -> Self {
        let jd = JulianDay::from_instant(instant);
        let rise_set = lunar_rise_set(instant, location, Depression::Standard, config);
        let position = moon_position_at(jd, location);

        let azimuth = |event: Option<DateTime<Utc>>| {
            event.map(|at| moon_position_at(JulianDay::from_instant(&at), location).horizontal.azimuth)
        };
        let tz = instant.timezone();
        let clock = |event: Option<DateTime<Utc>>| event.map(|at| local_hour(&at.with_timezone(&tz)));

        Self {
            moonrise_hour: clock(rise_set.rise),
            moonset_hour: clock(rise_set.set),
            rise_azimuth: azimuth(rise_set.rise),
            set_azimuth: azimuth(rise_set.set),
            is_up: position.altitude() > Depression::Standard.altitude(),
            position,
            phase: PhaseInfo::from_phase(phase_fraction(jd)),
            apsis: lunar_apsis(jd),
            rise_set,
        }
    }
}
