// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Lunar eclipse detection and local visibility.

use super::{
    shift_days, visible_regions, EclipseEvent, EclipseKind, EclipsePhaseTimes, LunarEclipseKind,
};
use crate::angle::normalize_degrees;
use crate::coords::{greenwich_mean_sidereal_time, GeographicLocation};
use crate::interval::Interval;
use crate::julian::JulianDay;
use crate::lunar::lunar_position;
use crate::phase::phase_fraction;
use crate::position::moon_position_at;
use crate::solar::solar_position;
use chrono::{DateTime, TimeZone, Utc};
use log::{debug, trace};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Phase window around full moon inside which eclipses are considered.
const PHASE_GATE: f64 = 0.05;
/// Node proximity beyond which no eclipse is possible, degrees.
const MAX_NODE_PROXIMITY: f64 = 1.5;
/// Node proximity of one umbral-distance unit, degrees.
const UMBRAL_SCALE: f64 = 0.7;
const MEAN_LUNAR_VELOCITY: f64 = 13.176_396;

const TOTAL_MINUTES: f64 = 100.0;
const PARTIAL_MINUTES: f64 = 200.0;
const PENUMBRAL_MINUTES: f64 = 240.0;
const PARTIAL_PER_TOTAL: f64 = 2.5;
const PENUMBRAL_PER_PARTIAL: f64 = 1.5;

/// Is there a lunar eclipse near `instant`?
///
/// Returns [`EclipseKind::None`] unless the phase is within 0.05 of full and
/// the Moon sits within 1.5° of the antisolar point. The peak is estimated
/// by walking the node proximity back at the Moon's current speed.
pub fn detect_lunar_eclipse<Tz: TimeZone>(instant: &DateTime<Tz>) -> EclipseEvent {
    let at = instant.with_timezone(&Utc);
    let jd = JulianDay::from_instant(instant);

    let phase = phase_fraction(jd);
    if (phase - 0.5).abs() >= PHASE_GATE {
        return EclipseEvent::none(at);
    }

    let t = jd.julian_centuries();
    let moon = lunar_position(t);
    let sun = solar_position(t);

    let separation = normalize_degrees(moon.ecliptic.longitude - sun.ecliptic.longitude);
    let node_proximity = moon.ecliptic.latitude.hypot((separation - 180.0).abs());
    if node_proximity > MAX_NODE_PROXIMITY {
        trace!("no lunar eclipse at {at}: node proximity {node_proximity:.3}°");
        return EclipseEvent::none(at);
    }

    let umbral_distance = node_proximity / UMBRAL_SCALE;
    let (kind, magnitude, base_minutes) = match umbral_distance {
        u if u < 0.5 => (LunarEclipseKind::Total, 1.5 - u, TOTAL_MINUTES),
        u if u < 1.0 => (LunarEclipseKind::Partial, 2.0 - 2.0 * u, PARTIAL_MINUTES),
        u if u < 1.6 => (LunarEclipseKind::Penumbral, (1.6 - u) / 0.6, PENUMBRAL_MINUTES),
        _ => return EclipseEvent::none(at),
    };

    let velocity = moon.velocity_deg_per_day;
    let duration_minutes = base_minutes * MEAN_LUNAR_VELOCITY / velocity;
    let peak = shift_days(at, -node_proximity / velocity);
    let phase_times = phase_chain(kind, peak, duration_minutes);

    let peak_jd = JulianDay::from_instant(&peak);
    let sun_at_peak = solar_position(peak_jd.julian_centuries());
    let antisolar_meridian = normalize_degrees(
        sun_at_peak.right_ascension + 180.0 - greenwich_mean_sidereal_time(peak_jd),
    );

    let danjon = match kind {
        LunarEclipseKind::Total => danjon_scale(magnitude),
        LunarEclipseKind::Partial | LunarEclipseKind::Penumbral => None,
    };
    let kind = EclipseKind::Lunar(kind);
    debug!("{kind} eclipse near {at}: peak {peak}, u = {umbral_distance:.3}, magnitude {magnitude:.3}");

    EclipseEvent {
        kind,
        magnitude,
        obscuration: None,
        danjon,
        duration_minutes,
        peak,
        phase_times,
        visible_regions: visible_regions(antisolar_meridian),
        path: Vec::new(),
    }
}

/// Danjon brightness estimated from how deep the Moon goes into the umbra.
///
/// `None` below magnitude 1 (not total). Deeper eclipses are darker: L = 4
/// up to 0.1 past totality, then 3, 2 and 1 at depths 0.3, 0.6 and 0.8,
/// and 0 beyond.
pub fn danjon_scale(magnitude: f64) -> Option<u8> {
    if magnitude < 1.0 {
        return None;
    }
    Some(match magnitude - 1.0 {
        depth if depth > 0.8 => 0,
        depth if depth > 0.6 => 1,
        depth if depth > 0.3 => 2,
        depth if depth > 0.1 => 3,
        _ => 4,
    })
}

fn phase_chain(kind: LunarEclipseKind, peak: DateTime<Utc>, minutes: f64) -> EclipsePhaseTimes {
    let (total, partial, penumbral) = match kind {
        LunarEclipseKind::Total => {
            let partial = minutes * PARTIAL_PER_TOTAL;
            (Some(minutes), Some(partial), partial * PENUMBRAL_PER_PARTIAL)
        }
        LunarEclipseKind::Partial => (None, Some(minutes), minutes * PENUMBRAL_PER_PARTIAL),
        LunarEclipseKind::Penumbral => (None, None, minutes),
    };
    EclipsePhaseTimes {
        penumbral: Some(Interval::centered(peak, penumbral)),
        partial: partial.map(|m| Interval::centered(peak, m)),
        central: total.map(|m| Interval::centered(peak, m)),
    }
}

/// How much of a lunar eclipse an observer can follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LunarVisibility {
    /// The Moon is up from start to end.
    Complete,
    /// Visible from the start through the maximum, sets before the end.
    SetsDuringEclipse,
    /// Rises after the start and stays up through the end.
    RisesDuringEclipse,
    /// Up at the maximum only.
    MaximumOnly,
    /// Up at the start or the end, but not at the maximum.
    PartialPhasesOnly,
    NotVisible,
    /// The Moon does not set at this latitude and declination.
    AlwaysAbove,
    /// The Moon does not rise at this latitude and declination.
    AlwaysBelow,
}

impl LunarVisibility {
    pub fn description(&self) -> &'static str {
        match self {
            LunarVisibility::Complete => "complete eclipse visible",
            LunarVisibility::SetsDuringEclipse => {
                "visible from start through maximum, Moon sets during the final phases"
            }
            LunarVisibility::RisesDuringEclipse => {
                "Moon rises during the eclipse, visible through the end"
            }
            LunarVisibility::MaximumOnly => "maximum eclipse visible",
            LunarVisibility::PartialPhasesOnly => "partial phases visible",
            LunarVisibility::NotVisible => "eclipse not visible from this location",
            LunarVisibility::AlwaysAbove => "Moon circumpolar, whole eclipse above the horizon",
            LunarVisibility::AlwaysBelow => "Moon below the horizon throughout",
        }
    }

    /// `true` when any part of the eclipse can be seen.
    pub fn is_visible(&self) -> bool {
        !matches!(self, LunarVisibility::NotVisible | LunarVisibility::AlwaysBelow)
    }
}

impl fmt::Display for LunarVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Moon altitude at one contact of a lunar eclipse.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContactAltitude {
    pub at: DateTime<Utc>,
    /// Topocentric altitude, degrees.
    pub altitude: f64,
}

/// What an observer can follow of a lunar eclipse.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LunarEclipseViewing {
    pub visibility: LunarVisibility,
    /// Phase starts from the outside in, the peak, then phase ends from the
    /// inside out.
    pub contacts: Vec<ContactAltitude>,
    /// The contact with the Moon highest above the horizon.
    pub best_time: Option<DateTime<Utc>>,
    /// Moon altitude at `best_time`, degrees.
    pub max_altitude: Option<f64>,
}

/// Viewing conditions of a detected lunar eclipse from `location`.
///
/// The Moon's topocentric altitude is taken at every phase contact and at
/// the peak. The first contact, the peak and the last contact decide the
/// [`LunarVisibility`]; the highest contact above the horizon is the best
/// viewing time. Returns `None` for events that are not lunar eclipses.
pub fn lunar_eclipse_viewing(
    event: &EclipseEvent,
    location: &GeographicLocation,
) -> Option<LunarEclipseViewing> {
    if !matches!(event.kind, EclipseKind::Lunar(_)) {
        return None;
    }
    let times = &event.phase_times;
    let phases: Vec<Interval> = [times.penumbral, times.partial, times.central]
        .into_iter()
        .flatten()
        .collect();
    let instants: Vec<DateTime<Utc>> = phases
        .iter()
        .map(|span| span.start)
        .chain(std::iter::once(event.peak))
        .chain(phases.iter().rev().map(|span| span.end))
        .collect();

    let position = |at: &DateTime<Utc>| moon_position_at(JulianDay::from_instant(at), location);
    let contacts: Vec<ContactAltitude> = instants
        .iter()
        .map(|at| ContactAltitude {
            at: *at,
            altitude: position(at).altitude(),
        })
        .collect();

    let up = |contact: Option<&ContactAltitude>| contact.is_some_and(|c| c.altitude > 0.0);
    let start = up(contacts.first());
    let middle = up(contacts.get(phases.len()));
    let end = up(contacts.last());

    let lat = location.latitude;
    let dec = position(&event.peak).equatorial.declination;
    let visibility = if dec.abs() > 90.0 - lat.abs() {
        if lat * dec > 0.0 {
            LunarVisibility::AlwaysAbove
        } else {
            LunarVisibility::AlwaysBelow
        }
    } else {
        match (start, middle, end) {
            (true, true, true) => LunarVisibility::Complete,
            (true, true, false) => LunarVisibility::SetsDuringEclipse,
            (false, true, true) => LunarVisibility::RisesDuringEclipse,
            (false, true, false) => LunarVisibility::MaximumOnly,
            (true, false, _) | (false, false, true) => LunarVisibility::PartialPhasesOnly,
            (false, false, false) => LunarVisibility::NotVisible,
        }
    };

    let best = contacts
        .iter()
        .filter(|c| c.altitude > 0.0)
        .max_by(|a, b| a.altitude.total_cmp(&b.altitude));

    Some(LunarEclipseViewing {
        visibility,
        best_time: best.map(|c| c.at),
        max_altitude: best.map(|c| c.altitude),
        contacts,
    })
}

/// Visibility of a detected lunar eclipse from `location`, judged from the
/// Moon's topocentric altitude at the start, peak and end of the widest
/// phase. Returns `None` for events that are not lunar eclipses.
pub fn lunar_visibility(
    event: &EclipseEvent,
    location: &GeographicLocation,
) -> Option<LunarVisibility> {
    lunar_eclipse_viewing(event, location).map(|viewing| viewing.visibility)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eclipse::Region;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn total_eclipse_of_november_2022() {
        let event = detect_lunar_eclipse(&utc(2022, 11, 8, 10, 59));
        assert_eq!(event.kind, EclipseKind::Lunar(LunarEclipseKind::Total));
        assert!((1.0..=1.5).contains(&event.magnitude));
        assert!((90.0..120.0).contains(&event.duration_minutes));
        assert!((event.peak - utc(2022, 11, 8, 10, 59)).num_minutes().abs() < 60);

        let times = event.phase_times;
        let total = times.central.unwrap();
        let partial = times.partial.unwrap();
        let penumbral = times.penumbral.unwrap();
        assert!((partial.duration_minutes() / total.duration_minutes() - 2.5).abs() < 1e-3);
        assert!((penumbral.duration_minutes() / partial.duration_minutes() - 1.5).abs() < 1e-3);
        assert_eq!(total.midpoint(), event.peak);

        assert!(event.visible_regions.contains(&Region::PacificOcean));
        assert!(event.visible_regions.contains(&Region::NorthAmerica));
        assert!(!event.visible_regions.contains(&Region::Europe));
    }

    #[test]
    fn penumbral_eclipse_of_march_2024() {
        let event = detect_lunar_eclipse(&utc(2024, 3, 25, 7, 13));
        assert_eq!(event.kind, EclipseKind::Lunar(LunarEclipseKind::Penumbral));
        assert!(event.magnitude > 0.0 && event.magnitude <= 1.0);
        assert!(event.phase_times.partial.is_none());
        assert!(event.phase_times.penumbral.is_some());
    }

    #[test]
    fn ordinary_full_moon_is_rejected() {
        let event = detect_lunar_eclipse(&utc(2024, 6, 22, 1, 8));
        assert_eq!(event.kind, EclipseKind::None);
        assert!(lunar_visibility(&event, &GeographicLocation::new(0.0, 0.0).unwrap()).is_none());
    }

    #[test]
    fn new_moon_is_gated() {
        let event = detect_lunar_eclipse(&utc(2024, 4, 8, 18, 17));
        assert!(!event.is_eclipse());
    }

    #[test]
    fn visibility_around_the_pacific() {
        let event = detect_lunar_eclipse(&utc(2022, 11, 8, 10, 59));
        let honolulu = GeographicLocation::new(21.3, -157.8).unwrap();
        let london = GeographicLocation::new(51.5, -0.1).unwrap();
        let tokyo = GeographicLocation::new(35.7, 139.7).unwrap();
        assert_eq!(
            lunar_visibility(&event, &honolulu),
            Some(LunarVisibility::Complete)
        );
        assert_eq!(
            lunar_visibility(&event, &london),
            Some(LunarVisibility::NotVisible)
        );
        assert_eq!(
            lunar_visibility(&event, &tokyo),
            Some(LunarVisibility::RisesDuringEclipse)
        );
        assert!(!LunarVisibility::NotVisible.is_visible());
    }

    #[test]
    fn danjon_follows_umbral_depth() {
        assert_eq!(danjon_scale(0.99), None);
        assert_eq!(danjon_scale(1.05), Some(4));
        assert_eq!(danjon_scale(1.2), Some(3));
        assert_eq!(danjon_scale(1.45), Some(2));
        assert_eq!(danjon_scale(1.7), Some(1));
        assert_eq!(danjon_scale(1.9), Some(0));

        let total = detect_lunar_eclipse(&utc(2022, 11, 8, 10, 59));
        assert_eq!(total.danjon, Some(3));
        let penumbral = detect_lunar_eclipse(&utc(2024, 3, 25, 7, 13));
        assert_eq!(penumbral.danjon, None);
    }

    #[test]
    fn partial_eclipse_of_august_2026() {
        let event = detect_lunar_eclipse(&utc(2026, 8, 28, 4, 0));
        assert_eq!(event.kind, EclipseKind::Lunar(LunarEclipseKind::Partial));
        assert!(event.magnitude > 0.0 && event.magnitude < 1.0);
        assert_eq!(event.danjon, None);
        assert!(event.phase_times.central.is_none());
        let partial = event.phase_times.partial.unwrap();
        let penumbral = event.phase_times.penumbral.unwrap();
        assert!((penumbral.duration_minutes() / partial.duration_minutes() - 1.5).abs() < 1e-3);
    }

    #[test]
    fn viewing_lists_contacts_and_best_time() {
        let event = detect_lunar_eclipse(&utc(2022, 11, 8, 10, 59));
        let honolulu = GeographicLocation::new(21.3, -157.8).unwrap();
        let viewing = lunar_eclipse_viewing(&event, &honolulu).unwrap();

        assert_eq!(viewing.visibility, LunarVisibility::Complete);
        assert_eq!(viewing.contacts.len(), 7);
        assert_eq!(viewing.contacts[3].at, event.peak);
        assert!(viewing.contacts.windows(2).all(|w| w[0].at < w[1].at));
        assert_eq!(viewing.best_time, Some(event.peak));
        assert!(viewing.max_altitude.unwrap() > 70.0);

        let london = GeographicLocation::new(51.5, -0.1).unwrap();
        let hidden = lunar_eclipse_viewing(&event, &london).unwrap();
        assert_eq!(hidden.best_time, None);
        assert_eq!(hidden.max_altitude, None);
    }

    #[test]
    fn moon_sets_or_only_peaks() {
        let event = detect_lunar_eclipse(&utc(2022, 11, 8, 10, 59));
        let denver = GeographicLocation::new(39.7, -105.0).unwrap();
        let new_york = GeographicLocation::new(40.7, -74.0).unwrap();
        let ross_sea = GeographicLocation::new(-70.0, -165.0).unwrap();
        assert_eq!(
            lunar_visibility(&event, &denver),
            Some(LunarVisibility::SetsDuringEclipse)
        );
        assert_eq!(
            lunar_visibility(&event, &new_york),
            Some(LunarVisibility::SetsDuringEclipse)
        );
        let viewing = lunar_eclipse_viewing(&event, &ross_sea).unwrap();
        assert_eq!(viewing.visibility, LunarVisibility::MaximumOnly);
        assert!(viewing.visibility.is_visible());
        assert!(viewing.best_time.is_some());
    }

    #[test]
    fn only_the_partial_phases_from_europe_in_march_2025() {
        let event = detect_lunar_eclipse(&utc(2025, 3, 14, 6, 59));
        assert_eq!(event.kind, EclipseKind::Lunar(LunarEclipseKind::Total));
        assert_eq!(event.danjon, Some(4));
        let berlin = GeographicLocation::new(52.5, 13.4).unwrap();
        assert_eq!(
            lunar_visibility(&event, &berlin),
            Some(LunarVisibility::PartialPhasesOnly)
        );
    }

    #[test]
    fn circumpolar_moon_at_high_latitude() {
        let event = detect_lunar_eclipse(&utc(2022, 11, 8, 10, 59));
        let north = GeographicLocation::new(75.0, 0.0).unwrap();
        let south = GeographicLocation::new(-75.0, 0.0).unwrap();
        assert_eq!(
            lunar_visibility(&event, &north),
            Some(LunarVisibility::AlwaysAbove)
        );
        assert_eq!(
            lunar_visibility(&event, &south),
            Some(LunarVisibility::AlwaysBelow)
        );
        assert!(LunarVisibility::AlwaysAbove.is_visible());
        assert!(!LunarVisibility::AlwaysBelow.is_visible());
    }
}
