// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Solar eclipse detection, coarse central path and local visibility.

use super::{
    shift_days, visible_regions, EclipseEvent, EclipseKind, EclipsePhaseTimes, SolarEclipseKind,
};
use crate::angle::{asin_deg, normalize_signed_degrees, sin_deg};
use crate::coords::{
    angular_separation, great_circle_distance_km, greenwich_mean_sidereal_time,
    horizontal_parallax, EclipticCoordinates, GeographicLocation, EARTH_EQUATORIAL_RADIUS_KM,
};
use crate::interval::Interval;
use crate::julian::JulianDay;
use crate::lunar::lunar_position;
use crate::phase::phase_fraction;
use crate::position::sun_position_at;
use crate::solar::solar_position;
use chrono::{DateTime, TimeZone, Utc};
use log::{debug, trace};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const PHASE_GATE: f64 = 0.05;
const MAX_SEPARATION: f64 = 1.0;
const MAX_NODE_PROXIMITY: f64 = 1.5;

/// Apparent diameter of the Moon at 384 400 km, degrees.
const MOON_DIAMETER_AT_MEAN: f64 = 0.5181;
const MOON_MEAN_DISTANCE_KM: f64 = 384_400.0;
/// Apparent diameter of the Sun at 1 AU, degrees.
const SUN_DIAMETER_AT_1AU: f64 = 0.5333;
/// Solar horizontal parallax at 1 AU, degrees (8.794″).
const SUN_PARALLAX_AT_1AU: f64 = 8.794 / 3_600.0;
/// Mean apparent motion of the Sun, degrees per day.
const SUN_VELOCITY: f64 = 0.9856;

const MAX_TOTAL_MINUTES: f64 = 7.5;
const MAX_ANNULAR_MINUTES: f64 = 12.5;
const PARTIAL_MINUTES: f64 = 120.0;

/// Longitude offsets of the coarse path samples from the sub-solar meridian.
const PATH_OFFSETS: [f64; 3] = [-45.0, 0.0, 45.0];

/// Is there a solar eclipse near `instant`?
///
/// Gated on the phase being within 0.05 of new. The Sun–Moon separation
/// (spherical law of cosines) is compared against two thresholds, each offset
/// by the Moon–Sun parallax difference `π`. Below `π + |r☾ − r☉|` some part
/// of the Earth sees the disks nested and the eclipse is central: total when
/// the Moon looks at least as large as the Sun, annular otherwise. Below
/// `π + r☾ + r☉` it is partial.
pub fn detect_solar_eclipse<Tz: TimeZone>(instant: &DateTime<Tz>) -> EclipseEvent {
    let at = instant.with_timezone(&Utc);
    let jd = JulianDay::from_instant(instant);

    let phase = phase_fraction(jd);
    if phase > PHASE_GATE && phase < 1.0 - PHASE_GATE {
        return EclipseEvent::none(at);
    }

    let t = jd.julian_centuries();
    let moon = lunar_position(t);
    let sun = solar_position(t);

    let separation = angular_separation(&moon.ecliptic, &sun.ecliptic);
    if separation > MAX_SEPARATION {
        trace!("no solar eclipse at {at}: separation {separation:.3}°");
        return EclipseEvent::none(at);
    }

    let longitude_gap = normalize_signed_degrees(moon.ecliptic.longitude - sun.ecliptic.longitude);
    let node_proximity = moon.ecliptic.latitude.hypot(longitude_gap);
    if node_proximity > MAX_NODE_PROXIMITY {
        trace!("no solar eclipse at {at}: node proximity {node_proximity:.3}°");
        return EclipseEvent::none(at);
    }

    let moon_diameter = MOON_DIAMETER_AT_MEAN * MOON_MEAN_DISTANCE_KM / moon.distance_km();
    let sun_diameter = SUN_DIAMETER_AT_1AU / sun.distance_au();
    let parallax =
        horizontal_parallax(moon.distance_km()) - SUN_PARALLAX_AT_1AU / sun.distance_au();

    let Some(Disks {
        kind,
        magnitude,
        duration_minutes,
    }) = classify_disks(separation, parallax, moon_diameter, sun_diameter)
    else {
        trace!("no solar eclipse at {at}: shadow misses the Earth");
        return EclipseEvent::none(at);
    };

    let obscuration = if magnitude >= 1.0 {
        1.0
    } else {
        magnitude * (2.0 - magnitude)
    };

    let peak = shift_days(at, -longitude_gap / (moon.velocity_deg_per_day - SUN_VELOCITY));
    let peak_jd = JulianDay::from_instant(&peak);
    let sun_at_peak = solar_position(peak_jd.julian_centuries());
    let subsolar_longitude =
        normalize_signed_degrees(sun_at_peak.right_ascension - greenwich_mean_sidereal_time(peak_jd));

    let phase_times = EclipsePhaseTimes {
        penumbral: None,
        partial: Some(Interval::centered(peak, PARTIAL_MINUTES.max(duration_minutes))),
        central: match kind {
            SolarEclipseKind::Partial => None,
            _ => Some(Interval::centered(peak, duration_minutes)),
        },
    };

    let path = central_path(&moon.ecliptic, sun_at_peak.declination, subsolar_longitude);
    let kind = EclipseKind::Solar(kind);
    debug!(
        "{kind} eclipse near {at}: peak {peak}, separation {separation:.3}°, parallax {parallax:.3}°, magnitude {magnitude:.3}"
    );

    EclipseEvent {
        kind,
        magnitude,
        obscuration: Some(obscuration),
        danjon: None,
        duration_minutes,
        peak,
        phase_times,
        visible_regions: visible_regions(subsolar_longitude),
        path,
    }
}

/// Classification of a Sun–Moon overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Disks {
    kind: SolarEclipseKind,
    magnitude: f64,
    duration_minutes: f64,
}

/// Compares the separation with the central limit `π + |r☾ − r☉|` and the
/// contact limit `π + r☾ + r☉`, all in degrees.
fn classify_disks(
    separation: f64,
    parallax: f64,
    moon_diameter: f64,
    sun_diameter: f64,
) -> Option<Disks> {
    let (moon_radius, sun_radius) = (moon_diameter / 2.0, sun_diameter / 2.0);
    let central_limit = parallax + (moon_radius - sun_radius).abs();

    if separation < central_limit {
        let centrality = separation / central_limit;
        let (kind, max_minutes) = if moon_diameter >= sun_diameter {
            (SolarEclipseKind::Total, MAX_TOTAL_MINUTES)
        } else {
            (SolarEclipseKind::Annular, MAX_ANNULAR_MINUTES)
        };
        Some(Disks {
            kind,
            magnitude: moon_diameter / sun_diameter,
            duration_minutes: max_minutes * (1.0 - centrality * centrality),
        })
    } else if separation < parallax + moon_radius + sun_radius {
        let overlap = moon_radius + sun_radius - (separation - parallax);
        Some(Disks {
            kind: SolarEclipseKind::Partial,
            magnitude: overlap / sun_diameter,
            duration_minutes: PARTIAL_MINUTES,
        })
    } else {
        None
    }
}

/// Three points along a constant-latitude approximation of the central path.
fn central_path(
    moon: &EclipticCoordinates,
    sun_declination: f64,
    subsolar_longitude: f64,
) -> Vec<GeographicLocation> {
    let shadow_offset = asin_deg(sin_deg(moon.latitude) * moon.distance / EARTH_EQUATORIAL_RADIUS_KM);
    let latitude = (sun_declination + shadow_offset).clamp(-90.0, 90.0);
    PATH_OFFSETS
        .iter()
        .map(|offset| GeographicLocation {
            latitude,
            longitude: normalize_signed_degrees(subsolar_longitude + offset),
            elevation: None,
        })
        .collect()
}

/// What an observer sees of a solar eclipse at its peak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolarVisibility {
    /// Within 100 km of the coarse central path.
    Central,
    /// Within 500 km of the path.
    DeepPartial,
    /// Within 2000 km of the path.
    Partial,
    /// Sun up, but far from the path.
    NotWellPlaced,
    /// Sun below the horizon at the peak.
    NotVisible,
}

impl SolarVisibility {
    pub fn description(&self) -> &'static str {
        match self {
            SolarVisibility::Central => "near the central path",
            SolarVisibility::DeepPartial => "deep partial eclipse",
            SolarVisibility::Partial => "partial eclipse",
            SolarVisibility::NotWellPlaced => "Sun up, but far from the eclipse path",
            SolarVisibility::NotVisible => "Sun below the horizon at maximum",
        }
    }
}

impl fmt::Display for SolarVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Visibility of a detected solar eclipse from `location`. Returns `None`
/// for events that are not solar eclipses.
pub fn solar_visibility(
    event: &EclipseEvent,
    location: &GeographicLocation,
) -> Option<SolarVisibility> {
    if !matches!(event.kind, EclipseKind::Solar(_)) {
        return None;
    }
    let sun = sun_position_at(JulianDay::from_instant(&event.peak), location);
    if sun.altitude() <= 0.0 {
        return Some(SolarVisibility::NotVisible);
    }

    let distance = event
        .path
        .iter()
        .map(|point| great_circle_distance_km(location, point))
        .fold(f64::INFINITY, f64::min);

    Some(match distance {
        d if d < 100.0 => SolarVisibility::Central,
        d if d < 500.0 => SolarVisibility::DeepPartial,
        d if d < 2_000.0 => SolarVisibility::Partial,
        _ => SolarVisibility::NotWellPlaced,
    })
}
