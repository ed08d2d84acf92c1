// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Low-precision solar ephemeris.
//!
//! Geometric mean elements with a three-term equation of the centre, an
//! apparent-longitude correction for nutation and aberration, and the
//! five-term equation of time. Accuracy is about 0.01° in longitude for
//! dates within a few centuries of J2000.
//!
//! ## References
//! * Meeus, *Astronomical Algorithms* (2nd ed.), ch. 25 and 28.

use crate::angle::{asin_deg, atan2_deg, cos_deg, normalize_degrees, sin_deg};
use crate::coords::{mean_obliquity, EclipticCoordinates, EquatorialCoordinates};
use crate::julian::JulianDay;
use qtty::Centuries;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Semi-major axis of the Earth's orbit in AU.
const SEMI_MAJOR_AXIS_AU: f64 = 1.000_001_018;

/// Apparent position of the Sun plus the auxiliary quantities the rise/set
/// and eclipse code need.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolarPosition {
    /// Apparent longitude, latitude fixed at zero, distance in AU.
    pub ecliptic: EclipticCoordinates,
    /// Geometric (true) longitude, degrees.
    pub true_longitude: f64,
    pub mean_longitude: f64,
    pub mean_anomaly: f64,
    /// Eccentricity of the Earth's orbit.
    pub eccentricity: f64,
    /// Obliquity including the nutation term, degrees.
    pub obliquity: f64,
    pub right_ascension: f64,
    pub declination: f64,
    /// Apparent minus mean solar time, minutes.
    pub equation_of_time_minutes: f64,
}

impl SolarPosition {
    /// Equatorial view of [`ecliptic`](Self::ecliptic).
    #[inline]
    pub fn equatorial(&self) -> EquatorialCoordinates {
        EquatorialCoordinates {
            right_ascension: self.right_ascension,
            declination: self.declination,
        }
    }

    /// Earth–Sun distance in AU.
    #[inline]
    pub fn distance_au(&self) -> f64 {
        self.ecliptic.distance
    }
}

/// Solar position at `t` Julian centuries from J2000.
pub fn solar_position(t: Centuries) -> SolarPosition {
    let t = t.value();

    let mean_longitude = normalize_degrees(280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t);
    let mean_anomaly = normalize_degrees(357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t);
    let eccentricity = 0.016_708_634 - 0.000_042_037 * t - 0.000_000_126_7 * t * t;

    let m = mean_anomaly;
    let center = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * sin_deg(m)
        + (0.019_993 - 0.000_101 * t) * sin_deg(2.0 * m)
        + 0.000_289 * sin_deg(3.0 * m);

    let true_longitude = normalize_degrees(mean_longitude + center);
    let true_anomaly = m + center;
    let distance = SEMI_MAJOR_AXIS_AU * (1.0 - eccentricity * eccentricity)
        / (1.0 + eccentricity * cos_deg(true_anomaly));

    // Longitude of the Moon's ascending node drives the dominant nutation term.
    let omega = 125.04 - 1_934.136 * t;
    let apparent_longitude = normalize_degrees(true_longitude - 0.005_69 - 0.004_78 * sin_deg(omega));
    let obliquity = mean_obliquity(Centuries::new(t)) + 0.002_56 * cos_deg(omega);

    let declination = asin_deg(sin_deg(obliquity) * sin_deg(apparent_longitude));
    let right_ascension = normalize_degrees(atan2_deg(
        cos_deg(obliquity) * sin_deg(apparent_longitude),
        cos_deg(apparent_longitude),
    ));

    SolarPosition {
        ecliptic: EclipticCoordinates {
            longitude: apparent_longitude,
            latitude: 0.0,
            distance,
        },
        true_longitude,
        mean_longitude,
        mean_anomaly,
        eccentricity,
        obliquity,
        right_ascension,
        declination,
        equation_of_time_minutes: equation_of_time(
            mean_longitude,
            mean_anomaly,
            eccentricity,
            obliquity,
        ),
    }
}

/// Convenience wrapper taking a Julian Day.
#[inline]
pub fn solar_position_at(jd: JulianDay) -> SolarPosition {
    solar_position(jd.julian_centuries())
}

/// Equation of time in minutes (Smart's series).
fn equation_of_time(l0: f64, m: f64, e: f64, obliquity: f64) -> f64 {
    let y = (obliquity / 2.0).to_radians().tan().powi(2);
    let (l0, m) = (l0.to_radians(), m.to_radians());

    let radians = y * (2.0 * l0).sin() - 2.0 * e * m.sin()
        + 4.0 * e * y * m.sin() * (2.0 * l0).cos()
        - 0.5 * y * y * (4.0 * l0).sin()
        - 1.25 * e * e * (2.0 * m).sin();

    4.0 * radians.to_degrees()
}
