// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Coordinate frames and the rotations between them.
//!
//! ```text
//! ecliptic (λ, β, Δ) ──obliquity ε(T)──▶ equatorial (α, δ)
//! equatorial (α, δ) ──hour angle H = LST − α, latitude φ──▶ horizontal (h, A)
//! ```
//!
//! All angles are degrees except the local sidereal time, which is handed
//! around in radians so it can be fed straight into the hour-angle
//! computation. Azimuth is measured from north through east.

use crate::angle::{
    acos_deg, asin_deg, atan2_deg, cos_deg, normalize_degrees, sin_deg, tan_deg,
};
use crate::error::{AlmanacError, AlmanacResult};
use crate::julian::JulianDay;
use qtty::Centuries;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mean radius of the Earth, used for surface distances.
pub const EARTH_MEAN_RADIUS_KM: f64 = 6_371.0;

/// Equatorial radius of the Earth, used for the lunar parallax.
pub const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6_378.14;

// ═══════════════════════════════════════════════════════════════════════════
// Frames
// ═══════════════════════════════════════════════════════════════════════════

/// Position referenced to the ecliptic plane.
///
/// `distance` is expressed in the unit natural to the body: astronomical
/// units for the Sun, kilometres for the Moon.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EclipticCoordinates {
    /// Ecliptic longitude λ in `[0, 360)` degrees.
    pub longitude: f64,
    /// Ecliptic latitude β in `[-90, 90]` degrees.
    pub latitude: f64,
    pub distance: f64,
}

/// Position referenced to the celestial equator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EquatorialCoordinates {
    /// Right ascension α in `[0, 360)` degrees.
    pub right_ascension: f64,
    /// Declination δ in `[-90, 90]` degrees.
    pub declination: f64,
}

/// Position as seen by an observer on the ground.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HorizontalCoordinates {
    /// Altitude above the geometric horizon, `[-90, 90]` degrees.
    pub altitude: f64,
    /// Azimuth from north through east, `[0, 360)` degrees.
    pub azimuth: f64,
}

/// Observer position on the Earth.
///
/// Longitude is positive east. Elevation is carried for callers and not used
/// by any computation in this crate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeographicLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,
}

impl GeographicLocation {
    /// Validated constructor: latitude in `[-90, 90]`, longitude in
    /// `[-180, 180]`, both finite.
    pub fn new(latitude: f64, longitude: f64) -> AlmanacResult<Self> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(AlmanacError::InvalidLocation {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
            elevation: None,
        })
    }

    /// Attach an elevation in metres.
    pub fn with_elevation(mut self, metres: f64) -> Self {
        self.elevation = Some(metres);
        self
    }

    /// `true` for latitudes at or north of the equator.
    #[inline]
    pub fn is_northern(&self) -> bool {
        self.latitude >= 0.0
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Rotations
// ═══════════════════════════════════════════════════════════════════════════

/// Mean obliquity of the ecliptic ε₀ in degrees (IAU 1980 polynomial).
pub fn mean_obliquity(t: Centuries) -> f64 {
    let t = t.value();
    23.439_291 - 0.013_004_2 * t - 0.000_000_164 * t * t + 0.000_000_504 * t * t * t
}

/// Rotates ecliptic coordinates into the equatorial frame.
pub fn ecliptic_to_equatorial(ecl: &EclipticCoordinates, t: Centuries) -> EquatorialCoordinates {
    rotate_to_equator(ecl.longitude, ecl.latitude, mean_obliquity(t))
}

/// Ecliptic → equatorial with an explicit obliquity (degrees).
pub(crate) fn rotate_to_equator(
    longitude: f64,
    latitude: f64,
    obliquity: f64,
) -> EquatorialCoordinates {
    let (sin_eps, cos_eps) = (sin_deg(obliquity), cos_deg(obliquity));
    let declination =
        asin_deg(sin_deg(latitude) * cos_eps + cos_deg(latitude) * sin_eps * sin_deg(longitude));
    let right_ascension = atan2_deg(
        sin_deg(longitude) * cos_eps - tan_deg(latitude) * sin_eps,
        cos_deg(longitude),
    );
    EquatorialCoordinates {
        right_ascension: normalize_degrees(right_ascension),
        declination,
    }
}

/// Greenwich mean sidereal time in degrees `[0, 360)`.
pub fn greenwich_mean_sidereal_time(jd: JulianDay) -> f64 {
    let t = jd.julian_centuries().value();
    let days = (jd - JulianDay::J2000).value();
    normalize_degrees(
        280.460_618_37 + 360.985_647_366_29 * days + 0.000_387_933 * t * t
            - t * t * t / 38_710_000.0,
    )
}

/// Local mean sidereal time in radians `[0, 2π)`.
///
/// `longitude` is in degrees, positive east.
pub fn local_sidereal_time(jd: JulianDay, longitude: f64) -> f64 {
    normalize_degrees(greenwich_mean_sidereal_time(jd) + longitude).to_radians()
}

/// Altitude and azimuth of an equatorial position for an observer at
/// `latitude` (degrees) whose local sidereal time is `lst` (radians).
pub fn horizontal_from_equatorial(
    eq: &EquatorialCoordinates,
    latitude: f64,
    lst: f64,
) -> HorizontalCoordinates {
    let hour_angle = lst.to_degrees() - eq.right_ascension;
    let (sin_phi, cos_phi) = (sin_deg(latitude), cos_deg(latitude));

    let altitude = asin_deg(
        sin_phi * sin_deg(eq.declination)
            + cos_phi * cos_deg(eq.declination) * cos_deg(hour_angle),
    );
    // Meeus measures from the south; shifting by 180° gives north-based azimuth.
    let azimuth = atan2_deg(
        sin_deg(hour_angle),
        cos_deg(hour_angle) * sin_phi - tan_deg(eq.declination) * cos_phi,
    ) + 180.0;

    HorizontalCoordinates {
        altitude,
        azimuth: normalize_degrees(azimuth),
    }
}

/// Hour angle in degrees `[-180, 180)`: negative east of the meridian.
pub fn hour_angle(eq: &EquatorialCoordinates, lst: f64) -> f64 {
    crate::angle::normalize_signed_degrees(lst.to_degrees() - eq.right_ascension)
}

// ═══════════════════════════════════════════════════════════════════════════
// Distances and corrections
// ═══════════════════════════════════════════════════════════════════════════

/// Angle between two ecliptic positions (spherical law of cosines), degrees.
pub fn angular_separation(a: &EclipticCoordinates, b: &EclipticCoordinates) -> f64 {
    acos_deg(
        sin_deg(a.latitude) * sin_deg(b.latitude)
            + cos_deg(a.latitude) * cos_deg(b.latitude) * cos_deg(a.longitude - b.longitude),
    )
}

/// Surface distance between two places (haversine), kilometres.
pub fn great_circle_distance_km(a: &GeographicLocation, b: &GeographicLocation) -> f64 {
    let half_dlat = (b.latitude - a.latitude).to_radians() / 2.0;
    let half_dlon = (b.longitude - a.longitude).to_radians() / 2.0;
    let h = half_dlat.sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * half_dlon.sin().powi(2);
    2.0 * EARTH_MEAN_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Equatorial horizontal parallax of a body at `distance_km`, degrees.
#[inline]
pub fn horizontal_parallax(distance_km: f64) -> f64 {
    asin_deg(EARTH_EQUATORIAL_RADIUS_KM / distance_km)
}

/// Geocentric → topocentric altitude for a nearby body.
#[inline]
pub fn topocentric_altitude(geocentric_altitude: f64, distance_km: f64) -> f64 {
    geocentric_altitude - horizontal_parallax(distance_km) * cos_deg(geocentric_altitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn obliquity_at_j2000() {
        assert_abs_diff_eq!(mean_obliquity(Centuries::new(0.0)), 23.439_291, epsilon = 1e-9);
        assert!(mean_obliquity(Centuries::new(1.0)) < mean_obliquity(Centuries::new(0.0)));
    }

    #[test]
    fn equinox_point_maps_to_origin() {
        let ecl = EclipticCoordinates {
            longitude: 0.0,
            latitude: 0.0,
            distance: 1.0,
        };
        let eq = ecliptic_to_equatorial(&ecl, Centuries::new(0.0));
        assert_abs_diff_eq!(eq.right_ascension, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(eq.declination, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn solstice_point_reaches_obliquity() {
        let ecl = EclipticCoordinates {
            longitude: 90.0,
            latitude: 0.0,
            distance: 1.0,
        };
        let t = Centuries::new(0.2);
        let eq = ecliptic_to_equatorial(&ecl, t);
        assert_abs_diff_eq!(eq.right_ascension, 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(eq.declination, mean_obliquity(t), epsilon = 1e-9);
    }

    #[test]
    fn sidereal_time_matches_reference() {
        // 1987 April 10, 0h UT: GMST = 13h10m46.3668s = 197.693195°
        let jd = JulianDay::new(2_446_895.5);
        assert_abs_diff_eq!(greenwich_mean_sidereal_time(jd), 197.693_195, epsilon = 1e-5);
        let lst = local_sidereal_time(jd, -77.0);
        assert_abs_diff_eq!(lst.to_degrees(), 120.693_195, epsilon = 1e-5);
        assert!((0.0..std::f64::consts::TAU).contains(&local_sidereal_time(jd, 170.0)));
    }

    #[test]
    fn body_on_meridian_culminates_due_south() {
        let eq = EquatorialCoordinates {
            right_ascension: 40.0,
            declination: 10.0,
        };
        let hz = horizontal_from_equatorial(&eq, 50.0, 40f64.to_radians());
        assert_abs_diff_eq!(hz.altitude, 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(hz.azimuth, 180.0, epsilon = 1e-9);
        assert_abs_diff_eq!(hour_angle(&eq, 40f64.to_radians()), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn rising_body_is_in_the_east() {
        let eq = EquatorialCoordinates {
            right_ascension: 0.0,
            declination: 0.0,
        };
        // Six hours before transit an equatorial body sits on the east point.
        let hz = horizontal_from_equatorial(&eq, 45.0, (-90f64).to_radians());
        assert_abs_diff_eq!(hz.altitude, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(hz.azimuth, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn separation_and_distance() {
        let a = EclipticCoordinates {
            longitude: 359.5,
            latitude: 0.0,
            distance: 1.0,
        };
        let b = EclipticCoordinates {
            longitude: 0.5,
            latitude: 0.0,
            distance: 1.0,
        };
        assert_abs_diff_eq!(angular_separation(&a, &b), 1.0, epsilon = 1e-6);

        let paris = GeographicLocation::new(48.8566, 2.3522).unwrap();
        let london = GeographicLocation::new(51.5074, -0.1278).unwrap();
        let d = great_circle_distance_km(&paris, &london);
        assert!((d - 343.5).abs() < 2.0, "{d}");
    }

    #[test]
    fn parallax_lowers_the_moon() {
        let p = horizontal_parallax(384_400.0);
        assert!((p - 0.9507).abs() < 1e-3, "{p}");
        assert_abs_diff_eq!(topocentric_altitude(0.0, 384_400.0), -p, epsilon = 1e-12);
        assert_abs_diff_eq!(topocentric_altitude(90.0, 384_400.0), 90.0, epsilon = 1e-9);
    }

    #[test]
    fn location_validation() {
        assert!(GeographicLocation::new(91.0, 0.0).is_err());
        assert!(GeographicLocation::new(0.0, 181.0).is_err());
        assert!(GeographicLocation::new(f64::NAN, 0.0).is_err());
        let loc = GeographicLocation::new(-33.9, 151.2).unwrap().with_elevation(58.0);
        assert_eq!(loc.elevation, Some(58.0));
        assert!(!loc.is_northern());
    }
}
