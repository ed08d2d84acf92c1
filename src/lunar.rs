// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Low-precision lunar ephemeris.
//!
//! A truncation of the ELP2000-82 theory: the largest periodic terms of the
//! longitude, latitude and distance series, evaluated on the five Delaunay-like
//! mean elements (L′, D, M, M′, F) plus three additive planetary/flattening
//! corrections. Terms containing the solar anomaly M are scaled by the Earth
//! orbit eccentricity factor `E` (once per power of M). Accuracy is about one
//! arcminute in longitude.
//!
//! The tables below are fixed lookup data; each row is
//! `(D, M, M′, F, coefficient)` and contributes
//! `coefficient · sin(D·D + M·M + M′·M′ + F·F)` (cos for distance).
//!
//! ## References
//! * Meeus, *Astronomical Algorithms* (2nd ed.), ch. 47, tables 47.A / 47.B.
//! * Chapront-Touzé & Chapront (1988), *ELP 2000-85*.

use crate::angle::{cos_deg, normalize_degrees, sin_deg};
use crate::coords::EclipticCoordinates;
use crate::julian::JulianDay;
use crate::solar::solar_position;
use qtty::Centuries;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Base Earth–Moon distance of the series, km.
const BASE_DISTANCE_KM: f64 = 385_000.56;

// Daily rates of the mean elements (degrees per day), used for the analytic
// derivative of the longitude series.
const DAYS_PER_CENTURY: f64 = 36_525.0;
const RATE_L: f64 = 481_267.881_234_21 / DAYS_PER_CENTURY;
const RATE_D: f64 = 445_267.111_403_4 / DAYS_PER_CENTURY;
const RATE_M: f64 = 35_999.050_290_9 / DAYS_PER_CENTURY;
const RATE_MP: f64 = 477_198.867_505_5 / DAYS_PER_CENTURY;
const RATE_F: f64 = 483_202.017_523_3 / DAYS_PER_CENTURY;

/// One row of a periodic series.
#[derive(Debug, Clone, Copy)]
struct Term {
    d: i8,
    m: i8,
    mp: i8,
    f: i8,
    coefficient: f64,
}

const fn term(d: i8, m: i8, mp: i8, f: i8, coefficient: f64) -> Term {
    Term {
        d,
        m,
        mp,
        f,
        coefficient,
    }
}

// ── Σl: longitude, degrees ────────────────────────────────────────────────

const LONGITUDE_TERMS: [Term; 20] = [
    term(0, 0, 1, 0, 6.288_774),
    term(2, 0, -1, 0, 1.274_027),
    term(2, 0, 0, 0, 0.658_314),
    term(0, 0, 2, 0, 0.213_618),
    term(0, 1, 0, 0, -0.185_116),
    term(0, 0, 0, 2, -0.114_332),
    term(2, 0, -2, 0, 0.058_793),
    term(2, -1, -1, 0, 0.057_066),
    term(2, 0, 1, 0, 0.053_322),
    term(2, -1, 0, 0, 0.045_758),
    term(0, 1, -1, 0, -0.040_923),
    term(1, 0, 0, 0, -0.034_720),
    term(0, 1, 1, 0, -0.030_383),
    term(2, 0, 0, -2, 0.015_327),
    term(0, 0, 1, 2, -0.012_528),
    term(0, 0, 1, -2, 0.010_980),
    term(4, 0, -1, 0, 0.010_675),
    term(0, 0, 3, 0, 0.010_034),
    term(4, 0, -2, 0, 0.008_548),
    term(2, 1, -1, 0, -0.007_888),
];

// ── Σb: latitude, degrees ─────────────────────────────────────────────────

const LATITUDE_TERMS: [Term; 13] = [
    term(0, 0, 0, 1, 5.128_122),
    term(0, 0, 1, 1, 0.280_602),
    term(0, 0, 1, -1, 0.277_693),
    term(2, 0, 0, -1, 0.173_237),
    term(2, 0, -1, 1, 0.055_413),
    term(2, 0, -1, -1, 0.046_271),
    term(2, 0, 0, 1, 0.032_573),
    term(0, 0, 2, 1, 0.017_198),
    term(2, 0, 1, -1, 0.009_266),
    term(0, 0, 2, -1, 0.008_822),
    term(2, -1, 0, -1, 0.008_216),
    term(2, 0, -2, -1, 0.004_324),
    term(2, 0, 1, 1, 0.004_200),
];

// ── Σr: distance, kilometres (cosine series) ──────────────────────────────

const DISTANCE_TERMS: [Term; 12] = [
    term(0, 0, 1, 0, -20_905.355),
    term(2, 0, -1, 0, -3_699.111),
    term(2, 0, 0, 0, -2_955.968),
    term(0, 0, 2, 0, -569.925),
    term(2, 0, -2, 0, 246.158),
    term(2, -1, 0, 0, -204.586),
    term(2, 0, 1, 0, -170.733),
    term(2, -1, -1, 0, -152.138),
    term(0, 1, -1, 0, -129.620),
    term(1, 0, 0, 0, 108.743),
    term(0, 1, 1, 0, 104.755),
    term(0, 0, 1, -2, 79.661),
];

/// Mean elements of the lunar orbit at a given epoch, degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LunarElements {
    /// Mean longitude L′.
    pub mean_longitude: f64,
    /// Mean elongation D.
    pub mean_elongation: f64,
    /// Sun's mean anomaly M.
    pub sun_mean_anomaly: f64,
    /// Moon's mean anomaly M′.
    pub moon_mean_anomaly: f64,
    /// Argument of latitude F.
    pub argument_of_latitude: f64,
    /// Orbit eccentricity factor E.
    pub eccentricity_factor: f64,
}

impl LunarElements {
    pub fn at(t: Centuries) -> Self {
        let t = t.value();
        let (t2, t3, t4) = (t * t, t * t * t, t * t * t * t);
        Self {
            mean_longitude: normalize_degrees(
                218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2 + t3 / 538_841.0
                    - t4 / 65_194_000.0,
            ),
            mean_elongation: normalize_degrees(
                297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2 + t3 / 545_868.0
                    - t4 / 113_065_000.0,
            ),
            sun_mean_anomaly: normalize_degrees(
                357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0,
            ),
            moon_mean_anomaly: normalize_degrees(
                134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0
                    - t4 / 14_712_000.0,
            ),
            argument_of_latitude: normalize_degrees(
                93.272_095 + 483_202.017_523_3 * t - 0.003_653_9 * t2 - t3 / 3_526_000.0
                    + t4 / 863_310_000.0,
            ),
            eccentricity_factor: 1.0 - 0.002_516 * t - 0.000_007_4 * t2,
        }
    }

    /// Argument of a series row, degrees.
    #[inline]
    fn argument(&self, row: &Term) -> f64 {
        f64::from(row.d) * self.mean_elongation
            + f64::from(row.m) * self.sun_mean_anomaly
            + f64::from(row.mp) * self.moon_mean_anomaly
            + f64::from(row.f) * self.argument_of_latitude
    }

    /// Rate of change of a row's argument, degrees per day.
    #[inline]
    fn argument_rate(row: &Term) -> f64 {
        f64::from(row.d) * RATE_D
            + f64::from(row.m) * RATE_M
            + f64::from(row.mp) * RATE_MP
            + f64::from(row.f) * RATE_F
    }

    /// `E^|m|` weighting for rows involving the solar anomaly.
    #[inline]
    fn weight(&self, row: &Term) -> f64 {
        self.eccentricity_factor.powi(i32::from(row.m.unsigned_abs()))
    }
}

/// Geocentric Moon position and apparent angular speed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LunarPosition {
    /// Longitude/latitude in degrees, distance in kilometres.
    pub ecliptic: EclipticCoordinates,
    /// Angular speed in ecliptic longitude, degrees per day.
    pub velocity_deg_per_day: f64,
    pub elements: LunarElements,
}

impl LunarPosition {
    #[inline]
    pub fn distance_km(&self) -> f64 {
        self.ecliptic.distance
    }
}

/// Moon position at `t` Julian centuries from J2000.
pub fn lunar_position(t: Centuries) -> LunarPosition {
    let el = LunarElements::at(t);
    let t = t.value();

    let a1 = 119.75 + 131.849 * t;
    let a2 = 53.09 + 479_264.290 * t;
    let a3 = 313.45 + 481_266.484 * t;

    let mut sum_l = 0.0;
    let mut sum_dl = 0.0;
    for row in &LONGITUDE_TERMS {
        let arg = el.argument(row);
        let amplitude = row.coefficient * el.weight(row);
        sum_l += amplitude * sin_deg(arg);
        sum_dl += amplitude * cos_deg(arg) * LunarElements::argument_rate(row).to_radians();
    }
    sum_l += 0.003_958 * sin_deg(a1)
        + 0.001_962 * sin_deg(el.mean_longitude - el.argument_of_latitude)
        + 0.000_318 * sin_deg(a2);

    let mut sum_b: f64 = LATITUDE_TERMS
        .iter()
        .map(|row| row.coefficient * el.weight(row) * sin_deg(el.argument(row)))
        .sum();
    sum_b += -0.002_235 * sin_deg(el.mean_longitude)
        + 0.000_382 * sin_deg(a3)
        + 0.000_175 * sin_deg(a1 - el.argument_of_latitude)
        + 0.000_175 * sin_deg(a1 + el.argument_of_latitude)
        + 0.000_127 * sin_deg(el.mean_longitude - el.moon_mean_anomaly)
        - 0.000_115 * sin_deg(el.mean_longitude + el.moon_mean_anomaly);

    let sum_r: f64 = DISTANCE_TERMS
        .iter()
        .map(|row| row.coefficient * el.weight(row) * cos_deg(el.argument(row)))
        .sum();

    LunarPosition {
        ecliptic: EclipticCoordinates {
            longitude: normalize_degrees(el.mean_longitude + sum_l),
            latitude: sum_b,
            distance: BASE_DISTANCE_KM + sum_r,
        },
        velocity_deg_per_day: RATE_L + sum_dl,
        elements: el,
    }
}

/// Convenience wrapper taking a Julian Day.
#[inline]
pub fn lunar_position_at(jd: JulianDay) -> LunarPosition {
    lunar_position(jd.julian_centuries())
}

/// Elongation-derived phase in `[0, 1)`: `0` new, `0.5` full.
///
/// This estimator follows the true Moon and Sun and is independent of
/// [`moon_phase`](crate::moon_phase), which counts elapsed mean synodic
/// months. Near quarter boundaries the two can disagree by several hours.
pub fn elongation_phase(t: Centuries) -> f64 {
    let moon = lunar_position(t);
    let sun = solar_position(t);
    let phase = normalize_degrees(moon.ecliptic.longitude - sun.ecliptic.longitude) / 360.0;
    if phase >= 1.0 {
        0.0
    } else {
        phase
    }
}
