// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Moon phase and phase-derived distance.
//!
//! The phase here is an elapsed-time estimate: the number of mean synodic
//! months since a reference new moon, reduced to `[0, 1)`. It does not consult
//! the lunar series and can differ by a few hours from
//! [`elongation_phase`](crate::lunar::elongation_phase), which follows the true
//! Sun and Moon. Both are kept; pick the one whose behaviour you depend on.
//!
//! The distance is a single-term approximation driven by the phase, not the
//! ephemeris distance. It puts every full moon near 405 500 km, so
//! [`PhaseInfo::is_micromoon`] holds for any phase within 0.1 of full and
//! [`PhaseInfo::is_supermoon`] never does. Use
//! [`LunarPosition::distance_km`](crate::lunar::LunarPosition::distance_km)
//! when the real distance matters.
//!
//! Perigee and apogee countdowns follow the mean anomalistic month from the
//! perigee of 1999 December 22; true apsides can be a day or so off the mean
//! ones.

use crate::julian::JulianDay;
use chrono::{DateTime, TimeZone};
use qtty::{Days, Simplify};
use std::f64::consts::TAU;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mean synodic month.
pub const SYNODIC_MONTH: Days = Days::new(29.530_59);

/// New moon of 2000 January 6, 18:14 UT.
pub const REFERENCE_NEW_MOON: JulianDay = JulianDay::new(2_451_550.259_72);

/// Mean Earth–Moon distance used by the phase model, km.
pub const MEAN_DISTANCE_KM: f64 = 384_400.0;

/// Mean anomalistic month, perigee to perigee.
pub const ANOMALISTIC_MONTH: Days = Days::new(27.554_549_878);

/// Mean perigee of 1999 December 22 (k = 0).
const REFERENCE_PERIGEE: f64 = 2_451_534.669_8;

const ECCENTRICITY: f64 = 0.0549;
const SUPERMOON_KM: f64 = 367_000.0;
const MICROMOON_KM: f64 = 400_000.0;
const CLOSE_APPROACH_KM: f64 = 370_000.0;

/// Named phase of the lunar cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PhaseName {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl PhaseName {
    /// Name of a phase fraction. The principal phases own a ±0.02 band.
    pub fn from_phase(phase: f64) -> Self {
        match phase {
            p if p <= 0.02 || p >= 0.98 => PhaseName::NewMoon,
            p if p < 0.23 => PhaseName::WaxingCrescent,
            p if p <= 0.27 => PhaseName::FirstQuarter,
            p if p < 0.48 => PhaseName::WaxingGibbous,
            p if p <= 0.52 => PhaseName::FullMoon,
            p if p < 0.73 => PhaseName::WaningGibbous,
            p if p <= 0.77 => PhaseName::LastQuarter,
            _ => PhaseName::WaningCrescent,
        }
    }
}

impl fmt::Display for PhaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PhaseName::NewMoon => "new moon",
            PhaseName::WaxingCrescent => "waxing crescent",
            PhaseName::FirstQuarter => "first quarter",
            PhaseName::WaxingGibbous => "waxing gibbous",
            PhaseName::FullMoon => "full moon",
            PhaseName::WaningGibbous => "waning gibbous",
            PhaseName::LastQuarter => "last quarter",
            PhaseName::WaningCrescent => "waning crescent",
        };
        f.write_str(label)
    }
}

/// Phase facts of the Moon at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhaseInfo {
    /// `[0, 1)`: 0 new, 0.25 first quarter, 0.5 full, 0.75 last quarter.
    pub phase: f64,
    pub distance_km: f64,
    /// Illuminated fraction of the disk, `[0, 1]`.
    pub illumination: f64,
    pub name: PhaseName,
    pub is_supermoon: bool,
    pub is_micromoon: bool,
    pub is_close_approach: bool,
    /// Brightness relative to a mean-distance full moon without opposition
    /// surge, percent. See [`relative_brightness`].
    pub brightness: f64,
    pub days_to_new_moon: f64,
    pub days_to_full_moon: f64,
}

impl PhaseInfo {
    /// Derives every field from a phase fraction.
    pub fn from_phase(phase: f64) -> Self {
        let distance_km = MEAN_DISTANCE_KM * (1.0 - ECCENTRICITY * (TAU * phase).cos());
        let near_full = (phase - 0.5).abs() < 0.1;
        let month = SYNODIC_MONTH.value();
        Self {
            phase,
            distance_km,
            illumination: (1.0 - (TAU * phase).cos()) / 2.0,
            name: PhaseName::from_phase(phase),
            is_supermoon: distance_km < SUPERMOON_KM && near_full,
            is_micromoon: distance_km > MICROMOON_KM && near_full,
            is_close_approach: distance_km < CLOSE_APPROACH_KM,
            brightness: relative_brightness(phase, distance_km),
            days_to_new_moon: (1.0 - phase).rem_euclid(1.0) * month,
            days_to_full_moon: (0.5 - phase).rem_euclid(1.0) * month,
        }
    }

    /// `true` while the lit fraction grows.
    #[inline]
    pub fn is_waxing(&self) -> bool {
        self.phase < 0.5
    }
}

/// Phase fraction in `[0, 1)` at a Julian Day.
pub fn phase_fraction(jd: JulianDay) -> f64 {
    let months = ((jd - REFERENCE_NEW_MOON) / SYNODIC_MONTH).simplify().value();
    let phase = months.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1 for tiny negative inputs
    if phase >= 1.0 {
        0.0
    } else {
        phase
    }
}

/// Lunar brightness in percent of a full moon at mean distance.
///
/// The lit fraction is scaled by the inverse square of the distance and by an
/// opposition surge of up to 5 %, decaying over ~30° of phase angle from full.
pub fn relative_brightness(phase: f64, distance_km: f64) -> f64 {
    let phase_angle = 360.0 * phase;
    let lit = (1.0 - (TAU * phase).cos()) / 2.0;
    let distance = (MEAN_DISTANCE_KM / distance_km).powi(2);
    let surge = 1.0 + 0.05 * (-(180.0 - phase_angle).abs() / 30.0).exp();
    100.0 * lit * distance * surge
}

/// Countdown to the next mean perigee and apogee.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LunarApsis {
    pub days_to_perigee: f64,
    pub days_to_apogee: f64,
}

/// Days to the next mean perigee and apogee after `jd`.
pub fn lunar_apsis(jd: JulianDay) -> LunarApsis {
    let month = ANOMALISTIC_MONTH.value();
    let k = ((jd.value() - REFERENCE_PERIGEE) / month).floor();
    let t = k / 1_325.55;
    let perigee = REFERENCE_PERIGEE + month * k - 0.000_669_1 * t * t - 0.000_001_098 * t * t * t;
    let cycle = ((jd.value() - perigee) / month).rem_euclid(1.0);
    LunarApsis {
        days_to_perigee: (1.0 - cycle).rem_euclid(1.0) * month,
        days_to_apogee: (0.5 - cycle).rem_euclid(1.0) * month,
    }
}

/// Moon phase, phase-model distance and classification at `instant`.
pub fn moon_phase<Tz: TimeZone>(instant: &DateTime<Tz>) -> PhaseInfo {
    PhaseInfo::from_phase(phase_fraction(JulianDay::from_instant(instant)))
}
