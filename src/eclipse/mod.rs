// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Lunar and solar eclipse detection.
//!
//! Both detectors answer "is the queried instant close to an eclipse, and of
//! which kind?" from the low-precision ephemerides. They are gated on the
//! elapsed-time [`moon_phase`](crate::moon_phase) so that most instants are
//! rejected without touching the lunar series. Geometry is deliberately
//! coarse:
//!
//! - **Lunar**: node proximity of the Moon to the antisolar point, scaled to
//!   an umbral distance and classified by fixed thresholds. Phase intervals
//!   come from fixed duration ratios centred on the estimated peak.
//! - **Solar**: Sun–Moon separation against the Moon–Sun parallax
//!   difference and the semi-diameters. The central path is three sample
//!   points, not an umbra trace.
//!
//! An instant away from any eclipse yields an [`EclipseEvent`] of kind
//! [`EclipseKind::None`]. [`upcoming_eclipses`] and [`next_eclipse`] sample
//! both detectors forward in time to find the next events.

mod lunar;
mod regions;
mod search;
mod solar;

pub use lunar::{
    danjon_scale, detect_lunar_eclipse, lunar_eclipse_viewing, lunar_visibility, ContactAltitude,
    LunarEclipseViewing, LunarVisibility,
};
pub use regions::{visible_regions, Region};
pub use search::{next_eclipse, upcoming_eclipses};
pub use solar::{detect_solar_eclipse, solar_visibility, SolarVisibility};

use crate::coords::GeographicLocation;
use crate::interval::Interval;
use chrono::{DateTime, Duration, Utc};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LunarEclipseKind {
    Total,
    Partial,
    Penumbral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolarEclipseKind {
    Total,
    Annular,
    Partial,
}

/// Classification of an eclipse query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EclipseKind {
    #[default]
    None,
    Lunar(LunarEclipseKind),
    Solar(SolarEclipseKind),
}

impl EclipseKind {
    #[inline]
    pub fn is_eclipse(&self) -> bool {
        !matches!(self, EclipseKind::None)
    }

    /// `true` for total and annular solar eclipses.
    pub fn is_central(&self) -> bool {
        matches!(
            self,
            EclipseKind::Solar(SolarEclipseKind::Total | SolarEclipseKind::Annular)
        )
    }
}

impl fmt::Display for EclipseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EclipseKind::None => "none",
            EclipseKind::Lunar(LunarEclipseKind::Total) => "lunar-total",
            EclipseKind::Lunar(LunarEclipseKind::Partial) => "lunar-partial",
            EclipseKind::Lunar(LunarEclipseKind::Penumbral) => "lunar-penumbral",
            EclipseKind::Solar(SolarEclipseKind::Total) => "solar-total",
            EclipseKind::Solar(SolarEclipseKind::Annular) => "solar-annular",
            EclipseKind::Solar(SolarEclipseKind::Partial) => "solar-partial",
        };
        f.write_str(label)
    }
}

/// Time spans of the eclipse phases, each centred on the peak.
///
/// For a lunar eclipse the fields are the penumbral, umbral (partial) and
/// total phases. For a solar eclipse `penumbral` is unused, `partial` spans
/// first to last contact and `central` covers totality or annularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EclipsePhaseTimes {
    pub penumbral: Option<Interval>,
    pub partial: Option<Interval>,
    pub central: Option<Interval>,
}

impl EclipsePhaseTimes {
    /// The outermost phase that exists.
    pub fn widest(&self) -> Option<Interval> {
        self.penumbral.or(self.partial).or(self.central)
    }
}

/// Result of an eclipse query.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EclipseEvent {
    pub kind: EclipseKind,
    /// Umbral/penumbral magnitude (lunar) or diameter ratio (solar).
    pub magnitude: f64,
    /// Fraction of the solar disk covered; `None` for lunar eclipses.
    pub obscuration: Option<f64>,
    /// Estimated Danjon brightness of a total lunar eclipse, 0 (very dark)
    /// to 4 (bright copper-red).
    pub danjon: Option<u8>,
    /// Duration of the classified phase, minutes.
    pub duration_minutes: f64,
    pub peak: DateTime<Utc>,
    pub phase_times: EclipsePhaseTimes,
    pub visible_regions: Vec<Region>,
    /// Coarse central-path samples (solar only).
    pub path: Vec<GeographicLocation>,
}

impl EclipseEvent {
    /// The "no eclipse" answer for a query at `instant`.
    pub fn none(instant: DateTime<Utc>) -> Self {
        Self {
            kind: EclipseKind::None,
            magnitude: 0.0,
            obscuration: None,
            danjon: None,
            duration_minutes: 0.0,
            peak: instant,
            phase_times: EclipsePhaseTimes::default(),
            visible_regions: Vec::new(),
            path: Vec::new(),
        }
    }

    #[inline]
    pub fn is_eclipse(&self) -> bool {
        self.kind.is_eclipse()
    }
}

/// `instant` moved by a signed number of days, to the millisecond.
pub(crate) fn shift_days(instant: DateTime<Utc>, days: f64) -> DateTime<Utc> {
    instant + Duration::milliseconds((days * 86_400_000.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn labels() {
        assert_eq!(EclipseKind::None.to_string(), "none");
        assert_eq!(
            EclipseKind::Lunar(LunarEclipseKind::Penumbral).to_string(),
            "lunar-penumbral"
        );
        assert_eq!(
            EclipseKind::Solar(SolarEclipseKind::Annular).to_string(),
            "solar-annular"
        );
        assert!(EclipseKind::Solar(SolarEclipseKind::Total).is_central());
        assert!(!EclipseKind::Lunar(LunarEclipseKind::Total).is_central());
    }

    #[test]
    fn none_event_is_empty() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let event = EclipseEvent::none(at);
        assert!(!event.is_eclipse());
        assert_eq!(event.peak, at);
        assert_eq!(event.phase_times.widest(), None);
        assert!(event.visible_regions.is_empty());
        assert_eq!(event.danjon, None);
    }

    #[test]
    fn widest_prefers_outer_phase() {
        let peak = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let times = EclipsePhaseTimes {
            penumbral: None,
            partial: Some(Interval::centered(peak, 120.0)),
            central: Some(Interval::centered(peak, 4.0)),
        };
        assert_eq!(times.widest(), times.partial);
        assert_eq!(
            shift_days(peak, -0.5),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
    }
}
