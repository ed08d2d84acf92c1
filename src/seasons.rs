// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar-window seasonal markers.
//!
//! Solstices, equinoxes and the four cross-quarter days are pinned to fixed
//! calendar dates (they drift by a day or two between years). A date is
//! "near" a marker when it lies within a symmetric window of whole days of
//! the marker in the same, previous or next year. No ephemeris is involved.

use crate::config::SeasonConfig;
use crate::coords::GeographicLocation;
use chrono::{Datelike, NaiveDate};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Hemisphere {
    Northern,
    Southern,
}

impl Hemisphere {
    pub fn of(location: &GeographicLocation) -> Self {
        if location.is_northern() {
            Hemisphere::Northern
        } else {
            Hemisphere::Southern
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
        })
    }
}

/// A marker as experienced in one hemisphere: the June solstice is the
/// longest day in the north and the shortest in the south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SeasonalMarker {
    LongestDay,
    ShortestDay,
    SpringEquinox,
    AutumnEquinox,
    /// Early spring cross-quarter.
    Imbolc,
    /// Early summer cross-quarter.
    Beltane,
    /// Early autumn cross-quarter.
    Lughnasadh,
    /// Early winter cross-quarter.
    Samhain,
}

impl fmt::Display for SeasonalMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SeasonalMarker::LongestDay => "longest day",
            SeasonalMarker::ShortestDay => "shortest day",
            SeasonalMarker::SpringEquinox => "spring equinox",
            SeasonalMarker::AutumnEquinox => "autumn equinox",
            SeasonalMarker::Imbolc => "Imbolc (early spring)",
            SeasonalMarker::Beltane => "Beltane (early summer)",
            SeasonalMarker::Lughnasadh => "Lughnasadh (early autumn)",
            SeasonalMarker::Samhain => "Samhain (early winter)",
        })
    }
}

/// A marker within the window of the queried date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SeasonalProximity {
    pub marker: SeasonalMarker,
    pub date: NaiveDate,
    /// Days from the queried date to the marker; negative once it has passed.
    pub days: i64,
}

/// Month, day, and the marker it represents north and south of the equator.
type Entry = (u32, u32, SeasonalMarker, SeasonalMarker);

const SOLSTICES: [Entry; 2] = [
    (6, 21, SeasonalMarker::LongestDay, SeasonalMarker::ShortestDay),
    (12, 21, SeasonalMarker::ShortestDay, SeasonalMarker::LongestDay),
];

const EQUINOXES: [Entry; 2] = [
    (3, 20, SeasonalMarker::SpringEquinox, SeasonalMarker::AutumnEquinox),
    (9, 22, SeasonalMarker::AutumnEquinox, SeasonalMarker::SpringEquinox),
];

const CROSS_QUARTERS: [Entry; 4] = [
    (2, 2, SeasonalMarker::Imbolc, SeasonalMarker::Lughnasadh),
    (5, 6, SeasonalMarker::Beltane, SeasonalMarker::Samhain),
    (8, 6, SeasonalMarker::Lughnasadh, SeasonalMarker::Imbolc),
    (11, 6, SeasonalMarker::Samhain, SeasonalMarker::Beltane),
];

fn nearest(
    entries: &[Entry],
    date: NaiveDate,
    hemisphere: Hemisphere,
    window_days: u32,
) -> Option<SeasonalProximity> {
    let window = i64::from(window_days);
    (date.year() - 1..=date.year() + 1)
        .flat_map(|year| entries.iter().map(move |entry| (year, entry)))
        .filter_map(|(year, &(month, day, north, south))| {
            let marker_date = NaiveDate::from_ymd_opt(year, month, day)?;
            let days = (marker_date - date).num_days();
            (days.abs() <= window).then_some(SeasonalProximity {
                marker: match hemisphere {
                    Hemisphere::Northern => north,
                    Hemisphere::Southern => south,
                },
                date: marker_date,
                days,
            })
        })
        .min_by_key(|p| p.days.abs())
}

/// Solstice within `window_days` of `date`.
pub fn near_solstice(
    date: NaiveDate,
    hemisphere: Hemisphere,
    window_days: u32,
) -> Option<SeasonalProximity> {
    nearest(&SOLSTICES, date, hemisphere, window_days)
}

/// Equinox within `window_days` of `date`.
pub fn near_equinox(
    date: NaiveDate,
    hemisphere: Hemisphere,
    window_days: u32,
) -> Option<SeasonalProximity> {
    nearest(&EQUINOXES, date, hemisphere, window_days)
}

/// Cross-quarter day within `window_days` of `date`.
pub fn near_cross_quarter(
    date: NaiveDate,
    hemisphere: Hemisphere,
    window_days: u32,
) -> Option<SeasonalProximity> {
    nearest(&CROSS_QUARTERS, date, hemisphere, window_days)
}

/// Every marker near `date` under the configured window, solstices first.
pub fn seasonal_markers(
    date: NaiveDate,
    hemisphere: Hemisphere,
    config: &SeasonConfig,
) -> Vec<SeasonalProximity> {
    let finders: [fn(NaiveDate, Hemisphere, u32) -> Option<SeasonalProximity>; 3] =
        [near_solstice, near_equinox, near_cross_quarter];
    finders
        .iter()
        .filter_map(|find| find(date, hemisphere, config.window_days))
        .collect()
}

/// Astronomical season by day-of-year boundaries (Mar 20, Jun 21, Sep 23,
/// Dec 21 in common years).
pub fn season(date: NaiveDate, hemisphere: Hemisphere) -> Season {
    let northern = match date.ordinal() {
        79..=171 => Season::Spring,
        172..=265 => Season::Summer,
        266..=354 => Season::Autumn,
        _ => Season::Winter,
    };
    match hemisphere {
        Hemisphere::Northern => northern,
        Hemisphere::Southern => match northern {
            Season::Spring => Season::Autumn,
            Season::Summer => Season::Winter,
            Season::Autumn => Season::Spring,
            Season::Winter => Season::Summer,
        },
    }
}
