// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Almanac
//!
//! Low-precision Sun and Moon ephemeris for observers on the ground: where the
//! two bodies are, when they rise and set, how the Moon looks, and whether an
//! eclipse is under way. Accuracy is of the order of an arcminute, which puts
//! rise and set times within a minute or two.
//!
//! # Core types
//!
//! - [`JulianDay`] — continuous day count, the time argument of every series.
//! - [`GeographicLocation`] — observer latitude/longitude (east positive).
//! - [`RiseSetResult`] — rise/set instants or the always-up/never-up verdict.
//! - [`DaylightSummary`] — one day of sunrise, sunset and twilight facts.
//! - [`MoonSummary`] — moonrise, moonset, azimuths, phase and apsis.
//! - [`PhaseInfo`] — Moon phase, phase-model distance and classification.
//! - [`EclipseEvent`] — kind, magnitude, timing and regions of an eclipse.
//! - [`Interval`] — a UTC time span.
//!
//! # Layers
//!
//! | Module | Provides |
//! |--------|----------|
//! | [`julian`] | calendar ↔ Julian Day, Julian centuries |
//! | [`angle`] | degree helpers and normalisation |
//! | [`solar`] | solar longitude, declination, equation of time |
//! | [`lunar`] | truncated lunar series, angular velocity |
//! | [`coords`] | ecliptic → equatorial → horizontal, sidereal time |
//! | [`position`] | Sun and Moon in an observer's sky |
//! | [`riseset`] | rise, set, twilight, daylight summary |
//! | [`phase`] | elapsed-time Moon phase and distance |
//! | [`eclipse`] | lunar and solar eclipse detection, upcoming eclipses |
//! | [`seasons`] | calendar-window seasonal markers |
//!
//! Instants are accepted as `chrono::DateTime<Tz>` for any time zone; the
//! calendar day of a rise/set query is the date in the instant's own offset.
//! Results are returned in UTC. Every function is pure and synchronous.
//!
//! ```
//! use almanac::{solar_rise_set, Depression, GeographicLocation};
//! use chrono::{TimeZone, Utc};
//!
//! let london = GeographicLocation::new(51.5, -0.13).unwrap();
//! let day = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
//! let sun = solar_rise_set(&day, &london, Depression::Standard);
//! assert!(sun.rise.is_some() && sun.set.is_some());
//! ```

pub mod angle;
pub mod config;
pub mod coords;
pub mod eclipse;
mod error;
mod interval;
pub mod julian;
pub mod lunar;
pub mod phase;
pub mod position;
pub mod riseset;
pub mod seasons;
pub mod solar;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use config::{AlmanacConfig, EclipseConfig, RiseSetConfig, SeasonConfig};
pub use coords::{
    EclipticCoordinates, EquatorialCoordinates, GeographicLocation, HorizontalCoordinates,
};
pub use eclipse::{
    danjon_scale, detect_lunar_eclipse, detect_solar_eclipse, lunar_eclipse_viewing,
    lunar_visibility, next_eclipse, solar_visibility, upcoming_eclipses, ContactAltitude,
    EclipseEvent, EclipseKind, EclipsePhaseTimes, LunarEclipseKind, LunarEclipseViewing,
    LunarVisibility, Region, SolarEclipseKind, SolarVisibility,
};
pub use error::{AlmanacError, AlmanacResult};
pub use interval::Interval;
pub use julian::JulianDay;
pub use phase::{
    lunar_apsis, moon_phase, relative_brightness, LunarApsis, PhaseInfo, PhaseName,
};
pub use position::{moon_position, sun_position, BodyPosition};
pub use riseset::{
    lunar_rise_set, nearest_solar_event, solar_rise_set, solar_rise_set_on, DaylightSummary,
    Depression, MoonSummary, RiseSetResult, SearchDirection, SolarEventSearch, TwilightPhase,
};
pub use seasons::{
    near_cross_quarter, near_equinox, near_solstice, season, seasonal_markers, Hemisphere,
    Season, SeasonalMarker, SeasonalProximity,
};
