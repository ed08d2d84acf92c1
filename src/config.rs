// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Tunable knobs of the search algorithms.
//!
//! The crate never reads configuration from disk; callers build an
//! [`AlmanacConfig`] in code or, with the `serde` feature, deserialize it from
//! whatever source they already use. Missing fields fall back to the defaults.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings for rise/set searches.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RiseSetConfig {
    /// Cap of the day-by-day polar fallback scan.
    pub max_search_days: u32,
    /// Sampling step of the lunar altitude grid, minutes (at least 1).
    pub lunar_step_minutes: u32,
    /// Refine lunar crossings by linear interpolation between samples.
    pub interpolate: bool,
}

impl Default for RiseSetConfig {
    fn default() -> Self {
        Self {
            max_search_days: 400,
            lunar_step_minutes: 10,
            interpolate: true,
        }
    }
}

impl RiseSetConfig {
    pub fn with_max_search_days(mut self, days: u32) -> Self {
        self.max_search_days = days;
        self
    }

    pub fn with_lunar_step_minutes(mut self, minutes: u32) -> Self {
        self.lunar_step_minutes = minutes;
        self
    }

    pub fn with_interpolation(mut self, interpolate: bool) -> Self {
        self.interpolate = interpolate;
        self
    }

    /// Effective sampling step; zero is bumped to one minute.
    #[inline]
    pub(crate) fn step_minutes(&self) -> u32 {
        self.lunar_step_minutes.max(1)
    }
}

/// Settings for seasonal marker proximity tests.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SeasonConfig {
    /// Half-width of the "near" window, days.
    pub window_days: u32,
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self { window_days: 7 }
    }
}

/// Settings for the upcoming-eclipse search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EclipseConfig {
    /// How far ahead to look, days.
    pub lookahead_days: u32,
    /// Sampling step, minutes (at least 1). Solar eclipses stay detectable
    /// for well under two hours, so keep this short.
    pub step_minutes: u32,
}

impl Default for EclipseConfig {
    fn default() -> Self {
        Self {
            lookahead_days: 14,
            step_minutes: 30,
        }
    }
}

impl EclipseConfig {
    pub fn with_lookahead_days(mut self, days: u32) -> Self {
        self.lookahead_days = days;
        self
    }

    pub fn with_step_minutes(mut self, minutes: u32) -> Self {
        self.step_minutes = minutes;
        self
    }

    #[inline]
    pub(crate) fn step(&self) -> u32 {
        self.step_minutes.max(1)
    }
}

/// Top-level configuration bundle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AlmanacConfig {
    pub rise_set: RiseSetConfig,
    pub seasons: SeasonConfig,
    pub eclipse: EclipseConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = AlmanacConfig::default();
        assert_eq!(cfg.rise_set.max_search_days, 400);
        assert_eq!(cfg.rise_set.lunar_step_minutes, 10);
        assert!(cfg.rise_set.interpolate);
        assert_eq!(cfg.seasons.window_days, 7);
        assert_eq!(cfg.eclipse.lookahead_days, 14);
        assert_eq!(cfg.eclipse.step_minutes, 30);
    }

    #[test]
    fn eclipse_builders() {
        let cfg = EclipseConfig::default()
            .with_lookahead_days(60)
            .with_step_minutes(0);
        assert_eq!(cfg.lookahead_days, 60);
        assert_eq!(cfg.step(), 1);
    }

    #[test]
    fn zero_step_is_clamped() {
        let cfg = RiseSetConfig::default().with_lunar_step_minutes(0);
        assert_eq!(cfg.step_minutes(), 1);
        let cfg = cfg.with_max_search_days(30).with_interpolation(false);
        assert_eq!(cfg.max_search_days, 30);
        assert!(!cfg.interpolate);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: AlmanacConfig =
            serde_json::from_str(r#"{"rise_set":{"lunar_step_minutes":5}}"#).unwrap();
        assert_eq!(cfg.rise_set.lunar_step_minutes, 5);
        assert_eq!(cfg.rise_set.max_search_days, 400);
        assert_eq!(cfg.seasons.window_days, 7);
        assert_eq!(cfg.eclipse.lookahead_days, 14);
    }
}
