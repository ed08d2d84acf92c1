// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Moonrise and moonset by altitude sampling.

use super::{after_minutes, local_midnight, next_local_midnight, Depression, RiseSetResult};
use crate::config::RiseSetConfig;
use crate::coords::GeographicLocation;
use crate::julian::JulianDay;
use crate::position::moon_position_at;
use chrono::{DateTime, TimeZone, Utc};
use log::trace;

/// Moonrise and moonset within the local calendar day of `instant`.
///
/// The topocentric altitude is sampled every
/// [`RiseSetConfig::lunar_step_minutes`] from local midnight to the next one,
/// so days around DST changes are 23 or 25 hours long.
/// A rise is a change of `altitude + depression` from negative to
/// non-negative; a set is the reverse. Only the first of each is reported.
/// With interpolation enabled the crossing is placed linearly between the two
/// bracketing samples, otherwise at the later sample.
///
/// A day without a crossing is common (the Moon rises ~50 minutes later each
/// day) and says nothing about circumpolarity: `always_up`/`never_up` only
/// summarise the sampled window.
pub fn lunar_rise_set<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    location: &GeographicLocation,
    depression: Depression,
    config: &RiseSetConfig,
) -> RiseSetResult {
    let start = local_midnight(instant);
    let window_minutes =
        u32::try_from((next_local_midnight(instant) - start).num_minutes()).unwrap_or(1_440);
    let step = config.step_minutes();
    let offset = depression.degrees();

    let height = |minutes: u32| -> f64 {
        let at = after_minutes(start, f64::from(minutes));
        moon_position_at(JulianDay::from_instant(&at), location).altitude() + offset
    };

    let mut result = RiseSetResult::default();
    let mut all_above = true;
    let mut all_below = true;

    let mut prev_minutes = 0;
    let mut prev = height(0);
    track(prev, &mut all_above, &mut all_below);

    while prev_minutes < window_minutes {
        let minutes = (prev_minutes + step).min(window_minutes);
        let current = height(minutes);
        track(current, &mut all_above, &mut all_below);

        let rising = prev < 0.0 && current >= 0.0;
        let setting = prev >= 0.0 && current < 0.0;
        if (rising && result.rise.is_none()) || (setting && result.set.is_none()) {
            let at = crossing(start, prev_minutes, minutes, prev, current, config.interpolate);
            if rising {
                result.rise = Some(at);
            } else {
                result.set = Some(at);
            }
        }

        prev_minutes = minutes;
        prev = current;
    }

    if !result.has_event() {
        result.always_up = all_above;
        result.never_up = all_below;
        trace!(
            "no lunar crossing in window starting {start} (always_up = {all_above}, never_up = {all_below})"
        );
    }
    result
}

#[inline]
fn track(height: f64, all_above: &mut bool, all_below: &mut bool) {
    if height >= 0.0 {
        *all_below = false;
    } else {
        *all_above = false;
    }
}

fn crossing(
    start: DateTime<Utc>,
    before: u32,
    after: u32,
    h_before: f64,
    h_after: f64,
    interpolate: bool,
) -> DateTime<Utc> {
    if !interpolate {
        return after_minutes(start, f64::from(after));
    }
    let fraction = h_before / (h_before - h_after);
    let span = f64::from(after - before);
    after_minutes(start, f64::from(before) + span * fraction)
}
