// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Forward search for upcoming eclipses.
//!
//! Both detectors are sampled on a fixed grid. Consecutive hits of the same
//! body form one eclipse; of those, the sample closest to its own estimated
//! peak is kept, since the peak estimate degrades away from the peak.

use super::{detect_lunar_eclipse, detect_solar_eclipse, EclipseEvent};
use crate::config::EclipseConfig;
use crate::error::{AlmanacError, AlmanacResult};
use crate::riseset::after_minutes;
use chrono::{DateTime, TimeZone, Utc};
use log::{debug, trace};

/// The best sample of an eclipse seen so far.
struct Run {
    event: EclipseEvent,
    /// Seconds between the sample and the peak it estimated.
    miss: i64,
}

impl Run {
    fn offer(run: &mut Option<Run>, event: EclipseEvent, sampled: DateTime<Utc>) {
        let miss = (event.peak - sampled).num_seconds().abs();
        if run.as_ref().map_or(true, |best| miss < best.miss) {
            *run = Some(Run { event, miss });
        }
    }
}

/// Every eclipse within [`EclipseConfig::lookahead_days`] of `instant`,
/// ordered by peak.
///
/// An eclipse already under way at `instant` is included.
pub fn upcoming_eclipses<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    config: &EclipseConfig,
) -> Vec<EclipseEvent> {
    let start = instant.with_timezone(&Utc);
    let step = config.step();
    let samples = config.lookahead_days.saturating_mul(1_440) / step;

    let mut found = Vec::new();
    let mut lunar: Option<Run> = None;
    let mut solar: Option<Run> = None;

    for k in 0..=samples {
        let at = after_minutes(start, f64::from(k) * f64::from(step));
        for (run, event) in [
            (&mut lunar, detect_lunar_eclipse(&at)),
            (&mut solar, detect_solar_eclipse(&at)),
        ] {
            if event.is_eclipse() {
                Run::offer(run, event, at);
            } else if let Some(done) = run.take() {
                trace!("{} eclipse closed at {at}", done.event.kind);
                found.push(done.event);
            }
        }
    }
    found.extend(lunar.into_iter().chain(solar).map(|run| run.event));
    found.sort_by_key(|event| event.peak);

    debug!(
        "{} eclipses within {} days of {start}",
        found.len(),
        config.lookahead_days
    );
    found
}

/// The first eclipse within [`EclipseConfig::lookahead_days`] of `instant`.
///
/// Returns [`AlmanacError::SearchExhausted`] when there is none.
pub fn next_eclipse<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    config: &EclipseConfig,
) -> AlmanacResult<EclipseEvent> {
    upcoming_eclipses(instant, config)
        .into_iter()
        .next()
        .ok_or(AlmanacError::SearchExhausted {
            days: config.lookahead_days,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eclipse::{EclipseKind, LunarEclipseKind, SolarEclipseKind};

    fn utc(y: i32, mo: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn next_eclipse_in_march_2024() {
        let event = next_eclipse(&utc(2024, 3, 20), &EclipseConfig::default()).unwrap();
        assert_eq!(event.kind, EclipseKind::Lunar(LunarEclipseKind::Penumbral));
        assert!((event.peak - Utc.with_ymd_and_hms(2024, 3, 25, 5, 0, 0).unwrap())
            .num_minutes()
            .abs()
            < 90);
    }

    #[test]
    fn month_window_holds_both_kinds_in_order() {
        let cfg = EclipseConfig::default().with_lookahead_days(30);
        let events = upcoming_eclipses(&utc(2024, 3, 20), &cfg);
        let kinds: Vec<EclipseKind> = events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EclipseKind::Lunar(LunarEclipseKind::Penumbral),
                EclipseKind::Solar(SolarEclipseKind::Total),
            ]
        );
        assert!((events[1].peak - Utc.with_ymd_and_hms(2024, 4, 8, 18, 21, 0).unwrap())
            .num_minutes()
            .abs()
            < 30);
    }

    #[test]
    fn quiet_fortnight_exhausts_the_search() {
        let cfg = EclipseConfig::default().with_lookahead_days(7);
        let err = next_eclipse(&utc(2024, 3, 26), &cfg).unwrap_err();
        assert_eq!(err, AlmanacError::SearchExhausted { days: 7 });
    }

    #[test]
    fn each_eclipse_is_reported_once() {
        let cfg = EclipseConfig::default().with_lookahead_days(365);
        let events = upcoming_eclipses(&utc(2025, 1, 1), &cfg);
        assert!(events.len() >= 3);
        assert!(events.windows(2).all(|w| w[0].peak <= w[1].peak));
        for pair in events.windows(2) {
            if std::mem::discriminant(&pair[0].kind) == std::mem::discriminant(&pair[1].kind) {
                assert!((pair[1].peak - pair[0].peak).num_days() > 20);
            }
        }
        let partial_solar = events
            .iter()
            .find(|e| e.kind == EclipseKind::Solar(SolarEclipseKind::Partial))
            .unwrap();
        assert_eq!(partial_solar.peak.date_naive(), utc(2025, 9, 21).date_naive());
    }
}
