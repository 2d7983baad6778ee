//! Match timing model.
//!
//! Period durations come from the Half Start / Half End marker events; the
//! match clock (`minute`/`second`) is period-relative, so elapsed time between
//! two arbitrary events has to be stitched together across period boundaries.

use std::collections::BTreeMap;

use tracing::warn;

use crate::model::{Event, EventData};

/// Format whole seconds as `MM:SS`.
pub fn seconds_to_mmss(total_seconds: i64) -> String {
    let total = total_seconds.max(0);
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Round seconds to decimal minutes, two places.
pub fn seconds_to_minutes_decimal(total_seconds: i64) -> f64 {
    (total_seconds as f64 / 60.0 * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PeriodMarkers {
    /// Clock seconds of the period's Half Start.
    start_clock: i64,
    /// Clock seconds of the period's Half End.
    end_clock: i64,
}

/// Per-period and whole-match durations, immutable once computed from a
/// closed event log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTiming {
    periods: BTreeMap<u8, PeriodMarkers>,
    total_seconds: i64,
}

impl MatchTiming {
    /// Scan the full event log for Half Start / Half End markers.
    ///
    /// A period missing either marker contributes nothing; that is a data
    /// quality gap, not an error.
    pub fn from_events<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a Event>,
    {
        let mut starts: BTreeMap<u8, i64> = BTreeMap::new();
        let mut ends: BTreeMap<u8, i64> = BTreeMap::new();
        for event in events {
            match event.data {
                EventData::HalfStart => {
                    starts.entry(event.period).or_insert_with(|| event.clock_secs());
                }
                EventData::HalfEnd => {
                    ends.entry(event.period).or_insert_with(|| event.clock_secs());
                }
                _ => {}
            }
        }

        let mut periods = BTreeMap::new();
        let mut total_seconds = 0;
        for (&period, &start_clock) in &starts {
            let Some(&end_clock) = ends.get(&period) else {
                warn!(period, "period has a Half Start but no Half End; skipping");
                continue;
            };
            periods.insert(period, PeriodMarkers { start_clock, end_clock });
            total_seconds += end_clock - start_clock;
        }
        Self { periods, total_seconds }
    }

    pub fn period_seconds(&self, period: u8) -> Option<i64> {
        self.periods.get(&period).map(|m| m.end_clock - m.start_clock)
    }

    pub fn periods(&self) -> impl Iterator<Item = u8> + '_ {
        self.periods.keys().copied()
    }

    pub fn total_seconds(&self) -> i64 {
        self.total_seconds
    }

    pub fn total_mmss(&self) -> String {
        seconds_to_mmss(self.total_seconds)
    }

    pub fn total_minutes_decimal(&self) -> f64 {
        seconds_to_minutes_decimal(self.total_seconds)
    }

    /// Elapsed seconds between two events that may sit in different periods.
    ///
    /// Same period: plain clock difference. Across periods: time from the
    /// start event to its period's Half End, plus any fully spanned
    /// intermediate periods, plus time from the end period's Half Start to
    /// the end event. Returns `None` when a needed marker is missing.
    pub fn elapsed_between(&self, start: &Event, end: &Event) -> Option<i64> {
        if start.period == end.period {
            return Some(end.clock_secs() - start.clock_secs());
        }

        let start_markers = self.periods.get(&start.period)?;
        let end_markers = self.periods.get(&end.period)?;

        let mut total = start_markers.end_clock - start.clock_secs();
        for period in (start.period + 1)..end.period {
            let markers = self.periods.get(&period)?;
            total += markers.end_clock - markers.start_clock;
        }
        total += end.clock_secs() - end_markers.start_clock;
        Some(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{half_end, half_start, raw_event};
    use crate::model::EventData;

    fn two_period_markers() -> Vec<Event> {
        vec![
            half_start(3, 1, 0, 0),
            half_end(600, 1, 47, 12),
            half_start(601, 2, 45, 0),
            half_end(1200, 2, 93, 30),
        ]
    }

    #[test]
    fn period_durations_sum_to_total() {
        let events = two_period_markers();
        let timing = MatchTiming::from_events(&events);

        assert_eq!(timing.period_seconds(1), Some(47 * 60 + 12));
        assert_eq!(timing.period_seconds(2), Some((93 - 45) * 60 + 30));
        let sum: i64 = timing.periods().map(|p| timing.period_seconds(p).unwrap()).sum();
        assert_eq!(sum, timing.total_seconds());
    }

    #[test]
    fn formats_total_three_ways() {
        let events = vec![half_start(1, 1, 0, 0), half_end(2, 1, 45, 30)];
        let timing = MatchTiming::from_events(&events);

        assert_eq!(timing.total_seconds(), 2730);
        assert_eq!(timing.total_mmss(), "45:30");
        assert_eq!(timing.total_minutes_decimal(), 45.5);
    }

    #[test]
    fn period_without_end_marker_is_skipped() {
        let events = vec![
            half_start(1, 1, 0, 0),
            half_end(2, 1, 45, 0),
            half_start(3, 2, 45, 0),
            // no Half End for period 2
        ];
        let timing = MatchTiming::from_events(&events);

        assert_eq!(timing.period_seconds(1), Some(2700));
        assert_eq!(timing.period_seconds(2), None);
        assert_eq!(timing.total_seconds(), 2700);
    }

    #[test]
    fn elapsed_within_one_period() {
        let events = two_period_markers();
        let timing = MatchTiming::from_events(&events);
        let a = raw_event(10, 1, 5, 0, EventData::Pressure);
        let b = raw_event(20, 1, 12, 30, EventData::Pressure);

        assert_eq!(timing.elapsed_between(&a, &b), Some(7 * 60 + 30));
    }

    #[test]
    fn elapsed_across_periods_matches_manual_arithmetic() {
        let events = two_period_markers();
        let timing = MatchTiming::from_events(&events);
        let a = raw_event(10, 1, 40, 0, EventData::Pressure);
        let b = raw_event(700, 2, 50, 10, EventData::Pressure);

        // 7:12 left in the first half, then 5:10 into the second.
        let expected = (47 * 60 + 12 - 40 * 60) + (50 * 60 + 10 - 45 * 60);
        assert_eq!(timing.elapsed_between(&a, &b), Some(expected));
    }

    #[test]
    fn elapsed_is_none_when_marker_missing() {
        let events = vec![half_start(1, 1, 0, 0), half_end(2, 1, 45, 0)];
        let timing = MatchTiming::from_events(&events);
        let a = raw_event(10, 1, 40, 0, EventData::Pressure);
        let b = raw_event(700, 2, 50, 0, EventData::Pressure);

        assert_eq!(timing.elapsed_between(&a, &b), None);
    }

    #[test]
    fn mmss_formatting() {
        assert_eq!(seconds_to_mmss(0), "00:00");
        assert_eq!(seconds_to_mmss(61), "01:01");
        assert_eq!(seconds_to_mmss(5400), "90:00");
    }
}
