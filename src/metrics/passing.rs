//! Pass volume and accuracy metrics.
//!
//! Every family reports a `total_*` / `completed_*` / `ratio_*` triple over
//! the player's passes in their playing window. Set-piece deliveries
//! (throw-ins, free kicks, corners, goal kicks) only count where noted.

use crate::metrics::MetricSet;
use crate::model::{Event, PassData};
use crate::view::PlayerContext;

fn completion_triple<F>(ctx: &PlayerContext, name: &str, pred: F) -> MetricSet
where
    F: Fn(&Event, &PassData) -> bool,
{
    let total = ctx.passes().filter(|(e, p)| pred(e, p)).count() as i64;
    let completed = ctx
        .passes()
        .filter(|(e, p)| pred(e, p) && p.is_complete())
        .count() as i64;

    let mut out = MetricSet::new();
    out.count(&format!("total_{name}"), total);
    out.count(&format!("completed_{name}"), completed);
    out.ratio(&format!("ratio_{name}"), completed, total);
    out
}

pub fn passes_under_pressure(ctx: &PlayerContext) -> MetricSet {
    completion_triple(ctx, "passes_under_pressure", |e, _| e.under_pressure)
}

/// Passes that move the ball closer to the opposition goal line.
pub fn progressive_passes(ctx: &PlayerContext) -> MetricSet {
    completion_triple(ctx, "progressive_passes", |e, p| {
        match (e.x(), p.end_x()) {
            (Some(x), Some(end_x)) => end_x > x,
            _ => false,
        }
    })
}

pub fn long_balls(ctx: &PlayerContext) -> MetricSet {
    let min_length = ctx.cfg.long_ball_length;
    completion_triple(ctx, "long_balls", move |_, p| {
        p.length.map(|l| l >= min_length).unwrap_or(false)
    })
}

pub fn line_breaking_passes(ctx: &PlayerContext) -> MetricSet {
    completion_triple(ctx, "line_breaking_passes", |_, p| p.line_breaking)
}

pub fn through_balls(ctx: &PlayerContext) -> MetricSet {
    completion_triple(ctx, "through_balls", |_, p| p.through_ball)
}

pub fn crosses(ctx: &PlayerContext) -> MetricSet {
    completion_triple(ctx, "crosses", |_, p| p.cross)
}

/// Open-play passes that end inside the opposition box and did not start
/// there. A pass along the byline from the box edge corridor back into the
/// box still counts; restarts never do.
pub fn passes_into_box(ctx: &PlayerContext) -> MetricSet {
    let zones = ctx.cfg.pitch;
    completion_triple(ctx, "passes_into_box", move |e, p| {
        let (Some(x), Some(end_x), Some(end_y)) = (e.x(), p.end_x(), p.end_y()) else {
            return false;
        };
        let started_outside = x < zones.box_edge_x
            || (x >= zones.box_edge_x && end_y < zones.box_y_left)
            || (x >= zones.box_edge_x && end_y > zones.box_y_right);
        started_outside && zones.in_box(end_x, end_y) && !p.is_set_piece()
    })
}

/// Open-play passes that end in the final third.
pub fn final_third_passes(ctx: &PlayerContext) -> MetricSet {
    let final_third = ctx.cfg.pitch.final_third_x;
    completion_triple(ctx, "final_third_passes", move |e, p| {
        let in_zone = e.x().map(|x| x >= final_third).unwrap_or(false)
            || p.end_x().map(|x| x >= final_third).unwrap_or(false);
        in_zone && p.end_x().map(|x| x >= final_third).unwrap_or(false) && !p.is_set_piece()
    })
}

/// Overall open-play pass accuracy.
pub fn open_play_passes(ctx: &PlayerContext) -> MetricSet {
    completion_triple(ctx, "passes", |_, p| !p.is_set_piece())
}

/// Carries plus completed passes that move the ball from outside the final
/// third into it.
pub fn deep_progressions(ctx: &PlayerContext) -> MetricSet {
    let final_third = ctx.cfg.pitch.final_third_x;

    let carries_into_final_third = ctx
        .carries()
        .filter(|(e, c)| {
            e.x().map(|x| x < final_third).unwrap_or(false) && c.end_x() >= final_third
        })
        .count() as i64;
    let passes_into_final_third = ctx
        .passes()
        .filter(|(e, p)| {
            e.x().map(|x| x < final_third).unwrap_or(false)
                && p.end_x().map(|x| x >= final_third).unwrap_or(false)
                && p.is_complete()
        })
        .count() as i64;

    let mut out = MetricSet::new();
    out.count("carries_into_final_third", carries_into_final_third);
    out.count("passes_into_final_third", passes_into_final_third);
    out.count("deep_progressions", carries_into_final_third + passes_into_final_third);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::fixtures::{ev, one_half_match, HOME};
    use crate::metrics::MetricValue;
    use crate::model::{CarryData, EventData, Location, PassOutcome, PassType};

    fn pass_event(index: u32, pass: PassData) -> crate::model::Event {
        ev(index, EventData::Pass { pass }).clock(1, 10, 0).player("Alice").build()
    }

    fn context_over<'a>(
        events: &'a [crate::model::Event],
        cfg: &'a AnalysisConfig,
    ) -> PlayerContext<'a> {
        PlayerContext::new(events, cfg, HOME, "Alice").unwrap()
    }

    #[test]
    fn open_play_accuracy_ignores_restarts() {
        let complete = PassData::default();
        let incomplete = PassData { outcome: PassOutcome::Incomplete, ..PassData::default() };
        let throw_in = PassData { kind: Some(PassType::ThrowIn), ..PassData::default() };

        let events = one_half_match(
            vec![
                pass_event(10, complete),
                pass_event(11, incomplete),
                pass_event(12, throw_in),
            ],
            45,
        );
        let cfg = AnalysisConfig::default();
        let ctx = context_over(&events, &cfg);

        let out = open_play_passes(&ctx);
        assert_eq!(out.get("total_passes"), Some(MetricValue::Count(2)));
        assert_eq!(out.get("completed_passes"), Some(MetricValue::Count(1)));
        assert_eq!(out.get("ratio_passes"), Some(MetricValue::Float(0.5)));
    }

    #[test]
    fn ratio_is_missing_without_qualifying_passes() {
        let events = one_half_match(vec![pass_event(10, PassData::default())], 45);
        let cfg = AnalysisConfig::default();
        let ctx = context_over(&events, &cfg);

        let out = crosses(&ctx);
        assert_eq!(out.get("total_crosses"), Some(MetricValue::Count(0)));
        assert_eq!(out.get("ratio_crosses"), Some(MetricValue::Missing));
    }

    #[test]
    fn pass_into_box_needs_open_play_and_an_outside_start() {
        let into_box = PassData {
            end_location: Some(Location::new(110.0, 40.0)),
            ..PassData::default()
        };
        let from_inside = into_box.clone();
        let corner = PassData {
            kind: Some(PassType::Corner),
            end_location: Some(Location::new(110.0, 40.0)),
            ..PassData::default()
        };

        let events = one_half_match(
            vec![
                {
                    let mut e = pass_event(10, into_box);
                    e.location = Some(Location::new(70.0, 40.0));
                    e
                },
                {
                    let mut e = pass_event(11, from_inside);
                    e.location = Some(Location::new(110.0, 40.0));
                    e
                },
                {
                    let mut e = pass_event(12, corner);
                    e.location = Some(Location::new(120.0, 1.0));
                    e
                },
            ],
            45,
        );
        let cfg = AnalysisConfig::default();
        let ctx = context_over(&events, &cfg);

        let out = passes_into_box(&ctx);
        assert_eq!(out.get("total_passes_into_box"), Some(MetricValue::Count(1)));
    }

    #[test]
    fn long_ball_threshold_is_inclusive() {
        let exactly = PassData { length: Some(35.0), ..PassData::default() };
        let short = PassData { length: Some(34.9), ..PassData::default() };
        let events = one_half_match(vec![pass_event(10, exactly), pass_event(11, short)], 45);
        let cfg = AnalysisConfig::default();
        let ctx = context_over(&events, &cfg);

        let out = long_balls(&ctx);
        assert_eq!(out.get("total_long_balls"), Some(MetricValue::Count(1)));
    }

    #[test]
    fn deep_progressions_mix_carries_and_completed_passes() {
        let carry = ev(
            10,
            EventData::Carry { carry: CarryData { end_location: Location::new(85.0, 40.0) } },
        )
        .clock(1, 10, 0)
        .player("Alice")
        .at(70.0, 40.0)
        .build();
        let pass = {
            let mut e = pass_event(
                11,
                PassData {
                    end_location: Some(Location::new(90.0, 40.0)),
                    ..PassData::default()
                },
            );
            e.location = Some(Location::new(60.0, 40.0));
            e
        };
        let failed_pass = {
            let mut e = pass_event(
                12,
                PassData {
                    end_location: Some(Location::new(90.0, 40.0)),
                    outcome: PassOutcome::Incomplete,
                    ..PassData::default()
                },
            );
            e.location = Some(Location::new(60.0, 40.0));
            e
        };

        let events = one_half_match(vec![carry, pass, failed_pass], 45);
        let cfg = AnalysisConfig::default();
        let ctx = context_over(&events, &cfg);

        let out = deep_progressions(&ctx);
        assert_eq!(out.get("carries_into_final_third"), Some(MetricValue::Count(1)));
        assert_eq!(out.get("passes_into_final_third"), Some(MetricValue::Count(1)));
        assert_eq!(out.get("deep_progressions"), Some(MetricValue::Count(2)));
    }
}
