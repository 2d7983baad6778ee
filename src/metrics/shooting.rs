//! Shot volume, accuracy and expected-goals metrics.

use crate::metrics::{MetricSet, MetricValue};
use crate::model::Event;
use crate::view::PlayerContext;

pub fn shots_output(ctx: &PlayerContext) -> MetricSet {
    shots_from(ctx.player, ctx.team_events())
}

/// Shot summary over an arbitrary pool of events (the set-piece phase view
/// reuses this with its own slice). Only the player's shots count.
pub fn shots_from<'a, I>(player: &str, events: I) -> MetricSet
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut shots = 0i64;
    let mut on_target = 0i64;
    let mut goals = 0i64;
    let mut xg = 0.0f64;

    for event in events {
        let Some(shot) = event.shot() else { continue };
        if !event.is_by(player) {
            continue;
        }
        shots += 1;
        xg += shot.statsbomb_xg.unwrap_or(0.0);
        if let Some(outcome) = shot.outcome {
            if outcome.is_on_target() {
                on_target += 1;
            }
            if outcome == crate::model::ShotOutcome::Goal {
                goals += 1;
            }
        }
    }

    let mut out = MetricSet::new();
    out.count("shots", shots);
    out.count("shots_on_target", on_target);
    out.ratio("ratio_shots", on_target, shots);
    out.count("goals", goals);
    out.ratio("shot_conversion", goals, shots);
    out.float("xg", xg);
    out.set(
        "shot_quality",
        if shots == 0 { MetricValue::Missing } else { MetricValue::float(xg / shots as f64) },
    );
    out
}
