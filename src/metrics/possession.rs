//! On-ball metrics: possession value, box touches, take-ons, receptions.

use crate::config::PitchZones;
use crate::metrics::{MetricSet, MetricValue};
use crate::model::{Event, EventData, TOUCH_LABELS};
use crate::view::PlayerContext;

/// Possession-value (OBV) sums from the player's passes, dribbles and
/// carries. A kind the player never attempted reports `Missing`, not zero.
pub fn obv(ctx: &PlayerContext) -> MetricSet {
    let mut sums: [(i64, f64); 3] = [(0, 0.0); 3]; // pass, dribble, carry
    for event in &ctx.player_events {
        let slot = match event.data {
            EventData::Pass { .. } => 0,
            EventData::Dribble { .. } => 1,
            EventData::Carry { .. } => 2,
            _ => continue,
        };
        sums[slot].0 += 1;
        sums[slot].1 += event.obv_total_net.unwrap_or(0.0);
    }

    let value = |(n, sum): (i64, f64)| {
        if n == 0 { MetricValue::Missing } else { MetricValue::float(sum) }
    };
    let total: f64 = sums.iter().filter(|(n, _)| *n > 0).map(|(_, s)| s).sum();

    let mut out = MetricSet::new();
    out.set("passes_obv", value(sums[0]));
    out.set("dribbles_obv", value(sums[1]));
    out.set("carries_obv", value(sums[2]));
    out.float("sum_obv", total);
    out
}

pub fn touches_inside_box(ctx: &PlayerContext) -> MetricSet {
    touches_inside_box_from(ctx.player, &ctx.cfg.pitch, ctx.team_events())
}

/// Per-kind touch counts inside the opposition box, one fixed column per
/// touch kind plus the total.
pub fn touches_inside_box_from<'a, I>(player: &str, zones: &PitchZones, events: I) -> MetricSet
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut counts = vec![0i64; TOUCH_LABELS.len()];
    let mut total = 0i64;
    for event in events {
        if !event.is_by(player) || !event.is_touch() {
            continue;
        }
        let inside = match (event.x(), event.y()) {
            (Some(x), Some(y)) => zones.in_box(x, y),
            _ => false,
        };
        if !inside {
            continue;
        }
        if let Some(slot) = TOUCH_LABELS.iter().position(|l| *l == event.data.label()) {
            counts[slot] += 1;
            total += 1;
        }
    }

    let mut out = MetricSet::new();
    for (label, count) in TOUCH_LABELS.iter().zip(counts) {
        out.count(&format!("{label}_inside_box"), count);
    }
    out.count("total_touches_inside_box", total);
    out
}

pub fn dribbles(ctx: &PlayerContext) -> MetricSet {
    let total = ctx
        .player_events
        .iter()
        .filter(|e| e.dribble().is_some())
        .count() as i64;
    let completed = ctx
        .player_events
        .iter()
        .filter(|e| e.dribble().map(|d| d.is_complete()).unwrap_or(false))
        .count() as i64;

    let mut out = MetricSet::new();
    out.count("total_dribbles", total);
    out.count("completed_dribbles", completed);
    out.ratio("ratio_dribbles", completed, total);
    out
}

/// Receptions overall, under pressure, and inside the box, each with a
/// success count and ratio, plus the share each split takes of the total.
pub fn ball_receptions(ctx: &PlayerContext) -> MetricSet {
    let receipts: Vec<&Event> = ctx
        .player_events
        .iter()
        .copied()
        .filter(|e| e.ball_receipt().is_some())
        .collect();
    let successful = |e: &&Event| {
        e.ball_receipt()
            .map(|r| r.outcome == crate::model::ReceiptOutcome::Complete)
            .unwrap_or(false)
    };
    let in_box = |e: &&Event| match (e.x(), e.y()) {
        (Some(x), Some(y)) => ctx.cfg.pitch.in_box(x, y),
        _ => false,
    };

    let total = receipts.len() as i64;
    let won = receipts.iter().filter(|e| successful(e)).count() as i64;

    let pressured: Vec<&&Event> = receipts.iter().filter(|e| e.under_pressure).collect();
    let pressured_total = pressured.len() as i64;
    let pressured_won = pressured.iter().filter(|e| successful(e)).count() as i64;

    let boxed: Vec<&&Event> = receipts.iter().filter(|e| in_box(e)).collect();
    let boxed_total = boxed.len() as i64;
    let boxed_won = boxed.iter().filter(|e| successful(e)).count() as i64;

    let mut out = MetricSet::new();
    out.count("total_ball_receptions", total);
    out.count("successful_ball_receptions", won);
    out.ratio("ball_receptions_ratio", won, total);
    out.count("total_ball_receptions_under_pressure", pressured_total);
    out.count("successful_ball_receptions_under_pressure", pressured_won);
    out.ratio("ball_receptions_under_pressure_ratio", pressured_won, pressured_total);
    out.ratio("pressured_ball_receptions_ratio", pressured_total, total);
    out.count("total_ball_receptions_in_the_box", boxed_total);
    out.count("successful_ball_receptions_in_the_box", boxed_won);
    out.ratio("ball_receptions_in_the_box_ratio", boxed_won, boxed_total);
    out.ratio("box_ball_receptions_ratio", boxed_total, total);
    out
}

/// How many box touches the player needed per shot.
pub fn touches_to_shots(ctx: &PlayerContext) -> MetricSet {
    let touches = touches_inside_box(ctx)
        .get("total_touches_inside_box")
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as i64;
    let shots = ctx.shots().count() as i64;

    let mut out = MetricSet::new();
    out.count("total_touches_inside_box", touches);
    out.count("shots", shots);
    out.ratio("ratio_touches_inside_box_to_shots", touches, shots);
    out
}
