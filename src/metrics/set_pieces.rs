//! Set-piece phase metrics.
//!
//! A set-piece phase is every event in the same possession within a short
//! window after a dead-ball delivery (throw-in, free kick, corner, goal
//! kick) taken in the final third. The phase views reuse the open-play
//! aggregators over that slice, prefixed `set_piece_`.

use crate::metrics::{defending, possession, shooting, MetricSet, MetricValue};
use crate::model::Event;
use crate::view::PlayerContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    /// Phases following the player's team's deliveries.
    For,
    /// Phases following opposition deliveries.
    Against,
    /// Both.
    Full,
}

/// Collect the phase events for a scope. Overlapping phases contribute their
/// shared events once per phase, mirroring how the counts are defined.
fn phase_events<'a>(ctx: &PlayerContext<'a>, scope: Scope) -> Vec<&'a Event> {
    let window_secs = ctx.cfg.set_piece_window_secs;
    let zone_x = ctx.cfg.pitch.final_third_x;

    let deliveries = ctx.match_events.iter().filter(|e| {
        let Some(pass) = e.pass() else { return false };
        let in_scope = match scope {
            Scope::For => e.team == ctx.team,
            Scope::Against => e.team != ctx.team,
            Scope::Full => true,
        };
        in_scope && pass.is_set_piece() && e.x().map(|x| x >= zone_x).unwrap_or(false)
    });

    let mut phase = Vec::new();
    for delivery in deliveries {
        phase.extend(ctx.match_events.iter().copied().filter(|e| {
            e.index >= delivery.index
                && e.period == delivery.period
                && e.timestamp.as_secs() - delivery.timestamp.as_secs() <= window_secs
                && e.possession_team == delivery.possession_team
        }));
    }
    phase
}

fn count_deliveries(pool: &[&Event]) -> i64 {
    pool.iter()
        .filter(|e| e.pass().map(|p| p.is_set_piece()).unwrap_or(false))
        .count() as i64
}

pub fn set_piece_clearances(ctx: &PlayerContext) -> MetricSet {
    let pool = phase_events(ctx, Scope::Against);
    if pool.is_empty() {
        return defending::clearances(ctx).zeroed().prefixed("set_piece_");
    }
    defending::clearances_from(ctx.player, &pool).prefixed("set_piece_")
}

pub fn set_piece_blocked_shots(ctx: &PlayerContext) -> MetricSet {
    let pool = phase_events(ctx, Scope::Against);
    if pool.is_empty() {
        return defending::blocked_shots(ctx).zeroed().prefixed("set_piece_");
    }
    let full = phase_events(ctx, Scope::Full);
    defending::blocked_shots_from(ctx.player, ctx.team, &full, &pool).prefixed("set_piece_")
}

pub fn set_piece_shots_output(ctx: &PlayerContext) -> MetricSet {
    let pool = phase_events(ctx, Scope::For);
    if pool.is_empty() {
        let mut out = shooting::shots_output(ctx).zeroed().prefixed("set_piece_");
        out.count("set_pieces", 0);
        out.missing("shots_set_piece_ratio");
        return out;
    }

    let deliveries = count_deliveries(&pool);
    let mut out = shooting::shots_from(ctx.player, pool).prefixed("set_piece_");
    let shots = out
        .get("set_piece_shots")
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as i64;
    out.count("set_pieces", deliveries);
    out.ratio("shots_set_piece_ratio", deliveries, shots);
    out
}

pub fn set_piece_touches_inside_box(ctx: &PlayerContext) -> MetricSet {
    let pool = phase_events(ctx, Scope::For);
    if pool.is_empty() {
        let mut out = possession::touches_inside_box(ctx).zeroed().prefixed("set_piece_");
        out.count("set_pieces", 0);
        out.missing("touches_inside_box_set_piece_ratio");
        return out;
    }

    let deliveries = count_deliveries(&pool);
    let mut out = possession::touches_inside_box_from(ctx.player, &ctx.cfg.pitch, pool)
        .prefixed("set_piece_");
    let touches = out
        .get("set_piece_total_touches_inside_box")
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as i64;
    out.count("set_pieces", deliveries);
    out.ratio("touches_inside_box_set_piece_ratio", deliveries, touches);
    out
}
