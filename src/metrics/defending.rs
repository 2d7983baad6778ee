//! Out-of-possession metrics: blocks, clearances, aggressive actions and
//! one-on-one defending.

use std::collections::HashSet;

use crate::metrics::{MetricSet, MetricValue};
use crate::model::{DribbleOutcome, Event, EventData};
use crate::view::PlayerContext;

pub fn blocked_shots(ctx: &PlayerContext) -> MetricSet {
    let pool: Vec<&Event> = ctx.team_events().collect();
    blocked_shots_from(ctx.player, ctx.team, &ctx.match_events, &pool)
}

/// Opponent shots faced by the player's team and how many the player
/// blocked. Blocks are tied to shots through the shot's related-event ids.
pub fn blocked_shots_from<'a>(
    player: &str,
    team: &str,
    match_events: &[&'a Event],
    pool: &[&'a Event],
) -> MetricSet {
    let opponent_shots: Vec<&&Event> = match_events
        .iter()
        .filter(|e| e.shot().is_some() && e.team != team)
        .collect();
    let shots_faced = opponent_shots.len() as i64;

    let block_ids: HashSet<&str> = opponent_shots
        .iter()
        .filter(|e| {
            e.shot()
                .and_then(|s| s.outcome)
                .map(|o| o == crate::model::ShotOutcome::Blocked)
                .unwrap_or(false)
        })
        .flat_map(|e| e.related_events.iter().map(String::as_str))
        .collect();

    let blocked = pool
        .iter()
        .filter(|e| {
            matches!(e.data, EventData::Block)
                && e.is_by(player)
                && block_ids.contains(e.id.as_str())
        })
        .count() as i64;

    let mut out = MetricSet::new();
    out.count("shots_faced", shots_faced);
    out.count("shots_blocked", blocked);
    out
}

pub fn clearances(ctx: &PlayerContext) -> MetricSet {
    let pool: Vec<&Event> = ctx.team_events().collect();
    clearances_from(ctx.player, &pool)
}

pub fn clearances_from(player: &str, pool: &[&Event]) -> MetricSet {
    let clearances = pool
        .iter()
        .filter(|e| matches!(e.data, EventData::Clearance { .. }) && e.is_by(player))
        .count() as i64;

    let mut out = MetricSet::new();
    out.count("clearances", clearances);
    out
}

/// Pressures, fouls and tackles within a short window after an opponent
/// receives the ball.
pub fn aggressive_actions(ctx: &PlayerContext) -> MetricSet {
    let window_secs = ctx.cfg.aggressive_action_secs;

    let mut seen: HashSet<&str> = HashSet::new();
    let mut pressures = 0i64;
    let mut fouls = 0i64;
    let mut tackles = 0i64;

    for receipt in ctx.opponent_events() {
        if receipt.ball_receipt().is_none() {
            continue;
        }
        for action in &ctx.player_events {
            if action.index < receipt.index
                || action.period != receipt.period
                || action.timestamp.as_secs() - receipt.timestamp.as_secs() > window_secs
            {
                continue;
            }
            let counted = match &action.data {
                EventData::Pressure => Some(&mut pressures),
                EventData::FoulCommitted { .. } => Some(&mut fouls),
                EventData::Duel { duel } if duel.is_tackle() => Some(&mut tackles),
                _ => None,
            };
            if let Some(counter) = counted {
                // Overlapping receipt windows must not double count.
                if seen.insert(action.id.as_str()) {
                    *counter += 1;
                }
            }
        }
    }

    let mut out = MetricSet::new();
    out.count("aggressive_actions_pressures", pressures);
    out.count("aggressive_actions_fouls", fouls);
    out.count("aggressive_actions_tackles", tackles);
    out.count("total_aggressive_actions", pressures + fouls + tackles);
    out
}

/// Take-ons attempted at this player: beaten (Dribbled Past right before a
/// completed dribble) or stopped (a duel right after a failed one).
pub fn defending_dribbles(ctx: &PlayerContext) -> MetricSet {
    let mut faced = 0i64;
    let mut past = 0i64;
    let mut stopped_won = 0i64;
    let mut stopped_lost = 0i64;

    for event in ctx.opponent_events() {
        let Some(dribble) = event.dribble() else { continue };
        match dribble.outcome {
            DribbleOutcome::Complete => {
                let Some(before) = ctx
                    .event_by_index(event.index.wrapping_sub(1))
                    .filter(|e| ctx.window.contains(e.index))
                else {
                    continue;
                };
                if before.is_by(ctx.player) && matches!(before.data, EventData::DribbledPast) {
                    faced += 1;
                    past += 1;
                }
            }
            DribbleOutcome::Incomplete => {
                let Some(after) = ctx
                    .event_by_index(event.index + 1)
                    .filter(|e| ctx.window.contains(e.index))
                else {
                    continue;
                };
                if let (true, Some(duel)) = (after.is_by(ctx.player), after.duel()) {
                    faced += 1;
                    if duel.outcome.map(|o| o.is_won()).unwrap_or(false) {
                        stopped_won += 1;
                    } else {
                        stopped_lost += 1;
                    }
                }
            }
        }
    }

    let mut out = MetricSet::new();
    out.count("dribbles_faced", faced);
    out.count("dribbled_past", past);
    out.count("dribble_stopped_ball_won", stopped_won);
    out.count("dribble_stopped_ball_lost", stopped_lost);
    out.ratio("ratio_dribbles_successfully_defended", stopped_won, faced);
    out
}
