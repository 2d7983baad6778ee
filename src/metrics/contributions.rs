//! Goal and shot involvement: assists, second assists, expected assists and
//! possession-chain expected goals.

use crate::metrics::{MetricSet, MetricValue};
use crate::model::{Event, ShotOutcome};
use crate::view::PlayerContext;

/// Resolve an id to one of the player's team's window events.
fn team_event_by_id<'a>(ctx: &PlayerContext<'a>, id: &str) -> Option<&'a Event> {
    ctx.event_by_id(id)
        .filter(|e| e.team == ctx.team && ctx.window.contains(e.index))
}

fn team_event_by_index<'a>(ctx: &PlayerContext<'a>, index: u32) -> Option<&'a Event> {
    ctx.event_by_index(index)
        .filter(|e| e.team == ctx.team && ctx.window.contains(e.index))
}

/// Count the player's passes immediately preceding another teammate's assist
/// or key pass. The scan looks at most three events back and stops at the
/// first hit; assists the player delivered themselves are excluded.
fn count_second_assists<'a, I>(ctx: &PlayerContext<'a>, assist_passes: I) -> i64
where
    I: IntoIterator<Item = (&'a Event, &'a str)>,
{
    let mut second_assists = 0i64;
    'assists: for (assist, shot_id) in assist_passes {
        let Some(finisher) = team_event_by_id(ctx, shot_id).and_then(|e| e.player.as_deref())
        else {
            continue;
        };
        for back in 1..=3u32 {
            let Some(candidate) = assist
                .index
                .checked_sub(back)
                .and_then(|i| team_event_by_index(ctx, i))
            else {
                continue;
            };
            if candidate.pass().is_some()
                && candidate.is_by(ctx.player)
                && finisher != ctx.player
            {
                second_assists += 1;
                continue 'assists;
            }
        }
    }
    second_assists
}

pub fn scoring_contributions(ctx: &PlayerContext) -> MetricSet {
    let goals = ctx
        .shots()
        .filter(|(_, s)| s.outcome == Some(ShotOutcome::Goal))
        .count() as i64;

    let assist_passes: Vec<(&Event, &str)> = ctx
        .team_events()
        .filter_map(|e| {
            let pass = e.pass()?;
            if !pass.goal_assist {
                return None;
            }
            Some((e, pass.assisted_shot_id.as_deref()?))
        })
        .collect();
    let assists = assist_passes.iter().filter(|(e, _)| e.is_by(ctx.player)).count() as i64;
    let second_assists = count_second_assists(ctx, assist_passes);

    let mut out = MetricSet::new();
    out.count("goals", goals);
    out.count("assists", assists);
    out.count("second_assists", second_assists);
    out.count("total_goal_contributions", goals + assists + second_assists);
    out
}

pub fn shots_contributions(ctx: &PlayerContext) -> MetricSet {
    let shots = ctx
        .shots()
        .filter(|(_, s)| s.outcome != Some(ShotOutcome::Goal))
        .count() as i64;

    let key_passes_pool: Vec<(&Event, &str)> = ctx
        .team_events()
        .filter_map(|e| {
            let pass = e.pass()?;
            if !pass.shot_assist {
                return None;
            }
            Some((e, pass.assisted_shot_id.as_deref()?))
        })
        .collect();
    let key_passes = key_passes_pool.iter().filter(|(e, _)| e.is_by(ctx.player)).count() as i64;
    let second_assists_to_shots = count_second_assists(ctx, key_passes_pool);

    let mut out = MetricSet::new();
    out.count("shots", shots);
    out.count("key_passes", key_passes);
    out.count("second_assists_to_shots", second_assists_to_shots);
    out.count(
        "total_shots_contributions",
        shots + key_passes + second_assists_to_shots,
    );
    out
}

/// Expected goals of teammates' shots the player's passes created.
pub fn expected_assists(ctx: &PlayerContext) -> MetricSet {
    let mut xa = 0.0f64;
    for event in ctx.team_events() {
        let Some(shot) = event.shot() else { continue };
        let Some(key_pass_id) = shot.key_pass_id.as_deref() else { continue };
        let assisted_by_player = team_event_by_id(ctx, key_pass_id)
            .map(|e| e.is_by(ctx.player))
            .unwrap_or(false);
        if assisted_by_player {
            xa += shot.statsbomb_xg.unwrap_or(0.0);
        }
    }

    let mut out = MetricSet::new();
    out.float("xa", xa);
    out
}

/// xG chain credits every possession the player touched that ended in a
/// team shot; xG buildup strips out the shot and the passes that directly
/// created it, so finishing involvement does not count.
pub fn xg_buildup_metrics(ctx: &PlayerContext) -> MetricSet {
    let mut xg_chain = 0.0f64;
    let mut xg_buildup = 0.0f64;

    let team_events: Vec<&Event> = ctx.team_events().collect();
    for shot_event in &team_events {
        let Some(shot) = shot_event.shot() else { continue };
        let xg = shot.statsbomb_xg.unwrap_or(0.0);

        let possession_events: Vec<&&Event> = team_events
            .iter()
            .filter(|e| e.possession == shot_event.possession && e.index <= shot_event.index)
            .collect();
        if possession_events.iter().any(|e| e.is_by(ctx.player)) {
            xg_chain += xg;
        }

        let buildup_events: Vec<&&&Event> = possession_events
            .iter()
            .filter(|e| {
                if e.index == shot_event.index {
                    return false;
                }
                match e.pass() {
                    Some(pass) => !pass.shot_assist && !pass.goal_assist,
                    None => true,
                }
            })
            .collect();

        let is_shooter = shot_event.is_by(ctx.player);
        let in_buildup = if is_shooter {
            // The shooter's earlier touches only count if clearly separated
            // from the shot itself.
            buildup_events
                .iter()
                .any(|e| e.is_by(ctx.player) && (e.index as i64) < shot_event.index as i64 - 3)
        } else {
            buildup_events.iter().any(|e| e.is_by(ctx.player))
        };
        if in_buildup {
            xg_buildup += xg;
        }
    }

    let mut out = MetricSet::new();
    out.float("xg_chain", xg_chain);
    out.float("xg_buildup", xg_buildup);
    out
}
