//! Goalkeeper metric catalogue: distribution, shot-stopping, positioning,
//! offensive contribution, box defending and claims.
//!
//! Everything here only counts actions taken while the player was listed at
//! goalkeeper, so an outfielder who pulls on the gloves mid-match is scored
//! on exactly the right slice.

use crate::metrics::{MetricSet, MetricValue};
use crate::model::{BodyPart, Event, EventData, PassData, PassType, ShotData, ShotOutcome, ShotType};
use crate::view::PlayerContext;

fn gk_passes<'a>(ctx: &'a PlayerContext) -> Vec<(&'a Event, &'a PassData)> {
    ctx.passes().filter(|(e, _)| e.at_goalkeeper()).collect()
}

/// Completion counts for one distribution split. Only explicit completions
/// and failures participate; out-of-play and offside outcomes are dropped.
#[derive(Debug, Default, Clone, Copy)]
struct SplitCounts {
    complete: i64,
    incomplete: i64,
}

impl SplitCounts {
    fn add(&mut self, pass: &PassData) {
        match pass.outcome {
            crate::model::PassOutcome::Complete => self.complete += 1,
            crate::model::PassOutcome::Incomplete => self.incomplete += 1,
            _ => {}
        }
    }

    fn total(&self) -> i64 {
        self.complete + self.incomplete
    }

    fn emit(&self, out: &mut MetricSet, name: &str) {
        out.count(&format!("{name}_complete"), self.complete);
        out.count(&format!("{name}_incomplete"), self.incomplete);
        out.ratio(&format!("{name}_ratio"), self.complete, self.total());
    }
}

fn length_accuracy(passes: &[(&Event, &PassData)], short_max: f64, long_min: f64) -> MetricSet {
    let mut short = SplitCounts::default();
    let mut medium = SplitCounts::default();
    let mut long = SplitCounts::default();
    for (_, pass) in passes {
        let Some(length) = pass.length else { continue };
        if length <= short_max {
            short.add(pass);
        } else if length <= long_min {
            medium.add(pass);
        } else {
            long.add(pass);
        }
    }
    let total = SplitCounts {
        complete: short.complete + medium.complete + long.complete,
        incomplete: short.incomplete + medium.incomplete + long.incomplete,
    };

    let mut out = MetricSet::new();
    short.emit(&mut out, "short");
    medium.emit(&mut out, "medium");
    long.emit(&mut out, "long");
    total.emit(&mut out, "total");
    out
}

fn pressure_accuracy(passes: &[(&Event, &PassData)]) -> MetricSet {
    let mut pressured = SplitCounts::default();
    let mut unpressured = SplitCounts::default();
    for (event, pass) in passes {
        if event.under_pressure {
            pressured.add(pass);
        } else {
            unpressured.add(pass);
        }
    }
    let pressured_avg = MetricValue::mean(
        passes.iter().filter(|(e, _)| e.under_pressure).filter_map(|(_, p)| p.length),
    );
    let unpressured_avg = MetricValue::mean(
        passes.iter().filter(|(e, _)| !e.under_pressure).filter_map(|(_, p)| p.length),
    );
    let diff = match (pressured_avg.as_f64(), unpressured_avg.as_f64()) {
        (Some(a), Some(b)) => MetricValue::float(a - b),
        _ => MetricValue::Missing,
    };

    let mut out = MetricSet::new();
    pressured.emit(&mut out, "under_pressure");
    unpressured.emit(&mut out, "without_pressure");
    out.ratio(
        "pressured_ratio",
        pressured.total(),
        pressured.total() + unpressured.total(),
    );
    out.set("under_pressure_avg_length", pressured_avg);
    out.set("without_pressure_avg_length", unpressured_avg);
    out.set("diff_in_avg_length_while_pressured", diff);
    out
}

pub fn gk_distribution(ctx: &PlayerContext) -> MetricSet {
    let all = gk_passes(ctx);
    let open_play: Vec<_> = all.iter().filter(|(_, p)| !p.is_set_piece()).copied().collect();
    let goal_kicks: Vec<_> = all
        .iter()
        .filter(|(_, p)| p.kind == Some(PassType::GoalKick))
        .copied()
        .collect();
    let hands: Vec<_> = all
        .iter()
        .filter(|(_, p)| p.body_part == Some(BodyPart::KeeperArm))
        .copied()
        .collect();
    let feet: Vec<_> = all
        .iter()
        .filter(|(_, p)| p.body_part.map(|b| b.is_foot()).unwrap_or(false))
        .copied()
        .collect();

    let short_max = ctx.cfg.gk_short_pass_max;
    let long_min = ctx.cfg.gk_long_pass_min;

    let mut out = MetricSet::new();
    out.extend(length_accuracy(&all, short_max, long_min).prefixed("gk_all_passes_"));
    out.extend(length_accuracy(&open_play, short_max, long_min).prefixed("gk_open_play_passes_"));
    out.extend(pressure_accuracy(&open_play).prefixed("gk_open_play_passes_"));
    out.extend(length_accuracy(&goal_kicks, short_max, long_min).prefixed("gk_goal_kicks_"));
    out.extend(length_accuracy(&hands, short_max, long_min).prefixed("gk_hands_passes_"));
    out.extend(length_accuracy(&feet, short_max, long_min).prefixed("gk_feet_passes_"));
    out
}

pub fn gk_shots_faced(ctx: &PlayerContext) -> MetricSet {
    let against: Vec<&ShotData> = ctx
        .opponent_events()
        .filter_map(|e| e.shot())
        .collect();
    let faced: Vec<&ShotData> = against
        .iter()
        .copied()
        .filter(|s| s.outcome.map(|o| o.is_on_target()).unwrap_or(false))
        .collect();
    let saved: Vec<&ShotData> = faced
        .iter()
        .copied()
        .filter(|s| s.outcome.map(|o| o.is_saved()).unwrap_or(false))
        .collect();
    let conceded_goals: Vec<&ShotData> = faced
        .iter()
        .copied()
        .filter(|s| s.outcome == Some(ShotOutcome::Goal))
        .collect();

    let xg = |shots: &[&ShotData]| -> Vec<f64> {
        shots.iter().filter_map(|s| s.statsbomb_xg).collect()
    };
    let post_shot_xg = |shots: &[&ShotData]| -> Vec<f64> {
        shots.iter().filter_map(|s| s.execution_xg).collect()
    };
    let goals_conceded = ctx
        .player_events
        .iter()
        .filter(|e| e.goalkeeper().map(|g| g.kind_is("Goal Conceded")).unwrap_or(false))
        .count() as i64;

    let mut out = MetricSet::new();
    out.count("gk_shots_conceded", against.len() as i64);
    out.float("gk_shots_conceded_xg", xg(&against).iter().sum());
    out.set("gk_avg_shot_conceded_xg", MetricValue::mean(xg(&against)));
    out.count("gk_shots_faced", faced.len() as i64);
    out.float("gk_shots_faced_xg", xg(&faced).iter().sum());
    out.float("gk_shots_faced_post_shot_xg", post_shot_xg(&faced).iter().sum());
    out.set("gk_avg_shot_faced_xg", MetricValue::mean(xg(&faced)));
    out.set("gk_avg_shot_faced_post_shot_xg", MetricValue::mean(post_shot_xg(&faced)));
    out.count("gk_shots_saved", saved.len() as i64);
    out.float("gk_shot_saved_xg", xg(&saved).iter().sum());
    out.float("gk_shot_saved_post_shot_xg", post_shot_xg(&saved).iter().sum());
    out.set("gk_avg_shot_saved_xg", MetricValue::mean(xg(&saved)));
    out.set("gk_avg_shot_saved_post_shot_xg", MetricValue::mean(post_shot_xg(&saved)));
    out.ratio("gk_save_ratio", saved.len() as i64, faced.len() as i64);
    out.count("gk_goals_conceded", goals_conceded);
    out.set("gk_avg_goals_conceded_xg", MetricValue::mean(xg(&conceded_goals)));
    out.set(
        "gk_avg_goals_conceded_post_shot_xg",
        MetricValue::mean(post_shot_xg(&conceded_goals)),
    );
    out
}

const GK_DEFENSIVE_KINDS: [&str; 5] =
    ["ball_recovery", "block", "dribbled_past", "foul_won", "pressure"];

fn is_gk_defensive_action(event: &Event) -> bool {
    event.at_goalkeeper() && GK_DEFENSIVE_KINDS.contains(&event.data.label())
}

/// Average x coordinates of the keeper's actions: how far off the line they
/// operate, with and without the ball.
pub fn gk_positioning(ctx: &PlayerContext) -> MetricSet {
    let defensive_xs: Vec<f64> = ctx
        .player_events
        .iter()
        .filter(|e| is_gk_defensive_action(e))
        .filter_map(|e| e.x())
        .collect();
    let pass_xs: Vec<f64> = gk_passes(ctx)
        .iter()
        .filter(|(_, p)| !p.is_set_piece())
        .filter_map(|(e, _)| e.x())
        .collect();
    let gk_carries: Vec<_> = ctx.carries().filter(|(e, _)| e.at_goalkeeper()).collect();
    let carry_start_xs: Vec<f64> = gk_carries.iter().filter_map(|(e, _)| e.x()).collect();
    let carry_end_xs: Vec<f64> = gk_carries.iter().map(|(_, c)| c.end_x()).collect();
    let receipt_xs: Vec<f64> = ctx
        .player_events
        .iter()
        .filter(|e| e.at_goalkeeper() && e.ball_receipt().is_some())
        .filter_map(|e| e.x())
        .collect();

    let with_ball = pass_xs
        .iter()
        .chain(&carry_start_xs)
        .chain(&carry_end_xs)
        .chain(&receipt_xs)
        .copied();
    let overall = defensive_xs.iter().copied().chain(with_ball.clone());

    let mut out = MetricSet::new();
    out.set(
        "gk_avg_defensive_action_location",
        MetricValue::mean(defensive_xs.iter().copied()),
    );
    out.set("gk_avg_open_play_pass_location", MetricValue::mean(pass_xs.iter().copied()));
    out.set(
        "gk_avg_carry_start_location",
        MetricValue::mean(carry_start_xs.iter().copied()),
    );
    out.set("gk_avg_carry_end_location", MetricValue::mean(carry_end_xs.iter().copied()));
    out.set(
        "gk_avg_ball_receipt_location",
        MetricValue::mean(receipt_xs.iter().copied()),
    );
    out.set("gk_avg_location_with_ball", MetricValue::mean(with_ball));
    out.set("gk_avg_location", MetricValue::mean(overall));
    out
}

/// Whether the keeper passed the ball earlier in the same possession,
/// shortly before a dangerous moment.
fn contributed(ctx: &PlayerContext, moment: &Event) -> bool {
    ctx.match_events.iter().any(|e| {
        e.possession == moment.possession
            && e.index < moment.index
            && moment.timestamp.as_secs() - e.timestamp.as_secs() <= ctx.cfg.gk_contribution_secs
            && e.pass().is_some()
            && e.is_by(ctx.player)
    })
}

pub fn gk_offensive_contribution(ctx: &PlayerContext) -> MetricSet {
    let team_passes: Vec<&Event> = ctx.team_events().filter(|e| e.pass().is_some()).collect();
    let team_shots: Vec<&Event> = ctx.team_events().filter(|e| e.shot().is_some()).collect();

    let count_contributed = |events: &[&Event]| -> i64 {
        events.iter().filter(|e| contributed(ctx, e)).count() as i64
    };

    let free_kicks_opposition_half: Vec<&Event> = team_passes
        .iter()
        .copied()
        .filter(|e| {
            e.pass().map(|p| p.kind == Some(PassType::FreeKick)).unwrap_or(false)
                && e.x().map(|x| x >= ctx.cfg.pitch.opposition_half_x).unwrap_or(false)
        })
        .collect();
    let corners: Vec<&Event> = team_passes
        .iter()
        .copied()
        .filter(|e| e.pass().map(|p| p.kind == Some(PassType::Corner)).unwrap_or(false))
        .collect();
    let open_play_shots: Vec<&Event> = team_shots
        .iter()
        .copied()
        .filter(|e| e.shot().map(|s| s.kind == Some(ShotType::OpenPlay)).unwrap_or(false))
        .collect();
    let free_kick_shots: Vec<&Event> = team_shots
        .iter()
        .copied()
        .filter(|e| e.shot().map(|s| s.kind == Some(ShotType::FreeKick)).unwrap_or(false))
        .collect();
    let penalties_won: Vec<&Event> = ctx
        .opponent_events()
        .filter(|e| match &e.data {
            EventData::FoulCommitted { foul_committed } => foul_committed.penalty,
            _ => false,
        })
        .collect();

    let from_free_kicks = count_contributed(&free_kicks_opposition_half);
    let from_corners = count_contributed(&corners);
    let from_open_play_shots = count_contributed(&open_play_shots);
    let from_free_kick_shots = count_contributed(&free_kick_shots);
    let from_penalties = count_contributed(&penalties_won);

    let weights = &ctx.cfg.gk_weights;
    let tpo = weights.free_kick_opposition_half * from_free_kicks as f64
        + weights.corner * from_corners as f64
        + weights.shot * (from_open_play_shots + from_free_kick_shots) as f64
        + weights.penalty_won * from_penalties as f64;

    let mut out = MetricSet::new();
    out.count("gk_contributed_free_kick_opposition_half", from_free_kicks);
    out.count("gk_contributed_corners", from_corners);
    out.count("gk_contributed_open_play_shots", from_open_play_shots);
    out.count("gk_contributed_direct_free_kick_shots", from_free_kick_shots);
    out.count("gk_contributed_penalties_won", from_penalties);
    out.float("gk_tpo_total_positive_outcome", tpo);
    out
}

pub fn gk_defensive_actions(ctx: &PlayerContext) -> MetricSet {
    let mut ball_recoveries = 0i64;
    let mut blocks = 0i64;
    let mut pressures = 0i64;
    let mut fouls_won = 0i64;
    let mut dribbled_past = 0i64;

    let mut punches_save = 0i64;
    let mut punches_danger = 0i64;
    let mut punches_out = 0i64;
    let mut total_punches = 0i64;
    let mut clears = 0i64;
    let mut smothers = 0i64;
    let mut smothers_won = 0i64;

    for event in &ctx.player_events {
        if !event.at_goalkeeper() {
            continue;
        }
        match &event.data {
            EventData::BallRecovery { .. } => ball_recoveries += 1,
            EventData::Block => blocks += 1,
            EventData::Pressure => pressures += 1,
            EventData::FoulWon { .. } => fouls_won += 1,
            EventData::DribbledPast => dribbled_past += 1,
            _ => {}
        }
        if let Some(gk) = event.goalkeeper() {
            if gk.kind_is("Punch") {
                total_punches += 1;
                if gk.outcome_is("In Play Safe") {
                    punches_save += 1;
                } else if gk.outcome_is("In Play Danger") {
                    punches_danger += 1;
                } else if gk.outcome_is("Punched out") {
                    punches_out += 1;
                }
            }
            if gk.outcome_is("Clear") {
                clears += 1;
            }
            if gk.kind_is("Smother") {
                smothers += 1;
                if gk.outcome_in(&["Won", "Success In Play", "Success Out"]) {
                    smothers_won += 1;
                }
            }
        }
    }
    let total = ball_recoveries + blocks + pressures + fouls_won + dribbled_past;

    let mut out = MetricSet::new();
    out.count("gk_ball_recoveries", ball_recoveries);
    out.count("gk_blocks", blocks);
    out.count("gk_pressures", pressures);
    out.count("gk_fouls_won", fouls_won);
    out.count("gk_dribbled_past", dribbled_past);
    out.count("gk_total_defensive_actions", total);
    out.count("gk_punches_save", punches_save);
    out.count("gk_punches_danger", punches_danger);
    out.count("gk_punches_out", punches_out);
    out.count("gk_total_punches", total_punches);
    out.count("gk_clears", clears);
    out.count("gk_total_smothers", smothers);
    out.count("gk_smothers_won", smothers_won);
    out
}

pub fn gk_claims(ctx: &PlayerContext) -> MetricSet {
    let gk_events: Vec<_> = ctx
        .player_events
        .iter()
        .filter(|e| e.at_goalkeeper())
        .filter_map(|e| e.goalkeeper())
        .collect();

    let collections = gk_events.iter().filter(|g| g.kind_is("Collected")).count() as i64;
    let collections_won = gk_events
        .iter()
        .filter(|g| g.kind_is("Collected") && g.outcome_in(&["Collected Twice", "Success"]))
        .count() as i64;
    let claims = gk_events.iter().filter(|g| g.outcome_is("Claim")).count() as i64;

    let mut out = MetricSet::new();
    out.count("gk_total_collections", collections);
    out.count("gk_collections_won", collections_won);
    out.ratio("gk_ratio_collections", collections_won, collections);
    out.count("gk_claims", claims);
    out
}
