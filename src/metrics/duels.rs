//! Offensive and defensive duel composites.
//!
//! Attacking duels are contested while the player's team has the ball
//! (take-ons, aerials in possession, offensive fouls); defensive duels while
//! it does not (tackles, defensive aerials, being dribbled past). Ball
//! recoveries follow the same split, with recovery passes attributed by which
//! team had the previous possession.

use crate::metrics::{possession, MetricSet, MetricValue};
use crate::model::{Event, EventData, PassType};
use crate::view::PlayerContext;

fn is_recovery_pass(event: &Event) -> bool {
    event
        .pass()
        .map(|p| p.kind == Some(PassType::Recovery))
        .unwrap_or(false)
}

pub fn offensive_duels(ctx: &PlayerContext) -> MetricSet {
    let mut dispossessed = 0i64;
    let mut fouls_won = 0i64;
    let mut fouls_committed = 0i64;
    let mut miscontrols = 0i64;
    let mut aerial_lost = 0i64;
    let mut passes_aerial_won = 0i64;
    let mut shots_aerial_won = 0i64;
    let mut miscontrol_aerial_won = 0i64;
    let mut fifty_total = 0i64;
    let mut fifty_won = 0i64;
    let mut errors = 0i64;
    let mut total_recoveries = 0i64;
    let mut lost_recoveries = 0i64;

    let mut prev_possession_team: Option<&str> = None;
    for event in ctx.team_events() {
        if event.is_by(ctx.player) {
            match &event.data {
                EventData::Dispossessed => dispossessed += 1,
                EventData::FoulWon { foul_won } if !foul_won.defensive => fouls_won += 1,
                EventData::FoulCommitted { foul_committed } if foul_committed.offensive => {
                    fouls_committed += 1
                }
                EventData::Miscontrol { miscontrol } => {
                    miscontrols += 1;
                    if miscontrol.aerial_won && event.in_possession() {
                        miscontrol_aerial_won += 1;
                    }
                }
                EventData::Duel { duel } if duel.is_aerial_lost() && event.in_possession() => {
                    aerial_lost += 1
                }
                EventData::Shot { shot } if shot.aerial_won && event.in_possession() => {
                    shots_aerial_won += 1
                }
                EventData::FiftyFifty { fifty_fifty } if event.in_possession() => {
                    fifty_total += 1;
                    if fifty_fifty.outcome.map(|o| o.is_won()).unwrap_or(false) {
                        fifty_won += 1;
                    }
                }
                EventData::Error if event.in_possession() => errors += 1,
                EventData::Pass { pass } => {
                    if pass.aerial_won && event.in_possession() {
                        passes_aerial_won += 1;
                    }
                }
                EventData::BallRecovery { ball_recovery } => {
                    if ball_recovery.offensive {
                        total_recoveries += 1;
                    } else if ball_recovery.recovery_failure {
                        lost_recoveries += 1;
                    }
                }
                _ => {}
            }
            // A recovery pass keeps an offensive recovery alive when the
            // team already had the previous possession.
            if is_recovery_pass(event)
                && event.in_possession()
                && prev_possession_team == Some(event.team.as_str())
            {
                total_recoveries += 1;
                if !event.pass().map(|p| p.is_complete()).unwrap_or(false) {
                    lost_recoveries += 1;
                }
            }
        }
        prev_possession_team = Some(event.possession_team.as_str());
    }

    let dribble_stats = possession::dribbles(ctx);
    let total_dribbles = dribble_stats.get("total_dribbles").and_then(|v| v.as_f64()).unwrap_or(0.0) as i64;
    let completed_dribbles =
        dribble_stats.get("completed_dribbles").and_then(|v| v.as_f64()).unwrap_or(0.0) as i64;
    let failed_dribbles = total_dribbles - completed_dribbles;
    let turnovers = miscontrols + failed_dribbles;

    let aerials_won = passes_aerial_won + shots_aerial_won + miscontrol_aerial_won;
    let total_aerials = aerials_won + aerial_lost;

    let duels_won = completed_dribbles + fouls_won + aerials_won + fifty_won;
    let duels_lost =
        dispossessed + fouls_committed + failed_dribbles + aerial_lost + (fifty_total - fifty_won);
    let total_duels = duels_won + duels_lost;

    let mut out = MetricSet::new();
    out.extend(dribble_stats);
    out.count("dispossessed", dispossessed);
    out.count("miscontrols", miscontrols);
    out.count("turnovers", turnovers);
    out.count("attacking_errors", errors);
    out.count("total_attacking_ball_recoveries", total_recoveries);
    out.count("won_attacking_ball_recoveries", total_recoveries - lost_recoveries);
    out.ratio(
        "ratio_attacking_ball_recoveries",
        total_recoveries - lost_recoveries,
        total_recoveries,
    );
    out.count("attacking_fouls_won", fouls_won);
    out.count("attacking_fouls_committed", fouls_committed);
    out.count("total_attacking_aerials", total_aerials);
    out.count("won_attacking_aerials", aerials_won);
    out.ratio("ratio_attacking_aerials", aerials_won, total_aerials);
    out.count("total_attacking_50_50", fifty_total);
    out.count("won_attacking_50_50", fifty_won);
    out.ratio("ratio_attacking_50_50", fifty_won, fifty_total);
    out.count("total_attacking_duels", total_duels);
    out.count("won_attacking_duels", duels_won);
    out.ratio("ratio_attacking_duels", duels_won, total_duels);
    out
}

pub fn defensive_duels(ctx: &PlayerContext) -> MetricSet {
    let mut fouls_won = 0i64;
    let mut fouls_committed = 0i64;
    let mut aerial_lost = 0i64;
    let mut passes_aerial_won = 0i64;
    let mut clearance_aerial_won = 0i64;
    let mut miscontrol_aerial_won = 0i64;
    let mut ground_clearances = 0i64;
    let mut fifty_total = 0i64;
    let mut fifty_won = 0i64;
    let mut dribbled_past = 0i64;
    let mut errors = 0i64;
    let mut interceptions = 0i64;
    let mut interceptions_won = 0i64;
    let mut tackles = 0i64;
    let mut tackles_won = 0i64;
    let mut total_recoveries = 0i64;
    let mut lost_recoveries = 0i64;

    let mut prev_possession_team: Option<&str> = None;
    for event in ctx.team_events() {
        if event.is_by(ctx.player) {
            let out_of_possession = !event.in_possession();
            match &event.data {
                EventData::FoulWon { foul_won } if foul_won.defensive => fouls_won += 1,
                EventData::FoulCommitted { foul_committed } if !foul_committed.offensive => {
                    fouls_committed += 1
                }
                EventData::Duel { duel } => {
                    if duel.is_aerial_lost() && out_of_possession {
                        aerial_lost += 1;
                    }
                    if duel.is_tackle() {
                        tackles += 1;
                        if duel.outcome.map(|o| o.is_won()).unwrap_or(false) {
                            tackles_won += 1;
                        }
                    }
                }
                EventData::Pass { pass } if pass.aerial_won && out_of_possession => {
                    passes_aerial_won += 1
                }
                EventData::Clearance { clearance } if out_of_possession => {
                    if clearance.aerial_won {
                        clearance_aerial_won += 1;
                    } else {
                        ground_clearances += 1;
                    }
                }
                EventData::Miscontrol { miscontrol }
                    if miscontrol.aerial_won && out_of_possession =>
                {
                    miscontrol_aerial_won += 1
                }
                EventData::FiftyFifty { fifty_fifty } if out_of_possession => {
                    fifty_total += 1;
                    if fifty_fifty.outcome.map(|o| o.is_won()).unwrap_or(false) {
                        fifty_won += 1;
                    }
                }
                EventData::DribbledPast => dribbled_past += 1,
                EventData::Error if out_of_possession => errors += 1,
                EventData::Interception { interception } => {
                    interceptions += 1;
                    if interception.outcome.map(|o| o.is_won()).unwrap_or(false) {
                        interceptions_won += 1;
                    }
                }
                EventData::BallRecovery { ball_recovery } if !ball_recovery.offensive => {
                    total_recoveries += 1;
                    if ball_recovery.recovery_failure {
                        lost_recoveries += 1;
                    }
                }
                _ => {}
            }
            // A recovery pass is a defensive recovery unless the team
            // carried its own previous possession into this one.
            if is_recovery_pass(event)
                && (out_of_possession || prev_possession_team != Some(event.team.as_str()))
            {
                total_recoveries += 1;
                if !event.pass().map(|p| p.is_complete()).unwrap_or(false) {
                    lost_recoveries += 1;
                }
            }
        }
        prev_possession_team = Some(event.possession_team.as_str());
    }

    let aerials_won = passes_aerial_won + clearance_aerial_won + miscontrol_aerial_won;
    let total_aerials = aerials_won + aerial_lost;
    let total_clearances = ground_clearances + clearance_aerial_won;

    let duels_won = fouls_won + aerials_won + fifty_won + tackles_won;
    let duels_lost = fouls_committed
        + aerial_lost
        + (fifty_total - fifty_won)
        + (tackles - tackles_won)
        + dribbled_past;
    let total_duels = duels_won + duels_lost;

    let mut out = MetricSet::new();
    out.count("defensive_fouls_won", fouls_won);
    out.count("defensive_fouls_committed", fouls_committed);
    out.count("defensive_errors", errors);
    out.count("total_defensive_aerials", total_aerials);
    out.count("won_defensive_aerials", aerials_won);
    out.ratio("ratio_defensive_aerials", aerials_won, total_aerials);
    out.count("total_defensive_50_50", fifty_total);
    out.count("won_defensive_50_50", fifty_won);
    out.ratio("ratio_defensive_50_50", fifty_won, fifty_total);
    out.count("total_interceptions", interceptions);
    out.count("interceptions_won", interceptions_won);
    out.ratio("interceptions_ratio", interceptions_won, interceptions);
    out.count("total_tackles", tackles);
    out.count("tackles_won", tackles_won);
    out.ratio("tackles_ratio", tackles_won, tackles);
    out.count("clearances", total_clearances);
    out.count("dribbled_past", dribbled_past);
    out.set(
        "ratio_tackles_dribbled_past",
        if dribbled_past == 0 {
            MetricValue::Missing
        } else {
            MetricValue::float(tackles as f64 / dribbled_past as f64)
        },
    );
    out.count("total_defensive_ball_recoveries", total_recoveries);
    out.count("won_defensive_ball_recoveries", total_recoveries - lost_recoveries);
    out.ratio(
        "ratio_defensive_ball_recoveries",
        total_recoveries - lost_recoveries,
        total_recoveries,
    );
    out.count("total_defensive_duels", total_duels);
    out.count("won_defensive_duels", duels_won);
    out.ratio("ratio_defensive_duels", duels_won, total_duels);
    out
}
