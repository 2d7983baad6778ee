//! Pressing metrics: pressures, counterpressures and the regains they earn.

use crate::metrics::{MetricSet, MetricValue};
use crate::model::{Event, EventData};
use crate::view::PlayerContext;

/// Whether a defensive action led to a regain: the possession it happened in
/// died within the configured window and the actor's team took the next one.
/// Dead-ball phases (`play_pattern == "Other"`) never count.
fn is_regain(ctx: &PlayerContext, event: &Event) -> bool {
    let within_window = ctx
        .secs_to_possession_end(event)
        .map(|secs| secs < ctx.cfg.pressure_regain_secs)
        .unwrap_or(false);
    within_window
        && ctx.next_possession_team(event) == Some(event.team.as_str())
        && event.play_pattern.as_deref() != Some("Other")
}

pub fn pressures(ctx: &PlayerContext) -> MetricSet {
    let pressure_events: Vec<&Event> = ctx
        .player_events
        .iter()
        .copied()
        .filter(|e| matches!(e.data, EventData::Pressure))
        .collect();

    let total = pressure_events.len() as i64;
    let counter = pressure_events.iter().filter(|e| e.counterpress).count() as i64;

    let avg_duration = MetricValue::mean(pressure_events.iter().filter_map(|e| e.duration));
    let avg_counter_duration = MetricValue::mean(
        pressure_events.iter().filter(|e| e.counterpress).filter_map(|e| e.duration),
    );

    let regains = pressure_events.iter().filter(|e| is_regain(ctx, e)).count() as i64;
    let counter_regains = pressure_events
        .iter()
        .filter(|e| e.counterpress && is_regain(ctx, e))
        .count() as i64;

    let in_zone = |events: &[&Event], min_x: f64| -> (i64, i64) {
        let zone: Vec<&&Event> = events
            .iter()
            .filter(|e| e.x().map(|x| x >= min_x).unwrap_or(false))
            .collect();
        (zone.len() as i64, zone.iter().filter(|e| e.counterpress).count() as i64)
    };
    let (opposition_half, counter_opposition_half) =
        in_zone(&pressure_events, ctx.cfg.pitch.opposition_half_x);
    let (final_third, counter_final_third) =
        in_zone(&pressure_events, ctx.cfg.pitch.final_third_x);

    let mut out = MetricSet::new();
    out.count("pressures", total);
    out.count("pressures_opposition_half", opposition_half);
    out.count("pressures_final_third", final_third);
    out.set("avg_pressure_duration", avg_duration);
    out.count("pressure_regains", regains);
    out.ratio("ratio_pressures", regains, total);
    out.count("counterpressures", counter);
    out.count("counterpressures_opposition_half", counter_opposition_half);
    out.count("counterpressures_final_third", counter_final_third);
    out.set("avg_counterpressure_duration", avg_counter_duration);
    out.count("counterpressure_regains", counter_regains);
    out.ratio("ratio_counterpressures", counter, counter_regains);
    out
}

/// Regains broken down by the defensive action that forced them.
pub fn defensive_actions_regains(ctx: &PlayerContext) -> MetricSet {
    let mut pressures = 0i64;
    let mut interceptions = 0i64;
    let mut blocks = 0i64;
    let mut tackles = 0i64;
    let mut dribbled_past = 0i64;

    for event in &ctx.match_events {
        if !event.is_by(ctx.player) || !is_regain(ctx, event) {
            continue;
        }
        match &event.data {
            EventData::Pressure => pressures += 1,
            EventData::Interception { .. } => interceptions += 1,
            EventData::Block => blocks += 1,
            EventData::DribbledPast => dribbled_past += 1,
            EventData::Duel { duel } if duel.is_tackle() => tackles += 1,
            _ => {}
        }
    }
    let total = pressures + interceptions + blocks + tackles + dribbled_past;

    let mut out = MetricSet::new();
    out.count("defensive_actions_regains_pressures", pressures);
    out.count("defensive_actions_regains_interceptions", interceptions);
    out.count("defensive_actions_regains_blocks", blocks);
    out.count("defensive_actions_regains_tackles", tackles);
    out.count("defensive_actions_regains_dribbled_past", dribbled_past);
    out.count("total_defensive_actions_regains", total);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::fixtures::{ev, one_half_match, AWAY, HOME};

    fn context_over<'a>(
        events: &'a [Event],
        cfg: &'a AnalysisConfig,
    ) -> PlayerContext<'a> {
        PlayerContext::new(events, cfg, HOME, "Alice").unwrap()
    }

    #[test]
    fn regain_requires_quick_turnover_to_own_team() {
        // Pressure 3s before the possession dies, Home wins the next one.
        let pressure = ev(10, EventData::Pressure)
            .clock(1, 5, 0)
            .player("Alice")
            .possession(2, AWAY)
            .duration(1.4)
            .build();
        let away_touch = ev(11, EventData::Miscontrol { miscontrol: Default::default() })
            .clock(1, 5, 3)
            .team(AWAY)
            .player("Vera")
            .possession(2, AWAY)
            .build();
        let home_wins_it = ev(12, EventData::Pass { pass: Default::default() })
            .clock(1, 5, 5)
            .player("Bella")
            .possession(3, HOME)
            .build();

        let events = one_half_match(vec![pressure, away_touch, home_wins_it], 45);
        let cfg = AnalysisConfig::default();
        let ctx = context_over(&events, &cfg);

        let out = pressures(&ctx);
        assert_eq!(out.get("pressures"), Some(MetricValue::Count(1)));
        assert_eq!(out.get("pressure_regains"), Some(MetricValue::Count(1)));
        assert_eq!(out.get("ratio_pressures"), Some(MetricValue::Float(1.0)));
        assert_eq!(out.get("avg_pressure_duration"), Some(MetricValue::Float(1.4)));
    }

    #[test]
    fn slow_turnovers_do_not_count_as_regains() {
        let pressure = ev(10, EventData::Pressure)
            .clock(1, 5, 0)
            .player("Alice")
            .possession(2, AWAY)
            .build();
        let away_holds = ev(11, EventData::Pass { pass: Default::default() })
            .clock(1, 5, 30)
            .team(AWAY)
            .player("Vera")
            .possession(2, AWAY)
            .build();
        let home_wins_it = ev(12, EventData::Pass { pass: Default::default() })
            .clock(1, 6, 0)
            .player("Bella")
            .possession(3, HOME)
            .build();

        let events = one_half_match(vec![pressure, away_holds, home_wins_it], 45);
        let cfg = AnalysisConfig::default();
        let ctx = context_over(&events, &cfg);

        let out = pressures(&ctx);
        assert_eq!(out.get("pressure_regains"), Some(MetricValue::Count(0)));
    }

    #[test]
    fn zone_splits_use_the_pressure_location() {
        let deep = ev(10, EventData::Pressure)
            .clock(1, 5, 0)
            .player("Alice")
            .at(30.0, 40.0)
            .build();
        let high = ev(11, EventData::Pressure)
            .clock(1, 6, 0)
            .player("Alice")
            .at(85.0, 40.0)
            .counterpress()
            .build();
        let events = one_half_match(vec![deep, high], 45);
        let cfg = AnalysisConfig::default();
        let ctx = context_over(&events, &cfg);

        let out = pressures(&ctx);
        assert_eq!(out.get("pressures_opposition_half"), Some(MetricValue::Count(1)));
        assert_eq!(out.get("pressures_final_third"), Some(MetricValue::Count(1)));
        assert_eq!(out.get("counterpressures_final_third"), Some(MetricValue::Count(1)));
        assert_eq!(out.get("avg_pressure_duration"), Some(MetricValue::Missing));
    }

    #[test]
    fn regains_split_by_action_kind() {
        let interception = ev(
            10,
            EventData::Interception { interception: Default::default() },
        )
        .clock(1, 5, 0)
        .player("Alice")
        .possession(2, AWAY)
        .build();
        let home_wins_it = ev(11, EventData::Pass { pass: Default::default() })
            .clock(1, 5, 2)
            .player("Bella")
            .possession(3, HOME)
            .build();
        let events = one_half_match(vec![interception, home_wins_it], 45);
        let cfg = AnalysisConfig::default();
        let ctx = context_over(&events, &cfg);

        let out = defensive_actions_regains(&ctx);
        assert_eq!(
            out.get("defensive_actions_regains_interceptions"),
            Some(MetricValue::Count(1))
        );
        assert_eq!(out.get("total_defensive_actions_regains"), Some(MetricValue::Count(1)));
    }
}
