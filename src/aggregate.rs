//! Full per-player stat lines for one match.
//!
//! The two catalogues (outfield and goalkeeper) run every aggregator in a
//! fixed order, so the resulting rows always carry the same columns in the
//! same sequence and can be stacked into tables without reconciliation.

use crate::config::{AnalysisConfig, PositionGroup};
use crate::error::Result;
use crate::metrics::{
    contributions, defending, duels, goalkeeper, passing, possession, pressure, set_pieces,
    shooting, MetricSet,
};
use crate::model::{Event, MatchId};
use crate::view::PlayerContext;

/// One player's complete stat line for one match.
#[derive(Debug, Clone, PartialEq)]
pub struct StatRow {
    pub match_id: MatchId,
    pub player: String,
    pub minutes_played: f64,
    pub metrics: MetricSet,
}

/// Run the catalogue matching a player's position group.
pub fn aggregate_player(
    events: &[Event],
    cfg: &AnalysisConfig,
    team: &str,
    player: &str,
    match_id: MatchId,
    group: PositionGroup,
) -> Result<StatRow> {
    match group {
        PositionGroup::Goalkeeper => aggregate_goalkeeper(events, cfg, team, player, match_id),
        PositionGroup::Outfield => aggregate_outfield(events, cfg, team, player, match_id),
    }
}

pub fn aggregate_outfield(
    events: &[Event],
    cfg: &AnalysisConfig,
    team: &str,
    player: &str,
    match_id: MatchId,
) -> Result<StatRow> {
    let ctx = PlayerContext::new(events, cfg, team, player)?;

    let mut metrics = MetricSet::new();
    metrics.extend(passing::passes_under_pressure(&ctx));
    metrics.extend(passing::progressive_passes(&ctx));
    metrics.extend(passing::long_balls(&ctx));
    metrics.extend(passing::line_breaking_passes(&ctx));
    metrics.extend(passing::crosses(&ctx));
    metrics.extend(passing::through_balls(&ctx));
    metrics.extend(passing::open_play_passes(&ctx));
    metrics.extend(possession::obv(&ctx));
    metrics.extend(contributions::scoring_contributions(&ctx));
    metrics.extend(contributions::shots_contributions(&ctx));
    metrics.extend(defending::blocked_shots(&ctx));
    metrics.extend(defending::clearances(&ctx));
    metrics.extend(possession::touches_inside_box(&ctx));
    metrics.extend(possession::dribbles(&ctx));
    metrics.extend(passing::passes_into_box(&ctx));
    metrics.extend(passing::final_third_passes(&ctx));
    metrics.extend(shooting::shots_output(&ctx));
    metrics.extend(passing::deep_progressions(&ctx));
    metrics.extend(contributions::expected_assists(&ctx));
    metrics.extend(duels::offensive_duels(&ctx));
    metrics.extend(possession::touches_to_shots(&ctx));
    metrics.extend(contributions::xg_buildup_metrics(&ctx));
    metrics.extend(pressure::pressures(&ctx));
    metrics.extend(duels::defensive_duels(&ctx));
    metrics.extend(possession::ball_receptions(&ctx));
    metrics.extend(set_pieces::set_piece_clearances(&ctx));
    metrics.extend(set_pieces::set_piece_blocked_shots(&ctx));
    metrics.extend(set_pieces::set_piece_shots_output(&ctx));
    metrics.extend(set_pieces::set_piece_touches_inside_box(&ctx));
    metrics.extend(defending::aggressive_actions(&ctx));
    metrics.extend(defending::defending_dribbles(&ctx));
    metrics.extend(pressure::defensive_actions_regains(&ctx));

    Ok(StatRow {
        match_id,
        player: player.to_string(),
        minutes_played: ctx.window.played_minutes,
        metrics,
    })
}

pub fn aggregate_goalkeeper(
    events: &[Event],
    cfg: &AnalysisConfig,
    team: &str,
    player: &str,
    match_id: MatchId,
) -> Result<StatRow> {
    let ctx = PlayerContext::new(events, cfg, team, player)?;

    let mut metrics = MetricSet::new();
    metrics.extend(goalkeeper::gk_distribution(&ctx));
    metrics.extend(goalkeeper::gk_shots_faced(&ctx));
    metrics.extend(goalkeeper::gk_positioning(&ctx));
    metrics.extend(goalkeeper::gk_offensive_contribution(&ctx));
    metrics.extend(goalkeeper::gk_defensive_actions(&ctx));
    metrics.extend(goalkeeper::gk_claims(&ctx));

    Ok(StatRow {
        match_id,
        player: player.to_string(),
        minutes_played: ctx.window.played_minutes,
        metrics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{ev, one_half_match, HOME};
    use crate::metrics::MetricValue;
    use crate::model::{EventData, PassData};

    #[test]
    fn outfield_rows_always_carry_the_same_columns() {
        let active = one_half_match(
            vec![ev(10, EventData::Pass { pass: PassData::default() })
                .clock(1, 5, 0)
                .player("Alice")
                .build()],
            45,
        );
        let quiet = one_half_match(vec![], 45);
        let cfg = AnalysisConfig::default();

        let a = aggregate_outfield(&active, &cfg, HOME, "Alice", MatchId::new(1)).unwrap();
        let b = aggregate_outfield(&quiet, &cfg, HOME, "Bella", MatchId::new(2)).unwrap();
        let a_keys: Vec<&str> = a.metrics.keys().collect();
        let b_keys: Vec<&str> = b.metrics.keys().collect();
        assert_eq!(a_keys, b_keys);
        assert!(a_keys.len() > 100);
    }

    #[test]
    fn goalkeeper_rows_always_carry_the_same_columns() {
        let events = one_half_match(vec![], 45);
        let cfg = AnalysisConfig::default();

        let a = aggregate_goalkeeper(&events, &cfg, HOME, "Alice", MatchId::new(1)).unwrap();
        let b = aggregate_goalkeeper(&events, &cfg, HOME, "Bella", MatchId::new(1)).unwrap();
        let a_keys: Vec<&str> = a.metrics.keys().collect();
        let b_keys: Vec<&str> = b.metrics.keys().collect();
        assert_eq!(a_keys, b_keys);
        assert!(a_keys.contains(&"gk_save_ratio"));
    }

    #[test]
    fn minutes_come_from_the_playing_window() {
        let sub = crate::fixtures::substitution(20, 1, 30, 0, HOME, "Alice", "Romy");
        let events = one_half_match(vec![sub], 45);
        let cfg = AnalysisConfig::default();

        let row = aggregate_outfield(&events, &cfg, HOME, "Alice", MatchId::new(7)).unwrap();
        assert_eq!(row.minutes_played, 30.0);
    }

    #[test]
    fn catalogue_starts_with_the_pressured_passing_block() {
        let events = one_half_match(vec![], 45);
        let cfg = AnalysisConfig::default();

        let row = aggregate_outfield(&events, &cfg, HOME, "Alice", MatchId::new(1)).unwrap();
        let first = row.metrics.keys().next().unwrap();
        assert_eq!(first, "total_passes_under_pressure");
        assert_eq!(
            row.metrics.get("total_defensive_actions_regains"),
            Some(MetricValue::Count(0))
        );
    }
}
