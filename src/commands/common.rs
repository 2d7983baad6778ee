//! Shared command plumbing: input loading and the per-player pipeline.

use tracing::{debug, info, warn};

use crate::aggregate::{aggregate_player, StatRow};
use crate::cli::CommonArgs;
use crate::config::{load_position_map, AnalysisConfig, PositionGroup, PositionMap};
use crate::error::{Result, StatsError};
use crate::model::Event;
use crate::storage::{loader, tables, MatchInfo, PlayerTable, StatsStore};

/// One match's event log with its match-list row.
pub struct MatchData {
    pub info: MatchInfo,
    pub events: Vec<Event>,
}

/// Everything a command needs, loaded once from the common arguments.
pub struct Workspace {
    pub cfg: AnalysisConfig,
    pub positions: PositionMap,
    pub store: StatsStore,
    pub team: String,
    pub refresh: bool,
    /// Full match list, including matches whose event files failed to load;
    /// cache freshness is judged against all of them.
    pub match_list: Vec<MatchInfo>,
    /// Matches with a loadable, non-empty event log.
    pub matches: Vec<MatchData>,
}

impl Workspace {
    pub fn load(args: &CommonArgs) -> Result<Self> {
        let cfg = match &args.config {
            Some(path) => AnalysisConfig::load(path)?,
            None => AnalysisConfig::default(),
        };
        let positions = load_position_map(&args.positions)?;
        let store = StatsStore::new(args.cache_dir.clone(), cfg.cache_grace_hours);

        let match_list = loader::load_match_list(&args.data_dir.join("matches.json"))?;
        let mut matches = Vec::with_capacity(match_list.len());
        for info in &match_list {
            let path = loader::events_path(&args.data_dir, info.match_id);
            match loader::load_events(&path) {
                Ok(events) if events.is_empty() => {
                    let err = StatsError::EmptyMatch { match_id: info.match_id };
                    warn!(%err, "skipping match");
                }
                Ok(events) => matches.push(MatchData { info: info.clone(), events }),
                Err(err) => {
                    warn!(match_id = %info.match_id, %err, "skipping unloadable match");
                }
            }
        }
        info!(
            matches = matches.len(),
            players = positions.len(),
            "workspace loaded"
        );

        Ok(Self {
            cfg,
            positions,
            store,
            team: args.team.clone(),
            refresh: args.refresh,
            match_list,
            matches,
        })
    }

    pub fn position_group(&self, player: &str) -> Result<PositionGroup> {
        self.positions
            .get(player)
            .copied()
            .ok_or_else(|| StatsError::UnknownPosition { player: player.to_string() })
    }

    /// The player's rolled-up table, from cache when fresh, otherwise
    /// recomputed match by match and written back.
    pub fn player_table(&self, player: &str) -> Result<PlayerTable> {
        let group = self.position_group(player)?;
        let rolled_path = self.store.player_stats_path(player);
        if !self.refresh && self.store.is_fresh(&rolled_path, &self.match_list) {
            debug!(player, "loading rolled-up stats from cache");
            return PlayerTable::read(&rolled_path);
        }

        let mut rows: Vec<StatRow> = Vec::new();
        for data in &self.matches {
            if !player_appears(&data.events, player) {
                continue;
            }
            let row_path = self.store.match_stats_path(player, data.info.match_id);
            let row = if !self.refresh && row_path.exists() {
                tables::read_stat_row(&row_path)?
            } else {
                let row = aggregate_player(
                    &data.events,
                    &self.cfg,
                    &self.team,
                    player,
                    data.info.match_id,
                    group,
                )?;
                tables::write_stat_row(&row_path, &row)?;
                row
            };
            rows.push(row);
        }

        let table = PlayerTable::join(rows, &self.match_list);
        if !table.rows.is_empty() {
            table.write(&rolled_path)?;
        }
        Ok(table)
    }
}

/// Whether a player took part in a match: they acted in an event or were
/// named as a substitution replacement.
pub fn player_appears(events: &[Event], player: &str) -> bool {
    events.iter().any(|e| {
        e.is_by(player)
            || e.substitution()
                .map(|s| s.replacement == player)
                .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{ev, one_half_match, substitution, HOME};
    use crate::model::EventData;

    #[test]
    fn appearance_covers_actors_and_replacements() {
        let sub = substitution(20, 1, 30, 0, HOME, "Alice", "Romy");
        let events = one_half_match(
            vec![ev(10, EventData::Pressure).clock(1, 5, 0).player("Alice").build(), sub],
            45,
        );

        assert!(player_appears(&events, "Alice"));
        assert!(player_appears(&events, "Romy"));
        assert!(!player_appears(&events, "Nobody"));
    }
}
