//! Full regeneration: every mapped player plus the team-wide tables.

use rayon::prelude::*;
use tracing::info;

use crate::cli::CommonArgs;
use crate::commands::common::Workspace;
use crate::config::PositionGroup;
use crate::error::Result;
use crate::storage::PlayerTable;

pub fn handle_regenerate(common: &CommonArgs) -> Result<()> {
    let workspace = Workspace::load(common)?;

    let mut players: Vec<&String> = workspace.positions.keys().collect();
    players.sort();

    let tables: Vec<(PositionGroup, PlayerTable)> = players
        .par_iter()
        .map(|player| {
            let group = workspace.position_group(player)?;
            let table = workspace.player_table(player)?;
            Ok((group, table))
        })
        .collect::<Result<_>>()?;

    let mut team = PlayerTable::default();
    let mut goalkeepers = PlayerTable::default();
    for (group, table) in tables {
        if table.rows.is_empty() {
            continue;
        }
        match group {
            PositionGroup::Goalkeeper => goalkeepers.append(table)?,
            PositionGroup::Outfield => team.append(table)?,
        }
    }

    if !team.rows.is_empty() {
        let path = workspace.store.team_stats_path();
        team.write(&path)?;
        info!(rows = team.rows.len(), path = %path.display(), "wrote team table");
    }
    if !goalkeepers.rows.is_empty() {
        let path = workspace.store.team_gk_stats_path();
        goalkeepers.write(&path)?;
        info!(rows = goalkeepers.rows.len(), path = %path.display(), "wrote goalkeeper table");
    }
    Ok(())
}
