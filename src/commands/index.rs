//! Performance-index command.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::cli::CommonArgs;
use crate::commands::common::Workspace;
use crate::error::Result;
use crate::index::{performance_index, write_index};
use crate::storage::loader;

pub fn handle_index(
    common: &CommonArgs,
    player: &str,
    weights_path: &Path,
    output: Option<PathBuf>,
) -> Result<()> {
    let workspace = Workspace::load(common)?;
    let weights = loader::load_weights(weights_path)?;

    let table = workspace.player_table(player)?;
    let rows = performance_index(&table, &weights)?;

    match output {
        Some(path) => {
            write_index(&path, &rows)?;
            info!(rows = rows.len(), path = %path.display(), "wrote performance index");
        }
        None => {
            println!("player\tmatch_id\tminutes_played\tmatch_date\topponent\tmatch_result\tperformance_index");
            for row in &rows {
                println!(
                    "{}\t{}\t{:.2}\t{}\t{}\t{}\t{:.2}",
                    row.player,
                    row.match_id,
                    row.minutes_played,
                    row.match_date
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_default(),
                    row.opponent.as_deref().unwrap_or_default(),
                    row.match_result.as_deref().unwrap_or_default(),
                    row.performance_index,
                );
            }
        }
    }
    Ok(())
}
