//! TSV reading and writing for stat rows and rolled-up player tables.
//!
//! Every table is tab-separated with a header row. Column order is
//! significant: identity columns first, then the metric catalogue in
//! aggregator order. `Missing` values are empty cells.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use tracing::warn;

use crate::aggregate::StatRow;
use crate::error::{Result, StatsError};
use crate::metrics::{round2, MetricSet, MetricValue};
use crate::model::MatchId;
use crate::storage::loader::MatchInfo;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One row of a rolled-up player (or team) table: the stat line joined with
/// match context. Context fields are optional since a match can be missing
/// from the match list; such rows keep their stats with empty context cells.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerMatchRow {
    pub match_id: MatchId,
    pub match_date: Option<NaiveDate>,
    pub opponent: Option<String>,
    pub match_result: Option<String>,
    pub player: String,
    pub minutes_played: f64,
    pub metrics: MetricSet,
}

/// A rolled-up table: rows sharing one metric column set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerTable {
    pub rows: Vec<PlayerMatchRow>,
}

impl PlayerTable {
    /// Join stat rows with match context and sort by date (dateless rows
    /// last). Stat rows always survive the join; a match id absent from the
    /// match list only costs its context columns.
    pub fn join(rows: Vec<StatRow>, matches: &[MatchInfo]) -> Self {
        let mut joined: Vec<PlayerMatchRow> = rows
            .into_iter()
            .map(|row| {
                let info = matches.iter().find(|m| m.match_id == row.match_id);
                if info.is_none() {
                    warn!(match_id = %row.match_id, "match missing from the match list");
                }
                PlayerMatchRow {
                    match_id: row.match_id,
                    match_date: info.map(|m| m.match_date),
                    opponent: info.map(|m| m.opponent.clone()),
                    match_result: info.map(|m| m.match_result.clone()),
                    player: row.player,
                    minutes_played: row.minutes_played,
                    metrics: row.metrics,
                }
            })
            .collect();
        joined.sort_by_key(|row| (row.match_date.is_none(), row.match_date));
        Self { rows: joined }
    }

    /// Stack another table under this one. Column sets must match.
    pub fn append(&mut self, other: PlayerTable) -> Result<()> {
        if let (Some(ours), Some(theirs)) = (self.rows.first(), other.rows.first()) {
            let ours: Vec<&str> = ours.metrics.keys().collect();
            let theirs: Vec<&str> = theirs.metrics.keys().collect();
            if ours != theirs {
                return Err(StatsError::ColumnMismatch {
                    message: format!(
                        "cannot stack {} columns onto {}",
                        theirs.len(),
                        ours.len()
                    ),
                });
            }
        }
        self.rows.extend(other.rows);
        Ok(())
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let Some(first) = self.rows.first() else {
            return Err(StatsError::Cache {
                message: format!("refusing to write empty table {}", path.display()),
            });
        };
        ensure_parent(path)?;

        let mut writer = WriterBuilder::new().delimiter(b'\t').from_path(path)?;
        let mut header = vec![
            "match_id".to_string(),
            "match_date".to_string(),
            "opponent".to_string(),
            "match_result".to_string(),
            "player".to_string(),
            "minutes_played".to_string(),
        ];
        header.extend(first.metrics.keys().map(str::to_string));
        writer.write_record(&header)?;

        for row in &self.rows {
            let keys: Vec<&str> = row.metrics.keys().collect();
            let expected: Vec<&str> = first.metrics.keys().collect();
            if keys != expected {
                return Err(StatsError::ColumnMismatch {
                    message: format!("row for match {} has a different column set", row.match_id),
                });
            }
            let mut record = vec![
                row.match_id.to_string(),
                row.match_date
                    .map(|d| d.format(DATE_FORMAT).to_string())
                    .unwrap_or_default(),
                row.opponent.clone().unwrap_or_default(),
                row.match_result.clone().unwrap_or_default(),
                row.player.clone(),
                format!("{:.2}", round2(row.minutes_played)),
            ];
            record.extend(row.metrics.iter().map(|(_, v)| v.to_string()));
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn read(path: &Path) -> Result<Self> {
        let mut reader = ReaderBuilder::new().delimiter(b'\t').from_path(path)?;
        let header: Vec<String> = reader
            .headers()?
            .iter()
            .map(str::to_string)
            .collect();
        for required in ["match_id", "match_date", "opponent", "match_result", "player", "minutes_played"] {
            if !header.iter().any(|h| h == required) {
                return Err(StatsError::MissingColumn {
                    column: required.to_string(),
                    table: path.display().to_string(),
                });
            }
        }
        let column = |name: &str| header.iter().position(|h| h == name).expect("checked above");
        let (id_col, date_col) = (column("match_id"), column("match_date"));
        let (opp_col, res_col) = (column("opponent"), column("match_result"));
        let (player_col, minutes_col) = (column("player"), column("minutes_played"));
        let identity = [id_col, date_col, opp_col, res_col, player_col, minutes_col];

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let field = |col: usize| record.get(col).unwrap_or_default();

            let match_id = field(id_col).parse::<MatchId>().map_err(|_| bad_cell(path, "match_id"))?;
            let match_date = match field(date_col) {
                "" => None,
                raw => Some(
                    NaiveDate::parse_from_str(raw, DATE_FORMAT)
                        .map_err(|_| bad_cell(path, "match_date"))?,
                ),
            };
            let minutes_played = field(minutes_col)
                .parse::<f64>()
                .map_err(|_| bad_cell(path, "minutes_played"))?;

            let mut metrics = MetricSet::new();
            for (col, name) in header.iter().enumerate() {
                if identity.contains(&col) {
                    continue;
                }
                let value = field(col)
                    .parse::<MetricValue>()
                    .map_err(|_| bad_cell(path, name))?;
                metrics.set(name, value);
            }

            rows.push(PlayerMatchRow {
                match_id,
                match_date,
                opponent: non_empty(field(opp_col)),
                match_result: non_empty(field(res_col)),
                player: field(player_col).to_string(),
                minutes_played,
                metrics,
            });
        }
        Ok(Self { rows })
    }
}

/// Write one per-(player, match) stat row to its own TSV.
pub fn write_stat_row(path: &Path, row: &StatRow) -> Result<()> {
    ensure_parent(path)?;
    let mut writer = WriterBuilder::new().delimiter(b'\t').from_path(path)?;

    let mut header = vec!["match_id".to_string(), "player".to_string(), "minutes_played".to_string()];
    header.extend(row.metrics.keys().map(str::to_string));
    writer.write_record(&header)?;

    let mut record = vec![
        row.match_id.to_string(),
        row.player.clone(),
        format!("{:.2}", round2(row.minutes_played)),
    ];
    record.extend(row.metrics.iter().map(|(_, v)| v.to_string()));
    writer.write_record(&record)?;
    writer.flush()?;
    Ok(())
}

/// Read a per-(player, match) stat row back.
pub fn read_stat_row(path: &Path) -> Result<StatRow> {
    let mut reader = ReaderBuilder::new().delimiter(b'\t').from_path(path)?;
    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    for required in ["match_id", "player", "minutes_played"] {
        if !header.iter().any(|h| h == required) {
            return Err(StatsError::MissingColumn {
                column: required.to_string(),
                table: path.display().to_string(),
            });
        }
    }
    let column = |name: &str| header.iter().position(|h| h == name).expect("checked above");
    let identity = [column("match_id"), column("player"), column("minutes_played")];

    let record = reader.records().next().ok_or_else(|| StatsError::Cache {
        message: format!("stat file {} has no data row", path.display()),
    })??;
    let field = |col: usize| record.get(col).unwrap_or_default();

    let mut metrics = MetricSet::new();
    for (col, name) in header.iter().enumerate() {
        if identity.contains(&col) {
            continue;
        }
        let value = field(col)
            .parse::<MetricValue>()
            .map_err(|_| bad_cell(path, name))?;
        metrics.set(name, value);
    }

    Ok(StatRow {
        match_id: field(identity[0]).parse().map_err(|_| bad_cell(path, "match_id"))?,
        player: field(identity[1]).to_string(),
        minutes_played: field(identity[2])
            .parse()
            .map_err(|_| bad_cell(path, "minutes_played"))?,
        metrics,
    })
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn non_empty(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

fn bad_cell(path: &Path, column: &str) -> StatsError {
    StatsError::ColumnMismatch {
        message: format!("unparseable '{column}' cell in {}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat_row(match_id: u64, player: &str) -> StatRow {
        let mut metrics = MetricSet::new();
        metrics.count("goals", 2);
        metrics.float("xg", 1.234);
        metrics.missing("ratio_shots");
        StatRow {
            match_id: MatchId::new(match_id),
            player: player.to_string(),
            minutes_played: 90.0,
            metrics,
        }
    }

    fn match_info(match_id: u64, date: &str) -> MatchInfo {
        MatchInfo {
            match_id: MatchId::new(match_id),
            match_date: NaiveDate::parse_from_str(date, DATE_FORMAT).unwrap(),
            kick_off: None,
            opponent: "Rivals".to_string(),
            match_result: "2-1".to_string(),
            last_updated: None,
            last_updated_360: None,
        }
    }

    #[test]
    fn stat_row_round_trips_including_missing_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("players/Alice/Alice_1_stats.tsv");

        let row = stat_row(1, "Alice");
        write_stat_row(&path, &row).unwrap();
        let back = read_stat_row(&path).unwrap();

        assert_eq!(back.match_id, MatchId::new(1));
        assert_eq!(back.metrics.get("goals"), Some(MetricValue::Count(2)));
        assert_eq!(back.metrics.get("xg"), Some(MetricValue::Float(1.23)));
        assert_eq!(back.metrics.get("ratio_shots"), Some(MetricValue::Missing));
    }

    #[test]
    fn join_sorts_by_date_and_keeps_unmatched_rows() {
        let rows = vec![stat_row(2, "Alice"), stat_row(1, "Alice"), stat_row(9, "Alice")];
        let matches = vec![match_info(1, "2024-03-01"), match_info(2, "2024-02-01")];

        let table = PlayerTable::join(rows, &matches);
        let ids: Vec<u64> = table.rows.iter().map(|r| r.match_id.as_u64()).collect();
        // Dated rows ascending, the unknown match last.
        assert_eq!(ids, vec![2, 1, 9]);
        assert!(table.rows[2].match_date.is_none());
        assert!(table.rows[2].opponent.is_none());
    }

    #[test]
    fn player_table_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("players/Alice/Alice_stats.tsv");

        let table = PlayerTable::join(vec![stat_row(1, "Alice")], &[match_info(1, "2024-03-01")]);
        table.write(&path).unwrap();
        let back = PlayerTable::read(&path).unwrap();

        assert_eq!(back.rows.len(), 1);
        assert_eq!(back.rows[0].opponent.as_deref(), Some("Rivals"));
        assert_eq!(back.rows[0].metrics.get("xg"), Some(MetricValue::Float(1.23)));
        assert_eq!(back.rows[0].minutes_played, 90.0);
    }

    #[test]
    fn stacking_mismatched_columns_is_an_error() {
        let mut table = PlayerTable::join(vec![stat_row(1, "Alice")], &[]);
        let mut other_metrics = MetricSet::new();
        other_metrics.count("saves", 3);
        let other = PlayerTable::join(
            vec![StatRow {
                match_id: MatchId::new(2),
                player: "Bella".to_string(),
                minutes_played: 45.0,
                metrics: other_metrics,
            }],
            &[],
        );

        let err = table.append(other).unwrap_err();
        assert!(matches!(err, StatsError::ColumnMismatch { .. }));
    }

    #[test]
    fn empty_table_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.tsv");
        let err = PlayerTable::default().write(&path).unwrap_err();
        assert!(matches!(err, StatsError::Cache { .. }));
        assert!(!path.exists());
    }
}
