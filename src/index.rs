//! Weighted performance index over a rolled-up stats table.
//!
//! Counting columns are normalized to per-90 and min-max scaled across the
//! table's rows; ratio columns already live on a 0..1 scale and are used
//! as-is. The index is the weighted sum of the chosen columns, scaled to
//! 0..100. Weights must sum to one.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use csv::WriterBuilder;

use crate::error::{Result, StatsError};
use crate::metrics::round2;
use crate::model::MatchId;
use crate::storage::PlayerTable;

const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

#[derive(Debug, Clone, PartialEq)]
pub struct IndexRow {
    pub player: String,
    pub match_id: MatchId,
    pub minutes_played: f64,
    pub match_date: Option<NaiveDate>,
    pub opponent: Option<String>,
    pub match_result: Option<String>,
    pub performance_index: f64,
}

/// Compute one index row per table row.
pub fn performance_index(
    table: &PlayerTable,
    weights: &HashMap<String, f64>,
) -> Result<Vec<IndexRow>> {
    let sum: f64 = weights.values().sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(StatsError::InvalidWeights { sum });
    }

    let mut scores = vec![0.0f64; table.rows.len()];
    for (metric, weight) in weights {
        let column = scaled_column(table, metric)?;
        for (score, value) in scores.iter_mut().zip(&column) {
            // A missing cell contributes nothing rather than poisoning the row.
            *score += value.unwrap_or(0.0) * weight;
        }
    }

    Ok(table
        .rows
        .iter()
        .zip(scores)
        .map(|(row, score)| IndexRow {
            player: row.player.clone(),
            match_id: row.match_id,
            minutes_played: row.minutes_played,
            match_date: row.match_date,
            opponent: row.opponent.clone(),
            match_result: row.match_result.clone(),
            performance_index: round2(score * 100.0),
        })
        .collect())
}

/// One metric column on the 0..1 scale the weighted sum expects.
fn scaled_column(table: &PlayerTable, metric: &str) -> Result<Vec<Option<f64>>> {
    let raw: Vec<Option<f64>> = table
        .rows
        .iter()
        .map(|row| {
            row.metrics
                .get(metric)
                .ok_or_else(|| StatsError::MissingColumn {
                    column: metric.to_string(),
                    table: "player stats".to_string(),
                })
                .map(|v| v.as_f64())
        })
        .collect::<Result<_>>()?;

    // Ratio columns are already 0..1; everything else gets per-90 + min-max.
    if metric.contains("ratio") {
        return Ok(raw);
    }

    let per_90: Vec<Option<f64>> = raw
        .iter()
        .zip(&table.rows)
        .map(|(value, row)| match value {
            Some(v) if row.minutes_played > 0.0 => {
                Some(round2(v / row.minutes_played * 90.0))
            }
            _ => None,
        })
        .collect();

    let present: Vec<f64> = per_90.iter().flatten().copied().collect();
    let (min, max) = match (
        present.iter().copied().reduce(f64::min),
        present.iter().copied().reduce(f64::max),
    ) {
        (Some(min), Some(max)) => (min, max),
        _ => return Ok(per_90),
    };

    Ok(per_90
        .into_iter()
        .map(|value| {
            value.map(|v| {
                if max > min {
                    (v - min) / (max - min)
                } else {
                    // A constant column carries no signal.
                    0.0
                }
            })
        })
        .collect())
}

/// Write index rows as a TSV.
pub fn write_index(path: &Path, rows: &[IndexRow]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = WriterBuilder::new().delimiter(b'\t').from_path(path)?;
    writer.write_record([
        "player",
        "match_id",
        "minutes_played",
        "match_date",
        "opponent",
        "match_result",
        "performance_index",
    ])?;
    for row in rows {
        writer.write_record([
            row.player.clone(),
            row.match_id.to_string(),
            format!("{:.2}", round2(row.minutes_played)),
            row.match_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            row.opponent.clone().unwrap_or_default(),
            row.match_result.clone().unwrap_or_default(),
            format!("{:.2}", row.performance_index),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
