//! One player's rolled-up stats, printed as TSV or JSON.

use serde_json::{json, Map, Value};

use crate::cli::CommonArgs;
use crate::commands::common::Workspace;
use crate::error::Result;
use crate::metrics::MetricValue;
use crate::storage::PlayerTable;

pub fn handle_player_stats(common: &CommonArgs, player: &str, as_json: bool) -> Result<()> {
    let workspace = Workspace::load(common)?;
    let table = workspace.player_table(player)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&to_json(&table))?);
    } else {
        print_tsv(&table);
    }
    Ok(())
}

fn metric_to_json(value: MetricValue) -> Value {
    match value {
        MetricValue::Count(n) => json!(n),
        MetricValue::Float(v) => json!(v),
        MetricValue::Missing => Value::Null,
    }
}

fn to_json(table: &PlayerTable) -> Value {
    let rows: Vec<Value> = table
        .rows
        .iter()
        .map(|row| {
            let mut object = Map::new();
            object.insert("match_id".to_string(), json!(row.match_id));
            object.insert("match_date".to_string(), json!(row.match_date));
            object.insert("opponent".to_string(), json!(row.opponent));
            object.insert("match_result".to_string(), json!(row.match_result));
            object.insert("player".to_string(), json!(row.player));
            object.insert("minutes_played".to_string(), json!(row.minutes_played));
            for (key, value) in row.metrics.iter() {
                object.insert(key.to_string(), metric_to_json(value));
            }
            Value::Object(object)
        })
        .collect();
    Value::Array(rows)
}

fn print_tsv(table: &PlayerTable) {
    let Some(first) = table.rows.first() else {
        println!("no matches for this player");
        return;
    };

    let mut header = vec![
        "match_id".to_string(),
        "match_date".to_string(),
        "opponent".to_string(),
        "match_result".to_string(),
        "player".to_string(),
        "minutes_played".to_string(),
    ];
    header.extend(first.metrics.keys().map(str::to_string));
    println!("{}", header.join("\t"));

    for row in &table.rows {
        let mut cells = vec![
            row.match_id.to_string(),
            row.match_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            row.opponent.clone().unwrap_or_default(),
            row.match_result.clone().unwrap_or_default(),
            row.player.clone(),
            format!("{:.2}", row.minutes_played),
        ];
        cells.extend(row.metrics.iter().map(|(_, v)| v.to_string()));
        println!("{}", cells.join("\t"));
    }
}
