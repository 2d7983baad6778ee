//! Input files: match event logs, the match list, and metric weight files.

use std::collections::HashMap;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::model::{Event, MatchId};
use crate::storage::cache::parse_source_timestamp;

/// One row of the match list: identity, opponent context for the rolled-up
/// tables, and the provider timestamps that drive cache freshness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchInfo {
    pub match_id: MatchId,
    pub match_date: NaiveDate,
    #[serde(default)]
    pub kick_off: Option<String>,
    pub opponent: String,
    pub match_result: String,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub last_updated_360: Option<String>,
}

impl MatchInfo {
    /// Newest of kickoff, last-updated and last-updated-360. A missing
    /// kickoff time means midnight; unparseable timestamps are ignored.
    pub fn newest_source_timestamp(&self) -> Option<NaiveDateTime> {
        let kickoff_time = self
            .kick_off
            .as_deref()
            .and_then(|raw| NaiveTime::parse_from_str(raw, "%H:%M:%S%.f").ok())
            .unwrap_or_else(|| NaiveTime::from_hms_opt(0, 0, 0).expect("valid time"));
        let kickoff = self.match_date.and_time(kickoff_time);

        [
            Some(kickoff),
            self.last_updated.as_deref().and_then(parse_source_timestamp),
            self.last_updated_360.as_deref().and_then(parse_source_timestamp),
        ]
        .into_iter()
        .flatten()
        .max()
    }
}

/// Load one match's event log from a JSON array.
///
/// Events that fail to deserialize are logged and skipped rather than
/// failing the whole match; the survivors are re-sorted by `index` since
/// the files are not guaranteed to be ordered.
pub fn load_events(path: &Path) -> Result<Vec<Event>> {
    let raw = std::fs::read_to_string(path)?;
    let values: Vec<serde_json::Value> = serde_json::from_str(&raw)?;

    let mut events = Vec::with_capacity(values.len());
    for value in values {
        match serde_json::from_value::<Event>(value) {
            Ok(event) => events.push(event),
            Err(err) => {
                warn!(file = %path.display(), %err, "skipping malformed event");
            }
        }
    }
    events.sort_by_key(|e| e.index);
    Ok(events)
}

/// Load the match list JSON.
pub fn load_match_list(path: &Path) -> Result<Vec<MatchInfo>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Load a metric-weights JSON object (`{"column": weight, ...}`). Weight
/// validation happens in the index computation, not here.
pub fn load_weights(path: &Path) -> Result<HashMap<String, f64>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Event file naming: `<match_id>_events.json` inside the data directory.
pub fn events_path(data_dir: &Path, match_id: MatchId) -> std::path::PathBuf {
    data_dir.join(format!("{match_id}_events.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn malformed_events_are_skipped_and_the_rest_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1_events.json");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(
            f,
            r#"[
                {{"id": "b", "index": 20, "period": 1, "timestamp": "00:10:00.000",
                  "minute": 10, "second": 0, "possession": 1,
                  "possession_team": "Home", "team": "Home", "type": "Pressure"}},
                {{"id": "bad", "index": "not a number"}},
                {{"id": "a", "index": 10, "period": 1, "timestamp": "00:05:00.000",
                  "minute": 5, "second": 0, "possession": 1,
                  "possession_team": "Home", "team": "Home", "type": "Pressure"}}
            ]"#
        )
        .unwrap();

        let events = load_events(&path).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].index, 10);
        assert_eq!(events[1].index, 20);
    }

    #[test]
    fn newest_timestamp_prefers_the_latest_source() {
        let info = MatchInfo {
            match_id: MatchId::new(1),
            match_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            kick_off: Some("18:30:00.000".to_string()),
            opponent: "Rivals".to_string(),
            match_result: "2-1".to_string(),
            last_updated: Some("2024-05-03T09:00:00.000".to_string()),
            last_updated_360: None,
        };
        let newest = info.newest_source_timestamp().unwrap();
        assert_eq!(newest.date(), NaiveDate::from_ymd_opt(2024, 5, 3).unwrap());
    }

    #[test]
    fn kickoff_defaults_to_midnight() {
        let info = MatchInfo {
            match_id: MatchId::new(1),
            match_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            kick_off: None,
            opponent: "Rivals".to_string(),
            match_result: "0-0".to_string(),
            last_updated: None,
            last_updated_360: None,
        };
        let newest = info.newest_source_timestamp().unwrap();
        assert_eq!(newest.time(), NaiveTime::from_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn events_path_naming() {
        let path = events_path(Path::new("/data"), MatchId::new(3895333));
        assert_eq!(path, Path::new("/data/3895333_events.json"));
    }
}
