//! End-to-end aggregation tests driven by raw JSON event logs.

use serde_json::{json, Value};

use pitchstats::{aggregate_outfield, AnalysisConfig, Event, MatchId, MetricValue};

const HOME: &str = "Home";
const AWAY: &str = "Away";

/// Period-relative clock string for a match-minute value.
fn clock(period: u8, minute: u32, second: u32) -> (String, u32) {
    let offset = if period >= 2 { 45 } else { 0 };
    let rel = minute - offset;
    (format!("00:{rel:02}:{second:02}.000"), minute)
}

fn base(index: u32, period: u8, minute: u32, second: u32, kind: &str) -> Value {
    let (timestamp, minute) = clock(period, minute, second);
    json!({
        "id": format!("evt-{index}"),
        "index": index,
        "period": period,
        "timestamp": timestamp,
        "minute": minute,
        "second": second,
        "possession": 1,
        "possession_team": HOME,
        "play_pattern": "Regular Play",
        "team": HOME,
        "type": kind,
    })
}

fn with(mut event: Value, fields: Value) -> Value {
    let target = event.as_object_mut().unwrap();
    for (key, value) in fields.as_object().unwrap() {
        target.insert(key.clone(), value.clone());
    }
    event
}

fn starting_xi(index: u32, team: &str, players: &[(u64, &str)]) -> Value {
    let lineup: Vec<Value> = players
        .iter()
        .map(|(id, name)| json!({"player_id": id, "player_name": name}))
        .collect();
    with(
        base(index, 1, 0, 0, "Starting XI"),
        json!({"team": team, "tactics": {"formation": 433, "lineup": lineup}}),
    )
}

/// Scaffolding for a full 90-minute match. First-half play events take
/// indices 10..999, second-half play events 1010..1999.
fn full_match_halves(first: Vec<Value>, second: Vec<Value>) -> Vec<Event> {
    let mut log = vec![
        starting_xi(1, HOME, &[(1, "Alice"), (2, "Bella"), (3, "Cara")]),
        starting_xi(2, AWAY, &[(11, "Vera"), (12, "Wanda")]),
        base(3, 1, 0, 0, "Half Start"),
        with(base(4, 1, 0, 0, "Half Start"), json!({"team": AWAY})),
    ];
    log.extend(first);
    log.push(base(1000, 1, 45, 0, "Half End"));
    log.push(with(base(1001, 1, 45, 0, "Half End"), json!({"team": AWAY})));
    log.push(base(1002, 2, 45, 0, "Half Start"));
    log.push(with(base(1003, 2, 45, 0, "Half Start"), json!({"team": AWAY})));
    log.extend(second);
    log.push(base(2000, 2, 90, 0, "Half End"));
    log.push(with(base(2001, 2, 90, 0, "Half End"), json!({"team": AWAY})));

    serde_json::from_value(Value::Array(log)).unwrap()
}

fn full_match(play: Vec<Value>) -> Vec<Event> {
    full_match_halves(play, Vec::new())
}

fn pass(index: u32, period: u8, minute: u32, player: &str, payload: Value) -> Value {
    with(
        base(index, period, minute, 0, "Pass"),
        json!({"player": player, "pass": payload}),
    )
}

#[test]
fn aggregation_is_deterministic() {
    let events = full_match(vec![
        pass(10, 1, 5, "Alice", json!({"length": 40.0})),
        pass(11, 1, 6, "Alice", json!({"length": 12.0, "outcome": "Incomplete"})),
    ]);
    let cfg = AnalysisConfig::default();

    let first = aggregate_outfield(&events, &cfg, HOME, "Alice", MatchId::new(1)).unwrap();
    let second = aggregate_outfield(&events, &cfg, HOME, "Alice", MatchId::new(1)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn omitted_outcome_counts_as_complete() {
    let events = full_match(vec![
        pass(10, 1, 5, "Alice", json!({"length": 40.0})),
        pass(11, 1, 6, "Alice", json!({"length": 41.0, "outcome": "Incomplete"})),
    ]);
    let cfg = AnalysisConfig::default();

    let row = aggregate_outfield(&events, &cfg, HOME, "Alice", MatchId::new(1)).unwrap();
    assert_eq!(row.metrics.get("total_long_balls"), Some(MetricValue::Count(2)));
    assert_eq!(row.metrics.get("completed_long_balls"), Some(MetricValue::Count(1)));
    assert_eq!(row.metrics.get("ratio_long_balls"), Some(MetricValue::Float(0.5)));
}

#[test]
fn zero_qualifying_passes_leave_the_ratio_missing() {
    let events = full_match(vec![pass(10, 1, 5, "Alice", json!({"length": 5.0}))]);
    let cfg = AnalysisConfig::default();

    let row = aggregate_outfield(&events, &cfg, HOME, "Alice", MatchId::new(1)).unwrap();
    assert_eq!(row.metrics.get("total_long_balls"), Some(MetricValue::Count(0)));
    assert_eq!(row.metrics.get("ratio_long_balls"), Some(MetricValue::Missing));
}

#[test]
fn starter_who_finishes_gets_the_full_match() {
    let events = full_match(vec![pass(10, 1, 5, "Alice", json!({}))]);
    let cfg = AnalysisConfig::default();

    let row = aggregate_outfield(&events, &cfg, HOME, "Alice", MatchId::new(1)).unwrap();
    assert_eq!(row.minutes_played, 90.0);
}

#[test]
fn starter_subbed_off_gets_the_clock_at_the_substitution() {
    let sub = with(
        base(20, 1, 30, 0, "Substitution"),
        json!({
            "player": "Alice",
            "substitution": {"replacement": "Romy", "outcome": "Tactical"}
        }),
    );
    let events = full_match(vec![pass(10, 1, 5, "Alice", json!({})), sub]);
    let cfg = AnalysisConfig::default();

    let row = aggregate_outfield(&events, &cfg, HOME, "Alice", MatchId::new(1)).unwrap();
    assert_eq!(row.minutes_played, 30.0);
}

#[test]
fn absent_player_gets_a_zero_row_not_an_error() {
    let events = full_match(vec![pass(10, 1, 5, "Alice", json!({}))]);
    let cfg = AnalysisConfig::default();

    let row = aggregate_outfield(&events, &cfg, HOME, "Cara", MatchId::new(1)).unwrap();
    assert_eq!(row.minutes_played, 0.0);
    assert_eq!(row.metrics.get("goals"), Some(MetricValue::Count(0)));
    assert_eq!(row.metrics.get("total_passes"), Some(MetricValue::Count(0)));
}

#[test]
fn second_assist_credited_within_three_events() {
    let shot = with(
        base(12, 1, 20, 0, "Shot"),
        json!({
            "id": "shot-1",
            "player": "Cara",
            "shot": {"outcome": "Goal", "statsbomb_xg": 0.4}
        }),
    );
    let events = full_match(vec![
        pass(10, 1, 19, "Alice", json!({})),
        pass(
            11,
            1,
            19,
            "Bella",
            json!({"goal_assist": true, "assisted_shot_id": "shot-1"}),
        ),
        shot,
    ]);
    let cfg = AnalysisConfig::default();

    let alice = aggregate_outfield(&events, &cfg, HOME, "Alice", MatchId::new(1)).unwrap();
    assert_eq!(alice.metrics.get("second_assists"), Some(MetricValue::Count(1)));
    assert_eq!(alice.metrics.get("total_goal_contributions"), Some(MetricValue::Count(1)));

    let bella = aggregate_outfield(&events, &cfg, HOME, "Bella", MatchId::new(1)).unwrap();
    assert_eq!(bella.metrics.get("assists"), Some(MetricValue::Count(1)));
    assert_eq!(bella.metrics.get("second_assists"), Some(MetricValue::Count(0)));

    let cara = aggregate_outfield(&events, &cfg, HOME, "Cara", MatchId::new(1)).unwrap();
    assert_eq!(cara.metrics.get("goals"), Some(MetricValue::Count(1)));
}

#[test]
fn second_half_actions_use_the_period_relative_clock() {
    let events = full_match_halves(
        vec![pass(10, 1, 5, "Alice", json!({}))],
        vec![pass(1010, 2, 60, "Alice", json!({"length": 40.0}))],
    );
    let cfg = AnalysisConfig::default();

    let row = aggregate_outfield(&events, &cfg, HOME, "Alice", MatchId::new(1)).unwrap();
    assert_eq!(row.minutes_played, 90.0);
    assert_eq!(row.metrics.get("total_long_balls"), Some(MetricValue::Count(1)));
}
