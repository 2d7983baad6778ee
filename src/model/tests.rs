use serde_json::json;

use super::*;

fn event_from(value: serde_json::Value) -> Event {
    serde_json::from_value(value).expect("event should deserialize")
}

#[test]
fn pass_without_outcome_is_complete() {
    let event = event_from(json!({
        "id": "a-b-c",
        "index": 17,
        "period": 1,
        "timestamp": "00:03:12.450",
        "minute": 3,
        "second": 12,
        "possession": 4,
        "possession_team": "Home",
        "team": "Home",
        "player": "Alice",
        "type": "Pass",
        "pass": {
            "length": 12.5,
            "end_location": [60.0, 40.0],
            "recipient": "Bella"
        }
    }));

    let pass = event.pass().expect("should be a pass");
    assert!(pass.is_complete());
    assert_eq!(pass.end_x(), Some(60.0));
    assert!(!pass.is_set_piece());
}

#[test]
fn incomplete_pass_outcome_parses() {
    let event = event_from(json!({
        "index": 18,
        "period": 1,
        "minute": 3,
        "second": 20,
        "team": "Home",
        "type": "Pass",
        "pass": {"outcome": "Incomplete", "type": "Throw-in"}
    }));

    let pass = event.pass().unwrap();
    assert!(!pass.is_complete());
    assert!(pass.is_set_piece());
}

#[test]
fn dribble_and_receipt_defaults_are_complete() {
    let dribble = event_from(json!({
        "index": 1, "period": 1, "minute": 0, "second": 5,
        "team": "Home", "type": "Dribble", "dribble": {}
    }));
    assert!(dribble.dribble().unwrap().is_complete());

    let receipt = event_from(json!({
        "index": 2, "period": 1, "minute": 0, "second": 6,
        "team": "Home", "type": "Ball Receipt*"
    }));
    assert_eq!(receipt.ball_receipt().unwrap().outcome, ReceiptOutcome::Complete);
}

#[test]
fn unknown_event_kind_becomes_other() {
    let event = event_from(json!({
        "index": 9, "period": 1, "minute": 1, "second": 0,
        "team": "Away", "type": "Injury Stoppage",
        "injury_stoppage": {"in_chain": true}
    }));
    assert!(matches!(event.data, EventData::Other));
    assert!(!event.is_touch());
}

#[test]
fn fifty_fifty_payload_key_parses() {
    let event = event_from(json!({
        "index": 9, "period": 1, "minute": 1, "second": 0,
        "team": "Away", "type": "50/50",
        "50_50": {"outcome": "Success To Team"}
    }));
    match &event.data {
        EventData::FiftyFifty { fifty_fifty } => {
            assert!(fifty_fifty.outcome.unwrap().is_won());
        }
        other => panic!("expected 50/50, got {other:?}"),
    }
}

#[test]
fn shot_outcome_classification() {
    let event = event_from(json!({
        "index": 40, "period": 2, "minute": 67, "second": 3,
        "team": "Home", "player": "Cara", "type": "Shot",
        "shot": {
            "outcome": "Saved to Post",
            "statsbomb_xg": 0.07,
            "end_location": [120.0, 38.0, 1.2],
            "type": "Open Play"
        }
    }));

    let shot = event.shot().unwrap();
    assert!(shot.outcome.unwrap().is_on_target());
    assert!(shot.outcome.unwrap().is_saved());
    assert_eq!(shot.end_location.unwrap().z, Some(1.2));
}

#[test]
fn location_rejects_wrong_arity() {
    let result: std::result::Result<Location, _> = serde_json::from_value(json!([1.0]));
    assert!(result.is_err());
}

#[test]
fn timestamp_parses_and_formats() {
    let ts: Timestamp = "00:47:12.357".parse().unwrap();
    assert!((ts.as_secs() - (47.0 * 60.0 + 12.357)).abs() < 1e-9);
    assert_eq!(ts.to_string(), "00:47:12.357");
    assert!("12:34".parse::<Timestamp>().is_err());
}

#[test]
fn starting_xi_lineup_parses() {
    let event = event_from(json!({
        "index": 1, "period": 1, "minute": 0, "second": 0,
        "team": "Home", "type": "Starting XI",
        "tactics": {
            "formation": 433,
            "lineup": [
                {"player_id": 7, "player_name": "Alice", "jersey_number": 10, "position": "Center Forward"},
                {"player_id": 9, "player_name": "Kaya", "position": "Goalkeeper"}
            ]
        }
    }));

    let tactics = event.tactics().unwrap();
    assert_eq!(tactics.formation, Some(433));
    assert_eq!(tactics.lineup.len(), 2);
    assert_eq!(tactics.lineup[1].player_name, "Kaya");
}

#[test]
fn goalkeeper_strings_match_helpers() {
    let event = event_from(json!({
        "index": 55, "period": 1, "minute": 30, "second": 0,
        "team": "Home", "player": "Kaya", "position": "Goalkeeper",
        "type": "Goal Keeper",
        "goalkeeper": {"type": "Shot Saved", "outcome": "In Play Safe"}
    }));

    let gk = event.goalkeeper().unwrap();
    assert!(gk.kind_is("Shot Saved"));
    assert!(gk.outcome_in(&["In Play Safe", "In Play Danger"]));
    assert!(!gk.outcome_is("Claim"));
}

#[test]
fn event_round_trips_through_json() {
    let original = json!({
        "id": "x",
        "index": 3,
        "period": 1,
        "timestamp": "00:00:05.000",
        "minute": 0,
        "second": 5,
        "possession": 2,
        "possession_team": "Away",
        "team": "Away",
        "player": "Vera",
        "location": [55.0, 30.0],
        "under_pressure": true,
        "type": "Carry",
        "carry": {"end_location": [70.0, 28.0]}
    });
    let event: Event = serde_json::from_value(original).unwrap();
    let back = serde_json::to_value(&event).unwrap();
    let again: Event = serde_json::from_value(back).unwrap();

    assert_eq!(again.index, 3);
    assert!(again.under_pressure);
    assert_eq!(again.carry().unwrap().end_x(), 70.0);
}

#[test]
fn touch_labels_cover_touch_kinds() {
    let pass = Event {
        data: EventData::Pass { pass: PassData::default() },
        ..crate::fixtures::raw_event(1, 1, 0, 0, EventData::Pressure)
    };
    assert!(pass.is_touch());
    assert!(TOUCH_LABELS.contains(&pass.data.label()));

    let pressure = crate::fixtures::raw_event(2, 1, 0, 0, EventData::Pressure);
    assert!(!pressure.is_touch());
}
