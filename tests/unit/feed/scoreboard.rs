use serde_json::{Value, json};

use super::*;

fn game(state: &str, home: (&str, Value), away: (&str, Value)) -> Value {
    json!({
        "competitions": [{
            "status": {"type": {"state": state}},
            "competitors": [
                {"homeAway": "home", "team": {"abbreviation": home.0}, "score": home.1},
                {"homeAway": "away", "team": {"abbreviation": away.0}, "score": away.1},
            ]
        }]
    })
}

fn board(events: Vec<Value>) -> Scoreboard {
    Scoreboard::from_value(json!({ "events": events })).unwrap()
}

#[test]
fn home_win_with_string_scores() {
    let b = board(vec![game("post", ("CHC", json!("7")), ("SIM", json!("4")))]);
    let win = find_win(&b, "CHC").unwrap().unwrap();
    assert_eq!(win.team_abbr, "CHC");
    assert_eq!(win.opponent_abbr, "SIM");
    assert_eq!((win.team_score, win.opponent_score), (7, 4));
    assert_eq!(win.score_label(), "7-4");
}

#[test]
fn away_win_with_numeric_scores_puts_team_first() {
    let b = board(vec![game("post", ("STL", json!(2)), ("CHC", json!(5)))]);
    let win = find_win(&b, "CHC").unwrap().unwrap();
    assert_eq!(win.opponent_abbr, "STL");
    assert_eq!(win.score_label(), "5-2");
}

#[test]
fn losses_ties_and_unfinished_games_are_ignored() {
    let b = board(vec![
        game("post", ("CHC", json!("3")), ("MIL", json!("4"))),
        game("post", ("CHC", json!("4")), ("MIL", json!("4"))),
        game("in", ("CHC", json!("9")), ("MIL", json!("0"))),
        game("pre", ("CHC", json!("")), ("MIL", json!(""))),
    ]);
    assert!(find_win(&b, "CHC").unwrap().is_none());
}

#[test]
fn other_teams_games_are_ignored() {
    let b = board(vec![game("post", ("NYY", json!("10")), ("BOS", json!("1")))]);
    assert!(find_win(&b, "CHC").unwrap().is_none());
}

#[test]
fn scanning_stops_at_first_win_after_skipping_a_loss() {
    let b = board(vec![
        game("post", ("CHC", json!("1")), ("PIT", json!("2"))),
        game("post", ("PIT", json!("3")), ("CHC", json!("6"))),
        game("post", ("CHC", json!("8")), ("PIT", json!("0"))),
    ]);
    let win = find_win(&b, "CHC").unwrap().unwrap();
    assert_eq!(win.score_label(), "6-3");
}

#[test]
fn only_first_competition_of_an_event_counts() {
    let mut ev = game("pre", ("CHC", json!("0")), ("SIM", json!("0")));
    let second = game("post", ("CHC", json!("7")), ("SIM", json!("4")));
    ev["competitions"]
        .as_array_mut()
        .unwrap()
        .push(second["competitions"][0].clone());
    assert!(find_win(&board(vec![ev]), "CHC").unwrap().is_none());
}

#[test]
fn missing_fields_decode_leniently() {
    let b = Scoreboard::from_value(json!({})).unwrap();
    assert!(b.events.is_empty());

    let b = Scoreboard::from_value(json!({
        "events": [
            {},
            {"competitions": []},
            {"competitions": [{"status": {"type": {"state": "post"}}, "competitors": [
                {"homeAway": "home", "team": {"abbreviation": "CHC"}, "score": "2"}
            ]}]},
            {"competitions": [{"status": {"type": {"state": "post"}}, "competitors": [
                {"homeAway": "home", "team": {"abbreviation": "CHC"}, "score": "2"},
                {"homeAway": "away", "team": {"abbreviation": "SIM"}}
            ]}]}
        ]
    }))
    .unwrap();
    // missing away score counts as zero
    let win = find_win(&b, "CHC").unwrap().unwrap();
    assert_eq!(win.score_label(), "2-0");
}

#[test]
fn malformed_payloads_are_feed_errors() {
    assert!(matches!(
        Scoreboard::from_value(json!({"events": {"oops": 1}})),
        Err(FlyError::Feed(_))
    ));

    let b = board(vec![game("post", ("CHC", json!("seven")), ("SIM", json!("4")))]);
    assert!(matches!(find_win(&b, "CHC"), Err(FlyError::Feed(_))));
}

#[test]
fn score_points_parsing() {
    assert_eq!(Score::Int(3).points().unwrap(), 3);
    assert_eq!(Score::Float(4.0).points().unwrap(), 4);
    assert_eq!(Score::Text(" 12 ".into()).points().unwrap(), 12);
    assert_eq!(Score::Text(String::new()).points().unwrap(), 0);
    assert!(Score::Int(-1).points().is_err());
    assert!(Score::Float(f64::NAN).points().is_err());
}
