use super::*;

fn player(uuid: &str, name: &str) -> Player {
    Player { name: name.into(), uuid: uuid.into(), color: "#112233".into(), country: String::new() }
}

#[test]
fn join_adds_and_refreshes_by_uuid() {
    let mut roster = Roster::new();
    roster.join(player("u1", "Ada"));
    roster.join(player("u1", "Ada Prime"));
    assert_eq!(roster.len(), 1);
    assert_eq!(roster.get("u1").unwrap().name, "Ada Prime");
}

#[test]
fn quit_returns_departed_player() {
    let mut roster = Roster::new();
    roster.join(player("u1", "Ada"));
    assert_eq!(roster.quit("u1").map(|p| p.name), Some("Ada".to_owned()));
    assert!(roster.quit("u1").is_none());
    assert!(roster.is_empty());
}

#[test]
fn replace_all_discards_previous_players() {
    let mut roster = Roster::new();
    roster.join(player("old", "Zed"));
    roster.replace_all([player("u2", "Bea"), player("u3", "Al")]);
    let names: Vec<&str> = roster.players().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Al", "Bea"]);
}
