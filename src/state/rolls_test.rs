use super::*;

fn roll(result: u32, recent: bool) -> Roll {
    Roll { color: "#abcdef".into(), sides: 20, result, recent }
}

#[test]
fn recent_roll_enters_history_and_popup() {
    let mut feed = RollFeed::new(4000.0);
    feed.push(roll(17, true), 1000.0);
    assert_eq!(feed.history().len(), 1);
    assert_eq!(feed.popup(), vec![&roll(17, true)]);
}

#[test]
fn stale_roll_only_enters_history() {
    let mut feed = RollFeed::new(4000.0);
    feed.push(roll(3, false), 1000.0);
    assert_eq!(feed.history().len(), 1);
    assert!(feed.popup().is_empty());
}

#[test]
fn popup_entries_expire_after_timeout() {
    let mut feed = RollFeed::new(4000.0);
    feed.push(roll(1, true), 0.0);
    feed.push(roll(2, true), 3000.0);
    assert!(!feed.expire(3999.0));
    assert!(feed.expire(4000.0));
    assert_eq!(feed.popup(), vec![&roll(2, true)]);
    assert!(feed.expire(7000.0));
    assert!(feed.popup().is_empty());
    assert_eq!(feed.history().len(), 2);
}

#[test]
fn replace_history_clears_popup() {
    let mut feed = RollFeed::new(4000.0);
    feed.push(roll(9, true), 0.0);
    feed.replace_history(vec![roll(4, true), roll(5, false)]);
    assert!(feed.popup().is_empty());
    assert_eq!(feed.history().len(), 2);
}
