//! Dice roll feed.
//!
//! Every roll lands in the history. Rolls flagged as recent also show in a
//! transient popup until they expire.

#[cfg(test)]
#[path = "rolls_test.rs"]
mod rolls_test;

use serde::Serialize;

/// One dice roll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Roll {
    /// Color of the player who rolled.
    pub color: String,
    pub sides: u32,
    pub result: u32,
    /// Whether the roll belongs in the fresh-roll popup.
    pub recent: bool,
}

#[derive(Clone, Debug)]
struct Shown {
    roll: Roll,
    at_ms: f64,
}

/// Roll history plus the popup of fresh rolls.
#[derive(Debug)]
pub struct RollFeed {
    history: Vec<Roll>,
    popup: Vec<Shown>,
    popup_ms: f64,
}

impl RollFeed {
    /// Create an empty feed whose popup entries last `popup_ms`.
    #[must_use]
    pub fn new(popup_ms: f64) -> Self {
        Self { history: Vec::new(), popup: Vec::new(), popup_ms }
    }

    /// Replace the history (ACCEPT). Replayed rolls never pop up.
    pub fn replace_history(&mut self, rolls: Vec<Roll>) {
        self.history = rolls;
        self.popup.clear();
    }

    /// Append a roll; recent rolls also enter the popup at `now_ms`.
    pub fn push(&mut self, roll: Roll, now_ms: f64) {
        if roll.recent {
            self.popup.push(Shown { roll: roll.clone(), at_ms: now_ms });
        }
        self.history.push(roll);
    }

    /// Drop popup entries older than the popup timeout. Returns whether any
    /// entry was removed.
    pub fn expire(&mut self, now_ms: f64) -> bool {
        let before = self.popup.len();
        let ttl = self.popup_ms;
        self.popup.retain(|s| now_ms - s.at_ms < ttl);
        self.popup.len() != before
    }

    /// All rolls, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Roll] {
        &self.history
    }

    /// Rolls currently in the popup, oldest first.
    #[must_use]
    pub fn popup(&self) -> Vec<&Roll> {
        self.popup.iter().map(|s| &s.roll).collect()
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.popup.clear();
    }
}
