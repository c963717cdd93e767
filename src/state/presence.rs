//! Player roster.
//!
//! Presence only: who is connected and in which color. Token ownership and
//! permissions are enforced by the server and not modeled here.

#[cfg(test)]
#[path = "presence_test.rs"]
mod presence_test;

use std::collections::BTreeMap;

use serde::Serialize;

/// A connected player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Player {
    pub name: String,
    pub uuid: String,
    /// Display color, normalized lowercase `#rrggbb`.
    pub color: String,
    /// Country code shown next to the name; may be empty.
    pub country: String,
}

/// Connected players keyed by uuid.
#[derive(Debug, Default)]
pub struct Roster {
    players: BTreeMap<String, Player>,
}

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the roster (ACCEPT).
    pub fn replace_all(&mut self, players: impl IntoIterator<Item = Player>) {
        self.players = players.into_iter().map(|p| (p.uuid.clone(), p)).collect();
    }

    /// Add or refresh a player (JOIN).
    pub fn join(&mut self, player: Player) {
        self.players.insert(player.uuid.clone(), player);
    }

    /// Remove a player (QUIT), returning who left.
    pub fn quit(&mut self, uuid: &str) -> Option<Player> {
        self.players.remove(uuid)
    }

    #[must_use]
    pub fn get(&self, uuid: &str) -> Option<&Player> {
        self.players.get(uuid)
    }

    /// Players sorted by name, then uuid.
    #[must_use]
    pub fn players(&self) -> Vec<&Player> {
        let mut out: Vec<&Player> = self.players.values().collect();
        out.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.uuid.cmp(&b.uuid)));
        out
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn clear(&mut self) {
        self.players.clear();
    }
}
