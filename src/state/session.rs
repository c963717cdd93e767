//! The session context: everything the client knows about the game it is in.
//!
//! One `Session` is created at startup and handed to the protocol handler,
//! the input wiring and the render loop. There is no other shared state.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use canvas::engine::EngineCore;

use crate::config::ClientConfig;
use crate::state::presence::Roster;
use crate::state::rolls::RollFeed;
use crate::util::color::{DEFAULT_PLAYER_COLOR, normalize_hex_color};

/// State of the message channel as seen by the UI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// At the login step; no channel.
    #[default]
    LoggedOut,
    /// Channel is opening.
    Connecting,
    /// Channel is open and messages flow.
    Connected,
}

/// Who the local player logged in as.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalPlayer {
    pub game: String,
    pub name: String,
    /// Normalized lowercase `#rrggbb`.
    pub color: String,
}

/// The single client context.
pub struct Session {
    pub config: ClientConfig,
    pub engine: EngineCore,
    pub roster: Roster,
    pub rolls: RollFeed,
    pub local: Option<LocalPlayer>,
    pub connection: ConnectionStatus,
    /// Blocking notice for the login step (e.g. why the connection dropped).
    pub notice: Option<String>,
    /// Bumped on every login; a channel only owns the session while its epoch is current.
    epoch: u64,
}

impl Session {
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let mut engine = EngineCore::new();
        config.apply(&mut engine);
        let rolls = RollFeed::new(config.roll_popup_ms);
        Self {
            config,
            engine,
            roster: Roster::new(),
            rolls,
            local: None,
            connection: ConnectionStatus::LoggedOut,
            notice: None,
            epoch: 0,
        }
    }

    /// Record the accepted login and start connecting. Returns the epoch the
    /// new channel must present when it ends.
    pub fn begin_login(&mut self, game: &str, name: &str, color: &str) -> u64 {
        let color = normalize_hex_color(color, DEFAULT_PLAYER_COLOR);
        self.engine.set_local_color(&color);
        self.local = Some(LocalPlayer { game: game.to_owned(), name: name.to_owned(), color });
        self.connection = ConnectionStatus::Connecting;
        self.notice = None;
        self.epoch += 1;
        self.epoch
    }

    /// Epoch of the current login.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether a new login may start.
    #[must_use]
    pub fn can_login(&self) -> bool {
        self.connection == ConnectionStatus::LoggedOut
    }

    /// The channel opened at `epoch` has closed. Resets to the login step only
    /// when that channel still owns the session; returns whether it did.
    pub fn connection_ended(&mut self, epoch: u64, notice: impl Into<String>) -> bool {
        if epoch != self.epoch || self.connection == ConnectionStatus::LoggedOut {
            return false;
        }
        self.reset_to_login(notice);
        true
    }

    pub fn mark_connected(&mut self) {
        if self.connection == ConnectionStatus::Connecting {
            self.connection = ConnectionStatus::Connected;
        }
    }

    /// Discard all game state and return to the login step.
    pub fn reset_to_login(&mut self, notice: impl Into<String>) {
        self.engine = EngineCore::new();
        self.config.apply(&mut self.engine);
        self.roster.clear();
        self.rolls.clear();
        self.local = None;
        self.connection = ConnectionStatus::LoggedOut;
        self.notice = Some(notice.into());
    }

    /// Take the pending notice, leaving none.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// The local player's color, if logged in.
    #[must_use]
    pub fn local_color(&self) -> Option<&str> {
        self.local.as_ref().map(|p| p.color.as_str())
    }
}
