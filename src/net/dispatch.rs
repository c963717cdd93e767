//! Inbound message handling.
//!
//! Every server message funnels through [`apply_inbound`], which matches the
//! decoded [`Inbound`] exhaustively and mutates the session. Token state is
//! always handed to the engine's authoritative entry points, so whatever the
//! server says last wins over local optimistic edits.

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod dispatch_test;

use protocol::{CodecError, Inbound, decode_inbound};

use crate::net::types::{player_from_record, roll_from_record, tokens_from_records};
use crate::state::session::Session;
use crate::util::color::{DEFAULT_PLAYER_COLOR, normalize_hex_color};

/// Apply one decoded message. `now_ms` stamps fresh rolls for the popup.
pub fn apply_inbound(session: &mut Session, msg: Inbound, now_ms: f64) {
    log::debug!("inbound {}", msg.opid());
    match msg {
        Inbound::Accept { players, rolls, tokens } => {
            session.roster.replace_all(players.into_values().map(player_from_record));
            session.rolls.replace_history(rolls.into_iter().map(roll_from_record).collect());
            session.engine.apply_refresh(tokens_from_records(tokens));
            session.mark_connected();
        }
        Inbound::Update { tokens } => session.engine.apply_snapshot(tokens_from_records(tokens)),
        Inbound::Create { tokens } => session.engine.apply_create(tokens_from_records(tokens)),
        Inbound::Delete { tokens } => session.engine.apply_delete(&tokens),
        Inbound::Refresh { tokens } => session.engine.apply_refresh(tokens_from_records(tokens)),
        Inbound::Join(record) => session.roster.join(player_from_record(record)),
        Inbound::Quit { uuid } => {
            if let Some(player) = session.roster.quit(&uuid) {
                session.engine.clear_player_selection(&player.color);
            }
        }
        Inbound::Roll(record) => session.rolls.push(roll_from_record(record), now_ms),
        Inbound::Select { color, selected } => {
            let color = normalize_hex_color(&color, DEFAULT_PLAYER_COLOR);
            session.engine.apply_select(&color, &selected);
        }
    }
}

/// Decode and apply one text frame. Unknown or malformed messages are
/// logged and leave the session untouched.
pub fn handle_text(session: &mut Session, text: &str, now_ms: f64) {
    match decode_inbound(text) {
        Ok(msg) => apply_inbound(session, msg, now_ms),
        Err(CodecError::UnknownOp(op)) => log::warn!("ignoring unknown operation {op}"),
        Err(err) => log::warn!("dropping inbound message: {err}"),
    }
}
