//! Outbound messages for engine actions.
//!
//! Sends are fire-and-forget: nothing waits for an acknowledgement, and the
//! server's echo is the only confirmation.

#[cfg(test)]
#[path = "emit_test.rs"]
mod emit_test;

use canvas::engine::Action;
use protocol::Outbound;

use crate::net::types::change_from_patch;

/// The wire message for an engine action, if it has one.
#[must_use]
pub fn action_to_outbound(action: &Action) -> Option<Outbound> {
    let msg = match action {
        Action::TokensChanged(patches) => Outbound::Update { changes: patches.iter().map(change_from_patch).collect() },
        Action::SelectionChanged(ids) => Outbound::Select { selected: ids.clone() },
        Action::RangeRequested(r) => Outbound::Range { left: r.left, top: r.top, width: r.width, height: r.height },
        Action::CloneRequested { ids, at } => Outbound::CloneTokens { ids: ids.clone(), posx: at.x, posy: at.y },
        Action::DeleteRequested(ids) => Outbound::Delete { tokens: ids.clone() },
        Action::CreateRequested { urls, at, size } => {
            Outbound::Create { posx: at.x, posy: at.y, size: *size, urls: urls.clone() }
        }
        Action::SetCursor(_) => return None,
    };
    Some(msg)
}

/// Ask the server to roll a die with `sides` faces.
#[must_use]
pub fn roll_request(sides: u32) -> Outbound {
    Outbound::Roll { sides }
}
