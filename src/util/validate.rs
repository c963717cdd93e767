//! Client-side checks run before any request leaves the browser.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use crate::error::ClientError;

/// Longest accepted game identifier.
pub const MAX_GAME_ID_LEN: usize = 32;

/// Longest accepted player name, in characters.
pub const MAX_PLAYER_NAME_LEN: usize = 24;

/// Accept a game id made of ASCII letters, digits, `-` and `_`.
///
/// # Errors
///
/// Returns [`ClientError::InvalidInput`] for empty, overlong, or otherwise
/// malformed ids.
pub fn validate_game_id(raw: &str) -> Result<&str, ClientError> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(ClientError::InvalidInput("game id is empty".into()));
    }
    if id.len() > MAX_GAME_ID_LEN {
        return Err(ClientError::InvalidInput(format!("game id is longer than {MAX_GAME_ID_LEN} characters")));
    }
    if let Some(bad) = id.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_')) {
        return Err(ClientError::InvalidInput(format!("game id may not contain '{bad}'")));
    }
    Ok(id)
}

/// Trim a player name and reject empty or overlong names.
///
/// # Errors
///
/// Returns [`ClientError::InvalidInput`] when the trimmed name is unusable.
pub fn validate_player_name(raw: &str) -> Result<&str, ClientError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ClientError::InvalidInput("player name is empty".into()));
    }
    if name.chars().count() > MAX_PLAYER_NAME_LEN {
        return Err(ClientError::InvalidInput(format!(
            "player name is longer than {MAX_PLAYER_NAME_LEN} characters"
        )));
    }
    Ok(name)
}
