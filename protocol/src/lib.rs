//! Shared message model and JSON codec for the tabletop message channel.
//!
//! Every message on the channel is one JSON object carrying an `OPID` string
//! that names the operation. Inbound (server to client) and outbound (client
//! to server) messages are distinct sum types so dispatch can match
//! exhaustively instead of branching on strings.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Server-assigned token identifier.
pub type TokenId = i64;

/// Error returned by [`decode_inbound`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The text is not JSON, or a known operation carried malformed fields.
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The message has no string `OPID` field.
    #[error("message has no OPID")]
    MissingOp,
    /// The `OPID` does not name a known inbound operation.
    #[error("unknown operation: {0}")]
    UnknownOp(String),
}

/// Full token snapshot as sent by the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub id: TokenId,
    pub posx: f64,
    pub posy: f64,
    pub zorder: i64,
    /// Logical size; `-1` marks the scene background.
    pub size: i64,
    #[serde(default)]
    pub rotate: f64,
    #[serde(default)]
    pub flipx: bool,
    #[serde(default)]
    pub locked: bool,
    pub url: String,
}

/// Partial per-token change sent in an outbound `UPDATE`.
///
/// Only present fields are serialized.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenChange {
    pub id: TokenId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posx: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zorder: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flipx: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
}

/// A connected player as announced by the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub uuid: String,
    pub color: String,
    #[serde(default)]
    pub country: String,
}

/// A dice roll result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRecord {
    pub color: String,
    pub sides: u32,
    pub result: u32,
    /// Whether the roll is fresh and should pop up, rather than only land in history.
    #[serde(default)]
    pub recent: bool,
}

/// Messages from the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "OPID", rename_all = "UPPERCASE")]
pub enum Inbound {
    /// Handshake payload: roster, roll history and the full scene.
    Accept {
        #[serde(default)]
        players: HashMap<String, PlayerRecord>,
        #[serde(default)]
        rolls: Vec<RollRecord>,
        #[serde(default)]
        tokens: Vec<TokenRecord>,
    },
    Update { tokens: Vec<TokenRecord> },
    Create { tokens: Vec<TokenRecord> },
    Delete { tokens: Vec<TokenId> },
    Refresh { tokens: Vec<TokenRecord> },
    Join(PlayerRecord),
    Quit { uuid: String },
    Roll(RollRecord),
    Select { color: String, selected: Vec<TokenId> },
}

impl Inbound {
    /// Every `OPID` value [`decode_inbound`] accepts.
    pub const KINDS: [&'static str; 9] =
        ["ACCEPT", "UPDATE", "CREATE", "DELETE", "REFRESH", "JOIN", "QUIT", "ROLL", "SELECT"];

    /// The wire name of this message kind.
    #[must_use]
    pub fn opid(&self) -> &'static str {
        match self {
            Self::Accept { .. } => "ACCEPT",
            Self::Update { .. } => "UPDATE",
            Self::Create { .. } => "CREATE",
            Self::Delete { .. } => "DELETE",
            Self::Refresh { .. } => "REFRESH",
            Self::Join(_) => "JOIN",
            Self::Quit { .. } => "QUIT",
            Self::Roll(_) => "ROLL",
            Self::Select { .. } => "SELECT",
        }
    }
}

/// Messages to the server. None of them are acknowledged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "OPID", rename_all = "UPPERCASE")]
pub enum Outbound {
    Update { changes: Vec<TokenChange> },
    Create { posx: f64, posy: f64, size: i64, urls: Vec<String> },
    Delete { tokens: Vec<TokenId> },
    Select { selected: Vec<TokenId> },
    /// Box-select request; membership comes back as a `SELECT`.
    Range { left: f64, top: f64, width: f64, height: f64 },
    #[serde(rename = "CLONE")]
    CloneTokens { ids: Vec<TokenId>, posx: f64, posy: f64 },
    Roll { sides: u32 },
}

/// Decode one inbound text message.
///
/// # Errors
///
/// Returns [`CodecError::Malformed`] for invalid JSON or fields,
/// [`CodecError::MissingOp`] when `OPID` is absent, and
/// [`CodecError::UnknownOp`] for an unrecognized operation.
pub fn decode_inbound(text: &str) -> Result<Inbound, CodecError> {
    let value: Value = serde_json::from_str(text)?;
    let Some(op) = value.get("OPID").and_then(Value::as_str) else {
        return Err(CodecError::MissingOp);
    };
    if !Inbound::KINDS.contains(&op) {
        return Err(CodecError::UnknownOp(op.to_owned()));
    }
    Ok(serde_json::from_value(value)?)
}

/// Encode one outbound message as JSON text.
#[must_use]
pub fn encode_outbound(msg: &Outbound) -> String {
    match serde_json::to_string(msg) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("outbound encode failed: {e}");
            "{}".to_owned()
        }
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
