//! Networking: wire conversions, inbound dispatch, outbound emit, HTTP
//! collaborators and the websocket channel.

pub mod api;
pub mod channel;
pub mod dispatch;
pub mod emit;
pub mod types;
