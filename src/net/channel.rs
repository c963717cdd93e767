//! Websocket message channel.
//!
//! One connection per login. Outbound messages go through an unbounded
//! queue drained by a send task; inbound text frames are applied to the
//! session as they arrive. There is no reconnect: when the socket closes the
//! session is reset to the login step with a notice, unless a newer login
//! already replaced this channel.

#[cfg(test)]
#[path = "channel_test.rs"]
mod channel_test;

#[cfg(feature = "browser")]
use std::cell::RefCell;
#[cfg(feature = "browser")]
use std::rc::Rc;

#[cfg(feature = "browser")]
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
#[cfg(feature = "browser")]
use futures::{SinkExt, StreamExt};
#[cfg(feature = "browser")]
use gloo_net::websocket::Message;
#[cfg(feature = "browser")]
use gloo_net::websocket::futures::WebSocket;
#[cfg(feature = "browser")]
use protocol::{Outbound, encode_outbound};

#[cfg(feature = "browser")]
use crate::error::ClientError;
#[cfg(feature = "browser")]
use crate::net::dispatch::handle_text;
#[cfg(feature = "browser")]
use crate::state::session::Session;

/// Notice shown at the login step after the socket drops.
pub const CONNECTION_LOST: &str = "The connection to the game server was lost. Please log in again.";

/// Handle for sending messages on the open channel.
#[cfg(feature = "browser")]
#[derive(Clone)]
pub struct Channel {
    tx: UnboundedSender<String>,
}

#[cfg(feature = "browser")]
impl Channel {
    /// Queue a message. Returns `false` once the channel has closed.
    pub fn send(&self, msg: &Outbound) -> bool {
        let text = encode_outbound(msg);
        log::debug!("outbound {text}");
        self.tx.unbounded_send(text).is_ok()
    }
}

/// Build the websocket URL for `game` from the page location.
#[must_use]
pub fn socket_url(page_protocol: &str, host: &str, path: &str, game: &str) -> String {
    let scheme = if page_protocol == "https:" { "wss" } else { "ws" };
    format!("{scheme}://{host}{path}?game={game}")
}

/// Open the channel for the logged-in player and start its I/O task.
///
/// # Errors
///
/// Returns [`ClientError::Transport`] if the socket cannot be opened.
#[cfg(feature = "browser")]
pub fn connect(session: Rc<RefCell<Session>>) -> Result<Channel, ClientError> {
    let (url, epoch) = {
        let s = session.borrow();
        let game = s.local.as_ref().map(|p| p.game.clone()).unwrap_or_default();
        let location = web_sys::window().map(|w| w.location());
        let protocol = location.as_ref().and_then(|l| l.protocol().ok()).unwrap_or_default();
        let host = location.as_ref().and_then(|l| l.host().ok()).unwrap_or_default();
        (socket_url(&protocol, &host, &s.config.socket_path, &game), s.epoch())
    };

    let ws = WebSocket::open(&url).map_err(|e| ClientError::Transport(e.to_string()))?;
    log::info!("connecting to {url}");
    let (tx, rx) = mpsc::unbounded::<String>();
    wasm_bindgen_futures::spawn_local(run(ws, rx, session, epoch));
    Ok(Channel { tx })
}

#[cfg(feature = "browser")]
async fn run(ws: WebSocket, mut rx: UnboundedReceiver<String>, session: Rc<RefCell<Session>>, epoch: u64) {
    let (mut ws_write, mut ws_read) = ws.split();

    let send_task = async {
        while let Some(text) = rx.next().await {
            if ws_write.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    };

    let recv_task = async {
        while let Some(msg) = ws_read.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    let mut session = session.borrow_mut();
                    if session.epoch() != epoch {
                        break;
                    }
                    handle_text(&mut session, &text, js_sys::Date::now());
                }
                Ok(Message::Bytes(bytes)) => log::debug!("ignoring {} byte binary frame", bytes.len()),
                Err(err) => {
                    log::warn!("websocket closed: {err}");
                    break;
                }
            }
        }
    };

    futures::future::select(Box::pin(send_task), Box::pin(recv_task)).await;

    if session.borrow_mut().connection_ended(epoch, CONNECTION_LOST) {
        log::info!("disconnected; returning to login");
    } else {
        log::debug!("superseded channel closed");
    }
}
