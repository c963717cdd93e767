//! # tabletop
//!
//! WASM browser client for a shared virtual tabletop. Players log into a
//! game, move image tokens around a common scene, and roll dice; every
//! change travels over one WebSocket and the server echoes the authoritative
//! result back to all clients.
//!
//! Scene state, hit-testing and drawing live in the `canvas` crate; the wire
//! messages live in `protocol`. This crate glues them to the browser.
//!
//! | Module | Role |
//! |---|---|
//! | [`config`] | Client tunables loaded from `localStorage` |
//! | [`error`] | Client error type |
//! | [`net`] | Login/image HTTP calls, the socket, inbound dispatch |
//! | [`pointer`] | Mouse button codes and single-finger touch tracking |
//! | [`render_loop`] | Frame pacing and the `setTimeout` driver |
//! | [`state`] | Session, player roster, roll feed |
//! | [`util`] | Color, cookie, storage and validation helpers |
//! | `app` | DOM event wiring and the JS-facing handle (`browser` only) |

#[cfg(feature = "browser")]
pub mod app;
pub mod config;
pub mod error;
pub mod net;
pub mod pointer;
pub mod render_loop;
pub mod state;
pub mod util;
