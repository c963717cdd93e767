//! Scene engine for the tabletop client.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! local mirror of the shared scene: the token store fed by server messages,
//! the pan/zoom viewport, spawn and despawn fades, hit-testing, and the
//! pointer/keyboard state machine that turns input into optimistic edits. The
//! host crate wires DOM events and the websocket to the engine and sends the
//! resulting [`engine::Action`]s to the server.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Browser [`engine::Engine`] and testable [`engine::EngineCore`] |
//! | [`store`] | Token model and the in-memory token store |
//! | [`geom`] | Rendered sizes, rotation math, size clamping |
//! | [`viewport`] | Pan/zoom and screen/scene conversions |
//! | [`input`] | Input event types, selection, and the gesture state machine |
//! | [`hit`] | Two-pass, two-stage hit-testing |
//! | [`anim`] | Spawn and despawn fades |
//! | [`plan`] | Pure per-frame draw list |
//! | [`render`] | Canvas2D painting of a frame plan |
//! | [`images`] | Image cache and pixel-alpha probe |
//! | [`consts`] | Shared numeric constants (scene size, zoom step, size limits) |

pub mod anim;
pub mod consts;
pub mod engine;
pub mod geom;
pub mod hit;
pub mod images;
pub mod input;
pub mod plan;
pub mod render;
pub mod store;
pub mod viewport;
