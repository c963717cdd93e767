//! Client configuration.
//!
//! Defaults cover normal play. A JSON object stored in `localStorage` under
//! [`CONFIG_STORAGE_KEY`] overrides individual fields.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use canvas::consts::MIN_ZOOM;
use canvas::engine::EngineCore;

use crate::util::storage;

/// `localStorage` key holding a partial [`ClientConfig`] as JSON.
pub const CONFIG_STORAGE_KEY: &str = "tabletop.config";

/// Highest frame rate the render loop will target.
const MAX_FPS: u32 = 240;

/// Runtime settings for the client shell and scene engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Render loop target rate.
    pub target_fps: u32,
    /// Whether the wheel zooms the view.
    pub zoom_enabled: bool,
    /// Optional zoom ceiling. Unset means unbounded.
    pub max_zoom: Option<f64>,
    /// How long a fresh roll stays in the popup, in milliseconds.
    pub roll_popup_ms: f64,
    /// Path of the websocket endpoint on the page's host.
    pub socket_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            zoom_enabled: true,
            max_zoom: None,
            roll_popup_ms: 4000.0,
            socket_path: "/ws".to_owned(),
        }
    }
}

impl ClientConfig {
    /// Load overrides from `localStorage`, falling back to defaults.
    #[must_use]
    pub fn load() -> Self {
        storage::load_item(CONFIG_STORAGE_KEY).map_or_else(Self::default, |raw| Self::from_json(&raw))
    }

    /// Parse a JSON override object. Unknown fields are ignored.
    #[must_use]
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<Self>(raw) {
            Ok(config) => config.sanitized(),
            Err(err) => {
                log::warn!("ignoring unreadable client config: {err}");
                Self::default()
            }
        }
    }

    /// Clamp values into usable ranges.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.target_fps = self.target_fps.clamp(1, MAX_FPS);
        self.max_zoom = self.max_zoom.filter(|z| z.is_finite() && *z >= MIN_ZOOM);
        if !self.roll_popup_ms.is_finite() || self.roll_popup_ms < 0.0 {
            self.roll_popup_ms = Self::default().roll_popup_ms;
        }
        if !self.socket_path.starts_with('/') {
            self.socket_path.insert(0, '/');
        }
        self
    }

    /// Milliseconds between frame starts at the target rate.
    #[must_use]
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / f64::from(self.target_fps.max(1))
    }

    /// Push engine-facing settings into a scene engine.
    pub fn apply(&self, engine: &mut EngineCore) {
        engine.zoom_enabled = self.zoom_enabled;
        engine.viewport.max_zoom = self.max_zoom;
    }
}
