//! Frame planning: what the next frame draws, in paint order.
//!
//! Planning is pure so paint order, fade levels and glow precedence can be
//! tested without a browser. [`crate::render`] turns a plan into pixels.

#[cfg(test)]
#[path = "plan_test.rs"]
mod plan_test;

use crate::engine::EngineCore;
use crate::geom::{ImageSizes, token_size};
use crate::input::UiState;
use crate::store::{Token, TokenId};
use crate::viewport::Rect;

/// One image draw in scene coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub id: TokenId,
    pub url: String,
    /// Center in scene units.
    pub x: f64,
    pub y: f64,
    /// Rendered size in scene units, before the fade ramp.
    pub width: f64,
    pub height: f64,
    /// Degrees.
    pub rotation: f64,
    pub flip_x: bool,
    /// Opacity and scale together; 1 when not fading.
    pub alpha: f64,
    /// Selection glow color.
    pub glow: Option<String>,
}

impl Sprite {
    fn from_token(token: &Token, sizes: &ImageSizes, alpha: f64, glow: Option<String>) -> Self {
        let (width, height) = token_size(token, sizes);
        Self {
            id: token.id,
            url: token.url.clone(),
            x: token.x,
            y: token.y,
            width,
            height,
            rotation: token.rotation,
            flip_x: token.flip_x,
            alpha,
            glow,
        }
    }
}

/// Everything one frame paints, bottom layer first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FramePlan {
    pub background: Option<Sprite>,
    /// Live tokens in ascending z-order.
    pub foreground: Vec<Sprite>,
    /// Deleted tokens still fading out.
    pub fading_out: Vec<Sprite>,
    pub selection_box: Option<Rect>,
}

/// Build the draw list for the current engine state.
#[must_use]
pub fn plan_frame(core: &EngineCore) -> FramePlan {
    let background = core
        .store
        .background()
        .map(|t| Sprite::from_token(t, &core.sizes, 1.0, None));

    let foreground = core
        .store
        .culling_list()
        .into_iter()
        .map(|t| {
            let alpha = core.fades.spawn_level(t.id).unwrap_or(1.0);
            Sprite::from_token(t, &core.sizes, alpha, glow_for(&core.ui, t.id))
        })
        .collect();

    let fading_out = core
        .fades
        .despawning()
        .into_iter()
        .map(|d| Sprite::from_token(&d.token, &core.sizes, d.level(), None))
        .collect();

    FramePlan { background, foreground, fading_out, selection_box: core.selection_box() }
}

/// Remote selections win over the local one.
fn glow_for(ui: &UiState, id: TokenId) -> Option<String> {
    ui.remote
        .iter()
        .find(|(_, ids)| ids.contains(&id))
        .map(|(color, _)| color.clone())
        .or_else(|| {
            (ui.selection.contains(id) && !ui.local_color.is_empty()).then(|| ui.local_color.clone())
        })
}
