//! Rendering: paints a [`FramePlan`] to a 2D context.
//!
//! This module and [`crate::images`] are the only places that touch
//! [`web_sys::CanvasRenderingContext2d`]. Drawing reads the plan and the
//! viewport and never mutates application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::{GLOW_BLUR, SCENE_HEIGHT, SCENE_WIDTH, SELECTION_BOX_FILL};
use crate::images::ImageCache;
use crate::plan::{FramePlan, Sprite};
use crate::viewport::Viewport;

/// Draw the full frame: background, live tokens, fading tokens, selection box.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    plan: &FramePlan,
    viewport: &Viewport,
    images: &ImageCache,
) -> Result<(), JsValue> {
    let (canvas_w, canvas_h) = viewport.canvas_size();

    // Layer 1: clear and set up the view transform.
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, canvas_w, canvas_h);
    apply_view(ctx, viewport)?;

    // Layer 2: background.
    if let Some(bg) = &plan.background {
        draw_sprite(ctx, bg, images)?;
    }

    // Layer 3: live tokens in z-order (bottom first).
    for sprite in &plan.foreground {
        draw_sprite(ctx, sprite, images)?;
    }

    // Layer 4: deleted tokens still fading out.
    for sprite in &plan.fading_out {
        draw_sprite(ctx, sprite, images)?;
    }

    // Layer 5: box-select preview.
    if let Some(r) = plan.selection_box {
        ctx.set_fill_style_str(SELECTION_BOX_FILL);
        ctx.fill_rect(r.left, r.top, r.width, r.height);
    }

    Ok(())
}

/// Canvas scale, then zoom about the scene midpoint, then pan.
fn apply_view(ctx: &CanvasRenderingContext2d, viewport: &Viewport) -> Result<(), JsValue> {
    let cx = SCENE_WIDTH * 0.5;
    let cy = SCENE_HEIGHT * 0.5;
    ctx.scale(viewport.scale, viewport.scale)?;
    ctx.translate(cx, cy)?;
    ctx.scale(viewport.zoom, viewport.zoom)?;
    ctx.translate(-cx, -cy)?;
    ctx.translate(viewport.pan_x, viewport.pan_y)?;
    Ok(())
}

/// Rotate then mirror about the current origin.
pub(crate) fn orient(ctx: &CanvasRenderingContext2d, rotation_deg: f64, flip_x: bool) -> Result<(), JsValue> {
    ctx.rotate(rotation_deg.to_radians())?;
    if flip_x {
        ctx.scale(-1.0, 1.0)?;
    }
    Ok(())
}

fn draw_sprite(ctx: &CanvasRenderingContext2d, sprite: &Sprite, images: &ImageCache) -> Result<(), JsValue> {
    if sprite.alpha <= 0.0 {
        return Ok(());
    }
    let Some(img) = images.get(&sprite.url) else {
        return Ok(());
    };

    ctx.save();
    ctx.translate(sprite.x, sprite.y)?;
    if sprite.alpha < 1.0 {
        ctx.set_global_alpha(sprite.alpha);
        ctx.scale(sprite.alpha, sprite.alpha)?;
    }
    orient(ctx, sprite.rotation, sprite.flip_x)?;
    if let Some(color) = &sprite.glow {
        ctx.set_shadow_color(color);
        ctx.set_shadow_blur(GLOW_BLUR);
    }
    ctx.draw_image_with_html_image_element_and_dw_and_dh(
        img,
        -sprite.width * 0.5,
        -sprite.height * 0.5,
        sprite.width,
        sprite.height,
    )?;
    ctx.restore();
    Ok(())
}
