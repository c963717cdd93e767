//! Viewport: fits the fixed-aspect scene into the host element and maps
//! between screen pixels and scene units.
//!
//! Zoom is applied about the scene midpoint, then pan. Pan is clamped to
//! half the scene in each axis.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::consts::{MIN_ZOOM, SCENE_HEIGHT, SCENE_WIDTH, ZOOM_STEP};

/// A point in either screen or scene space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Axis-aligned rectangle in scene coordinates with non-negative extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Build a rectangle from two opposite corners in any drag direction.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            left: a.x.min(b.x),
            top: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }
}

/// Pan/zoom view over the fixed-aspect logical scene.
///
/// `pan_x` / `pan_y` are in scene units. `zoom` is applied about the middle of
/// the scene. `scale` converts logical scene units to canvas pixels and is
/// recomputed whenever the canvas is fitted to its container.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
    pub scale: f64,
    /// Optional zoom ceiling. Unset means unbounded.
    pub max_zoom: Option<f64>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0, scale: 1.0, max_zoom: None }
    }
}

impl Viewport {
    /// Fit the canvas inside `avail_w` x `avail_h` pixels at the scene aspect.
    ///
    /// Returns the canvas pixel size and records the new scale.
    pub fn fit_canvas(&mut self, avail_w: f64, avail_h: f64) -> (u32, u32) {
        let scale = (avail_w / SCENE_WIDTH).min(avail_h / SCENE_HEIGHT);
        self.scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
        let w = (SCENE_WIDTH * self.scale).floor().max(1.0);
        let h = (SCENE_HEIGHT * self.scale).floor().max(1.0);
        (w as u32, h as u32)
    }

    /// Canvas size in pixels at the current scale.
    #[must_use]
    pub fn canvas_size(&self) -> (f64, f64) {
        (SCENE_WIDTH * self.scale, SCENE_HEIGHT * self.scale)
    }

    /// One wheel tick in.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    /// One wheel tick out.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    fn set_zoom(&mut self, zoom: f64) {
        let mut z = zoom.max(MIN_ZOOM);
        if let Some(max) = self.max_zoom {
            z = z.min(max.max(MIN_ZOOM));
        }
        self.zoom = z;
    }

    /// Shift the pan by a scene-space delta, keeping the view center within
    /// half a scene dimension of the origin.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        let limit_x = SCENE_WIDTH * 0.5;
        let limit_y = SCENE_HEIGHT * 0.5;
        self.pan_x = (self.pan_x + dx).clamp(-limit_x, limit_x);
        self.pan_y = (self.pan_y + dy).clamp(-limit_y, limit_y);
    }

    /// Pan by a screen-pixel delta (middle-button drag).
    pub fn pan_by_screen(&mut self, dx: f64, dy: f64) {
        let k = self.scale * self.zoom;
        self.pan_by(dx / k, dy / k);
    }

    /// Back to zoom 1 with no pan. Scale is left alone.
    pub fn reset(&mut self) {
        self.pan_x = 0.0;
        self.pan_y = 0.0;
        self.zoom = 1.0;
    }

    /// Convert a canvas-relative pixel position to scene coordinates.
    ///
    /// Undoes the canvas scale, then zoom about the scene midpoint, then pan.
    #[must_use]
    pub fn screen_to_scene(&self, screen: Point) -> Point {
        let cx = SCENE_WIDTH * 0.5;
        let cy = SCENE_HEIGHT * 0.5;
        let lx = screen.x / self.scale;
        let ly = screen.y / self.scale;
        let zx = cx + (lx - cx) / self.zoom;
        let zy = cy + (ly - cy) / self.zoom;
        Point { x: zx - self.pan_x, y: zy - self.pan_y }
    }

    /// Convert a scene point to a canvas-relative pixel position.
    #[must_use]
    pub fn scene_to_screen(&self, scene: Point) -> Point {
        let cx = SCENE_WIDTH * 0.5;
        let cy = SCENE_HEIGHT * 0.5;
        let lx = cx + (scene.x + self.pan_x - cx) * self.zoom;
        let ly = cy + (scene.y + self.pan_y - cy) * self.zoom;
        Point { x: lx * self.scale, y: ly * self.scale }
    }
}
