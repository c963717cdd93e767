//! Token geometry: rendered sizes, rotation math, and size clamping.
//!
//! Everything here is a pure function of its inputs. Natural image sizes are
//! harvested by the browser surface as images finish loading and handed to
//! the engine through [`ImageSizes`].

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use std::collections::HashMap;

use crate::consts::{MAX_TOKEN_SIZE, MIN_TOKEN_SIZE, SCENE_HEIGHT, SCENE_WIDTH};
use crate::store::Token;
use crate::viewport::Point;

/// Natural pixel dimensions of a loaded image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NaturalSize {
    pub width: f64,
    pub height: f64,
}

impl NaturalSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_usable(self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Natural image sizes keyed by image URL. Append-only.
#[derive(Debug, Clone, Default)]
pub struct ImageSizes {
    sizes: HashMap<String, NaturalSize>,
}

impl ImageSizes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the natural size for `url`. The first recorded size wins.
    pub fn insert(&mut self, url: &str, size: NaturalSize) {
        if size.is_usable() && !self.sizes.contains_key(url) {
            self.sizes.insert(url.to_owned(), size);
        }
    }

    #[must_use]
    pub fn get(&self, url: &str) -> Option<NaturalSize> {
        self.sizes.get(url).copied()
    }

    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.sizes.contains_key(url)
    }
}

/// Rendered `(width, height)` of a token of logical `size`.
///
/// The longer side equals `size`; the shorter side keeps the image aspect
/// ratio. Without a usable natural size the token renders as a square.
#[must_use]
pub fn rendered_size(size: i64, natural: Option<NaturalSize>) -> (f64, f64) {
    let side = size as f64;
    match natural.filter(|n| n.is_usable()) {
        Some(n) if n.width >= n.height => (side, side * n.height / n.width),
        Some(n) => (side * n.width / n.height, side),
        None => (side, side),
    }
}

/// Rendered size of the background: fitted inside the scene with its aspect kept.
#[must_use]
pub fn background_size(natural: Option<NaturalSize>) -> (f64, f64) {
    let Some(n) = natural.filter(|n| n.is_usable()) else {
        return (SCENE_WIDTH, SCENE_HEIGHT);
    };
    let fit = (SCENE_WIDTH / n.width).min(SCENE_HEIGHT / n.height);
    (n.width * fit, n.height * fit)
}

/// Rendered size of any token, background included.
#[must_use]
pub fn token_size(token: &Token, sizes: &ImageSizes) -> (f64, f64) {
    let natural = sizes.get(&token.url);
    if token.is_background() {
        background_size(natural)
    } else {
        rendered_size(token.size, natural)
    }
}

/// Side of the rotation-tolerant hit box for a token of rendered size `(w, h)`.
#[must_use]
pub fn hit_extent(w: f64, h: f64) -> f64 {
    w.max(h)
}

/// Fold a rotation back to zero once its magnitude reaches a full turn.
#[must_use]
pub fn normalize_rotation(deg: f64) -> f64 {
    if !deg.is_finite() || deg.abs() >= 360.0 {
        0.0
    } else {
        deg
    }
}

/// Absolute rotation that points a token at `pointer` from `center`.
///
/// Measured against straight up via the arc-cosine of the normalized dot
/// product; negative when the pointer is left of the token. Returns `None`
/// when the pointer sits exactly on the center.
#[must_use]
pub fn pointer_rotation(center: Point, pointer: Point) -> Option<f64> {
    let vx = pointer.x - center.x;
    let vy = pointer.y - center.y;
    let len = vx.hypot(vy);
    if len == 0.0 {
        return None;
    }
    // Up is (0, -1) in scene coordinates.
    let cos = (-vy / len).clamp(-1.0, 1.0);
    let angle = cos.acos().to_degrees();
    let signed = if vx < 0.0 { -angle } else { angle };
    Some(normalize_rotation(signed))
}

/// Scale `size` by `factor`, clamped to the allowed token size range.
#[must_use]
pub fn scaled_size(size: i64, factor: f64) -> i64 {
    let scaled = (size as f64 * factor).round();
    if !scaled.is_finite() {
        return if factor > 1.0 { MAX_TOKEN_SIZE } else { MIN_TOKEN_SIZE };
    }
    (scaled.clamp(MIN_TOKEN_SIZE as f64, MAX_TOKEN_SIZE as f64)) as i64
}
