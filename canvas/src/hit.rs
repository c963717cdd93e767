//! Hit-testing: which token is under a scene point.
//!
//! Image bounding boxes overlap constantly on a tabletop, so a point only
//! counts as a hit when it lands on an opaque pixel of the token image.
//! Pixel access needs a browser, so the alpha stage is behind [`AlphaProbe`].

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::geom::{ImageSizes, hit_extent, token_size};
use crate::store::{Token, TokenId, TokenStore};
use crate::viewport::Point;

/// Per-pixel opacity check for a single token.
pub trait AlphaProbe {
    /// Whether the token, drawn alone at rendered size `(w, h)` under its own
    /// rotation and flip, has a non-transparent pixel at `local` (scene units
    /// relative to the token center).
    fn is_opaque_at(&self, token: &Token, w: f64, h: f64, local: Point) -> bool;
}

/// Probe that treats the whole hit box as opaque.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxProbe;

impl AlphaProbe for BoxProbe {
    fn is_opaque_at(&self, _token: &Token, _w: f64, _h: f64, _local: Point) -> bool {
        true
    }
}

/// Stage one: the rotation-tolerant square box around the token center.
#[must_use]
pub fn box_contains(token: &Token, w: f64, h: f64, pt: Point) -> bool {
    let half = hit_extent(w, h) * 0.5;
    (pt.x - token.x).abs() <= half && (pt.y - token.y).abs() <= half
}

fn is_hit(token: &Token, sizes: &ImageSizes, probe: &dyn AlphaProbe, pt: Point) -> bool {
    let (w, h) = token_size(token, sizes);
    if !box_contains(token, w, h, pt) {
        return false;
    }
    let local = Point::new(pt.x - token.x, pt.y - token.y);
    probe.is_opaque_at(token, w, h, local)
}

/// Find the topmost token under `pt`.
///
/// Unlocked tokens are scanned from the top down first; locked tokens are
/// only considered when no unlocked token matched. The background never hits.
#[must_use]
pub fn find_topmost_at(store: &TokenStore, sizes: &ImageSizes, probe: &dyn AlphaProbe, pt: Point) -> Option<TokenId> {
    let list = store.culling_list();
    let unlocked = list
        .iter()
        .rev()
        .filter(|t| !t.locked)
        .find(|t| is_hit(t, sizes, probe, pt));
    unlocked
        .or_else(|| {
            list.iter()
                .rev()
                .filter(|t| t.locked)
                .find(|t| is_hit(t, sizes, probe, pt))
        })
        .map(|t| t.id)
}
