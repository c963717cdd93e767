//! Browser image cache and the pixel-alpha hit probe.
//!
//! Images are keyed by URL and never evicted. The probe draws a single token
//! into a scratch canvas under its own rotation and flip, then reads back one
//! pixel to decide whether the pointer landed on something opaque.

use std::collections::HashMap;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::engine::context_2d;
use crate::geom::{ImageSizes, NaturalSize, hit_extent};
use crate::hit::AlphaProbe;
use crate::render::orient;
use crate::store::Token;
use crate::viewport::Point;

/// Append-only image cache plus a scratch canvas for alpha probing.
pub struct ImageCache {
    images: HashMap<String, HtmlImageElement>,
    scratch: HtmlCanvasElement,
    scratch_ctx: CanvasRenderingContext2d,
}

impl ImageCache {
    /// # Errors
    ///
    /// Returns `Err` if the scratch canvas cannot be created.
    pub fn new() -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let scratch = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(JsValue::from)?;
        let scratch_ctx = context_2d(&scratch)?;
        Ok(Self { images: HashMap::new(), scratch, scratch_ctx })
    }

    /// Start loading `url` unless it is already cached.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the image element cannot be created.
    pub fn request(&mut self, url: &str) -> Result<(), JsValue> {
        if self.images.contains_key(url) {
            return Ok(());
        }
        let img = HtmlImageElement::new()?;
        img.set_src(url);
        self.images.insert(url.to_owned(), img);
        Ok(())
    }

    /// The image for `url`, once it has finished loading.
    #[must_use]
    pub fn get(&self, url: &str) -> Option<&HtmlImageElement> {
        self.images
            .get(url)
            .filter(|img| img.complete() && img.natural_width() > 0)
    }

    /// Record natural sizes of newly loaded images.
    pub fn harvest(&self, sizes: &mut ImageSizes) {
        for (url, img) in &self.images {
            if !sizes.contains(url) && img.complete() && img.natural_width() > 0 {
                let natural = NaturalSize::new(f64::from(img.natural_width()), f64::from(img.natural_height()));
                sizes.insert(url, natural);
            }
        }
    }

    #[must_use]
    pub fn probe(&self) -> CanvasProbe<'_> {
        CanvasProbe { cache: self }
    }

    fn sample_alpha(&self, img: &HtmlImageElement, token: &Token, w: f64, h: f64, local: Point) -> Result<u8, JsValue> {
        let extent = hit_extent(w, h).ceil().max(1.0);
        let half = extent * 0.5;
        let px = (half + local.x).floor();
        let py = (half + local.y).floor();
        if px < 0.0 || py < 0.0 || px >= extent || py >= extent {
            return Ok(0);
        }

        // Resizing also clears the scratch canvas.
        self.scratch.set_width(extent as u32);
        self.scratch.set_height(extent as u32);
        let ctx = &self.scratch_ctx;
        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        ctx.translate(half, half)?;
        orient(ctx, token.rotation, token.flip_x)?;
        ctx.draw_image_with_html_image_element_and_dw_and_dh(img, -w * 0.5, -h * 0.5, w, h)?;

        let data = ctx.get_image_data(px, py, 1.0, 1.0)?;
        Ok(data.data().0.get(3).copied().unwrap_or(0))
    }
}

/// [`AlphaProbe`] backed by the image cache's scratch canvas.
pub struct CanvasProbe<'a> {
    cache: &'a ImageCache,
}

impl AlphaProbe for CanvasProbe<'_> {
    fn is_opaque_at(&self, token: &Token, w: f64, h: f64, local: Point) -> bool {
        // Not loaded yet: fall back to the box test alone.
        let Some(img) = self.cache.get(&token.url) else {
            return true;
        };
        match self.cache.sample_alpha(img, token, w, h, local) {
            Ok(alpha) => alpha > 0,
            Err(err) => {
                log::debug!("alpha probe failed for {}: {err:?}", token.url);
                true
            }
        }
    }
}
