use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::anim::Fades;
use crate::consts::{DEFAULT_TOKEN_SIZE, RESIZE_REFERENCE_FRACTION, ROTATE_STEP_DEG};
use crate::geom::{ImageSizes, normalize_rotation, pointer_rotation, scaled_size};
use crate::hit::{AlphaProbe, find_topmost_at};
use crate::images::{CanvasProbe, ImageCache};
use crate::input::{Button, InputState, Key, Modifiers, Tool, UiState, WheelDelta};
use crate::plan::plan_frame;
use crate::render;
use crate::store::{Token, TokenId, TokenPatch, TokenStore};
use crate::viewport::{Point, Rect, Viewport};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
///
/// Token edits have already been applied locally when they are returned;
/// requests (range, clone, delete, create) have not and wait for the server.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    TokensChanged(Vec<TokenPatch>),
    SelectionChanged(Vec<TokenId>),
    RangeRequested(Rect),
    CloneRequested { ids: Vec<TokenId>, at: Point },
    DeleteRequested(Vec<TokenId>),
    CreateRequested { urls: Vec<String>, at: Point, size: i64 },
    SetCursor(&'static str),
}

/// Core engine state: all logic that does not touch the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub store: TokenStore,
    pub sizes: ImageSizes,
    pub viewport: Viewport,
    pub fades: Fades,
    pub ui: UiState,
    pub input: InputState,
    /// Whether the wheel zooms the view.
    pub zoom_enabled: bool,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            store: TokenStore::new(),
            sizes: ImageSizes::new(),
            viewport: Viewport::default(),
            fades: Fades::new(),
            ui: UiState::default(),
            input: InputState::default(),
            zoom_enabled: true,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Authoritative inputs ---

    /// Apply server token snapshots (UPDATE). Unknown ids are created.
    pub fn apply_snapshot(&mut self, tokens: Vec<Token>) {
        for token in tokens {
            self.upsert_authoritative(token);
        }
    }

    /// Apply server-created tokens and start their spawn fade.
    pub fn apply_create(&mut self, tokens: Vec<Token>) {
        for token in tokens {
            if !token.is_background() {
                self.fades.spawn(token.id);
            }
            self.upsert_authoritative(token);
        }
    }

    /// Remove tokens, keeping their last snapshot alive for the despawn fade.
    pub fn apply_delete(&mut self, ids: &[TokenId]) {
        for &id in ids {
            if let Some(token) = self.store.remove(id) {
                self.fades.despawn(token);
            }
            self.forget_selected(id);
        }
    }

    /// Replace the whole scene. Selections, fades and the view start over.
    pub fn apply_refresh(&mut self, tokens: Vec<Token>) {
        self.store.replace_all(tokens);
        self.fades.clear();
        self.ui.selection.clear();
        self.ui.remote.clear();
        self.viewport.reset();
        self.input = InputState::Idle;
    }

    /// Record a player's selection. A matching local color also replaces the
    /// local selection.
    pub fn apply_select(&mut self, color: &str, ids: &[TokenId]) {
        if !self.ui.local_color.is_empty() && color.eq_ignore_ascii_case(&self.ui.local_color) {
            self.ui.selection.set_all(ids.iter().copied());
            return;
        }
        let key = color.to_ascii_lowercase();
        if ids.is_empty() {
            self.ui.remote.remove(&key);
        } else {
            self.ui.remote.insert(key, ids.iter().copied().collect());
        }
    }

    /// Drop a remote player's selection highlight.
    pub fn clear_player_selection(&mut self, color: &str) {
        self.ui.remote.remove(&color.to_ascii_lowercase());
    }

    fn upsert_authoritative(&mut self, token: Token) {
        self.fades.cancel_despawn(token.id);
        if let Some(evicted) = self.store.upsert(token) {
            self.forget_selected(evicted.id);
        }
    }

    fn forget_selected(&mut self, id: TokenId) {
        self.ui.selection.remove(id);
        for ids in self.ui.remote.values_mut() {
            ids.remove(&id);
        }
        self.ui.remote.retain(|_, ids| !ids.is_empty());
    }

    // --- Settings ---

    /// Set the drag tool used for primary-button drags on a token.
    pub fn set_tool(&mut self, tool: Tool) {
        self.ui.tool = tool;
    }

    /// Set the local player's color; used for the local selection glow and
    /// to recognize our own SELECT echoes.
    pub fn set_local_color(&mut self, color: &str) {
        self.ui.local_color = color.to_owned();
    }

    // --- Pointer input ---

    /// Handle pointer-down at a canvas-relative pixel position.
    pub fn on_pointer_down(
        &mut self,
        screen_pt: Point,
        button: Button,
        modifiers: Modifiers,
        probe: &dyn AlphaProbe,
    ) -> Vec<Action> {
        let pt = self.viewport.screen_to_scene(screen_pt);
        self.ui.pointer = pt;

        match button {
            Button::Middle => {
                self.input = InputState::Panning { last_screen: screen_pt };
                vec![Action::SetCursor("grabbing")]
            }
            Button::Secondary => {
                let hit = find_topmost_at(&self.store, &self.sizes, probe, pt);
                match hit {
                    Some(id) if self.ui.selection.contains(id) => self.reset_selection(),
                    _ => Vec::new(),
                }
            }
            Button::Primary => {
                let hit = find_topmost_at(&self.store, &self.sizes, probe, pt);
                match hit {
                    Some(id) => self.press_token(id, pt, modifiers),
                    None => self.press_empty(pt),
                }
            }
        }
    }

    fn press_token(&mut self, id: TokenId, pt: Point, modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        if modifiers.toggle() {
            self.ui.selection.toggle(id);
            actions.push(Action::SelectionChanged(self.ui.selection.ids()));
            if !self.ui.selection.contains(id) {
                self.input = InputState::Idle;
                return actions;
            }
        } else if self.ui.selection.contains(id) {
            self.ui.selection.set_primary(id);
        } else {
            self.ui.selection.select_only(id);
            actions.push(Action::SelectionChanged(self.ui.selection.ids()));
        }

        let Some(primary) = self.ui.selection.primary().and_then(|p| self.store.get(p)) else {
            self.input = InputState::Idle;
            return actions;
        };
        let center = Point::new(primary.x, primary.y);

        self.input = match modifiers.drag_tool(self.ui.tool) {
            Tool::Move => {
                let offsets = self
                    .movable_selection()
                    .map(|t| (t.id, Point::new(t.x - center.x, t.y - center.y)))
                    .collect();
                InputState::Grabbed { grab_offset: Point::new(center.x - pt.x, center.y - pt.y), offsets }
            }
            Tool::Resize => {
                let base = if primary.size > 0 { primary.size } else { DEFAULT_TOKEN_SIZE };
                let originals = self.movable_selection().map(|t| (t.id, t.size)).collect();
                InputState::Resizing { center, reference: base as f64 * RESIZE_REFERENCE_FRACTION, originals }
            }
            Tool::Rotate => {
                let ids = self.movable_selection().map(|t| t.id).collect();
                InputState::Rotating { center, ids }
            }
        };
        actions
    }

    fn press_empty(&mut self, pt: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        if !self.ui.selection.is_empty() {
            self.ui.selection.clear();
            actions.push(Action::SelectionChanged(Vec::new()));
        }
        self.input = InputState::BoxSelecting { anchor: pt, current: pt };
        actions
    }

    /// Handle pointer movement; continues whichever gesture is in progress.
    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        let pt = self.viewport.screen_to_scene(screen_pt);
        self.ui.pointer = pt;

        let patches = match &mut self.input {
            InputState::Idle => return Vec::new(),
            InputState::BoxSelecting { current, .. } => {
                *current = pt;
                return Vec::new();
            }
            InputState::Panning { last_screen } => {
                let (dx, dy) = (screen_pt.x - last_screen.x, screen_pt.y - last_screen.y);
                *last_screen = screen_pt;
                self.viewport.pan_by_screen(dx, dy);
                return Vec::new();
            }
            InputState::Grabbed { grab_offset, offsets } => {
                let px = pt.x + grab_offset.x;
                let py = pt.y + grab_offset.y;
                offsets
                    .iter()
                    .map(|(id, off)| TokenPatch { x: Some(px + off.x), y: Some(py + off.y), ..TokenPatch::new(*id) })
                    .collect::<Vec<_>>()
            }
            InputState::Resizing { center, reference, originals } => {
                let factor = center.distance_to(pt) / *reference;
                originals
                    .iter()
                    .map(|(id, size)| TokenPatch { size: Some(scaled_size(*size, factor)), ..TokenPatch::new(*id) })
                    .collect()
            }
            InputState::Rotating { center, ids } => {
                let Some(angle) = pointer_rotation(*center, pt) else {
                    return Vec::new();
                };
                ids.iter()
                    .map(|id| TokenPatch { rotation: Some(angle), ..TokenPatch::new(*id) })
                    .collect()
            }
        };
        self.commit(patches)
    }

    /// Handle pointer-up; finishes the current gesture.
    pub fn on_pointer_up(&mut self, screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let pt = self.viewport.screen_to_scene(screen_pt);
        self.ui.pointer = pt;

        match std::mem::take(&mut self.input) {
            InputState::BoxSelecting { anchor, .. } => vec![Action::RangeRequested(Rect::from_corners(anchor, pt))],
            InputState::Panning { .. } => vec![Action::SetCursor("default")],
            _ => Vec::new(),
        }
    }

    /// Wheel zooms the view one step per event while no gesture is active.
    pub fn on_wheel(&mut self, _screen_pt: Point, delta: WheelDelta, _modifiers: Modifiers) -> Vec<Action> {
        if !self.zoom_enabled || !matches!(self.input, InputState::Idle) {
            return Vec::new();
        }
        if delta.dy < 0.0 {
            self.viewport.zoom_in();
        } else if delta.dy > 0.0 {
            self.viewport.zoom_out();
        }
        Vec::new()
    }

    // --- Keyboard ---

    /// Dispatch a keyboard shortcut.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        let name = key.0.to_ascii_lowercase();
        if modifiers.toggle() {
            return match name.as_str() {
                "a" => self.select_all(),
                "c" => {
                    self.copy_selection();
                    Vec::new()
                }
                "v" => self.paste_at_pointer(),
                _ => Vec::new(),
            };
        }
        match name.as_str() {
            "delete" | "backspace" => self.delete_selection(),
            "f" => self.flip_selection(),
            "l" => self.toggle_lock_selection(),
            "pagedown" => self.send_to_back(),
            "pageup" => self.bring_to_front(),
            "q" => self.rotate_selection_by(-ROTATE_STEP_DEG),
            "e" => self.rotate_selection_by(ROTATE_STEP_DEG),
            "escape" => self.clear_selection(),
            _ => Vec::new(),
        }
    }

    // --- Selection commands ---

    /// Select every token except the background.
    pub fn select_all(&mut self) -> Vec<Action> {
        self.ui.selection.set_all(self.store.foreground_ids());
        vec![Action::SelectionChanged(self.ui.selection.ids())]
    }

    pub fn clear_selection(&mut self) -> Vec<Action> {
        if self.ui.selection.is_empty() {
            return Vec::new();
        }
        self.ui.selection.clear();
        vec![Action::SelectionChanged(Vec::new())]
    }

    /// Snapshot the current selection for a later paste.
    pub fn copy_selection(&mut self) {
        self.ui.clipboard = self.ui.selection.ids();
    }

    /// Ask the server to clone the copied tokens at the last pointer position.
    pub fn paste_at_pointer(&mut self) -> Vec<Action> {
        if self.ui.clipboard.is_empty() {
            return Vec::new();
        }
        vec![Action::CloneRequested { ids: self.ui.clipboard.clone(), at: self.ui.pointer }]
    }

    /// Ask the server to delete the selection. Nothing is removed locally
    /// until the DELETE broadcast arrives.
    pub fn delete_selection(&mut self) -> Vec<Action> {
        let ids = self.ui.selection.ids();
        if ids.is_empty() {
            return Vec::new();
        }
        vec![Action::DeleteRequested(ids)]
    }

    // --- Token commands ---

    pub fn flip_selection(&mut self) -> Vec<Action> {
        let patches = self
            .movable_selection()
            .map(|t| TokenPatch { flip_x: Some(!t.flip_x), ..TokenPatch::new(t.id) })
            .collect();
        self.commit(patches)
    }

    /// Toggle the lock on every selected token, locked ones included.
    pub fn toggle_lock_selection(&mut self) -> Vec<Action> {
        let patches = self
            .selected_tokens()
            .map(|t| TokenPatch { locked: Some(!t.locked), ..TokenPatch::new(t.id) })
            .collect();
        self.commit(patches)
    }

    /// Move the selection below every other token, keeping its relative order.
    pub fn send_to_back(&mut self) -> Vec<Action> {
        let ids = self.movable_in_z_order();
        let (z_min, _) = self.store.z_bounds();
        let base = z_min - ids.len() as i64;
        self.reorder(&ids, base)
    }

    /// Move the selection above every other token, keeping its relative order.
    pub fn bring_to_front(&mut self) -> Vec<Action> {
        let ids = self.movable_in_z_order();
        let (_, z_max) = self.store.z_bounds();
        self.reorder(&ids, z_max + 1)
    }

    /// Rotate every unlocked selected token by `delta` degrees.
    pub fn rotate_selection_by(&mut self, delta: f64) -> Vec<Action> {
        let patches = self
            .movable_selection()
            .map(|t| TokenPatch { rotation: Some(normalize_rotation(t.rotation + delta)), ..TokenPatch::new(t.id) })
            .collect();
        self.commit(patches)
    }

    /// Reset rotation and size of every unlocked selected token.
    pub fn reset_selection(&mut self) -> Vec<Action> {
        let patches = self
            .movable_selection()
            .map(|t| TokenPatch { rotation: Some(0.0), size: Some(DEFAULT_TOKEN_SIZE), ..TokenPatch::new(t.id) })
            .collect();
        self.commit(patches)
    }

    /// Ask the server to create tokens from image URLs at a screen position.
    pub fn request_create(&mut self, urls: Vec<String>, screen_pt: Point) -> Vec<Action> {
        if urls.is_empty() {
            return Vec::new();
        }
        let at = self.viewport.screen_to_scene(screen_pt);
        vec![Action::CreateRequested { urls, at, size: DEFAULT_TOKEN_SIZE }]
    }

    fn reorder(&mut self, ids: &[TokenId], base: i64) -> Vec<Action> {
        let patches = ids
            .iter()
            .zip(base..)
            .map(|(id, z)| TokenPatch { zorder: Some(z), ..TokenPatch::new(*id) })
            .collect();
        self.commit(patches)
    }

    fn movable_in_z_order(&self) -> Vec<TokenId> {
        let mut tokens: Vec<&Token> = self.movable_selection().collect();
        tokens.sort_by_key(|t| t.zorder);
        tokens.into_iter().map(|t| t.id).collect()
    }

    fn selected_tokens(&self) -> impl Iterator<Item = &Token> {
        self.ui
            .selection
            .ids()
            .into_iter()
            .filter_map(|id| self.store.get(id))
            .filter(|t| !t.is_background())
    }

    fn movable_selection(&self) -> impl Iterator<Item = &Token> {
        self.selected_tokens().filter(|t| !t.locked)
    }

    /// Apply patches optimistically and report them for the wire.
    fn commit(&mut self, patches: Vec<TokenPatch>) -> Vec<Action> {
        let applied: Vec<TokenPatch> = patches
            .into_iter()
            .filter(|p| {
                let Some(token) = self.store.get(p.id) else {
                    return false;
                };
                if token.locked && p.locked.is_none() {
                    return false;
                }
                let next = p.applied_to(token);
                self.store.upsert(next);
                true
            })
            .collect();
        if applied.is_empty() {
            return Vec::new();
        }
        vec![Action::TokensChanged(applied)]
    }

    // --- Queries ---

    /// Live box-select rectangle in scene coordinates.
    #[must_use]
    pub fn selection_box(&self) -> Option<Rect> {
        match self.input {
            InputState::BoxSelecting { anchor, current } => Some(Rect::from_corners(anchor, current)),
            _ => None,
        }
    }

    #[must_use]
    pub fn selection(&self) -> Vec<TokenId> {
        self.ui.selection.ids()
    }

    #[must_use]
    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.store.get(id)
    }
}

/// The browser half of the engine: canvas element, 2D context and image cache.
///
/// Scene state lives in [`EngineCore`], which the host owns and lends to
/// [`Engine::render`] once per frame.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: ImageCache,
}

impl Engine {
    /// Create an engine bound to the given canvas element.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a 2D context or the offscreen probe canvas cannot be created.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = context_2d(&canvas)?;
        Ok(Self { canvas, ctx, images: ImageCache::new()? })
    }

    /// Pixel-alpha probe over the cached images, for hit-testing.
    #[must_use]
    pub fn probe(&self) -> CanvasProbe<'_> {
        self.images.probe()
    }

    /// Draw one frame: fit the canvas, load images, paint, advance fades.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any `Canvas2D` call fails.
    pub fn render(&mut self, core: &mut EngineCore, avail_w: f64, avail_h: f64) -> Result<(), JsValue> {
        let (w, h) = core.viewport.fit_canvas(avail_w, avail_h);
        if self.canvas.width() != w || self.canvas.height() != h {
            self.canvas.set_width(w);
            self.canvas.set_height(h);
        }

        let urls = core
            .store
            .background()
            .into_iter()
            .chain(core.store.culling_list())
            .map(|t| t.url.as_str());
        for url in urls {
            self.images.request(url)?;
        }
        self.images.harvest(&mut core.sizes);

        let plan = plan_frame(core);
        render::draw(&self.ctx, &plan, &core.viewport, &self.images)?;
        core.fades.tick();
        Ok(())
    }
}

pub(crate) fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}
