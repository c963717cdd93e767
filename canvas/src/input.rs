//! Input model: drag tools, modifier keys, mouse buttons, selection, and the
//! gesture state machine.
//!
//! `Tool` and `Modifiers` capture the user's intent at pointer-down.
//! `InputState` is the gesture tracked between pointer-down and pointer-up,
//! carrying everything needed to recompute token state on each move.
//! `UiState` holds what outlives a gesture: local and remote selections and
//! the copy buffer.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::collections::{BTreeMap, BTreeSet};

use crate::store::TokenId;
use crate::viewport::Point;

/// What a primary-button drag on a token does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Move the selection as a rigid group (default).
    #[default]
    Move,
    /// Scale the selection by pointer distance from the primary token.
    Resize,
    /// Point the selection at the pointer.
    Rotate,
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Whether the multi-select toggle modifier is held.
    #[must_use]
    pub fn toggle(self) -> bool {
        self.ctrl || self.meta
    }

    /// Effective drag tool: Shift forces resize, Alt forces rotate.
    #[must_use]
    pub fn drag_tool(self, tool: Tool) -> Tool {
        if self.shift {
            Tool::Resize
        } else if self.alt {
            Tool::Rotate
        } else {
            tool
        }
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger touch).
    Primary,
    /// Middle mouse button; pans the view.
    Middle,
    /// Right mouse button.
    Secondary,
}

/// A keyboard key as reported by the browser (e.g. `"Delete"`, `"a"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// The local player's selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    ids: BTreeSet<TokenId>,
    primary: Option<TokenId>,
}

impl Selection {
    #[must_use]
    pub fn contains(&self, id: TokenId) -> bool {
        self.ids.contains(&id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn primary(&self) -> Option<TokenId> {
        self.primary
    }

    /// Selected ids in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<TokenId> {
        self.ids.iter().copied().collect()
    }

    /// Replace the selection with a single primary token.
    pub fn select_only(&mut self, id: TokenId) {
        self.ids.clear();
        self.ids.insert(id);
        self.primary = Some(id);
    }

    /// Add or remove `id` without moving the primary, unless the primary
    /// itself is removed or there was none.
    pub fn toggle(&mut self, id: TokenId) {
        if self.ids.remove(&id) {
            if self.primary == Some(id) {
                self.primary = self.ids.iter().next().copied();
            }
        } else {
            self.ids.insert(id);
            if self.primary.is_none() {
                self.primary = Some(id);
            }
        }
    }

    /// Make an already-selected token the primary.
    pub fn set_primary(&mut self, id: TokenId) {
        if self.ids.contains(&id) {
            self.primary = Some(id);
        }
    }

    /// Replace the whole set, keeping the primary when it is still selected.
    pub fn set_all(&mut self, ids: impl IntoIterator<Item = TokenId>) {
        self.ids = ids.into_iter().collect();
        if !self.primary.is_some_and(|p| self.ids.contains(&p)) {
            self.primary = self.ids.iter().next().copied();
        }
    }

    pub fn remove(&mut self, id: TokenId) {
        if self.ids.remove(&id) && self.primary == Some(id) {
            self.primary = self.ids.iter().next().copied();
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.primary = None;
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Drag tool chosen by the host UI.
    pub tool: Tool,
    /// The local player's selection.
    pub selection: Selection,
    /// Other players' selections keyed by player color.
    pub remote: BTreeMap<String, BTreeSet<TokenId>>,
    /// Local player's display color, used for the local selection glow.
    pub local_color: String,
    /// Ids captured by the last copy.
    pub clipboard: Vec<TokenId>,
    /// Last pointer position in scene coordinates.
    pub pointer: Point,
}

/// Internal state for the input state machine.
///
/// Each active variant carries gesture context needed to recompute token
/// state on every pointer move.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A token was grabbed; moves translate the selection rigidly.
    Grabbed {
        /// Primary token's original position minus the grab point.
        grab_offset: Point,
        /// Each movable token's original offset from the primary token.
        offsets: Vec<(TokenId, Point)>,
    },
    /// Drag-resizing the selection.
    Resizing {
        /// Primary token center at drag start.
        center: Point,
        /// Pointer distance that means "scale 1".
        reference: f64,
        /// Each resizable token's size at drag start.
        originals: Vec<(TokenId, i64)>,
    },
    /// Drag-rotating the selection to an absolute angle.
    Rotating {
        /// Primary token center; the rotation pivot.
        center: Point,
        /// Tokens that follow the angle.
        ids: Vec<TokenId>,
    },
    /// Dragging out a selection box from empty space.
    BoxSelecting {
        /// Scene point where the drag started.
        anchor: Point,
        /// Latest pointer position in scene coordinates.
        current: Point,
    },
    /// Panning the view with the middle button.
    Panning {
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
    },
}
