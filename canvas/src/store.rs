//! Token model and the in-memory token store.
//!
//! The store is the single local source of truth for scene state. It is fed
//! by authoritative server snapshots and by optimistic local edits, and both
//! go through [`TokenStore::upsert`], which always overwrites the full record.
//! The renderer and hit-tester read it through [`TokenStore::culling_list`].

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;

use crate::consts::{BACKGROUND_SIZE, SCENE_HEIGHT, SCENE_WIDTH};

/// Server-assigned token identifier.
pub type TokenId = i64;

/// One placed image: a creature, a prop, or the scene background.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub id: TokenId,
    /// Center x in scene units.
    pub x: f64,
    /// Center y in scene units.
    pub y: f64,
    /// Paint and hit-test priority; higher is on top.
    pub zorder: i64,
    /// Logical size, or [`BACKGROUND_SIZE`] for the background.
    pub size: i64,
    /// Clockwise rotation in degrees.
    pub rotation: f64,
    pub flip_x: bool,
    pub locked: bool,
    /// Image cache key.
    pub url: String,
}

impl Token {
    #[must_use]
    pub fn is_background(&self) -> bool {
        self.size == BACKGROUND_SIZE
    }
}

/// Sparse local edit to a token. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenPatch {
    pub id: TokenId,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub zorder: Option<i64>,
    pub size: Option<i64>,
    pub rotation: Option<f64>,
    pub flip_x: Option<bool>,
    pub locked: Option<bool>,
}

impl TokenPatch {
    #[must_use]
    pub fn new(id: TokenId) -> Self {
        Self { id, ..Self::default() }
    }

    /// Return a copy of `token` with this patch's fields applied.
    #[must_use]
    pub fn applied_to(&self, token: &Token) -> Token {
        let mut out = token.clone();
        if let Some(x) = self.x {
            out.x = x;
        }
        if let Some(y) = self.y {
            out.y = y;
        }
        if let Some(z) = self.zorder {
            out.zorder = z;
        }
        if let Some(s) = self.size {
            out.size = s;
        }
        if let Some(r) = self.rotation {
            out.rotation = r;
        }
        if let Some(f) = self.flip_x {
            out.flip_x = f;
        }
        if let Some(l) = self.locked {
            out.locked = l;
        }
        out
    }
}

#[derive(Debug, Clone)]
struct Entry {
    token: Token,
    /// Insertion sequence; breaks z-order ties.
    seq: u64,
}

/// In-memory store of live tokens keyed by id.
#[derive(Debug, Default)]
pub struct TokenStore {
    entries: HashMap<TokenId, Entry>,
    next_seq: u64,
    background_id: Option<TokenId>,
    z_min: i64,
    z_max: i64,
}

impl TokenStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a token or overwrite every field of an existing one.
    ///
    /// A background token is recentered on the scene. When a background with
    /// a different id is already present it is evicted and returned, so the
    /// store never holds more than one.
    pub fn upsert(&mut self, mut token: Token) -> Option<Token> {
        let mut evicted = None;
        if token.is_background() {
            token.x = SCENE_WIDTH * 0.5;
            token.y = SCENE_HEIGHT * 0.5;
            if let Some(old) = self.background_id
                && old != token.id
            {
                evicted = self.entries.remove(&old).map(|e| e.token);
            }
            self.background_id = Some(token.id);
        } else {
            if self.background_id == Some(token.id) {
                self.background_id = None;
            }
            self.z_min = self.z_min.min(token.zorder);
            self.z_max = self.z_max.max(token.zorder);
        }

        if let Some(entry) = self.entries.get_mut(&token.id) {
            entry.token = token;
        } else {
            let seq = self.next_seq;
            self.next_seq += 1;
            self.entries.insert(token.id, Entry { token, seq });
        }
        evicted
    }

    /// Clear the store and insert every token in `tokens`.
    pub fn replace_all(&mut self, tokens: Vec<Token>) {
        self.entries.clear();
        self.background_id = None;
        self.z_min = 0;
        self.z_max = 0;
        for token in tokens {
            self.upsert(token);
        }
    }

    /// Remove a token, returning its last known state.
    pub fn remove(&mut self, id: TokenId) -> Option<Token> {
        let removed = self.entries.remove(&id).map(|e| e.token);
        if self.background_id == Some(id) {
            self.background_id = None;
        }
        removed
    }

    #[must_use]
    pub fn get(&self, id: TokenId) -> Option<&Token> {
        self.entries.get(&id).map(|e| &e.token)
    }

    pub fn get_mut(&mut self, id: TokenId) -> Option<&mut Token> {
        self.entries.get_mut(&id).map(|e| &mut e.token)
    }

    #[must_use]
    pub fn contains(&self, id: TokenId) -> bool {
        self.entries.contains_key(&id)
    }

    /// The background token, if the scene has one.
    #[must_use]
    pub fn background(&self) -> Option<&Token> {
        self.background_id.and_then(|id| self.get(id))
    }

    #[must_use]
    pub fn has_background(&self) -> bool {
        self.background_id.is_some()
    }

    /// Lowest and highest z-order seen since the last full replace.
    #[must_use]
    pub fn z_bounds(&self) -> (i64, i64) {
        (self.z_min, self.z_max)
    }

    /// Every id in the store, background included, in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<TokenId> {
        let mut ids: Vec<TokenId> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Ids of all non-background tokens in ascending z-order.
    #[must_use]
    pub fn foreground_ids(&self) -> Vec<TokenId> {
        self.culling_list().iter().map(|t| t.id).collect()
    }

    /// Non-background tokens sorted by `(zorder, insertion order)`.
    #[must_use]
    pub fn culling_list(&self) -> Vec<&Token> {
        let mut entries: Vec<&Entry> = self
            .entries
            .values()
            .filter(|e| !e.token.is_background())
            .collect();
        entries.sort_by(|a, b| a.token.zorder.cmp(&b.token.zorder).then(a.seq.cmp(&b.seq)));
        entries.into_iter().map(|e| &e.token).collect()
    }

    /// Number of tokens currently in the store, background included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the store contains no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
