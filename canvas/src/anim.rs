//! Spawn and despawn fades.
//!
//! A freshly created token ramps opacity and scale together from 0 to 1; a
//! deleted token ramps from 1 to 0. Both advance one fixed step per rendered
//! frame. Despawning tokens are already gone from the store, so each entry
//! keeps the token's last snapshot to keep drawing it while it fades.

#[cfg(test)]
#[path = "anim_test.rs"]
mod anim_test;

use std::collections::HashMap;

use crate::consts::FADE_FRAMES;
use crate::store::{Token, TokenId};

/// A token fading out after deletion.
#[derive(Debug, Clone)]
pub struct Despawn {
    /// Last known state before removal.
    pub token: Token,
    frames: u32,
}

impl Despawn {
    /// Current opacity/scale, falling from 1 towards 0.
    #[must_use]
    pub fn level(&self) -> f64 {
        1.0 - f64::from(self.frames) / f64::from(FADE_FRAMES)
    }
}

/// Spawn and despawn animation holding areas.
#[derive(Debug, Default)]
pub struct Fades {
    spawning: HashMap<TokenId, u32>,
    despawning: HashMap<TokenId, Despawn>,
}

impl Fades {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a spawn fade at opacity 0. Cancels any despawn for the same id.
    pub fn spawn(&mut self, id: TokenId) {
        self.despawning.remove(&id);
        self.spawning.insert(id, 0);
    }

    /// Start a despawn fade at opacity 1 from the token's last snapshot.
    pub fn despawn(&mut self, token: Token) {
        self.spawning.remove(&token.id);
        self.despawning.insert(token.id, Despawn { token, frames: 0 });
    }

    /// Drop a pending despawn because the id came back to life.
    pub fn cancel_despawn(&mut self, id: TokenId) {
        self.despawning.remove(&id);
    }

    /// Spawn level for a live token, or `None` when it is not fading in.
    #[must_use]
    pub fn spawn_level(&self, id: TokenId) -> Option<f64> {
        self.spawning
            .get(&id)
            .map(|frames| f64::from(*frames) / f64::from(FADE_FRAMES))
    }

    /// Despawning tokens in ascending z-order.
    #[must_use]
    pub fn despawning(&self) -> Vec<&Despawn> {
        let mut out: Vec<&Despawn> = self.despawning.values().collect();
        out.sort_by(|a, b| a.token.zorder.cmp(&b.token.zorder).then(a.token.id.cmp(&b.token.id)));
        out
    }

    #[must_use]
    pub fn is_despawning(&self, id: TokenId) -> bool {
        self.despawning.contains_key(&id)
    }

    /// Advance every fade by one frame and purge the finished ones.
    pub fn tick(&mut self) {
        self.spawning.retain(|_, frames| {
            *frames += 1;
            *frames < FADE_FRAMES
        });
        self.despawning.retain(|_, d| {
            d.frames += 1;
            d.frames < FADE_FRAMES
        });
    }

    /// Drop every fade.
    pub fn clear(&mut self) {
        self.spawning.clear();
        self.despawning.clear();
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.spawning.is_empty() && self.despawning.is_empty()
    }
}
