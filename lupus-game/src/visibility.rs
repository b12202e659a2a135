//! Per-player reveal state for secret roles. Independent from the roles themselves.
use std::collections::BTreeSet;

use crate::roster::PlayerId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visibility {
    revealed: BTreeSet<PlayerId>,
}

impl Visibility {
    pub fn reveal(&mut self, id: PlayerId) {
        self.revealed.insert(id);
    }

    pub fn hide(&mut self, id: PlayerId) {
        self.revealed.remove(&id);
    }

    /// Flip membership, returning whether the player is now revealed.
    pub fn toggle(&mut self, id: PlayerId) -> bool {
        if self.revealed.remove(&id) {
            false
        } else {
            self.revealed.insert(id);
            true
        }
    }

    pub fn hide_all(&mut self) {
        self.revealed.clear();
    }

    #[must_use]
    pub fn is_revealed(&self, id: PlayerId) -> bool {
        self.revealed.contains(&id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.revealed.iter().copied()
    }
}
