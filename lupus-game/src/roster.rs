//! Player roster: insertion-ordered players with session-unique ids.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::roles::{Role, RoleId};

/// Session-unique player handle. Ids are never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(u64);

impl PlayerId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub role: RoleId,
    #[serde(default = "default_alive")]
    pub is_alive: bool,
    #[serde(default)]
    pub votes: u32,
}

const fn default_alive() -> bool {
    true
}

impl Player {
    fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            role: RoleId::Unassigned,
            is_alive: true,
            votes: 0,
        }
    }

    /// Full definition of the assigned role.
    #[must_use]
    pub const fn role_definition(&self) -> &'static Role {
        self.role.definition()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    players: Vec<Player>,
    next_id: u64,
}

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a player. Blank names (after trimming) are ignored.
    pub fn add(&mut self, name: &str) -> Option<PlayerId> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.next_id += 1;
        let id = PlayerId(self.next_id);
        self.players.push(Player::new(id, name.to_string()));
        Some(id)
    }

    /// Remove a player, returning it if it was present.
    pub fn remove(&mut self, id: PlayerId) -> Option<Player> {
        let index = self.players.iter().position(|p| p.id == id)?;
        Some(self.players.remove(index))
    }

    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Player> {
        self.players.iter_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    #[must_use]
    pub fn living_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_alive).count()
    }

    pub fn reset_votes(&mut self) {
        for player in &mut self.players {
            player.votes = 0;
        }
    }
}
