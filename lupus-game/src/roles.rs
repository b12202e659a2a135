//! Role registry: the fixed catalog of secret identities plus the unassigned sentinel.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SessionError;

/// Identifier of a role definition.
///
/// `Unassigned` is the sentinel every player starts with; it is never part of
/// [`ROLES`] and never accepted as a role-count key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum RoleId {
    Werewolf,
    Villager,
    Seer,
    Bodyguard,
    #[default]
    Unassigned,
}

impl RoleId {
    /// Registry roles in display order.
    pub const ALL: &'static [Self] = &[Self::Werewolf, Self::Villager, Self::Seer, Self::Bodyguard];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Werewolf => "werewolf",
            Self::Villager => "villager",
            Self::Seer => "seer",
            Self::Bodyguard => "bodyguard",
            Self::Unassigned => "unassigned",
        }
    }

    /// True for every id listed in the registry.
    #[must_use]
    pub const fn is_registered(self) -> bool {
        !matches!(self, Self::Unassigned)
    }

    /// Full definition for this id.
    #[must_use]
    pub const fn definition(self) -> &'static Role {
        match self {
            Self::Werewolf => &WEREWOLF_ROLE,
            Self::Villager => &VILLAGER_ROLE,
            Self::Seer => &SEER_ROLE,
            Self::Bodyguard => &BODYGUARD_ROLE,
            Self::Unassigned => &UNASSIGNED_ROLE,
        }
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleId {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "werewolf" => Ok(Self::Werewolf),
            "villager" => Ok(Self::Villager),
            "seer" => Ok(Self::Seer),
            "bodyguard" => Ok(Self::Bodyguard),
            "unassigned" => Ok(Self::Unassigned),
            other => Err(SessionError::UnknownRole(other.to_string())),
        }
    }
}

/// Opaque visual tag. The presentation layer maps it to an actual icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoleIcon {
    Moon,
    User,
    Eye,
    Shield,
    Ghost,
    EyeOff,
}

/// Immutable role definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Role {
    pub id: RoleId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: RoleIcon,
}

pub const WEREWOLF_ROLE: Role = Role {
    id: RoleId::Werewolf,
    name: "Lupo Mannaro",
    description: "Di notte, sbrana un villico.",
    icon: RoleIcon::Moon,
};

pub const VILLAGER_ROLE: Role = Role {
    id: RoleId::Villager,
    name: "Villico",
    description: "Tenta di scoprire ed eliminare i lupi.",
    icon: RoleIcon::User,
};

pub const SEER_ROLE: Role = Role {
    id: RoleId::Seer,
    name: "Veggente",
    description: "Di notte, può spiare il ruolo di un giocatore.",
    icon: RoleIcon::Eye,
};

pub const BODYGUARD_ROLE: Role = Role {
    id: RoleId::Bodyguard,
    name: "Guardia del Corpo",
    description: "Di notte, può proteggere un giocatore.",
    icon: RoleIcon::Shield,
};

/// Registry in display order.
pub static ROLES: [Role; 4] = [WEREWOLF_ROLE, VILLAGER_ROLE, SEER_ROLE, BODYGUARD_ROLE];

pub const UNASSIGNED_ROLE: Role = Role {
    id: RoleId::Unassigned,
    name: "Non Assegnato",
    description: "Assegna un ruolo a questo giocatore.",
    icon: RoleIcon::Ghost,
};

/// What a display shows in place of a role that has not been revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HiddenRole {
    pub name: &'static str,
    pub description: &'static str,
    pub icon: RoleIcon,
}

pub const HIDDEN_ROLE: HiddenRole = HiddenRole {
    name: "Ruolo Nascosto",
    description: "Clicca \"Mostra Ruolo\" per rivelarlo.",
    icon: RoleIcon::EyeOff,
};

/// Look up a registry role by its string id. The sentinel is not a registry entry.
#[must_use]
pub fn find_role(id: &str) -> Option<&'static Role> {
    ROLES.iter().find(|role| role.id.as_str() == id)
}

/// Registry lookup that falls back to the unassigned sentinel.
#[must_use]
pub fn role_or_unassigned(id: &str) -> &'static Role {
    find_role(id).unwrap_or(&UNASSIGNED_ROLE)
}
