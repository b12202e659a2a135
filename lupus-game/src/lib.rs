//! Lupus Session Engine
//!
//! Platform-agnostic core for moderating a live werewolf-style game: roster,
//! secret role distribution, day/night turns, vote tallying and per-player
//! role reveal state. Rendering and notifications belong to the caller.

pub mod config;
pub mod distribution;
pub mod error;
pub mod notice;
pub mod phase;
pub mod roles;
pub mod roster;
pub mod session;
pub mod visibility;
pub mod votes;

// Re-export commonly used types
pub use config::SessionConfig;
pub use distribution::{RoleCounts, distribute, fisher_yates};
pub use error::{ConfigError, SessionError};
pub use notice::Notice;
pub use phase::{Phase, PhaseClock};
pub use roles::{
    HIDDEN_ROLE, HiddenRole, ROLES, Role, RoleIcon, RoleId, UNASSIGNED_ROLE, find_role,
    role_or_unassigned,
};
pub use roster::{Player, PlayerId, Roster};
pub use session::{DisplayedRole, MAX_PENDING_NOTICES, Session};
pub use visibility::Visibility;
pub use votes::leading_player;
