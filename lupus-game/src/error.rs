use thiserror::Error;

use crate::roster::PlayerId;

/// Validation outcomes for session commands. A command that returns one of
/// these has left the session untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("at least {need} players are required to start (got {have})")]
    InsufficientPlayers { have: usize, need: usize },
    #[error("add players before assigning roles")]
    EmptyRoster,
    #[error("selected roles ({requested}) must match the number of players ({required})")]
    RoleCountMismatch { requested: u32, required: usize },
    #[error("unknown role id '{0}'")]
    UnknownRole(String),
    #[error("player {0} has been eliminated")]
    PlayerEliminated(PlayerId),
    #[error("voting is only open during the day")]
    VotingClosed,
}

/// Errors raised when session configuration invariants are violated.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be at least {min} (got {value})")]
    MinViolation {
        field: &'static str,
        min: usize,
        value: usize,
    },
    #[error("invalid session config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
