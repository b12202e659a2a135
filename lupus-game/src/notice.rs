//! Moderator-facing notices raised by successful commands.
use serde::{Deserialize, Serialize};

const NOTICE_GAME_STARTED: &str = "notice.game-started";
const NOTICE_ROLES_DISTRIBUTED: &str = "notice.roles-distributed";
const NOTICE_PLAYER_ELIMINATED: &str = "notice.player-eliminated";
const NOTICE_PLAYER_RESTORED: &str = "notice.player-restored";
const NOTICE_NIGHT_FALLS: &str = "notice.night-falls";
const NOTICE_DAY_BREAKS: &str = "notice.day-breaks";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    GameStarted,
    RolesDistributed,
    PlayerEliminated { name: String },
    PlayerRestored { name: String },
    NightFalls { turn: u32 },
    DayBreaks { turn: u32 },
}

impl Notice {
    /// Stable message key for localization.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::GameStarted => NOTICE_GAME_STARTED,
            Self::RolesDistributed => NOTICE_ROLES_DISTRIBUTED,
            Self::PlayerEliminated { .. } => NOTICE_PLAYER_ELIMINATED,
            Self::PlayerRestored { .. } => NOTICE_PLAYER_RESTORED,
            Self::NightFalls { .. } => NOTICE_NIGHT_FALLS,
            Self::DayBreaks { .. } => NOTICE_DAY_BREAKS,
        }
    }

    /// True for notices a display should style as destructive.
    #[must_use]
    pub const fn is_destructive(&self) -> bool {
        matches!(self, Self::PlayerEliminated { .. })
    }
}
