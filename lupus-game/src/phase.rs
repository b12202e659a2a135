//! Day/night cycle and turn counter.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Day,
    Night,
}

impl Phase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Night => "night",
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Day => Self::Night,
            Self::Night => Self::Day,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "night" => Ok(Self::Night),
            _ => Err(()),
        }
    }
}

/// Phase plus the turn it belongs to. A turn is one day followed by one night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseClock {
    pub phase: Phase,
    pub turn: u32,
}

impl Default for PhaseClock {
    fn default() -> Self {
        Self {
            phase: Phase::Day,
            turn: 1,
        }
    }
}

impl PhaseClock {
    /// Move to the next phase. Night into day starts a new turn.
    pub const fn advance(&mut self) -> Phase {
        self.phase = self.phase.next();
        if matches!(self.phase, Phase::Day) {
            self.turn = self.turn.saturating_add(1);
        }
        self.phase
    }
}
