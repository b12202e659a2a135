//! Vote tally resolution.
use crate::phase::Phase;
use crate::roster::Player;

/// The unique alive player holding the most votes, if any.
///
/// Returns `None` outside the day, when nobody is alive, when no votes have
/// been cast, or when the top count is shared.
#[must_use]
pub fn leading_player(players: &[Player], phase: Phase) -> Option<&Player> {
    if phase != Phase::Day {
        return None;
    }
    let max_votes = players
        .iter()
        .filter(|p| p.is_alive)
        .map(|p| p.votes)
        .max()?;
    if max_votes == 0 {
        return None;
    }
    let mut leaders = players
        .iter()
        .filter(|p| p.is_alive && p.votes == max_votes);
    let leader = leaders.next()?;
    if leaders.next().is_some() {
        return None;
    }
    Some(leader)
}

/// Total votes cast on alive players this round.
#[must_use]
pub fn votes_cast(players: &[Player]) -> u32 {
    players
        .iter()
        .filter(|p| p.is_alive)
        .fold(0u32, |acc, p| acc.saturating_add(p.votes))
}
