//! Role distribution: requested role counts and the randomized assignment.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::SessionError;
use crate::roles::RoleId;
use crate::roster::Roster;

/// Requested number of copies for every registry role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleCounts(BTreeMap<RoleId, u32>);

impl Default for RoleCounts {
    fn default() -> Self {
        Self(RoleId::ALL.iter().map(|id| (*id, 0)).collect())
    }
}

impl RoleCounts {
    #[must_use]
    pub fn zeroed() -> Self {
        Self::default()
    }

    /// Store a count, clamping negatives to zero. Only registry ids are valid keys.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownRole`] for the unassigned sentinel; the
    /// stored counts are left as they were.
    pub fn set(&mut self, role: RoleId, count: i64) -> Result<(), SessionError> {
        if !role.is_registered() {
            return Err(SessionError::UnknownRole(role.to_string()));
        }
        let clamped = u32::try_from(count.max(0)).unwrap_or(u32::MAX);
        self.0.insert(role, clamped);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, role: RoleId) -> u32 {
        self.0.get(&role).copied().unwrap_or(0)
    }

    /// Sum over all requested counts.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.values().fold(0u32, |acc, n| acc.saturating_add(*n))
    }

    pub fn iter(&self) -> impl Iterator<Item = (RoleId, u32)> + '_ {
        self.0.iter().map(|(id, n)| (*id, *n))
    }

    /// Multiset of roles implied by the counts, in registry order.
    #[must_use]
    pub fn deck(&self) -> Vec<RoleId> {
        RoleId::ALL
            .iter()
            .flat_map(|id| std::iter::repeat_n(*id, self.get(*id) as usize))
            .collect()
    }
}

/// In-place Fisher–Yates: walk from the last index down to 1, swapping each
/// slot with a uniform draw from `0..=i`.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Check the distribution preconditions against the roster.
///
/// # Errors
///
/// [`SessionError::EmptyRoster`] when there are no players, otherwise
/// [`SessionError::RoleCountMismatch`] when the requested total differs from
/// the roster size.
pub fn validate(roster: &Roster, counts: &RoleCounts) -> Result<(), SessionError> {
    if roster.is_empty() {
        return Err(SessionError::EmptyRoster);
    }
    let requested = counts.total();
    if usize::try_from(requested).ok() != Some(roster.len()) {
        return Err(SessionError::RoleCountMismatch {
            requested,
            required: roster.len(),
        });
    }
    Ok(())
}

/// Shuffle the requested deck and hand it out in roster order.
///
/// # Errors
///
/// See [`validate`]. On error no player is touched.
pub fn distribute<R: Rng + ?Sized>(
    roster: &mut Roster,
    counts: &RoleCounts,
    rng: &mut R,
) -> Result<(), SessionError> {
    validate(roster, counts)?;
    let mut deck = counts.deck();
    fisher_yates(&mut deck, rng);
    let mut dealt = deck.into_iter();
    for player in roster.iter_mut() {
        player.role = dealt.next().unwrap_or(RoleId::Unassigned);
    }
    Ok(())
}
