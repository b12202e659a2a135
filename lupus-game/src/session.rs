use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::config::SessionConfig;
use crate::distribution::{self, RoleCounts};
use crate::error::SessionError;
use crate::notice::Notice;
use crate::phase::{Phase, PhaseClock};
use crate::roles::{HIDDEN_ROLE, HiddenRole, Role, RoleId, role_or_unassigned};
use crate::roster::{Player, PlayerId, Roster};
use crate::visibility::Visibility;
use crate::votes;

/// What a display should show for a player's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayedRole {
    Revealed(&'static Role),
    Hidden(&'static HiddenRole),
}

/// Notices kept for a display that has not drained them yet.
pub const MAX_PENDING_NOTICES: usize = 256;

/// One moderated game: roster, role setup, day/night clock, tally and reveal state.
///
/// Every command either applies completely or returns a [`SessionError`]
/// without touching the session. Commands aimed at ids that are not in the
/// roster are no-ops.
///
/// Successful commands queue [`Notice`]s. Displays drain them with
/// [`Session::take_notices`]; past [`MAX_PENDING_NOTICES`] the oldest are dropped.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    rng: ChaCha20Rng,
    roster: Roster,
    started: bool,
    clock: PhaseClock,
    role_counts: RoleCounts,
    visibility: Visibility,
    notices: Vec<Notice>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default_config())
    }
}

impl Session {
    /// Create an empty session in setup.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let rng = config
            .seed
            .map_or_else(ChaCha20Rng::from_entropy, ChaCha20Rng::seed_from_u64);
        Self::fresh(config, rng)
    }

    /// Create an empty session with a fixed RNG seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(SessionConfig::default_config().with_seed(seed))
    }

    fn fresh(config: SessionConfig, rng: ChaCha20Rng) -> Self {
        Self {
            config,
            rng,
            roster: Roster::new(),
            started: false,
            clock: PhaseClock::default(),
            role_counts: RoleCounts::zeroed(),
            visibility: Visibility::default(),
            notices: Vec::new(),
        }
    }

    /// Replace everything but the configuration and the RNG stream with a new game.
    pub fn reset_game(&mut self) {
        let rng = self.rng.clone();
        *self = Self::fresh(self.config.clone(), rng);
        info!("session reset");
    }

    // Roster

    /// Add a player by name. Blank names are ignored and yield `None`.
    pub fn add_player(&mut self, name: &str) -> Option<PlayerId> {
        let id = self.roster.add(name);
        match id {
            Some(id) => debug!("added player {id} ({})", name.trim()),
            None => debug!("ignored blank player name"),
        }
        id
    }

    /// Remove a player, returning whether anyone was removed.
    pub fn remove_player(&mut self, id: PlayerId) -> bool {
        let removed = self.roster.remove(id).is_some();
        if removed {
            self.visibility.hide(id);
            debug!("removed player {id}");
        }
        removed
    }

    #[must_use]
    pub fn can_start(&self) -> bool {
        self.roster.len() >= self.config.min_players
    }

    /// Leave setup. Calling it again once started is a no-op.
    ///
    /// # Errors
    ///
    /// [`SessionError::InsufficientPlayers`] when the roster is below the
    /// configured minimum.
    pub fn start_game(&mut self) -> Result<(), SessionError> {
        if self.started {
            return Ok(());
        }
        if !self.can_start() {
            let err = SessionError::InsufficientPlayers {
                have: self.roster.len(),
                need: self.config.min_players,
            };
            warn!("start rejected: {err}");
            return Err(err);
        }
        self.started = true;
        self.push_notice(Notice::GameStarted);
        info!("game started with {} players", self.roster.len());
        Ok(())
    }

    // Roles

    /// Set the requested copies of a registry role. Negative counts clamp to zero.
    ///
    /// # Errors
    ///
    /// [`SessionError::UnknownRole`] for ids outside the registry; counts are
    /// left unchanged.
    pub fn set_role_count(&mut self, role_id: &str, count: i64) -> Result<(), SessionError> {
        role_id
            .parse::<RoleId>()
            .and_then(|role| self.role_counts.set(role, count))
            .inspect_err(|err| {
                warn!("role count rejected: {err}");
            })
    }

    #[must_use]
    pub fn role_count(&self, role: RoleId) -> u32 {
        self.role_counts.get(role)
    }

    #[must_use]
    pub const fn role_counts(&self) -> &RoleCounts {
        &self.role_counts
    }

    #[must_use]
    pub fn total_requested(&self) -> u32 {
        self.role_counts.total()
    }

    /// Shuffle the requested roles onto the roster and hide every role.
    ///
    /// # Errors
    ///
    /// [`SessionError::EmptyRoster`] or [`SessionError::RoleCountMismatch`];
    /// no player is modified in either case.
    pub fn randomize_roles(&mut self) -> Result<(), SessionError> {
        distribution::distribute(&mut self.roster, &self.role_counts, &mut self.rng).inspect_err(
            |err| {
                warn!("role distribution rejected: {err}");
            },
        )?;
        self.visibility.hide_all();
        self.push_notice(Notice::RolesDistributed);
        info!("distributed {} roles", self.roster.len());
        Ok(())
    }

    /// Assign a role by id, falling back to unassigned for unknown ids.
    ///
    /// Returns the role actually stored, or `None` when the player does not exist.
    ///
    /// # Errors
    ///
    /// [`SessionError::PlayerEliminated`] when gates are enforced and the
    /// player is dead.
    pub fn assign_role(
        &mut self,
        id: PlayerId,
        role_id: &str,
    ) -> Result<Option<RoleId>, SessionError> {
        let enforce = self.config.enforce_gates;
        let Some(player) = self.roster.get_mut(id) else {
            return Ok(None);
        };
        if enforce && !player.is_alive {
            warn!("role edit rejected for eliminated player {id}");
            return Err(SessionError::PlayerEliminated(id));
        }
        let role = role_or_unassigned(role_id).id;
        player.role = role;
        debug!("assigned {role} to player {id}");
        Ok(Some(role))
    }

    // Voting and elimination

    /// Add one vote to a player.
    ///
    /// # Errors
    ///
    /// With gates enforced: [`SessionError::VotingClosed`] at night and
    /// [`SessionError::PlayerEliminated`] for dead targets.
    pub fn cast_vote(&mut self, id: PlayerId) -> Result<(), SessionError> {
        let enforce = self.config.enforce_gates;
        let phase = self.clock.phase;
        let Some(player) = self.roster.get_mut(id) else {
            return Ok(());
        };
        if enforce {
            if phase != Phase::Day {
                warn!("vote for {id} rejected: {phase}");
                return Err(SessionError::VotingClosed);
            }
            if !player.is_alive {
                warn!("vote for eliminated player {id} rejected");
                return Err(SessionError::PlayerEliminated(id));
            }
        }
        player.votes = player.votes.saturating_add(1);
        debug!("vote for {id}, now {}", player.votes);
        Ok(())
    }

    /// Flip a player between eliminated and alive, returning the new status.
    ///
    /// This is a toggle, not an eliminate: calling it twice restores the player.
    pub fn toggle_status(&mut self, id: PlayerId) -> Option<bool> {
        let player = self.roster.get_mut(id)?;
        player.is_alive = !player.is_alive;
        let name = player.name.clone();
        let alive = player.is_alive;
        if alive {
            info!("player {id} restored");
            self.push_notice(Notice::PlayerRestored { name });
        } else {
            info!("player {id} eliminated");
            self.push_notice(Notice::PlayerEliminated { name });
        }
        Some(alive)
    }

    #[must_use]
    pub fn leading_player(&self) -> Option<&Player> {
        votes::leading_player(self.roster.players(), self.clock.phase)
    }

    #[must_use]
    pub fn votes_cast(&self) -> u32 {
        votes::votes_cast(self.roster.players())
    }

    // Phase

    /// Move to the next phase, clearing the tally and every reveal.
    pub fn advance_phase(&mut self) -> Phase {
        let phase = self.clock.advance();
        self.roster.reset_votes();
        self.visibility.hide_all();
        let turn = self.clock.turn;
        match phase {
            Phase::Night => self.push_notice(Notice::NightFalls { turn }),
            Phase::Day => self.push_notice(Notice::DayBreaks { turn }),
        }
        info!("turn {turn}: {phase}");
        phase
    }

    // Visibility

    /// Reveal a player's role. Unknown ids are ignored.
    pub fn reveal(&mut self, id: PlayerId) {
        if self.roster.get(id).is_some() {
            self.visibility.reveal(id);
        }
    }

    pub fn hide(&mut self, id: PlayerId) {
        self.visibility.hide(id);
    }

    /// Flip a player's reveal state, returning whether it is now revealed.
    pub fn toggle_reveal(&mut self, id: PlayerId) -> bool {
        if self.roster.get(id).is_none() {
            return false;
        }
        self.visibility.toggle(id)
    }

    pub fn hide_all(&mut self) {
        self.visibility.hide_all();
    }

    #[must_use]
    pub fn is_revealed(&self, id: PlayerId) -> bool {
        self.visibility.is_revealed(id)
    }

    #[must_use]
    pub const fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    #[must_use]
    pub fn displayed_role(&self, id: PlayerId) -> Option<DisplayedRole> {
        let player = self.roster.get(id)?;
        Some(if self.visibility.is_revealed(id) {
            DisplayedRole::Revealed(player.role_definition())
        } else {
            DisplayedRole::Hidden(&HIDDEN_ROLE)
        })
    }

    // Queries

    #[must_use]
    pub fn players(&self) -> &[Player] {
        self.roster.players()
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.roster.get(id)
    }

    #[must_use]
    pub fn living_players_count(&self) -> usize {
        self.roster.living_count()
    }

    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.started
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.clock.phase
    }

    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.clock.turn
    }

    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn pending_notices(&self) -> &[Notice] {
        &self.notices
    }

    fn push_notice(&mut self, notice: Notice) {
        if self.notices.len() >= MAX_PENDING_NOTICES {
            let overflow = self.notices.len() + 1 - MAX_PENDING_NOTICES;
            self.notices.drain(..overflow);
            debug!("dropped {overflow} undrained notices");
        }
        self.notices.push(notice);
    }

    /// Drain queued notices for display.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
