use anyhow::{Context, Result, anyhow};
use lupus_game::{Notice, Phase, PlayerId, RoleId, Session, SessionError, fisher_yates};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use super::{ScenarioCtx, TestScenario};

const UNIFORMITY_TRIALS: u32 = 2_000;
const UNIFORMITY_TOLERANCE_PCT: u32 = 20;

pub fn catalog_scenarios() -> Vec<TestScenario> {
    vec![
        TestScenario::new("smoke", "Smoke Test", smoke),
        TestScenario::new("roster", "Roster Management", roster),
        TestScenario::new("start-gate", "Start Gate", start_gate),
        TestScenario::new("role-distribution", "Role Distribution", role_distribution),
        TestScenario::new(
            "distribution-uniformity",
            "Distribution Uniformity",
            distribution_uniformity,
        ),
        TestScenario::new("vote-resolution", "Vote Resolution", vote_resolution),
        TestScenario::new("phase-cycle", "Phase Cycle", phase_cycle),
        TestScenario::new("visibility", "Role Visibility", visibility),
        TestScenario::new("gating", "Command Gating", gating),
        TestScenario::new("reset", "Game Reset", reset),
    ]
}

fn player_ids(session: &Session) -> Vec<PlayerId> {
    session.players().iter().map(|p| p.id).collect()
}

fn count_role(session: &Session, role: RoleId) -> usize {
    session.players().iter().filter(|p| p.role == role).count()
}

fn smoke(ctx: &mut ScenarioCtx) -> Result<()> {
    let players = ctx.config().min_players.max(3);
    let session = ctx.session_with_players(players);
    session.start_game().context("a full table should start")?;
    session.set_role_count("werewolf", 1)?;
    session.set_role_count("villager", i64::try_from(players - 1)?)?;
    session.randomize_roles()?;

    let ids = player_ids(session);
    session.cast_vote(ids[0])?;
    session.cast_vote(ids[0])?;
    session.cast_vote(ids[1])?;
    let leader = session
        .leading_player()
        .ok_or_else(|| anyhow!("expected a leading player after 2-1 vote"))?;
    anyhow::ensure!(leader.id == ids[0], "wrong leader {}", leader.id);

    session.toggle_status(ids[0]);
    session.advance_phase();
    session.advance_phase();
    anyhow::ensure!(session.turn() == 2, "turn should be 2, got {}", session.turn());
    anyhow::ensure!(
        session.living_players_count() == players - 1,
        "exactly one player should be eliminated"
    );
    if ctx.verbose {
        log::info!("smoke notices: {:?}", ctx.session().pending_notices());
    }
    Ok(())
}

fn roster(ctx: &mut ScenarioCtx) -> Result<()> {
    let session = ctx.session();
    anyhow::ensure!(session.add_player("   ").is_none(), "blank name accepted");
    let a = session.add_player(" Ada ").context("named player rejected")?;
    let b = session.add_player("Bea").context("named player rejected")?;
    anyhow::ensure!(
        session.player(a).is_some_and(|p| p.name == "Ada"),
        "name was not trimmed"
    );
    anyhow::ensure!(session.remove_player(b), "existing player not removed");
    anyhow::ensure!(!session.remove_player(b), "second removal reported success");
    let c = session.add_player("Cid").context("named player rejected")?;
    anyhow::ensure!(c != a && c != b, "player id reused");
    anyhow::ensure!(session.players().len() == 2, "roster size drifted");
    Ok(())
}

fn start_gate(ctx: &mut ScenarioCtx) -> Result<()> {
    let need = ctx.config().min_players;
    let session = ctx.session_with_players(need.saturating_sub(1));
    match session.start_game() {
        Err(SessionError::InsufficientPlayers { .. }) => {}
        other => anyhow::bail!("expected InsufficientPlayers, got {other:?}"),
    }
    anyhow::ensure!(!session.is_started(), "started below minimum");
    session.add_player("Late Arrival");
    session.start_game()?;
    anyhow::ensure!(session.is_started(), "start did not stick");
    session.start_game()?;
    Ok(())
}

fn role_distribution(ctx: &mut ScenarioCtx) -> Result<()> {
    let session = ctx.session_with_players(6);
    anyhow::ensure!(
        matches!(session.randomize_roles(), Err(SessionError::RoleCountMismatch { .. })),
        "mismatched counts were accepted"
    );
    anyhow::ensure!(
        count_role(session, RoleId::Unassigned) == 6,
        "failed distribution touched roles"
    );

    session.set_role_count("werewolf", 2)?;
    session.set_role_count("villager", 2)?;
    session.set_role_count("seer", 1)?;
    session.set_role_count("bodyguard", 1)?;
    let first = player_ids(session)[0];
    session.reveal(first);
    session.randomize_roles()?;

    for role in RoleId::ALL {
        let expected = session.role_count(*role) as usize;
        let actual = count_role(session, *role);
        anyhow::ensure!(actual == expected, "{role}: expected {expected}, got {actual}");
    }
    anyhow::ensure!(session.visibility().is_empty(), "reveals survived distribution");

    let mut empty = Session::new(ctx.config().clone());
    anyhow::ensure!(
        empty.randomize_roles() == Err(SessionError::EmptyRoster),
        "empty roster not reported"
    );
    Ok(())
}

fn distribution_uniformity(ctx: &mut ScenarioCtx) -> Result<()> {
    let mut rng = ChaCha20Rng::seed_from_u64(ctx.seed);
    let mut hits = [0u32; 5];
    for _ in 0..UNIFORMITY_TRIALS {
        let mut deck = [
            RoleId::Werewolf,
            RoleId::Villager,
            RoleId::Villager,
            RoleId::Villager,
            RoleId::Seer,
        ];
        fisher_yates(&mut deck, &mut rng);
        let slot = deck
            .iter()
            .position(|r| *r == RoleId::Werewolf)
            .ok_or_else(|| anyhow!("werewolf vanished from the deck"))?;
        hits[slot] += 1;
    }
    let expected = UNIFORMITY_TRIALS / 5;
    let tolerance = expected * UNIFORMITY_TOLERANCE_PCT / 100;
    for (slot, count) in hits.iter().enumerate() {
        anyhow::ensure!(
            count.abs_diff(expected) <= tolerance,
            "slot {slot} drew the werewolf {count} times (expected ~{expected})"
        );
    }
    Ok(())
}

fn vote_resolution(ctx: &mut ScenarioCtx) -> Result<()> {
    let session = ctx.session_with_players(4);
    let ids = player_ids(session);
    anyhow::ensure!(session.leading_player().is_none(), "leader without votes");

    session.cast_vote(ids[0])?;
    session.cast_vote(ids[1])?;
    anyhow::ensure!(session.leading_player().is_none(), "tie produced a leader");

    session.cast_vote(ids[1])?;
    anyhow::ensure!(
        session.leading_player().map(|p| p.id) == Some(ids[1]),
        "2-1 majority not detected"
    );

    session.toggle_status(ids[1]);
    anyhow::ensure!(
        session.leading_player().map(|p| p.id) == Some(ids[0]),
        "eliminated player still leads"
    );

    session.advance_phase();
    session.advance_phase();
    session.cast_vote(ids[2])?;
    anyhow::ensure!(
        session.leading_player().map(|p| p.id) == Some(ids[2]),
        "fresh round did not resolve"
    );
    Ok(())
}

fn phase_cycle(ctx: &mut ScenarioCtx) -> Result<()> {
    let session = ctx.session_with_players(3);
    let ids = player_ids(session);
    for expected_turn in 1..=4u32 {
        anyhow::ensure!(session.phase() == Phase::Day, "turn should open in daylight");
        anyhow::ensure!(session.turn() == expected_turn, "turn counter drifted");
        session.cast_vote(ids[0])?;
        session.reveal(ids[1]);
        anyhow::ensure!(session.advance_phase() == Phase::Night, "day did not end");
        anyhow::ensure!(session.turn() == expected_turn, "turn moved at nightfall");
        anyhow::ensure!(session.votes_cast() == 0, "votes survived nightfall");
        anyhow::ensure!(session.visibility().is_empty(), "reveals survived nightfall");
        session.reveal(ids[2]);
        anyhow::ensure!(session.advance_phase() == Phase::Day, "night did not end");
        anyhow::ensure!(session.visibility().is_empty(), "reveals survived daybreak");
    }
    let notices = session.take_notices();
    anyhow::ensure!(
        notices.last() == Some(&Notice::DayBreaks { turn: 5 }),
        "last notice should announce turn 5, got {:?}",
        notices.last()
    );
    Ok(())
}

fn visibility(ctx: &mut ScenarioCtx) -> Result<()> {
    let session = ctx.session_with_players(3);
    let ids = player_ids(session);
    session.assign_role(ids[0], "seer")?;
    anyhow::ensure!(session.toggle_reveal(ids[0]), "toggle did not reveal");
    anyhow::ensure!(!session.toggle_reveal(ids[0]), "second toggle did not hide");
    session.reveal(ids[1]);
    session.reveal(ids[2]);
    session.hide(ids[2]);
    anyhow::ensure!(
        session.is_revealed(ids[1]) && !session.is_revealed(ids[2]),
        "reveal/hide mismatch"
    );
    session.hide_all();
    session.hide_all();
    anyhow::ensure!(session.visibility().is_empty(), "hide_all left reveals");
    anyhow::ensure!(
        session.player(ids[0]).map(|p| p.role) == Some(RoleId::Seer),
        "visibility changed a role"
    );
    Ok(())
}

fn gating(ctx: &mut ScenarioCtx) -> Result<()> {
    if !ctx.config().enforce_gates {
        return Ok(());
    }
    let session = ctx.session_with_players(3);
    let ids = player_ids(session);
    session.toggle_status(ids[0]);
    anyhow::ensure!(
        session.assign_role(ids[0], "werewolf") == Err(SessionError::PlayerEliminated(ids[0])),
        "role edit on eliminated player accepted"
    );
    anyhow::ensure!(
        session.cast_vote(ids[0]) == Err(SessionError::PlayerEliminated(ids[0])),
        "vote on eliminated player accepted"
    );
    session.advance_phase();
    anyhow::ensure!(
        session.cast_vote(ids[1]) == Err(SessionError::VotingClosed),
        "night vote accepted"
    );
    anyhow::ensure!(
        session.cast_vote(PlayerId::new(u64::MAX)).is_ok(),
        "unknown id should be a no-op"
    );
    Ok(())
}

fn reset(ctx: &mut ScenarioCtx) -> Result<()> {
    let session = ctx.session_with_players(5);
    session.start_game()?;
    session.set_role_count("villager", 5)?;
    session.randomize_roles()?;
    session.advance_phase();
    session.reset_game();
    anyhow::ensure!(session.players().is_empty(), "roster survived reset");
    anyhow::ensure!(!session.is_started(), "started flag survived reset");
    anyhow::ensure!(
        session.phase() == Phase::Day && session.turn() == 1,
        "clock survived reset"
    );
    anyhow::ensure!(session.total_requested() == 0, "role counts survived reset");
    anyhow::ensure!(session.pending_notices().is_empty(), "notices survived reset");
    Ok(())
}
