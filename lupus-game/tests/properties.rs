use lupus_game::{PlayerId, RoleId, Session, SessionError, fisher_yates};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::{BTreeMap, BTreeSet};

const SWEEP_SEEDS: u64 = 64;

fn role_histogram(session: &Session) -> BTreeMap<RoleId, u32> {
    let mut counts = BTreeMap::new();
    for player in session.players() {
        *counts.entry(player.role).or_insert(0) += 1;
    }
    counts
}

#[test]
fn roster_size_is_adds_minus_removals() {
    for seed in 0..SWEEP_SEEDS {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut session = Session::with_seed(seed);
        let mut live: Vec<PlayerId> = Vec::new();
        let (mut added, mut removed) = (0usize, 0usize);

        for step in 0..40 {
            if live.is_empty() || rng.gen_bool(0.6) {
                let name = if rng.gen_bool(0.2) {
                    "   ".to_string()
                } else {
                    format!("player-{step}")
                };
                if let Some(id) = session.add_player(&name) {
                    live.push(id);
                    added += 1;
                }
            } else {
                let idx = rng.gen_range(0..live.len());
                let id = live.swap_remove(idx);
                assert!(session.remove_player(id));
                removed += 1;
            }
            assert_eq!(session.players().len(), added - removed);
            assert_eq!(session.can_start(), session.players().len() >= 3);
        }
    }
}

#[test]
fn randomize_is_a_bijection_onto_requested_roles() {
    for seed in 0..SWEEP_SEEDS {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut session = Session::with_seed(seed);
        let wolves = rng.gen_range(0..3i64);
        let seers = rng.gen_range(0..2i64);
        let guards = rng.gen_range(0..2i64);
        let villagers = rng.gen_range(1..6i64);
        let total = wolves + seers + guards + villagers;
        for i in 0..total {
            session.add_player(&format!("P{i}"));
        }
        session.set_role_count("werewolf", wolves).unwrap();
        session.set_role_count("seer", seers).unwrap();
        session.set_role_count("bodyguard", guards).unwrap();
        session.set_role_count("villager", villagers).unwrap();
        session.reveal(session.players()[0].id);

        session.randomize_roles().unwrap();

        let expected: BTreeMap<RoleId, u32> = session
            .role_counts()
            .iter()
            .filter(|(_, n)| *n > 0)
            .collect();
        assert_eq!(role_histogram(&session), expected, "seed {seed}");
        assert!(session.visibility().is_empty());
    }
}

#[test]
fn failed_randomize_changes_nothing() {
    for seed in 0..SWEEP_SEEDS {
        let mut session = Session::with_seed(seed);
        for i in 0..4 {
            session.add_player(&format!("P{i}"));
        }
        let first = session.players()[0].id;
        session.assign_role(first, "bodyguard").unwrap();
        session.reveal(first);
        let requested = i64::try_from(seed % 4).unwrap_or(0);
        session.set_role_count("villager", requested).unwrap();
        let before = session.players().to_vec();

        assert!(matches!(
            session.randomize_roles(),
            Err(SessionError::RoleCountMismatch { required: 4, .. })
        ));
        assert_eq!(session.players(), &before[..]);
        assert!(session.is_revealed(first));
    }
}

#[test]
fn advance_phase_always_clears_votes_and_reveals() {
    for seed in 0..SWEEP_SEEDS {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut session = Session::with_seed(seed);
        for i in 0..6 {
            session.add_player(&format!("P{i}"));
        }
        let ids: Vec<PlayerId> = session.players().iter().map(|p| p.id).collect();
        for _ in 0..rng.gen_range(0..20) {
            let target = ids[rng.gen_range(0..ids.len())];
            session.cast_vote(target).unwrap();
            if rng.gen_bool(0.3) {
                session.toggle_reveal(target);
            }
        }
        let turn_before = session.turn();
        session.advance_phase();
        assert!(session.players().iter().all(|p| p.votes == 0));
        assert!(session.visibility().is_empty());
        assert_eq!(session.turn(), turn_before);
        session.advance_phase();
        assert_eq!(session.turn(), turn_before + 1);
    }
}

#[test]
fn leader_is_the_unique_alive_maximum() {
    for seed in 0..SWEEP_SEEDS {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut session = Session::with_seed(seed);
        for i in 0..5 {
            session.add_player(&format!("P{i}"));
        }
        let ids: Vec<PlayerId> = session.players().iter().map(|p| p.id).collect();
        for _ in 0..rng.gen_range(0..12) {
            session.cast_vote(ids[rng.gen_range(0..ids.len())]).unwrap();
        }
        for id in &ids {
            if rng.gen_bool(0.25) {
                session.toggle_status(*id);
            }
        }

        let alive: Vec<_> = session.players().iter().filter(|p| p.is_alive).collect();
        let max = alive.iter().map(|p| p.votes).max().unwrap_or(0);
        let top: Vec<_> = alive.iter().filter(|p| p.votes == max).collect();
        let expected = (max > 0 && top.len() == 1).then(|| top[0].id);
        assert_eq!(session.leading_player().map(|p| p.id), expected, "seed {seed}");
    }
}

#[test]
fn toggle_reveal_twice_restores_membership() {
    let mut session = Session::with_seed(1);
    let a = session.add_player("A").unwrap();
    let b = session.add_player("B").unwrap();
    session.reveal(b);
    for id in [a, b] {
        let before = session.is_revealed(id);
        session.toggle_reveal(id);
        session.toggle_reveal(id);
        assert_eq!(session.is_revealed(id), before);
    }
    session.hide_all();
    assert!(session.visibility().is_empty());
    session.hide_all();
    assert!(session.visibility().is_empty());
}

#[test]
fn shuffle_positions_are_roughly_uniform() {
    const TRIALS: u32 = 6_000;
    let mut rng = ChaCha20Rng::seed_from_u64(0xF15E);
    let mut hits = [0u32; 4];
    for _ in 0..TRIALS {
        let mut deck = [0u8, 1, 2, 3];
        fisher_yates(&mut deck, &mut rng);
        let pos = deck.iter().position(|v| *v == 0).unwrap_or(0);
        hits[pos] += 1;
    }
    let expected = TRIALS / 4;
    for count in hits {
        assert!(
            count.abs_diff(expected) < expected / 10,
            "position frequency {count} too far from {expected}"
        );
    }
}

fn dealt_session(seed: u64, players: usize, wolves: i64) -> Session {
    let mut session = Session::with_seed(seed);
    for i in 0..players {
        session.add_player(&format!("P{i}"));
    }
    let villagers = i64::try_from(players).unwrap_or(0) - wolves;
    session.set_role_count("werewolf", wolves).unwrap();
    session.set_role_count("villager", villagers).unwrap();
    session.randomize_roles().unwrap();
    session
}

fn dealt_roles(session: &Session) -> Vec<RoleId> {
    session.players().iter().map(|p| p.role).collect()
}

#[test]
fn randomized_werewolf_lands_on_every_seat_evenly() {
    const SEEDS: u64 = 1_000;
    const PLAYERS: usize = 5;
    let mut hits = [0u64; PLAYERS];
    for seed in 0..SEEDS {
        let session = dealt_session(seed, PLAYERS, 1);
        let seat = session
            .players()
            .iter()
            .position(|p| p.role == RoleId::Werewolf)
            .unwrap_or_else(|| panic!("seed {seed} dealt no werewolf"));
        hits[seat] += 1;
    }
    let expected = SEEDS / PLAYERS as u64;
    for (seat, count) in hits.iter().enumerate() {
        assert!(
            count.abs_diff(expected) < expected * 3 / 10,
            "seat {seat} drew the werewolf {count} times, expected about {expected}"
        );
    }
}

#[test]
fn different_seeds_deal_different_tables() {
    let assignments: BTreeSet<Vec<RoleId>> = (0..16)
        .map(|seed| dealt_roles(&dealt_session(seed, 8, 2)))
        .collect();
    assert!(assignments.len() > 1, "every seed dealt the same table");
    assert_eq!(dealt_roles(&dealt_session(7, 8, 2)), dealt_roles(&dealt_session(7, 8, 2)));
}

#[test]
fn repeated_randomize_in_one_session_reshuffles() {
    let mut session = dealt_session(3, 8, 2);
    let mut seen = BTreeSet::new();
    seen.insert(dealt_roles(&session));
    for _ in 0..15 {
        session.randomize_roles().unwrap();
        seen.insert(dealt_roles(&session));
    }
    assert!(seen.len() > 1, "the session stream dealt the same table every time");
}
