use lupus_game::{
    DisplayedRole, HIDDEN_ROLE, Notice, Phase, PlayerId, RoleId, Session, SessionConfig,
    SessionError,
};

fn count_roles(session: &Session, role: RoleId) -> usize {
    session.players().iter().filter(|p| p.role == role).count()
}

fn ids(session: &Session) -> Vec<PlayerId> {
    session.players().iter().map(|p| p.id).collect()
}

#[test]
fn three_player_game_from_setup_to_second_day() {
    let mut session = Session::with_seed(0x5EED);
    for name in ["Anna", "Bruno", "Carla"] {
        session.add_player(name).unwrap();
    }
    session.start_game().unwrap();
    assert!(session.is_started());

    session.set_role_count("werewolf", 1).unwrap();
    session.set_role_count("villager", 2).unwrap();
    assert_eq!(session.total_requested(), 3);
    session.randomize_roles().unwrap();
    assert_eq!(count_roles(&session, RoleId::Werewolf), 1);
    assert_eq!(count_roles(&session, RoleId::Villager), 2);
    assert!(session.visibility().is_empty());

    let [a, b, c] = ids(&session)[..] else {
        panic!("expected three players");
    };

    session.cast_vote(a).unwrap();
    session.cast_vote(a).unwrap();
    session.cast_vote(b).unwrap();
    assert_eq!(session.leading_player().map(|p| p.id), Some(a));

    session.toggle_status(a);
    assert_eq!(session.living_players_count(), 2);
    assert_eq!(session.leading_player().map(|p| p.id), Some(b));

    assert_eq!(session.advance_phase(), Phase::Night);
    assert!(session.leading_player().is_none());
    assert_eq!(session.advance_phase(), Phase::Day);
    assert_eq!(session.turn(), 2);

    session.cast_vote(c).unwrap();
    assert_eq!(session.leading_player().map(|p| p.id), Some(c));
    assert_eq!(session.cast_vote(a), Err(SessionError::PlayerEliminated(a)));

    let notices = session.take_notices();
    assert_eq!(notices.first(), Some(&Notice::GameStarted));
    assert!(notices.contains(&Notice::RolesDistributed));
    assert!(notices.contains(&Notice::PlayerEliminated {
        name: "Anna".to_string()
    }));
    assert_eq!(notices.last(), Some(&Notice::DayBreaks { turn: 2 }));
    assert!(session.take_notices().is_empty());
}

#[test]
fn two_players_cannot_start() {
    let mut session = Session::with_seed(2);
    session.add_player("A");
    session.add_player("B");
    assert_eq!(
        session.start_game(),
        Err(SessionError::InsufficientPlayers { have: 2, need: 3 })
    );
    assert!(!session.is_started());
}

#[test]
fn tie_produces_no_leader() {
    let mut session = Session::with_seed(3);
    let a = session.add_player("A").unwrap();
    let b = session.add_player("B").unwrap();
    session.cast_vote(a).unwrap();
    session.cast_vote(b).unwrap();
    assert!(session.leading_player().is_none());
}

#[test]
fn roles_can_be_edited_before_and_after_distribution() {
    let mut session = Session::with_seed(4);
    for name in ["A", "B", "C", "D"] {
        session.add_player(name);
    }
    let players = ids(&session);
    session.assign_role(players[3], "seer").unwrap();
    session.set_role_count("werewolf", 1).unwrap();
    session.set_role_count("villager", 2).unwrap();
    session.set_role_count("bodyguard", 1).unwrap();
    session.randomize_roles().unwrap();
    session.assign_role(players[0], "seer").unwrap();
    assert_eq!(session.player(players[0]).unwrap().role, RoleId::Seer);
}

#[test]
fn reveal_survives_until_phase_change() {
    let mut session = Session::with_seed(5);
    let a = session.add_player("A").unwrap();
    session.assign_role(a, "werewolf").unwrap();
    session.reveal(a);
    assert!(matches!(
        session.displayed_role(a),
        Some(DisplayedRole::Revealed(role)) if role.id == RoleId::Werewolf
    ));
    session.advance_phase();
    assert_eq!(
        session.displayed_role(a),
        Some(DisplayedRole::Hidden(&HIDDEN_ROLE))
    );
}

#[test]
fn config_json_drives_session_rules() {
    let cfg = SessionConfig::from_json(r#"{"min_players": 4, "seed": 9}"#).unwrap();
    let mut session = Session::new(cfg);
    for name in ["A", "B", "C"] {
        session.add_player(name);
    }
    assert!(!session.can_start());
    session.add_player("D");
    assert!(session.can_start());
}

#[test]
fn reset_after_play_matches_a_new_session() {
    let mut session = Session::with_seed(6);
    for name in ["A", "B", "C"] {
        session.add_player(name);
    }
    session.start_game().unwrap();
    session.set_role_count("villager", 3).unwrap();
    session.randomize_roles().unwrap();
    session.advance_phase();
    session.reset_game();

    let fresh = Session::with_seed(6);
    assert_eq!(session.players(), fresh.players());
    assert_eq!(session.is_started(), fresh.is_started());
    assert_eq!(session.phase(), fresh.phase());
    assert_eq!(session.turn(), fresh.turn());
    assert_eq!(session.role_counts(), fresh.role_counts());
    assert_eq!(session.visibility(), fresh.visibility());
}
