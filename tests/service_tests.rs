#![cfg(feature = "std")]

use std::sync::Arc;
use std::thread;

use seabattle::{
    Coordinate, GameError, GameService, Phase, PlayerSlot, Request, Response, ShotResult,
};

fn ready_service() -> GameService {
    let service = GameService::new();
    service
        .place_ships("player1", &["A1", "A2", "A3", "A4", "A5"])
        .unwrap();
    service
        .place_ships("player2", &["J1", "J2", "J3", "J4", "J5"])
        .unwrap();
    service
}

fn place(player: &str, ships: &[&str]) -> Request {
    Request::PlaceShips {
        player: player.to_string(),
        ships: ships.iter().map(|s| s.to_string()).collect(),
    }
}

fn fire(player: &str, target: &str) -> Request {
    Request::Fire {
        player: player.to_string(),
        target: target.to_string(),
    }
}

#[test]
fn handle_maps_outcomes_to_payloads() {
    let service = GameService::new();

    match service.handle(place("player1", &["A1", "A2", "A3", "A4", "A5"])) {
        Response::Placed(p) => {
            assert!(p.ready);
            assert!(!p.both_ready);
        }
        other => panic!("unexpected {:?}", other),
    }
    match service.handle(place("player2", &["J1", "J2", "J3", "J4", "J5"])) {
        Response::Placed(p) => assert!(p.both_ready),
        other => panic!("unexpected {:?}", other),
    }

    match service.handle(fire("player1", "J1")) {
        Response::Fired(report) => {
            assert_eq!(report.message, "Hit!");
            assert_eq!(report.shot.result, ShotResult::Hit);
            assert_eq!(report.shot.turn, PlayerSlot::Player1);
            assert!(!report.shot.game_over);
            assert_eq!(report.shot.winner, None);
        }
        other => panic!("unexpected {:?}", other),
    }

    match service.handle(fire("player2", "A1")) {
        Response::Error(payload) => {
            assert_eq!(payload.error, GameError::NotYourTurn);
            assert_eq!(payload.message, "Not your turn!");
            assert!(!payload.success);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn every_rejection_is_a_well_formed_error() {
    let service = ready_service();
    let cases = [
        (place("player9", &["A1"]), GameError::InvalidPlayer("player9".into())),
        (place("player1", &["A1", "A2", "A3", "A4"]), GameError::WrongCount(4)),
        (fire("player1", "K1"), GameError::InvalidCoordinate("K1".into())),
        (fire("player2", "A1"), GameError::NotYourTurn),
        (
            Request::ResetReady {
                player: "admin".into(),
            },
            GameError::InvalidPlayer("admin".into()),
        ),
    ];
    for (req, expected) in cases {
        match service.handle(req) {
            Response::Error(payload) => {
                assert_eq!(payload.error, expected);
                assert_eq!(payload.message, expected.to_string());
            }
            other => panic!("expected {:?}, got {:?}", expected, other),
        }
    }
    // the service is still usable afterwards
    assert!(matches!(
        service.handle(fire("player1", "J2")),
        Response::Fired(_)
    ));
}

#[test]
fn status_is_side_effect_free() {
    let service = ready_service();
    service.fire("player1", "C3").unwrap();
    let first = service.status();
    let second = service.status();
    assert_eq!(first, second);
    assert_eq!(first.current_turn, PlayerSlot::Player2);
    assert_eq!(
        first.player(PlayerSlot::Player2).misses,
        vec!["C3".parse::<Coordinate>().unwrap()]
    );
}

#[test]
fn restart_and_reset_ready_acknowledge() {
    let service = ready_service();
    service.fire("player1", "J1").unwrap();

    assert!(matches!(service.handle(Request::Restart), Response::Ack { .. }));
    let snap = service.status();
    assert_eq!(snap.phase, Phase::Placing);
    assert!(snap.players.iter().all(|p| !p.ready && p.hits.is_empty()));

    service
        .place_ships("player1", &["B1", "B2", "B3", "B4", "B5"])
        .unwrap();
    let ack = service.handle(Request::ResetReady {
        player: "player1".into(),
    });
    assert!(matches!(ack, Response::Ack { .. }));
    assert!(!service.status().player(PlayerSlot::Player1).ready);
}

#[test]
fn game_over_is_reported_before_player_validation() {
    let service = ready_service();
    for target in ["J1", "J2", "J3", "J4", "J5"] {
        service.fire("player1", target).unwrap();
    }
    assert_eq!(
        service.fire("mallory", "A1").unwrap_err(),
        GameError::AlreadyGameOver
    );
    let snap = service.status();
    assert!(snap.game_over);
    assert_eq!(snap.winner, Some(PlayerSlot::Player1));
}

#[test]
fn racing_fires_never_double_apply() {
    let service = Arc::new(ready_service());
    let targets: Vec<String> = Coordinate::all().map(|c| c.to_string()).collect();

    // Both players hammer every cell concurrently; only shots made while
    // holding the turn may land.
    let handles: Vec<_> = PlayerSlot::ALL
        .into_iter()
        .map(|slot| {
            let service = service.clone();
            let targets = targets.clone();
            thread::spawn(move || {
                let mut accepted = 0usize;
                for _ in 0..3 {
                    for t in &targets {
                        if service.fire(slot.as_str(), t).is_ok() {
                            accepted += 1;
                        }
                    }
                }
                accepted
            })
        })
        .collect();
    let accepted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

    let snap = service.status();
    let recorded: usize = snap
        .players
        .iter()
        .map(|p| p.hits.len() + p.misses.len())
        .sum();
    assert_eq!(accepted, recorded);
    for view in &snap.players {
        assert!(view.hits.iter().all(|h| !view.misses.contains(h)));
        assert!(view.hits.len() <= 5);
    }
}

#[test]
fn restart_racing_fire_leaves_consistent_state() {
    let service = Arc::new(ready_service());
    let shooter = {
        let service = service.clone();
        thread::spawn(move || {
            for c in Coordinate::all() {
                let _ = service.fire("player1", &c.to_string());
            }
        })
    };
    let restarter = {
        let service = service.clone();
        thread::spawn(move || {
            for _ in 0..20 {
                service.restart();
            }
        })
    };
    shooter.join().unwrap();
    restarter.join().unwrap();

    service.restart();
    let snap = service.status();
    assert_eq!(snap.phase, Phase::Placing);
    assert!(snap
        .players
        .iter()
        .all(|p| p.hits.is_empty() && p.misses.is_empty() && !p.ready));
}
