#![cfg(feature = "std")]

use seabattle::{awaiting_my_fleet, render_boards, turn_banner, Coordinate, GameState, PlayerSlot};

use PlayerSlot::{Player1, Player2};

fn c(s: &str) -> Coordinate {
    s.parse().unwrap()
}

fn battling() -> (GameState, Vec<Coordinate>) {
    let mine: Vec<Coordinate> = ["A1", "A2", "A3", "A4", "A5"].iter().map(|s| c(s)).collect();
    let theirs: Vec<Coordinate> = ["J1", "J2", "J3", "J4", "J5"].iter().map(|s| c(s)).collect();
    let mut game = GameState::new();
    game.place_ships(Player1, &mine).unwrap();
    game.place_ships(Player2, &theirs).unwrap();
    (game, mine)
}

/// Right-hand (enemy) grid rows, as strings of cell symbols.
fn enemy_rows(rendered: &str) -> Vec<String> {
    rendered
        .lines()
        .skip(2)
        .map(|line| {
            let right = line.splitn(2, "    ").nth(1).unwrap_or("");
            right.chars().filter(|ch| !ch.is_whitespace()).skip(1).collect()
        })
        .collect()
}

#[test]
fn own_board_shows_ships_and_enemy_board_only_shots() {
    let (mut game, mine) = battling();
    game.fire(Player1, c("J1")).unwrap();
    game.fire(Player1, c("B2")).unwrap();
    game.fire(Player2, c("A1")).unwrap();

    let out = render_boards(&game.snapshot(), Player1, &mine);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 12);

    let own_a: String = lines[2]
        .split("    ")
        .next()
        .unwrap()
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect();
    assert_eq!(own_a, "AXSSSS.....");

    let enemy = enemy_rows(&out);
    assert_eq!(enemy[1], ".o........");
    assert_eq!(enemy[9], "X.........");
    // unstruck enemy ships are never drawn
    assert!(enemy.iter().all(|row| !row.contains('S')));
}

#[test]
fn banner_follows_the_session() {
    let mut game = GameState::new();
    assert_eq!(turn_banner(&game.snapshot(), Player1), "Place your ships.");

    let (battle, _) = battling();
    game = battle;
    assert_eq!(
        turn_banner(&game.snapshot(), Player1),
        "Your turn: choose a target."
    );
    assert_eq!(turn_banner(&game.snapshot(), Player2), "Opponent's turn...");

    for t in ["J1", "J2", "J3", "J4", "J5"] {
        game.fire(Player1, c(t)).unwrap();
    }
    assert!(turn_banner(&game.snapshot(), Player1).starts_with("VICTORY"));
    assert!(turn_banner(&game.snapshot(), Player2).starts_with("DEFEAT"));
}

#[test]
fn banner_while_waiting_for_opponent_placement() {
    let mut game = GameState::new();
    game.place_ships_str("player2", &["A1", "B1", "C1", "D1", "E1"])
        .unwrap();
    assert_eq!(
        turn_banner(&game.snapshot(), Player2),
        "Waiting for the opponent to place ships..."
    );
}

#[test]
fn restart_asks_both_sides_for_a_new_fleet() {
    let (mut game, _) = battling();
    game.fire(Player1, c("J1")).unwrap();
    for slot in PlayerSlot::ALL {
        assert!(!awaiting_my_fleet(&game.snapshot(), slot));
    }

    game.reset();
    let snap = game.snapshot();
    for slot in PlayerSlot::ALL {
        assert!(awaiting_my_fleet(&snap, slot));
        assert_eq!(turn_banner(&snap, slot), "Place your ships.");
    }

    game.place_ships_str("player1", &["A1", "A2", "A3", "A4", "A5"])
        .unwrap();
    let snap = game.snapshot();
    assert!(!awaiting_my_fleet(&snap, Player1));
    assert!(awaiting_my_fleet(&snap, Player2));
}

#[test]
fn readiness_cleared_mid_battle_keeps_the_turn_banner() {
    let (mut game, _) = battling();
    game.fire(Player1, c("B1")).unwrap();
    game.clear_ready(Player1);
    let snap = game.snapshot();
    assert!(!awaiting_my_fleet(&snap, Player1));
    assert_eq!(turn_banner(&snap, Player2), "Your turn: choose a target.");
}
