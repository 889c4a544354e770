#![cfg(feature = "std")]

//! Plain-text rendering of the two oceans from a status snapshot.

use std::fmt::Write;

use crate::{
    config::{BOARD_SIZE, ROW_LABELS},
    coord::Coordinate,
    game::{BoardView, Phase, PlayerSlot, Snapshot},
};

const SHIP: char = 'S';
const HIT: char = 'X';
const MISS: char = 'o';
const WATER: char = '.';

fn cell(view: &BoardView, own_ships: &[Coordinate], c: Coordinate) -> char {
    if view.hits.contains(&c) {
        HIT
    } else if view.misses.contains(&c) {
        MISS
    } else if own_ships.contains(&c) {
        SHIP
    } else {
        WATER
    }
}

/// Own ocean (with `my_ships` revealed) beside the opponent's ocean, which
/// only ever shows where shots landed.
pub fn render_boards(snapshot: &Snapshot, me: PlayerSlot, my_ships: &[Coordinate]) -> String {
    let size = BOARD_SIZE as usize;
    let mine = snapshot.player(me);
    let theirs = snapshot.player(me.opponent());
    let mut out = String::new();

    let header: String = (1..=size).map(|c| format!("{:>3}", c)).collect();
    let _ = writeln!(out, "   {:<w$}     {}", "Your fleet", "Enemy waters", w = size * 3);
    let _ = writeln!(out, "  {}      {}", header, header);
    for r in 0..size {
        let label = ROW_LABELS[r] as char;
        let _ = write!(out, "{} ", label);
        for c in 0..size {
            if let Some(coord) = Coordinate::new(r, c) {
                let _ = write!(out, "{:>3}", cell(mine, my_ships, coord));
            }
        }
        let _ = write!(out, "    {} ", label);
        for c in 0..size {
            if let Some(coord) = Coordinate::new(r, c) {
                let _ = write!(out, "{:>3}", cell(theirs, &[], coord));
            }
        }
        out.push('\n');
    }
    out
}

/// One-line banner describing whose move it is or how the game ended.
pub fn turn_banner(snapshot: &Snapshot, me: PlayerSlot) -> String {
    if let Some(winner) = snapshot.winner {
        return if winner == me {
            "VICTORY! You have sunk all enemy ships.".to_string()
        } else {
            "DEFEAT. All your ships have been destroyed.".to_string()
        };
    }
    if snapshot.phase == Phase::Placing {
        let opponent = snapshot.player(me.opponent());
        return if snapshot.player(me).ready && !opponent.ready {
            "Waiting for the opponent to place ships...".to_string()
        } else {
            "Place your ships.".to_string()
        };
    }
    if snapshot.current_turn == me {
        "Your turn: choose a target.".to_string()
    } else {
        "Opponent's turn...".to_string()
    }
}

/// `true` when the session is back in placement and `me` has no confirmed
/// fleet, e.g. after a restart wiped it.
pub fn awaiting_my_fleet(snapshot: &Snapshot, me: PlayerSlot) -> bool {
    snapshot.phase == Phase::Placing && !snapshot.player(me).ready
}
