//! Common types: domain errors and shot results.

#[cfg(not(feature = "std"))]
use alloc::string::String;
use core::fmt;

use crate::config::NUM_SHIPS;
use crate::coord::Coordinate;

/// Result of a shot that was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotResult {
    /// Shot struck a ship; the attacker keeps the turn.
    Hit,
    /// Shot landed in open water; the turn passes.
    Miss,
    /// Shot struck the last ship afloat.
    Victory,
}

impl ShotResult {
    /// Banner text shown to the attacking player.
    pub fn describe(&self) -> &'static str {
        match self {
            ShotResult::Hit => "Hit!",
            ShotResult::Miss => "Miss!",
            ShotResult::Victory => "All enemy ships destroyed. Victory!",
        }
    }
}

/// Rejections produced by the game state machine.
///
/// Every variant is an expected outcome of a request and travels back to the
/// client as a normal error payload.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameError {
    /// Player identifier is neither `player1` nor `player2`.
    InvalidPlayer(String),
    /// Coordinate string is malformed or off the board.
    InvalidCoordinate(String),
    /// Placement did not carry exactly `NUM_SHIPS` entries.
    WrongCount(usize),
    /// Placement named the same cell twice.
    DuplicateCoordinate(Coordinate),
    /// Fire attempted by the player who does not hold the turn.
    NotYourTurn,
    /// Fire attempted after the game concluded.
    AlreadyGameOver,
    /// Target was already shot at.
    AlreadyShotHere(Coordinate),
    /// Fire attempted before both fleets were placed.
    PlacementIncomplete,
    /// Placement attempted once shots have been exchanged.
    PlacementClosed,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidPlayer(p) => write!(f, "Invalid player: {:?}", p),
            GameError::InvalidCoordinate(c) => write!(f, "Invalid coordinate: {:?}", c),
            GameError::WrongCount(n) => {
                write!(f, "Exactly {} ships are required, got {}", NUM_SHIPS, n)
            }
            GameError::DuplicateCoordinate(c) => write!(f, "Ship placed twice at {}", c),
            GameError::NotYourTurn => write!(f, "Not your turn!"),
            GameError::AlreadyGameOver => write!(f, "Game over!"),
            GameError::AlreadyShotHere(c) => write!(f, "Already fired at {}!", c),
            GameError::PlacementIncomplete => write!(f, "Both players must place their ships first"),
            GameError::PlacementClosed => write!(f, "Ships can no longer be moved in this game"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}
