//! Authoritative state for the single game session.

#[cfg(not(feature = "std"))]
use alloc::{string::ToString, vec::Vec};
use core::fmt;
use core::str::FromStr;

use crate::{
    common::{GameError, ShotResult},
    config::Grid,
    coord::Coordinate,
    fleet::{mark, Fleet},
};

/// One of the two fixed player identities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum PlayerSlot {
    Player1,
    Player2,
}

impl PlayerSlot {
    pub const ALL: [PlayerSlot; 2] = [PlayerSlot::Player1, PlayerSlot::Player2];

    pub fn opponent(self) -> PlayerSlot {
        match self {
            PlayerSlot::Player1 => PlayerSlot::Player2,
            PlayerSlot::Player2 => PlayerSlot::Player1,
        }
    }

    fn index(self) -> usize {
        match self {
            PlayerSlot::Player1 => 0,
            PlayerSlot::Player2 => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerSlot::Player1 => "player1",
            PlayerSlot::Player2 => "player2",
        }
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayerSlot {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayerSlot::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| GameError::InvalidPlayer(s.to_string()))
    }
}

/// Session phase, derived from the player states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Placing,
    Battling,
    Over,
}

/// One player's ocean as seen by the server.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerState {
    pub fleet: Fleet,
    /// Own ships struck by the opponent.
    pub hits: Grid,
    /// Opponent shots that landed in open water.
    pub misses: Grid,
    pub ready: bool,
}

impl PlayerState {
    pub fn ships_remaining(&self) -> usize {
        (self.fleet.grid() & !self.hits).count_ones()
    }

    fn already_targeted(&self, c: Coordinate) -> bool {
        let (r, col) = (c.row(), c.col());
        self.hits.get(r, col).unwrap_or(false) || self.misses.get(r, col).unwrap_or(false)
    }

    fn is_sunk(&self) -> bool {
        self.fleet.is_placed() && self.fleet.grid().is_subset_of(&self.hits)
    }
}

/// Reply to a successful placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub player: PlayerSlot,
    pub ready: bool,
    pub both_ready: bool,
}

/// An accepted shot and the session state right after it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Shot {
    pub attacker: PlayerSlot,
    pub target: Coordinate,
    pub result: ShotResult,
    pub turn: PlayerSlot,
    pub game_over: bool,
    pub winner: Option<PlayerSlot>,
    /// Defender's ships still afloat.
    pub ships_remaining: usize,
}

/// What one player's ocean reveals to everyone: never unstruck ships.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardView {
    pub player: PlayerSlot,
    pub ready: bool,
    pub hits: Vec<Coordinate>,
    pub misses: Vec<Coordinate>,
    pub ships_remaining: usize,
}

/// Read-only projection returned by the status query.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// Bumped by every accepted mutation.
    pub version: u64,
    pub phase: Phase,
    pub current_turn: PlayerSlot,
    pub game_over: bool,
    pub winner: Option<PlayerSlot>,
    pub players: [BoardView; 2],
}

impl Snapshot {
    pub fn player(&self, slot: PlayerSlot) -> &BoardView {
        &self.players[slot.index()]
    }
}

/// The game session: both oceans, the turn pointer and the outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    players: [PlayerState; 2],
    current_turn: PlayerSlot,
    winner: Option<PlayerSlot>,
    version: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh session: nothing placed, `player1` to move once battle starts.
    pub fn new() -> Self {
        Self {
            players: [PlayerState::default(); 2],
            current_turn: PlayerSlot::Player1,
            winner: None,
            version: 0,
        }
    }

    pub fn player(&self, slot: PlayerSlot) -> &PlayerState {
        &self.players[slot.index()]
    }

    fn player_mut(&mut self, slot: PlayerSlot) -> &mut PlayerState {
        &mut self.players[slot.index()]
    }

    pub fn current_turn(&self) -> PlayerSlot {
        self.current_turn
    }

    pub fn winner(&self) -> Option<PlayerSlot> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn both_ready(&self) -> bool {
        self.players.iter().all(|p| p.ready)
    }

    /// Battle starts once both players are ready and stays started after the
    /// first shot, whatever happens to the ready flags.
    pub fn battle_started(&self) -> bool {
        self.both_ready() || self.shots_exchanged()
    }

    pub fn phase(&self) -> Phase {
        if self.is_over() {
            Phase::Over
        } else if self.battle_started() {
            Phase::Battling
        } else {
            Phase::Placing
        }
    }

    fn shots_exchanged(&self) -> bool {
        self.players
            .iter()
            .any(|p| !p.hits.is_empty() || !p.misses.is_empty())
    }

    /// Place a fleet from wire strings, validating the player, the count and
    /// then each coordinate, in that order.
    pub fn place_ships_str<S: AsRef<str>>(
        &mut self,
        player: &str,
        ships: &[S],
    ) -> Result<Placement, GameError> {
        let slot: PlayerSlot = player.parse()?;
        if ships.len() != crate::config::NUM_SHIPS {
            return Err(GameError::WrongCount(ships.len()));
        }
        let cells = ships
            .iter()
            .map(|s| s.as_ref().parse::<Coordinate>())
            .collect::<Result<Vec<_>, _>>()?;
        self.place_ships(slot, &cells)
    }

    /// Store a complete fleet for `slot` and mark it ready.
    ///
    /// Re-placing is allowed until the first shot is fired. When this makes
    /// both players ready the turn pointer is reset to `player1`.
    pub fn place_ships(
        &mut self,
        slot: PlayerSlot,
        cells: &[Coordinate],
    ) -> Result<Placement, GameError> {
        let fleet = Fleet::place(cells)?;
        if self.is_over() || self.shots_exchanged() {
            return Err(GameError::PlacementClosed);
        }
        let player = self.player_mut(slot);
        player.fleet = fleet;
        player.ready = true;
        let both_ready = self.both_ready();
        if both_ready {
            self.current_turn = PlayerSlot::Player1;
        }
        self.version += 1;
        Ok(Placement {
            player: slot,
            ready: true,
            both_ready,
        })
    }

    /// Fire from wire strings. Checks run in this order: game over, player,
    /// placement, turn, coordinate, repeat target.
    pub fn fire_str(&mut self, player: &str, target: &str) -> Result<Shot, GameError> {
        if self.is_over() {
            return Err(GameError::AlreadyGameOver);
        }
        let slot: PlayerSlot = player.parse()?;
        self.ensure_can_fire(slot)?;
        let target: Coordinate = target.parse()?;
        self.fire(slot, target)
    }

    fn ensure_can_fire(&self, slot: PlayerSlot) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::AlreadyGameOver);
        }
        if !self.battle_started() {
            return Err(GameError::PlacementIncomplete);
        }
        if slot != self.current_turn {
            return Err(GameError::NotYourTurn);
        }
        Ok(())
    }

    /// Resolve a shot by `slot` at the opponent's ocean.
    ///
    /// A hit keeps the turn; a miss passes it. Rejections leave the state
    /// untouched.
    pub fn fire(&mut self, slot: PlayerSlot, target: Coordinate) -> Result<Shot, GameError> {
        self.ensure_can_fire(slot)?;
        let defender = self.player_mut(slot.opponent());
        if defender.already_targeted(target) {
            return Err(GameError::AlreadyShotHere(target));
        }
        let result = if defender.fleet.contains(target) {
            mark(&mut defender.hits, target);
            if defender.is_sunk() {
                ShotResult::Victory
            } else {
                ShotResult::Hit
            }
        } else {
            mark(&mut defender.misses, target);
            ShotResult::Miss
        };
        let ships_remaining = defender.ships_remaining();
        match result {
            ShotResult::Victory => self.winner = Some(slot),
            ShotResult::Miss => self.current_turn = slot.opponent(),
            ShotResult::Hit => {}
        }
        self.version += 1;
        Ok(Shot {
            attacker: slot,
            target,
            result,
            turn: self.current_turn,
            game_over: self.is_over(),
            winner: self.winner,
            ships_remaining,
        })
    }

    /// Clear `slot`'s readiness only; ships, shots and the turn stay. Before
    /// the first shot this reopens placement; mid-battle firing carries on.
    pub fn clear_ready(&mut self, slot: PlayerSlot) {
        self.player_mut(slot).ready = false;
        self.version += 1;
    }

    /// Back to the freshly-created session. The version keeps counting so
    /// pollers notice the restart.
    pub fn reset(&mut self) {
        let version = self.version + 1;
        *self = Self::new();
        self.version = version;
    }

    pub fn snapshot(&self) -> Snapshot {
        let view = |slot: PlayerSlot| {
            let p = self.player(slot);
            BoardView {
                player: slot,
                ready: p.ready,
                hits: cells(&p.hits),
                misses: cells(&p.misses),
                ships_remaining: p.ships_remaining(),
            }
        };
        Snapshot {
            version: self.version,
            phase: self.phase(),
            current_turn: self.current_turn,
            game_over: self.is_over(),
            winner: self.winner,
            players: [view(PlayerSlot::Player1), view(PlayerSlot::Player2)],
        }
    }
}

fn cells(grid: &Grid) -> Vec<Coordinate> {
    grid.iter_set_bits()
        .filter_map(|(r, c)| Coordinate::new(r, c))
        .collect()
}
