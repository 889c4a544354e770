#![cfg(feature = "std")]

//! Synchronised command/query façade over the game session.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, info};

use crate::{
    common::{GameError, ShotResult},
    game::{GameState, Placement, PlayerSlot, Shot, Snapshot},
    protocol::{ErrorPayload, FireReport, Request, Response},
};

/// Owns the one [`GameState`] of the process.
///
/// Mutators take the write half of a single lock so read-decide-write runs
/// atomically across callers; status queries share the read half.
#[derive(Debug, Default)]
pub struct GameService {
    state: RwLock<GameState>,
}

impl GameService {
    pub fn new() -> Self {
        Self::default()
    }

    // Mutators validate before writing, so a poisoned lock still guards a
    // consistent state.
    fn read(&self) -> RwLockReadGuard<'_, GameState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, GameState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn place_ships<S: AsRef<str>>(
        &self,
        player: &str,
        ships: &[S],
    ) -> Result<Placement, GameError> {
        let slot: PlayerSlot = player.parse()?;
        let placement = self.write().place_ships_str(slot.as_str(), ships)?;
        info!(
            "{} placed ships (both ready: {})",
            placement.player, placement.both_ready
        );
        Ok(placement)
    }

    pub fn fire(&self, player: &str, target: &str) -> Result<Shot, GameError> {
        let shot = {
            let mut state = self.write();
            if state.is_over() {
                return Err(GameError::AlreadyGameOver);
            }
            let slot: PlayerSlot = player.parse()?;
            state.fire_str(slot.as_str(), target)?
        };
        match shot.result {
            ShotResult::Victory => info!("{} fired at {}: victory", shot.attacker, shot.target),
            r => debug!("{} fired at {}: {:?}", shot.attacker, shot.target, r),
        }
        Ok(shot)
    }

    pub fn status(&self) -> Snapshot {
        self.read().snapshot()
    }

    pub fn restart(&self) {
        self.write().reset();
        info!("game restarted");
    }

    pub fn reset_ready(&self, player: &str) -> Result<(), GameError> {
        let slot: PlayerSlot = player.parse()?;
        self.write().clear_ready(slot);
        debug!("{} readiness cleared", slot);
        Ok(())
    }

    /// Execute a wire request. Domain rejections become [`Response::Error`].
    pub fn handle(&self, req: Request) -> Response {
        let res = match req {
            Request::PlaceShips { player, ships } => {
                self.place_ships(&player, ships.as_slice()).map(Response::Placed)
            }
            Request::Fire { player, target } => self
                .fire(&player, &target)
                .map(|shot| Response::Fired(FireReport::from(shot))),
            Request::Status => Ok(Response::Status(self.status())),
            Request::Restart => {
                self.restart();
                Ok(Response::Ack {
                    status: "Game restarted".to_string(),
                })
            }
            Request::ResetReady { player } => self.reset_ready(&player).map(|()| Response::Ack {
                status: "Readiness cleared".to_string(),
            }),
        };
        res.unwrap_or_else(|e| {
            debug!("request rejected: {}", e);
            Response::Error(ErrorPayload::from(e))
        })
    }
}
