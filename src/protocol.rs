#![cfg(feature = "std")]

//! Wire messages exchanged between the game server and its clients.

use crate::common::GameError;
use crate::game::{Placement, Shot, Snapshot};

pub use crate::config::PROTOCOL_VERSION;

/// One operation against the game service.
///
/// Player and coordinate fields are carried as raw strings so malformed
/// input reaches the service and is rejected as a domain error rather than
/// failing to decode.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Request {
    PlaceShips { player: String, ships: Vec<String> },
    Fire { player: String, target: String },
    Status,
    Restart,
    ResetReady { player: String },
}

/// Error payload: the rejection, its human-readable text and a failure flag.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ErrorPayload {
    pub error: GameError,
    pub message: String,
    pub success: bool,
}

impl From<GameError> for ErrorPayload {
    fn from(error: GameError) -> Self {
        ErrorPayload {
            message: error.to_string(),
            error,
            success: false,
        }
    }
}

/// Fire outcome with the banner text shown to the attacker.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FireReport {
    pub message: String,
    pub shot: Shot,
}

impl From<Shot> for FireReport {
    fn from(shot: Shot) -> Self {
        FireReport {
            message: shot.result.describe().to_string(),
            shot,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Response {
    Placed(Placement),
    Fired(FireReport),
    Status(Snapshot),
    Ack { status: String },
    Error(ErrorPayload),
}

/// Frames on the wire.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Message {
    Handshake { version: u32 },
    HandshakeAck { version: u32 },
    Request { seq: u64, body: Request },
    Response { seq: u64, body: Response },
}
