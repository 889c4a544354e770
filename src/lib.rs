#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod bitboard;
mod common;
mod config;
mod coord;
mod fleet;
mod game;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod service;
#[cfg(feature = "std")]
pub mod skeleton;
#[cfg(feature = "std")]
pub mod stub;
#[cfg(feature = "std")]
pub mod transport;
#[cfg(feature = "std")]
pub mod ui;

pub use bitboard::{BitBoard, BitBoardError};
pub use common::*;
pub use config::*;
pub use coord::Coordinate;
pub use fleet::Fleet;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, parse_level, LOG_ENV};
#[cfg(feature = "std")]
pub use protocol::{ErrorPayload, FireReport, Message, Request, Response};
#[cfg(feature = "std")]
pub use service::GameService;
#[cfg(feature = "std")]
pub use skeleton::{serve, Skeleton};
#[cfg(feature = "std")]
pub use stub::{ClientError, Stub};
#[cfg(feature = "std")]
pub use transport::tcp::TcpTransport;
#[cfg(feature = "std")]
pub use ui::{awaiting_my_fleet, render_boards, turn_banner};
