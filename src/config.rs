use crate::bitboard::BitBoard;

pub const BOARD_SIZE: u8 = 10;
pub const NUM_SHIPS: usize = 5;

/// Row labels, top to bottom.
pub const ROW_LABELS: &[u8; BOARD_SIZE as usize] = b"ABCDEFGHIJ";

/// One ocean's worth of cells.
pub type Grid = BitBoard<u128, { BOARD_SIZE as usize }>;

/// Version spoken in the `Handshake` exchange.
pub const PROTOCOL_VERSION: u32 = 1;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:5000";

/// Interval between status polls issued by the interactive client.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;

/// Client-side request timeout. Expiry is reported as a connectivity failure.
pub const DEFAULT_CLIENT_TIMEOUT_MS: u64 = 5_000;

/// Largest frame accepted on the wire.
pub const MAX_MESSAGE_SIZE: u32 = 64 * 1024;
