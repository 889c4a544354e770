//! Board coordinates and their canonical `"C7"` text form.

#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use crate::common::GameError;
use crate::config::{BOARD_SIZE, ROW_LABELS};

/// A single cell: row `A`..`J`, column `1`..`10`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Coordinate {
    row: u8,
    col: u8,
}

impl Coordinate {
    /// Zero-based row and column. Returns `None` off the board.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        let size = BOARD_SIZE as usize;
        (row < size && col < size).then(|| Coordinate {
            row: row as u8,
            col: col as u8,
        })
    }

    pub fn row(&self) -> usize {
        self.row as usize
    }

    pub fn col(&self) -> usize {
        self.col as usize
    }

    /// Row-major index in `0..100`.
    pub fn index(&self) -> usize {
        self.row() * BOARD_SIZE as usize + self.col()
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        let size = BOARD_SIZE as usize;
        Self::new(idx / size, idx % size)
    }

    /// All 100 cells in row-major order.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..BOARD_SIZE as usize * BOARD_SIZE as usize).filter_map(Self::from_index)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ROW_LABELS[self.row()] as char, self.col + 1)
    }
}

impl FromStr for Coordinate {
    type Err = GameError;

    /// Only the exact canonical spelling is accepted: uppercase letter, then
    /// `1`..`10` without sign or leading zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GameError::InvalidCoordinate(s.to_string());
        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(invalid)?;
        let row = ROW_LABELS
            .iter()
            .position(|&l| l as char == letter)
            .ok_or_else(invalid)?;
        let digits = chars.as_str();
        if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let col: usize = digits.parse().map_err(|_| invalid())?;
        if col == 0 {
            return Err(invalid());
        }
        Coordinate::new(row, col - 1).ok_or_else(invalid)
    }
}

impl TryFrom<String> for Coordinate {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Coordinate> for String {
    fn from(c: Coordinate) -> Self {
        c.to_string()
    }
}
