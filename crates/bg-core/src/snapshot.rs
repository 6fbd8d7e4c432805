//! Explicit position snapshots and their text notation.
//!
//! A snapshot describes a position from the outside: signed checker counts
//! per point (positive for Side A, negative for Side B), bar counts, the dice
//! pool and the side to move. Borne-off counts are implied by the checkers
//! that are missing from board and bar.
//!
//! The text form is four whitespace-separated fields:
//!
//! ```text
//! 2,0,0,0,0,-5,0,-3,0,0,0,5,-5,0,0,0,3,0,5,0,0,0,0,-2 0/0 12 a
//! ```
//!
//! i.e. the 24 point counts, `barA/barB`, the remaining die faces (`-` for
//! none) and the side to move.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::{DiceError, DicePool, Side, CHECKERS_PER_SIDE, NUM_POINTS};

/// Errors that can occur when parsing or validating a snapshot.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("invalid snapshot: expected 4 fields, got {0}")]
    InvalidFieldCount(usize),

    #[error("invalid point counts: {0}")]
    InvalidPoints(String),

    #[error("invalid bar counts: {0}")]
    InvalidBar(String),

    #[error("invalid dice: {0}")]
    InvalidDice(#[from] DiceError),

    #[error("invalid side to move: expected 'a' or 'b', got '{0}'")]
    InvalidSide(String),

    #[error("side {side} has {count} checkers on board and bar, at most 15 allowed")]
    TooManyCheckers { side: Side, count: u32 },
}

/// Raw position description used to seed a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Signed checker count per point: positive for A, negative for B.
    pub points: [i8; NUM_POINTS],
    /// Bar counts, indexed by [`Side::index`].
    pub bar: [u8; 2],
    /// Remaining die uses.
    pub dice: DicePool,
    /// The side to move.
    pub side_to_move: Side,
}

impl Snapshot {
    /// The standard opening layout with no dice set and A to move.
    pub const STARTPOS: &'static str =
        "2,0,0,0,0,-5,0,-3,0,0,0,5,-5,0,0,0,3,0,5,0,0,0,0,-2 0/0 - a";

    /// Parses a snapshot from its text notation and validates it.
    pub fn parse(s: &str) -> Result<Self, SnapshotError> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(SnapshotError::InvalidFieldCount(fields.len()));
        }

        let counts: Vec<&str> = fields[0].split(',').collect();
        if counts.len() != NUM_POINTS {
            return Err(SnapshotError::InvalidPoints(format!(
                "expected {} counts, got {}",
                NUM_POINTS,
                counts.len()
            )));
        }
        let mut points = [0i8; NUM_POINTS];
        for (slot, raw) in points.iter_mut().zip(&counts) {
            *slot = raw
                .trim()
                .parse::<i8>()
                .map_err(|_| SnapshotError::InvalidPoints(format!("bad count '{}'", raw)))?;
        }

        let (bar_a, bar_b) = fields[1]
            .split_once('/')
            .ok_or_else(|| SnapshotError::InvalidBar(fields[1].to_string()))?;
        let parse_bar = |raw: &str| {
            raw.parse::<u8>()
                .map_err(|_| SnapshotError::InvalidBar(fields[1].to_string()))
        };
        let bar = [parse_bar(bar_a)?, parse_bar(bar_b)?];

        let dice = if fields[2] == "-" {
            DicePool::EMPTY
        } else {
            let faces = fields[2]
                .chars()
                .map(|c| {
                    c.to_digit(10)
                        .map(|d| d as u8)
                        .ok_or(DiceError::InvalidFace(0))
                })
                .collect::<Result<Vec<u8>, DiceError>>()?;
            if faces.contains(&0) {
                return Err(DiceError::InvalidFace(0).into());
            }
            DicePool::from_faces(&faces)?
        };

        let mut side_chars = fields[3].chars();
        let side_to_move = match (side_chars.next(), side_chars.next()) {
            (Some(c), None) => Side::from_char(c),
            _ => None,
        }
        .ok_or_else(|| SnapshotError::InvalidSide(fields[3].to_string()))?;

        let snapshot = Snapshot {
            points,
            bar,
            dice,
            side_to_move,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Checks that neither side has more than 15 checkers on board and bar.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        for side in Side::ALL {
            let count = self.checkers_in_play(side);
            if count > CHECKERS_PER_SIDE as u32 {
                return Err(SnapshotError::TooManyCheckers { side, count });
            }
        }
        Ok(())
    }

    /// Returns the number of checkers `side` has on the board.
    pub fn checkers_on_board(&self, side: Side) -> u32 {
        self.points
            .iter()
            .map(|&n| match side {
                Side::A if n > 0 => n as u32,
                Side::B if n < 0 => n.unsigned_abs() as u32,
                _ => 0,
            })
            .sum()
    }

    /// Returns board plus bar checkers for `side`.
    pub fn checkers_in_play(&self, side: Side) -> u32 {
        self.checkers_on_board(side) + self.bar[side.index()] as u32
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, count) in self.points.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", count)?;
        }
        write!(
            f,
            " {}/{} {} {}",
            self.bar[0],
            self.bar[1],
            self.dice,
            self.side_to_move.to_char()
        )
    }
}

impl std::str::FromStr for Snapshot {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Snapshot::parse(s)
    }
}
