//! Core types for backgammon.
//!
//! This crate provides the fundamental types shared by the engine and drivers:
//! - [`Side`] for the two players and their direction of travel
//! - [`Point`] for board coordinates
//! - [`Die`] and [`DicePool`] for the dice available this turn
//! - [`Action`] for single-die moves and bar entries
//! - [`Snapshot`] for explicit position setup and its text notation

mod action;
mod dice;
mod point;
mod side;
mod snapshot;

pub use action::{Action, ActionKind};
pub use dice::{DiceError, DicePool, Die};
pub use point::Point;
pub use side::{Side, HOME_POINTS};
pub use snapshot::{Snapshot, SnapshotError};

/// Number of points on the board.
pub const NUM_POINTS: usize = 24;

/// Number of checkers each side owns.
pub const CHECKERS_PER_SIDE: u8 = 15;
