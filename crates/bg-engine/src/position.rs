//! Backgammon position representation.

use bg_core::{
    Action, ActionKind, DiceError, DicePool, Die, Point, Side, Snapshot, SnapshotError,
    CHECKERS_PER_SIDE, NUM_POINTS,
};
use thiserror::Error;
use tracing::debug;

use crate::dice::{roll_pool, DiceSource};
use crate::movegen::candidate_actions;

/// Errors raised when an action cannot be applied to a position.
///
/// These are bounds and invariant violations only. Whether an action is
/// legal under the maximal-dice-usage rule is the engine's concern.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error(transparent)]
    Dice(#[from] DiceError),

    #[error("side {0} has no checker on the bar")]
    EmptyBar(Side),

    #[error("side {side} has no checker on point {point}")]
    EmptyOrigin { side: Side, point: Point },

    #[error("side {side} enters with a {die} on point {expected}, not {point}")]
    WrongEntryPoint {
        side: Side,
        die: Die,
        point: Point,
        expected: Point,
    },

    #[error("point {point} is held by two or more checkers of side {owner}")]
    PointBlocked { point: Point, owner: Side },
}

/// Standard opening layout for Side A as (index, count); B mirrors it.
const OPENING: [(u8, u8); 4] = [(0, 2), (11, 5), (16, 3), (18, 5)];

/// Complete backgammon position state.
///
/// A position is a plain value: copying it yields an independent board, which
/// is how the legality search explores hypothetical continuations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Checker counts per point, indexed by side then point.
    points: [[u8; NUM_POINTS]; 2],
    /// Checkers waiting to re-enter.
    bar: [u8; 2],
    /// Checkers permanently removed from play.
    borne_off: [u8; 2],
    /// Remaining die uses this turn.
    dice: DicePool,
    /// The side to move.
    side_to_move: Side,
}

impl Position {
    /// Creates the standard opening position.
    ///
    /// Each side rolls one die, re-rolling ties. The higher roller moves
    /// first and plays both rolled values.
    pub fn startpos<D: DiceSource + ?Sized>(dice: &mut D) -> Self {
        let (roll_a, roll_b) = loop {
            let a = dice.roll_die();
            let b = dice.roll_die();
            if a != b {
                break (a, b);
            }
        };
        let mut position = Self::opening_layout();
        position.side_to_move = if roll_a > roll_b { Side::A } else { Side::B };
        position.dice = DicePool::from_roll(roll_a, roll_b);
        debug!(
            side = %position.side_to_move,
            dice = %position.dice,
            "opening roll decided"
        );
        position
    }

    /// The standard layout with no dice and A to move.
    pub fn opening_layout() -> Self {
        let mut points = [[0u8; NUM_POINTS]; 2];
        for (index, count) in OPENING {
            points[Side::A.index()][index as usize] = count;
            points[Side::B.index()][NUM_POINTS - 1 - index as usize] = count;
        }
        Position {
            points,
            bar: [0; 2],
            borne_off: [0; 2],
            dice: DicePool::EMPTY,
            side_to_move: Side::A,
        }
    }

    /// Creates a position from an explicit snapshot.
    ///
    /// Borne-off counts are whatever is missing from board and bar.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, SnapshotError> {
        snapshot.validate()?;

        let mut points = [[0u8; NUM_POINTS]; 2];
        for (index, &count) in snapshot.points.iter().enumerate() {
            if count > 0 {
                points[Side::A.index()][index] = count as u8;
            } else if count < 0 {
                points[Side::B.index()][index] = count.unsigned_abs();
            }
        }

        let mut borne_off = [0u8; 2];
        for side in Side::ALL {
            // validate() bounds this by 15.
            let in_play = snapshot.checkers_in_play(side) as u8;
            borne_off[side.index()] = CHECKERS_PER_SIDE - in_play;
        }

        Ok(Position {
            points,
            bar: snapshot.bar,
            borne_off,
            dice: snapshot.dice,
            side_to_move: snapshot.side_to_move,
        })
    }

    /// Creates a position from snapshot text notation.
    pub fn from_notation(s: &str) -> Result<Self, SnapshotError> {
        Self::from_snapshot(&Snapshot::parse(s)?)
    }

    /// Exports the position as a snapshot.
    pub fn to_snapshot(&self) -> Snapshot {
        let mut points = [0i8; NUM_POINTS];
        for (index, slot) in points.iter_mut().enumerate() {
            let a = self.points[Side::A.index()][index] as i8;
            let b = self.points[Side::B.index()][index] as i8;
            *slot = a - b;
        }
        Snapshot {
            points,
            bar: self.bar,
            dice: self.dice,
            side_to_move: self.side_to_move,
        }
    }

    /// Exports the position as snapshot text notation.
    pub fn to_notation(&self) -> String {
        self.to_snapshot().to_string()
    }

    /// Returns the side to move.
    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// Returns the remaining dice pool.
    #[inline]
    pub fn dice(&self) -> DicePool {
        self.dice
    }

    /// Returns the total number of remaining die uses.
    #[inline]
    pub fn dice_remaining(&self) -> u8 {
        self.dice.remaining()
    }

    /// Returns true if the given face still has a use this turn.
    pub fn face_available(&self, face: u8) -> Result<bool, DiceError> {
        self.dice.face_available(face)
    }

    /// Returns how many checkers `side` has on `point`.
    #[inline]
    pub fn checkers(&self, side: Side, point: Point) -> u8 {
        self.points[side.index()][point.index()]
    }

    /// Returns the bar count for `side`.
    #[inline]
    pub fn bar(&self, side: Side) -> u8 {
        self.bar[side.index()]
    }

    /// Returns how many checkers `side` has borne off.
    #[inline]
    pub fn borne_off(&self, side: Side) -> u8 {
        self.borne_off[side.index()]
    }

    /// Returns how many checkers `side` has on the board (excluding the bar).
    pub fn checkers_on_board(&self, side: Side) -> u8 {
        self.points[side.index()].iter().sum()
    }

    /// Returns how many checkers `side` still has in play (board and bar).
    pub fn checkers_in_play(&self, side: Side) -> u8 {
        self.checkers_on_board(side) + self.bar(side)
    }

    /// Returns the side occupying `point` and its count, if any.
    pub fn owner(&self, point: Point) -> Option<(Side, u8)> {
        Side::ALL.into_iter().find_map(|side| {
            let count = self.checkers(side, point);
            (count > 0).then_some((side, count))
        })
    }

    /// Iterates over points where `side` has at least one checker, in index order.
    pub fn occupied_points(&self, side: Side) -> impl DoubleEndedIterator<Item = Point> + '_ {
        Point::all().filter(move |&p| self.checkers(side, p) > 0)
    }

    /// Returns true if the opponent of `side` holds `point` with two or more checkers.
    #[inline]
    pub fn is_blocked_for(&self, side: Side, point: Point) -> bool {
        self.checkers(side.opposite(), point) >= 2
    }

    /// Applies a single action for the side to move.
    ///
    /// Only bounds and occupancy are checked; the action is assumed to come
    /// from the legal set. Either the whole action is applied or, on error,
    /// the position is left untouched.
    pub fn apply_action(&mut self, action: Action) -> Result<(), PositionError> {
        let us = self.side_to_move;
        let die = action.die();

        if !self.dice.is_available(die) {
            return Err(DiceError::Exhausted(die).into());
        }

        let landing = match action.kind() {
            ActionKind::Enter => {
                if self.bar(us) == 0 {
                    return Err(PositionError::EmptyBar(us));
                }
                let expected = us.entry_point(die);
                if action.origin() != expected {
                    return Err(PositionError::WrongEntryPoint {
                        side: us,
                        die,
                        point: action.origin(),
                        expected,
                    });
                }
                Some(expected)
            }
            ActionKind::Move => {
                if self.checkers(us, action.origin()) == 0 {
                    return Err(PositionError::EmptyOrigin {
                        side: us,
                        point: action.origin(),
                    });
                }
                us.destination(action.origin(), die)
            }
        };

        if let Some(to) = landing {
            if self.is_blocked_for(us, to) {
                return Err(PositionError::PointBlocked {
                    point: to,
                    owner: us.opposite(),
                });
            }
        }

        // All checks passed; mutate.
        match action.kind() {
            ActionKind::Enter => self.bar[us.index()] -= 1,
            ActionKind::Move => self.points[us.index()][action.origin().index()] -= 1,
        }
        match landing {
            Some(to) => {
                self.points[us.index()][to.index()] += 1;
                let them = us.opposite();
                if self.checkers(them, to) == 1 {
                    self.points[them.index()][to.index()] = 0;
                    self.bar[them.index()] += 1;
                }
            }
            None => self.borne_off[us.index()] += 1,
        }
        self.dice.consume(die)?;
        Ok(())
    }

    /// Passes the turn to the opponent with a freshly rolled dice pool.
    pub fn switch_side<D: DiceSource + ?Sized>(&mut self, dice: &mut D) {
        self.side_to_move = self.side_to_move.opposite();
        self.dice = roll_pool(dice);
        debug!(side = %self.side_to_move, dice = %self.dice, "turn passed");
    }

    /// Ends the turn when no dice remain or the mover has nothing to play.
    ///
    /// Returns true if the side to move changed.
    pub fn end_turn_if_exhausted<D: DiceSource + ?Sized>(&mut self, dice: &mut D) -> bool {
        if self.dice.is_empty() || candidate_actions(self).is_empty() {
            self.switch_side(dice);
            true
        } else {
            false
        }
    }

    /// Replaces the dice pool, e.g. when a driver rolls externally.
    pub fn set_dice(&mut self, dice: DicePool) {
        self.dice = dice;
    }
}
