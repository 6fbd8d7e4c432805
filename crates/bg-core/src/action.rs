//! Action representation.

use std::fmt;

use crate::{Die, Point};

/// What kind of single-die action is being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ActionKind {
    /// Move a checker from a board point by the die, possibly bearing it off.
    Move = 0,
    /// Enter a checker from the bar; the origin is the entry point reached.
    Enter = 1,
}

/// A single-die action: an origin plus the die that drives it.
///
/// For [`ActionKind::Move`] the origin is the point the checker leaves and
/// the direction is implied by the side to move. For [`ActionKind::Enter`]
/// the origin is the entry point the checker lands on.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Action {
    origin: Point,
    die: Die,
    kind: ActionKind,
}

impl Action {
    /// A placeholder action (not playable).
    pub const NULL: Action = Action {
        origin: Point::FIRST,
        die: Die::One,
        kind: ActionKind::Move,
    };

    /// Creates a board move from `origin` by `die`.
    #[inline]
    pub const fn movement(origin: Point, die: Die) -> Self {
        Action {
            origin,
            die,
            kind: ActionKind::Move,
        }
    }

    /// Creates a bar entry landing on `point` using `die`.
    #[inline]
    pub const fn enter(point: Point, die: Die) -> Self {
        Action {
            origin: point,
            die,
            kind: ActionKind::Enter,
        }
    }

    /// Returns the origin point (the entry point for bar entries).
    #[inline]
    pub const fn origin(self) -> Point {
        self.origin
    }

    /// Returns the die consumed by this action.
    #[inline]
    pub const fn die(self) -> Die {
        self.die
    }

    /// Returns the action kind.
    #[inline]
    pub const fn kind(self) -> ActionKind {
        self.kind
    }

    /// Returns true if this is a bar entry.
    #[inline]
    pub const fn is_entry(self) -> bool {
        matches!(self.kind, ActionKind::Enter)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Action({})", self)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ActionKind::Move => write!(f, "{}/{}", self.origin, self.die),
            ActionKind::Enter => write!(f, "bar/{}", self.die),
        }
    }
}
