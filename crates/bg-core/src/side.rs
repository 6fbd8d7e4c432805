//! Side representation and per-side geometry.
//!
//! Every direction-dependent rule is expressed through [`Side`] so that move
//! generation is written once for both players. The central notion is the
//! *pip*: a point's distance from the side's bear-off edge (1-24). A side's
//! home quadrant is pips 1-6 and it enters from the bar at pip `25 - face`.

use serde::{Deserialize, Serialize};

use crate::{Die, Point, NUM_POINTS};

/// Number of points in a home quadrant.
pub const HOME_POINTS: u8 = 6;

/// The two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Side {
    /// Moves from low to high index; home is points 18-23.
    A = 0,
    /// Moves from high to low index; home is points 0-5.
    B = 1,
}

impl Side {
    /// Both sides, A first.
    pub const ALL: [Side; 2] = [Side::A, Side::B];

    /// Returns the opposing side.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Returns the index (0 for A, 1 for B).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the direction of travel along point indices (+1 for A, -1 for B).
    #[inline]
    pub const fn direction(self) -> i8 {
        match self {
            Side::A => 1,
            Side::B => -1,
        }
    }

    /// Returns the sign used for this side's winning score (+1 for A, -1 for B).
    #[inline]
    pub const fn sign(self) -> i8 {
        self.direction()
    }

    /// Returns the distance of `point` from this side's bear-off edge (1-24).
    #[inline]
    pub const fn pip(self, point: Point) -> u8 {
        match self {
            Side::A => NUM_POINTS as u8 - point.index() as u8,
            Side::B => point.index() as u8 + 1,
        }
    }

    /// Returns the point at the given pip, or `None` outside 1-24.
    #[inline]
    pub const fn point_at_pip(self, pip: u8) -> Option<Point> {
        if pip == 0 || pip as usize > NUM_POINTS {
            return None;
        }
        let index = match self {
            Side::A => NUM_POINTS as u8 - pip,
            Side::B => pip - 1,
        };
        Some(Point::new_unchecked(index))
    }

    /// Returns true if `point` lies in this side's home quadrant.
    #[inline]
    pub const fn is_home(self, point: Point) -> bool {
        self.pip(point) <= HOME_POINTS
    }

    /// Returns the point a checker reaches when entering from the bar with `die`.
    #[inline]
    pub const fn entry_point(self, die: Die) -> Point {
        // Entry pip is 25 - face, always within 19-24.
        match self.point_at_pip(25 - die.face()) {
            Some(point) => point,
            None => Point::FIRST,
        }
    }

    /// Returns the point reached by moving `die` from `from`, or `None` when
    /// the move carries the checker past the bear-off edge.
    #[inline]
    pub const fn destination(self, from: Point, die: Die) -> Option<Point> {
        let pip = self.pip(from);
        if pip > die.face() {
            self.point_at_pip(pip - die.face())
        } else {
            None
        }
    }

    /// Returns the lowercase notation letter for this side.
    #[inline]
    pub const fn to_char(self) -> char {
        match self {
            Side::A => 'a',
            Side::B => 'b',
        }
    }

    /// Parses a side letter (`a`/`b`, case-insensitive).
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'a' => Some(Side::A),
            'b' => Some(Side::B),
            _ => None,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}
