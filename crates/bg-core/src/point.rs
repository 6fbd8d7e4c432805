//! Board point representation.

use std::fmt;

use crate::NUM_POINTS;

/// A point on the board, indexed 0-23.
///
/// Side A travels from 0 towards 23 and Side B from 23 towards 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point(u8);

impl Point {
    /// The lowest-indexed point.
    pub const FIRST: Point = Point(0);
    /// The highest-indexed point.
    pub const LAST: Point = Point(NUM_POINTS as u8 - 1);

    /// Creates a point from an index (0-23).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if (index as usize) < NUM_POINTS {
            Some(Point(index))
        } else {
            None
        }
    }

    /// Creates a point without bounds checking.
    ///
    /// Callers guarantee `index < 24`.
    #[inline]
    pub(crate) const fn new_unchecked(index: u8) -> Self {
        debug_assert!((index as usize) < NUM_POINTS);
        Point(index)
    }

    /// Returns the index (0-23).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterates over all points in index order.
    pub fn all() -> impl DoubleEndedIterator<Item = Point> {
        (0..NUM_POINTS as u8).map(Point)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
