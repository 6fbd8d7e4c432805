//! Dice faces and the per-turn pool of remaining die uses.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised by dice queries and updates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiceError {
    #[error("die face must be between 1 and 6, got {0}")]
    InvalidFace(u8),

    #[error("at most four dice may be set, got {0}")]
    TooManyFaces(usize),

    #[error("no remaining use of die {0}")]
    Exhausted(Die),

    #[error("a dice pool holds at most four uses, got counts {0:?}")]
    InvalidPool([u8; 6]),
}

/// A single die face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Die {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
}

impl Die {
    /// All faces in ascending order.
    pub const ALL: [Die; 6] = [Die::One, Die::Two, Die::Three, Die::Four, Die::Five, Die::Six];

    /// Creates a die from its face value (1-6).
    #[inline]
    pub const fn from_face(face: u8) -> Option<Self> {
        match face {
            1 => Some(Die::One),
            2 => Some(Die::Two),
            3 => Some(Die::Three),
            4 => Some(Die::Four),
            5 => Some(Die::Five),
            6 => Some(Die::Six),
            _ => None,
        }
    }

    /// Returns the face value (1-6).
    #[inline]
    pub const fn face(self) -> u8 {
        self as u8
    }

    /// Returns the pool slot for this face (0-5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize - 1
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.face())
    }
}

/// Remaining uses of each face for the current turn.
///
/// This is a multiset, not an ordered pair: a fresh roll holds one use of
/// each of two distinct faces, or four uses of one face for a double.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "[u8; 6]")]
pub struct DicePool([u8; 6]);

impl DicePool {
    /// A pool with no remaining uses.
    pub const EMPTY: DicePool = DicePool([0; 6]);

    /// Builds the pool for a roll of two dice.
    pub fn from_roll(first: Die, second: Die) -> Self {
        let mut counts = [0u8; 6];
        if first == second {
            counts[first.index()] = 4;
        } else {
            counts[first.index()] = 1;
            counts[second.index()] = 1;
        }
        DicePool(counts)
    }

    /// Builds a pool from raw per-face counts.
    ///
    /// No face may exceed four uses and the total may not exceed four.
    pub fn from_counts(counts: [u8; 6]) -> Result<Self, DiceError> {
        let total: u32 = counts.iter().map(|&c| u32::from(c)).sum();
        if total > 4 {
            return Err(DiceError::InvalidPool(counts));
        }
        Ok(DicePool(counts))
    }

    /// Builds a pool from up to four explicit faces; `0` means "unset".
    pub fn from_faces(faces: &[u8]) -> Result<Self, DiceError> {
        let set: Vec<u8> = faces.iter().copied().filter(|&f| f != 0).collect();
        if set.len() > 4 {
            return Err(DiceError::TooManyFaces(set.len()));
        }
        let mut counts = [0u8; 6];
        for face in set {
            let die = Die::from_face(face).ok_or(DiceError::InvalidFace(face))?;
            counts[die.index()] += 1;
        }
        Ok(DicePool(counts))
    }

    /// Returns the remaining uses of `die`.
    #[inline]
    pub const fn count(&self, die: Die) -> u8 {
        self.0[die.index()]
    }

    /// Returns true if `die` can still be played this turn.
    #[inline]
    pub const fn is_available(&self, die: Die) -> bool {
        self.0[die.index()] > 0
    }

    /// Checks availability for a raw face value.
    pub fn face_available(&self, face: u8) -> Result<bool, DiceError> {
        let die = Die::from_face(face).ok_or(DiceError::InvalidFace(face))?;
        Ok(self.is_available(die))
    }

    /// Total remaining die uses.
    #[inline]
    pub fn remaining(&self) -> u8 {
        self.0.iter().sum()
    }

    /// Returns true if no die uses remain.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&c| c == 0)
    }

    /// Uses one instance of `die`.
    pub fn consume(&mut self, die: Die) -> Result<(), DiceError> {
        let slot = &mut self.0[die.index()];
        if *slot == 0 {
            return Err(DiceError::Exhausted(die));
        }
        *slot -= 1;
        Ok(())
    }

    /// Iterates over the distinct faces that still have uses, ascending.
    pub fn dice(&self) -> impl Iterator<Item = Die> + '_ {
        Die::ALL.into_iter().filter(move |&d| self.is_available(d))
    }

    /// Returns every remaining use as a face value, ascending.
    pub fn faces(&self) -> Vec<u8> {
        Die::ALL
            .iter()
            .flat_map(|&d| std::iter::repeat(d.face()).take(self.count(d) as usize))
            .collect()
    }

    /// Returns the raw per-face counts.
    #[inline]
    pub const fn counts(&self) -> [u8; 6] {
        self.0
    }
}

impl TryFrom<[u8; 6]> for DicePool {
    type Error = DiceError;

    fn try_from(counts: [u8; 6]) -> Result<Self, Self::Error> {
        DicePool::from_counts(counts)
    }
}

impl fmt::Display for DicePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let faces = self.faces();
        if faces.is_empty() {
            return write!(f, "-");
        }
        for face in faces {
            write!(f, "{}", face)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roll_distinct_faces() {
        let pool = DicePool::from_roll(Die::Three, Die::Five);
        assert_eq!(pool.count(Die::Three), 1);
        assert_eq!(pool.count(Die::Five), 1);
        assert_eq!(pool.remaining(), 2);
    }

    #[test]
    fn roll_double_gives_four_uses() {
        let pool = DicePool::from_roll(Die::Four, Die::Four);
        assert_eq!(pool.count(Die::Four), 4);
        assert_eq!(pool.remaining(), 4);
        assert_eq!(pool.dice().collect::<Vec<_>>(), vec![Die::Four]);
    }

    #[test]
    fn from_faces_ignores_unset() {
        let pool = DicePool::from_faces(&[2, 0, 6, 0]).unwrap();
        assert_eq!(pool.faces(), vec![2, 6]);
    }

    #[test]
    fn from_faces_rejects_bad_input() {
        assert_eq!(DicePool::from_faces(&[7]), Err(DiceError::InvalidFace(7)));
        assert_eq!(
            DicePool::from_faces(&[1, 1, 1, 1, 1]),
            Err(DiceError::TooManyFaces(5))
        );
    }

    #[test]
    fn face_available_range() {
        let pool = DicePool::from_roll(Die::One, Die::Two);
        assert_eq!(pool.face_available(1), Ok(true));
        assert_eq!(pool.face_available(3), Ok(false));
        assert_eq!(pool.face_available(0), Err(DiceError::InvalidFace(0)));
        assert_eq!(pool.face_available(7), Err(DiceError::InvalidFace(7)));
    }

    #[test]
    fn consume_decrements_until_exhausted() {
        let mut pool = DicePool::from_roll(Die::Six, Die::Six);
        for _ in 0..4 {
            pool.consume(Die::Six).unwrap();
        }
        assert!(pool.is_empty());
        assert_eq!(pool.consume(Die::Six), Err(DiceError::Exhausted(Die::Six)));
    }

    #[test]
    fn from_counts_rejects_oversized_pools() {
        assert_eq!(
            DicePool::from_counts([0, 0, 4, 0, 0, 0]),
            Ok(DicePool::from_roll(Die::Three, Die::Three))
        );
        assert_eq!(
            DicePool::from_counts([200, 200, 0, 0, 0, 0]),
            Err(DiceError::InvalidPool([200, 200, 0, 0, 0, 0]))
        );
        assert!(DicePool::from_counts([0, 0, 0, 0, 5, 0]).is_err());
        assert!(DicePool::from_counts([1, 1, 1, 1, 1, 0]).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(DicePool::from_roll(Die::Two, Die::One).to_string(), "12");
        assert_eq!(DicePool::from_roll(Die::Five, Die::Five).to_string(), "5555");
        assert_eq!(DicePool::EMPTY.to_string(), "-");
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn roll_pool_counts(a in 1u8..=6, b in 1u8..=6) {
                let pool = DicePool::from_roll(
                    Die::from_face(a).unwrap(),
                    Die::from_face(b).unwrap(),
                );
                prop_assert_eq!(pool.remaining(), if a == b { 4 } else { 2 });
                prop_assert!(pool.face_available(a).unwrap());
                prop_assert!(pool.face_available(b).unwrap());
            }

            #[test]
            fn consuming_every_face_empties_the_pool(
                faces in proptest::collection::vec(1u8..=6, 0..=4)
            ) {
                let mut pool = DicePool::from_faces(&faces).unwrap();
                prop_assert_eq!(pool.remaining() as usize, faces.len());
                for &face in &faces {
                    pool.consume(Die::from_face(face).unwrap()).unwrap();
                }
                prop_assert!(pool.is_empty());
            }
        }
    }
}
