//! Dice sources.
//!
//! The engine never touches global randomness: every roll is drawn from a
//! [`DiceSource`] handed in by the caller, so a seeded generator or a
//! scripted sequence makes whole games reproducible.

use bg_core::{DicePool, Die};
use rand::Rng;

/// A source of single die draws.
pub trait DiceSource {
    /// Draws one die.
    fn roll_die(&mut self) -> Die;
}

impl<R: Rng> DiceSource for R {
    fn roll_die(&mut self) -> Die {
        let face: u8 = self.gen_range(1..=6);
        Die::from_face(face).unwrap_or(Die::One)
    }
}

/// Replays a fixed sequence of die faces, cycling when exhausted.
///
/// Faces outside 1-6 are clamped into range.
#[derive(Debug, Clone)]
pub struct FixedDice {
    faces: Vec<Die>,
    next: usize,
}

impl FixedDice {
    /// Creates a source from raw face values.
    pub fn new(faces: &[u8]) -> Self {
        let faces = faces
            .iter()
            .map(|&f| Die::from_face(f.clamp(1, 6)).unwrap_or(Die::One))
            .collect::<Vec<_>>();
        FixedDice { faces, next: 0 }
    }
}

impl DiceSource for FixedDice {
    fn roll_die(&mut self) -> Die {
        if self.faces.is_empty() {
            return Die::One;
        }
        let die = self.faces[self.next % self.faces.len()];
        self.next += 1;
        die
    }
}

/// Draws two dice and returns the resulting pool.
pub fn roll_pool<D: DiceSource + ?Sized>(dice: &mut D) -> DicePool {
    let first = dice.roll_die();
    let second = dice.roll_die();
    DicePool::from_roll(first, second)
}
