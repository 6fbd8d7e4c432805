//! Standard backgammon rules.

use bg_core::Action;

use super::{outcome, GameResult, RuleSet};
use crate::dice::DiceSource;
use crate::movegen::{self, ActionList};
use crate::Position;

/// Standard backgammon rules (no cube).
///
/// - Forced bar re-entry before any other move
/// - Bearing off once every checker is home, with exact, farther and
///   highest-point ordering
/// - Blot capture
/// - Maximal dice usage, playing the larger die when only one fits
/// - Single, gammon and backgammon scoring
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardBackgammon;

impl RuleSet for StandardBackgammon {
    fn initial_position<D: DiceSource + ?Sized>(&self, dice: &mut D) -> Position {
        Position::startpos(dice)
    }

    fn candidate_actions(&self, position: &Position) -> ActionList {
        movegen::candidate_actions(position)
    }

    fn legal_actions(&self, position: &Position) -> ActionList {
        movegen::legal_actions(position)
    }

    fn make_action(&self, position: &Position, action: Action) -> Position {
        movegen::make_action(position, action)
    }

    fn game_result(&self, position: &Position) -> Option<GameResult> {
        outcome(position)
    }
}
