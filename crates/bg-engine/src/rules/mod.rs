//! Rule set abstraction and game outcome evaluation.
//!
//! This module provides the [`RuleSet`] trait, which abstracts over
//! backgammon variants, and the scoring of finished games.

mod standard;

pub use standard::StandardBackgammon;

use bg_core::{Action, Point, Side};
use serde::{Deserialize, Serialize};

use crate::dice::DiceSource;
use crate::{ActionList, Position};

/// How decisive a win was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinKind {
    /// The loser had borne off at least one checker.
    Single,
    /// The loser had not borne off any checker.
    Gammon,
    /// The loser still had a checker on the bar or in the winner's home quadrant.
    Backgammon,
}

impl WinKind {
    /// Points awarded for this kind of win.
    #[inline]
    pub const fn value(self) -> i8 {
        match self {
            WinKind::Single => 1,
            WinKind::Gammon => 2,
            WinKind::Backgammon => 3,
        }
    }
}

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameResult {
    /// The side that bore off all 15 checkers.
    pub winner: Side,
    /// How decisive the win was.
    pub kind: WinKind,
}

impl GameResult {
    /// Signed score: +1/+2/+3 for an A win, -1/-2/-3 for a B win.
    #[inline]
    pub const fn score(self) -> i8 {
        self.winner.sign() * self.kind.value()
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            WinKind::Single => "single game",
            WinKind::Gammon => "gammon",
            WinKind::Backgammon => "backgammon",
        };
        write!(f, "{} wins a {}", self.winner, kind)
    }
}

/// Returns the game result if either side has borne off every checker.
pub fn outcome(position: &Position) -> Option<GameResult> {
    let winner = Side::ALL
        .into_iter()
        .find(|&side| position.checkers_in_play(side) == 0)?;
    let loser = winner.opposite();

    let stuck_in_winner_home = Point::all()
        .filter(|&p| winner.is_home(p))
        .any(|p| position.checkers(loser, p) > 0);

    let kind = if position.bar(loser) > 0 || stuck_in_winner_home {
        WinKind::Backgammon
    } else if position.borne_off(loser) == 0 {
        WinKind::Gammon
    } else {
        WinKind::Single
    };

    Some(GameResult { winner, kind })
}

/// Returns the signed outcome score, or 0 while the game is ongoing.
pub fn outcome_score(position: &Position) -> i8 {
    outcome(position).map_or(0, GameResult::score)
}

/// Trait for implementing backgammon variants.
///
/// Drivers such as the self-play binary go through a rule set for setup and
/// scoring so they stay variant-agnostic.
pub trait RuleSet {
    /// Returns the initial position, rolling the opening dice from `dice`.
    fn initial_position<D: DiceSource + ?Sized>(&self, dice: &mut D) -> Position;

    /// Generates the single-die actions the board allows, before the
    /// maximal-dice-usage filter.
    fn candidate_actions(&self, position: &Position) -> ActionList;

    /// Generates the legal actions for the side to move.
    fn legal_actions(&self, position: &Position) -> ActionList;

    /// Returns true if `action` is legal in `position`.
    fn is_legal(&self, position: &Position, action: Action) -> bool {
        self.legal_actions(position).contains(&action)
    }

    /// Applies an action to a copy of the position.
    fn make_action(&self, position: &Position, action: Action) -> Position;

    /// Attempts to apply an action, returning `None` if it is not legal.
    fn try_make_action(&self, position: &Position, action: Action) -> Option<Position> {
        if self.is_legal(position, action) {
            Some(self.make_action(position, action))
        } else {
            None
        }
    }

    /// Returns the game result if the game is over, otherwise `None`.
    fn game_result(&self, position: &Position) -> Option<GameResult>;

    /// Returns true if the game is over.
    fn is_game_over(&self, position: &Position) -> bool {
        self.game_result(position).is_some()
    }
}
