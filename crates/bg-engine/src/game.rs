//! Full game management with history tracking.
//!
//! [`Game`] is the validated entry point for untrusted input: it checks that
//! every action belongs to the legal set before applying it, passes the turn
//! when the mover is done, and records the result once a side has borne off.

use bg_core::{Action, Side};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::dice::DiceSource;
use crate::movegen::{candidate_actions, ActionList, MaxUsageSearch};
use crate::rules::{outcome, GameResult};
use crate::{Position, PositionError};

/// Turn passes in a row after which [`Game`] stops rolling for a mover.
pub const MAX_CONSECUTIVE_PASSES: u32 = 64;

/// A recorded action in game history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameAction {
    /// The side that played the action.
    pub side: Side,
    /// The action itself.
    pub action: Action,
}

/// Error type for game operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("illegal action: {0}")]
    IllegalAction(Action),

    #[error("game has already ended")]
    GameAlreadyOver,

    #[error(transparent)]
    Position(#[from] PositionError),
}

/// A backgammon game with its own dice source.
#[derive(Debug, Clone)]
pub struct Game<D: DiceSource> {
    position: Position,
    dice: D,
    history: Vec<GameAction>,
    turns: u32,
    result: Option<GameResult>,
    exhaustive: bool,
    search_nodes: u64,
}

impl<D: DiceSource> Game<D> {
    /// Starts a game from the standard opening, rolling for the first move.
    pub fn new(mut dice: D) -> Self {
        let position = Position::startpos(&mut dice);
        Self::from_position(position, dice)
    }

    /// Starts a game from an arbitrary position.
    ///
    /// If the side to move cannot play, the turn passes immediately.
    pub fn from_position(position: Position, dice: D) -> Self {
        let mut game = Game {
            position,
            dice,
            history: Vec::new(),
            turns: 1,
            result: None,
            exhaustive: false,
            search_nodes: 0,
        };
        game.result = outcome(&game.position);
        if game.result.is_none() {
            game.advance_turn();
        }
        game
    }

    /// Resolves legal actions without memoization.
    pub fn with_exhaustive_search(mut self, exhaustive: bool) -> Self {
        self.exhaustive = exhaustive;
        self
    }

    fn search(&self) -> MaxUsageSearch {
        if self.exhaustive {
            MaxUsageSearch::exhaustive()
        } else {
            MaxUsageSearch::new()
        }
    }

    /// Returns the current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the legal actions for the side to move.
    pub fn legal_actions(&self) -> ActionList {
        if self.result.is_some() {
            return ActionList::new();
        }
        self.search().legal_actions(&self.position)
    }

    /// Returns the game result if the game is over.
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Returns true if the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    /// Returns the actions played so far.
    pub fn history(&self) -> &[GameAction] {
        &self.history
    }

    /// Positions expanded while validating played actions.
    pub fn search_nodes(&self) -> u64 {
        self.search_nodes
    }

    /// Returns the number of turns started, counting the current one.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Plays a single action for the side to move.
    ///
    /// The action must be a member of the current legal set. On success the
    /// turn passes automatically once the mover is done.
    pub fn play(&mut self, action: Action) -> Result<(), GameError> {
        if self.result.is_some() {
            return Err(GameError::GameAlreadyOver);
        }
        let mut search = self.search();
        let legal = search.legal_actions(&self.position);
        self.search_nodes += search.nodes();
        if !legal.contains(&action) {
            return Err(GameError::IllegalAction(action));
        }

        let side = self.position.side_to_move();
        self.position.apply_action(action)?;
        self.history.push(GameAction { side, action });

        if let Some(result) = outcome(&self.position) {
            info!(%result, score = result.score(), turns = self.turns, "game over");
            self.result = Some(result);
            return Ok(());
        }

        self.advance_turn();
        Ok(())
    }

    /// Passes the turn until the side to move has something to play.
    ///
    /// Both sides may be shut out in a row (e.g. each on the bar against a
    /// closed board). After [`MAX_CONSECUTIVE_PASSES`] the loop gives up and
    /// leaves the mover with an empty legal set.
    fn advance_turn(&mut self) {
        let mut passes = 0;
        while self.position.end_turn_if_exhausted(&mut self.dice) {
            self.turns += 1;
            // The legal set is empty exactly when there is no candidate.
            if !candidate_actions(&self.position).is_empty() {
                break;
            }
            passes += 1;
            debug!(side = %self.position.side_to_move(), passes, "no legal action, turn passes");
            if passes >= MAX_CONSECUTIVE_PASSES {
                warn!(passes, "both sides shut out, stopping turn rotation");
                break;
            }
        }
    }
}
