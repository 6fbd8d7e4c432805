//! Backgammon position model and move-legality engine.
//!
//! This crate provides:
//! - [`Position`] - board, bar, borne-off counts, dice pool and side to move
//! - [`candidate_actions`] / [`legal_actions`] - single-die generation and the
//!   maximal-dice-usage filter built on [`MaxUsageSearch`]
//! - [`outcome`] - single, gammon and backgammon scoring
//! - [`Game`] - a validated turn loop over an explicit [`DiceSource`]
//! - [`RuleSet`] - the seam for rule variants
//!
//! # Architecture
//!
//! Positions are small `Copy` values. The search explores hypothetical
//! continuations by applying actions to copies and memoizes the fewest
//! unusable dice per distinct position, so the caller's position is never
//! touched while legality is being resolved.
//!
//! # Example
//!
//! ```
//! use bg_engine::{legal_actions, outcome_score, FixedDice, Game};
//!
//! let mut game = Game::new(FixedDice::new(&[3, 1, 6, 4]));
//! let first = legal_actions(game.position())[0];
//! game.play(first).unwrap();
//! assert_eq!(outcome_score(game.position()), 0);
//! ```

mod dice;
mod game;
pub mod movegen;
mod position;
pub mod rules;

pub use dice::{roll_pool, DiceSource, FixedDice};
pub use game::{Game, GameAction, GameError, MAX_CONSECUTIVE_PASSES};
pub use movegen::{
    candidate_actions, is_legal, landing_point, legal_actions, make_action, ActionList,
    MaxUsageSearch,
};
pub use position::{Position, PositionError};
pub use rules::{outcome, outcome_score, GameResult, RuleSet, StandardBackgammon, WinKind};
