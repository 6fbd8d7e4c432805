//! Plays random games and tallies their results.

use bg_core::Side;
use bg_engine::rules::RuleSet;
use bg_engine::{Game, GameResult, StandardBackgammon, WinKind};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

use crate::config::SelfplayConfig;

/// Record of a single self-play game.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    /// Seed the game was played with.
    pub seed: u64,
    /// Actions played.
    pub actions: u32,
    /// Turns started.
    pub turns: u32,
    /// Result, or `None` if the game hit the action cap.
    pub result: Option<GameResult>,
}

/// Aggregate over all games played.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub games: u32,
    pub unfinished: u32,
    pub wins_a: u32,
    pub wins_b: u32,
    pub singles: u32,
    pub gammons: u32,
    pub backgammons: u32,
    /// Sum of signed scores, positive favouring A.
    pub net_score: i64,
    pub total_actions: u64,
    /// Positions expanded by the legality search across all games.
    pub search_nodes: u64,
}

impl Summary {
    /// Folds one game into the tally.
    pub fn record(&mut self, game: &GameRecord) {
        self.games += 1;
        self.total_actions += u64::from(game.actions);
        let Some(result) = game.result else {
            self.unfinished += 1;
            return;
        };
        match result.winner {
            Side::A => self.wins_a += 1,
            Side::B => self.wins_b += 1,
        }
        match result.kind {
            WinKind::Single => self.singles += 1,
            WinKind::Gammon => self.gammons += 1,
            WinKind::Backgammon => self.backgammons += 1,
        }
        self.net_score += i64::from(result.score());
    }

    /// Mean actions per game.
    pub fn mean_actions(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_actions as f64 / f64::from(self.games)
        }
    }
}

/// Plays one game with uniformly random legal actions.
///
/// Dice and action choice draw from separate generators derived from `seed`.
/// Returns the record and the number of positions expanded while validating
/// the played actions.
pub fn play_game(seed: u64, config: &SelfplayConfig) -> (GameRecord, u64) {
    let rules = StandardBackgammon;
    let mut dice = StdRng::seed_from_u64(seed);
    let mut chooser = StdRng::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15);
    let position = rules.initial_position(&mut dice);
    let mut game =
        Game::from_position(position, dice).with_exhaustive_search(config.exhaustive_search);
    let mut actions = 0;

    while !game.is_game_over() && actions < config.max_actions {
        let legal = game.legal_actions();
        let Some(&action) = legal.as_slice().choose(&mut chooser) else {
            tracing::warn!(seed, position = %game.position().to_notation(), "no legal action");
            break;
        };
        if let Err(e) = game.play(action) {
            tracing::error!(seed, %action, "rejected action: {}", e);
            break;
        }
        actions += 1;
    }

    let result = rules.game_result(game.position());
    match result {
        Some(r) => tracing::debug!(seed, actions, turns = game.turns(), "{}", r),
        None => tracing::debug!(seed, actions, "game abandoned at action cap"),
    }

    let record = GameRecord {
        seed,
        actions,
        turns: game.turns(),
        result,
    };
    (record, game.search_nodes())
}

/// Plays every configured game and returns the summary.
pub fn run(config: &SelfplayConfig) -> Summary {
    let mut summary = Summary::default();
    for n in 0..config.games {
        let (record, nodes) = play_game(config.seed.wrapping_add(u64::from(n)), config);
        summary.search_nodes += nodes;
        summary.record(&record);
    }
    summary
}
