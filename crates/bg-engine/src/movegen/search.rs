//! Maximal-dice-usage search.
//!
//! A turn must consume as many dice as the position allows. For every
//! candidate action the search explores the remainder of the turn and
//! records the fewest dice that can be left unused. Candidates that cannot
//! reach the global minimum are discarded; when some dice must go unused,
//! only the largest die among the survivors may be played.
//!
//! Sub-positions recur heavily within a turn (doubles in particular), so the
//! default search memoizes results per distinct [`Position`].

use std::collections::HashMap;

use tracing::{debug, trace};

use super::{candidate_actions, ActionList};
use crate::Position;

/// Search over the remaining moves of a turn.
#[derive(Debug, Clone)]
pub struct MaxUsageSearch {
    cache: Option<HashMap<Position, u8>>,
    nodes: u64,
}

impl MaxUsageSearch {
    /// Creates a memoizing search.
    pub fn new() -> Self {
        MaxUsageSearch {
            cache: Some(HashMap::new()),
            nodes: 0,
        }
    }

    /// Creates a search that re-explores every sub-position without caching.
    pub fn exhaustive() -> Self {
        MaxUsageSearch {
            cache: None,
            nodes: 0,
        }
    }

    /// Returns the number of positions expanded so far.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Returns the number of memoized sub-positions.
    pub fn cached(&self) -> usize {
        self.cache.as_ref().map_or(0, HashMap::len)
    }

    /// Returns the fewest dice that can remain unused once the turn is played
    /// out from `position`.
    pub fn min_dice_remaining(&mut self, position: &Position) -> u8 {
        if let Some(&value) = self.cache.as_ref().and_then(|c| c.get(position)) {
            return value;
        }

        self.nodes += 1;
        let candidates = candidate_actions(position);
        let mut best = position.dice_remaining();
        for action in &candidates {
            if best == 0 {
                break;
            }
            let mut next = *position;
            if next.apply_action(*action).is_err() {
                continue;
            }
            best = best.min(self.min_dice_remaining(&next));
        }

        if let Some(cache) = self.cache.as_mut() {
            cache.insert(*position, best);
        }
        best
    }

    /// Filters the candidate actions down to those legal under the
    /// maximal-dice-usage rule.
    pub fn legal_actions(&mut self, position: &Position) -> ActionList {
        let mut actions = candidate_actions(position);
        if actions.is_empty() {
            return actions;
        }

        let mut scores = Vec::with_capacity(actions.len());
        for action in &actions {
            let mut next = *position;
            let score = match next.apply_action(*action) {
                Ok(()) => self.min_dice_remaining(&next),
                Err(_) => u8::MAX,
            };
            scores.push((*action, score));
        }

        let best = scores.iter().map(|&(_, s)| s).min().unwrap_or(u8::MAX);
        let mut keep: Vec<_> = scores
            .iter()
            .filter(|&&(_, s)| s == best)
            .map(|&(a, _)| a)
            .collect();

        if best > 0 {
            // Some dice go unused whatever is played: the larger die must be used.
            if let Some(largest) = keep.iter().map(|a| a.die()).max() {
                keep.retain(|a| a.die() == largest);
            }
        }

        let candidates = actions.len();
        actions.retain(|a| keep.contains(a));
        debug!(
            side = %position.side_to_move(),
            dice = %position.dice(),
            candidates,
            legal = actions.len(),
            min_remaining = best,
            nodes = self.nodes,
            cached = self.cached(),
            "legal actions resolved"
        );
        trace!(?actions, "legal action set");
        actions
    }
}

impl Default for MaxUsageSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bg_core::{Action, DicePool, Die, Point};

    fn pt(i: u8) -> Point {
        Point::from_index(i).unwrap()
    }

    #[test]
    fn no_candidates_returns_remaining_dice() {
        let pos = Position::from_notation(
            "-2,-2,-2,-2,-2,-2,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,14 1/0 56 a",
        )
        .unwrap();
        let mut search = MaxUsageSearch::new();
        assert_eq!(search.min_dice_remaining(&pos), 2);
        assert!(search.legal_actions(&pos).is_empty());
    }

    #[test]
    fn empty_pool_is_a_leaf() {
        let pos = Position::opening_layout();
        assert_eq!(MaxUsageSearch::new().min_dice_remaining(&pos), 0);
    }

    #[test]
    fn opening_roll_uses_both_dice() {
        let mut pos = Position::opening_layout();
        pos.set_dice(DicePool::from_roll(Die::Six, Die::Five));
        assert_eq!(MaxUsageSearch::new().min_dice_remaining(&pos), 0);
    }

    #[test]
    fn candidate_that_strands_a_die_is_dropped() {
        // Playing 16/1 leaves the 4 with nowhere to go (14 and 21 are held),
        // while 10/1 and 16/4 both allow the other die to follow.
        let pos = Position::from_notation(
            "0,0,0,0,0,0,0,0,0,0,1,0,0,0,-2,0,1,0,0,0,0,-2,0,13 0/0 14 a",
        )
        .unwrap();
        let candidates = candidate_actions(&pos);
        assert_eq!(
            candidates.as_slice(),
            &[
                Action::movement(pt(10), Die::One),
                Action::movement(pt(16), Die::One),
                Action::movement(pt(16), Die::Four)
            ]
        );
        let legal = MaxUsageSearch::new().legal_actions(&pos);
        assert_eq!(
            legal.as_slice(),
            &[
                Action::movement(pt(10), Die::One),
                Action::movement(pt(16), Die::Four)
            ]
        );
    }

    #[test]
    fn larger_die_when_only_one_can_be_played() {
        // A single checker on 0 with a prime beyond: either die alone is
        // playable but not both, so the larger must be used.
        let pos = Position::from_notation(
            "1,0,0,0,0,0,0,-2,-2,-2,-2,-2,-2,0,0,0,0,0,14,0,0,0,0,-3 0/0 56 a",
        )
        .unwrap();
        let candidates = candidate_actions(&pos);
        assert!(candidates.contains(&Action::movement(pt(0), Die::Five)));
        assert!(candidates.contains(&Action::movement(pt(0), Die::Six)));
        let legal = MaxUsageSearch::new().legal_actions(&pos);
        assert_eq!(legal.as_slice(), &[Action::movement(pt(0), Die::Six)]);
    }

    #[test]
    fn memoized_and_exhaustive_agree() {
        let mut pos = Position::opening_layout();
        pos.set_dice(DicePool::from_roll(Die::Two, Die::Two));
        let mut memo = MaxUsageSearch::new();
        let mut full = MaxUsageSearch::exhaustive();
        assert_eq!(memo.legal_actions(&pos), full.legal_actions(&pos));
        assert!(memo.nodes() <= full.nodes());
        assert!(memo.cached() > 0);
        assert_eq!(full.cached(), 0);
    }
}
