//! Turn-sequence counting for move generator validation.
//!
//! Like chess perft, this walks the tree of legal actions and counts leaves.
//! Here a leaf is the end of the current turn: the point where the side to
//! move has no legal action left. Counts are compared against hand-checked
//! values to catch generator regressions.

use super::{legal_actions, make_action};
use crate::Position;

/// Counts the distinct ordered action sequences that complete the turn.
///
/// A position with no legal action counts as one (empty) sequence.
pub fn count_sequences(position: &Position) -> u64 {
    let actions = legal_actions(position);
    if actions.is_empty() {
        return 1;
    }

    let mut sequences = 0u64;
    for action in &actions {
        let next = make_action(position, *action);
        sequences += count_sequences(&next);
    }
    sequences
}

/// Sequence counts per first action, sorted by action notation.
/// Useful for narrowing down which branch disagrees with a reference count.
pub fn sequences_divide(position: &Position) -> Vec<(String, u64)> {
    let actions = legal_actions(position);
    let mut results = Vec::with_capacity(actions.len());

    for action in &actions {
        let next = make_action(position, *action);
        results.push((action.to_string(), count_sequences(&next)));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
