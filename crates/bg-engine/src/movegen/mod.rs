//! Move generation.
//!
//! Generation happens in two layers:
//! - [`candidate_actions`] lists every single-die action the board allows
//!   right now (forced bar entry, bearing off, or normal movement).
//! - [`legal_actions`] keeps only the candidates that start a sequence using
//!   the maximum number of dice, as found by [`MaxUsageSearch`].

pub mod perft;
mod search;

use bg_core::{Action, Point, Side};

use crate::Position;

pub use search::MaxUsageSearch;

/// A list of actions with a fixed maximum capacity.
///
/// At most 15 occupied points times 6 faces can be generated in one ply, so a
/// fixed-size array avoids heap allocations during the search.
#[derive(Clone)]
pub struct ActionList {
    actions: [Action; Self::MAX_ACTIONS],
    len: usize,
}

impl ActionList {
    /// Maximum number of single-die actions in any position.
    pub const MAX_ACTIONS: usize = 96;

    /// Creates an empty action list.
    #[inline]
    pub const fn new() -> Self {
        ActionList {
            actions: [Action::NULL; Self::MAX_ACTIONS],
            len: 0,
        }
    }

    /// Adds an action to the list.
    #[inline]
    pub fn push(&mut self, action: Action) {
        debug_assert!(self.len < Self::MAX_ACTIONS);
        self.actions[self.len] = action;
        self.len += 1;
    }

    /// Returns the number of actions.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the actions.
    #[inline]
    pub fn as_slice(&self) -> &[Action] {
        &self.actions[..self.len]
    }

    /// Iterates over the actions in generation order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.as_slice().iter()
    }

    /// Returns true if `action` is in the list.
    #[inline]
    pub fn contains(&self, action: &Action) -> bool {
        self.as_slice().contains(action)
    }

    /// Retains only actions for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Action) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.actions[read]) {
                self.actions[write] = self.actions[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for ActionList {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for ActionList {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for ActionList {}

impl std::ops::Index<usize> for ActionList {
    type Output = Action;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.actions[index]
    }
}

impl<'a> IntoIterator for &'a ActionList {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for ActionList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates every single-die action available to the side to move.
///
/// Exactly one of three cases applies, checked in this order: forced bar
/// entry, bearing off, normal movement.
pub fn candidate_actions(position: &Position) -> ActionList {
    let mut actions = ActionList::new();
    let us = position.side_to_move();

    if position.bar(us) > 0 {
        generate_entries(position, us, &mut actions);
    } else if can_bear_off(position, us) {
        generate_bear_off(position, us, &mut actions);
    } else {
        generate_normal(position, us, &mut actions);
    }

    actions
}

/// Returns true if every checker `side` has left sits in its home quadrant.
fn can_bear_off(position: &Position, side: Side) -> bool {
    position.bar(side) == 0 && position.occupied_points(side).all(|p| side.is_home(p))
}

/// Bar entries: one per available die whose entry point is open.
fn generate_entries(position: &Position, us: Side, actions: &mut ActionList) {
    for die in position.dice().dice() {
        let to = us.entry_point(die);
        if !position.is_blocked_for(us, to) {
            actions.push(Action::enter(to, die));
        }
    }
}

/// Bearing-off phase.
///
/// For each die: bear off from the exact point if occupied; otherwise move
/// any checker farther from the edge; with nothing farther, the checker on
/// the highest point may bear off with the larger die.
fn generate_bear_off(position: &Position, us: Side, actions: &mut ActionList) {
    for die in position.dice().dice() {
        let exact = us.point_at_pip(die.face());
        if let Some(point) = exact {
            if position.checkers(us, point) > 0 {
                actions.push(Action::movement(point, die));
                continue;
            }
        }

        let mut farther_exists = false;
        for pip in (die.face() + 1)..=bg_core::HOME_POINTS {
            let Some(from) = us.point_at_pip(pip) else {
                continue;
            };
            if position.checkers(us, from) == 0 {
                continue;
            }
            farther_exists = true;
            match us.destination(from, die) {
                Some(to) if !position.is_blocked_for(us, to) => {
                    actions.push(Action::movement(from, die));
                }
                _ => {}
            }
        }

        if !farther_exists {
            // Highest occupied pip below the die value.
            let highest = (1..die.face())
                .rev()
                .filter_map(|pip| us.point_at_pip(pip))
                .find(|&p| position.checkers(us, p) > 0);
            if let Some(from) = highest {
                actions.push(Action::movement(from, die));
            }
        }
    }
}

/// Normal movement: every occupied point by every available die, staying on
/// the board and avoiding points held by two or more enemy checkers.
fn generate_normal(position: &Position, us: Side, actions: &mut ActionList) {
    for from in position.occupied_points(us) {
        for die in position.dice().dice() {
            if let Some(to) = us.destination(from, die) {
                if !position.is_blocked_for(us, to) {
                    actions.push(Action::movement(from, die));
                }
            }
        }
    }
}

/// Applies an action to a copy of the position and returns the copy.
///
/// Used for hypothetical boards; the input is never modified. The side to
/// move does not change. An action that cannot be applied yields an
/// unchanged copy.
pub fn make_action(position: &Position, action: Action) -> Position {
    let mut next = *position;
    if next.apply_action(action).is_err() {
        return *position;
    }
    next
}

/// Generates the actions legal under the maximal-dice-usage rule.
pub fn legal_actions(position: &Position) -> ActionList {
    MaxUsageSearch::new().legal_actions(position)
}

/// Returns true if `action` is legal in `position`.
pub fn is_legal(position: &Position, action: Action) -> bool {
    legal_actions(position).contains(&action)
}

/// Returns the point an action lands on, or `None` when it bears off.
pub fn landing_point(side: Side, action: Action) -> Option<Point> {
    if action.is_entry() {
        Some(action.origin())
    } else {
        side.destination(action.origin(), action.die())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bg_core::{DicePool, Die};

    fn pt(i: u8) -> Point {
        Point::from_index(i).unwrap()
    }

    fn with_dice(mut pos: Position, a: Die, b: Die) -> Position {
        pos.set_dice(DicePool::from_roll(a, b));
        pos
    }

    #[test]
    fn actionlist_push_and_iterate() {
        let mut list = ActionList::new();
        assert!(list.is_empty());
        list.push(Action::movement(pt(0), Die::One));
        list.push(Action::movement(pt(0), Die::Two));
        assert_eq!(list.len(), 2);
        assert_eq!(list[1], Action::movement(pt(0), Die::Two));
        assert_eq!(list.into_iter().count(), 2);
    }

    #[test]
    fn actionlist_retain() {
        let mut list = ActionList::new();
        for die in Die::ALL {
            list.push(Action::movement(pt(3), die));
        }
        list.retain(|a| a.die().face() % 2 == 0);
        assert_eq!(list.len(), 3);
        assert!(list.contains(&Action::movement(pt(3), Die::Six)));
        assert!(!list.contains(&Action::movement(pt(3), Die::One)));
    }

    #[test]
    fn opening_candidates_one_two() {
        let pos = with_dice(Position::opening_layout(), Die::One, Die::Two);
        let actions = candidate_actions(&pos);
        let expected = [
            Action::movement(pt(0), Die::One),
            Action::movement(pt(0), Die::Two),
            Action::movement(pt(11), Die::Two),
            Action::movement(pt(16), Die::One),
            Action::movement(pt(16), Die::Two),
            Action::movement(pt(18), Die::One),
            Action::movement(pt(18), Die::Two),
        ];
        assert_eq!(actions.as_slice(), &expected);
    }

    #[test]
    fn blocked_destination_is_not_a_candidate() {
        let pos = with_dice(Position::opening_layout(), Die::One, Die::Two);
        // 11 -> 12 is held by five B checkers.
        assert!(!candidate_actions(&pos).contains(&Action::movement(pt(11), Die::One)));
    }

    #[test]
    fn side_b_moves_downwards() {
        let mut snapshot = Position::opening_layout().to_snapshot();
        snapshot.side_to_move = Side::B;
        snapshot.dice = DicePool::from_roll(Die::Six, Die::Five);
        let pos = Position::from_snapshot(&snapshot).unwrap();
        let actions = candidate_actions(&pos);
        // 23 -> 17 is open, 23 -> 18 is A's five-stack.
        assert!(actions.contains(&Action::movement(pt(23), Die::Six)));
        assert!(!actions.contains(&Action::movement(pt(23), Die::Five)));
        // 12 -> 7 joins B's own stack.
        assert!(actions.contains(&Action::movement(pt(12), Die::Five)));
    }

    #[test]
    fn bar_entry_is_forced() {
        let pos = Position::from_notation(
            "1,0,0,0,-2,0,0,-3,0,0,0,5,-5,0,0,0,3,0,5,0,0,0,0,-2 1/0 35 a",
        )
        .unwrap();
        let actions = candidate_actions(&pos);
        // Die 5 enters on point 4, held by two B checkers.
        assert_eq!(actions.as_slice(), &[Action::enter(pt(2), Die::Three)]);
    }

    #[test]
    fn bar_entry_for_side_b() {
        let pos = Position::from_notation(
            "2,0,0,0,0,-5,0,-3,0,0,0,5,-5,0,0,0,3,0,5,0,0,0,0,-1 0/1 16 b",
        )
        .unwrap();
        let actions = candidate_actions(&pos);
        assert_eq!(actions.as_slice(), &[Action::enter(pt(23), Die::One)]);
        // Die 6 would enter on point 18, which holds five A checkers.
        assert!(pos.is_blocked_for(Side::B, pt(18)));
    }

    #[test]
    fn bear_off_exact_point() {
        let pos = Position::from_notation(
            "0,0,0,0,0,-15,0,0,0,0,0,0,0,0,0,0,0,0,0,0,2,0,3,0 0/0 24 a",
        )
        .unwrap();
        let actions = candidate_actions(&pos);
        // Die 4 addresses point 20, die 2 addresses point 22.
        assert_eq!(
            actions.as_slice(),
            &[
                Action::movement(pt(22), Die::Two),
                Action::movement(pt(20), Die::Four)
            ]
        );
    }

    #[test]
    fn bear_off_must_move_farther_checker() {
        let pos = Position::from_notation(
            "0,0,0,0,0,-15,0,0,0,0,0,0,0,0,0,0,0,0,0,1,0,0,0,1 0/0 3 a",
        )
        .unwrap();
        // Die 3 addresses point 21 (empty); point 19 is farther.
        assert_eq!(
            candidate_actions(&pos).as_slice(),
            &[Action::movement(pt(19), Die::Three)]
        );
    }

    #[test]
    fn bear_off_waste_uses_highest_point() {
        let pos = Position::from_notation(
            "0,0,0,0,0,-15,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1,0,2 0/0 6 a",
        )
        .unwrap();
        assert_eq!(
            candidate_actions(&pos).as_slice(),
            &[Action::movement(pt(21), Die::Six)]
        );
    }

    #[test]
    fn bear_off_waste_for_side_b() {
        let pos = Position::from_notation(
            "2,-1,-3,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,13 0/0 5 b",
        )
        .unwrap();
        assert_eq!(
            candidate_actions(&pos).as_slice(),
            &[Action::movement(pt(2), Die::Five)]
        );
    }

    #[test]
    fn blocked_farther_checker_suppresses_waste() {
        // B's farther checker on 4 cannot move 2 onto A's point 2, and the
        // nearer checker on 0 may not bear off instead.
        let pos = Position::from_notation(
            "-1,0,2,0,-1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,13 0/0 2 b",
        )
        .unwrap();
        assert!(candidate_actions(&pos).is_empty());
    }

    #[test]
    fn not_bearing_off_with_checker_outside_home() {
        let pos = Position::from_notation(
            "0,0,0,0,0,-15,0,0,0,0,0,0,0,0,0,0,0,1,0,0,0,0,0,14 0/0 6 a",
        )
        .unwrap();
        let actions = candidate_actions(&pos);
        // 23 + 6 runs off the board, which normal movement does not allow.
        assert_eq!(actions.as_slice(), &[Action::movement(pt(17), Die::Six)]);
    }

    #[test]
    fn make_action_leaves_input_untouched() {
        let pos = with_dice(Position::opening_layout(), Die::One, Die::Two);
        let next = make_action(&pos, Action::movement(pt(0), Die::One));
        assert_eq!(pos, with_dice(Position::opening_layout(), Die::One, Die::Two));
        assert_eq!(next.checkers(Side::A, pt(1)), 1);
        assert_eq!(next.side_to_move(), Side::A);
    }

    #[test]
    fn landing_points() {
        assert_eq!(
            landing_point(Side::A, Action::movement(pt(5), Die::Three)),
            Some(pt(8))
        );
        assert_eq!(
            landing_point(Side::B, Action::enter(pt(20), Die::Four)),
            Some(pt(20))
        );
        assert_eq!(landing_point(Side::A, Action::movement(pt(22), Die::Two)), None);
    }

    #[test]
    fn is_legal_matches_legal_actions() {
        let pos = with_dice(Position::opening_layout(), Die::One, Die::Two);
        assert!(is_legal(&pos, Action::movement(pt(0), Die::One)));
        assert!(!is_legal(&pos, Action::movement(pt(11), Die::One)));
    }
}
