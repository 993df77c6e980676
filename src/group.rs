//! Connectivity and liberty analysis over the board.
//!
//! Groups are returned as bitboards, so merging groups reached from
//! several directions never counts a stone twice.

use crate::board::{Board, bit, spread};
use crate::types::{Point, Stone};

/// All stones of `color` orthogonally connected to `at`.
///
/// Returns an empty mask when `at` does not hold `color`.
pub fn connected_group(board: &Board, at: Point, color: Stone) -> u128 {
    let own = board.stones(color);
    let mut group = own & bit(at.index());

    loop {
        let grown = (group | spread(group)) & own;
        if grown == group {
            return group;
        }
        group = grown;
    }
}

/// Empty cells orthogonally adjacent to the group.
pub fn liberties(board: &Board, group: u128) -> u128 {
    spread(group) & board.empty()
}

pub fn has_liberty(board: &Board, group: u128) -> bool {
    liberties(board, group) != 0
}
