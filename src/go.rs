//! Go-stage placement: captures, suicide, simple ko and capture scoring.

use tracing::debug;

use crate::board::{BOARD_SIZE, Board, bit, is_corner, points, spread};
use crate::error::MoveError;
use crate::group::{connected_group, has_liberty};
use crate::types::{GameState, Point};

/// Capture reward by distance from the nearest edge.
const EDGE_SCORES: [u32; 5] = [9, 7, 5, 3, 1];

/// Result of an accepted Go placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoMove {
    pub board: Board,
    /// Stones removed by this placement.
    pub captured: u128,
    /// Added to the mover's running score by the caller.
    pub capture_score: u32,
    pub ko_point: Option<Point>,
}

/// Validates a placement for the side to move and computes its outcome.
///
/// `state` is not modified.
pub fn apply_go_move(state: &GameState, at: Point) -> Result<GoMove, MoveError> {
    if is_corner(at) {
        return Err(MoveError::Corner(at));
    }
    if !state.board.is_empty_at(at) {
        return Err(MoveError::Occupied(at));
    }
    if state.ko_point == Some(at) {
        return Err(MoveError::Ko(at));
    }

    let me = state.turn;
    let opp = me.opponent();
    let mut board = state.board;
    board.place(at, me);

    let mut captured = 0u128;
    let adjacent_opp = spread(bit(at.index())) & board.stones(opp);
    for neighbour in points(adjacent_opp) {
        if (captured & bit(neighbour.index())) != 0 {
            continue;
        }
        let group = connected_group(&board, neighbour, opp);
        if !has_liberty(&board, group) {
            captured |= group;
        }
    }
    board.remove(captured);

    let own_group = connected_group(&board, at, me);
    if captured == 0 && !has_liberty(&board, own_group) {
        return Err(MoveError::Suicide(at));
    }

    let ko_point = if captured.count_ones() == 1 && own_group.count_ones() == 1 {
        points(captured).next()
    } else {
        None
    };

    let capture_score: u32 = points(captured).map(edge_score).sum();
    if captured != 0 {
        debug!(
            ?at,
            stones = captured.count_ones(),
            capture_score,
            "go capture"
        );
    }

    Ok(GoMove {
        board,
        captured,
        capture_score,
        ko_point,
    })
}

/// Reward for capturing the stone at `at`; edges pay more than the centre.
pub fn edge_score(at: Point) -> u32 {
    let last = (BOARD_SIZE - 1) as u8;
    let (x, y) = (at.x(), at.y());
    let distance = x.min(y).min(last - x).min(last - y) as usize;
    EDGE_SCORES.get(distance).copied().unwrap_or(0)
}
