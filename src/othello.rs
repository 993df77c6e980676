//! Othello-stage placement: eight-direction line flipping.

use crate::board::{BOARD_SIZE, Board, bit, points};
use crate::error::MoveError;
use crate::types::{GameState, Point, Stone};

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Opponent stones that a `color` stone on `at` would flip.
/// Returns 0 when `at` is occupied or nothing is bracketed.
pub fn collect_flips(board: &Board, at: Point, color: Stone) -> u128 {
    if !board.is_empty_at(at) {
        return 0;
    }

    let me = board.stones(color);
    let opp = board.stones(color.opponent());
    let mut flips = 0u128;

    for (dx, dy) in DIRECTIONS {
        let mut x = i32::from(at.x()) + dx;
        let mut y = i32::from(at.y()) + dy;
        let mut line = 0u128;

        while in_bounds(x, y) {
            let square = bit(y as usize * BOARD_SIZE + x as usize);
            if (opp & square) != 0 {
                line |= square;
            } else if (me & square) != 0 {
                flips |= line;
                break;
            } else {
                break;
            }

            x += dx;
            y += dy;
        }
    }

    flips
}

/// Places the side to move on `at` and flips every bracketed run.
///
/// `state` is not modified.
pub fn apply_othello_move(state: &GameState, at: Point) -> Result<Board, MoveError> {
    if !state.board.is_empty_at(at) {
        return Err(MoveError::Occupied(at));
    }

    let flips = collect_flips(&state.board, at, state.turn);
    if flips == 0 {
        return Err(MoveError::NoFlip(at));
    }

    let mut board = state.board;
    board.place(at, state.turn);
    board.recolor(flips, state.turn);
    Ok(board)
}

/// Empty cells where `color` would flip at least one stone.
pub fn legal_moves(board: &Board, color: Stone) -> u128 {
    points(board.empty())
        .filter(|&at| collect_flips(board, at, color) != 0)
        .fold(0u128, |acc, at| acc | bit(at.index()))
}

pub fn has_legal_othello_move(board: &Board, color: Stone) -> bool {
    points(board.empty()).any(|at| collect_flips(board, at, color) != 0)
}

fn in_bounds(x: i32, y: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&x) && (0..BOARD_SIZE as i32).contains(&y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Stage;

    fn pt(x: u8, y: u8) -> Point {
        Point::try_from((x, y)).unwrap()
    }

    fn othello_state(black: &[(u8, u8)], white: &[(u8, u8)], turn: Stone) -> GameState {
        let mut state = GameState::new();
        for &(x, y) in black {
            state.board.place(pt(x, y), Stone::Black);
        }
        for &(x, y) in white {
            state.board.place(pt(x, y), Stone::White);
        }
        state.stage = Stage::Othello;
        state.turn = turn;
        state
    }

    #[test]
    fn flips_runs_in_every_bracketed_direction() {
        // Black at (2,4) and (4,2); white between them and the move at (4,4).
        let state = othello_state(
            &[(2, 4), (4, 2), (6, 6)],
            &[(3, 4), (4, 3), (5, 5)],
            Stone::Black,
        );

        let flips = collect_flips(&state.board, pt(4, 4), Stone::Black);
        let flipped: Vec<_> = points(flips).collect();

        assert_eq!(flipped, vec![pt(4, 3), pt(3, 4), pt(5, 5)]);
    }

    #[test]
    fn run_ending_on_empty_or_edge_does_not_flip() {
        let state = othello_state(&[], &[(1, 4), (0, 4), (5, 4)], Stone::Black);

        assert_eq!(collect_flips(&state.board, pt(2, 4), Stone::Black), 0);
        assert_eq!(collect_flips(&state.board, pt(4, 4), Stone::Black), 0);
    }

    #[test]
    fn accepted_move_places_and_recolours() {
        let state = othello_state(&[(1, 1)], &[(2, 2), (3, 3)], Stone::Black);

        let board = apply_othello_move(&state, pt(4, 4)).unwrap();

        assert_eq!(board.count(), (4, 0));
        assert_eq!(board.get(pt(3, 3)), Some(Stone::Black));
    }

    #[test]
    fn move_that_flips_nothing_is_rejected() {
        let state = othello_state(&[(1, 1)], &[(2, 2)], Stone::Black);

        assert_eq!(
            apply_othello_move(&state, pt(6, 6)),
            Err(MoveError::NoFlip(pt(6, 6)))
        );
        assert_eq!(
            apply_othello_move(&state, pt(2, 2)),
            Err(MoveError::Occupied(pt(2, 2)))
        );
    }

    #[test]
    fn corners_are_playable_in_othello_stage() {
        let state = othello_state(&[(2, 2)], &[(1, 1)], Stone::Black);

        let board = apply_othello_move(&state, pt(0, 0)).unwrap();

        assert_eq!(board.get(pt(1, 1)), Some(Stone::Black));
    }

    #[test]
    fn legal_move_mask_matches_predicate() {
        let state = othello_state(&[(4, 4)], &[(4, 5)], Stone::Black);

        let legal = legal_moves(&state.board, Stone::Black);

        assert_eq!(points(legal).collect::<Vec<_>>(), vec![pt(4, 6)]);
        assert!(has_legal_othello_move(&state.board, Stone::Black));
        assert!(has_legal_othello_move(&state.board, Stone::White));
        assert!(!has_legal_othello_move(&Board::new(), Stone::Black));
    }
}
