//! Stage machine: Go-to-Othello switches, forced turn skips and termination.
//!
//! Stage changes are decided by [`PhaseController::transition`], a single
//! table over `(stage, event)`, and carried out by
//! [`PhaseController::apply`]. The move and pass handlers only update the
//! counters and then call [`PhaseController::settle`].

use tracing::{debug, info};

use crate::config::RuleConfig;
use crate::error::MoveError;
use crate::othello::has_legal_othello_move;
use crate::score::finalize;
use crate::types::{GameState, Stage, Stone};

/// What the session just did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    Placed,
    Passed,
}

/// Stage change chosen for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    /// The move counter reached the switch threshold during the Go stage.
    MoveThreshold,
    /// Two consecutive passes.
    DoublePass,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseController {
    config: RuleConfig,
}

impl PhaseController {
    pub fn new(config: RuleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Passing is refused in the Go stage until the unlock move.
    pub fn check_pass(&self, state: &GameState) -> Result<(), MoveError> {
        match state.stage {
            Stage::Go if state.move_count < self.config.pass_unlock_move => {
                Err(MoveError::PassTooEarly {
                    current: state.move_count,
                    unlock: self.config.pass_unlock_move,
                })
            }
            Stage::Go | Stage::Othello => Ok(()),
        }
    }

    pub fn transition(&self, state: &GameState, event: PhaseEvent) -> Transition {
        match (event, state.stage) {
            (PhaseEvent::Passed, _) if state.pass_count >= 2 => Transition::DoublePass,
            (PhaseEvent::Placed | PhaseEvent::Passed, Stage::Go)
                if state.move_count >= self.config.othello_switch_move =>
            {
                Transition::MoveThreshold
            }
            (PhaseEvent::Placed | PhaseEvent::Passed, Stage::Go | Stage::Othello) => {
                Transition::Stay
            }
        }
    }

    pub fn apply(&self, state: &mut GameState, transition: Transition) {
        match transition {
            Transition::Stay => {}
            Transition::MoveThreshold => {
                info!(
                    move_count = state.move_count,
                    "move threshold reached, switching to othello"
                );
                state.stage = Stage::Othello;
                state.turn = Stone::Black;
            }
            Transition::DoublePass => {
                info!(
                    move_count = state.move_count,
                    "double pass, switching to othello"
                );
                state.stage = Stage::Othello;
                state.turn = Stone::Black;
                state.pass_count = 0;
            }
        }
    }

    /// Runs every post-event check in order: stage transition, then the
    /// termination checks.
    ///
    /// A placement may hand the turn over through forced skips. A pass never
    /// moves the turn, but still ends an Othello position nobody can play.
    pub fn settle(&self, state: &mut GameState, event: PhaseEvent) {
        let transition = self.transition(state, event);
        self.apply(state, transition);

        match event {
            PhaseEvent::Placed => {
                skip_blocked_turns(state);
                if state.board.is_full() && !state.over {
                    finalize(state);
                }
            }
            PhaseEvent::Passed => {
                if state.stage == Stage::Othello && !state.over && nobody_can_move(state) {
                    debug!("no othello move for either side after pass");
                    finalize(state);
                }
            }
        }
    }
}

/// Hands the turn over while the side to move has no Othello move.
/// Ends the game when neither side can move.
pub fn skip_blocked_turns(state: &mut GameState) {
    while state.stage == Stage::Othello
        && !state.over
        && !has_legal_othello_move(&state.board, state.turn)
    {
        debug!(side = ?state.turn, "no legal othello move, skipping turn");
        state.turn = state.turn.opponent();
        if nobody_can_move(state) {
            finalize(state);
            break;
        }
    }
}

fn nobody_can_move(state: &GameState) -> bool {
    !has_legal_othello_move(&state.board, Stone::Black)
        && !has_legal_othello_move(&state.board, Stone::White)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::types::Point;

    fn pt(x: u8, y: u8) -> Point {
        Point::try_from((x, y)).unwrap()
    }

    fn go_state_at(move_count: u32, turn: Stone) -> GameState {
        let mut state = GameState::new();
        state.move_count = move_count;
        state.turn = turn;
        state
    }

    #[test]
    fn pass_is_gated_by_unlock_move_in_go_stage() {
        let phase = PhaseController::default();

        assert_eq!(
            phase.check_pass(&go_state_at(39, Stone::Black)),
            Err(MoveError::PassTooEarly {
                current: 39,
                unlock: 40
            })
        );
        assert_eq!(phase.check_pass(&go_state_at(40, Stone::Black)), Ok(()));

        let mut othello = go_state_at(3, Stone::White);
        othello.stage = Stage::Othello;
        assert_eq!(phase.check_pass(&othello), Ok(()));
    }

    #[test]
    fn threshold_switch_forces_black_to_move() {
        let phase = PhaseController::default();
        let mut state = go_state_at(60, Stone::White);
        state.board.place(pt(4, 4), Stone::Black);
        state.board.place(pt(4, 5), Stone::White);

        assert_eq!(
            phase.transition(&state, PhaseEvent::Placed),
            Transition::MoveThreshold
        );
        phase.settle(&mut state, PhaseEvent::Placed);

        assert_eq!(state.stage, Stage::Othello);
        assert_eq!(state.turn, Stone::Black);
    }

    #[test]
    fn below_threshold_stays_in_go() {
        let phase = PhaseController::default();
        let state = go_state_at(59, Stone::White);

        assert_eq!(phase.transition(&state, PhaseEvent::Placed), Transition::Stay);
        assert_eq!(phase.transition(&state, PhaseEvent::Passed), Transition::Stay);
    }

    #[test]
    fn double_pass_takes_precedence_and_clears_pass_count() {
        let phase = PhaseController::default();
        let mut state = go_state_at(45, Stone::White);
        state.pass_count = 2;

        phase.settle(&mut state, PhaseEvent::Passed);

        assert_eq!(state.stage, Stage::Othello);
        assert_eq!(state.turn, Stone::Black);
        assert_eq!(state.pass_count, 0);
        assert_eq!(state.move_count, 45);
    }

    #[test]
    fn pass_does_not_trigger_forced_skip() {
        let phase = PhaseController::default();
        let mut state = go_state_at(45, Stone::White);
        state.pass_count = 2;
        // Only white can flip.
        state.board.place(pt(0, 4), Stone::White);
        state.board.place(pt(1, 4), Stone::Black);

        phase.settle(&mut state, PhaseEvent::Passed);

        assert!(!state.over);
        assert_eq!(state.turn, Stone::Black);
    }

    #[test]
    fn double_pass_into_dead_position_ends_the_game() {
        let phase = PhaseController::default();
        let mut state = go_state_at(40, Stone::White);
        state.pass_count = 2;
        state.black = 3;
        state.board.place(pt(4, 4), Stone::Black);
        state.board.place(pt(1, 1), Stone::Black);

        phase.settle(&mut state, PhaseEvent::Passed);

        assert!(state.over);
        assert_eq!(state.stage, Stage::Othello);
        assert_eq!(state.turn, Stone::Black);
        assert_eq!(state.pass_count, 0);
        assert_eq!((state.black, state.white), (5, 0));
    }

    #[test]
    fn pass_in_go_stage_never_finalizes() {
        let phase = PhaseController::default();
        let mut state = go_state_at(41, Stone::White);
        state.pass_count = 1;

        phase.settle(&mut state, PhaseEvent::Passed);

        assert_eq!(state.stage, Stage::Go);
        assert!(!state.over);
    }

    #[test]
    fn blocked_side_is_skipped() {
        // Only white can flip: (2,4) brackets the black stone at (1,4).
        let mut state = go_state_at(70, Stone::Black);
        state.stage = Stage::Othello;
        state.board = Board::new();
        state.board.place(pt(0, 4), Stone::White);
        state.board.place(pt(1, 4), Stone::Black);

        skip_blocked_turns(&mut state);

        assert_eq!(state.turn, Stone::White);
        assert!(!state.over);
    }

    #[test]
    fn nobody_can_move_finalizes_once() {
        let phase = PhaseController::default();
        let mut state = go_state_at(70, Stone::White);
        state.stage = Stage::Othello;
        state.black = 5;
        state.board.place(pt(0, 4), Stone::Black);
        state.board.place(pt(8, 8), Stone::White);

        phase.settle(&mut state, PhaseEvent::Placed);

        assert!(state.over);
        assert_eq!(state.black, 6);
        assert_eq!(state.white, 1);
    }

    #[test]
    fn full_board_is_scored_exactly_once() {
        let phase = PhaseController::default();
        let mut state = go_state_at(80, Stone::White);
        state.stage = Stage::Othello;
        state.board = Board::from_bitboards(u128::MAX, 0);

        phase.settle(&mut state, PhaseEvent::Placed);

        assert!(state.over);
        assert_eq!(state.black, 81);
        assert_eq!(state.white, 0);
    }
}
