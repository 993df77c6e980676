use tracing::{debug, instrument};

use crate::board::{NUM_CELLS, points};
use crate::config::RuleConfig;
use crate::error::MoveError;
use crate::go::apply_go_move;
use crate::othello::{self, apply_othello_move};
use crate::phase::{PhaseController, PhaseEvent};
use crate::types::{GameResult, GameState, Point, Stage};

/// One game plus its undo history.
///
/// Every operation validates against a copy of the live state and only
/// commits on success, so a rejected request leaves the session untouched.
/// Callers must serialize access to a session.
#[derive(Debug, Clone)]
pub struct GameSession {
    state: GameState,
    history: Vec<GameState>,
    phase: PhaseController,
}

impl GameSession {
    pub fn new(config: RuleConfig) -> Self {
        Self::from_state(GameState::new(), config)
    }

    /// Resumes a game from a previously broadcast state, with empty history.
    pub fn from_state(state: GameState, config: RuleConfig) -> Self {
        Self {
            state,
            history: Vec::new(),
            phase: PhaseController::new(config),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &RuleConfig {
        self.phase.config()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn result(&self) -> Option<GameResult> {
        self.state.result()
    }

    /// Places a stone for the side to move under the current stage's rules.
    #[instrument(skip(self), fields(stage = ?self.state.stage, turn = ?self.state.turn))]
    pub fn apply_move(&mut self, x: i32, y: i32) -> Result<&GameState, MoveError> {
        let next = self.placement(x, y).inspect_err(|err| debug!(%err, "move rejected"))?;
        self.commit(next);
        Ok(&self.state)
    }

    #[instrument(skip(self), fields(stage = ?self.state.stage, turn = ?self.state.turn))]
    pub fn apply_pass(&mut self) -> Result<&GameState, MoveError> {
        let next = self.pass().inspect_err(|err| debug!(%err, "pass rejected"))?;
        self.commit(next);
        Ok(&self.state)
    }

    /// Restores the state before the last accepted move or pass.
    #[instrument(skip(self), fields(history = self.history.len()))]
    pub fn undo(&mut self) -> Result<&GameState, MoveError> {
        if self.state.over {
            debug!("undo rejected after game over");
            return Err(MoveError::GameOver);
        }
        let previous = self.history.pop().ok_or(MoveError::NoHistory)?;
        self.state = previous;
        Ok(&self.state)
    }

    /// Starts a fresh game and forgets all history. Always succeeds.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> &GameState {
        self.state = GameState::new();
        self.history.clear();
        &self.state
    }

    /// Every point `apply_move` would accept right now.
    pub fn legal_moves(&self) -> Vec<Point> {
        if self.state.over {
            return Vec::new();
        }

        match self.state.stage {
            Stage::Go => (0..NUM_CELLS)
                .map(Point::from_index)
                .filter(|&at| apply_go_move(&self.state, at).is_ok())
                .collect(),
            Stage::Othello => {
                points(othello::legal_moves(&self.state.board, self.state.turn)).collect()
            }
        }
    }

    fn placement(&self, x: i32, y: i32) -> Result<GameState, MoveError> {
        if self.state.over {
            return Err(MoveError::GameOver);
        }
        let at = Point::new(x, y).ok_or(MoveError::OutOfBounds { x, y })?;
        let mover = self.state.turn;

        let mut next = self.state.clone();
        match self.state.stage {
            Stage::Go => {
                let outcome = apply_go_move(&self.state, at)?;
                next.board = outcome.board;
                *next.score_mut(mover) += outcome.capture_score;
                next.ko_point = outcome.ko_point;
            }
            Stage::Othello => {
                next.board = apply_othello_move(&self.state, at)?;
                next.ko_point = None;
            }
        }

        next.last_move = Some(at);
        next.pass_count = 0;
        next.turn = mover.opponent();
        next.move_count += 1;
        self.phase.settle(&mut next, PhaseEvent::Placed);
        Ok(next)
    }

    fn pass(&self) -> Result<GameState, MoveError> {
        if self.state.over {
            return Err(MoveError::GameOver);
        }
        self.phase.check_pass(&self.state)?;

        let mut next = self.state.clone();
        next.pass_count += 1;
        next.ko_point = None;
        if next.pass_count < 2 {
            next.turn = next.turn.opponent();
            next.move_count += 1;
        }
        self.phase.settle(&mut next, PhaseEvent::Passed);
        Ok(next)
    }

    fn commit(&mut self, next: GameState) {
        let previous = std::mem::replace(&mut self.state, next);
        self.history.push(previous);
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(RuleConfig::default())
    }
}
