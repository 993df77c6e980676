use tracing::info;

use crate::types::{GameResult, GameState, Stone};

/// Adds each side's stones on the board to its running score and ends the
/// game. Does nothing on a game that is already over.
pub fn finalize(state: &mut GameState) {
    if state.over {
        return;
    }

    let (black_count, white_count) = state.board.count();
    state.black += black_count;
    state.white += white_count;
    state.over = true;

    info!(black = state.black, white = state.white, "game over");
}

impl GameState {
    /// Final scores and winner; `None` while the game is running.
    pub fn result(&self) -> Option<GameResult> {
        if !self.over {
            return None;
        }

        let winner = if self.black > self.white {
            Some(Stone::Black)
        } else if self.white > self.black {
            Some(Stone::White)
        } else {
            None
        };

        Some(GameResult {
            winner,
            black: self.black,
            white: self.white,
        })
    }
}
