use thiserror::Error;

use crate::types::Point;

/// Broad category of a rejected request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    IllegalPlacement,
    PhaseViolation,
    NoHistory,
    TerminalState,
}

/// Why the engine refused a move, pass or undo.
///
/// A rejected request never changes the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("illegal move: ({x}, {y}) is off the board")]
    OutOfBounds { x: i32, y: i32 },

    #[error("illegal move: corner {0:?} is closed during the go stage")]
    Corner(Point),

    #[error("illegal move: {0:?} is occupied")]
    Occupied(Point),

    #[error("illegal move: {0:?} is the ko point")]
    Ko(Point),

    #[error("illegal move: {0:?} would be suicide")]
    Suicide(Point),

    #[error("illegal move: {0:?} flips nothing")]
    NoFlip(Point),

    #[error("pass is not allowed before move {unlock} in the go stage (now {current})")]
    PassTooEarly { current: u32, unlock: u32 },

    #[error("nothing to undo")]
    NoHistory,

    #[error("game is already over")]
    GameOver,
}

impl MoveError {
    pub fn kind(&self) -> Rejection {
        match self {
            Self::OutOfBounds { .. }
            | Self::Corner(_)
            | Self::Occupied(_)
            | Self::Ko(_)
            | Self::Suicide(_)
            | Self::NoFlip(_) => Rejection::IllegalPlacement,
            Self::PassTooEarly { .. } => Rejection::PhaseViolation,
            Self::NoHistory => Rejection::NoHistory,
            Self::GameOver => Rejection::TerminalState,
        }
    }
}

/// Errors raised by the room repository.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("room full")]
    RoomFull,

    #[error("unknown room: {0}")]
    UnknownRoom(String),

    #[error("player {0} is not seated in this room")]
    NotSeated(String),

    #[error(transparent)]
    Move(#[from] MoveError),
}
