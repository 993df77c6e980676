use serde::{Deserialize, Serialize};

use crate::board::{BOARD_SIZE, Board};
use crate::error::MoveError;

/// Stone colour, also used for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stone {
    Black,
    White,
}

impl Stone {
    pub fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }
}

/// Active rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Go,
    Othello,
}

/// A board coordinate. `x` is the column, `y` the row.
///
/// Always on the board. Serialized as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Point {
    x: u8,
    y: u8,
}

impl Point {
    /// Returns `None` when the coordinate falls outside the board.
    pub fn new(x: i32, y: i32) -> Option<Self> {
        let range = 0..BOARD_SIZE as i32;
        if range.contains(&x) && range.contains(&y) {
            Some(Self {
                x: x as u8,
                y: y as u8,
            })
        } else {
            None
        }
    }

    pub fn x(self) -> u8 {
        self.x
    }

    pub fn y(self) -> u8 {
        self.y
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self {
            x: (index % BOARD_SIZE) as u8,
            y: (index / BOARD_SIZE) as u8,
        }
    }

    pub(crate) fn index(self) -> usize {
        self.y as usize * BOARD_SIZE + self.x as usize
    }
}

impl TryFrom<(u8, u8)> for Point {
    type Error = MoveError;

    fn try_from((x, y): (u8, u8)) -> Result<Self, Self::Error> {
        let (x, y) = (i32::from(x), i32::from(y));
        Self::new(x, y).ok_or(MoveError::OutOfBounds { x, y })
    }
}

impl From<Point> for (u8, u8) {
    fn from(point: Point) -> Self {
        (point.x, point.y)
    }
}

/// Complete state of one game, as broadcast to participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub board: Board,
    pub turn: Stone,
    /// Completed placements and passes.
    #[serde(rename = "move")]
    pub move_count: u32,
    pub black: u32,
    pub white: u32,
    pub stage: Stage,
    /// Contract:
    /// - Set only by a single-stone capture made with a lone stone.
    /// - Cleared by every later placement that does not re-derive it.
    pub ko_point: Option<Point>,
    pub last_move: Option<Point>,
    pub pass_count: u32,
    pub over: bool,
}

impl GameState {
    /// Empty board, black to move, Go stage.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Stone::Black,
            move_count: 0,
            black: 0,
            white: 0,
            stage: Stage::Go,
            ko_point: None,
            last_move: None,
            pass_count: 0,
            over: false,
        }
    }

    pub fn score(&self, side: Stone) -> u32 {
        match side {
            Stone::Black => self.black,
            Stone::White => self.white,
        }
    }

    pub(crate) fn score_mut(&mut self, side: Stone) -> &mut u32 {
        match side {
            Stone::Black => &mut self.black,
            Stone::White => &mut self.white,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// `None` on a tie.
    pub winner: Option<Stone>,
    pub black: u32,
    pub white: u32,
}
