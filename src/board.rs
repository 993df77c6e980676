use serde::{Deserialize, Serialize};

use crate::types::{Point, Stone};

pub const BOARD_SIZE: usize = 9;
pub const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

const BOARD_MASK: u128 = (1u128 << NUM_CELLS) - 1;
const LEFT_EDGE: u128 = column_mask(0);
const RIGHT_EDGE: u128 = column_mask(BOARD_SIZE - 1);
/// Cells closed to placement during the Go stage.
const CORNER_MASK: u128 =
    bit(0) | bit(BOARD_SIZE - 1) | bit(NUM_CELLS - BOARD_SIZE) | bit(NUM_CELLS - 1);

/// `rows[y][x]`, the wire layout of a board.
pub type Rows = [[Option<Stone>; BOARD_SIZE]; BOARD_SIZE];

/// 9x9 board state represented by two bitboards.
///
/// Bit `y * 9 + x` holds cell `(x, y)`. Bits above 80 are always clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Rows", into = "Rows")]
pub struct Board {
    black: u128,
    white: u128,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from raw masks. Black wins any overlap.
    pub fn from_bitboards(black: u128, white: u128) -> Self {
        let black = black & BOARD_MASK;
        Self {
            black,
            white: white & BOARD_MASK & !black,
        }
    }

    pub fn get(&self, at: Point) -> Option<Stone> {
        let square = bit(at.index());
        if (self.black & square) != 0 {
            Some(Stone::Black)
        } else if (self.white & square) != 0 {
            Some(Stone::White)
        } else {
            None
        }
    }

    pub fn is_empty_at(&self, at: Point) -> bool {
        (self.occupied() & bit(at.index())) == 0
    }

    /// Bitboard of one colour.
    pub fn stones(&self, color: Stone) -> u128 {
        match color {
            Stone::Black => self.black,
            Stone::White => self.white,
        }
    }

    pub fn occupied(&self) -> u128 {
        self.black | self.white
    }

    pub fn empty(&self) -> u128 {
        !self.occupied() & BOARD_MASK
    }

    /// Puts a stone on `at`, replacing whatever was there.
    pub fn place(&mut self, at: Point, color: Stone) {
        self.recolor(bit(at.index()), color);
    }

    /// Sets every cell in `mask` to `color`.
    pub fn recolor(&mut self, mask: u128, color: Stone) {
        let mask = mask & BOARD_MASK;
        match color {
            Stone::Black => {
                self.black |= mask;
                self.white &= !mask;
            }
            Stone::White => {
                self.white |= mask;
                self.black &= !mask;
            }
        }
    }

    /// Empties every cell in `mask`.
    pub fn remove(&mut self, mask: u128) {
        self.black &= !mask;
        self.white &= !mask;
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u32, u32) {
        (self.black.count_ones(), self.white.count_ones())
    }

    pub fn empty_count(&self) -> u32 {
        self.empty().count_ones()
    }

    pub fn is_full(&self) -> bool {
        self.empty() == 0
    }

    pub fn to_rows(&self) -> Rows {
        let mut rows = [[None; BOARD_SIZE]; BOARD_SIZE];
        for (y, row) in rows.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = self.get(Point::from_index(y * BOARD_SIZE + x));
            }
        }
        rows
    }
}

impl From<Rows> for Board {
    fn from(rows: Rows) -> Self {
        let mut board = Self::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if let Some(color) = cell {
                    board.place(Point::from_index(y * BOARD_SIZE + x), *color);
                }
            }
        }
        board
    }
}

impl From<Board> for Rows {
    fn from(board: Board) -> Self {
        board.to_rows()
    }
}

pub fn is_corner(at: Point) -> bool {
    (CORNER_MASK & bit(at.index())) != 0
}

/// Orthogonal neighbours of every cell in `mask`, clipped to the board.
pub fn spread(mask: u128) -> u128 {
    let right = (mask & !RIGHT_EDGE) << 1;
    let left = (mask & !LEFT_EDGE) >> 1;
    let down = mask << BOARD_SIZE;
    let up = mask >> BOARD_SIZE;
    (right | left | down | up) & BOARD_MASK
}

/// Iterates the cells of `mask` in row-major order.
pub fn points(mask: u128) -> impl Iterator<Item = Point> {
    let mut bits = mask & BOARD_MASK;
    std::iter::from_fn(move || {
        if bits == 0 {
            return None;
        }
        let index = bits.trailing_zeros() as usize;
        bits &= bits - 1;
        Some(Point::from_index(index))
    })
}

pub(crate) const fn bit(index: usize) -> u128 {
    if index < NUM_CELLS { 1u128 << index } else { 0 }
}

const fn column_mask(col: usize) -> u128 {
    let mut mask = 0u128;
    let mut row = 0;
    while row < BOARD_SIZE {
        mask |= 1u128 << (row * BOARD_SIZE + col);
        row += 1;
    }
    mask
}
