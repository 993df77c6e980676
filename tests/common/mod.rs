//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use goreversi::GameSession;

/// Thirty black placements: columns 0-1 and 6-7, never entering white's area.
pub fn black_line() -> Vec<(i32, i32)> {
    let mut cells: Vec<(i32, i32)> = (0..9).map(|y| (1, y)).collect();
    cells.extend([(0, 1), (0, 2), (0, 3)]);
    cells.extend((0..9).map(|y| (6, y)));
    cells.extend((0..9).map(|y| (7, y)));
    cells
}

/// Thirty white placements in columns 2-5, column 2 last.
pub fn white_line() -> Vec<(i32, i32)> {
    let mut cells: Vec<(i32, i32)> = Vec::new();
    for x in [5, 4, 3] {
        cells.extend((0..9).map(|y| (x, y)));
    }
    cells.extend([(2, 0), (2, 1), (2, 2)]);
    cells
}

/// Alternating opening in which every group keeps a liberty, so nothing is
/// ever captured. Each side stays inside its own connected area and never
/// fills it.
pub fn opening() -> Vec<(i32, i32)> {
    black_line()
        .into_iter()
        .zip(white_line())
        .flat_map(|(b, w)| [b, w])
        .collect()
}

/// Plays the first `count` opening moves on a fresh session.
pub fn session_after(count: usize) -> GameSession {
    let mut session = GameSession::default();
    for (x, y) in opening().into_iter().take(count) {
        session
            .apply_move(x, y)
            .unwrap_or_else(|err| panic!("opening move ({x}, {y}) rejected: {err}"));
    }
    session
}
