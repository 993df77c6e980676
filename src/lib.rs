//! Two-stage 9x9 board game engine.
//!
//! A game opens under Go rules (captures, suicide and simple ko, corners
//! closed) and switches to Othello flipping at move 60 or after two
//! consecutive passes. When nobody can move or the board is full, each side
//! adds its stones on the board to its capture score.
//!
//! [`GameSession`] is the state-transition surface; [`GameRepository`] maps
//! room ids to sessions for a multiplayer transport; [`WasmGame`] exposes a
//! single session to JavaScript.

use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod go;
pub mod group;
pub mod othello;
pub mod phase;
pub mod repository;
pub mod score;
pub mod types;

pub use crate::board::Board;
pub use crate::config::RuleConfig;
pub use crate::error::{MoveError, Rejection, RoomError};
pub use crate::game::GameSession;
pub use crate::repository::{GameRepository, Room, Seat};
pub use crate::types::{GameResult, GameState, Point, Stage, Stone};

/// One game driven from JavaScript.
///
/// State is returned as a plain object shaped like [`GameState`]'s JSON;
/// a rejected request throws the error message.
#[wasm_bindgen]
pub struct WasmGame {
    session: GameSession,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        Self {
            session: GameSession::default(),
        }
    }

    /// Accepts a partial `{ othelloSwitchMove, passUnlockMove }` object.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<WasmGame, JsValue> {
        let config: RuleConfig = serde_wasm_bindgen::from_value(config)?;
        Ok(Self {
            session: GameSession::new(config),
        })
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(self.session.state())
    }

    #[wasm_bindgen(js_name = applyMove)]
    pub fn apply_move(&mut self, x: i32, y: i32) -> Result<JsValue, JsValue> {
        let state = self.session.apply_move(x, y).map_err(rejection)?;
        to_js(state)
    }

    #[wasm_bindgen(js_name = applyPass)]
    pub fn apply_pass(&mut self) -> Result<JsValue, JsValue> {
        let state = self.session.apply_pass().map_err(rejection)?;
        to_js(state)
    }

    pub fn undo(&mut self) -> Result<JsValue, JsValue> {
        let state = self.session.undo().map_err(rejection)?;
        to_js(state)
    }

    pub fn reset(&mut self) -> Result<JsValue, JsValue> {
        to_js(self.session.reset())
    }

    /// `[x, y]` pairs the side to move may play.
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.legal_moves())
    }

    /// `{ winner, black, white }` once the game is over, otherwise `null`.
    pub fn result(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.result())
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}

// `null` rather than `undefined` for empty options, matching the JSON shape.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(Into::into)
}

fn rejection(err: MoveError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
