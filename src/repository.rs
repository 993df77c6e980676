//! Rooms keyed by id, each holding one game and its two seats.
//!
//! The room map lock is only held to look up, create or drop a room. All
//! game operations run under the room's own mutex, so separate games never
//! wait on each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::Serialize;
use tracing::info;

use crate::config::RuleConfig;
use crate::error::RoomError;
use crate::game::GameSession;
use crate::types::{GameState, Stone};

/// Where a player sits after joining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Seat {
    pub side: Stone,
    /// Both seats are taken; the game can start.
    pub ready: bool,
}

#[derive(Debug)]
pub struct Room {
    players: [Option<String>; 2],
    session: GameSession,
}

impl Room {
    fn new(config: RuleConfig) -> Self {
        Self {
            players: [None, None],
            session: GameSession::new(config),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn side_of(&self, player: &str) -> Option<Stone> {
        match &self.players {
            [Some(black), _] if black == player => Some(Stone::Black),
            [_, Some(white)] if white == player => Some(Stone::White),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.players.iter().all(Option::is_some)
    }

    fn seat(&mut self, player: &str) -> Result<Seat, RoomError> {
        if let Some(side) = self.side_of(player) {
            return Ok(Seat {
                side,
                ready: self.is_ready(),
            });
        }

        let side = match &mut self.players {
            [slot @ None, _] => {
                *slot = Some(player.to_string());
                Stone::Black
            }
            [_, slot @ None] => {
                *slot = Some(player.to_string());
                Stone::White
            }
            _ => return Err(RoomError::RoomFull),
        };

        Ok(Seat {
            side,
            ready: self.is_ready(),
        })
    }

    fn seated(&mut self, player: &str) -> Result<&mut GameSession, RoomError> {
        if self.side_of(player).is_none() {
            return Err(RoomError::NotSeated(player.to_string()));
        }
        Ok(&mut self.session)
    }
}

/// In-memory room registry shared by the transport layer.
#[derive(Debug, Default)]
pub struct GameRepository {
    config: RuleConfig,
    rooms: RwLock<HashMap<String, Arc<Mutex<Room>>>>,
}

impl GameRepository {
    pub fn new(config: RuleConfig) -> Self {
        Self {
            config,
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Seats `player` in `room_id`, creating the room on first join.
    /// The creator plays black and the second player white.
    pub fn join(&self, room_id: &str, player: &str) -> Result<Seat, RoomError> {
        let room = {
            let mut rooms = self.rooms.write().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(rooms.entry(room_id.to_string()).or_insert_with(|| {
                info!(room_id, "room created");
                Arc::new(Mutex::new(Room::new(self.config)))
            }))
        };

        let mut room = room.lock().unwrap_or_else(PoisonError::into_inner);
        let seat = room.seat(player)?;
        info!(room_id, player, side = ?seat.side, ready = seat.ready, "player joined");
        Ok(seat)
    }

    /// Runs `f` with exclusive access to one room.
    pub fn with_room<R>(
        &self,
        room_id: &str,
        f: impl FnOnce(&mut Room) -> R,
    ) -> Result<R, RoomError> {
        let room = {
            let rooms = self.rooms.read().unwrap_or_else(PoisonError::into_inner);
            rooms
                .get(room_id)
                .cloned()
                .ok_or_else(|| RoomError::UnknownRoom(room_id.to_string()))?
        };

        let mut room = room.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(f(&mut room))
    }

    pub fn state(&self, room_id: &str) -> Result<GameState, RoomError> {
        self.with_room(room_id, |room| room.session.state().clone())
    }

    pub fn apply_move(
        &self,
        room_id: &str,
        player: &str,
        x: i32,
        y: i32,
    ) -> Result<GameState, RoomError> {
        self.with_room(room_id, |room| -> Result<GameState, RoomError> {
            Ok(room.seated(player)?.apply_move(x, y)?.clone())
        })?
    }

    pub fn apply_pass(&self, room_id: &str, player: &str) -> Result<GameState, RoomError> {
        self.with_room(room_id, |room| -> Result<GameState, RoomError> {
            Ok(room.seated(player)?.apply_pass()?.clone())
        })?
    }

    pub fn undo(&self, room_id: &str, player: &str) -> Result<GameState, RoomError> {
        self.with_room(room_id, |room| -> Result<GameState, RoomError> {
            Ok(room.seated(player)?.undo()?.clone())
        })?
    }

    pub fn reset(&self, room_id: &str, player: &str) -> Result<GameState, RoomError> {
        self.with_room(room_id, |room| -> Result<GameState, RoomError> {
            Ok(room.seated(player)?.reset().clone())
        })?
    }

    /// Drops the room `player` sits in and returns its id, so the caller can
    /// tell the other participant.
    pub fn leave(&self, player: &str) -> Option<String> {
        let mut rooms = self.rooms.write().unwrap_or_else(PoisonError::into_inner);
        let room_id = rooms
            .iter()
            .find(|(_, room)| {
                room.lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .side_of(player)
                    .is_some()
            })
            .map(|(id, _)| id.clone())?;

        rooms.remove(&room_id);
        info!(room_id = %room_id, player, "room disposed");
        Some(room_id)
    }

    pub fn len(&self) -> usize {
        self.rooms.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
