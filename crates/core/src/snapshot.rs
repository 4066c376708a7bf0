//! Immutable, serializable game state for renderers and other consumers.

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::types::{BlockColor, FIELD_HEIGHT, FIELD_WIDTH};

/// Board grid: `0` is empty, otherwise the color index plus one.
pub type BoardGrid = [[u8; FIELD_WIDTH as usize]; FIELD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub x: i32,
    pub y: i32,
    pub color: u8,
}

impl From<&Cell> for CellSnapshot {
    fn from(cell: &Cell) -> Self {
        Self {
            x: cell.x(),
            y: cell.y(),
            color: color_code(cell.color()),
        }
    }
}

/// Immutable view of a game, for renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: BoardGrid,
    pub active: Vec<CellSnapshot>,
    pub score: u32,
    pub rows_cleared: u32,
    pub paused: bool,
    pub game_over: bool,
    pub started: bool,
    pub episode_id: u32,
}

impl GameSnapshot {
    /// Settled color at `(x, y)`, `None` when empty or out of the field.
    pub fn settled_at(&self, x: i32, y: i32) -> Option<BlockColor> {
        if !(0..FIELD_WIDTH).contains(&x) || !(0..FIELD_HEIGHT).contains(&y) {
            return None;
        }
        decode_color(self.board[y as usize][x as usize])
    }

    /// Color of the active group at `(x, y)`, if it covers that cell.
    pub fn active_at(&self, x: i32, y: i32) -> Option<BlockColor> {
        self.active
            .iter()
            .find(|c| c.x == x && c.y == y)
            .and_then(|c| decode_color(c.color))
    }

    pub fn playable(&self) -> bool {
        self.started && !self.game_over && !self.paused
    }
}

pub fn color_code(color: BlockColor) -> u8 {
    color.index() as u8 + 1
}

pub fn decode_color(code: u8) -> Option<BlockColor> {
    code.checked_sub(1)
        .and_then(|i| BlockColor::from_index(i as usize))
}
