//! A single occupied grid cell.

use crate::error::{Result, TetrisError};
use crate::types::BlockColor;

/// One block of a group.
///
/// The position is mutable and is only validated at construction: rotation
/// moves cells through negative rows while it re-normalizes a group. The
/// color never changes after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    x: i32,
    y: i32,
    color: BlockColor,
}

impl Cell {
    /// Create a cell, rejecting negative coordinates.
    pub fn new(x: i32, y: i32, color: BlockColor) -> Result<Self> {
        if x < 0 || y < 0 {
            return Err(TetrisError::InvalidConstruction { x, y });
        }
        Ok(Self { x, y, color })
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn color(&self) -> BlockColor {
        self.color
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    #[inline]
    pub fn is_at(&self, x: i32, y: i32) -> bool {
        self.x == x && self.y == y
    }
}
