//! Block group - a set of cells that move together.
//!
//! A group is created active, moves left/right/down and rotates while active,
//! and freezes exactly once when a downward move is blocked. Frozen groups are
//! handed to the [`SettledRegistry`] and never move on their own again; only
//! line clearing touches their cells afterwards.

use tracing::{debug, warn};

use crate::cell::Cell;
use crate::error::{Result, TetrisError};
use crate::registry::SettledRegistry;
use crate::types::{BlockColor, ShapeKind, FIELD_HEIGHT, FIELD_WIDTH};

/// Result of a downward step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Every cell moved one row down.
    Moved,
    /// The step was blocked and the group froze.
    Frozen,
    /// The group was already frozen; nothing happened.
    Inactive,
}

/// Result of a rotation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateOutcome {
    Rotated,
    /// The pre-rotation guard failed; positions are unchanged.
    Rejected,
    /// The group landed while compensating for the rotation and froze.
    Frozen,
    Inactive,
}

/// A falling (or settled) group of same-colored cells.
///
/// Cell order is the shape definition order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockGroup {
    cells: Vec<Cell>,
    frozen: bool,
}

impl BlockGroup {
    /// Materialize a catalog shape at its spawn coordinates.
    pub fn spawn(shape: ShapeKind, color: BlockColor) -> Result<Self> {
        Self::from_positions(shape.offsets(), color)
    }

    /// Build an active group from explicit positions.
    pub fn from_positions(positions: &[(i32, i32)], color: BlockColor) -> Result<Self> {
        let cells = positions
            .iter()
            .map(|&(x, y)| Cell::new(x, y, color))
            .collect::<Result<Vec<_>>>()?;

        let mut group = Self {
            cells,
            frozen: true,
        };
        group.unfreeze()?;
        Ok(group)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Shared color of the group (`None` once every cell was cleared).
    pub fn color(&self) -> Option<BlockColor> {
        self.cells.first().map(Cell::color)
    }

    /// Sorted positions, handy for comparisons in tests and replays.
    pub fn positions(&self) -> Vec<(i32, i32)> {
        let mut out: Vec<_> = self.cells.iter().map(Cell::position).collect();
        out.sort_unstable();
        out
    }

    /// Active -> Frozen. Irreversible.
    pub fn freeze(&mut self) -> Result<()> {
        if self.frozen {
            return Err(TetrisError::InvalidStateTransition(
                "attempt to freeze a frozen block group",
            ));
        }
        self.frozen = true;
        Ok(())
    }

    /// Frozen -> Active, the construction step of `from_positions`. Settled
    /// groups are never revived.
    fn unfreeze(&mut self) -> Result<()> {
        if !self.frozen {
            return Err(TetrisError::InvalidStateTransition(
                "attempt to unfreeze an active block group",
            ));
        }
        self.frozen = false;
        Ok(())
    }

    pub fn min_x(&self) -> i32 {
        self.cells.iter().map(Cell::x).min().unwrap_or(0)
    }

    pub fn max_x(&self) -> i32 {
        self.cells.iter().map(Cell::x).max().unwrap_or(0)
    }

    pub fn min_y(&self) -> i32 {
        self.cells.iter().map(Cell::y).min().unwrap_or(0)
    }

    pub fn max_y(&self) -> i32 {
        self.cells.iter().map(Cell::y).max().unwrap_or(0)
    }

    fn shift(&mut self, dx: i32, dy: i32) {
        for cell in &mut self.cells {
            cell.move_to(cell.x() + dx, cell.y() + dy);
        }
    }

    /// Move one column left. Returns whether the group moved.
    pub fn move_left(&mut self, settled: &SettledRegistry) -> bool {
        if self.frozen {
            return false;
        }
        if self.min_x() <= 0 || settled.has_left_neighbor(&self.cells) {
            return false;
        }
        self.shift(-1, 0);
        true
    }

    /// Move one column right. Returns whether the group moved.
    pub fn move_right(&mut self, settled: &SettledRegistry) -> bool {
        if self.frozen {
            return false;
        }
        if self.max_x() >= FIELD_WIDTH - 1 || settled.has_right_neighbor(&self.cells) {
            return false;
        }
        self.shift(1, 0);
        true
    }

    /// Move one row down, freezing the group when the floor or a settled cell
    /// is directly below any member.
    pub fn move_down(&mut self, settled: &SettledRegistry) -> Result<DropOutcome> {
        if self.frozen {
            return Ok(DropOutcome::Inactive);
        }
        if self.max_y() >= FIELD_HEIGHT - 1 || settled.has_bottom_neighbor(&self.cells) {
            self.freeze()?;
            debug!(cells = ?self.positions(), "block group frozen");
            return Ok(DropOutcome::Frozen);
        }
        self.shift(0, 1);
        Ok(DropOutcome::Moved)
    }

    /// Conservative guard evaluated before any rotation: the group must not
    /// touch the right wall and must have no settled cell beside it.
    pub fn can_rotate(&self, settled: &SettledRegistry) -> bool {
        !(self.max_x() + 1 >= FIELD_WIDTH
            || self.min_x() < 0
            || settled.has_right_neighbor(&self.cells)
            || settled.has_left_neighbor(&self.cells))
    }

    /// Rotate by 90 degrees around the group's bounding box.
    ///
    /// The transform transposes every cell, moves the bounding box back to its
    /// old top-left corner and mirrors the rows. The mirrored rows sit above
    /// the field, so the group is then stepped down with regular
    /// [`move_down`](Self::move_down) calls and finally nudged back inside the
    /// side walls. Because the descent uses the normal collision checks the
    /// group can land (and freeze) before it reaches its target rows.
    pub fn rotate(&mut self, settled: &SettledRegistry) -> Result<RotateOutcome> {
        if self.frozen {
            return Ok(RotateOutcome::Inactive);
        }
        if !self.can_rotate(settled) {
            return Ok(RotateOutcome::Rejected);
        }

        let (old_x, old_y) = (self.min_x(), self.min_y());
        for cell in &mut self.cells {
            let (x, y) = cell.position();
            cell.move_to(y, x);
        }
        let (new_x, new_y) = (self.min_x(), self.min_y());
        self.shift(old_x - new_x, old_y - new_y);

        let old_bottom = self.max_y();
        for cell in &mut self.cells {
            cell.move_to(cell.x(), -cell.y());
        }
        let new_bottom = self.max_y();

        for _ in 0..(new_bottom - old_bottom).abs() {
            if self.move_down(settled)? == DropOutcome::Frozen {
                return Ok(RotateOutcome::Frozen);
            }
        }

        while self.max_x() >= FIELD_WIDTH {
            if !self.move_left(settled) {
                warn!(cells = ?self.positions(), "rotation stuck past the right wall");
                break;
            }
        }
        while self.min_x() < 0 {
            if !self.move_right(settled) {
                warn!(cells = ?self.positions(), "rotation stuck past the left wall");
                break;
            }
        }

        Ok(RotateOutcome::Rotated)
    }

    /// Drop every cell on row `y`, returning how many were removed.
    pub(crate) fn remove_row(&mut self, y: i32) -> usize {
        let before = self.cells.len();
        self.cells.retain(|cell| cell.y() != y);
        before - self.cells.len()
    }
}
