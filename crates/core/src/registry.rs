//! Settled registry - the history of frozen block groups.
//!
//! The registry is the static world state: every collision query, the row
//! scan and the game-over check read it. Groups are appended in freeze order
//! and only removed in bulk on restart; a group whose cells were all cleared
//! stays behind as an empty entry.
//!
//! Collision queries are brute-force scans over every settled cell. The field
//! holds at most 150 cells, so no spatial index is kept.

use crate::cell::Cell;
use crate::error::{Result, TetrisError};
use crate::group::BlockGroup;
use crate::types::BlockColor;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettledRegistry {
    groups: Vec<BlockGroup>,
}

impl SettledRegistry {
    pub fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Append a frozen group.
    pub fn push(&mut self, group: BlockGroup) -> Result<()> {
        if !group.is_frozen() {
            return Err(TetrisError::InvalidStateTransition(
                "attempt to settle an active block group",
            ));
        }
        self.groups.push(group);
        Ok(())
    }

    /// Settle cells directly, as one frozen group.
    ///
    /// Used for scripted setups (tests, replays, benchmarks).
    pub fn insert(&mut self, positions: &[(i32, i32)], color: BlockColor) -> Result<()> {
        let mut group = BlockGroup::from_positions(positions, color)?;
        group.freeze()?;
        self.push(group)
    }

    pub fn groups(&self) -> &[BlockGroup] {
        &self.groups
    }

    pub(crate) fn groups_mut(&mut self) -> &mut [BlockGroup] {
        &mut self.groups
    }

    /// Iterate every settled cell in registry order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.groups.iter().flat_map(|group| group.cells().iter())
    }

    pub fn cell_count(&self) -> usize {
        self.groups.iter().map(BlockGroup::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.cells().any(|cell| cell.is_at(x, y))
    }

    /// Number of settled cells on row `y`.
    pub fn row_len(&self, y: i32) -> usize {
        self.cells().filter(|cell| cell.y() == y).count()
    }

    /// Remove every settled cell on row `y` from its owning group.
    pub fn remove_row(&mut self, y: i32) -> usize {
        self.groups.iter_mut().map(|group| group.remove_row(y)).sum()
    }

    /// Any settled cell directly left of one of `cells`.
    pub fn has_left_neighbor(&self, cells: &[Cell]) -> bool {
        self.any_neighbor(cells, -1, 0)
    }

    /// Any settled cell directly right of one of `cells`.
    pub fn has_right_neighbor(&self, cells: &[Cell]) -> bool {
        self.any_neighbor(cells, 1, 0)
    }

    /// Any settled cell directly below one of `cells`.
    pub fn has_bottom_neighbor(&self, cells: &[Cell]) -> bool {
        self.any_neighbor(cells, 0, 1)
    }

    fn any_neighbor(&self, cells: &[Cell], dx: i32, dy: i32) -> bool {
        for settled in self.cells() {
            for cell in cells {
                if settled.is_at(cell.x() + dx, cell.y() + dy) {
                    return true;
                }
            }
        }
        false
    }

    /// True once a settled cell rests on the top row.
    ///
    /// Cells above the field (possible when a rotation lands a group while it
    /// is still descending into place) count as overflow as well.
    pub fn is_overwhelmed(&self) -> bool {
        self.cells().any(|cell| cell.y() <= 0)
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }
}
