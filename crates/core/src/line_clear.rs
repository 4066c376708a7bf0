//! Line clearing and gravity collapse.
//!
//! After a freeze the settled rows are scanned bottom to top. A row holding
//! exactly `FIELD_WIDTH` cells is removed, scored, and every cell above it is
//! let fall. The collapse runs `FIELD_HEIGHT` settling passes and re-scans the
//! rows after each pass, so rows completed by the collapse clear in the same
//! call (cascades).
//!
//! The scan recurses into the collapse, which recurses back into the scan.
//! Depth is bounded because each clear removes `FIELD_WIDTH` cells from a
//! field that holds at most `FIELD_WIDTH * FIELD_HEIGHT`.

use arrayvec::ArrayVec;
use tracing::{info, warn};

use crate::registry::SettledRegistry;
use crate::score::ScoreTracker;
use crate::types::{FIELD_HEIGHT, FIELD_WIDTH, ROW_CLEAR_SCORE};

/// Upper bound on rows one freeze can clear, cascades included.
pub const MAX_CLEARED_ROWS: usize = FIELD_HEIGHT as usize;

/// Cleared row indices, in the order they were cleared.
pub type ClearedRows = ArrayVec<i32, MAX_CLEARED_ROWS>;

/// Clear every complete row, collapsing and cascading as needed.
pub fn clear_full_rows(registry: &mut SettledRegistry, score: &mut ScoreTracker) -> ClearedRows {
    let mut cleared = ClearedRows::new();
    check_rows(registry, score, &mut cleared);
    cleared
}

fn check_rows(registry: &mut SettledRegistry, score: &mut ScoreTracker, cleared: &mut ClearedRows) {
    for y in (0..FIELD_HEIGHT).rev() {
        if registry.row_len(y) != FIELD_WIDTH as usize {
            continue;
        }

        score.update(ROW_CLEAR_SCORE);
        let removed = registry.remove_row(y);
        info!(row = y, removed, score = score.value(), "row cleared");
        if cleared.try_push(y).is_err() {
            warn!(row = y, "cleared row list is full");
        }

        collapse_above(registry, score, cleared, y);
    }
}

fn collapse_above(
    registry: &mut SettledRegistry,
    score: &mut ScoreTracker,
    cleared: &mut ClearedRows,
    row: i32,
) {
    for _ in 0..FIELD_HEIGHT {
        settle_pass(registry, row);
        check_rows(registry, score, cleared);
    }
}

/// One gravity pass over the registry.
///
/// Each cell that started the pass above `row` falls one step at a time until
/// the cell below it is occupied or it reaches the bottom row, for at most
/// `FIELD_HEIGHT` steps. Cells are visited in registry order, so a cell resting
/// on a cell that has not fallen yet stays put until a later pass.
pub fn settle_pass(registry: &mut SettledRegistry, row: i32) {
    for gi in 0..registry.groups().len() {
        for ci in 0..registry.groups()[gi].len() {
            let (x, mut y) = registry.groups()[gi].cells()[ci].position();
            if y >= row {
                continue;
            }

            for _ in 0..FIELD_HEIGHT {
                if y == FIELD_HEIGHT - 1 || registry.is_occupied(x, y + 1) {
                    break;
                }
                y += 1;
                registry.groups_mut()[gi].cells_mut()[ci].move_to(x, y);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BlockColor;

    const BOTTOM: i32 = FIELD_HEIGHT - 1;

    fn fill_row(registry: &mut SettledRegistry, y: i32, skip: Option<i32>) {
        let row: Vec<(i32, i32)> = (0..FIELD_WIDTH)
            .filter(|x| Some(*x) != skip)
            .map(|x| (x, y))
            .collect();
        registry.insert(&row, BlockColor::Orange).unwrap();
    }

    #[test]
    fn test_full_row_cleared_and_scored() {
        let mut registry = SettledRegistry::new();
        let mut score = ScoreTracker::new();
        fill_row(&mut registry, BOTTOM, None);

        let cleared = clear_full_rows(&mut registry, &mut score);

        assert_eq!(cleared.as_slice(), &[BOTTOM]);
        assert_eq!(score.value(), ROW_CLEAR_SCORE);
        assert!(registry.is_empty());
        // The emptied group stays registered.
        assert_eq!(registry.groups().len(), 1);
    }

    #[test]
    fn test_incomplete_row_untouched() {
        let mut registry = SettledRegistry::new();
        let mut score = ScoreTracker::new();
        fill_row(&mut registry, BOTTOM, Some(4));

        let cleared = clear_full_rows(&mut registry, &mut score);

        assert!(cleared.is_empty());
        assert_eq!(score.value(), 0);
        assert_eq!(registry.cell_count(), (FIELD_WIDTH - 1) as usize);
    }

    #[test]
    fn test_stack_above_shifts_down_by_one() {
        let mut registry = SettledRegistry::new();
        let mut score = ScoreTracker::new();
        fill_row(&mut registry, BOTTOM - 1, Some(0));
        registry
            .insert(&[(3, BOTTOM - 2), (3, BOTTOM - 3)], BlockColor::Blue)
            .unwrap();
        fill_row(&mut registry, BOTTOM, None);
        let before = registry.cell_count();

        clear_full_rows(&mut registry, &mut score);

        assert_eq!(registry.cell_count(), before - FIELD_WIDTH as usize);
        for x in 1..FIELD_WIDTH {
            assert!(registry.is_occupied(x, BOTTOM), "column {} not shifted", x);
        }
        assert!(!registry.is_occupied(0, BOTTOM));
        assert!(registry.is_occupied(3, BOTTOM - 1));
        assert!(registry.is_occupied(3, BOTTOM - 2));
        assert!(!registry.is_occupied(3, BOTTOM - 3));
    }

    #[test]
    fn test_floating_cells_fall_until_blocked() {
        let mut registry = SettledRegistry::new();
        let mut score = ScoreTracker::new();
        registry.insert(&[(7, 2)], BlockColor::Green).unwrap();
        fill_row(&mut registry, BOTTOM, None);

        clear_full_rows(&mut registry, &mut score);

        assert_eq!(registry.cell_count(), 1);
        assert!(registry.is_occupied(7, BOTTOM));
    }

    #[test]
    fn test_cascade_clears_rows_completed_by_collapse() {
        let mut registry = SettledRegistry::new();
        let mut score = ScoreTracker::new();
        // Row 13 misses column 9; the missing cell sits higher up in column 9
        // and drops into the gap once row 14 is gone.
        fill_row(&mut registry, BOTTOM - 1, Some(9));
        registry.insert(&[(9, 5)], BlockColor::Purple).unwrap();
        fill_row(&mut registry, BOTTOM, None);

        let cleared = clear_full_rows(&mut registry, &mut score);

        assert_eq!(cleared.len(), 2);
        assert_eq!(score.value(), 2 * ROW_CLEAR_SCORE);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_settle_pass_ignores_rows_at_or_below_target() {
        let mut registry = SettledRegistry::new();
        registry.insert(&[(1, 10)], BlockColor::Red).unwrap();
        registry.insert(&[(2, 3)], BlockColor::Red).unwrap();

        settle_pass(&mut registry, 10);

        assert!(registry.is_occupied(1, 10));
        assert!(registry.is_occupied(2, BOTTOM));
    }
}
