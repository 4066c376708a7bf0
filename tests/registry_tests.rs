//! Settled registry and line clearing tests

use blockfall::core::{clear_full_rows, Cell, ScoreTracker, SettledRegistry, TetrisError};
use blockfall::types::{BlockColor, FIELD_HEIGHT, FIELD_WIDTH, ROW_CLEAR_SCORE};

const BOTTOM: i32 = FIELD_HEIGHT - 1;

fn row(y: i32, skip: Option<i32>) -> Vec<(i32, i32)> {
    (0..FIELD_WIDTH)
        .filter(|x| Some(*x) != skip)
        .map(|x| (x, y))
        .collect()
}

#[test]
fn test_cell_rejects_negative_coordinates() {
    assert!(Cell::new(0, 0, BlockColor::Red).is_ok());
    assert!(matches!(
        Cell::new(-1, 3, BlockColor::Red),
        Err(TetrisError::InvalidConstruction { x: -1, y: 3 })
    ));
    assert!(matches!(
        Cell::new(2, -4, BlockColor::Red),
        Err(TetrisError::InvalidConstruction { .. })
    ));
}

#[test]
fn test_full_bottom_row_clears_and_shifts_stack() {
    let mut registry = SettledRegistry::new();
    let mut score = ScoreTracker::new();
    registry.insert(&row(BOTTOM, None), BlockColor::Yellow).unwrap();
    // A two-high column resting on the full row.
    registry
        .insert(&[(3, BOTTOM - 2), (3, BOTTOM - 1)], BlockColor::Green)
        .unwrap();
    let before = registry.cell_count();

    let cleared = clear_full_rows(&mut registry, &mut score);

    assert_eq!(cleared.as_slice(), &[BOTTOM]);
    assert_eq!(score.value(), ROW_CLEAR_SCORE);
    assert_eq!(registry.cell_count(), before - FIELD_WIDTH as usize);
    assert!(registry.is_occupied(3, BOTTOM));
    assert!(registry.is_occupied(3, BOTTOM - 1));
    assert!(!registry.is_occupied(3, BOTTOM - 2));
    assert_eq!(registry.row_len(BOTTOM), 1);
}

#[test]
fn test_row_one_short_is_never_cleared() {
    for gap in 0..FIELD_WIDTH {
        let mut registry = SettledRegistry::new();
        let mut score = ScoreTracker::new();
        registry.insert(&row(BOTTOM, Some(gap)), BlockColor::Red).unwrap();

        let cleared = clear_full_rows(&mut registry, &mut score);

        assert!(cleared.is_empty(), "gap at {} cleared", gap);
        assert_eq!(score.value(), 0);
        assert_eq!(registry.row_len(BOTTOM), (FIELD_WIDTH - 1) as usize);
    }
}

#[test]
fn test_two_full_rows_score_twice() {
    let mut registry = SettledRegistry::new();
    let mut score = ScoreTracker::new();
    registry.insert(&row(BOTTOM - 1, None), BlockColor::Red).unwrap();
    registry.insert(&row(BOTTOM, None), BlockColor::Blue).unwrap();

    let cleared = clear_full_rows(&mut registry, &mut score);

    assert_eq!(cleared.len(), 2);
    assert_eq!(score.value(), 2 * ROW_CLEAR_SCORE);
    assert!(registry.is_empty());
}

#[test]
fn test_clear_in_middle_keeps_rows_below() {
    let mut registry = SettledRegistry::new();
    let mut score = ScoreTracker::new();
    registry.insert(&row(BOTTOM, Some(0)), BlockColor::Red).unwrap();
    registry.insert(&row(BOTTOM - 1, None), BlockColor::Blue).unwrap();
    registry.insert(&[(6, BOTTOM - 2)], BlockColor::Purple).unwrap();

    clear_full_rows(&mut registry, &mut score);

    assert_eq!(score.value(), ROW_CLEAR_SCORE);
    assert_eq!(registry.row_len(BOTTOM), (FIELD_WIDTH - 1) as usize);
    assert!(registry.is_occupied(6, BOTTOM - 1));
    assert!(!registry.is_occupied(0, BOTTOM));
}

#[test]
fn test_neighbor_queries_against_groups() {
    let mut registry = SettledRegistry::new();
    registry.insert(&[(4, 10), (4, 11)], BlockColor::Orange).unwrap();

    let left_of = vec![Cell::new(3, 11, BlockColor::Red).unwrap()];
    let right_of = vec![Cell::new(5, 10, BlockColor::Red).unwrap()];
    let above = vec![Cell::new(4, 9, BlockColor::Red).unwrap()];
    let diagonal = vec![Cell::new(5, 9, BlockColor::Red).unwrap()];

    assert!(registry.has_right_neighbor(&left_of));
    assert!(registry.has_left_neighbor(&right_of));
    assert!(registry.has_bottom_neighbor(&above));

    assert!(!registry.has_left_neighbor(&left_of));
    assert!(!registry.has_bottom_neighbor(&diagonal));
    assert!(!registry.has_right_neighbor(&diagonal));
}

#[test]
fn test_overwhelmed_iff_top_row_occupied() {
    let mut registry = SettledRegistry::new();
    for y in 1..FIELD_HEIGHT {
        registry.insert(&[(7, y)], BlockColor::Blue).unwrap();
        assert!(!registry.is_overwhelmed());
    }
    registry.insert(&[(7, 0)], BlockColor::Blue).unwrap();
    assert!(registry.is_overwhelmed());
}
