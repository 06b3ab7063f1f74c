//! GridBoard tests through the facade.

use tick_tetris::core::{GridBoard, Piece};
use tick_tetris::types::{PieceKind, Rotation};

fn tagged_row(board: &mut GridBoard, y: i8, kind: PieceKind) {
    // One cell per row, at a column unique to the row, so shifts are traceable.
    board.set(y % board.width() as i8, y, Some(kind));
}

#[test]
fn test_clear_rows_two_and_five() {
    let mut board = GridBoard::new(10, 12, 2);
    for y in 0..12 {
        tagged_row(&mut board, y, PieceKind::T);
    }
    board.fill_row(2, Some(PieceKind::I));
    board.fill_row(5, Some(PieceKind::I));

    let before = board.clone();
    assert_eq!(board.clear_full_rows(), 2);

    // Rows below 5 are untouched.
    for y in 6..12 {
        assert_eq!(board.row(y), before.row(y), "row {}", y);
    }
    // Rows 3 and 4 drop by one (past row 5).
    assert_eq!(board.row(5), before.row(4));
    assert_eq!(board.row(4), before.row(3));
    // Rows 0 and 1 drop by two (past rows 2 and 5).
    assert_eq!(board.row(3), before.row(1));
    assert_eq!(board.row(2), before.row(0));
    // New rows at the top are empty.
    assert!(board.row(0).unwrap().iter().all(Option::is_none));
    assert!(board.row(1).unwrap().iter().all(Option::is_none));
}

#[test]
fn test_clear_with_no_full_rows_is_noop() {
    let mut board = GridBoard::new(10, 22, 2);
    board.fill_row(21, Some(PieceKind::L));
    board.set(0, 21, None);
    let before = board.clone();
    assert_eq!(board.clear_full_rows(), 0);
    assert_eq!(board, before);
}

#[test]
fn test_valid_position_bounds_and_collision() {
    let mut board = GridBoard::new(10, 22, 2);

    // Upright I at the left wall: offsets x = 1.
    let mut piece = Piece::new(PieceKind::I, -1, 5);
    piece.rotate_left();
    assert_eq!(piece.rotation(), Rotation::West);
    assert!(board.is_valid_position(&piece));
    piece.move_left();
    assert!(!board.is_valid_position(&piece));

    // Flat I resting on the floor.
    let floor = Piece::new(PieceKind::I, 0, 20);
    assert!(board.is_valid_position(&floor));
    let mut below = floor;
    below.move_down();
    assert!(!board.is_valid_position(&below));

    // Collision with a stored cell.
    board.set(2, 10, Some(PieceKind::Z));
    let hit = Piece::new(PieceKind::I, 0, 9);
    assert!(!board.is_valid_position(&hit));
}

#[test]
fn test_over_limit_is_header_rows() {
    let board = GridBoard::new(10, 22, 2);
    // O cells are the pivot row and the one below it.
    assert!(board.is_over_limit(&Piece::new(PieceKind::O, 3, 0)));
    assert!(board.is_over_limit(&Piece::new(PieceKind::O, 3, 2)));
    assert!(!board.is_over_limit(&Piece::new(PieceKind::O, 3, 3)));
}

#[test]
fn test_store_shape_writes_all_cells() {
    let mut board = GridBoard::new(10, 22, 2);
    let piece = Piece::new(PieceKind::T, 4, 20);
    board.store_shape(piece);
    for (x, y) in piece.cells() {
        assert_eq!(board.get(x, y), Some(Some(PieceKind::T)));
    }
    assert_eq!(board.filled_count(), 4);
}
