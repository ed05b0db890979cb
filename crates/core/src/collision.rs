//! Collision detector.
//!
//! One predicate backs every legality check: movement, rotation and spawn.

use crate::board::Board;
use crate::pieces::ActivePiece;

/// True if any occupied piece cell is outside the grid or lands on a filled cell.
///
/// Stops at the first offending cell.
pub fn collide(board: &Board, piece: &ActivePiece) -> bool {
    piece.cells().any(|(x, y, _)| match board.get(x, y) {
        None => true,
        Some(v) => v != crate::types::EMPTY,
    })
}

/// Landing row for `piece`: the largest `y` reachable by falling straight down.
///
/// Returns `piece.y` if the piece cannot move down at all.
pub fn landing_y(board: &Board, piece: &ActivePiece) -> i8 {
    let mut probe = *piece;
    while !collide(board, &probe.offset(0, 1)) {
        probe.y += 1;
    }
    probe.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::create_piece;
    use crate::types::PieceKind;

    #[test]
    fn empty_cells_of_the_box_may_hang_outside() {
        let board = Board::default();
        // T spawn box has an empty bottom row, so y = 18 keeps all minos inside.
        let t = ActivePiece::new(create_piece(PieceKind::T), 0, 18);
        assert!(!collide(&board, &t));
        assert!(collide(&board, &t.offset(0, 1)));
    }

    #[test]
    fn walls_and_floor_collide() {
        let board = Board::default();
        let o = create_piece(PieceKind::O);
        assert!(collide(&board, &ActivePiece::new(o, -1, 0)));
        assert!(collide(&board, &ActivePiece::new(o, 9, 0)));
        assert!(collide(&board, &ActivePiece::new(o, 0, 19)));
        assert!(collide(&board, &ActivePiece::new(o, 0, -1)));
        assert!(!collide(&board, &ActivePiece::new(o, 8, 18)));
    }

    #[test]
    fn filled_cell_collides() {
        let mut board = Board::default();
        board.set(5, 5, 3);
        let o = create_piece(PieceKind::O);
        assert!(collide(&board, &ActivePiece::new(o, 4, 4)));
        assert!(!collide(&board, &ActivePiece::new(o, 6, 4)));
    }

    #[test]
    fn landing_row_on_empty_board() {
        let board = Board::default();
        let i = ActivePiece::new(create_piece(PieceKind::I), 3, 0);
        assert_eq!(landing_y(&board, &i), 19);
        let o = ActivePiece::new(create_piece(PieceKind::O), 4, 0);
        assert_eq!(landing_y(&board, &o), 18);
    }
}
