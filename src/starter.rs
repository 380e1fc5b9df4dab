use crate::board::Board;
use crate::coord::{Coord, SubjectiveRow};
use crate::force::{Force, PieceForce};
use crate::internal_error_message;
use crate::piece::PieceKind;
use crate::rules::ChessRules;
use crate::variant::{Variant, ghost_start};


pub fn starting_piece_row() -> &'static [PieceKind] {
    use PieceKind::*;
    &[Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook]
}

fn init_piece(board: &mut Board, kind: PieceKind, force: PieceForce, pos: Coord) {
    if let Err(err) = board.init_piece(kind, force, pos) {
        panic!("{}", internal_error_message!("cannot set up {kind:?} on {pos}: {err}"));
    }
}

// Standard army on both sides; Spooky chess also gets the ghost.
pub fn generate_starting_board(rules: &ChessRules) -> Board {
    let board_shape = rules.board_shape;
    let starting_row = starting_piece_row();
    assert_eq!(starting_row.len(), board_shape.num_cols as usize);
    let mut board = Board::new(board_shape, rules.variant.catalog());
    for force in [Force::White, Force::Black] {
        let first_row = SubjectiveRow::first().to_row(board_shape, force);
        let second_row = SubjectiveRow::from_zero_based(1).to_row(board_shape, force);
        for (col, &kind) in board_shape.cols().zip(starting_row) {
            init_piece(&mut board, kind, force.into(), Coord::new(first_row, col));
            init_piece(&mut board, PieceKind::Pawn, force.into(), Coord::new(second_row, col));
        }
    }
    if rules.variant == Variant::Spooky {
        init_piece(&mut board, PieceKind::Ghost, PieceForce::Neutral, ghost_start(board_shape));
    }
    board
}

