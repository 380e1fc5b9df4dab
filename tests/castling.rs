mod common;

use chess_variants::board::TurnError;
use chess_variants::coord::Coord;
use chess_variants::game::{ChessGame, MoveOutcome};
use chess_variants::rules::ChessRules;
use chess_variants::variant::Variant;
use common::*;
use pretty_assertions::assert_eq;


const CASTLING_READY: &str = "
    . . . . k . . .
    . . . . . . . .
    . . . . . . . .
    . . . . . . . .
    . . . . . . . .
    . . . . . . . .
    . . . . . . . .
    R . . . K . . R
";

fn castling_game(board_str: &str) -> ChessGame {
    load_position(Variant::Classic, board_str, 1, None)
}

#[test]
fn king_side() {
    let mut game = castling_game(CASTLING_READY);
    assert_eq!(game.apply_move(Coord::E1, Coord::G1), Ok(MoveOutcome::Success));
    let grid = game.board_snapshot();
    assert!(grid[Coord::G1].is(piece!(White King)));
    assert!(grid[Coord::F1].is(piece!(White Rook)));
    assert_eq!(grid[Coord::E1], None);
    assert_eq!(grid[Coord::H1], None);
    assert!(grid[Coord::G1].unwrap().moved);
    assert!(grid[Coord::F1].unwrap().moved);
    assert_eq!(game.turn_number(), 2);
}

#[test]
fn queen_side() {
    let mut game = castling_game(CASTLING_READY);
    assert_eq!(game.apply_move(Coord::E1, Coord::C1), Ok(MoveOutcome::Success));
    let grid = game.board_snapshot();
    assert!(grid[Coord::C1].is(piece!(White King)));
    assert!(grid[Coord::D1].is(piece!(White Rook)));
    assert_eq!(grid[Coord::A1], None);
    assert!(grid[Coord::H1].is(piece!(White Rook)));
}

#[test]
fn black_castles_too() {
    let mut game = load_position(Variant::Classic, "
        r . . . k . . r
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . K . . .
    ", 2, None);
    assert_eq!(game.apply_move(Coord::E8, Coord::C8), Ok(MoveOutcome::Success));
    assert!(game.board_snapshot()[Coord::D8].is(piece!(Black Rook)));
    assert!(game.board_snapshot()[Coord::C8].is(piece!(Black King)));
}

#[test]
fn moved_king_or_rook() {
    let mut game = castling_game(CASTLING_READY);
    replay(&mut game, "e1 e2, e8 e7, e2 e1, e7 e8").unwrap();
    assert_eq!(game.apply_move(Coord::E1, Coord::G1), Err(TurnError::CannotCastle));
    assert_eq!(game.apply_move(Coord::E1, Coord::C1), Err(TurnError::CannotCastle));

    let mut game = castling_game(CASTLING_READY);
    replay(&mut game, "h1 h2, e8 e7, h2 h1, e7 e8").unwrap();
    assert_eq!(game.apply_move(Coord::E1, Coord::G1), Err(TurnError::CannotCastle));
    assert_eq!(game.apply_move(Coord::E1, Coord::C1), Ok(MoveOutcome::Success));
}

#[test]
fn pieces_in_between() {
    let game = castling_game("
        . . . . k . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        R N . . K . N R
    ");
    assert_eq!(game.can_make_move(Coord::E1, Coord::G1), Err(TurnError::CannotCastle));
    assert_eq!(game.can_make_move(Coord::E1, Coord::C1), Err(TurnError::CannotCastle));

    let game = castling_game("
        . . . . k . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        R . . . K . n R
    ");
    assert_eq!(game.can_make_move(Coord::E1, Coord::G1), Err(TurnError::CannotCastle));
}

#[test]
fn attacked_squares() {
    // King in check.
    let game = castling_game("
        . . . . k . . .
        . . . . r . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        R . . . K . . R
    ");
    assert_eq!(game.can_make_move(Coord::E1, Coord::G1), Err(TurnError::CannotCastle));
    assert_eq!(game.can_make_move(Coord::E1, Coord::C1), Err(TurnError::CannotCastle));

    // Passing through an attacked square.
    let game = castling_game("
        . . . . k r . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        R . . . K . . R
    ");
    assert_eq!(game.can_make_move(Coord::E1, Coord::G1), Err(TurnError::CannotCastle));
    assert_eq!(game.can_make_move(Coord::E1, Coord::C1), Ok(()));

    // Landing on an attacked square.
    let game = castling_game("
        . . . . k . r .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        R . . . K . . R
    ");
    assert_eq!(game.can_make_move(Coord::E1, Coord::G1), Err(TurnError::CannotCastle));

    // Only the king's squares matter: the rook may cross an attacked square.
    let game = castling_game("
        . r . . k . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        R . . . K . . R
    ");
    assert_eq!(game.can_make_move(Coord::E1, Coord::C1), Ok(()));
}

#[test]
fn needs_rook_in_the_corner() {
    let game = castling_game("
        . . . . k . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        B . . . K . . N
    ");
    assert_eq!(game.can_make_move(Coord::E1, Coord::G1), Err(TurnError::CannotCastle));
    assert_eq!(game.can_make_move(Coord::E1, Coord::C1), Err(TurnError::CannotCastle));
}

#[test]
fn two_square_king_step_away_from_home() {
    let game = castling_game("
        . . . . k . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . K . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
    ");
    assert_eq!(game.can_make_move(Coord::D4, Coord::F4), Err(TurnError::CannotCastle));
    assert_eq!(game.can_make_move(Coord::D4, Coord::D6), Err(TurnError::IllegalShape));
}

#[test]
fn starting_position_castles_after_clearing() {
    let mut game = ChessGame::new(ChessRules::classic());
    replay(&mut game, "g1 f3, g8 f6, e2 e3, e7 e6, f1 e2, f8 e7").unwrap();
    assert_eq!(game.apply_move(Coord::E1, Coord::G1), Ok(MoveOutcome::Success));
    assert_eq!(game.apply_move(Coord::E8, Coord::G8), Ok(MoveOutcome::Success));
    assert!(game.board_snapshot()[Coord::F8].is(piece!(Black Rook)));
}
