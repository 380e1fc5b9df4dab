// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use chess_variants::board::{Board, TurnError};
use chess_variants::coord::{BoardShape, Col, Coord, Row};
use chess_variants::force::{Force, PieceForce};
use chess_variants::game::{ChessGame, GameSnapshot, MoveOutcome, PieceRecord};
use chess_variants::grid::Grid;
use chess_variants::piece::{PieceKind, PieceOnBoard, PieceOrigin, piece_from_ascii};
use chess_variants::variant::{Ghost, Variant};
use itertools::Itertools;


#[derive(Clone, Copy, Debug)]
pub struct PieceMatcher {
    pub kind: PieceKind,
    pub force: PieceForce,
}

pub trait PieceIs {
    fn is(self, matcher: PieceMatcher) -> bool;
}

impl PieceIs for Option<PieceOnBoard> {
    fn is(self, matcher: PieceMatcher) -> bool {
        if let Some(piece) = self {
            piece.kind == matcher.kind && piece.force == matcher.force
        } else {
            false
        }
    }
}

#[macro_export]
macro_rules! piece {
    ($force:ident $kind:ident) => {
        common::PieceMatcher {
            force: chess_variants::force::PieceForce::$force,
            kind: chess_variants::piece::PieceKind::$kind,
        }
    };
}


// Rank 8 comes first, like a diagram. '.' is an empty square, 'G' is the ghost.
#[allow(dead_code)]
pub fn parse_grid(board_str: &str) -> Result<Grid, String> {
    let board_shape = BoardShape::standard();
    let rows = board_str
        .split('\n')
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.split_ascii_whitespace().collect_vec())
        .collect_vec();
    assert_eq!(rows.len(), board_shape.num_rows as usize);
    assert!(rows.iter().all(|row| row.len() == board_shape.num_cols as usize));
    let mut grid = Grid::new(board_shape);
    for (row_idx, row) in rows.iter().rev().enumerate() {
        for (col_idx, piece_str) in row.iter().enumerate() {
            let (piece_char,) = piece_str
                .chars()
                .collect_tuple()
                .ok_or_else(|| format!("Invalid piece: {}", piece_str))?;
            let coord =
                Coord::new(Row::from_zero_based(row_idx as i8), Col::from_zero_based(col_idx as i8));
            grid[coord] = if piece_char == '.' {
                None
            } else {
                let (kind, force) = piece_from_ascii(piece_char)
                    .ok_or_else(|| format!("Invalid piece: {}", piece_char))?;
                Some(PieceOnBoard::new(kind, PieceOrigin::Innate, force))
            };
        }
    }
    Ok(grid)
}

// A game in the given position with `turn` to play. Goes through the same path as loading a
// saved game, so every piece starts unmoved.
#[allow(dead_code)]
pub fn load_position(variant: Variant, board_str: &str, turn: u32, ghost_draws: Option<u64>) -> ChessGame {
    let grid = parse_grid(board_str).unwrap();
    let snapshot = GameSnapshot {
        variant,
        turn,
        ghost_draws,
        pieces: grid
            .pieces()
            .map(|(pos, piece)| PieceRecord { force: piece.force, pos, kind: piece.kind })
            .collect(),
    };
    ChessGame::from_snapshot(&snapshot).unwrap()
}

// Number of ghost draws to skip so that, after `from` -> `to` is played on `board_str`, the
// ghost lands on `target`.
#[allow(dead_code)]
pub fn ghost_draws_for(board_str: &str, from: Coord, to: Coord, target: Coord) -> u64 {
    let grid = parse_grid(board_str).unwrap();
    let (ghost_pos, _) = grid
        .pieces()
        .find(|(_, piece)| piece.kind == PieceKind::Ghost)
        .expect("no ghost on the board");
    let mut board = Board::from_grid(grid, Variant::Spooky.catalog());
    board.apply_move(from, to);
    (0..10_000)
        .find(|&draws| {
            Ghost::restore(ghost_pos, draws, board.shape()).next_destination(board.grid()) == target
        })
        .expect("ghost never reaches the target")
}

// Spooky game set up so that the ghost will answer `from` -> `to` by jumping to `target`.
#[allow(dead_code)]
pub fn spooky_position(board_str: &str, turn: u32, from: Coord, to: Coord, target: Coord) -> ChessGame {
    let draws = ghost_draws_for(board_str, from, to, target);
    load_position(Variant::Spooky, board_str, turn, Some(draws))
}

// Plays "e2 e4" style moves separated by commas.
#[allow(dead_code)]
pub fn replay(game: &mut ChessGame, moves: &str) -> Result<Vec<MoveOutcome>, TurnError> {
    moves
        .split(',')
        .map(|mv| {
            let (from, to) = mv
                .split_whitespace()
                .map(|s| Coord::from_algebraic(s).unwrap())
                .collect_tuple()
                .unwrap();
            game.apply_move(from, to)
        })
        .collect()
}

// First legal move in rank-major order, never castling. Deterministic, so two copies of a
// game fed by it stay in lockstep.
#[allow(dead_code)]
pub fn first_legal_move(game: &ChessGame) -> Option<(Coord, Coord)> {
    let grid = game.board_snapshot();
    let force: PieceForce = game.current_player().into();
    grid.pieces()
        .filter(|(_, piece)| piece.force == force)
        .flat_map(|(from, piece)| {
            grid.shape().coords().map(move |to| (from, piece, to))
        })
        .filter(|&(from, piece, to)| {
            !(piece.kind == PieceKind::King && (to.col - from.col).abs() == 2)
        })
        .map(|(from, _, to)| (from, to))
        .find(|&(from, to)| game.can_make_move(from, to).is_ok())
}

#[allow(dead_code)]
pub fn count_pieces(grid: &Grid, kind: PieceKind) -> usize {
    grid.pieces().filter(|(_, piece)| piece.kind == kind).count()
}

#[allow(dead_code)]
pub fn king_pos(grid: &Grid, force: Force) -> Coord { grid.find_king(force).unwrap() }
