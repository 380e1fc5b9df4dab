// Movement shapes: where each kind of piece may go, ignoring what stands on the board.

use crate::coord::{BoardShape, Coord, SubjectiveRow};
use crate::force::{Force, PieceForce};
use crate::grid::{Grid, GridItem};
use crate::piece::PieceKind;
use crate::util::sort_two;


// Squares strictly between the start and the end of a move, in order of travel. Each of them
// must be empty for the move to go through.
pub type Trajectory = Vec<Coord>;

pub fn direction_forward(force: Force) -> i8 {
    match force {
        Force::White => 1,
        Force::Black => -1,
    }
}

// Returns the trajectory if `kind` can move from `from` to `to` on an empty board, `None` if the
// shape is impossible. Pawn captures and castling are not shapes; see `is_pawn_capture` and
// `Board::can_castle`.
pub fn move_shape(
    kind: PieceKind, force: PieceForce, board_shape: BoardShape, from: Coord, to: Coord,
) -> Option<Trajectory> {
    let (d_row, d_col) = to - from;
    let is_straight_move = (d_row == 0) != (d_col == 0);
    let is_diagonal_move = d_row != 0 && d_row.abs() == d_col.abs();
    match kind {
        PieceKind::Pawn => pawn_shape(force, board_shape, from, to),
        PieceKind::Knight => {
            if sort_two((d_row.abs(), d_col.abs())) == (1, 2) { Some(Vec::new()) } else { None }
        }
        PieceKind::Bishop => {
            if is_diagonal_move { Some(linear_trajectory(from, to)) } else { None }
        }
        PieceKind::Rook => {
            if is_straight_move { Some(linear_trajectory(from, to)) } else { None }
        }
        PieceKind::Queen => {
            if is_straight_move || is_diagonal_move {
                Some(linear_trajectory(from, to))
            } else {
                None
            }
        }
        PieceKind::King => {
            let is_step = d_row.abs() <= 1 && d_col.abs() <= 1 && (d_row, d_col) != (0, 0);
            if is_step { Some(Vec::new()) } else { None }
        }
        // Only ever relocated by the Spooky overlay.
        PieceKind::Ghost => None,
    }
}

fn pawn_shape(force: PieceForce, board_shape: BoardShape, from: Coord, to: Coord) -> Option<Trajectory> {
    let force = Force::try_from(force).ok()?;
    let (d_row, d_col) = to - from;
    if d_col != 0 {
        return None;
    }
    let dir_forward = direction_forward(force);
    let second_row = SubjectiveRow::from_zero_based(1).to_row(board_shape, force);
    if d_row == dir_forward {
        Some(Vec::new())
    } else if d_row == dir_forward * 2 && from.row == second_row {
        Some(vec![from + (dir_forward, 0)])
    } else {
        None
    }
}

// Requires a straight or diagonal move.
fn linear_trajectory(from: Coord, to: Coord) -> Trajectory {
    let (d_row, d_col) = to - from;
    let direction = (d_row.signum(), d_col.signum());
    let mut trajectory = Vec::new();
    let mut pos = from + direction;
    while pos != to {
        trajectory.push(pos);
        pos = pos + direction;
    }
    trajectory
}

// A pawn of `force` captures one square diagonally forward, and only onto an opponent's piece.
pub fn is_pawn_capture(grid: &Grid, from: Coord, to: Coord, force: Force) -> bool {
    let (d_row, d_col) = to - from;
    if d_row != direction_forward(force) || d_col.abs() != 1 {
        return false;
    }
    matches!(grid.get(to), GridItem::Piece(piece) if piece.force.is_opponent_of(force))
}
