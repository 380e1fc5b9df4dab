// Move legality, castling, check detection and move application on a single grid.
//
// Every what-if question (does this move expose the king? is this castling path safe?) is
// answered on a `GridSnapshot`. The grid owned by `Board` changes only in `apply_move`.

use std::fmt;

use log::debug;

use crate::coord::{BoardShape, Coord, SubjectiveRow};
use crate::force::{Force, PieceForce};
use crate::grid::{Grid, GridItem, GridSnapshot};
use crate::internal_error_message;
use crate::movement::{is_pawn_capture, move_shape};
use crate::piece::{PieceCatalog, PieceKind, PieceOnBoard, PieceOrigin};


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TurnError {
    OutOfBounds,
    NoPieceOrWrongOwner,
    IllegalShape,
    Blocked,
    CannotCastle,
    CannotExposeCheck,
    MustHandleCheck,
    GameOver,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PlacementError {
    UnregisteredKind,
    OutOfBounds,
    Occupied,
}

impl fmt::Display for TurnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            TurnError::OutOfBounds => "That square is not on the board.",
            TurnError::NoPieceOrWrongOwner => "There is no piece of yours on that square.",
            TurnError::IllegalShape => "That piece does not move like that.",
            TurnError::Blocked => "The move is blocked.",
            TurnError::CannotCastle => "You cannot castle there.",
            TurnError::CannotExposeCheck => "That move would put your king in check.",
            TurnError::MustHandleCheck => "Your king is in check and the move does not get it out.",
            TurnError::GameOver => "The game is over.",
        };
        write!(f, "{message}")
    }
}

impl std::error::Error for TurnError {}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            PlacementError::UnregisteredKind => "piece kind is not available in this game",
            PlacementError::OutOfBounds => "square is not on the board",
            PlacementError::Occupied => "square is already occupied",
        };
        write!(f, "{message}")
    }
}

impl std::error::Error for PlacementError {}

// King and rook squares of a castling move. The king always travels two squares.
#[derive(Clone, Copy, Debug)]
struct Castling {
    direction: i8,
    rook_from: Coord,
    rook_to: Coord,
    // Squares strictly between the king and the rook.
    gap: i8,
}

impl Castling {
    // Recognizes a two-square horizontal step. Says nothing about whether it is allowed.
    fn for_king_move(from: Coord, to: Coord) -> Option<Self> {
        let (d_row, d_col) = to - from;
        if d_row != 0 || d_col.abs() != 2 {
            return None;
        }
        let direction = d_col.signum();
        let rook_distance = if direction > 0 { 3 } else { 4 };
        Some(Castling {
            direction,
            rook_from: from + (0, direction * rook_distance),
            rook_to: to + (0, -direction),
            gap: rook_distance - 1,
        })
    }
}

fn should_promote(piece: PieceOnBoard, to: Coord, board_shape: BoardShape) -> bool {
    let Ok(force) = Force::try_from(piece.force) else {
        return false;
    };
    piece.kind == PieceKind::Pawn && to.row == SubjectiveRow::last(board_shape).to_row(board_shape, force)
}

fn attacks(grid: &Grid, from: Coord, piece: PieceOnBoard, target: Coord) -> bool {
    match piece.kind {
        PieceKind::Pawn => match Force::try_from(piece.force) {
            Ok(force) => is_pawn_capture(grid, from, target, force),
            Err(()) => false,
        },
        _ => move_shape(piece.kind, piece.force, grid.shape(), from, target)
            .is_some_and(|trajectory| trajectory.iter().all(|&pos| grid[pos].is_none())),
    }
}

// Whether `force`'s king is attacked by any opposing piece. The ghost never attacks.
// A grid without such a king is never in check.
pub fn is_check_to(grid: &Grid, force: Force) -> bool {
    let Some(king_pos) = grid.find_king(force) else {
        return false;
    };
    grid.pieces()
        .any(|(from, piece)| piece.force.is_opponent_of(force) && attacks(grid, from, piece, king_pos))
}


#[derive(Clone, Debug)]
pub struct Board {
    grid: Grid,
    catalog: PieceCatalog,
}

impl Board {
    pub fn new(board_shape: BoardShape, catalog: PieceCatalog) -> Self {
        Board { grid: Grid::new(board_shape), catalog }
    }

    // Takes the grid as is, without consulting the catalog.
    pub fn from_grid(grid: Grid, catalog: PieceCatalog) -> Self { Board { grid, catalog } }

    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn grid_mut(&mut self) -> &mut Grid { &mut self.grid }
    pub fn shape(&self) -> BoardShape { self.grid.shape() }

    pub fn init_piece(&mut self, kind: PieceKind, force: PieceForce, pos: Coord)
        -> Result<(), PlacementError>
    {
        let piece = self.catalog.make(kind, force).ok_or(PlacementError::UnregisteredKind)?;
        match self.grid.get(pos) {
            GridItem::OutOfBounds => Err(PlacementError::OutOfBounds),
            GridItem::Piece(_) => Err(PlacementError::Occupied),
            GridItem::Empty => {
                self.grid[pos] = Some(piece);
                Ok(())
            }
        }
    }

    pub fn is_check(&self, force: Force) -> bool { is_check_to(&self.grid, force) }

    // Decides whether `force` may move the piece on `from` to `to`. Does not look at whose
    // turn it is or whether the game is over; that is up to the caller.
    pub fn verdict(&self, from: Coord, to: Coord, force: Force) -> Result<(), TurnError> {
        let grid = &self.grid;
        if !grid.contains_coord(from) || !grid.contains_coord(to) {
            return Err(TurnError::OutOfBounds);
        }
        let piece = match grid[from] {
            Some(piece) if piece.force.is_owned_by(force) => piece,
            _ => return Err(TurnError::NoPieceOrWrongOwner),
        };

        let trajectory = match move_shape(piece.kind, piece.force, grid.shape(), from, to) {
            Some(trajectory) => {
                // Pawns do not capture straight ahead.
                if piece.kind == PieceKind::Pawn && grid[to].is_some() {
                    return Err(TurnError::Blocked);
                }
                trajectory
            }
            None => {
                if piece.kind == PieceKind::King && Castling::for_king_move(from, to).is_some() {
                    return if self.can_castle(from, to, force) {
                        Ok(())
                    } else {
                        Err(TurnError::CannotCastle)
                    };
                }
                if piece.kind == PieceKind::Pawn && is_pawn_capture(grid, from, to, force) {
                    Vec::new()
                } else {
                    return Err(TurnError::IllegalShape);
                }
            }
        };

        // Own pieces and the ghost cannot be captured.
        if let Some(target) = grid[to] {
            if !target.force.is_opponent_of(force) {
                return Err(TurnError::Blocked);
            }
        }
        if trajectory.iter().any(|&pos| grid[pos].is_some()) {
            return Err(TurnError::Blocked);
        }

        let was_in_check = is_check_to(grid, force);
        let simulation = GridSnapshot::of(grid).with_relocation(from, to);
        if is_check_to(&simulation, force) {
            return Err(if was_in_check {
                TurnError::MustHandleCheck
            } else {
                TurnError::CannotExposeCheck
            });
        }
        Ok(())
    }

    // Whether the king on `from` may castle by stepping to `to`: both king and rook are
    // unmoved, the squares between them are empty, and the king is not attacked on its
    // starting square nor on any square it passes through or lands on.
    pub fn can_castle(&self, from: Coord, to: Coord, force: Force) -> bool {
        let grid = &self.grid;
        let Some(castling) = Castling::for_king_move(from, to) else {
            return false;
        };
        match grid.get(from) {
            GridItem::Piece(king)
                if king.kind == PieceKind::King && king.force.is_owned_by(force) && !king.moved => {}
            _ => return false,
        }
        match grid.get(castling.rook_from) {
            GridItem::Piece(rook)
                if rook.kind == PieceKind::Rook && rook.force.is_owned_by(force) && !rook.moved => {}
            _ => return false,
        }
        if (1..=castling.gap).any(|i| grid[from + (0, castling.direction * i)].is_some()) {
            return false;
        }

        if is_check_to(grid, force) {
            return false;
        }
        let mut snapshot = GridSnapshot::of(grid);
        let mut king_pos = from;
        while king_pos != to {
            let next = king_pos + (0, castling.direction);
            snapshot = snapshot.with_relocation(king_pos, next);
            if is_check_to(&snapshot, force) {
                return false;
            }
            king_pos = next;
        }
        true
    }

    // Stops at the first legal move found.
    pub fn has_legal_move(&self, force: Force) -> bool {
        let board_shape = self.shape();
        self.grid
            .pieces()
            .filter(|(_, piece)| piece.force.is_owned_by(force))
            .any(|(from, _)| board_shape.coords().any(|to| self.verdict(from, to, force).is_ok()))
    }

    // Applies a move that `verdict` has accepted: relocates the piece, brings the rook along
    // when castling, promotes pawns to queens. Returns the captured piece, if any.
    pub fn apply_move(&mut self, from: Coord, to: Coord) -> Option<PieceOnBoard> {
        let board_shape = self.shape();
        let Some(mut piece) = self.grid[from].take() else {
            panic!("{}", internal_error_message!("no piece to move from {from}"));
        };
        if piece.kind == PieceKind::King {
            if let Some(castling) = Castling::for_king_move(from, to) {
                let Some(mut rook) = self.grid[castling.rook_from].take() else {
                    panic!("{}", internal_error_message!("no castling rook on {}", castling.rook_from));
                };
                rook.moved = true;
                self.grid[castling.rook_to] = Some(rook);
                debug!("Castling rook {} -> {}", castling.rook_from, castling.rook_to);
            }
        }
        piece.moved = true;
        if should_promote(piece, to, board_shape) {
            let Some(queen) = self.catalog.make(PieceKind::Queen, piece.force) else {
                panic!("{}", internal_error_message!("queens are not registered"));
            };
            piece = PieceOnBoard { origin: PieceOrigin::Promoted, ..queen };
            debug!("Promoted {:?} pawn on {}", piece.force, to);
        }
        let captured = self.grid[to].replace(piece);
        debug!("Moved {:?} {:?} {} -> {}", piece.force, piece.kind, from, to);
        captured
    }
}
