use std::{fmt, ops};

use ndarray::{Array, Array2};
use serde::{Deserialize, Serialize};

use crate::coord::{BoardShape, Coord};
use crate::force::Force;
use crate::piece::{PieceKind, PieceOnBoard, PieceOrigin};


#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GridItem<T> {
    Piece(T),
    Empty,
    OutOfBounds,
}

impl<T> GridItem<T> {
    pub fn is_free(&self) -> bool { matches!(self, GridItem::Empty) }
}

// At most one piece per square, by construction.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    data: Array2<Option<PieceOnBoard>>,
}

impl Grid {
    pub fn new(board_shape: BoardShape) -> Self {
        Grid {
            data: Array::from_elem(
                (board_shape.num_rows as usize, board_shape.num_cols as usize),
                None,
            ),
        }
    }

    pub fn shape(&self) -> BoardShape {
        BoardShape {
            num_rows: self.data.shape()[0] as u8,
            num_cols: self.data.shape()[1] as u8,
        }
    }

    pub fn contains_coord(&self, coord: Coord) -> bool { self.shape().contains_coord(coord) }

    pub fn get(&self, pos: Coord) -> GridItem<&PieceOnBoard> {
        match coord_to_index(pos).and_then(|idx| self.data.get(idx)) {
            None => GridItem::OutOfBounds,
            Some(None) => GridItem::Empty,
            Some(Some(piece)) => GridItem::Piece(piece),
        }
    }

    // Occupied squares in rank-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, PieceOnBoard)> + '_ {
        self.shape().coords().filter_map(move |pos| self[pos].map(|piece| (pos, piece)))
    }

    pub fn find_king(&self, force: Force) -> Option<Coord> {
        self.pieces()
            .find(|(_, piece)| piece.kind == PieceKind::King && piece.force.is_owned_by(force))
            .map(|(pos, _)| pos)
    }
}

// Disposable copy of a grid for what-if evaluation. Changes never reach the grid it was
// taken from, so the canonical board cannot be left half-updated by a legality check.
#[derive(Clone, Debug)]
pub struct GridSnapshot {
    grid: Grid,
}

impl GridSnapshot {
    pub fn of(grid: &Grid) -> Self { GridSnapshot { grid: grid.clone() } }

    // Moves whatever stands on `from` to `to`, replacing the destination.
    pub fn with_relocation(mut self, from: Coord, to: Coord) -> Self {
        let piece = self.grid[from].take();
        self.grid[to] = piece;
        self
    }
}

impl ops::Deref for GridSnapshot {
    type Target = Grid;
    fn deref(&self) -> &Grid { &self.grid }
}

impl ops::Index<Coord> for Grid {
    type Output = Option<PieceOnBoard>;
    #[track_caller]
    fn index(&self, pos: Coord) -> &Self::Output {
        let shape = self.shape();
        coord_to_index(pos)
            .and_then(|idx| self.data.get(idx))
            .unwrap_or_else(|| panic!("{}", out_of_bound_message(pos, shape)))
    }
}

impl ops::IndexMut<Coord> for Grid {
    #[track_caller]
    fn index_mut(&mut self, pos: Coord) -> &mut Self::Output {
        let shape = self.shape();
        coord_to_index(pos)
            .and_then(|idx| self.data.get_mut(idx))
            .unwrap_or_else(|| panic!("{}", out_of_bound_message(pos, shape)))
    }
}

fn coord_to_index(pos: Coord) -> Option<[usize; 2]> {
    let row = usize::try_from(pos.row.to_zero_based()).ok()?;
    let col = usize::try_from(pos.col.to_zero_based()).ok()?;
    Some([row, col])
}

fn out_of_bound_message(pos: Coord, board_shape: BoardShape) -> String {
    format!(
        "Coord ({}, {}) is out of bound for {}x{} board",
        pos.row.to_zero_based(),
        pos.col.to_zero_based(),
        board_shape.num_rows,
        board_shape.num_cols
    )
}

fn debug_format_piece(piece: &PieceOnBoard) -> String {
    let mut s = format!("{:?}-{:?}", piece.force, piece.kind);
    if piece.origin != PieceOrigin::Innate {
        s.push_str(&format!("-{:?}", piece.origin));
    }
    if piece.moved {
        s.push_str("-moved");
    }
    s
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid ")?;
        f.debug_map()
            .entries(self.pieces().map(|(pos, piece)| (pos.to_algebraic(), debug_format_piece(&piece))))
            .finish()
    }
}
