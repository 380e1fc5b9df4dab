use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use crate::coord::{BoardShape, Col, Coord, Row};
use crate::force::Force;
use crate::grid::Grid;
use crate::internal_error_message;
use crate::piece::{PieceCatalog, PieceKind, PieceOnBoard};


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, Serialize, Deserialize)]
pub enum Variant {
    Classic,
    KingOfTheHill,
    Spooky,
}

impl Variant {
    // Tag on the first line of a save file.
    pub fn tag(self) -> &'static str {
        match self {
            Variant::Classic => "chess",
            Variant::KingOfTheHill => "king",
            Variant::Spooky => "spooky",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> { Variant::iter().find(|v| v.tag() == tag) }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Classic => "Chess",
            Variant::KingOfTheHill => "King of the Hill",
            Variant::Spooky => "Spooky Chess",
        }
    }

    pub fn catalog(self) -> PieceCatalog {
        match self {
            Variant::Classic | Variant::KingOfTheHill => PieceCatalog::standard(),
            Variant::Spooky => PieceCatalog::with_ghost(),
        }
    }
}


// The hill is the 2x2 centre of the board: d4, e4, d5 and e5 on a standard board.
pub fn is_hill(board_shape: BoardShape, pos: Coord) -> bool {
    let rows = [board_shape.num_rows as i8 / 2 - 1, board_shape.num_rows as i8 / 2];
    let cols = [board_shape.num_cols as i8 / 2 - 1, board_shape.num_cols as i8 / 2];
    rows.contains(&pos.row.to_zero_based()) && cols.contains(&pos.col.to_zero_based())
}

pub fn king_on_hill(grid: &Grid, force: Force) -> bool {
    grid.find_king(force).is_some_and(|pos| is_hill(grid.shape(), pos))
}


pub const GHOST_SEED: u64 = 322;
// Restoring replays every draw, so saved counts above this are refused.
pub const MAX_GHOST_DRAWS: u64 = 1_000_000;

// Where a new Spooky game puts the ghost: a5 on a standard board.
pub fn ghost_start(board_shape: BoardShape) -> Coord {
    Coord::new(Row::from_zero_based(board_shape.num_rows as i8 / 2), Col::from_zero_based(0))
}

// The neutral piece of Spooky chess and the random stream that drives it.
//
// The generator is always seeded with `GHOST_SEED`. `draws` counts every value taken from it,
// including redraws that hit a king, so that a restored game can skip exactly as many values
// and continue the same stream.
#[derive(Clone, Debug)]
pub struct Ghost {
    pos: Coord,
    draws: u64,
    rng: StdRng,
}

impl Ghost {
    pub fn new(pos: Coord) -> Self {
        Ghost { pos, draws: 0, rng: StdRng::seed_from_u64(GHOST_SEED) }
    }

    pub fn restore(pos: Coord, draws: u64, board_shape: BoardShape) -> Self {
        let mut rng = StdRng::seed_from_u64(GHOST_SEED);
        for _ in 0..draws {
            draw_square(&mut rng, board_shape);
        }
        Ghost { pos, draws, rng }
    }

    pub fn pos(&self) -> Coord { self.pos }
    pub fn draws(&self) -> u64 { self.draws }

    // Where the next `relocate` would send the ghost on this grid. Does not consume anything.
    pub fn next_destination(&self, grid: &Grid) -> Coord {
        let mut rng = self.rng.clone();
        loop {
            let pos = draw_square(&mut rng, grid.shape());
            if !holds_king(grid, pos) {
                return pos;
            }
        }
    }

    // Moves the ghost to a random square that does not hold a king and returns whatever it
    // landed on. Drawing the square the ghost already occupies leaves everything in place.
    pub fn relocate(&mut self, grid: &mut Grid) -> Option<PieceOnBoard> {
        let destination = loop {
            let pos = draw_square(&mut self.rng, grid.shape());
            self.draws += 1;
            if !holds_king(grid, pos) {
                break pos;
            }
        };
        if destination == self.pos {
            debug!("Ghost stays on {}", self.pos);
            return None;
        }
        let Some(ghost) = grid[self.pos].take() else {
            panic!("{}", internal_error_message!("ghost missing from {}", self.pos));
        };
        let captured = grid[destination].replace(ghost);
        debug!("Ghost {} -> {}, captured {:?}", self.pos, destination, captured.map(|p| p.kind));
        self.pos = destination;
        captured
    }
}

fn draw_square(rng: &mut StdRng, board_shape: BoardShape) -> Coord {
    let index = rng.random_range(0..board_shape.num_squares());
    let Some(pos) = board_shape.coord_from_index(index) else {
        panic!("{}", internal_error_message!("square index {index} out of range"));
    };
    pos
}

fn holds_king(grid: &Grid, pos: Coord) -> bool {
    grid[pos].is_some_and(|piece| piece.kind == PieceKind::King)
}
