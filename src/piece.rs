use derive_new::new;
use enum_map::{Enum, EnumMap};
use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::force::PieceForce;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Enum, EnumIter, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
    Ghost,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum PieceOrigin {
    Innate,
    Promoted,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, new, Serialize, Deserialize)]
pub struct PieceOnBoard {
    pub kind: PieceKind,
    pub origin: PieceOrigin,
    pub force: PieceForce,
    // Used by castling. Pieces start unmoved, including freshly promoted ones.
    #[new(default)]
    pub moved: bool,
}

impl PieceKind {
    // Piece code used in save files.
    pub fn code(self) -> u8 {
        use PieceKind::*;
        match self {
            Pawn => 0,
            Rook => 1,
            Knight => 2,
            Bishop => 3,
            Queen => 4,
            King => 5,
            Ghost => 6,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        use PieceKind::*;
        match code {
            0 => Some(Pawn),
            1 => Some(Rook),
            2 => Some(Knight),
            3 => Some(Bishop),
            4 => Some(Queen),
            5 => Some(King),
            6 => Some(Ghost),
            _ => None,
        }
    }

    pub fn to_full_algebraic(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
            PieceKind::Ghost => 'G',
        }
    }

    pub fn from_algebraic_char(notation: char) -> Option<Self> {
        match notation {
            'P' => Some(PieceKind::Pawn),
            'R' => Some(PieceKind::Rook),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            'G' => Some(PieceKind::Ghost),
            _ => None,
        }
    }
}

impl PieceForce {
    pub fn code(self) -> u8 {
        match self {
            PieceForce::White => 0,
            PieceForce::Black => 1,
            PieceForce::Neutral => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(PieceForce::White),
            1 => Some(PieceForce::Black),
            2 => Some(PieceForce::Neutral),
            _ => None,
        }
    }
}

// Upper case for White, lower case for Black, like FEN. The ghost is always 'G'.
pub fn piece_to_ascii(kind: PieceKind, force: PieceForce) -> char {
    let ch = kind.to_full_algebraic();
    match force {
        PieceForce::White | PieceForce::Neutral => ch,
        PieceForce::Black => ch.to_ascii_lowercase(),
    }
}

pub fn piece_from_ascii(ch: char) -> Option<(PieceKind, PieceForce)> {
    let kind = PieceKind::from_algebraic_char(ch.to_ascii_uppercase())?;
    let force = match (kind, ch.is_ascii_uppercase()) {
        (PieceKind::Ghost, true) => PieceForce::Neutral,
        (PieceKind::Ghost, false) => return None,
        (_, true) => PieceForce::White,
        (_, false) => PieceForce::Black,
    };
    Some((kind, force))
}


pub type PieceConstructor = fn(PieceForce) -> PieceOnBoard;

fn innate(kind: PieceKind, force: PieceForce) -> PieceOnBoard {
    PieceOnBoard::new(kind, PieceOrigin::Innate, force)
}

fn new_pawn(force: PieceForce) -> PieceOnBoard { innate(PieceKind::Pawn, force) }
fn new_rook(force: PieceForce) -> PieceOnBoard { innate(PieceKind::Rook, force) }
fn new_knight(force: PieceForce) -> PieceOnBoard { innate(PieceKind::Knight, force) }
fn new_bishop(force: PieceForce) -> PieceOnBoard { innate(PieceKind::Bishop, force) }
fn new_queen(force: PieceForce) -> PieceOnBoard { innate(PieceKind::Queen, force) }
fn new_king(force: PieceForce) -> PieceOnBoard { innate(PieceKind::King, force) }
// The ghost belongs to nobody, whatever owner is asked for.
fn new_ghost(_: PieceForce) -> PieceOnBoard { innate(PieceKind::Ghost, PieceForce::Neutral) }

// Registry of the piece kinds a game may create. Pieces are only ever made through it.
#[derive(Clone, Debug)]
pub struct PieceCatalog {
    constructors: EnumMap<PieceKind, Option<PieceConstructor>>,
}

impl PieceCatalog {
    pub fn empty() -> Self { PieceCatalog { constructors: EnumMap::default() } }

    pub fn standard() -> Self {
        let mut catalog = Self::empty();
        catalog.register(PieceKind::Pawn, new_pawn);
        catalog.register(PieceKind::Rook, new_rook);
        catalog.register(PieceKind::Knight, new_knight);
        catalog.register(PieceKind::Bishop, new_bishop);
        catalog.register(PieceKind::Queen, new_queen);
        catalog.register(PieceKind::King, new_king);
        catalog
    }

    pub fn with_ghost() -> Self {
        let mut catalog = Self::standard();
        catalog.register(PieceKind::Ghost, new_ghost);
        catalog
    }

    // Returns false if the kind already has a constructor; the existing one is kept.
    pub fn register(&mut self, kind: PieceKind, constructor: PieceConstructor) -> bool {
        let slot = &mut self.constructors[kind];
        if slot.is_some() {
            return false;
        }
        *slot = Some(constructor);
        true
    }

    pub fn is_registered(&self, kind: PieceKind) -> bool { self.constructors[kind].is_some() }

    pub fn make(&self, kind: PieceKind, force: PieceForce) -> Option<PieceOnBoard> {
        self.constructors[kind].map(|constructor| constructor(force))
    }
}
