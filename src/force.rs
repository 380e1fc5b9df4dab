use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum::EnumIter;


// A side that takes turns.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Enum, EnumIter, Serialize, Deserialize,
)]
pub enum Force {
    White,
    Black,
}

// Owner of a piece. Unlike `Force`, includes pieces that belong to nobody (the ghost).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Enum, EnumIter, Serialize, Deserialize)]
pub enum PieceForce {
    White,
    Black,
    Neutral,
}

impl Force {
    pub fn opponent(self) -> Force {
        match self {
            Force::White => Force::Black,
            Force::Black => Force::White,
        }
    }

    // Turn numbers start at 1; White moves on odd turns.
    pub fn for_turn(turn: u32) -> Force {
        if turn % 2 == 1 { Force::White } else { Force::Black }
    }
}

impl PieceForce {
    pub fn is_owned_by(self, force: Force) -> bool { self == force.into() }

    pub fn is_opponent_of(self, force: Force) -> bool { self == force.opponent().into() }
}

impl From<Force> for PieceForce {
    fn from(force: Force) -> Self {
        match force {
            Force::White => PieceForce::White,
            Force::Black => PieceForce::Black,
        }
    }
}

impl TryFrom<PieceForce> for Force {
    type Error = ();
    fn try_from(force: PieceForce) -> Result<Self, Self::Error> {
        match force {
            PieceForce::White => Ok(Force::White),
            PieceForce::Black => Ok(Force::Black),
            PieceForce::Neutral => Err(()),
        }
    }
}
