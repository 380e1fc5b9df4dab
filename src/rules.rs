use serde::{Deserialize, Serialize};

use crate::coord::BoardShape;
use crate::variant::Variant;


#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ChessRules {
    pub variant: Variant,
    pub board_shape: BoardShape,
}

impl ChessRules {
    pub fn new(variant: Variant) -> Self { Self { variant, board_shape: BoardShape::standard() } }

    pub fn classic() -> Self { Self::new(Variant::Classic) }
    pub fn king_of_the_hill() -> Self { Self::new(Variant::KingOfTheHill) }
    pub fn spooky() -> Self { Self::new(Variant::Spooky) }
}
