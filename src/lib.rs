#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod board;
pub mod coord;
pub mod error;
pub mod force;
pub mod game;
pub mod grid;
pub mod movement;
pub mod persistence;
pub mod piece;
pub mod rules;
pub mod starter;
pub mod util;
pub mod variant;

pub use board::{Board, PlacementError, TurnError};
pub use coord::{BoardShape, Coord};
pub use force::{Force, PieceForce};
pub use game::{ChessGame, ChessGameStatus, DrawReason, GameSnapshot, MoveOutcome, PieceRecord, VictoryReason};
pub use grid::Grid;
pub use piece::{PieceKind, PieceOnBoard};
pub use rules::ChessRules;
pub use variant::Variant;
