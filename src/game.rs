use std::fmt;

use itertools::Itertools;
use log::info;
use serde::{Deserialize, Serialize};

use crate::board::{Board, TurnError};
use crate::coord::Coord;
use crate::force::{Force, PieceForce};
use crate::grid::Grid;
use crate::piece::{PieceKind, PieceOnBoard};
use crate::rules::ChessRules;
use crate::starter::generate_starting_board;
use crate::variant::{Ghost, MAX_GHOST_DRAWS, Variant, ghost_start, king_on_hill};


#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum MoveOutcome {
    Success,
    Capture,
    Check,
    Checkmate,
    Stalemate,
    HillCaptured,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum VictoryReason {
    Checkmate,
    HillCaptured,
    Resignation,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum DrawReason {
    Stalemate,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ChessGameStatus {
    Active,
    Victory(Force, VictoryReason),
    Draw(DrawReason),
}

impl fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            MoveOutcome::Success => "Move made.",
            MoveOutcome::Capture => "Piece captured.",
            MoveOutcome::Check => "Check!",
            MoveOutcome::Checkmate => "Checkmate!",
            MoveOutcome::Stalemate => "Stalemate.",
            MoveOutcome::HillCaptured => "The hill is captured!",
        };
        write!(f, "{message}")
    }
}

// One occupied square, as it appears in a save file.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PieceRecord {
    pub force: PieceForce,
    pub pos: Coord,
    pub kind: PieceKind,
}

// Everything needed to resume a game. Moved-flags are not part of it.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub variant: Variant,
    pub turn: u32,
    // Spooky only.
    pub ghost_draws: Option<u64>,
    // Rank-major order.
    pub pieces: Vec<PieceRecord>,
}

// How a move ended, before it is folded into the game state.
#[derive(Clone, Copy, Debug)]
enum Resolution {
    Continue(MoveOutcome),
    Checkmate(Force),
    HillCaptured(Force),
    Stalemate,
}


#[derive(Clone, Debug)]
pub struct ChessGame {
    rules: ChessRules,
    board: Board,
    turn: u32,
    status: ChessGameStatus,
    ghost: Option<Ghost>,
    last_ghost_capture: Option<PieceOnBoard>,
}

impl ChessGame {
    pub fn new(rules: ChessRules) -> Self {
        let board = generate_starting_board(&rules);
        let ghost = match rules.variant {
            Variant::Spooky => Some(Ghost::new(ghost_start(rules.board_shape))),
            Variant::Classic | Variant::KingOfTheHill => None,
        };
        Self::from_parts(rules, board, 1, ghost)
    }

    fn from_parts(rules: ChessRules, board: Board, turn: u32, ghost: Option<Ghost>) -> Self {
        ChessGame {
            rules,
            board,
            turn,
            status: ChessGameStatus::Active,
            ghost,
            last_ghost_capture: None,
        }
    }

    pub fn rules(&self) -> &ChessRules { &self.rules }
    pub fn board(&self) -> &Board { &self.board }
    pub fn board_snapshot(&self) -> &Grid { self.board.grid() }
    pub fn turn_number(&self) -> u32 { self.turn }
    pub fn current_player(&self) -> Force { Force::for_turn(self.turn) }
    pub fn status(&self) -> ChessGameStatus { self.status }
    pub fn is_active(&self) -> bool { self.status == ChessGameStatus::Active }
    pub fn ghost(&self) -> Option<&Ghost> { self.ghost.as_ref() }
    // What the ghost destroyed while resolving the last move.
    pub fn last_ghost_capture(&self) -> Option<PieceOnBoard> { self.last_ghost_capture }
    pub fn is_check(&self, force: Force) -> bool { self.board.is_check(force) }

    // Tells whether the current player could make the move, without making it.
    pub fn can_make_move(&self, from: Coord, to: Coord) -> Result<(), TurnError> {
        if !self.is_active() {
            return Err(TurnError::GameOver);
        }
        self.board.verdict(from, to, self.current_player())
    }

    // Makes a move for the current player. On error nothing changes.
    pub fn apply_move(&mut self, from: Coord, to: Coord) -> Result<MoveOutcome, TurnError> {
        self.can_make_move(from, to)?;
        let force = self.current_player();
        self.last_ghost_capture = None;
        let captured = self.board.apply_move(from, to);
        let move_result = if captured.is_some() { MoveOutcome::Capture } else { MoveOutcome::Success };
        let resolution = match self.rules.variant {
            Variant::Classic => self.classic_resolution(force, move_result),
            Variant::KingOfTheHill => self.king_of_the_hill_resolution(force, move_result),
            Variant::Spooky => self.spooky_resolution(force, move_result),
        };
        Ok(self.conclude(resolution))
    }

    pub fn resign(&mut self, force: Force) -> Result<(), TurnError> {
        if !self.is_active() {
            return Err(TurnError::GameOver);
        }
        self.set_status(ChessGameStatus::Victory(force.opponent(), VictoryReason::Resignation));
        Ok(())
    }

    fn set_status(&mut self, status: ChessGameStatus) {
        info!("Game over on turn {}: {:?}", self.turn, status);
        self.status = status;
    }

    fn conclude(&mut self, resolution: Resolution) -> MoveOutcome {
        match resolution {
            Resolution::Continue(outcome) => {
                self.turn += 1;
                outcome
            }
            Resolution::Checkmate(winner) => {
                self.set_status(ChessGameStatus::Victory(winner, VictoryReason::Checkmate));
                MoveOutcome::Checkmate
            }
            Resolution::HillCaptured(winner) => {
                self.set_status(ChessGameStatus::Victory(winner, VictoryReason::HillCaptured));
                MoveOutcome::HillCaptured
            }
            Resolution::Stalemate => {
                self.set_status(ChessGameStatus::Draw(DrawReason::Stalemate));
                MoveOutcome::Stalemate
            }
        }
    }

    fn classic_resolution(&self, force: Force, move_result: MoveOutcome) -> Resolution {
        let opponent = force.opponent();
        match (self.board.is_check(opponent), self.board.has_legal_move(opponent)) {
            (true, false) => Resolution::Checkmate(force),
            (true, true) => Resolution::Continue(MoveOutcome::Check),
            (false, false) => Resolution::Stalemate,
            (false, true) => Resolution::Continue(move_result),
        }
    }

    // Checkmate beats the hill; the hill beats everything else.
    fn king_of_the_hill_resolution(&self, force: Force, move_result: MoveOutcome) -> Resolution {
        let opponent = force.opponent();
        let in_check = self.board.is_check(opponent);
        let can_move = self.board.has_legal_move(opponent);
        if in_check && !can_move {
            Resolution::Checkmate(force)
        } else if king_on_hill(self.board.grid(), force) {
            Resolution::HillCaptured(force)
        } else if !can_move {
            Resolution::Stalemate
        } else if in_check {
            Resolution::Continue(MoveOutcome::Check)
        } else {
            Resolution::Continue(move_result)
        }
    }

    // The move is judged first; if the game goes on, the ghost moves and both sides are
    // judged again, since the ghost can open or close lines for either of them.
    fn spooky_resolution(&mut self, force: Force, move_result: MoveOutcome) -> Resolution {
        let opponent = force.opponent();
        if !self.board.has_legal_move(opponent) {
            return if self.board.is_check(opponent) {
                Resolution::Checkmate(force)
            } else {
                Resolution::Stalemate
            };
        }

        if let Some(ghost) = &mut self.ghost {
            self.last_ghost_capture = ghost.relocate(self.board.grid_mut());
        }

        let opponent_in_check = self.board.is_check(opponent);
        let opponent_can_move = self.board.has_legal_move(opponent);
        let mover_in_check = self.board.is_check(force);
        let mover_can_move = self.board.has_legal_move(force);
        if opponent_in_check && !opponent_can_move {
            Resolution::Checkmate(force)
        } else if mover_in_check && !mover_can_move {
            Resolution::Checkmate(opponent)
        } else if !opponent_can_move || !mover_can_move {
            Resolution::Stalemate
        } else if opponent_in_check {
            Resolution::Continue(MoveOutcome::Check)
        } else if mover_in_check {
            // The opponent moves next and takes the king.
            Resolution::Checkmate(opponent)
        } else {
            Resolution::Continue(move_result)
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            variant: self.rules.variant,
            turn: self.turn,
            ghost_draws: self.ghost.as_ref().map(Ghost::draws),
            pieces: self
                .board
                .grid()
                .pieces()
                .map(|(pos, piece)| PieceRecord { force: piece.force, pos, kind: piece.kind })
                .collect(),
        }
    }

    // Rebuilds a game, placing every piece through the variant's catalog. The status is not
    // part of a snapshot: a restored game is always active.
    pub fn from_snapshot(snapshot: &GameSnapshot) -> Result<Self, String> {
        let rules = ChessRules::new(snapshot.variant);
        if snapshot.turn < 1 {
            return Err(format!("Invalid turn number: {}", snapshot.turn));
        }
        let mut board = Board::new(rules.board_shape, rules.variant.catalog());
        for record in &snapshot.pieces {
            board.init_piece(record.kind, record.force, record.pos).map_err(|err| {
                format!("Cannot place {:?} {:?} on {}: {}", record.force, record.kind, record.pos, err)
            })?;
        }
        let ghost = match (rules.variant, snapshot.ghost_draws) {
            (Variant::Spooky, Some(draws)) => {
                if draws > MAX_GHOST_DRAWS {
                    return Err(format!("Ghost draw count out of range: {draws}"));
                }
                let ghost_squares = board
                    .grid()
                    .pieces()
                    .filter(|(_, piece)| piece.kind == PieceKind::Ghost)
                    .map(|(pos, _)| pos)
                    .collect_vec();
                let &[pos] = ghost_squares.as_slice() else {
                    return Err(format!("Expected one ghost, found {}", ghost_squares.len()));
                };
                Some(Ghost::restore(pos, draws, rules.board_shape))
            }
            (Variant::Spooky, None) => return Err("Missing ghost draw count".to_owned()),
            (Variant::Classic | Variant::KingOfTheHill, None) => None,
            (Variant::Classic | Variant::KingOfTheHill, Some(_)) => {
                return Err(format!("Unexpected ghost draw count for {}", rules.variant.name()));
            }
        };
        Ok(Self::from_parts(rules, board, snapshot.turn, ghost))
    }
}
