use std::io::{BufRead, Write};

use anyhow::Context;
use chess_variants::persistence::save_game;
use chess_variants::{BoardShape, ChessGame, ChessGameStatus, Coord, VictoryReason};
use itertools::Itertools;
use log::warn;

use crate::tui::{force_name, render_grid};


#[derive(Clone, PartialEq, Eq, Debug)]
enum UserCommand {
    Move(Coord, Coord),
    Save(String),
    ToggleBoard,
    Forfeit,
    Quit,
}

fn parse_square(s: &str, board_shape: BoardShape) -> Result<Coord, String> {
    let pos = Coord::from_algebraic(s).ok_or_else(|| format!("Not a square: {s}"))?;
    if !board_shape.contains_coord(pos) {
        return Err(format!("Square {s} is not on the board."));
    }
    Ok(pos)
}

// Keywords and squares are case-insensitive; file names are kept as typed.
fn parse_command(line: &str, board_shape: BoardShape) -> Result<UserCommand, String> {
    let words = line.split_whitespace().collect_vec();
    let lowercase = words.iter().map(|word| word.to_ascii_lowercase()).collect_vec();
    let keywords = lowercase.iter().map(String::as_str).collect_vec();
    match (keywords.as_slice(), words.as_slice()) {
        (["q"], _) => Ok(UserCommand::Quit),
        (["board"], _) => Ok(UserCommand::ToggleBoard),
        (["forfeit"], _) => Ok(UserCommand::Forfeit),
        (["save", _], [_, file]) => Ok(UserCommand::Save((*file).to_owned())),
        ([from, to], _) => Ok(UserCommand::Move(
            parse_square(from, board_shape)?,
            parse_square(to, board_shape)?,
        )),
        _ => Err(format!("Unknown command: {}", line.trim())),
    }
}

fn game_over_message(status: ChessGameStatus) -> String {
    match status {
        ChessGameStatus::Active => "The game goes on.".to_owned(),
        ChessGameStatus::Victory(winner, VictoryReason::Resignation) => {
            format!("{} forfeits. {} wins!", force_name(winner.opponent()), force_name(winner))
        }
        ChessGameStatus::Victory(winner, _) => format!("{} wins!", force_name(winner)),
        ChessGameStatus::Draw(_) => "It's a draw.".to_owned(),
    }
}

// Reads commands until the game ends, the player quits or the input runs out. Returns the game
// in the state it was left.
pub fn run(mut game: ChessGame, input: impl BufRead, mut output: impl Write)
    -> anyhow::Result<ChessGame>
{
    let board_shape = game.rules().board_shape;
    let mut show_board = true;
    writeln!(output, "{}", render_grid(game.board_snapshot()))?;
    let mut lines = input.lines();
    while game.is_active() {
        write!(
            output,
            "{} turn {}> ",
            force_name(game.current_player()),
            game.turn_number()
        )?;
        output.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("cannot read command")?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line, board_shape) {
            Err(err) => writeln!(output, "{err}")?,
            Ok(UserCommand::Quit) => break,
            Ok(UserCommand::ToggleBoard) => {
                show_board = !show_board;
                if show_board {
                    writeln!(output, "{}", render_grid(game.board_snapshot()))?;
                }
            }
            Ok(UserCommand::Forfeit) => {
                game.resign(game.current_player())?;
            }
            Ok(UserCommand::Save(file)) => match std::fs::write(&file, save_game(&game)) {
                Ok(()) => writeln!(output, "Game saved to {file}.")?,
                Err(err) => {
                    warn!("Cannot save game to {file}: {err}");
                    writeln!(output, "Cannot save game to {file}.")?;
                }
            },
            Ok(UserCommand::Move(from, to)) => match game.apply_move(from, to) {
                Err(err) => writeln!(output, "{err}")?,
                Ok(outcome) => {
                    if show_board {
                        writeln!(output, "{}", render_grid(game.board_snapshot()))?;
                    }
                    if let Some(piece) = game.last_ghost_capture() {
                        writeln!(output, "The ghost took a {:?} {:?}!", piece.force, piece.kind)?;
                    }
                    writeln!(output, "{outcome}")?;
                }
            },
        }
    }
    if !game.is_active() {
        writeln!(output, "{}", game_over_message(game.status()))?;
    }
    Ok(game)
}
