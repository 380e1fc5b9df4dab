// Save-file text format:
//
//   <variant tag>
//   <completed half-moves>
//   <ghost draws>                 (Spooky chess only)
//   <owner> <square> <kind>       (one line per piece, rank-major)
//
// Owners and kinds are numeric codes, squares are algebraic.

use itertools::Itertools;
use log::warn;

use crate::coord::Coord;
use crate::force::PieceForce;
use crate::game::{ChessGame, GameSnapshot, PieceRecord};
use crate::piece::PieceKind;
use crate::variant::Variant;


pub fn snapshot_to_text(snapshot: &GameSnapshot) -> String {
    let mut lines = vec![snapshot.variant.tag().to_owned(), snapshot.turn.saturating_sub(1).to_string()];
    if let Some(draws) = snapshot.ghost_draws {
        lines.push(draws.to_string());
    }
    for record in &snapshot.pieces {
        lines.push(format!("{} {} {}", record.force.code(), record.pos, record.kind.code()));
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn parse_number<T: std::str::FromStr>(token: Option<&str>, what: &str) -> Result<T, String> {
    let token = token.ok_or_else(|| format!("missing {what}"))?;
    token.parse().map_err(|_| format!("invalid {what}: {token}"))
}

fn piece_record_from_tokens(owner: &str, square: &str, kind: &str) -> Result<PieceRecord, String> {
    let force = owner
        .parse()
        .ok()
        .and_then(PieceForce::from_code)
        .ok_or_else(|| format!("invalid owner: {owner}"))?;
    let pos = Coord::from_algebraic(square).ok_or_else(|| format!("invalid square: {square}"))?;
    let kind = kind
        .parse()
        .ok()
        .and_then(PieceKind::from_code)
        .ok_or_else(|| format!("invalid piece kind: {kind}"))?;
    Ok(PieceRecord { force, pos, kind })
}

pub fn snapshot_from_text(text: &str) -> Result<GameSnapshot, String> {
    let mut tokens = text.split_whitespace();
    let tag = tokens.next().ok_or_else(|| "empty save file".to_owned())?;
    let variant = Variant::from_tag(tag).ok_or_else(|| format!("unknown game type: {tag}"))?;
    let completed_turns: u32 = parse_number(tokens.next(), "turn number")?;
    let ghost_draws = match variant {
        Variant::Spooky => Some(parse_number(tokens.next(), "ghost draw count")?),
        Variant::Classic | Variant::KingOfTheHill => None,
    };
    let tokens = tokens.collect_vec();
    if tokens.len() % 3 != 0 {
        return Err(format!("truncated piece record: {}", tokens[tokens.len() / 3 * 3..].join(" ")));
    }
    let pieces = tokens
        .chunks(3)
        .map(|record| piece_record_from_tokens(record[0], record[1], record[2]))
        .collect::<Result<Vec<_>, _>>()?;
    let turn = completed_turns
        .checked_add(1)
        .ok_or_else(|| format!("invalid turn number: {completed_turns}"))?;
    Ok(GameSnapshot { variant, turn, ghost_draws, pieces })
}

pub fn save_game(game: &ChessGame) -> String { snapshot_to_text(&game.snapshot()) }

pub fn load_game(text: &str) -> Result<ChessGame, String> {
    snapshot_from_text(text).and_then(|snapshot| ChessGame::from_snapshot(&snapshot)).inspect_err(
        |err| {
            warn!("Rejected saved game: {err}");
        },
    )
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ChessRules;
    use crate::variant::MAX_GHOST_DRAWS;

    #[test]
    fn new_game_layout() {
        let text = save_game(&ChessGame::new(ChessRules::classic()));
        let lines = text.lines().collect_vec();
        assert_eq!(lines.len(), 2 + 32);
        assert_eq!(lines[0], "chess");
        assert_eq!(lines[1], "0");
        assert_eq!(lines[2], "0 a1 1");
        assert_eq!(lines[6], "0 e1 5");
        assert_eq!(lines[10], "0 a2 0");
        assert_eq!(lines[33], "1 h8 1");
    }

    #[test]
    fn spooky_header() {
        let text = save_game(&ChessGame::new(ChessRules::spooky()));
        let lines = text.lines().collect_vec();
        assert_eq!(lines[0], "spooky");
        assert_eq!(lines[1], "0");
        assert_eq!(lines[2], "0");
        assert!(lines.contains(&"2 a5 6"));
    }

    #[test]
    fn load_restores_turn_and_pieces() {
        let text = "king\n4\n0 e1 5\n0 d4 4\n1 e8 5\n";
        let game = load_game(text).unwrap();
        assert_eq!(game.turn_number(), 5);
        assert_eq!(game.rules().variant, Variant::KingOfTheHill);
        assert_eq!(game.board_snapshot().pieces().count(), 3);
        assert_eq!(game.board_snapshot()[Coord::D4].unwrap().kind, PieceKind::Queen);
        assert!(!game.board_snapshot()[Coord::E1].unwrap().moved);
        assert_eq!(save_game(&game), text);
    }

    #[test]
    fn load_errors() {
        let cases = [
            "",
            "checkers\n0\n",
            "chess\n",
            "chess\n-1\n0 e1 5\n",
            "chess\n0\n0 e1\n",
            "chess\n0\n3 e1 5\n",
            "chess\n0\n0 e9 5\n",
            "chess\n0\n0 e1 7\n",
            "chess\n0\n0 e1 5\n1 e1 5\n",
            "chess\n0\n2 a5 6\n",
            "spooky\n0\n",
            "spooky\n0\n5\n0 e1 5\n1 e8 5\n",
            "spooky\n0\n5\n0 e1 5\n1 e8 5\n2 a5 6\n2 b5 6\n",
            "spooky\n0\n1000001\n0 e1 5\n1 e8 5\n2 a5 6\n",
            "spooky\n0\n18446744073709551615\n0 e1 5\n1 e8 5\n2 a5 6\n",
        ];
        for text in cases {
            assert!(load_game(text).is_err(), "{text:?}");
        }
    }

    #[test]
    fn ghost_draw_count_limit() {
        let text = format!("spooky\n2\n{MAX_GHOST_DRAWS}\n0 e1 5\n2 a5 6\n1 e8 5\n");
        let game = load_game(&text).unwrap();
        assert_eq!(game.ghost().unwrap().draws(), MAX_GHOST_DRAWS);
        assert_eq!(game.turn_number(), 3);
    }
}
