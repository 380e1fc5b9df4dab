#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod play;
mod tui;

use std::io;

use anyhow::Context;
use chess_variants::persistence::load_game;
use chess_variants::{ChessGame, ChessRules, Variant};
use clap::{Command, arg};
use log::info;


fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let matches = Command::new("Chess variants")
        .version(clap::crate_version!())
        .about("Classic, King of the Hill and Spooky chess for two players at one terminal")
        .subcommand_required(true)
        .subcommand(
            Command::new("new").about("Start a new game").arg(
                arg!(<variant> "Game to play").value_parser(["chess", "king", "spooky"]),
            ),
        )
        .subcommand(
            Command::new("load")
                .about("Resume a saved game")
                .arg(arg!(<file> "Path to a file written by the `save` command")),
        )
        .get_matches();

    let game = match matches.subcommand() {
        Some(("new", sub_matches)) => {
            let tag = sub_matches.get_one::<String>("variant").context("missing variant")?;
            let variant = Variant::from_tag(tag).with_context(|| format!("unknown variant {tag}"))?;
            ChessGame::new(ChessRules::new(variant))
        }
        Some(("load", sub_matches)) => {
            let file = sub_matches.get_one::<String>("file").context("missing file")?;
            let text = std::fs::read_to_string(file)
                .with_context(|| format!("cannot read saved game from {file}"))?;
            load_game(&text)
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("cannot load saved game from {file}"))?
        }
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    };
    info!("Starting {} on turn {}", game.rules().variant.name(), game.turn_number());

    play::run(game, io::stdin().lock(), io::stdout())?;
    Ok(())
}
