//! Shell utility for inspecting and managing the persisted game save.

use anyhow::{bail, Context};
use lexopt::prelude::*;
use snakevote::{render, SaveFile, Session};
use std::path::PathBuf;
use std::process::ExitCode;

static USAGE: &str = "Usage: snakevote [--save-file PATH] <render|info|reset>

Commands:
  render    Print the saved game board
  info      Print the saved game's score and schedule
  reset     Delete the saved game
";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("snakevote: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> anyhow::Result<()> {
    let mut parser = lexopt::Parser::from_env();
    let mut save_file: Option<PathBuf> = None;
    let mut command: Option<String> = None;
    while let Some(arg) = parser.next()? {
        match arg {
            Long("save-file") => save_file = Some(parser.value()?.into()),
            Short('h') | Long("help") => {
                print!("{USAGE}");
                return Ok(());
            }
            Value(v) if command.is_none() => command = Some(v.string()?),
            _ => return Err(arg.unexpected().into()),
        }
    }
    let store = match save_file {
        Some(path) => SaveFile::new(path),
        None => SaveFile::new(
            SaveFile::default_path().context("could not determine the default save file path")?,
        ),
    };
    match command.as_deref() {
        Some("render") => {
            let session = load_session(&store)?;
            print!(
                "{}",
                render::render(&session.grid, session.facial_expression)
            );
        }
        Some("info") => {
            let session = load_session(&store)?;
            println!("channel:     {}", session.channel_id);
            println!("score:       {}", session.score);
            println!("best score:  {}", session.best_score);
            println!("facing:      {}", session.facing);
            println!("next update: {}", session.next_update_time);
        }
        Some("reset") => {
            store.delete()?;
            println!("save file removed");
        }
        Some(other) => bail!("unknown command {other:?}\n{USAGE}"),
        None => bail!("no command given\n{USAGE}"),
    }
    Ok(())
}

fn load_session(store: &SaveFile) -> anyhow::Result<Session> {
    store
        .load()?
        .with_context(|| format!("no saved game at {}", store.path().display()))
}
