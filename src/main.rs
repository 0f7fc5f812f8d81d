//! Morris -- a Nine/Twelve Men's Morris rules engine driven over stdin.
//!
//! This binary reads one command per line from stdin and writes one reply
//! per command to stdout. Logs go to stderr, filtered by `RUST_LOG`.

use std::io::{self, BufRead};

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use morris::engine::Engine;
use morris::protocol::parser::{parse_command, Command};

/// Runs the protocol loop, reading commands from stdin and writing replies
/// to stdout.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        error!(error = %e, "driver stopped");
        std::process::exit(1);
    }
}

fn run() -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = line?;

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::SetOption { name, value } => engine.set_option(name, value),
            Command::NewGame => engine.handle_newgame(&mut out)?,
            Command::Setup {
                variant,
                starting_player,
                opponent,
            } => engine.handle_setup(variant, starting_player, opponent, &mut out)?,
            Command::Place { row, col } => engine.handle_place(row, col, &mut out)?,
            Command::Move { from, to } => engine.handle_move(from, to, &mut out)?,
            Command::Remove { row, col } => engine.handle_remove(row, col, &mut out)?,
            Command::Go => engine.handle_go(&mut out)?,
            Command::Legal => engine.handle_legal(&mut out)?,
            Command::State => engine.handle_state(&mut out)?,
            Command::Show => engine.handle_show(&mut out)?,
            Command::Save => engine.handle_save(&mut out)?,
            Command::Load { json } => engine.handle_load(&json, &mut out)?,
            Command::Position { mfen } => engine.handle_position(&mfen, &mut out)?,
            Command::Reset { variant, opponent } => engine.handle_reset(variant, opponent, &mut out)?,
            Command::Quit => {
                info!("quit");
                break;
            }
        }
    }
    Ok(())
}
