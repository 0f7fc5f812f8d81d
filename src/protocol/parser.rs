//! Driver command parser.
//!
//! Parses incoming protocol lines into structured `Command` variants that
//! the driver main loop can dispatch on.

use tracing::warn;

use crate::board::{PlayerId, Variant};
use crate::error::SetupError;
use crate::player::Controller;

/// A parsed driver command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Synchronization ping; the driver replies `readyok`.
    IsReady,

    /// Set a driver option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a new match from the current options.
    NewGame,

    /// Start a new match: `setup <variant> <first player> <opponent>`.
    Setup {
        variant: Variant,
        starting_player: PlayerId,
        opponent: Controller,
    },

    /// `place <row> <col>`
    Place { row: i32, col: i32 },

    /// `move <row> <col> <row> <col>`
    Move {
        from: (i32, i32),
        to: (i32, i32),
    },

    /// `remove <row> <col>`
    Remove { row: i32, col: i32 },

    /// Let the computer play its pending action.
    Go,

    /// List the legal actions of the player on move.
    Legal,

    /// Report the match state.
    State,

    /// Print the board diagram and MFEN.
    Show,

    /// Emit the match in its persisted JSON form.
    Save,

    /// Restore a match from persisted JSON (the rest of the line).
    Load { json: String },

    /// Set up a match from an MFEN string.
    Position { mfen: String },

    /// Replace the match, optionally changing variant and opponent.
    Reset {
        variant: Option<Variant>,
        opponent: Option<Controller>,
    },

    /// Terminate the driver.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    let first = *tokens.first()?;

    match first {
        "isready" => Some(Command::IsReady),
        "newgame" => Some(Command::NewGame),
        "go" => Some(Command::Go),
        "legal" => Some(Command::Legal),
        "state" => Some(Command::State),
        "show" | "d" => Some(Command::Show),
        "save" => Some(Command::Save),
        "quit" => Some(Command::Quit),

        "setoption" => parse_setoption(&tokens),
        "setup" => parse_setup(&tokens),
        "place" => parse_coords::<2>(&tokens).map(|[row, col]| Command::Place { row, col }),
        "move" => parse_coords::<4>(&tokens).map(|[fr, fc, tr, tc]| Command::Move {
            from: (fr, fc),
            to: (tr, tc),
        }),
        "remove" => parse_coords::<2>(&tokens).map(|[row, col]| Command::Remove { row, col }),
        "load" => parse_load(trimmed),
        "position" => parse_position(&tokens),
        "reset" => parse_reset(&tokens),

        other => {
            warn!(command = other, "unknown command");
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let (name_parts, value_parts) = match tokens.iter().position(|&t| t == "value") {
        Some(vi) => (&tokens[2..vi], &tokens[vi + 1..]),
        None => (&tokens[2..], &tokens[tokens.len()..]),
    };
    if name_parts.is_empty() {
        warn!("malformed setoption: empty name");
        return None;
    }
    let value = (!value_parts.is_empty()).then(|| value_parts.join(" "));
    Some(Command::SetOption {
        name: name_parts.join(" "),
        value,
    })
}

/// Parses `setup <variant> <first player> <opponent>`.
fn parse_setup(tokens: &[&str]) -> Option<Command> {
    let [_, variant, first, opponent] = tokens else {
        warn!("malformed setup: expected 'setup <variant> <first player> <opponent>'");
        return None;
    };
    setup_args(variant, first, opponent)
        .map_err(|e| warn!(error = %e, "malformed setup"))
        .ok()
}

fn setup_args(variant: &str, first: &str, opponent: &str) -> Result<Command, SetupError> {
    Ok(Command::Setup {
        variant: variant.parse()?,
        starting_player: first.parse()?,
        opponent: opponent.parse()?,
    })
}

/// Parses exactly `N` integer coordinates after the command word.
fn parse_coords<const N: usize>(tokens: &[&str]) -> Option<[i32; N]> {
    if tokens.len() != N + 1 {
        warn!(command = tokens[0], expected = N, "wrong number of coordinates");
        return None;
    }
    let mut coords = [0i32; N];
    for (slot, token) in coords.iter_mut().zip(&tokens[1..]) {
        match token.parse::<i32>() {
            Ok(v) => *slot = v,
            Err(_) => {
                warn!(command = tokens[0], value = *token, "invalid coordinate");
                return None;
            }
        }
    }
    Some(coords)
}

/// Parses `load <json>`, taking the rest of the line verbatim.
fn parse_load(line: &str) -> Option<Command> {
    let json = line.strip_prefix("load").map(str::trim).unwrap_or_default();
    if json.is_empty() {
        warn!("malformed load: expected 'load <json>'");
        return None;
    }
    Some(Command::Load {
        json: json.to_string(),
    })
}

/// Parses `position <mfen>`.
fn parse_position(tokens: &[&str]) -> Option<Command> {
    match tokens {
        [_, mfen] => Some(Command::Position {
            mfen: mfen.to_string(),
        }),
        _ => {
            warn!("malformed position: expected 'position <mfen>'");
            None
        }
    }
}

/// Parses `reset [variant] [opponent]`; either argument may be given alone.
fn parse_reset(tokens: &[&str]) -> Option<Command> {
    let mut variant = None;
    let mut opponent = None;
    for token in &tokens[1..] {
        if let Ok(v) = token.parse::<Variant>() {
            variant = Some(v);
        } else if let Ok(o) = token.parse::<Controller>() {
            opponent = Some(o);
        } else {
            warn!(value = *token, "malformed reset argument");
            return None;
        }
    }
    Some(Command::Reset { variant, opponent })
}
