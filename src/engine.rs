//! Driver state management.
//!
//! Holds the current match and the driver options between protocol
//! commands, and writes one reply per command: `readyok` for `isready`, a
//! board diagram for `show`, and a single JSON object for everything else.
//! `setoption` is silent.

use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};

use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::board::{PlayerId, Variant};
use crate::config::MatchConfig;
use crate::game::{GameManager, SavedMatch};
use crate::player::Controller;
use crate::protocol::mfen::{encode_mfen, parse_mfen};

/// Writes `value` as one line of JSON.
fn reply<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    out.flush()
}

fn reply_error<W: Write>(out: &mut W, message: impl fmt::Display) -> io::Result<()> {
    let message = message.to_string();
    warn!(%message, "command failed");
    reply(out, &json!({ "error": message }))
}

/// Holds the mutable state of the driver between commands.
pub struct Engine {
    pub game: GameManager,
    pub options: HashMap<String, String>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates a driver with a default match: 9mm, player 1 first, computer
    /// opponent.
    pub fn new() -> Self {
        Engine {
            game: GameManager::from_config(&MatchConfig::default()),
            options: HashMap::new(),
        }
    }

    /// Sets a driver option. Options take effect at the next `newgame` or
    /// `setup`.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        debug!(%name, ?value, "setoption");
        self.options.insert(name, value.unwrap_or_default());
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Starts a new match from the current options.
    pub fn handle_newgame<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        match MatchConfig::from_options(&self.options) {
            Ok(config) => {
                self.game = GameManager::from_config(&config);
                reply(out, &self.game.state())
            }
            Err(e) => reply_error(out, e),
        }
    }

    /// Starts a new match with explicit settings; the seed still comes from
    /// the options.
    pub fn handle_setup<W: Write>(
        &mut self,
        variant: Variant,
        starting_player: PlayerId,
        opponent: Controller,
        out: &mut W,
    ) -> io::Result<()> {
        let mut config = MatchConfig::new(variant, starting_player, opponent);
        config.seed = MatchConfig::from_options(&self.options)
            .ok()
            .and_then(|c| c.seed);
        self.game = GameManager::from_config(&config);
        reply(out, &self.game.state())
    }

    pub fn handle_place<W: Write>(&mut self, row: i32, col: i32, out: &mut W) -> io::Result<()> {
        reply(out, &self.game.place(row, col))
    }

    pub fn handle_move<W: Write>(
        &mut self,
        from: (i32, i32),
        to: (i32, i32),
        out: &mut W,
    ) -> io::Result<()> {
        reply(out, &self.game.move_piece(from.0, from.1, to.0, to.1))
    }

    pub fn handle_remove<W: Write>(&mut self, row: i32, col: i32, out: &mut W) -> io::Result<()> {
        reply(out, &self.game.remove(row, col))
    }

    /// Handles `go`: the computer plays its pending action.
    pub fn handle_go<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        reply(out, &self.game.play_computer_turn())
    }

    pub fn handle_legal<W: Write>(&self, out: &mut W) -> io::Result<()> {
        reply(
            out,
            &json!({
                "player": self.game.current_player(),
                "actions": self.game.legal_actions(),
            }),
        )
    }

    pub fn handle_state<W: Write>(&self, out: &mut W) -> io::Result<()> {
        reply(out, &self.game.state())
    }

    /// Prints the board diagram followed by the MFEN of the position.
    pub fn handle_show<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self.game.board())?;
        writeln!(out, "mfen {}", encode_mfen(&self.game))?;
        out.flush()
    }

    pub fn handle_save<W: Write>(&self, out: &mut W) -> io::Result<()> {
        reply(out, &self.game.save())
    }

    /// Restores a match from its persisted JSON form. The current match is
    /// kept if the input is rejected.
    pub fn handle_load<W: Write>(&mut self, json: &str, out: &mut W) -> io::Result<()> {
        let saved: SavedMatch = match serde_json::from_str(json) {
            Ok(saved) => saved,
            Err(e) => return reply_error(out, format!("failed to parse saved match: {}", e)),
        };
        match GameManager::restore(saved) {
            Ok(game) => {
                self.game = game;
                self.apply_seed();
                reply(out, &self.game.state())
            }
            Err(e) => reply_error(out, e),
        }
    }

    /// Sets up a match from an MFEN string, keeping the current opponent.
    pub fn handle_position<W: Write>(&mut self, mfen: &str, out: &mut W) -> io::Result<()> {
        match parse_mfen(mfen) {
            Ok(position) => {
                self.game = GameManager::from_position(&position, self.game.opponent());
                self.apply_seed();
                reply(out, &self.game.state())
            }
            Err(e) => reply_error(out, format!("failed to parse MFEN: {}", e)),
        }
    }

    /// Replaces the match, defaulting to the current variant and opponent.
    pub fn handle_reset<W: Write>(
        &mut self,
        variant: Option<Variant>,
        opponent: Option<Controller>,
        out: &mut W,
    ) -> io::Result<()> {
        let variant = variant.unwrap_or(self.game.variant());
        let opponent = opponent.unwrap_or(self.game.opponent());
        reply(out, &self.game.reset(variant, opponent))
    }

    fn apply_seed(&mut self) {
        if let Ok(MatchConfig { seed: Some(seed), .. }) = MatchConfig::from_options(&self.options) {
            self.game.reseed(seed);
        }
    }
}
