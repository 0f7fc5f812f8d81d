//! Players and their controllers.
//!
//! A `Player` is a plain inventory record: pieces still in hand and the
//! points currently held on the board. Whether the player is driven by the
//! caller or by the engine is a separate `Controller` capability chosen at
//! setup; the record itself has the same shape for both.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Point, PlayerId};
use crate::error::SetupError;

/// Who decides a player's actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Controller {
    /// Actions arrive from the caller.
    Human,
    /// Actions are synthesized by the heuristic strategy.
    #[default]
    Computer,
}

impl Controller {
    pub const fn is_computer(self) -> bool {
        matches!(self, Controller::Computer)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Controller::Human => "human",
            Controller::Computer => "computer",
        }
    }
}

impl fmt::Display for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Controller {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(Controller::Human),
            "computer" | "cpu" | "ai" => Ok(Controller::Computer),
            _ => Err(SetupError::UnknownOpponent(s.to_string())),
        }
    }
}

/// A player's piece inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    /// Pieces still to place.
    pub pieces: u8,
    /// Points this player holds on the board.
    pub placed_pieces: BTreeSet<Point>,
    pub controller: Controller,
}

impl Player {
    /// Creates a player with a full hand and nothing on the board.
    pub fn new(id: PlayerId, pieces: u8, controller: Controller) -> Self {
        Player {
            id,
            pieces,
            placed_pieces: BTreeSet::new(),
            controller,
        }
    }

    /// Moves one piece from hand to `p`. Returns false if the hand is empty.
    pub fn place_piece(&mut self, p: Point) -> bool {
        if self.pieces == 0 {
            return false;
        }
        self.pieces -= 1;
        self.placed_pieces.insert(p);
        true
    }

    /// Relocates a placed piece. Returns false if `from` is not held.
    pub fn move_piece(&mut self, from: Point, to: Point) -> bool {
        if !self.placed_pieces.remove(&from) {
            return false;
        }
        self.placed_pieces.insert(to);
        true
    }

    /// Drops a captured piece. Returns false if `p` is not held.
    pub fn remove_piece(&mut self, p: Point) -> bool {
        self.placed_pieces.remove(&p)
    }

    /// Pieces on the board.
    pub fn on_board(&self) -> usize {
        self.placed_pieces.len()
    }

    /// True once every piece has been placed.
    pub fn hand_empty(&self) -> bool {
        self.pieces == 0
    }

    pub fn is_computer(&self) -> bool {
        self.controller.is_computer()
    }
}
