//! Player actions.
//!
//! The three things a player can do on their turn: place a piece from hand,
//! move a placed piece, or remove an opponent piece after closing a mill.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::point::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Place: `place (0, 3)`
    Place { at: Point },

    /// Move: `move (0, 3) -> (1, 3)`
    Move { from: Point, to: Point },

    /// Remove: `remove (6, 6)`
    Remove { at: Point },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Place { at } => write!(f, "place {}", at),
            Action::Move { from, to } => write!(f, "move {} -> {}", from, to),
            Action::Remove { at } => write!(f, "remove {}", at),
        }
    }
}
