//! Error types shared across the engine.
//!
//! `RuleError` covers every recoverable rejection of a player action; it is
//! carried inside `ActionResult` rather than aborting the match.
//! `SetupError` rejects malformed setup input before a match exists.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::board::Phase;

/// Why a removal was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalFault {
    /// No mill is owed.
    NothingOwed,
    /// The target is empty, off the lattice, or the remover's own piece.
    NotOpponentPiece,
    /// The target sits in a mill and the opponent has pieces outside mills.
    ProtectedByMill,
}

impl fmt::Display for RemovalFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RemovalFault::NothingOwed => "no removal is pending",
            RemovalFault::NotOpponentPiece => "target is not an opponent piece",
            RemovalFault::ProtectedByMill => "piece is protected by a mill",
        })
    }
}

/// A rejected action. State is unchanged whenever one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleError {
    #[error("action not allowed during the {phase} phase")]
    InvalidPhase { phase: Phase },

    #[error("a piece must be removed before play continues")]
    RemovalPending,

    #[error("invalid position or position already occupied")]
    InvalidPosition,

    #[error("invalid destination")]
    InvalidDestination,

    #[error("illegal removal: {reason}")]
    IllegalRemoval { reason: RemovalFault },

    #[error("coordinates ({row}, {col}) are outside the board")]
    OutOfRange { row: i32, col: i32 },

    #[error("the computer is on move")]
    ComputerToMove,

    #[error("the current player is not computer-controlled")]
    NotComputerTurn,
}

/// Malformed setup input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("unknown variant '{0}', expected 9mm or 12mm")]
    UnknownVariant(String),

    #[error("unknown player '{0}', expected 1 or 2")]
    UnknownPlayer(String),

    #[error("unknown opponent '{0}', expected human or computer")]
    UnknownOpponent(String),
}
