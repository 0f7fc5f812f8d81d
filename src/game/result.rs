//! Structured replies returned by the match operations.

use serde::{Deserialize, Serialize};

use crate::board::{Action, Board, Phase, PlayerId, Variant, GRID_SIZE};
use crate::error::RuleError;
use crate::player::Player;

/// Serializable board snapshot: occupancy, pieces left in hand, and whose
/// turn it is.
///
/// `grid` is indexed `[row][col]`; non-playable cells are always `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    pub grid: [[Option<PlayerId>; GRID_SIZE]; GRID_SIZE],
    pub player1_pieces: u8,
    pub player2_pieces: u8,
    pub current_player: PlayerId,
}

impl BoardState {
    pub(crate) fn capture(board: &Board, players: &[Player; 2], current: PlayerId) -> Self {
        BoardState {
            grid: board.grid(),
            player1_pieces: players[0].pieces,
            player2_pieces: players[1].pieces,
            current_player: current,
        }
    }
}

/// Outcome of `place`, `move_piece`, `remove` or `play_computer_turn`.
///
/// The snapshot fields always describe the match after the call, including
/// any action the computer took in response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionResult {
    pub success: bool,
    /// The requested action closed a mill.
    pub mill_formed: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RuleError>,
    pub board: BoardState,
    pub current_player: PlayerId,
    pub phase: Phase,
    pub waiting_for_removal: bool,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
    /// Action the computer played before control returned, if any.
    pub computer_action: Option<Action>,
    /// `computer_action` closed a mill; with `waiting_for_removal` set the
    /// computer still owes its capture.
    pub computer_mill_formed: bool,
}

/// Read-only view of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchView {
    pub board: BoardState,
    pub current_player: PlayerId,
    pub phase: Phase,
    pub variant: Variant,
    pub waiting_for_removal: bool,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
}
