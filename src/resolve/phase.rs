//! Phase sequencing and game-over detection.
//!
//! The phase is a pure function of the two hands and the board, recomputed
//! after every successful action rather than advanced step by step.

use crate::board::{Board, Phase, PlayerId};
use crate::movegen::has_valid_moves;
use crate::player::Player;

/// Fewer pieces than this on the board (with an empty hand) loses.
pub const MIN_PIECES: usize = 3;

/// Computes the match-wide phase.
///
/// Phase flow:
/// - either hand still holds pieces          -> Placing
/// - either player below three on the board  -> GameOver
/// - either player at exactly three          -> Flying
/// - otherwise                               -> Moving
///
/// The GameOver branch is a safety net; `check_game_over` normally catches
/// the loss first.
pub fn determine_phase(board: &Board, players: &[Player; 2]) -> Phase {
    if players.iter().any(|p| p.pieces > 0) {
        return Phase::Placing;
    }
    let counts = players.each_ref().map(|p| board.count(p.id));
    if counts.iter().any(|&c| c < MIN_PIECES) {
        Phase::GameOver
    } else if counts.iter().any(|&c| c == MIN_PIECES) {
        Phase::Flying
    } else {
        Phase::Moving
    }
}

/// Returns true if `player` has lost by material: empty hand and fewer than
/// three pieces on the board.
pub fn is_reduced(board: &Board, player: &Player) -> bool {
    player.hand_empty() && board.count(player.id) < MIN_PIECES
}

/// Returns true if `player` has lost by blockade: empty hand and no legal
/// slide or flight.
pub fn is_blocked(board: &Board, player: &Player) -> bool {
    player.hand_empty() && !has_valid_moves(board, player.id)
}

/// Returns the winner if the match is over, given the player about to move.
///
/// Material loss applies to either player; a blockade only loses for the
/// player who would have to move out of it.
pub fn check_game_over(board: &Board, players: &[Player; 2], to_move: PlayerId) -> Option<PlayerId> {
    let mover = &players[to_move.index()];
    let other = &players[to_move.opponent().index()];
    if is_reduced(board, mover) || is_blocked(board, mover) {
        return Some(other.id);
    }
    if is_reduced(board, other) {
        return Some(mover.id);
    }
    None
}

/// Returns true if `hands` can occur with `to_move` on move.
///
/// Placements alternate, so the hands differ by at most one. The mover holds
/// at least as many as the other player, unless a capture is pending: then
/// the mover has just placed and holds at most as many.
pub fn hands_in_turn(hands: [u8; 2], to_move: PlayerId, capture_pending: bool) -> bool {
    let mover = hands[to_move.index()];
    let other = hands[to_move.opponent().index()];
    let (ahead, behind) = if capture_pending {
        (other, mover)
    } else {
        (mover, other)
    };
    ahead >= behind && ahead - behind <= 1
}
