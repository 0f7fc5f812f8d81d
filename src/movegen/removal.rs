//! Capture generation.
//!
//! A piece standing in one of its owner's mills is protected unless every
//! piece its owner has on the board is in a mill.

use crate::board::{Board, PlayerId, Point};

/// Returns true if every piece `player` has on the board is part of a mill.
///
/// Vacuously true for a player with no pieces on the board.
pub fn all_pieces_in_mills(board: &Board, player: PlayerId) -> bool {
    board.points_of(player).all(|p| board.forms_mill(p, player))
}

/// Returns true if the piece at `p` belongs to `victim` and may be captured.
pub fn is_removable(board: &Board, victim: PlayerId, p: Point) -> bool {
    board.occupant(p) == Some(victim)
        && (!board.forms_mill(p, victim) || all_pieces_in_mills(board, victim))
}

/// Every point holding a capturable piece of `victim`, in id order.
pub fn legal_removals(board: &Board, victim: PlayerId) -> Vec<Point> {
    let unprotected: Vec<Point> = board
        .points_of(victim)
        .filter(|&p| !board.forms_mill(p, victim))
        .collect();
    if unprotected.is_empty() {
        board.points_of(victim).collect()
    } else {
        unprotected
    }
}
