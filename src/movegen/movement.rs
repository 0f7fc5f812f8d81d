//! Movement-phase move generation.
//!
//! Enumerates slides along board edges and, for a player reduced to three
//! pieces, flights to any empty point. Flying eligibility is read from the
//! board for the individual player, never from the match-wide phase.

use crate::board::{Board, PlayerId, Point};

/// Pieces on the board at which a player may fly.
pub const FLYING_PIECE_COUNT: usize = 3;

/// Returns true if `player` has exactly three pieces on the board.
pub fn can_fly(board: &Board, player: PlayerId) -> bool {
    board.count(player) == FLYING_PIECE_COUNT
}

/// Empty points the piece at `from` may reach.
pub fn legal_destinations(board: &Board, from: Point, flying: bool) -> Vec<Point> {
    if flying {
        board.empty_points().filter(|&p| p != from).collect()
    } else {
        board
            .topology()
            .neighbours(from)
            .filter(|&p| board.is_empty(p))
            .collect()
    }
}

/// Returns true if `player` may move a piece from `from` to `to`.
pub fn is_legal_move(board: &Board, player: PlayerId, from: Point, to: Point) -> bool {
    board.occupant(from) == Some(player)
        && board.is_empty(to)
        && (can_fly(board, player) || board.is_adjacent(from, to))
}

/// Every legal (from, to) pair for `player`, ordered by origin then
/// destination id.
pub fn legal_moves(board: &Board, player: PlayerId) -> Vec<(Point, Point)> {
    let flying = can_fly(board, player);
    board
        .points_of(player)
        .flat_map(|from| {
            legal_destinations(board, from, flying)
                .into_iter()
                .map(move |to| (from, to))
        })
        .collect()
}

/// Returns true if `player` has at least one legal move.
pub fn has_valid_moves(board: &Board, player: PlayerId) -> bool {
    if can_fly(board, player) {
        return board.empty_points().next().is_some();
    }
    let topo = board.topology();
    board
        .points_of(player)
        .any(|from| topo.neighbours(from).any(|p| board.is_empty(p)))
}
