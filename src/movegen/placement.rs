//! Placement-phase move generation.

use crate::board::{Board, Point};

/// Every point a piece may be placed on: all empty points, in id order.
pub fn legal_placements(board: &Board) -> Vec<Point> {
    board.empty_points().collect()
}
