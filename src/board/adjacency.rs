//! Adjacency graph for the Morris board.
//!
//! Edges are stored once per undirected pair; the dense per-variant tables in
//! `topology` symmetrize them. All data is compile-time `static`.
//!
//! The orthogonal edges are shared by both variants. Twelve Men's Morris adds
//! the four corner diagonals, each a two-edge line from an outer corner to
//! the matching inner corner.

use super::point::Point;

/// An undirected edge between two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub a: Point,
    pub b: Point,
}

const fn edge(a: (u8, u8), b: (u8, u8)) -> Edge {
    Edge {
        a: Point::at(a.0, a.1),
        b: Point::at(b.0, b.1),
    }
}

/// Number of orthogonal edges (both variants).
pub const ORTHOGONAL_EDGE_COUNT: usize = 32;

/// Number of diagonal edges (Twelve Men's Morris only).
pub const DIAGONAL_EDGE_COUNT: usize = 8;

/// Orthogonal edges.
///
/// Breakdown:
/// - Outer, middle and inner squares: 8 edges each = 24
/// - Spokes joining the squares at their midpoints: 8
pub static ORTHOGONAL_EDGES: [Edge; ORTHOGONAL_EDGE_COUNT] = [
    // Outer square
    edge((0, 0), (0, 3)),
    edge((0, 3), (0, 6)),
    edge((0, 6), (3, 6)),
    edge((3, 6), (6, 6)),
    edge((6, 6), (6, 3)),
    edge((6, 3), (6, 0)),
    edge((6, 0), (3, 0)),
    edge((3, 0), (0, 0)),
    // Middle square
    edge((1, 1), (1, 3)),
    edge((1, 3), (1, 5)),
    edge((1, 5), (3, 5)),
    edge((3, 5), (5, 5)),
    edge((5, 5), (5, 3)),
    edge((5, 3), (5, 1)),
    edge((5, 1), (3, 1)),
    edge((3, 1), (1, 1)),
    // Inner square
    edge((2, 2), (2, 3)),
    edge((2, 3), (2, 4)),
    edge((2, 4), (3, 4)),
    edge((3, 4), (4, 4)),
    edge((4, 4), (4, 3)),
    edge((4, 3), (4, 2)),
    edge((4, 2), (3, 2)),
    edge((3, 2), (2, 2)),
    // Spokes
    edge((0, 3), (1, 3)),
    edge((1, 3), (2, 3)),
    edge((3, 0), (3, 1)),
    edge((3, 1), (3, 2)),
    edge((3, 4), (3, 5)),
    edge((3, 5), (3, 6)),
    edge((4, 3), (5, 3)),
    edge((5, 3), (6, 3)),
];

/// Corner diagonals added by Twelve Men's Morris.
pub static DIAGONAL_EDGES: [Edge; DIAGONAL_EDGE_COUNT] = [
    edge((0, 0), (1, 1)),
    edge((1, 1), (2, 2)),
    edge((0, 6), (1, 5)),
    edge((1, 5), (2, 4)),
    edge((6, 0), (5, 1)),
    edge((5, 1), (4, 2)),
    edge((6, 6), (5, 5)),
    edge((5, 5), (4, 4)),
];
