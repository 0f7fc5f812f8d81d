//! Mill lines for the Morris board.
//!
//! A mill line is three points that form a mill when one player occupies
//! all of them. Nine Men's Morris has the 16 orthogonal lines; Twelve Men's
//! Morris adds the 4 corner diagonals.

use super::point::Point;

/// Three collinear points that form a mill.
pub type MillLine = [Point; 3];

const fn line(a: (u8, u8), b: (u8, u8), c: (u8, u8)) -> MillLine {
    [Point::at(a.0, a.1), Point::at(b.0, b.1), Point::at(c.0, c.1)]
}

pub const ORTHOGONAL_MILL_COUNT: usize = 16;
pub const DIAGONAL_MILL_COUNT: usize = 4;

/// Orthogonal mill lines: 8 horizontal, then 8 vertical.
pub static ORTHOGONAL_MILLS: [MillLine; ORTHOGONAL_MILL_COUNT] = [
    line((0, 0), (0, 3), (0, 6)),
    line((1, 1), (1, 3), (1, 5)),
    line((2, 2), (2, 3), (2, 4)),
    line((3, 0), (3, 1), (3, 2)),
    line((3, 4), (3, 5), (3, 6)),
    line((4, 2), (4, 3), (4, 4)),
    line((5, 1), (5, 3), (5, 5)),
    line((6, 0), (6, 3), (6, 6)),
    line((0, 0), (3, 0), (6, 0)),
    line((1, 1), (3, 1), (5, 1)),
    line((2, 2), (3, 2), (4, 2)),
    line((0, 3), (1, 3), (2, 3)),
    line((4, 3), (5, 3), (6, 3)),
    line((2, 4), (3, 4), (4, 4)),
    line((1, 5), (3, 5), (5, 5)),
    line((0, 6), (3, 6), (6, 6)),
];

/// Corner diagonal mill lines (Twelve Men's Morris only).
pub static DIAGONAL_MILLS: [MillLine; DIAGONAL_MILL_COUNT] = [
    line((0, 0), (1, 1), (2, 2)),
    line((0, 6), (1, 5), (2, 4)),
    line((6, 0), (5, 1), (4, 2)),
    line((6, 6), (5, 5), (4, 4)),
];
