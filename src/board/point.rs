//! Point definitions for the Morris board.
//!
//! The board is addressed as a 7x7 grid of (row, column) coordinates, of
//! which only 24 intersections are playable. Each playable intersection is
//! a `Point` carrying a linear id 0..24 in row-major order, so every
//! per-point table in the engine is a fixed-size array indexed by id.

use serde::{Deserialize, Serialize};

/// Side length of the addressable coordinate grid.
pub const GRID_SIZE: usize = 7;

/// The number of playable points (identical for both variants).
pub const POINT_COUNT: usize = 24;

/// Coordinates of every playable point, indexed by point id.
pub const POINT_COORDS: [(u8, u8); POINT_COUNT] = [
    (0, 0), (0, 3), (0, 6),
    (1, 1), (1, 3), (1, 5),
    (2, 2), (2, 3), (2, 4),
    (3, 0), (3, 1), (3, 2), (3, 4), (3, 5), (3, 6),
    (4, 2), (4, 3), (4, 4),
    (5, 1), (5, 3), (5, 5),
    (6, 0), (6, 3), (6, 6),
];

/// Reverse lookup from grid coordinates to point id.
const GRID_TO_POINT: [[Option<u8>; GRID_SIZE]; GRID_SIZE] = build_grid_lookup();

const fn build_grid_lookup() -> [[Option<u8>; GRID_SIZE]; GRID_SIZE] {
    let mut grid = [[None; GRID_SIZE]; GRID_SIZE];
    let mut i = 0;
    while i < POINT_COUNT {
        let (row, col) = POINT_COORDS[i];
        grid[row as usize][col as usize] = Some(i as u8);
        i += 1;
    }
    grid
}

/// A playable intersection on the board.
///
/// Serializes as its `[row, col]` pair so saved games stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Point(u8);

/// All points in id order.
pub const ALL_POINTS: [Point; POINT_COUNT] = {
    let mut points = [Point(0); POINT_COUNT];
    let mut i = 0;
    while i < POINT_COUNT {
        points[i] = Point(i as u8);
        i += 1;
    }
    points
};

impl Point {
    /// Returns the point at the given coordinates, or `None` if the
    /// coordinates are not a playable intersection.
    pub fn from_coords(row: usize, col: usize) -> Option<Point> {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return None;
        }
        GRID_TO_POINT[row][col].map(Point)
    }

    /// Constructor for literal coordinates in tables and tests.
    ///
    /// Caller input goes through `from_coords` instead.
    ///
    /// # Panics
    ///
    /// Panics (or fails const evaluation) if `row` or `col` is outside the
    /// 7x7 grid or the cell is not a playable point.
    pub const fn at(row: u8, col: u8) -> Point {
        if row as usize >= GRID_SIZE || col as usize >= GRID_SIZE {
            panic!("coordinates are outside the grid");
        }
        match GRID_TO_POINT[row as usize][col as usize] {
            Some(id) => Point(id),
            None => panic!("coordinates are not a playable point"),
        }
    }

    /// Returns the point with the given id, if in range.
    pub fn from_index(index: usize) -> Option<Point> {
        (index < POINT_COUNT).then(|| Point(index as u8))
    }

    /// Linear id used to index dense tables.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Grid coordinates as (row, col).
    pub const fn coords(self) -> (u8, u8) {
        POINT_COORDS[self.0 as usize]
    }

    pub const fn row(self) -> u8 {
        self.coords().0
    }

    pub const fn col(self) -> u8 {
        self.coords().1
    }

    /// Bit for this point in a 24-bit point set.
    pub(crate) const fn bit(self) -> u32 {
        1 << self.0
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (row, col) = self.coords();
        write!(f, "({}, {})", row, col)
    }
}

impl TryFrom<(u8, u8)> for Point {
    type Error = String;

    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        Point::from_coords(row as usize, col as usize)
            .ok_or_else(|| format!("({}, {}) is not a playable point", row, col))
    }
}

impl From<Point> for (u8, u8) {
    fn from(p: Point) -> Self {
        p.coords()
    }
}

/// Converts signed caller coordinates into grid indices.
///
/// Returns `None` when the pair lies outside the 7x7 addressable grid.
pub fn grid_coords(row: i32, col: i32) -> Option<(usize, usize)> {
    let size = GRID_SIZE as i32;
    if (0..size).contains(&row) && (0..size).contains(&col) {
        Some((row as usize, col as usize))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_point_roundtrips_through_coords() {
        for p in ALL_POINTS {
            let (row, col) = p.coords();
            assert_eq!(Point::from_coords(row as usize, col as usize), Some(p));
        }
    }

    #[test]
    fn center_and_off_lattice_cells_are_not_points() {
        assert_eq!(Point::from_coords(3, 3), None);
        assert_eq!(Point::from_coords(0, 1), None);
        assert_eq!(Point::from_coords(7, 0), None);
    }

    #[test]
    fn exactly_twenty_four_playable_cells() {
        let count = (0..GRID_SIZE)
            .flat_map(|r| (0..GRID_SIZE).map(move |c| (r, c)))
            .filter(|&(r, c)| Point::from_coords(r, c).is_some())
            .count();
        assert_eq!(count, POINT_COUNT);
    }

    #[test]
    fn const_constructor_matches_lookup() {
        assert_eq!(Point::at(3, 4).index(), 12);
        assert_eq!(Point::at(6, 6).index(), 23);
    }

    #[test]
    #[should_panic(expected = "outside the grid")]
    fn const_constructor_panics_off_grid() {
        Point::at(7, 0);
    }

    #[test]
    #[should_panic(expected = "not a playable point")]
    fn const_constructor_panics_on_dead_cell() {
        Point::at(3, 3);
    }

    #[test]
    fn grid_coords_rejects_out_of_range() {
        assert_eq!(grid_coords(0, 6), Some((0, 6)));
        assert_eq!(grid_coords(-1, 0), None);
        assert_eq!(grid_coords(3, 7), None);
    }

    #[test]
    fn point_serializes_as_coordinate_pair() {
        let json = serde_json::to_string(&Point::at(5, 3)).unwrap();
        assert_eq!(json, "[5,3]");
        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Point::at(5, 3));
        assert!(serde_json::from_str::<Point>("[3,3]").is_err());
    }
}
