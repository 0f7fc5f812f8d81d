//! Board state representation.
//!
//! Holds occupancy for the 24 playable points plus the active variant. The
//! board knows nothing about turns or hands; it answers occupancy and mill
//! questions and applies raw mutations that the game manager has already
//! validated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::point::{grid_coords, Point, ALL_POINTS, GRID_SIZE, POINT_COUNT};
use super::topology::{Topology, Variant};
use crate::error::{RuleError, SetupError};

/// Identifies one of the two players.
///
/// Serializes as the bare number 1 or 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum PlayerId {
    One = 1,
    Two = 2,
}

impl PlayerId {
    /// Returns the other player.
    #[inline]
    pub const fn opponent(self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// Converts 1 or 2 into a player id.
    pub fn from_number(n: u8) -> Option<PlayerId> {
        match n {
            1 => Some(PlayerId::One),
            2 => Some(PlayerId::Two),
            _ => None,
        }
    }

    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Index into per-player arrays.
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    /// Cell character used by MFEN.
    pub const fn mfen_char(self) -> char {
        match self {
            PlayerId::One => '1',
            PlayerId::Two => '2',
        }
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        PlayerId::from_number(n).ok_or_else(|| format!("invalid player id {}", n))
    }
}

impl From<PlayerId> for u8 {
    fn from(p: PlayerId) -> Self {
        p.number()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl FromStr for PlayerId {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "player1" | "p1" => Ok(PlayerId::One),
            "2" | "player2" | "p2" => Ok(PlayerId::Two),
            _ => Err(SetupError::UnknownPlayer(s.to_string())),
        }
    }
}

/// The match-wide phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Placing,
    Moving,
    Flying,
    GameOver,
}

impl Phase {
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Placing => "placing",
            Phase::Moving => "moving",
            Phase::Flying => "flying",
            Phase::GameOver => "game_over",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Occupancy of the playable points.
///
/// Uses a fixed-size array indexed by point id, so the board is `Copy` and
/// hypothetical probes can run on a throwaway copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    variant: Variant,
    cells: [Option<PlayerId>; POINT_COUNT],
}

impl Board {
    /// Creates an empty board for the given variant.
    pub fn new(variant: Variant) -> Self {
        Board {
            variant,
            cells: [None; POINT_COUNT],
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn topology(&self) -> &'static Topology {
        self.variant.topology()
    }

    /// Returns true if (row, col) is a playable point.
    pub fn is_valid_position(&self, row: i32, col: i32) -> bool {
        grid_coords(row, col).is_some_and(|(r, c)| Point::from_coords(r, c).is_some())
    }

    /// Returns the occupant at (row, col).
    ///
    /// Addressable cells that are not playable read as empty. Coordinates
    /// outside the 7x7 grid are `OutOfRange`.
    pub fn occupant_at(&self, row: i32, col: i32) -> Result<Option<PlayerId>, RuleError> {
        let (r, c) = grid_coords(row, col).ok_or(RuleError::OutOfRange { row, col })?;
        Ok(Point::from_coords(r, c).and_then(|p| self.cells[p.index()]))
    }

    #[inline]
    pub fn occupant(&self, p: Point) -> Option<PlayerId> {
        self.cells[p.index()]
    }

    #[inline]
    pub fn is_empty(&self, p: Point) -> bool {
        self.cells[p.index()].is_none()
    }

    #[inline]
    pub fn is_adjacent(&self, a: Point, b: Point) -> bool {
        self.topology().is_adjacent(a, b)
    }

    /// Returns true if a piece of `player` at `p` completes a mill, i.e. the
    /// other two points of some line through `p` are both held by `player`.
    ///
    /// Only the other two points are inspected, so this answers both "is the
    /// piece at `p` in a mill" and "would a piece placed at `p` close one".
    pub fn forms_mill(&self, p: Point, player: PlayerId) -> bool {
        self.topology()
            .mill_pairs(p)
            .iter()
            .any(|[a, b]| self.occupant(*a) == Some(player) && self.occupant(*b) == Some(player))
    }

    /// Returns true if moving `player`'s piece from `from` to `to` would
    /// close a mill at `to`. Evaluated on a copy; `self` is untouched.
    pub fn forms_mill_after_move(&self, from: Point, to: Point, player: PlayerId) -> bool {
        let mut probe = *self;
        probe.clear(from);
        probe.place(to, player);
        probe.forms_mill(to, player)
    }

    /// Writes `player` at `p`. Legality is the caller's responsibility.
    #[inline]
    pub fn place(&mut self, p: Point, player: PlayerId) {
        self.cells[p.index()] = Some(player);
    }

    #[inline]
    pub fn clear(&mut self, p: Point) {
        self.cells[p.index()] = None;
    }

    /// Empty points in id order.
    pub fn empty_points(&self) -> impl Iterator<Item = Point> + '_ {
        ALL_POINTS.into_iter().filter(move |&p| self.is_empty(p))
    }

    /// Points held by `player` in id order.
    pub fn points_of(&self, player: PlayerId) -> impl Iterator<Item = Point> + '_ {
        ALL_POINTS
            .into_iter()
            .filter(move |&p| self.occupant(p) == Some(player))
    }

    pub fn count(&self, player: PlayerId) -> usize {
        self.cells.iter().filter(|c| **c == Some(player)).count()
    }

    /// Occupancy as a 7x7 grid indexed `[row][col]`.
    pub fn grid(&self) -> [[Option<PlayerId>; GRID_SIZE]; GRID_SIZE] {
        let mut grid = [[None; GRID_SIZE]; GRID_SIZE];
        for p in ALL_POINTS {
            let (row, col) = p.coords();
            grid[row as usize][col as usize] = self.occupant(p);
        }
        grid
    }

    /// Raw cells in point-id order.
    pub fn cells(&self) -> &[Option<PlayerId>; POINT_COUNT] {
        &self.cells
    }
}

impl fmt::Display for Board {
    /// Renders the board as a 7-line diagram (`.` empty, `1`/`2` pieces,
    /// blank for non-playable cells).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..GRID_SIZE {
            let line: String = (0..GRID_SIZE)
                .map(|col| match Point::from_coords(row, col) {
                    Some(p) => self.occupant(p).map_or('.', PlayerId::mfen_char),
                    None => ' ',
                })
                .collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
