//! Per-variant lookup tables.
//!
//! A `Topology` is the dense form of the static edge and mill tables for one
//! variant: adjacency as a 24-bit neighbour mask per point, and for each point
//! the "other two" points of every mill line through it. Both tables are
//! built once on first use and shared by every match.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::adjacency::{Edge, DIAGONAL_EDGES, ORTHOGONAL_EDGES};
use super::mills::{MillLine, DIAGONAL_MILLS, ORTHOGONAL_MILLS};
use super::point::{Point, ALL_POINTS, POINT_COUNT};
use crate::error::SetupError;

/// Game variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    #[default]
    #[serde(rename = "9mm")]
    NineMen,
    #[serde(rename = "12mm")]
    TwelveMen,
}

impl Variant {
    /// Pieces each player starts with in hand.
    pub const fn pieces_per_player(self) -> u8 {
        match self {
            Variant::NineMen => 9,
            Variant::TwelveMen => 12,
        }
    }

    /// Returns the short tag used in saved games and MFEN.
    pub const fn tag(self) -> &'static str {
        match self {
            Variant::NineMen => "9mm",
            Variant::TwelveMen => "12mm",
        }
    }

    /// Returns the shared lookup tables for this variant.
    pub fn topology(self) -> &'static Topology {
        match self {
            Variant::NineMen => &NINE_MEN,
            Variant::TwelveMen => &TWELVE_MEN,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Variant {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "9mm" | "9" | "nine" => Ok(Variant::NineMen),
            "12mm" | "12" | "twelve" => Ok(Variant::TwelveMen),
            _ => Err(SetupError::UnknownVariant(s.to_string())),
        }
    }
}

static NINE_MEN: LazyLock<Topology> = LazyLock::new(|| Topology::build(Variant::NineMen));
static TWELVE_MEN: LazyLock<Topology> = LazyLock::new(|| Topology::build(Variant::TwelveMen));

/// Dense adjacency and mill tables for one variant.
#[derive(Debug)]
pub struct Topology {
    variant: Variant,
    /// Bit `j` of `neighbours[i]` is set when points `i` and `j` are adjacent.
    neighbours: [u32; POINT_COUNT],
    /// For each point, the other two points of every mill line through it.
    mill_pairs: [Vec<[Point; 2]>; POINT_COUNT],
    lines: Vec<MillLine>,
}

impl Topology {
    fn build(variant: Variant) -> Self {
        let mut edges: Vec<Edge> = ORTHOGONAL_EDGES.to_vec();
        let mut lines: Vec<MillLine> = ORTHOGONAL_MILLS.to_vec();
        if variant == Variant::TwelveMen {
            edges.extend_from_slice(&DIAGONAL_EDGES);
            lines.extend_from_slice(&DIAGONAL_MILLS);
        }

        let mut neighbours = [0u32; POINT_COUNT];
        for e in &edges {
            neighbours[e.a.index()] |= e.b.bit();
            neighbours[e.b.index()] |= e.a.bit();
        }

        let mill_pairs = std::array::from_fn(|i| {
            let p = ALL_POINTS[i];
            lines
                .iter()
                .filter(|l| l.contains(&p))
                .map(|l| match l.iter().position(|&q| q == p) {
                    Some(0) => [l[1], l[2]],
                    Some(1) => [l[0], l[2]],
                    _ => [l[0], l[1]],
                })
                .collect()
        });

        Topology {
            variant,
            neighbours,
            mill_pairs,
            lines,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Returns true if a non-flying move can go from `a` to `b`.
    #[inline]
    pub fn is_adjacent(&self, a: Point, b: Point) -> bool {
        self.neighbours[a.index()] & b.bit() != 0
    }

    /// Iterates the neighbours of `p` in id order.
    pub fn neighbours(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        let mask = self.neighbours[p.index()];
        ALL_POINTS.into_iter().filter(move |q| mask & q.bit() != 0)
    }

    /// The "other two" points of every mill line through `p`.
    #[inline]
    pub fn mill_pairs(&self, p: Point) -> &[[Point; 2]] {
        &self.mill_pairs[p.index()]
    }

    /// Every mill line of this variant.
    pub fn lines(&self) -> &[MillLine] {
        &self.lines
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.neighbours.iter().map(|m| m.count_ones() as usize).sum::<usize>() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_parses_tags() {
        assert_eq!("9mm".parse::<Variant>().unwrap(), Variant::NineMen);
        assert_eq!("12MM".parse::<Variant>().unwrap(), Variant::TwelveMen);
        assert!(matches!(
            "6mm".parse::<Variant>(),
            Err(SetupError::UnknownVariant(_))
        ));
    }

    #[test]
    fn pieces_per_variant() {
        assert_eq!(Variant::NineMen.pieces_per_player(), 9);
        assert_eq!(Variant::TwelveMen.pieces_per_player(), 12);
    }

    #[test]
    fn adjacency_is_symmetric_for_both_variants() {
        for variant in [Variant::NineMen, Variant::TwelveMen] {
            let topo = variant.topology();
            for a in ALL_POINTS {
                for b in ALL_POINTS {
                    assert_eq!(topo.is_adjacent(a, b), topo.is_adjacent(b, a));
                }
                assert!(!topo.is_adjacent(a, a));
            }
        }
    }

    #[test]
    fn edge_and_line_counts() {
        let nine = Variant::NineMen.topology();
        let twelve = Variant::TwelveMen.topology();
        assert_eq!(nine.edge_count(), 32);
        assert_eq!(twelve.edge_count(), 40);
        assert_eq!(nine.lines().len(), 16);
        assert_eq!(twelve.lines().len(), 20);
    }

    #[test]
    fn twelve_men_adds_diagonal_adjacency() {
        let corner = Point::at(0, 0);
        let inner = Point::at(1, 1);
        assert!(!Variant::NineMen.topology().is_adjacent(corner, inner));
        assert!(Variant::TwelveMen.topology().is_adjacent(corner, inner));
    }

    #[test]
    fn neighbours_match_known_layout() {
        let topo = Variant::NineMen.topology();
        let got: Vec<Point> = topo.neighbours(Point::at(1, 3)).collect();
        assert_eq!(
            got,
            vec![Point::at(0, 3), Point::at(1, 1), Point::at(1, 5), Point::at(2, 3)]
        );
    }

    #[test]
    fn mill_pairs_per_point() {
        let nine = Variant::NineMen.topology();
        let twelve = Variant::TwelveMen.topology();
        for p in ALL_POINTS {
            assert_eq!(nine.mill_pairs(p).len(), 2);
            let extra = twelve.mill_pairs(p).len() - 2;
            assert!(extra <= 1);
        }
        let diag_points = ALL_POINTS
            .iter()
            .filter(|&&p| twelve.mill_pairs(p).len() == 3)
            .count();
        assert_eq!(diag_points, 12);
        assert!(twelve
            .mill_pairs(Point::at(1, 1))
            .contains(&[Point::at(0, 0), Point::at(2, 2)]));
    }
}
