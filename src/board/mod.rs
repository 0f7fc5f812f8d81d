//! Board representation and topology.
//!
//! Contains the playable points, the action type, the static edge and mill
//! tables, the dense per-variant lookup tables built from them, and the
//! board occupancy type.

pub mod action;
pub mod adjacency;
pub mod mills;
pub mod point;
pub mod state;
pub mod topology;

pub use action::Action;
pub use adjacency::{Edge, DIAGONAL_EDGES, ORTHOGONAL_EDGES};
pub use mills::{MillLine, DIAGONAL_MILLS, ORTHOGONAL_MILLS};
pub use point::{grid_coords, Point, ALL_POINTS, GRID_SIZE, POINT_COORDS, POINT_COUNT};
pub use state::{Board, Phase, PlayerId};
pub use topology::{Topology, Variant};
