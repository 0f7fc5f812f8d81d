//! Computer opponent.
//!
//! Synthesizes placements, moves and captures for computer-controlled
//! players using a fixed-priority heuristic.

pub mod heuristic;

pub use heuristic::{decide_action, decide_move, decide_placement, decide_removal};
