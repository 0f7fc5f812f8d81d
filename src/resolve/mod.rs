//! Rule resolution.
//!
//! Derives the match phase from the board and hands, and decides when the
//! match is over and who won.

pub mod phase;

pub use phase::{check_game_over, determine_phase, hands_in_turn, is_blocked, is_reduced, MIN_PIECES};
