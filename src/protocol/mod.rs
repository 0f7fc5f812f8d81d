//! Driver protocol handling.
//!
//! MFEN position notation and the line-command parser for the driver main
//! loop.

pub mod mfen;
pub mod parser;

pub use mfen::{encode_mfen, parse_mfen, NotationError, Position};
pub use parser::{parse_command, Command};
