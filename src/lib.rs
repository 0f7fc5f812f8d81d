//! Morris rules engine library.
//!
//! Exposes the board topology, move generation, rules, computer strategy,
//! match state machine and protocol modules for use by integration tests
//! and the binary entry points.

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod movegen;
pub mod player;
pub mod protocol;
pub mod resolve;
pub mod search;
pub mod selfplay;
