//! Save and restore.
//!
//! `SavedMatch` is the persisted form of a match: everything needed to
//! rebuild an equivalent `GameManager`, serialized with serde. The random
//! source is not saved; a restored match draws fresh entropy unless reseeded.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, Phase, PlayerId, Point, Variant, GRID_SIZE};
use crate::movegen::legal_removals;
use crate::player::{Controller, Player};
use crate::resolve::hands_in_turn;

use super::GameManager;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPlayer {
    pub id: PlayerId,
    pub controller: Controller,
    /// Pieces still in hand.
    pub pieces: u8,
    pub placed_pieces: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedMatch {
    pub variant: Variant,
    pub grid: [[Option<PlayerId>; GRID_SIZE]; GRID_SIZE],
    pub players: [SavedPlayer; 2],
    pub current_player: PlayerId,
    pub phase: Phase,
    pub opponent: Controller,
    pub waiting_for_removal: bool,
    pub winner: Option<PlayerId>,
    pub starting_player: PlayerId,
}

/// A saved match that cannot describe a legal position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestoreError {
    #[error("saved players are out of order: expected player {expected}, found player {found}")]
    PlayerOrder { expected: PlayerId, found: PlayerId },

    #[error("cell ({row}, {col}) is not a playable point but holds a piece")]
    NonPlayableCell { row: usize, col: usize },

    #[error("placed pieces of player {0} do not match the grid")]
    PlacedMismatch(PlayerId),

    #[error("player {player} holds {total} pieces, more than the {limit} of the variant")]
    TooManyPieces { player: PlayerId, total: usize, limit: u8 },

    #[error("winner recorded but phase is {0}")]
    WinnerOutsideGameOver(Phase),

    #[error("hands {hands:?} cannot occur with player {to_move} on move")]
    HandsOutOfTurn { to_move: PlayerId, hands: [u8; 2] },

    #[error("removal pending but player {0} has no piece to capture")]
    NothingToCapture(PlayerId),

    #[error("opponent recorded as {opponent} but player 2 is {seat}")]
    OpponentMismatch { opponent: Controller, seat: Controller },
}

impl SavedMatch {
    /// Rebuilds the board from `grid`, rejecting pieces on non-playable cells.
    fn board(&self) -> Result<Board, RestoreError> {
        let mut board = Board::new(self.variant);
        for (row, cells) in self.grid.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let Some(owner) = *cell else { continue };
                let p = Point::from_coords(row, col).ok_or(RestoreError::NonPlayableCell { row, col })?;
                board.place(p, owner);
            }
        }
        Ok(board)
    }

    fn player(&self, board: &Board, index: usize) -> Result<Player, RestoreError> {
        let saved = &self.players[index];
        let expected = if index == 0 { PlayerId::One } else { PlayerId::Two };
        if saved.id != expected {
            return Err(RestoreError::PlayerOrder {
                expected,
                found: saved.id,
            });
        }
        let placed: BTreeSet<Point> = saved.placed_pieces.iter().copied().collect();
        let on_grid: BTreeSet<Point> = board.points_of(saved.id).collect();
        if placed != on_grid || placed.len() != saved.placed_pieces.len() {
            return Err(RestoreError::PlacedMismatch(saved.id));
        }
        let limit = self.variant.pieces_per_player();
        let total = placed.len() + saved.pieces as usize;
        if total > limit as usize {
            return Err(RestoreError::TooManyPieces {
                player: saved.id,
                total,
                limit,
            });
        }
        Ok(Player {
            id: saved.id,
            pieces: saved.pieces,
            placed_pieces: placed,
            controller: saved.controller,
        })
    }
}

impl GameManager {
    /// Captures the match in its persisted form.
    pub fn save(&self) -> SavedMatch {
        let players = self.players.each_ref().map(|p| SavedPlayer {
            id: p.id,
            controller: p.controller,
            pieces: p.pieces,
            placed_pieces: p.placed_pieces.iter().copied().collect(),
        });
        SavedMatch {
            variant: self.variant(),
            grid: self.board.grid(),
            players,
            current_player: self.current,
            phase: self.phase,
            opponent: self.opponent,
            waiting_for_removal: self.waiting_for_removal,
            winner: self.winner,
            starting_player: self.starting_player,
        }
    }

    /// Rebuilds a match from its persisted form.
    ///
    /// The grid and each player's placed set must agree exactly, and the
    /// hands and any pending capture must leave the match playable. The
    /// stored phase is taken as is; no computer action is played on restore.
    pub fn restore(saved: SavedMatch) -> Result<Self, RestoreError> {
        let board = saved.board()?;
        let players = [saved.player(&board, 0)?, saved.player(&board, 1)?];
        if saved.winner.is_some() && saved.phase != Phase::GameOver {
            return Err(RestoreError::WinnerOutsideGameOver(saved.phase));
        }
        let seat = players[1].controller;
        if saved.opponent != seat {
            return Err(RestoreError::OpponentMismatch {
                opponent: saved.opponent,
                seat,
            });
        }
        let to_move = saved.current_player;
        let hands = players.each_ref().map(|p| p.pieces);
        if !hands_in_turn(hands, to_move, saved.waiting_for_removal) {
            return Err(RestoreError::HandsOutOfTurn { to_move, hands });
        }
        if saved.waiting_for_removal && legal_removals(&board, to_move.opponent()).is_empty() {
            return Err(RestoreError::NothingToCapture(to_move.opponent()));
        }
        let mut game = GameManager::from_parts(
            board,
            players,
            saved.current_player,
            saved.phase,
            saved.waiting_for_removal,
            saved.winner,
            saved.opponent,
        );
        game.starting_player = saved.starting_player;
        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn played_match() -> GameManager {
        let mut game = GameManager::setup(Variant::NineMen, PlayerId::One, Controller::Human);
        for (r, c) in [(0, 0), (6, 0), (0, 3), (6, 6), (0, 6)] {
            assert!(game.place(r, c).success);
        }
        game
    }

    #[test]
    fn save_restore_reproduces_match() {
        let game = played_match();
        let restored = GameManager::restore(game.save()).unwrap();
        assert_eq!(restored.board(), game.board());
        assert_eq!(restored.players(), game.players());
        assert_eq!(restored.phase(), game.phase());
        assert_eq!(restored.current_player(), game.current_player());
        assert!(restored.waiting_for_removal());
        assert_eq!(restored.save(), game.save());
    }

    #[test]
    fn survives_json() {
        let game = played_match();
        let json = serde_json::to_string(&game.save()).unwrap();
        let saved: SavedMatch = serde_json::from_str(&json).unwrap();
        assert_eq!(saved, game.save());
        let mut restored = GameManager::restore(saved).unwrap();
        assert!(restored.remove(6, 0).success);
    }

    #[test]
    fn rejects_grid_placed_disagreement() {
        let mut saved = played_match().save();
        saved.players[1].placed_pieces.pop();
        assert_eq!(
            GameManager::restore(saved).unwrap_err(),
            RestoreError::PlacedMismatch(PlayerId::Two)
        );
    }

    #[test]
    fn rejects_piece_on_non_playable_cell() {
        let mut saved = played_match().save();
        saved.grid[0][1] = Some(PlayerId::One);
        assert_eq!(
            GameManager::restore(saved).unwrap_err(),
            RestoreError::NonPlayableCell { row: 0, col: 1 }
        );
    }

    #[test]
    fn rejects_overfull_inventory() {
        let mut saved = played_match().save();
        saved.players[0].pieces = 9;
        assert_eq!(
            GameManager::restore(saved).unwrap_err(),
            RestoreError::TooManyPieces {
                player: PlayerId::One,
                total: 12,
                limit: 9
            }
        );
    }

    #[test]
    fn rejects_hands_out_of_turn() {
        let mut saved = played_match().save();
        // Player 1 owes a capture with an empty hand while player 2 holds 7.
        saved.players[0].pieces = 0;
        assert_eq!(
            GameManager::restore(saved).unwrap_err(),
            RestoreError::HandsOutOfTurn {
                to_move: PlayerId::One,
                hands: [0, 7]
            }
        );
    }

    #[test]
    fn rejects_pending_capture_without_target() {
        let mut saved = played_match().save();
        saved.grid[6] = [None; GRID_SIZE];
        saved.players[1].placed_pieces.clear();
        assert_eq!(
            GameManager::restore(saved).unwrap_err(),
            RestoreError::NothingToCapture(PlayerId::Two)
        );
    }

    #[test]
    fn rejects_opponent_that_disagrees_with_seat() {
        let mut saved = played_match().save();
        saved.opponent = Controller::Computer;
        assert_eq!(
            GameManager::restore(saved).unwrap_err(),
            RestoreError::OpponentMismatch {
                opponent: Controller::Computer,
                seat: Controller::Human
            }
        );
    }
}
