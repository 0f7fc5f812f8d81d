//! Match state machine.
//!
//! A `GameManager` owns one match: the board, both players, whose turn it
//! is, the cached phase, and the pending-capture gate. Caller actions are
//! validated, applied, and answered with an `ActionResult`; a rejected action
//! leaves the match untouched.
//!
//! Turn flow:
//! - an action that closes a mill opens the capture gate and keeps the turn
//! - otherwise the phase is recomputed, the turn passes, and game over is
//!   checked for the player now on move
//! - if that player is computer-controlled it plays exactly one action
//!   before control returns; a mill it closes is resolved by a later
//!   `play_computer_turn`

pub mod result;
pub mod snapshot;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::board::{grid_coords, Action, Board, Phase, PlayerId, Point, Variant};
use crate::config::MatchConfig;
use crate::error::{RemovalFault, RuleError};
use crate::movegen::{self, can_fly, is_removable, legal_removals};
use crate::player::{Controller, Player};
use crate::resolve::{check_game_over, determine_phase};
use crate::search::decide_action;

pub use result::{ActionResult, BoardState, MatchView};
pub use snapshot::{RestoreError, SavedMatch, SavedPlayer};

/// Maps caller coordinates to a point. Coordinates outside the 7x7 grid are
/// `OutOfRange`; addressable but non-playable cells yield `invalid`.
fn resolve_point(row: i32, col: i32, invalid: RuleError) -> Result<Point, RuleError> {
    let (r, c) = grid_coords(row, col).ok_or(RuleError::OutOfRange { row, col })?;
    Point::from_coords(r, c).ok_or(invalid)
}

pub(crate) fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    }
}

/// One match of Nine or Twelve Men's Morris.
#[derive(Debug, Clone)]
pub struct GameManager {
    board: Board,
    players: [Player; 2],
    current: PlayerId,
    phase: Phase,
    waiting_for_removal: bool,
    winner: Option<PlayerId>,
    starting_player: PlayerId,
    opponent: Controller,
    rng: SmallRng,
}

impl GameManager {
    /// Starts a match with player 1 human and player 2 driven by `opponent`.
    pub fn setup(variant: Variant, starting_player: PlayerId, opponent: Controller) -> Self {
        Self::from_config(&MatchConfig::new(variant, starting_player, opponent))
    }

    pub fn from_config(config: &MatchConfig) -> Self {
        Self::with_controllers(config, [Controller::Human, config.opponent])
    }

    /// Starts a match with explicit controllers for both seats. If the
    /// starting player is computer-controlled its opening placement is
    /// played immediately.
    pub fn with_controllers(config: &MatchConfig, controllers: [Controller; 2]) -> Self {
        Self::new_match(
            config.variant,
            config.starting_player,
            controllers,
            seeded_rng(config.seed),
        )
    }

    fn new_match(
        variant: Variant,
        starting_player: PlayerId,
        controllers: [Controller; 2],
        rng: SmallRng,
    ) -> Self {
        let pieces = variant.pieces_per_player();
        let mut game = GameManager {
            board: Board::new(variant),
            players: [
                Player::new(PlayerId::One, pieces, controllers[0]),
                Player::new(PlayerId::Two, pieces, controllers[1]),
            ],
            current: starting_player,
            phase: Phase::Placing,
            waiting_for_removal: false,
            winner: None,
            starting_player,
            opponent: controllers[1],
            rng,
        };
        debug!(%variant, starting = %starting_player, opponent = %controllers[1], "match set up");
        if game.current_is_computer() {
            game.computer_step();
        }
        game
    }

    /// Assembles a match from already-validated state. The starting player
    /// is taken to be the player on move.
    pub(crate) fn from_parts(
        board: Board,
        players: [Player; 2],
        current: PlayerId,
        phase: Phase,
        waiting_for_removal: bool,
        winner: Option<PlayerId>,
        opponent: Controller,
    ) -> Self {
        GameManager {
            board,
            players,
            current,
            phase,
            waiting_for_removal,
            winner,
            starting_player: current,
            opponent,
            rng: seeded_rng(None),
        }
    }

    /// Replaces the whole match with a fresh one, keeping the starting
    /// player and the random source.
    pub fn reset(&mut self, variant: Variant, opponent: Controller) -> MatchView {
        let controllers = [self.players[0].controller, opponent];
        let rng = self.rng.clone();
        *self = Self::new_match(variant, self.starting_player, controllers, rng);
        self.state()
    }

    /// Reseeds the computer's random source.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn variant(&self) -> Variant {
        self.board.variant()
    }

    pub fn waiting_for_removal(&self) -> bool {
        self.waiting_for_removal
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn starting_player(&self) -> PlayerId {
        self.starting_player
    }

    pub fn opponent(&self) -> Controller {
        self.opponent
    }

    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    fn current_is_computer(&self) -> bool {
        self.players[self.current.index()].is_computer()
    }

    /// Every action the player on move may take. Empty once the match is over.
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.is_game_over() {
            return Vec::new();
        }
        movegen::legal_actions(
            &self.board,
            &self.players[self.current.index()],
            self.waiting_for_removal,
        )
    }

    pub fn state(&self) -> MatchView {
        MatchView {
            board: self.board_state(),
            current_player: self.current,
            phase: self.phase,
            variant: self.variant(),
            waiting_for_removal: self.waiting_for_removal,
            game_over: self.is_game_over(),
            winner: self.winner,
        }
    }

    pub fn board_state(&self) -> BoardState {
        BoardState::capture(&self.board, &self.players, self.current)
    }

    /// Places a piece from the current player's hand at (row, col).
    pub fn place(&mut self, row: i32, col: i32) -> ActionResult {
        self.caller_action(|game| {
            game.place_gate()?;
            let at = resolve_point(row, col, RuleError::InvalidPosition)?;
            Ok(Action::Place { at })
        })
    }

    /// Moves one of the current player's pieces.
    pub fn move_piece(&mut self, from_row: i32, from_col: i32, to_row: i32, to_col: i32) -> ActionResult {
        self.caller_action(|game| {
            game.move_gate()?;
            let from = resolve_point(from_row, from_col, RuleError::InvalidPosition)?;
            let to = resolve_point(to_row, to_col, RuleError::InvalidDestination)?;
            Ok(Action::Move { from, to })
        })
    }

    /// Captures the opponent piece at (row, col) after a mill.
    pub fn remove(&mut self, row: i32, col: i32) -> ActionResult {
        self.caller_action(|game| {
            game.remove_gate()?;
            let at = resolve_point(
                row,
                col,
                RuleError::IllegalRemoval {
                    reason: RemovalFault::NotOpponentPiece,
                },
            )?;
            Ok(Action::Remove { at })
        })
    }

    /// Applies an already-resolved action on behalf of the caller.
    pub fn apply_action(&mut self, action: Action) -> ActionResult {
        self.caller_action(|_| Ok(action))
    }

    /// Lets the computer act when it is on move: its opening placement, a
    /// capture owed after one of its mills, or any turn in a computer-only
    /// match. Plays exactly one action.
    pub fn play_computer_turn(&mut self) -> ActionResult {
        if self.is_game_over() {
            return self.game_over_result();
        }
        if !self.current_is_computer() {
            return self.failure(RuleError::NotComputerTurn);
        }
        match self.computer_step() {
            Some((action, mill)) => {
                let message = self.describe(action, mill);
                self.respond(true, mill, message, None, Some((action, mill)))
            }
            None => self.failure(RuleError::InvalidPhase { phase: self.phase }),
        }
    }

    fn caller_action(
        &mut self,
        build: impl FnOnce(&Self) -> Result<Action, RuleError>,
    ) -> ActionResult {
        if self.is_game_over() {
            return self.game_over_result();
        }
        if self.current_is_computer() {
            return self.failure(RuleError::ComputerToMove);
        }
        let action = match build(self).and_then(|action| self.validate(action).map(|()| action)) {
            Ok(action) => action,
            Err(error) => return self.failure(error),
        };
        debug!(player = %self.current, %action, "action accepted");
        let mill = self.apply(action);
        let message = self.describe(action, mill);

        let computer = if !self.is_game_over() && self.current_is_computer() {
            self.computer_step()
        } else {
            None
        };
        self.respond(true, mill, message, None, computer)
    }

    /// Asks the current player's strategy for an action and applies it.
    /// Returns the action and whether it closed a mill.
    fn computer_step(&mut self) -> Option<(Action, bool)> {
        let me = self.current;
        let decided = decide_action(
            &self.board,
            &self.players[me.index()],
            self.waiting_for_removal,
            &mut self.rng,
        );
        let Some(action) = decided else {
            warn!(player = %me, phase = %self.phase, "computer has no legal action");
            return None;
        };
        if let Err(error) = self.validate(action) {
            warn!(player = %me, %action, %error, "computer chose an illegal action");
            return None;
        }
        debug!(player = %me, %action, "computer plays");
        let mill = self.apply(action);
        Some((action, mill))
    }

    fn place_gate(&self) -> Result<(), RuleError> {
        if self.waiting_for_removal {
            return Err(RuleError::RemovalPending);
        }
        if self.phase != Phase::Placing || self.players[self.current.index()].hand_empty() {
            return Err(RuleError::InvalidPhase { phase: self.phase });
        }
        Ok(())
    }

    fn move_gate(&self) -> Result<(), RuleError> {
        if self.waiting_for_removal {
            return Err(RuleError::RemovalPending);
        }
        if self.phase == Phase::Placing {
            return Err(RuleError::InvalidPhase { phase: self.phase });
        }
        Ok(())
    }

    fn remove_gate(&self) -> Result<(), RuleError> {
        if !self.waiting_for_removal {
            return Err(RuleError::IllegalRemoval {
                reason: RemovalFault::NothingOwed,
            });
        }
        Ok(())
    }

    /// Checks `action` against the rules for the player on move.
    fn validate(&self, action: Action) -> Result<(), RuleError> {
        let me = self.current;
        match action {
            Action::Place { at } => {
                self.place_gate()?;
                if !self.board.is_empty(at) {
                    return Err(RuleError::InvalidPosition);
                }
            }
            Action::Move { from, to } => {
                self.move_gate()?;
                if self.board.occupant(from) != Some(me) {
                    return Err(RuleError::InvalidPosition);
                }
                if !self.board.is_empty(to) {
                    return Err(RuleError::InvalidDestination);
                }
                // Flying is per player, read from the board rather than the phase.
                if !can_fly(&self.board, me) && !self.board.is_adjacent(from, to) {
                    return Err(RuleError::InvalidDestination);
                }
            }
            Action::Remove { at } => {
                self.remove_gate()?;
                let victim = me.opponent();
                if self.board.occupant(at) != Some(victim) {
                    return Err(RuleError::IllegalRemoval {
                        reason: RemovalFault::NotOpponentPiece,
                    });
                }
                if !is_removable(&self.board, victim, at) {
                    return Err(RuleError::IllegalRemoval {
                        reason: RemovalFault::ProtectedByMill,
                    });
                }
            }
        }
        Ok(())
    }

    /// Applies a validated action. Returns true if it closed a mill.
    fn apply(&mut self, action: Action) -> bool {
        let me = self.current;
        match action {
            Action::Place { at } => {
                self.players[me.index()].place_piece(at);
                self.board.place(at, me);
                self.settle(at)
            }
            Action::Move { from, to } => {
                self.players[me.index()].move_piece(from, to);
                self.board.clear(from);
                self.board.place(to, me);
                self.settle(to)
            }
            Action::Remove { at } => {
                self.players[me.opponent().index()].remove_piece(at);
                self.board.clear(at);
                self.waiting_for_removal = false;
                self.end_turn();
                false
            }
        }
    }

    /// After a piece lands on `at`: open the capture gate if it closed a
    /// mill, otherwise end the turn.
    fn settle(&mut self, at: Point) -> bool {
        let me = self.current;
        if !self.board.forms_mill(at, me) {
            self.end_turn();
            return false;
        }
        if legal_removals(&self.board, me.opponent()).is_empty() {
            info!(player = %me, point = %at, "mill formed with nothing to capture");
            self.end_turn();
        } else {
            info!(player = %me, point = %at, "mill formed");
            self.waiting_for_removal = true;
        }
        true
    }

    fn end_turn(&mut self) {
        self.phase = determine_phase(&self.board, &self.players);
        self.current = self.current.opponent();
        if let Some(winner) = check_game_over(&self.board, &self.players, self.current) {
            info!(%winner, "game over");
            self.winner = Some(winner);
            self.phase = Phase::GameOver;
        }
    }

    fn describe(&self, action: Action, mill: bool) -> String {
        if let Some(winner) = self.winner {
            return format!("Game over: player {} wins", winner);
        }
        if mill && self.waiting_for_removal {
            return "Mill formed! Remove an opponent piece.".to_string();
        }
        match action {
            Action::Place { at } => format!("Piece placed at {}", at),
            Action::Move { from, to } => format!("Piece moved from {} to {}", from, to),
            Action::Remove { at } => format!("Piece removed at {}", at),
        }
    }

    fn respond(
        &self,
        success: bool,
        mill_formed: bool,
        message: String,
        error: Option<RuleError>,
        computer: Option<(Action, bool)>,
    ) -> ActionResult {
        ActionResult {
            success,
            mill_formed,
            message,
            error,
            board: self.board_state(),
            current_player: self.current,
            phase: self.phase,
            waiting_for_removal: self.waiting_for_removal,
            game_over: self.is_game_over(),
            winner: self.winner,
            computer_action: computer.map(|(action, _)| action),
            computer_mill_formed: computer.is_some_and(|(_, mill)| mill),
        }
    }

    fn failure(&self, error: RuleError) -> ActionResult {
        debug!(player = %self.current, %error, "action rejected");
        self.respond(false, false, error.to_string(), Some(error), None)
    }

    fn game_over_result(&self) -> ActionResult {
        let message = match self.winner {
            Some(winner) => format!("Game over: player {} wins", winner),
            None => "Game over".to_string(),
        };
        self.respond(false, false, message, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn human_match(variant: Variant) -> GameManager {
        GameManager::setup(variant, PlayerId::One, Controller::Human)
    }

    /// Places pieces alternately, asserting each placement succeeds.
    fn place_all(game: &mut GameManager, points: &[(i32, i32)]) {
        for &(r, c) in points {
            let result = game.place(r, c);
            assert!(result.success, "place ({}, {}): {}", r, c, result.message);
        }
    }

    #[test]
    fn setup_starts_in_placing() {
        let game = human_match(Variant::NineMen);
        assert_eq!(game.phase(), Phase::Placing);
        assert_eq!(game.current_player(), PlayerId::One);
        assert_eq!(game.player(PlayerId::One).pieces, 9);
        assert_eq!(game.player(PlayerId::Two).pieces, 9);
        assert!(!game.waiting_for_removal());

        let game = human_match(Variant::TwelveMen);
        assert_eq!(game.player(PlayerId::Two).pieces, 12);
    }

    #[test]
    fn placement_switches_turn() {
        let mut game = human_match(Variant::NineMen);
        let result = game.place(0, 0);
        assert!(result.success);
        assert!(!result.mill_formed);
        assert_eq!(result.current_player, PlayerId::Two);
        assert_eq!(result.board.player1_pieces, 8);
        assert_eq!(result.board.grid[0][0], Some(PlayerId::One));
        assert!(result.computer_action.is_none());
    }

    #[test]
    fn occupied_and_non_playable_points_are_invalid() {
        let mut game = human_match(Variant::NineMen);
        place_all(&mut game, &[(0, 0)]);
        let result = game.place(0, 0);
        assert_eq!(result.error, Some(RuleError::InvalidPosition));
        let result = game.place(0, 1);
        assert_eq!(result.error, Some(RuleError::InvalidPosition));
        let result = game.place(7, 0);
        assert_eq!(result.error, Some(RuleError::OutOfRange { row: 7, col: 0 }));
        let result = game.place(-1, 3);
        assert_eq!(result.error, Some(RuleError::OutOfRange { row: -1, col: 3 }));
        assert_eq!(game.player(PlayerId::Two).pieces, 9);
    }

    #[test]
    fn mill_keeps_turn_and_requires_removal() {
        let mut game = human_match(Variant::NineMen);
        place_all(&mut game, &[(0, 0), (6, 0), (0, 3), (6, 6)]);
        let result = game.place(0, 6);
        assert!(result.success);
        assert!(result.mill_formed);
        assert!(result.waiting_for_removal);
        assert_eq!(result.current_player, PlayerId::One);

        assert_eq!(game.place(3, 0).error, Some(RuleError::RemovalPending));
        assert_eq!(
            game.remove(0, 3).error,
            Some(RuleError::IllegalRemoval {
                reason: RemovalFault::NotOpponentPiece
            })
        );

        let result = game.remove(6, 0);
        assert!(result.success);
        assert!(!result.waiting_for_removal);
        assert_eq!(result.current_player, PlayerId::Two);
        assert_eq!(result.board.grid[6][0], None);
        assert!(!game.player(PlayerId::Two).placed_pieces.contains(&Point::at(6, 0)));
    }

    #[test]
    fn remove_without_mill_is_rejected() {
        let mut game = human_match(Variant::NineMen);
        place_all(&mut game, &[(0, 0), (6, 0)]);
        assert_eq!(
            game.remove(6, 0).error,
            Some(RuleError::IllegalRemoval {
                reason: RemovalFault::NothingOwed
            })
        );
    }

    #[test]
    fn move_during_placing_is_invalid_phase() {
        let mut game = human_match(Variant::NineMen);
        place_all(&mut game, &[(0, 0), (6, 0)]);
        let result = game.move_piece(0, 0, 0, 3);
        assert!(!result.success);
        assert_eq!(
            result.error,
            Some(RuleError::InvalidPhase {
                phase: Phase::Placing
            })
        );
        assert_eq!(game.board().occupant(Point::at(0, 0)), Some(PlayerId::One));
    }

    #[test]
    fn diagonal_mill_only_in_twelve_men() {
        let mut game = human_match(Variant::TwelveMen);
        place_all(&mut game, &[(0, 0), (6, 3), (1, 1), (3, 6)]);
        let result = game.place(2, 2);
        assert!(result.mill_formed);

        let mut game = human_match(Variant::NineMen);
        place_all(&mut game, &[(0, 0), (6, 3), (1, 1), (3, 6)]);
        let result = game.place(2, 2);
        assert!(!result.mill_formed);
        assert_eq!(result.current_player, PlayerId::Two);
    }

    #[test]
    fn computer_answers_each_human_placement() {
        let mut game = GameManager::from_config(
            &MatchConfig::new(Variant::NineMen, PlayerId::One, Controller::Computer).with_seed(3),
        );
        let result = game.place(0, 0);
        assert!(result.success);
        assert!(matches!(result.computer_action, Some(Action::Place { .. })));
        assert_eq!(result.current_player, PlayerId::One);
        assert_eq!(result.board.player2_pieces, 8);
        assert_eq!(game.board().count(PlayerId::Two), 1);
    }

    #[test]
    fn computer_blocks_open_line() {
        let mut game = GameManager::from_config(
            &MatchConfig::new(Variant::NineMen, PlayerId::One, Controller::Computer).with_seed(5),
        );
        game.place(0, 0);
        // The reply took at most one of the two lines through (0, 0); build
        // two in a row on the other and expect the third point blocked.
        let top_row_free = game.board().is_empty(Point::at(0, 3)) && game.board().is_empty(Point::at(0, 6));
        let (second, block) = if top_row_free {
            ((0, 3), Point::at(0, 6))
        } else {
            ((3, 0), Point::at(6, 0))
        };
        let result = game.place(second.0, second.1);
        assert!(result.success);
        assert_eq!(result.computer_action, Some(Action::Place { at: block }));
    }

    #[test]
    fn computer_start_plays_opening_placement() {
        let game = GameManager::from_config(
            &MatchConfig::new(Variant::NineMen, PlayerId::Two, Controller::Computer).with_seed(1),
        );
        assert_eq!(game.current_player(), PlayerId::One);
        assert_eq!(game.board().count(PlayerId::Two), 1);
        assert_eq!(game.player(PlayerId::Two).pieces, 8);
    }

    #[test]
    fn play_computer_turn_rejected_for_human() {
        let mut game = human_match(Variant::NineMen);
        let result = game.play_computer_turn();
        assert_eq!(result.error, Some(RuleError::NotComputerTurn));
    }

    #[test]
    fn reset_keeps_starting_player() {
        let mut game = GameManager::setup(Variant::NineMen, PlayerId::Two, Controller::Human);
        place_all(&mut game, &[(0, 0), (3, 1)]);
        let view = game.reset(Variant::TwelveMen, Controller::Human);
        assert_eq!(view.variant, Variant::TwelveMen);
        assert_eq!(view.current_player, PlayerId::Two);
        assert_eq!(view.board.player1_pieces, 12);
        assert_eq!(game.starting_player(), PlayerId::Two);
        assert_eq!(game.board().count(PlayerId::One), 0);
    }

    #[test]
    fn legal_actions_follow_the_gate() {
        let mut game = human_match(Variant::NineMen);
        assert_eq!(game.legal_actions().len(), 24);
        place_all(&mut game, &[(0, 0), (6, 0), (0, 3), (6, 6)]);
        game.place(0, 6);
        let actions = game.legal_actions();
        assert_eq!(actions.len(), 2);
        assert!(actions.iter().all(|a| matches!(a, Action::Remove { .. })));
    }
}
