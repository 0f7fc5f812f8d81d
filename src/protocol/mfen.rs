//! MFEN (Morris FEN) encoding and decoding.
//!
//! MFEN is a one-token notation for a full match position: the variant,
//! the player on move, whether a capture is owed, the 24 cells, and both
//! hands.
//!
//! Format: `<variant>/<to_move><capture>/<cells>/<hand1>,<hand2>`
//!
//! - `variant` is `9mm` or `12mm`
//! - `to_move` is `1` or `2`; `capture` is `-` or `x`
//! - `cells` is 24 characters in point-id order: `.` empty, `1`, `2`
//!
//! Opening position of Nine Men's Morris:
//! `9mm/1-/......................../9,9`

use std::fmt;

use crate::board::{Board, Phase, PlayerId, Variant, ALL_POINTS, POINT_COUNT};
use crate::game::GameManager;
use crate::player::{Controller, Player};
use crate::movegen::legal_removals;
use crate::resolve::{check_game_over, determine_phase, hands_in_turn};

/// Errors that can occur during MFEN parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("expected 4 sections separated by '/', got {0}")]
    WrongSectionCount(usize),

    #[error("unknown variant '{0}'")]
    UnknownVariant(String),

    #[error("invalid side-to-move section: '{0}'")]
    InvalidSideToMove(String),

    #[error("expected {expected} cells, got {found}")]
    WrongCellCount { expected: usize, found: usize },

    #[error("invalid cell character: '{0}'")]
    InvalidCell(char),

    #[error("invalid hands section: '{0}'")]
    InvalidHands(String),

    #[error("player {player} holds {total} pieces, more than the {limit} of the variant")]
    TooManyPieces { player: PlayerId, total: usize, limit: u8 },

    #[error("hands {hands:?} cannot occur with player {to_move} on move")]
    HandsOutOfTurn { to_move: PlayerId, hands: [u8; 2] },

    #[error("capture pending but player {0} has no piece to capture")]
    NothingToCapture(PlayerId),
}

/// A decoded MFEN position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub board: Board,
    pub to_move: PlayerId,
    pub capture_pending: bool,
    /// Pieces in hand, indexed by `PlayerId::index`.
    pub hands: [u8; 2],
}

impl Position {
    pub fn of(game: &GameManager) -> Self {
        Position {
            board: *game.board(),
            to_move: game.current_player(),
            capture_pending: game.waiting_for_removal(),
            hands: game.players().each_ref().map(|p| p.pieces),
        }
    }

    pub fn variant(&self) -> Variant {
        self.board.variant()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: String = self
            .board
            .cells()
            .iter()
            .map(|c| c.map_or('.', PlayerId::mfen_char))
            .collect();
        write!(
            f,
            "{}/{}{}/{}/{},{}",
            self.variant().tag(),
            self.to_move.mfen_char(),
            if self.capture_pending { 'x' } else { '-' },
            cells,
            self.hands[0],
            self.hands[1]
        )
    }
}

/// Encodes the position of `game` as MFEN.
pub fn encode_mfen(game: &GameManager) -> String {
    Position::of(game).to_string()
}

fn parse_side_to_move(s: &str) -> Result<(PlayerId, bool), NotationError> {
    let invalid = || NotationError::InvalidSideToMove(s.to_string());
    let mut chars = s.chars();
    let (Some(who), Some(flag), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(invalid());
    };
    let to_move = match who {
        '1' => PlayerId::One,
        '2' => PlayerId::Two,
        _ => return Err(invalid()),
    };
    let capture = match flag {
        '-' => false,
        'x' => true,
        _ => return Err(invalid()),
    };
    Ok((to_move, capture))
}

fn parse_cells(s: &str, variant: Variant) -> Result<Board, NotationError> {
    let found = s.chars().count();
    if found != POINT_COUNT {
        return Err(NotationError::WrongCellCount {
            expected: POINT_COUNT,
            found,
        });
    }
    let mut board = Board::new(variant);
    for (p, c) in ALL_POINTS.into_iter().zip(s.chars()) {
        match c {
            '.' => {}
            '1' => board.place(p, PlayerId::One),
            '2' => board.place(p, PlayerId::Two),
            other => return Err(NotationError::InvalidCell(other)),
        }
    }
    Ok(board)
}

fn parse_hands(s: &str) -> Result<[u8; 2], NotationError> {
    let invalid = || NotationError::InvalidHands(s.to_string());
    let (a, b) = s.split_once(',').ok_or_else(invalid)?;
    let a = a.parse::<u8>().map_err(|_| invalid())?;
    let b = b.parse::<u8>().map_err(|_| invalid())?;
    Ok([a, b])
}

/// Parses an MFEN string into a `Position`.
pub fn parse_mfen(s: &str) -> Result<Position, NotationError> {
    let sections: Vec<&str> = s.trim().split('/').collect();
    if sections.len() != 4 {
        return Err(NotationError::WrongSectionCount(sections.len()));
    }
    let variant: Variant = sections[0]
        .parse()
        .map_err(|_| NotationError::UnknownVariant(sections[0].to_string()))?;
    let (to_move, capture_pending) = parse_side_to_move(sections[1])?;
    let board = parse_cells(sections[2], variant)?;
    let hands = parse_hands(sections[3])?;

    let limit = variant.pieces_per_player();
    for player in [PlayerId::One, PlayerId::Two] {
        let total = board.count(player) + hands[player.index()] as usize;
        if total > limit as usize {
            return Err(NotationError::TooManyPieces {
                player,
                total,
                limit,
            });
        }
    }
    if !hands_in_turn(hands, to_move, capture_pending) {
        return Err(NotationError::HandsOutOfTurn { to_move, hands });
    }
    if capture_pending && legal_removals(&board, to_move.opponent()).is_empty() {
        return Err(NotationError::NothingToCapture(to_move.opponent()));
    }

    Ok(Position {
        board,
        to_move,
        capture_pending,
        hands,
    })
}

impl GameManager {
    /// Starts a match from a decoded position. The phase and any winner are
    /// derived from the position; no computer action is played.
    pub fn from_position(position: &Position, opponent: Controller) -> Self {
        let board = position.board;
        let controllers = [Controller::Human, opponent];
        let players = [PlayerId::One, PlayerId::Two].map(|id| Player {
            id,
            pieces: position.hands[id.index()],
            placed_pieces: board.points_of(id).collect(),
            controller: controllers[id.index()],
        });
        let mut phase = determine_phase(&board, &players);
        let winner = if position.capture_pending {
            None
        } else {
            check_game_over(&board, &players, position.to_move)
        };
        if winner.is_some() {
            phase = Phase::GameOver;
        }
        GameManager::from_parts(
            board,
            players,
            position.to_move,
            phase,
            position.capture_pending,
            winner,
            opponent,
        )
    }
}
