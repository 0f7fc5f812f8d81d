//! Legal move generation.
//!
//! Generates the legal actions for the player on move: placements while
//! pieces remain in hand, slides or flights afterwards, and captures when a
//! mill has just been closed.

pub mod movement;
pub mod placement;
pub mod removal;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Action, Board};
use crate::player::Player;

pub use movement::{can_fly, has_valid_moves, is_legal_move, legal_destinations, legal_moves};
pub use placement::legal_placements;
pub use removal::{all_pieces_in_mills, is_removable, legal_removals};

/// Every legal action for `player`.
///
/// When `removal_pending` is set only captures of the opponent's pieces are
/// returned; otherwise placements if the hand is not empty, else moves.
pub fn legal_actions(board: &Board, player: &Player, removal_pending: bool) -> Vec<Action> {
    if removal_pending {
        return legal_removals(board, player.id.opponent())
            .into_iter()
            .map(|at| Action::Remove { at })
            .collect();
    }
    if !player.hand_empty() {
        return legal_placements(board)
            .into_iter()
            .map(|at| Action::Place { at })
            .collect();
    }
    legal_moves(board, player.id)
        .into_iter()
        .map(|(from, to)| Action::Move { from, to })
        .collect()
}

/// Picks one legal action uniformly at random, or `None` if there is none.
pub fn random_action(
    board: &Board,
    player: &Player,
    removal_pending: bool,
    rng: &mut impl Rng,
) -> Option<Action> {
    legal_actions(board, player, removal_pending)
        .choose(rng)
        .copied()
}
