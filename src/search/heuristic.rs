//! Heuristic computer opponent.
//!
//! Each decision applies a fixed priority and takes the first match:
//! close a mill for ourselves, else occupy the point that would close a mill
//! for the opponent, else fall back (random for placements and captures,
//! first enumerated for moves). All probes are pure reads of the board or of
//! a throwaway copy.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::board::{Action, Board, PlayerId, Point};
use crate::movegen::{legal_moves, legal_placements, legal_removals};
use crate::player::Player;

/// Chooses where `me` places its next piece.
///
/// Returns `None` only when the board has no empty point.
pub fn decide_placement(board: &Board, me: PlayerId, rng: &mut impl Rng) -> Option<Point> {
    let empty = legal_placements(board);

    if let Some(&p) = empty.iter().find(|&&p| board.forms_mill(p, me)) {
        debug!(player = %me, point = %p, "placement closes a mill");
        return Some(p);
    }

    let opponent = me.opponent();
    if let Some(&p) = empty.iter().find(|&&p| board.forms_mill(p, opponent)) {
        debug!(player = %me, point = %p, "placement blocks an opponent mill");
        return Some(p);
    }

    empty.choose(rng).copied()
}

/// Chooses a (from, to) move for `me`, flying if it has exactly three
/// pieces on the board.
///
/// Returns `None` when no legal move exists.
pub fn decide_move(board: &Board, me: PlayerId) -> Option<(Point, Point)> {
    let moves = legal_moves(board, me);

    if let Some(&(from, to)) = moves
        .iter()
        .find(|&&(from, to)| board.forms_mill_after_move(from, to, me))
    {
        debug!(player = %me, %from, %to, "move closes a mill");
        return Some((from, to));
    }

    let opponent = me.opponent();
    if let Some(&(from, to)) = moves.iter().find(|&&(_, to)| board.forms_mill(to, opponent)) {
        debug!(player = %me, %from, %to, "move blocks an opponent mill");
        return Some((from, to));
    }

    moves.first().copied()
}

/// Chooses which of `victim`'s pieces to capture.
///
/// Pieces outside mills are preferred; if every piece is in a mill, any
/// piece is eligible. Returns `None` when `victim` has no pieces.
pub fn decide_removal(board: &Board, victim: PlayerId, rng: &mut impl Rng) -> Option<Point> {
    legal_removals(board, victim).choose(rng).copied()
}

/// Chooses the next action for `player`.
pub fn decide_action(
    board: &Board,
    player: &Player,
    removal_pending: bool,
    rng: &mut impl Rng,
) -> Option<Action> {
    if removal_pending {
        return decide_removal(board, player.id.opponent(), rng).map(|at| Action::Remove { at });
    }
    if !player.hand_empty() {
        return decide_placement(board, player.id, rng).map(|at| Action::Place { at });
    }
    decide_move(board, player.id).map(|(from, to)| Action::Move { from, to })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Variant, ALL_POINTS};
    use crate::movegen::all_pieces_in_mills;
    use crate::player::Controller;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pt(row: u8, col: u8) -> Point {
        Point::at(row, col)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn board_with(variant: Variant, pieces: &[((u8, u8), PlayerId)]) -> Board {
        let mut board = Board::new(variant);
        for &((r, c), who) in pieces {
            board.place(pt(r, c), who);
        }
        board
    }

    #[test]
    fn placement_prioritizes_own_mill() {
        let board = board_with(Variant::NineMen, &[((0, 0), PlayerId::Two), ((0, 3), PlayerId::Two)]);
        assert_eq!(decide_placement(&board, PlayerId::Two, &mut rng()), Some(pt(0, 6)));
    }

    #[test]
    fn placement_blocks_opponent_mill() {
        let board = board_with(Variant::NineMen, &[((0, 0), PlayerId::One), ((0, 3), PlayerId::One)]);
        assert_eq!(decide_placement(&board, PlayerId::Two, &mut rng()), Some(pt(0, 6)));
    }

    #[test]
    fn own_mill_beats_block() {
        let board = board_with(
            Variant::NineMen,
            &[
                ((0, 0), PlayerId::One),
                ((0, 3), PlayerId::One),
                ((6, 0), PlayerId::Two),
                ((6, 3), PlayerId::Two),
            ],
        );
        assert_eq!(decide_placement(&board, PlayerId::Two, &mut rng()), Some(pt(6, 6)));
    }

    #[test]
    fn placement_falls_back_to_an_empty_point() {
        let board = Board::new(Variant::NineMen);
        let p = decide_placement(&board, PlayerId::Two, &mut rng()).unwrap();
        assert!(board.is_empty(p));
    }

    #[test]
    fn placement_none_on_full_board() {
        let mut board = Board::new(Variant::TwelveMen);
        for (i, p) in ALL_POINTS.iter().enumerate() {
            board.place(*p, if i % 2 == 0 { PlayerId::One } else { PlayerId::Two });
        }
        assert_eq!(board.empty_points().count(), 0);
        assert_eq!(decide_placement(&board, PlayerId::Two, &mut rng()), None);
    }

    #[test]
    fn move_forms_mill() {
        // (0,3) and (0,6) held; (3,0) can slide up to (0,0).
        let board = board_with(
            Variant::NineMen,
            &[
                ((0, 3), PlayerId::Two),
                ((0, 6), PlayerId::Two),
                ((3, 0), PlayerId::Two),
                ((5, 5), PlayerId::Two),
                ((1, 1), PlayerId::One),
            ],
        );
        assert_eq!(decide_move(&board, PlayerId::Two), Some((pt(3, 0), pt(0, 0))));
    }

    #[test]
    fn move_blocks_opponent_mill() {
        // Player One threatens (0,3); Two's piece at (1,3) can step up to block.
        let board = board_with(
            Variant::NineMen,
            &[
                ((0, 0), PlayerId::One),
                ((0, 6), PlayerId::One),
                ((3, 1), PlayerId::One),
                ((1, 3), PlayerId::Two),
                ((5, 1), PlayerId::Two),
                ((5, 5), PlayerId::Two),
                ((6, 6), PlayerId::Two),
            ],
        );
        assert_eq!(decide_move(&board, PlayerId::Two), Some((pt(1, 3), pt(0, 3))));
    }

    #[test]
    fn flying_move_closes_distant_mill() {
        let board = board_with(
            Variant::NineMen,
            &[
                ((0, 0), PlayerId::Two),
                ((0, 3), PlayerId::Two),
                ((4, 4), PlayerId::Two),
                ((2, 2), PlayerId::One),
            ],
        );
        // Three pieces: (4,4) flies to (0,6).
        assert_eq!(decide_move(&board, PlayerId::Two), Some((pt(4, 4), pt(0, 6))));
    }

    #[test]
    fn move_none_when_blocked() {
        let board = board_with(
            Variant::NineMen,
            &[
                ((0, 0), PlayerId::Two),
                ((0, 6), PlayerId::Two),
                ((6, 0), PlayerId::Two),
                ((6, 6), PlayerId::Two),
                ((0, 3), PlayerId::One),
                ((3, 0), PlayerId::One),
                ((3, 6), PlayerId::One),
                ((6, 3), PlayerId::One),
            ],
        );
        assert_eq!(decide_move(&board, PlayerId::Two), None);
    }

    #[test]
    fn removal_prefers_pieces_outside_mills() {
        let board = board_with(
            Variant::NineMen,
            &[
                ((0, 0), PlayerId::One),
                ((0, 3), PlayerId::One),
                ((0, 6), PlayerId::One),
                ((4, 3), PlayerId::One),
            ],
        );
        for seed in 0..20 {
            let mut r = StdRng::seed_from_u64(seed);
            assert_eq!(decide_removal(&board, PlayerId::One, &mut r), Some(pt(4, 3)));
        }
    }

    #[test]
    fn removal_takes_mill_piece_when_all_in_mills() {
        let board = board_with(
            Variant::NineMen,
            &[((0, 0), PlayerId::One), ((0, 3), PlayerId::One), ((0, 6), PlayerId::One)],
        );
        assert!(all_pieces_in_mills(&board, PlayerId::One));
        let p = decide_removal(&board, PlayerId::One, &mut rng()).unwrap();
        assert_eq!(board.occupant(p), Some(PlayerId::One));
    }

    #[test]
    fn decide_action_dispatches_on_state() {
        let board = board_with(Variant::NineMen, &[((2, 3), PlayerId::One)]);
        let mut player = Player::new(PlayerId::Two, 3, Controller::Computer);
        assert!(matches!(
            decide_action(&board, &player, false, &mut rng()),
            Some(Action::Place { .. })
        ));
        assert_eq!(
            decide_action(&board, &player, true, &mut rng()),
            Some(Action::Remove { at: pt(2, 3) })
        );
        player.pieces = 0;
        assert_eq!(decide_action(&board, &player, false, &mut rng()), None);
    }
}
