//! Check and terminal-state queries.
//!
//! These recompute from the board every time. [`GameState`] caches the same
//! answers on construction, so prefer its accessors inside hot loops.

use crate::movegen::{has_legal_move, is_king_attacked, is_square_attacked};
use crate::{Board, GameState};
use chess_core::{Color, Square};

/// Returns true if `sq` is attacked by the side opposing `defender`.
pub fn square_under_attack(sq: Square, board: &Board, defender: Color) -> bool {
    is_square_attacked(board, sq, defender.opposite())
}

/// Returns true if the side to move is in check.
pub fn is_in_check(state: &GameState) -> bool {
    is_king_attacked(state.board(), state.side_to_move())
}

/// Returns true if the side to move is in check and has no legal move.
pub fn is_checkmate(state: &GameState) -> bool {
    is_in_check(state) && !has_legal_move(state.board(), state.side_to_move())
}

/// Returns true if the side to move is not in check and has no legal move.
pub fn is_stalemate(state: &GameState) -> bool {
    !is_in_check(state) && !has_legal_move(state.board(), state.side_to_move())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_is_quiet() {
        let state = GameState::initial();
        assert!(!is_in_check(&state));
        assert!(!is_checkmate(&state));
        assert!(!is_stalemate(&state));
    }

    #[test]
    fn king_and_queen_stalemate() {
        let state = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(is_stalemate(&state));
        assert!(!is_checkmate(&state));
        assert!(!is_in_check(&state));
    }

    #[test]
    fn check_that_can_be_escaped() {
        let state = GameState::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").unwrap();
        assert!(is_in_check(&state));
        assert!(!is_checkmate(&state));
        assert!(!is_stalemate(&state));
    }

    #[test]
    fn fresh_queries_agree_with_cached_flags() {
        for fen in [
            "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1",
            "R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        ] {
            let state = GameState::from_fen(fen).unwrap();
            assert_eq!(is_in_check(&state), state.is_check());
            assert_eq!(is_checkmate(&state), state.is_checkmate());
            assert_eq!(is_stalemate(&state), state.is_stalemate());
        }
    }

    #[test]
    fn attack_seen_from_defender() {
        let board = Board::standard();
        assert!(square_under_attack(
            Square::from_algebraic("f6").unwrap(),
            &board,
            Color::White
        ));
        assert!(!square_under_attack(
            Square::from_algebraic("f3").unwrap(),
            &board,
            Color::White
        ));
    }
}
