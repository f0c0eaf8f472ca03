//! Property tests driving random legal playouts from the starting position.

use chess_core::{Color, PieceKind};
use chess_engine::{
    apply_move, is_checkmate, is_in_check, is_stalemate, legal_moves, GameState,
};
use proptest::prelude::*;

/// Plays up to `choices.len()` plies, picking each move by index into the
/// legal move list, and returns every state visited.
fn playout(choices: &[usize]) -> Vec<GameState> {
    let mut states = vec![GameState::initial()];
    for &choice in choices {
        let current = &states[states.len() - 1];
        let moves = current.legal_moves();
        if moves.is_empty() {
            break;
        }
        let m = moves[choice % moves.len()];
        let next = apply_move(current, m.from(), m.to()).unwrap();
        states.push(next);
    }
    states
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn terminal_flags_are_consistent(choices in prop::collection::vec(any::<usize>(), 0..60)) {
        for state in playout(&choices) {
            prop_assert!(!(state.is_checkmate() && state.is_stalemate()));
            if state.is_checkmate() {
                prop_assert!(state.is_check());
            }
            if state.is_terminal() {
                prop_assert!(state.legal_moves().is_empty());
            } else {
                prop_assert!(!state.legal_moves().is_empty());
            }
            prop_assert_eq!(is_in_check(&state), state.is_check());
            prop_assert_eq!(is_checkmate(&state), state.is_checkmate());
            prop_assert_eq!(is_stalemate(&state), state.is_stalemate());
        }
    }

    #[test]
    fn each_side_keeps_one_king(choices in prop::collection::vec(any::<usize>(), 0..60)) {
        for state in playout(&choices) {
            for color in Color::ALL {
                prop_assert_eq!(state.board().count(PieceKind::King, color), 1);
            }
        }
    }

    #[test]
    fn side_not_to_move_is_never_in_check(choices in prop::collection::vec(any::<usize>(), 0..60)) {
        for state in playout(&choices) {
            let waiting = state.side_to_move().opposite();
            prop_assert!(!chess_engine::is_king_attacked(state.board(), waiting));
        }
    }

    #[test]
    fn applying_a_move_leaves_the_prior_snapshot_alone(
        choices in prop::collection::vec(any::<usize>(), 0..40),
        last in any::<usize>(),
    ) {
        let states = playout(&choices);
        let current = &states[states.len() - 1];
        let moves = current.legal_moves();
        prop_assume!(!moves.is_empty());

        let before = current.clone();
        let m = moves[last % moves.len()];
        let next = apply_move(current, m.from(), m.to()).unwrap();

        prop_assert_eq!(current, &before);
        prop_assert_ne!(next.board(), before.board());
        prop_assert_eq!(next.side_to_move(), before.side_to_move().opposite());
    }

    #[test]
    fn legal_moves_agree_with_state_move_list(
        choices in prop::collection::vec(any::<usize>(), 0..40)
    ) {
        let states = playout(&choices);
        let state = &states[states.len() - 1];
        let per_square: usize = state
            .board()
            .pieces_of(state.side_to_move())
            .map(|(sq, _)| legal_moves(sq, state).len())
            .sum();
        prop_assert_eq!(per_square, state.legal_moves().len());
    }

    #[test]
    fn fen_round_trip_preserves_position(choices in prop::collection::vec(any::<usize>(), 0..40)) {
        let states = playout(&choices);
        let state = &states[states.len() - 1];
        let reparsed = GameState::from_fen(&state.to_fen()).unwrap();
        prop_assert_eq!(reparsed.to_fen(), state.to_fen());
        prop_assert_eq!(reparsed.legal_moves().len(), state.legal_moves().len());
    }
}

#[test]
fn serde_json_round_trip_after_playout() {
    let states = playout(&[3, 17, 5, 8, 11, 2, 29, 4]);
    let state = &states[states.len() - 1];
    let json = serde_json::to_string(state).unwrap();
    let back: GameState = serde_json::from_str(&json).unwrap();
    assert_eq!(&back, state);
}
