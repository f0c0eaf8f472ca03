//! Static position evaluation.
//!
//! Scores are integers in tenths of a pawn, positive when white is better.

use chess_core::{Color, Square};
use chess_engine::{generate_moves, Board, GameState};

/// Evaluation score in tenths of a pawn.
pub type Score = i32;

/// Tenths per material point.
const MATERIAL_SCALE: Score = 10;

/// Bonus per legal move of difference between the sides.
const MOBILITY_WEIGHT: Score = 1;

/// Bonus per occupied center square.
const CENTER_WEIGHT: Score = 1;

/// Penalty for the side to move being in check.
const CHECK_PENALTY: Score = 5;

/// Returns true for d5, e5, d4 and e4.
#[inline]
pub fn is_center(sq: Square) -> bool {
    (3..=4).contains(&sq.row()) && (3..=4).contains(&sq.col())
}

/// Evaluates a state from white's point of view.
///
/// Material, plus the difference in legal move counts, plus center
/// occupancy, minus a penalty for whichever side is to move in check.
/// Terminal states get no special treatment.
pub fn evaluate(state: &GameState) -> Score {
    let board = state.board();
    let mut score = material(board) + mobility(board) + center_control(board);
    if state.is_check() {
        score -= CHECK_PENALTY * state.side_to_move().sign();
    }
    score
}

/// Material balance: pawn 1, knight 3, bishop 3, rook 5, queen 9.
pub fn material(board: &Board) -> Score {
    board
        .pieces()
        .map(|(_, piece)| piece.kind.value() * piece.color.sign() * MATERIAL_SCALE)
        .sum()
}

/// White's legal move count minus black's, regardless of whose turn it is.
pub fn mobility(board: &Board) -> Score {
    let white = generate_moves(board, Color::White).len() as Score;
    let black = generate_moves(board, Color::Black).len() as Score;
    (white - black) * MOBILITY_WEIGHT
}

/// One point per center square held, counted for either side.
pub fn center_control(board: &Board) -> Score {
    Square::all()
        .filter(|&sq| is_center(sq))
        .filter_map(|sq| board.get(sq))
        .map(|piece| piece.color.sign() * CENTER_WEIGHT)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_engine::apply_move;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn center_squares() {
        let names: Vec<String> = Square::all()
            .filter(|&s| is_center(s))
            .map(|s| s.to_algebraic())
            .collect();
        assert_eq!(names, vec!["d5", "e5", "d4", "e4"]);
    }

    #[test]
    fn start_position_is_balanced() {
        assert_eq!(evaluate(&GameState::initial()), 0);
    }

    #[test]
    fn king_pawn_opening() {
        let state = apply_move(&GameState::initial(), sq("e2"), sq("e4")).unwrap();
        // 30 white moves against 20, plus the pawn on e4.
        assert_eq!(mobility(state.board()), 10);
        assert_eq!(center_control(state.board()), 1);
        assert_eq!(evaluate(&state), 11);
    }

    #[test]
    fn material_counts_tenths() {
        let state = GameState::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        assert_eq!(material(state.board()), 90);
        let state = GameState::from_fen("r3k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(material(state.board()), -50);
    }

    #[test]
    fn check_penalises_side_to_move() {
        let white_checked = GameState::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").unwrap();
        let board = white_checked.board();
        let base = material(board) + mobility(board) + center_control(board);
        assert_eq!(evaluate(&white_checked), base - 5);

        let black_checked = GameState::from_fen("R3k3/8/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        let board = black_checked.board();
        let base = material(board) + mobility(board) + center_control(board);
        assert_eq!(evaluate(&black_checked), base + 5);
    }

    #[test]
    fn mirrored_positions_negate() {
        let white = GameState::from_fen("4k3/8/8/8/3N4/8/8/4K3 w - - 0 1").unwrap();
        let black = GameState::from_fen("4k3/8/8/3n4/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(evaluate(&white), -evaluate(&black));
    }
}
