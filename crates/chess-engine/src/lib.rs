//! Chess rules engine on a mailbox board.
//!
//! This crate provides:
//! - [`Board`] - 8x8 grid of optional pieces
//! - [`GameState`] - immutable snapshot with the side to move and cached
//!   check, checkmate and stalemate flags
//! - [`Game`] - snapshot history with undo
//! - [`RuleSet`] - trait bundling the rules, implemented by [`StandardChess`]
//! - Legal move generation, move application and attack detection
//!
//! # Architecture
//!
//! Attack detection looks outward from the target square and treats the
//! king as plain adjacency, so it never calls move generation. Move
//! generation produces candidates per piece and drops those that leave the
//! mover's king attacked on a scratch board. Terminal detection then only
//! needs to know whether any legal move exists.
//!
//! # Example
//!
//! ```
//! use chess_core::Square;
//! use chess_engine::{apply_move, legal_moves, GameState};
//!
//! let state = GameState::initial();
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let e4 = Square::from_algebraic("e4").unwrap();
//! assert!(legal_moves(e2, &state).contains(&e4));
//!
//! let next = apply_move(&state, e2, e4).unwrap();
//! assert_eq!(
//!     next.to_fen(),
//!     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
//! );
//! ```

mod board;
mod error;
mod game;
pub mod movegen;
pub mod rules;
mod state;
mod status;
mod transition;

pub use board::{initialize_board, Board};
pub use error::{MoveError, StateError};
pub use game::Game;
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{
    generate_moves, has_legal_move, is_king_attacked, is_square_attacked, legal_moves,
    legal_targets, pseudo_legal_targets, MoveList,
};
pub use rules::{DrawReason, GameResult, RuleSet, StandardChess};
pub use state::GameState;
pub use status::{is_checkmate, is_in_check, is_stalemate, square_under_attack};
pub use transition::{apply_move, apply_move_unchecked};

/// The standard starting position in FEN.
pub const STARTPOS: &str = chess_core::FenParser::STARTPOS;
