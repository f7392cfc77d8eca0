//! Two-player chess rule engine.
//!
//! This crate provides:
//! - [`Board`] - 8x8 grid of cells holding [`Piece`]s by value
//! - [`can_move_to`] - per-piece movement rules, ignoring king safety
//! - [`is_attacked`] / [`is_checkmate`] - check and checkmate detection
//! - [`Game`] - turn order, castling, promotion and rollback of moves that
//!   would expose the mover's king
//! - [`session::play`] - turn loop driven by a [`Controller`]
//!
//! # Architecture
//!
//! Every move is played on the live board after taking a snapshot. If the
//! mover's king ends up attacked the snapshot is restored, otherwise the move
//! stands. Check detection asks whether any enemy piece could move onto the
//! king's square, so the movement rules are the single source of truth for
//! both legality and attacks.
//!
//! # Example
//!
//! ```
//! use chess_core::{Color, Move, Square};
//! use chess_engine::Game;
//!
//! let mut game = Game::new();
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let e4 = Square::from_algebraic("e4").unwrap();
//!
//! let report = game.make_move(Move::normal(e2, e4)).unwrap();
//! assert_eq!(report.description, "White Pawn at E2 moved to E4");
//! assert_eq!(game.side_to_move(), Color::Black);
//! ```

mod board;
mod detect;
mod execute;
mod game;
mod legality;
pub mod session;

pub use board::{Board, Cell, Piece};
pub use detect::{find_king_safe_move, has_any_legal_move, is_attacked, is_checkmate};
pub use execute::{castle, promote, relocate, Relocation};
pub use game::{CastleBlock, Game, GameStatus, MoveError, MoveReport, SetupError};
pub use legality::{can_move_to, piece_can_move_to};
pub use session::{Controller, Destination, Outcome, SessionError, SessionOptions};
