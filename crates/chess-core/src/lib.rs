//! Core types for chess.
//!
//! This crate provides the fundamental types shared by the rule engine and
//! its front-ends:
//! - [`PieceKind`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for 1-based board coordinates
//! - [`Move`], [`CastleSide`] and [`Promotion`] for move requests
//! - FEN parsing and serialization

mod color;
mod error;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use error::ParseError;
pub use fen::{CastlingRights, Fen, FenError};
pub use mov::{CastleSide, Move, MoveFlag, Promotion};
pub use piece::PieceKind;
pub use square::{File, Rank, Square};
