//! Move execution.
//!
//! These functions mutate the board unconditionally. Callers validate moves
//! first and own the snapshot needed to undo them.

use chess_core::{CastleSide, Color, PieceKind, Promotion, Square};

use crate::board::{Board, Piece};

/// The result of relocating a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relocation {
    /// The piece as it stands after the move.
    pub moved: Piece,
    /// The enemy piece removed from the destination, if any.
    pub captured: Option<Piece>,
}

/// Moves the piece on `from` to `to`, capturing whatever stands there.
///
/// The vacated cell keeps the shade the piece carried, and the piece takes
/// over the shade of its destination. Returns `None` if `from` is empty.
pub fn relocate(board: &mut Board, from: Square, to: Square) -> Option<Relocation> {
    let mut piece = board.take(from)?;
    let captured = board.piece_at(to).copied();

    piece.square = to;
    piece.has_moved = true;
    board.place(piece);

    let moved = *board.piece_at(to)?;
    Some(Relocation { moved, captured })
}

/// Moves king and rook to their castled squares.
///
/// Returns `None`, leaving the board untouched, if either piece is missing
/// from its origin square.
pub fn castle(board: &mut Board, color: Color, side: CastleSide) -> Option<(Piece, Piece)> {
    let king_from = CastleSide::king_origin(color);
    let rook_from = side.rook_origin(color);
    if board.piece_at(king_from)?.kind != PieceKind::King
        || board.piece_at(rook_from)?.kind != PieceKind::Rook
    {
        return None;
    }

    let king = relocate(board, king_from, side.king_target(color))?;
    let rook = relocate(board, rook_from, side.rook_target(color))?;
    Some((king.moved, rook.moved))
}

/// Replaces the pawn on `sq` with a freshly made piece of the chosen kind.
///
/// The new piece keeps the pawn's color, square and shade and counts as
/// moved. Returns `None` if `sq` does not hold a pawn.
pub fn promote(board: &mut Board, sq: Square, promotion: Promotion) -> Option<Piece> {
    let pawn = *board.piece_at(sq)?;
    if pawn.kind != PieceKind::Pawn {
        return None;
    }

    let promoted = Piece {
        kind: promotion.piece_kind(),
        has_moved: true,
        ..pawn
    };
    board.replace(promoted);
    Some(promoted)
}
