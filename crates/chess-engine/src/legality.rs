//! Per-piece movement rules.
//!
//! These predicates answer whether a piece may move to a square given the
//! current board, ignoring whether the move would leave its own king in
//! check. King safety is layered on top by [`Game`](crate::Game).

use chess_core::{PieceKind, Square};

use crate::board::{Board, Piece};

/// Returns true if the piece on `from` may move to `to`, ignoring king safety.
///
/// Returns false when `from` is empty. Castling is not a move of this kind;
/// see [`Game::castle`](crate::Game::castle).
pub fn can_move_to(board: &Board, from: Square, to: Square) -> bool {
    match board.piece_at(from) {
        Some(piece) => piece_can_move_to(board, piece, to),
        None => false,
    }
}

/// Returns true if `piece` may move to `to`, ignoring king safety.
pub fn piece_can_move_to(board: &Board, piece: &Piece, to: Square) -> bool {
    let from = piece.square;
    if to == from {
        return false;
    }
    if board
        .piece_at(to)
        .is_some_and(|target| target.color == piece.color)
    {
        return false;
    }

    let df = to.file_index() as i8 - from.file_index() as i8;
    let dr = to.rank_index() as i8 - from.rank_index() as i8;

    let shape_fits = match piece.kind {
        PieceKind::Pawn => return pawn_can_move(board, piece, to, df, dr),
        PieceKind::Rook => is_straight(df, dr),
        PieceKind::Knight => matches!((df.abs(), dr.abs()), (1, 2) | (2, 1)),
        PieceKind::Bishop => is_diagonal(df, dr),
        PieceKind::Queen => is_straight(df, dr) || is_diagonal(df, dr),
        PieceKind::King => df.abs() <= 1 && dr.abs() <= 1,
    };

    shape_fits && (!piece.kind.is_slider() || path_is_clear(board, from, to))
}

fn pawn_can_move(board: &Board, pawn: &Piece, to: Square, df: i8, dr: i8) -> bool {
    let dir = pawn.color.pawn_direction();

    if df == 0 && dr == dir {
        return !board.is_occupied(to);
    }

    if df == 0 && dr == 2 * dir && !pawn.has_moved {
        let passes_through = pawn.square.offset(0, dir);
        return !board.is_occupied(to)
            && passes_through.is_some_and(|sq| !board.is_occupied(sq));
    }

    // Same-color targets were rejected earlier, so any occupant is an enemy.
    df.abs() == 1 && dr == dir && board.is_occupied(to)
}

#[inline]
fn is_straight(df: i8, dr: i8) -> bool {
    df == 0 || dr == 0
}

#[inline]
fn is_diagonal(df: i8, dr: i8) -> bool {
    df.abs() == dr.abs()
}

/// Returns true if every square strictly between `from` and `to` is empty.
///
/// The two squares must share a file, rank or diagonal.
fn path_is_clear(board: &Board, from: Square, to: Square) -> bool {
    let step_file = (to.file_index() as i8 - from.file_index() as i8).signum();
    let step_rank = (to.rank_index() as i8 - from.rank_index() as i8).signum();

    let mut current = from.offset(step_file, step_rank);
    while let Some(sq) = current {
        if sq == to {
            return true;
        }
        if board.is_occupied(sq) {
            return false;
        }
        current = sq.offset(step_file, step_rank);
    }
    // Walked off the board without meeting `to`; the squares were not aligned.
    false
}
