//! Check and checkmate detection.

use chess_core::{Color, Move, PieceKind, Square};

use crate::board::Board;
use crate::execute::relocate;
use crate::legality::{can_move_to, piece_can_move_to};

/// Returns true if any piece of color `by` could move to `square`.
///
/// This is the single attack primitive: it answers both "is this king in
/// check" and "is this castling square safe".
pub fn is_attacked(board: &Board, by: Color, square: Square) -> bool {
    board
        .pieces_of(by)
        .any(|piece| piece_can_move_to(board, piece, square))
}

/// Returns the first move for `side` that leaves its king unattacked.
///
/// `king` is the cached square of `side`'s king. Each candidate is played
/// on a scratch copy of the board, so `board` itself is never touched.
/// Pieces are tried file by file, destinations likewise.
pub fn find_king_safe_move(board: &Board, side: Color, king: Square) -> Option<Move> {
    let origins: Vec<Square> = board.pieces_of(side).map(|p| p.square).collect();

    for from in origins {
        for to in Square::all() {
            if !can_move_to(board, from, to) {
                continue;
            }

            let mut trial = board.clone();
            let Some(relocation) = relocate(&mut trial, from, to) else {
                continue;
            };
            let king_after = if relocation.moved.kind == PieceKind::King {
                to
            } else {
                king
            };

            if !is_attacked(&trial, side.opposite(), king_after) {
                return Some(Move::normal(from, to));
            }
        }
    }

    None
}

/// Returns true if `side` has at least one move that leaves its king safe.
#[inline]
pub fn has_any_legal_move(board: &Board, side: Color, king: Square) -> bool {
    find_king_safe_move(board, side, king).is_some()
}

/// Returns true if `side`'s king stands attacked with no way out.
///
/// A side with no safe move while not in check is not reported here;
/// stalemate is outside these rules.
pub fn is_checkmate(board: &Board, side: Color, king: Square) -> bool {
    is_attacked(board, side.opposite(), king) && !has_any_legal_move(board, side, king)
}
